//! Catalog Service - read-only listings over the registries.

use serde::Serialize;

use crate::application::registry::{AdapterRegistry, TemplateRegistry};

/// Information about a template for display purposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateInfo {
    pub id: String,
    pub name: String,
    pub description: String,
    pub tags: Vec<String>,
}

/// Information about a platform adapter for display purposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlatformInfo {
    pub platform: String,
    pub description: String,
}

#[derive(Debug, Clone)]
pub struct CatalogService {
    templates: TemplateRegistry,
    adapters: AdapterRegistry,
}

impl CatalogService {
    pub fn new(templates: TemplateRegistry, adapters: AdapterRegistry) -> Self {
        Self {
            templates,
            adapters,
        }
    }

    /// All registered templates, sorted by id.
    pub fn list_templates(&self) -> Vec<TemplateInfo> {
        self.templates
            .list()
            .into_iter()
            .map(|t| TemplateInfo {
                id: t.id().to_string(),
                name: t.metadata().name.clone(),
                description: t.metadata().description.clone(),
                tags: t.metadata().tags.clone(),
            })
            .collect()
    }

    /// All registered platforms, sorted by platform id.
    pub fn list_platforms(&self) -> Vec<PlatformInfo> {
        self.adapters
            .list()
            .into_iter()
            .map(|a| PlatformInfo {
                platform: a.platform().to_string(),
                description: a.description(),
            })
            .collect()
    }
}
