//! The app value threaded through the pipeline.
//!
//! Every stage receives a `MobileApp` by value and hands back the updated
//! value. Mutators therefore consume `self`; nothing in here is shared.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::domain::{
    entities::common::RelativePath,
    error::DomainError,
    value_objects::{Navigation, PlatformId, TemplateId},
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MobileApp {
    name: String,
    template: Option<TemplateId>,
    platform: Option<PlatformId>,
    layout: Layout,
    design_tokens: BTreeMap<String, String>,
    services: Vec<IntegratedService>,
    artifacts: Vec<Artifact>,
    /// Free-form notes stages leave behind (provenance, diagnostics).
    markers: Vec<String>,
}

impl MobileApp {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    // ── Accessors ────────────────────────────────────────────────────────────

    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn template(&self) -> Option<&TemplateId> {
        self.template.as_ref()
    }
    pub fn platform(&self) -> Option<&PlatformId> {
        self.platform.as_ref()
    }
    pub fn layout(&self) -> &Layout {
        &self.layout
    }
    pub fn design_tokens(&self) -> &BTreeMap<String, String> {
        &self.design_tokens
    }
    pub fn design_token(&self, key: &str) -> Option<&str> {
        self.design_tokens.get(key).map(String::as_str)
    }
    pub fn services(&self) -> &[IntegratedService] {
        &self.services
    }
    pub fn artifacts(&self) -> &[Artifact] {
        &self.artifacts
    }
    pub fn markers(&self) -> &[String] {
        &self.markers
    }

    pub fn service(&self, provider: &str) -> Option<&IntegratedService> {
        self.services.iter().find(|s| s.provider == provider)
    }

    pub fn artifact(&self, path: &str) -> Option<&Artifact> {
        self.artifacts.iter().find(|a| a.path.as_str() == path)
    }

    // ── Transformations ──────────────────────────────────────────────────────

    pub fn with_template(mut self, template: TemplateId) -> Self {
        self.template = Some(template);
        self
    }

    pub fn with_platform(mut self, platform: PlatformId) -> Self {
        self.platform = Some(platform);
        self
    }

    pub fn with_navigation(mut self, navigation: Navigation) -> Self {
        self.layout.navigation = navigation;
        self
    }

    pub fn with_screen(mut self, screen: Screen) -> Self {
        self.layout.screens.push(screen);
        self
    }

    pub fn with_design_token(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.design_tokens.insert(key.into(), value.into());
        self
    }

    /// Add or replace the integration for `service.provider`.
    pub fn with_service(mut self, service: IntegratedService) -> Self {
        match self
            .services
            .iter_mut()
            .find(|s| s.provider == service.provider)
        {
            Some(existing) => *existing = service,
            None => self.services.push(service),
        }
        self
    }

    /// Add an artifact, rejecting a path that is already taken.
    pub fn try_with_artifact(mut self, artifact: Artifact) -> Result<Self, DomainError> {
        if self.artifacts.iter().any(|a| a.path == artifact.path) {
            return Err(DomainError::DuplicateArtifact {
                path: artifact.path.to_string(),
            });
        }
        self.artifacts.push(artifact);
        Ok(self)
    }

    /// Add an artifact, replacing any existing one at the same path.
    pub fn with_artifact(mut self, artifact: Artifact) -> Self {
        self.artifacts.retain(|a| a.path != artifact.path);
        self.artifacts.push(artifact);
        self
    }

    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.markers.push(marker.into());
        self
    }

    /// Check structural invariants: unique screen names, unique artifact paths.
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut screens = HashSet::new();
        for screen in &self.layout.screens {
            if !screens.insert(screen.name.as_str()) {
                return Err(DomainError::DuplicateScreen {
                    name: screen.name.clone(),
                });
            }
        }

        let mut paths = HashSet::new();
        for artifact in &self.artifacts {
            if !paths.insert(&artifact.path) {
                return Err(DomainError::DuplicateArtifact {
                    path: artifact.path.to_string(),
                });
            }
        }

        Ok(())
    }
}

// ── Parts ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    pub navigation: Navigation,
    pub screens: Vec<Screen>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Screen {
    /// Stable identifier, unique per app (`home`, `detail`).
    pub name: String,
    pub title: String,
}

impl Screen {
    pub fn new(name: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
        }
    }
}

/// A third-party service wired into the app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegratedService {
    pub provider: String,
    pub settings: BTreeMap<String, String>,
}

impl IntegratedService {
    pub fn new(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            settings: BTreeMap::new(),
        }
    }

    pub fn with_setting(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.settings.insert(key.into(), value.into());
        self
    }

    pub fn setting(&self, key: &str) -> Option<&str> {
        self.settings.get(key).map(String::as_str)
    }
}

/// A generated text file, addressed relative to the app root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    pub path: RelativePath,
    pub content: String,
}

impl Artifact {
    pub fn new(path: impl Into<RelativePath>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    pub fn size(&self) -> usize {
        self.content.len()
    }
}
