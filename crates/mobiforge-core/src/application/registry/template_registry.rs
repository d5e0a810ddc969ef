//! Templates keyed by id.

use tracing::debug;

use super::Entries;
use crate::{
    application::ApplicationError,
    domain::{Template, TemplateId},
};

/// Thread-safe template registry.
///
/// Re-registering an id replaces the previous template: the last write wins.
#[derive(Clone, Default)]
pub struct TemplateRegistry {
    entries: Entries<TemplateId, Template>,
}

impl TemplateRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the entry for `template.id()`.
    pub fn register(&self, template: Template) {
        let id = template.id().clone();
        if self.entries.insert(id.clone(), template) {
            debug!(template = %id, "Template overwritten");
        } else {
            debug!(template = %id, "Template registered");
        }
    }

    /// Look up the template registered under `id`.
    pub fn resolve(&self, id: &TemplateId) -> Result<Template, ApplicationError> {
        self.entries
            .get(id)
            .ok_or_else(|| ApplicationError::UnknownTemplate { id: id.clone() })
    }

    /// Remove a template, returning whether it was registered.
    pub fn remove(&self, id: &TemplateId) -> bool {
        self.entries.remove(id)
    }

    pub fn contains(&self, id: &TemplateId) -> bool {
        self.entries.contains(id)
    }

    /// Registered ids, sorted.
    pub fn ids(&self) -> Vec<TemplateId> {
        self.entries.keys()
    }

    /// Registered templates, sorted by id.
    pub fn list(&self) -> Vec<Template> {
        self.entries.values().into_iter().map(|(_, t)| t).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Number of `resolve` calls made through any clone of this registry.
    pub fn lookup_count(&self) -> usize {
        self.entries.lookup_count()
    }
}

impl std::fmt::Debug for TemplateRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateRegistry")
            .field("ids", &self.ids())
            .finish()
    }
}
