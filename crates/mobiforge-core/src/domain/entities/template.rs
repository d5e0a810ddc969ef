//! Templates: a named generator producing the initial `MobileApp`.
//!
//! ## Structure
//!
//! ```text
//! Template
//! ├── TemplateId        - registry key
//! ├── TemplateMetadata  - display name, description, tags
//! └── Arc<dyn TemplateGenerator>
//!       └── generate(&AppConfig) -> MobileApp
//! ```
//!
//! A `Template` is a cheap handle: cloning it clones the `Arc`, so every
//! clone resolved from a registry shares the generator that was registered.

use std::fmt;
use std::sync::Arc;

use crate::domain::{
    entities::{app_config::AppConfig, mobile_app::MobileApp},
    error::StageFailure,
    value_objects::TemplateId,
};

/// Generation strategy behind a template.
///
/// Implementations must be pure: the same `AppConfig` yields the same app.
#[cfg_attr(test, mockall::automock)]
pub trait TemplateGenerator: Send + Sync {
    fn generate(&self, config: &AppConfig) -> Result<MobileApp, StageFailure>;
}

/// Adapter turning a plain function into a [`TemplateGenerator`].
pub struct FnGenerator<F>(F);

impl<F> TemplateGenerator for FnGenerator<F>
where
    F: Fn(&AppConfig) -> Result<MobileApp, StageFailure> + Send + Sync,
{
    fn generate(&self, config: &AppConfig) -> Result<MobileApp, StageFailure> {
        (self.0)(config)
    }
}

/// Human-facing information about a template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateMetadata {
    pub name: String,
    pub description: String,
    pub tags: Vec<String>,
}

impl TemplateMetadata {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }
}

#[derive(Clone)]
pub struct Template {
    id: TemplateId,
    metadata: TemplateMetadata,
    generator: Arc<dyn TemplateGenerator>,
}

impl Template {
    pub fn new(id: TemplateId, generator: impl TemplateGenerator + 'static) -> Self {
        Self::from_shared(id, Arc::new(generator))
    }

    pub fn from_shared(id: TemplateId, generator: Arc<dyn TemplateGenerator>) -> Self {
        Self {
            metadata: TemplateMetadata::new(id.as_str()),
            id,
            generator,
        }
    }

    /// Wrap a closure as a template.
    ///
    /// ```rust
    /// use mobiforge_core::domain::{MobileApp, Template, TemplateId};
    ///
    /// let blank = Template::from_fn(TemplateId::new("blank"), |_| Ok(MobileApp::default()));
    /// assert_eq!(blank.id().as_str(), "blank");
    /// ```
    pub fn from_fn<F>(id: TemplateId, f: F) -> Self
    where
        F: Fn(&AppConfig) -> Result<MobileApp, StageFailure> + Send + Sync + 'static,
    {
        Self::new(id, FnGenerator(f))
    }

    pub fn with_metadata(mut self, metadata: TemplateMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn id(&self) -> &TemplateId {
        &self.id
    }

    pub fn metadata(&self) -> &TemplateMetadata {
        &self.metadata
    }

    pub fn generate(&self, config: &AppConfig) -> Result<MobileApp, StageFailure> {
        self.generator.generate(config)
    }

    /// Whether both handles share one generator instance.
    pub fn same_as(&self, other: &Template) -> bool {
        self.id == other.id && Arc::ptr_eq(&self.generator, &other.generator)
    }
}

impl fmt::Debug for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Template")
            .field("id", &self.id)
            .field("metadata", &self.metadata)
            .finish_non_exhaustive()
    }
}
