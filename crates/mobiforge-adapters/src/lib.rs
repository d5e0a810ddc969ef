//! Concrete strategies for mobiforge.
//!
//! This crate implements the ports defined in `mobiforge-core::application::ports`
//! and the template generators the registries hold. All file system access
//! (template manifests) lives here.

pub mod design;
pub mod platforms;
pub mod services;
pub mod templates;

pub use design::{PassthroughCustomizer, ThemeCustomizer};
pub use platforms::{AndroidAdapter, IdentityAdapter, IosAdapter, WebAdapter, standard_adapters};
pub use services::{CatalogIntegrator, PassthroughIntegrator, ServiceProvider};
pub use templates::{FilesystemTemplateLoader, builtin_templates, discover_templates};

use mobiforge_core::application::{AdapterRegistry, GenerationPipeline, TemplateRegistry};

/// Pipeline wired with the theme customizer and the catalog integrator.
pub fn standard_pipeline(templates: TemplateRegistry, adapters: AdapterRegistry) -> GenerationPipeline {
    GenerationPipeline::new(
        templates,
        adapters,
        Box::new(ThemeCustomizer::new()),
        Box::new(CatalogIntegrator::new()),
    )
}
