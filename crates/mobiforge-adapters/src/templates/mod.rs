//! Template strategies: compiled-in templates and `template.toml` manifests.

pub mod builtin;
pub mod discovery;
pub mod loader;
pub mod render;

pub use builtin::builtin_templates;
pub use discovery::{TEMPLATES_DIR_ENV, discover_templates};
pub use loader::{FilesystemTemplateLoader, ManifestGenerator, TemplateManifest};
pub use render::RenderContext;
