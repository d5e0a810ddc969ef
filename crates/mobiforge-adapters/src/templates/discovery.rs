//! Template discovery: built-ins plus manifest templates from disk.
//!
//! # Template resolution order
//!
//! Built-in templates are always registered first. Manifest templates are then
//! loaded from the first directory in this list that exists:
//!
//! 1. **explicit directory**: `--templates-dir` or `templates.local_path`.
//! 2. **`$MOBIFORGE_TEMPLATES_DIR`**: environment variable override.
//! 3. **`./templates`**: relative to the current working directory.
//!
//! Manifest templates are registered after the built-ins, so a manifest with
//! id `tabbed` replaces the built-in `tabbed`.
//!
//! # Environment variable
//!
//! ```env
//! MOBIFORGE_TEMPLATES_DIR=./templates
//! ```

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use mobiforge_core::{application::TemplateRegistry, domain::DomainError};

use super::{builtin::builtin_templates, loader::FilesystemTemplateLoader};

pub const TEMPLATES_DIR_ENV: &str = "MOBIFORGE_TEMPLATES_DIR";

/// Build a registry holding the built-ins and any discovered manifest templates.
///
/// An explicit directory that does not exist is an error; the implicit
/// candidates are skipped silently when missing.
#[instrument(skip_all, fields(explicit = ?explicit_dir))]
pub fn discover_templates(explicit_dir: Option<&Path>) -> Result<TemplateRegistry, DomainError> {
    let registry = TemplateRegistry::new();
    for template in builtin_templates() {
        registry.register(template);
    }

    if let Some(dir) = explicit_dir {
        load_into(&registry, dir)?;
        return Ok(registry);
    }

    let env_dir = std::env::var_os(TEMPLATES_DIR_ENV).map(PathBuf::from);
    if let Some(dir) = candidate_dir(env_dir) {
        load_into(&registry, &dir)?;
    }

    Ok(registry)
}

fn load_into(registry: &TemplateRegistry, dir: &Path) -> Result<(), DomainError> {
    let templates = FilesystemTemplateLoader::new(dir).load_all()?;
    info!(
        path  = %dir.display(),
        count = templates.len(),
        "manifest templates loaded"
    );
    for template in templates {
        registry.register(template);
    }
    Ok(())
}

/// The first implicit candidate directory that exists.
fn candidate_dir(env_dir: Option<PathBuf>) -> Option<PathBuf> {
    env_dir
        .into_iter()
        .chain(std::iter::once(PathBuf::from("templates")))
        .find(|candidate| {
            let exists = candidate.is_dir();
            debug!(path = %candidate.display(), exists, "checking templates candidate");
            exists
        })
}
