//! Filesystem-based template loader.
//!
//! Discovers and parses `template.toml` manifests from a directory tree and
//! turns each into a [`Template`] whose generator replays the manifest.
//!
//! # Directory layout expected
//!
//! ```text
//! templates/
//! ├── shop/
//! │   ├── template.toml        ← manifest (required)
//! │   ├── README.md            ← becomes an artifact
//! │   └── assets/
//! │       └── strings.txt
//! └── onboarding/
//!     └── template.toml
//! ```
//!
//! # `template.toml` format
//!
//! ```toml
//! [template]
//! id = "shop"                 # registry key, case-sensitive
//!
//! [metadata]
//! name        = "Shop"
//! description = "Catalog with cart"   # optional
//! tags        = ["commerce"]          # optional
//!
//! [layout]
//! navigation = "tabs"         # none | stack | tabs | drawer (default none)
//!
//! [[screens]]
//! name  = "catalog"
//! title = "Catalog"
//! ```
//!
//! Every other file under the template directory becomes an artifact at the
//! same relative path, with `{{APP_NAME}}`-style placeholders substituted at
//! generation time.

use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

use mobiforge_core::domain::{
    AppConfig, Artifact, DomainError, MobileApp, Navigation, RelativePath, Screen, StageFailure,
    Template, TemplateGenerator, TemplateId, TemplateMetadata,
};

use super::render::RenderContext;

const MANIFEST_FILE: &str = "template.toml";

// ── Manifest types ────────────────────────────────────────────────────────────

/// Deserialised representation of a `template.toml` file.
#[derive(Debug, Deserialize, Clone)]
pub struct TemplateManifest {
    pub template: TemplateSection,
    pub metadata: MetadataSection,
    #[serde(default)]
    pub layout: LayoutSection,
    #[serde(default)]
    pub screens: Vec<ScreenEntry>,
}

/// `[template]` section.
#[derive(Debug, Deserialize, Clone)]
pub struct TemplateSection {
    pub id: String,
}

/// `[metadata]` section.
#[derive(Debug, Deserialize, Clone)]
pub struct MetadataSection {
    /// Display name shown in `mobiforge list templates`.
    pub name: String,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct LayoutSection {
    pub navigation: Option<String>,
}

/// One entry under `[[screens]]`.
#[derive(Debug, Deserialize, Clone)]
pub struct ScreenEntry {
    pub name: String,
    /// Defaults to `name` when omitted.
    pub title: Option<String>,
}

// ── Generator ─────────────────────────────────────────────────────────────────

/// Generator backed by a parsed manifest and the files next to it.
#[derive(Debug, Clone)]
pub struct ManifestGenerator {
    id: TemplateId,
    navigation: Navigation,
    screens: Vec<Screen>,
    files: Vec<(RelativePath, String)>,
}

impl TemplateGenerator for ManifestGenerator {
    fn generate(&self, config: &AppConfig) -> Result<MobileApp, StageFailure> {
        let ctx = RenderContext::for_config(config);

        let app = self.screens.iter().fold(
            MobileApp::new(config.name())
                .with_template(self.id.clone())
                .with_navigation(self.navigation),
            |app, screen| app.with_screen(screen.clone()),
        );

        self.files.iter().try_fold(app, |app, (path, source)| {
            app.try_with_artifact(Artifact::new(path.clone(), ctx.render(source)))
                .map_err(StageFailure::from)
        })
    }
}

// ── Loader ────────────────────────────────────────────────────────────────────

/// Loads [`Template`] objects from a directory tree of `template.toml` manifests.
///
/// Each immediate subdirectory of `templates_dir` that contains a valid
/// `template.toml` is one template. Subdirectories that are missing the
/// manifest, or whose manifest is invalid, emit a `WARN` log and are skipped.
///
/// # Example
///
/// ```no_run
/// use mobiforge_adapters::templates::FilesystemTemplateLoader;
///
/// let loader = FilesystemTemplateLoader::new("./templates");
/// let templates = loader.load_all()?;
/// println!("Loaded {} templates", templates.len());
/// # Ok::<(), mobiforge_core::domain::DomainError>(())
/// ```
pub struct FilesystemTemplateLoader {
    templates_dir: PathBuf,
}

impl FilesystemTemplateLoader {
    pub fn new(templates_dir: impl Into<PathBuf>) -> Self {
        Self {
            templates_dir: templates_dir.into(),
        }
    }

    pub fn templates_dir(&self) -> &Path {
        &self.templates_dir
    }

    /// Load every valid template found under the templates directory.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidTemplate`] if the directory does not
    /// exist or cannot be read. Individual bad templates are skipped.
    #[instrument(skip(self), fields(dir = %self.templates_dir.display()))]
    pub fn load_all(&self) -> Result<Vec<Template>, DomainError> {
        if !self.templates_dir.is_dir() {
            return Err(DomainError::InvalidTemplate(format!(
                "templates directory not found: {}",
                self.templates_dir.display()
            )));
        }

        let read_dir = fs::read_dir(&self.templates_dir).map_err(|e| {
            DomainError::InvalidTemplate(format!(
                "failed to read templates directory '{}': {e}",
                self.templates_dir.display()
            ))
        })?;

        let mut dirs: Vec<PathBuf> = read_dir
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.is_dir())
            .collect();
        // Stable order so that duplicate ids resolve the same way every run.
        dirs.sort();

        let mut templates = Vec::new();
        for dir in dirs {
            match load_template_from_dir(&dir) {
                Ok(template) => {
                    debug!(id = %template.id(), "loaded template");
                    templates.push(template);
                }
                Err(e) => {
                    warn!(
                        dir   = %dir.display(),
                        error = %e,
                        "skipping template directory due to load error"
                    );
                }
            }
        }

        debug!(count = templates.len(), "finished loading templates");
        Ok(templates)
    }
}

/// Load a single template from one directory.
#[instrument(skip(dir), fields(dir = %dir.display()))]
pub fn load_template_from_dir(dir: &Path) -> Result<Template, DomainError> {
    let manifest_path = dir.join(MANIFEST_FILE);
    if !manifest_path.is_file() {
        return Err(DomainError::InvalidTemplate(format!(
            "missing {MANIFEST_FILE} in '{}'",
            dir.display()
        )));
    }

    let raw = fs::read_to_string(&manifest_path).map_err(|e| {
        DomainError::InvalidTemplate(format!("failed to read '{}': {e}", manifest_path.display()))
    })?;

    let manifest: TemplateManifest = toml::from_str(&raw).map_err(|e| {
        DomainError::InvalidTemplate(format!("failed to parse '{}': {e}", manifest_path.display()))
    })?;

    let id = TemplateId::parse(&manifest.template.id)?;
    let navigation = match &manifest.layout.navigation {
        Some(raw) => raw.parse::<Navigation>()?,
        None => Navigation::None,
    };
    let screens = parse_screens(&manifest.screens)?;
    let files = collect_files(dir)?;

    let metadata = TemplateMetadata::new(manifest.metadata.name)
        .description(manifest.metadata.description.unwrap_or_default())
        .tags(manifest.metadata.tags.unwrap_or_default());

    let generator = ManifestGenerator {
        id: id.clone(),
        navigation,
        screens,
        files,
    };

    Ok(Template::new(id, generator).with_metadata(metadata))
}

fn parse_screens(entries: &[ScreenEntry]) -> Result<Vec<Screen>, DomainError> {
    let mut seen = HashSet::new();
    entries
        .iter()
        .map(|entry| {
            let name = entry.name.trim();
            if name.is_empty() {
                return Err(DomainError::InvalidTemplate("screen name cannot be empty".into()));
            }
            if !seen.insert(name.to_string()) {
                return Err(DomainError::DuplicateScreen {
                    name: name.to_string(),
                });
            }
            let title = entry.title.clone().unwrap_or_else(|| name.to_string());
            Ok(Screen::new(name, title))
        })
        .collect()
}

/// Read every file under `dir` except the manifest, sorted by path.
fn collect_files(dir: &Path) -> Result<Vec<(RelativePath, String)>, DomainError> {
    let mut files = Vec::new();

    for walk_entry in WalkDir::new(dir).min_depth(1).sort_by_file_name() {
        let walk_entry = walk_entry
            .map_err(|e| DomainError::InvalidTemplate(format!("directory walk error: {e}")))?;

        // Skip directories, symlinks and other special types.
        if !walk_entry.file_type().is_file() {
            continue;
        }

        let abs_path = walk_entry.path();
        let rel = abs_path.strip_prefix(dir).map_err(|_| {
            DomainError::InvalidTemplate(format!(
                "failed to relativise '{}' against '{}'",
                abs_path.display(),
                dir.display()
            ))
        })?;

        if rel == Path::new(MANIFEST_FILE) {
            continue;
        }

        let content = fs::read_to_string(abs_path).map_err(|e| {
            DomainError::InvalidTemplate(format!(
                "failed to read file '{}': {e}",
                rel.display()
            ))
        })?;

        let normalized = normalize_path(&rel.to_string_lossy());
        files.push((RelativePath::try_new(normalized)?, content));
    }

    Ok(files)
}

/// Normalise a filesystem path to forward slashes so Windows and Unix paths
/// produce the same artifact paths.
fn normalize_path(path: &str) -> String {
    path.replace('\\', "/")
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    /// Write one template directory named `slot` under `root`.
    fn write_template(root: &Path, slot: &str, manifest: &str, files: &[(&str, &str)]) {
        let dir = root.join(slot);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(MANIFEST_FILE), manifest).unwrap();

        for (rel_path, content) in files {
            let full = dir.join(rel_path);
            if let Some(parent) = full.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(full, content).unwrap();
        }
    }

    const MINIMAL_MANIFEST: &str = r#"
[template]
id = "tpl"

[metadata]
name = "Test Template"
"#;

    const SHOP_MANIFEST: &str = r#"
[template]
id = "shop"

[metadata]
name        = "Shop"
description = "Catalog with cart"
tags        = ["commerce", "tabs"]

[layout]
navigation = "tabs"

[[screens]]
name  = "catalog"
title = "Catalog"

[[screens]]
name = "cart"
"#;

    fn config(template: &str) -> AppConfig {
        AppConfig::builder()
            .name("Corner Store")
            .template(template)
            .platform("web")
            .build()
            .unwrap()
    }

    // ── load_all ──────────────────────────────────────────────────────────

    #[test]
    fn load_all_returns_error_for_missing_dir() {
        let loader = FilesystemTemplateLoader::new("/absolutely/does/not/exist");
        assert!(matches!(
            loader.load_all(),
            Err(DomainError::InvalidTemplate(_))
        ));
    }

    #[test]
    fn load_all_skips_files_at_top_level() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("README.md"), "not a template").unwrap();
        write_template(temp.path(), "tpl", MINIMAL_MANIFEST, &[]);

        let templates = FilesystemTemplateLoader::new(temp.path()).load_all().unwrap();
        assert_eq!(templates.len(), 1);
    }

    #[test]
    fn load_all_continues_when_one_template_is_invalid() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("no-manifest")).unwrap();
        write_template(temp.path(), "broken", "[template\nid=", &[]);
        write_template(temp.path(), "good", MINIMAL_MANIFEST, &[]);

        let templates = FilesystemTemplateLoader::new(temp.path()).load_all().unwrap();
        assert_eq!(templates.len(), 1, "bad templates should be skipped");
        assert_eq!(templates[0].id().as_str(), "tpl");
    }

    // ── manifest parsing ──────────────────────────────────────────────────

    #[test]
    fn loads_metadata_layout_and_screens() {
        let temp = TempDir::new().unwrap();
        write_template(temp.path(), "shop", SHOP_MANIFEST, &[]);

        let template = load_template_from_dir(&temp.path().join("shop")).unwrap();
        assert_eq!(template.id().as_str(), "shop");
        assert_eq!(template.metadata().name, "Shop");
        assert_eq!(template.metadata().description, "Catalog with cart");
        assert_eq!(template.metadata().tags, ["commerce", "tabs"]);

        let app = template.generate(&config("shop")).unwrap();
        assert_eq!(app.layout().navigation, Navigation::Tabs);
        assert_eq!(app.layout().screens[0], Screen::new("catalog", "Catalog"));
        assert_eq!(app.layout().screens[1], Screen::new("cart", "cart"));
    }

    #[test]
    fn unknown_navigation_is_rejected() {
        let temp = TempDir::new().unwrap();
        let manifest = format!("{MINIMAL_MANIFEST}\n[layout]\nnavigation = \"carousel\"\n");
        write_template(temp.path(), "tpl", &manifest, &[]);

        assert!(matches!(
            load_template_from_dir(&temp.path().join("tpl")),
            Err(DomainError::InvalidDesignValue { .. })
        ));
    }

    #[test]
    fn duplicate_screens_are_rejected() {
        let temp = TempDir::new().unwrap();
        let manifest = format!(
            "{MINIMAL_MANIFEST}\n[[screens]]\nname = \"home\"\n\n[[screens]]\nname = \"home\"\n"
        );
        write_template(temp.path(), "tpl", &manifest, &[]);

        assert!(matches!(
            load_template_from_dir(&temp.path().join("tpl")),
            Err(DomainError::DuplicateScreen { .. })
        ));
    }

    // ── artifacts ─────────────────────────────────────────────────────────

    #[test]
    fn files_become_rendered_artifacts() {
        let temp = TempDir::new().unwrap();
        write_template(
            temp.path(),
            "shop",
            SHOP_MANIFEST,
            &[
                ("README.md", "# {{APP_NAME}} ({{TEMPLATE_ID}})"),
                ("assets/strings.txt", "title={{APP_NAME_PASCAL}} on {{PLATFORM}}"),
            ],
        );

        let template = load_template_from_dir(&temp.path().join("shop")).unwrap();
        let app = template.generate(&config("shop")).unwrap();

        assert_eq!(app.artifacts().len(), 2);
        assert_eq!(app.artifact("README.md").unwrap().content, "# Corner Store (shop)");
        assert_eq!(
            app.artifact("assets/strings.txt").unwrap().content,
            "title=CornerStore on web"
        );
        assert!(app.artifact(MANIFEST_FILE).is_none());
    }

    #[test]
    fn nested_directories_are_discovered() {
        let temp = TempDir::new().unwrap();
        write_template(
            temp.path(),
            "tpl",
            MINIMAL_MANIFEST,
            &[("a/b/c/deep.txt", "deep"), ("top.txt", "top")],
        );

        let template = load_template_from_dir(&temp.path().join("tpl")).unwrap();
        let app = template.generate(&config("tpl")).unwrap();
        assert!(app.artifact("a/b/c/deep.txt").is_some());
        assert!(app.artifact("top.txt").is_some());
    }

    #[test]
    fn normalize_path_replaces_backslashes() {
        assert_eq!(normalize_path(r"assets\icons\app.svg"), "assets/icons/app.svg");
    }
}
