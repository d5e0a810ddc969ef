//! Platform adapters.
//!
//! `ios`, `android` and `web` stamp the platform onto the app and emit the
//! platform's project files, including glue for every integrated service.
//! They never overwrite an artifact the template already produced: a
//! collision fails the stage.

pub mod android;
pub mod ios;
pub mod web;

pub use android::AndroidAdapter;
pub use ios::IosAdapter;
pub use web::WebAdapter;

use mobiforge_core::{
    application::{AdapterRegistry, ports::PlatformAdapter},
    domain::{Artifact, MobileApp, PlatformId, RelativePath, StageFailure, naming},
};

/// Default reverse-DNS prefix for bundle and package ids.
pub const DEFAULT_BUNDLE_PREFIX: &str = "com.example";

/// Registry with the ios, android and web adapters.
pub fn standard_adapters() -> AdapterRegistry {
    let registry = AdapterRegistry::new();
    registry.register(IosAdapter::new());
    registry.register(AndroidAdapter::new());
    registry.register(WebAdapter::new());
    registry
}

/// Returns the app unchanged; registered under any platform id.
#[derive(Debug, Clone)]
pub struct IdentityAdapter {
    platform: PlatformId,
}

impl IdentityAdapter {
    pub fn new(platform: impl Into<PlatformId>) -> Self {
        Self {
            platform: platform.into(),
        }
    }
}

impl PlatformAdapter for IdentityAdapter {
    fn platform(&self) -> &PlatformId {
        &self.platform
    }

    fn description(&self) -> String {
        "identity (no platform files)".into()
    }

    fn adapt(&self, app: MobileApp) -> Result<MobileApp, StageFailure> {
        Ok(app)
    }
}

// ── Shared helpers ───────────────────────────────────────────────────────────

/// Identifier derived from the app name, e.g. `"Field Notes"` -> `fieldnotes`.
pub(crate) fn app_identifier(app: &MobileApp) -> Result<String, StageFailure> {
    naming::to_identifier(app.name()).ok_or_else(|| {
        StageFailure::new(format!(
            "app name '{}' has no letters or digits to build an identifier from",
            app.name()
        ))
    })
}

/// Add an artifact, failing if the path is already taken.
pub(crate) fn emit(
    app: MobileApp,
    path: impl AsRef<str>,
    content: impl Into<String>,
) -> Result<MobileApp, StageFailure> {
    let path = RelativePath::try_new(path.as_ref())?;
    Ok(app.try_with_artifact(Artifact::new(path, content))?)
}

/// Escape text for XML attribute and element content.
pub(crate) fn xml_escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    out
}

pub(crate) fn pretty_json(value: &serde_json::Value) -> Result<String, StageFailure> {
    serde_json::to_string_pretty(value)
        .map(|json| json + "\n")
        .map_err(|e| StageFailure::new(format!("failed to encode JSON: {e}")))
}
