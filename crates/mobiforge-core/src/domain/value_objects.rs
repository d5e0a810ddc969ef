//! Domain value objects: identifiers, platforms, navigation, pipeline stages.
//!
//! # Design
//!
//! These are pure value types with equality-by-value and no identity. They
//! define their string representations and parsers, nothing else.
//!
//! # Case rules
//!
//! - `TemplateId` is case-sensitive: `Tabbed` and `tabbed` are two templates.
//! - `PlatformId` is normalised to lowercase on construction, so `"iOS"`,
//!   `"IOS"` and `"ios"` are the same platform everywhere.

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── Identifier validation ────────────────────────────────────────────────────

fn check_identifier(kind: &'static str, raw: &str) -> Result<String, DomainError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(DomainError::InvalidIdentifier {
            kind,
            value: raw.to_string(),
            reason: "cannot be empty".into(),
        });
    }
    if trimmed.chars().any(char::is_whitespace) {
        return Err(DomainError::InvalidIdentifier {
            kind,
            value: raw.to_string(),
            reason: "cannot contain whitespace".into(),
        });
    }
    Ok(trimmed.to_string())
}

// ── TemplateId ───────────────────────────────────────────────────────────────

/// Identifier a template is registered and resolved under.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TemplateId(String);

impl TemplateId {
    /// Create a template id.
    ///
    /// # Panics
    /// Panics if `id` is blank or contains whitespace (use `parse` for fallible).
    pub fn new(id: impl AsRef<str>) -> Self {
        match Self::parse(id.as_ref()) {
            Ok(id) => id,
            Err(e) => panic!("{e}"),
        }
    }

    /// Fallible constructor.
    pub fn parse(id: &str) -> Result<Self, DomainError> {
        check_identifier("template id", id).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for TemplateId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for TemplateId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<TemplateId> for String {
    fn from(id: TemplateId) -> Self {
        id.0
    }
}

// ── PlatformId ───────────────────────────────────────────────────────────────

/// Identifier of a target platform, always lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PlatformId(String);

impl PlatformId {
    /// Create a platform id, lowercasing the input.
    ///
    /// # Panics
    /// Panics if `platform` is blank or contains whitespace (use `parse` for fallible).
    pub fn new(platform: impl AsRef<str>) -> Self {
        match Self::parse(platform.as_ref()) {
            Ok(id) => id,
            Err(e) => panic!("{e}"),
        }
    }

    /// Fallible constructor.
    pub fn parse(platform: &str) -> Result<Self, DomainError> {
        check_identifier("platform", platform).map(|p| Self(p.to_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The canonical platform this id names, if any.
    pub fn known(&self) -> Option<KnownPlatform> {
        self.0.parse().ok()
    }
}

impl fmt::Display for PlatformId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for PlatformId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for PlatformId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<PlatformId> for String {
    fn from(id: PlatformId) -> Self {
        id.0
    }
}

impl From<KnownPlatform> for PlatformId {
    fn from(platform: KnownPlatform) -> Self {
        Self(platform.as_str().to_string())
    }
}

// ── KnownPlatform ────────────────────────────────────────────────────────────

/// Canonical platform values shipped adapters are registered under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KnownPlatform {
    Ios,
    Android,
    Web,
}

impl KnownPlatform {
    pub const ALL: [KnownPlatform; 3] = [Self::Ios, Self::Android, Self::Web];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ios => "ios",
            Self::Android => "android",
            Self::Web => "web",
        }
    }
}

impl fmt::Display for KnownPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KnownPlatform {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ios" => Ok(Self::Ios),
            "android" => Ok(Self::Android),
            "web" => Ok(Self::Web),
            other => Err(DomainError::InvalidIdentifier {
                kind: "platform",
                value: other.to_string(),
                reason: "not one of ios, android, web".into(),
            }),
        }
    }
}

// ── Navigation ───────────────────────────────────────────────────────────────

/// Top-level navigation style of a generated app.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Navigation {
    #[default]
    None,
    Stack,
    Tabs,
    Drawer,
}

impl Navigation {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Stack => "stack",
            Self::Tabs => "tabs",
            Self::Drawer => "drawer",
        }
    }
}

impl fmt::Display for Navigation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Navigation {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "stack" => Ok(Self::Stack),
            "tabs" | "tabbed" => Ok(Self::Tabs),
            "drawer" => Ok(Self::Drawer),
            other => Err(DomainError::InvalidDesignValue {
                key: "navigation".into(),
                reason: format!("unknown navigation style '{other}'"),
            }),
        }
    }
}

// ── PipelineStage ────────────────────────────────────────────────────────────

/// The ordered steps of one generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PipelineStage {
    ResolveTemplate,
    Generate,
    Customize,
    Integrate,
    ResolveAdapter,
    Adapt,
}

impl PipelineStage {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ResolveTemplate => "resolve-template",
            Self::Generate => "generate",
            Self::Customize => "customize",
            Self::Integrate => "integrate",
            Self::ResolveAdapter => "resolve-adapter",
            Self::Adapt => "adapt",
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
