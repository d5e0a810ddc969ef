//! The generation request: which template, which platform, and the opaque
//! design and service payloads handed to the strategies.
//!
//! An `AppConfig` is immutable once built. Identifier *shape* (non-empty, no
//! whitespace) is checked here; whether a template or adapter actually exists
//! is only known when the pipeline resolves it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{
    error::DomainError,
    value_objects::{PlatformId, TemplateId},
};

/// Display name used when the request does not carry one.
pub const DEFAULT_APP_NAME: &str = "MyApp";

// ── AppConfig ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_name")]
    name: String,
    #[serde(rename = "template")]
    template_id: TemplateId,
    platform: PlatformId,
    #[serde(default)]
    design: DesignConfig,
    #[serde(default)]
    services: ServiceConfig,
}

fn default_name() -> String {
    DEFAULT_APP_NAME.to_string()
}

impl AppConfig {
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Shorthand for a request with default name and empty payloads.
    pub fn new(template_id: &str, platform: &str) -> Result<Self, DomainError> {
        Self::builder().template(template_id).platform(platform).build()
    }

    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn template_id(&self) -> &TemplateId {
        &self.template_id
    }
    pub fn platform(&self) -> &PlatformId {
        &self.platform
    }
    pub fn design(&self) -> &DesignConfig {
        &self.design
    }
    pub fn services(&self) -> &ServiceConfig {
        &self.services
    }
}

// ── Builder ──────────────────────────────────────────────────────────────────

/// Builder for [`AppConfig`]. Identifiers are validated at `build()`.
#[derive(Debug, Default, Clone)]
pub struct AppConfigBuilder {
    name: Option<String>,
    template: Option<String>,
    platform: Option<String>,
    design: DesignConfig,
    services: ServiceConfig,
}

impl AppConfigBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    pub fn platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = Some(platform.into());
        self
    }

    pub fn design(mut self, design: DesignConfig) -> Self {
        self.design = design;
        self
    }

    pub fn services(mut self, services: ServiceConfig) -> Self {
        self.services = services;
        self
    }

    pub fn build(self) -> Result<AppConfig, DomainError> {
        let template = self
            .template
            .ok_or(DomainError::MissingRequiredField { field: "template" })?;
        let platform = self
            .platform
            .ok_or(DomainError::MissingRequiredField { field: "platform" })?;

        let name = match self.name {
            Some(name) if name.trim().is_empty() => {
                return Err(DomainError::InvalidConfig("app name cannot be blank".into()));
            }
            Some(name) => name.trim().to_string(),
            None => default_name(),
        };

        Ok(AppConfig {
            name,
            template_id: TemplateId::parse(&template)?,
            platform: PlatformId::parse(&platform)?,
            design: self.design,
            services: self.services,
        })
    }
}

// ── DesignConfig ─────────────────────────────────────────────────────────────

/// Design settings for the customizer, as ordered key/value pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DesignConfig {
    settings: BTreeMap<String, String>,
}

impl DesignConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Insert or replace one setting.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.settings.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.settings.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.settings.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.settings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.settings.is_empty()
    }
}

impl FromIterator<(String, String)> for DesignConfig {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            settings: iter.into_iter().collect(),
        }
    }
}

// ── ServiceConfig ────────────────────────────────────────────────────────────

/// Third-party services for the integrator: `provider -> settings`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceConfig {
    providers: BTreeMap<String, BTreeMap<String, String>>,
}

impl ServiceConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable a provider without settings (no-op if already enabled).
    pub fn enable(mut self, provider: impl Into<String>) -> Self {
        self.providers.entry(provider.into()).or_default();
        self
    }

    pub fn with(
        mut self,
        provider: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.set(provider, key, value);
        self
    }

    pub fn set(
        &mut self,
        provider: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.providers
            .entry(provider.into())
            .or_default()
            .insert(key.into(), value.into());
    }

    pub fn get(&self, provider: &str) -> Option<&BTreeMap<String, String>> {
        self.providers.get(provider)
    }

    pub fn providers(&self) -> impl Iterator<Item = (&str, &BTreeMap<String, String>)> {
        self.providers.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Merge `other` into `self`; settings in `other` win.
    pub fn merge(mut self, other: ServiceConfig) -> Self {
        for (provider, settings) in other.providers {
            self.providers.entry(provider).or_default().extend(settings);
        }
        self
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}
