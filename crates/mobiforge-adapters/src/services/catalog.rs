//! Service integrator backed by a fixed catalog of providers.

use std::{
    collections::{BTreeMap, HashMap},
    fmt,
    str::FromStr,
};

use mobiforge_core::{
    application::ports::ServiceIntegrator,
    domain::{IntegratedService, MobileApp, ServiceConfig, StageFailure},
};
use tracing::debug;

/// Providers the catalog knows how to wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceProvider {
    Firebase,
    Aws,
    Sentry,
}

impl ServiceProvider {
    pub const ALL: [ServiceProvider; 3] = [Self::Firebase, Self::Aws, Self::Sentry];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Firebase => "firebase",
            Self::Aws => "aws",
            Self::Sentry => "sentry",
        }
    }

    /// Settings that must be present for the provider to be usable.
    pub const fn required_settings(&self) -> &'static [&'static str] {
        match self {
            Self::Firebase => &["project_id"],
            Self::Aws => &["region"],
            Self::Sentry => &["dsn"],
        }
    }
}

impl fmt::Display for ServiceProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceProvider {
    type Err = StageFailure;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "firebase" => Ok(Self::Firebase),
            "aws" | "amplify" => Ok(Self::Aws),
            "sentry" => Ok(Self::Sentry),
            other => Err(StageFailure::new(format!(
                "unknown service provider '{other}' (supported: firebase, aws, sentry)"
            ))),
        }
    }
}

/// Integrates every provider in the service configuration.
///
/// Fails on the first unknown provider or missing required setting, and when
/// two configured names (such as `aws` and `amplify`) map to one provider.
#[derive(Debug, Clone, Copy, Default)]
pub struct CatalogIntegrator;

impl CatalogIntegrator {
    pub fn new() -> Self {
        Self
    }

    fn integrate(
        provider: ServiceProvider,
        settings: &BTreeMap<String, String>,
    ) -> Result<IntegratedService, StageFailure> {
        let missing: Vec<&str> = provider
            .required_settings()
            .iter()
            .copied()
            .filter(|key| settings.get(*key).is_none_or(|v| v.trim().is_empty()))
            .collect();

        if !missing.is_empty() {
            return Err(StageFailure::new(format!(
                "{provider} requires setting(s): {}",
                missing.join(", ")
            )));
        }

        Ok(settings.iter().fold(
            IntegratedService::new(provider.as_str()),
            |service, (key, value)| service.with_setting(key, value),
        ))
    }
}

impl ServiceIntegrator for CatalogIntegrator {
    fn apply(
        &self,
        app: MobileApp,
        services: &ServiceConfig,
    ) -> Result<MobileApp, StageFailure> {
        let mut seen: HashMap<ServiceProvider, &str> = HashMap::new();
        services.providers().try_fold(app, |app, (name, settings)| {
            let provider: ServiceProvider = name.parse()?;
            if let Some(first) = seen.insert(provider, name) {
                return Err(StageFailure::new(format!(
                    "{provider} configured twice (as '{first}' and '{name}')"
                )));
            }
            let service = Self::integrate(provider, settings)?;
            debug!(%provider, settings = settings.len(), "service integrated");
            Ok(app.with_service(service))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(services: ServiceConfig) -> Result<MobileApp, StageFailure> {
        CatalogIntegrator::new().apply(MobileApp::new("Demo"), &services)
    }

    #[test]
    fn integrates_known_providers() {
        let app = apply(
            ServiceConfig::new()
                .with("firebase", "project_id", "demo-123")
                .with("aws", "region", "eu-west-1")
                .with("aws", "bucket", "assets"),
        )
        .unwrap();

        assert_eq!(app.services().len(), 2);
        assert_eq!(
            app.service("firebase").unwrap().setting("project_id"),
            Some("demo-123")
        );
        assert_eq!(app.service("aws").unwrap().setting("bucket"), Some("assets"));
    }

    #[test]
    fn alias_is_stored_under_canonical_name() {
        let app = apply(ServiceConfig::new().with("Amplify", "region", "us-east-1")).unwrap();
        assert!(app.service("aws").is_some());
    }

    #[test]
    fn alias_and_canonical_name_together_fail() {
        let err = apply(
            ServiceConfig::new()
                .with("aws", "region", "eu-west-1")
                .with("amplify", "region", "us-east-1"),
        )
        .unwrap_err();
        assert_eq!(err.reason, "aws configured twice (as 'amplify' and 'aws')");
    }

    #[test]
    fn missing_required_setting_fails() {
        let err = apply(ServiceConfig::new().enable("sentry")).unwrap_err();
        assert_eq!(err.reason, "sentry requires setting(s): dsn");
    }

    #[test]
    fn unknown_provider_fails() {
        let err = apply(ServiceConfig::new().enable("parse")).unwrap_err();
        assert!(err.reason.contains("unknown service provider 'parse'"));
    }

    #[test]
    fn no_services_is_noop() {
        assert_eq!(apply(ServiceConfig::new()).unwrap(), MobileApp::new("Demo"));
    }
}
