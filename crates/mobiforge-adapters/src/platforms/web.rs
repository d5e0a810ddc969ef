//! Web (PWA) adapter: web app manifest, `package.json` and service config.

use mobiforge_core::{
    application::ports::PlatformAdapter,
    domain::{IntegratedService, KnownPlatform, MobileApp, PlatformId, StageFailure, naming},
};
use serde_json::{Map, Value, json};
use tracing::debug;

use super::{app_identifier, emit, pretty_json};
use crate::{
    design::theme::{DARK_MODE, PRIMARY_COLOR},
    services::ServiceProvider,
};

const LIGHT_BACKGROUND: &str = "#ffffff";
const DARK_BACKGROUND: &str = "#121212";

#[derive(Debug, Clone)]
pub struct WebAdapter {
    platform: PlatformId,
}

impl WebAdapter {
    pub fn new() -> Self {
        Self {
            platform: KnownPlatform::Web.into(),
        }
    }

    fn manifest(app: &MobileApp) -> Value {
        let background = match app.design_token(DARK_MODE) {
            Some("true") => DARK_BACKGROUND,
            _ => LIGHT_BACKGROUND,
        };
        json!({
            "name": app.name(),
            "short_name": app.name(),
            "start_url": "/",
            "display": "standalone",
            "theme_color": app.design_token(PRIMARY_COLOR).unwrap_or(background),
            "background_color": background,
        })
    }

    fn package_json(app: &MobileApp, package_name: &str) -> Value {
        let dependencies: Map<String, Value> = app
            .services()
            .iter()
            .flat_map(dependencies_for)
            .map(|(name, version)| (name.to_string(), Value::from(*version)))
            .collect();

        json!({
            "name": package_name,
            "version": "0.1.0",
            "private": true,
            "scripts": {
                "dev": "vite",
                "build": "vite build",
            },
            "dependencies": dependencies,
        })
    }

    fn service_glue(app: MobileApp, service: &IntegratedService) -> Result<MobileApp, StageFailure> {
        let (path, config) = match service.provider.parse::<ServiceProvider>() {
            Ok(ServiceProvider::Firebase) => (
                "web/src/firebase-config.json",
                json!({ "projectId": service.setting("project_id").unwrap_or_default() }),
            ),
            Ok(ServiceProvider::Aws) => (
                "web/src/aws-exports.json",
                json!({ "aws_project_region": service.setting("region").unwrap_or_default() }),
            ),
            Ok(ServiceProvider::Sentry) => (
                "web/src/sentry-config.json",
                json!({ "dsn": service.setting("dsn").unwrap_or_default() }),
            ),
            Err(_) => {
                debug!(provider = %service.provider, "no web glue for provider");
                return Ok(app);
            }
        };
        emit(app, path, pretty_json(&config)?)
    }
}

impl Default for WebAdapter {
    fn default() -> Self {
        Self::new()
    }
}

fn dependencies_for(service: &IntegratedService) -> &'static [(&'static str, &'static str)] {
    match service.provider.parse::<ServiceProvider>() {
        Ok(ServiceProvider::Firebase) => &[("firebase", "^10.12.0")],
        Ok(ServiceProvider::Aws) => &[("aws-amplify", "^6.3.0")],
        Ok(ServiceProvider::Sentry) => &[("@sentry/browser", "^8.9.0")],
        Err(_) => &[],
    }
}

impl PlatformAdapter for WebAdapter {
    fn platform(&self) -> &PlatformId {
        &self.platform
    }

    fn description(&self) -> String {
        "Progressive web app (web manifest, npm)".into()
    }

    fn adapt(&self, app: MobileApp) -> Result<MobileApp, StageFailure> {
        // Same identifier rule as the native platforms, kebab-cased for npm.
        app_identifier(&app)?;
        let package_name = naming::to_kebab_case(app.name());
        debug!(%package_name, "adapting for web");

        let manifest = pretty_json(&Self::manifest(&app))?;
        let package = pretty_json(&Self::package_json(&app, &package_name))?;
        let services = app.services().to_vec();

        let app = app.with_platform(self.platform.clone());
        let app = emit(app, "web/manifest.webmanifest", manifest)?;
        let app = emit(app, "web/package.json", package)?;
        services.iter().try_fold(app, Self::service_glue)
    }
}
