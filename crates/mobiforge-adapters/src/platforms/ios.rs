//! iOS adapter: `Info.plist`, `Podfile` and per-service configuration.

use std::fmt::Write as _;

use mobiforge_core::{
    application::ports::PlatformAdapter,
    domain::{IntegratedService, KnownPlatform, MobileApp, PlatformId, StageFailure, naming},
};
use serde_json::json;
use tracing::debug;

use super::{DEFAULT_BUNDLE_PREFIX, app_identifier, emit, pretty_json, xml_escape};
use crate::{design::theme::DARK_MODE, services::ServiceProvider};

const DEPLOYMENT_TARGET: &str = "16.0";

#[derive(Debug, Clone)]
pub struct IosAdapter {
    platform: PlatformId,
    bundle_prefix: String,
}

impl IosAdapter {
    pub fn new() -> Self {
        Self {
            platform: KnownPlatform::Ios.into(),
            bundle_prefix: DEFAULT_BUNDLE_PREFIX.to_string(),
        }
    }

    pub fn with_bundle_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.bundle_prefix = prefix.into();
        self
    }

    fn info_plist(app: &MobileApp, bundle_id: &str) -> String {
        let mut entries = vec![
            ("CFBundleDisplayName", xml_escape(app.name())),
            ("CFBundleIdentifier", bundle_id.to_string()),
            ("CFBundleShortVersionString", "1.0".to_string()),
            ("MinimumOSVersion", DEPLOYMENT_TARGET.to_string()),
        ];
        if app.design_token(DARK_MODE) == Some("true") {
            entries.push(("UIUserInterfaceStyle", "Dark".to_string()));
        }
        if let Some(dsn) = app.service("sentry").and_then(|s| s.setting("dsn")) {
            entries.push(("SentryDSN", xml_escape(dsn)));
        }

        let mut plist = String::from(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <!DOCTYPE plist PUBLIC \"-//Apple//DTD PLIST 1.0//EN\" \
             \"http://www.apple.com/DTDs/PropertyList-1.0.dtd\">\n\
             <plist version=\"1.0\">\n<dict>\n",
        );
        for (key, value) in entries {
            let _ = writeln!(plist, "    <key>{key}</key>\n    <string>{value}</string>");
        }
        plist.push_str("</dict>\n</plist>\n");
        plist
    }

    fn podfile(app: &MobileApp) -> String {
        let mut podfile = format!(
            "platform :ios, '{DEPLOYMENT_TARGET}'\n\ntarget '{}' do\n  use_frameworks!\n",
            naming::to_pascal_case(app.name())
        );
        for pod in app.services().iter().flat_map(pods_for) {
            let _ = writeln!(podfile, "  pod '{pod}'");
        }
        podfile.push_str("end\n");
        podfile
    }

    fn service_glue(
        app: MobileApp,
        service: &IntegratedService,
        bundle_id: &str,
    ) -> Result<MobileApp, StageFailure> {
        match service.provider.parse::<ServiceProvider>() {
            Ok(ServiceProvider::Firebase) => {
                let project_id = xml_escape(service.setting("project_id").unwrap_or_default());
                emit(
                    app,
                    "ios/GoogleService-Info.plist",
                    format!(
                        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<plist version=\"1.0\">\n<dict>\n    \
                         <key>PROJECT_ID</key>\n    <string>{project_id}</string>\n    \
                         <key>BUNDLE_ID</key>\n    <string>{bundle_id}</string>\n</dict>\n</plist>\n"
                    ),
                )
            }
            Ok(ServiceProvider::Aws) => {
                let config = json!({
                    "UserAgent": "aws-amplify-cli/2.0",
                    "Version": "1.0",
                    "region": service.setting("region").unwrap_or_default(),
                });
                emit(app, "ios/amplifyconfiguration.json", pretty_json(&config)?)
            }
            // Sentry is configured through Info.plist.
            Ok(ServiceProvider::Sentry) => Ok(app),
            Err(_) => {
                debug!(provider = %service.provider, "no iOS glue for provider");
                Ok(app)
            }
        }
    }
}

impl Default for IosAdapter {
    fn default() -> Self {
        Self::new()
    }
}

fn pods_for(service: &IntegratedService) -> &'static [&'static str] {
    match service.provider.parse::<ServiceProvider>() {
        Ok(ServiceProvider::Firebase) => &["FirebaseCore", "FirebaseAnalytics"],
        Ok(ServiceProvider::Aws) => &["Amplify"],
        Ok(ServiceProvider::Sentry) => &["Sentry"],
        Err(_) => &[],
    }
}

impl PlatformAdapter for IosAdapter {
    fn platform(&self) -> &PlatformId {
        &self.platform
    }

    fn description(&self) -> String {
        format!("iOS {DEPLOYMENT_TARGET}+ (Info.plist, CocoaPods)")
    }

    fn adapt(&self, app: MobileApp) -> Result<MobileApp, StageFailure> {
        let bundle_id = format!("{}.{}", self.bundle_prefix, app_identifier(&app)?);
        debug!(%bundle_id, "adapting for iOS");

        let info_plist = Self::info_plist(&app, &bundle_id);
        let podfile = Self::podfile(&app);
        let services = app.services().to_vec();

        let app = emit(app.with_platform(self.platform.clone()), "ios/Info.plist", info_plist)?;
        let app = emit(app, "ios/Podfile", podfile)?;
        services
            .iter()
            .try_fold(app, |app, service| Self::service_glue(app, service, &bundle_id))
    }
}
