//! Android adapter: manifest, Gradle module, color resources and service glue.

use std::fmt::Write as _;

use mobiforge_core::{
    application::ports::PlatformAdapter,
    domain::{IntegratedService, KnownPlatform, MobileApp, PlatformId, StageFailure, naming},
};
use serde_json::json;
use tracing::debug;

use super::{DEFAULT_BUNDLE_PREFIX, app_identifier, emit, pretty_json, xml_escape};
use crate::{
    design::theme::{ACCENT_COLOR, PRIMARY_COLOR},
    services::ServiceProvider,
};

const MIN_SDK: u32 = 24;
const TARGET_SDK: u32 = 34;
const DEFAULT_PRIMARY: &str = "#6200ee";
const DEFAULT_ACCENT: &str = "#03dac5";

#[derive(Debug, Clone)]
pub struct AndroidAdapter {
    platform: PlatformId,
    package_prefix: String,
}

impl AndroidAdapter {
    pub fn new() -> Self {
        Self {
            platform: KnownPlatform::Android.into(),
            package_prefix: DEFAULT_BUNDLE_PREFIX.to_string(),
        }
    }

    pub fn with_package_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.package_prefix = prefix.into();
        self
    }

    fn manifest(app: &MobileApp, package: &str) -> String {
        let mut activities = String::from(
            "        <activity android:name=\".MainActivity\" android:exported=\"true\">\n\
             \x20           <intent-filter>\n\
             \x20               <action android:name=\"android.intent.action.MAIN\" />\n\
             \x20               <category android:name=\"android.intent.category.LAUNCHER\" />\n\
             \x20           </intent-filter>\n\
             \x20       </activity>\n",
        );
        for screen in &app.layout().screens {
            let _ = writeln!(
                activities,
                "        <activity android:name=\".{}Activity\" android:label=\"{}\" />",
                naming::to_pascal_case(&screen.name),
                xml_escape(&screen.title)
            );
        }
        if let Some(dsn) = app.service("sentry").and_then(|s| s.setting("dsn")) {
            let _ = writeln!(
                activities,
                "        <meta-data android:name=\"io.sentry.dsn\" android:value=\"{}\" />",
                xml_escape(dsn)
            );
        }

        format!(
            "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n\
             <manifest xmlns:android=\"http://schemas.android.com/apk/res/android\" \
             package=\"{package}\">\n\
             \x20   <application android:label=\"{label}\">\n\
             {activities}\
             \x20   </application>\n\
             </manifest>\n",
            label = xml_escape(app.name()),
        )
    }

    fn build_gradle(app: &MobileApp, package: &str) -> String {
        let mut gradle = String::from("plugins {\n    id 'com.android.application'\n");
        if app.service("firebase").is_some() {
            gradle.push_str("    id 'com.google.gms.google-services'\n");
        }
        let _ = write!(
            gradle,
            "}}\n\nandroid {{\n    namespace '{package}'\n    compileSdk {TARGET_SDK}\n\n    \
             defaultConfig {{\n        applicationId '{package}'\n        \
             minSdk {MIN_SDK}\n        targetSdk {TARGET_SDK}\n        \
             versionCode 1\n        versionName '1.0'\n    }}\n}}\n\ndependencies {{\n"
        );
        for dependency in app.services().iter().flat_map(dependencies_for) {
            let _ = writeln!(gradle, "    {dependency}");
        }
        gradle.push_str("}\n");
        gradle
    }

    fn colors(app: &MobileApp) -> String {
        let primary = app.design_token(PRIMARY_COLOR).unwrap_or(DEFAULT_PRIMARY);
        let accent = app.design_token(ACCENT_COLOR).unwrap_or(DEFAULT_ACCENT);
        format!(
            "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<resources>\n    \
             <color name=\"colorPrimary\">{primary}</color>\n    \
             <color name=\"colorAccent\">{accent}</color>\n</resources>\n"
        )
    }

    fn service_glue(
        app: MobileApp,
        service: &IntegratedService,
        package: &str,
    ) -> Result<MobileApp, StageFailure> {
        match service.provider.parse::<ServiceProvider>() {
            Ok(ServiceProvider::Firebase) => {
                let config = json!({
                    "project_info": {
                        "project_id": service.setting("project_id").unwrap_or_default(),
                    },
                    "client": [{
                        "client_info": {
                            "android_client_info": { "package_name": package },
                        },
                    }],
                });
                emit(app, "android/app/google-services.json", pretty_json(&config)?)
            }
            Ok(ServiceProvider::Aws) => {
                let config = json!({
                    "UserAgent": "aws-amplify-cli/2.0",
                    "Version": "1.0",
                    "region": service.setting("region").unwrap_or_default(),
                });
                emit(
                    app,
                    "android/app/src/main/res/raw/amplifyconfiguration.json",
                    pretty_json(&config)?,
                )
            }
            // Sentry is configured through the manifest.
            Ok(ServiceProvider::Sentry) => Ok(app),
            Err(_) => {
                debug!(provider = %service.provider, "no Android glue for provider");
                Ok(app)
            }
        }
    }
}

impl Default for AndroidAdapter {
    fn default() -> Self {
        Self::new()
    }
}

fn dependencies_for(service: &IntegratedService) -> &'static [&'static str] {
    match service.provider.parse::<ServiceProvider>() {
        Ok(ServiceProvider::Firebase) => &[
            "implementation platform('com.google.firebase:firebase-bom:33.1.0')",
            "implementation 'com.google.firebase:firebase-analytics'",
        ],
        Ok(ServiceProvider::Aws) => &["implementation 'com.amplifyframework:core:2.19.1'"],
        Ok(ServiceProvider::Sentry) => &["implementation 'io.sentry:sentry-android:7.10.0'"],
        Err(_) => &[],
    }
}

impl PlatformAdapter for AndroidAdapter {
    fn platform(&self) -> &PlatformId {
        &self.platform
    }

    fn description(&self) -> String {
        format!("Android API {MIN_SDK}+ (Gradle)")
    }

    fn adapt(&self, app: MobileApp) -> Result<MobileApp, StageFailure> {
        let package = format!("{}.{}", self.package_prefix, app_identifier(&app)?);
        debug!(%package, "adapting for Android");

        let manifest = Self::manifest(&app, &package);
        let gradle = Self::build_gradle(&app, &package);
        let colors = Self::colors(&app);
        let services = app.services().to_vec();

        let app = app.with_platform(self.platform.clone());
        let app = emit(app, "android/app/src/main/AndroidManifest.xml", manifest)?;
        let app = emit(app, "android/app/build.gradle", gradle)?;
        let app = emit(app, "android/app/src/main/res/values/colors.xml", colors)?;
        services
            .iter()
            .try_fold(app, |app, service| Self::service_glue(app, service, &package))
    }
}
