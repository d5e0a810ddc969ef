//! Provenance wrapper around a finished generation run.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::entities::{app_config::AppConfig, mobile_app::MobileApp};

/// A successful run: the request, the result, and when it happened.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationRecord {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub request: AppConfig,
    pub app: MobileApp,
}

impl GenerationRecord {
    pub fn new(request: AppConfig, app: MobileApp) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            request,
            app,
        }
    }

    pub fn artifact_count(&self) -> usize {
        self.app.artifacts().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_record_gets_fresh_run_id() {
        let config = AppConfig::new("blank", "ios").unwrap();
        let a = GenerationRecord::new(config.clone(), MobileApp::default());
        let b = GenerationRecord::new(config, MobileApp::default());
        assert_ne!(a.run_id, b.run_id);
    }

    #[test]
    fn serializes_request_and_app() {
        let config = AppConfig::new("blank", "web").unwrap();
        let record = GenerationRecord::new(config, MobileApp::new("Demo"));
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["request"]["template"], "blank");
        assert_eq!(json["app"]["name"], "Demo");
        assert!(json["run_id"].is_string());
    }
}
