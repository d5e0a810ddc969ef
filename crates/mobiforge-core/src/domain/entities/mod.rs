pub mod app_config;
pub mod common;
pub mod generation_record;
pub mod mobile_app;
pub mod template;

pub use crate::domain::DomainError;
pub use app_config::{AppConfig, AppConfigBuilder, DEFAULT_APP_NAME, DesignConfig, ServiceConfig};
pub use common::RelativePath;
pub use generation_record::GenerationRecord;
pub use mobile_app::{Artifact, IntegratedService, Layout, MobileApp, Screen};
pub use template::{FnGenerator, Template, TemplateGenerator, TemplateMetadata};
