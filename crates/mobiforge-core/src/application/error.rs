//! Application layer errors.
//!
//! One variant per way a generation run can stop. Strategy failures arrive as
//! `StageFailure` and are tagged here with the stage that produced them.

use thiserror::Error;

use crate::domain::{PipelineStage, PlatformId, TemplateId};
use crate::error::ErrorCategory;

/// Errors that occur during pipeline orchestration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApplicationError {
    /// No template registered under the requested id.
    #[error("Unknown template: {id}")]
    UnknownTemplate { id: TemplateId },

    /// No adapter registered for the requested platform.
    #[error("Unsupported platform: {platform}")]
    UnsupportedPlatform { platform: PlatformId },

    #[error("Template '{template}' failed to generate: {reason}")]
    GenerationFailed { template: TemplateId, reason: String },

    #[error("Design customization failed: {reason}")]
    CustomizationFailed { reason: String },

    #[error("Service integration failed: {reason}")]
    IntegrationFailed { reason: String },

    #[error("Adaptation to '{platform}' failed: {reason}")]
    AdaptationFailed { platform: PlatformId, reason: String },

    /// Port/Adapter not configured.
    #[error("Required component not configured: {name}")]
    AdapterNotConfigured { name: &'static str },
}

impl ApplicationError {
    /// The pipeline stage this error stopped at, if it came from a run.
    pub fn stage(&self) -> Option<PipelineStage> {
        match self {
            Self::UnknownTemplate { .. } => Some(PipelineStage::ResolveTemplate),
            Self::GenerationFailed { .. } => Some(PipelineStage::Generate),
            Self::CustomizationFailed { .. } => Some(PipelineStage::Customize),
            Self::IntegrationFailed { .. } => Some(PipelineStage::Integrate),
            Self::UnsupportedPlatform { .. } => Some(PipelineStage::ResolveAdapter),
            Self::AdaptationFailed { .. } => Some(PipelineStage::Adapt),
            Self::AdapterNotConfigured { .. } => None,
        }
    }

    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::UnknownTemplate { id } => vec![
                format!("No template is registered as '{id}' (ids are case-sensitive)"),
                "Try: mobiforge list templates".into(),
                "Or point --templates-dir at a directory of template manifests".into(),
            ],
            Self::UnsupportedPlatform { platform } => vec![
                format!("No adapter is registered for '{platform}'"),
                "Try: mobiforge list platforms".into(),
            ],
            Self::GenerationFailed { template, .. } => vec![
                format!("Check the files of template '{template}'"),
                "Run with -vv to see the generation trace".into(),
            ],
            Self::CustomizationFailed { .. } => vec![
                "Check the --design values and the [design] section of your config".into(),
                "Colors must be #RGB or #RRGGBB; navigation is none, stack, tabs or drawer"
                    .into(),
            ],
            Self::IntegrationFailed { .. } => vec![
                "Check the --service values and the [services] section of your config".into(),
                "Supported providers: firebase (project_id), aws (region), sentry (dsn)".into(),
            ],
            Self::AdaptationFailed { .. } => vec![
                "The app name must contain at least one letter or digit".into(),
                "Run with -vv to see which artifact was rejected".into(),
            ],
            Self::AdapterNotConfigured { name } => vec![
                format!("Required component not configured: {name}"),
                "This is likely a configuration error".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnknownTemplate { .. } | Self::UnsupportedPlatform { .. } => {
                ErrorCategory::NotFound
            }
            Self::GenerationFailed { .. }
            | Self::CustomizationFailed { .. }
            | Self::IntegrationFailed { .. }
            | Self::AdaptationFailed { .. } => ErrorCategory::Pipeline,
            Self::AdapterNotConfigured { .. } => ErrorCategory::Configuration,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_run_error_knows_its_stage() {
        let err = ApplicationError::UnsupportedPlatform {
            platform: PlatformId::new("unknown-os"),
        };
        assert_eq!(err.stage(), Some(PipelineStage::ResolveAdapter));
        assert_eq!(err.to_string(), "Unsupported platform: unknown-os");

        let err = ApplicationError::AdapterNotConfigured { name: "integrator" };
        assert_eq!(err.stage(), None);
    }

    #[test]
    fn lookup_failures_are_not_found() {
        let err = ApplicationError::UnknownTemplate {
            id: TemplateId::new("missing"),
        };
        assert_eq!(err.category(), ErrorCategory::NotFound);
        assert!(err.suggestions().iter().any(|s| s.contains("list templates")));
    }

    #[test]
    fn strategy_failures_are_pipeline_errors() {
        let err = ApplicationError::IntegrationFailed {
            reason: "quota exceeded".into(),
        };
        assert_eq!(err.category(), ErrorCategory::Pipeline);
        assert_eq!(err.to_string(), "Service integration failed: quota exceeded");
    }
}
