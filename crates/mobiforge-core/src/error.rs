//! Unified error handling for mobiforge core.
//!
//! Wraps domain and application errors behind one type with categories and
//! user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for mobiforge core operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ForgeError {
    /// Errors from the domain layer (invalid values).
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (pipeline and registries).
    #[error("{0}")]
    Application(#[from] ApplicationError),
}

impl ForgeError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Compatibility => ErrorCategory::Compatibility,
                crate::domain::ErrorCategory::NotFound => ErrorCategory::NotFound,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
        }
    }

    /// The application error inside, if any.
    pub fn as_application(&self) -> Option<&ApplicationError> {
        match self {
            Self::Application(e) => Some(e),
            _ => None,
        }
    }

    /// Check if this error is retryable.
    ///
    /// Only service integration may depend on something outside the process,
    /// so it is the one failure a caller might sensibly retry.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Application(ApplicationError::IntegrationFailed { .. })
        )
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Compatibility,
    NotFound,
    /// A strategy stage (generate, customize, integrate, adapt) failed.
    Pipeline,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type ForgeResult<T> = Result<T, ForgeError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TemplateId;

    #[test]
    fn application_errors_display_unwrapped() {
        let err: ForgeError = ApplicationError::UnknownTemplate {
            id: TemplateId::new("missing"),
        }
        .into();
        assert_eq!(err.to_string(), "Unknown template: missing");
        assert_eq!(err.category(), ErrorCategory::NotFound);
    }

    #[test]
    fn only_integration_is_retryable() {
        let integration: ForgeError = ApplicationError::IntegrationFailed {
            reason: "timeout".into(),
        }
        .into();
        let customization: ForgeError = ApplicationError::CustomizationFailed {
            reason: "bad color".into(),
        }
        .into();

        assert!(integration.is_retryable());
        assert!(!customization.is_retryable());
    }

    #[test]
    fn missing_pipeline_part_is_a_configuration_error() {
        let err: ForgeError = ApplicationError::AdapterNotConfigured {
            name: "integrator",
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert!(err.as_application().is_some());
        assert!(!err.is_retryable());
    }
}
