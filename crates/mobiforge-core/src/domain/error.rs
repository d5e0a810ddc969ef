// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (for retry logic)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors (400-level equivalent)
    // ========================================================================
    #[error("invalid {kind} '{value}': {reason}")]
    InvalidIdentifier {
        kind: &'static str,
        value: String,
        reason: String,
    },

    #[error("Invalid app configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid template: {0}")]
    InvalidTemplate(String),

    #[error("Invalid design value for '{key}': {reason}")]
    InvalidDesignValue { key: String, reason: String },

    // ========================================================================
    // App structure violations
    // ========================================================================
    #[error("Duplicate artifact path: {path}")]
    DuplicateArtifact { path: String },

    #[error("Duplicate screen: {name}")]
    DuplicateScreen { name: String },

    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    // ========================================================================
    // Constraint Violations
    // ========================================================================
    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidIdentifier { kind, .. } => vec![
                format!("A {kind} must be a non-empty word without spaces"),
                "Examples: blank, tabbed, ios, android".into(),
            ],
            Self::InvalidConfig(msg) => vec![
                "Check your app configuration".into(),
                format!("Details: {msg}"),
            ],
            Self::MissingRequiredField { field } => vec![
                format!("Provide a value for '{field}'"),
                "Try: mobiforge generate --template blank --platform ios".into(),
            ],
            Self::DuplicateArtifact { path } => vec![
                format!("Two generation stages both produced '{path}'"),
                "Check custom templates for files that collide with platform output".into(),
            ],
            Self::InvalidTemplate(_) => vec![
                "Check the template.toml manifest".into(),
                "Try: mobiforge list templates".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidIdentifier { .. }
            | Self::InvalidConfig(_)
            | Self::InvalidDesignValue { .. }
            | Self::MissingRequiredField { .. } => ErrorCategory::Validation,
            Self::InvalidTemplate(_) => ErrorCategory::Validation,
            Self::DuplicateArtifact { .. } | Self::DuplicateScreen { .. } => {
                ErrorCategory::Compatibility
            }
            Self::AbsolutePathNotAllowed { .. } => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Compatibility,
    NotFound,
    Internal,
}

/// Failure reported by a pluggable strategy.
///
/// Strategies only say *why* they failed. The pipeline knows which stage ran
/// the strategy and turns this into the matching `ApplicationError` kind.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{reason}")]
pub struct StageFailure {
    pub reason: String,
}

impl StageFailure {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl From<DomainError> for StageFailure {
    fn from(err: DomainError) -> Self {
        Self::new(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_failure_displays_reason_only() {
        let failure = StageFailure::new("quota exceeded");
        assert_eq!(failure.to_string(), "quota exceeded");
    }

    #[test]
    fn domain_error_converts_into_stage_failure() {
        let failure: StageFailure = DomainError::DuplicateArtifact {
            path: "ios/Info.plist".into(),
        }
        .into();
        assert!(failure.reason.contains("ios/Info.plist"));
    }

    #[test]
    fn missing_field_is_validation() {
        let err = DomainError::MissingRequiredField { field: "platform" };
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert!(err.suggestions().iter().any(|s| s.contains("platform")));
    }
}
