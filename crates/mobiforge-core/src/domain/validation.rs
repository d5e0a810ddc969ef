use crate::domain::{
    entities::{AppConfig, MobileApp},
    error::DomainError,
};

/// Centralized domain validation.
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_config(config: &AppConfig) -> Result<(), DomainError> {
        if config.name().trim().is_empty() {
            return Err(DomainError::InvalidConfig("app name cannot be blank".into()));
        }
        Ok(())
    }

    /// Structural checks on a finished app.
    pub fn validate_app(app: &MobileApp) -> Result<(), DomainError> {
        app.validate()
    }
}
