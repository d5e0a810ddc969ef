//! Service integrators.

pub mod catalog;

pub use catalog::{CatalogIntegrator, ServiceProvider};

use mobiforge_core::{
    application::ports::ServiceIntegrator,
    domain::{MobileApp, ServiceConfig, StageFailure},
};

/// Ignores the service configuration and returns the app unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughIntegrator;

impl ServiceIntegrator for PassthroughIntegrator {
    fn apply(&self, app: MobileApp, _services: &ServiceConfig) -> Result<MobileApp, StageFailure> {
        Ok(app)
    }
}
