//! Driven (output) ports - implemented by the adapters crate.
//!
//! Every port takes the app by value and returns the updated app. A strategy
//! reports failure with a bare reason; the pipeline attaches the stage.

use crate::domain::{DesignConfig, MobileApp, PlatformId, ServiceConfig, StageFailure};

/// Port for platform adaptation.
///
/// Implemented by:
/// - `mobiforge_adapters::platforms::IosAdapter`, `AndroidAdapter`, `WebAdapter`
/// - `mobiforge_adapters::platforms::IdentityAdapter` (testing, previews)
#[cfg_attr(test, mockall::automock)]
pub trait PlatformAdapter: Send + Sync {
    /// Key this adapter is registered under.
    fn platform(&self) -> &PlatformId;

    /// One-line summary for listings.
    fn description(&self) -> String {
        format!("{} adapter", self.platform())
    }

    fn adapt(&self, app: MobileApp) -> Result<MobileApp, StageFailure>;
}

/// Port for design customization.
///
/// Implemented by:
/// - `mobiforge_adapters::design::ThemeCustomizer`
/// - `mobiforge_adapters::design::PassthroughCustomizer`
#[cfg_attr(test, mockall::automock)]
pub trait DesignCustomizer: Send + Sync {
    fn apply(&self, app: MobileApp, design: &DesignConfig) -> Result<MobileApp, StageFailure>;
}

/// Port for third-party service integration.
///
/// Implemented by:
/// - `mobiforge_adapters::services::CatalogIntegrator`
/// - `mobiforge_adapters::services::PassthroughIntegrator`
#[cfg_attr(test, mockall::automock)]
pub trait ServiceIntegrator: Send + Sync {
    fn apply(&self, app: MobileApp, services: &ServiceConfig)
    -> Result<MobileApp, StageFailure>;
}
