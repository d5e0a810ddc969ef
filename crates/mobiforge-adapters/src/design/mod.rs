//! Design customizers.

pub mod theme;

pub use theme::ThemeCustomizer;

use mobiforge_core::{
    application::ports::DesignCustomizer,
    domain::{DesignConfig, MobileApp, StageFailure},
};

/// Ignores the design configuration and returns the app unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughCustomizer;

impl DesignCustomizer for PassthroughCustomizer {
    fn apply(&self, app: MobileApp, _design: &DesignConfig) -> Result<MobileApp, StageFailure> {
        Ok(app)
    }
}
