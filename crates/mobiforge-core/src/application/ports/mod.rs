//! Application ports (traits) for pluggable strategies.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: called by the pipeline, implemented in
//!   `mobiforge-adapters`
//!   - `PlatformAdapter`: platform-specific transform, keyed by platform id
//!   - `DesignCustomizer`: applies design settings
//!   - `ServiceIntegrator`: wires third-party services
//!
//! Template generation is a domain concept (`domain::TemplateGenerator`).

pub mod output;

pub use output::{DesignCustomizer, PlatformAdapter, ServiceIntegrator};

#[cfg(test)]
pub use output::{MockDesignCustomizer, MockPlatformAdapter, MockServiceIntegrator};
