//! Application layer for mobiforge.
//!
//! This layer contains:
//! - **Services**: `GenerationPipeline` and `CatalogService`
//! - **Registries**: template and platform-adapter lookup tables
//! - **Ports**: strategy traits implemented by `mobiforge-adapters`
//! - **Errors**: the pipeline error taxonomy
//!
//! Business rules on values live in `crate::domain`; this layer only
//! sequences them.

pub mod error;
pub mod ports;
pub mod registry;
pub mod services;

pub use services::{
    CatalogService, GenerationPipeline, GenerationPipelineBuilder, PlatformInfo, TemplateInfo,
};

pub use registry::{AdapterRegistry, TemplateRegistry};

pub use ports::{DesignCustomizer, PlatformAdapter, ServiceIntegrator};

pub use error::ApplicationError;
