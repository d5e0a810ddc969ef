//! mobiforge core - the mobile app generation pipeline.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          mobiforge-cli (CLI)            │
//! │   builds AppConfig, renders results     │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │ (GenerationPipeline, CatalogService)    │
//! │   + TemplateRegistry, AdapterRegistry   │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │       Application Ports (Traits)        │
//! │ (PlatformAdapter, DesignCustomizer,     │
//! │  ServiceIntegrator)                     │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    mobiforge-adapters (Strategies)      │
//! │ (templates, ios/android/web, theme...)  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use mobiforge_core::prelude::*;
//!
//! let templates = TemplateRegistry::new();
//! templates.register(Template::from_fn(TemplateId::new("blank"), |_| Ok(MobileApp::default())));
//!
//! let adapters = AdapterRegistry::new();
//! // adapters.register(IosAdapter::new());
//!
//! let pipeline = GenerationPipeline::new(templates, adapters, customizer, integrator);
//! let app = pipeline.generate(AppConfig::new("blank", "ios")?)?;
//! # Ok::<(), ForgeError>(())
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        AdapterRegistry, ApplicationError, CatalogService, GenerationPipeline, TemplateRegistry,
        ports::{DesignCustomizer, PlatformAdapter, ServiceIntegrator},
    };
    pub use crate::domain::{
        AppConfig, DesignConfig, GenerationRecord, MobileApp, PipelineStage, PlatformId,
        ServiceConfig, StageFailure, Template, TemplateGenerator, TemplateId, TemplateMetadata,
    };
    pub use crate::error::{ForgeError, ForgeResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
