//! Core domain layer for mobiforge.
//!
//! Pure values and invariants. No I/O and no registries live here: the
//! application layer owns orchestration, the adapters crate owns concrete
//! strategies.
//!
//! - **Identifiers** (`TemplateId`, `PlatformId`) are validated on construction.
//! - **Values** (`AppConfig`, `MobileApp`) are `Clone + PartialEq` and move
//!   through the pipeline by ownership.
//! - **Templates** pair an id with a `TemplateGenerator`.

pub mod entities;
pub mod error;
pub mod naming;
pub mod value_objects;

mod validation;

pub use entities::{
    AppConfig, AppConfigBuilder, Artifact, DEFAULT_APP_NAME, DesignConfig, FnGenerator,
    GenerationRecord, IntegratedService, Layout, MobileApp, RelativePath, Screen, ServiceConfig,
    Template, TemplateGenerator, TemplateMetadata,
};
pub use error::{DomainError, ErrorCategory, StageFailure};
pub use validation::DomainValidator;
pub use value_objects::{KnownPlatform, Navigation, PipelineStage, PlatformId, TemplateId};
