//! Application services - orchestrate use cases.
//!
//! `GenerationPipeline` runs one generation; `CatalogService` answers
//! "what can I generate with".

pub mod catalog_service;
pub mod generation_pipeline;

pub use catalog_service::{CatalogService, PlatformInfo, TemplateInfo};
pub use generation_pipeline::{GenerationPipeline, GenerationPipelineBuilder};
