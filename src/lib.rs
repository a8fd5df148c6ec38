//! connector-migrate - batch upgrades for connector plugins
//!
//! This crate migrates connector projects from the paramgen code-generation
//! model to the declarative `connector.yaml` specification. The interesting
//! part is the structural source-patching engine in [`engine`]; the
//! [`steps`] module holds the individual migrations and [`pipeline`] runs
//! them in order, fail-fast.

pub mod engine;
pub mod pipeline;
pub mod steps;
pub mod util;

pub use engine::capability::{CapabilitySet, DESTINATION_LIFECYCLE, SOURCE_LIFECYCLE};
pub use engine::patch::{Edit, Patch, Span};
pub use engine::source::SourceFile;
pub use engine::EngineError;
pub use pipeline::{MigrationStep, Pipeline, PipelineError, PipelineState};
pub use steps::{default_pipeline, step_named, step_names};
