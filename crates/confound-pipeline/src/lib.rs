//! # confound-pipeline
//!
//! Runs the whole causal-structure-to-adjustment-set flow over one sample
//! and owns the tracing subscriber setup.

pub mod input;
pub mod pipeline;
pub mod tracing_setup;

pub use input::{PipelineInput, PipelineOutput, StructureOutcome};
pub use pipeline::CausalPipeline;

// Span macros expand to `$crate::tracing::...`.
#[doc(hidden)]
pub use tracing;
