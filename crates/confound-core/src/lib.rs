//! # confound-core
//!
//! Foundation crate for the confound pipeline.
//! Defines variables, temporal orders, override directives, diagnostics,
//! errors, config, and constants. Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;

// Re-export the most commonly used types at the crate root.
pub use config::ConfoundConfig;
pub use errors::{ConfoundError, ConfoundResult};
pub use models::{
    AdjustmentSet, Diagnostic, DiagnosticKind, DiagnosticReport, Directive, DirectiveAction,
    EdgeList, NodeRecord, Stage, TemporalOrder, Variable, VariableKind, VariableRegistry,
};
