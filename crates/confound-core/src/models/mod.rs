//! Domain models shared by every pipeline stage.

pub mod adjustment_set;
pub mod diagnostics;
pub mod directive;
pub mod edge_list;
pub mod temporal_order;
pub mod variable;

pub use adjustment_set::AdjustmentSet;
pub use diagnostics::{Diagnostic, DiagnosticKind, DiagnosticReport, Stage};
pub use directive::{Directive, DirectiveAction};
pub use edge_list::{EdgeList, NodeRecord};
pub use temporal_order::TemporalOrder;
pub use variable::{Variable, VariableKind, VariableRegistry};
