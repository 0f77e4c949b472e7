//! Pipeline input and output values.

use serde::Serialize;

use confound_causal::CausalGraph;
use confound_core::models::{AdjustmentSet, DiagnosticReport, Directive, EdgeList, VariableRegistry};
use confound_discovery::Sample;

/// Everything one pipeline run consumes. Borrowed, never mutated.
#[derive(Debug, Clone)]
pub struct PipelineInput {
    pub registry: VariableRegistry,
    /// Every column must be a registered variable.
    pub sample: Sample,
    /// Applied after the configured directives, so they win on the same edge.
    pub directives: Vec<Directive>,
    pub treatment: String,
    pub outcome: String,
}

impl PipelineInput {
    pub fn new(
        registry: VariableRegistry,
        sample: Sample,
        treatment: impl Into<String>,
        outcome: impl Into<String>,
    ) -> Self {
        Self {
            registry,
            sample,
            directives: Vec::new(),
            treatment: treatment.into(),
            outcome: outcome.into(),
        }
    }

    pub fn with_directives(mut self, directives: Vec<Directive>) -> Self {
        self.directives = directives;
        self
    }
}

/// The final DAG and the audit trail that produced it.
#[derive(Debug, Clone)]
pub struct StructureOutcome {
    pub graph: CausalGraph,
    pub report: DiagnosticReport,
}

#[derive(Debug, Clone, Serialize)]
pub struct PipelineOutput {
    #[serde(skip)]
    pub graph: CausalGraph,
    pub edge_list: EdgeList,
    pub adjustment_set: AdjustmentSet,
    pub report: DiagnosticReport,
}

impl PipelineOutput {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
