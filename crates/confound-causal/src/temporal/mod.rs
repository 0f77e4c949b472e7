//! Temporal filter: drops every edge whose effect is strictly earlier than
//! its cause. Same-rank edges stay; any same-rank cycle left over is broken
//! with the consensus tie-break.

use tracing::{debug, info};

use confound_core::models::{Diagnostic, DiagnosticKind, Stage, TemporalOrder};

use crate::graph::{break_cycles, CausalGraph};

#[derive(Debug, Clone)]
pub struct TemporalFilterOutcome {
    /// Acyclic graph with no temporally impossible edges.
    pub graph: CausalGraph,
    pub diagnostics: Vec<Diagnostic>,
    pub removed: usize,
}

/// Applies a borrowed, caller-owned temporal order.
#[derive(Debug, Clone, Copy)]
pub struct TemporalFilter<'a> {
    order: &'a TemporalOrder,
}

impl<'a> TemporalFilter<'a> {
    pub fn new(order: &'a TemporalOrder) -> Self {
        Self { order }
    }

    pub fn apply(&self, mut graph: CausalGraph) -> TemporalFilterOutcome {
        let mut diagnostics = Vec::new();
        let mut removed = 0;

        for (cause, effect) in graph.edges() {
            if let Some(reason) = self.order.violation(&cause, &effect) {
                graph.remove_edge(&cause, &effect);
                removed += 1;
                debug!(%cause, %effect, %reason, "dropped temporally impossible edge");
                diagnostics.push(Diagnostic::for_edge(
                    Stage::Temporal,
                    DiagnosticKind::TemporalViolation,
                    &cause,
                    &effect,
                    reason,
                ));
            }
        }

        for broken in break_cycles(&mut graph) {
            removed += 1;
            diagnostics.push(Diagnostic::for_edge(
                Stage::Temporal,
                DiagnosticKind::CycleBroken,
                &broken.source,
                &broken.target,
                format!(
                    "removed weakest same-rank edge ({} votes) from cycle of length {}",
                    broken.votes,
                    broken.cycle.len()
                ),
            ));
        }

        info!(removed, edges = graph.edge_count(), "temporal filter applied");
        TemporalFilterOutcome {
            graph,
            diagnostics,
            removed,
        }
    }
}
