//! Domain override layer: applies caller-asserted `add` / `remove`
//! directives in order on a working copy of the filtered graph.
//!
//! An addition that contradicts the temporal order is skipped and reported
//! (or fails in strict mode). If the finished batch leaves a cycle, the
//! whole batch is rejected and the input graph is untouched.

use tracing::{debug, info, warn};

use confound_core::config::OverrideConfig;
use confound_core::errors::OverrideError;
use confound_core::models::{
    Diagnostic, DiagnosticKind, Directive, DirectiveAction, Stage, TemporalOrder,
};

use crate::graph::{CausalEdgeWeight, CausalGraph, EdgeOrigin};

#[derive(Debug, Clone)]
pub struct OverrideOutcome {
    /// Final acyclic graph.
    pub graph: CausalGraph,
    pub diagnostics: Vec<Diagnostic>,
    pub applied: usize,
    pub rejected: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct OverrideLayer<'a> {
    order: &'a TemporalOrder,
    strict_temporal: bool,
}

impl<'a> OverrideLayer<'a> {
    pub fn new(order: &'a TemporalOrder) -> Self {
        Self {
            order,
            strict_temporal: false,
        }
    }

    pub fn from_config(order: &'a TemporalOrder, config: &OverrideConfig) -> Self {
        Self {
            order,
            strict_temporal: config.strict_temporal,
        }
    }

    pub fn strict(mut self, strict_temporal: bool) -> Self {
        self.strict_temporal = strict_temporal;
        self
    }

    /// Apply `directives` in order. Names not already in the graph become
    /// latent nodes.
    pub fn apply(
        &self,
        graph: &CausalGraph,
        directives: &[Directive],
    ) -> Result<OverrideOutcome, OverrideError> {
        let mut working = graph.clone();
        let mut diagnostics = Vec::new();
        let mut applied = 0;
        let mut rejected = 0;

        for directive in directives {
            let (source, target) = (directive.source.as_str(), directive.target.as_str());
            match directive.action {
                DirectiveAction::Add => {
                    if let Some(reason) = self.order.violation(source, target) {
                        if self.strict_temporal {
                            return Err(OverrideError::TemporalViolation {
                                cause: source.to_string(),
                                effect: target.to_string(),
                                reason,
                            });
                        }
                        warn!(%source, %target, %reason, "rejected temporally impossible directive");
                        rejected += 1;
                        diagnostics.push(Diagnostic::for_edge(
                            Stage::Overrides,
                            DiagnosticKind::OverrideRejected,
                            source,
                            target,
                            format!("{}: {reason}", directive.describe()),
                        ));
                        continue;
                    }
                    if source == target {
                        rejected += 1;
                        diagnostics.push(Diagnostic::for_edge(
                            Stage::Overrides,
                            DiagnosticKind::OverrideRejected,
                            source,
                            target,
                            format!("{}: self-loop", directive.describe()),
                        ));
                        continue;
                    }

                    working.ensure_latent(source);
                    working.ensure_latent(target);
                    let detail = if working.has_edge(source, target) {
                        if let Some(weight) = working.edge_weight_mut(source, target) {
                            weight.origin = EdgeOrigin::Domain;
                        }
                        format!("{} (edge already present)", directive.describe())
                    } else {
                        // Endpoints exist and differ, so the insert cannot fail.
                        let _ = working.add_edge_with(source, target, CausalEdgeWeight::domain());
                        directive.describe()
                    };
                    applied += 1;
                    debug!(%source, %target, "applied add directive");
                    diagnostics.push(Diagnostic::for_edge(
                        Stage::Overrides,
                        DiagnosticKind::OverrideApplied,
                        source,
                        target,
                        detail,
                    ));
                }
                DirectiveAction::Remove => {
                    let detail = if working.remove_edge(source, target) {
                        directive.describe()
                    } else {
                        format!("{} (edge absent, no-op)", directive.describe())
                    };
                    applied += 1;
                    debug!(%source, %target, "applied remove directive");
                    diagnostics.push(Diagnostic::for_edge(
                        Stage::Overrides,
                        DiagnosticKind::OverrideApplied,
                        source,
                        target,
                        detail,
                    ));
                }
            }
        }

        if let Some(cycle) = working.find_cycle() {
            warn!(cycle_len = cycle.len(), "directive batch rejected: cycle");
            return Err(OverrideError::DomainOverrideCycle { cycle });
        }

        info!(applied, rejected, edges = working.edge_count(), "domain overrides applied");
        Ok(OverrideOutcome {
            graph: working,
            diagnostics,
            applied,
            rejected,
        })
    }
}
