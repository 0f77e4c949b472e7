//! Pipeline orchestrator.
//!
//! Discovery → Consensus → Temporal filter → Domain overrides → Backdoor solver.
//! Each stage takes one graph by value and hands an owned, acyclic graph to
//! the next; every dropped, broken, or injected edge lands in the report.

use std::time::Instant;

use tracing::{info, warn};

use confound_causal::{BackdoorSolver, CausalGraph, ConsensusBuilder, OverrideLayer, TemporalFilter};
use confound_core::errors::{AdjustmentError, VariableError};
use confound_core::models::{
    AdjustmentSet, Diagnostic, DiagnosticKind, DiagnosticReport, Stage, TemporalOrder,
};
use confound_core::{ConfoundConfig, ConfoundResult};
use confound_discovery::DiscoveryAdapter;

use crate::input::{PipelineInput, PipelineOutput, StructureOutcome};
use crate::{consensus_span, discovery_span, overrides_span, solver_span, temporal_span};

pub struct CausalPipeline {
    config: ConfoundConfig,
    adapter: DiscoveryAdapter,
}

impl CausalPipeline {
    /// Validate `config` and build the configured discovery algorithms.
    pub fn new(config: ConfoundConfig) -> ConfoundResult<Self> {
        config.validate()?;
        let adapter = DiscoveryAdapter::from_config(&config.discovery)?;
        Ok(Self { config, adapter })
    }

    /// Use a caller-built adapter instead of the configured algorithms.
    pub fn with_adapter(config: ConfoundConfig, adapter: DiscoveryAdapter) -> ConfoundResult<Self> {
        config.validate()?;
        Ok(Self { config, adapter })
    }

    pub fn config(&self) -> &ConfoundConfig {
        &self.config
    }

    /// Full run: learn the final DAG, then solve for the input's pair.
    pub fn run(&self, input: &PipelineInput) -> ConfoundResult<PipelineOutput> {
        let start = Instant::now();
        let StructureOutcome { graph, report } = self.learn_structure(input)?;
        let adjustment_set = self.solve(&graph, &input.treatment, &input.outcome)?;
        info!(
            treatment = %input.treatment,
            outcome = %input.outcome,
            adjustment = ?adjustment_set.names(),
            edges = graph.edge_count(),
            diagnostics = report.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "pipeline complete"
        );
        Ok(PipelineOutput {
            edge_list: graph.to_edge_list(),
            graph,
            adjustment_set,
            report,
        })
    }

    /// Everything up to and including the domain overrides.
    pub fn learn_structure(&self, input: &PipelineInput) -> ConfoundResult<StructureOutcome> {
        validate_input(input)?;
        let order = TemporalOrder::from_registry(&input.registry)
            .with_precedence(self.config.temporal.precedence.iter().cloned())?;
        let mut report = DiagnosticReport::new();

        let candidates = {
            let _span = discovery_span!(self.adapter.algorithm_names().len(), input.sample.n_rows())
                .entered();
            let outcome = self.adapter.run(&input.sample);
            report.extend(outcome.failures.iter().map(|(algorithm, error)| {
                Diagnostic::new(
                    Stage::Discovery,
                    DiagnosticKind::AlgorithmFailed,
                    format!("{algorithm}: {error}"),
                )
            }));
            outcome.candidates
        };

        let consensus = {
            let _span = consensus_span!(candidates.len()).entered();
            ConsensusBuilder::from_config(&self.config.consensus).build(candidates)?
        };
        report.extend(consensus.diagnostics);

        let filtered = {
            let _span = temporal_span!(consensus.graph.edge_count()).entered();
            TemporalFilter::new(&order).apply(consensus.graph)
        };
        report.extend(filtered.diagnostics);

        let directives: Vec<_> = self
            .config
            .overrides
            .directives
            .iter()
            .chain(&input.directives)
            .cloned()
            .collect();
        let overridden = {
            let _span = overrides_span!(directives.len()).entered();
            OverrideLayer::from_config(&order, &self.config.overrides)
                .apply(&filtered.graph, &directives)?
        };
        report.extend(overridden.diagnostics);

        if overridden.rejected > 0 {
            warn!(rejected = overridden.rejected, "some domain directives were rejected");
        }
        Ok(StructureOutcome {
            graph: overridden.graph,
            report,
        })
    }

    /// Adjustment set for another pair over an already-built DAG.
    pub fn solve(
        &self,
        graph: &CausalGraph,
        treatment: &str,
        outcome: &str,
    ) -> Result<AdjustmentSet, AdjustmentError> {
        let _span = solver_span!(treatment, outcome).entered();
        BackdoorSolver::from_config(graph, &self.config.solver).solve(treatment, outcome)
    }
}

/// Every sample column and both query endpoints must be registered.
fn validate_input(input: &PipelineInput) -> ConfoundResult<()> {
    if let Some(name) = input
        .sample
        .names()
        .iter()
        .find(|name| !input.registry.contains(name))
    {
        return Err(VariableError::Unregistered { name: name.clone() }.into());
    }
    for name in [&input.treatment, &input.outcome] {
        if !input.registry.contains(name) {
            return Err(AdjustmentError::UnknownVariable { name: name.clone() }.into());
        }
    }
    Ok(())
}
