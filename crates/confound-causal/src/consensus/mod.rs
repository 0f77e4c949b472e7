//! Consensus builder: merges candidate graphs by per-direction edge voting.
//!
//! For each unordered pair the votes for `u -> v` and `v -> u` are tallied
//! across candidates. A direction enters the consensus only with at least
//! `quorum` votes. When both directions reach quorum the strictly larger
//! count wins and an exact tie drops the edge. The result is then made
//! acyclic by removing the weakest edge of each remaining cycle.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, info, warn};

use confound_core::config::ConsensusConfig;
use confound_core::constants;
use confound_core::errors::ConsensusError;
use confound_core::models::{Diagnostic, DiagnosticKind, Stage};

use crate::graph::{break_cycles, CausalEdgeWeight, CausalGraph};

/// One discovery algorithm's output. Consumed by the builder.
#[derive(Debug, Clone)]
pub struct CandidateGraph {
    pub algorithm: String,
    pub graph: CausalGraph,
}

impl CandidateGraph {
    pub fn new(algorithm: impl Into<String>, graph: CausalGraph) -> Self {
        Self {
            algorithm: algorithm.into(),
            graph,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct PairVotes {
    /// Votes for `lo -> hi` (names ordered).
    forward: usize,
    /// Votes for `hi -> lo`.
    backward: usize,
}

/// Counters from one consensus run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConsensusStats {
    pub candidates: usize,
    pub pairs_considered: usize,
    pub edges_accepted: usize,
    pub ties: usize,
    pub below_quorum: usize,
    pub cycles_broken: usize,
}

#[derive(Debug, Clone)]
pub struct ConsensusOutcome {
    /// Acyclic consensus graph.
    pub graph: CausalGraph,
    pub diagnostics: Vec<Diagnostic>,
    pub stats: ConsensusStats,
}

#[derive(Debug, Clone)]
pub struct ConsensusBuilder {
    quorum: usize,
    min_candidates: usize,
}

impl ConsensusBuilder {
    pub fn new(quorum: usize) -> Self {
        Self {
            quorum: quorum.max(1),
            min_candidates: constants::MIN_CONSENSUS_CANDIDATES,
        }
    }

    pub fn from_config(config: &ConsensusConfig) -> Self {
        Self {
            quorum: config.quorum.max(1),
            min_candidates: config.min_candidates.max(constants::MIN_CONSENSUS_CANDIDATES),
        }
    }

    pub fn quorum(&self) -> usize {
        self.quorum
    }

    /// Merge candidates into one acyclic consensus graph.
    pub fn build(&self, candidates: Vec<CandidateGraph>) -> Result<ConsensusOutcome, ConsensusError> {
        if candidates.len() < self.min_candidates {
            return Err(ConsensusError::InsufficientCandidates {
                succeeded: candidates.len(),
                required: self.min_candidates,
            });
        }
        if self.quorum > candidates.len() {
            warn!(
                quorum = self.quorum,
                candidates = candidates.len(),
                "quorum exceeds candidate count; consensus will be empty"
            );
        }

        let mut nodes: BTreeMap<String, bool> = BTreeMap::new();
        let mut votes: BTreeMap<(String, String), PairVotes> = BTreeMap::new();
        for candidate in &candidates {
            for name in candidate.graph.node_names() {
                let observed = candidate.graph.is_observed(&name);
                let entry = nodes.entry(name).or_insert(observed);
                *entry = *entry && observed;
            }
            // A candidate contributes at most one vote per direction.
            let edges: BTreeSet<(String, String)> = candidate.graph.edges().into_iter().collect();
            for (source, target) in edges {
                if source < target {
                    votes.entry((source, target)).or_default().forward += 1;
                } else {
                    votes.entry((target, source)).or_default().backward += 1;
                }
            }
            debug!(
                algorithm = %candidate.algorithm,
                edges = candidate.graph.edge_count(),
                "tallied candidate"
            );
        }

        let mut graph = CausalGraph::new();
        for (name, observed) in &nodes {
            graph.ensure_node_with(name, *observed);
        }

        let mut stats = ConsensusStats {
            candidates: candidates.len(),
            pairs_considered: votes.len(),
            ..Default::default()
        };
        let mut diagnostics = Vec::new();

        for ((lo, hi), pair) in &votes {
            let forward_ok = pair.forward >= self.quorum;
            let backward_ok = pair.backward >= self.quorum;
            let winner = match (forward_ok, backward_ok) {
                (true, true) if pair.forward > pair.backward => Some((lo, hi, pair.forward)),
                (true, true) if pair.backward > pair.forward => Some((hi, lo, pair.backward)),
                (true, true) => {
                    stats.ties += 1;
                    warn!(
                        %lo,
                        %hi,
                        votes = pair.forward,
                        "direction tie at quorum; edge dropped"
                    );
                    diagnostics.push(Diagnostic::for_edge(
                        Stage::Consensus,
                        DiagnosticKind::ConsensusTie,
                        lo,
                        hi,
                        format!(
                            "{lo} -> {hi} and {hi} -> {lo} both received {} votes; edge dropped",
                            pair.forward
                        ),
                    ));
                    None
                }
                (true, false) => Some((lo, hi, pair.forward)),
                (false, true) => Some((hi, lo, pair.backward)),
                (false, false) => {
                    stats.below_quorum += 1;
                    None
                }
            };
            if let Some((source, target, count)) = winner {
                // Pairs are distinct names by construction, so this cannot self-loop.
                if graph
                    .add_edge_with(source, target, CausalEdgeWeight::discovered(count))
                    .unwrap_or(false)
                {
                    stats.edges_accepted += 1;
                }
            }
        }

        for broken in break_cycles(&mut graph) {
            stats.cycles_broken += 1;
            stats.edges_accepted = stats.edges_accepted.saturating_sub(1);
            diagnostics.push(Diagnostic::for_edge(
                Stage::Consensus,
                DiagnosticKind::CycleBroken,
                &broken.source,
                &broken.target,
                format!(
                    "removed weakest edge ({} votes) from cycle of length {}",
                    broken.votes,
                    broken.cycle.len()
                ),
            ));
        }

        info!(
            candidates = stats.candidates,
            edges = stats.edges_accepted,
            ties = stats.ties,
            cycles_broken = stats.cycles_broken,
            "consensus built"
        );

        Ok(ConsensusOutcome {
            graph,
            diagnostics,
            stats,
        })
    }
}

impl Default for ConsensusBuilder {
    fn default() -> Self {
        Self::new(constants::DEFAULT_QUORUM)
    }
}
