//! Backdoor adjustment solver.
//!
//! Given an acyclic graph, a treatment `t` and an outcome `y`, finds a
//! minimal set `Z` of observed variables such that `Z` holds no descendant
//! of `t` and blocks every backdoor path (a skeleton path from `t` to `y`
//! whose first edge points into `t`). Blocking is decided by Bayes-ball
//! reachability on the graph with `t`'s outgoing edges cut, so validity
//! never depends on how many paths there are.
//!
//! Search order:
//! 1. the empty set;
//! 2. the common-cause candidates: admissible nodes that are ancestors of
//!    both `t` and `y`, or non-colliders on some backdoor path (collected
//!    from at most `max_paths` enumerated paths);
//! 3. every admissible ancestor of `t` or `y`.
//!
//! The first valid set is shrunk by dropping members in alphabetical order
//! while validity holds, repeated until nothing more can be dropped. No
//! valid set means `NoValidAdjustmentSet`.

mod dsep;
mod paths;
mod view;

use std::collections::BTreeSet;

use tracing::{debug, info};

use confound_core::config::SolverConfig;
use confound_core::constants;
use confound_core::errors::AdjustmentError;
use confound_core::models::AdjustmentSet;

use crate::graph::CausalGraph;

pub use paths::BackdoorPath;
use view::GraphView;

/// Open paths listed in a `NoValidAdjustmentSet` error.
const MAX_REPORTED_OPEN_PATHS: usize = 10;

/// Borrowing solver over one final graph snapshot.
#[derive(Debug, Clone, Copy)]
pub struct BackdoorSolver<'g> {
    graph: &'g CausalGraph,
    max_path_length: Option<usize>,
    max_paths: usize,
}

/// A validated (treatment, outcome) query.
struct Query {
    view: GraphView,
    t: usize,
    y: usize,
}

impl Query {
    /// Not t, not y, not a descendant of t, and observed.
    fn admissible(&self, node: usize) -> bool {
        node != self.t
            && node != self.y
            && !self.view.descendants[self.t][node]
            && self.view.observed[node]
    }

    fn is_valid(&self, z: &[bool]) -> bool {
        z.iter()
            .enumerate()
            .all(|(node, &chosen)| !chosen || self.admissible(node))
            && dsep::blocks_backdoor(&self.view, self.t, self.y, z)
    }

    fn open_paths(&self, paths: &[Vec<usize>], z: &[bool]) -> Vec<Vec<String>> {
        paths
            .iter()
            .filter(|p| !paths::is_blocked(&self.view, p, z))
            .take(MAX_REPORTED_OPEN_PATHS)
            .map(|p| self.view.names_of(p))
            .collect()
    }

    /// Admissible common causes of t and y plus admissible non-colliders
    /// appearing on any of `paths`.
    fn common_cause_candidates(&self, paths: &[Vec<usize>]) -> Vec<bool> {
        let n = self.view.len();
        let mut z = vec![false; n];
        for (node, slot) in z.iter_mut().enumerate() {
            if !self.admissible(node) {
                continue;
            }
            let row = &self.view.descendants[node];
            if row[self.t] && row[self.y] {
                *slot = true;
            }
        }
        for path in paths {
            for w in path.windows(3) {
                let (a, node, b) = (w[0], w[1], w[2]);
                if self.admissible(node) && !self.view.is_collider(a, node, b) {
                    z[node] = true;
                }
            }
        }
        z
    }

    /// Admissible ancestors of t or y.
    fn ancestor_candidates(&self) -> Vec<bool> {
        (0..self.view.len())
            .map(|node| {
                let row = &self.view.descendants[node];
                self.admissible(node) && (row[self.t] || row[self.y])
            })
            .collect()
    }

    /// Drop members alphabetically while the set stays valid, until stable.
    fn minimize(&self, mut z: Vec<bool>) -> Vec<bool> {
        loop {
            let mut changed = false;
            for node in 0..z.len() {
                if !z[node] {
                    continue;
                }
                z[node] = false;
                if self.is_valid(&z) {
                    changed = true;
                } else {
                    z[node] = true;
                }
            }
            if !changed {
                return z;
            }
        }
    }
}

impl<'g> BackdoorSolver<'g> {
    pub fn new(graph: &'g CausalGraph) -> Self {
        Self {
            graph,
            max_path_length: None,
            max_paths: constants::DEFAULT_MAX_BACKDOOR_PATHS,
        }
    }

    pub fn from_config(graph: &'g CausalGraph, config: &SolverConfig) -> Self {
        Self {
            graph,
            max_path_length: config.max_path_length,
            max_paths: config.max_paths.max(1),
        }
    }

    /// Longest backdoor path considered, in edges. Defaults to the node count.
    pub fn with_max_path_length(mut self, max_path_length: usize) -> Self {
        self.max_path_length = Some(max_path_length);
        self
    }

    pub fn with_max_paths(mut self, max_paths: usize) -> Self {
        self.max_paths = max_paths.max(1);
        self
    }

    fn prepare(&self, treatment: &str, outcome: &str) -> Result<Query, AdjustmentError> {
        if let Some(back_edge) = self.graph.find_back_edge() {
            return Err(AdjustmentError::CyclicGraph { back_edge });
        }
        if treatment == outcome {
            return Err(AdjustmentError::TreatmentIsOutcome {
                name: treatment.to_string(),
            });
        }
        let view = GraphView::new(self.graph);
        let t = endpoint(&view, treatment)?;
        let y = endpoint(&view, outcome)?;
        Ok(Query { view, t, y })
    }

    fn max_len(&self, view: &GraphView) -> usize {
        self.max_path_length.unwrap_or(view.len())
    }

    /// Every backdoor path from `treatment` to `outcome`. More than
    /// `max_paths` paths is `PathLimitExceeded`.
    pub fn backdoor_paths(
        &self,
        treatment: &str,
        outcome: &str,
    ) -> Result<Vec<BackdoorPath>, AdjustmentError> {
        let query = self.prepare(treatment, outcome)?;
        let max_len = self.max_len(&query.view);
        let paths = paths::enumerate(&query.view, query.t, query.y, max_len, self.max_paths)?;
        debug!(%treatment, %outcome, paths = paths.len(), max_len, "enumerated backdoor paths");
        Ok(paths
            .iter()
            .map(|p| BackdoorPath::from_indices(&query.view, p))
            .collect())
    }

    /// Whether `adjustment` blocks `path`. Names outside the graph are ignored;
    /// a path through nodes the graph no longer holds is reported open.
    pub fn is_blocked(&self, path: &BackdoorPath, adjustment: &BTreeSet<String>) -> bool {
        let view = GraphView::new(self.graph);
        let mut z = vec![false; view.len()];
        for idx in adjustment.iter().filter_map(|name| view.index(name)) {
            z[idx] = true;
        }
        let indices: Option<Vec<usize>> = path.nodes().iter().map(|n| view.index(n)).collect();
        indices.is_some_and(|p| paths::is_blocked(&view, &p, &z))
    }

    /// Whether `adjustment` satisfies the backdoor criterion. Latent names
    /// make the set inadmissible; names missing from the graph are an error.
    pub fn is_valid_adjustment(
        &self,
        treatment: &str,
        outcome: &str,
        adjustment: &BTreeSet<String>,
    ) -> Result<bool, AdjustmentError> {
        let query = self.prepare(treatment, outcome)?;
        let mut z = vec![false; query.view.len()];
        for name in adjustment {
            let idx = query
                .view
                .index(name)
                .ok_or_else(|| AdjustmentError::UnknownVariable { name: name.clone() })?;
            z[idx] = true;
        }
        Ok(query.is_valid(&z))
    }

    /// Compute a minimal valid adjustment set.
    pub fn solve(&self, treatment: &str, outcome: &str) -> Result<AdjustmentSet, AdjustmentError> {
        let query = self.prepare(treatment, outcome)?;
        let max_len = self.max_len(&query.view);
        let (paths, complete) =
            paths::enumerate_bounded(&query.view, query.t, query.y, max_len, self.max_paths);
        if !complete {
            debug!(
                %treatment,
                %outcome,
                limit = self.max_paths,
                "path cap reached; candidates use the paths seen so far"
            );
        }
        let empty = vec![false; query.view.len()];

        let chosen = if query.is_valid(&empty) {
            debug!(%treatment, %outcome, "empty set blocks every backdoor path");
            Some(empty)
        } else {
            let common = query.common_cause_candidates(&paths);
            let ancestors = query.ancestor_candidates();
            let mut found = None;
            for candidate in [common, ancestors] {
                if query.is_valid(&candidate) {
                    found = Some(query.minimize(candidate));
                    break;
                }
            }
            found
        };

        let Some(z) = chosen else {
            let open_paths = query.open_paths(&paths, &query.ancestor_candidates());
            info!(%treatment, %outcome, open = open_paths.len(), "no valid adjustment set");
            return Err(AdjustmentError::NoValidAdjustmentSet {
                treatment: treatment.to_string(),
                outcome: outcome.to_string(),
                open_paths,
            });
        };

        let variables: BTreeSet<String> = z
            .iter()
            .enumerate()
            .filter(|(_, &chosen)| chosen)
            .map(|(idx, _)| query.view.names[idx].clone())
            .collect();
        let backdoor_paths = complete.then_some(paths.len());
        info!(
            %treatment,
            %outcome,
            size = variables.len(),
            backdoor_paths = ?backdoor_paths,
            "adjustment set found"
        );
        Ok(AdjustmentSet {
            treatment: treatment.to_string(),
            outcome: outcome.to_string(),
            variables,
            backdoor_paths,
        })
    }
}

fn endpoint(view: &GraphView, name: &str) -> Result<usize, AdjustmentError> {
    let idx = view.index(name).ok_or_else(|| AdjustmentError::UnknownVariable {
        name: name.to_string(),
    })?;
    if !view.observed[idx] {
        return Err(AdjustmentError::LatentEndpoint {
            name: name.to_string(),
        });
    }
    Ok(idx)
}
