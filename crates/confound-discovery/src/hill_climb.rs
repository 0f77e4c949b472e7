//! Greedy hill-climbing over DAGs with a linear-Gaussian BIC score.
//!
//! Each step evaluates every single-edge addition, deletion, and reversal
//! that keeps the graph acyclic and within `max_parents`, and applies the
//! best strictly improving move. Ties go to the first move found scanning
//! (source, target) pairs in column order.

use std::collections::BTreeSet;

use nalgebra::DMatrix;
use tracing::debug;

use confound_causal::CausalGraph;
use confound_core::config::HillClimbConfig;
use confound_core::constants;
use confound_core::errors::DiscoveryError;

use crate::algorithm::IDiscoveryAlgorithm;
use crate::sample::Sample;

/// Score gains at or below this are not improvements.
const MIN_IMPROVEMENT: f64 = 1e-9;

/// Residual variances are floored here so a perfect fit stays finite.
const MIN_RESIDUAL_VARIANCE: f64 = 1e-12;

#[derive(Debug, Clone)]
pub struct HillClimb {
    max_parents: usize,
    max_iterations: usize,
}

impl HillClimb {
    pub fn new(max_parents: usize, max_iterations: usize) -> Self {
        Self {
            max_parents,
            max_iterations,
        }
    }

    pub fn from_config(config: &HillClimbConfig) -> Self {
        Self::new(config.max_parents, config.max_iterations)
    }
}

impl Default for HillClimb {
    fn default() -> Self {
        Self::from_config(&HillClimbConfig::default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Move {
    Add(usize, usize),
    Delete(usize, usize),
    Reverse(usize, usize),
}

/// Decomposable BIC: sum over nodes of a local score given its parents.
struct BicScore {
    cov: DMatrix<f64>,
    n: f64,
}

impl BicScore {
    fn local(&self, node: usize, parents: &BTreeSet<usize>) -> Result<f64, DiscoveryError> {
        let mut variance = self.cov[(node, node)];
        if !parents.is_empty() {
            let p: Vec<usize> = parents.iter().copied().collect();
            let inv = self
                .cov
                .select_rows(&p)
                .select_columns(&p)
                .try_inverse()
                .ok_or_else(|| DiscoveryError::NumericalFailure {
                    algorithm: constants::ALGORITHM_HILL_CLIMB.to_string(),
                    reason: format!("singular parent covariance for node {node}"),
                })?;
            let mut explained = 0.0;
            for (a, &pa) in p.iter().enumerate() {
                for (b, &pb) in p.iter().enumerate() {
                    explained += self.cov[(node, pa)] * inv[(a, b)] * self.cov[(pb, node)];
                }
            }
            variance -= explained;
        }
        let variance = variance.max(MIN_RESIDUAL_VARIANCE);
        let k = parents.len() as f64 + 1.0;
        Ok(-0.5 * self.n * variance.ln() - 0.5 * k * self.n.ln())
    }
}

/// Whether `to` is reachable from `from` along child edges, ignoring `skip`.
fn reaches(children: &[BTreeSet<usize>], from: usize, to: usize, skip: Option<(usize, usize)>) -> bool {
    let mut seen = vec![false; children.len()];
    let mut stack = vec![from];
    while let Some(node) = stack.pop() {
        if node == to {
            return true;
        }
        if std::mem::replace(&mut seen[node], true) {
            continue;
        }
        for &next in &children[node] {
            if Some((node, next)) != skip {
                stack.push(next);
            }
        }
    }
    false
}

impl IDiscoveryAlgorithm for HillClimb {
    fn name(&self) -> &str {
        constants::ALGORITHM_HILL_CLIMB
    }

    fn discover(&self, sample: &Sample) -> Result<CausalGraph, DiscoveryError> {
        let d = sample.n_cols();
        let score = BicScore {
            cov: sample.covariance(),
            n: sample.n_rows() as f64,
        };
        let mut parents: Vec<BTreeSet<usize>> = vec![BTreeSet::new(); d];
        let mut children: Vec<BTreeSet<usize>> = vec![BTreeSet::new(); d];
        let mut local: Vec<f64> = (0..d)
            .map(|j| score.local(j, &parents[j]))
            .collect::<Result<_, _>>()?;

        let mut moves_applied = 0;
        while moves_applied < self.max_iterations {
            let mut best: Option<(f64, Move)> = None;
            let mut consider = |gain: f64, mv: Move| {
                if gain > MIN_IMPROVEMENT && best.map_or(true, |(g, _)| gain > g) {
                    best = Some((gain, mv));
                }
            };

            for i in 0..d {
                for j in 0..d {
                    if i == j {
                        continue;
                    }
                    if parents[j].contains(&i) {
                        let mut without = parents[j].clone();
                        without.remove(&i);
                        let delete_gain = score.local(j, &without)? - local[j];
                        consider(delete_gain, Move::Delete(i, j));

                        // Reverse i -> j into j -> i: legal if no other i ~> j path.
                        if parents[i].len() < self.max_parents
                            && !reaches(&children, i, j, Some((i, j)))
                        {
                            let mut with = parents[i].clone();
                            with.insert(j);
                            let gain = delete_gain + score.local(i, &with)? - local[i];
                            consider(gain, Move::Reverse(i, j));
                        }
                    } else if !parents[i].contains(&j)
                        && parents[j].len() < self.max_parents
                        && !reaches(&children, j, i, None)
                    {
                        let mut with = parents[j].clone();
                        with.insert(i);
                        consider(score.local(j, &with)? - local[j], Move::Add(i, j));
                    }
                }
            }

            let Some((gain, mv)) = best else {
                break;
            };
            match mv {
                Move::Add(i, j) => {
                    parents[j].insert(i);
                    children[i].insert(j);
                    local[j] = score.local(j, &parents[j])?;
                }
                Move::Delete(i, j) => {
                    parents[j].remove(&i);
                    children[i].remove(&j);
                    local[j] = score.local(j, &parents[j])?;
                }
                Move::Reverse(i, j) => {
                    parents[j].remove(&i);
                    children[i].remove(&j);
                    parents[i].insert(j);
                    children[j].insert(i);
                    local[j] = score.local(j, &parents[j])?;
                    local[i] = score.local(i, &parents[i])?;
                }
            }
            moves_applied += 1;
            tracing::trace!(?mv, gain, "hill climb move");
        }

        let names = sample.names();
        let mut graph = CausalGraph::with_nodes(names);
        for (j, ps) in parents.iter().enumerate() {
            for &i in ps {
                graph
                    .add_edge(&names[i], &names[j])
                    .map_err(|e| DiscoveryError::NumericalFailure {
                        algorithm: constants::ALGORITHM_HILL_CLIMB.to_string(),
                        reason: e.to_string(),
                    })?;
            }
        }
        debug!(
            edges = graph.edge_count(),
            moves = moves_applied,
            bic = local.iter().sum::<f64>(),
            "hill climb finished"
        );
        Ok(graph)
    }
}
