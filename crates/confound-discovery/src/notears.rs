//! NOTEARS: structure learning as continuous optimization.
//!
//! Minimizes `0.5 tr((I - W)ᵀ S (I - W)) + λ‖W‖₁` over weighted adjacency
//! matrices `W`, where `S` is the sample correlation matrix (the covariance of
//! the standardized data), subject to `h(W) = tr(exp(W ∘ W)) - d = 0`.
//! `h` is zero exactly when `W` is acyclic.
//!
//! The constraint is handled with an augmented Lagrangian. Each subproblem
//! is solved by proximal gradient descent with backtracking; the L1 term is
//! applied through soft thresholding.

use nalgebra::DMatrix;
use tracing::debug;

use confound_causal::CausalGraph;
use confound_core::config::NotearsConfig;
use confound_core::constants;
use confound_core::errors::DiscoveryError;

use crate::algorithm::IDiscoveryAlgorithm;
use crate::sample::Sample;

const MAX_BACKTRACK: usize = 60;
const INNER_STEP_TOLERANCE: f64 = 1e-8;
/// Required shrink of `h` per outer step before the penalty grows.
const H_PROGRESS_RATIO: f64 = 0.25;
const RHO_GROWTH: f64 = 10.0;

#[derive(Debug, Clone)]
pub struct Notears {
    config: NotearsConfig,
}

impl Notears {
    pub fn new(config: NotearsConfig) -> Self {
        Self { config }
    }
}

impl Default for Notears {
    fn default() -> Self {
        Self::new(NotearsConfig::default())
    }
}

fn numerical(reason: impl Into<String>) -> DiscoveryError {
    DiscoveryError::NumericalFailure {
        algorithm: constants::ALGORITHM_NOTEARS.to_string(),
        reason: reason.into(),
    }
}

/// `h(W)` and its gradient `exp(W ∘ W)ᵀ ∘ 2W`.
fn acyclicity(w: &DMatrix<f64>) -> (f64, DMatrix<f64>) {
    let e = w.component_mul(w).exp();
    let h = e.trace() - w.nrows() as f64;
    let grad = e.transpose().component_mul(w) * 2.0;
    (h, grad)
}

fn soft_threshold(w: &DMatrix<f64>, t: f64) -> DMatrix<f64> {
    let mut out = w.map(|v| v.signum() * (v.abs() - t).max(0.0));
    out.fill_diagonal(0.0);
    out
}

fn is_finite(w: &DMatrix<f64>) -> bool {
    w.iter().all(|v| v.is_finite())
}

/// The smooth part of the augmented Lagrangian for fixed `rho` and `alpha`.
struct Subproblem<'a> {
    s: &'a DMatrix<f64>,
    identity: DMatrix<f64>,
    rho: f64,
    alpha: f64,
}

impl Subproblem<'_> {
    fn value_and_grad(&self, w: &DMatrix<f64>) -> (f64, DMatrix<f64>) {
        let residual = &self.identity - w;
        let s_residual = self.s * &residual;
        let loss = 0.5 * residual.dot(&s_residual);

        let (h, h_grad) = acyclicity(w);
        let value = loss + 0.5 * self.rho * h * h + self.alpha * h;
        let coeff = self.rho * h + self.alpha;
        let grad = h_grad * coeff - s_residual;
        (value, grad)
    }
}

impl Notears {
    fn solve_subproblem(
        &self,
        start: &DMatrix<f64>,
        problem: &Subproblem<'_>,
    ) -> Result<DMatrix<f64>, DiscoveryError> {
        let lambda = self.config.lambda;
        let mut w = start.clone();
        let (mut f, mut g) = problem.value_and_grad(&w);
        let mut eta = 1.0;

        for _ in 0..self.config.inner_iterations {
            let mut accepted = None;
            for _ in 0..MAX_BACKTRACK {
                let candidate = soft_threshold(&(&w - &g * eta), eta * lambda);
                let diff = &candidate - &w;
                let (fc, gc) = problem.value_and_grad(&candidate);
                let bound = f + g.dot(&diff) + diff.norm_squared() / (2.0 * eta);
                if fc.is_finite() && fc <= bound + 1e-12 {
                    accepted = Some((candidate, fc, gc, diff.norm()));
                    break;
                }
                eta *= 0.5;
            }
            let Some((candidate, fc, gc, step)) = accepted else {
                break;
            };
            w = candidate;
            f = fc;
            g = gc;
            eta = (eta * 2.0).min(1.0);
            if step < INNER_STEP_TOLERANCE {
                break;
            }
        }

        if !is_finite(&w) {
            return Err(numerical("weights diverged"));
        }
        Ok(w)
    }
}

impl IDiscoveryAlgorithm for Notears {
    fn name(&self) -> &str {
        constants::ALGORITHM_NOTEARS
    }

    fn discover(&self, sample: &Sample) -> Result<CausalGraph, DiscoveryError> {
        let d = sample.n_cols();
        let s = sample.correlation()?;
        let mut w = DMatrix::zeros(d, d);
        let mut rho = 1.0;
        let mut alpha = 0.0;
        let mut h = f64::INFINITY;
        let mut iterations = 0;

        for outer in 0..self.config.max_outer_iterations {
            iterations = outer + 1;
            let (w_next, h_next) = loop {
                let problem = Subproblem {
                    s: &s,
                    identity: DMatrix::identity(d, d),
                    rho,
                    alpha,
                };
                let w_next = self.solve_subproblem(&w, &problem)?;
                let (h_next, _) = acyclicity(&w_next);
                if h_next > H_PROGRESS_RATIO * h && rho < self.config.rho_max {
                    rho *= RHO_GROWTH;
                } else {
                    break (w_next, h_next);
                }
            };
            w = w_next;
            h = h_next;
            alpha += rho * h;
            debug!(outer, h, rho, "notears outer step");
            if h <= self.config.h_tolerance || rho >= self.config.rho_max {
                break;
            }
        }

        if h.is_nan() || h > self.config.h_tolerance {
            return Err(DiscoveryError::NonConvergence {
                algorithm: constants::ALGORITHM_NOTEARS.to_string(),
                iterations,
                residual: h,
            });
        }

        let names = sample.names();
        let mut graph = CausalGraph::with_nodes(names);
        for i in 0..d {
            for j in 0..d {
                if i != j && w[(i, j)].abs() >= self.config.w_threshold {
                    graph
                        .add_edge(&names[i], &names[j])
                        .map_err(|e| numerical(e.to_string()))?;
                }
            }
        }
        debug!(edges = graph.edge_count(), iterations, h, "notears finished");
        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acyclicity_is_zero_for_dag() {
        let mut w = DMatrix::zeros(3, 3);
        w[(0, 1)] = 0.8;
        w[(1, 2)] = -1.2;
        let (h, _) = acyclicity(&w);
        assert!(h.abs() < 1e-10);
    }

    #[test]
    fn acyclicity_penalizes_cycles() {
        let mut w = DMatrix::zeros(3, 3);
        w[(0, 1)] = 1.0;
        w[(1, 2)] = 1.0;
        w[(2, 0)] = 1.0;
        let (h, grad) = acyclicity(&w);
        assert!(h > 1e-3);
        assert!(grad[(2, 0)] > 0.0);
    }

    #[test]
    fn soft_threshold_clears_diagonal_and_small_values() {
        let mut w = DMatrix::zeros(2, 2);
        w[(0, 0)] = 5.0;
        w[(0, 1)] = 0.3;
        w[(1, 0)] = -2.0;
        let out = soft_threshold(&w, 0.5);
        assert_eq!(out[(0, 0)], 0.0);
        assert_eq!(out[(0, 1)], 0.0);
        assert!((out[(1, 0)] + 1.5).abs() < 1e-12);
    }
}
