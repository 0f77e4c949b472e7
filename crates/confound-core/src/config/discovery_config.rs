use serde::{Deserialize, Serialize};

use super::defaults;
use crate::constants;

/// Discovery adapter configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Algorithms to run, by name, in candidate order.
    pub algorithms: Vec<String>,
    /// Worker threads for concurrent runs. 0 = rayon default.
    pub threads: usize,
    pub pc: PcConfig,
    pub hill_climb: HillClimbConfig,
    pub notears: NotearsConfig,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            algorithms: constants::KNOWN_ALGORITHMS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            threads: defaults::DEFAULT_DISCOVERY_THREADS,
            pc: PcConfig::default(),
            hill_climb: HillClimbConfig::default(),
            notears: NotearsConfig::default(),
        }
    }
}

/// Constraint-based (PC) search.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PcConfig {
    /// Significance level of the Fisher-z independence test.
    pub alpha: f64,
    /// Largest conditioning set tried.
    pub max_condition_set: usize,
}

impl Default for PcConfig {
    fn default() -> Self {
        Self {
            alpha: defaults::DEFAULT_PC_ALPHA,
            max_condition_set: defaults::DEFAULT_PC_MAX_CONDITION_SET,
        }
    }
}

/// Score-based greedy search.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HillClimbConfig {
    pub max_parents: usize,
    pub max_iterations: usize,
}

impl Default for HillClimbConfig {
    fn default() -> Self {
        Self {
            max_parents: defaults::DEFAULT_HILL_CLIMB_MAX_PARENTS,
            max_iterations: defaults::DEFAULT_HILL_CLIMB_MAX_ITERATIONS,
        }
    }
}

/// Continuous-optimization search.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotearsConfig {
    /// L1 penalty weight.
    pub lambda: f64,
    /// Edges with |w| below this are discarded.
    pub w_threshold: f64,
    pub max_outer_iterations: usize,
    pub inner_iterations: usize,
    /// Acyclicity residual accepted as converged.
    pub h_tolerance: f64,
    pub rho_max: f64,
}

impl Default for NotearsConfig {
    fn default() -> Self {
        Self {
            lambda: defaults::DEFAULT_NOTEARS_LAMBDA,
            w_threshold: defaults::DEFAULT_NOTEARS_W_THRESHOLD,
            max_outer_iterations: defaults::DEFAULT_NOTEARS_MAX_OUTER_ITERATIONS,
            inner_iterations: defaults::DEFAULT_NOTEARS_INNER_ITERATIONS,
            h_tolerance: defaults::DEFAULT_NOTEARS_H_TOLERANCE,
            rho_max: defaults::DEFAULT_NOTEARS_RHO_MAX,
        }
    }
}
