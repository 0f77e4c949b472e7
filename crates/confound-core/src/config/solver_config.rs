use serde::{Deserialize, Serialize};

use crate::constants;

/// Backdoor adjustment solver configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Maximum backdoor path length in edges. `None` = node count.
    pub max_path_length: Option<usize>,
    /// Enumeration cap; exceeding it is an error, never a truncation.
    pub max_paths: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_path_length: None,
            max_paths: constants::DEFAULT_MAX_BACKDOOR_PATHS,
        }
    }
}
