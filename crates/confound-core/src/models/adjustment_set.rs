use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// A minimal valid backdoor adjustment set for one (treatment, outcome) pair.
///
/// Only meaningful for the graph it was computed on; recompute whenever the
/// graph changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjustmentSet {
    pub treatment: String,
    pub outcome: String,
    pub variables: BTreeSet<String>,
    /// Number of backdoor paths between the pair, or `None` when there were
    /// more than the solver's path cap.
    pub backdoor_paths: Option<usize>,
}

impl AdjustmentSet {
    pub fn contains(&self, name: &str) -> bool {
        self.variables.contains(name)
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    /// Empty means the solver proved every backdoor path is already blocked.
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Variable names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        self.variables.iter().map(String::as_str).collect()
    }
}
