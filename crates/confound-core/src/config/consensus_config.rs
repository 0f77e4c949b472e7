use serde::{Deserialize, Serialize};

use crate::constants;

/// Consensus builder configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsensusConfig {
    /// Votes one direction needs before the edge enters the consensus.
    pub quorum: usize,
    /// Successful candidates required before a consensus is attempted.
    pub min_candidates: usize,
}

impl Default for ConsensusConfig {
    fn default() -> Self {
        Self {
            quorum: constants::DEFAULT_QUORUM,
            min_candidates: constants::MIN_CONSENSUS_CANDIDATES,
        }
    }
}
