//! Consensus errors.

use super::error_code::{self, ErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum ConsensusError {
    #[error("insufficient candidates: {succeeded} succeeded, at least {required} required")]
    InsufficientCandidates { succeeded: usize, required: usize },
}

impl ErrorCode for ConsensusError {
    fn error_code(&self) -> &'static str {
        error_code::INSUFFICIENT_CANDIDATES
    }
}
