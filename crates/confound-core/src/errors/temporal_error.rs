//! Temporal order declaration errors.

use super::error_code::{self, ErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum TemporalOrderError {
    #[error("precedence pairs form a cycle through {name}")]
    InconsistentPrecedence { name: String },

    #[error("precedence pair ({earlier}, {later}) contradicts declared ranks {earlier_rank} > {later_rank}")]
    ContradictsRank {
        earlier: String,
        later: String,
        earlier_rank: i64,
        later_rank: i64,
    },
}

impl ErrorCode for TemporalOrderError {
    fn error_code(&self) -> &'static str {
        error_code::INCONSISTENT_PRECEDENCE
    }
}
