//! Structure-learning errors. Non-fatal per algorithm: the adapter records
//! them as missing candidates and carries on with the rest.

use super::error_code::{self, ErrorCode};

#[derive(Debug, Clone, thiserror::Error)]
pub enum DiscoveryError {
    #[error("degenerate sample: {reason}")]
    DegenerateSample { reason: String },

    #[error("{algorithm}: numerical failure: {reason}")]
    NumericalFailure { algorithm: String, reason: String },

    #[error("{algorithm}: no convergence after {iterations} iterations (residual {residual:.3e})")]
    NonConvergence {
        algorithm: String,
        iterations: usize,
        residual: f64,
    },

    #[error("unknown discovery algorithm: {name}")]
    UnknownAlgorithm { name: String },
}

impl ErrorCode for DiscoveryError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::DegenerateSample { .. } => error_code::DEGENERATE_SAMPLE,
            Self::NumericalFailure { .. } => error_code::NUMERICAL_FAILURE,
            Self::NonConvergence { .. } => error_code::NON_CONVERGENCE,
            Self::UnknownAlgorithm { .. } => error_code::UNKNOWN_ALGORITHM,
        }
    }
}
