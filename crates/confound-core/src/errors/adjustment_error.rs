//! Backdoor adjustment solver errors.

use super::error_code::{self, ErrorCode};
use super::format_paths;

#[derive(Debug, thiserror::Error)]
pub enum AdjustmentError {
    #[error("no valid adjustment set for {treatment} -> {outcome}; open backdoor paths: {}", format_paths(.open_paths))]
    NoValidAdjustmentSet {
        treatment: String,
        outcome: String,
        open_paths: Vec<Vec<String>>,
    },

    #[error("unknown variable: {name}")]
    UnknownVariable { name: String },

    #[error("treatment and outcome are the same variable: {name}")]
    TreatmentIsOutcome { name: String },

    #[error("{name} is a latent node and cannot be a treatment or outcome")]
    LatentEndpoint { name: String },

    #[error("backdoor path enumeration exceeded {limit} paths")]
    PathLimitExceeded { limit: usize },

    #[error("graph is not acyclic (back-edge {} -> {})", .back_edge.0, .back_edge.1)]
    CyclicGraph { back_edge: (String, String) },
}

impl ErrorCode for AdjustmentError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NoValidAdjustmentSet { .. } => error_code::NO_VALID_ADJUSTMENT_SET,
            Self::UnknownVariable { .. } => error_code::UNKNOWN_VARIABLE,
            Self::TreatmentIsOutcome { .. } | Self::LatentEndpoint { .. } => {
                error_code::INVALID_QUERY
            }
            Self::PathLimitExceeded { .. } => error_code::PATH_LIMIT_EXCEEDED,
            Self::CyclicGraph { .. } => error_code::CYCLIC_GRAPH,
        }
    }
}
