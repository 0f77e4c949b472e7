//! Domain override errors.

use super::error_code::{self, ErrorCode};
use super::format_edges;

#[derive(Debug, thiserror::Error)]
pub enum OverrideError {
    /// The directive batch as a whole produced a cyclic graph and was rejected.
    #[error("domain overrides introduce a cycle: {}", format_edges(.cycle))]
    DomainOverrideCycle { cycle: Vec<(String, String)> },

    #[error("edge {cause} -> {effect} contradicts temporal order: {reason}")]
    TemporalViolation {
        cause: String,
        effect: String,
        reason: String,
    },
}

impl ErrorCode for OverrideError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::DomainOverrideCycle { .. } => error_code::DOMAIN_OVERRIDE_CYCLE,
            Self::TemporalViolation { .. } => error_code::TEMPORAL_VIOLATION,
        }
    }
}
