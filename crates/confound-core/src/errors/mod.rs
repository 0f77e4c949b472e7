//! Error handling for confound.
//! One error enum per subsystem, `thiserror` only.

pub mod adjustment_error;
pub mod config_error;
pub mod consensus_error;
pub mod discovery_error;
pub mod error_code;
pub mod graph_error;
pub mod override_error;
pub mod temporal_error;
pub mod variable_error;

pub use adjustment_error::AdjustmentError;
pub use config_error::ConfigError;
pub use consensus_error::ConsensusError;
pub use discovery_error::DiscoveryError;
pub use error_code::ErrorCode;
pub use graph_error::GraphError;
pub use override_error::OverrideError;
pub use temporal_error::TemporalOrderError;
pub use variable_error::VariableError;

/// Top-level error aggregating every subsystem via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum ConfoundError {
    #[error("graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("variable error: {0}")]
    Variable(#[from] VariableError),

    #[error("temporal order error: {0}")]
    TemporalOrder(#[from] TemporalOrderError),

    #[error("discovery error: {0}")]
    Discovery(#[from] DiscoveryError),

    #[error("consensus error: {0}")]
    Consensus(#[from] ConsensusError),

    #[error("override error: {0}")]
    Override(#[from] OverrideError),

    #[error("adjustment error: {0}")]
    Adjustment(#[from] AdjustmentError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl ErrorCode for ConfoundError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Graph(e) => e.error_code(),
            Self::Variable(e) => e.error_code(),
            Self::TemporalOrder(e) => e.error_code(),
            Self::Discovery(e) => e.error_code(),
            Self::Consensus(e) => e.error_code(),
            Self::Override(e) => e.error_code(),
            Self::Adjustment(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
        }
    }
}

/// Convenience alias used across the workspace.
pub type ConfoundResult<T> = Result<T, ConfoundError>;

/// Render an edge list as `a -> b, c -> d`.
pub(crate) fn format_edges(edges: &[(String, String)]) -> String {
    edges
        .iter()
        .map(|(s, t)| format!("{s} -> {t}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Render node paths as `[a - b - c]; [a - d - c]`.
pub(crate) fn format_paths(paths: &[Vec<String>]) -> String {
    paths
        .iter()
        .map(|p| format!("[{}]", p.join(" - ")))
        .collect::<Vec<_>>()
        .join("; ")
}
