//! Graph model errors.

use super::error_code::{self, ErrorCode};

/// Errors raised by graph mutation and (de)serialization.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("self-loop rejected on node {node}")]
    SelfLoop { node: String },

    #[error("unknown node: {name}")]
    UnknownNode { name: String },

    #[error("malformed edge list at line {line}: {reason}")]
    MalformedEdgeList { line: usize, reason: String },

    #[error("edge list could not be written: {reason}")]
    EdgeListEncoding { reason: String },
}

impl ErrorCode for GraphError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::SelfLoop { .. } => error_code::SELF_LOOP,
            Self::UnknownNode { .. } => error_code::UNKNOWN_NODE,
            Self::MalformedEdgeList { .. } => error_code::MALFORMED_EDGE_LIST,
            Self::EdgeListEncoding { .. } => error_code::EDGE_LIST_ENCODING,
        }
    }
}
