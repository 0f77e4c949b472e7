//! Variable registration errors.

use super::error_code::{self, ErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum VariableError {
    #[error("variable already registered: {name}")]
    Duplicate { name: String },

    #[error("invalid variable: {reason}")]
    Invalid { reason: String },

    #[error("sample column {name} is not a registered variable")]
    Unregistered { name: String },
}

impl ErrorCode for VariableError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Duplicate { .. } => error_code::DUPLICATE_VARIABLE,
            Self::Invalid { .. } => error_code::INVALID_VARIABLE,
            Self::Unregistered { .. } => error_code::UNKNOWN_VARIABLE,
        }
    }
}
