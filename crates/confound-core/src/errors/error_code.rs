//! Stable error codes for reports and downstream tooling.

/// Every error enum provides a structured, upper-snake error code.
pub trait ErrorCode {
    /// Returns the error code string (e.g., "INSUFFICIENT_CANDIDATES").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const SELF_LOOP: &str = "SELF_LOOP";
pub const UNKNOWN_NODE: &str = "UNKNOWN_NODE";
pub const MALFORMED_EDGE_LIST: &str = "MALFORMED_EDGE_LIST";
pub const EDGE_LIST_ENCODING: &str = "EDGE_LIST_ENCODING";
pub const DUPLICATE_VARIABLE: &str = "DUPLICATE_VARIABLE";
pub const INVALID_VARIABLE: &str = "INVALID_VARIABLE";
pub const INCONSISTENT_PRECEDENCE: &str = "INCONSISTENT_PRECEDENCE";
pub const DEGENERATE_SAMPLE: &str = "DEGENERATE_SAMPLE";
pub const NUMERICAL_FAILURE: &str = "NUMERICAL_FAILURE";
pub const NON_CONVERGENCE: &str = "NON_CONVERGENCE";
pub const UNKNOWN_ALGORITHM: &str = "UNKNOWN_ALGORITHM";
pub const INSUFFICIENT_CANDIDATES: &str = "INSUFFICIENT_CANDIDATES";
pub const DOMAIN_OVERRIDE_CYCLE: &str = "DOMAIN_OVERRIDE_CYCLE";
pub const TEMPORAL_VIOLATION: &str = "TEMPORAL_VIOLATION";
pub const NO_VALID_ADJUSTMENT_SET: &str = "NO_VALID_ADJUSTMENT_SET";
pub const UNKNOWN_VARIABLE: &str = "UNKNOWN_VARIABLE";
pub const INVALID_QUERY: &str = "INVALID_QUERY";
pub const PATH_LIMIT_EXCEEDED: &str = "PATH_LIMIT_EXCEEDED";
pub const CYCLIC_GRAPH: &str = "CYCLIC_GRAPH";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
