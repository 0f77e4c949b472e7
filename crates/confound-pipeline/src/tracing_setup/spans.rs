//! Span definitions per pipeline stage.

/// Create a discovery span.
#[macro_export]
macro_rules! discovery_span {
    ($algorithms:expr, $rows:expr) => {
        $crate::tracing::info_span!("confound.discovery", algorithms = $algorithms, rows = $rows)
    };
}

/// Create a consensus span.
#[macro_export]
macro_rules! consensus_span {
    ($candidates:expr) => {
        $crate::tracing::info_span!("confound.consensus", candidates = $candidates)
    };
}

/// Create a temporal filter span.
#[macro_export]
macro_rules! temporal_span {
    ($edges:expr) => {
        $crate::tracing::info_span!("confound.temporal", edges = $edges)
    };
}

/// Create a domain override span.
#[macro_export]
macro_rules! overrides_span {
    ($directives:expr) => {
        $crate::tracing::info_span!("confound.overrides", directives = $directives)
    };
}

/// Create an adjustment solver span.
#[macro_export]
macro_rules! solver_span {
    ($treatment:expr, $outcome:expr) => {
        $crate::tracing::info_span!("confound.solver", treatment = %$treatment, outcome = %$outcome)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const DISCOVERY: &str = "confound.discovery";
    pub const CONSENSUS: &str = "confound.consensus";
    pub const TEMPORAL: &str = "confound.temporal";
    pub const OVERRIDES: &str = "confound.overrides";
    pub const SOLVER: &str = "confound.solver";
}
