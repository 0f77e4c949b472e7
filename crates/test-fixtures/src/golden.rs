use serde::Deserialize;

/// One backdoor scenario: a graph, a query, and the expected answer.
///
/// `graph` has the edge-list shape (`nodes` with observed flags, `edges` as
/// `[source, target]` pairs) and is left untyped so this crate does not
/// depend on the crates under test.
#[derive(Debug, Clone, Deserialize)]
pub struct GoldenScenario {
    pub description: String,
    pub treatment: String,
    pub outcome: String,
    pub graph: serde_json::Value,
    /// Exact minimal adjustment set, sorted. `None` when an error is expected.
    #[serde(default)]
    pub expected_adjustment: Option<Vec<String>>,
    /// Expected error code, e.g. `NO_VALID_ADJUSTMENT_SET`.
    #[serde(default)]
    pub expected_error: Option<String>,
}
