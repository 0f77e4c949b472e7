use confound_causal::CausalGraph;
use confound_core::errors::DiscoveryError;

use crate::sample::Sample;

/// A structure-learning algorithm producing one candidate graph.
///
/// Implementations are stateless between calls and must not mutate the
/// sample, so one instance can run on any thread.
pub trait IDiscoveryAlgorithm: Send + Sync {
    /// Stable algorithm name, used in diagnostics and candidate labels.
    fn name(&self) -> &str;

    /// Learn a directed graph over the sample's columns. The graph holds one
    /// observed node per column and may contain cycles.
    fn discover(&self, sample: &Sample) -> Result<CausalGraph, DiscoveryError>;
}
