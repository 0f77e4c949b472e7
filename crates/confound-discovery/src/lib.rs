//! # confound-discovery
//!
//! Structure learning over a numeric sample. Three independent algorithms
//! share one contract ([`IDiscoveryAlgorithm`]) and are run concurrently by
//! the [`DiscoveryAdapter`], each producing one candidate graph:
//!
//! - `pc`: constraint-based, Fisher-z conditional independence tests.
//! - `hill_climb`: greedy score search maximizing linear-Gaussian BIC.
//! - `notears`: continuous optimization under a smooth acyclicity constraint.

pub mod adapter;
pub mod algorithm;
pub mod hill_climb;
pub mod notears;
pub mod pc;
pub mod sample;

pub use adapter::{build_algorithm, DiscoveryAdapter, DiscoveryOutcome};
pub use algorithm::IDiscoveryAlgorithm;
pub use hill_climb::HillClimb;
pub use notears::Notears;
pub use pc::PcAlgorithm;
pub use sample::Sample;
