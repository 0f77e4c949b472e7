//! Configuration system for confound.
//! TOML-based: compiled defaults < config file < `CONFOUND_*` environment variables.

pub mod confound_config;
pub mod consensus_config;
pub mod defaults;
pub mod discovery_config;
pub mod observability_config;
pub mod override_config;
pub mod solver_config;
pub mod temporal_config;

pub use confound_config::ConfoundConfig;
pub use consensus_config::ConsensusConfig;
pub use discovery_config::{DiscoveryConfig, HillClimbConfig, NotearsConfig, PcConfig};
pub use observability_config::ObservabilityConfig;
pub use override_config::OverrideConfig;
pub use solver_config::SolverConfig;
pub use temporal_config::TemporalConfig;
