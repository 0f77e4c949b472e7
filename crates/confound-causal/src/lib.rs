//! # confound-causal
//!
//! The graph-reasoning core: a name-indexed directed graph with cycle
//! detection, consensus voting over candidate graphs, temporal-order
//! filtering, domain override directives, and the backdoor adjustment solver.
//!
//! Every stage takes a graph by value and hands a new owned graph onward.

pub mod backdoor;
pub mod consensus;
pub mod graph;
pub mod overrides;
pub mod temporal;

pub use backdoor::{BackdoorPath, BackdoorSolver};
pub use consensus::{CandidateGraph, ConsensusBuilder, ConsensusOutcome};
pub use graph::{CausalEdgeWeight, CausalGraph, CausalNode, EdgeOrigin};
pub use overrides::{OverrideLayer, OverrideOutcome};
pub use temporal::{TemporalFilter, TemporalFilterOutcome};
