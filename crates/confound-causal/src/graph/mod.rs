//! Directed graph over named variables.

pub mod causal_graph;
pub mod cycles;
pub mod edge_list;

pub use causal_graph::{CausalEdgeWeight, CausalGraph, CausalNode, EdgeOrigin};
pub use cycles::{break_cycles, BrokenEdge};
