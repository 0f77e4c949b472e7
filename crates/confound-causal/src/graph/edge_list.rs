//! Conversion between `CausalGraph` and the `EdgeList` exchange format.

use confound_core::errors::GraphError;
use confound_core::models::{EdgeList, NodeRecord};

use super::causal_graph::{CausalEdgeWeight, CausalGraph};

impl CausalGraph {
    /// Serialize nodes (sorted, with observed flags) and edges (sorted).
    pub fn to_edge_list(&self) -> EdgeList {
        let nodes = self
            .node_names()
            .into_iter()
            .map(|name| NodeRecord {
                observed: self.is_observed(&name),
                name,
            })
            .collect();
        EdgeList {
            nodes,
            edges: self.edges(),
        }
    }

    /// Rebuild a graph from an edge list. Edge endpoints missing from the
    /// node list are created as observed nodes.
    pub fn from_edge_list(list: &EdgeList) -> Result<Self, GraphError> {
        let mut graph = CausalGraph::new();
        for node in &list.nodes {
            graph.ensure_node_with(&node.name, node.observed);
        }
        for (source, target) in &list.edges {
            graph.add_edge_with(source, target, CausalEdgeWeight::default())?;
        }
        Ok(graph)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        self.to_edge_list().to_json()
    }

    pub fn to_csv(&self) -> Result<String, GraphError> {
        self.to_edge_list().to_csv()
    }

    pub fn from_csv(csv: &str) -> Result<Self, GraphError> {
        Self::from_edge_list(&EdgeList::from_csv(csv)?)
    }
}
