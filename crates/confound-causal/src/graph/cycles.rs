//! Cycle detection and deterministic cycle breaking.
//!
//! Detection is a depth-first traversal with a three-state marker per node
//! (unvisited / in progress / done). Reaching an in-progress node is a
//! back-edge and closes a cycle. Roots and children are visited in name
//! order so the reported cycle is reproducible.

use std::collections::HashMap;

use petgraph::stable_graph::NodeIndex;
use petgraph::Direction;

use super::causal_graph::CausalGraph;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Done,
}

/// An edge removed while breaking cycles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrokenEdge {
    pub source: String,
    pub target: String,
    pub votes: usize,
    /// The cycle the edge was removed from.
    pub cycle: Vec<(String, String)>,
}

impl CausalGraph {
    pub fn is_acyclic(&self) -> bool {
        self.cycle_nodes().is_none()
    }

    /// The first back-edge `(u, v)` found, where `v` was still in progress
    /// when `u -> v` was explored.
    pub fn find_back_edge(&self) -> Option<(String, String)> {
        let nodes = self.cycle_nodes()?;
        let first = nodes.first()?;
        let last = nodes.last()?;
        Some((self.name_of(*last).to_string(), self.name_of(*first).to_string()))
    }

    /// One directed cycle as an edge list, starting at the back-edge target.
    pub fn find_cycle(&self) -> Option<Vec<(String, String)>> {
        let nodes = self.cycle_nodes()?;
        let mut edges: Vec<(String, String)> = nodes
            .windows(2)
            .map(|w| (self.name_of(w[0]).to_string(), self.name_of(w[1]).to_string()))
            .collect();
        if let (Some(first), Some(last)) = (nodes.first(), nodes.last()) {
            edges.push((self.name_of(*last).to_string(), self.name_of(*first).to_string()));
        }
        Some(edges)
    }

    fn sorted_indices(&self, iter: impl Iterator<Item = NodeIndex>) -> Vec<NodeIndex> {
        let mut out: Vec<NodeIndex> = iter.collect();
        out.sort_by(|a, b| self.name_of(*a).cmp(self.name_of(*b)));
        out.dedup();
        out
    }

    /// Nodes of one cycle `[v, ..., u]` closed by the back-edge `u -> v`.
    fn cycle_nodes(&self) -> Option<Vec<NodeIndex>> {
        let mut marks: HashMap<NodeIndex, Mark> = self
            .graph
            .node_indices()
            .map(|n| (n, Mark::Unvisited))
            .collect();

        for root in self.sorted_indices(self.graph.node_indices()) {
            if marks.get(&root) != Some(&Mark::Unvisited) {
                continue;
            }
            // Explicit stack of (node, sorted children, next child position).
            let mut stack: Vec<(NodeIndex, Vec<NodeIndex>, usize)> = Vec::new();
            marks.insert(root, Mark::InProgress);
            let children =
                self.sorted_indices(self.graph.neighbors_directed(root, Direction::Outgoing));
            stack.push((root, children, 0));

            while let Some(top) = stack.last_mut() {
                let next = if top.2 < top.1.len() {
                    top.2 += 1;
                    Some(top.1[top.2 - 1])
                } else {
                    None
                };
                let Some(child) = next else {
                    marks.insert(top.0, Mark::Done);
                    stack.pop();
                    continue;
                };
                match marks.get(&child).copied().unwrap_or(Mark::Done) {
                    Mark::Unvisited => {
                        marks.insert(child, Mark::InProgress);
                        let grandchildren = self.sorted_indices(
                            self.graph.neighbors_directed(child, Direction::Outgoing),
                        );
                        stack.push((child, grandchildren, 0));
                    }
                    Mark::InProgress => {
                        let start = stack.iter().position(|(n, _, _)| *n == child)?;
                        return Some(stack[start..].iter().map(|(n, _, _)| *n).collect());
                    }
                    Mark::Done => {}
                }
            }
        }
        None
    }
}

/// Remove edges until the graph is acyclic.
///
/// Each round takes one cycle and drops its edge with the fewest votes,
/// ties going to the smallest `(source, target)` by name. Returns the
/// removed edges in removal order.
pub fn break_cycles(graph: &mut CausalGraph) -> Vec<BrokenEdge> {
    let mut broken = Vec::new();
    while let Some(cycle) = graph.find_cycle() {
        let weakest = cycle
            .iter()
            .map(|(s, t)| (graph.edge_votes(s, t).unwrap_or(0), s.clone(), t.clone()))
            .min();
        let Some((votes, source, target)) = weakest else {
            break;
        };
        graph.remove_edge(&source, &target);
        tracing::debug!(%source, %target, votes, "removed edge to break cycle");
        broken.push(BrokenEdge {
            source,
            target,
            votes,
            cycle,
        });
    }
    broken
}
