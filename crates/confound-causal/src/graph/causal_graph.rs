//! Name-indexed directed graph backed by a petgraph `StableGraph`.
//!
//! Nodes are looked up by variable name through a side index, so edge
//! removal never invalidates the lookup. `add_edge` and `remove_edge` are
//! the only edge mutators; both keep the graph free of self-loops.

use std::collections::{BTreeSet, HashMap, VecDeque};

use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use petgraph::Direction;

use confound_core::errors::GraphError;

/// A graph node: a registered variable, or a latent name introduced by
/// domain knowledge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CausalNode {
    pub name: String,
    /// Latent nodes can never be conditioned on.
    pub observed: bool,
}

/// Where an edge came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeOrigin {
    Discovered,
    Domain,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CausalEdgeWeight {
    /// Aggregate number of candidate graphs that voted for this direction.
    pub votes: usize,
    pub origin: EdgeOrigin,
}

impl CausalEdgeWeight {
    pub fn discovered(votes: usize) -> Self {
        Self {
            votes,
            origin: EdgeOrigin::Discovered,
        }
    }

    pub fn domain() -> Self {
        Self {
            votes: 0,
            origin: EdgeOrigin::Domain,
        }
    }
}

impl Default for CausalEdgeWeight {
    fn default() -> Self {
        Self::discovered(1)
    }
}

/// Directed graph over named nodes. May transiently hold cycles; the final
/// graph handed to the solver must be acyclic.
#[derive(Debug, Clone)]
pub struct CausalGraph {
    pub(crate) graph: StableDiGraph<CausalNode, CausalEdgeWeight>,
    pub(crate) index: HashMap<String, NodeIndex>,
}

impl CausalGraph {
    pub fn new() -> Self {
        Self {
            graph: StableDiGraph::new(),
            index: HashMap::new(),
        }
    }

    /// Build a graph holding `names` as observed nodes and no edges.
    pub fn with_nodes<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut graph = Self::new();
        for name in names {
            graph.ensure_node(name.as_ref());
        }
        graph
    }

    /// Get or create an observed node.
    pub fn ensure_node(&mut self, name: &str) -> NodeIndex {
        self.ensure_node_with(name, true)
    }

    /// Get or create a latent node. An existing node keeps its flag.
    pub fn ensure_latent(&mut self, name: &str) -> NodeIndex {
        self.ensure_node_with(name, false)
    }

    pub(crate) fn ensure_node_with(&mut self, name: &str, observed: bool) -> NodeIndex {
        if let Some(&idx) = self.index.get(name) {
            return idx;
        }
        let idx = self.graph.add_node(CausalNode {
            name: name.to_string(),
            observed,
        });
        self.index.insert(name.to_string(), idx);
        idx
    }

    pub(crate) fn node_index(&self, name: &str) -> Option<NodeIndex> {
        self.index.get(name).copied()
    }

    pub(crate) fn name_of(&self, idx: NodeIndex) -> &str {
        self.graph
            .node_weight(idx)
            .map(|n| n.name.as_str())
            .unwrap_or_default()
    }

    pub fn contains_node(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// `false` for latent and unknown nodes.
    pub fn is_observed(&self, name: &str) -> bool {
        self.node_index(name)
            .and_then(|idx| self.graph.node_weight(idx))
            .is_some_and(|n| n.observed)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// All node names, sorted.
    pub fn node_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.index.keys().cloned().collect();
        names.sort();
        names
    }

    /// Sorted names of latent nodes.
    pub fn latent_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .graph
            .node_weights()
            .filter(|n| !n.observed)
            .map(|n| n.name.clone())
            .collect();
        names.sort();
        names
    }

    /// Add `source -> target` with a single discovery vote.
    ///
    /// Missing endpoints are created as observed nodes. Returns `Ok(false)`
    /// if the edge already existed.
    pub fn add_edge(&mut self, source: &str, target: &str) -> Result<bool, GraphError> {
        self.add_edge_with(source, target, CausalEdgeWeight::default())
    }

    /// Add `source -> target` with an explicit weight. Self-loops are rejected.
    pub fn add_edge_with(
        &mut self,
        source: &str,
        target: &str,
        weight: CausalEdgeWeight,
    ) -> Result<bool, GraphError> {
        if source == target {
            return Err(GraphError::SelfLoop {
                node: source.to_string(),
            });
        }
        let s = self.ensure_node(source);
        let t = self.ensure_node(target);
        if self.graph.find_edge(s, t).is_some() {
            return Ok(false);
        }
        self.graph.add_edge(s, t, weight);
        Ok(true)
    }

    /// Remove `source -> target`. Returns whether an edge was removed.
    pub fn remove_edge(&mut self, source: &str, target: &str) -> bool {
        let (Some(s), Some(t)) = (self.node_index(source), self.node_index(target)) else {
            return false;
        };
        match self.graph.find_edge(s, t) {
            Some(edge) => self.graph.remove_edge(edge).is_some(),
            None => false,
        }
    }

    pub fn has_edge(&self, source: &str, target: &str) -> bool {
        match (self.node_index(source), self.node_index(target)) {
            (Some(s), Some(t)) => self.graph.find_edge(s, t).is_some(),
            _ => false,
        }
    }

    pub fn edge_weight(&self, source: &str, target: &str) -> Option<&CausalEdgeWeight> {
        let s = self.node_index(source)?;
        let t = self.node_index(target)?;
        let edge = self.graph.find_edge(s, t)?;
        self.graph.edge_weight(edge)
    }

    pub(crate) fn edge_weight_mut(
        &mut self,
        source: &str,
        target: &str,
    ) -> Option<&mut CausalEdgeWeight> {
        let s = self.node_index(source)?;
        let t = self.node_index(target)?;
        let edge = self.graph.find_edge(s, t)?;
        self.graph.edge_weight_mut(edge)
    }

    /// Vote count of `source -> target`, if present.
    pub fn edge_votes(&self, source: &str, target: &str) -> Option<usize> {
        self.edge_weight(source, target).map(|w| w.votes)
    }

    /// All edges as `(source, target)`, sorted.
    pub fn edges(&self) -> Vec<(String, String)> {
        let mut edges: Vec<(String, String)> = self
            .graph
            .edge_indices()
            .filter_map(|e| self.graph.edge_endpoints(e))
            .map(|(s, t)| (self.name_of(s).to_string(), self.name_of(t).to_string()))
            .collect();
        edges.sort();
        edges
    }

    /// Sorted direct causes of `name`. Unknown node → empty.
    pub fn parents(&self, name: &str) -> Vec<String> {
        self.neighbors_sorted(name, Direction::Incoming)
    }

    /// Sorted direct effects of `name`. Unknown node → empty.
    pub fn children(&self, name: &str) -> Vec<String> {
        self.neighbors_sorted(name, Direction::Outgoing)
    }

    /// Sorted skeleton neighbours (parents and children, deduplicated).
    pub fn adjacent(&self, name: &str) -> Vec<String> {
        let mut all: BTreeSet<String> = self.parents(name).into_iter().collect();
        all.extend(self.children(name));
        all.into_iter().collect()
    }

    fn neighbors_sorted(&self, name: &str, direction: Direction) -> Vec<String> {
        let Some(idx) = self.node_index(name) else {
            return Vec::new();
        };
        let mut out: Vec<String> = self
            .graph
            .neighbors_directed(idx, direction)
            .map(|n| self.name_of(n).to_string())
            .collect();
        out.sort();
        out.dedup();
        out
    }

    /// Everything reachable from `name` along directed edges, excluding
    /// `name` itself (unless it sits on a cycle). Unknown or isolated node → empty.
    pub fn descendants(&self, name: &str) -> BTreeSet<String> {
        self.reachable(name, Direction::Outgoing)
    }

    /// Everything with a directed path into `name`.
    pub fn ancestors(&self, name: &str) -> BTreeSet<String> {
        self.reachable(name, Direction::Incoming)
    }

    fn reachable(&self, name: &str, direction: Direction) -> BTreeSet<String> {
        let mut out = BTreeSet::new();
        let Some(start) = self.node_index(name) else {
            return out;
        };
        let mut seen = std::collections::HashSet::new();
        let mut queue = VecDeque::new();
        queue.push_back(start);
        while let Some(current) = queue.pop_front() {
            for next in self.graph.neighbors_directed(current, direction) {
                if seen.insert(next) {
                    out.insert(self.name_of(next).to_string());
                    queue.push_back(next);
                }
            }
        }
        out
    }

    /// Edge set with direction stripped: each adjacent pair once, as
    /// `(min, max)` by name.
    pub fn undirected_skeleton(&self) -> BTreeSet<(String, String)> {
        self.edges()
            .into_iter()
            .map(|(s, t)| if s <= t { (s, t) } else { (t, s) })
            .collect()
    }

    /// Same node names, observed flags, and directed edges.
    pub fn is_isomorphic_to(&self, other: &CausalGraph) -> bool {
        if self.node_names() != other.node_names() {
            return false;
        }
        if self.latent_names() != other.latent_names() {
            return false;
        }
        self.edges() == other.edges()
    }
}

impl Default for CausalGraph {
    fn default() -> Self {
        Self::new()
    }
}
