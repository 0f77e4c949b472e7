//! Dense index view of a graph snapshot used by the solver.
//!
//! Node indices follow name order, so iterating indices is alphabetical.

use std::collections::HashMap;

use crate::graph::CausalGraph;

pub(crate) struct GraphView {
    pub names: Vec<String>,
    lookup: HashMap<String, usize>,
    pub parents: Vec<Vec<usize>>,
    pub children: Vec<Vec<usize>>,
    /// Skeleton neighbours, ascending.
    pub adjacent: Vec<Vec<usize>>,
    pub observed: Vec<bool>,
    /// `descendants[a][b]`: b is reachable from a by a directed path.
    pub descendants: Vec<Vec<bool>>,
}

impl GraphView {
    pub fn new(graph: &CausalGraph) -> Self {
        let names = graph.node_names();
        let lookup: HashMap<String, usize> = names
            .iter()
            .enumerate()
            .map(|(i, n)| (n.clone(), i))
            .collect();
        let to_indices = |list: Vec<String>| -> Vec<usize> {
            let mut out: Vec<usize> = list.iter().filter_map(|n| lookup.get(n).copied()).collect();
            out.sort_unstable();
            out
        };

        let parents: Vec<Vec<usize>> = names.iter().map(|n| to_indices(graph.parents(n))).collect();
        let children: Vec<Vec<usize>> =
            names.iter().map(|n| to_indices(graph.children(n))).collect();
        let adjacent: Vec<Vec<usize>> =
            names.iter().map(|n| to_indices(graph.adjacent(n))).collect();
        let observed: Vec<bool> = names.iter().map(|n| graph.is_observed(n)).collect();

        let n = names.len();
        let mut descendants = vec![vec![false; n]; n];
        for (start, row) in descendants.iter_mut().enumerate() {
            let mut stack: Vec<usize> = children[start].clone();
            while let Some(node) = stack.pop() {
                if !row[node] {
                    row[node] = true;
                    stack.extend(children[node].iter().copied());
                }
            }
        }

        Self {
            names,
            lookup,
            parents,
            children,
            adjacent,
            observed,
            descendants,
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn index(&self, name: &str) -> Option<usize> {
        self.lookup.get(name).copied()
    }

    pub fn has_edge(&self, source: usize, target: usize) -> bool {
        self.children[source].binary_search(&target).is_ok()
    }

    /// `w` is a collider between its path neighbours `a` and `b`.
    pub fn is_collider(&self, a: usize, w: usize, b: usize) -> bool {
        self.has_edge(a, w) && self.has_edge(b, w)
    }

    /// `w` or one of its descendants is in `z`.
    pub fn self_or_descendant_in(&self, w: usize, z: &[bool]) -> bool {
        z[w] || self.descendants[w]
            .iter()
            .zip(z)
            .any(|(&is_desc, &in_z)| is_desc && in_z)
    }

    pub fn names_of(&self, indices: &[usize]) -> Vec<String> {
        indices.iter().map(|&i| self.names[i].clone()).collect()
    }
}
