//! Temporal ordering: per-variable ranks plus optional explicit precedence pairs.
//!
//! An edge `cause -> effect` violates the order when the effect is strictly
//! earlier than the cause. Equal ranks never violate.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};

use crate::errors::TemporalOrderError;
use crate::models::VariableRegistry;

/// Immutable temporal order. Built once, then only queried.
#[derive(Debug, Clone, Default)]
pub struct TemporalOrder {
    ranks: HashMap<String, i64>,
    /// Transitive closure of precedence pairs: name -> everything strictly later.
    later: HashMap<String, HashSet<String>>,
}

impl TemporalOrder {
    /// An order with no constraints.
    pub fn unconstrained() -> Self {
        Self::default()
    }

    /// Rank-only order.
    pub fn from_ranks<I, S>(ranks: I) -> Self
    where
        I: IntoIterator<Item = (S, i64)>,
        S: Into<String>,
    {
        Self {
            ranks: ranks.into_iter().map(|(n, r)| (n.into(), r)).collect(),
            later: HashMap::new(),
        }
    }

    /// Rank-only order taken from the registered variables.
    pub fn from_registry(registry: &VariableRegistry) -> Self {
        Self::from_ranks(registry.iter().map(|v| (v.name().to_string(), v.rank())))
    }

    /// Extend a rank order with `(earlier, later)` precedence pairs.
    ///
    /// Pairs are closed transitively. Fails if the pairs form a cycle or if a
    /// pair puts a higher-ranked variable before a lower-ranked one.
    pub fn with_precedence<I, S>(mut self, pairs: I) -> Result<Self, TemporalOrderError>
    where
        I: IntoIterator<Item = (S, S)>,
        S: Into<String>,
    {
        let mut adjacency: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for (earlier, later) in pairs {
            let (earlier, later) = (earlier.into(), later.into());
            if earlier == later {
                return Err(TemporalOrderError::InconsistentPrecedence { name: earlier });
            }
            if let (Some(&er), Some(&lr)) = (self.ranks.get(&earlier), self.ranks.get(&later)) {
                if er > lr {
                    return Err(TemporalOrderError::ContradictsRank {
                        earlier,
                        later,
                        earlier_rank: er,
                        later_rank: lr,
                    });
                }
            }
            adjacency.entry(earlier).or_default().insert(later);
        }

        for (start, direct) in &adjacency {
            let mut reached: HashSet<String> = HashSet::new();
            let mut queue: VecDeque<&String> = direct.iter().collect();
            while let Some(node) = queue.pop_front() {
                if node == start {
                    return Err(TemporalOrderError::InconsistentPrecedence {
                        name: start.clone(),
                    });
                }
                if reached.insert(node.clone()) {
                    if let Some(next) = adjacency.get(node) {
                        queue.extend(next.iter());
                    }
                }
            }
            self.later
                .entry(start.clone())
                .or_default()
                .extend(reached);
        }
        Ok(self)
    }

    pub fn rank(&self, name: &str) -> Option<i64> {
        self.ranks.get(name).copied()
    }

    /// True when `a` is strictly earlier than `b` (by rank or by precedence).
    pub fn is_strictly_earlier(&self, a: &str, b: &str) -> bool {
        if let (Some(ra), Some(rb)) = (self.rank(a), self.rank(b)) {
            if ra < rb {
                return true;
            }
        }
        self.later.get(a).is_some_and(|set| set.contains(b))
    }

    /// Why `cause -> effect` is impossible, or `None` if the edge is permitted.
    pub fn violation(&self, cause: &str, effect: &str) -> Option<String> {
        if !self.is_strictly_earlier(effect, cause) {
            return None;
        }
        match (self.rank(cause), self.rank(effect)) {
            (Some(rc), Some(re)) if re < rc => Some(format!(
                "rank({effect}) = {re} precedes rank({cause}) = {rc}"
            )),
            _ => Some(format!("{effect} is declared to precede {cause}")),
        }
    }

    pub fn permits(&self, cause: &str, effect: &str) -> bool {
        self.violation(cause, effect).is_none()
    }
}
