//! PC-stable constraint-based search.
//!
//! 1. Skeleton: start complete; for conditioning-set size `l = 0, 1, ...`
//!    remove `i - j` when some size-`l` subset of the neighbours of `i` or
//!    of `j` (taken from the adjacency snapshot at the start of the level)
//!    makes them conditionally independent under a Fisher-z test.
//! 2. V-structures: `i - k - j` with `i, j` non-adjacent and `k` outside
//!    their separating set becomes `i -> k <- j`.
//! 3. Meek rules 1-3 until nothing changes.
//! 4. Undirected leftovers are oriented from lower to higher column index.

use std::collections::{BTreeSet, HashMap};

use nalgebra::DMatrix;
use statrs::distribution::{ContinuousCDF, Normal};
use tracing::debug;

use confound_causal::CausalGraph;
use confound_core::config::PcConfig;
use confound_core::constants;
use confound_core::errors::DiscoveryError;

use crate::algorithm::IDiscoveryAlgorithm;
use crate::sample::Sample;

/// Partial correlations are clamped this far inside (-1, 1) before the
/// Fisher transform.
const CORRELATION_CLAMP: f64 = 1.0 - 1e-12;

#[derive(Debug, Clone)]
pub struct PcAlgorithm {
    alpha: f64,
    max_condition_set: usize,
}

impl PcAlgorithm {
    pub fn new(alpha: f64, max_condition_set: usize) -> Self {
        Self {
            alpha,
            max_condition_set,
        }
    }

    pub fn from_config(config: &PcConfig) -> Self {
        Self::new(config.alpha, config.max_condition_set)
    }
}

impl Default for PcAlgorithm {
    fn default() -> Self {
        Self::from_config(&PcConfig::default())
    }
}

fn numerical(reason: impl Into<String>) -> DiscoveryError {
    DiscoveryError::NumericalFailure {
        algorithm: constants::ALGORITHM_PC.to_string(),
        reason: reason.into(),
    }
}

/// Fisher-z independence test over a shared correlation matrix.
struct FisherZ {
    corr: DMatrix<f64>,
    n: usize,
    alpha: f64,
    normal: Normal,
}

impl FisherZ {
    fn partial_correlation(&self, i: usize, j: usize, given: &[usize]) -> Result<f64, DiscoveryError> {
        if given.is_empty() {
            return Ok(self.corr[(i, j)]);
        }
        let mut idx = Vec::with_capacity(given.len() + 2);
        idx.push(i);
        idx.push(j);
        idx.extend_from_slice(given);
        let precision = self
            .corr
            .select_rows(&idx)
            .select_columns(&idx)
            .try_inverse()
            .ok_or_else(|| numerical(format!("singular correlation submatrix for {idx:?}")))?;
        let denom = (precision[(0, 0)] * precision[(1, 1)]).sqrt();
        if !denom.is_finite() || denom <= 0.0 {
            return Err(numerical(format!("non-positive partial variance for {idx:?}")));
        }
        Ok(-precision[(0, 1)] / denom)
    }

    /// p-value of `i ⊥ j | given`. Too few rows for the test → 0 (dependent).
    fn p_value(&self, i: usize, j: usize, given: &[usize]) -> Result<f64, DiscoveryError> {
        let dof = self.n as f64 - given.len() as f64 - 3.0;
        if dof <= 0.0 {
            return Ok(0.0);
        }
        let r = self
            .partial_correlation(i, j, given)?
            .clamp(-CORRELATION_CLAMP, CORRELATION_CLAMP);
        let z = 0.5 * ((1.0 + r) / (1.0 - r)).ln();
        let stat = dof.sqrt() * z.abs();
        Ok(2.0 * (1.0 - self.normal.cdf(stat)))
    }

    fn independent(&self, i: usize, j: usize, given: &[usize]) -> Result<bool, DiscoveryError> {
        Ok(self.p_value(i, j, given)? > self.alpha)
    }
}

/// All size-`k` subsets of `items`, in lexicographic order.
fn combinations(items: &[usize], k: usize) -> Vec<Vec<usize>> {
    let mut out = Vec::new();
    if k > items.len() {
        return out;
    }
    let mut idx: Vec<usize> = (0..k).collect();
    loop {
        out.push(idx.iter().map(|&i| items[i]).collect());
        let Some(pos) = (0..k).rev().find(|&p| idx[p] != p + items.len() - k) else {
            return out;
        };
        idx[pos] += 1;
        for q in pos + 1..k {
            idx[q] = idx[q - 1] + 1;
        }
    }
}

/// Partially directed graph: `mark[i][j]` means an edge end at `j` seen from
/// `i`. Both marks = undirected, one mark = directed `i -> j`.
struct Pdag {
    mark: Vec<Vec<bool>>,
}

impl Pdag {
    fn from_skeleton(adj: &[BTreeSet<usize>]) -> Self {
        let d = adj.len();
        let mut mark = vec![vec![false; d]; d];
        for (i, neighbours) in adj.iter().enumerate() {
            for &j in neighbours {
                mark[i][j] = true;
            }
        }
        Self { mark }
    }

    fn adjacent(&self, a: usize, b: usize) -> bool {
        self.mark[a][b] || self.mark[b][a]
    }

    fn undirected(&self, a: usize, b: usize) -> bool {
        self.mark[a][b] && self.mark[b][a]
    }

    fn directed(&self, a: usize, b: usize) -> bool {
        self.mark[a][b] && !self.mark[b][a]
    }

    /// Turn undirected `a - b` into `a -> b`. No-op unless undirected.
    fn orient(&mut self, a: usize, b: usize) -> bool {
        if self.undirected(a, b) {
            self.mark[b][a] = false;
            true
        } else {
            false
        }
    }

    fn len(&self) -> usize {
        self.mark.len()
    }

    /// One pass of Meek rules 1-3. Returns whether anything was oriented.
    fn meek_pass(&mut self) -> bool {
        let d = self.len();
        let mut changed = false;
        for a in 0..d {
            for b in 0..d {
                if !self.undirected(a, b) {
                    continue;
                }
                // R1: c -> a - b, c and b non-adjacent.
                let r1 = (0..d).any(|c| c != b && self.directed(c, a) && !self.adjacent(c, b));
                // R2: a -> c -> b with a - b.
                let r2 = (0..d).any(|c| self.directed(a, c) && self.directed(c, b));
                // R3: a - c -> b, a - e -> b, c and e non-adjacent.
                let r3 = (0..d).any(|c| {
                    self.undirected(a, c)
                        && self.directed(c, b)
                        && (c + 1..d).any(|e| {
                            self.undirected(a, e) && self.directed(e, b) && !self.adjacent(c, e)
                        })
                });
                if (r1 || r2 || r3) && self.orient(a, b) {
                    changed = true;
                }
            }
        }
        changed
    }
}

impl PcAlgorithm {
    fn skeleton(
        &self,
        test: &FisherZ,
        d: usize,
    ) -> Result<(Vec<BTreeSet<usize>>, HashMap<(usize, usize), Vec<usize>>), DiscoveryError> {
        let mut adj: Vec<BTreeSet<usize>> = (0..d)
            .map(|i| (0..d).filter(|&j| j != i).collect())
            .collect();
        let mut sepsets: HashMap<(usize, usize), Vec<usize>> = HashMap::new();

        for level in 0..=self.max_condition_set {
            let snapshot = adj.clone();
            let mut testable = false;
            for i in 0..d {
                for j in (i + 1)..d {
                    if !adj[i].contains(&j) {
                        continue;
                    }
                    let pools: [Vec<usize>; 2] = [
                        snapshot[i].iter().copied().filter(|&k| k != j).collect(),
                        snapshot[j].iter().copied().filter(|&k| k != i).collect(),
                    ];
                    'pools: for pool in &pools {
                        if pool.len() < level {
                            continue;
                        }
                        testable = true;
                        for given in combinations(pool, level) {
                            if test.independent(i, j, &given)? {
                                adj[i].remove(&j);
                                adj[j].remove(&i);
                                sepsets.insert((i, j), given);
                                break 'pools;
                            }
                        }
                    }
                }
            }
            if !testable {
                break;
            }
        }
        Ok((adj, sepsets))
    }
}

impl IDiscoveryAlgorithm for PcAlgorithm {
    fn name(&self) -> &str {
        constants::ALGORITHM_PC
    }

    fn discover(&self, sample: &Sample) -> Result<CausalGraph, DiscoveryError> {
        let d = sample.n_cols();
        let normal = Normal::new(0.0, 1.0).map_err(|e| numerical(e.to_string()))?;
        let test = FisherZ {
            corr: sample.correlation()?,
            n: sample.n_rows(),
            alpha: self.alpha,
            normal,
        };

        let (adj, sepsets) = self.skeleton(&test, d)?;
        let mut pdag = Pdag::from_skeleton(&adj);

        let mut v_structures = 0;
        for i in 0..d {
            for j in (i + 1)..d {
                if adj[i].contains(&j) {
                    continue;
                }
                let sepset = sepsets.get(&(i, j));
                for &k in adj[i].intersection(&adj[j]) {
                    if sepset.is_some_and(|s| s.contains(&k)) {
                        continue;
                    }
                    pdag.orient(i, k);
                    pdag.orient(j, k);
                    v_structures += 1;
                }
            }
        }

        while pdag.meek_pass() {}

        let names = sample.names();
        let mut graph = CausalGraph::with_nodes(names);
        for i in 0..d {
            for j in 0..d {
                let keep = pdag.directed(i, j) || (pdag.undirected(i, j) && i < j);
                if keep {
                    graph
                        .add_edge(&names[i], &names[j])
                        .map_err(|e| numerical(e.to_string()))?;
                }
            }
        }

        debug!(
            edges = graph.edge_count(),
            v_structures,
            skeleton = adj.iter().map(BTreeSet::len).sum::<usize>() / 2,
            "pc search finished"
        );
        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combinations_are_lexicographic() {
        assert_eq!(
            combinations(&[1, 4, 7], 2),
            vec![vec![1, 4], vec![1, 7], vec![4, 7]]
        );
        assert_eq!(combinations(&[1, 4], 0), vec![Vec::<usize>::new()]);
        assert!(combinations(&[1], 2).is_empty());
    }

    #[test]
    fn meek_rule_one_propagates() {
        // 0 -> 1 - 2, 0 and 2 non-adjacent.
        let mut adj = vec![BTreeSet::new(); 3];
        adj[0].insert(1);
        adj[1].insert(0);
        adj[1].insert(2);
        adj[2].insert(1);
        let mut pdag = Pdag::from_skeleton(&adj);
        pdag.orient(0, 1);
        while pdag.meek_pass() {}
        assert!(pdag.directed(1, 2));
    }
}
