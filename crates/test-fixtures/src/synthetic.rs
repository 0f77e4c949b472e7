//! Seeded linear-Gaussian structural equation model.
//!
//! Each variable is a weighted sum of its parents plus independent Gaussian
//! noise. Variables must be declared in causal order; edges may only point
//! from an earlier declaration to a later one.

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

#[derive(Debug, Clone)]
pub struct LinearSem {
    names: Vec<String>,
    position: HashMap<String, usize>,
    /// (parent, child, weight)
    edges: Vec<(usize, usize, f64)>,
    noise_std: f64,
}

impl LinearSem {
    /// Variables in causal order.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        let position = names
            .iter()
            .enumerate()
            .map(|(i, n)| (n.clone(), i))
            .collect();
        Self {
            names,
            position,
            edges: Vec::new(),
            noise_std: 1.0,
        }
    }

    /// Add `source -> target` with a linear coefficient.
    ///
    /// # Panics
    /// Panics on unknown names or an edge against the declaration order.
    pub fn edge(mut self, source: &str, target: &str, weight: f64) -> Self {
        let s = *self
            .position
            .get(source)
            .unwrap_or_else(|| panic!("unknown variable {source}"));
        let t = *self
            .position
            .get(target)
            .unwrap_or_else(|| panic!("unknown variable {target}"));
        assert!(s < t, "{source} -> {target} goes against the declaration order");
        self.edges.push((s, t, weight));
        self
    }

    /// Standard deviation of every noise term.
    ///
    /// # Panics
    /// Panics unless `noise_std` is finite and non-negative.
    pub fn noise(mut self, noise_std: f64) -> Self {
        assert!(
            noise_std.is_finite() && noise_std >= 0.0,
            "noise std must be finite and non-negative, got {noise_std}"
        );
        self.noise_std = noise_std;
        self
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Draw `rows` observations. Output is column-major, one column per
    /// variable in declaration order.
    pub fn sample(&self, rows: usize, seed: u64) -> Vec<Vec<f64>> {
        let mut rng = StdRng::seed_from_u64(seed);
        let noise = Normal::new(0.0, self.noise_std).expect("noise std validated in noise()");
        let n = self.names.len();
        let mut columns = vec![vec![0.0; rows]; n];
        for row in 0..rows {
            for j in 0..n {
                let mut value = noise.sample(&mut rng);
                for &(s, t, w) in &self.edges {
                    if t == j {
                        value += w * columns[s][row];
                    }
                }
                columns[j][row] = value;
            }
        }
        columns
    }

    /// Row-major copy of [`sample`](Self::sample).
    pub fn sample_rows(&self, rows: usize, seed: u64) -> Vec<Vec<f64>> {
        let columns = self.sample(rows, seed);
        (0..rows)
            .map(|r| columns.iter().map(|c| c[r]).collect())
            .collect()
    }
}
