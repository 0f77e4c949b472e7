//! Column-major numeric sample with named columns.

use std::collections::HashSet;

use nalgebra::DMatrix;

use confound_core::constants;
use confound_core::errors::DiscoveryError;

/// Rows are observations, columns are variables. Immutable once built and
/// shared by reference across concurrent discovery runs.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    names: Vec<String>,
    columns: Vec<Vec<f64>>,
    rows: usize,
}

fn degenerate(reason: impl Into<String>) -> DiscoveryError {
    DiscoveryError::DegenerateSample {
        reason: reason.into(),
    }
}

impl Sample {
    /// Build from one vector per column.
    pub fn from_columns<S: Into<String>>(
        names: Vec<S>,
        columns: Vec<Vec<f64>>,
    ) -> Result<Self, DiscoveryError> {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.len() != columns.len() {
            return Err(degenerate(format!(
                "{} names for {} columns",
                names.len(),
                columns.len()
            )));
        }
        if names.len() < 2 {
            return Err(degenerate("at least 2 columns are required"));
        }
        let mut seen = HashSet::new();
        for name in &names {
            if name.is_empty() {
                return Err(degenerate("empty column name"));
            }
            if !seen.insert(name.as_str()) {
                return Err(degenerate(format!("duplicate column {name}")));
            }
        }

        let rows = columns[0].len();
        for (name, column) in names.iter().zip(&columns) {
            if column.len() != rows {
                return Err(degenerate(format!(
                    "column {name} has {} rows, expected {rows}",
                    column.len()
                )));
            }
            if let Some(pos) = column.iter().position(|v| !v.is_finite()) {
                return Err(degenerate(format!("non-finite value in {name} at row {pos}")));
            }
        }
        if rows < constants::MIN_SAMPLE_ROWS {
            return Err(degenerate(format!(
                "{rows} rows, at least {} required",
                constants::MIN_SAMPLE_ROWS
            )));
        }

        Ok(Self {
            names,
            columns,
            rows,
        })
    }

    /// Build from row-major observations.
    pub fn from_rows<S: Into<String>>(
        names: Vec<S>,
        rows: &[Vec<f64>],
    ) -> Result<Self, DiscoveryError> {
        let width = names.len();
        let mut columns = vec![Vec::with_capacity(rows.len()); width];
        for (r, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(degenerate(format!(
                    "row {r} has {} values, expected {width}",
                    row.len()
                )));
            }
            for (column, value) in columns.iter_mut().zip(row) {
                column.push(*value);
            }
        }
        Self::from_columns(names, columns)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn n_rows(&self) -> usize {
        self.rows
    }

    pub fn n_cols(&self) -> usize {
        self.names.len()
    }

    pub fn column(&self, idx: usize) -> &[f64] {
        &self.columns[idx]
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    pub fn mean(&self, idx: usize) -> f64 {
        self.columns[idx].iter().sum::<f64>() / self.rows as f64
    }

    /// Population covariance matrix (divides by n).
    pub(crate) fn covariance(&self) -> DMatrix<f64> {
        let means: Vec<f64> = (0..self.n_cols()).map(|j| self.mean(j)).collect();
        let centred = DMatrix::from_fn(self.rows, self.n_cols(), |r, c| {
            self.columns[c][r] - means[c]
        });
        (centred.transpose() * &centred) / self.rows as f64
    }

    /// Pearson correlation matrix. A constant column is degenerate.
    pub fn correlation_matrix(&self) -> Result<Vec<Vec<f64>>, DiscoveryError> {
        let corr = self.correlation()?;
        Ok(corr
            .row_iter()
            .map(|row| row.iter().copied().collect())
            .collect())
    }

    pub(crate) fn correlation(&self) -> Result<DMatrix<f64>, DiscoveryError> {
        let cov = self.covariance();
        let d = self.n_cols();
        let sd: Vec<f64> = (0..d).map(|j| cov[(j, j)].sqrt()).collect();
        if let Some(j) = sd.iter().position(|s| *s <= f64::EPSILON) {
            return Err(degenerate(format!("column {} is constant", self.names[j])));
        }
        let mut corr = DMatrix::zeros(d, d);
        for a in 0..d {
            for b in 0..d {
                corr[(a, b)] = if a == b {
                    1.0
                } else {
                    (cov[(a, b)] / (sd[a] * sd[b])).clamp(-1.0, 1.0)
                };
            }
        }
        Ok(corr)
    }

    /// Copy with every column centred to mean 0 and scaled to unit variance.
    pub fn standardized(&self) -> Result<Self, DiscoveryError> {
        let cov = self.covariance();
        let mut columns = Vec::with_capacity(self.n_cols());
        for (j, column) in self.columns.iter().enumerate() {
            let sd = cov[(j, j)].sqrt();
            if sd <= f64::EPSILON {
                return Err(degenerate(format!("column {} is constant", self.names[j])));
            }
            let mean = self.mean(j);
            columns.push(column.iter().map(|v| (v - mean) / sd).collect());
        }
        Ok(Self {
            names: self.names.clone(),
            columns,
            rows: self.rows,
        })
    }
}
