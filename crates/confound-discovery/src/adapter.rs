//! Discovery adapter: runs every configured algorithm over one shared
//! sample on a bounded rayon pool and collects the candidates in
//! configuration order.
//!
//! A failing algorithm becomes a missing candidate; the rest carry on.

use std::time::Instant;

use rayon::prelude::*;
use tracing::{debug, info, warn};

use confound_causal::CandidateGraph;
use confound_core::config::DiscoveryConfig;
use confound_core::constants;
use confound_core::errors::{ConsensusError, DiscoveryError};

use crate::algorithm::IDiscoveryAlgorithm;
use crate::hill_climb::HillClimb;
use crate::notears::Notears;
use crate::pc::PcAlgorithm;
use crate::sample::Sample;

/// Build one algorithm by name.
pub fn build_algorithm(
    name: &str,
    config: &DiscoveryConfig,
) -> Result<Box<dyn IDiscoveryAlgorithm>, DiscoveryError> {
    match name {
        constants::ALGORITHM_PC => Ok(Box::new(PcAlgorithm::from_config(&config.pc))),
        constants::ALGORITHM_HILL_CLIMB => Ok(Box::new(HillClimb::from_config(&config.hill_climb))),
        constants::ALGORITHM_NOTEARS => Ok(Box::new(Notears::new(config.notears.clone()))),
        other => Err(DiscoveryError::UnknownAlgorithm {
            name: other.to_string(),
        }),
    }
}

/// Result of one discovery round.
#[derive(Debug)]
pub struct DiscoveryOutcome {
    /// Successful candidates, in algorithm order.
    pub candidates: Vec<CandidateGraph>,
    /// `(algorithm, error)` for every algorithm that produced nothing.
    pub failures: Vec<(String, DiscoveryError)>,
}

impl DiscoveryOutcome {
    /// The candidates, or `InsufficientCandidates` when fewer than `required`
    /// algorithms succeeded.
    pub fn require(self, required: usize) -> Result<Vec<CandidateGraph>, ConsensusError> {
        if self.candidates.len() < required {
            return Err(ConsensusError::InsufficientCandidates {
                succeeded: self.candidates.len(),
                required,
            });
        }
        Ok(self.candidates)
    }
}

pub struct DiscoveryAdapter {
    algorithms: Vec<Box<dyn IDiscoveryAlgorithm>>,
    pool: Option<rayon::ThreadPool>,
}

impl DiscoveryAdapter {
    /// Run `algorithms` on the global rayon pool.
    pub fn new(algorithms: Vec<Box<dyn IDiscoveryAlgorithm>>) -> Self {
        Self {
            algorithms,
            pool: None,
        }
    }

    /// Build the configured algorithms and a pool of `config.threads` workers
    /// (0 = global pool).
    pub fn from_config(config: &DiscoveryConfig) -> Result<Self, DiscoveryError> {
        let algorithms = config
            .algorithms
            .iter()
            .map(|name| build_algorithm(name, config))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(algorithms).with_threads(config.threads))
    }

    /// Use a dedicated pool of `threads` workers. Falls back to the global
    /// pool if `threads` is 0 or the pool cannot be built.
    pub fn with_threads(mut self, threads: usize) -> Self {
        if threads == 0 {
            self.pool = None;
            return self;
        }
        self.pool = match rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("confound-discovery-{i}"))
            .build()
        {
            Ok(pool) => Some(pool),
            Err(e) => {
                warn!(threads, error = %e, "could not build discovery pool; using global pool");
                None
            }
        };
        self
    }

    pub fn algorithm_names(&self) -> Vec<&str> {
        self.algorithms.iter().map(|a| a.name()).collect()
    }

    /// Run every algorithm over `sample`. Never fails as a whole.
    pub fn run(&self, sample: &Sample) -> DiscoveryOutcome {
        let start = Instant::now();
        let run_all = || -> Vec<(String, Result<CandidateGraph, DiscoveryError>)> {
            self.algorithms
                .par_iter()
                .map(|algorithm| {
                    let name = algorithm.name().to_string();
                    let began = Instant::now();
                    let result = algorithm
                        .discover(sample)
                        .map(|graph| CandidateGraph::new(name.clone(), graph));
                    debug!(
                        algorithm = %name,
                        ok = result.is_ok(),
                        elapsed_ms = began.elapsed().as_millis() as u64,
                        "discovery run finished"
                    );
                    (name, result)
                })
                .collect()
        };
        let results = match &self.pool {
            Some(pool) => pool.install(run_all),
            None => run_all(),
        };

        let mut candidates = Vec::new();
        let mut failures = Vec::new();
        for (name, result) in results {
            match result {
                Ok(candidate) => candidates.push(candidate),
                Err(e) => {
                    warn!(algorithm = %name, error = %e, "discovery algorithm failed");
                    failures.push((name, e));
                }
            }
        }

        info!(
            succeeded = candidates.len(),
            failed = failures.len(),
            rows = sample.n_rows(),
            columns = sample.n_cols(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "discovery complete"
        );
        DiscoveryOutcome {
            candidates,
            failures,
        }
    }

    /// Run and require the default minimum number of candidates.
    pub fn discover(&self, sample: &Sample) -> Result<Vec<CandidateGraph>, ConsensusError> {
        self.run(sample).require(constants::MIN_CONSENSUS_CANDIDATES)
    }
}
