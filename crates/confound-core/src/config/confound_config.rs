//! Top-level confound configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{
    ConsensusConfig, DiscoveryConfig, ObservabilityConfig, OverrideConfig, SolverConfig,
    TemporalConfig,
};
use crate::constants;
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`CONFOUND_*`)
/// 2. Config file (`confound.toml`)
/// 3. Compiled defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfoundConfig {
    pub discovery: DiscoveryConfig,
    pub consensus: ConsensusConfig,
    pub temporal: TemporalConfig,
    pub overrides: OverrideConfig,
    pub solver: SolverConfig,
    pub observability: ObservabilityConfig,
}

impl ConfoundConfig {
    /// Load from a TOML file, apply environment overrides, then validate.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        let mut config: ConfoundConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Parse from a TOML string. Missing keys take defaults.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Apply `CONFOUND_*` environment variables.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary key lookup. Unparseable values are ignored.
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("CONFOUND_DISCOVERY_ALGORITHMS") {
            let names: Vec<String> = val
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
            if !names.is_empty() {
                self.discovery.algorithms = names;
            }
        }
        if let Some(v) = lookup("CONFOUND_DISCOVERY_THREADS").and_then(|v| v.parse().ok()) {
            self.discovery.threads = v;
        }
        if let Some(v) = lookup("CONFOUND_PC_ALPHA").and_then(|v| v.parse().ok()) {
            self.discovery.pc.alpha = v;
        }
        if let Some(v) = lookup("CONFOUND_CONSENSUS_QUORUM").and_then(|v| v.parse().ok()) {
            self.consensus.quorum = v;
        }
        if let Some(v) = lookup("CONFOUND_OVERRIDES_STRICT_TEMPORAL").and_then(|v| v.parse().ok())
        {
            self.overrides.strict_temporal = v;
        }
        if let Some(v) = lookup("CONFOUND_SOLVER_MAX_PATH_LENGTH").and_then(|v| v.parse().ok()) {
            self.solver.max_path_length = Some(v);
        }
        if let Some(v) = lookup("CONFOUND_SOLVER_MAX_PATHS").and_then(|v| v.parse().ok()) {
            self.solver.max_paths = v;
        }
        if let Some(val) = lookup("CONFOUND_LOG_LEVEL") {
            self.observability.log_level = val;
        }
        if let Some(v) = lookup("CONFOUND_LOG_JSON").and_then(|v| v.parse().ok()) {
            self.observability.json = v;
        }
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.discovery.algorithms.is_empty() {
            return Err(invalid("discovery.algorithms", "must name at least one algorithm"));
        }
        for name in &self.discovery.algorithms {
            if !constants::KNOWN_ALGORITHMS.contains(&name.as_str()) {
                return Err(invalid(
                    "discovery.algorithms",
                    &format!(
                        "unknown algorithm {name:?}, expected one of {:?}",
                        constants::KNOWN_ALGORITHMS
                    ),
                ));
            }
        }
        let pc = &self.discovery.pc;
        if !(pc.alpha > 0.0 && pc.alpha < 1.0) {
            return Err(invalid("discovery.pc.alpha", "must be in (0, 1)"));
        }
        if self.discovery.hill_climb.max_parents == 0 {
            return Err(invalid("discovery.hill_climb.max_parents", "must be greater than 0"));
        }
        let notears = &self.discovery.notears;
        if notears.lambda < 0.0 {
            return Err(invalid("discovery.notears.lambda", "must not be negative"));
        }
        if notears.w_threshold <= 0.0 {
            return Err(invalid("discovery.notears.w_threshold", "must be greater than 0"));
        }
        if notears.h_tolerance <= 0.0 {
            return Err(invalid("discovery.notears.h_tolerance", "must be greater than 0"));
        }
        if notears.max_outer_iterations == 0 || notears.inner_iterations == 0 {
            return Err(invalid("discovery.notears", "iteration counts must be greater than 0"));
        }
        if self.consensus.quorum == 0 {
            return Err(invalid("consensus.quorum", "must be at least 1"));
        }
        if self.consensus.min_candidates < constants::MIN_CONSENSUS_CANDIDATES {
            return Err(invalid(
                "consensus.min_candidates",
                &format!("must be at least {}", constants::MIN_CONSENSUS_CANDIDATES),
            ));
        }
        if self.solver.max_path_length == Some(0) {
            return Err(invalid("solver.max_path_length", "must be greater than 0"));
        }
        if self.solver.max_paths == 0 {
            return Err(invalid("solver.max_paths", "must be greater than 0"));
        }
        Ok(())
    }
}

fn invalid(field: &str, message: &str) -> ConfigError {
    ConfigError::ValidationFailed {
        field: field.to_string(),
        message: message.to_string(),
    }
}
