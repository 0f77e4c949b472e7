use serde::{Deserialize, Serialize};

/// Extra ordering constraints on top of per-variable ranks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TemporalConfig {
    /// `[earlier, later]` pairs.
    pub precedence: Vec<(String, String)>,
}
