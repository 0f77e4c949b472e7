use serde::{Deserialize, Serialize};

use crate::models::Directive;

/// Domain override configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OverrideConfig {
    /// Fail the batch on a temporally impossible addition instead of skipping it.
    pub strict_temporal: bool,
    /// Directives applied in order; later ones win on the same edge.
    pub directives: Vec<Directive>,
}
