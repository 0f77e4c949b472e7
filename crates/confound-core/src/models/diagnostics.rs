//! Diagnostic report: an ordered audit log of every edge the pipeline
//! dropped, broke, or injected, and every algorithm that failed.

use serde::{Deserialize, Serialize};

/// Pipeline stage that emitted a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Discovery,
    Consensus,
    Temporal,
    Overrides,
    Adjustment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// A discovery algorithm produced no candidate.
    AlgorithmFailed,
    /// Both directions of a pair reached quorum with equal votes; edge dropped.
    ConsensusTie,
    /// Edge removed to break a directed cycle.
    CycleBroken,
    /// Discovered edge dropped for contradicting the temporal order.
    TemporalViolation,
    /// Domain directive applied.
    OverrideApplied,
    /// Domain directive rejected (temporal contradiction or self-loop).
    OverrideRejected,
}

impl DiagnosticKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AlgorithmFailed => "algorithm_failed",
            Self::ConsensusTie => "consensus_tie",
            Self::CycleBroken => "cycle_broken",
            Self::TemporalViolation => "temporal_violation",
            Self::OverrideApplied => "override_applied",
            Self::OverrideRejected => "override_rejected",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub stage: Stage,
    pub kind: DiagnosticKind,
    /// The affected edge as `(source, target)`, when there is one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edge: Option<(String, String)>,
    pub detail: String,
}

impl Diagnostic {
    pub fn new(stage: Stage, kind: DiagnosticKind, detail: impl Into<String>) -> Self {
        Self {
            stage,
            kind,
            edge: None,
            detail: detail.into(),
        }
    }

    pub fn for_edge(
        stage: Stage,
        kind: DiagnosticKind,
        source: &str,
        target: &str,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            stage,
            kind,
            edge: Some((source.to_string(), target.to_string())),
            detail: detail.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticReport {
    entries: Vec<Diagnostic>,
}

impl DiagnosticReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.entries.push(diagnostic);
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn of_kind(&self, kind: DiagnosticKind) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter().filter(move |d| d.kind == kind)
    }

    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.of_kind(kind).count()
    }

    /// Whether any diagnostic of `kind` concerns the edge `source -> target`.
    pub fn mentions_edge(&self, kind: DiagnosticKind, source: &str, target: &str) -> bool {
        self.of_kind(kind).any(|d| {
            d.edge
                .as_ref()
                .is_some_and(|(s, t)| s == source && t == target)
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl Extend<Diagnostic> for DiagnosticReport {
    fn extend<T: IntoIterator<Item = Diagnostic>>(&mut self, iter: T) {
        self.entries.extend(iter);
    }
}
