//! Domain override directives: explicit, auditable edge assertions.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectiveAction {
    Add,
    Remove,
}

impl DirectiveAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Remove => "remove",
        }
    }
}

/// One `add` or `remove` assertion on the edge `source -> target`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Directive {
    pub action: DirectiveAction,
    pub source: String,
    pub target: String,
    /// Free-form justification carried into the diagnostic report.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Directive {
    pub fn add(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            action: DirectiveAction::Add,
            source: source.into(),
            target: target.into(),
            note: None,
        }
    }

    pub fn remove(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            action: DirectiveAction::Remove,
            source: source.into(),
            target: target.into(),
            note: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn describe(&self) -> String {
        let base = format!("{} {} -> {}", self.action.as_str(), self.source, self.target);
        match &self.note {
            Some(note) => format!("{base} ({note})"),
            None => base,
        }
    }
}
