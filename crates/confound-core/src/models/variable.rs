//! Variables: named, typed columns with a declared temporal rank.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::VariableError;

/// Measurement type of a variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariableKind {
    Continuous,
    Binary,
}

impl VariableKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Continuous => "continuous",
            Self::Binary => "binary",
        }
    }
}

/// A registered column. Immutable once built: fields are only readable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    name: String,
    kind: VariableKind,
    /// Temporal rank: a variable cannot be caused by variables with a higher rank.
    rank: i64,
}

impl Variable {
    pub fn new(name: impl Into<String>, kind: VariableKind, rank: i64) -> Self {
        Self {
            name: name.into(),
            kind,
            rank,
        }
    }

    pub fn continuous(name: impl Into<String>, rank: i64) -> Self {
        Self::new(name, VariableKind::Continuous, rank)
    }

    pub fn binary(name: impl Into<String>, rank: i64) -> Self {
        Self::new(name, VariableKind::Binary, rank)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> VariableKind {
        self.kind
    }

    pub fn rank(&self) -> i64 {
        self.rank
    }
}

/// The declared set of observed variables, keyed by name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VariableRegistry {
    variables: BTreeMap<String, Variable>,
}

impl VariableRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a list, failing on the first duplicate.
    pub fn from_variables(
        variables: impl IntoIterator<Item = Variable>,
    ) -> Result<Self, VariableError> {
        let mut registry = Self::new();
        for variable in variables {
            registry.register(variable)?;
        }
        Ok(registry)
    }

    /// Register a variable. Names must be non-empty, free of surrounding whitespace, and unique.
    pub fn register(&mut self, variable: Variable) -> Result<(), VariableError> {
        let name = variable.name().trim();
        if name.is_empty() {
            return Err(VariableError::Invalid {
                reason: "variable name must not be empty".to_string(),
            });
        }
        if name != variable.name() {
            return Err(VariableError::Invalid {
                reason: format!("variable name {:?} has surrounding whitespace", variable.name()),
            });
        }
        if self.variables.contains_key(name) {
            return Err(VariableError::Duplicate {
                name: name.to_string(),
            });
        }
        self.variables.insert(name.to_string(), variable);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Variable> {
        self.variables.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    /// Variable names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.variables.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Variable> {
        self.variables.values()
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}
