//! Edge-list exchange format for final graphs: JSON (nodes + edges) and a
//! CSV rendering with one row per node followed by one row per edge.

use std::collections::HashMap;

use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use serde::{Deserialize, Serialize};

use crate::errors::GraphError;

const CSV_HEADER: [&str; 4] = ["source", "target", "source_observed", "target_observed"];

fn default_observed() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub name: String,
    /// `false` for latent nodes that are not registered variables.
    #[serde(default = "default_observed")]
    pub observed: bool,
}

/// Serialized graph: node list plus ordered `(source, target)` pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeList {
    pub nodes: Vec<NodeRecord>,
    pub edges: Vec<(String, String)>,
}

/// One CSV row. Node rows leave both target columns empty. Missing
/// observed columns mean observed, so a bare `source,target` file parses.
#[derive(Debug, Serialize, Deserialize)]
struct CsvRow {
    source: String,
    target: Option<String>,
    #[serde(default = "default_observed")]
    source_observed: bool,
    #[serde(default)]
    target_observed: Option<bool>,
}

impl EdgeList {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Render as CSV. Every node gets its own row, so latent flags and
    /// isolated nodes survive; names are quoted when they need it.
    pub fn to_csv(&self) -> Result<String, GraphError> {
        let observed: HashMap<&str, bool> = self
            .nodes
            .iter()
            .map(|n| (n.name.as_str(), n.observed))
            .collect();
        let is_observed = |name: &str| observed.get(name).copied().unwrap_or(true);

        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .from_writer(Vec::new());
        writer.write_record(CSV_HEADER).map_err(encoding)?;
        for node in &self.nodes {
            writer
                .serialize(CsvRow {
                    source: node.name.clone(),
                    target: None,
                    source_observed: node.observed,
                    target_observed: None,
                })
                .map_err(encoding)?;
        }
        for (source, target) in &self.edges {
            writer
                .serialize(CsvRow {
                    source: source.clone(),
                    target: Some(target.clone()),
                    source_observed: is_observed(source),
                    target_observed: Some(is_observed(target)),
                })
                .map_err(encoding)?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|err| encoding(err.into_error()))?;
        String::from_utf8(bytes).map_err(encoding)
    }

    /// Parse the CSV rendering. Nodes keep the order in which they first
    /// appear; a node given two different observed flags is rejected.
    pub fn from_csv(csv: &str) -> Result<Self, GraphError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .from_reader(csv.as_bytes());
        let headers = reader
            .headers()
            .map_err(|err| malformed(line_of(&err), err))?
            .clone();

        let mut list = EdgeList::default();
        let mut record = StringRecord::new();
        while reader
            .read_record(&mut record)
            .map_err(|err| malformed(line_of(&err), err))?
        {
            let line = record.position().map_or(0, |p| p.line() as usize);
            let row: CsvRow = record
                .deserialize(Some(&headers))
                .map_err(|err| malformed(line, err))?;
            if row.source.is_empty() {
                return Err(malformed(line, "empty source"));
            }
            list.push_node(&row.source, row.source_observed)
                .map_err(|reason| malformed(line, reason))?;
            match row.target {
                Some(target) => {
                    list.push_node(&target, row.target_observed.unwrap_or(true))
                        .map_err(|reason| malformed(line, reason))?;
                    list.edges.push((row.source, target));
                }
                None if row.target_observed.is_some() => {
                    return Err(malformed(line, "target_observed given without a target"));
                }
                None => {}
            }
        }
        Ok(list)
    }

    fn push_node(&mut self, name: &str, observed: bool) -> Result<(), String> {
        match self.nodes.iter().find(|n| n.name == name) {
            Some(existing) if existing.observed != observed => Err(format!(
                "node {name:?} is listed as both observed and latent"
            )),
            Some(_) => Ok(()),
            None => {
                self.nodes.push(NodeRecord {
                    name: name.to_string(),
                    observed,
                });
                Ok(())
            }
        }
    }
}

fn line_of(err: &csv::Error) -> usize {
    err.position().map_or(0, |p| p.line() as usize)
}

fn malformed(line: usize, reason: impl std::fmt::Display) -> GraphError {
    GraphError::MalformedEdgeList {
        line,
        reason: reason.to_string(),
    }
}

fn encoding(err: impl std::fmt::Display) -> GraphError {
    GraphError::EdgeListEncoding {
        reason: err.to_string(),
    }
}
