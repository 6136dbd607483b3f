//! Source graph entities and record handles.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::value::Value;

/// Internal bookkeeping keys on nodes that never reach the target schema.
pub const NODE_IGNORED_FIELDS: &[&str] = &["__id", "__label"];

/// Internal bookkeeping keys on edges that never reach the target schema.
pub const EDGE_IGNORED_FIELDS: &[&str] = &["__id", "__label", "__from_id", "__to_id"];

/// A node read from the source graph.
///
/// The identifier is unique across the whole source graph regardless of
/// label, but is only stable within one source-graph lifetime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceNode {
    pub id: i64,
    pub label: String,
    pub properties: BTreeMap<String, Value>,
}

impl SourceNode {
    pub fn new(id: i64, label: impl Into<String>, properties: BTreeMap<String, Value>) -> Self {
        Self {
            id,
            label: label.into(),
            properties,
        }
    }
}

/// A directed edge read from the source graph.
///
/// Both endpoint identifiers must resolve to previously migrated nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceEdge {
    pub label: String,
    pub from_id: i64,
    pub to_id: i64,
    pub properties: BTreeMap<String, Value>,
}

impl SourceEdge {
    pub fn new(
        label: impl Into<String>,
        from_id: i64,
        to_id: i64,
        properties: BTreeMap<String, Value>,
    ) -> Self {
        Self {
            label: label.into(),
            from_id,
            to_id,
            properties,
        }
    }
}

/// Whether an index targets node types or edge types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Node,
    Edge,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Node => f.write_str("node"),
            EntityKind::Edge => f.write_str("edge"),
        }
    }
}

/// A secondary index declared by the source graph.
///
/// Multivalued specs are filtered out before reaching the target engine;
/// its index structure cannot index array-valued properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexSpec {
    pub kind: EntityKind,
    pub label: String,
    pub property: String,
    pub unique: bool,
    pub multivalued: bool,
}

/// Opaque handle to a record persisted in the target engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecordHandle(pub u64);

impl fmt::Display for RecordHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
