//! JSON source graph loader.
//!
//! Reads a whole property graph from a single JSON document:
//!
//! ```json
//! {
//!   "nodes": [{"id": 1, "label": "Gene", "properties": {"symbol": "TP53"}}],
//!   "edges": [{"label": "interacts", "from": 1, "to": 2}],
//!   "indexes": [{"target": "node", "label": "Gene", "property": "symbol", "unique": true}]
//! }
//! ```
//!
//! JSON numbers become integers when they fit `i32`, longs for other
//! integral values, and doubles otherwise. Nested objects are carried as
//! their JSON text.

use serde::Deserialize;
use std::path::Path;

use crate::core::graph::{EntityKind, IndexSpec};
use crate::core::value::Value;
use crate::error::{MigrateError, Result};

use super::MemoryGraph;

#[derive(Debug, Deserialize)]
struct JsonGraphFile {
    #[serde(default)]
    nodes: Vec<JsonNode>,
    #[serde(default)]
    edges: Vec<JsonEdge>,
    #[serde(default)]
    indexes: Vec<JsonIndex>,
}

#[derive(Debug, Deserialize)]
struct JsonNode {
    id: i64,
    label: String,
    #[serde(default)]
    properties: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct JsonEdge {
    label: String,
    from: i64,
    to: i64,
    #[serde(default)]
    properties: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct JsonIndex {
    target: EntityKind,
    label: String,
    property: String,
    #[serde(default)]
    unique: bool,
    #[serde(default)]
    multivalued: bool,
}

/// Load a source graph from a JSON file.
pub fn load<P: AsRef<Path>>(path: P) -> Result<MemoryGraph> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| {
        MigrateError::Source(format!("failed to read graph file '{}': {}", path.display(), e))
    })?;
    let file: JsonGraphFile = serde_json::from_str(&content).map_err(|e| {
        MigrateError::Source(format!(
            "failed to parse graph file '{}': {}",
            path.display(),
            e
        ))
    })?;

    let mut graph = MemoryGraph::new();
    for node in file.nodes {
        graph.add_node_with_id(node.id, node.label, convert_map(node.properties));
    }
    for edge in file.edges {
        graph.add_edge(edge.label, edge.from, edge.to, convert_map(edge.properties));
    }
    for index in file.indexes {
        graph.add_index(IndexSpec {
            kind: index.target,
            label: index.label,
            property: index.property,
            unique: index.unique,
            multivalued: index.multivalued,
        });
    }
    Ok(graph)
}

fn convert_map(
    map: serde_json::Map<String, serde_json::Value>,
) -> std::collections::BTreeMap<String, Value> {
    map.into_iter().map(|(k, v)| (k, convert(v))).collect()
}

fn convert(value: serde_json::Value) -> Value {
    match value {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Boolean(b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                match i32::try_from(i) {
                    Ok(i) => Value::Integer(i),
                    Err(_) => Value::Long(i),
                }
            } else {
                Value::Double(n.as_f64().unwrap_or_default())
            }
        }
        serde_json::Value::String(s) => Value::String(s),
        serde_json::Value::Array(items) => Value::List(items.into_iter().map(convert).collect()),
        object @ serde_json::Value::Object(_) => Value::String(object.to_string()),
    }
}
