//! Node and edge migration: stream source entities, normalize collections,
//! and write records through the target engine's insert API.
//!
//! Property failures are recoverable per instance: a rejected value is
//! logged, reported, and dropped, and the record keeps its remaining
//! properties. A node is always persisted, even with every property dropped.
//! Unresolvable edge endpoints are fatal.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::core::graph::{SourceEdge, SourceNode, EDGE_IGNORED_FIELDS, NODE_IGNORED_FIELDS};
use crate::core::idmap::IdentifierMap;
use crate::core::traits::{GraphSource, GraphStore};
use crate::error::{MigrateError, Result};
use crate::normalize::to_target_value;

/// One property that was dropped during migration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedProperty {
    /// What the property belonged to, e.g. `node 42` or `edge 1->2`.
    pub subject: String,
    /// Label of the owning entity.
    pub label: String,
    /// Property key.
    pub key: String,
    /// Why the write was rejected.
    pub reason: String,
}

/// Outcome of one migration pass (nodes or edges).
#[derive(Debug, Default)]
pub struct TransferReport {
    /// Records created in the target engine.
    pub records_created: u64,
    /// Properties dropped under the tolerant per-property policy.
    pub skipped: Vec<SkippedProperty>,
}

/// Migrate every source node, populating the identifier map.
///
/// Guarantees exactly one target record per source node; there is no
/// partial or rollback state at the node level.
pub fn migrate_nodes(
    source: &dyn GraphSource,
    store: &mut dyn GraphStore,
    idmap: &mut IdentifierMap,
) -> Result<TransferReport> {
    let mut report = TransferReport::default();
    let labels = source.node_labels()?;
    for (i, label) in labels.iter().enumerate() {
        info!(
            "Creating nodes with label '{}' ({}/{})...",
            label,
            i + 1,
            labels.len()
        );
        for node in source.nodes(label)? {
            let node = node?;
            let handle = store.insert_vertex(label)?;
            set_node_properties(store, &node, handle, &mut report);
            report.records_created += 1;
            if let Some(previous) = idmap.insert(node.id, handle) {
                warn!(
                    "Duplicate source node id {} (was {}, now {})",
                    node.id, previous, handle
                );
            }
        }
    }
    Ok(report)
}

fn set_node_properties(
    store: &mut dyn GraphStore,
    node: &SourceNode,
    handle: crate::core::graph::RecordHandle,
    report: &mut TransferReport,
) {
    for (key, value) in &node.properties {
        if NODE_IGNORED_FIELDS.contains(&key.as_str()) {
            continue;
        }
        let Some(target_value) = to_target_value(value) else {
            continue; // nulls have no target representation
        };
        if let Err(e) = store.set_property(handle, key, target_value) {
            warn!(
                "Illegal property '{} -> {}' for node '{}[:{}]': {}",
                key, value, node.id, node.label, e
            );
            report.skipped.push(SkippedProperty {
                subject: format!("node {}", node.id),
                label: node.label.clone(),
                key: key.clone(),
                reason: e.to_string(),
            });
        }
    }
}

/// Migrate every source edge through the completed identifier map.
///
/// Must run strictly after [`migrate_nodes`]: an endpoint that does not
/// resolve through the map is a fatal error. Edges produce no identifier
/// mapping of their own.
pub fn migrate_edges(
    source: &dyn GraphSource,
    store: &mut dyn GraphStore,
    idmap: &IdentifierMap,
) -> Result<TransferReport> {
    let mut report = TransferReport::default();
    let labels = source.edge_labels()?;
    for (i, label) in labels.iter().enumerate() {
        info!(
            "Creating edges with label '{}' ({}/{})...",
            label,
            i + 1,
            labels.len()
        );
        for edge in source.edges(label)? {
            let edge = edge?;
            let from = idmap
                .resolve(edge.from_id)
                .ok_or_else(|| MigrateError::UnresolvedEndpoint {
                    label: edge.label.clone(),
                    node_id: edge.from_id,
                })?;
            let to = idmap
                .resolve(edge.to_id)
                .ok_or_else(|| MigrateError::UnresolvedEndpoint {
                    label: edge.label.clone(),
                    node_id: edge.to_id,
                })?;
            let handle = store.insert_edge(label, from, to)?;
            set_edge_properties(store, &edge, handle, &mut report);
            report.records_created += 1;
        }
    }
    Ok(report)
}

fn set_edge_properties(
    store: &mut dyn GraphStore,
    edge: &SourceEdge,
    handle: crate::core::graph::RecordHandle,
    report: &mut TransferReport,
) {
    for (key, value) in &edge.properties {
        if EDGE_IGNORED_FIELDS.contains(&key.as_str()) {
            continue;
        }
        let Some(target_value) = to_target_value(value) else {
            continue;
        };
        if let Err(e) = store.set_property(handle, key, target_value) {
            warn!(
                "Illegal property '{} -> {}' for edge '{}->{}[:{}]': {}",
                key, value, edge.from_id, edge.to_id, edge.label, e
            );
            report.skipped.push(SkippedProperty {
                subject: format!("edge {}->{}", edge.from_id, edge.to_id),
                label: edge.label.clone(),
                key: key.clone(),
                reason: e.to_string(),
            });
        }
    }
}
