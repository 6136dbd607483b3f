//! Migration orchestrator - sequences the whole run.
//!
//! Phases run strictly in order with no retry or skip transition: a fatal
//! error in any phase aborts the run and leaves the target partially
//! populated. The caller is expected to delete the target and retry the
//! whole run, never to resume.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

use crate::core::idmap::IdentifierMap;
use crate::core::traits::{GraphSource, GraphStore};
use crate::error::Result;
use crate::index::{self, IndexReport};
use crate::schema;
use crate::transfer::{self, SkippedProperty};

/// Migration phase. Transitions are unconditional and sequential.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    SchemaNodes,
    DataNodes,
    SchemaEdges,
    DataEdges,
    Indices,
    Done,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::SchemaNodes => "schema-nodes",
            Phase::DataNodes => "data-nodes",
            Phase::SchemaEdges => "schema-edges",
            Phase::DataEdges => "data-edges",
            Phase::Indices => "indices",
            Phase::Done => "done",
        };
        f.write_str(name)
    }
}

/// Result of a completed migration run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MigrationResult {
    /// Unique run identifier.
    pub run_id: String,

    /// When the migration started.
    pub started_at: DateTime<Utc>,

    /// When the migration completed.
    pub completed_at: DateTime<Utc>,

    /// Total duration in seconds.
    pub duration_seconds: f64,

    /// Vertex types declared.
    pub vertex_types: usize,

    /// Edge types declared.
    pub edge_types: usize,

    /// Vertex records created.
    pub nodes_created: u64,

    /// Edge records created.
    pub edges_created: u64,

    /// Indices created.
    pub indices_created: usize,

    /// Indices skipped because they target multivalued properties.
    pub indices_skipped: usize,

    /// Indices that failed to create (best-effort, run continued).
    pub indices_failed: usize,

    /// Properties dropped under the tolerant per-property policy.
    pub properties_skipped: Vec<SkippedProperty>,
}

impl MigrationResult {
    /// Convert to JSON string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Sequences schema building, node and edge migration, and index creation
/// against a fresh target store.
pub struct Orchestrator<S, T> {
    source: S,
    store: T,
    phase: Phase,
    create_indexes: bool,
}

impl<S: GraphSource, T: GraphStore> Orchestrator<S, T> {
    /// Create a new orchestrator over a source graph and an empty store.
    pub fn new(source: S, store: T) -> Self {
        Self {
            source,
            store,
            phase: Phase::SchemaNodes,
            create_indexes: true,
        }
    }

    /// Enable or disable the index phase.
    pub fn with_indexes(mut self, create: bool) -> Self {
        self.create_indexes = create;
        self
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Borrow the target store.
    pub fn store(&self) -> &T {
        &self.store
    }

    /// Take the target store out of the orchestrator.
    pub fn into_store(self) -> T {
        self.store
    }

    fn enter(&mut self, phase: Phase) {
        debug!("Entering phase: {}", phase);
        self.phase = phase;
    }

    /// Run the full migration: node schema, node data, edge schema, edge
    /// data, then indices. The identifier map lives only for the duration
    /// of this call.
    pub fn run(&mut self) -> Result<MigrationResult> {
        let started_at = Utc::now();
        let run_id = uuid::Uuid::new_v4().to_string();
        info!("Starting migration run: {}", run_id);

        self.enter(Phase::SchemaNodes);
        let vertex_types = schema::declare_vertex_types(&self.source, &mut self.store)?;

        self.enter(Phase::DataNodes);
        let mut idmap = IdentifierMap::with_capacity(self.source.node_count()?);
        let node_report = transfer::migrate_nodes(&self.source, &mut self.store, &mut idmap)?;

        self.enter(Phase::SchemaEdges);
        let edge_types = schema::declare_edge_types(&self.source, &mut self.store)?;

        self.enter(Phase::DataEdges);
        let edge_report = transfer::migrate_edges(&self.source, &mut self.store, &idmap)?;

        self.enter(Phase::Indices);
        let index_report = if self.create_indexes {
            index::build_indexes(&self.source, &mut self.store)?
        } else {
            IndexReport::default()
        };

        self.enter(Phase::Done);
        drop(idmap);

        let completed_at = Utc::now();
        let duration = (completed_at - started_at).num_milliseconds() as f64 / 1000.0;

        let mut properties_skipped = node_report.skipped;
        properties_skipped.extend(edge_report.skipped);

        let result = MigrationResult {
            run_id,
            started_at,
            completed_at,
            duration_seconds: duration,
            vertex_types,
            edge_types,
            nodes_created: node_report.records_created,
            edges_created: edge_report.records_created,
            indices_created: index_report.created,
            indices_skipped: index_report.skipped_multivalued,
            indices_failed: index_report.failed,
            properties_skipped,
        };

        info!(
            "Migration completed: {} vertex types, {} edge types, {} nodes, {} edges, {} indices in {:.1}s",
            result.vertex_types,
            result.edge_types,
            result.nodes_created,
            result.edges_created,
            result.indices_created,
            result.duration_seconds
        );

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::value::Value;
    use crate::source::MemoryGraph;
    use crate::store::MemoryStore;
    use std::collections::BTreeMap;

    #[test]
    fn test_phases_advance_to_done() {
        let mut graph = MemoryGraph::new();
        let mut properties = BTreeMap::new();
        properties.insert("symbol".to_string(), Value::String("TP53".into()));
        graph.add_node("Gene", properties);

        let mut orchestrator = Orchestrator::new(graph, MemoryStore::new());
        assert_eq!(orchestrator.phase(), Phase::SchemaNodes);

        let result = orchestrator.run().unwrap();
        assert_eq!(orchestrator.phase(), Phase::Done);
        assert_eq!(result.vertex_types, 1);
        assert_eq!(result.nodes_created, 1);
        assert_eq!(result.edges_created, 0);
    }

    #[test]
    fn test_aborted_run_stops_mid_phase() {
        let mut graph = MemoryGraph::new();
        let gene = graph.add_node("Gene", BTreeMap::new());
        graph.add_edge("interacts", gene, 12345, BTreeMap::new());

        let mut orchestrator = Orchestrator::new(graph, MemoryStore::new());
        assert!(orchestrator.run().is_err());

        // Nodes were persisted before the fatal edge failure; no rollback.
        assert_eq!(orchestrator.phase(), Phase::DataEdges);
        assert_eq!(orchestrator.store().vertex_count(), 1);
        assert_eq!(orchestrator.store().edge_count(), 0);
    }

    #[test]
    fn test_index_phase_can_be_disabled() {
        use crate::core::graph::{EntityKind, IndexSpec};

        let mut graph = MemoryGraph::new();
        let mut properties = BTreeMap::new();
        properties.insert("symbol".to_string(), Value::String("TP53".into()));
        graph.add_node("Gene", properties);
        graph.add_index(IndexSpec {
            kind: EntityKind::Node,
            label: "Gene".into(),
            property: "symbol".into(),
            unique: true,
            multivalued: false,
        });

        let mut orchestrator = Orchestrator::new(graph, MemoryStore::new()).with_indexes(false);
        let result = orchestrator.run().unwrap();
        assert_eq!(result.indices_created, 0);
        assert!(!orchestrator.store().has_index("Gene", "symbol"));
    }
}
