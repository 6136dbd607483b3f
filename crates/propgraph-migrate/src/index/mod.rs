//! Best-effort secondary index construction.
//!
//! Multivalued specs are skipped with a notice: the target engine's index
//! structure cannot index array-valued properties. Creation failures are
//! logged and skipped; the loaded data remains valid without the index.

use tracing::{info, warn};

use crate::core::traits::{GraphSource, GraphStore};
use crate::error::Result;

/// Outcome of the index phase.
#[derive(Debug, Default, Clone, Copy)]
pub struct IndexReport {
    pub created: usize,
    pub skipped_multivalued: usize,
    pub failed: usize,
}

/// Declare the indices described by the source graph.
pub fn build_indexes(source: &dyn GraphSource, store: &mut dyn GraphStore) -> Result<IndexReport> {
    info!("Creating indices...");
    let mut report = IndexReport::default();
    for spec in source.index_specs()? {
        let uniqueness = if spec.unique { "unique" } else { "non-unique" };
        if spec.multivalued {
            info!(
                "Skipping {} index on '{}' field for {} label '{}' as array properties cannot be indexed",
                uniqueness, spec.property, spec.kind, spec.label
            );
            report.skipped_multivalued += 1;
            continue;
        }
        info!(
            "Creating {} index on '{}' field for {} label '{}'...",
            uniqueness, spec.property, spec.kind, spec.label
        );
        match store.create_index(&spec.label, &spec.property, spec.unique) {
            Ok(()) => report.created += 1,
            Err(e) => {
                warn!(
                    "Error during {} index creation on '{}' field for {} label '{}': {}",
                    uniqueness, spec.property, spec.kind, spec.label, e
                );
                report.failed += 1;
            }
        }
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::graph::{EntityKind, IndexSpec};
    use crate::core::value::{Value, ValueKind};
    use crate::schema;
    use crate::source::MemoryGraph;
    use crate::store::MemoryStore;
    use crate::typemap::TargetType;
    use std::collections::BTreeMap;

    fn gene_graph() -> MemoryGraph {
        let mut graph = MemoryGraph::new();
        let mut properties = BTreeMap::new();
        properties.insert("symbol".to_string(), Value::String("TP53".into()));
        properties.insert(
            "tags".to_string(),
            Value::List(vec![Value::String("oncogene".into())]),
        );
        graph.add_node("Gene", properties);
        graph
    }

    #[test]
    fn test_creates_declared_indices() {
        let mut graph = gene_graph();
        graph.add_index(IndexSpec {
            kind: EntityKind::Node,
            label: "Gene".into(),
            property: "symbol".into(),
            unique: true,
            multivalued: false,
        });

        let mut store = MemoryStore::new();
        schema::declare_vertex_types(&graph, &mut store).unwrap();
        let report = build_indexes(&graph, &mut store).unwrap();

        assert_eq!(report.created, 1);
        assert_eq!(report.skipped_multivalued, 0);
        assert_eq!(report.failed, 0);
        assert!(store.has_index("Gene", "symbol"));
    }

    #[test]
    fn test_multivalued_index_is_skipped() {
        let mut graph = gene_graph();
        graph.add_index(IndexSpec {
            kind: EntityKind::Node,
            label: "Gene".into(),
            property: "tags".into(),
            unique: false,
            multivalued: true,
        });

        let mut store = MemoryStore::new();
        schema::declare_vertex_types(&graph, &mut store).unwrap();
        assert_eq!(
            store.type_def("Gene").unwrap().properties.get("tags"),
            Some(&TargetType::List(ValueKind::String))
        );

        let report = build_indexes(&graph, &mut store).unwrap();
        assert_eq!(report.created, 0);
        assert_eq!(report.skipped_multivalued, 1);
        assert_eq!(report.failed, 0);
        assert!(!store.has_index("Gene", "tags"));
    }

    #[test]
    fn test_index_failure_does_not_abort() {
        let mut graph = gene_graph();
        for _ in 0..2 {
            // Declared twice: the second creation fails as a duplicate.
            graph.add_index(IndexSpec {
                kind: EntityKind::Node,
                label: "Gene".into(),
                property: "symbol".into(),
                unique: true,
                multivalued: false,
            });
        }
        graph.add_index(IndexSpec {
            kind: EntityKind::Node,
            label: "Unknown".into(),
            property: "symbol".into(),
            unique: false,
            multivalued: false,
        });

        let mut store = MemoryStore::new();
        schema::declare_vertex_types(&graph, &mut store).unwrap();
        let report = build_indexes(&graph, &mut store).unwrap();

        assert_eq!(report.created, 1);
        assert_eq!(report.failed, 2);
        assert!(store.has_index("Gene", "symbol"));
    }
}
