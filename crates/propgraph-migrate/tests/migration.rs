//! End-to-end migration tests over the in-memory source and store.

use propgraph_migrate::core::{EntityKind, GraphSource, GraphStore, IndexSpec, Value};
use propgraph_migrate::{MemoryGraph, MemoryStore, Orchestrator, Phase};
use std::collections::BTreeMap;

fn props(entries: &[(&str, Value)]) -> BTreeMap<String, Value> {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

/// Two node labels (Gene x3, Protein x2) and one edge label (interacts x2).
fn gene_protein_graph() -> MemoryGraph {
    let mut graph = MemoryGraph::new();
    let g1 = graph.add_node(
        "Gene",
        props(&[
            ("symbol", Value::String("TP53".into())),
            (
                "synonyms",
                Value::List(vec![Value::String("p53".into()), Value::String("LFS1".into())]),
            ),
        ]),
    );
    let g2 = graph.add_node("Gene", props(&[("symbol", Value::String("BRCA1".into()))]));
    graph.add_node("Gene", props(&[("symbol", Value::String("EGFR".into()))]));
    let p1 = graph.add_node("Protein", props(&[("mass", Value::Double(43.65))]));
    let p2 = graph.add_node("Protein", props(&[("mass", Value::Double(207.72))]));

    graph.add_edge(
        "interacts",
        g1,
        p1,
        props(&[("confidence", Value::Double(0.9))]),
    );
    graph.add_edge(
        "interacts",
        g2,
        p2,
        props(&[("confidence", Value::Double(0.4))]),
    );
    graph
}

#[test]
fn full_migration_produces_expected_counts() {
    let graph = gene_protein_graph();
    let mut orchestrator = Orchestrator::new(graph, MemoryStore::new());
    let result = orchestrator.run().unwrap();
    let store = orchestrator.into_store();

    assert_eq!(result.vertex_types, 2);
    assert_eq!(result.edge_types, 1);
    assert_eq!(result.nodes_created, 5);
    assert_eq!(result.edges_created, 2);
    assert!(result.properties_skipped.is_empty());

    assert_eq!(store.type_names(EntityKind::Node), vec!["Gene", "Protein"]);
    assert_eq!(store.type_names(EntityKind::Edge), vec!["interacts"]);
    assert_eq!(store.vertex_count(), 5);
    assert_eq!(store.edge_count(), 2);
}

#[test]
fn every_edge_endpoint_resolves_to_a_live_vertex() {
    let graph = gene_protein_graph();
    let mut orchestrator = Orchestrator::new(graph, MemoryStore::new());
    orchestrator.run().unwrap();
    let store = orchestrator.into_store();

    for (_, edge) in store.records_of_type("interacts") {
        let from = edge.from.expect("edge has a source handle");
        let to = edge.to.expect("edge has a target handle");
        assert_eq!(store.resolve(from).unwrap(), "Gene");
        assert_eq!(store.resolve(to).unwrap(), "Protein");
    }
}

#[test]
fn list_properties_arrive_as_typed_arrays() {
    use propgraph_migrate::core::{TargetValue, TypedArray};

    let graph = gene_protein_graph();
    let mut orchestrator = Orchestrator::new(graph, MemoryStore::new());
    orchestrator.run().unwrap();
    let store = orchestrator.into_store();

    let synonyms: Vec<_> = store
        .records_of_type("Gene")
        .filter_map(|(_, r)| r.properties.get("synonyms"))
        .collect();
    assert_eq!(synonyms.len(), 1);
    assert_eq!(
        synonyms[0],
        &TargetValue::Array(TypedArray::Strings(vec!["p53".into(), "LFS1".into()]))
    );
}

#[test]
fn multivalued_index_is_skipped_but_run_completes() {
    let mut graph = MemoryGraph::new();
    graph.add_node(
        "Gene",
        props(&[(
            "tags",
            Value::List(vec![Value::String("oncogene".into())]),
        )]),
    );
    graph.add_index(IndexSpec {
        kind: EntityKind::Node,
        label: "Gene".into(),
        property: "tags".into(),
        unique: false,
        multivalued: true,
    });

    let mut orchestrator = Orchestrator::new(graph, MemoryStore::new());
    let result = orchestrator.run().unwrap();

    assert_eq!(orchestrator.phase(), Phase::Done);
    assert_eq!(result.indices_created, 0);
    assert_eq!(result.indices_skipped, 1);
    assert!(!orchestrator.store().has_index("Gene", "tags"));
}

#[test]
fn unique_index_is_declared_on_the_named_property() {
    let mut graph = gene_protein_graph();
    graph.add_index(IndexSpec {
        kind: EntityKind::Node,
        label: "Gene".into(),
        property: "symbol".into(),
        unique: true,
        multivalued: false,
    });

    let mut orchestrator = Orchestrator::new(graph, MemoryStore::new());
    let result = orchestrator.run().unwrap();

    assert_eq!(result.indices_created, 1);
    let store = orchestrator.into_store();
    let index = &store.indexes()[0];
    assert_eq!(index.type_name, "Gene");
    assert_eq!(index.property, "symbol");
    assert!(index.unique);
}

#[test]
fn json_source_migrates_like_the_memory_source() {
    use std::io::Write;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(
        br#"{
            "nodes": [
                {"id": 1, "label": "Gene", "properties": {"symbol": "TP53"}},
                {"id": 2, "label": "Protein", "properties": {"mass": 43.65}}
            ],
            "edges": [
                {"label": "encodes", "from": 1, "to": 2}
            ],
            "indexes": [
                {"target": "node", "label": "Gene", "property": "symbol", "unique": true}
            ]
        }"#,
    )
    .unwrap();

    let graph = propgraph_migrate::source::json::load(file.path()).unwrap();
    assert_eq!(graph.node_count().unwrap(), 2);

    let mut orchestrator = Orchestrator::new(graph, MemoryStore::new());
    let result = orchestrator.run().unwrap();

    assert_eq!(result.nodes_created, 2);
    assert_eq!(result.edges_created, 1);
    assert_eq!(result.indices_created, 1);
}

#[test]
fn migration_result_serializes_to_json() {
    let graph = gene_protein_graph();
    let mut orchestrator = Orchestrator::new(graph, MemoryStore::new());
    let result = orchestrator.run().unwrap();

    let json = result.to_json().unwrap();
    assert!(json.contains("\"nodes_created\": 5"));
    assert!(json.contains(&result.run_id));
}
