//! In-memory source graph with on-the-fly type inference.

use std::collections::{BTreeMap, BTreeSet};

use crate::core::graph::{IndexSpec, SourceEdge, SourceNode};
use crate::core::traits::GraphSource;
use crate::core::value::{Value, ValueType};
use crate::error::Result;

/// A dynamically-typed property graph held in memory.
///
/// Node identifiers are assigned sequentially and are unique across the
/// graph regardless of label. Labels are listed in sorted order; nodes and
/// edges stream in insertion order.
#[derive(Debug, Default)]
pub struct MemoryGraph {
    nodes: Vec<SourceNode>,
    edges: Vec<SourceEdge>,
    indexes: Vec<IndexSpec>,
    next_id: i64,
}

impl MemoryGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node, returning its assigned identifier.
    pub fn add_node(
        &mut self,
        label: impl Into<String>,
        properties: BTreeMap<String, Value>,
    ) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        self.nodes.push(SourceNode::new(id, label, properties));
        id
    }

    /// Add a node with an explicit identifier (used by file loaders).
    pub fn add_node_with_id(
        &mut self,
        id: i64,
        label: impl Into<String>,
        properties: BTreeMap<String, Value>,
    ) {
        self.next_id = self.next_id.max(id + 1);
        self.nodes.push(SourceNode::new(id, label, properties));
    }

    /// Add a directed edge between two node identifiers.
    pub fn add_edge(
        &mut self,
        label: impl Into<String>,
        from_id: i64,
        to_id: i64,
        properties: BTreeMap<String, Value>,
    ) {
        self.edges
            .push(SourceEdge::new(label, from_id, to_id, properties));
    }

    /// Declare a secondary index.
    pub fn add_index(&mut self, spec: IndexSpec) {
        self.indexes.push(spec);
    }

    /// Total number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    fn infer_types<'a, I>(values: I) -> BTreeMap<String, ValueType>
    where
        I: Iterator<Item = &'a BTreeMap<String, Value>>,
    {
        let mut types: BTreeMap<String, ValueType> = BTreeMap::new();
        for properties in values {
            for (key, value) in properties {
                let Some(observed) = ValueType::of(value) else {
                    continue;
                };
                types
                    .entry(key.clone())
                    .and_modify(|t| *t = t.merge(observed))
                    .or_insert(observed);
            }
        }
        types
    }
}

impl GraphSource for MemoryGraph {
    fn node_labels(&self) -> Result<Vec<String>> {
        let labels: BTreeSet<&str> = self.nodes.iter().map(|n| n.label.as_str()).collect();
        Ok(labels.into_iter().map(String::from).collect())
    }

    fn edge_labels(&self) -> Result<Vec<String>> {
        let labels: BTreeSet<&str> = self.edges.iter().map(|e| e.label.as_str()).collect();
        Ok(labels.into_iter().map(String::from).collect())
    }

    fn node_property_types(&self, label: &str) -> Result<BTreeMap<String, ValueType>> {
        Ok(Self::infer_types(
            self.nodes
                .iter()
                .filter(|n| n.label == label)
                .map(|n| &n.properties),
        ))
    }

    fn edge_property_types(&self, label: &str) -> Result<BTreeMap<String, ValueType>> {
        Ok(Self::infer_types(
            self.edges
                .iter()
                .filter(|e| e.label == label)
                .map(|e| &e.properties),
        ))
    }

    fn nodes<'a>(
        &'a self,
        label: &str,
    ) -> Result<Box<dyn Iterator<Item = Result<SourceNode>> + 'a>> {
        let label = label.to_string();
        Ok(Box::new(
            self.nodes
                .iter()
                .filter(move |n| n.label == label)
                .cloned()
                .map(Ok),
        ))
    }

    fn edges<'a>(
        &'a self,
        label: &str,
    ) -> Result<Box<dyn Iterator<Item = Result<SourceEdge>> + 'a>> {
        let label = label.to_string();
        Ok(Box::new(
            self.edges
                .iter()
                .filter(move |e| e.label == label)
                .cloned()
                .map(Ok),
        ))
    }

    fn index_specs(&self) -> Result<Vec<IndexSpec>> {
        Ok(self.indexes.clone())
    }

    fn node_count(&self) -> Result<usize> {
        Ok(self.nodes.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::value::ValueKind;

    fn props(entries: &[(&str, Value)]) -> BTreeMap<String, Value> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_labels_are_sorted_and_distinct() {
        let mut graph = MemoryGraph::new();
        graph.add_node("Protein", BTreeMap::new());
        graph.add_node("Gene", BTreeMap::new());
        graph.add_node("Gene", BTreeMap::new());

        assert_eq!(graph.node_labels().unwrap(), vec!["Gene", "Protein"]);
    }

    #[test]
    fn test_node_ids_are_unique_across_labels() {
        let mut graph = MemoryGraph::new();
        let a = graph.add_node("Gene", BTreeMap::new());
        let b = graph.add_node("Protein", BTreeMap::new());
        assert_ne!(a, b);
    }

    #[test]
    fn test_nodes_stream_in_insertion_order() {
        let mut graph = MemoryGraph::new();
        let first = graph.add_node("Gene", props(&[("n", Value::Integer(1))]));
        graph.add_node("Protein", BTreeMap::new());
        let second = graph.add_node("Gene", props(&[("n", Value::Integer(2))]));

        let ids: Vec<i64> = graph
            .nodes("Gene")
            .unwrap()
            .map(|n| n.unwrap().id)
            .collect();
        assert_eq!(ids, vec![first, second]);
    }

    #[test]
    fn test_type_inference_per_label() {
        let mut graph = MemoryGraph::new();
        graph.add_node(
            "Gene",
            props(&[
                ("symbol", Value::String("TP53".into())),
                ("synonyms", Value::List(vec![Value::String("p53".into())])),
            ]),
        );
        graph.add_node("Gene", props(&[("taxon", Value::Integer(9606))]));
        // Same key on a different label must not interfere.
        graph.add_node("Protein", props(&[("symbol", Value::Integer(1))]));

        let types = graph.node_property_types("Gene").unwrap();
        assert_eq!(
            types.get("symbol"),
            Some(&ValueType::Scalar(ValueKind::String))
        );
        assert_eq!(
            types.get("synonyms"),
            Some(&ValueType::List(Some(ValueKind::String)))
        );
        assert_eq!(
            types.get("taxon"),
            Some(&ValueType::Scalar(ValueKind::Integer))
        );

        let protein_types = graph.node_property_types("Protein").unwrap();
        assert_eq!(
            protein_types.get("symbol"),
            Some(&ValueType::Scalar(ValueKind::Integer))
        );
    }

    #[test]
    fn test_null_only_properties_have_no_descriptor() {
        let mut graph = MemoryGraph::new();
        graph.add_node("Gene", props(&[("alias", Value::Null)]));
        let types = graph.node_property_types("Gene").unwrap();
        assert!(!types.contains_key("alias"));
    }

    #[test]
    fn test_explicit_ids_advance_the_sequence() {
        let mut graph = MemoryGraph::new();
        graph.add_node_with_id(10, "Gene", BTreeMap::new());
        let next = graph.add_node("Gene", BTreeMap::new());
        assert_eq!(next, 11);
    }
}
