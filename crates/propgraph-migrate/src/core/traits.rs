//! Core traits at the seams of the migration engine:
//!
//! - [`GraphSource`]: the dynamically-typed source graph collaborator
//! - [`GraphStore`]: the strongly-typed target engine collaborator
//!
//! The engine itself only talks through these traits; the source's on-disk
//! format and the target's server/page machinery stay behind them.

use std::collections::BTreeMap;

use crate::error::Result;

use super::graph::{IndexSpec, RecordHandle, SourceEdge, SourceNode};
use super::value::{TargetValue, ValueType};
use crate::typemap::TargetType;

/// Streamed, per-label access to a dynamically-typed property graph.
///
/// Label listings must be in a stable order so that repeated passes observe
/// the same sequence. Node and edge iteration is single-pass; restarting
/// means re-opening the source from scratch.
pub trait GraphSource {
    /// Distinct node labels, in stable order.
    fn node_labels(&self) -> Result<Vec<String>>;

    /// Distinct edge labels, in stable order.
    fn edge_labels(&self) -> Result<Vec<String>>;

    /// Observed property type descriptors for all nodes carrying a label.
    fn node_property_types(&self, label: &str) -> Result<BTreeMap<String, ValueType>>;

    /// Observed property type descriptors for all edges carrying a label.
    fn edge_property_types(&self, label: &str) -> Result<BTreeMap<String, ValueType>>;

    /// Stream the nodes carrying a label, in source order.
    fn nodes<'a>(&'a self, label: &str)
        -> Result<Box<dyn Iterator<Item = Result<SourceNode>> + 'a>>;

    /// Stream the edges carrying a label, in source order.
    fn edges<'a>(&'a self, label: &str)
        -> Result<Box<dyn Iterator<Item = Result<SourceEdge>> + 'a>>;

    /// Secondary indices declared by the source graph.
    fn index_specs(&self) -> Result<Vec<IndexSpec>>;

    /// Total node count, used to pre-size the identifier map.
    fn node_count(&self) -> Result<usize>;
}

/// Schema, insert, and index API of the strongly-typed target engine.
///
/// Types must be declared before records, and properties before values:
/// the engine rejects writes against undeclared keys. Duplicate type and
/// index declarations are rejected as errors.
pub trait GraphStore {
    /// Declare a named vertex type. Duplicate names are an error.
    fn create_vertex_type(&mut self, name: &str) -> Result<()>;

    /// Declare a named edge type. Duplicate names are an error.
    fn create_edge_type(&mut self, name: &str) -> Result<()>;

    /// Declare a typed property on an existing type.
    fn declare_property(&mut self, type_name: &str, key: &str, ty: TargetType) -> Result<()>;

    /// Insert a new vertex record of the given type, returning its handle.
    fn insert_vertex(&mut self, type_name: &str) -> Result<RecordHandle>;

    /// Insert a new edge record between two live vertex records.
    fn insert_edge(
        &mut self,
        type_name: &str,
        from: RecordHandle,
        to: RecordHandle,
    ) -> Result<RecordHandle>;

    /// Set one property on a live record. Rejected writes leave the record
    /// otherwise intact.
    fn set_property(&mut self, handle: RecordHandle, key: &str, value: TargetValue) -> Result<()>;

    /// Resolve a handle back to the type name of a live record.
    fn resolve(&self, handle: RecordHandle) -> Result<String>;

    /// Declare a secondary index on (type, property). Duplicates are an error.
    fn create_index(&mut self, type_name: &str, property: &str, unique: bool) -> Result<()>;
}
