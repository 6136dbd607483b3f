//! Core data model: dynamic values, source entities, identifier mapping,
//! and the collaborator traits.

pub mod graph;
pub mod idmap;
pub mod traits;
pub mod value;

pub use graph::{
    EntityKind, IndexSpec, RecordHandle, SourceEdge, SourceNode, EDGE_IGNORED_FIELDS,
    NODE_IGNORED_FIELDS,
};
pub use idmap::IdentifierMap;
pub use traits::{GraphSource, GraphStore};
pub use value::{TargetValue, TypedArray, Value, ValueKind, ValueType};
