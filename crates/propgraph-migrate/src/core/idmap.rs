//! Run-scoped translation table from source node identifiers to target
//! record handles.
//!
//! Built incrementally during the node pass, read-only during the edge pass,
//! and discarded at the end of the run. For very large graphs this table is
//! the dominant memory cost of the migration.

use std::collections::HashMap;

use super::graph::RecordHandle;

/// Maps source node identifiers to target engine record handles.
#[derive(Debug, Default)]
pub struct IdentifierMap {
    entries: HashMap<i64, RecordHandle>,
}

impl IdentifierMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a map pre-sized for the expected node count.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity),
        }
    }

    /// Record the handle assigned to a source node.
    ///
    /// Returns the previous handle if the source identifier was already
    /// mapped, which indicates a violated uniqueness invariant upstream.
    pub fn insert(&mut self, source_id: i64, handle: RecordHandle) -> Option<RecordHandle> {
        self.entries.insert(source_id, handle)
    }

    /// Resolve a source node identifier to its target record handle.
    pub fn resolve(&self, source_id: i64) -> Option<RecordHandle> {
        self.entries.get(&source_id).copied()
    }

    /// Check if a source identifier is mapped.
    pub fn contains(&self, source_id: i64) -> bool {
        self.entries.contains_key(&source_id)
    }

    /// Number of mapped identifiers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the map is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
