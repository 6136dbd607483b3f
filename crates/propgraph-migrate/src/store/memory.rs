//! Embedded in-memory typed graph store.
//!
//! Enforces the contract of the real target engine at the API boundary:
//! schema must be declared before data, property writes are type-checked
//! against the declarations, and duplicate type or index declarations are
//! rejected. A store can be persisted as a JSON snapshot.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::core::graph::{EntityKind, RecordHandle};
use crate::core::traits::GraphStore;
use crate::core::value::TargetValue;
use crate::error::{MigrateError, Result};
use crate::typemap::TargetType;

/// A declared vertex or edge type with its typed properties.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeDef {
    pub name: String,
    pub kind: EntityKind,
    pub properties: BTreeMap<String, TargetType>,
}

/// A persisted record. Edges carry their endpoint handles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    pub type_name: String,
    pub kind: EntityKind,
    pub properties: BTreeMap<String, TargetValue>,
    pub from: Option<RecordHandle>,
    pub to: Option<RecordHandle>,
}

/// A declared secondary index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexDef {
    pub type_name: String,
    pub property: String,
    pub unique: bool,
}

/// In-memory typed graph store.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct MemoryStore {
    types: BTreeMap<String, TypeDef>,
    records: BTreeMap<u64, Record>,
    indexes: Vec<IndexDef>,
    next_record: u64,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a declared type.
    pub fn type_def(&self, name: &str) -> Option<&TypeDef> {
        self.types.get(name)
    }

    /// Declared type names of the given kind, in sorted order.
    pub fn type_names(&self, kind: EntityKind) -> Vec<&str> {
        self.types
            .values()
            .filter(|t| t.kind == kind)
            .map(|t| t.name.as_str())
            .collect()
    }

    /// Look up a live record.
    pub fn record(&self, handle: RecordHandle) -> Option<&Record> {
        self.records.get(&handle.0)
    }

    /// All records of one type, with their handles.
    pub fn records_of_type<'a>(
        &'a self,
        type_name: &'a str,
    ) -> impl Iterator<Item = (RecordHandle, &'a Record)> + 'a {
        self.records
            .iter()
            .filter(move |(_, r)| r.type_name == type_name)
            .map(|(id, r)| (RecordHandle(*id), r))
    }

    /// Number of vertex records.
    pub fn vertex_count(&self) -> usize {
        self.records
            .values()
            .filter(|r| r.kind == EntityKind::Node)
            .count()
    }

    /// Number of edge records.
    pub fn edge_count(&self) -> usize {
        self.records
            .values()
            .filter(|r| r.kind == EntityKind::Edge)
            .count()
    }

    /// Declared indices.
    pub fn indexes(&self) -> &[IndexDef] {
        &self.indexes
    }

    /// Check if an index exists on (type, property).
    pub fn has_index(&self, type_name: &str, property: &str) -> bool {
        self.indexes
            .iter()
            .any(|i| i.type_name == type_name && i.property == property)
    }

    /// Write the store as a JSON snapshot.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load a store from a JSON snapshot.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn create_type(&mut self, name: &str, kind: EntityKind) -> Result<()> {
        if name.is_empty() {
            return Err(MigrateError::schema(name, "type name must not be empty"));
        }
        if self.types.contains_key(name) {
            return Err(MigrateError::DuplicateType(name.to_string()));
        }
        self.types.insert(
            name.to_string(),
            TypeDef {
                name: name.to_string(),
                kind,
                properties: BTreeMap::new(),
            },
        );
        Ok(())
    }

    fn insert_record(&mut self, record: Record) -> RecordHandle {
        let handle = RecordHandle(self.next_record);
        self.next_record += 1;
        self.records.insert(handle.0, record);
        handle
    }

    fn live_vertex(&self, handle: RecordHandle) -> Result<()> {
        match self.records.get(&handle.0) {
            Some(r) if r.kind == EntityKind::Node => Ok(()),
            _ => Err(MigrateError::InvalidHandle(handle.0)),
        }
    }
}

impl GraphStore for MemoryStore {
    fn create_vertex_type(&mut self, name: &str) -> Result<()> {
        self.create_type(name, EntityKind::Node)
    }

    fn create_edge_type(&mut self, name: &str) -> Result<()> {
        self.create_type(name, EntityKind::Edge)
    }

    fn declare_property(&mut self, type_name: &str, key: &str, ty: TargetType) -> Result<()> {
        let def = self
            .types
            .get_mut(type_name)
            .ok_or_else(|| MigrateError::UnknownType(type_name.to_string()))?;
        if def.properties.contains_key(key) {
            return Err(MigrateError::schema(
                type_name,
                format!("property '{}' is already declared", key),
            ));
        }
        def.properties.insert(key.to_string(), ty);
        Ok(())
    }

    fn insert_vertex(&mut self, type_name: &str) -> Result<RecordHandle> {
        match self.types.get(type_name) {
            Some(def) if def.kind == EntityKind::Node => Ok(self.insert_record(Record {
                type_name: type_name.to_string(),
                kind: EntityKind::Node,
                properties: BTreeMap::new(),
                from: None,
                to: None,
            })),
            Some(_) => Err(MigrateError::schema(
                type_name,
                "not a vertex type",
            )),
            None => Err(MigrateError::UnknownType(type_name.to_string())),
        }
    }

    fn insert_edge(
        &mut self,
        type_name: &str,
        from: RecordHandle,
        to: RecordHandle,
    ) -> Result<RecordHandle> {
        match self.types.get(type_name) {
            Some(def) if def.kind == EntityKind::Edge => {}
            Some(_) => return Err(MigrateError::schema(type_name, "not an edge type")),
            None => return Err(MigrateError::UnknownType(type_name.to_string())),
        }
        self.live_vertex(from)?;
        self.live_vertex(to)?;
        Ok(self.insert_record(Record {
            type_name: type_name.to_string(),
            kind: EntityKind::Edge,
            properties: BTreeMap::new(),
            from: Some(from),
            to: Some(to),
        }))
    }

    fn set_property(&mut self, handle: RecordHandle, key: &str, value: TargetValue) -> Result<()> {
        let type_name = self
            .records
            .get(&handle.0)
            .map(|r| r.type_name.clone())
            .ok_or(MigrateError::InvalidHandle(handle.0))?;
        let def = self
            .types
            .get(&type_name)
            .ok_or_else(|| MigrateError::UnknownType(type_name.clone()))?;
        let declared = def.properties.get(key).ok_or_else(|| {
            MigrateError::property(key, format!("not declared on type '{}'", type_name))
        })?;
        if !declared.accepts(&value) {
            return Err(MigrateError::property(
                key,
                format!("value does not conform to declared type {}", declared),
            ));
        }
        let record = self
            .records
            .get_mut(&handle.0)
            .ok_or(MigrateError::InvalidHandle(handle.0))?;
        record.properties.insert(key.to_string(), value);
        Ok(())
    }

    fn resolve(&self, handle: RecordHandle) -> Result<String> {
        self.records
            .get(&handle.0)
            .map(|r| r.type_name.clone())
            .ok_or(MigrateError::InvalidHandle(handle.0))
    }

    fn create_index(&mut self, type_name: &str, property: &str, unique: bool) -> Result<()> {
        let def = self
            .types
            .get(type_name)
            .ok_or_else(|| MigrateError::UnknownType(type_name.to_string()))?;
        if !def.properties.contains_key(property) {
            return Err(MigrateError::index(
                type_name,
                property,
                "property is not declared on the type",
            ));
        }
        if self.has_index(type_name, property) {
            return Err(MigrateError::DuplicateIndex {
                type_name: type_name.to_string(),
                property: property.to_string(),
            });
        }
        self.indexes.push(IndexDef {
            type_name: type_name.to_string(),
            property: property.to_string(),
            unique,
        });
        Ok(())
    }
}
