//! # propgraph-migrate
//!
//! Migrates a dynamically-typed property graph into a strongly-typed graph
//! storage engine that requires upfront schema declaration.
//!
//! The engine infers one schema type per source label, maps dynamic values
//! into the target's typed property model, preserves referential integrity
//! across the identifier-space translation, and builds secondary indices
//! best-effort. Every run is a full rebuild:
//!
//! - **Type mapping** from inferred per-label descriptors to typed properties
//! - **Collection normalization** of heterogeneous lists into typed arrays
//! - **Identifier mapping** from source node ids to target record handles
//! - **Tolerant property writes**: a rejected value is dropped and reported,
//!   never fatal for its record
//!
//! ## Example
//!
//! ```rust
//! use propgraph_migrate::{MemoryGraph, MemoryStore, Orchestrator};
//! use propgraph_migrate::core::Value;
//! use std::collections::BTreeMap;
//!
//! let mut graph = MemoryGraph::new();
//! let mut properties = BTreeMap::new();
//! properties.insert("symbol".to_string(), Value::String("TP53".into()));
//! graph.add_node("Gene", properties);
//!
//! let mut orchestrator = Orchestrator::new(graph, MemoryStore::new());
//! let result = orchestrator.run().unwrap();
//! assert_eq!(result.nodes_created, 1);
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod index;
pub mod normalize;
pub mod orchestrator;
pub mod schema;
pub mod source;
pub mod state;
pub mod store;
pub mod transfer;
pub mod typemap;

// Re-exports for convenient access
pub use config::{Config, MigrationConfig, SourceConfig, TargetConfig};
pub use error::{MigrateError, Result};
pub use orchestrator::{MigrationResult, Orchestrator, Phase};
pub use source::MemoryGraph;
pub use store::MemoryStore;
pub use transfer::{SkippedProperty, TransferReport};
