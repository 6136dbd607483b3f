//! Schema building: one target type per source label, with typed properties
//! derived from the inferred descriptors.
//!
//! Type declaration failures are fatal; a descriptor without a type mapping
//! is silently skipped and the property never appears on the target schema.

use tracing::{debug, info};

use crate::core::graph::{EDGE_IGNORED_FIELDS, NODE_IGNORED_FIELDS};
use crate::core::traits::{GraphSource, GraphStore};
use crate::error::Result;
use crate::typemap::map_value_type;

/// Declare one vertex type per node label. Returns the number of types created.
pub fn declare_vertex_types(source: &dyn GraphSource, store: &mut dyn GraphStore) -> Result<usize> {
    let labels = source.node_labels()?;
    for (i, label) in labels.iter().enumerate() {
        info!(
            "Declaring vertex type '{}' ({}/{})...",
            label,
            i + 1,
            labels.len()
        );
        store.create_vertex_type(label)?;
        let descriptors = source.node_property_types(label)?;
        declare_properties(store, label, descriptors, NODE_IGNORED_FIELDS)?;
    }
    Ok(labels.len())
}

/// Declare one edge type per edge label. Returns the number of types created.
pub fn declare_edge_types(source: &dyn GraphSource, store: &mut dyn GraphStore) -> Result<usize> {
    let labels = source.edge_labels()?;
    for (i, label) in labels.iter().enumerate() {
        info!(
            "Declaring edge type '{}' ({}/{})...",
            label,
            i + 1,
            labels.len()
        );
        store.create_edge_type(label)?;
        let descriptors = source.edge_property_types(label)?;
        declare_properties(store, label, descriptors, EDGE_IGNORED_FIELDS)?;
    }
    Ok(labels.len())
}

fn declare_properties(
    store: &mut dyn GraphStore,
    label: &str,
    descriptors: std::collections::BTreeMap<String, crate::core::value::ValueType>,
    ignored: &[&str],
) -> Result<()> {
    for (key, descriptor) in descriptors {
        if ignored.contains(&key.as_str()) {
            continue;
        }
        match map_value_type(descriptor) {
            Some(target_type) => {
                debug!("  property '{}' -> {}", key, target_type);
                store.declare_property(label, &key, target_type)?;
            }
            None => {
                debug!(
                    "  property '{}' on '{}' has no type mapping, skipping",
                    key, label
                );
            }
        }
    }
    Ok(())
}
