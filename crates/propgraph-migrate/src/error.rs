//! Error types for the migration library.

use thiserror::Error;

/// Main error type for migration operations.
#[derive(Error, Debug)]
pub enum MigrateError {
    /// Configuration error (invalid YAML, missing fields, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Source graph unreadable or failed mid-iteration
    #[error("Source graph error: {0}")]
    Source(String),

    /// Type declaration rejected because the name already exists
    #[error("Type '{0}' already exists in the target schema")]
    DuplicateType(String),

    /// Operation referenced a type that was never declared
    #[error("Unknown type '{0}'")]
    UnknownType(String),

    /// Schema declaration rejected for a reason other than a duplicate name
    #[error("Schema error on type '{type_name}': {message}")]
    Schema { type_name: String, message: String },

    /// A single property write was rejected (caught and dropped by the migrators)
    #[error("Property '{key}' rejected: {message}")]
    PropertyRejected { key: String, message: String },

    /// Edge endpoint did not resolve to a migrated node
    #[error("Edge '{label}' references unmigrated node {node_id}")]
    UnresolvedEndpoint { label: String, node_id: i64 },

    /// Record handle did not resolve to a live record
    #[error("Record handle #{0} does not resolve to a live record")]
    InvalidHandle(u64),

    /// Index declaration rejected because an index already exists
    #[error("Index on '{type_name}.{property}' already exists")]
    DuplicateIndex { type_name: String, property: String },

    /// Index declaration rejected for a reason other than a duplicate
    #[error("Index error on '{type_name}.{property}': {message}")]
    Index {
        type_name: String,
        property: String,
        message: String,
    },

    /// IO error (file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl MigrateError {
    /// Create a Schema error
    pub fn schema(type_name: impl Into<String>, message: impl Into<String>) -> Self {
        MigrateError::Schema {
            type_name: type_name.into(),
            message: message.into(),
        }
    }

    /// Create a PropertyRejected error
    pub fn property(key: impl Into<String>, message: impl Into<String>) -> Self {
        MigrateError::PropertyRejected {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Create an Index error
    pub fn index(
        type_name: impl Into<String>,
        property: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        MigrateError::Index {
            type_name: type_name.into(),
            property: property.into(),
            message: message.into(),
        }
    }

    /// Process exit code for this error, used by the CLI.
    pub fn exit_code(&self) -> u8 {
        match self {
            MigrateError::Config(_) | MigrateError::Yaml(_) => 2,
            MigrateError::Source(_) => 3,
            _ => 1,
        }
    }

    /// Format error with full details including error chain
    pub fn format_detailed(&self) -> String {
        let mut output = format!("Error: {}\n", self);

        let mut source = std::error::Error::source(self);
        let mut depth = 1;
        while let Some(err) = source {
            output.push_str(&format!("\nCaused by:\n  {}: {}", depth, err));
            source = err.source();
            depth += 1;
        }

        output
    }
}

/// Result type alias for migration operations.
pub type Result<T> = std::result::Result<T, MigrateError>;
