//! Configuration loading and validation.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{MigrateError, Result};

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Source graph configuration.
    pub source: SourceConfig,

    /// Target database configuration.
    #[serde(default)]
    pub target: TargetConfig,

    /// Migration behavior configuration.
    #[serde(default)]
    pub migration: MigrationConfig,
}

/// Source graph configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Path to the source graph file.
    pub graph: PathBuf,
}

/// Target database configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetConfig {
    /// Directory holding the target database snapshot and checksum artifact.
    #[serde(default = "default_database_dir")]
    pub database: PathBuf,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            database: default_database_dir(),
        }
    }
}

/// Migration behavior configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MigrationConfig {
    /// Whether to build the declared secondary indices.
    #[serde(default = "default_true")]
    pub create_indexes: bool,
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            create_indexes: true,
        }
    }
}

fn default_database_dir() -> PathBuf {
    PathBuf::from("graphdb")
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.source.graph.as_os_str().is_empty() {
            return Err(MigrateError::Config(
                "source.graph must not be empty".into(),
            ));
        }
        if self.target.database.as_os_str().is_empty() {
            return Err(MigrateError::Config(
                "target.database must not be empty".into(),
            ));
        }
        Ok(())
    }
}
