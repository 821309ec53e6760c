// SPDX-License-Identifier: MIT

//! Run configuration loader - YAML file loading and snapshot import

use super::types::RunConfig;
use crate::error::RuleError;
use crate::snapshot::InMemoryDocumentStore;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Loads run configurations from YAML files
pub struct ConfigLoader;

impl ConfigLoader {
    pub fn new() -> Self {
        Self
    }

    /// Load a run configuration from a YAML file.
    ///
    /// Relative snapshot file paths are resolved against the configuration
    /// file's directory.
    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<RunConfig, RuleError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let mut config = Self::parse_yaml(&content)?;

        if let Some(base) = path.parent() {
            for source in &mut config.snapshots {
                if source.file.is_relative() {
                    source.file = base.join(&source.file);
                }
            }
        }
        Ok(config)
    }

    /// Parse and validate a run configuration from a YAML string
    pub fn parse_yaml(content: &str) -> Result<RunConfig, RuleError> {
        let config: RunConfig = serde_yaml::from_str(content)?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Ensure the configuration has something to run
    pub fn require_testcases(config: &RunConfig) -> Result<(), RuleError> {
        if config.testcases.is_empty() {
            return Err(RuleError::config("run configuration has no test cases"));
        }
        Ok(())
    }

    fn validate(config: &RunConfig) -> Result<(), RuleError> {
        let mut seen = HashSet::new();
        for case in &config.testcases {
            if case.rule.is_empty() {
                return Err(RuleError::config(format!(
                    "test case '{}' has an empty rule",
                    case.id
                )));
            }
            if !seen.insert(case.id.as_str()) {
                log::warn!("Duplicate test case id: {}", case.id);
            }
        }
        Ok(())
    }

    /// Build a local document store from the configuration's snapshot files
    pub async fn load_snapshots(config: &RunConfig) -> Result<InMemoryDocumentStore, RuleError> {
        let store = InMemoryDocumentStore::new();
        for source in &config.snapshots {
            let collection = source
                .collection
                .as_deref()
                .unwrap_or(&config.default_collection);
            store
                .load_file(&config.dbname, collection, &source.file)
                .await?;
        }
        Ok(store)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
