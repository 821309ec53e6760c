// SPDX-License-Identifier: MIT

//! YAML schema types for rule run configurations

use crate::snapshot::{RuleContext, DEFAULT_COLLECTION, DEFAULT_DB_NAME};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Top-level run configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RunConfig {
    /// Database holding the snapshot collections
    #[serde(default = "default_db_name")]
    pub dbname: String,
    /// Collection used for snapshots without an override
    #[serde(default = "default_collection")]
    pub default_collection: String,
    /// Per-snapshot collection overrides (snapshot id -> collection)
    #[serde(default)]
    pub collections: HashMap<String, String>,
    /// Snapshot document files to load into the local store
    #[serde(default)]
    pub snapshots: Vec<SnapshotSource>,
    /// Rules to evaluate
    #[serde(default)]
    pub testcases: Vec<TestCase>,
}

/// A JSON file of snapshot documents
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct SnapshotSource {
    /// Path to the file, relative to the configuration file
    pub file: PathBuf,
    /// Target collection; the default collection when omitted
    pub collection: Option<String>,
}

/// One rule to evaluate
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TestCase {
    pub id: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Pre-lexed rule tokens
    pub rule: Vec<String>,
}

fn default_db_name() -> String {
    DEFAULT_DB_NAME.to_string()
}

fn default_collection() -> String {
    DEFAULT_COLLECTION.to_string()
}

impl RunConfig {
    /// Evaluation context shared by every test case of this run
    pub fn context(&self) -> RuleContext {
        RuleContext {
            db_name: self.dbname.clone(),
            default_collection: self.default_collection.clone(),
            collection_overrides: self.collections.clone(),
        }
    }
}
