// SPDX-License-Identifier: MIT

//! Snapshot documents and lineage records

use serde::{Deserialize, Serialize};

/// A captured, timestamped copy of one cloud resource's configuration
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotDocument {
    pub snapshot_id: String,
    /// The captured resource configuration
    #[serde(default)]
    pub json: serde_json::Value,
    /// Capture time in milliseconds since the epoch
    #[serde(default)]
    pub timestamp: i64,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub structure: String,
    #[serde(default)]
    pub reference: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub collection: String,
}

/// Provenance of one snapshot document that fed a rule verdict
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct LineageRecord {
    pub id: String,
    pub path: String,
    pub structure: String,
    pub reference: String,
    pub source: String,
}

impl From<&SnapshotDocument> for LineageRecord {
    fn from(doc: &SnapshotDocument) -> Self {
        Self {
            id: doc.snapshot_id.clone(),
            path: doc.path.clone(),
            structure: doc.structure.clone(),
            reference: doc.reference.clone(),
            source: doc.source.clone(),
        }
    }
}
