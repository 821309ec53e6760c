// SPDX-License-Identifier: MIT

//! Resolution of snapshot ids to their latest captured document

use super::document::{LineageRecord, SnapshotDocument};
use super::store::{DocumentQuery, DocumentStore, SortSpec};
use crate::error::StoreError;
use crate::rules::interpreter::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Collection holding snapshot documents unless overridden per snapshot
pub const DEFAULT_COLLECTION: &str = "resources";

/// Database name used when none is configured
pub const DEFAULT_DB_NAME: &str = "validator";

/// Where snapshot documents of one rule evaluation are looked up
#[derive(Debug, Clone, PartialEq)]
pub struct RuleContext {
    pub db_name: String,
    pub default_collection: String,
    /// snapshot id -> collection name
    pub collection_overrides: HashMap<String, String>,
}

impl RuleContext {
    pub fn new(db_name: impl Into<String>) -> Self {
        Self {
            db_name: db_name.into(),
            ..Self::default()
        }
    }

    pub fn with_default_collection(mut self, collection: impl Into<String>) -> Self {
        self.default_collection = collection.into();
        self
    }

    pub fn with_override(mut self, snapshot_id: impl Into<String>, collection: impl Into<String>) -> Self {
        self.collection_overrides
            .insert(snapshot_id.into(), collection.into());
        self
    }

    pub fn collection_for(&self, snapshot_id: &str) -> &str {
        self.collection_overrides
            .get(snapshot_id)
            .map_or(self.default_collection.as_str(), String::as_str)
    }
}

impl Default for RuleContext {
    fn default() -> Self {
        Self {
            db_name: DEFAULT_DB_NAME.to_string(),
            default_collection: DEFAULT_COLLECTION.to_string(),
            collection_overrides: HashMap::new(),
        }
    }
}

/// Fetches snapshot payloads and records which documents were used.
///
/// The lineage only ever grows: resolving the same id twice records it twice.
pub struct SnapshotResolver {
    store: Arc<dyn DocumentStore>,
    context: RuleContext,
    lineage: Vec<LineageRecord>,
}

impl SnapshotResolver {
    pub fn new(store: Arc<dyn DocumentStore>, context: RuleContext) -> Self {
        Self {
            store,
            context,
            lineage: Vec::new(),
        }
    }

    pub fn lineage(&self) -> &[LineageRecord] {
        &self.lineage
    }

    pub fn into_lineage(self) -> Vec<LineageRecord> {
        self.lineage
    }

    /// Return the payload of the most recent document for `snapshot_id`, or
    /// `None` when the store has no such document.
    pub async fn resolve(&mut self, snapshot_id: &str) -> Result<Option<Value>, StoreError> {
        let collection = self.context.collection_for(snapshot_id);
        let query = DocumentQuery::new().field_equals("snapshotId", snapshot_id);
        let sort = SortSpec::descending("timestamp");

        let docs = self
            .store
            .get_documents(collection, &query, &self.context.db_name, Some(&sort), 1)
            .await?;
        log::debug!(
            "Snapshot {}: {} documents in {}/{}",
            snapshot_id,
            docs.len(),
            self.context.db_name,
            collection
        );

        let Some(doc) = docs.into_iter().next() else {
            return Ok(None);
        };
        Ok(Some(self.record(doc)))
    }

    fn record(&mut self, doc: SnapshotDocument) -> Value {
        self.lineage.push(LineageRecord::from(&doc));
        Value::from(doc.json)
    }
}

impl std::fmt::Debug for SnapshotResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnapshotResolver")
            .field("context", &self.context)
            .field("lineage", &self.lineage)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::InMemoryDocumentStore;
    use serde_json::json;

    async fn store_with(docs: Vec<(&str, serde_json::Value)>) -> Arc<InMemoryDocumentStore> {
        let store = InMemoryDocumentStore::new();
        for (collection, doc) in docs {
            store.insert(DEFAULT_DB_NAME, collection, doc).await;
        }
        Arc::new(store)
    }

    #[test]
    fn test_collection_for() {
        let ctx = RuleContext::default().with_override("2", "microsoftcompute");
        assert_eq!(ctx.collection_for("1"), "resources");
        assert_eq!(ctx.collection_for("2"), "microsoftcompute");

        let ctx = RuleContext::new("db").with_default_collection("snapshots");
        assert_eq!(ctx.collection_for("1"), "snapshots");
        assert_eq!(ctx.db_name, "db");
    }

    #[tokio::test]
    async fn test_resolve_records_lineage() {
        let store = store_with(vec![(
            "resources",
            json!({"snapshotId": "1", "timestamp": 1, "json": {"a": 1}, "path": "/p", "source": "s"}),
        )])
        .await;
        let mut resolver = SnapshotResolver::new(store, RuleContext::default());

        let value = resolver.resolve("1").await.unwrap();
        assert_eq!(value, Some(Value::from(json!({"a": 1}))));
        assert_eq!(resolver.lineage().len(), 1);
        assert_eq!(resolver.lineage()[0].id, "1");
        assert_eq!(resolver.lineage()[0].path, "/p");

        resolver.resolve("1").await.unwrap();
        assert_eq!(resolver.lineage().len(), 2);
    }

    #[tokio::test]
    async fn test_resolve_missing_adds_no_lineage() {
        let store = store_with(vec![]).await;
        let mut resolver = SnapshotResolver::new(store, RuleContext::default());

        assert_eq!(resolver.resolve("9").await.unwrap(), None);
        assert!(resolver.lineage().is_empty());
    }

    #[tokio::test]
    async fn test_resolve_uses_override_collection() {
        let store = store_with(vec![
            ("resources", json!({"snapshotId": "1", "json": {"where": "default"}})),
            ("compute", json!({"snapshotId": "1", "json": {"where": "override"}})),
        ])
        .await;
        let ctx = RuleContext::default().with_override("1", "compute");
        let mut resolver = SnapshotResolver::new(store, ctx);

        let value = resolver.resolve("1").await.unwrap().unwrap();
        assert_eq!(value.get("where"), Some(&Value::from("override")));
    }

    #[tokio::test]
    async fn test_resolve_picks_latest() {
        let store = store_with(vec![
            ("resources", json!({"snapshotId": "1", "timestamp": 10, "json": {"v": "old"}})),
            ("resources", json!({"snapshotId": "1", "timestamp": 20, "json": {"v": "new"}})),
        ])
        .await;
        let mut resolver = SnapshotResolver::new(store, RuleContext::default());

        let value = resolver.resolve("1").await.unwrap().unwrap();
        assert_eq!(value.get("v"), Some(&Value::from("new")));
    }
}
