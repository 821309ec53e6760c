// SPDX-License-Identifier: MIT

use super::document::SnapshotDocument;
use super::store::{DocumentQuery, DocumentStore, SortSpec};
use crate::error::StoreError;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Documents keyed by (database, collection)
type CollectionMap = HashMap<(String, String), Vec<Value>>;

/// Process-local document store holding raw snapshot documents.
///
/// Clones share the same underlying collections.
#[derive(Clone)]
pub struct InMemoryDocumentStore {
    collections: Arc<RwLock<CollectionMap>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self {
            collections: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn insert(&self, db_name: &str, collection: &str, document: Value) {
        self.insert_many(db_name, collection, vec![document]).await;
    }

    pub async fn insert_many(&self, db_name: &str, collection: &str, documents: Vec<Value>) {
        let mut collections = self.collections.write().await;
        collections
            .entry((db_name.to_string(), collection.to_string()))
            .or_default()
            .extend(documents);
    }

    /// Load a JSON file holding one document or an array of documents.
    ///
    /// Returns the number of documents added.
    pub async fn load_file<P: AsRef<Path>>(
        &self,
        db_name: &str,
        collection: &str,
        path: P,
    ) -> Result<usize, StoreError> {
        let content = tokio::fs::read_to_string(path.as_ref()).await?;
        let documents = match serde_json::from_str::<Value>(&content)? {
            Value::Array(items) => items,
            single => vec![single],
        };
        let count = documents.len();
        log::info!(
            "Loaded {} documents from {} into {}/{}",
            count,
            path.as_ref().display(),
            db_name,
            collection
        );
        self.insert_many(db_name, collection, documents).await;
        Ok(count)
    }

    pub async fn count(&self, db_name: &str, collection: &str) -> usize {
        let collections = self.collections.read().await;
        collections
            .get(&(db_name.to_string(), collection.to_string()))
            .map_or(0, Vec::len)
    }
}

impl Default for InMemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn get_documents(
        &self,
        collection: &str,
        query: &DocumentQuery,
        db_name: &str,
        sort: Option<&SortSpec>,
        limit: usize,
    ) -> Result<Vec<SnapshotDocument>, StoreError> {
        let mut matched: Vec<Value> = {
            let collections = self.collections.read().await;
            collections
                .get(&(db_name.to_string(), collection.to_string()))
                .map(|docs| docs.iter().filter(|d| query.matches(d)).cloned().collect())
                .unwrap_or_default()
        };

        if let Some(sort) = sort {
            matched.sort_by(|a, b| sort.compare(a, b));
        }
        if limit > 0 {
            matched.truncate(limit);
        }

        matched
            .into_iter()
            .map(|doc| {
                serde_json::from_value(doc).map_err(|source| StoreError::MalformedDocument {
                    collection: collection.to_string(),
                    source,
                })
            })
            .collect()
    }
}
