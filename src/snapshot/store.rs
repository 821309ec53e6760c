// SPDX-License-Identifier: MIT

//! Document store collaborator contract

use super::document::SnapshotDocument;
use crate::error::StoreError;
use async_trait::async_trait;
use serde_json::Value;
use std::cmp::Ordering;

/// Equality filters a document must satisfy to be returned
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentQuery {
    filters: Vec<(String, Value)>,
}

impl DocumentQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `field` to equal `value` exactly
    pub fn field_equals(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push((field.into(), value.into()));
        self
    }

    pub fn filters(&self) -> &[(String, Value)] {
        &self.filters
    }

    /// Check a raw stored document against every filter
    pub fn matches(&self, document: &Value) -> bool {
        self.filters
            .iter()
            .all(|(field, expected)| document.get(field) == Some(expected))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Sort key for a document query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub field: String,
    pub order: SortOrder,
}

impl SortSpec {
    pub fn ascending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            order: SortOrder::Ascending,
        }
    }

    pub fn descending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            order: SortOrder::Descending,
        }
    }

    /// Order two raw documents by this key.
    ///
    /// Numbers compare numerically and strings lexically; documents missing
    /// the field (or holding an incomparable value) sort last in either order.
    pub fn compare(&self, a: &Value, b: &Value) -> Ordering {
        let key = |doc: &Value| doc.get(&self.field).filter(|v| v.is_number() || v.is_string()).cloned();
        match (key(a), key(b)) {
            (Some(x), Some(y)) => {
                let ordering = compare_keys(&x, &y);
                match self.order {
                    SortOrder::Ascending => ordering,
                    SortOrder::Descending => ordering.reverse(),
                }
            }
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

fn compare_keys(x: &Value, y: &Value) -> Ordering {
    match (x, y) {
        (Value::Number(a), Value::Number(b)) => {
            match (a.as_i64(), b.as_i64()) {
                (Some(a), Some(b)) => a.cmp(&b),
                _ => a
                    .as_f64()
                    .partial_cmp(&b.as_f64())
                    .unwrap_or(Ordering::Equal),
            }
        }
        (Value::String(a), Value::String(b)) => a.cmp(b),
        // Numbers before strings, as in BSON ordering
        (Value::Number(_), _) => Ordering::Less,
        (_, Value::Number(_)) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}

/// Read access to stored snapshot documents.
///
/// Implementations own connectivity and retries; the interpreter propagates
/// any error returned here to its caller.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Return documents of `collection` in database `db_name` matching `query`,
    /// ordered by `sort` when given, at most `limit` of them (`0` means no
    /// limit).
    async fn get_documents(
        &self,
        collection: &str,
        query: &DocumentQuery,
        db_name: &str,
        sort: Option<&SortSpec>,
        limit: usize,
    ) -> Result<Vec<SnapshotDocument>, StoreError>;
}
