// SPDX-License-Identifier: MIT

//! Snapshot documents and the store they are read from
//!
//! This module provides:
//! - `DocumentStore` - the read-only store contract the interpreter relies on
//! - `InMemoryDocumentStore` - a local store loaded from snapshot files
//! - `SnapshotResolver` - latest-document lookup with lineage tracking

mod document;
mod memory;
mod resolver;
mod store;

pub use document::{LineageRecord, SnapshotDocument};
pub use memory::InMemoryDocumentStore;
pub use resolver::{RuleContext, SnapshotResolver, DEFAULT_COLLECTION, DEFAULT_DB_NAME};
pub use store::{DocumentQuery, DocumentStore, SortOrder, SortSpec};
