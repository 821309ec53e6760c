// SPDX-License-Identifier: MIT

//! Typed error handling for rulecheck-rs
//!
//! Rule evaluation itself is fail-closed: malformed expressions and missing
//! snapshots degrade to a null value and a `false` verdict. The errors below
//! cover the parts that must not be swallowed, namely the document store and
//! the run configuration.

use thiserror::Error;

/// Top-level error type for rulecheck-rs
#[derive(Debug, Error)]
pub enum RuleError {
    /// Failures reported by the document store collaborator
    #[error("Document store error: {0}")]
    Store(#[from] StoreError),

    /// Configuration errors (missing test cases, bad snapshot entries)
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    /// Generic error wrapper
    #[error("{0}")]
    Other(String),
}

/// Errors raised by a [`DocumentStore`](crate::snapshot::DocumentStore)
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing store could not be reached or refused the query
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// A stored document does not have the snapshot document shape
    #[error("Malformed document in collection '{collection}': {source}")]
    MalformedDocument {
        collection: String,
        #[source]
        source: serde_json::Error,
    },

    /// Snapshot file could not be read
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Snapshot file is not valid JSON
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl RuleError {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

impl StoreError {
    /// Create an unavailable-store error
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }
}

impl From<&str> for RuleError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

impl From<String> for RuleError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}
