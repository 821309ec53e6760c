// SPDX-License-Identifier: MIT

//! Compliance rule evaluation over cloud resource snapshots

pub mod error;
pub mod rules;
pub mod snapshot;

pub use error::{RuleError, StoreError};
pub use rules::interpreter::{ComparisonOp, RuleInterpreter, Value};
pub use snapshot::{DocumentStore, InMemoryDocumentStore, LineageRecord, RuleContext};
