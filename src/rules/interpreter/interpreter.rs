// SPDX-License-Identifier: MIT

use super::comparator::compare_values;
use super::expression;
use super::operands::{split_operands, Operands};
use super::value::Value;
use crate::error::RuleError;
use crate::snapshot::{DocumentStore, LineageRecord, RuleContext, SnapshotResolver};
use std::sync::Arc;

/// Evaluates one tokenized rule against the snapshot document store.
///
/// The operands are split once at construction. Each snapshot document read
/// while evaluating is appended to the lineage, which callers read back after
/// [`compare`](Self::compare) for provenance reporting.
#[derive(Debug)]
pub struct RuleInterpreter {
    operands: Operands,
    resolver: SnapshotResolver,
}

impl RuleInterpreter {
    pub fn new(tokens: Vec<String>, store: Arc<dyn DocumentStore>, context: RuleContext) -> Self {
        let operands = split_operands(&tokens);
        log::debug!(
            "Rule operands: lhs={:?} op={} rhs={:?}",
            operands.lhs,
            operands.op,
            operands.rhs
        );
        Self {
            operands,
            resolver: SnapshotResolver::new(store, context),
        }
    }

    pub fn operands(&self) -> &Operands {
        &self.operands
    }

    /// Snapshot documents used so far, in resolution order
    pub fn lineage(&self) -> &[LineageRecord] {
        self.resolver.lineage()
    }

    pub fn into_lineage(self) -> Vec<LineageRecord> {
        self.resolver.into_lineage()
    }

    /// Evaluate both operands and apply the comparison operator.
    ///
    /// Only document store failures are errors; everything else that goes
    /// wrong during evaluation yields `Ok(false)`.
    pub async fn compare(&mut self) -> Result<bool, RuleError> {
        let Self { operands, resolver } = self;
        let lhs = expression::evaluate(resolver, &operands.lhs).await?;
        let rhs = expression::evaluate(resolver, &operands.rhs).await?;

        let verdict = compare_values(&lhs, &rhs, operands.op);
        log::info!(
            "LHS: {:?}, OP: {}, RHS: {:?} => {}",
            lhs,
            operands.op,
            rhs,
            verdict
        );
        Ok(verdict)
    }

    /// Evaluate an arbitrary operand token run
    pub async fn value_of(&mut self, tokens: &[String]) -> Result<Value, RuleError> {
        Ok(expression::evaluate(&mut self.resolver, tokens).await?)
    }

    /// Evaluate one expression chunk, e.g. `count({1}.tags)`
    pub async fn eval_expression(&mut self, expr: &str) -> Result<Value, RuleError> {
        Ok(expression::eval_expression(&mut self.resolver, expr).await?)
    }

    /// Evaluate a single literal or snapshot reference
    pub async fn match_literal(&mut self, text: &str) -> Result<Value, RuleError> {
        Ok(expression::match_literal(&mut self.resolver, text).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::interpreter::ComparisonOp;
    use crate::snapshot::{InMemoryDocumentStore, DEFAULT_COLLECTION, DEFAULT_DB_NAME};
    use serde_json::json;

    fn tokens(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    async fn store_with(snapshots: Vec<(&str, serde_json::Value)>) -> Arc<InMemoryDocumentStore> {
        let store = InMemoryDocumentStore::new();
        for (id, payload) in snapshots {
            store
                .insert(
                    DEFAULT_DB_NAME,
                    DEFAULT_COLLECTION,
                    json!({
                        "snapshotId": id,
                        "timestamp": 1545908086831i64,
                        "json": payload,
                        "path": format!("/resources/{}", id),
                        "structure": "azure",
                        "reference": "subscription",
                        "source": "azureStructure"
                    }),
                )
                .await;
        }
        Arc::new(store)
    }

    async fn check(rule: &[&str], snapshots: Vec<(&str, serde_json::Value)>) -> bool {
        let store = store_with(snapshots).await;
        let mut interpreter = RuleInterpreter::new(tokens(rule), store, RuleContext::default());
        interpreter.compare().await.unwrap()
    }

    #[tokio::test]
    async fn test_indexed_location_rule() {
        let docs = json!([{"location": "eastus"}, {"location": "westus"}]);
        assert!(check(&["{1}[0].location", "=", "'eastus'"], vec![("1", docs.clone())]).await);
        assert!(!check(&["{1}[1].location", "=", "'eastus'"], vec![("1", docs)]).await);
    }

    #[tokio::test]
    async fn test_numeric_rule() {
        let snap = vec![("1", json!({"diskSizeGB": 128}))];
        assert!(check(&["{1}.diskSizeGB", ">", "100"], snap.clone()).await);
        assert!(check(&["{1}.diskSizeGB", "<=", "128"], snap.clone()).await);
        assert!(!check(&["{1}.diskSizeGB", "=", "128.0"], snap).await);
    }

    #[tokio::test]
    async fn test_implicit_truthy_rule() {
        let snap = vec![("1", json!({"encryption": {"enabled": true}}))];
        assert!(check(&["exist", "(", "{1}.encryption.enabled", ")"], snap.clone()).await);
        assert!(check(&["{1}.encryption.enabled"], snap.clone()).await);
        assert!(!check(&["exist", "(", "{1}.encryption.keySource", ")"], snap).await);
    }

    #[tokio::test]
    async fn test_type_mismatch_fails_closed() {
        let snap = vec![("1", json!({"port": "22"}))];
        assert!(!check(&["{1}.port", "=", "22"], snap.clone()).await);
        assert!(!check(&["{1}.port", "!=", "22"], snap).await);
    }

    #[tokio::test]
    async fn test_missing_snapshot_on_both_sides() {
        assert!(check(&["{1}.a", "=", "{2}.b"], vec![]).await);
        assert!(!check(&["{1}.a", "!=", "{2}.b"], vec![]).await);
        assert!(!check(&["{1}.a", "=", "'x'"], vec![]).await);
    }

    #[tokio::test]
    async fn test_cross_snapshot_comparison() {
        let snaps = vec![
            ("1", json!({"location": "eastus"})),
            ("2", json!({"location": "eastus"})),
        ];
        assert!(check(&["{1}.location", "=", "{2}.location"], snaps).await);
    }

    #[tokio::test]
    async fn test_list_literal_rule() {
        let snap = vec![("1", json!({"zones": ["1", "2"]}))];
        assert!(check(&["{1}.zones", "=", "['1', '2']"], snap.clone()).await);
        assert!(check(&["{1}.zones", "!=", "['2', '1']"], snap).await);
    }

    #[tokio::test]
    async fn test_lineage_grows_per_resolution() {
        let store = store_with(vec![("1", json!({"a": "x", "b": "y"}))]).await;
        let mut interpreter = RuleInterpreter::new(
            tokens(&["{1}.a", "+", "{1}.b", "=", "'xy'"]),
            store,
            RuleContext::default(),
        );

        assert!(interpreter.lineage().is_empty());
        assert!(interpreter.compare().await.unwrap());
        assert_eq!(interpreter.lineage().len(), 2);
        assert!(interpreter.lineage().iter().all(|r| r.id == "1"));
        assert_eq!(interpreter.lineage()[0].path, "/resources/1");

        interpreter.match_literal("{1}.a").await.unwrap();
        assert_eq!(interpreter.lineage().len(), 3);

        interpreter.match_literal("{9}.a").await.unwrap();
        assert_eq!(interpreter.into_lineage().len(), 3);
    }

    #[tokio::test]
    async fn test_operands_fixed_at_construction() {
        let store = store_with(vec![]).await;
        let mut interpreter =
            RuleInterpreter::new(tokens(&["count", "(", "{1}.a", ")", ">=", "0"]), store, RuleContext::default());
        let before = interpreter.operands().clone();
        interpreter.compare().await.unwrap();
        assert_eq!(interpreter.operands(), &before);
        assert_eq!(before.op, ComparisonOp::Gte);
    }

    #[tokio::test]
    async fn test_value_of_and_eval_expression() {
        let store = store_with(vec![("1", json!({"list": [1, 2, 3]}))]).await;
        let mut interpreter = RuleInterpreter::new(vec![], store, RuleContext::default());

        assert_eq!(
            interpreter.eval_expression("count({1}.list)").await.unwrap(),
            Value::Integer(3)
        );
        assert_eq!(
            interpreter.value_of(&tokens(&["{1}.list", "+", "{1}.list"])).await.unwrap(),
            Value::from(json!([1, 2, 3, 1, 2, 3]))
        );
    }
}
