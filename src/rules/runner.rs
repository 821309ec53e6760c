// SPDX-License-Identifier: MIT

//! Rule runner - evaluates every test case of a run and collects a report

use super::interpreter::RuleInterpreter;
use super::types::TestCase;
use crate::error::RuleError;
use crate::snapshot::{DocumentStore, LineageRecord, RuleContext};
use chrono::{DateTime, Utc};
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Passed,
    Failed,
}

/// Result of one test case, with the snapshots it read
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct RuleOutcome {
    pub id: String,
    pub rule: Vec<String>,
    pub result: Verdict,
    pub snapshots: Vec<LineageRecord>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct RunReport {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub duration_ms: i64,
    pub results: Vec<RuleOutcome>,
}

impl RunReport {
    pub fn passed(&self) -> usize {
        self.count(Verdict::Passed)
    }

    pub fn failed(&self) -> usize {
        self.count(Verdict::Failed)
    }

    pub fn all_passed(&self) -> bool {
        self.failed() == 0
    }

    fn count(&self, verdict: Verdict) -> usize {
        self.results.iter().filter(|r| r.result == verdict).count()
    }
}

/// Runs test cases against a shared, read-only document store.
///
/// Every test case gets its own interpreter, so lineage never leaks between
/// rules.
#[derive(Clone)]
pub struct RuleRunner {
    store: Arc<dyn DocumentStore>,
    context: RuleContext,
}

impl RuleRunner {
    pub fn new(store: Arc<dyn DocumentStore>, context: RuleContext) -> Self {
        Self { store, context }
    }

    /// Evaluate a single test case
    pub async fn run_case(&self, case: &TestCase) -> Result<RuleOutcome, RuleError> {
        let mut interpreter =
            RuleInterpreter::new(case.rule.clone(), self.store.clone(), self.context.clone());
        let passed = interpreter.compare().await?;
        log::info!(
            "Test case {}: {}",
            case.id,
            if passed { "passed" } else { "failed" }
        );

        Ok(RuleOutcome {
            id: case.id.clone(),
            rule: case.rule.clone(),
            result: if passed {
                Verdict::Passed
            } else {
                Verdict::Failed
            },
            snapshots: interpreter.into_lineage(),
        })
    }

    /// Evaluate all test cases concurrently.
    ///
    /// Results keep the order of `cases`. A document store failure in any
    /// case fails the whole run.
    pub async fn run(&self, cases: &[TestCase]) -> Result<RunReport, RuleError> {
        let start = Utc::now();
        log::info!("Running {} test cases", cases.len());

        let results = join_all(cases.iter().map(|case| self.run_case(case)))
            .await
            .into_iter()
            .collect::<Result<Vec<_>, _>>()?;

        let end = Utc::now();
        let report = RunReport {
            start,
            end,
            duration_ms: (end - start).num_milliseconds(),
            results,
        };
        log::info!(
            "Run finished: {} passed, {} failed",
            report.passed(),
            report.failed()
        );
        Ok(report)
    }
}
