// SPDX-License-Identifier: MIT

//! Operand splitting and concatenation folding

use super::ast::{ComparisonOp, ConcatOp};
use super::value::Value;

/// Literal used as the right-hand side of a rule without a comparison operator
pub const IMPLICIT_RHS: &str = "True";

/// The two sides of a rule expression and the operator between them
#[derive(Debug, Clone, PartialEq)]
pub struct Operands {
    pub lhs: Vec<String>,
    pub op: ComparisonOp,
    pub rhs: Vec<String>,
}

/// Split a token list at the first comparison operator token.
///
/// Without an operator the whole list is the left-hand side and the rule
/// asserts that it equals `True`.
pub fn split_operands(tokens: &[String]) -> Operands {
    tokens
        .iter()
        .enumerate()
        .find_map(|(idx, token)| {
            ComparisonOp::from_token(token).map(|op| Operands {
                lhs: tokens[..idx].to_vec(),
                op,
                rhs: tokens[idx + 1..].to_vec(),
            })
        })
        .unwrap_or_else(|| Operands {
            lhs: tokens.to_vec(),
            op: ComparisonOp::Eq,
            rhs: vec![IMPLICIT_RHS.to_string()],
        })
}

/// Split an operand on `+`/`*` tokens.
///
/// Each chunk is paired with the operator that precedes it; the first chunk has
/// none.
pub fn split_concatenation(tokens: &[String]) -> Vec<(&[String], Option<ConcatOp>)> {
    let mut chunks = Vec::new();
    let mut start = 0;
    let mut pending = None;

    for (idx, token) in tokens.iter().enumerate() {
        if let Some(op) = ConcatOp::from_token(token) {
            chunks.push((&tokens[start..idx], pending));
            start = idx + 1;
            pending = Some(op);
        }
    }
    chunks.push((&tokens[start..], pending));
    chunks
}

/// Fold the next chunk's value into the running result.
///
/// Only `+` between two defined values of the same kind combines them; every
/// other case keeps the right-hand value. `*` has no multiplicative meaning.
pub fn fold(acc: Value, op: Option<ConcatOp>, next: Value) -> Value {
    match op {
        Some(ConcatOp::Plus) => concatenate(acc, next),
        Some(ConcatOp::Star) | None => next,
    }
}

fn concatenate(left: Value, right: Value) -> Value {
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => Value::Integer(a.saturating_add(b)),
        (Value::Float(a), Value::Float(b)) => Value::Float(a + b),
        (Value::String(a), Value::String(b)) => Value::String(a + &b),
        (Value::List(mut a), Value::List(b)) => {
            a.extend(b);
            Value::List(a)
        }
        (_, right) => right,
    }
}
