// SPDX-License-Identifier: MIT

//! Operand evaluation
//!
//! An operand is a token run such as `count ( {1}.tags ) + 1`. It is split on
//! concatenation operators, each chunk is evaluated on its own (method calls,
//! literals, snapshot references) and the chunk values are folded left to
//! right.

use super::literal::{classify, Literal};
use super::operands::{fold, split_concatenation};
use super::path::get_field;
use super::value::Value;
use crate::error::StoreError;
use crate::snapshot::SnapshotResolver;
use futures::future::{BoxFuture, FutureExt};

/// Maximum nesting of method calls in one expression
pub const MAX_CALL_DEPTH: usize = 64;

/// Functional operators available in expressions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method<'a> {
    /// `exist(path)`: whether the last path segment is present
    Exist,
    /// `count(expr)`: length of a list, string or map
    Count,
    /// Any other name evaluates to its argument
    Other(&'a str),
}

/// A parsed `name(argument)` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Call<'a> {
    pub method: Method<'a>,
    pub argument: &'a str,
}

/// Parse `call := name "(" expr ")"`.
///
/// `name` is an identifier (or empty, for a parenthesised expression) and the
/// argument runs from the first `(` to the final `)`.
pub fn parse_call(expr: &str) -> Option<Call<'_>> {
    let expr = expr.trim();
    let open = expr.find('(')?;
    let name = &expr[..open];
    let argument = expr[open + 1..].strip_suffix(')')?;

    let is_identifier = name
        .chars()
        .enumerate()
        .all(|(i, c)| c == '_' || c.is_ascii_alphabetic() || (i > 0 && c.is_ascii_digit()));
    if !is_identifier {
        return None;
    }

    let method = match name {
        "exist" => Method::Exist,
        "count" => Method::Count,
        other => Method::Other(other),
    };
    Some(Call { method, argument })
}

/// Split an `exist` argument into the parent expression and the key to look
/// for, e.g. `{1}.a.tags[0]` into (`{1}.a`, `tags`).
pub fn split_exist_argument(argument: &str) -> (&str, String) {
    let (parent, last) = argument.rsplit_once('.').unwrap_or((argument, argument));
    let key = match (last.find('['), last.rfind(']')) {
        (Some(start), Some(end)) if start < end => format!("{}{}", &last[..start], &last[end + 1..]),
        _ => last.to_string(),
    };
    (parent, key)
}

/// Evaluate an operand token run to a single value
pub async fn evaluate(resolver: &mut SnapshotResolver, tokens: &[String]) -> Result<Value, StoreError> {
    let mut result = Value::None;
    for (chunk, op) in split_concatenation(tokens) {
        let value = eval_expression(resolver, &chunk.concat()).await?;
        result = fold(result, op, value);
    }
    Ok(result)
}

/// Evaluate one expression chunk: a method call or a literal.
///
/// Calls nested deeper than [`MAX_CALL_DEPTH`] evaluate to [`Value::None`].
pub async fn eval_expression(resolver: &mut SnapshotResolver, expr: &str) -> Result<Value, StoreError> {
    eval_nested(resolver, expr, 0).await
}

fn eval_nested<'a>(
    resolver: &'a mut SnapshotResolver,
    expr: &'a str,
    depth: usize,
) -> BoxFuture<'a, Result<Value, StoreError>> {
    async move {
        let Some(call) = parse_call(expr) else {
            return match_literal(resolver, expr).await;
        };
        if depth >= MAX_CALL_DEPTH {
            log::debug!("Call nesting exceeds {} levels: {}", MAX_CALL_DEPTH, call.argument);
            return Ok(Value::None);
        }

        match call.method {
            Method::Exist => {
                let (parent_expr, key) = split_exist_argument(call.argument);
                let parent = eval_nested(resolver, parent_expr, depth + 1).await?;
                Ok(Value::Boolean(parent.get(&key).is_some()))
            }
            Method::Count => {
                let value = eval_nested(resolver, call.argument, depth + 1).await?;
                let len = value.len().unwrap_or(0);
                Ok(Value::Integer(i64::try_from(len).unwrap_or(i64::MAX)))
            }
            Method::Other(name) => {
                log::debug!("Method '{}' has no operator, using its argument", name);
                eval_nested(resolver, call.argument, depth + 1).await
            }
        }
    }
    .boxed()
}

/// Evaluate a literal, resolving snapshot references through `resolver`.
///
/// Text that matches no literal form evaluates to [`Value::None`].
pub async fn match_literal(resolver: &mut SnapshotResolver, text: &str) -> Result<Value, StoreError> {
    let value = match classify(text) {
        None => {
            log::debug!("No literal form matches: {}", text);
            Value::None
        }
        Some(Literal::Value(value)) => value,
        Some(Literal::Reference { snapshot_id, path }) => match resolver.resolve(snapshot_id).await? {
            None => Value::None,
            Some(doc) => match path {
                Some(path) => get_field(&doc, path).cloned().unwrap_or_default(),
                None => doc,
            },
        },
    };
    Ok(value)
}
