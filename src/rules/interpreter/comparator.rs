// SPDX-License-Identifier: MIT

//! Type-dispatched comparison of evaluated operands

use super::ast::ComparisonOp;
use super::value::Value;

/// Compare two evaluated operands.
///
/// Operands of different kinds never compare (the result is `false` for every
/// operator, including `!=`). Kinds without an ordering only answer `=`/`!=`,
/// and maps do not compare at all.
pub fn compare_values(lhs: &Value, rhs: &Value, op: ComparisonOp) -> bool {
    match (lhs, rhs) {
        (Value::None, Value::None) => op == ComparisonOp::Eq,
        (Value::Integer(a), Value::Integer(b)) => compare_ordered(a, op, b),
        (Value::Float(a), Value::Float(b)) => compare_ordered(a, op, b),
        (Value::Boolean(a), Value::Boolean(b)) => compare_equality(a, op, b),
        (Value::String(a), Value::String(b)) => compare_ordered(a, op, b),
        (Value::List(a), Value::List(b)) => compare_equality(a, op, b),
        (Value::Map(_), Value::Map(_)) => false,
        _ => false,
    }
}

fn compare_ordered<T: PartialOrd + ?Sized>(left: &T, op: ComparisonOp, right: &T) -> bool {
    match op {
        ComparisonOp::Eq => left == right,
        ComparisonOp::NotEq => left != right,
        ComparisonOp::Gt => left > right,
        ComparisonOp::Gte => left >= right,
        ComparisonOp::Lt => left < right,
        ComparisonOp::Lte => left <= right,
    }
}

fn compare_equality<T: PartialEq + ?Sized>(left: &T, op: ComparisonOp, right: &T) -> bool {
    match op {
        ComparisonOp::Eq => left == right,
        ComparisonOp::NotEq => left != right,
        ComparisonOp::Gt | ComparisonOp::Gte | ComparisonOp::Lt | ComparisonOp::Lte => false,
    }
}
