// SPDX-License-Identifier: MIT

//! Rule interpreter for snapshot compliance checks
//!
//! A rule arrives as an already-lexed token list such as
//! `["{1}[0].location", "=", "'eastus'"]` and is evaluated to a pass/fail
//! verdict:
//! - `{1}.properties.enabled = true`
//! - `count ( {2}.securityRules ) > 0`
//! - `exist ( {3}.tags.owner )`

mod ast;
mod comparator;
mod expression;
#[allow(clippy::module_inception)]
mod interpreter;
mod literal;
mod operands;
mod path;
mod structured;
mod value;

pub use ast::{ComparisonOp, ConcatOp};
pub use comparator::compare_values;
pub use expression::{parse_call, Call, Method};
pub use interpreter::RuleInterpreter;
pub use literal::{classify, Literal};
pub use operands::{split_operands, Operands};
pub use path::get_field;
pub use structured::parse_literal;
pub use value::Value;
