// SPDX-License-Identifier: MIT

//! Literal matcher
//!
//! Classifies one expression chunk into a typed literal or a snapshot
//! reference. Matchers are tried in a fixed order and the first one that
//! accepts the text wins; later patterns are broader than earlier ones, so the
//! order is part of the language.
//!
//! | Priority | Form | Example |
//! |---|---|---|
//! | 1 | number | `12`, `12.5` |
//! | 2 | boolean | `true`, `False` |
//! | 3 | quoted string | `'eastus'` |
//! | 4 | string list | `['a', 'b']` |
//! | 5 | indexed snapshot reference | `{1}[0].location` |
//! | 6 | snapshot reference | `{1}.location`, `{1}` |
//! | 7 | map literal | `{'a': 1}` |

use super::structured::parse_literal;
use super::value::Value;
use once_cell::sync::Lazy;
use regex::Regex;

static NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)(\.\d+)?").expect("number pattern is valid"));
static BOOLEAN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(?:true|false)").expect("boolean pattern is valid"));
static QUOTED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^'.*'").expect("string pattern is valid"));
static STRING_LIST: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[.*\]").expect("list pattern is valid"));
static INDEXED_REFERENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\{([\w-]+)\}(\[.*\].*)").expect("indexed reference pattern is valid")
});
static REFERENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\{([\w-]+)\}(\..*)?").expect("reference pattern is valid"));
static MAP: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\{.*\}").expect("map pattern is valid"));

/// A classified expression chunk
#[derive(Debug, Clone, PartialEq)]
pub enum Literal<'a> {
    /// A self-contained value
    Value(Value),
    /// A reference into the latest document of a snapshot
    Reference {
        snapshot_id: &'a str,
        /// Path inside the document; `None` selects the whole document
        path: Option<&'a str>,
    },
}

type Matcher = for<'a> fn(&'a str) -> Option<Literal<'a>>;

const MATCHERS: [(&str, Matcher); 7] = [
    ("number", match_number),
    ("boolean", match_boolean),
    ("string", match_string),
    ("string-list", match_string_list),
    ("indexed-reference", match_indexed_reference),
    ("reference", match_reference),
    ("map", match_map),
];

/// Classify `text`, returning `None` when no matcher accepts it
pub fn classify(text: &str) -> Option<Literal<'_>> {
    MATCHERS.iter().find_map(|(name, matcher)| {
        let literal = matcher(text)?;
        log::debug!("Matched {} literal: {}", name, text);
        Some(literal)
    })
}

fn match_number(text: &str) -> Option<Literal<'_>> {
    let caps = NUMBER.captures(text)?;
    let whole = caps.get(0)?.as_str();
    let value = match caps.get(2) {
        Some(_) => Value::Float(whole.parse().ok()?),
        None => {
            let digits = caps.get(1)?.as_str();
            match digits.parse::<i64>() {
                Ok(n) => Value::Integer(n),
                Err(_) => Value::Float(digits.parse().ok()?),
            }
        }
    };
    Some(Literal::Value(value))
}

fn match_boolean(text: &str) -> Option<Literal<'_>> {
    BOOLEAN.is_match(text).then(|| {
        Literal::Value(Value::Boolean(text.eq_ignore_ascii_case("true")))
    })
}

fn match_string(text: &str) -> Option<Literal<'_>> {
    let m = QUOTED.find(text)?;
    Some(Literal::Value(Value::String(m.as_str().replace('\'', ""))))
}

fn match_string_list(text: &str) -> Option<Literal<'_>> {
    let m = STRING_LIST.find(text)?;
    let unquoted = m.as_str().replace('\'', "");
    let inner = unquoted
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .unwrap_or(&unquoted);
    let compact: String = inner.chars().filter(|c| !c.is_whitespace()).collect();
    let items = compact
        .split(',')
        .map(|item| Value::String(item.to_string()))
        .collect();
    Some(Literal::Value(Value::List(items)))
}

fn match_indexed_reference(text: &str) -> Option<Literal<'_>> {
    let caps = INDEXED_REFERENCE.captures(text)?;
    Some(Literal::Reference {
        snapshot_id: caps.get(1)?.as_str(),
        path: caps.get(2).map(|m| m.as_str()),
    })
}

fn match_reference(text: &str) -> Option<Literal<'_>> {
    let caps = REFERENCE.captures(text)?;
    Some(Literal::Reference {
        snapshot_id: caps.get(1)?.as_str(),
        path: caps.get(2).map(|m| m.as_str()),
    })
}

fn match_map(text: &str) -> Option<Literal<'_>> {
    let m = MAP.find(text)?;
    parse_literal(m.as_str()).map(Literal::Value)
}
