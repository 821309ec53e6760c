// SPDX-License-Identifier: MIT

//! Path navigation into snapshot documents
//!
//! Paths are dotted field names with an optional bracket selector per segment:
//! - `location`
//! - `properties.osProfile.adminUsername`
//! - `[0].location` (index into a top-level array)
//! - `tags[key='env'].value` (first element whose `key` field equals `env`)

use super::value::Value;

/// Resolve `path` inside `value`.
///
/// Any step that cannot be taken (missing key, wrong container kind, index out
/// of bounds, unsupported selector) makes the whole lookup return `None`.
pub fn get_field<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let path = path.strip_prefix('.').unwrap_or(path);
    let path = path.strip_suffix('.').unwrap_or(path);
    let path = path.strip_suffix("[]").unwrap_or(path);

    // An empty selector anywhere else means "every element", which has no
    // single-value result.
    if path.is_empty() || path.contains("[]") {
        return None;
    }

    let found = path
        .split('.')
        .try_fold(value, |current, segment| step(current, segment));
    if found.is_none() {
        log::debug!("Path '{}' did not resolve", path);
    }
    found
}

fn step<'a>(current: &'a Value, segment: &str) -> Option<&'a Value> {
    let Some((name, rest)) = segment.split_once('[') else {
        return current.get(segment);
    };
    let selector = rest.strip_suffix(']').unwrap_or(rest);

    let container = match current.get(name) {
        Some(inner) if !name.is_empty() => inner,
        _ => current,
    };
    select(container.as_list()?, selector)
}

fn select<'a>(items: &'a [Value], selector: &str) -> Option<&'a Value> {
    if !selector.is_empty() && selector.bytes().all(|b| b.is_ascii_digit()) {
        let index: usize = selector.parse().ok()?;
        return items.get(index);
    }

    let (field, expected) = selector.split_once('=')?;
    let field = strip_quotes(field);
    let expected = strip_quotes(expected);

    // The filter value is always compared as text, so `count=2` does not match
    // an integer field holding 2.
    items
        .iter()
        .find(|item| item.get(&field).and_then(Value::as_str) == Some(expected.as_str()))
}

fn strip_quotes(text: &str) -> String {
    text.replace(['\'', '"'], "").trim().to_string()
}
