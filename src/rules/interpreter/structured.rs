// SPDX-License-Identifier: MIT

//! Structured literal parser
//!
//! Parses map and list literals written inside rule expressions, such as
//! `{'enabled': True, 'ports': [80, 443]}`. The grammar is JSON with a few
//! relaxations (single-quoted strings, `True`/`False`/`None`, trailing commas).
//! Nothing is ever executed: input outside the grammar is rejected.

use super::value::Value;
use std::collections::BTreeMap;

/// Nesting limit; deeper input is rejected instead of recursing further
const MAX_DEPTH: usize = 64;

/// Parse a complete literal, or `None` if `input` is not a valid literal.
pub fn parse_literal(input: &str) -> Option<Value> {
    let mut parser = LiteralParser::new(input);
    let value = parser.parse_value(0)?;
    parser.skip_whitespace();
    if parser.at_end() {
        Some(value)
    } else {
        log::debug!("Trailing input after literal: {}", input);
        None
    }
}

struct LiteralParser {
    chars: Vec<char>,
    pos: usize,
}

impl LiteralParser {
    fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            pos: 0,
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    fn expect(&mut self, expected: char) -> Option<()> {
        self.skip_whitespace();
        (self.bump()? == expected).then_some(())
    }

    fn parse_value(&mut self, depth: usize) -> Option<Value> {
        if depth > MAX_DEPTH {
            return None;
        }
        self.skip_whitespace();
        match self.peek()? {
            '{' => self.parse_map(depth),
            '[' => self.parse_list(depth),
            '\'' | '"' => self.parse_string().map(Value::String),
            c if c == '-' || c.is_ascii_digit() => self.parse_number(),
            c if c.is_ascii_alphabetic() => self.parse_keyword(),
            _ => None,
        }
    }

    fn parse_map(&mut self, depth: usize) -> Option<Value> {
        self.expect('{')?;
        let mut entries = BTreeMap::new();
        loop {
            self.skip_whitespace();
            if self.peek()? == '}' {
                self.pos += 1;
                return Some(Value::Map(entries));
            }
            let key = self.parse_key()?;
            self.expect(':')?;
            let value = self.parse_value(depth + 1)?;
            entries.insert(key, value);

            self.skip_whitespace();
            match self.bump()? {
                ',' => continue,
                '}' => return Some(Value::Map(entries)),
                _ => return None,
            }
        }
    }

    fn parse_key(&mut self) -> Option<String> {
        match self.peek()? {
            '\'' | '"' => self.parse_string(),
            c if c == '-' || c.is_ascii_digit() => match self.parse_number()? {
                Value::Integer(n) => Some(n.to_string()),
                Value::Float(n) => Some(n.to_string()),
                _ => None,
            },
            _ => None,
        }
    }

    fn parse_list(&mut self, depth: usize) -> Option<Value> {
        self.expect('[')?;
        let mut items = Vec::new();
        loop {
            self.skip_whitespace();
            if self.peek()? == ']' {
                self.pos += 1;
                return Some(Value::List(items));
            }
            items.push(self.parse_value(depth + 1)?);

            self.skip_whitespace();
            match self.bump()? {
                ',' => continue,
                ']' => return Some(Value::List(items)),
                _ => return None,
            }
        }
    }

    fn parse_string(&mut self) -> Option<String> {
        let quote = self.bump()?;
        let mut out = String::new();
        loop {
            match self.bump()? {
                c if c == quote => return Some(out),
                '\\' => match self.bump()? {
                    'n' => out.push('\n'),
                    't' => out.push('\t'),
                    'r' => out.push('\r'),
                    other => out.push(other),
                },
                c => out.push(c),
            }
        }
    }

    fn parse_number(&mut self) -> Option<Value> {
        let start = self.pos;
        if self.peek() == Some('-') {
            self.pos += 1;
        }
        let digits_start = self.pos;
        self.take_digits();
        if self.pos == digits_start {
            return None;
        }

        let mut is_float = false;
        if self.peek() == Some('.') {
            is_float = true;
            self.pos += 1;
            self.take_digits();
        }
        if matches!(self.peek(), Some('e' | 'E')) {
            is_float = true;
            self.pos += 1;
            if matches!(self.peek(), Some('+' | '-')) {
                self.pos += 1;
            }
            self.take_digits();
        }

        let text: String = self.chars[start..self.pos].iter().collect();
        if !is_float {
            if let Ok(n) = text.parse::<i64>() {
                return Some(Value::Integer(n));
            }
        }
        text.parse::<f64>().ok().map(Value::Float)
    }

    fn take_digits(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.pos += 1;
        }
    }

    fn parse_keyword(&mut self) -> Option<Value> {
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_alphanumeric() || c == '_') {
            self.pos += 1;
        }
        let word: String = self.chars[start..self.pos].iter().collect();
        match word.as_str() {
            "true" | "True" => Some(Value::Boolean(true)),
            "false" | "False" => Some(Value::Boolean(false)),
            "null" | "None" => Some(Value::None),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_json_object() {
        let value = parse_literal(r#"{"a": 1, "b": [true, null, 2.5], "c": {"d": "x"}}"#);
        assert_eq!(
            value,
            Some(Value::from(json!({"a": 1, "b": [true, null, 2.5], "c": {"d": "x"}})))
        );
    }

    #[test]
    fn test_parse_python_style_literal() {
        let value = parse_literal("{'enabled': True, 'name': 'vm', 'ports': [80, 443,], 'x': None}");
        assert_eq!(
            value,
            Some(Value::from(json!({"enabled": true, "name": "vm", "ports": [80, 443], "x": null})))
        );
    }

    #[test]
    fn test_numeric_keys_become_strings() {
        let value = parse_literal("{1: 'a', -2: 'b'}");
        assert_eq!(value, Some(Value::from(json!({"1": "a", "-2": "b"}))));
    }

    #[test]
    fn test_escapes() {
        assert_eq!(
            parse_literal(r"{'q': 'it\'s'}"),
            Some(Value::from(json!({"q": "it's"})))
        );
    }

    #[test]
    fn test_empty_containers() {
        assert_eq!(parse_literal("{}"), Some(Value::Map(BTreeMap::new())));
        assert_eq!(parse_literal("{ 'a' : [ ] }"), Some(Value::from(json!({"a": []}))));
    }

    #[test]
    fn test_rejects_code() {
        assert_eq!(parse_literal("{__import__('os').system('ls')}"), None);
        assert_eq!(parse_literal("{'a': open('/etc/passwd')}"), None);
        assert_eq!(parse_literal("{'a': 1 + 2}"), None);
    }

    #[test]
    fn test_rejects_malformed() {
        assert_eq!(parse_literal("{'a': 1"), None);
        assert_eq!(parse_literal("{'a' 1}"), None);
        assert_eq!(parse_literal("{'a': 1} trailing"), None);
        assert_eq!(parse_literal("{a: 1}"), None);
    }

    #[test]
    fn test_depth_limit() {
        let deep = format!("{}{}", "[".repeat(MAX_DEPTH + 2), "]".repeat(MAX_DEPTH + 2));
        assert_eq!(parse_literal(&deep), None);
    }
}
