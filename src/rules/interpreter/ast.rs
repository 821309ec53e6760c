// SPDX-License-Identifier: MIT

//! Operator tokens of a rule expression

/// Comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOp {
    /// =
    Eq,
    /// !=
    NotEq,
    /// >
    Gt,
    /// >=
    Gte,
    /// <
    Lt,
    /// <=
    Lte,
}

/// Operators that join sub-expressions of one operand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConcatOp {
    /// +
    Plus,
    /// *
    Star,
}

impl ComparisonOp {
    /// Recognise a comparison operator token by exact match
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "=" => Some(ComparisonOp::Eq),
            "!=" => Some(ComparisonOp::NotEq),
            ">" => Some(ComparisonOp::Gt),
            ">=" => Some(ComparisonOp::Gte),
            "<" => Some(ComparisonOp::Lt),
            "<=" => Some(ComparisonOp::Lte),
            _ => None,
        }
    }
}

impl ConcatOp {
    /// Recognise a concatenation operator token by exact match
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "+" => Some(ConcatOp::Plus),
            "*" => Some(ConcatOp::Star),
            _ => None,
        }
    }
}

impl std::fmt::Display for ComparisonOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ComparisonOp::Eq => write!(f, "="),
            ComparisonOp::NotEq => write!(f, "!="),
            ComparisonOp::Gt => write!(f, ">"),
            ComparisonOp::Gte => write!(f, ">="),
            ComparisonOp::Lt => write!(f, "<"),
            ComparisonOp::Lte => write!(f, "<="),
        }
    }
}

impl std::fmt::Display for ConcatOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConcatOp::Plus => write!(f, "+"),
            ConcatOp::Star => write!(f, "*"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comparison_op_display() {
        assert_eq!(format!("{}", ComparisonOp::Eq), "=");
        assert_eq!(format!("{}", ComparisonOp::NotEq), "!=");
        assert_eq!(format!("{}", ComparisonOp::Gt), ">");
        assert_eq!(format!("{}", ComparisonOp::Gte), ">=");
        assert_eq!(format!("{}", ComparisonOp::Lt), "<");
        assert_eq!(format!("{}", ComparisonOp::Lte), "<=");
    }

    #[test]
    fn test_from_token_roundtrips_display() {
        for op in [
            ComparisonOp::Eq,
            ComparisonOp::NotEq,
            ComparisonOp::Gt,
            ComparisonOp::Gte,
            ComparisonOp::Lt,
            ComparisonOp::Lte,
        ] {
            assert_eq!(ComparisonOp::from_token(&op.to_string()), Some(op));
        }
    }

    #[test]
    fn test_from_token_rejects_non_operators() {
        assert_eq!(ComparisonOp::from_token("=="), None);
        assert_eq!(ComparisonOp::from_token(" = "), None);
        assert_eq!(ComparisonOp::from_token("{1}.a"), None);
        assert_eq!(ConcatOp::from_token("+"), Some(ConcatOp::Plus));
        assert_eq!(ConcatOp::from_token("*"), Some(ConcatOp::Star));
        assert_eq!(ConcatOp::from_token("-"), None);
    }
}
