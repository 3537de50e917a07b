// SPDX-License-Identifier: MIT

//! Parsed form of a condition spec

use crate::logic::value::EvaluableValue;

/// Comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompareOp {
    /// =
    #[default]
    Eq,
    /// !=
    NotEq,
    /// <
    Lt,
    /// <=
    Lte,
    /// >
    Gt,
    /// >=
    Gte,
    /// ~ (string or sequence contains)
    Contains,
    /// !~
    NotContains,
}

impl CompareOp {
    /// `~` and `!~` tolerate uncaptured data
    pub fn is_inclusion(&self) -> bool {
        matches!(self, CompareOp::Contains | CompareOp::NotContains)
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::NotEq => "!=",
            CompareOp::Lt => "<",
            CompareOp::Lte => "<=",
            CompareOp::Gt => ">",
            CompareOp::Gte => ">=",
            CompareOp::Contains => "~",
            CompareOp::NotContains => "!~",
        }
    }
}

impl std::fmt::Display for CompareOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// The right-hand side of a condition
#[derive(Debug, Clone, PartialEq)]
pub enum Reference {
    /// No reference value was given
    Absent,
    /// The `"null"` sentinel: tests whether data was captured
    NotCaptured,
    Value(EvaluableValue),
}

impl Reference {
    /// Text searched for by `~` / `!~`
    pub fn needle(&self) -> Option<String> {
        match self {
            Reference::Absent => None,
            Reference::NotCaptured => Some(crate::logic::value::NULL_SENTINEL.to_string()),
            Reference::Value(v) => Some(v.to_string()),
        }
    }
}
