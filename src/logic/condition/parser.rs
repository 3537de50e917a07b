//! Decoding of wire-format condition parts
//!
//! Operators arrive as strings (`"="`, `"!~"`, ...) and reference values
//! may carry the `"null"` sentinel. Both are decoded once, when a
//! condition is built.

use super::ast::{CompareOp, Reference};
use crate::error::PickLogicError;
use crate::logic::value::{EvaluableValue, NULL_SENTINEL};
use std::str::FromStr;

impl FromStr for CompareOp {
    type Err = PickLogicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "=" => Ok(CompareOp::Eq),
            "!=" => Ok(CompareOp::NotEq),
            "<" => Ok(CompareOp::Lt),
            "<=" => Ok(CompareOp::Lte),
            ">" => Ok(CompareOp::Gt),
            ">=" => Ok(CompareOp::Gte),
            "~" => Ok(CompareOp::Contains),
            "!~" => Ok(CompareOp::NotContains),
            other => Err(PickLogicError::InvalidOperator(other.to_string())),
        }
    }
}

/// Parse an optional operator; absent or empty means `=`
pub fn parse_operator(operator: Option<&str>) -> Result<CompareOp, PickLogicError> {
    match operator {
        None | Some("") => Ok(CompareOp::Eq),
        Some(op) => op.parse(),
    }
}

/// Decode a reference value, recognizing the `"null"` sentinel
pub fn parse_reference(value: Option<&EvaluableValue>) -> Reference {
    match value {
        None => Reference::Absent,
        Some(EvaluableValue::String(s)) if s == NULL_SENTINEL => Reference::NotCaptured,
        Some(v) => Reference::Value(v.clone()),
    }
}
