// SPDX-License-Identifier: MIT

//! Values carried by data bags and condition specs
//!
//! On the wire, "not captured" is spelled as the string `"null"` and some
//! numbers travel as `"NUMBER.<n>"` strings. Both encodings are decoded
//! here, before any comparison sees them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Sentinel string meaning "value not captured"
pub const NULL_SENTINEL: &str = "null";

/// Prefix for integers carried as strings, e.g. `NUMBER.35`
pub const NUMBER_PREFIX: &str = "NUMBER.";

/// A value a condition can test
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum EvaluableValue {
    Boolean(bool),
    Number(f64),
    String(String),
    Sequence(Vec<String>),
}

impl EvaluableValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            EvaluableValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            EvaluableValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            EvaluableValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Falsy values short-circuit the inclusion operators
    pub fn is_falsy(&self) -> bool {
        match self {
            EvaluableValue::Boolean(b) => !b,
            EvaluableValue::Number(n) => *n == 0.0 || n.is_nan(),
            EvaluableValue::String(s) => s.is_empty(),
            EvaluableValue::Sequence(items) => items.is_empty(),
        }
    }

    /// Convert `NUMBER.<n>` strings into numbers; other values are returned as-is
    pub fn coerce_numeric(&self) -> EvaluableValue {
        match self {
            EvaluableValue::String(s) => match s.strip_prefix(NUMBER_PREFIX) {
                Some(digits) => EvaluableValue::Number(parse_leading_int(digits)),
                None => self.clone(),
            },
            other => other.clone(),
        }
    }
}

/// Base-10 integer from the leading digits of `input`; NaN when there are none
fn parse_leading_int(input: &str) -> f64 {
    let trimmed = input.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return f64::NAN;
    }
    match digits[..end].parse::<f64>() {
        Ok(n) if negative => -n,
        Ok(n) => n,
        Err(_) => f64::NAN,
    }
}

impl fmt::Display for EvaluableValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvaluableValue::Boolean(b) => write!(f, "{}", b),
            EvaluableValue::Number(n) => write!(f, "{}", n),
            EvaluableValue::String(s) => write!(f, "{}", s),
            EvaluableValue::Sequence(items) => write!(f, "{}", items.join(",")),
        }
    }
}

impl From<&str> for EvaluableValue {
    fn from(s: &str) -> Self {
        EvaluableValue::String(s.to_string())
    }
}

impl From<String> for EvaluableValue {
    fn from(s: String) -> Self {
        EvaluableValue::String(s)
    }
}

impl From<f64> for EvaluableValue {
    fn from(n: f64) -> Self {
        EvaluableValue::Number(n)
    }
}

impl From<i64> for EvaluableValue {
    fn from(n: i64) -> Self {
        EvaluableValue::Number(n as f64)
    }
}

impl From<i32> for EvaluableValue {
    fn from(n: i32) -> Self {
        EvaluableValue::Number(f64::from(n))
    }
}

impl From<bool> for EvaluableValue {
    fn from(b: bool) -> Self {
        EvaluableValue::Boolean(b)
    }
}

impl From<Vec<String>> for EvaluableValue {
    fn from(items: Vec<String>) -> Self {
        EvaluableValue::Sequence(items)
    }
}

impl From<Vec<&str>> for EvaluableValue {
    fn from(items: Vec<&str>) -> Self {
        EvaluableValue::Sequence(items.into_iter().map(String::from).collect())
    }
}

/// A single annotated entry of a data bag
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Datapoint {
    /// `None` means the value was not captured
    #[serde(default)]
    pub value: Option<EvaluableValue>,
    #[serde(default)]
    pub datatype: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl Datapoint {
    pub fn new(value: impl Into<EvaluableValue>, datatype: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            datatype: datatype.into(),
            unit: None,
        }
    }

    /// A datapoint whose value was not captured
    pub fn not_captured(datatype: impl Into<String>) -> Self {
        Self {
            value: None,
            datatype: datatype.into(),
            unit: None,
        }
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }
}

/// Keyed facts a condition is evaluated against
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct DataBag {
    entries: BTreeMap<String, Datapoint>,
}

impl DataBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, datapoint: Datapoint) -> Self {
        self.insert(key, datapoint);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, datapoint: Datapoint) {
        self.entries.insert(key.into(), datapoint);
    }

    pub fn get(&self, key: &str) -> Option<&Datapoint> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Datapoint)> {
        self.entries.iter()
    }

    /// Decoded value for `key`, with absence folded into `NotCaptured`
    pub fn resolve(&self, key: &str) -> Resolved {
        Resolved::decode(self.get(key).and_then(|dp| dp.value.as_ref()))
    }
}

impl FromIterator<(String, Datapoint)> for DataBag {
    fn from_iter<I: IntoIterator<Item = (String, Datapoint)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// A data-bag value after boundary decoding
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved {
    NotCaptured,
    Value(EvaluableValue),
}

impl Resolved {
    pub fn decode(value: Option<&EvaluableValue>) -> Self {
        match value {
            None => Resolved::NotCaptured,
            Some(EvaluableValue::String(s)) if s == NULL_SENTINEL => Resolved::NotCaptured,
            Some(v) => Resolved::Value(v.coerce_numeric()),
        }
    }

    pub fn is_captured(&self) -> bool {
        matches!(self, Resolved::Value(_))
    }
}
