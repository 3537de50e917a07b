// SPDX-License-Identifier: MIT

//! Wire types for condition, pickable and readout definitions
//!
//! Field names follow the JSON contract (`dataKey`, `referenceValue`,
//! `sufficientToPick`, `pickCriteria`, `logicRank`).

use super::value::EvaluableValue;
use serde::{Deserialize, Deserializer, Serialize};

/// Lists may arrive as explicit `null`, which reads as empty
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// One `key <operator> referenceValue` test
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionSpec {
    /// Falls back to the owner's default key when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_key: Option<String>,
    /// Defaults to `=`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,
    #[serde(default)]
    pub reference_value: Option<EvaluableValue>,
}

impl ConditionSpec {
    pub fn new(data_key: impl Into<String>, reference_value: impl Into<EvaluableValue>) -> Self {
        Self {
            data_key: Some(data_key.into()),
            operator: None,
            reference_value: Some(reference_value.into()),
        }
    }

    /// A condition relying on an injected default key
    pub fn keyless(reference_value: impl Into<EvaluableValue>) -> Self {
        Self {
            data_key: None,
            operator: None,
            reference_value: Some(reference_value.into()),
        }
    }

    pub fn with_operator(mut self, operator: impl Into<String>) -> Self {
        self.operator = Some(operator.into());
        self
    }
}

/// One AND-group; satisfying any group satisfies the pickable
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PickCriteria {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub sufficient_to_pick: Vec<ConditionSpec>,
}

impl PickCriteria {
    pub fn new(sufficient_to_pick: Vec<ConditionSpec>) -> Self {
        Self { sufficient_to_pick }
    }
}

/// A candidate outcome and the criteria guarding it
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PickableSpec {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Lower ranks are tried first
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logic_rank: Option<i64>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub pick_criteria: Vec<PickCriteria>,
    /// Opaque to the engine; returned verbatim
    #[serde(default)]
    pub payload: serde_json::Value,
}

impl PickableSpec {
    pub fn new(id: impl Into<String>, pick_criteria: Vec<PickCriteria>) -> Self {
        Self {
            id: id.into(),
            pick_criteria,
            ..Default::default()
        }
    }

    pub fn with_rank(mut self, rank: i64) -> Self {
        self.logic_rank = Some(rank);
        self
    }

    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }

    /// `payload.message` when present
    pub fn message(&self) -> Option<&str> {
        self.payload.get("message").and_then(serde_json::Value::as_str)
    }
}

/// A candidate list with its shared default key
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PickableSet {
    #[serde(default)]
    pub default_key: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub pickables: Vec<PickableSpec>,
}

/// One rendered line of a pickable's logic
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionReadout {
    pub conjunction: String,
    pub condition_string: String,
}

impl ConditionReadout {
    pub fn new(conjunction: impl Into<String>, condition_string: impl Into<String>) -> Self {
        Self {
            conjunction: conjunction.into(),
            condition_string: condition_string.into(),
        }
    }
}

/// Readouts of one candidate inside a picker
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PickableReadout {
    pub id: String,
    pub name: Option<String>,
    pub readouts: Vec<ConditionReadout>,
}
