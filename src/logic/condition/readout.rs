// SPDX-License-Identifier: MIT

//! Human-readable rendering of conditions

use super::ast::{CompareOp, Reference};
use super::evaluator::Condition;
use crate::logic::messages::{self, localized, Localize};
use crate::logic::value::EvaluableValue;

impl Condition {
    /// Render as a readable clause, e.g. `temperature < 95`, `democracy`,
    /// `president IS NOT CAPTURED` or `|*LIGHT-SABER|`.
    ///
    /// Malformed conditions (no key, no reference value) render as `""`.
    pub fn condition_string_with_localized(&self, localize: Option<Localize<'_>>) -> String {
        let key = match self.key() {
            Some(key) => key,
            None => return String::new(),
        };
        let op = self.operator();
        let readout = self.context().readout();

        let value = match self.reference() {
            Reference::Absent => return String::new(),
            Reference::NotCaptured => {
                // checking for null means checking that the key is NOT captured
                let message = if op == CompareOp::Eq {
                    messages::IS_NOT_CAPTURED
                } else {
                    messages::IS_CAPTURED
                };
                return format!("{} {}", key, localized(localize, message));
            }
            Reference::Value(EvaluableValue::String(s))
                if op.is_inclusion() && readout.rewrites_inclusion_for(key) =>
            {
                let item = s.to_uppercase();
                return match op {
                    CompareOp::Contains => format!("|*{}|", item),
                    _ => format!("|*{} {}|", localized(localize, messages::NO), item),
                };
            }
            Reference::Value(EvaluableValue::String(s)) => {
                if readout.rewrite_compound_strings {
                    rewrite_compound_string(s)
                } else {
                    s.to_uppercase()
                }
            }
            Reference::Value(EvaluableValue::Boolean(b)) => {
                let affirmative = matches!((op, *b), (CompareOp::Eq, true) | (CompareOp::NotEq, false));
                return if affirmative {
                    key.to_string()
                } else {
                    format!("{} {}", localized(localize, messages::NOT), key)
                };
            }
            Reference::Value(EvaluableValue::Number(n)) => n.to_string(),
            Reference::Value(EvaluableValue::Sequence(items)) => items.join(", "),
        };

        format!("{} {} {}", key, op, value)
    }
}

/// `gender.MALE` -> `MALE`; strings without a dot are just upper-cased
fn rewrite_compound_string(s: &str) -> String {
    match s.rfind('.') {
        Some(dot) => s[dot + 1..].to_uppercase(),
        None => s.to_uppercase(),
    }
}
