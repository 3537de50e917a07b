//! Condition evaluation against a data bag

use super::ast::{CompareOp, Reference};
use super::parser::{parse_operator, parse_reference};
use crate::error::{PickLogicError, Result};
use crate::logic::context::LogicContext;
use crate::logic::helpers::HELPERS_PREFIX;
use crate::logic::types::ConditionSpec;
use crate::logic::value::{DataBag, EvaluableValue, Resolved, NULL_SENTINEL};
use std::cmp::Ordering;

/// A single `key <operator> reference` test
#[derive(Debug, Clone)]
pub struct Condition {
    key: Option<String>,
    op: CompareOp,
    reference: Reference,
    context: LogicContext,
}

impl Condition {
    /// Build from a spec. `default_key` is used when the spec has no `dataKey`.
    ///
    /// Unknown operators are rejected here rather than at evaluation.
    pub fn new(spec: &ConditionSpec, default_key: Option<&str>) -> Result<Self> {
        Self::new_with_context(spec, default_key, LogicContext::default())
    }

    /// Like [`Condition::new`], evaluating against `context`
    pub fn new_with_context(
        spec: &ConditionSpec,
        default_key: Option<&str>,
        context: LogicContext,
    ) -> Result<Self> {
        let key = spec
            .data_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .or_else(|| default_key.filter(|k| !k.is_empty()))
            .map(str::to_string);

        Ok(Self {
            key,
            op: parse_operator(spec.operator.as_deref())?,
            reference: parse_reference(spec.reference_value.as_ref()),
            context,
        })
    }

    pub fn with_context(mut self, context: LogicContext) -> Self {
        self.context = context;
        self
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn operator(&self) -> CompareOp {
        self.op
    }

    pub fn reference(&self) -> &Reference {
        &self.reference
    }

    pub(crate) fn context(&self) -> &LogicContext {
        &self.context
    }

    /// Evaluate against `data`.
    ///
    /// Missing data is an error, not `false`, unless the condition checks
    /// for the `"null"` sentinel or uses `~` / `!~`.
    pub fn is_true_for_data(&self, data: &DataBag) -> Result<bool> {
        let key = self.key.as_deref().ok_or(PickLogicError::NoKey)?;
        let resolved = self.resolve(key, data)?;
        let outcome = self.compare(key, &resolved)?;
        log::trace!(
            "Condition {} {} {:?} -> {}",
            key,
            self.op,
            self.reference,
            outcome
        );
        Ok(outcome)
    }

    fn resolve(&self, key: &str, data: &DataBag) -> Result<Resolved> {
        if let Some(name) = key.strip_prefix(HELPERS_PREFIX) {
            // dependency errors surface even under ~ / !~
            let value = self.context.registry().calculate(name, data)?;
            return Ok(Resolved::Value(value));
        }

        let resolved = data.resolve(key);
        if !resolved.is_captured()
            && self.reference != Reference::NotCaptured
            && !self.op.is_inclusion()
        {
            return Err(PickLogicError::unevaluable(key));
        }
        Ok(resolved)
    }

    fn compare(&self, key: &str, left: &Resolved) -> Result<bool> {
        let right = &self.reference;
        let outcome = match self.op {
            CompareOp::Eq => values_equal(left, right),
            CompareOp::NotEq => !values_equal(left, right),
            CompareOp::Lt => ordering(left, right) == Some(Ordering::Less),
            CompareOp::Lte => matches!(
                ordering(left, right),
                Some(Ordering::Less | Ordering::Equal)
            ),
            CompareOp::Gt => ordering(left, right) == Some(Ordering::Greater),
            CompareOp::Gte => matches!(
                ordering(left, right),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            CompareOp::Contains => self.includes(key, left)?,
            CompareOp::NotContains => !self.includes(key, left)?,
        };
        Ok(outcome)
    }

    fn includes(&self, key: &str, left: &Resolved) -> Result<bool> {
        let haystack = match left {
            Resolved::NotCaptured => return Ok(false),
            Resolved::Value(v) if v.is_falsy() => return Ok(false),
            Resolved::Value(v) => v,
        };

        match haystack {
            EvaluableValue::String(s) => Ok(self
                .reference
                .needle()
                .map_or(false, |needle| s.contains(needle.as_str()))),
            EvaluableValue::Sequence(items) => Ok(match &self.reference {
                Reference::Value(EvaluableValue::String(needle)) => {
                    items.iter().any(|item| item == needle)
                }
                Reference::NotCaptured => items.iter().any(|item| item == NULL_SENTINEL),
                _ => false,
            }),
            _ => Err(PickLogicError::invalid_operand(key, self.op.symbol())),
        }
    }
}

fn values_equal(left: &Resolved, right: &Reference) -> bool {
    match (left, right) {
        (Resolved::NotCaptured, Reference::NotCaptured) => true,
        // helper output is not sentinel-decoded
        (Resolved::Value(EvaluableValue::String(s)), Reference::NotCaptured) => s == NULL_SENTINEL,
        (Resolved::Value(l), Reference::Value(r)) => l == r,
        _ => false,
    }
}

fn ordering(left: &Resolved, right: &Reference) -> Option<Ordering> {
    match (left, right) {
        (Resolved::NotCaptured, Reference::NotCaptured) => Some(Ordering::Equal),
        (Resolved::Value(l), Reference::Value(r)) => match (l, r) {
            (EvaluableValue::Number(a), EvaluableValue::Number(b)) => a.partial_cmp(b),
            (EvaluableValue::String(a), EvaluableValue::String(b)) => Some(a.cmp(b)),
            (EvaluableValue::Boolean(a), EvaluableValue::Boolean(b)) => Some(a.cmp(b)),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::helpers::{FnHelper, HelperRegistry};
    use crate::logic::value::Datapoint;
    use std::sync::Arc;

    fn data() -> DataBag {
        DataBag::new()
            .with("capital", Datapoint::new("Washington", "string"))
            .with(
                "capitals",
                Datapoint::new(vec!["Sacramento", "Trenton", "Albany", "Austin"], "array"),
            )
            .with("cities", Datapoint::not_captured("array"))
            .with("democracy", Datapoint::new(true, "boolean"))
            .with("perfect", Datapoint::new(false, "boolean"))
            .with("founding", Datapoint::new(1776, "number"))
            .with("vibranium", Datapoint::new(0, "number"))
            .with("pi", Datapoint::new(3.1415, "number"))
            .with("constitution", Datapoint::new(1787, "number"))
            .with("declaration", Datapoint::new(1776, "number"))
            .with("emptyString", Datapoint::new("", "string"))
            .with("numberString", Datapoint::new("NUMBER.35", "string"))
    }

    fn check(key: &str, op: &str, reference: impl Into<EvaluableValue>) -> Result<bool> {
        let spec = ConditionSpec::new(key, reference).with_operator(op);
        Condition::new(&spec, None)?.is_true_for_data(&data())
    }

    fn holds(key: &str, op: &str, reference: impl Into<EvaluableValue>) -> bool {
        check(key, op, reference).unwrap()
    }

    #[test]
    fn test_string_identity() {
        assert!(holds("capital", "=", "Washington"));
        assert!(!holds("capital", "!=", "Washington"));
        assert!(holds("capital", "!=", "Moscow"));

        let tacit = ConditionSpec::new("capital", "Washington");
        assert!(Condition::new(&tacit, None)
            .unwrap()
            .is_true_for_data(&data())
            .unwrap());
    }

    #[test]
    fn test_string_inclusion() {
        assert!(holds("capital", "~", "Wash"));
        assert!(holds("capital", "!~", "Moscow"));
        assert!(!holds("emptyString", "~", "Wash"));
        assert!(holds("emptyString", "!~", "Wash"));
    }

    #[test]
    fn test_number_string_parsed_as_number() {
        assert!(holds("numberString", "=", 35));
        assert!(holds("numberString", ">", 34));
        assert!(!holds("numberString", "=", "NUMBER.35"));
    }

    #[test]
    fn test_boolean_identity() {
        assert!(holds("democracy", "=", true));
        assert!(holds("democracy", "!=", false));
        assert!(holds("perfect", "=", false));
        assert!(holds("perfect", "!=", true));
        assert!(!holds("perfect", "=", true));
    }

    #[test]
    fn test_integer_comparisons() {
        assert!(holds("founding", "=", 1776));
        assert!(holds("founding", "!=", 1066));
        assert!(holds("founding", ">", 1775));
        assert!(!holds("founding", ">", 1776));
        assert!(holds("founding", ">=", 1776));
        assert!(holds("founding", "<", 1777));
        assert!(!holds("founding", "<", 1776));
        assert!(holds("founding", "<=", 1776));
        assert!(holds("vibranium", "=", 0));
        assert!(holds("vibranium", "!=", 1000));
    }

    #[test]
    fn test_decimal_comparisons() {
        assert!(holds("pi", "=", 3.1415));
        assert!(holds("pi", "!=", 3.1416));
        assert!(holds("pi", ">", 3.1414));
        assert!(!holds("pi", ">", 3.1415));
        assert!(holds("pi", ">=", 3.1415));
        assert!(holds("pi", "<", 3.1416));
        assert!(!holds("pi", "<", 3.1415));
        assert!(holds("pi", "<=", 3.1415));
    }

    #[test]
    fn test_ordering_is_reflexively_consistent() {
        for x in [-2.5, 0.0, 1.0, 1776.0, 3.1415] {
            let bag = DataBag::new().with("x", Datapoint::new(x, "number"));
            let eval = |op: &str| {
                Condition::new(&ConditionSpec::new("x", x).with_operator(op), None)
                    .unwrap()
                    .is_true_for_data(&bag)
                    .unwrap()
            };
            assert!(!eval("<"));
            assert!(eval("<="));
            assert!(!eval(">"));
            assert!(eval(">="));
        }
    }

    #[test]
    fn test_mismatched_types_never_order() {
        assert!(!holds("capital", "<", 5));
        assert!(!holds("founding", ">", "1000"));
        assert!(!holds("founding", "=", "1776"));
    }

    #[test]
    fn test_sequence_inclusion() {
        assert!(holds("capitals", "~", "Austin"));
        assert!(!holds("capitals", "!~", "Austin"));
        assert!(holds("capitals", "!~", "Spokane"));
    }

    #[test]
    fn test_inclusion_over_null_value() {
        assert!(!holds("cities", "~", "Austin"));
        assert!(holds("cities", "!~", "Austin"));
        // a key absent from the bag behaves like a null value under ~ / !~
        assert!(!holds("unknownCities", "~", "Austin"));
        assert!(holds("unknownCities", "!~", "Austin"));
    }

    #[test]
    fn test_numeric_inclusion_is_invalid_operand() {
        let err = check("founding", "~", "1776").unwrap_err();
        assert!(matches!(err, PickLogicError::InvalidOperand { key, .. } if key == "founding"));
        // falsy operands short-circuit before the operand check
        assert!(!holds("vibranium", "~", "0"));
    }

    #[test]
    fn test_no_data_key() {
        let spec = ConditionSpec::keyless("1776").with_operator("~");
        let err = Condition::new(&spec, None)
            .unwrap()
            .is_true_for_data(&data())
            .unwrap_err();
        assert!(matches!(err, PickLogicError::NoKey));
    }

    #[test]
    fn test_unmet_direct_dependency() {
        let err = check("e", "=", 2.7183).unwrap_err();
        assert_eq!(err.missing_key(), Some("e"));

        let err = check("cities", "=", "Austin").unwrap_err();
        assert_eq!(err.missing_key(), Some("cities"));
    }

    #[test]
    fn test_null_checks() {
        assert!(holds("emperor", "=", "null"));
        assert!(!holds("emperor", "!=", "null"));
        assert!(holds("capital", "!=", "null"));
        assert!(!holds("capital", "=", "null"));
        assert!(holds("cities", "=", "null"));
    }

    #[test]
    fn test_invalid_operator_fails_at_construction() {
        let spec = ConditionSpec::new("pi", 3.1416).with_operator("***");
        let err = Condition::new(&spec, None).unwrap_err();
        assert!(matches!(err, PickLogicError::InvalidOperator(_)));
    }

    #[test]
    fn test_default_key_injection() {
        let spec = ConditionSpec::keyless("Moscow").with_operator("!=");
        let cond = Condition::new(&spec, Some("capital")).unwrap();
        assert_eq!(cond.key(), Some("capital"));
        assert!(cond.is_true_for_data(&data()).unwrap());

        let spec = ConditionSpec::keyless("Washington");
        let cond = Condition::new(&spec, Some("capital")).unwrap();
        assert!(cond.is_true_for_data(&data()).unwrap());

        // explicit key wins over the default
        let spec = ConditionSpec::new("founding", 1776);
        let cond = Condition::new(&spec, Some("capital")).unwrap();
        assert_eq!(cond.key(), Some("founding"));
    }

    #[test]
    fn test_helper_backed_key() {
        assert!(holds("HELPERS.referenceHelper", "=", 11));
        assert!(holds("HELPERS.referenceHelper", ">", 10));
    }

    #[test]
    fn test_helper_dependency_missing() {
        let spec = ConditionSpec::new("HELPERS.referenceHelper", 11);
        let bag = DataBag::new().with("constitution", Datapoint::new(1787, "number"));
        let err = Condition::new(&spec, None)
            .unwrap()
            .is_true_for_data(&bag)
            .unwrap_err();
        assert_eq!(err.missing_key(), Some("declaration"));

        // no exemption for inclusion operators on helper keys
        let spec = ConditionSpec::new("HELPERS.referenceHelper", "1").with_operator("!~");
        let err = Condition::new(&spec, None)
            .unwrap()
            .is_true_for_data(&bag)
            .unwrap_err();
        assert!(err.is_unevaluable());
    }

    #[test]
    fn test_unknown_helper() {
        let err = check("HELPERS.nonexistentHelper", "=", 11).unwrap_err();
        assert!(matches!(err, PickLogicError::UnknownHelper(_)));
    }

    #[test]
    fn test_custom_registry_through_context() {
        let registry = HelperRegistry::new().with(Arc::new(FnHelper::new(
            "age",
            ["founding"],
            |data| Ok(EvaluableValue::Number(2026.0 - data.number("founding").unwrap_or(0.0))),
        )));
        let context = LogicContext::default().with_registry(Arc::new(registry));

        let spec = ConditionSpec::new("HELPERS.age", 250);
        let cond = Condition::new_with_context(&spec, None, context).unwrap();
        assert!(cond.is_true_for_data(&data()).unwrap());

        // built-ins are not visible through a registry that lacks them
        let spec = ConditionSpec::new("HELPERS.referenceHelper", 11);
        let cond = Condition::new(&spec, None)
            .unwrap()
            .with_context(cond.context().clone());
        assert!(cond.is_true_for_data(&data()).is_err());
    }
}
