// SPDX-License-Identifier: MIT

//! `{HELPERS.<name>}` placeholder filling

use super::registry::HelperRegistry;
use super::HELPERS_PREFIX;
use crate::error::{PickLogicError, Result};
use crate::logic::value::DataBag;

/// True when `text` contains a placeholder opener
pub fn is_templated_string(text: &str) -> bool {
    text.contains('{')
}

impl HelperRegistry {
    /// Replace every `{HELPERS.<name>}` in `template` with the helper's value.
    ///
    /// Returns `None` for an empty template. Substituted text is not scanned
    /// again.
    pub fn fill_template(&self, template: &str, data: &DataBag) -> Result<Option<String>> {
        if template.is_empty() {
            return Ok(None);
        }

        let mut filled = String::with_capacity(template.len());
        let mut rest = template;
        while let Some(start) = rest.find('{') {
            filled.push_str(&rest[..start]);
            let placeholder = &rest[start..];
            let end = placeholder
                .find('}')
                .ok_or_else(|| PickLogicError::MalformedTemplate(placeholder.to_string()))?;

            let token = &placeholder[1..end];
            let name = token
                .strip_prefix(HELPERS_PREFIX)
                .ok_or_else(|| PickLogicError::UnknownHelper(token.to_string()))?;
            let value = self.calculate(name, data)?;
            filled.push_str(&value.to_string());

            rest = &placeholder[end + 1..];
        }
        filled.push_str(rest);

        Ok(Some(filled))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::helpers::FnHelper;
    use crate::logic::value::{Datapoint, EvaluableValue};
    use std::sync::Arc;

    const TEMPLATE: &str = "{HELPERS.referenceHelper} years passed between the Declaration of Independence and the ratification of the Constitution.";

    fn founding_data() -> DataBag {
        DataBag::new()
            .with("constitution", Datapoint::new(1787, "number"))
            .with("declaration", Datapoint::new(1776, "number"))
    }

    #[test]
    fn test_is_templated_string() {
        assert!(is_templated_string("Echo {name}"));
        assert!(!is_templated_string("Echo name"));
    }

    #[test]
    fn test_template_is_filled() {
        let filled = HelperRegistry::builtin()
            .fill_template(TEMPLATE, &founding_data())
            .unwrap();
        assert_eq!(
            filled.as_deref(),
            Some("11 years passed between the Declaration of Independence and the ratification of the Constitution.")
        );
    }

    #[test]
    fn test_empty_template_returns_none() {
        let filled = HelperRegistry::builtin()
            .fill_template("", &founding_data())
            .unwrap();
        assert!(filled.is_none());
    }

    #[test]
    fn test_plain_text_passes_through() {
        let filled = HelperRegistry::builtin()
            .fill_template("nothing to fill", &DataBag::new())
            .unwrap();
        assert_eq!(filled.as_deref(), Some("nothing to fill"));
    }

    #[test]
    fn test_multiple_placeholders() {
        let registry = HelperRegistry::builtin().with(Arc::new(FnHelper::new(
            "span",
            ["declaration"],
            |data| Ok(EvaluableValue::String(format!("since {}", data.display("declaration")))),
        )));
        let filled = registry
            .fill_template("{HELPERS.referenceHelper} years, {HELPERS.span}.", &founding_data())
            .unwrap();
        assert_eq!(filled.as_deref(), Some("11 years, since 1776."));
    }

    #[test]
    fn test_substituted_braces_are_not_rescanned() {
        let registry = HelperRegistry::new().with(Arc::new(FnHelper::new(
            "brace",
            Vec::<String>::new(),
            |_| Ok(EvaluableValue::from("{HELPERS.brace}")),
        )));
        let filled = registry
            .fill_template("a {HELPERS.brace} b", &DataBag::new())
            .unwrap();
        assert_eq!(filled.as_deref(), Some("a {HELPERS.brace} b"));
    }

    #[test]
    fn test_unmet_dependency_errors() {
        let data = DataBag::new().with("constitution", Datapoint::new(1787, "number"));
        let err = HelperRegistry::builtin()
            .fill_template(TEMPLATE, &data)
            .unwrap_err();
        assert_eq!(err.missing_key(), Some("declaration"));
    }

    #[test]
    fn test_unregistered_or_unprefixed_token_errors() {
        let registry = HelperRegistry::builtin();
        let err = registry
            .fill_template("Echo {HELPERS.phonyHelper}", &DataBag::new())
            .unwrap_err();
        assert!(matches!(err, PickLogicError::UnknownHelper(name) if name == "phonyHelper"));

        let err = registry
            .fill_template("Echo {name}", &DataBag::new())
            .unwrap_err();
        assert!(matches!(err, PickLogicError::UnknownHelper(name) if name == "name"));
    }

    #[test]
    fn test_unclosed_placeholder_errors() {
        let err = HelperRegistry::builtin()
            .fill_template("Echo {HELPERS.date", &DataBag::new())
            .unwrap_err();
        assert!(matches!(err, PickLogicError::MalformedTemplate(_)));
    }
}
