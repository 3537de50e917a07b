//! Helpers shipped with the default registry

use super::helper::{Helper, HelperData};
use crate::error::{PickLogicError, Result};
use crate::logic::value::EvaluableValue;

/// Current local date and time, e.g. `Tue Oct 17 2026 10:00:00 GMT-0700`
#[derive(Debug, Clone, Copy, Default)]
pub struct DateHelper;

impl DateHelper {
    pub const NAME: &'static str = "date";
    const FORMAT: &'static str = "%a %b %d %Y %H:%M:%S GMT%z";
}

impl Helper for DateHelper {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn calculate(&self, _data: &HelperData) -> Result<EvaluableValue> {
        let now = chrono::Local::now();
        Ok(EvaluableValue::String(now.format(Self::FORMAT).to_string()))
    }
}

/// Years between `declaration` and `constitution`
#[derive(Debug, Clone)]
pub struct ReferenceHelper {
    dependencies: Vec<String>,
}

impl ReferenceHelper {
    pub const NAME: &'static str = "referenceHelper";

    pub fn new() -> Self {
        Self {
            dependencies: vec!["constitution".to_string(), "declaration".to_string()],
        }
    }

    fn operand(data: &HelperData, key: &str) -> Result<f64> {
        data.number(key).ok_or_else(|| {
            PickLogicError::helper_failed(
                Self::NAME,
                format!("'{}' is not a number: {}", key, data.display(key)),
            )
        })
    }
}

impl Default for ReferenceHelper {
    fn default() -> Self {
        Self::new()
    }
}

impl Helper for ReferenceHelper {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn dependencies(&self) -> &[String] {
        &self.dependencies
    }

    fn calculate(&self, data: &HelperData) -> Result<EvaluableValue> {
        let constitution = Self::operand(data, "constitution")?;
        let declaration = Self::operand(data, "declaration")?;
        Ok(EvaluableValue::Number(constitution - declaration))
    }

    fn calculation(&self, data: &HelperData) -> Option<String> {
        Some(format!(
            "{} - {}",
            data.display("constitution"),
            data.display("declaration")
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_helper_format() {
        let value = DateHelper.calculate(&HelperData::new()).unwrap();
        let text = value.as_str().unwrap().to_string();
        assert!(text.contains("GMT"));
        // weekday, month, day, year, time, zone
        assert_eq!(text.split_whitespace().count(), 6);
    }

    #[test]
    fn test_reference_helper_rejects_non_numbers() {
        let mut data = HelperData::new();
        data.insert("constitution", Some(EvaluableValue::from("1787")));
        data.insert("declaration", Some(EvaluableValue::from(1776)));

        let err = ReferenceHelper::new().calculate(&data).unwrap_err();
        assert!(matches!(err, PickLogicError::HelperFailed { .. }));
    }

    #[test]
    fn test_reference_helper_display_with_null() {
        let mut data = HelperData::new();
        data.insert("constitution", Some(EvaluableValue::from(1787)));
        data.insert("declaration", None);

        assert_eq!(
            ReferenceHelper::new().calculation(&data).as_deref(),
            Some("1787 - null")
        );
    }
}
