// SPDX-License-Identifier: MIT

use crate::error::Result;
use crate::logic::value::EvaluableValue;
use std::collections::BTreeMap;
use std::fmt;

/// Trait for named computations usable as virtual data keys.
///
/// # Notes
/// - `name()` and `dependencies()` return borrowed data; store them in struct fields
/// - `calculate()` only ever sees the keys listed in `dependencies()`
/// - `calculation()` is optional and renders the arithmetic for display
pub trait Helper: Send + Sync {
    /// Returns the helper name (unique within a registry)
    fn name(&self) -> &str;

    /// Data-bag keys this helper reads
    fn dependencies(&self) -> &[String] {
        &[]
    }

    /// Compute the value from the narrowed dependency data
    fn calculate(&self, data: &HelperData) -> Result<EvaluableValue>;

    /// Render the computation as text, if the helper supports it
    fn calculation(&self, _data: &HelperData) -> Option<String> {
        None
    }
}

/// Dependency values handed to a helper, keyed by data-bag key
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HelperData {
    values: BTreeMap<String, Option<EvaluableValue>>,
}

impl HelperData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Option<EvaluableValue>) {
        self.values.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&EvaluableValue> {
        self.values.get(key).and_then(|v| v.as_ref())
    }

    pub fn number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(EvaluableValue::as_f64)
    }

    /// Display form of a dependency; uncaptured values print as `null`
    pub fn display(&self, key: &str) -> String {
        self.get(key)
            .map(|v| v.to_string())
            .unwrap_or_else(|| "null".to_string())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

type CalculateFn = dyn Fn(&HelperData) -> Result<EvaluableValue> + Send + Sync;
type CalculationFn = dyn Fn(&HelperData) -> String + Send + Sync;

/// Closure-backed helper for registering ad-hoc computations
pub struct FnHelper {
    name: String,
    dependencies: Vec<String>,
    calculate: Box<CalculateFn>,
    calculation: Option<Box<CalculationFn>>,
}

impl FnHelper {
    pub fn new<I, S, F>(name: impl Into<String>, dependencies: I, calculate: F) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: Fn(&HelperData) -> Result<EvaluableValue> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            dependencies: dependencies.into_iter().map(Into::into).collect(),
            calculate: Box::new(calculate),
            calculation: None,
        }
    }

    pub fn with_calculation<F>(mut self, calculation: F) -> Self
    where
        F: Fn(&HelperData) -> String + Send + Sync + 'static,
    {
        self.calculation = Some(Box::new(calculation));
        self
    }
}

impl Helper for FnHelper {
    fn name(&self) -> &str {
        &self.name
    }

    fn dependencies(&self) -> &[String] {
        &self.dependencies
    }

    fn calculate(&self, data: &HelperData) -> Result<EvaluableValue> {
        (self.calculate)(data)
    }

    fn calculation(&self, data: &HelperData) -> Option<String> {
        self.calculation.as_ref().map(|render| render(data))
    }
}

impl fmt::Debug for FnHelper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnHelper")
            .field("name", &self.name)
            .field("dependencies", &self.dependencies)
            .field("has_calculation", &self.calculation.is_some())
            .finish()
    }
}
