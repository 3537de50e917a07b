// SPDX-License-Identifier: MIT

use super::builtin::{DateHelper, ReferenceHelper};
use super::helper::{Helper, HelperData};
use crate::error::{PickLogicError, Result};
use crate::logic::value::{DataBag, EvaluableValue};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

static BUILTIN: Lazy<Arc<HelperRegistry>> = Lazy::new(|| Arc::new(HelperRegistry::builtin()));

/// Name -> helper table. Populate it before sharing; evaluation only reads.
#[derive(Clone, Default)]
pub struct HelperRegistry {
    helpers: HashMap<String, Arc<dyn Helper>>,
}

impl HelperRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the built-in helpers (`date`, `referenceHelper`)
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(DateHelper));
        registry.register(Arc::new(ReferenceHelper::new()));
        registry
    }

    /// Process-wide shared copy of [`HelperRegistry::builtin`]
    pub fn shared_builtin() -> Arc<HelperRegistry> {
        BUILTIN.clone()
    }

    pub fn register(&mut self, helper: Arc<dyn Helper>) {
        let name = helper.name().to_string();
        if self.helpers.insert(name.clone(), helper).is_some() {
            log::warn!("Helper '{}' replaced an existing registration", name);
        }
    }

    /// Builder-style register
    pub fn with(mut self, helper: Arc<dyn Helper>) -> Self {
        self.register(helper);
        self
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Helper>> {
        self.helpers.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.helpers.contains_key(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.helpers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.helpers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.helpers.is_empty()
    }

    /// Run helper `name` against `data`
    pub fn calculate(&self, name: &str, data: &DataBag) -> Result<EvaluableValue> {
        let helper = self.lookup(name)?;
        let narrowed = narrowed_data(helper.as_ref(), data)?;
        let value = helper.calculate(&narrowed)?;
        log::trace!("Helper {} calculated {}", name, value);
        Ok(value)
    }

    /// Render helper `name`'s computation against `data`
    pub fn calculation(&self, name: &str, data: &DataBag) -> Result<String> {
        let helper = self.lookup(name)?;
        let narrowed = narrowed_data(helper.as_ref(), data)?;
        helper
            .calculation(&narrowed)
            .ok_or_else(|| PickLogicError::MissingCalculation(name.to_string()))
    }

    fn lookup(&self, name: &str) -> Result<Arc<dyn Helper>> {
        self.get(name)
            .ok_or_else(|| PickLogicError::UnknownHelper(name.to_string()))
    }
}

/// Only the declared dependencies, with `NUMBER.` strings coerced
fn narrowed_data(helper: &dyn Helper, data: &DataBag) -> Result<HelperData> {
    let mut narrowed = HelperData::new();
    for dep in helper.dependencies() {
        let datapoint = data
            .get(dep)
            .ok_or_else(|| PickLogicError::unevaluable(dep.as_str()))?;
        narrowed.insert(
            dep.as_str(),
            datapoint.value.as_ref().map(EvaluableValue::coerce_numeric),
        );
    }
    Ok(narrowed)
}

impl fmt::Debug for HelperRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HelperRegistry")
            .field("helpers", &self.names())
            .finish()
    }
}
