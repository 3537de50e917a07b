// SPDX-License-Identifier: MIT

//! Computed values ("helpers")
//!
//! A helper is a named computation with declared data-bag dependencies. It
//! can stand in for a data key in a condition (`HELPERS.<name>`) or be
//! interpolated into text (`{HELPERS.<name>}`).
//!
//! The free functions here use the built-in registry; build a
//! [`HelperRegistry`] to add or override helpers.

mod builtin;
mod helper;
mod registry;
mod template;

pub use builtin::{DateHelper, ReferenceHelper};
pub use helper::{FnHelper, Helper, HelperData};
pub use registry::HelperRegistry;
pub use template::is_templated_string;

use crate::error::Result;
use crate::logic::value::{DataBag, EvaluableValue};

/// Key prefix marking a helper-backed data key
pub const HELPERS_PREFIX: &str = "HELPERS.";

/// Fill `{HELPERS.<name>}` placeholders using the built-in helpers
pub fn fill_template(template: &str, data: &DataBag) -> Result<Option<String>> {
    HelperRegistry::shared_builtin().fill_template(template, data)
}

/// Value of built-in helper `name`
pub fn calculate_for_helper_function(name: &str, data: &DataBag) -> Result<EvaluableValue> {
    HelperRegistry::shared_builtin().calculate(name, data)
}

/// Display of built-in helper `name`'s computation
pub fn calculation_for_helper_function(name: &str, data: &DataBag) -> Result<String> {
    HelperRegistry::shared_builtin().calculation(name, data)
}
