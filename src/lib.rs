// SPDX-License-Identifier: MIT

//! Declarative selection logic
//!
//! Candidates ("pickables") carry OR-of-AND condition groups over a keyed
//! data bag. A [`Picker`] returns the first candidate, in rank order, whose
//! conditions hold. Conditions and text templates can reference computed
//! values through a [`HelperRegistry`].

pub mod error;
pub mod logic;

pub use error::{PickLogicError, Result};
pub use logic::helpers::{
    calculate_for_helper_function, calculation_for_helper_function, fill_template, FnHelper,
    Helper, HelperData, HelperRegistry,
};
pub use logic::{
    Condition, ConditionReadout, ConditionSpec, DataBag, Datapoint, EngineConfig, EvaluableValue,
    LogicContext, LogicLoader, PickCriteria, Pickable, PickableReadout, PickableSet, PickableSpec,
    Picker, ReadoutConfig,
};
