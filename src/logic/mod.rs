// SPDX-License-Identifier: MIT

pub mod condition;
pub mod config;
pub mod context;
pub mod helpers;
pub mod loader;
pub mod messages;
pub mod pickable;
pub mod picker;
pub mod types;
pub mod value;

pub use condition::{CompareOp, Condition};
pub use config::{EngineConfig, ReadoutConfig};
pub use context::LogicContext;
pub use loader::LogicLoader;
pub use pickable::Pickable;
pub use picker::Picker;
pub use types::{
    ConditionReadout, ConditionSpec, PickCriteria, PickableReadout, PickableSet, PickableSpec,
};
pub use value::{DataBag, Datapoint, EvaluableValue};
