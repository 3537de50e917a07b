// SPDX-License-Identifier: MIT

//! Condition evaluation for pick criteria
//!
//! A condition is a single test such as:
//! - `{ dataKey: "temperature", operator: "<", referenceValue: 95 }`
//! - `{ dataKey: "capitals", operator: "~", referenceValue: "Austin" }`
//! - `{ dataKey: "HELPERS.referenceHelper", referenceValue: 11 }`

mod ast;
mod evaluator;
mod parser;
mod readout;

pub use ast::{CompareOp, Reference};
pub use evaluator::Condition;
pub use parser::{parse_operator, parse_reference};
