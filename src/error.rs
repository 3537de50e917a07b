// SPDX-License-Identifier: MIT

//! Typed error handling for picklogic-rs
//!
//! Every evaluation failure is a caller-input error. None of them are
//! recovered inside the engine: a single unevaluable condition aborts the
//! whole `pick_for_data` / `do_data_satisfy_criteria` call.

use thiserror::Error;

/// Top-level error type for picklogic-rs
#[derive(Debug, Error)]
pub enum PickLogicError {
    /// A data-bag key or helper dependency needed for evaluation is missing
    #[error("Unevaluable: no data for '{key}'")]
    Unevaluable { key: String },

    /// Condition has neither an explicit nor an injected default key
    #[error("No data key")]
    NoKey,

    /// Operator string outside the supported set
    #[error("Invalid operator: '{0}'")]
    InvalidOperator(String),

    /// Inclusion operator applied to a value that is neither a string nor a sequence
    #[error("Invalid operands for '{operator}' on '{key}'")]
    InvalidOperand { key: String, operator: String },

    /// Helper name not present in the registry
    #[error("No calculation function for helper '{0}'")]
    UnknownHelper(String),

    /// Helper exists but has no calculation display renderer
    #[error("Helper '{0}' has no calculation display")]
    MissingCalculation(String),

    /// Helper rejected its (narrowed) inputs
    #[error("Helper '{name}' failed: {reason}")]
    HelperFailed { name: String, reason: String },

    /// Template contains an opening brace without a closing one
    #[error("Malformed template near: {0}")]
    MalformedTemplate(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, PickLogicError>;

impl PickLogicError {
    /// Create an unevaluable error for a missing key
    pub fn unevaluable(key: impl Into<String>) -> Self {
        Self::Unevaluable { key: key.into() }
    }

    /// Create an invalid operand error
    pub fn invalid_operand(key: impl Into<String>, operator: impl Into<String>) -> Self {
        Self::InvalidOperand {
            key: key.into(),
            operator: operator.into(),
        }
    }

    /// Create a helper failure
    pub fn helper_failed(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::HelperFailed {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// True when the failure means "insufficient data to decide"
    pub fn is_unevaluable(&self) -> bool {
        matches!(self, Self::Unevaluable { .. })
    }

    /// The missing data key, if this is an unevaluable error
    pub fn missing_key(&self) -> Option<&str> {
        match self {
            Self::Unevaluable { key } => Some(key),
            _ => None,
        }
    }
}
