// SPDX-License-Identifier: MIT

//! Engine configuration
//!
//! All fields are optional in YAML/JSON; missing ones take the defaults
//! below.

use serde::{Deserialize, Serialize};

/// Data keys whose inclusion checks render as `|*ITEM|` markers
pub const DEFAULT_INCLUSION_KEYS: &[&str] = &["availableEquipment"];

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Key injected into conditions that omit `dataKey`
    pub default_key: Option<String>,
    /// How conditions render as text
    pub readout: ReadoutConfig,
}

/// Display rules for condition readouts
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ReadoutConfig {
    /// Render `gender.MALE` as `MALE`
    pub rewrite_compound_strings: bool,
    /// Keys rendered as `|*VALUE|` / `|*NO VALUE|` under `~` / `!~`
    pub rewrite_inclusion_keys: Vec<String>,
}

impl Default for ReadoutConfig {
    fn default() -> Self {
        Self {
            rewrite_compound_strings: true,
            rewrite_inclusion_keys: DEFAULT_INCLUSION_KEYS
                .iter()
                .map(|k| k.to_string())
                .collect(),
        }
    }
}

impl ReadoutConfig {
    pub fn rewrites_inclusion_for(&self, key: &str) -> bool {
        self.rewrite_inclusion_keys.iter().any(|k| k == key)
    }
}
