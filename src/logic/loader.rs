//! Pickable, data and config loading
//!
//! Files ending in `.json` are parsed as JSON; anything else as YAML.

use super::config::EngineConfig;
use super::types::PickableSet;
use super::value::DataBag;
use crate::error::Result;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

/// Loads pickables, data bags and engine configuration
pub struct LogicLoader;

impl LogicLoader {
    pub fn new() -> Self {
        Self
    }

    /// Load a pickable list from a YAML or JSON file
    pub fn load_pickables<P: AsRef<Path>>(&self, path: P) -> Result<PickableSet> {
        let path = path.as_ref();
        let content = Self::read(path)?;
        if is_json(path) {
            Self::parse_pickables_json(&content)
        } else {
            Self::parse_pickables_yaml(&content)
        }
    }

    /// Load a data bag from a YAML or JSON file
    pub fn load_data<P: AsRef<Path>>(&self, path: P) -> Result<DataBag> {
        Self::load(path.as_ref())
    }

    /// Load engine configuration from a YAML or JSON file
    pub fn load_config<P: AsRef<Path>>(&self, path: P) -> Result<EngineConfig> {
        Self::load(path.as_ref())
    }

    /// A bare list, a `{ default_key, pickables }` mapping, or `null` (no candidates)
    pub fn parse_pickables_yaml(content: &str) -> Result<PickableSet> {
        let value: serde_yaml::Value = serde_yaml::from_str(content)?;
        let set = match value {
            serde_yaml::Value::Null => PickableSet::default(),
            serde_yaml::Value::Sequence(_) => PickableSet {
                default_key: None,
                pickables: serde_yaml::from_value(value)?,
            },
            other => serde_yaml::from_value(other)?,
        };
        Ok(set)
    }

    pub fn parse_pickables_json(content: &str) -> Result<PickableSet> {
        let value: serde_json::Value = serde_json::from_str(content)?;
        let set = match value {
            serde_json::Value::Null => PickableSet::default(),
            serde_json::Value::Array(_) => PickableSet {
                default_key: None,
                pickables: serde_json::from_value(value)?,
            },
            other => serde_json::from_value(other)?,
        };
        Ok(set)
    }

    pub fn parse_data_yaml(content: &str) -> Result<DataBag> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn parse_data_json(content: &str) -> Result<DataBag> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn parse_config_yaml(content: &str) -> Result<EngineConfig> {
        Ok(serde_yaml::from_str(content)?)
    }

    fn load<T: DeserializeOwned>(path: &Path) -> Result<T> {
        let content = Self::read(path)?;
        if is_json(path) {
            Ok(serde_json::from_str(&content)?)
        } else {
            Ok(serde_yaml::from_str(&content)?)
        }
    }

    fn read(path: &Path) -> Result<String> {
        let content = fs::read_to_string(path)?;
        log::debug!("Loaded {} ({} bytes)", path.display(), content.len());
        Ok(content)
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| ext.eq_ignore_ascii_case("json"))
}

impl Default for LogicLoader {
    fn default() -> Self {
        Self::new()
    }
}
