// SPDX-License-Identifier: MIT

//! Shared evaluation context threaded through Picker -> Pickable -> Condition

use super::config::{EngineConfig, ReadoutConfig};
use super::helpers::HelperRegistry;
use once_cell::sync::Lazy;
use std::sync::Arc;

static DEFAULT_READOUT: Lazy<Arc<ReadoutConfig>> = Lazy::new(|| Arc::new(ReadoutConfig::default()));

/// Helper registry plus readout rules. Cheap to clone.
#[derive(Debug, Clone)]
pub struct LogicContext {
    registry: Arc<HelperRegistry>,
    readout: Arc<ReadoutConfig>,
}

impl LogicContext {
    pub fn new(registry: Arc<HelperRegistry>, readout: ReadoutConfig) -> Self {
        Self {
            registry,
            readout: Arc::new(readout),
        }
    }

    /// Built-in helpers with the readout rules from `config`
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(HelperRegistry::shared_builtin(), config.readout.clone())
    }

    pub fn with_registry(mut self, registry: Arc<HelperRegistry>) -> Self {
        self.registry = registry;
        self
    }

    pub fn with_readout(mut self, readout: ReadoutConfig) -> Self {
        self.readout = Arc::new(readout);
        self
    }

    pub fn registry(&self) -> &HelperRegistry {
        &self.registry
    }

    pub fn readout(&self) -> &ReadoutConfig {
        &self.readout
    }
}

impl Default for LogicContext {
    fn default() -> Self {
        Self {
            registry: HelperRegistry::shared_builtin(),
            readout: DEFAULT_READOUT.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_contexts_share_state() {
        let a = LogicContext::default();
        let b = LogicContext::default();
        assert!(std::ptr::eq(a.registry(), b.registry()));
        assert!(std::ptr::eq(a.readout(), b.readout()));
        assert_eq!(a.readout(), &ReadoutConfig::default());
    }

    #[test]
    fn test_with_readout_replaces_rules() {
        let readout = ReadoutConfig {
            rewrite_compound_strings: false,
            ..Default::default()
        };
        let context = LogicContext::default().with_readout(readout);
        assert!(!context.readout().rewrite_compound_strings);
        assert!(context.registry().contains("referenceHelper"));
    }
}
