//! Deep merge of partial override documents over a base config.
//!
//! Merge rules:
//! - mapping over mapping merges key by key, recursively
//! - `null` in the overlay keeps the base value
//! - any other overlay value (scalar or sequence) replaces the base value
//!
//! This differs from lodash's `_.merge`, which merges arrays index by index
//! and lets `null` overwrite. Variants written for `_.merge` that override
//! only a prefix of a list must list the whole sequence here. Sequences are
//! never merged by index: `javascript.libs` and `javascript.framework` are
//! load-ordered, and splicing entries by position would reorder globals.

use super::model::BuildConfig;
use crate::error::{PipecfgError, Result};
use serde_yaml::Value;
use tracing::debug;

/// Merge `overlay` into `base`, returning the combined document.
pub fn deep_merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Mapping(mut base_map), Value::Mapping(overlay_map)) => {
            for (key, overlay_value) in overlay_map {
                match base_map.get_mut(&key) {
                    // Merge in place so the base key order is kept.
                    Some(slot) => {
                        let base_value = std::mem::replace(slot, Value::Null);
                        *slot = deep_merge(base_value, overlay_value);
                    }
                    None => {
                        base_map.insert(key, overlay_value);
                    }
                }
            }
            Value::Mapping(base_map)
        }
        (base, Value::Null) => base,
        (_, overlay) => overlay,
    }
}

impl BuildConfig {
    /// Return a new config with `overlay` deep-merged over `self`.
    ///
    /// `self` is left untouched. The result is validated like a freshly
    /// loaded config.
    pub fn merged(&self, overlay: &Value) -> Result<BuildConfig> {
        if !matches!(overlay, Value::Mapping(_) | Value::Null) {
            return Err(PipecfgError::SchemaError(
                "override document must be a mapping of config keys".to_string(),
            ));
        }

        let base = self.to_value()?;
        let merged = deep_merge(base, overlay.clone());
        debug!("applied config overrides");

        BuildConfig::from_value(merged)
    }

    /// Parse `yaml` as an override document and merge it over `self`.
    pub fn with_overrides_yaml(&self, yaml: &str) -> Result<BuildConfig> {
        let overlay: Value = serde_yaml::from_str(yaml).map_err(|e| {
            PipecfgError::SchemaError(format!("failed to parse override YAML: {}", e))
        })?;
        self.merged(&overlay)
    }
}
