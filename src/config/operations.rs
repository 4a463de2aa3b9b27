//! Config loading, serialization, and validation.

use super::model::BuildConfig;
use super::types::{AssetEntry, ConfigFormat};
use crate::error::{PipecfgError, Result};
use crate::glob::{compile_glob, split_negation};
use serde_yaml::Value;
use std::fmt;
use std::path::Path;
use tracing::debug;

impl BuildConfig {
    /// Load config from a file.
    ///
    /// `.json` files are parsed as JSON, everything else as YAML.
    ///
    /// # Returns
    ///
    /// * `Ok(BuildConfig)` - Successfully loaded and validated config
    /// * `Err(PipecfgError::UserError)` - The file could not be read
    /// * `Err(PipecfgError::SchemaError)` - Parse error or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading build config");

        let document = read_document(path)?;
        Self::from_value(document)
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: BuildConfig =
            serde_path_to_error::deserialize(serde_yaml::Deserializer::from_str(yaml))
                .map_err(|e| schema_error("failed to parse config YAML", e))?;

        config.validate()?;
        Ok(config)
    }

    /// Parse config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let mut deserializer = serde_json::Deserializer::from_str(json);
        let config: BuildConfig = serde_path_to_error::deserialize(&mut deserializer)
            .map_err(|e| schema_error("failed to parse config JSON", e))?;
        deserializer.end().map_err(|e| {
            PipecfgError::SchemaError(format!("failed to parse config JSON: {}", e))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Build config from an already-parsed document.
    pub fn from_value(value: Value) -> Result<Self> {
        let config: BuildConfig = serde_path_to_error::deserialize(value)
            .map_err(|e| schema_error("failed to read config", e))?;

        config.validate()?;
        Ok(config)
    }

    /// Serialize config to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| {
            PipecfgError::UserError(format!("failed to serialize config to YAML: {}", e))
        })
    }

    /// Serialize config to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            PipecfgError::UserError(format!("failed to serialize config to JSON: {}", e))
        })
    }

    /// Serialize config in the given format.
    pub fn render(&self, format: ConfigFormat) -> Result<String> {
        match format {
            ConfigFormat::Yaml => self.to_yaml(),
            ConfigFormat::Json => self.to_json(),
        }
    }

    /// Convert config to a generic document, the input of a deep merge.
    pub fn to_value(&self) -> Result<Value> {
        serde_yaml::to_value(self)
            .map_err(|e| PipecfgError::UserError(format!("failed to convert config: {}", e)))
    }

    /// Validate config values and return the first problem found.
    ///
    /// Validation rules:
    /// - `output`, `javascript.app` and `stylesheet` must be non-empty
    /// - script and template lists must not contain empty entries
    /// - each `assets` entry is a non-empty glob or a single-key mapping
    /// - every glob must compile
    /// - `watch.delay.unit` and both delay factors must be positive
    pub fn validate(&self) -> Result<()> {
        require_non_empty("output", &self.output)?;
        require_non_empty("javascript.app", &self.javascript.app)?;
        require_non_empty("stylesheet", &self.stylesheet)?;

        for (i, lib) in self.javascript.libs.iter().enumerate() {
            require_non_empty(&format!("javascript.libs[{}]", i), lib)?;
        }
        for (i, script) in self.javascript.framework.iter().enumerate() {
            require_non_empty(&format!("javascript.framework[{}]", i), script)?;
        }
        for (i, pattern) in self.templates.iter().enumerate() {
            let key = format!("templates[{}]", i);
            require_non_empty(&key, pattern)?;
            compile_glob(pattern, &key)?;
        }

        for (i, entry) in self.assets.iter().enumerate() {
            validate_asset(i, entry)?;
        }

        self.validate_watch()
    }

    fn validate_watch(&self) -> Result<()> {
        let watch = &self.watch;

        if watch.delay.unit == 0 {
            return Err(PipecfgError::SchemaError(
                "watch.delay.unit must be greater than 0".to_string(),
            ));
        }

        for (key, factor) in [
            ("watch.delay.factor.poll", watch.delay.factor.poll),
            ("watch.delay.factor.debounce", watch.delay.factor.debounce),
        ] {
            if !factor.is_finite() || factor <= 0.0 {
                return Err(PipecfgError::SchemaError(format!(
                    "{} must be a positive number (found {})",
                    key, factor
                )));
            }
        }

        require_non_empty("watch.glob.js", &watch.glob.js)?;
        compile_glob(&watch.glob.js, "watch.glob.js")?;
        require_non_empty("watch.glob.css", &watch.glob.css)?;
        compile_glob(&watch.glob.css, "watch.glob.css")?;

        Ok(())
    }
}

/// Prefix a deserialization error with the config key it occurred at.
fn schema_error<E: fmt::Display>(
    context: &str,
    err: serde_path_to_error::Error<E>,
) -> PipecfgError {
    let path = err.path().to_string();
    if path == "." {
        PipecfgError::SchemaError(format!("{}: {}", context, err.inner()))
    } else {
        PipecfgError::SchemaError(format!("{}: {}: {}", context, path, err.inner()))
    }
}

fn require_non_empty(key: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(PipecfgError::SchemaError(format!(
            "{} must be non-empty",
            key
        )));
    }
    Ok(())
}

fn validate_asset(index: usize, entry: &AssetEntry) -> Result<()> {
    let key = format!("assets[{}]", index);

    match entry {
        AssetEntry::Glob(pattern) => {
            require_non_empty(&key, pattern)?;
            let (negated, body) = split_negation(pattern);
            if negated && body.trim().is_empty() {
                return Err(PipecfgError::SchemaError(format!(
                    "{}: negation '!' must be followed by a pattern",
                    key
                )));
            }
            compile_glob(body, &key)?;
        }
        AssetEntry::Relocate(map) => {
            if map.len() != 1 {
                return Err(PipecfgError::SchemaError(format!(
                    "{}: relocation entry must map exactly one source to a destination (found {} keys)",
                    key,
                    map.len()
                )));
            }
            for (source, dest) in map {
                require_non_empty(&format!("{} source", key), source)?;
                require_non_empty(&format!("{} destination for '{}'", key, source), dest)?;
                if source.starts_with('!') {
                    return Err(PipecfgError::SchemaError(format!(
                        "{}: relocation source '{}' cannot be negated",
                        key, source
                    )));
                }
                compile_glob(source, &key)?;
            }
        }
    }

    Ok(())
}

/// Read a config file into a generic document without schema checks.
///
/// Used for full configs and partial override documents alike. An empty
/// file reads as an empty mapping.
pub fn read_document(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        PipecfgError::UserError(format!(
            "failed to read config file '{}': {}",
            path.display(),
            e
        ))
    })?;

    let value = match ConfigFormat::from_path(path) {
        ConfigFormat::Json => serde_json::from_str::<Value>(&content).map_err(|e| {
            PipecfgError::SchemaError(format!(
                "failed to parse '{}' as JSON: {}",
                path.display(),
                e
            ))
        })?,
        ConfigFormat::Yaml => serde_yaml::from_str::<Value>(&content).map_err(|e| {
            PipecfgError::SchemaError(format!(
                "failed to parse '{}' as YAML: {}",
                path.display(),
                e
            ))
        })?,
    };

    Ok(match value {
        Value::Null => Value::Mapping(Default::default()),
        other => other,
    })
}
