//! Named configuration variants.
//!
//! A config directory holds the base document `_base.{yaml,yml,json}` and any
//! number of variant documents `<name>.{yaml,yml,json}`. A variant is a
//! partial override deep-merged over the base, selected on the command line
//! with `-C <name>` / `--config <name>`.

use crate::config::{BuildConfig, read_document};
use crate::error::{PipecfgError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Name of the base document.
pub const BASE_NAME: &str = "_base";

/// Extensions tried, in order, when resolving a config name to a file.
pub const EXTENSIONS: &[&str] = &["yaml", "yml", "json"];

/// A directory of configuration documents.
#[derive(Debug, Clone)]
pub struct ConfigDir {
    path: PathBuf,
}

impl ConfigDir {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Where `init` writes the base document.
    pub fn base_path(&self) -> PathBuf {
        self.path.join(format!("{}.yaml", BASE_NAME))
    }

    /// Load the base config.
    ///
    /// Falls back to the built-in [`BuildConfig::base`] when the directory has
    /// no `_base` document.
    pub fn load_base(&self) -> Result<BuildConfig> {
        match self.find(BASE_NAME) {
            Some(path) => BuildConfig::load(&path),
            None => {
                debug!(dir = %self.path.display(), "no _base document, using built-in base config");
                Ok(BuildConfig::base())
            }
        }
    }

    /// Load a variant by name, merged over the base.
    ///
    /// An empty name or `_base` loads the base itself.
    pub fn load_variant(&self, name: &str) -> Result<BuildConfig> {
        let base = self.load_base()?;
        if name.is_empty() || name == BASE_NAME {
            return Ok(base);
        }

        validate_variant_name(name)?;

        let path = self.find(name).ok_or_else(|| {
            let tried: Vec<String> = EXTENSIONS
                .iter()
                .map(|ext| format!("{}.{}", name, ext))
                .collect();
            PipecfgError::UserError(format!(
                "config variant '{}' not found in '{}' (tried {})",
                name,
                self.path.display(),
                tried.join(", ")
            ))
        })?;

        info!(variant = name, path = %path.display(), "loading config variant");
        let overlay = read_document(&path)?;
        base.merged(&overlay).map_err(|e| match e {
            PipecfgError::SchemaError(msg) => {
                PipecfgError::SchemaError(format!("variant '{}': {}", name, msg))
            }
            other => other,
        })
    }

    /// Sorted names of the variants in this directory, excluding `_base`.
    pub fn variant_names(&self) -> Result<Vec<String>> {
        if !self.path.is_dir() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&self.path).map_err(|e| {
            PipecfgError::UserError(format!(
                "failed to read config directory '{}': {}",
                self.path.display(),
                e
            ))
        })?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| {
                PipecfgError::UserError(format!(
                    "failed to read directory entry in '{}': {}",
                    self.path.display(),
                    e
                ))
            })?;
            let path = entry.path();
            if !path.is_file() || !has_config_extension(&path) {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if stem != BASE_NAME && !names.iter().any(|n| n == stem) {
                names.push(stem.to_string());
            }
        }

        names.sort();
        Ok(names)
    }

    fn find(&self, name: &str) -> Option<PathBuf> {
        EXTENSIONS
            .iter()
            .map(|ext| self.path.join(format!("{}.{}", name, ext)))
            .find(|candidate| candidate.is_file())
    }
}

/// Extensions match exactly, as in [`ConfigDir::find`], so every listed
/// variant can be loaded.
fn has_config_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| EXTENSIONS.contains(&ext))
}

/// Variant names are plain file stems.
fn validate_variant_name(name: &str) -> Result<()> {
    if name.contains(['/', '\\']) || name.contains("..") {
        return Err(PipecfgError::UserError(format!(
            "invalid config variant name '{}': use a file name without path separators",
            name
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, content: &str) {
        fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn missing_base_falls_back_to_builtin() {
        let dir = TempDir::new().unwrap();
        let config_dir = ConfigDir::new(dir.path());

        assert_eq!(config_dir.load_base().unwrap(), BuildConfig::base());
        assert_eq!(config_dir.load_variant("").unwrap(), BuildConfig::base());
    }

    #[test]
    fn base_document_is_used_when_present() {
        let dir = TempDir::new().unwrap();
        let mut custom = BuildConfig::base();
        custom.output = "www".to_string();
        write(dir.path(), "_base.yaml", &custom.to_yaml().unwrap());

        let config_dir = ConfigDir::new(dir.path());
        assert_eq!(config_dir.load_variant(BASE_NAME).unwrap().output, "www");
    }

    #[test]
    fn variant_merges_over_base() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "prod.yaml", "output: dist\nwatch:\n  usePolling: false\n");

        let config = ConfigDir::new(dir.path()).load_variant("prod").unwrap();
        let base = BuildConfig::base();

        assert_eq!(config.output, "dist");
        assert!(!config.watch.use_polling);
        assert_eq!(config.watch.delay, base.watch.delay);
        assert_eq!(config.javascript, base.javascript);
    }

    #[test]
    fn json_variant_is_supported() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "ci.json", r#"{"stylesheet": "styles/ci.less"}"#);

        let config = ConfigDir::new(dir.path()).load_variant("ci").unwrap();
        assert_eq!(config.stylesheet, "styles/ci.less");
    }

    #[test]
    fn empty_variant_document_equals_base() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "noop.yml", "");

        let config = ConfigDir::new(dir.path()).load_variant("noop").unwrap();
        assert_eq!(config, BuildConfig::base());
    }

    #[test]
    fn unknown_variant_lists_tried_files() {
        let dir = TempDir::new().unwrap();
        let err = ConfigDir::new(dir.path()).load_variant("staging").unwrap_err();

        assert!(err.to_string().contains("config variant 'staging' not found"));
        assert!(err.to_string().contains("staging.yaml, staging.yml, staging.json"));
    }

    #[test]
    fn invalid_variant_reports_name() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "bad.yaml", "watch:\n  delay:\n    unit: 0\n");

        let err = ConfigDir::new(dir.path()).load_variant("bad").unwrap_err();
        assert!(err.to_string().contains("variant 'bad'"));
        assert!(err.to_string().contains("watch.delay.unit"));
    }

    #[test]
    fn path_like_variant_names_are_rejected() {
        let dir = TempDir::new().unwrap();
        let err = ConfigDir::new(dir.path())
            .load_variant("../secrets")
            .unwrap_err();

        assert!(err.to_string().contains("invalid config variant name"));
    }

    #[test]
    fn variant_names_are_sorted_and_exclude_base() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "_base.yaml", &BuildConfig::base().to_yaml().unwrap());
        write(dir.path(), "prod.yaml", "output: dist");
        write(dir.path(), "dev.json", "{}");
        write(dir.path(), "dev.yaml", "{}");
        write(dir.path(), "notes.txt", "ignored");

        let names = ConfigDir::new(dir.path()).variant_names().unwrap();
        assert_eq!(names, vec!["dev", "prod"]);
    }

    #[test]
    fn every_listed_variant_loads() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "prod.yaml", "output: dist");
        write(dir.path(), "stage.YAML", "output: stage");

        let config_dir = ConfigDir::new(dir.path());
        let names = config_dir.variant_names().unwrap();

        assert_eq!(names, vec!["prod"]);
        for name in names {
            assert!(config_dir.load_variant(&name).is_ok(), "{} failed to load", name);
        }
    }

    #[test]
    fn variant_names_of_missing_dir_is_empty() {
        let names = ConfigDir::new("/nonexistent/config").variant_names().unwrap();
        assert!(names.is_empty());
    }
}
