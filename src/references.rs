//! Check that literal paths named by a config exist under the project root.

use crate::config::BuildConfig;
use crate::glob::{is_glob, normalize_path};
use std::path::Path;

/// A configured path that does not exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingReference {
    /// Config key, e.g. `javascript.libs[3]`.
    pub key: String,
    pub path: String,
}

/// Every literal path in `config` that is missing under `root`, in key order.
///
/// Globs are not checked: an empty match is not an error for a glob.
pub fn missing_references(config: &BuildConfig, root: &Path) -> Vec<MissingReference> {
    let mut refs: Vec<(String, &str)> =
        vec![("javascript.app".to_string(), config.javascript.app.as_str())];

    for (i, lib) in config.javascript.libs.iter().enumerate() {
        refs.push((format!("javascript.libs[{}]", i), lib.as_str()));
    }
    for (i, script) in config.javascript.framework.iter().enumerate() {
        refs.push((format!("javascript.framework[{}]", i), script.as_str()));
    }
    refs.push(("stylesheet".to_string(), config.stylesheet.as_str()));
    for (i, entry) in config.assets.iter().enumerate() {
        if let Some((source, _)) = entry.relocation()
            && !is_glob(source)
        {
            refs.push((format!("assets[{}]", i), source));
        }
    }

    refs.into_iter()
        .filter(|(_, path)| !root.join(normalize_path(path)).exists())
        .map(|(key, path)| MissingReference {
            key,
            path: path.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, path: &str) {
        let full = root.join(path);
        fs::create_dir_all(full.parent().unwrap()).unwrap();
        fs::write(full, "").unwrap();
    }

    #[test]
    fn complete_project_has_no_missing_references() {
        let dir = TempDir::new().unwrap();
        let config = BuildConfig::base();
        touch(dir.path(), &config.javascript.app);
        touch(dir.path(), &config.stylesheet);
        for path in config.javascript.libs.iter().chain(&config.javascript.framework) {
            touch(dir.path(), path);
        }
        touch(dir.path(), "libs/bower_components/modernizr/modernizr.js");

        assert!(missing_references(&config, dir.path()).is_empty());
    }

    #[test]
    fn missing_paths_are_keyed_by_config_path() {
        let dir = TempDir::new().unwrap();
        let config = BuildConfig {
            javascript: crate::config::JavascriptConfig {
                app: "src/main.js".to_string(),
                libs: vec!["libs/a.js".to_string(), "libs/b.js".to_string()],
                framework: vec![],
            },
            stylesheet: "styles/main.less".to_string(),
            ..BuildConfig::base()
        };
        touch(dir.path(), "src/main.js");
        touch(dir.path(), "libs/a.js");
        touch(dir.path(), "styles/main.less");

        let missing = missing_references(&config, dir.path());

        assert_eq!(
            missing,
            vec![
                MissingReference {
                    key: "javascript.libs[1]".to_string(),
                    path: "libs/b.js".to_string(),
                },
                MissingReference {
                    key: "assets[2]".to_string(),
                    path: "libs/bower_components/modernizr/modernizr.js".to_string(),
                },
            ]
        );
    }

    #[test]
    fn globs_are_not_reported() {
        let dir = TempDir::new().unwrap();
        let missing = missing_references(&BuildConfig::base(), dir.path());

        assert!(missing.iter().all(|m| !m.key.starts_with("templates")));
        assert!(missing.iter().all(|m| m.key != "assets[0]"));
    }
}
