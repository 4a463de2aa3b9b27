//! BuildConfig struct definition and default implementation.

use super::types::*;
use serde::{Deserialize, Serialize};

/// Configuration for one build or watch session.
///
/// Every key is required when a full document is parsed. Partial documents
/// are only accepted as overrides (see [`BuildConfig::merged`]). All paths
/// are relative to the project root, never to the configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Destination directory for build artifacts.
    pub output: String,

    pub javascript: JavascriptConfig,

    /// Template globs aggregated into `templates.json`.
    pub templates: Vec<String>,

    /// Entry stylesheet compiled into `app.css`.
    pub stylesheet: String,

    /// Copied assets, processed in declared order.
    pub assets: Vec<AssetEntry>,

    pub plugins: Plugins,

    pub watch: WatchConfig,
}

impl BuildConfig {
    /// The built-in base configuration.
    pub fn base() -> Self {
        Self {
            output: default_output(),
            javascript: JavascriptConfig {
                app: default_app(),
                libs: default_libs(),
                framework: default_framework(),
            },
            templates: default_templates(),
            stylesheet: default_stylesheet(),
            assets: default_assets(),
            plugins: default_plugins(),
            watch: default_watch(),
        }
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self::base()
    }
}
