//! Configuration sub-records and the built-in base values.
//!
//! The base values describe the reference front-end project: a bundled ES
//! module entry point, two concatenated script groups, handlebars-style
//! templates, a LESS stylesheet and a handful of copied assets.

use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

/// Options handed to one build plugin. The shape is plugin-specific.
pub type PluginOptions = serde_yaml::Mapping;

/// On-disk format of a configuration document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfigFormat {
    #[default]
    Yaml,
    Json,
}

impl ConfigFormat {
    /// Parse a format name.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// Pick the format from a file extension; anything but `.json` is YAML.
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .and_then(|ext| Self::from_str(&ext))
            .unwrap_or_default()
    }
}

/// Script inputs.
///
/// `libs` and `framework` are concatenated verbatim in declared order, so
/// the order is load order: later entries may use globals of earlier ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JavascriptConfig {
    /// Entry point compiled as ES modules and bundled (`app.js`).
    pub app: String,

    /// Third-party scripts (`libs.js`).
    pub libs: Vec<String>,

    /// First-party infrastructure scripts (`framework.js`).
    pub framework: Vec<String>,
}

/// One entry of the `assets` list.
///
/// A string is a glob copied as-is (`!` prefix excludes). A mapping relocates
/// `{source: destination-subdir}` without renaming.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AssetEntry {
    Glob(String),
    Relocate(BTreeMap<String, String>),
}

impl<'de> Deserialize<'de> for AssetEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(AssetEntryVisitor)
    }
}

struct AssetEntryVisitor;

impl<'de> Visitor<'de> for AssetEntryVisitor {
    type Value = AssetEntry;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a glob string or a single-key {source: dir} mapping")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<AssetEntry, E> {
        Ok(AssetEntry::Glob(value.to_string()))
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<AssetEntry, E> {
        Ok(AssetEntry::Glob(value))
    }

    // Key count is checked by `validate`.
    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<AssetEntry, A::Error> {
        let mut entries = BTreeMap::new();
        while let Some((source, dest)) = map.next_entry::<String, String>()? {
            entries.insert(source, dest);
        }
        Ok(AssetEntry::Relocate(entries))
    }
}

impl AssetEntry {
    /// Glob entry.
    pub fn glob(pattern: impl Into<String>) -> Self {
        Self::Glob(pattern.into())
    }

    /// Relocation entry.
    pub fn relocate(source: impl Into<String>, destination: impl Into<String>) -> Self {
        Self::Relocate(BTreeMap::from([(source.into(), destination.into())]))
    }

    /// True for `!`-prefixed glob entries.
    pub fn is_negated(&self) -> bool {
        matches!(self, Self::Glob(pattern) if pattern.starts_with('!'))
    }

    /// `(source, destination)` of a well-formed relocation entry.
    pub fn relocation(&self) -> Option<(&str, &str)> {
        match self {
            Self::Relocate(map) if map.len() == 1 => map
                .iter()
                .next()
                .map(|(source, dest)| (source.as_str(), dest.as_str())),
            _ => None,
        }
    }
}

/// Per-plugin option records.
///
/// Missing plugins default to empty options. Unrecognized plugin names are
/// kept in `extra` so they survive a load/save cycle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Plugins {
    pub autoprefixer: PluginOptions,

    /// clean-css options.
    #[serde(rename = "minify-css")]
    pub minify_css: PluginOptions,

    /// ES6 -> CommonJS.
    pub babel: PluginOptions,

    /// CommonJS -> browser bundle.
    pub browserify: PluginOptions,

    pub uglify: PluginOptions,

    #[serde(rename = "minify-html")]
    pub minify_html: PluginOptions,

    pub gzip: PluginOptions,

    #[serde(flatten)]
    pub extra: BTreeMap<String, PluginOptions>,
}

impl Plugins {
    /// Names of the plugins this schema knows about, in pipeline order.
    pub const RECOGNIZED: [&'static str; 7] = [
        "autoprefixer",
        "minify-css",
        "babel",
        "browserify",
        "uglify",
        "minify-html",
        "gzip",
    ];

    /// Look up options by plugin name.
    pub fn get(&self, name: &str) -> Option<&PluginOptions> {
        match name {
            "autoprefixer" => Some(&self.autoprefixer),
            "minify-css" => Some(&self.minify_css),
            "babel" => Some(&self.babel),
            "browserify" => Some(&self.browserify),
            "uglify" => Some(&self.uglify),
            "minify-html" => Some(&self.minify_html),
            "gzip" => Some(&self.gzip),
            other => self.extra.get(other),
        }
    }
}

/// Watch-mode parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchConfig {
    /// Poll the file system instead of relying on native events.
    #[serde(rename = "usePolling")]
    pub use_polling: bool,

    pub delay: WatchDelay,

    /// Recompilation triggers. Templates reuse the top-level `templates` globs.
    pub glob: WatchGlobs,
}

/// Delay settings: every interval is `unit * factor`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchDelay {
    /// Milliseconds.
    pub unit: u64,
    pub factor: DelayFactor,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DelayFactor {
    pub poll: f64,
    pub debounce: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchGlobs {
    pub js: String,
    pub css: String,
}

// Built-in base values

pub(crate) fn default_output() -> String {
    "public".to_string()
}

pub(crate) fn default_app() -> String {
    "src/entrypoint.js".to_string()
}

/// Third-party libraries, in load order.
pub fn default_libs() -> Vec<String> {
    [
        "libs/bower_components/detectizr/dist/detectizr.js",
        "libs/bower_components/lodash/lodash.js",
        "libs/bower_components/jquery/dist/jquery.js",
        "libs/vendor/jquery-ui/position.js",
        "libs/bower_components/fastclick/lib/fastclick.js",
        "libs/bower_components/interact/interact.js",
        "libs/bower_components/eventemitter2/lib/eventemitter2.js",
        "libs/bower_components/async/lib/async.js",
        "libs/bower_components/director/build/director.js",
        "libs/bower_components/i18next/i18next.js",
        "libs/bower_components/validator-js/validator.js",
        // view engine deps: template engine, mvvm
        "libs/bower_components/handlebars/handlebars.js",
        "libs/bower_components/kendo-ui-core/src/js/kendo.core.js",
        "libs/bower_components/kendo-ui-core/src/js/kendo.data.js",
        "libs/bower_components/kendo-ui-core/src/js/kendo.binder.js",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

/// Framework scripts, in load order. The view engine comes last.
pub fn default_framework() -> Vec<String> {
    [
        "libs/vendor/stagejsv2/infrastructure.js",
        "libs/vendor/stagejsv2/coop-ee2-async.js",
        "libs/vendor/stagejsv2/utils.js",
        "libs/vendor/stagejsv2/com-ajax-ws-rtc.js",
        "libs/vendor/stagejsv2/i18n-i18next.js",
        "libs/vendor/stagejsv2/validate-validator.js",
        "libs/vendor/stagejsv2/navigation-director.js",
        "libs/vendor/stagejsv2/template-helpers-hbs.js",
        "libs/vendor/stagejsv2/view-engine.js",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

pub(crate) fn default_templates() -> Vec<String> {
    vec!["src/**/*.html".to_string()]
}

pub(crate) fn default_stylesheet() -> String {
    "styles/_base.less".to_string()
}

pub(crate) fn default_assets() -> Vec<AssetEntry> {
    vec![
        AssetEntry::glob("assets/**/*"),
        AssetEntry::glob("!*.empty"),
        AssetEntry::relocate("libs/bower_components/modernizr/modernizr.js", "js"),
    ]
}

fn options<const N: usize>(pairs: [(&str, serde_yaml::Value); N]) -> PluginOptions {
    pairs
        .into_iter()
        .map(|(key, value)| (serde_yaml::Value::from(key), value))
        .collect()
}

pub(crate) fn default_plugins() -> Plugins {
    Plugins {
        // keep special comments only (licenses)
        minify_css: options([("keepSpecialComments", "*".into())]),
        uglify: options([("preserveComments", "some".into())]),
        // conditionals keeps IE conditional comments
        minify_html: options([
            ("empty", true.into()),
            ("conditionals", true.into()),
            ("spare", true.into()),
        ]),
        ..Plugins::default()
    }
}

pub(crate) fn default_watch() -> WatchConfig {
    WatchConfig {
        use_polling: true,
        delay: WatchDelay {
            unit: 300,
            factor: DelayFactor {
                poll: 1.0,
                debounce: 2.0,
            },
        },
        glob: WatchGlobs {
            js: "src/**/*.js".to_string(),
            css: "styles/**/*.less".to_string(),
        },
    }
}
