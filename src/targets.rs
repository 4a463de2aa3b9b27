//! Build artifacts described by a config.
//!
//! Non-concatenated scripts are treated as ES modules: `javascript.app` goes
//! through babel (ES6 -> CommonJS) and then browserify (CommonJS -> browser).
//! `libs` and `framework` are concatenated as-is and expose their globals.

use crate::config::BuildConfig;
use crate::watch::RebuildKind;
use serde::Serialize;

/// How a target is produced from its inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    /// Compile ES modules and bundle.
    Bundle,
    /// Concatenate verbatim, in input order.
    Concat,
    /// Aggregate templates into one JSON document.
    Templates,
    /// Compile the stylesheet.
    Stylesheet,
}

/// One artifact of a build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildTarget {
    /// File name of the artifact (`app.js`, `libs.js`, ...).
    pub name: &'static str,
    /// Output path, relative to the project root.
    pub path: String,
    pub kind: TargetKind,
    /// Inputs in declared order; globs for templates.
    pub inputs: Vec<String>,
    /// Plugins applied while producing the artifact, in order.
    pub plugins: Vec<&'static str>,
    /// The watch rebuild that re-processes this target, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rebuilt_by: Option<&'static str>,
}

/// Describe every artifact the build produces, in build order.
pub fn build_targets(config: &BuildConfig) -> Vec<BuildTarget> {
    let output = config.output.trim_end_matches('/');
    let path = |name: &str| format!("{}/{}", output, name);
    let js = &config.javascript;

    vec![
        BuildTarget {
            name: "app.js",
            path: path("app.js"),
            kind: TargetKind::Bundle,
            inputs: vec![js.app.clone()],
            plugins: vec!["babel", "browserify", "uglify", "gzip"],
            rebuilt_by: Some(RebuildKind::Javascript.as_str()),
        },
        BuildTarget {
            name: "libs.js",
            path: path("libs.js"),
            kind: TargetKind::Concat,
            inputs: js.libs.clone(),
            plugins: vec!["uglify", "gzip"],
            rebuilt_by: None,
        },
        BuildTarget {
            name: "framework.js",
            path: path("framework.js"),
            kind: TargetKind::Concat,
            inputs: js.framework.clone(),
            plugins: vec!["uglify", "gzip"],
            rebuilt_by: None,
        },
        BuildTarget {
            name: "templates.json",
            path: path("templates.json"),
            kind: TargetKind::Templates,
            inputs: config.templates.clone(),
            plugins: vec!["minify-html", "gzip"],
            rebuilt_by: Some(RebuildKind::Templates.as_str()),
        },
        BuildTarget {
            name: "app.css",
            path: path("app.css"),
            kind: TargetKind::Stylesheet,
            inputs: vec![config.stylesheet.clone()],
            plugins: vec!["autoprefixer", "minify-css", "gzip"],
            rebuilt_by: Some(RebuildKind::Stylesheet.as_str()),
        },
    ]
}
