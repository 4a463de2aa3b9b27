//! Watch-mode plan.
//!
//! Turns the `watch` section into concrete intervals and a set of triggers
//! telling the watcher which rebuild a changed path requires. Only the app
//! bundle, the stylesheet and the templates are ever rebuilt while watching;
//! the concatenated `libs.js` and `framework.js` targets are not.

use crate::config::BuildConfig;
use crate::error::Result;
use crate::glob::{compile_glob, normalize_path};
use globset::GlobMatcher;
use std::fmt;
use std::time::Duration;

/// What a watch trigger rebuilds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RebuildKind {
    /// Recompile and bundle `javascript.app`.
    Javascript,
    /// Recompile the stylesheet.
    Stylesheet,
    /// Re-aggregate `templates.json`.
    Templates,
}

impl RebuildKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RebuildKind::Javascript => "js",
            RebuildKind::Stylesheet => "css",
            RebuildKind::Templates => "templates",
        }
    }
}

impl fmt::Display for RebuildKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One glob that triggers a rebuild.
#[derive(Debug, Clone)]
pub struct WatchTrigger {
    pub kind: RebuildKind,
    pub pattern: String,
    matcher: GlobMatcher,
}

impl WatchTrigger {
    pub fn is_match(&self, path: &str) -> bool {
        self.matcher.is_match(normalize_path(path))
    }
}

/// Resolved watch parameters.
#[derive(Debug, Clone)]
pub struct WatchPlan {
    pub use_polling: bool,
    /// `delay.unit * delay.factor.poll`.
    pub poll_interval: Duration,
    /// `delay.unit * delay.factor.debounce`.
    pub debounce: Duration,
    pub triggers: Vec<WatchTrigger>,
}

impl WatchPlan {
    pub fn from_config(config: &BuildConfig) -> Result<Self> {
        let watch = &config.watch;
        let unit = watch.delay.unit as f64;

        let mut triggers = vec![
            trigger(RebuildKind::Javascript, &watch.glob.js, "watch.glob.js")?,
            trigger(RebuildKind::Stylesheet, &watch.glob.css, "watch.glob.css")?,
        ];
        for (i, pattern) in config.templates.iter().enumerate() {
            triggers.push(trigger(
                RebuildKind::Templates,
                pattern,
                &format!("templates[{}]", i),
            )?);
        }

        Ok(Self {
            use_polling: watch.use_polling,
            poll_interval: millis(unit * watch.delay.factor.poll),
            debounce: millis(unit * watch.delay.factor.debounce),
            triggers,
        })
    }

    /// Rebuilds triggered by a change to `path`, deduplicated, in trigger order.
    pub fn rebuilds_for(&self, path: &str) -> Vec<RebuildKind> {
        let mut kinds = Vec::new();
        for trigger in &self.triggers {
            if trigger.is_match(path) && !kinds.contains(&trigger.kind) {
                kinds.push(trigger.kind);
            }
        }
        kinds
    }
}

fn trigger(kind: RebuildKind, pattern: &str, key: &str) -> Result<WatchTrigger> {
    Ok(WatchTrigger {
        kind,
        pattern: pattern.to_string(),
        matcher: compile_glob(pattern, key)?,
    })
}

fn millis(ms: f64) -> Duration {
    Duration::from_nanos((ms.max(0.0) * 1_000_000.0).round() as u64)
}
