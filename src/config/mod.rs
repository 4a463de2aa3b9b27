//! Build configuration model.
//!
//! This module defines [`BuildConfig`], the typed record consumed by the
//! asset pipeline, together with loading, validation, serialization and the
//! deep-merge override mechanism used by configuration variants.

mod merge;
mod model;
mod operations;
pub mod types;


// Re-export public API
pub use merge::deep_merge;
pub use model::BuildConfig;
pub use operations::read_document;
pub use types::{
    AssetEntry, ConfigFormat, DelayFactor, JavascriptConfig, PluginOptions, Plugins, WatchConfig,
    WatchDelay, WatchGlobs,
};
