//! pipecfg: typed build configuration for a front-end asset pipeline.
//!
//! The configuration names the output directory, the scripts to bundle and
//! concatenate, templates, the stylesheet, static assets, plugin options and
//! watch-mode parameters. Named variants are partial documents deep-merged
//! over the base. Everything downstream of [`config::BuildConfig`] is a
//! read-only plan: nothing here runs a build.

pub mod assets;
pub mod config;
pub mod error;
pub mod exit_codes;
pub mod fs;
pub mod glob;
pub mod references;
pub mod targets;
pub mod variants;
pub mod watch;
