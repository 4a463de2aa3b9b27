//! CLI argument parsing for pipecfg.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// pipecfg: build configuration for a front-end asset pipeline.
///
/// Loads the base configuration (or a named variant merged over it) and
/// prints the effective config or the plans derived from it:
/// - which assets are copied where
/// - which watch globs trigger which rebuild
/// - which artifacts a build produces
#[derive(Parser, Debug)]
#[command(name = "pipecfg")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Config variant to load, merged over `_base`.
    #[arg(short = 'C', long = "config", global = true, default_value = "_base")]
    pub variant: String,

    /// Directory holding `_base.yaml` and variant documents.
    #[arg(long, global = true, default_value = "config")]
    pub config_dir: PathBuf,

    /// Project root that all configured paths are relative to.
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for pipecfg.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the effective configuration.
    Show(ShowArgs),

    /// Validate the configuration and report missing referenced files.
    ///
    /// Exits with code 3 when any literal path is missing.
    Check,

    /// Print the resolved asset copy plan.
    Assets,

    /// Print watch intervals and rebuild triggers.
    ///
    /// With `--path`, print which rebuilds a change to that path triggers.
    Watch(WatchArgs),

    /// Print the build artifacts and their inputs.
    Targets,

    /// List the config variants available in the config directory.
    Variants,

    /// Write the built-in base config to `<config-dir>/_base.yaml`.
    Init(InitArgs),
}

/// Arguments for the `show` command.
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Output format.
    #[arg(long, default_value = "yaml", value_parser = ["yaml", "json"])]
    pub format: String,
}

/// Arguments for the `watch` command.
#[derive(Parser, Debug)]
pub struct WatchArgs {
    /// Changed paths to test against the watch triggers.
    #[arg(long = "path")]
    pub paths: Vec<String>,
}

/// Arguments for the `init` command.
#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Overwrite an existing `_base.yaml`.
    #[arg(long)]
    pub force: bool,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_debug_assert() {
        // Verifies the CLI arguments configuration is valid
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_defaults() {
        let cli = Cli::try_parse_from(["pipecfg", "check"]).unwrap();
        assert_eq!(cli.variant, "_base");
        assert_eq!(cli.config_dir, PathBuf::from("config"));
        assert_eq!(cli.root, PathBuf::from("."));
        assert!(matches!(cli.command, Command::Check));
    }

    #[test]
    fn parse_short_variant_flag() {
        let cli = Cli::try_parse_from(["pipecfg", "-C", "prod", "assets"]).unwrap();
        assert_eq!(cli.variant, "prod");
        assert!(matches!(cli.command, Command::Assets));
    }

    #[test]
    fn parse_long_variant_flag_after_subcommand() {
        let cli = Cli::try_parse_from(["pipecfg", "targets", "--config", "dev"]).unwrap();
        assert_eq!(cli.variant, "dev");
        assert!(matches!(cli.command, Command::Targets));
    }

    #[test]
    fn parse_show_format() {
        let cli = Cli::try_parse_from(["pipecfg", "show", "--format", "json"]).unwrap();
        if let Command::Show(args) = cli.command {
            assert_eq!(args.format, "json");
        } else {
            panic!("Expected Show command");
        }
    }

    #[test]
    fn parse_show_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["pipecfg", "show", "--format", "toml"]).is_err());
    }

    #[test]
    fn parse_watch_paths() {
        let cli = Cli::try_parse_from([
            "pipecfg",
            "watch",
            "--path",
            "src/app.js",
            "--path",
            "styles/a.less",
        ])
        .unwrap();
        if let Command::Watch(args) = cli.command {
            assert_eq!(args.paths, vec!["src/app.js", "styles/a.less"]);
        } else {
            panic!("Expected Watch command");
        }
    }

    #[test]
    fn parse_init_force() {
        let cli = Cli::try_parse_from(["pipecfg", "init", "--force"]).unwrap();
        if let Command::Init(args) = cli.command {
            assert!(args.force);
        } else {
            panic!("Expected Init command");
        }
    }

    #[test]
    fn parse_paths() {
        let cli = Cli::try_parse_from([
            "pipecfg",
            "--config-dir",
            "build/config",
            "--root",
            "/work/app",
            "variants",
        ])
        .unwrap();
        assert_eq!(cli.config_dir, PathBuf::from("build/config"));
        assert_eq!(cli.root, PathBuf::from("/work/app"));
        assert!(matches!(cli.command, Command::Variants));
    }
}
