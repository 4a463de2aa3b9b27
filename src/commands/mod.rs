//! Command implementations for pipecfg.
//!
//! Every command except `init` and `variants` first loads the selected
//! variant; a config that fails to load or validate aborts the command.
//! Reports are rendered to strings so they can be checked without a terminal.

mod init;

use crate::cli::{Cli, Command, ShowArgs, WatchArgs};
use pipecfg::assets::{AssetPlan, plan_assets};
use pipecfg::config::{BuildConfig, ConfigFormat};
use pipecfg::error::{PipecfgError, Result};
use pipecfg::references::{MissingReference, missing_references};
use pipecfg::targets::{BuildTarget, build_targets};
use pipecfg::variants::ConfigDir;
use pipecfg::watch::WatchPlan;
use std::path::Path;
use tracing::debug;

/// Dispatch a command to its implementation.
pub fn dispatch(cli: Cli) -> Result<()> {
    let config_dir = ConfigDir::new(&cli.config_dir);

    match cli.command {
        Command::Init(args) => init::cmd_init(&config_dir, args.force),
        Command::Variants => cmd_variants(&config_dir),
        Command::Show(args) => cmd_show(&load_selected(&config_dir, &cli.variant)?, &args),
        Command::Check => cmd_check(
            &load_selected(&config_dir, &cli.variant)?,
            &cli.variant,
            &cli.root,
        ),
        Command::Assets => cmd_assets(&load_selected(&config_dir, &cli.variant)?, &cli.root),
        Command::Watch(args) => cmd_watch(&load_selected(&config_dir, &cli.variant)?, &args),
        Command::Targets => {
            let config = load_selected(&config_dir, &cli.variant)?;
            print!("{}", render_targets(&build_targets(&config)));
            Ok(())
        }
    }
}

fn load_selected(config_dir: &ConfigDir, variant: &str) -> Result<BuildConfig> {
    let config = config_dir.load_variant(variant)?;
    debug!(variant, "config loaded");
    Ok(config)
}

fn cmd_show(config: &BuildConfig, args: &ShowArgs) -> Result<()> {
    let format = ConfigFormat::from_str(&args.format).ok_or_else(|| {
        PipecfgError::UserError(format!("unknown output format '{}'", args.format))
    })?;
    let rendered = config.render(format)?;
    println!("{}", rendered.trim_end());
    Ok(())
}

fn cmd_check(config: &BuildConfig, variant: &str, root: &Path) -> Result<()> {
    let missing = missing_references(config, root);
    print!("{}", render_check(variant, &missing));

    if missing.is_empty() {
        Ok(())
    } else {
        Err(PipecfgError::MissingReferences(format!(
            "{} configured path(s) not found under '{}'",
            missing.len(),
            root.display()
        )))
    }
}

fn cmd_assets(config: &BuildConfig, root: &Path) -> Result<()> {
    let plan = plan_assets(config, root)?;
    print!("{}", render_assets(&plan));
    Ok(())
}

fn cmd_watch(config: &BuildConfig, args: &WatchArgs) -> Result<()> {
    let plan = WatchPlan::from_config(config)?;
    print!("{}", render_watch(&plan, &args.paths));
    Ok(())
}

fn cmd_variants(config_dir: &ConfigDir) -> Result<()> {
    let names = config_dir.variant_names()?;
    if names.is_empty() {
        println!("No variants in '{}'.", config_dir.path().display());
    }
    for name in names {
        println!("{}", name);
    }
    Ok(())
}

// ============================================================================
// Rendering
// ============================================================================

fn render_check(variant: &str, missing: &[MissingReference]) -> String {
    let mut out = format!("Configuration '{}' is valid.\n", variant);

    if missing.is_empty() {
        out.push_str("All referenced files exist.\n");
        return out;
    }

    out.push_str(&format!("\n{} referenced file(s) missing:\n", missing.len()));
    for reference in missing {
        out.push_str(&format!("  x {}  ({})\n", reference.path, reference.key));
    }
    out
}

fn render_assets(plan: &AssetPlan) -> String {
    let mut out = String::new();

    for copy in &plan.copies {
        out.push_str(&format!("{} -> {}\n", copy.source, copy.destination));
    }
    for source in &plan.skipped {
        out.push_str(&format!("skipped (missing): {}\n", source));
    }
    out.push_str(&format!(
        "\n{} file(s) to copy, {} skipped\n",
        plan.copies.len(),
        plan.skipped.len()
    ));
    out
}

fn render_watch(plan: &WatchPlan, paths: &[String]) -> String {
    let mut out = String::new();

    if !paths.is_empty() {
        for path in paths {
            let kinds: Vec<&str> = plan.rebuilds_for(path).iter().map(|k| k.as_str()).collect();
            if kinds.is_empty() {
                out.push_str(&format!("{}: no rebuild\n", path));
            } else {
                out.push_str(&format!("{}: {}\n", path, kinds.join(", ")));
            }
        }
        return out;
    }

    out.push_str(&format!(
        "polling:       {}\n",
        if plan.use_polling { "yes" } else { "no" }
    ));
    out.push_str(&format!("poll interval: {}ms\n", plan.poll_interval.as_millis()));
    out.push_str(&format!("debounce:      {}ms\n", plan.debounce.as_millis()));
    out.push_str("triggers:\n");
    for trigger in &plan.triggers {
        out.push_str(&format!("  {:<10} {}\n", trigger.kind.as_str(), trigger.pattern));
    }
    out
}

fn render_targets(targets: &[BuildTarget]) -> String {
    let mut out = String::new();

    for target in targets {
        let watch = target.rebuilt_by.unwrap_or("not watched");
        out.push_str(&format!(
            "{}  [{:?}; plugins: {}; watch: {}]\n",
            target.path,
            target.kind,
            target.plugins.join(", "),
            watch
        ));
        for input in &target.inputs {
            out.push_str(&format!("    {}\n", input));
        }
    }
    out
}
