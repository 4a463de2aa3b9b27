//! Implementation of the `pipecfg init` command.
//!
//! Writes the built-in base configuration to `<config-dir>/_base.yaml` so a
//! project starts from an explicit, editable base. Variants are then added
//! next to it as partial documents.

use pipecfg::config::BuildConfig;
use pipecfg::error::{PipecfgError, Result};
use pipecfg::fs::atomic_write_file;
use pipecfg::variants::ConfigDir;
use std::path::PathBuf;
use tracing::info;

/// Execute the `pipecfg init` command.
pub fn cmd_init(config_dir: &ConfigDir, force: bool) -> Result<()> {
    let path = write_base(config_dir, force)?;

    println!("Initialized pipecfg configuration.");
    println!();
    println!("Base config: {}", path.display());
    println!();
    println!(
        "Add variants as `{}/<name>.yaml`; they are merged over the base.",
        config_dir.path().display()
    );
    Ok(())
}

/// Write the built-in base to the config directory, returning its path.
fn write_base(config_dir: &ConfigDir, force: bool) -> Result<PathBuf> {
    let path = config_dir.base_path();

    if path.exists() && !force {
        return Err(PipecfgError::UserError(format!(
            "'{}' already exists (use --force to overwrite)",
            path.display()
        )));
    }

    atomic_write_file(&path, &BuildConfig::base().to_yaml()?)?;
    info!(path = %path.display(), "wrote base config");
    Ok(path)
}
