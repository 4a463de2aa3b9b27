//! Atomic file writes.
//!
//! Content is written to `.{filename}.tmp` in the target's directory, synced,
//! and renamed over the target, so a reader never sees a partial config.

use crate::error::{PipecfgError, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Atomically write a string to a file, creating parent directories.
pub fn atomic_write_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent).map_err(|e| {
            PipecfgError::UserError(format!(
                "failed to create directory '{}': {}",
                parent.display(),
                e
            ))
        })?;
    }

    let temp_path = temp_path_for(path)?;
    write_and_sync(&temp_path, content.as_bytes())?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        PipecfgError::UserError(format!(
            "failed to atomically replace '{}': {}",
            path.display(),
            e
        ))
    })
}

fn temp_path_for(target: &Path) -> Result<PathBuf> {
    let parent = target.parent().unwrap_or(Path::new("."));
    let filename = target
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| {
            PipecfgError::UserError(format!("invalid file path '{}'", target.display()))
        })?;

    Ok(parent.join(format!(".{}.tmp", filename)))
}

fn write_and_sync(path: &Path, content: &[u8]) -> Result<()> {
    let mut file = File::create(path).map_err(|e| {
        PipecfgError::UserError(format!(
            "failed to create temporary file '{}': {}",
            path.display(),
            e
        ))
    })?;

    file.write_all(content)
        .and_then(|()| file.sync_all())
        .map_err(|e| {
            let _ = fs::remove_file(path);
            PipecfgError::UserError(format!("failed to write temporary file: {}", e))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn writes_new_file_and_parents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config").join("_base.yaml");

        atomic_write_file(&path, "output: public\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "output: public\n");
    }

    #[test]
    fn replaces_existing_file_without_leftovers() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("_base.yaml");
        fs::write(&path, "old").unwrap();

        atomic_write_file(&path, "new").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
        assert!(!dir.path().join("._base.yaml.tmp").exists());
    }

    #[test]
    fn temp_path_is_hidden_sibling() {
        let temp = temp_path_for(Path::new("/some/config/_base.yaml")).unwrap();
        assert_eq!(temp, PathBuf::from("/some/config/._base.yaml.tmp"));
    }
}
