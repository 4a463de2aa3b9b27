//! Glob helpers shared by validation and the planners.
//!
//! All patterns are matched against project-root-relative paths that use
//! forward slashes. Matching follows `globset` defaults, so `*` also matches
//! path separators (`*.empty` matches `assets/img/.empty`).

use crate::error::{PipecfgError, Result};
use globset::{Glob, GlobMatcher};
use std::fs;
use std::path::Path;

const GLOB_META: &[char] = &['*', '?', '[', '{'];

/// Normalize a configured path: forward slashes, no leading `./`.
pub fn normalize_path(path: &str) -> String {
    let normalized = path.replace('\\', "/");
    match normalized.strip_prefix("./") {
        Some(rest) => rest.to_string(),
        None => normalized,
    }
}

/// Whether a pattern contains glob metacharacters.
pub fn is_glob(pattern: &str) -> bool {
    pattern.contains(GLOB_META)
}

/// Split a leading `!` off a pattern. Returns `(negated, pattern)`.
pub fn split_negation(pattern: &str) -> (bool, &str) {
    match pattern.strip_prefix('!') {
        Some(rest) => (true, rest),
        None => (false, pattern),
    }
}

/// The directory prefix of a glob that contains no metacharacters.
///
/// `assets/**/*` -> `assets`, `*.empty` -> ``, `src/app/*.js` -> `src/app`.
pub fn literal_base(pattern: &str) -> String {
    let normalized = normalize_path(pattern);
    let components: Vec<&str> = normalized.split('/').collect();
    let literal: Vec<&str> = components
        .iter()
        .take_while(|c| !is_glob(c))
        .copied()
        .collect();

    if literal.len() == components.len() {
        // No metacharacters at all: the pattern names a file, its parent is the base.
        return match normalized.rsplit_once('/') {
            Some((parent, _)) => parent.to_string(),
            None => String::new(),
        };
    }

    literal.join("/")
}

/// Compile a single glob, naming the config key in the error.
pub fn compile_glob(pattern: &str, field_name: &str) -> Result<GlobMatcher> {
    let normalized = normalize_path(pattern);
    Glob::new(&normalized)
        .map(|glob| glob.compile_matcher())
        .map_err(|e| {
            PipecfgError::GlobError(format!("{}: '{}' - {}", field_name, pattern, e))
        })
}

/// List every file below `root/base`, as sorted root-relative paths.
///
/// A missing base directory yields an empty list.
pub fn walk_files(root: &Path, base: &str) -> Result<Vec<String>> {
    let start = if base.is_empty() {
        root.to_path_buf()
    } else {
        root.join(base)
    };

    let mut files = Vec::new();
    if start.is_dir() {
        walk_dir(&start, base, &mut files)?;
    }
    files.sort();
    Ok(files)
}

fn walk_dir(dir: &Path, relative: &str, files: &mut Vec<String>) -> Result<()> {
    let entries = fs::read_dir(dir).map_err(|e| {
        PipecfgError::UserError(format!(
            "failed to read directory '{}': {}",
            dir.display(),
            e
        ))
    })?;

    for entry in entries {
        let entry = entry.map_err(|e| {
            PipecfgError::UserError(format!(
                "failed to read directory entry in '{}': {}",
                dir.display(),
                e
            ))
        })?;
        let name = entry.file_name().to_string_lossy().to_string();
        let child = if relative.is_empty() {
            name
        } else {
            format!("{}/{}", relative, name)
        };

        let file_type = entry.file_type().map_err(|e| {
            PipecfgError::UserError(format!(
                "failed to stat '{}': {}",
                entry.path().display(),
                e
            ))
        })?;

        if file_type.is_dir() {
            walk_dir(&entry.path(), &child, files)?;
        } else if entry.path().is_file() {
            files.push(child);
        }
    }

    Ok(())
}
