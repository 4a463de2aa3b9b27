//! Asset copy planning.
//!
//! Resolves the `assets` list against a project root into concrete
//! `source -> destination` copies. Nothing is copied here; the plan is what
//! the external build tool would do with the same configuration.
//!
//! Rules:
//! - a glob entry copies every matching file to `<output>/<path below the
//!   glob's literal base>`
//! - a `!` entry removes its matches from every positive glob declared
//!   before it (later globs and relocations are unaffected)
//! - a relocation `{source: dir}` copies to `<output>/<dir>/...` keeping the
//!   file name; a directory source copies its contents
//! - when two copies land on the same destination the later entry wins

use crate::config::{AssetEntry, BuildConfig};
use crate::error::Result;
use crate::glob::{compile_glob, is_glob, literal_base, normalize_path, split_negation, walk_files};
use globset::GlobMatcher;
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, warn};

/// A single planned copy. Paths are project-root-relative with `/` separators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetCopy {
    pub source: String,
    pub destination: String,
    /// Index of the `assets` entry that produced this copy.
    pub entry: usize,
}

/// Result of resolving the `assets` list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetPlan {
    pub copies: Vec<AssetCopy>,
    /// Literal relocation sources that do not exist.
    pub skipped: Vec<String>,
}

impl AssetPlan {
    /// Destinations in plan order.
    pub fn destinations(&self) -> Vec<&str> {
        self.copies.iter().map(|c| c.destination.as_str()).collect()
    }
}

/// Resolve the configured assets against `root`.
pub fn plan_assets(config: &BuildConfig, root: &Path) -> Result<AssetPlan> {
    let output = normalize_dir(&config.output);
    let negations = compile_negations(&config.assets)?;

    let mut plan = AssetPlan::default();

    for (index, entry) in config.assets.iter().enumerate() {
        let key = format!("assets[{}]", index);
        match entry {
            AssetEntry::Glob(pattern) => {
                let (negated, body) = split_negation(pattern);
                if negated {
                    continue;
                }
                let exclusions: Vec<&GlobMatcher> = negations
                    .iter()
                    .filter(|(at, _)| *at > index)
                    .map(|(_, matcher)| matcher)
                    .collect();
                let before = plan.copies.len();
                expand_glob(root, body, &key, &exclusions, &output, index, &mut plan)?;
                debug!(
                    entry = index,
                    pattern = body,
                    files = plan.copies.len() - before,
                    "expanded asset glob"
                );
            }
            AssetEntry::Relocate(_) => {
                if let Some((source, dir)) = entry.relocation() {
                    let destination_dir = join(&[output.as_str(), normalize_dir(dir).as_str()]);
                    relocate(root, source, &key, &destination_dir, index, &mut plan)?;
                }
            }
        }
    }

    plan.copies = last_copy_wins(plan.copies);
    Ok(plan)
}

fn compile_negations(assets: &[AssetEntry]) -> Result<Vec<(usize, GlobMatcher)>> {
    let mut negations = Vec::new();
    for (index, entry) in assets.iter().enumerate() {
        if let AssetEntry::Glob(pattern) = entry {
            let (negated, body) = split_negation(pattern);
            if negated {
                negations.push((index, compile_glob(body, &format!("assets[{}]", index))?));
            }
        }
    }
    Ok(negations)
}

fn expand_glob(
    root: &Path,
    pattern: &str,
    key: &str,
    exclusions: &[&GlobMatcher],
    destination_dir: &str,
    entry: usize,
    plan: &mut AssetPlan,
) -> Result<()> {
    let matcher = compile_glob(pattern, key)?;
    let base = literal_base(pattern);

    for file in walk_files(root, &base)? {
        if !matcher.is_match(&file) || exclusions.iter().any(|ex| ex.is_match(&file)) {
            continue;
        }
        plan.copies.push(AssetCopy {
            destination: join(&[destination_dir, strip_base(&file, &base)]),
            source: file,
            entry,
        });
    }

    Ok(())
}

fn relocate(
    root: &Path,
    source: &str,
    key: &str,
    destination_dir: &str,
    entry: usize,
    plan: &mut AssetPlan,
) -> Result<()> {
    let source = normalize_dir(source);

    if is_glob(&source) {
        return expand_glob(root, &source, key, &[], destination_dir, entry, plan);
    }

    let full = root.join(&source);
    if full.is_dir() {
        for file in walk_files(root, &source)? {
            plan.copies.push(AssetCopy {
                destination: join(&[destination_dir, strip_base(&file, &source)]),
                source: file,
                entry,
            });
        }
    } else if full.is_file() {
        let file_name = source.rsplit('/').next().unwrap_or(&source).to_string();
        plan.copies.push(AssetCopy {
            destination: join(&[destination_dir, file_name.as_str()]),
            source,
            entry,
        });
    } else {
        warn!(entry, source = %source, "asset source does not exist, skipping");
        plan.skipped.push(source);
    }

    Ok(())
}

fn last_copy_wins(copies: Vec<AssetCopy>) -> Vec<AssetCopy> {
    let mut seen = HashSet::new();
    let mut kept: Vec<AssetCopy> = copies
        .into_iter()
        .rev()
        .filter(|copy| seen.insert(copy.destination.clone()))
        .collect();
    kept.reverse();
    kept
}

fn normalize_dir(path: &str) -> String {
    normalize_path(path).trim_end_matches('/').to_string()
}

fn strip_base<'a>(file: &'a str, base: &str) -> &'a str {
    if base.is_empty() {
        return file;
    }
    file.strip_prefix(base)
        .map(|rest| rest.trim_start_matches('/'))
        .unwrap_or(file)
}

fn join(parts: &[&str]) -> String {
    parts
        .iter()
        .filter(|p| !p.is_empty() && **p != ".")
        .copied()
        .collect::<Vec<_>>()
        .join("/")
}
