//! Locates action entry points by directory convention.
//!
//! An action lives in `<actions_dir>/<name>/` and its entry point is
//! `src/<name>.rs`. Directories without that file (docker or composite
//! actions) are not bundled.

use crate::error::{BuildError, Result};
use crate::paths;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionSource {
    pub name: String,
    pub entry: PathBuf,
    pub artifact: PathBuf,
}

impl ActionSource {
    pub fn new(actions_dir: &Path, name: &str, exe_suffix: &str) -> Self {
        let entry = paths::entry_path(actions_dir, name);
        Self {
            name: name.to_string(),
            artifact: paths::dist_path_for(&entry, exe_suffix),
            entry,
        }
    }
}

/// Find the actions to build, sorted by name.
///
/// With `names`, exactly those actions are returned and each must have its
/// entry point. Without, every directory that has one is returned.
pub fn discover(
    actions_dir: &Path,
    names: Option<&[String]>,
    exe_suffix: &str,
) -> Result<Vec<ActionSource>> {
    let mut sources = match names {
        Some(names) => explicit(actions_dir, names, exe_suffix)?,
        None => scan(actions_dir, exe_suffix)?,
    };
    sources.sort_by(|a, b| a.name.cmp(&b.name));
    sources.dedup_by(|a, b| a.name == b.name);
    Ok(sources)
}

fn explicit(actions_dir: &Path, names: &[String], exe_suffix: &str) -> Result<Vec<ActionSource>> {
    names
        .iter()
        .map(|name| {
            paths::validate_action_name(name)?;
            let source = ActionSource::new(actions_dir, name, exe_suffix);
            if !source.entry.is_file() {
                return Err(BuildError::SourceNotFound(source.entry));
            }
            Ok(source)
        })
        .collect()
}

fn scan(actions_dir: &Path, exe_suffix: &str) -> Result<Vec<ActionSource>> {
    if !actions_dir.is_dir() {
        return Err(BuildError::ActionsDirNotFound(actions_dir.to_path_buf()));
    }

    let mut sources = Vec::new();
    for entry in std::fs::read_dir(actions_dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
            continue;
        };
        if paths::validate_action_name(&name).is_err() {
            tracing::debug!(dir = %entry.path().display(), "skipping: not an action name");
            continue;
        }
        let source = ActionSource::new(actions_dir, &name, exe_suffix);
        if !source.entry.is_file() {
            tracing::debug!(action = %name, "skipping: no {name}.rs entry point");
            continue;
        }
        tracing::debug!(action = %name, entry = %source.entry.display(), "discovered action");
        sources.push(source);
    }
    Ok(sources)
}
