use crate::error::{BuildError, Result};
use regex::Regex;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// Layout constants
// ---------------------------------------------------------------------------

pub const ACTIONS_DIR: &str = "actions";
pub const SRC_DIR: &str = "src";
pub const DIST_DIR: &str = "dist";
pub const CONFIG_FILE: &str = "actions.yaml";
pub const MANIFEST_FILE: &str = "action.yml";
pub const TARGET_DIR: &str = "target";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn action_dir(actions_dir: &Path, name: &str) -> PathBuf {
    actions_dir.join(name)
}

/// `<actions_dir>/<name>/src/<name>.rs`
pub fn entry_path(actions_dir: &Path, name: &str) -> PathBuf {
    action_dir(actions_dir, name)
        .join(SRC_DIR)
        .join(format!("{name}.rs"))
}

pub fn manifest_path(actions_dir: &Path, name: &str) -> PathBuf {
    action_dir(actions_dir, name).join(MANIFEST_FILE)
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

/// Artifact path for an entry point: the `src` directory becomes `dist` and
/// the source extension is replaced by `exe_suffix`.
///
/// `actions/hello-world/src/hello-world.rs` → `actions/hello-world/dist/hello-world`
pub fn dist_path_for(entry: &Path, exe_suffix: &str) -> PathBuf {
    let stem = entry
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let src_dir = entry.parent().unwrap_or(Path::new(""));
    let base = if src_dir.file_name() == Some(OsStr::new(SRC_DIR)) {
        src_dir.parent().unwrap_or(Path::new("")).join(DIST_DIR)
    } else {
        src_dir.join(DIST_DIR)
    };
    base.join(format!("{stem}{exe_suffix}"))
}

/// Executable suffix for binaries built for `target` (the host when `None`).
pub fn exe_suffix(target: Option<&str>) -> &'static str {
    match target {
        Some(t) if t.contains("windows") => ".exe",
        Some(_) => "",
        None => std::env::consts::EXE_SUFFIX,
    }
}

// ---------------------------------------------------------------------------
// Name validation
// ---------------------------------------------------------------------------

static NAME_RE: OnceLock<Regex> = OnceLock::new();

fn name_re() -> &'static Regex {
    NAME_RE.get_or_init(|| Regex::new(r"^[a-z0-9][a-z0-9\-]*[a-z0-9]$|^[a-z0-9]$").unwrap())
}

/// Action names double as cargo package and binary names.
pub fn validate_action_name(name: &str) -> Result<()> {
    if name.is_empty() || name.len() > 64 || !name_re().is_match(name) {
        return Err(BuildError::InvalidActionName(name.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_names() {
        for name in ["hello-world", "a", "goodbye-world-2", "x1"] {
            validate_action_name(name).unwrap_or_else(|_| panic!("expected valid: {name}"));
        }
    }

    #[test]
    fn invalid_names() {
        for name in ["", "-lead", "trail-", "has space", "Upper", "a_b", "../up"] {
            assert!(validate_action_name(name).is_err(), "expected invalid: {name}");
        }
    }

    #[test]
    fn entry_and_manifest_paths() {
        let actions = Path::new("/repo/actions");
        assert_eq!(
            entry_path(actions, "hello-world"),
            PathBuf::from("/repo/actions/hello-world/src/hello-world.rs")
        );
        assert_eq!(
            manifest_path(actions, "hello-world"),
            PathBuf::from("/repo/actions/hello-world/action.yml")
        );
    }

    #[test]
    fn dist_path_swaps_src_for_dist() {
        let entry = Path::new("actions/goodbye-world/src/goodbye-world.rs");
        assert_eq!(
            dist_path_for(entry, ""),
            PathBuf::from("actions/goodbye-world/dist/goodbye-world")
        );
        assert_eq!(
            dist_path_for(entry, ".exe"),
            PathBuf::from("actions/goodbye-world/dist/goodbye-world.exe")
        );
    }

    #[test]
    fn dist_path_without_src_dir() {
        let entry = Path::new("tools/one.rs");
        assert_eq!(dist_path_for(entry, ""), PathBuf::from("tools/dist/one"));
    }

    #[test]
    fn exe_suffix_follows_target() {
        assert_eq!(exe_suffix(Some("x86_64-pc-windows-msvc")), ".exe");
        assert_eq!(exe_suffix(Some("x86_64-unknown-linux-musl")), "");
        assert_eq!(exe_suffix(None), std::env::consts::EXE_SUFFIX);
    }
}
