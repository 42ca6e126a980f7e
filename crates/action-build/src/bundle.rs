//! Turning one action's entry point into a standalone artifact.
//!
//! [`CargoBundler`] compiles the action package with cargo and copies the
//! resulting binary into the action's `dist/` directory. Actions talk to the
//! runner through environment variables and files only, so the binary has
//! no host-side runtime dependency to leave out.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::config::BuildSettings;
use crate::discover::ActionSource;
use crate::error::{BuildError, Result};
use crate::paths;

/// Produces the artifact for one action. Called from several threads at once.
pub trait Bundler: Send + Sync {
    /// Build `source` and return the path of the artifact written.
    fn bundle(&self, source: &ActionSource) -> Result<PathBuf>;
}

// ---------------------------------------------------------------------------
// CargoBundler
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct CargoBundler {
    cargo: PathBuf,
    root: PathBuf,
    target_dir: PathBuf,
    profile: String,
    target: Option<String>,
}

impl CargoBundler {
    /// Resolve the cargo program (`settings.cargo`, else `cargo` on `PATH`).
    pub fn new(root: &Path, settings: &BuildSettings) -> Result<Self> {
        let cargo = match &settings.cargo {
            Some(p) => p.clone(),
            None => which::which("cargo").map_err(|_| BuildError::CargoNotFound)?,
        };
        Ok(Self {
            cargo,
            root: root.to_path_buf(),
            target_dir: root.join(paths::TARGET_DIR),
            profile: settings.profile.clone(),
            target: settings.target.clone(),
        })
    }

    pub fn cargo(&self) -> &Path {
        &self.cargo
    }

    /// Where cargo leaves the binary for `name`.
    pub fn built_binary(&self, name: &str) -> PathBuf {
        let mut dir = self.target_dir.clone();
        if let Some(target) = &self.target {
            dir.push(target);
        }
        // cargo names the output directory of the built-in `dev` profile "debug"
        dir.push(match self.profile.as_str() {
            "dev" => "debug",
            other => other,
        });
        dir.join(format!(
            "{name}{}",
            paths::exe_suffix(self.target.as_deref())
        ))
    }

    fn command(&self, source: &ActionSource) -> Command {
        let mut cmd = Command::new(&self.cargo);
        cmd.arg("build")
            .arg("--package")
            .arg(&source.name)
            .arg("--bin")
            .arg(&source.name)
            .arg("--profile")
            .arg(&self.profile)
            .arg("--target-dir")
            .arg(&self.target_dir);
        if let Some(target) = &self.target {
            cmd.arg("--target").arg(target);
        }
        cmd.current_dir(&self.root)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());
        cmd
    }
}

impl Bundler for CargoBundler {
    fn bundle(&self, source: &ActionSource) -> Result<PathBuf> {
        let output = self
            .command(source)
            .output()
            .map_err(|e| BuildError::BundleFailed {
                action: source.name.clone(),
                reason: format!("failed to spawn {}: {e}", self.cargo.display()),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(BuildError::BundleFailed {
                action: source.name.clone(),
                reason: format!("{}: {}", output.status, tail(&stderr, 500)),
            });
        }

        let built = self.built_binary(&source.name);
        if !built.is_file() {
            return Err(BuildError::ArtifactMissing {
                action: source.name.clone(),
                path: built,
            });
        }

        if let Some(parent) = source.artifact.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::copy(&built, &source.artifact)?;
        Ok(source.artifact.clone())
    }
}

/// Last `max` characters of `s`, trimmed. Cargo prints the actual error last.
fn tail(s: &str, max: usize) -> &str {
    let s = s.trim();
    match s.char_indices().rev().nth(max.saturating_sub(1)) {
        Some((i, _)) if max > 0 => &s[i..],
        _ => s,
    }
}
