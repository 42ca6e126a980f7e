use crate::error::{BuildError, Result};
use crate::paths;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// BuildSettings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildSettings {
    /// Cargo profile used for bundles.
    #[serde(default = "default_profile")]
    pub profile: String,
    /// Target triple; the host target when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    /// Cargo program; looked up on `PATH` when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cargo: Option<PathBuf>,
}

fn default_profile() -> String {
    "release".to_string()
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            profile: default_profile(),
            target: None,
            cargo: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Contents of `actions.yaml`. Every field is optional; a repository without
/// the file builds with the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_actions_dir")]
    pub actions_dir: PathBuf,
    /// Build only these actions instead of discovering them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actions: Option<Vec<String>>,
    #[serde(default)]
    pub build: BuildSettings,
}

fn default_actions_dir() -> PathBuf {
    PathBuf::from(paths::ACTIONS_DIR)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            actions_dir: default_actions_dir(),
            actions: None,
            build: BuildSettings::default(),
        }
    }
}

impl Config {
    /// Load `actions.yaml` from `root`, or the defaults if it does not exist.
    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        let cfg: Config = serde_yaml::from_str(&data)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.build.profile.trim().is_empty() {
            return Err(BuildError::InvalidConfig(
                "build.profile must not be empty".to_string(),
            ));
        }
        if let Some(actions) = &self.actions {
            for name in actions {
                paths::validate_action_name(name)?;
            }
        }
        Ok(())
    }

    /// The actions directory, resolved against `root` when relative.
    pub fn actions_dir(&self, root: &Path) -> PathBuf {
        if self.actions_dir.is_absolute() {
            self.actions_dir.clone()
        } else {
            root.join(&self.actions_dir)
        }
    }
}
