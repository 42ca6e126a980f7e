use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Action source file not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    #[error("invalid action name '{0}': must be lowercase alphanumeric with hyphens")]
    InvalidActionName(String),

    #[error("actions directory not found: {}", .0.display())]
    ActionsDirNotFound(PathBuf),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("cargo not found: install a Rust toolchain or set build.cargo in actions.yaml")]
    CargoNotFound,

    #[error("bundling {action} failed: {reason}")]
    BundleFailed { action: String, reason: String },

    #[error("bundling {action} produced no binary at {}", path.display())]
    ArtifactMissing { action: String, path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, BuildError>;
