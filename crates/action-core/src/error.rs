use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ActionError {
    #[error("Input required and not supplied: {0}")]
    InputRequired(String),

    #[error("Missing file at path: {}", .0.display())]
    MissingFileCommand(PathBuf),

    #[error("Unexpected input: {field} should not contain the delimiter \"{delimiter}\"")]
    DelimiterCollision { field: String, delimiter: String },

    #[error("{0}")]
    Failed(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ActionError {
    /// Build an error that carries only a message.
    pub fn msg(message: impl Into<String>) -> Self {
        ActionError::Failed(message.into())
    }
}

pub type Result<T> = std::result::Result<T, ActionError>;
