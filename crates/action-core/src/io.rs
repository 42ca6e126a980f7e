use crate::error::{ActionError, Result};
use std::io::Write;
use std::path::Path;

/// Append one message to a runner file command (e.g. the file named by
/// `GITHUB_OUTPUT`). The runner creates the file before the step starts,
/// so a missing file is an error rather than something to create.
pub fn append_file_command(path: &Path, message: &str) -> Result<()> {
    if !path.exists() {
        return Err(ActionError::MissingFileCommand(path.to_path_buf()));
    }
    let mut f = std::fs::OpenOptions::new().append(true).open(path)?;
    writeln!(f, "{message}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn appends_with_newline() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("output");
        std::fs::write(&path, "existing\n").unwrap();
        append_file_command(&path, "a<<d\n1\nd").unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "existing\na<<d\n1\nd\n"
        );
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope");
        let err = append_file_command(&path, "x").unwrap_err();
        assert!(err.to_string().starts_with("Missing file at path:"));
        assert!(!path.exists());
    }
}
