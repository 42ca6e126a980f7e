//! The host toolkit: how an action reads inputs and reports results.
//!
//! [`Toolkit`] is the seam between action logic and the runner. The
//! production implementation, [`EnvToolkit`], speaks the runner's
//! environment protocol:
//!
//! - inputs arrive as `INPUT_<NAME>` environment variables
//! - outputs are appended to the file named by `GITHUB_OUTPUT`, or issued as
//!   a legacy `::set-output` command on stdout when that variable is unset
//! - failure is an `::error::` command plus a non-zero exit code

use std::collections::HashMap;
use std::ffi::OsString;
use std::io::Write;
use std::path::PathBuf;

use crate::command;
use crate::error::{ActionError, Result};
use crate::io::append_file_command;

pub const OUTPUT_FILE_VAR: &str = "GITHUB_OUTPUT";
pub const RUNNER_DEBUG_VAR: &str = "RUNNER_DEBUG";

/// Options for [`Toolkit::get_input`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputOptions {
    /// Fail with [`ActionError::InputRequired`] when the input is missing or empty.
    pub required: bool,
    pub trim_whitespace: bool,
}

impl Default for InputOptions {
    fn default() -> Self {
        Self {
            required: false,
            trim_whitespace: true,
        }
    }
}

impl InputOptions {
    pub fn required() -> Self {
        Self {
            required: true,
            ..Self::default()
        }
    }
}

pub trait Toolkit {
    fn get_input(&self, name: &str, options: InputOptions) -> Result<String>;

    fn set_output(&mut self, name: &str, value: &str) -> Result<()>;

    /// Report the invocation as failed. Sets the process exit code to 1.
    fn set_failed(&mut self, message: &str);

    /// Write a line to the diagnostic log.
    fn info(&mut self, message: &str);

    fn debug(&mut self, message: &str);

    fn warning(&mut self, message: &str);

    /// Whether the runner has step debug logging enabled.
    fn is_debug(&self) -> bool;
}

/// Name of the environment variable that carries input `name`.
pub fn input_var(name: &str) -> String {
    format!("INPUT_{}", name.replace(' ', "_").to_uppercase())
}

// ---------------------------------------------------------------------------
// EnvToolkit
// ---------------------------------------------------------------------------

/// Toolkit backed by a snapshot of the process environment and a log writer
/// (stdout in production).
pub struct EnvToolkit<W: Write = std::io::Stdout> {
    vars: HashMap<String, String>,
    out: W,
}

impl EnvToolkit<std::io::Stdout> {
    pub fn from_env() -> Self {
        Self::from_os_vars(std::env::vars_os(), std::io::stdout())
    }
}

impl<W: Write> EnvToolkit<W> {
    pub fn with_vars<I, K, V>(vars: I, out: W) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
            out,
        }
    }

    /// Like [`EnvToolkit::with_vars`], but for raw OS strings. Variables whose
    /// name or value is not UTF-8 are skipped; none of the protocol variables
    /// can be such.
    pub fn from_os_vars<I>(vars: I, out: W) -> Self
    where
        I: IntoIterator<Item = (OsString, OsString)>,
    {
        let vars = vars
            .into_iter()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)));
        Self::with_vars(vars, out)
    }

    pub fn into_writer(self) -> W {
        self.out
    }

    fn output_file(&self) -> Option<PathBuf> {
        self.vars
            .get(OUTPUT_FILE_VAR)
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
    }

    fn write_line(&mut self, line: &str) {
        if let Err(e) = writeln!(self.out, "{line}") {
            tracing::warn!(error = %e, "failed to write to action log");
        }
    }
}

impl<W: Write> Toolkit for EnvToolkit<W> {
    fn get_input(&self, name: &str, options: InputOptions) -> Result<String> {
        let raw = self
            .vars
            .get(&input_var(name))
            .map(String::as_str)
            .unwrap_or("");

        if options.required && raw.is_empty() {
            return Err(ActionError::InputRequired(name.to_string()));
        }

        if options.trim_whitespace {
            Ok(raw.trim().to_string())
        } else {
            Ok(raw.to_string())
        }
    }

    fn set_output(&mut self, name: &str, value: &str) -> Result<()> {
        match self.output_file() {
            Some(path) => {
                tracing::debug!(output = name, file = %path.display(), "writing output file command");
                let message = command::key_value_message(name, value)?;
                append_file_command(&path, &message)
            }
            None => {
                // Legacy stdout protocol; the runner expects the command on a fresh line.
                let line = command::format_command("set-output", &[("name", name)], value);
                self.write_line("");
                self.write_line(&line);
                Ok(())
            }
        }
    }

    fn set_failed(&mut self, message: &str) {
        let line = command::format_command("error", &[], message);
        self.write_line(&line);
    }

    fn info(&mut self, message: &str) {
        self.write_line(message);
    }

    fn debug(&mut self, message: &str) {
        let line = command::format_command("debug", &[], message);
        self.write_line(&line);
    }

    fn warning(&mut self, message: &str) {
        let line = command::format_command("warning", &[], message);
        self.write_line(&line);
    }

    fn is_debug(&self) -> bool {
        self.vars.get(RUNNER_DEBUG_VAR).map(String::as_str) == Some("1")
    }
}
