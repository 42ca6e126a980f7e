//! Runs an [`Action`] once and reports exactly one outcome.

use std::panic::{self, AssertUnwindSafe};
use std::process::ExitCode;

use crate::action::{Action, Output};
use crate::error::{ActionError, Result};
use crate::toolkit::{EnvToolkit, Toolkit};

/// Failure message used when an action fails without a usable message.
pub const UNEXPECTED_ERROR: &str = "An unexpected error occurred";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Succeeded { outputs: Vec<Output> },
    Failed { message: String },
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Succeeded { .. })
    }

    pub fn exit_status(&self) -> u8 {
        match self {
            Outcome::Succeeded { .. } => 0,
            Outcome::Failed { .. } => 1,
        }
    }

    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.exit_status())
    }
}

/// Execute `action` against `toolkit`.
///
/// Errors and panics never escape. On success every output is reported via
/// `set_output`; on failure `set_failed` is called once and nothing is
/// reported. An `Err` forwards its message; a panic, or an error whose
/// message is empty, forwards [`UNEXPECTED_ERROR`].
pub fn run(action: &dyn Action, toolkit: &mut dyn Toolkit) -> Outcome {
    tracing::debug!(action = action.name(), "running action");

    let result = panic::catch_unwind(AssertUnwindSafe(|| action.execute(&mut *toolkit)));

    let message = match result {
        Ok(Ok(outputs)) => match report(toolkit, &outputs) {
            Ok(()) => {
                tracing::debug!(action = action.name(), "action succeeded");
                return Outcome::Succeeded { outputs };
            }
            Err(e) => failure_message(&e),
        },
        Ok(Err(e)) => failure_message(&e),
        Err(_) => UNEXPECTED_ERROR.to_string(),
    };

    tracing::debug!(action = action.name(), %message, "action failed");
    toolkit.set_failed(&message);
    Outcome::Failed { message }
}

fn report(toolkit: &mut dyn Toolkit, outputs: &[Output]) -> Result<()> {
    for output in outputs {
        toolkit.set_output(&output.name, &output.value)?;
    }
    Ok(())
}

fn failure_message(err: &ActionError) -> String {
    let message = err.to_string();
    if message.is_empty() {
        UNEXPECTED_ERROR.to_string()
    } else {
        message
    }
}

/// Process entry point for an action binary.
///
/// Builds the environment toolkit, runs the action to completion and maps
/// the outcome to the process exit code.
pub fn main(action: &dyn Action) -> ExitCode {
    let mut toolkit = EnvToolkit::from_env();
    init_logging(toolkit.is_debug());
    run_quietly(action, &mut toolkit).exit_code()
}

/// [`run`] with the panic hook replaced for the duration of the call, so a
/// caught panic reaches stderr only as a debug event instead of the default
/// "thread panicked" report. The previous hook is restored afterwards.
fn run_quietly(action: &dyn Action, toolkit: &mut dyn Toolkit) -> Outcome {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(|info| {
        tracing::debug!(%info, "action panicked");
    }));
    let outcome = run(action, toolkit);
    panic::set_hook(previous);
    outcome
}

/// Tracing goes to stderr so it never interleaves with workflow commands on
/// stdout. `RUST_LOG` overrides the default level.
fn init_logging(debug: bool) {
    let default_level = if debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
