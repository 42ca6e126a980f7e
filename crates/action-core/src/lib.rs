//! `action-core` — the host toolkit and runner shared by every action in
//! this repository.
//!
//! An action binary is a few lines:
//!
//! ```rust,ignore
//! use action_core::{Output, TemplatedAction};
//!
//! fn main() -> std::process::ExitCode {
//!     let action = TemplatedAction::new("echo", "value", |v, _now| {
//!         vec![Output::new("echo", v)]
//!     });
//!     action_core::main(&action)
//! }
//! ```

pub mod action;
pub mod command;
pub mod error;
pub mod io;
pub mod runner;
pub mod testing;
pub mod toolkit;

pub use action::{Action, Output, TemplatedAction};
pub use error::{ActionError, Result};
pub use runner::{main, run, Outcome, UNEXPECTED_ERROR};
pub use toolkit::{EnvToolkit, InputOptions, Toolkit};
