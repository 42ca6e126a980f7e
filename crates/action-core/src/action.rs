use chrono::{DateTime, Local};

use crate::error::Result;
use crate::toolkit::{InputOptions, Toolkit};

/// A named value reported through [`Toolkit::set_output`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Output {
    pub name: String,
    pub value: String,
}

impl Output {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// One unit of automation logic.
///
/// `execute` reads what it needs from the toolkit and returns the outputs to
/// report. It must not call `set_output` or `set_failed` itself; reporting
/// belongs to [`crate::runner::run`], which guarantees exactly one of the two
/// happens per invocation.
pub trait Action {
    fn name(&self) -> &str;

    fn execute(&self, toolkit: &mut dyn Toolkit) -> Result<Vec<Output>>;
}

pub type Transform = fn(&str, DateTime<Local>) -> Vec<Output>;
pub type Announce = fn(&str) -> String;
pub type Clock = fn() -> DateTime<Local>;

/// An action of the shape "read one input, log a line about it, derive
/// outputs from it and the current time".
///
/// The input is read without `required`; an empty value is passed through to
/// the transform. Required-ness is declared in `action.yml` and enforced by
/// the runner host.
#[derive(Clone, Copy)]
pub struct TemplatedAction {
    name: &'static str,
    input: &'static str,
    transform: Transform,
    announce: Option<Announce>,
    clock: Clock,
}

impl TemplatedAction {
    pub fn new(name: &'static str, input: &'static str, transform: Transform) -> Self {
        Self {
            name,
            input,
            transform,
            announce: None,
            clock: Local::now,
        }
    }

    /// Line written to the diagnostic log once the input has been read.
    pub fn announce(mut self, announce: Announce) -> Self {
        self.announce = Some(announce);
        self
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }
}

impl Action for TemplatedAction {
    fn name(&self) -> &str {
        self.name
    }

    fn execute(&self, toolkit: &mut dyn Toolkit) -> Result<Vec<Output>> {
        let value = toolkit.get_input(self.input, InputOptions::default())?;

        if let Some(announce) = self.announce {
            toolkit.info(&announce(&value));
        }

        let outputs = (self.transform)(&value, (self.clock)());
        tracing::debug!(action = self.name, count = outputs.len(), "computed outputs");
        Ok(outputs)
    }
}
