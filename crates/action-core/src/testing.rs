//! In-memory [`Toolkit`] for exercising actions without a runner.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::action::Output;
use crate::error::{ActionError, Result};
use crate::toolkit::{InputOptions, Toolkit};

/// How a scripted input read should fail.
#[derive(Debug, Clone)]
pub enum InputFailure {
    /// Return an error carrying this message.
    Error(String),
    /// Unwind with a payload that is not an error or a string.
    Panic,
}

/// Payload used by [`InputFailure::Panic`].
#[derive(Debug)]
pub struct NonErrorPayload;

#[derive(Debug, Default)]
pub struct RecordingToolkit {
    inputs: HashMap<String, String>,
    input_failure: Option<InputFailure>,
    output_failure: Option<String>,
    inputs_read: RefCell<Vec<String>>,
    outputs: Vec<Output>,
    failures: Vec<String>,
    logs: Vec<String>,
}

impl RecordingToolkit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input(mut self, name: &str, value: &str) -> Self {
        self.inputs.insert(name.to_string(), value.to_string());
        self
    }

    /// Make every `get_input` call fail.
    pub fn failing_input(mut self, failure: InputFailure) -> Self {
        self.input_failure = Some(failure);
        self
    }

    /// Make every `set_output` call fail with `message`.
    pub fn failing_output(mut self, message: &str) -> Self {
        self.output_failure = Some(message.to_string());
        self
    }

    /// Names passed to `get_input`, in call order.
    pub fn inputs_read(&self) -> Vec<String> {
        self.inputs_read.borrow().clone()
    }

    pub fn outputs(&self) -> &[Output] {
        &self.outputs
    }

    pub fn output(&self, name: &str) -> Option<&str> {
        self.outputs
            .iter()
            .find(|o| o.name == name)
            .map(|o| o.value.as_str())
    }

    pub fn failures(&self) -> &[String] {
        &self.failures
    }

    pub fn logs(&self) -> &[String] {
        &self.logs
    }
}

impl Toolkit for RecordingToolkit {
    fn get_input(&self, name: &str, options: InputOptions) -> Result<String> {
        self.inputs_read.borrow_mut().push(name.to_string());
        match &self.input_failure {
            Some(InputFailure::Error(message)) => return Err(ActionError::msg(message.clone())),
            Some(InputFailure::Panic) => std::panic::panic_any(NonErrorPayload),
            None => {}
        }
        let value = self.inputs.get(name).cloned().unwrap_or_default();
        if options.required && value.is_empty() {
            return Err(ActionError::InputRequired(name.to_string()));
        }
        if options.trim_whitespace {
            Ok(value.trim().to_string())
        } else {
            Ok(value)
        }
    }

    fn set_output(&mut self, name: &str, value: &str) -> Result<()> {
        if let Some(message) = &self.output_failure {
            return Err(ActionError::msg(message.clone()));
        }
        self.outputs.push(Output::new(name, value));
        Ok(())
    }

    fn set_failed(&mut self, message: &str) {
        self.failures.push(message.to_string());
    }

    fn info(&mut self, message: &str) {
        self.logs.push(message.to_string());
    }

    fn debug(&mut self, message: &str) {
        self.logs.push(format!("debug: {message}"));
    }

    fn warning(&mut self, message: &str) {
        self.logs.push(format!("warning: {message}"));
    }

    fn is_debug(&self) -> bool {
        false
    }
}
