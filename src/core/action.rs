//! # Actions
//!
//! The unit of dispatch. An `Action` knows which raw inputs select it
//! (its triggers), which extra named values to ask for before running,
//! and the operation to run with them.
//!
//! ```text
//! invoke()
//!   ├── no operation?           → Ok(None), nothing printed or read
//!   ├── for each prompt, in order: print text, read one line
//!   ├── args = fixed_args ← prompted values (prompted win)
//!   ├── operation.execute(args) → Err propagates as MenuError::Operation
//!   └── print_result?           → print the value
//! ```

use std::fmt;

use log::debug;
use serde_json::Value;

use crate::core::menu::{MenuError, read_response};
use crate::core::operation::{Args, Operation, display_value};
use crate::term::Console;

/// A named value the action asks the user for before running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub param: String,
    pub text: String,
}

pub struct Action {
    triggers: Vec<String>,
    operation: Option<Box<dyn Operation>>,
    prompts: Vec<Prompt>,
    print_result: bool,
    fixed_args: Args,
}

impl Action {
    /// Creates an action selected by any of `triggers`, with no operation bound yet.
    pub fn new<I, S>(triggers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            triggers: triggers.into_iter().map(Into::into).collect(),
            operation: None,
            prompts: Vec::new(),
            print_result: false,
            fixed_args: Args::new(),
        }
    }

    pub fn operation(mut self, operation: impl Operation + 'static) -> Self {
        self.operation = Some(Box::new(operation));
        self
    }

    /// Asks for `param` with `text` before running. Prompts run in the order
    /// they were added; re-adding a param replaces its text in place.
    pub fn prompt(mut self, param: impl Into<String>, text: impl Into<String>) -> Self {
        let param = param.into();
        let text = text.into();
        match self.prompts.iter_mut().find(|p| p.param == param) {
            Some(existing) => existing.text = text,
            None => self.prompts.push(Prompt { param, text }),
        }
        self
    }

    pub fn print_result(mut self, print_result: bool) -> Self {
        self.print_result = print_result;
        self
    }

    /// Passes `value` under `name` on every call, unless a prompt collects the same name.
    pub fn fixed_arg(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fixed_args.insert(name, value);
        self
    }

    pub fn triggers(&self) -> &[String] {
        &self.triggers
    }

    pub fn prompts(&self) -> &[Prompt] {
        &self.prompts
    }

    /// True if `response` is exactly one of the triggers.
    pub fn matches(&self, response: &str) -> bool {
        self.triggers.iter().any(|t| t == response)
    }

    /// Collects prompted values, runs the operation and optionally prints its result.
    ///
    /// Returns `Ok(None)` without touching the console when no operation is bound.
    pub fn invoke(&self, console: &mut dyn Console) -> Result<Option<Value>, MenuError> {
        let Some(operation) = &self.operation else {
            return Ok(None);
        };

        let mut args = self.fixed_args.clone();
        for prompt in &self.prompts {
            console.write_line(&prompt.text)?;
            let value = read_response(console)?;
            args.insert(prompt.param.clone(), value);
        }

        debug!("Invoking action {:?} with {} args", self.triggers, args.len());
        let value = operation.execute(args).map_err(MenuError::Operation)?;

        if self.print_result {
            console.write_line(&display_value(&value))?;
        }
        Ok(Some(value))
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("triggers", &self.triggers)
            .field("has_operation", &self.operation.is_some())
            .field("prompts", &self.prompts)
            .field("print_result", &self.print_result)
            .field("fixed_args", &self.fixed_args)
            .finish()
    }
}
