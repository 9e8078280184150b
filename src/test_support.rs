//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::cell::RefCell;
use std::rc::Rc;

use serde_json::Value;

use crate::core::operation::{Args, OperationError};

/// Records the arguments of every call made through its operations.
#[derive(Clone, Default)]
pub struct Recorder {
    calls: Rc<RefCell<Vec<Args>>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// An operation that records its args and returns `null`.
    pub fn operation(&self) -> impl Fn(Args) -> Result<Value, OperationError> + 'static {
        let calls = Rc::clone(&self.calls);
        move |args: Args| {
            calls.borrow_mut().push(args);
            Ok(Value::Null)
        }
    }

    pub fn calls(&self) -> Vec<Args> {
        self.calls.borrow().clone()
    }
}

/// An operation that always fails with `message`.
pub fn failing(message: &str) -> impl Fn(Args) -> Result<Value, OperationError> + 'static {
    let message = message.to_string();
    move |_args: Args| Err(OperationError::new(message.clone()))
}
