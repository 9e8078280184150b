//! # Operations
//!
//! The capability a menu action is bound to. An operation receives its
//! named arguments as an [`Args`] map and returns a JSON value (or fails).
//!
//! ```text
//! fixed args ──┐
//!              ├──▶ Args ──▶ Operation::execute() ──▶ Result<Value, OperationError>
//! prompts ─────┘
//! ```
//!
//! Any `Fn(Args) -> Result<Value, OperationError>` closure is an operation,
//! so most menus never implement the trait by hand.

use std::fmt;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// A failure raised by a bound operation.
///
/// The message is what the menu prints when it recovers from the failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationError(pub String);

impl OperationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OperationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for OperationError {}

impl From<serde_json::Error> for OperationError {
    fn from(e: serde_json::Error) -> Self {
        Self(format!("invalid arguments: {e}"))
    }
}

/// Named arguments handed to an operation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args(Map<String, Value>);

impl Args {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Inserts `value` under `name`, replacing any earlier value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(name.into(), value.into());
    }

    /// Builder-style [`Args::insert`].
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Returns the string argument `name`, failing if it is missing or not a string.
    pub fn get_str(&self, name: &str) -> Result<&str, OperationError> {
        match self.0.get(name) {
            Some(Value::String(s)) => Ok(s),
            Some(other) => Err(OperationError(format!(
                "argument '{name}' is not a string: {other}"
            ))),
            None => Err(OperationError(format!("missing argument '{name}'"))),
        }
    }

    /// Deserializes the whole argument set into a typed struct.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, OperationError> {
        Ok(serde_json::from_value(Value::Object(self.0.clone()))?)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Args {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Something a menu action can call.
pub trait Operation {
    fn execute(&self, args: Args) -> Result<Value, OperationError>;
}

impl<F> Operation for F
where
    F: Fn(Args) -> Result<Value, OperationError>,
{
    fn execute(&self, args: Args) -> Result<Value, OperationError> {
        self(args)
    }
}

/// Textual form of an operation result, as printed by `print_result` actions.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => "None".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
