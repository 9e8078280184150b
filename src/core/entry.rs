//! # Entries
//!
//! One selectable line of a menu: the label shown to the user and the
//! action it selects.

use log::debug;
use serde_json::Value;

use crate::core::action::Action;
use crate::core::menu::MenuError;
use crate::term::Console;

#[derive(Debug)]
pub struct Entry {
    pub label: String,
    pub action: Action,
}

impl Entry {
    pub fn new(label: impl Into<String>, action: Action) -> Self {
        Self {
            label: label.into(),
            action,
        }
    }

    /// Prints the label, then invokes the action.
    ///
    /// `response` is the raw input that selected this entry. It is only logged;
    /// the action never sees it.
    pub fn present(
        &self,
        console: &mut dyn Console,
        response: &str,
    ) -> Result<Option<Value>, MenuError> {
        debug!("Presenting '{}' for response {:?}", self.label, response);
        console.write_line(&self.label)?;
        self.action.invoke(console)
    }
}
