//! textmenu: a small framework for line-based terminal menus.
//!
//! ```no_run
//! use serde_json::Value;
//! use textmenu::{Action, Args, Entry, Menu, OperationError, StdConsole};
//!
//! let greet = |args: Args| -> Result<Value, OperationError> {
//!     Ok(Value::String(format!("Hello, {}!", args.get_str("name")?)))
//! };
//!
//! let menu = Menu::new(["Greeter"])
//!     .expects_input(true)
//!     .entry(Entry::new(
//!         "1) Greet",
//!         Action::new(["1"])
//!             .operation(greet)
//!             .prompt("name", "Who?")
//!             .print_result(true),
//!     ))
//!     .exit(Entry::new("2) Exit", Action::new(["2"])))
//!     .loop_menu(true);
//!
//! menu.run(&mut StdConsole::new()).unwrap();
//! ```

pub mod core;
pub mod inventory;
pub mod term;

#[cfg(test)]
pub mod test_support;

pub use crate::core::action::{Action, Prompt};
pub use crate::core::entry::Entry;
pub use crate::core::menu::{Behavior, Menu, MenuError, Outcome};
pub use crate::core::operation::{Args, Operation, OperationError};
pub use crate::term::{Console, ScriptedConsole, StdConsole};
