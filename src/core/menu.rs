//! # Menu
//!
//! Renders a banner and a list of entries, reads one response, dispatches
//! it and decides what happens next. A menu holds nothing but its
//! configuration, so the same `Menu` can be run any number of times.
//!
//! ```text
//!            ┌────────────────────────────────────────────────────────┐
//!            ▼                                                        │
//!       Rendering ──(!expects_input)──▶ Finished                      │
//!            │                                                        │
//!            ▼                                                        │
//!      AwaitingInput                                                  │
//!            │                                                        │
//!            ▼                                                        │
//!       Dispatching ──(exit trigger)──▶ Exited                        │
//!        │    │    │                                                  │
//!        │    │    └──(op failed)──▶ ErrorRecovery ──(reshow)─────────┤
//!        │    │                          │                            │
//!        │    └──(no match)──▶ InvalidOption ──(raise)──▶ Err         │
//!        │                          │                                 │
//!        └──(matched)──────────▶ Looping ──(loop)──▶ clear? + blank ──┘
//!                                   │
//!                                   └──(!loop)──▶ Finished
//! ```
//!
//! Looping and reshowing restart the cycle inside one `run()` call, so a
//! session of any length uses constant stack.

use std::fmt;
use std::io;

use log::{debug, info, warn};

use crate::core::entry::Entry;
use crate::core::operation::OperationError;
use crate::term::Console;

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug)]
pub enum MenuError {
    /// The response matched no entry and the menu raises on invalid input.
    InvalidOption { input: String },
    /// A bound operation failed outside of the menu's own recovery.
    Operation(OperationError),
    /// Writing to or reading from the terminal failed.
    Io(io::Error),
    /// The input stream closed while a line was expected.
    EndOfInput,
}

impl fmt::Display for MenuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MenuError::InvalidOption { .. } => write!(f, "The given input is invalid"),
            MenuError::Operation(e) => write!(f, "{e}"),
            MenuError::Io(e) => write!(f, "terminal I/O error: {e}"),
            MenuError::EndOfInput => write!(f, "input stream closed"),
        }
    }
}

impl std::error::Error for MenuError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MenuError::Operation(e) => Some(e),
            MenuError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for MenuError {
    fn from(e: io::Error) -> Self {
        MenuError::Io(e)
    }
}

impl From<OperationError> for MenuError {
    fn from(e: OperationError) -> Self {
        MenuError::Operation(e)
    }
}

/// Reads one line, treating end of input as an error.
pub(crate) fn read_response(console: &mut dyn Console) -> Result<String, MenuError> {
    console.read_line()?.ok_or(MenuError::EndOfInput)
}

// ============================================================================
// Behavior
// ============================================================================

/// Control-flow switches of a menu. Defaults match a one-shot menu that
/// reshows on failures and rejects unknown input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Behavior {
    pub raise_on_invalid: bool,
    pub reshow_on_error: bool,
    /// Printed instead of the operation's own message when an operation fails.
    /// An empty message counts as unset.
    pub error_message: Option<String>,
    pub loop_menu: bool,
    /// Only takes effect when `loop_menu` is set.
    pub clear_on_loop: bool,
}

impl Default for Behavior {
    fn default() -> Self {
        Self {
            raise_on_invalid: true,
            reshow_on_error: true,
            error_message: None,
            loop_menu: false,
            clear_on_loop: true,
        }
    }
}

/// How a successful `run()` ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The exit entry was selected.
    Exited,
    /// The menu stopped on its own (no input expected, or not looping).
    Finished,
}

// ============================================================================
// Menu
// ============================================================================

enum State {
    Rendering,
    AwaitingInput,
    Dispatching(String),
    ErrorRecovery {
        error: OperationError,
        response: String,
        matched: bool,
    },
    InvalidOption(String),
    Looping,
}

#[derive(Debug)]
pub struct Menu {
    banner: Vec<String>,
    expects_input: bool,
    entries: Vec<Entry>,
    exit_entry: Option<Entry>,
    behavior: Behavior,
}

impl Menu {
    /// A menu that prints `banner` and returns. Call [`Menu::expects_input`]
    /// to make it interactive.
    pub fn new<I, S>(banner: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            banner: banner.into_iter().map(Into::into).collect(),
            expects_input: false,
            entries: Vec::new(),
            exit_entry: None,
            behavior: Behavior::default(),
        }
    }

    pub fn expects_input(mut self, expects_input: bool) -> Self {
        self.expects_input = expects_input;
        self
    }

    /// Appends an entry. Entries are shown and matched in insertion order.
    pub fn entry(mut self, entry: Entry) -> Self {
        if entry.action.triggers().is_empty() {
            warn!("Entry '{}' has no triggers and can never be selected", entry.label);
        }
        self.entries.push(entry);
        self
    }

    /// Sets the entry whose triggers end the menu. Its label is shown last.
    pub fn exit(mut self, entry: Entry) -> Self {
        self.exit_entry = Some(entry);
        self
    }

    pub fn behavior(mut self, behavior: Behavior) -> Self {
        self.behavior = behavior;
        self
    }

    pub fn raise_on_invalid(mut self, raise: bool) -> Self {
        self.behavior.raise_on_invalid = raise;
        self
    }

    pub fn reshow_on_error(mut self, reshow: bool) -> Self {
        self.behavior.reshow_on_error = reshow;
        self
    }

    pub fn error_message(mut self, message: impl Into<String>) -> Self {
        self.behavior.error_message = Some(message.into());
        self
    }

    pub fn loop_menu(mut self, loop_menu: bool) -> Self {
        self.behavior.loop_menu = loop_menu;
        self
    }

    pub fn clear_on_loop(mut self, clear: bool) -> Self {
        self.behavior.clear_on_loop = clear;
        self
    }

    /// Runs the menu until it exits, finishes, or fails.
    pub fn run(&self, console: &mut dyn Console) -> Result<Outcome, MenuError> {
        let mut state = State::Rendering;
        loop {
            state = match state {
                State::Rendering => {
                    for line in &self.banner {
                        console.write_line(line)?;
                    }
                    if !self.expects_input {
                        return Ok(Outcome::Finished);
                    }
                    State::AwaitingInput
                }
                State::AwaitingInput => {
                    for entry in self.entries.iter().chain(&self.exit_entry) {
                        console.write_line(&entry.label)?;
                    }
                    State::Dispatching(read_response(console)?)
                }
                State::Dispatching(response) => {
                    if let Some(exit) = self.exit_entry.as_ref() {
                        if exit.action.matches(&response) {
                            info!("Exit selected with {response:?}");
                            exit.action.invoke(console)?;
                            return Ok(Outcome::Exited);
                        }
                    }
                    self.dispatch(console, response)?
                }
                State::ErrorRecovery {
                    error,
                    response,
                    matched,
                } => {
                    warn!("Operation failed for {response:?}: {error}");
                    let message = self
                        .behavior
                        .error_message
                        .as_deref()
                        .filter(|m| !m.is_empty())
                        .unwrap_or(error.message());
                    console.write_line(message)?;
                    if self.behavior.reshow_on_error {
                        State::Rendering
                    } else if matched {
                        State::Looping
                    } else {
                        State::InvalidOption(response)
                    }
                }
                State::InvalidOption(input) => {
                    debug!("No entry matched {input:?}");
                    if self.behavior.raise_on_invalid {
                        return Err(MenuError::InvalidOption { input });
                    }
                    State::Looping
                }
                State::Looping => {
                    if !self.behavior.loop_menu {
                        return Ok(Outcome::Finished);
                    }
                    if self.behavior.clear_on_loop {
                        console.clear()?;
                    }
                    console.write_line("")?;
                    State::Rendering
                }
            };
        }
    }

    /// Invokes every entry whose triggers contain `response`, in order.
    ///
    /// All matching entries run; the first operation failure stops the scan.
    fn dispatch(&self, console: &mut dyn Console, response: String) -> Result<State, MenuError> {
        let mut matched = false;
        for entry in &self.entries {
            if !entry.action.matches(&response) {
                continue;
            }
            matched = true;
            debug!("Dispatching {response:?} to '{}'", entry.label);
            match entry.action.invoke(console) {
                Ok(_) => {}
                Err(MenuError::Operation(error)) => {
                    return Ok(State::ErrorRecovery {
                        error,
                        response,
                        matched,
                    });
                }
                Err(other) => return Err(other),
            }
        }

        if matched {
            Ok(State::Looping)
        } else {
            Ok(State::InvalidOption(response))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::Action;
    use crate::term::{ConsoleEvent, ScriptedConsole};
    use crate::test_support::{Recorder, failing};

    fn exit_entry() -> Entry {
        Entry::new("9) Exit", Action::new(["9"]))
    }

    #[test]
    fn test_no_input_prints_banner_only() {
        let recorder = Recorder::new();
        let menu = Menu::new(["Hello", "World"])
            .entry(Entry::new("1) One", Action::new(["1"]).operation(recorder.operation())))
            .exit(exit_entry())
            .loop_menu(true);
        let mut console = ScriptedConsole::new(["1"]);

        assert_eq!(menu.run(&mut console).unwrap(), Outcome::Finished);
        assert_eq!(console.output(), vec!["Hello", "World"]);
        assert_eq!(console.remaining_input(), 1);
        assert!(recorder.calls().is_empty());
    }

    #[test]
    fn test_renders_banner_entries_then_exit_label() {
        let menu = Menu::new(["Title"])
            .expects_input(true)
            .entry(Entry::new("1) One", Action::new(["1"])))
            .entry(Entry::new("2) Two", Action::new(["2"])))
            .exit(exit_entry());
        let mut console = ScriptedConsole::new(["9"]);

        assert_eq!(menu.run(&mut console).unwrap(), Outcome::Exited);
        assert_eq!(console.output(), vec!["Title", "1) One", "2) Two", "9) Exit"]);
    }

    #[test]
    fn test_exit_runs_exit_operation_once_and_no_entry() {
        let entry_calls = Recorder::new();
        let exit_calls = Recorder::new();
        let menu = Menu::new(["Title"])
            .expects_input(true)
            .entry(Entry::new("1) One", Action::new(["1", "9"]).operation(entry_calls.operation())))
            .exit(Entry::new("9) Exit", Action::new(["9"]).operation(exit_calls.operation())))
            .loop_menu(true);
        let mut console = ScriptedConsole::new(["9"]);

        assert_eq!(menu.run(&mut console).unwrap(), Outcome::Exited);
        assert_eq!(exit_calls.calls().len(), 1);
        assert!(entry_calls.calls().is_empty());
    }

    #[test]
    fn test_all_matching_entries_fire() {
        let first = Recorder::new();
        let second = Recorder::new();
        let other = Recorder::new();
        let menu = Menu::new(["Title"])
            .expects_input(true)
            .entry(Entry::new("a", Action::new(["1"]).operation(first.operation())))
            .entry(Entry::new("b", Action::new(["2"]).operation(other.operation())))
            .entry(Entry::new("c", Action::new(["1"]).operation(second.operation())))
            .exit(exit_entry());
        let mut console = ScriptedConsole::new(["1"]);

        assert_eq!(menu.run(&mut console).unwrap(), Outcome::Finished);
        assert_eq!(first.calls().len(), 1);
        assert_eq!(second.calls().len(), 1);
        assert!(other.calls().is_empty());
    }

    #[test]
    fn test_repeated_trigger_fires_entry_once() {
        let recorder = Recorder::new();
        let menu = Menu::new(["Title"])
            .expects_input(true)
            .entry(Entry::new("a", Action::new(["1", "2", "1"]).operation(recorder.operation())))
            .exit(exit_entry());
        let mut console = ScriptedConsole::new(["1"]);

        assert_eq!(menu.run(&mut console).unwrap(), Outcome::Finished);
        assert_eq!(recorder.calls().len(), 1);
    }

    #[test]
    fn test_failure_stops_remaining_matches() {
        let after = Recorder::new();
        let menu = Menu::new(["Title"])
            .expects_input(true)
            .entry(Entry::new("a", Action::new(["1"]).operation(failing("boom"))))
            .entry(Entry::new("b", Action::new(["1"]).operation(after.operation())))
            .exit(exit_entry())
            .reshow_on_error(false);
        let mut console = ScriptedConsole::new(["1"]);

        assert_eq!(menu.run(&mut console).unwrap(), Outcome::Finished);
        assert!(after.calls().is_empty());
        assert_eq!(console.output().last(), Some(&"boom"));
    }

    #[test]
    fn test_invalid_option_raises() {
        let recorder = Recorder::new();
        let menu = Menu::new(["Title"])
            .expects_input(true)
            .entry(Entry::new("1) One", Action::new(["1"]).operation(recorder.operation())))
            .exit(exit_entry())
            .loop_menu(true);
        let mut console = ScriptedConsole::new(["7"]);

        let err = menu.run(&mut console).unwrap_err();
        assert!(matches!(err, MenuError::InvalidOption { ref input } if input == "7"));
        assert_eq!(err.to_string(), "The given input is invalid");
        assert!(recorder.calls().is_empty());
    }

    #[test]
    fn test_invalid_option_without_raise_loops() {
        let menu = Menu::new(["Title"])
            .expects_input(true)
            .entry(Entry::new("1) One", Action::new(["1"])))
            .exit(exit_entry())
            .raise_on_invalid(false)
            .loop_menu(true)
            .clear_on_loop(false);
        let mut console = ScriptedConsole::new(["nope", "9"]);

        assert_eq!(menu.run(&mut console).unwrap(), Outcome::Exited);
        assert_eq!(console.count_line("Title"), 2);
        assert_eq!(console.count_line(""), 1);
        assert_eq!(console.clear_count(), 0);
    }

    #[test]
    fn test_invalid_option_without_raise_or_loop_finishes() {
        let menu = Menu::new(["Title"])
            .expects_input(true)
            .exit(exit_entry())
            .raise_on_invalid(false);
        let mut console = ScriptedConsole::new(["nope"]);
        assert_eq!(menu.run(&mut console).unwrap(), Outcome::Finished);
    }

    #[test]
    fn test_loop_clears_before_blank_line() {
        let menu = Menu::new(["Title"])
            .expects_input(true)
            .entry(Entry::new("1) One", Action::new(["1"])))
            .exit(exit_entry())
            .loop_menu(true);
        let mut console = ScriptedConsole::new(["1", "9"]);

        menu.run(&mut console).unwrap();

        let events = console.events();
        let cleared = events
            .iter()
            .position(|e| *e == ConsoleEvent::Cleared)
            .unwrap();
        assert_eq!(events[cleared - 1], ConsoleEvent::Read("1".into()));
        assert_eq!(events[cleared + 1], ConsoleEvent::Wrote(String::new()));
        assert_eq!(events[cleared + 2], ConsoleEvent::Wrote("Title".into()));
    }

    #[test]
    fn test_reshow_on_error_uses_custom_message() {
        let menu = Menu::new(["Title"])
            .expects_input(true)
            .entry(Entry::new("1) One", Action::new(["1"]).operation(failing("exists"))))
            .exit(exit_entry())
            .error_message("Something went wrong");
        let mut console = ScriptedConsole::new(["1", "9"]);

        assert_eq!(menu.run(&mut console).unwrap(), Outcome::Exited);
        assert_eq!(console.count_line("Something went wrong"), 1);
        assert_eq!(console.count_line("exists"), 0);
        assert_eq!(console.count_line("Title"), 2);
        // reshow does not go through the loop path
        assert_eq!(console.clear_count(), 0);
        assert_eq!(console.count_line(""), 0);
    }

    #[test]
    fn test_empty_custom_message_shows_failure_text() {
        let menu = Menu::new(["Title"])
            .expects_input(true)
            .entry(Entry::new("1) One", Action::new(["1"]).operation(failing("exists"))))
            .exit(exit_entry())
            .error_message("");
        let mut console = ScriptedConsole::new(["1", "9"]);

        assert_eq!(menu.run(&mut console).unwrap(), Outcome::Exited);
        assert_eq!(console.count_line("exists"), 1);
        assert_eq!(console.count_line(""), 0);
    }

    #[test]
    fn test_error_without_reshow_falls_through_to_loop() {
        let menu = Menu::new(["Title"])
            .expects_input(true)
            .entry(Entry::new("1) One", Action::new(["1"]).operation(failing("exists"))))
            .exit(exit_entry())
            .reshow_on_error(false)
            .loop_menu(true);
        let mut console = ScriptedConsole::new(["1", "9"]);

        assert_eq!(menu.run(&mut console).unwrap(), Outcome::Exited);
        assert_eq!(console.count_line("exists"), 1);
        assert_eq!(console.clear_count(), 1);
        assert_eq!(console.count_line("Title"), 2);
    }

    #[test]
    fn test_end_of_input_while_awaiting_response() {
        let menu = Menu::new(["Title"]).expects_input(true).exit(exit_entry());
        let mut console = ScriptedConsole::new(Vec::<String>::new());
        assert!(matches!(menu.run(&mut console), Err(MenuError::EndOfInput)));
    }

    #[test]
    fn test_exit_operation_failure_propagates() {
        let menu = Menu::new(["Title"])
            .expects_input(true)
            .exit(Entry::new("9) Exit", Action::new(["9"]).operation(failing("cannot leave"))));
        let mut console = ScriptedConsole::new(["9"]);
        match menu.run(&mut console) {
            Err(MenuError::Operation(e)) => assert_eq!(e.message(), "cannot leave"),
            other => panic!("expected operation error, got {other:?}"),
        }
    }

    #[test]
    fn test_menu_without_exit_entry() {
        let recorder = Recorder::new();
        let menu = Menu::new(["Title"])
            .expects_input(true)
            .entry(Entry::new("1) One", Action::new(["1"]).operation(recorder.operation())));
        let mut console = ScriptedConsole::new(["1"]);

        assert_eq!(menu.run(&mut console).unwrap(), Outcome::Finished);
        assert_eq!(console.output(), vec!["Title", "1) One"]);
        assert_eq!(recorder.calls().len(), 1);
    }

    #[test]
    fn test_long_session_runs_in_constant_stack() {
        let recorder = Recorder::new();
        let menu = Menu::new(["Title"])
            .expects_input(true)
            .entry(Entry::new("1) One", Action::new(["1"]).operation(recorder.operation())))
            .exit(exit_entry())
            .loop_menu(true);
        let mut input = vec!["1"; 50_000];
        input.push("9");
        let mut console = ScriptedConsole::new(input);

        assert_eq!(menu.run(&mut console).unwrap(), Outcome::Exited);
        assert_eq!(recorder.calls().len(), 50_000);
    }

    #[test]
    fn test_behavior_defaults() {
        let behavior = Behavior::default();
        assert!(behavior.raise_on_invalid);
        assert!(behavior.reshow_on_error);
        assert!(behavior.error_message.is_none());
        assert!(!behavior.loop_menu);
        assert!(behavior.clear_on_loop);
    }
}
