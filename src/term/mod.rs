//! # Terminal Adapter
//!
//! The only module that touches stdin, stdout and crossterm. The menu core
//! talks to a [`Console`] and never to the terminal directly, so a menu can
//! be driven by a script in tests exactly like it is driven by a user.

mod scripted;

pub use scripted::{ConsoleEvent, ScriptedConsole};

use std::io::{self, BufRead, Write};

use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};
use log::debug;

/// Line-oriented terminal I/O used by menus and actions.
pub trait Console {
    /// Writes `line` followed by a newline.
    fn write_line(&mut self, line: &str) -> io::Result<()>;

    /// Blocks for one line of input. `Ok(None)` means end of input.
    ///
    /// The trailing line terminator is removed; nothing else is trimmed.
    fn read_line(&mut self) -> io::Result<Option<String>>;

    /// Clears the screen.
    fn clear(&mut self) -> io::Result<()>;
}

/// Strips a single trailing `\n` or `\r\n`.
pub(crate) fn strip_line_ending(mut line: String) -> String {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    line
}

/// The real terminal: stdout for writes, stdin for reads.
pub struct StdConsole {
    stdin: io::Stdin,
    stdout: io::Stdout,
}

impl StdConsole {
    pub fn new() -> Self {
        Self {
            stdin: io::stdin(),
            stdout: io::stdout(),
        }
    }
}

impl Default for StdConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl Console for StdConsole {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        let mut out = self.stdout.lock();
        writeln!(out, "{line}")?;
        out.flush()
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut buf = String::new();
        let read = self.stdin.lock().read_line(&mut buf)?;
        if read == 0 {
            debug!("stdin reached end of input");
            return Ok(None);
        }
        Ok(Some(strip_line_ending(buf)))
    }

    fn clear(&mut self) -> io::Result<()> {
        execute!(self.stdout, Clear(ClearType::All), MoveTo(0, 0))
    }
}
