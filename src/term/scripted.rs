//! A [`Console`] that replays canned input and records everything written.

use std::collections::VecDeque;
use std::io;

use super::Console;

/// One thing that happened on a [`ScriptedConsole`], in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleEvent {
    Wrote(String),
    Read(String),
    Cleared,
}

#[derive(Debug, Default)]
pub struct ScriptedConsole {
    input: VecDeque<String>,
    events: Vec<ConsoleEvent>,
}

impl ScriptedConsole {
    /// Creates a console that will answer reads with `lines`, in order.
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            input: lines.into_iter().map(Into::into).collect(),
            events: Vec::new(),
        }
    }

    /// Lines written so far, in order.
    pub fn output(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                ConsoleEvent::Wrote(line) => Some(line.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn events(&self) -> &[ConsoleEvent] {
        &self.events
    }

    pub fn clear_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, ConsoleEvent::Cleared))
            .count()
    }

    /// Input lines not consumed yet.
    pub fn remaining_input(&self) -> usize {
        self.input.len()
    }

    /// How many times `line` was written.
    pub fn count_line(&self, line: &str) -> usize {
        self.output().iter().filter(|l| **l == line).count()
    }
}

impl Console for ScriptedConsole {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.events.push(ConsoleEvent::Wrote(line.to_string()));
        Ok(())
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let line = self.input.pop_front();
        if let Some(ref l) = line {
            self.events.push(ConsoleEvent::Read(l.clone()));
        }
        Ok(line)
    }

    fn clear(&mut self) -> io::Result<()> {
        self.events.push(ConsoleEvent::Cleared);
        Ok(())
    }
}
