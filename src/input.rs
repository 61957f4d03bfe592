use crate::command::Command;
use crossterm::event::{poll, read};
use std::io;
use std::time::Duration;

/// A source of player commands, polled once per frame
pub(crate) trait Controller {
    /// Return all commands issued since the last call, oldest first.  This
    /// must not block.
    fn poll(&mut self) -> io::Result<Vec<Command>>;
}

/// Reads commands from the terminal via crossterm
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct TerminalInput;

impl Controller for TerminalInput {
    fn poll(&mut self) -> io::Result<Vec<Command>> {
        let mut commands = Vec::new();
        while poll(Duration::ZERO)? {
            commands.extend(Command::from_event(&read()?));
        }
        Ok(commands)
    }
}
