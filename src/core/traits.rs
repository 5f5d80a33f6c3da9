//! Core traits for terminal interaction
//!
//! The session controller never touches stdin/stdout directly. It talks to a
//! `Console`, which lets the same dialogue run against a real terminal or a
//! scripted list of inputs.

use crate::types::AtmError;

/// Line-oriented terminal used by the ATM dialogue
pub trait Console {
    /// Show `prompt` and read one line of input, without the trailing newline
    ///
    /// Returns `InputClosed` once input is exhausted.
    fn read_line(&mut self, prompt: &str) -> Result<String, AtmError>;

    /// Show `prompt` and read one line without echoing it to the display
    fn read_secret(&mut self, prompt: &str) -> Result<String, AtmError>;

    /// Write one line of output
    fn print(&mut self, message: &str);
}
