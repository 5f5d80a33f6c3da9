//! Console implementations
//!
//! - `StdConsole` talks to the real terminal. PIN entry goes through
//!   `dialoguer::Password`, which turns echo off for the read and restores the
//!   terminal mode on every exit path.
//! - `ScriptedConsole` replays a fixed list of inputs and records everything
//!   shown, for replaying sessions in tests and benchmarks.

use crate::core::traits::Console;
use crate::types::AtmError;
use dialoguer::Password;
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

/// Console backed by stdin/stdout
#[derive(Debug, Default, Clone, Copy)]
pub struct StdConsole;

impl StdConsole {
    pub fn new() -> Self {
        StdConsole
    }
}

impl Console for StdConsole {
    fn read_line(&mut self, prompt: &str) -> Result<String, AtmError> {
        let mut stdout = io::stdout();
        write!(stdout, "{}", prompt)?;
        stdout.flush()?;

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Err(AtmError::InputClosed);
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    fn read_secret(&mut self, prompt: &str) -> Result<String, AtmError> {
        // dialoguer appends its own ": "
        let prompt = prompt.trim_end().trim_end_matches(':');
        Password::new()
            .with_prompt(prompt)
            .allow_empty_password(true)
            .report(false)
            .interact()
            .map_err(secret_read_error)
    }

    fn print(&mut self, message: &str) {
        println!("{}", message);
    }
}

/// End of input while reading a PIN closes the session like any other read
fn secret_read_error(error: dialoguer::Error) -> AtmError {
    match error {
        dialoguer::Error::IO(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
            AtmError::InputClosed
        }
        dialoguer::Error::IO(e) => AtmError::from(e),
    }
}

/// Console that replays canned input
///
/// Secrets and plain lines are taken from the same queue in order. Once the
/// queue is empty every read fails with `InputClosed`.
#[derive(Debug, Default, Clone)]
pub struct ScriptedConsole {
    inputs: VecDeque<String>,
    prompts: Vec<String>,
    output: Vec<String>,
}

impl ScriptedConsole {
    pub fn new<I, S>(inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ScriptedConsole {
            inputs: inputs.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
            output: Vec::new(),
        }
    }

    pub fn remaining_inputs(&self) -> usize {
        self.inputs.len()
    }

    /// Every prompt shown, in order
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    /// Every printed line, in order (multi-line messages are split)
    pub fn output(&self) -> &[String] {
        &self.output
    }

    pub fn prompted(&self, prompt: &str) -> bool {
        self.prompts.iter().any(|p| p == prompt)
    }

    /// True if any printed line contains `needle`
    pub fn output_contains(&self, needle: &str) -> bool {
        self.output.iter().any(|line| line.contains(needle))
    }

    /// All printed output joined with newlines
    pub fn transcript(&self) -> String {
        self.output.join("\n")
    }

    fn next_input(&mut self, prompt: &str) -> Result<String, AtmError> {
        self.prompts.push(prompt.to_string());
        self.inputs.pop_front().ok_or(AtmError::InputClosed)
    }
}

impl Console for ScriptedConsole {
    fn read_line(&mut self, prompt: &str) -> Result<String, AtmError> {
        self.next_input(prompt)
    }

    fn read_secret(&mut self, prompt: &str) -> Result<String, AtmError> {
        self.next_input(prompt)
    }

    fn print(&mut self, message: &str) {
        if message.is_empty() {
            self.output.push(String::new());
        } else {
            self.output.extend(message.lines().map(str::to_string));
        }
    }
}
