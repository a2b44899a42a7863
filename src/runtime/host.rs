//! Host capabilities.
//!
//! The engine never touches the outside world directly. Input lines,
//! program output, diagnostics, import resources and shell commands all go
//! through a [`Host`], so an embedder decides where each of them ends up.
//!
//! Two hosts are provided:
//!
//! - [`StdHost`]: standard streams, the filesystem and the system shell
//! - [`ScriptedHost`]: everything in memory, for tests and embedding

use std::collections::{HashMap, VecDeque};
use std::fs;
use std::io::{self, BufRead, Write};
use std::process::Command;

use tracing::debug;

use crate::core::OatError;

/// External collaborators of the engine.
pub trait Host {
    /// Next input line without its terminator; `None` once input is exhausted.
    fn read_line(&mut self) -> Option<String>;

    /// Append text to the program output.
    fn write_str(&mut self, text: &str) -> io::Result<()>;

    /// Flush buffered program output.
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }

    /// Deliver a non-fatal diagnostic to the error channel.
    fn report(&mut self, diagnostic: &OatError);

    /// Read the text of a function import resource.
    fn load_resource(&mut self, identifier: &str) -> io::Result<String>;

    /// Run a shell command. Its output is not captured.
    fn execute(&mut self, command: &str) -> io::Result<()>;
}

fn strip_line_ending(mut line: String) -> String {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    line
}

// ═══════════════════════════════════════════════════════════════════════════
// Standard Host
// ═══════════════════════════════════════════════════════════════════════════

/// Host backed by the process's standard streams, filesystem and shell.
pub struct StdHost {
    stdout: io::Stdout,
}

impl StdHost {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
        }
    }
}

impl Default for StdHost {
    fn default() -> Self {
        Self::new()
    }
}

impl Host for StdHost {
    fn read_line(&mut self) -> Option<String> {
        // A prompt written without a newline must be visible before blocking.
        let _ = self.stdout.flush();
        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(strip_line_ending(line)),
        }
    }

    fn write_str(&mut self, text: &str) -> io::Result<()> {
        self.stdout.write_all(text.as_bytes())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.stdout.flush()
    }

    fn report(&mut self, diagnostic: &OatError) {
        let _ = self.stdout.flush();
        eprintln!("Error: {}", diagnostic);
    }

    fn load_resource(&mut self, identifier: &str) -> io::Result<String> {
        fs::read_to_string(identifier)
    }

    fn execute(&mut self, command: &str) -> io::Result<()> {
        self.stdout.flush()?;
        let status = if cfg!(windows) {
            Command::new("cmd").args(["/C", command]).status()?
        } else {
            Command::new("sh").args(["-c", command]).status()?
        };
        debug!(command, code = ?status.code(), "shell command finished");
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Scripted Host
// ═══════════════════════════════════════════════════════════════════════════

/// In-memory host: scripted input, captured output.
///
/// Shell commands are recorded instead of executed, and resources are
/// served from a map.
#[derive(Debug, Clone, Default)]
pub struct ScriptedHost {
    input: VecDeque<String>,
    output: String,
    diagnostics: Vec<String>,
    resources: HashMap<String, String>,
    commands: Vec<String>,
}

impl ScriptedHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue input lines.
    pub fn with_input<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.input.extend(lines.into_iter().map(Into::into));
        self
    }

    /// Make a resource available to imports.
    pub fn with_resource(mut self, identifier: impl Into<String>, text: impl Into<String>) -> Self {
        self.resources.insert(identifier.into(), text.into());
        self
    }

    /// Queue one more input line.
    pub fn push_input(&mut self, line: impl Into<String>) {
        self.input.push_back(line.into());
    }

    /// Everything written so far.
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Take the captured output, leaving it empty.
    pub fn take_output(&mut self) -> String {
        std::mem::take(&mut self.output)
    }

    /// Diagnostics reported so far, as displayed.
    pub fn diagnostics(&self) -> &[String] {
        &self.diagnostics
    }

    /// Shell commands received so far, after placeholder substitution.
    pub fn commands(&self) -> &[String] {
        &self.commands
    }

    /// Input lines not yet consumed.
    pub fn remaining_input(&self) -> usize {
        self.input.len()
    }
}

impl Host for ScriptedHost {
    fn read_line(&mut self) -> Option<String> {
        self.input.pop_front()
    }

    fn write_str(&mut self, text: &str) -> io::Result<()> {
        self.output.push_str(text);
        Ok(())
    }

    fn report(&mut self, diagnostic: &OatError) {
        self.diagnostics.push(diagnostic.to_string());
    }

    fn load_resource(&mut self, identifier: &str) -> io::Result<String> {
        self.resources.get(identifier).cloned().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("no resource named '{identifier}'"))
        })
    }

    fn execute(&mut self, command: &str) -> io::Result<()> {
        self.commands.push(command.to_string());
        Ok(())
    }
}
