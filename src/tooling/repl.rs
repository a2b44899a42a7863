//! REPL (Read-Eval-Print-Loop) for OATMEAL.
//!
//! Every entered line runs as a complete program on one long-lived
//! interpreter: the tape starts empty each time, while functions defined
//! by earlier lines stay callable.
//!
//! # Commands
//!
//! - `:quit`, `:q` - Exit the REPL
//! - `:help`, `:h` - Show help
//! - `:tape`, `:t` - Show the tape and pointer left by the last line
//! - `:functions`, `:f` - List defined functions
//! - `:forget` - Forget every function
//! - `:load <resource>` - Import function definitions
//! - `:history` - Show entered lines
//!
//! Prompts and command output go through the interpreter's host, the same
//! channel as program output, so a scripted host can drive a whole session.

use crate::audit::{self, ActionCategory, AuditEntry};
use crate::core::{EngineConfig, ErrorCategory, OatResult};
use crate::runtime::{Host, StdHost};
use crate::vm::Interpreter;

/// REPL configuration.
#[derive(Debug, Clone)]
pub struct ReplConfig {
    pub prompt: String,
    /// Limits for each entered line.
    pub engine: EngineConfig,
    /// Print the banner on start.
    pub banner: bool,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            prompt: "oat> ".to_string(),
            engine: EngineConfig::sandboxed(),
            banner: true,
        }
    }
}

/// Interactive session over a single interpreter.
pub struct Repl<H: Host = StdHost> {
    config: ReplConfig,
    interpreter: Interpreter<H>,
    history: Vec<String>,
}

impl Repl<StdHost> {
    /// REPL on the standard streams with the default config.
    pub fn new() -> Self {
        Self::with_config(ReplConfig::default())
    }

    pub fn with_config(config: ReplConfig) -> Self {
        Self::with_host(config, StdHost::new())
    }
}

impl Default for Repl<StdHost> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Host> Repl<H> {
    pub fn with_host(config: ReplConfig, host: H) -> Self {
        let interpreter = Interpreter::with_config_and_host(config.engine.clone(), host);
        Self {
            config,
            interpreter,
            history: Vec::new(),
        }
    }

    pub fn interpreter(&self) -> &Interpreter<H> {
        &self.interpreter
    }

    pub fn interpreter_mut(&mut self) -> &mut Interpreter<H> {
        &mut self.interpreter
    }

    /// Lines evaluated so far (commands excluded).
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Run until `:quit` or end of input.
    ///
    /// Only host failures end the session early; program errors are
    /// printed and the session continues.
    pub fn run(&mut self) -> OatResult<()> {
        if self.config.banner {
            self.say("OATMEAL REPL")?;
            self.say("Type :help for commands, :quit to exit")?;
        }
        audit::audit(
            AuditEntry::new("SESSION_START", "Session", "repl", "REPL session started")
                .with_category(ActionCategory::Session),
        );

        loop {
            let prompt = self.config.prompt.clone();
            self.write(&prompt)?;
            self.interpreter.host_mut().flush()?;

            let Some(input) = self.interpreter.host_mut().read_line() else {
                self.say("")?;
                break;
            };
            let line = input.trim();
            if line.is_empty() {
                continue;
            }

            if line.starts_with(':') {
                if self.handle_command(line)? {
                    break;
                }
                continue;
            }

            self.eval(line)?;
            self.history.push(line.to_string());
        }

        audit::audit(
            AuditEntry::new("SESSION_END", "Session", "repl", "REPL session ended")
                .with_category(ActionCategory::Session)
                .with_meta("lines", self.history.len()),
        );
        self.say("Goodbye!")
    }

    /// Run one line as a program.
    pub fn eval(&mut self, code: &str) -> OatResult<()> {
        match self.interpreter.run(code) {
            Ok(_) => Ok(()),
            Err(err) if err.category() == ErrorCategory::Host => Err(err),
            Err(err) => self.say(&format!("\nError: {}", err)),
        }
    }

    /// Handle a `:command`. Returns `true` when the session should end.
    pub fn handle_command(&mut self, cmd: &str) -> OatResult<bool> {
        let (command, args) = match cmd.split_once(' ') {
            Some((command, args)) => (command, args.trim()),
            None => (cmd, ""),
        };

        match command {
            ":quit" | ":q" => return Ok(true),
            ":help" | ":h" => self.show_help()?,
            ":tape" | ":t" => {
                let tape = format!("{:?}", self.interpreter.tape());
                let pointer = self.interpreter.pointer();
                self.say(&format!("{}  pointer: {}", tape, pointer))?;
            }
            ":functions" | ":f" => self.show_functions()?,
            ":forget" => {
                let count = self.interpreter.functions().len();
                self.interpreter.functions_mut().clear();
                self.say(&format!("Forgot {} function(s).", count))?;
            }
            ":load" | ":l" => {
                if args.is_empty() {
                    self.say("Usage: :load <resource>")?;
                } else {
                    match self.interpreter.load_functions(args) {
                        Ok(count) => self.say(&format!("Loaded {} definition(s) from {}.", count, args))?,
                        Err(err) => self.say(&format!("Error: {}", err))?,
                    }
                }
            }
            ":history" => {
                let lines: Vec<String> = self
                    .history
                    .iter()
                    .enumerate()
                    .map(|(i, line)| format!("{}: {}", i + 1, line))
                    .collect();
                for line in lines {
                    self.say(&line)?;
                }
            }
            _ => {
                self.say(&format!("Unknown command: {}", command))?;
                self.say("Type :help for available commands.")?;
            }
        }
        Ok(false)
    }

    fn show_help(&mut self) -> OatResult<()> {
        self.say("OATMEAL REPL Commands:")?;
        self.say("  :quit, :q           Exit the REPL")?;
        self.say("  :help, :h           Show this help")?;
        self.say("  :tape, :t           Show the tape left by the last line")?;
        self.say("  :functions, :f      List defined functions")?;
        self.say("  :forget             Forget every function")?;
        self.say("  :load <resource>    Import function definitions")?;
        self.say("  :history            Show entered lines")?;
        self.say("")?;
        self.say("Any other line runs as an OATMEAL program.")
    }

    fn show_functions(&mut self) -> OatResult<()> {
        let listing: Vec<String> = self
            .interpreter
            .functions()
            .names()
            .into_iter()
            .filter_map(|name| {
                let body = self.interpreter.functions().body(name)?;
                Some(format!("  {} = {}", name, body))
            })
            .collect();
        if listing.is_empty() {
            return self.say("No functions defined.");
        }
        for line in listing {
            self.say(&line)?;
        }
        Ok(())
    }

    fn write(&mut self, text: &str) -> OatResult<()> {
        self.interpreter.host_mut().write_str(text)?;
        Ok(())
    }

    fn say(&mut self, line: &str) -> OatResult<()> {
        self.write(line)?;
        self.write("\n")
    }
}
