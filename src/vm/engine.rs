//! The OATMEAL dispatch engine.
//!
//! An [`Interpreter`] owns the whole machine: tape, data pointer, function
//! table, the active [`Frame`] and the frames of suspended callers. Each
//! step reads one character of the active text, routes it, and moves the
//! instruction pointer on or redirects it. A call swaps in a new frame and
//! the same loop keeps going; when the callee's text runs out the caller's
//! frame comes back exactly as it was left.
//!
//! Effects leave the engine only through its [`Host`].

use std::rc::Rc;
use std::time::{Duration, Instant};

use num_traits::{ToPrimitive, Zero};
use tracing::{debug, trace, warn};

use crate::audit::{self, ActionCategory, AuditEntry, Severity};
use crate::core::{Cell, DataPointer, EngineConfig, OatError, OatResult, Tape};
use crate::program::scope::resolve_goto;
use crate::program::{Construct, OpCode, Program, Scope};
use crate::runtime::{substitute_placeholders, FunctionTable, Host, StdHost};

use super::frame::{CallStack, Frame};

/// Label used in traces and audit entries for programs without a file name.
pub const INLINE_PROGRAM: &str = "<inline>";

/// Statistics of one top-level run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Instructions dispatched, across all frames.
    pub steps: u64,
    /// Calls that entered a defined function.
    pub calls: u64,
    /// Deepest call nesting reached (0 when nothing was called).
    pub deepest_call: usize,
    pub duration: Duration,
}

/// The OATMEAL interpreter.
///
/// The function table lives as long as the interpreter; everything else is
/// reset at the start of every [`run`](Interpreter::run).
pub struct Interpreter<H: Host = StdHost> {
    config: EngineConfig,
    host: H,
    functions: FunctionTable,
    tape: Tape,
    pointer: DataPointer,
    frame: Frame,
    callers: CallStack,
    previous_was_right: bool,
    stats: RunReport,
    correlation_id: Option<String>,
}

impl Interpreter<StdHost> {
    /// Interpreter on the standard streams with the default configuration.
    pub fn new() -> Self {
        Self::with_config_and_host(EngineConfig::default(), StdHost::new())
    }

    /// Interpreter on the standard streams.
    pub fn with_config(config: EngineConfig) -> Self {
        Self::with_config_and_host(config, StdHost::new())
    }
}

impl Default for Interpreter<StdHost> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Host> Interpreter<H> {
    /// Interpreter on a custom host with the default configuration.
    pub fn with_host(host: H) -> Self {
        Self::with_config_and_host(EngineConfig::default(), host)
    }

    pub fn with_config_and_host(config: EngineConfig, host: H) -> Self {
        Self {
            config,
            host,
            functions: FunctionTable::new(),
            tape: Tape::new(),
            pointer: DataPointer::default(),
            frame: Frame::default(),
            callers: CallStack::new(),
            previous_was_right: false,
            stats: RunReport::default(),
            correlation_id: None,
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Accessors
    // ═══════════════════════════════════════════════════════════════════

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The tape as left by the last run.
    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    /// Read-only bowl indices as left by the last run, ascending.
    pub fn readonly_cells(&self) -> Vec<usize> {
        self.tape.readonly().collect()
    }

    pub fn pointer(&self) -> DataPointer {
        self.pointer
    }

    /// Instruction pointer of the innermost frame.
    ///
    /// After an aborted run this is where execution stopped.
    pub fn instruction_pointer(&self) -> usize {
        self.frame.ip
    }

    /// Call nesting of the innermost frame.
    pub fn call_depth(&self) -> usize {
        self.callers.depth()
    }

    pub fn functions(&self) -> &FunctionTable {
        &self.functions
    }

    pub fn functions_mut(&mut self) -> &mut FunctionTable {
        &mut self.functions
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    // ═══════════════════════════════════════════════════════════════════
    // Running
    // ═══════════════════════════════════════════════════════════════════

    /// Run a program from scratch.
    ///
    /// Tape, pointer and scopes start empty; functions defined by earlier
    /// runs stay callable. A finished run writes one trailing newline.
    pub fn run(&mut self, source: &str) -> OatResult<RunReport> {
        self.run_named(INLINE_PROGRAM, source)
    }

    /// Run a program, labelling traces and audit entries with `name`.
    pub fn run_named(&mut self, name: &str, source: &str) -> OatResult<RunReport> {
        let started = Instant::now();
        self.reset(Program::new(source));
        self.correlation_id = audit::audit_enabled().then(|| audit::generate_correlation_id("run"));

        debug!(program = name, chars = self.frame.program.len(), "run started");
        self.audit(
            AuditEntry::new("RUN_START", "Program", name, "Run started")
                .with_meta("chars", self.frame.program.len()),
        );

        let result = self.execute().and_then(|()| self.finish_output());
        self.stats.duration = started.elapsed();
        let report = self.stats.clone();

        match result {
            Ok(()) => {
                debug!(program = name, steps = report.steps, calls = report.calls, "run finished");
                self.audit(
                    AuditEntry::new("RUN_FINISH", "Program", name, "Run finished")
                        .with_duration_us(report.duration.as_micros() as u64)
                        .with_meta("steps", report.steps)
                        .with_meta("calls", report.calls),
                );
                Ok(report)
            }
            Err(err) => {
                // Output already produced stays visible.
                if let Err(e) = self.host.flush() {
                    warn!(error = %e, "failed to flush output");
                }
                debug!(program = name, error = %err, "run aborted");
                self.audit(
                    AuditEntry::new("RUN_FINISH", "Program", name, err.to_string())
                        .failed(Severity::Error)
                        .with_duration_us(report.duration.as_micros() as u64)
                        .with_meta("code", err.code())
                        .with_meta("steps", report.steps),
                );
                Err(err)
            }
        }
    }

    /// Import every function definition found in a host resource.
    ///
    /// Returns the number of definitions registered.
    pub fn load_functions(&mut self, resource: &str) -> OatResult<usize> {
        let text = self
            .host
            .load_resource(resource)
            .map_err(|e| OatError::ImportFailed {
                resource: resource.to_string(),
                reason: e.to_string(),
            })?;
        let count = self.functions.import(&text);
        debug!(resource, count, "functions imported");
        self.audit(
            AuditEntry::new("IMPORT", "Resource", resource, format!("Imported {count} definitions"))
                .with_category(ActionCategory::Function)
                .with_meta("definitions", count),
        );
        Ok(count)
    }

    fn reset(&mut self, program: Program) {
        self.tape = Tape::new();
        self.pointer = DataPointer::default();
        self.frame = Frame::top_level(Rc::new(program));
        self.callers.clear();
        self.previous_was_right = false;
        self.stats = RunReport::default();
    }

    fn finish_output(&mut self) -> OatResult<()> {
        if self.config.trailing_newline {
            self.host.write_str("\n")?;
        }
        self.host.flush()?;
        Ok(())
    }

    /// Dispatch until the top-level text runs out.
    fn execute(&mut self) -> OatResult<()> {
        loop {
            if !self.frame.is_finished() {
                self.count_step()?;
                self.step()?;
                continue;
            }
            let Some(caller) = self.callers.pop() else {
                return Ok(());
            };
            let callee = std::mem::replace(&mut self.frame, caller);
            debug!(function = callee.label(), depth = self.callers.depth(), "return");
            self.previous_was_right = false;
        }
    }

    fn count_step(&mut self) -> OatResult<()> {
        self.stats.steps += 1;
        match self.config.max_steps {
            Some(limit) if self.stats.steps > limit => Err(OatError::StepLimitExceeded { limit }),
            _ => Ok(()),
        }
    }

    /// Dispatch the instruction under the instruction pointer.
    fn step(&mut self) -> OatResult<()> {
        let ip = self.frame.ip;
        let Some(c) = self.frame.program.char_at(ip) else {
            self.frame.ip = ip + 1;
            return Ok(());
        };
        let op = OpCode::decode(c);
        trace!(
            ip,
            op = op.name(),
            pointer = %self.pointer,
            frame = self.frame.label(),
            "dispatch"
        );

        let was_right = std::mem::replace(&mut self.previous_was_right, false);
        let pos = self.pointer.position();

        let next = match op {
            // ═══════════════════════════════════════════════════════════
            // Pointer
            // ═══════════════════════════════════════════════════════════
            OpCode::MoveRight => {
                self.pointer.move_right(self.tape.len());
                self.previous_was_right = true;
                ip + 1
            }
            OpCode::MoveLeft => {
                self.pointer.move_left(self.tape.len());
                ip + 1
            }

            // ═══════════════════════════════════════════════════════════
            // Bowl Mutation
            // ═══════════════════════════════════════════════════════════
            OpCode::Increment => {
                self.tape.increment(pos);
                ip + 1
            }
            OpCode::Decrement => {
                self.tape.decrement(pos);
                ip + 1
            }
            OpCode::Insert => {
                if was_right {
                    self.pointer = DataPointer::new(self.tape.insert_at(pos));
                } else {
                    self.report(OatError::InsertWithoutRightMove { offset: ip });
                }
                ip + 1
            }
            OpCode::Delete => {
                if self.tape.delete_at(pos) {
                    self.pointer.settle_after_delete(self.tape.len());
                }
                ip + 1
            }
            OpCode::Not => {
                self.tape.logical_not(pos);
                ip + 1
            }
            OpCode::Distribute => {
                self.tape.distribute(pos);
                ip + 1
            }
            OpCode::ToggleReadOnly => {
                self.tape.toggle_readonly(pos);
                ip + 1
            }

            // ═══════════════════════════════════════════════════════════
            // Control Flow
            // ═══════════════════════════════════════════════════════════
            OpCode::Goto => {
                let value = self.tape.get(pos);
                resolve_goto(&self.frame.program, ip, &value, &self.frame.scopes)
            }
            OpCode::ScopeOpen => {
                if let Some(end) = self.frame.program.matching_close(ip) {
                    self.frame.scopes.push(Scope { start: ip, end });
                }
                ip + 1
            }
            OpCode::ScopeClose => {
                self.frame.scopes.pop();
                ip + 1
            }

            // ═══════════════════════════════════════════════════════════
            // I/O
            // ═══════════════════════════════════════════════════════════
            OpCode::InputNumber => {
                self.input_number(pos);
                ip + 1
            }
            OpCode::InputChar => {
                self.input_char(pos);
                ip + 1
            }
            OpCode::OutputNumber => {
                if let Some(value) = self.tape.value(pos) {
                    let digits = value.to_string();
                    self.host.write_str(&digits)?;
                }
                ip + 1
            }
            OpCode::OutputChar => {
                let glyph = self
                    .tape
                    .value(pos)
                    .and_then(ToPrimitive::to_u32)
                    .and_then(char::from_u32);
                if let Some(glyph) = glyph {
                    let mut buf = [0u8; 4];
                    self.host.write_str(glyph.encode_utf8(&mut buf))?;
                }
                ip + 1
            }

            // ═══════════════════════════════════════════════════════════
            // Constructs
            // ═══════════════════════════════════════════════════════════
            OpCode::Comment | OpCode::Define | OpCode::Directive => {
                match Construct::parse(&self.frame.program, ip) {
                    Some(construct) => return self.construct(construct, was_right),
                    None => {
                        // A '{' that opens no definition keeps the flag.
                        if op == OpCode::Define {
                            self.previous_was_right = was_right;
                        }
                        ip + 1
                    }
                }
            }

            OpCode::Annotation | OpCode::Reserved | OpCode::Nop => ip + 1,
        };

        self.frame.ip = next;
        Ok(())
    }

    fn construct(&mut self, construct: Construct, was_right: bool) -> OatResult<()> {
        self.frame.ip = construct.resume();
        match construct {
            Construct::Comment { .. } => {}
            Construct::Define { name, body, .. } => {
                debug!(function = %name, body = %body, "define");
                self.functions.define(name, body);
            }
            Construct::Call { name, .. } => self.call(&name, was_right)?,
            Construct::Import { resource, .. } => {
                if let Err(err) = self.load_functions(&resource) {
                    self.report(err);
                }
            }
            Construct::Shell { command, .. } => self.shell(&command),
        }
        Ok(())
    }

    /// Enter a function; the caller's frame must already point past the call.
    fn call(&mut self, name: &str, was_right: bool) -> OatResult<()> {
        let Some(program) = self.functions.get(name).map(|f| f.program()) else {
            debug!(function = name, "call to undefined function ignored");
            return Ok(());
        };
        let depth = self.callers.depth() + 1;
        if let Some(limit) = self.config.max_call_depth {
            if depth > limit {
                return Err(OatError::CallDepthExceeded {
                    name: name.to_string(),
                    limit,
                });
            }
        }

        debug!(function = name, depth, "call");
        let caller = std::mem::replace(&mut self.frame, Frame::call(name, program));
        self.callers.push(caller);
        // The callee sees the flag as it was before the call construct.
        self.previous_was_right = was_right;
        self.stats.calls += 1;
        self.stats.deepest_call = self.stats.deepest_call.max(depth);
        Ok(())
    }

    fn shell(&mut self, template: &str) {
        let command = substitute_placeholders(template, &self.tape);
        debug!(command = %command, "shell");
        let entry = AuditEntry::new("SHELL", "Command", command.as_str(), "Shell command issued")
            .with_category(ActionCategory::Shell);
        match self.host.execute(&command) {
            Ok(()) => self.audit(entry),
            Err(e) => {
                warn!(command = %command, error = %e, "shell command failed");
                self.audit(entry.failed(Severity::Warning).with_meta("error", e));
            }
        }
    }

    fn input_number(&mut self, pos: isize) {
        if !self.tape.is_mutable(pos) {
            return;
        }
        let Some(line) = self.host.read_line() else {
            return;
        };
        if let Some(value) = parse_number(&line) {
            self.tape.set(pos, value);
        }
    }

    fn input_char(&mut self, pos: isize) {
        if !self.tape.is_mutable(pos) {
            return;
        }
        let Some(first) = self.host.read_line().and_then(|line| line.chars().next()) else {
            return;
        };
        self.tape.set(pos, Cell::from(u32::from(first)));
    }

    /// Deliver a non-fatal diagnostic; execution continues.
    fn report(&mut self, err: OatError) {
        debug!(code = err.code(), error = %err, "diagnostic");
        self.audit(
            AuditEntry::new("DIAGNOSTIC", "Program", self.frame.label(), err.to_string())
                .with_category(ActionCategory::Diagnostic)
                .failed(Severity::Warning)
                .with_meta("code", err.code()),
        );
        self.host.report(&err);
    }

    fn audit(&self, entry: AuditEntry) {
        if !audit::audit_enabled() {
            return;
        }
        match &self.correlation_id {
            Some(cid) => audit::audit(entry.with_correlation(cid.as_str())),
            None => audit::audit(entry),
        }
    }
}

/// Parse a numeric input line.
///
/// Surrounding whitespace is ignored, a sign is accepted and digits may be
/// grouped with single underscores (`1_000`). Negative values clamp to
/// zero; anything that is not an integer is `None`.
pub fn parse_number(line: &str) -> Option<Cell> {
    let text = line.trim();
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    if !is_digit_groups(digits) {
        return None;
    }
    if negative {
        return Some(Cell::zero());
    }
    let plain: String = digits.chars().filter(|&c| c != '_').collect();
    plain.parse().ok()
}

/// Non-empty runs of ASCII digits joined by single underscores.
fn is_digit_groups(digits: &str) -> bool {
    !digits.is_empty()
        && digits
            .split('_')
            .all(|group| !group.is_empty() && group.bytes().all(|b| b.is_ascii_digit()))
}
