//! Execution frames.
//!
//! A frame is one active program text with its own instruction pointer and
//! scope stack. The top-level program runs in the first frame; every call
//! suspends the current frame on the [`CallStack`] and starts a fresh one
//! for the callee. Tape, data pointer and read-only marks are not part of a
//! frame: they are shared by all of them.

use std::rc::Rc;

use crate::program::{Program, ScopeStack};

/// Control-flow context of one program text.
#[derive(Debug, Clone)]
pub struct Frame {
    pub program: Rc<Program>,
    /// Offset of the next instruction to dispatch.
    pub ip: usize,
    pub scopes: ScopeStack,
    /// Name of the called function; `None` for the top-level program.
    pub function: Option<String>,
}

impl Frame {
    /// Frame for a top-level run.
    pub fn top_level(program: Rc<Program>) -> Self {
        Self {
            program,
            ip: 0,
            scopes: ScopeStack::new(),
            function: None,
        }
    }

    /// Frame for a call to `name`.
    pub fn call(name: impl Into<String>, program: Rc<Program>) -> Self {
        Self {
            program,
            ip: 0,
            scopes: ScopeStack::new(),
            function: Some(name.into()),
        }
    }

    /// Whether the instruction pointer has run off the end of the text.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.ip >= self.program.len()
    }

    /// Label for traces.
    pub fn label(&self) -> &str {
        self.function.as_deref().unwrap_or("<main>")
    }
}

impl Default for Frame {
    fn default() -> Self {
        Frame::top_level(Rc::new(Program::default()))
    }
}

/// Suspended callers, innermost last.
#[derive(Debug, Clone, Default)]
pub struct CallStack {
    frames: Vec<Frame>,
}

impl CallStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Suspend a caller.
    pub fn push(&mut self, frame: Frame) {
        self.frames.push(frame);
    }

    /// Resume the most recently suspended caller.
    pub fn pop(&mut self) -> Option<Frame> {
        self.frames.pop()
    }

    /// Number of suspended callers, which is the nesting depth of the
    /// active frame.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }

    /// Suspended frames from outermost to innermost.
    pub fn iter(&self) -> impl Iterator<Item = &Frame> {
        self.frames.iter()
    }
}
