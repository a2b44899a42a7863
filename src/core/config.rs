//! Engine configuration.
//!
//! The language itself imposes no limits: a program runs until it finishes
//! or exhausts the host. The limits here are optional instrumentation for
//! embedders, tests and the REPL; with both unset the engine behaves
//! exactly as the language describes.

/// Configuration for an [`Interpreter`](crate::vm::Interpreter).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Maximum nesting of function calls (`None` = unbounded).
    pub max_call_depth: Option<usize>,
    /// Maximum instructions dispatched per run (`None` = unbounded).
    pub max_steps: Option<u64>,
    /// Emit the newline that terminates every top-level run.
    pub trailing_newline: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_call_depth: None,
            max_steps: None,
            trailing_newline: true,
        }
    }
}

impl EngineConfig {
    /// No limits at all (the default).
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Bounded call depth and step count.
    ///
    /// Suitable for running untrusted or generated programs that may never
    /// terminate.
    pub fn sandboxed() -> Self {
        Self {
            max_call_depth: Some(10_000),
            max_steps: Some(10_000_000),
            trailing_newline: true,
        }
    }

    /// Builder-style override of the call depth limit.
    pub fn with_max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = Some(depth);
        self
    }

    /// Builder-style override of the step limit.
    pub fn with_max_steps(mut self, steps: u64) -> Self {
        self.max_steps = Some(steps);
        self
    }
}
