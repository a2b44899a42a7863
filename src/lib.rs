//! OATMEAL: an esoteric language over a resizable tape of bowls.
//!
//! A program is re-read character by character on every run. The data
//! pointer walks a tape of non-negative integers with a sentinel before
//! the first bowl and after the last, control flow is value-directed
//! jumping between goto points inside `/ … \` scopes, and named functions
//! share the tape with their caller while keeping their own control flow.
//!
//! ```
//! use oatmeal::{Interpreter, ScriptedHost};
//!
//! let mut interpreter = Interpreter::with_host(ScriptedHost::new());
//! interpreter.run(">\"^^^_")?;
//! assert_eq!(interpreter.host().output(), "3\n");
//! # Ok::<(), oatmeal::OatError>(())
//! ```

// ═══════════════════════════════════════════════════════════════════════════
// Layer 0: Core (No internal dependencies)
// ═══════════════════════════════════════════════════════════════════════════
pub mod core;

// ═══════════════════════════════════════════════════════════════════════════
// Layer 1: Program text (depends on core)
// ═══════════════════════════════════════════════════════════════════════════
pub mod program;

// ═══════════════════════════════════════════════════════════════════════════
// Layer 2: Runtime (depends on core, program)
// ═══════════════════════════════════════════════════════════════════════════
pub mod runtime;

// ═══════════════════════════════════════════════════════════════════════════
// Layer 3: VM (depends on core, program, runtime)
// ═══════════════════════════════════════════════════════════════════════════
pub mod vm;

// ═══════════════════════════════════════════════════════════════════════════
// Layer 4: Tooling (depends on all)
// ═══════════════════════════════════════════════════════════════════════════
pub mod tooling;

// ═══════════════════════════════════════════════════════════════════════════
// Cross-cutting
// ═══════════════════════════════════════════════════════════════════════════
pub mod audit;

// ═══════════════════════════════════════════════════════════════════════════
// Re-exports
// ═══════════════════════════════════════════════════════════════════════════

pub use crate::core::{Cell, DataPointer, EngineConfig, ErrorCategory, OatError, OatResult, Tape};
pub use program::{Construct, OpCode, Program, Scope, ScopeStack};
pub use runtime::{Function, FunctionTable, Host, ScriptedHost, StdHost};
pub use tooling::{Repl, ReplConfig};
pub use vm::{Interpreter, RunReport};
