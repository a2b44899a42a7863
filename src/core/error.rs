//! Error types for the OATMEAL engine.
//!
//! The language folds almost every abnormal condition into a silent no-op:
//! out-of-bounds reads, writes to read-only bowls, out-of-range jumps,
//! unterminated constructs and unknown characters never produce an error
//! value at all. What remains falls into three categories:
//!
//! - **Reported**: a diagnostic goes to the host's error channel and the
//!   program keeps running (an insert without a preceding right-move, a
//!   function import that could not be read).
//! - **Fatal**: the run is aborted (an instrumentation limit was hit).
//! - **Host**: the host itself failed (output channel, program source).

use thiserror::Error;

/// Result alias used throughout the crate.
pub type OatResult<T> = Result<T, OatError>;

/// Every error the engine or its CLI can surface.
#[derive(Debug, Error)]
pub enum OatError {
    // ═══════════════════════════════════════════════════════════════════
    // Reported (non-fatal) diagnostics
    // ═══════════════════════════════════════════════════════════════════

    /// The insert instruction was not directly preceded by a right-move.
    #[error("\" must be preceded by >")]
    InsertWithoutRightMove {
        /// Offset of the offending `"` in the active text.
        offset: usize,
    },

    /// A function import resource could not be read.
    #[error("could not import from {resource}: {reason}")]
    ImportFailed { resource: String, reason: String },

    // ═══════════════════════════════════════════════════════════════════
    // Fatal run-time errors
    // ═══════════════════════════════════════════════════════════════════

    /// A call would nest deeper than the configured limit.
    #[error("call to '{name}' exceeds the maximum call depth of {limit}")]
    CallDepthExceeded { name: String, limit: usize },

    /// The run dispatched more instructions than the configured limit.
    #[error("step limit of {limit} instructions exceeded")]
    StepLimitExceeded { limit: u64 },

    // ═══════════════════════════════════════════════════════════════════
    // Host failures
    // ═══════════════════════════════════════════════════════════════════

    /// Writing program output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A program file could not be read.
    #[error("File '{path}' not found")]
    ReadSource {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Coarse classification of errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Reported on the error channel; execution continues.
    Reported,
    /// Aborts the current run.
    Fatal,
    /// The host environment failed.
    Host,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Reported => write!(f, "Reported"),
            ErrorCategory::Fatal => write!(f, "Fatal"),
            ErrorCategory::Host => write!(f, "Host"),
        }
    }
}

impl OatError {
    /// Whether execution continues after this error.
    pub fn is_recoverable(&self) -> bool {
        self.category() == ErrorCategory::Reported
    }

    /// Get the category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            OatError::InsertWithoutRightMove { .. } | OatError::ImportFailed { .. } => {
                ErrorCategory::Reported
            }
            OatError::CallDepthExceeded { .. } | OatError::StepLimitExceeded { .. } => {
                ErrorCategory::Fatal
            }
            OatError::Io(_) | OatError::ReadSource { .. } => ErrorCategory::Host,
        }
    }

    /// Stable numeric code, grouped by category.
    pub fn code(&self) -> u32 {
        match self {
            OatError::InsertWithoutRightMove { .. } => 1001,
            OatError::ImportFailed { .. } => 1002,
            OatError::CallDepthExceeded { .. } => 2001,
            OatError::StepLimitExceeded { .. } => 2002,
            OatError::Io(_) => 3001,
            OatError::ReadSource { .. } => 3002,
        }
    }
}
