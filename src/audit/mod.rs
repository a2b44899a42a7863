//! Structured audit trail for OATMEAL runs.
//!
//! Append-only, structured records of what a run did to the world outside
//! the tape: which programs ran and how they ended, which resources were
//! imported, which shell commands were issued, and which diagnostics were
//! reported. Per-instruction detail belongs to `tracing`, not here.
//!
//! # Design Principles
//!
//! - **Immutable**: entries cannot be modified after creation
//! - **Structured**: WHAT/WHICH/WHEN/OUTCOME for every event
//! - **Opt-in**: the global logger is a no-op until initialised
//!
//! # Modules
//!
//! - `entry`: audit entry types (AuditEntry, Severity, Outcome, ActionCategory)
//! - `logger`: file/stderr logger with text and JSON Lines formats
//! - `global`: process-wide logger used by the engine
//!
//! # Example
//!
//! ```no_run
//! use oatmeal::audit::{init_global_logger, AuditConfig, AuditFormat};
//!
//! init_global_logger(AuditConfig::file("oatmeal-audit.jsonl").with_format(AuditFormat::JsonLines))?;
//! # Ok::<(), std::io::Error>(())
//! ```

mod entry;
mod global;
mod logger;

pub use entry::{ActionCategory, AuditEntry, Outcome, Severity};
pub use global::{audit, audit_enabled, global_logger, init_global_logger};
pub use logger::{generate_correlation_id, AuditConfig, AuditFormat, AuditLogger};
