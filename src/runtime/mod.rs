//! Runtime layer for OATMEAL.
//!
//! This module provides the engine's collaborators:
//!
//! - **Functions**: the name-to-body function table and import scanning
//! - **Host**: input, output, diagnostics, resources and shell access
//! - **Shell**: placeholder substitution for shell directives

pub mod functions;
pub mod host;
pub mod shell;

pub use functions::{scan_definitions, Function, FunctionTable};
pub use host::{Host, ScriptedHost, StdHost};
pub use shell::substitute_placeholders;
