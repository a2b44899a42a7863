//! Tooling layer for OATMEAL.
//!
//! - **REPL**: interactive Read-Eval-Print Loop over one interpreter

pub mod repl;

pub use repl::{Repl, ReplConfig};
