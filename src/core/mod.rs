//! Core machine types for the OATMEAL engine.
//!
//! - **Tape**: the resizable row of bowls and its read-only marks
//! - **DataPointer**: pointer arithmetic with wrap-around sentinels
//! - **Error**: the error taxonomy shared by every layer
//! - **Config**: optional engine limits
//!
//! # Layer 0 - No Internal Dependencies

pub mod config;
pub mod error;
pub mod pointer;
pub mod tape;

pub use config::EngineConfig;
pub use error::{ErrorCategory, OatError, OatResult};
pub use pointer::DataPointer;
pub use tape::{Cell, Tape};
