//! Virtual machine for OATMEAL.
//!
//! - **Frame**: one active program text with its instruction pointer and
//!   scope stack, plus the stack of suspended callers
//! - **Engine**: the [`Interpreter`] and its dispatch loop
//!
//! # Architecture
//!
//! Calls never recurse on the native stack. The interpreter keeps the
//! active frame in hand and parks callers on an explicit [`CallStack`], so
//! call depth can be bounded by configuration without changing what a
//! program does.

pub mod engine;
pub mod frame;

pub use engine::{parse_number, Interpreter, RunReport, INLINE_PROGRAM};
pub use frame::{CallStack, Frame};
