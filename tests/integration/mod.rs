//! Integration tests for OATMEAL.
//!
//! This module organises integration tests by component.

pub mod cli;
pub mod engine;
pub mod functions;
