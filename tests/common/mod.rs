//! Shared test utilities for OATMEAL integration tests.
//!
//! This module provides:
//! - Interpreter builders over a scripted host
//! - Output and tape assertion helpers
//! - Program generators for repetitive source text
//!
//! ## AAA Pattern
//!
//! All tests follow the Arrange-Act-Assert pattern:
//! - Arrange: Set up the host, resources and configuration
//! - Act: Run the program under test
//! - Assert: Verify output, tape and diagnostics

#![allow(dead_code)]

use oatmeal::*;

// =============================================================================
// Interpreter Builders
// =============================================================================

/// Run `code` on a fresh interpreter with no input.
///
/// # Panics
/// Panics if the run fails, which is appropriate for test code.
pub fn run(code: &str) -> Interpreter<ScriptedHost> {
    run_on(ScriptedHost::new(), code)
}

/// Run `code` with the given input lines.
pub fn run_with_input(code: &str, input: &[&str]) -> Interpreter<ScriptedHost> {
    run_on(ScriptedHost::new().with_input(input.iter().copied()), code)
}

/// Run `code` on a prepared host.
pub fn run_on(host: ScriptedHost, code: &str) -> Interpreter<ScriptedHost> {
    let mut interpreter = Interpreter::with_config_and_host(sandboxed(), host);
    interpreter.run(code).expect("program failed");
    interpreter
}

/// Run `code` expecting a fatal error.
pub fn run_err(config: EngineConfig, code: &str) -> (Interpreter<ScriptedHost>, OatError) {
    let mut interpreter = Interpreter::with_config_and_host(config, ScriptedHost::new());
    let err = interpreter.run(code).expect_err("program should fail");
    (interpreter, err)
}

/// Limits generous enough for any test program that terminates.
pub fn sandboxed() -> EngineConfig {
    EngineConfig::sandboxed().with_max_steps(100_000)
}

// =============================================================================
// Assertion Helpers
// =============================================================================

/// Assert the complete output of a run, trailing newline included.
pub fn assert_output(interpreter: &Interpreter<ScriptedHost>, expected: &str) {
    assert_eq!(
        interpreter.host().output(),
        expected,
        "unexpected output; tape was {:?}",
        interpreter.tape()
    );
}

/// Assert the bowl values left by a run.
pub fn assert_cells(interpreter: &Interpreter<ScriptedHost>, expected: &[u64]) {
    let expected: Vec<Cell> = expected.iter().copied().map(Cell::from).collect();
    assert_eq!(interpreter.tape().cells(), expected.as_slice());
}

/// Assert the diagnostics reported during a run.
pub fn assert_diagnostics(interpreter: &Interpreter<ScriptedHost>, expected: &[&str]) {
    let actual: Vec<&str> = interpreter.host().diagnostics().iter().map(String::as_str).collect();
    assert_eq!(actual, expected);
}

// =============================================================================
// Program Generators
// =============================================================================

/// Source that appends one bowl per value, leaving the pointer on the last.
pub fn bowls(values: &[u64]) -> String {
    values
        .iter()
        .map(|&v| format!(">\"{}", "^".repeat(v as usize)))
        .collect()
}
