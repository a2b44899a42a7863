//! Integration tests for the `oatmeal` binary.
//!
//! Component: CLI
//!
//! These tests verify:
//! - Usage banner, inline code and program files
//! - Exit status and stderr for unreadable files and fatal errors
//! - Diagnostics on stderr while stdout stays byte-exact
//! - Standard input, file imports and the audit trail

#![cfg(test)]

use std::fs;
use std::io::Write;
use std::process::{Command, Output, Stdio};

fn oatmeal(args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_oatmeal"))
        .args(args)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn oatmeal");
    {
        let input = child.stdin.as_mut().expect("stdin is piped");
        input.write_all(stdin.as_bytes()).expect("failed to write stdin");
    }
    child.wait_with_output().expect("oatmeal did not finish")
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

// =============================================================================
// Invocation Tests
// =============================================================================

mod invocation {
    use super::*;

    #[test]
    fn no_arguments_prints_usage() {
        let output = oatmeal(&[], "");

        assert!(output.status.success());
        assert!(stdout_of(&output).contains("Usage: oatmeal <program.oat>"));
    }

    #[test]
    fn inline_code_runs() {
        let output = oatmeal(&["-e", ">\"^^^_"], "");

        assert!(output.status.success());
        assert_eq!(stdout_of(&output), "3\n");
    }

    #[test]
    fn program_file_runs() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hello.oat");
        fs::write(&path, "[prints 2]\n>\"^^_\n").unwrap();

        // Act
        let output = oatmeal(&[path.to_str().unwrap()], "");

        // Assert
        assert!(output.status.success());
        assert_eq!(stdout_of(&output), "2\n");
    }

    #[test]
    fn missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.oat");
        let path = path.to_str().unwrap();

        let output = oatmeal(&[path], "");

        assert_eq!(output.status.code(), Some(1));
        assert!(stderr_of(&output).contains(&format!("Error: File '{}' not found", path)));
        assert_eq!(stdout_of(&output), "");
    }

    #[test]
    fn step_limit_fails_with_message() {
        let output = oatmeal(&["--max-steps", "5", "-e", ">\"/'a'\\"], "");

        assert_eq!(output.status.code(), Some(1));
        assert!(stderr_of(&output).contains("Error: step limit of 5 instructions exceeded"));
    }
}

// =============================================================================
// I/O Tests
// =============================================================================

mod io {
    use super::*;

    #[test]
    fn diagnostics_go_to_stderr() {
        let output = oatmeal(&["-e", "\">\"^_"], "");

        assert!(output.status.success());
        assert_eq!(stdout_of(&output), "1\n");
        assert!(stderr_of(&output).contains("Error: \" must be preceded by >"));
    }

    #[test]
    fn reads_numbers_from_stdin() {
        let output = oatmeal(&["-e", ">\"~_>\"~_"], "41\r\n7\n");

        assert_eq!(stdout_of(&output), "417\n");
    }

    #[test]
    fn imports_functions_from_a_file() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let lib = dir.path().join("lib.oat");
        fs::write(&lib, "{@inc@^@}\n{@show@_@}\n").unwrap();
        let code = format!("=${}=>\"=@inc==@inc==@show=", lib.display());

        // Act
        let output = oatmeal(&["-e", &code], "");

        // Assert
        assert!(output.status.success());
        assert_eq!(stdout_of(&output), "2\n");
    }

    #[cfg(unix)]
    #[test]
    fn shell_output_follows_program_output() {
        let output = oatmeal(&["-e", ">\"^_=$$echo \\cell(0)\\=^_"], "");

        assert_eq!(stdout_of(&output), "11\n2\n");
    }
}

// =============================================================================
// Session and Audit Tests
// =============================================================================

mod session {
    use super::*;

    #[test]
    fn repl_evaluates_lines_until_quit() {
        let output = oatmeal(&["--repl"], "{@two@^^@}\n>\"=@two=_\n:q\n");

        let stdout = stdout_of(&output);
        assert!(output.status.success());
        assert!(stdout.contains("2\n"));
        assert!(stdout.ends_with("Goodbye!\n"));
    }

    #[test]
    fn audit_trail_is_written_as_json_lines() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("audit.jsonl");

        // Act
        let output = oatmeal(
            &["-e", ">\"^_", "--audit", log.to_str().unwrap(), "--audit-json"],
            "",
        );

        // Assert
        assert!(output.status.success());
        assert_eq!(stdout_of(&output), "1\n");
        let text = fs::read_to_string(&log).unwrap();
        let actions: Vec<String> = text
            .lines()
            .map(|line| {
                let value: serde_json::Value = serde_json::from_str(line).unwrap();
                value["action"].as_str().unwrap().to_string()
            })
            .collect();
        assert_eq!(actions, vec!["STARTUP", "RUN_START", "RUN_FINISH"]);
    }
}
