//! Integration tests for functions and directives.
//!
//! Component: Runtime (FunctionTable, Host) through the VM
//!
//! These tests verify:
//! - Inline definitions and calls
//! - Callee isolation of control flow
//! - Imports from host resources
//! - Shell directives and placeholder substitution
//! - Call depth limits

#![cfg(test)]

use crate::common::*;

use oatmeal::*;

// =============================================================================
// Definition and Call Tests
// =============================================================================

mod calls {
    use super::*;

    #[test]
    fn redefinition_replaces_body() {
        let result = run("{@f@^@}{@f@^^^@}>\"=@f=_");

        assert_output(&result, "3\n");
        assert_eq!(result.functions().body("f"), Some("^^^"));
    }

    #[test]
    fn empty_name_is_a_valid_function() {
        let result = run("{@@^@}>\"=@==@=_");

        assert_output(&result, "2\n");
    }

    #[test]
    fn unterminated_call_is_inert() {
        let result = run("{@f@^@}>\"=@f_");

        // Only '=' is consumed; '@', 'f' are no-ops and '_' prints.
        assert_output(&result, "0\n");
    }

    #[test]
    fn definition_does_not_execute_body() {
        let result = run("{@noisy@_@}>\"^_");

        assert_output(&result, "1\n");
    }

    #[test]
    fn definitions_survive_into_later_runs() {
        // Arrange
        let mut interpreter = Interpreter::with_host(ScriptedHost::new());
        interpreter.run("{@add3@^^^@}").unwrap();

        // Act
        let report = interpreter.run(">\"=@add3==@add3=_").unwrap();

        // Assert
        assert_eq!(interpreter.host().output(), "\n6\n");
        assert_eq!(report.calls, 2);
        assert_eq!(report.deepest_call, 1);
    }

    #[test]
    fn callee_scope_does_not_leak_into_caller() {
        // Arrange: the callee leaves its scope through a zero goto, so its
        // scope is never popped by '\'.
        let code = format!("{{@skip@/'a'^\\@}}{}=@skip=^_", bowls(&[0]));

        // Act
        let result = run(&code);

        // Assert
        assert_output(&result, "1\n");
    }

    #[test]
    fn host_defined_recursion_hits_the_depth_limit() {
        // Arrange: bodies cannot name a function inside '@…@', so build
        // the recursive function through the table.
        let config = EngineConfig::default().with_max_call_depth(8);
        let mut interpreter = Interpreter::with_config_and_host(config, ScriptedHost::new());
        interpreter.functions_mut().define("deeper", "^=@deeper=");

        // Act
        let err = interpreter.run(">\"=@deeper=").unwrap_err();

        // Assert
        assert!(matches!(
            err,
            OatError::CallDepthExceeded { ref name, limit: 8 } if name == "deeper"
        ));
        assert_eq!(interpreter.tape().get(0), Cell::from(8u32));
        assert_eq!(interpreter.host().output(), "");
    }
}

// =============================================================================
// Import Tests
// =============================================================================

mod imports {
    use super::*;

    #[test]
    fn import_registers_only_well_formed_definitions() {
        // Arrange
        let host = ScriptedHost::new().with_resource("lib", "{@a@^@} {@@v@} {@b@_@");

        // Act
        let result = run_on(host, "=$lib=");

        // Assert
        assert_eq!(result.functions().names(), vec!["a"]);
    }

    #[test]
    fn missing_resource_is_reported_and_run_continues() {
        let result = run("=$nowhere=>\"^_");

        assert_output(&result, "1\n");
        assert_diagnostics(
            &result,
            &["could not import from nowhere: no resource named 'nowhere'"],
        );
    }

    #[test]
    fn import_overrides_inline_definition() {
        let host = ScriptedHost::new().with_resource("lib", "{@f@^^@}");

        let result = run_on(host, "{@f@^@}=$lib=>\"=@f=_");

        assert_output(&result, "2\n");
    }

    #[test]
    fn load_functions_from_embedder() {
        // Arrange
        let host = ScriptedHost::new().with_resource("prelude", "{@one@^@}{@two@^^@}");
        let mut interpreter = Interpreter::with_host(host);

        // Act
        let count = interpreter.load_functions("prelude").unwrap();
        interpreter.run(">\"=@one==@two=_").unwrap();

        // Assert
        assert_eq!(count, 2);
        assert_eq!(interpreter.host().output(), "3\n");
    }

    #[test]
    fn load_functions_surfaces_failure_to_embedder() {
        let mut interpreter = Interpreter::with_host(ScriptedHost::new());

        let err = interpreter.load_functions("missing").unwrap_err();

        assert!(matches!(err, OatError::ImportFailed { ref resource, .. } if resource == "missing"));
        assert!(err.is_recoverable());
    }
}

// =============================================================================
// Shell Directive Tests
// =============================================================================

mod shell {
    use super::*;

    #[test]
    fn placeholders_read_absolute_bowls() {
        // Arrange: [104, 105] spells "hi"
        let code = format!("{}=$$say \\ccell(0)\\\\ccell(1)\\ \\cell(1)\\=", bowls(&[104, 105]));

        // Act
        let result = run(&code);

        // Assert
        assert_eq!(result.host().commands(), &["say hi 105".to_string()]);
    }

    #[test]
    fn out_of_range_cell_reads_as_zero() {
        let result = run("=$$echo \\cell(9)\\=");

        assert_eq!(result.host().commands(), &["echo 0".to_string()]);
    }

    #[test]
    fn shell_directive_inside_function() {
        let result = run(&format!("{{@ping@=$$ping \\cell(0)\\=@}}{}=@ping=", bowls(&[7])));

        assert_eq!(result.host().commands(), &["ping 7".to_string()]);
    }
}
