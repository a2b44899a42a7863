//! Integration tests for the dispatch engine.
//!
//! Component: VM (Interpreter)
//!
//! These tests verify:
//! - Bowl operations (increment, decrement, insert, delete, not, distribute)
//! - Read-only marks
//! - Numeric and character input
//! - Scopes and goto
//! - Run lifecycle (reset, trailing newline, limits)

#![cfg(test)]

use crate::common::*;

use oatmeal::*;

// =============================================================================
// Bowl Operation Tests
// =============================================================================

mod bowl_operations {
    use super::*;

    #[test]
    fn appended_bowls_print_in_reverse() {
        // Arrange
        let code = format!("{}_<_<_", bowls(&[3, 1, 4]));

        // Act
        let result = run(&code);

        // Assert
        assert_output(&result, "413\n");
        assert_cells(&result, &[3, 1, 4]);
    }

    #[test]
    fn insert_lands_in_front_of_current_bowl() {
        // Arrange: pointer on bowl 1 of [7, 9]
        let code = format!("{}<>\"^^_", bowls(&[7, 9]));

        // Act
        let result = run(&code);

        // Assert
        assert_output(&result, "2\n");
        assert_cells(&result, &[7, 2, 9]);
        assert_eq!(result.pointer().position(), 1);
    }

    #[test]
    fn delete_in_the_middle_keeps_position() {
        // Arrange
        let code = format!("{}<:_", bowls(&[1, 2, 3]));

        // Act
        let result = run(&code);

        // Assert: bowl 1 is now the former bowl 2
        assert_output(&result, "3\n");
        assert_cells(&result, &[1, 3]);
    }

    #[test]
    fn delete_of_last_bowl_steps_back() {
        let result = run(&format!("{}:_", bowls(&[1, 2])));

        assert_output(&result, "1\n");
        assert_eq!(result.pointer().position(), 0);
    }

    #[test]
    fn delete_of_only_bowl_empties_tape() {
        let result = run(&format!("{}:_", bowls(&[5])));

        assert_output(&result, "\n");
        assert!(result.tape().is_empty());
        assert_eq!(result.pointer().position(), 0);
    }

    #[test]
    fn distribute_feeds_every_other_bowl() {
        // Arrange: [2, 1, 5] with the pointer moved back to bowl 0
        let code = format!("{}<<&_>_>_", bowls(&[2, 1, 5]));

        // Act
        let result = run(&code);

        // Assert
        assert_output(&result, "037\n");
    }

    #[test]
    fn failed_define_keeps_right_move() {
        // '{' opens no definition here, so '"' still follows the '>'
        let result = run(">{\"^_");

        assert_output(&result, "1\n");
        assert_diagnostics(&result, &[]);
        assert_cells(&result, &[1]);
    }

    #[test]
    fn failed_directive_clears_right_move() {
        let result = run(">=\"^_");

        assert_output(&result, "\n");
        assert_diagnostics(&result, &["\" must be preceded by >"]);
        assert!(result.tape().is_empty());
    }

    #[test]
    fn operations_off_tape_are_silent() {
        // Arrange: pointer parked on the after-last sentinel
        let code = format!("{}>^v!&:%_-", bowls(&[4]));

        // Act
        let result = run(&code);

        // Assert
        assert_output(&result, "\n");
        assert_cells(&result, &[4]);
        assert!(result.readonly_cells().is_empty());
    }
}

// =============================================================================
// Read-only Tests
// =============================================================================

mod readonly {
    use super::*;

    #[test]
    fn readonly_bowl_cannot_be_deleted() {
        let result = run(&format!("{}%:_", bowls(&[4])));

        assert_output(&result, "4\n");
        assert_cells(&result, &[4]);
    }

    #[test]
    fn toggling_twice_restores_mutability() {
        let result = run(&format!("{}%%:", bowls(&[4])));

        assert!(result.tape().is_empty());
    }

    #[test]
    fn marks_follow_their_bowls_on_insert() {
        // Arrange: mark bowl 0, then insert in front of it
        let code = format!("{}%<>\"", bowls(&[6]));

        // Act
        let result = run(&code);

        // Assert
        assert_cells(&result, &[0, 6]);
        assert_eq!(result.readonly_cells(), vec![1]);
    }
}

// =============================================================================
// Input Tests
// =============================================================================

mod input {
    use super::*;

    #[test]
    fn numeric_input_overwrites_bowl() {
        let result = run_with_input(&format!("{}~_", bowls(&[5])), &["  42  "]);

        assert_output(&result, "42\n");
    }

    #[test]
    fn negative_input_clamps_to_zero() {
        let result = run_with_input(&format!("{}~_", bowls(&[5])), &["-3"]);

        assert_output(&result, "0\n");
    }

    #[test]
    fn wide_input_is_kept_exactly() {
        let result = run_with_input(&format!("{}~_", bowls(&[0])), &["99999999999999999999999999"]);

        assert_output(&result, "99999999999999999999999999\n");
    }

    #[test]
    fn increment_carries_past_machine_width() {
        let result = run_with_input(&format!("{}~^_", bowls(&[0])), &["18446744073709551615"]);

        assert_output(&result, "18446744073709551616\n");
    }

    #[test]
    fn decrement_of_wide_value_is_exact() {
        let result = run_with_input(&format!("{}~v_", bowls(&[0])), &["100000000000000000000"]);

        assert_output(&result, "99999999999999999999\n");
    }

    #[test]
    fn distribute_sums_without_overflow() {
        // Arrange: two bowls of 2^63
        let half = "9223372036854775808";

        // Act
        let result = run_with_input(">\"~>\"~&<_", &[half, half]);

        // Assert
        assert_output(&result, "18446744073709551616\n");
        assert_eq!(result.tape().get(1), Cell::from(0u32));
    }

    #[test]
    fn digit_groups_in_numeric_input() {
        // Arrange: only well-placed single underscores group digits
        let code = format!("{}~_~_~_~_", bowls(&[5]));

        // Act
        let result = run_with_input(&code, &["1_000", "_1", "1__0", "2_"]);

        // Assert
        assert_output(&result, "1000100010001000\n");
        assert_eq!(result.host().remaining_input(), 0);
    }

    #[test]
    fn non_numeric_input_is_consumed_but_ignored() {
        let result = run_with_input(&format!("{}~_~_", bowls(&[5])), &["abc", "8"]);

        assert_output(&result, "58\n");
        assert_eq!(result.host().remaining_input(), 0);
    }

    #[test]
    fn character_input_takes_first_code_point() {
        let result = run_with_input(&format!("{}`_-", bowls(&[0])), &["éa"]);

        assert_output(&result, "233é\n");
    }
}

// =============================================================================
// Scope and Goto Tests
// =============================================================================

mod scopes {
    use super::*;

    #[test]
    fn zero_leaves_the_scope() {
        // Arrange: the goto after 'a' sees 0 and skips the increments
        let code = format!("{}/'a'^^^\\_", bowls(&[0]));

        // Act
        let result = run(&code);

        // Assert
        assert_output(&result, "0\n");
    }

    #[test]
    fn out_of_range_value_falls_through() {
        let result = run(&format!("{}/'a'^\\_", bowls(&[5])));

        assert_output(&result, "6\n");
    }

    #[test]
    fn goto_outside_any_scope_falls_through() {
        let result = run(&format!("{}'^_", bowls(&[3])));

        assert_output(&result, "4\n");
    }

    #[test]
    fn input_driven_counting_loop() {
        // Arrange: bowl 0 counts iterations, bowl 1 holds the loop flag
        let code = format!("{}/'<^>~'\\<_", bowls(&[0, 0]));

        // Act
        let result = run_with_input(&code, &["1", "1", "0"]);

        // Assert
        assert_output(&result, "3\n");
        assert_cells(&result, &[3, 0]);
    }

    #[test]
    fn nested_goto_counts_only_inner_points() {
        // Arrange: outer points at offsets 4 and 12, inner points at 6 and 9.
        // Inputs: 3 skips the outer point, 1 loops to the inner escape,
        // 4 falls out of the inner scope, 0 leaves the outer one.
        let code = format!("{}/~'/'_~'\\~'_\\^_", bowls(&[0]));

        // Act
        let result = run_with_input(&code, &["3", "1", "4", "0"]);

        // Assert: the '_' before the outer '\' is skipped
        assert_output(&result, "311\n");
        assert_eq!(result.host().remaining_input(), 0);
    }

    #[test]
    fn goto_after_zero_exit_resolves_against_stale_scope() {
        // Arrange: the inner scope is left by a zero goto, so its '\' never
        // runs and it stays innermost. The next zero goto jumps back to
        // just past that '\' instead of leaving the outer scope.
        let code = format!("{}//a'\\_~'\\_", bowls(&[0]));

        // Act
        let result = run_with_input(&code, &["0", "5"]);

        // Assert
        assert_output(&result, "005\n");
        assert_eq!(result.host().remaining_input(), 0);
    }

    #[test]
    fn comment_hides_scope_brackets_from_dispatch() {
        let result = run(&format!("{}[/'\\]^_", bowls(&[1])));

        assert_output(&result, "2\n");
    }
}

// =============================================================================
// Run Lifecycle Tests
// =============================================================================

mod lifecycle {
    use super::*;

    #[test]
    fn each_run_starts_with_an_empty_tape() {
        // Arrange
        let mut interpreter = Interpreter::with_host(ScriptedHost::new());

        // Act
        interpreter.run(&bowls(&[1, 2])).unwrap();
        interpreter.run("_").unwrap();

        // Assert
        assert_eq!(interpreter.host().output(), "\n\n");
        assert!(interpreter.tape().is_empty());
    }

    #[test]
    fn step_limit_aborts_without_trailing_newline() {
        // Act
        let (interpreter, err) = run_err(EngineConfig::default().with_max_steps(3), ">\"^_^^^");

        // Assert
        assert!(matches!(err, OatError::StepLimitExceeded { limit: 3 }));
        assert_eq!(interpreter.host().output(), "");
    }

    #[test]
    fn output_before_the_limit_is_kept() {
        let (interpreter, err) = run_err(EngineConfig::default().with_max_steps(4), ">\"^_^^^");

        assert_eq!(err.category(), ErrorCategory::Fatal);
        assert_eq!(interpreter.host().output(), "1");
    }

    #[test]
    fn report_counts_dispatched_instructions() {
        // Arrange
        let mut interpreter = Interpreter::with_host(ScriptedHost::new());

        // Act
        let report = interpreter.run(">\"^^").unwrap();

        // Assert
        assert_eq!(report.steps, 4);
        assert_eq!(report.calls, 0);
        assert_eq!(report.deepest_call, 0);
    }
}
