//! Tests for running commands and classifying their outcome

mod common;

use common::tokens;
use e2k_tui::command::{ExecutionResult, Executor, ResultKind};

#[test]
fn test_missing_binary_is_tool_missing() {
    let result = Executor::new().execute(&tokens(&["e2k-tui-no-such-tool-7f3a", "--lcsc_id", "C1"]));

    assert_eq!(result.kind(), ResultKind::ToolMissing);
    assert_eq!(
        result,
        ExecutionResult::ToolMissing {
            tool: "e2k-tui-no-such-tool-7f3a".to_string()
        }
    );
    assert_eq!(result.exit_code(), None);
}

#[test]
fn test_empty_command_is_unexpected_error() {
    let result = Executor::new().execute(&[]);

    assert_eq!(result.kind(), ResultKind::UnexpectedError);
}

#[cfg(unix)]
mod unix {
    use crate::common::{sh, tokens};
    use e2k_tui::command::{Executor, ResultKind};

    #[test]
    fn test_zero_exit_is_success() {
        let result = Executor::new().execute(&sh("echo converted"));

        assert!(result.is_success());
        assert_eq!(result.exit_code(), Some(0));
        assert_eq!(result.stdout(), Some("converted\n"));
    }

    #[test]
    fn test_nonzero_exit_captures_stderr() {
        let result = Executor::new().execute(&sh("echo 'part not found' >&2; exit 3"));

        assert_eq!(result.kind(), ResultKind::ToolFailure);
        assert_eq!(result.exit_code(), Some(3));
        assert_eq!(result.stderr(), Some("part not found\n"));
    }

    #[test]
    fn test_signal_termination_has_no_exit_code() {
        let result = Executor::new().execute(&sh("kill -9 $$"));

        assert_eq!(result.kind(), ResultKind::ToolFailure);
        assert_eq!(result.exit_code(), None);
    }

    #[test]
    fn test_arguments_are_passed_verbatim() {
        let result = Executor::new().execute(&tokens(&[
            "sh",
            "-c",
            "printf '%s|' \"$@\"",
            "sh",
            "--output",
            "/home/me/KiCad Libs/Foo",
        ]));

        assert_eq!(result.stdout(), Some("--output|/home/me/KiCad Libs/Foo|"));
    }

    #[test]
    fn test_tool_does_not_read_terminal_input() {
        let result = Executor::new().execute(&sh("cat"));

        assert!(result.is_success(), "stdin is closed so cat exits at once");
    }
}
