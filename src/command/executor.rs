//! Process execution for a built command
//!
//! Tokens are handed to the OS as an argument vector; nothing is parsed by a
//! shell, so identifiers and paths typed by the user reach the tool verbatim.
//! A run blocks until the tool exits. There is no timeout and no cancellation.

use std::fmt;
use std::io;
use std::process::{Command, Stdio};
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info, info_span, warn};

use super::builder::display_string;

/// Classification of one run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultKind {
    Success,
    ToolFailure,
    ToolMissing,
    UnexpectedError,
}

impl fmt::Display for ResultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResultKind::Success => "success",
            ResultKind::ToolFailure => "tool failure",
            ResultKind::ToolMissing => "tool missing",
            ResultKind::UnexpectedError => "unexpected error",
        };
        f.write_str(name)
    }
}

/// Outcome of one run. Created per run and discarded once reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExecutionResult {
    /// Exit code 0
    Success { stdout: String, stderr: String },
    /// The tool ran and exited non-zero, or was killed by a signal
    ToolFailure {
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
    },
    /// The executable could not be found
    ToolMissing { tool: String },
    /// Any other fault while spawning or waiting on the process
    UnexpectedError { message: String },
}

impl ExecutionResult {
    pub fn kind(&self) -> ResultKind {
        match self {
            ExecutionResult::Success { .. } => ResultKind::Success,
            ExecutionResult::ToolFailure { .. } => ResultKind::ToolFailure,
            ExecutionResult::ToolMissing { .. } => ResultKind::ToolMissing,
            ExecutionResult::UnexpectedError { .. } => ResultKind::UnexpectedError,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ExecutionResult::Success { .. })
    }

    pub fn exit_code(&self) -> Option<i32> {
        match self {
            ExecutionResult::Success { .. } => Some(0),
            ExecutionResult::ToolFailure { exit_code, .. } => *exit_code,
            _ => None,
        }
    }

    pub fn stdout(&self) -> Option<&str> {
        match self {
            ExecutionResult::Success { stdout, .. } | ExecutionResult::ToolFailure { stdout, .. } => {
                Some(stdout)
            }
            _ => None,
        }
    }

    pub fn stderr(&self) -> Option<&str> {
        match self {
            ExecutionResult::Success { stderr, .. } | ExecutionResult::ToolFailure { stderr, .. } => {
                Some(stderr)
            }
            _ => None,
        }
    }
}

/// Runs argument vectors as child processes
#[derive(Debug, Clone, Copy, Default)]
pub struct Executor;

impl Executor {
    pub fn new() -> Self {
        Self
    }

    /// Run `tokens[0]` with the remaining tokens as arguments and classify the result
    pub fn execute(&self, tokens: &[String]) -> ExecutionResult {
        let Some((program, args)) = tokens.split_first() else {
            warn!("refusing to execute an empty command");
            return ExecutionResult::UnexpectedError {
                message: "empty command".to_string(),
            };
        };

        let span = info_span!("execute", program = %program);
        let _guard = span.enter();
        info!(command = %display_string(tokens), "running command");

        let started = Instant::now();
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output();
        let elapsed_ms = started.elapsed().as_millis() as u64;

        let result = match output {
            Ok(output) => {
                let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
                let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
                debug!(%stdout, %stderr, "captured tool output");

                if output.status.success() {
                    ExecutionResult::Success { stdout, stderr }
                } else {
                    ExecutionResult::ToolFailure {
                        exit_code: output.status.code(),
                        stdout,
                        stderr,
                    }
                }
            }
            Err(err) => classify_spawn_error(program, &err),
        };

        info!(
            elapsed_ms,
            kind = %result.kind(),
            exit_code = ?result.exit_code(),
            "command finished"
        );
        result
    }
}

fn classify_spawn_error(program: &str, err: &io::Error) -> ExecutionResult {
    if err.kind() == io::ErrorKind::NotFound {
        warn!(%program, "executable not found");
        ExecutionResult::ToolMissing {
            tool: program.to_string(),
        }
    } else {
        warn!(%program, error = %err, "failed to spawn tool");
        ExecutionResult::UnexpectedError {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_command_is_unexpected_error() {
        let result = Executor::new().execute(&[]);
        assert_eq!(
            result,
            ExecutionResult::UnexpectedError {
                message: "empty command".to_string()
            }
        );
    }

    #[test]
    fn test_not_found_maps_to_tool_missing() {
        let err = io::Error::new(io::ErrorKind::NotFound, "No such file or directory");
        let result = classify_spawn_error("easyeda2kicad", &err);
        assert_eq!(result.kind(), ResultKind::ToolMissing);
        assert_eq!(result.exit_code(), None);
    }

    #[test]
    fn test_other_spawn_faults_keep_their_message() {
        let err = io::Error::new(io::ErrorKind::PermissionDenied, "Permission denied");
        let result = classify_spawn_error("easyeda2kicad", &err);
        assert_eq!(
            result,
            ExecutionResult::UnexpectedError {
                message: "Permission denied".to_string()
            }
        );
    }

    #[test]
    fn test_success_reports_exit_code_zero() {
        let result = ExecutionResult::Success {
            stdout: String::new(),
            stderr: String::new(),
        };
        assert!(result.is_success());
        assert_eq!(result.exit_code(), Some(0));
    }
}
