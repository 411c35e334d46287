//! User-facing report for a finished run

use chrono::{DateTime, Local};
use console::style;

use crate::command::{format_issues, ExecutionResult, InputIssue, ResultKind};

pub const SUCCESS_MESSAGE: &str = "Conversion completed successfully.";
pub const PROJECT_RELATIVE_NOTE: &str =
    "Note: 3D model paths are set relative to the project directory (${KIPRJMOD}).";
pub const GENERIC_FAILURE_MESSAGE: &str =
    "An error occurred during the conversion. Please check your inputs and try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Error,
}

/// What the user is told after a run request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// `None` when the request never reached the executor
    pub kind: Option<ResultKind>,
    pub severity: Severity,
    pub title: String,
    pub message: String,
    pub exit_code: Option<i32>,
    pub finished_at: DateTime<Local>,
}

impl RunReport {
    /// Build the report for a run.
    ///
    /// Tool stderr is only surfaced when `debug` is set; otherwise a failure
    /// gets the generic message.
    pub fn from_result(result: &ExecutionResult, debug: bool, project_relative: bool) -> Self {
        let message = match result {
            ExecutionResult::Success { .. } => {
                if project_relative {
                    format!("{}\n{}", SUCCESS_MESSAGE, PROJECT_RELATIVE_NOTE)
                } else {
                    SUCCESS_MESSAGE.to_string()
                }
            }
            ExecutionResult::ToolFailure { stderr, .. } => {
                if debug {
                    format!("An error occurred:\n{}", stderr)
                } else {
                    GENERIC_FAILURE_MESSAGE.to_string()
                }
            }
            ExecutionResult::ToolMissing { tool } => format!(
                "Error: '{}' command not found. Ensure it is installed and added to your PATH.",
                tool
            ),
            ExecutionResult::UnexpectedError { message } => {
                format!("An unexpected error occurred:\n{}", message)
            }
        };

        let severity = if result.is_success() {
            Severity::Info
        } else {
            Severity::Error
        };

        Self {
            kind: Some(result.kind()),
            severity,
            title: title_for(severity).to_string(),
            message,
            exit_code: result.exit_code(),
            finished_at: Local::now(),
        }
    }

    /// Report for a run request refused before spawning
    pub fn from_issues(issues: &[InputIssue]) -> Self {
        Self {
            kind: None,
            severity: Severity::Error,
            title: title_for(Severity::Error).to_string(),
            message: format!(
                "Cannot run due to the following errors:\n{}",
                format_issues(issues)
            ),
            exit_code: None,
            finished_at: Local::now(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.kind == Some(ResultKind::Success)
    }

    /// Print the report for headless runs
    pub fn display(&self) {
        println!();
        let heading = match self.severity {
            Severity::Info => style(format!("✓ {}", self.title)).green().bold(),
            Severity::Error => style(format!("✗ {}", self.title)).red().bold(),
        };
        println!(
            "    {} {}",
            heading,
            style(self.finished_at.format("%H:%M:%S").to_string()).dim()
        );
        for line in self.message.lines() {
            println!("      {}", line);
        }
        if let Some(code) = self.exit_code.filter(|&code| code != 0) {
            println!("      {}", style(format!("exit code {}", code)).dim());
        }
        println!();
    }
}

fn title_for(severity: Severity) -> &'static str {
    match severity {
        Severity::Info => "Success",
        Severity::Error => "Error",
    }
}
