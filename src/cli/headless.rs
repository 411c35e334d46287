//! Headless front-end: run or print a command straight from flags

use anyhow::{Context, Result};
use serde::Serialize;

use super::args::OptionArgs;
use super::prompts::confirm_run;
use crate::command::{BuiltCommand, CommandBuilder, Executor, FlagField, InputIssue, RunError, Session};
use crate::report::{OptionSummary, RunReport};
use crate::utils::{
    create_spinner, finish_with_success, finish_with_warning, print_banner, print_command,
    print_error, print_info,
};

/// How a headless run ended, for the process exit status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadlessOutcome {
    Succeeded,
    Failed,
    InputInvalid,
    Cancelled,
}

impl HeadlessOutcome {
    pub fn exit_code(self) -> i32 {
        match self {
            HeadlessOutcome::Succeeded | HeadlessOutcome::Cancelled => 0,
            HeadlessOutcome::Failed => 1,
            HeadlessOutcome::InputInvalid => 2,
        }
    }
}

/// Build the session from flags, confirm, run and print the report
pub fn run_headless(options: &OptionArgs, builder: CommandBuilder, yes: bool) -> Result<HeadlessOutcome> {
    let mut session = Session::with_state(options.to_state(), builder);

    print_banner(env!("CARGO_PKG_VERSION"));
    OptionSummary::new(session.state(), session.command().display()).display();

    if !session.derived().is_valid_to_run() {
        return Ok(HeadlessOutcome::InputInvalid);
    }

    println!();
    if !yes && !confirm_run(session.state().flag(FlagField::Overwrite))? {
        print_info("Cancelled by user.");
        return Ok(HeadlessOutcome::Cancelled);
    }

    print_command(session.command().display());
    let spinner = create_spinner("Converting...");
    let report = match session.run(&Executor::new()) {
        Ok(report) => report,
        Err(RunError::InputInvalid(issues)) => {
            spinner.finish_and_clear();
            print_error(
                "Cannot run due to the following errors:",
                &issues.iter().map(ToString::to_string).collect::<Vec<_>>(),
            );
            return Ok(HeadlessOutcome::InputInvalid);
        }
    };

    if report.is_success() {
        finish_with_success(&spinner, "easyeda2kicad finished");
    } else {
        finish_with_warning(&spinner, "easyeda2kicad did not finish cleanly");
    }
    report.display();

    Ok(outcome_for(&report))
}

fn outcome_for(report: &RunReport) -> HeadlessOutcome {
    if report.is_success() {
        HeadlessOutcome::Succeeded
    } else {
        HeadlessOutcome::Failed
    }
}

#[derive(Serialize)]
struct ShowOutput<'a> {
    #[serde(flatten)]
    command: &'a BuiltCommand,
    valid: bool,
    issues: Vec<IssueOutput>,
}

#[derive(Serialize)]
struct IssueOutput {
    code: InputIssue,
    message: String,
}

/// Print the command for the flags, as text or JSON
pub fn show_command(options: &OptionArgs, builder: &CommandBuilder, json: bool) -> Result<()> {
    let state = options.to_state();
    let command = builder.build(&state);

    if json {
        let issues = state
            .validation_issues()
            .into_iter()
            .map(|issue| IssueOutput {
                code: issue,
                message: issue.to_string(),
            })
            .collect::<Vec<_>>();
        let output = ShowOutput {
            command: &command,
            valid: issues.is_empty(),
            issues,
        };
        let rendered =
            serde_json::to_string_pretty(&output).context("Failed to serialize command")?;
        println!("{}", rendered);
    } else {
        println!("{}", command.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(HeadlessOutcome::Succeeded.exit_code(), 0);
        assert_eq!(HeadlessOutcome::Cancelled.exit_code(), 0);
        assert_eq!(HeadlessOutcome::Failed.exit_code(), 1);
        assert_eq!(HeadlessOutcome::InputInvalid.exit_code(), 2);
    }
}
