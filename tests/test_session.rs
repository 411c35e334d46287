//! Tests for the session: change notification and run gating

mod common;

use std::cell::RefCell;
use std::rc::Rc;

use common::runnable_state;
use e2k_tui::command::{
    CommandBuilder, Derived, Executor, FieldId, FlagField, InputIssue, RunError, Session,
    TextField,
};

fn recording_session() -> (Session, Rc<RefCell<Vec<Derived>>>) {
    let mut session = Session::new(CommandBuilder::default());
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    session.on_change(move |derived| sink.borrow_mut().push(derived.clone()));
    (session, seen)
}

#[test]
fn test_every_mutation_notifies_once() {
    let (mut session, seen) = recording_session();
    assert_eq!(seen.borrow().len(), 1, "hook sees the initial view");

    session.set_text(TextField::LcscId, "C5267399");
    session.set_flag(FlagField::Symbol, true);
    session.toggle(FlagField::Overwrite);

    let seen = seen.borrow();
    assert_eq!(seen.len(), 4);
    assert_eq!(
        seen[3].command.display(),
        "easyeda2kicad --lcsc_id C5267399 --symbol --overwrite"
    );
    assert!(seen[3].is_valid_to_run());
}

#[test]
fn test_notified_view_matches_session() {
    let (mut session, seen) = recording_session();

    session.set_text(TextField::OutputPath, "/lib");
    session.set_text(TextField::LibraryName, "Foo");
    session.set_text(TextField::OutputPath, "");

    let last = seen.borrow().last().cloned().unwrap();
    assert_eq!(&last, session.derived());
    assert!(!last.is_enabled(FieldId::LibraryName));
    assert_eq!(session.state().text(TextField::LibraryName), "");
}

#[test]
fn test_run_refuses_invalid_state_with_all_reasons() {
    let mut session = Session::new(CommandBuilder::new("e2k-tui-no-such-tool-7f3a"));

    let err = session.run(&Executor::new()).unwrap_err();

    assert_eq!(
        err,
        RunError::InputInvalid(vec![
            InputIssue::MissingIdentifier,
            InputIssue::NoGenerationTarget
        ])
    );
}

#[test]
fn test_run_reports_missing_tool() {
    let mut session = Session::with_state(
        runnable_state("C1"),
        CommandBuilder::new("e2k-tui-no-such-tool-7f3a"),
    );

    let report = session.run(&Executor::new()).unwrap();

    assert!(!report.is_success());
    assert_eq!(
        report.message,
        "Error: 'e2k-tui-no-such-tool-7f3a' command not found. Ensure it is installed and added to your PATH."
    );
}

#[cfg(unix)]
mod unix {
    use crate::common::{runnable_state, session_with_tool};
    use e2k_tui::command::{Executor, FlagField, ResultKind, TextField};
    use e2k_tui::report::{GENERIC_FAILURE_MESSAGE, PROJECT_RELATIVE_NOTE, SUCCESS_MESSAGE};

    #[test]
    fn test_successful_run() {
        let mut session = session_with_tool("true", runnable_state("C1"));

        let report = session.run(&Executor::new()).unwrap();

        assert_eq!(report.kind, Some(ResultKind::Success));
        assert_eq!(report.message, SUCCESS_MESSAGE);
    }

    #[test]
    fn test_successful_project_relative_run_adds_note() {
        let mut state = runnable_state("C1");
        state.set_text(TextField::OutputPath, "/tmp");
        state.set_flag(FlagField::ProjectRelative, true);
        let mut session = session_with_tool("true", state);

        let report = session.run(&Executor::new()).unwrap();

        assert!(report.message.ends_with(PROJECT_RELATIVE_NOTE));
    }

    #[test]
    fn test_failed_run_hides_details_without_debug() {
        let mut session = session_with_tool("false", runnable_state("C1"));

        let report = session.run(&Executor::new()).unwrap();

        assert_eq!(report.kind, Some(ResultKind::ToolFailure));
        assert_eq!(report.exit_code, Some(1));
        assert_eq!(report.message, GENERIC_FAILURE_MESSAGE);
    }

    #[test]
    fn test_failed_run_shows_details_with_debug() {
        let mut state = runnable_state("C1");
        state.set_flag(FlagField::Debug, true);
        let mut session = session_with_tool("false", state);

        let report = session.run(&Executor::new()).unwrap();

        assert!(report.message.starts_with("An error occurred:\n"));
    }
}
