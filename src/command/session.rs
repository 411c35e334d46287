//! Session: the single option state plus its derived view
//!
//! Every mutation recomputes the whole derived view with [`derive_view`] and
//! hands it to the `on_change` hook. The hook is for push-style observers;
//! the interactive form redraws every frame and reads [`Session::derived`]
//! instead, which always holds the same view the hook last received.
//!
//! Runs are serialized: [`Session::run`] borrows the session mutably, so a
//! second run cannot start on the same session until the first returns.

use std::fmt;

use tracing::{debug, info};

use super::builder::{BuiltCommand, CommandBuilder};
use super::error::{InputIssue, RunError, StateError};
use super::executor::Executor;
use super::field::{FieldId, FieldValue, FlagField, TextField};
use super::state::{Enablement, OptionState};
use crate::report::RunReport;

/// Everything the presentation layer needs after a mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Derived {
    pub enablement: Enablement,
    pub issues: Vec<InputIssue>,
    pub command: BuiltCommand,
}

impl Derived {
    pub fn is_valid_to_run(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn is_enabled(&self, id: FieldId) -> bool {
        self.enablement.get(&id).copied().unwrap_or(true)
    }
}

/// Recompute the derived view from a state snapshot
pub fn derive_view(state: &OptionState, builder: &CommandBuilder) -> Derived {
    Derived {
        enablement: state.enablement(),
        issues: state.validation_issues(),
        command: builder.build(state),
    }
}

type ChangeHook = Box<dyn FnMut(&Derived)>;

pub struct Session {
    state: OptionState,
    builder: CommandBuilder,
    derived: Derived,
    on_change: Option<ChangeHook>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("state", &self.state)
            .field("builder", &self.builder)
            .field("derived", &self.derived)
            .field("on_change", &self.on_change.is_some())
            .finish()
    }
}

impl Session {
    pub fn new(builder: CommandBuilder) -> Self {
        Self::with_state(OptionState::new(), builder)
    }

    pub fn with_state(state: OptionState, builder: CommandBuilder) -> Self {
        let derived = derive_view(&state, &builder);
        Self {
            state,
            builder,
            derived,
            on_change: None,
        }
    }

    pub fn state(&self) -> &OptionState {
        &self.state
    }

    pub fn builder(&self) -> &CommandBuilder {
        &self.builder
    }

    pub fn derived(&self) -> &Derived {
        &self.derived
    }

    pub fn command(&self) -> &BuiltCommand {
        &self.derived.command
    }

    /// Install the change hook, replacing any previous one.
    /// It is called once with the current view, then after every mutation.
    pub fn on_change(&mut self, hook: impl FnMut(&Derived) + 'static) {
        let mut hook: ChangeHook = Box::new(hook);
        hook(&self.derived);
        self.on_change = Some(hook);
    }

    pub fn set_field(&mut self, id: FieldId, value: FieldValue) -> Result<(), StateError> {
        self.state.set_field(id, value)?;
        self.refresh();
        Ok(())
    }

    pub fn set_text(&mut self, field: TextField, value: impl Into<String>) {
        self.state.set_text(field, value);
        self.refresh();
    }

    pub fn set_flag(&mut self, field: FlagField, value: bool) {
        self.state.set_flag(field, value);
        self.refresh();
    }

    pub fn toggle(&mut self, field: FlagField) {
        self.state.toggle(field);
        self.refresh();
    }

    fn refresh(&mut self) {
        self.derived = derive_view(&self.state, &self.builder);
        debug!(
            command = %self.derived.command.display(),
            issues = self.derived.issues.len(),
            "options changed"
        );
        if let Some(hook) = self.on_change.as_mut() {
            hook(&self.derived);
        }
    }

    /// Run the current command if the options are valid.
    ///
    /// Takes `&mut self` although nothing is mutated: the exclusive borrow
    /// is what keeps two runs on one session from overlapping.
    ///
    /// Invalid options return `RunError::InputInvalid` without spawning
    /// anything. Tool outcomes, including failures, come back as a report.
    pub fn run(&mut self, executor: &Executor) -> Result<RunReport, RunError> {
        if !self.derived.is_valid_to_run() {
            info!(issues = self.derived.issues.len(), "run refused");
            return Err(RunError::InputInvalid(self.derived.issues.clone()));
        }

        let result = executor.execute(self.derived.command.tokens());
        Ok(RunReport::from_result(
            &result,
            self.state.flag(FlagField::Debug),
            self.state.flag(FlagField::ProjectRelative),
        ))
    }
}
