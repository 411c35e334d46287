//! Error types for option mutation and run gating.

use serde::Serialize;
use thiserror::Error;

use super::field::{FieldId, FieldKind};

/// A reason the current options cannot be run.
///
/// These are reported inline while the user edits; they never block a
/// mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InputIssue {
    #[error("LCSC Part # is required.")]
    MissingIdentifier,

    #[error("Select Full or at least one of Symbol, Footprint, or 3D Model.")]
    NoGenerationTarget,

    #[error("Project-relative option requires an Output Folder.")]
    ProjectRelativeWithoutOutput,
}

/// Misuse of the generic field setter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    /// A text value was sent to a flag field, or the reverse.
    #[error("field '{field}' expects a {expected:?} value, got {actual:?}")]
    KindMismatch {
        field: FieldId,
        expected: FieldKind,
        actual: FieldKind,
    },
}

/// Errors raised before a run is attempted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RunError {
    /// The options are not valid to run; nothing was spawned.
    #[error("cannot run due to the following errors:\n{}", format_issues(.0))]
    InputInvalid(Vec<InputIssue>),
}

/// Render issues as a bulleted list, one per line
pub fn format_issues(issues: &[InputIssue]) -> String {
    issues
        .iter()
        .map(|issue| format!("- {}", issue))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_invalid_lists_every_issue() {
        let err = RunError::InputInvalid(vec![
            InputIssue::MissingIdentifier,
            InputIssue::NoGenerationTarget,
        ]);
        let message = err.to_string();
        assert!(message.starts_with("cannot run due to the following errors:"));
        assert!(message.contains("- LCSC Part # is required."));
        assert!(message.contains("- Select Full or at least one of Symbol, Footprint, or 3D Model."));
    }

    #[test]
    fn test_kind_mismatch_names_the_field() {
        let err = StateError::KindMismatch {
            field: FieldId::Full,
            expected: FieldKind::Flag,
            actual: FieldKind::Text,
        };
        assert_eq!(
            err.to_string(),
            "field 'Full' expects a Flag value, got Text"
        );
    }
}
