//! Command-line construction for easyeda2kicad

use std::path::{Path, PathBuf};

use serde::Serialize;

use super::field::{FlagField, TextField};
use super::state::OptionState;

/// Executable invoked when no override is configured
pub const DEFAULT_TOOL: &str = "easyeda2kicad";

/// Granular generation flags in the order they are emitted
const GRANULAR_FLAGS: [(FlagField, &str); 3] = [
    (FlagField::Symbol, "--symbol"),
    (FlagField::Footprint, "--footprint"),
    (FlagField::Model3d, "--3d"),
];

/// Trailing switches in the order they are emitted
const TRAILING_FLAGS: [(FlagField, &str); 4] = [
    (FlagField::Overwrite, "--overwrite"),
    (FlagField::V5Legacy, "--v5"),
    (FlagField::ProjectRelative, "--project-relative"),
    (FlagField::Debug, "--debug"),
];

/// An argument vector plus its human-readable form
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuiltCommand {
    tokens: Vec<String>,
    display: String,
}

impl BuiltCommand {
    pub fn from_tokens(tokens: Vec<String>) -> Self {
        let display = display_string(&tokens);
        Self { tokens, display }
    }

    /// Exact tokens passed to the process, program first
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Space-joined form with quoted tokens; for display only
    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn program(&self) -> Option<&str> {
        self.tokens.first().map(String::as_str)
    }

    pub fn args(&self) -> &[String] {
        self.tokens.get(1..).unwrap_or_default()
    }
}

/// Builds the easyeda2kicad invocation for an option snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandBuilder {
    tool: String,
}

impl Default for CommandBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_TOOL)
    }
}

impl CommandBuilder {
    pub fn new(tool: impl Into<String>) -> Self {
        Self { tool: tool.into() }
    }

    pub fn tool(&self) -> &str {
        &self.tool
    }

    /// Map the state to tokens. Total: every state produces a command, valid or not.
    pub fn build(&self, state: &OptionState) -> BuiltCommand {
        let mut tokens = vec![self.tool.clone()];

        let lcsc_id = state.text(TextField::LcscId);
        if !lcsc_id.is_empty() {
            tokens.push("--lcsc_id".to_string());
            tokens.push(lcsc_id.to_string());
        }

        if state.flag(FlagField::Full) {
            tokens.push("--full".to_string());
        } else {
            for (field, flag) in GRANULAR_FLAGS {
                if state.flag(field) {
                    tokens.push(flag.to_string());
                }
            }
        }

        if let Some(output) = resolve_output(state) {
            tokens.push("--output".to_string());
            tokens.push(output.to_string_lossy().into_owned());
        }

        for (field, flag) in TRAILING_FLAGS {
            if state.flag(field) {
                tokens.push(flag.to_string());
            }
        }

        BuiltCommand::from_tokens(tokens)
    }
}

/// Resolve the `--output` value, or `None` to let the tool use its default.
///
/// With Create Folder the library name is nested twice: the tool writes the
/// library into `<output>/<name>/<name>`, giving it a dedicated folder.
pub fn resolve_output(state: &OptionState) -> Option<PathBuf> {
    let output = state.text(TextField::OutputPath);
    if output.is_empty() {
        return None;
    }

    let library_name = state.text(TextField::LibraryName);
    if library_name.is_empty() {
        return Some(PathBuf::from(output));
    }

    let base = Path::new(output);
    if state.flag(FlagField::CreateFolder) {
        Some(base.join(library_name).join(library_name))
    } else {
        Some(base.join(library_name))
    }
}

/// Join tokens with spaces, quoting any token that contains a space
pub fn display_string(tokens: &[String]) -> String {
    tokens
        .iter()
        .map(|token| {
            if token.contains(' ') {
                format!("\"{}\"", token)
            } else {
                token.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
