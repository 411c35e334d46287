//! Shared test utilities

#![allow(dead_code)]

use e2k_tui::command::{CommandBuilder, FlagField, OptionState, Session, TextField};

/// State with an identifier and the symbol target, the smallest runnable state
pub fn runnable_state(lcsc_id: &str) -> OptionState {
    let mut state = OptionState::new();
    state.set_text(TextField::LcscId, lcsc_id);
    state.set_flag(FlagField::Symbol, true);
    state
}

/// State with an output folder and library name set
pub fn state_with_library(output: &str, library: &str, create_folder: bool) -> OptionState {
    let mut state = OptionState::new();
    state.set_text(TextField::LcscId, "C2040");
    state.set_flag(FlagField::Full, true);
    state.set_text(TextField::OutputPath, output);
    state.set_text(TextField::LibraryName, library);
    state.set_flag(FlagField::CreateFolder, create_folder);
    state
}

/// Session whose tool is `program`, for running real processes in tests
pub fn session_with_tool(program: &str, state: OptionState) -> Session {
    Session::with_state(state, CommandBuilder::new(program))
}

/// Token list for a shell snippet
pub fn sh(script: &str) -> Vec<String> {
    vec!["sh".to_string(), "-c".to_string(), script.to_string()]
}

pub fn tokens(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
