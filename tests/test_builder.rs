//! Tests for turning option state into easyeda2kicad arguments

mod common;

use common::{runnable_state, state_with_library, tokens};
use e2k_tui::command::{
    display_string, resolve_output, CommandBuilder, FlagField, OptionState, TextField,
};
use std::path::PathBuf;

#[test]
fn test_symbol_only_command() {
    let state = runnable_state("C5267399");

    let command = CommandBuilder::default().build(&state);

    assert_eq!(
        command.tokens(),
        tokens(&["easyeda2kicad", "--lcsc_id", "C5267399", "--symbol"])
    );
    assert_eq!(command.display(), "easyeda2kicad --lcsc_id C5267399 --symbol");
}

#[test]
fn test_create_folder_nests_library_twice() {
    let state = state_with_library("/lib", "Foo", true);

    let command = CommandBuilder::default().build(&state);

    assert_eq!(
        command.tokens(),
        tokens(&["easyeda2kicad", "--lcsc_id", "C2040", "--full", "--output", "/lib/Foo/Foo"])
    );
}

#[test]
fn test_library_name_without_create_folder() {
    let state = state_with_library("/lib", "Foo", false);

    assert_eq!(resolve_output(&state), Some(PathBuf::from("/lib/Foo")));
    let command = CommandBuilder::default().build(&state);
    assert!(command.display().ends_with("--output /lib/Foo"));
}

#[test]
fn test_output_without_library_name_is_used_verbatim() {
    let mut state = runnable_state("C1");
    state.set_text(TextField::OutputPath, "/lib");
    state.set_flag(FlagField::CreateFolder, true);

    assert_eq!(resolve_output(&state), Some(PathBuf::from("/lib")));
}

#[test]
fn test_no_output_flag_without_output_path() {
    let state = runnable_state("C1");

    assert_eq!(resolve_output(&state), None);
    let command = CommandBuilder::default().build(&state);
    assert!(!command.tokens().contains(&"--output".to_string()));
}

#[test]
fn test_full_suppresses_granular_flags() {
    let mut state = OptionState::new();
    state.set_text(TextField::LcscId, "C1");
    state.set_flag(FlagField::Full, true);
    state.set_flag(FlagField::Symbol, true);

    let command = CommandBuilder::default().build(&state);

    assert!(command.tokens().contains(&"--full".to_string()));
    assert!(!command.tokens().contains(&"--symbol".to_string()));
}

#[test]
fn test_flag_order_is_fixed() {
    let mut state = OptionState::new();
    state.set_text(TextField::LcscId, "C1");
    state.set_text(TextField::OutputPath, "/lib");
    state.set_flag(FlagField::Debug, true);
    state.set_flag(FlagField::ProjectRelative, true);
    state.set_flag(FlagField::V5Legacy, true);
    state.set_flag(FlagField::Overwrite, true);
    state.set_flag(FlagField::Model3d, true);
    state.set_flag(FlagField::Footprint, true);
    state.set_flag(FlagField::Symbol, true);

    let command = CommandBuilder::default().build(&state);

    assert_eq!(
        command.tokens(),
        tokens(&[
            "easyeda2kicad",
            "--lcsc_id",
            "C1",
            "--symbol",
            "--footprint",
            "--3d",
            "--output",
            "/lib",
            "--overwrite",
            "--v5",
            "--project-relative",
            "--debug",
        ])
    );
}

#[test]
fn test_invalid_state_still_builds() {
    let state = OptionState::new();

    let command = CommandBuilder::default().build(&state);

    assert_eq!(command.tokens(), tokens(&["easyeda2kicad"]));
    assert!(command.args().is_empty());
}

#[test]
fn test_trimmed_identifier_is_passed() {
    let state = runnable_state("  C42 ");

    let command = CommandBuilder::default().build(&state);

    assert_eq!(command.tokens()[2], "C42");
}

#[test]
fn test_custom_tool_is_first_token() {
    let state = runnable_state("C1");

    let command = CommandBuilder::new("/opt/bin/easyeda2kicad").build(&state);

    assert_eq!(command.program(), Some("/opt/bin/easyeda2kicad"));
    assert_eq!(command.args()[0], "--lcsc_id");
}

#[test]
fn test_build_is_deterministic() {
    let state = state_with_library("/lib", "Foo", true);
    let builder = CommandBuilder::default();

    assert_eq!(builder.build(&state), builder.build(&state));
}

#[test]
fn test_display_quotes_paths_with_spaces() {
    let state = state_with_library("/home/me/KiCad Libs", "Foo", false);

    let command = CommandBuilder::default().build(&state);

    assert!(command
        .display()
        .ends_with("--output \"/home/me/KiCad Libs/Foo\""));
    assert_eq!(
        command.tokens().last().map(String::as_str),
        Some("/home/me/KiCad Libs/Foo"),
        "tokens are never quoted"
    );
    assert_eq!(display_string(command.tokens()), command.display());
}
