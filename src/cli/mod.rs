//! CLI module - argument parsing, the interactive form and headless runs

pub mod args;
pub mod browser;
pub mod form;
pub mod headless;
pub mod prompts;

pub use args::{Cli, Commands, OptionArgs};
pub use browser::{list_directories, BrowserAction, DirEntry, DirectoryBrowser};
pub use form::{run_form, FormAction, FormItem, FormState, Overlay};
pub use headless::{run_headless, show_command, HeadlessOutcome};
pub use prompts::*;
