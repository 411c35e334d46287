//! Terminal styling utilities for headless output

use console::{style, Emoji};

// Emoji icons with fallbacks for terminals that don't support them
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "[*] ");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", ">> ");
pub static PLUG: Emoji<'_, '_> = Emoji("🔌 ", "");

/// Print the application banner
pub fn print_banner(version: &str) {
    println!();
    println!(
        "    {}{} {}",
        PLUG,
        style("easyeda2kicad").cyan().bold(),
        style("front-end").dim()
    );
    println!("    {}", style(format!("v{}", version)).dim());
    println!("    {}", style("━".repeat(50)).dim());
}

/// Print the command line that will be (or would be) executed
pub fn print_command(display: &str) {
    println!();
    println!("    {}{}", ROCKET, style("Running command:").white().bold());
    println!("      {}", style(display).cyan());
    println!();
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("    {} {}", INFO, message);
}

/// Print an error message with its detail lines
pub fn print_error(title: &str, details: &[String]) {
    eprintln!("    {} {}", style("✗").red().bold(), style(title).red().bold());
    for detail in details {
        eprintln!("        {} {}", style("•").dim(), detail);
    }
}
