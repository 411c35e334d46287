//! Interactive prompts using dialoguer

use anyhow::Result;
use dialoguer::Confirm;

/// Prompt user to confirm proceeding with an action
pub fn confirm_step(message: &str) -> Result<bool> {
    let confirmed = Confirm::new()
        .with_prompt(message)
        .default(true)
        .interact()?;
    Ok(confirmed)
}

/// Prompt user to confirm running the conversion
pub fn confirm_run(overwrite: bool) -> Result<bool> {
    let message = if overwrite {
        "Run easyeda2kicad now? Existing library files will be overwritten"
    } else {
        "Run easyeda2kicad now?"
    };
    confirm_step(message)
}
