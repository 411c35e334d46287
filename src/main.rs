//! e2k-tui: interactive front-end for the easyeda2kicad converter

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;

use e2k_tui::cli::{run_form, run_headless, show_command, Cli, Commands};
use e2k_tui::command::{Executor, Session};
use e2k_tui::utils::{init_logging, LogConfig};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_config =
        LogConfig::from_verbosity(cli.verbose).for_frontend(cli.log_file.clone(), cli.is_interactive());
    init_logging(&log_config).context("Failed to initialize logging")?;
    debug!(tool = %cli.tool, "starting");

    let builder = cli.builder();

    match &cli.command {
        Some(Commands::Run { options, yes }) => {
            let outcome = run_headless(options, builder, *yes)?;
            if outcome.exit_code() != 0 {
                std::process::exit(outcome.exit_code());
            }
            Ok(())
        }
        Some(Commands::Show { options, json }) => show_command(options, &builder, *json),
        None => {
            let session = Session::with_state(cli.options.to_state(), builder);
            run_form(session, &Executor::new())
        }
    }
}
