//! Command-line argument definitions using clap

use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::command::{CommandBuilder, FlagField, OptionState, TextField, DEFAULT_TOOL};

/// e2k-tui - Assemble and run easyeda2kicad conversions
#[derive(Parser, Debug)]
#[command(name = "e2k-tui")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Options used to pre-fill the interactive form
    #[command(flatten)]
    pub options: OptionArgs,

    /// easyeda2kicad executable (name on PATH or full path)
    #[arg(long, env = "EASYEDA2KICAD_BIN", default_value = DEFAULT_TOOL, global = true)]
    pub tool: String,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Append log output to this file instead of stderr
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the conversion without the interactive form
    Run {
        #[command(flatten)]
        options: OptionArgs,

        /// Skip the confirmation prompt
        #[arg(short = 'y', long, default_value = "false")]
        yes: bool,
    },

    /// Print the command line for the given options without running it
    Show {
        #[command(flatten)]
        options: OptionArgs,

        /// Print the tokens, display string and issues as JSON
        #[arg(long, default_value = "false")]
        json: bool,
    },
}

/// One flag per form field
#[derive(Args, Debug, Clone, Default)]
pub struct OptionArgs {
    /// LCSC part number of the component (e.g., C5267399)
    #[arg(long)]
    pub lcsc_id: Option<String>,

    /// Generate symbol, footprint and 3D model
    #[arg(long, conflicts_with_all = ["symbol", "footprint", "model_3d"])]
    pub full: bool,

    /// Generate the schematic symbol
    #[arg(long)]
    pub symbol: bool,

    /// Generate the PCB footprint
    #[arg(long)]
    pub footprint: bool,

    /// Generate the 3D model
    #[arg(long = "3d")]
    pub model_3d: bool,

    /// Base folder where the library is saved.
    /// If not specified, easyeda2kicad uses its default location.
    #[arg(short, long)]
    pub output: Option<String>,

    /// Library name inside the output folder
    #[arg(long, requires = "output")]
    pub library_name: Option<String>,

    /// Create a folder named after the library inside the output folder
    #[arg(long, requires = "output")]
    pub create_folder: bool,

    /// Overwrite existing library files
    #[arg(long)]
    pub overwrite: bool,

    /// Make 3D model paths relative to the project directory (${KIPRJMOD})
    #[arg(long, requires = "output")]
    pub project_relative: bool,

    /// Convert to the legacy KiCad v5 format
    #[arg(long)]
    pub v5: bool,

    /// Show detailed error output from easyeda2kicad
    #[arg(long)]
    pub debug: bool,
}

impl OptionArgs {
    /// Apply the flags through the regular setters.
    /// The output folder goes first since it gates the fields after it.
    pub fn to_state(&self) -> OptionState {
        let mut state = OptionState::new();

        if let Some(output) = &self.output {
            state.set_text(TextField::OutputPath, output.as_str());
        }
        if let Some(lcsc_id) = &self.lcsc_id {
            state.set_text(TextField::LcscId, lcsc_id.as_str());
        }
        if let Some(library_name) = &self.library_name {
            state.set_text(TextField::LibraryName, library_name.as_str());
        }

        let flags = [
            (FlagField::CreateFolder, self.create_folder),
            (FlagField::Full, self.full),
            (FlagField::Symbol, self.symbol),
            (FlagField::Footprint, self.footprint),
            (FlagField::Model3d, self.model_3d),
            (FlagField::Overwrite, self.overwrite),
            (FlagField::ProjectRelative, self.project_relative),
            (FlagField::V5Legacy, self.v5),
            (FlagField::Debug, self.debug),
        ];
        for (field, value) in flags {
            if value {
                state.set_flag(field, true);
            }
        }

        state
    }
}

impl Cli {
    pub fn builder(&self) -> CommandBuilder {
        CommandBuilder::new(self.tool.clone())
    }

    /// True when no subcommand was given and the form should open
    pub fn is_interactive(&self) -> bool {
        self.command.is_none()
    }
}
