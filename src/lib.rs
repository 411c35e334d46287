//! e2k-tui: a terminal front-end for easyeda2kicad
//!
//! Collects conversion options for an LCSC part, keeps them consistent,
//! shows the exact command line that will run and reports the outcome.

pub mod cli;
pub mod command;
pub mod report;
pub mod utils;
