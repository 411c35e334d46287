//! Report module - run outcomes and option summaries

pub mod run_report;
pub mod summary;

pub use run_report::*;
pub use summary::*;
