//! Command module - option state, command construction and execution

pub mod builder;
pub mod error;
pub mod executor;
pub mod field;
pub mod session;
pub mod state;

pub use builder::*;
pub use error::*;
pub use executor::*;
pub use field::*;
pub use session::*;
pub use state::*;
