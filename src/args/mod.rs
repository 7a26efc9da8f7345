//! Command-line argument parsing and handling.

pub mod commands;
pub mod definition;
pub mod utils;

pub use commands::execute;
pub use definition::{Args, Command};
pub use utils::determine_log_level;
