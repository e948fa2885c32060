//! CLI layer: argument parsing, command dispatch and the interactive session

pub mod args;
pub mod commands;
pub mod error;
pub mod logging;
pub mod output;
pub mod session;

pub use args::{Cli, Commands, ConfigCommands};
pub use error::{CliError, CliResult};
