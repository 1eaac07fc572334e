//! hub-migrate library
//!
//! Command-line surface for copying device identities, twins and modules
//! from one registry to another through a JSON snapshot file.

pub mod cli;
pub mod commands;
pub mod document_file;
pub mod error;
pub mod logger;
pub mod menu;
pub mod prompt;
pub mod runner;
pub mod selection_menu;

#[cfg(test)]
mod tests;

pub use cli::Cli;
pub use commands::{Commands, ExportArgs, ImportArgs};
pub use error::{CliError, Result as CliResult};
pub use prompt::Prompt;
