use std::panic::Location;
use std::path::PathBuf;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Config error: {0}")]
    Config(#[from] dm_config::ConfigError),

    #[error("{0}")]
    Client(#[from] dm_registry::ClientError),

    #[error("{0}")]
    Core(#[from] dm_core::CoreError),

    /// Bad user input; reported before any registry call
    #[error("{message}")]
    Input {
        message: String,
        location: ErrorLocation,
    },

    #[error("Failed to access {path}: {source} {location}")]
    File {
        path: PathBuf,
        location: ErrorLocation,
        #[source]
        source: std::io::Error,
    },

    #[error("Terminal I/O error: {source} {location}")]
    Terminal {
        location: ErrorLocation,
        #[source]
        source: std::io::Error,
    },

    #[error("Logger error: {message}")]
    Logger { message: String },
}

impl CliError {
    #[track_caller]
    pub fn input<S: Into<String>>(message: S) -> Self {
        CliError::Input {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CliError::File {
            path: path.into(),
            location: ErrorLocation::from(Location::caller()),
            source,
        }
    }

    #[track_caller]
    pub fn terminal(source: std::io::Error) -> Self {
        CliError::Terminal {
            location: ErrorLocation::from(Location::caller()),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, CliError>;
