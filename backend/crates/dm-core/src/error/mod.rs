mod registry_error;

pub use registry_error::{RegistryError, RegistryResult};

// -------------------------------------------------------------------------- //

use std::panic::Location;
use std::result::Result as StdResult;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Snapshot document error: {message} {location}")]
    Snapshot {
        message: String,
        location: ErrorLocation,
        #[source]
        source: serde_json::Error,
    },

    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("Validation error: {message} {location}")]
    Validation {
        message: String,
        location: ErrorLocation,
    },

    #[error("Invalid device status: {value} {location}")]
    InvalidDeviceStatus {
        value: String,
        location: ErrorLocation,
    },
}

impl CoreError {
    /// Convert a JSON error on the snapshot document with context
    #[track_caller]
    pub fn snapshot(err: serde_json::Error) -> Self {
        CoreError::Snapshot {
            message: err.to_string(),
            location: ErrorLocation::from(Location::caller()),
            source: err,
        }
    }

    #[track_caller]
    pub fn validation<S: Into<String>>(message: S) -> Self {
        CoreError::Validation {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = StdResult<T, CoreError>;
