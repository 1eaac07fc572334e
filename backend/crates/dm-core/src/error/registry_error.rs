use std::panic::Location;
use std::result::Result as StdResult;

use error_location::ErrorLocation;
use thiserror::Error;

/// Errors reported by a [`crate::RegistryClient`] implementation.
///
/// Only [`RegistryError::is_fatal`] errors may end an export or import early;
/// everything else is scoped to the entity that triggered it.
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Registry unreachable: {message} {location}")]
    Unreachable {
        message: String,
        location: ErrorLocation,
    },

    #[error("Registry rejected credentials: {message} {location}")]
    Unauthorized {
        message: String,
        location: ErrorLocation,
    },

    #[error("Registry API error: {message} (status: {status}, code: {code}) {location}")]
    Api {
        status: u16,
        code: String,
        message: String,
        location: ErrorLocation,
    },

    #[error("Registry request failed: {message} {location}")]
    Transport {
        message: String,
        location: ErrorLocation,
    },

    #[error("Registry response decode error: {message} {location}")]
    Decode {
        message: String,
        location: ErrorLocation,
    },
}

impl RegistryError {
    #[track_caller]
    pub fn unreachable<S: Into<String>>(message: S) -> Self {
        RegistryError::Unreachable {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn unauthorized<S: Into<String>>(message: S) -> Self {
        RegistryError::Unauthorized {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn api<C: Into<String>, S: Into<String>>(status: u16, code: C, message: S) -> Self {
        RegistryError::Api {
            status,
            code: code.into(),
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn transport<S: Into<String>>(message: S) -> Self {
        RegistryError::Transport {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn decode<S: Into<String>>(message: S) -> Self {
        RegistryError::Decode {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// The backend cannot be used at all: stop the whole operation.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            RegistryError::Unreachable { .. } | RegistryError::Unauthorized { .. }
        )
    }

    /// HTTP-style status for API errors, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            RegistryError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type RegistryResult<T> = StdResult<T, RegistryError>;
