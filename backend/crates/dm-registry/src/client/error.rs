use error_location::ErrorLocation;
use std::panic::Location;
use thiserror::Error;

/// Errors raised while setting up a registry client.
///
/// Failures of individual registry calls are reported as
/// [`dm_core::RegistryError`] instead.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Invalid connection string: {message} {location}")]
    ConnectionString {
        message: String,
        location: ErrorLocation,
    },

    #[error("Invalid shared access key: {message} {location}")]
    SharedAccessKey {
        message: String,
        location: ErrorLocation,
    },

    #[error("HTTP client error: {message} {location}")]
    Http {
        message: String,
        location: ErrorLocation,
        #[source]
        source: reqwest::Error,
    },
}

impl ClientError {
    #[track_caller]
    pub fn connection_string<S: Into<String>>(message: S) -> Self {
        ClientError::ConnectionString {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn shared_access_key<S: Into<String>>(message: S) -> Self {
        ClientError::SharedAccessKey {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Convert reqwest error with context
    #[track_caller]
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        ClientError::Http {
            message: err.to_string(),
            location: ErrorLocation::from(Location::caller()),
            source: err,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    #[track_caller]
    fn from(err: reqwest::Error) -> Self {
        ClientError::from_reqwest(err)
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
