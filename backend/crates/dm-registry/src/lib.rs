//! dm-registry
//!
//! HTTP implementation of [`dm_core::RegistryClient`] for the device registry
//! REST API, authenticated with shared access signatures.

pub(crate) mod client;
pub(crate) mod connection_string;
pub(crate) mod sas_token;

#[cfg(test)]
mod tests;

pub use client::{ClientError, ClientSettings, HttpRegistryClient, Result as ClientResult};
pub use connection_string::ConnectionString;
pub use sas_token::SasTokenProvider;

/// Registry REST API version sent with every request unless configured
pub const DEFAULT_API_VERSION: &str = "2021-04-12";
/// Seconds before an HTTP request is abandoned
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
/// Lifetime of each generated SAS token
pub const DEFAULT_SAS_TOKEN_TTL_SECS: u64 = 3600;
