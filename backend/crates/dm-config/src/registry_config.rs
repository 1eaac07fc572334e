use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_API_VERSION, DEFAULT_REQUEST_TIMEOUT_SECS,
    DEFAULT_SAS_TOKEN_TTL_SECS,
};

use serde::Deserialize;

pub const MIN_REQUEST_TIMEOUT_SECS: u64 = 1;
pub const MAX_REQUEST_TIMEOUT_SECS: u64 = 300;

pub const MIN_SAS_TOKEN_TTL_SECS: u64 = 60;
pub const MAX_SAS_TOKEN_TTL_SECS: u64 = 86400;

/// Registry connection settings.
///
/// Connection strings carry the signing key and are never logged.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// REST API version sent with every request
    pub api_version: String,
    pub request_timeout_secs: u64,
    /// Lifetime of each generated SAS token
    pub sas_token_ttl_secs: u64,
    /// Offered as the default when exporting
    pub source_connection_string: Option<String>,
    /// Offered as the default when importing
    pub destination_connection_string: Option<String>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            api_version: String::from(DEFAULT_API_VERSION),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            sas_token_ttl_secs: DEFAULT_SAS_TOKEN_TTL_SECS,
            source_connection_string: None,
            destination_connection_string: None,
        }
    }
}

impl RegistryConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.api_version.trim().is_empty() {
            return Err(ConfigError::registry("registry.api_version cannot be empty"));
        }

        if self.request_timeout_secs < MIN_REQUEST_TIMEOUT_SECS
            || self.request_timeout_secs > MAX_REQUEST_TIMEOUT_SECS
        {
            return Err(ConfigError::registry(format!(
                "registry.request_timeout_secs must be {}-{}, got {}",
                MIN_REQUEST_TIMEOUT_SECS, MAX_REQUEST_TIMEOUT_SECS, self.request_timeout_secs
            )));
        }

        if self.sas_token_ttl_secs < MIN_SAS_TOKEN_TTL_SECS
            || self.sas_token_ttl_secs > MAX_SAS_TOKEN_TTL_SECS
        {
            return Err(ConfigError::registry(format!(
                "registry.sas_token_ttl_secs must be {}-{}, got {}",
                MIN_SAS_TOKEN_TTL_SECS, MAX_SAS_TOKEN_TTL_SECS, self.sas_token_ttl_secs
            )));
        }

        Ok(())
    }
}

impl std::fmt::Debug for RegistryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redacted = |value: &Option<String>| value.as_ref().map(|_| "<redacted>");
        f.debug_struct("RegistryConfig")
            .field("api_version", &self.api_version)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("sas_token_ttl_secs", &self.sas_token_ttl_secs)
            .field(
                "source_connection_string",
                &redacted(&self.source_connection_string),
            )
            .field(
                "destination_connection_string",
                &redacted(&self.destination_connection_string),
            )
            .finish()
    }
}
