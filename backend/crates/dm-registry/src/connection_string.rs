use crate::{ClientError, ClientResult};

use std::str::FromStr;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

const HOST_NAME: &str = "HostName";
const SHARED_ACCESS_KEY_NAME: &str = "SharedAccessKeyName";
const SHARED_ACCESS_KEY: &str = "SharedAccessKey";

/// Parsed registry connection string:
/// `HostName=<host>;SharedAccessKeyName=<policy>;SharedAccessKey=<base64 key>`.
///
/// Keys match case-insensitively; unknown keys are ignored.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionString {
    pub host_name: String,
    pub shared_access_key_name: Option<String>,
    shared_access_key: String,
}

impl ConnectionString {
    #[track_caller]
    pub fn parse(input: &str) -> ClientResult<Self> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ClientError::connection_string("connection string is empty"));
        }

        let mut host_name = None;
        let mut key_name = None;
        let mut key = None;

        for (index, part) in input
            .split(';')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .enumerate()
        {
            // The key itself is base64 and may end in '='
            let Some((name, value)) = part.split_once('=') else {
                return Err(ClientError::connection_string(format!(
                    "segment {} is not of the form Name=Value",
                    index + 1
                )));
            };
            let value = value.trim();
            if value.is_empty() {
                continue;
            }

            let name = name.trim();
            if name.eq_ignore_ascii_case(HOST_NAME) {
                host_name = Some(value.to_string());
            } else if name.eq_ignore_ascii_case(SHARED_ACCESS_KEY_NAME) {
                key_name = Some(value.to_string());
            } else if name.eq_ignore_ascii_case(SHARED_ACCESS_KEY) {
                key = Some(value.to_string());
            }
        }

        let host_name = host_name
            .ok_or_else(|| ClientError::connection_string(format!("{} is missing", HOST_NAME)))?;
        let shared_access_key = key.ok_or_else(|| {
            ClientError::connection_string(format!("{} is missing", SHARED_ACCESS_KEY))
        })?;

        if STANDARD.decode(&shared_access_key).is_err() {
            return Err(ClientError::shared_access_key(format!(
                "{} is not valid base64",
                SHARED_ACCESS_KEY
            )));
        }

        Ok(Self {
            host_name,
            shared_access_key_name: key_name,
            shared_access_key,
        })
    }

    /// Decoded signing key
    #[track_caller]
    pub fn key_bytes(&self) -> ClientResult<Vec<u8>> {
        STANDARD
            .decode(&self.shared_access_key)
            .map_err(|e| ClientError::shared_access_key(e.to_string()))
    }
}

impl FromStr for ConnectionString {
    type Err = ClientError;

    #[track_caller]
    fn from_str(s: &str) -> ClientResult<Self> {
        Self::parse(s)
    }
}

impl std::fmt::Debug for ConnectionString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionString")
            .field("host_name", &self.host_name)
            .field("shared_access_key_name", &self.shared_access_key_name)
            .field("shared_access_key", &"<redacted>")
            .finish()
    }
}
