use crate::{ClientError, ClientResult, ConnectionString};

use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Issues `SharedAccessSignature` authorization values for one registry host.
#[derive(Clone)]
pub struct SasTokenProvider {
    resource: String,
    policy: Option<String>,
    mac: HmacSha256,
    ttl: Duration,
}

impl SasTokenProvider {
    #[track_caller]
    pub fn new(connection: &ConnectionString, ttl: Duration) -> ClientResult<Self> {
        let key = connection.key_bytes()?;
        let mac = HmacSha256::new_from_slice(&key)
            .map_err(|e| ClientError::shared_access_key(e.to_string()))?;

        Ok(Self {
            resource: connection.host_name.to_lowercase(),
            policy: connection.shared_access_key_name.clone(),
            mac,
            ttl,
        })
    }

    /// Token valid for the configured lifetime from now.
    pub fn token(&self) -> String {
        let expiry = Utc::now().timestamp() + self.ttl.as_secs() as i64;
        self.token_expiring_at(expiry)
    }

    /// Token expiring at `expiry` seconds since the Unix epoch.
    pub fn token_expiring_at(&self, expiry: i64) -> String {
        let encoded_resource = urlencoding::encode(&self.resource);
        let to_sign = format!("{}\n{}", encoded_resource, expiry);

        let mut mac = self.mac.clone();
        mac.update(to_sign.as_bytes());
        let signature = STANDARD.encode(mac.finalize().into_bytes());

        let mut token = format!(
            "SharedAccessSignature sr={}&sig={}&se={}",
            encoded_resource,
            urlencoding::encode(&signature),
            expiry
        );
        if let Some(policy) = &self.policy {
            token.push_str("&skn=");
            token.push_str(&urlencoding::encode(policy));
        }
        token
    }
}

impl std::fmt::Debug for SasTokenProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SasTokenProvider")
            .field("resource", &self.resource)
            .field("policy", &self.policy)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}
