use crate::{
    ClientResult, ConnectionString, DEFAULT_API_VERSION, DEFAULT_REQUEST_TIMEOUT_SECS,
    DEFAULT_SAS_TOKEN_TTL_SECS, SasTokenProvider,
};

use dm_core::{
    Device, Module, RegistryClient, RegistryError, RegistryResult, Twin, TwinPatch,
    UNCONDITIONAL_ETAG,
};

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::header::{ACCEPT, AUTHORIZATION, IF_MATCH};
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Tunables for [`HttpRegistryClient`]
#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub api_version: String,
    pub request_timeout: Duration,
    pub sas_token_ttl: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_version: DEFAULT_API_VERSION.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            sas_token_ttl: Duration::from_secs(DEFAULT_SAS_TOKEN_TTL_SECS),
        }
    }
}

/// HTTP client for the device registry REST API
#[derive(Debug)]
pub struct HttpRegistryClient {
    pub base_url: String,
    pub api_version: String,
    tokens: SasTokenProvider,
    client: ReqwestClient,
}

impl HttpRegistryClient {
    /// Create a client for the hub named in `connection`.
    #[track_caller]
    pub fn new(connection: &ConnectionString, settings: &ClientSettings) -> ClientResult<Self> {
        let client = ReqwestClient::builder()
            .timeout(settings.request_timeout)
            .build()?;

        Ok(Self {
            base_url: format!("https://{}", connection.host_name),
            api_version: settings.api_version.clone(),
            tokens: SasTokenProvider::new(connection, settings.sas_token_ttl)?,
            client,
        })
    }

    /// Send requests to `base_url` instead of the hub host. Tokens are still
    /// signed for the hub host.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Build an authorized request; `query` is appended before `api-version`.
    fn request(&self, method: Method, path: &str, query: &[(&str, String)]) -> RequestBuilder {
        let mut url = format!("{}{}?", self.base_url, path);
        for (name, value) in query {
            url.push_str(&format!("{}={}&", name, urlencoding::encode(value)));
        }
        url.push_str(&format!(
            "api-version={}",
            urlencoding::encode(&self.api_version)
        ));

        debug!("{} {}", method, url);
        self.client
            .request(method, &url)
            .header(AUTHORIZATION, self.tokens.token())
            .header(ACCEPT, "application/json")
    }

    /// Execute request and decode a successful body
    async fn execute<T: DeserializeOwned>(&self, req: RequestBuilder) -> RegistryResult<T> {
        match self.execute_optional(req, false).await? {
            Some(value) => Ok(value),
            None => Err(RegistryError::decode("registry returned no entity")),
        }
    }

    /// Execute request; a 404 yields `Ok(None)` when `not_found_is_none` is set
    async fn execute_optional<T: DeserializeOwned>(
        &self,
        req: RequestBuilder,
        not_found_is_none: bool,
    ) -> RegistryResult<Option<T>> {
        let response = req.send().await.map_err(map_send_error)?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| RegistryError::transport(e.to_string()))?;

        if status == StatusCode::NOT_FOUND && not_found_is_none {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(map_status_error(status, &body));
        }

        serde_json::from_str(&body)
            .map(Some)
            .map_err(|e| RegistryError::decode(e.to_string()))
    }
}

#[async_trait]
impl RegistryClient for HttpRegistryClient {
    async fn list_devices(&self, limit: usize) -> RegistryResult<Vec<Device>> {
        let req = self.request(Method::GET, "/devices", &[("top", limit.to_string())]);
        self.execute(req).await
    }

    async fn get_device(&self, device_id: &str) -> RegistryResult<Option<Device>> {
        let req = self.request(Method::GET, &device_path(device_id), &[]);
        self.execute_optional(req, true).await
    }

    async fn get_twin(&self, device_id: &str) -> RegistryResult<Option<Twin>> {
        let req = self.request(Method::GET, &twin_path(device_id, None), &[]);
        self.execute_optional(req, true).await
    }

    async fn get_module_twin(
        &self,
        device_id: &str,
        module_id: &str,
    ) -> RegistryResult<Option<Twin>> {
        let req = self.request(Method::GET, &twin_path(device_id, Some(module_id)), &[]);
        self.execute_optional(req, true).await
    }

    async fn list_modules(&self, device_id: &str) -> RegistryResult<Vec<Module>> {
        let path = format!("{}/modules", device_path(device_id));
        let req = self.request(Method::GET, &path, &[]);
        self.execute(req).await
    }

    async fn get_module(
        &self,
        device_id: &str,
        module_id: &str,
    ) -> RegistryResult<Option<Module>> {
        let req = self.request(Method::GET, &module_path(device_id, module_id), &[]);
        self.execute_optional(req, true).await
    }

    async fn create_device(&self, device: &Device) -> RegistryResult<Device> {
        let req = self
            .request(Method::PUT, &device_path(&device.device_id), &[])
            .json(device);
        self.execute(req).await
    }

    async fn create_module(&self, module: &Module) -> RegistryResult<Module> {
        let req = self
            .request(
                Method::PUT,
                &module_path(&module.device_id, &module.module_id),
                &[],
            )
            .json(module);
        self.execute(req).await
    }

    async fn update_twin(
        &self,
        device_id: &str,
        patch: &TwinPatch,
        etag: &str,
    ) -> RegistryResult<Twin> {
        let req = self
            .request(Method::PATCH, &twin_path(device_id, None), &[])
            .header(IF_MATCH, if_match(etag))
            .json(patch);
        self.execute(req).await
    }

    async fn update_module_twin(
        &self,
        device_id: &str,
        module_id: &str,
        patch: &TwinPatch,
        etag: &str,
    ) -> RegistryResult<Twin> {
        let req = self
            .request(Method::PATCH, &twin_path(device_id, Some(module_id)), &[])
            .header(IF_MATCH, if_match(etag))
            .json(patch);
        self.execute(req).await
    }
}

// =========================================================================
// Helpers
// =========================================================================

fn device_path(device_id: &str) -> String {
    format!("/devices/{}", urlencoding::encode(device_id))
}

fn module_path(device_id: &str, module_id: &str) -> String {
    format!(
        "{}/modules/{}",
        device_path(device_id),
        urlencoding::encode(module_id)
    )
}

fn twin_path(device_id: &str, module_id: Option<&str>) -> String {
    let mut path = format!("/twins/{}", urlencoding::encode(device_id));
    if let Some(module_id) = module_id {
        path.push_str(&format!("/modules/{}", urlencoding::encode(module_id)));
    }
    path
}

/// Entity tags travel quoted; the wildcard does not.
pub(crate) fn if_match(etag: &str) -> String {
    if etag == UNCONDITIONAL_ETAG {
        etag.to_string()
    } else {
        format!("\"{}\"", etag.trim_matches('"'))
    }
}

#[track_caller]
fn map_send_error(err: reqwest::Error) -> RegistryError {
    if err.is_connect() {
        RegistryError::unreachable(err.to_string())
    } else {
        RegistryError::transport(err.to_string())
    }
}

/// Map a non-success response, reading `Message`/`ErrorCode` from the body
/// when the registry sent them.
#[track_caller]
pub(crate) fn map_status_error(status: StatusCode, body: &str) -> RegistryError {
    let parsed: Option<Value> = serde_json::from_str(body).ok();
    let field = |names: &[&str]| {
        parsed.as_ref().and_then(|v| {
            names
                .iter()
                .find_map(|name| v.get(*name).and_then(Value::as_str))
                .map(String::from)
        })
    };

    let message = field(&["Message", "message"]).unwrap_or_else(|| {
        status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string()
    });

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return RegistryError::unauthorized(message);
    }

    let code = field(&["ErrorCode", "errorCode"]).unwrap_or_else(|| "UNKNOWN".to_string());
    RegistryError::api(status.as_u16(), code, message)
}
