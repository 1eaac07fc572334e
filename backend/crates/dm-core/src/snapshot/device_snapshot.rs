use crate::serde_ext::{lenient, lenient_or_default};
use crate::{
    AuthDescriptor, AuthenticationMechanism, CapabilityFlags, Device, DeviceStatus,
    ModuleSnapshot, Twin, TwinSnapshot,
};

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One exported device with its twin and modules.
///
/// The field list is fixed; unknown fields in a document are ignored.
/// Every optional block is read leniently so one malformed entry cannot fail
/// the whole document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceSnapshot {
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub device_id: String,

    #[serde(default, deserialize_with = "lenient")]
    pub etag: Option<String>,

    /// Kept verbatim; see [`DeviceSnapshot::status`] for the parsed value.
    #[serde(default, deserialize_with = "lenient")]
    pub status: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub status_reason: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub connection_state: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub last_activity_time: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "lenient")]
    pub cloud_to_device_message_count: Option<i64>,

    #[serde(default, deserialize_with = "lenient")]
    pub authentication: Option<AuthenticationMechanism>,

    #[serde(default, deserialize_with = "lenient")]
    pub capabilities: Option<CapabilityFlags>,

    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub device_scope: Option<String>,

    #[serde(default, deserialize_with = "lenient_or_default")]
    pub parent_scopes: Vec<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub twin: Option<TwinSnapshot>,

    #[serde(default, deserialize_with = "lenient_or_default")]
    pub modules: Vec<ModuleSnapshot>,
}

impl DeviceSnapshot {
    pub fn new(device_id: impl Into<String>) -> Self {
        Self {
            device_id: device_id.into(),
            ..Self::default()
        }
    }

    pub fn from_device(device: Device, twin: Option<Twin>, modules: Vec<ModuleSnapshot>) -> Self {
        Self {
            device_id: device.device_id,
            etag: device.etag,
            status: device.status.map(|s| s.as_str().to_string()),
            status_reason: device.status_reason,
            connection_state: device.connection_state,
            last_activity_time: device.last_activity_time,
            cloud_to_device_message_count: device.cloud_to_device_message_count,
            authentication: device.authentication,
            capabilities: device.capabilities,
            device_scope: device.device_scope,
            parent_scopes: device.parent_scopes,
            twin: twin.map(TwinSnapshot::from),
            modules,
        }
    }

    /// Status parsed against [`DeviceStatus`]; unknown strings yield `None`.
    pub fn status(&self) -> Option<DeviceStatus> {
        self.status
            .as_deref()
            .and_then(|s| DeviceStatus::from_str(s).ok())
    }

    pub fn auth_descriptor(&self) -> Option<AuthDescriptor> {
        self.authentication
            .as_ref()
            .and_then(AuthDescriptor::from_mechanism)
    }

    pub fn has_id(&self) -> bool {
        !self.device_id.trim().is_empty()
    }
}
