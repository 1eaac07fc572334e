use crate::serde_ext::{lenient, null_as_default};
use crate::{AuthenticationMechanism, CapabilityFlags, DeviceStatus};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Device identity record as exchanged with the registry.
///
/// Read-only fields (`etag`, `connectionState`, activity counters) are
/// populated by the registry and omitted when we create a device.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub device_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generation_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<DeviceStatus>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_reason: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection_state: Option<String>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub last_activity_time: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cloud_to_device_message_count: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authentication: Option<AuthenticationMechanism>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capabilities: Option<CapabilityFlags>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_scope: Option<String>,

    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub parent_scopes: Vec<String>,
}

impl Device {
    pub fn new(device_id: impl Into<String>) -> Self {
        Self {
            device_id: device_id.into(),
            ..Self::default()
        }
    }

    pub fn is_gateway(&self) -> bool {
        self.capabilities.is_some_and(|c| c.gateway_capable)
    }
}
