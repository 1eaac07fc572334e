use crate::AuthenticationMechanism;
use crate::serde_ext::lenient;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Module identity record as exchanged with the registry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    pub module_id: String,

    pub device_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub managed_by: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generation_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection_state: Option<String>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub last_activity_time: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authentication: Option<AuthenticationMechanism>,
}

impl Module {
    pub fn new(device_id: impl Into<String>, module_id: impl Into<String>) -> Self {
        Self {
            device_id: device_id.into(),
            module_id: module_id.into(),
            ..Self::default()
        }
    }
}
