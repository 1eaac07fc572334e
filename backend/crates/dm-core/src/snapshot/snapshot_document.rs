use crate::serde_ext::lenient;
use crate::{CoreError, CoreResult, DeviceSnapshot};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Current interchange schema version
pub const SCHEMA_VERSION: u32 = 1;

/// Interchange document written by export and read by import
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotDocument {
    /// Documents without a version are treated as version 1
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// UTC time the source registry was read
    #[serde(default, deserialize_with = "lenient")]
    pub export_date: Option<DateTime<Utc>>,

    /// Devices in registry enumeration order; absent reads as empty
    #[serde(default, deserialize_with = "devices_or_empty")]
    pub devices: Vec<DeviceSnapshot>,
}

impl SnapshotDocument {
    pub fn new(devices: Vec<DeviceSnapshot>) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            export_date: Some(Utc::now()),
            devices,
        }
    }

    #[track_caller]
    pub fn from_json(json: &str) -> CoreResult<Self> {
        serde_json::from_str(json).map_err(CoreError::snapshot)
    }

    #[track_caller]
    pub fn to_json_pretty(&self) -> CoreResult<String> {
        serde_json::to_string_pretty(self).map_err(CoreError::snapshot)
    }

    pub fn find(&self, device_id: &str) -> Option<&DeviceSnapshot> {
        self.devices.iter().find(|d| d.device_id == device_id)
    }
}

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

/// Each entry is read on its own; an entry that is not an object becomes a
/// device with no id, which import reports as a failure.
fn devices_or_empty<'de, D>(deserializer: D) -> Result<Vec<DeviceSnapshot>, D::Error>
where
    D: Deserializer<'de>,
{
    let Value::Array(entries) = Value::deserialize(deserializer)? else {
        return Ok(Vec::new());
    };

    Ok(entries
        .into_iter()
        .map(|entry| serde_json::from_value(entry).unwrap_or_default())
        .collect())
}
