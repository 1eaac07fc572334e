use crate::serde_ext::null_as_default;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Twin document as returned by the registry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Twin {
    #[serde(default)]
    pub device_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Map<String, Value>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub properties: TwinProperties,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TwinProperties {
    #[serde(default, deserialize_with = "null_as_default")]
    pub desired: Map<String, Value>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub reported: Map<String, Value>,
}

/// Partial twin update: only tags and desired properties are ever written.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TwinPatch {
    pub tags: Map<String, Value>,
    pub properties: TwinPatchProperties,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TwinPatchProperties {
    pub desired: Map<String, Value>,
}

impl TwinPatch {
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty() && self.properties.desired.is_empty()
    }
}
