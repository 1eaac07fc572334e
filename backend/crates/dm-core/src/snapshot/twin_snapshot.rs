use crate::serde_ext::{lenient, lenient_or_default};
use crate::{Twin, TwinPatch, TwinPatchProperties};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Keys the registry maintains itself; never replayed.
pub const RESERVED_TWIN_KEYS: [&str; 2] = ["$metadata", "$version"];

/// Twin content carried in the snapshot document.
///
/// Desired properties and tags are replayed on import. Reported properties
/// and the version are kept for reference only. Each field is read on its
/// own, so a malformed block loses only itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TwinSnapshot {
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub etag: Option<String>,

    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub version: Option<i64>,

    #[serde(default, deserialize_with = "lenient_or_default")]
    pub tags: Map<String, Value>,

    #[serde(default, deserialize_with = "lenient_or_default")]
    pub properties: TwinSnapshotProperties,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TwinSnapshotProperties {
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub desired: Map<String, Value>,

    #[serde(
        default,
        deserialize_with = "lenient_or_default",
        skip_serializing_if = "Map::is_empty"
    )]
    pub reported: Map<String, Value>,
}

impl From<Twin> for TwinSnapshot {
    fn from(twin: Twin) -> Self {
        Self {
            etag: twin.etag,
            version: twin.version,
            tags: twin.tags,
            properties: TwinSnapshotProperties {
                desired: twin.properties.desired,
                reported: twin.properties.reported,
            },
        }
    }
}

impl TwinSnapshot {
    /// Build the update sent to the destination: desired properties and tags
    /// with reserved keys removed.
    pub fn to_patch(&self) -> TwinPatch {
        TwinPatch {
            tags: strip_reserved(&self.tags),
            properties: TwinPatchProperties {
                desired: strip_reserved(&self.properties.desired),
            },
        }
    }
}

fn strip_reserved(map: &Map<String, Value>) -> Map<String, Value> {
    map.iter()
        .filter(|(key, _)| !RESERVED_TWIN_KEYS.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}
