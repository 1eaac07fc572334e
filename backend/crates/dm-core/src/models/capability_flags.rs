use serde::{Deserialize, Serialize};

/// Device capabilities; the registry calls the gateway flag `iotEdge`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityFlags {
    #[serde(rename = "iotEdge", default)]
    pub gateway_capable: bool,
}

impl CapabilityFlags {
    pub fn gateway(gateway_capable: bool) -> Self {
        Self { gateway_capable }
    }
}
