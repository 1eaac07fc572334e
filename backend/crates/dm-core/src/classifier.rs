//! Gateway (edge-capable) device detection.

use crate::{CapabilityFlags, ModuleSnapshot};

/// Runtime modules only present on gateway devices
pub const EDGE_SYSTEM_MODULES: [&str; 2] = ["$edgeAgent", "$edgeHub"];

/// Which rule decided the classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// Explicit capability flag set to true
    CapabilityFlag,
    /// A gateway runtime module was listed under the device
    SystemModule(String),
    /// Neither rule matched: regular device
    Default,
}

impl Classification {
    pub fn is_gateway(&self) -> bool {
        !matches!(self, Classification::Default)
    }
}

/// Rules apply in order and stop at the first match:
/// 1. capability flag present and true
/// 2. any module id equal to one of [`EDGE_SYSTEM_MODULES`]
/// 3. otherwise not a gateway
///
/// A flag that is present but false does not stop rule 2.
pub fn classify_with_reason(
    capabilities: Option<&CapabilityFlags>,
    modules: &[ModuleSnapshot],
) -> Classification {
    if capabilities.is_some_and(|c| c.gateway_capable) {
        return Classification::CapabilityFlag;
    }

    modules
        .iter()
        .filter_map(ModuleSnapshot::resolved_id)
        .find(|id| EDGE_SYSTEM_MODULES.contains(id))
        .map(|id| Classification::SystemModule(id.to_string()))
        .unwrap_or(Classification::Default)
}

pub fn classify(capabilities: Option<&CapabilityFlags>, modules: &[ModuleSnapshot]) -> bool {
    classify_with_reason(capabilities, modules).is_gateway()
}
