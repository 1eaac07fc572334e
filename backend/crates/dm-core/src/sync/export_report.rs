use crate::{EntityFailure, SnapshotDocument};

/// Result of walking a source registry.
#[derive(Debug, Clone)]
pub struct ExportReport {
    pub document: SnapshotDocument,
    /// Devices left out of the document
    pub failed_devices: Vec<EntityFailure>,
    /// Modules exported without a twin
    pub module_warnings: Vec<EntityFailure>,
    /// The registry returned exactly the requested limit, so more devices may
    /// exist than were exported
    pub possibly_truncated: bool,
    /// Set when the registry became unusable part way through. The document
    /// then holds only the devices read before that point.
    pub aborted: Option<String>,
}

impl ExportReport {
    pub fn exported(&self) -> usize {
        self.document.devices.len()
    }

    pub fn is_complete(&self) -> bool {
        self.aborted.is_none()
    }
}
