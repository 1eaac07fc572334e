use crate::{EntityFailure, EntityImportCounts};

use serde::Serialize;

/// Running totals threaded through one import.
#[derive(Debug, Default, Clone, Serialize)]
pub struct ImportReport {
    pub devices: EntityImportCounts,
    pub modules: EntityImportCounts,
    pub failures: Vec<EntityFailure>,
    /// Set when the registry became unusable and the remaining devices were
    /// not attempted. Counts up to that point are kept.
    pub aborted: Option<String>,
}

impl ImportReport {
    pub fn device_success(&self) -> usize {
        self.devices.succeeded
    }

    pub fn device_failure(&self) -> usize {
        self.devices.failed
    }

    pub fn module_success(&self) -> usize {
        self.modules.succeeded
    }

    pub fn module_failure(&self) -> usize {
        self.modules.failed
    }

    /// Devices and modules imported successfully
    pub fn total_succeeded(&self) -> usize {
        self.devices.succeeded + self.modules.succeeded
    }

    pub fn is_clean(&self) -> bool {
        self.devices.failed == 0 && self.modules.failed == 0 && self.aborted.is_none()
    }

    pub(crate) fn record_device_failure(&mut self, failure: EntityFailure) {
        self.devices.failed += 1;
        self.failures.push(failure);
    }

    pub(crate) fn record_module_failure(&mut self, failure: EntityFailure) {
        self.modules.failed += 1;
        self.failures.push(failure);
    }
}
