//! Accumulating device selection for import.

use crate::{DeviceSnapshot, DeviceStatus};

use std::collections::HashSet;

/// One way of picking devices out of a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectCriterion {
    All,
    /// Case-insensitive prefix of the device id
    PrefixMatch(String),
    /// `enabled` or `disabled`, case-insensitive; anything else matches nothing
    StatusMatch(String),
    /// Exact device ids; unknown ids are skipped
    ExplicitIds(Vec<String>),
}

/// What a single [`Selection::apply`] did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectOutcome {
    /// Devices the criterion matched, including ones already selected
    pub matched: usize,
    /// Devices newly added to the selection
    pub added: usize,
    /// Requested ids with no device in the document
    pub unknown_ids: Vec<String>,
}

/// Running selection: grows across criteria, never holds a device id twice,
/// and keeps the order in which devices were first added.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    devices: Vec<DeviceSnapshot>,
    ids: HashSet<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(
        &mut self,
        devices: &[DeviceSnapshot],
        criterion: &SelectCriterion,
    ) -> SelectOutcome {
        let mut outcome = SelectOutcome::default();

        match criterion {
            SelectCriterion::All => {
                for device in devices {
                    self.offer(device, &mut outcome);
                }
            }
            SelectCriterion::PrefixMatch(prefix) => {
                let prefix = prefix.trim().to_lowercase();
                if prefix.is_empty() {
                    return outcome;
                }
                for device in devices
                    .iter()
                    .filter(|d| d.device_id.to_lowercase().starts_with(&prefix))
                {
                    self.offer(device, &mut outcome);
                }
            }
            SelectCriterion::StatusMatch(status) => {
                let Ok(wanted) = status.parse::<DeviceStatus>() else {
                    return outcome;
                };
                for device in devices.iter().filter(|d| {
                    d.status
                        .as_deref()
                        .is_some_and(|s| s.eq_ignore_ascii_case(wanted.as_str()))
                }) {
                    self.offer(device, &mut outcome);
                }
            }
            SelectCriterion::ExplicitIds(requested) => {
                for id in requested.iter().map(|id| id.trim()).filter(|id| !id.is_empty()) {
                    match devices.iter().find(|d| d.device_id == id) {
                        Some(device) => self.offer(device, &mut outcome),
                        None => outcome.unknown_ids.push(id.to_string()),
                    }
                }
            }
        }

        outcome
    }

    pub fn contains(&self, device_id: &str) -> bool {
        self.ids.contains(device_id)
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    pub fn devices(&self) -> &[DeviceSnapshot] {
        &self.devices
    }

    pub fn into_devices(self) -> Vec<DeviceSnapshot> {
        self.devices
    }

    fn offer(&mut self, device: &DeviceSnapshot, outcome: &mut SelectOutcome) {
        if !device.has_id() {
            return;
        }
        outcome.matched += 1;
        if self.ids.insert(device.device_id.clone()) {
            self.devices.push(device.clone());
            outcome.added += 1;
        }
    }
}
