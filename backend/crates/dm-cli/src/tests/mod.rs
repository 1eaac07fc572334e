mod selection_menu;

use crate::Prompt;

use dm_core::{
    Device, DeviceSnapshot, Module, RegistryClient, RegistryError, RegistryResult, Twin,
    TwinPatch,
};

use std::io::Cursor;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

pub(crate) const TEST_CONNECTION_STRING: &str = "HostName=myhub.azure-devices.net;SharedAccessKeyName=iothubowner;SharedAccessKey=MDEyMzQ1Njc4OWFiY2RlZjAxMjM0NTY3ODlhYmNkZWY=";

pub(crate) fn scripted_prompt(script: &str) -> Prompt<Cursor<Vec<u8>>, Vec<u8>> {
    Prompt::new(Cursor::new(script.as_bytes().to_vec()), Vec::new())
}

pub(crate) fn transcript(prompt: Prompt<Cursor<Vec<u8>>, Vec<u8>>) -> String {
    String::from_utf8_lossy(&prompt.into_output()).into_owned()
}

pub(crate) fn device(id: &str, status: &str) -> DeviceSnapshot {
    DeviceSnapshot {
        status: Some(status.to_string()),
        ..DeviceSnapshot::new(id)
    }
}

pub(crate) fn fleet() -> Vec<DeviceSnapshot> {
    vec![
        device("sensor-01", "enabled"),
        device("sensor-02", "disabled"),
        device("pump-01", "enabled"),
    ]
}

/// Registry that starts empty apart from `source` devices and accepts every
/// write. Clones share state.
#[derive(Clone, Default)]
pub(crate) struct StubRegistry {
    source: Arc<Vec<Device>>,
    created: Arc<Mutex<Vec<String>>>,
    unreachable_at: Option<String>,
}

impl StubRegistry {
    pub(crate) fn with_devices(ids: &[&str]) -> Self {
        Self {
            source: Arc::new(ids.iter().map(|id| Device::new(*id)).collect()),
            ..Self::default()
        }
    }

    /// Reading the twin of `device_id` fails as if the registry went away.
    pub(crate) fn unreachable_at(mut self, device_id: &str) -> Self {
        self.unreachable_at = Some(device_id.to_string());
        self
    }

    pub(crate) fn created(&self) -> Vec<String> {
        self.created.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl RegistryClient for StubRegistry {
    async fn list_devices(&self, limit: usize) -> RegistryResult<Vec<Device>> {
        Ok(self.source.iter().take(limit).cloned().collect())
    }

    async fn get_device(&self, _device_id: &str) -> RegistryResult<Option<Device>> {
        Ok(None)
    }

    async fn get_twin(&self, device_id: &str) -> RegistryResult<Option<Twin>> {
        if self.unreachable_at.as_deref() == Some(device_id) {
            return Err(RegistryError::unreachable("connection refused"));
        }
        Ok(Some(Twin {
            device_id: device_id.to_string(),
            ..Twin::default()
        }))
    }

    async fn get_module_twin(
        &self,
        _device_id: &str,
        _module_id: &str,
    ) -> RegistryResult<Option<Twin>> {
        Ok(None)
    }

    async fn list_modules(&self, _device_id: &str) -> RegistryResult<Vec<Module>> {
        Ok(Vec::new())
    }

    async fn get_module(
        &self,
        _device_id: &str,
        _module_id: &str,
    ) -> RegistryResult<Option<Module>> {
        Ok(None)
    }

    async fn create_device(&self, device: &Device) -> RegistryResult<Device> {
        if let Ok(mut created) = self.created.lock() {
            created.push(device.device_id.clone());
        }
        Ok(device.clone())
    }

    async fn create_module(&self, module: &Module) -> RegistryResult<Module> {
        Ok(module.clone())
    }

    async fn update_twin(
        &self,
        device_id: &str,
        _patch: &TwinPatch,
        _etag: &str,
    ) -> RegistryResult<Twin> {
        Ok(Twin {
            device_id: device_id.to_string(),
            ..Twin::default()
        })
    }

    async fn update_module_twin(
        &self,
        device_id: &str,
        module_id: &str,
        _patch: &TwinPatch,
        _etag: &str,
    ) -> RegistryResult<Twin> {
        Ok(Twin {
            device_id: device_id.to_string(),
            module_id: Some(module_id.to_string()),
            ..Twin::default()
        })
    }
}
