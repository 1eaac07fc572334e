use dm_core::{
    Device, Module, RegistryClient, RegistryError, RegistryResult, Twin, TwinPatch,
    UNCONDITIONAL_ETAG,
};

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;

type TwinKey = (String, Option<String>);

/// Twin update as received by the registry
#[derive(Debug, Clone, PartialEq)]
pub struct TwinUpdate {
    pub device_id: String,
    pub module_id: Option<String>,
    pub patch: TwinPatch,
    pub etag: String,
}

#[derive(Default)]
struct State {
    devices: Vec<Device>,
    modules: Vec<Module>,
    twins: HashMap<TwinKey, Twin>,
    twin_updates: Vec<TwinUpdate>,
    devices_created: usize,
    modules_created: usize,
    next_etag: u64,
}

#[derive(Default)]
struct Faults {
    twin_update: HashSet<String>,
    get_twin: HashSet<String>,
    module_twin: HashSet<(String, String)>,
    unreachable_at: HashSet<String>,
    offline: bool,
    unauthorized: bool,
}

/// Registry kept in memory, with switchable faults.
#[derive(Default)]
pub struct InMemoryRegistry {
    state: Mutex<State>,
    faults: Mutex<Faults>,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a device and its twin directly.
    pub fn with_device(self, device: Device, twin: Option<Twin>) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            let etag = state.etag();
            let mut twin = twin.unwrap_or_default();
            twin.device_id = device.device_id.clone();
            twin.etag = Some(etag);
            state.twins.insert((device.device_id.clone(), None), twin);
            state.devices.push(device);
        }
        self
    }

    pub fn with_module(self, module: Module, twin: Option<Twin>) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            let etag = state.etag();
            let mut twin = twin.unwrap_or_default();
            twin.device_id = module.device_id.clone();
            twin.module_id = Some(module.module_id.clone());
            twin.etag = Some(etag);
            state.twins.insert(
                (module.device_id.clone(), Some(module.module_id.clone())),
                twin,
            );
            state.modules.push(module);
        }
        self
    }

    pub fn fail_twin_update(&self, device_id: &str) {
        self.faults.lock().unwrap().twin_update.insert(device_id.to_string());
    }

    pub fn fail_get_twin(&self, device_id: &str) {
        self.faults.lock().unwrap().get_twin.insert(device_id.to_string());
    }

    pub fn fail_module_twin(&self, device_id: &str, module_id: &str) {
        self.faults
            .lock()
            .unwrap()
            .module_twin
            .insert((device_id.to_string(), module_id.to_string()));
    }

    /// The registry goes away when `device_id` is looked up.
    pub fn unreachable_at(&self, device_id: &str) {
        self.faults.lock().unwrap().unreachable_at.insert(device_id.to_string());
    }

    pub fn go_offline(&self) {
        self.faults.lock().unwrap().offline = true;
    }

    pub fn reject_credentials(&self) {
        self.faults.lock().unwrap().unauthorized = true;
    }

    /// Change the stored twin eTag, as a concurrent writer would.
    pub fn touch_twin(&self, device_id: &str) {
        let mut state = self.state.lock().unwrap();
        let etag = state.etag();
        if let Some(twin) = state.twins.get_mut(&(device_id.to_string(), None)) {
            twin.etag = Some(etag);
        }
    }

    pub fn device(&self, device_id: &str) -> Option<Device> {
        let state = self.state.lock().unwrap();
        state.devices.iter().find(|d| d.device_id == device_id).cloned()
    }

    pub fn device_ids(&self) -> Vec<String> {
        let state = self.state.lock().unwrap();
        state.devices.iter().map(|d| d.device_id.clone()).collect()
    }

    pub fn module(&self, device_id: &str, module_id: &str) -> Option<Module> {
        let state = self.state.lock().unwrap();
        state
            .modules
            .iter()
            .find(|m| m.device_id == device_id && m.module_id == module_id)
            .cloned()
    }

    pub fn twin(&self, device_id: &str, module_id: Option<&str>) -> Option<Twin> {
        let state = self.state.lock().unwrap();
        state
            .twins
            .get(&(device_id.to_string(), module_id.map(String::from)))
            .cloned()
    }

    pub fn twin_updates(&self) -> Vec<TwinUpdate> {
        self.state.lock().unwrap().twin_updates.clone()
    }

    pub fn devices_created(&self) -> usize {
        self.state.lock().unwrap().devices_created
    }

    pub fn modules_created(&self) -> usize {
        self.state.lock().unwrap().modules_created
    }

    fn check_reachable(&self, device_id: &str) -> RegistryResult<()> {
        let faults = self.faults.lock().unwrap();
        if faults.unauthorized {
            return Err(RegistryError::unauthorized("invalid shared access signature"));
        }
        if faults.offline || faults.unreachable_at.contains(device_id) {
            return Err(RegistryError::unreachable("connection refused"));
        }
        Ok(())
    }

    fn apply_patch(
        &self,
        device_id: &str,
        module_id: Option<&str>,
        patch: &TwinPatch,
        etag: &str,
    ) -> RegistryResult<Twin> {
        let mut state = self.state.lock().unwrap();
        state.twin_updates.push(TwinUpdate {
            device_id: device_id.to_string(),
            module_id: module_id.map(String::from),
            patch: patch.clone(),
            etag: etag.to_string(),
        });

        let next_etag = state.etag();
        let key = (device_id.to_string(), module_id.map(String::from));
        let Some(twin) = state.twins.get_mut(&key) else {
            return Err(RegistryError::api(404, "DeviceNotFound", "twin not found"));
        };
        if etag != UNCONDITIONAL_ETAG && twin.etag.as_deref() != Some(etag) {
            return Err(RegistryError::api(
                412,
                "PreconditionFailed",
                "eTag does not match",
            ));
        }

        for (key, value) in &patch.tags {
            twin.tags.insert(key.clone(), value.clone());
        }
        for (key, value) in &patch.properties.desired {
            twin.properties.desired.insert(key.clone(), value.clone());
        }
        twin.etag = Some(next_etag);
        Ok(twin.clone())
    }
}

impl State {
    fn etag(&mut self) -> String {
        self.next_etag += 1;
        format!("etag-{}", self.next_etag)
    }
}

#[async_trait]
impl RegistryClient for InMemoryRegistry {
    async fn list_devices(&self, limit: usize) -> RegistryResult<Vec<Device>> {
        self.check_reachable("")?;
        let state = self.state.lock().unwrap();
        Ok(state.devices.iter().take(limit).cloned().collect())
    }

    async fn get_device(&self, device_id: &str) -> RegistryResult<Option<Device>> {
        self.check_reachable(device_id)?;
        Ok(self.device(device_id))
    }

    async fn get_twin(&self, device_id: &str) -> RegistryResult<Option<Twin>> {
        self.check_reachable(device_id)?;
        if self.faults.lock().unwrap().get_twin.contains(device_id) {
            return Err(RegistryError::api(500, "ServerError", "twin read failed"));
        }
        Ok(self.twin(device_id, None))
    }

    async fn get_module_twin(
        &self,
        device_id: &str,
        module_id: &str,
    ) -> RegistryResult<Option<Twin>> {
        let faulty = self
            .faults
            .lock()
            .unwrap()
            .module_twin
            .contains(&(device_id.to_string(), module_id.to_string()));
        if faulty {
            return Err(RegistryError::api(500, "ServerError", "module twin read failed"));
        }
        Ok(self.twin(device_id, Some(module_id)))
    }

    async fn list_modules(&self, device_id: &str) -> RegistryResult<Vec<Module>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .modules
            .iter()
            .filter(|m| m.device_id == device_id)
            .cloned()
            .collect())
    }

    async fn get_module(
        &self,
        device_id: &str,
        module_id: &str,
    ) -> RegistryResult<Option<Module>> {
        Ok(self.module(device_id, module_id))
    }

    async fn create_device(&self, device: &Device) -> RegistryResult<Device> {
        if self.device(&device.device_id).is_some() {
            return Err(RegistryError::api(409, "DeviceAlreadyExists", "device exists"));
        }

        let mut state = self.state.lock().unwrap();
        let etag = state.etag();
        let created = Device {
            etag: Some(etag.clone()),
            ..device.clone()
        };
        state.twins.insert(
            (device.device_id.clone(), None),
            Twin {
                device_id: device.device_id.clone(),
                etag: Some(etag),
                ..Twin::default()
            },
        );
        state.devices.push(created.clone());
        state.devices_created += 1;
        Ok(created)
    }

    async fn create_module(&self, module: &Module) -> RegistryResult<Module> {
        if self.module(&module.device_id, &module.module_id).is_some() {
            return Err(RegistryError::api(409, "ModuleAlreadyExists", "module exists"));
        }

        let mut state = self.state.lock().unwrap();
        let etag = state.etag();
        state.twins.insert(
            (module.device_id.clone(), Some(module.module_id.clone())),
            Twin {
                device_id: module.device_id.clone(),
                module_id: Some(module.module_id.clone()),
                etag: Some(etag),
                ..Twin::default()
            },
        );
        state.modules.push(module.clone());
        state.modules_created += 1;
        Ok(module.clone())
    }

    async fn update_twin(
        &self,
        device_id: &str,
        patch: &TwinPatch,
        etag: &str,
    ) -> RegistryResult<Twin> {
        if self.faults.lock().unwrap().twin_update.contains(device_id) {
            return Err(RegistryError::api(400, "BadRequest", "twin update rejected"));
        }
        self.apply_patch(device_id, None, patch, etag)
    }

    async fn update_module_twin(
        &self,
        device_id: &str,
        module_id: &str,
        patch: &TwinPatch,
        etag: &str,
    ) -> RegistryResult<Twin> {
        self.apply_patch(device_id, Some(module_id), patch, etag)
    }
}
