use crate::{Device, Module, RegistryResult, Twin, TwinPatch};

use async_trait::async_trait;

/// Wildcard concurrency token: apply the update whatever the current eTag
pub const UNCONDITIONAL_ETAG: &str = "*";

/// Operations export and import need from a device registry.
///
/// Implementations own connection handling, authentication, retries and
/// timeouts. Single-entity lookups return `Ok(None)` when the entity does not
/// exist; errors are reserved for real failures.
#[async_trait]
pub trait RegistryClient: Send + Sync {
    /// List up to `limit` devices in registry enumeration order.
    async fn list_devices(&self, limit: usize) -> RegistryResult<Vec<Device>>;

    async fn get_device(&self, device_id: &str) -> RegistryResult<Option<Device>>;

    async fn get_twin(&self, device_id: &str) -> RegistryResult<Option<Twin>>;

    async fn get_module_twin(
        &self,
        device_id: &str,
        module_id: &str,
    ) -> RegistryResult<Option<Twin>>;

    /// List modules of a device in registry enumeration order.
    async fn list_modules(&self, device_id: &str) -> RegistryResult<Vec<Module>>;

    async fn get_module(&self, device_id: &str, module_id: &str)
    -> RegistryResult<Option<Module>>;

    async fn create_device(&self, device: &Device) -> RegistryResult<Device>;

    async fn create_module(&self, module: &Module) -> RegistryResult<Module>;

    /// Patch tags and desired properties. `etag` is sent as the `If-Match`
    /// precondition; [`UNCONDITIONAL_ETAG`] disables the check.
    async fn update_twin(
        &self,
        device_id: &str,
        patch: &TwinPatch,
        etag: &str,
    ) -> RegistryResult<Twin>;

    async fn update_module_twin(
        &self,
        device_id: &str,
        module_id: &str,
        patch: &TwinPatch,
        etag: &str,
    ) -> RegistryResult<Twin>;
}
