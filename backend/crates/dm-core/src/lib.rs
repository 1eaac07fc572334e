pub mod classifier;
pub mod error;
pub mod models;
pub mod registry_client;
pub mod selector;
pub mod serde_ext;
pub mod snapshot;
pub mod sync;

#[cfg(test)]
mod tests;

pub use classifier::{Classification, EDGE_SYSTEM_MODULES, classify, classify_with_reason};
pub use error::{CoreError, RegistryError, RegistryResult, Result as CoreResult};
pub use models::authentication::{
    AuthenticationMechanism, AuthenticationType, SymmetricKey, X509Thumbprint,
};
pub use models::capability_flags::CapabilityFlags;
pub use models::device::Device;
pub use models::device_status::DeviceStatus;
pub use models::module::Module;
pub use models::twin::{Twin, TwinPatch, TwinPatchProperties, TwinProperties};
pub use registry_client::{RegistryClient, UNCONDITIONAL_ETAG};
pub use selector::{SelectCriterion, SelectOutcome, Selection};
pub use snapshot::auth_descriptor::{AuthDescriptor, SasKeys};
pub use snapshot::device_snapshot::DeviceSnapshot;
pub use snapshot::module_snapshot::{MODULE_ID_KEYS, ModuleSnapshot, resolve_module_id};
pub use snapshot::snapshot_document::{SCHEMA_VERSION, SnapshotDocument};
pub use snapshot::twin_snapshot::{RESERVED_TWIN_KEYS, TwinSnapshot, TwinSnapshotProperties};
pub use sync::entity_failure::{EntityFailure, EntityRef};
pub use sync::entity_import_counts::EntityImportCounts;
pub use sync::export_report::ExportReport;
pub use sync::exporter::{DEFAULT_DEVICE_LIMIT, export};
pub use sync::import_options::{ImportOptions, TwinConcurrency};
pub use sync::import_report::ImportReport;
pub use sync::importer::import;
