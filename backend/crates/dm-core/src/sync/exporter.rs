use crate::{
    CoreError, CoreResult, Device, DeviceSnapshot, EntityFailure, ExportReport, ModuleSnapshot,
    RegistryClient, RegistryResult, SnapshotDocument,
};

use log::{error, info, warn};

/// Devices requested from the source registry when no limit is configured
pub const DEFAULT_DEVICE_LIMIT: usize = 1000;

/// Read up to `device_limit` devices from `registry` into a snapshot document.
///
/// Devices are visited one at a time. A device whose twin or module list
/// cannot be read is left out of the document; a module whose twin cannot be
/// read is kept with no twin and an `exportError` note. A fatal registry
/// error while listing devices is returned as an error; one hit later ends the
/// walk early and the report keeps what was read, with `aborted` set.
pub async fn export<R>(registry: &R, device_limit: usize) -> CoreResult<ExportReport>
where
    R: RegistryClient + ?Sized,
{
    if device_limit == 0 {
        return Err(CoreError::validation("device limit must be at least 1"));
    }

    info!("Retrieving up to {} devices...", device_limit);
    let devices = registry.list_devices(device_limit).await?;
    let total = devices.len();

    let possibly_truncated = total >= device_limit;
    if possibly_truncated {
        warn!(
            "Registry returned the full limit of {} devices; devices beyond the limit are not exported",
            device_limit
        );
    }

    info!("Found {} devices. Starting export...", total);

    let mut snapshots = Vec::with_capacity(total);
    let mut failed_devices = Vec::new();
    let mut module_warnings = Vec::new();
    let mut aborted = None;

    for (index, device) in devices.into_iter().enumerate() {
        let device_id = device.device_id.clone();
        info!("Processing device {}/{}: {}", index + 1, total, device_id);

        match snapshot_device(registry, device, &mut module_warnings).await {
            Ok(snapshot) => snapshots.push(snapshot),
            Err(e) if e.is_fatal() => {
                error!("Export stopped at device {}: {}", device_id, e);
                aborted = Some(e.to_string());
                failed_devices.push(EntityFailure::device(&device_id, e));
                break;
            }
            Err(e) => {
                error!("Error processing device {}: {}", device_id, e);
                failed_devices.push(EntityFailure::device(&device_id, e));
            }
        }
    }

    info!(
        "Exported {} of {} device(s) ({} failed)",
        snapshots.len(),
        total,
        failed_devices.len()
    );

    Ok(ExportReport {
        document: SnapshotDocument::new(snapshots),
        failed_devices,
        module_warnings,
        possibly_truncated,
        aborted,
    })
}

async fn snapshot_device<R>(
    registry: &R,
    device: Device,
    module_warnings: &mut Vec<EntityFailure>,
) -> RegistryResult<DeviceSnapshot>
where
    R: RegistryClient + ?Sized,
{
    let device_id = device.device_id.as_str();
    let twin = registry.get_twin(device_id).await?;
    let modules = registry.list_modules(device_id).await?;

    let mut module_snapshots = Vec::with_capacity(modules.len());
    for module in modules {
        match registry.get_module_twin(device_id, &module.module_id).await {
            Ok(module_twin) => {
                module_snapshots.push(ModuleSnapshot::from_module(module, module_twin))
            }
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                warn!(
                    "Could not read twin of module {} on device {}: {}",
                    module.module_id, device_id, e
                );
                module_warnings.push(EntityFailure::module(
                    device_id,
                    Some(module.module_id.as_str()),
                    &e,
                ));
                module_snapshots.push(
                    ModuleSnapshot::from_module(module, None).with_export_error(e.to_string()),
                );
            }
        }
    }

    Ok(DeviceSnapshot::from_device(device, twin, module_snapshots))
}
