use crate::registry_client::UNCONDITIONAL_ETAG;
use crate::{
    AuthDescriptor, CapabilityFlags, Classification, Device, DeviceSnapshot, EntityFailure,
    ImportOptions, ImportReport, Module, ModuleSnapshot, RegistryClient, RegistryError,
    RegistryResult, TwinConcurrency, TwinSnapshot, classify_with_reason,
};

use log::{error, info, warn};

/// Twin owner on the destination
#[derive(Debug, Clone, Copy)]
enum TwinTarget<'a> {
    Device(&'a str),
    Module(&'a str, &'a str),
}

/// Replay `devices` against `registry`.
///
/// Devices are processed one at a time: existence check, create if absent,
/// twin merge, then each module the same way. A failure is charged to the
/// device or module it happened on and the walk continues. Only a fatal
/// registry error stops early, and the report keeps the counts reached so far.
pub async fn import<R>(
    registry: &R,
    devices: &[DeviceSnapshot],
    options: &ImportOptions,
) -> ImportReport
where
    R: RegistryClient + ?Sized,
{
    let total = devices.len();
    let mut report = ImportReport::default();

    info!("Starting import of {} devices...", total);

    for (index, snapshot) in devices.iter().enumerate() {
        let device_id = snapshot.device_id.trim();
        info!("Processing device {}/{}: {}", index + 1, total, device_id);

        if device_id.is_empty() {
            error!("Device entry {} has no device id. Skipping device.", index + 1);
            report.record_device_failure(EntityFailure::device("", "missing device id"));
            continue;
        }

        match reconcile_device(registry, device_id, snapshot, options, &mut report).await {
            Ok(()) => report.devices.succeeded += 1,
            Err(e) => {
                error!("Error processing device {}: {}", device_id, e);
                let fatal = e.is_fatal();
                report.record_device_failure(EntityFailure::device(device_id, &e));
                if fatal {
                    report.aborted = Some(e.to_string());
                    break;
                }
                continue;
            }
        }

        if let Err(e) = reconcile_modules(registry, device_id, snapshot, options, &mut report).await
        {
            report.aborted = Some(e.to_string());
            break;
        }
    }

    if let Some(reason) = &report.aborted {
        error!("Import aborted: {}", reason);
    }

    info!(
        "Import finished: devices {} succeeded, {} failed; modules {} succeeded, {} failed",
        report.devices.succeeded,
        report.devices.failed,
        report.modules.succeeded,
        report.modules.failed
    );

    report
}

async fn reconcile_device<R>(
    registry: &R,
    device_id: &str,
    snapshot: &DeviceSnapshot,
    options: &ImportOptions,
    report: &mut ImportReport,
) -> RegistryResult<()>
where
    R: RegistryClient + ?Sized,
{
    if registry.get_device(device_id).await?.is_some() {
        info!("Device {} already exists. Skipping device creation.", device_id);
        report.devices.skipped += 1;
    } else {
        let device = build_device(device_id, snapshot);
        info!("Creating device {}...", device_id);
        registry.create_device(&device).await?;
        info!("Device {} created successfully.", device_id);
        report.devices.created += 1;
    }

    if let Some(twin) = &snapshot.twin {
        info!("Updating twin for device {}...", device_id);
        merge_twin(registry, TwinTarget::Device(device_id), twin, options).await?;
    }

    Ok(())
}

/// Returns `Err` only for a fatal error; everything else is counted and
/// the next module is tried.
async fn reconcile_modules<R>(
    registry: &R,
    device_id: &str,
    snapshot: &DeviceSnapshot,
    options: &ImportOptions,
    report: &mut ImportReport,
) -> RegistryResult<()>
where
    R: RegistryClient + ?Sized,
{
    if !snapshot.modules.is_empty() {
        info!(
            "Found {} modules for device {}",
            snapshot.modules.len(),
            device_id
        );
    }

    for module in &snapshot.modules {
        let Some(module_id) = module.resolved_id() else {
            warn!("Module ID is missing on device {}. Skipping module.", device_id);
            report.record_module_failure(EntityFailure::module(
                device_id,
                None,
                "missing module id",
            ));
            continue;
        };

        match reconcile_module(registry, device_id, module_id, module, options, report).await {
            Ok(()) => report.modules.succeeded += 1,
            Err(e) => {
                error!(
                    "Error processing module {} for device {}: {}",
                    module_id, device_id, e
                );
                let fatal = e.is_fatal();
                report.record_module_failure(EntityFailure::module(
                    device_id,
                    Some(module_id),
                    &e,
                ));
                if fatal {
                    return Err(e);
                }
            }
        }
    }

    Ok(())
}

async fn reconcile_module<R>(
    registry: &R,
    device_id: &str,
    module_id: &str,
    module: &ModuleSnapshot,
    options: &ImportOptions,
    report: &mut ImportReport,
) -> RegistryResult<()>
where
    R: RegistryClient + ?Sized,
{
    if registry.get_module(device_id, module_id).await?.is_some() {
        info!(
            "Module {} already exists on device {}. Skipping module creation.",
            module_id, device_id
        );
        report.modules.skipped += 1;
    } else {
        let new_module = build_module(device_id, module_id, module);
        info!("Creating module {} for device {}...", module_id, device_id);
        registry.create_module(&new_module).await?;
        report.modules.created += 1;
    }

    if let Some(twin) = &module.twin {
        info!(
            "Updating twin for module {} on device {}...",
            module_id, device_id
        );
        merge_twin(
            registry,
            TwinTarget::Module(device_id, module_id),
            twin,
            options,
        )
        .await?;
    }

    Ok(())
}

/// Device record for creation. Identity comes from the snapshot; the
/// registry assigns everything else.
pub(crate) fn build_device(device_id: &str, snapshot: &DeviceSnapshot) -> Device {
    let classification = classify_with_reason(snapshot.capabilities.as_ref(), &snapshot.modules);
    match &classification {
        Classification::CapabilityFlag => {
            info!("Device {} is a gateway device (capability flag).", device_id)
        }
        Classification::SystemModule(name) => info!(
            "Device {} detected as gateway device based on module {}.",
            device_id, name
        ),
        Classification::Default => {}
    }

    let capabilities = (snapshot.capabilities.is_some() || classification.is_gateway())
        .then(|| CapabilityFlags::gateway(classification.is_gateway()));

    let authentication = snapshot.auth_descriptor().map(|auth| auth.to_mechanism());
    if snapshot.authentication.is_some() && authentication.is_none() {
        warn!(
            "Authentication of device {} is incomplete or unknown; using registry default.",
            device_id
        );
    }

    Device {
        capabilities,
        authentication,
        status: snapshot.status(),
        status_reason: snapshot.status_reason.clone(),
        ..Device::new(device_id)
    }
}

/// Module record for creation; only SAS authentication is carried over.
pub(crate) fn build_module(device_id: &str, module_id: &str, module: &ModuleSnapshot) -> Module {
    let authentication = module
        .authentication
        .as_ref()
        .and_then(AuthDescriptor::from_mechanism)
        .filter(AuthDescriptor::is_sas)
        .map(|auth| auth.to_mechanism());

    Module {
        authentication,
        ..Module::new(device_id, module_id)
    }
}

async fn merge_twin<R>(
    registry: &R,
    target: TwinTarget<'_>,
    twin: &TwinSnapshot,
    options: &ImportOptions,
) -> RegistryResult<()>
where
    R: RegistryClient + ?Sized,
{
    let patch = twin.to_patch();
    let etag = concurrency_token(registry, target, options.twin_concurrency).await?;

    match target {
        TwinTarget::Device(device_id) => {
            registry.update_twin(device_id, &patch, &etag).await?;
            info!("Twin for device {} updated successfully.", device_id);
        }
        TwinTarget::Module(device_id, module_id) => {
            registry
                .update_module_twin(device_id, module_id, &patch, &etag)
                .await?;
            info!(
                "Twin for module {} on device {} updated successfully.",
                module_id, device_id
            );
        }
    }

    Ok(())
}

async fn concurrency_token<R>(
    registry: &R,
    target: TwinTarget<'_>,
    concurrency: TwinConcurrency,
) -> RegistryResult<String>
where
    R: RegistryClient + ?Sized,
{
    if concurrency == TwinConcurrency::Unconditional {
        return Ok(UNCONDITIONAL_ETAG.to_string());
    }

    let current = match target {
        TwinTarget::Device(device_id) => registry.get_twin(device_id).await?,
        TwinTarget::Module(device_id, module_id) => {
            registry.get_module_twin(device_id, module_id).await?
        }
    };

    current
        .and_then(|twin| twin.etag)
        .ok_or_else(|| RegistryError::api(404, "TwinNotFound", "destination twin has no eTag"))
}
