//! Export and import drivers shared by the subcommands and the menu.

use crate::document_file::write_document;
use crate::{CliError, CliResult};

use dm_config::{RegistryConfig, TwinConcurrencyPolicy};
use dm_core::{
    DeviceSnapshot, ExportReport, ImportOptions, ImportReport, RegistryClient, SelectCriterion,
    Selection, TwinConcurrency,
};
use dm_registry::{ClientSettings, ConnectionString, HttpRegistryClient};

use std::path::Path;
use std::time::Duration;

use log::{info, warn};

/// Open a registry client from a connection string and the `[registry]`
/// settings. The string is never logged.
pub fn connect(connection_string: &str, config: &RegistryConfig) -> CliResult<HttpRegistryClient> {
    let connection_string = connection_string.trim();
    if connection_string.is_empty() {
        return Err(CliError::input("Connection string cannot be empty."));
    }

    let connection = ConnectionString::parse(connection_string)?;
    let settings = ClientSettings {
        api_version: config.api_version.clone(),
        request_timeout: Duration::from_secs(config.request_timeout_secs),
        sas_token_ttl: Duration::from_secs(config.sas_token_ttl_secs),
    };

    info!("Connecting to registry {}", connection.host_name);
    Ok(HttpRegistryClient::new(&connection, &settings)?)
}

/// Export up to `device_limit` devices and write the document to `output`.
/// Nothing is written if the walk fails or is cut short; an aborted report is
/// still returned so its counts can be shown.
pub async fn run_export<C>(
    registry: &C,
    output: &Path,
    device_limit: usize,
) -> CliResult<ExportReport>
where
    C: RegistryClient + ?Sized,
{
    let report = dm_core::export(registry, device_limit).await?;
    if let Some(reason) = &report.aborted {
        warn!(
            "Export aborted after {} devices; {} not written: {}",
            report.exported(),
            output.display(),
            reason
        );
        return Ok(report);
    }
    write_document(output, &report.document)?;

    for failure in &report.failed_devices {
        warn!("Not exported: {}", failure);
    }
    for warning in &report.module_warnings {
        warn!("Exported without twin: {}", warning);
    }

    info!(
        "Export complete. {} devices exported to {}",
        report.exported(),
        output.display()
    );

    Ok(report)
}

pub async fn run_import<C>(
    registry: &C,
    devices: &[DeviceSnapshot],
    policy: TwinConcurrencyPolicy,
) -> ImportReport
where
    C: RegistryClient + ?Sized,
{
    let options = ImportOptions {
        twin_concurrency: twin_concurrency(policy),
    };
    dm_core::import(registry, devices, &options).await
}

/// Apply `criteria` in order to one growing selection. Requested ids that
/// are not in the document are logged and skipped.
pub fn select_by_criteria(devices: &[DeviceSnapshot], criteria: &[SelectCriterion]) -> Selection {
    let mut selection = Selection::new();

    for criterion in criteria {
        let outcome = selection.apply(devices, criterion);
        info!(
            "{:?}: matched {}, added {}, selected {}",
            criterion,
            outcome.matched,
            outcome.added,
            selection.len()
        );
        for id in &outcome.unknown_ids {
            warn!("Device not found in snapshot: {}", id);
        }
    }

    selection
}

pub fn twin_concurrency(policy: TwinConcurrencyPolicy) -> TwinConcurrency {
    match policy {
        TwinConcurrencyPolicy::Unconditional => TwinConcurrency::Unconditional,
        TwinConcurrencyPolicy::MatchDestination => TwinConcurrency::MatchDestination,
    }
}

/// Lines printed once an export has finished.
pub fn export_summary(report: &ExportReport, output: &Path) -> Vec<String> {
    let mut lines = match &report.aborted {
        Some(reason) => vec![
            format!("Export aborted: {}", reason),
            format!(
                "{} devices were read before the registry became unusable; {} was not written.",
                report.exported(),
                output.display()
            ),
        ],
        None => vec![format!(
            "Exported {} devices to {}.",
            report.exported(),
            output.display()
        )],
    };

    if !report.failed_devices.is_empty() {
        lines.push(format!(
            "{} devices could not be exported:",
            report.failed_devices.len()
        ));
        lines.extend(report.failed_devices.iter().map(|f| format!("  {}", f)));
    }
    if !report.module_warnings.is_empty() {
        lines.push(format!(
            "{} modules were exported without a twin.",
            report.module_warnings.len()
        ));
    }
    if report.possibly_truncated {
        lines.push(String::from(
            "The device limit was reached; more devices may exist in the source registry.",
        ));
    }

    lines
}

/// Lines printed once an import has finished.
pub fn import_summary(report: &ImportReport) -> Vec<String> {
    let mut lines = vec![
        String::new(),
        String::from("Import Summary:"),
        format!(
            "Devices: {} succeeded, {} failed",
            report.device_success(),
            report.device_failure()
        ),
        format!(
            "Modules: {} succeeded, {} failed",
            report.module_success(),
            report.module_failure()
        ),
        format!(
            "Total: {} entities imported successfully",
            report.total_succeeded()
        ),
    ];

    if !report.failures.is_empty() {
        lines.push(String::from("Failures:"));
        lines.extend(report.failures.iter().map(|f| format!("  {}", f)));
    }
    if let Some(reason) = &report.aborted {
        lines.push(format!("Import aborted: {}", reason));
    }

    lines
}
