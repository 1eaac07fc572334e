//! Interactive main menu.

use crate::document_file::read_document;
use crate::runner::{export_summary, import_summary, run_export, run_import};
use crate::selection_menu::select_devices;
use crate::{CliError, CliResult, Prompt};

use dm_config::Config;
use dm_core::RegistryClient;

use std::io::{BufRead, Write};
use std::path::PathBuf;

use log::error;

pub const BANNER: [&str; 4] = [
    "╔══════════════════════════════════════════════╗",
    "║             IoT Hub Device Manager           ║",
    "║           Export and Import Utility          ║",
    "╚══════════════════════════════════════════════╝",
];

/// Run the menu until the user exits or the input ends.
///
/// `connect` opens a registry client from a connection string. Export and
/// import failures are reported and the menu continues; only terminal I/O
/// errors end it.
pub async fn run_menu<R, W, C, F>(
    prompt: &mut Prompt<R, W>,
    config: &Config,
    connect: F,
) -> CliResult<()>
where
    R: BufRead,
    W: Write,
    C: RegistryClient,
    F: Fn(&str) -> CliResult<C>,
{
    for line in BANNER {
        prompt.say(line)?;
    }

    loop {
        prompt.say("")?;
        prompt.say("IoT Hub Device Manager - Main Menu")?;
        prompt.say("1. Export devices from IoT Hub")?;
        prompt.say("2. Import devices to IoT Hub")?;
        prompt.say("3. Exit")?;
        prompt.say("")?;

        let Some(option) = prompt.ask("Select an option (1-3): ")? else {
            return Ok(());
        };

        match option.as_str() {
            "1" => export_menu(prompt, config, &connect).await?,
            "2" => import_menu(prompt, config, &connect).await?,
            "3" => return Ok(()),
            _ => prompt.say("Invalid option. Please try again.")?,
        }
    }
}

async fn export_menu<R, W, C, F>(
    prompt: &mut Prompt<R, W>,
    config: &Config,
    connect: &F,
) -> CliResult<()>
where
    R: BufRead,
    W: Write,
    C: RegistryClient,
    F: Fn(&str) -> CliResult<C>,
{
    prompt.say("")?;
    prompt.say("--- Export Devices ---")?;

    let Some(connection_string) = ask_connection_string(
        prompt,
        "Enter source IoT Hub Connection String",
        config.registry.source_connection_string.as_deref(),
    )?
    else {
        return Ok(());
    };

    let default_file = config.export.default_file.as_str();
    let Some(file_name) = prompt.ask_with_default(
        &format!("Enter output file name (default: {}): ", default_file),
        default_file,
    )?
    else {
        return Ok(());
    };
    let output = PathBuf::from(file_name);

    prompt.say("Connecting to IoT Hub...")?;
    let result = match connect(&connection_string) {
        Ok(registry) => run_export(&registry, &output, config.export.device_limit).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(report) => {
            for line in export_summary(&report, &output) {
                prompt.say(line)?;
            }
            if report.is_complete() {
                prompt.say("Export completed successfully!")?;
            }
        }
        Err(e) => report_failure(prompt, "Export", e)?,
    }

    Ok(())
}

async fn import_menu<R, W, C, F>(
    prompt: &mut Prompt<R, W>,
    config: &Config,
    connect: &F,
) -> CliResult<()>
where
    R: BufRead,
    W: Write,
    C: RegistryClient,
    F: Fn(&str) -> CliResult<C>,
{
    prompt.say("")?;
    prompt.say("--- Import Devices ---")?;

    let default_file = config.export.default_file.as_str();
    let Some(file_name) = prompt.ask_with_default(
        &format!("Enter input file name (default: {}): ", default_file),
        default_file,
    )?
    else {
        return Ok(());
    };
    let input = PathBuf::from(&file_name);
    if !input.is_file() {
        return prompt.say(format!("File not found: {}", file_name));
    }

    let Some(connection_string) = ask_connection_string(
        prompt,
        "Enter destination IoT Hub Connection String",
        config.registry.destination_connection_string.as_deref(),
    )?
    else {
        return Ok(());
    };

    let document = match read_document(&input) {
        Ok(document) => document,
        Err(e) => return report_failure(prompt, "Import", e),
    };

    if document.devices.is_empty() {
        return prompt.say("No devices found in the export file.");
    }

    prompt.say("")?;
    prompt.say(format!(
        "Found {} devices in the export file.",
        document.devices.len()
    ))?;

    let selection = select_devices(prompt, &document.devices)?;
    if selection.is_empty() {
        return prompt.say("No devices selected for import.");
    }

    prompt.say("")?;
    prompt.say(format!(
        "Selected {} devices for import.",
        selection.len()
    ))?;
    if !config.import.assume_yes && !prompt.confirm("Proceed with import? (y/n): ")? {
        return prompt.say("Import canceled.");
    }

    prompt.say("Connecting to destination IoT Hub...")?;
    let registry = match connect(&connection_string) {
        Ok(registry) => registry,
        Err(e) => return report_failure(prompt, "Import", e),
    };

    let report = run_import(
        &registry,
        selection.devices(),
        config.import.twin_concurrency,
    )
    .await;

    for line in import_summary(&report) {
        prompt.say(line)?;
    }
    if report.aborted.is_none() {
        prompt.say("Import completed successfully!")?;
    }

    Ok(())
}

/// Ask for a connection string, offering the configured one when an empty
/// answer is given. `None` when nothing usable was entered.
fn ask_connection_string<R: BufRead, W: Write>(
    prompt: &mut Prompt<R, W>,
    label: &str,
    configured: Option<&str>,
) -> CliResult<Option<String>> {
    let answer = match configured {
        Some(configured) => prompt.ask_with_default(
            &format!("{} (press Enter to use the configured one): ", label),
            configured,
        )?,
        None => prompt.ask(&format!("{}: ", label))?,
    };

    match answer {
        Some(value) if !value.trim().is_empty() => Ok(Some(value)),
        Some(_) => {
            prompt.say("Connection string cannot be empty.")?;
            Ok(None)
        }
        None => Ok(None),
    }
}

/// Show a failed export or import. Terminal errors are passed up.
fn report_failure<R: BufRead, W: Write>(
    prompt: &mut Prompt<R, W>,
    operation: &str,
    err: CliError,
) -> CliResult<()> {
    if let CliError::Terminal { .. } = err {
        return Err(err);
    }
    error!("{} failed: {}", operation, err);
    prompt.say(format!("{} error: {}", operation, err))
}
