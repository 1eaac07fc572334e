//! Interactive device selection for import.

use crate::{CliResult, Prompt};

use dm_core::{DeviceSnapshot, SelectCriterion, Selection};

use std::io::{BufRead, Write};

/// Rows shown by the device table before it is cut off
pub const DEVICE_TABLE_ROWS: usize = 20;

const TABLE_RULE: &str = "-----------------------------------------------";

/// Let the user build a selection out of `devices` one criterion at a time
/// until they pick "Done" or the input ends.
pub fn select_devices<R: BufRead, W: Write>(
    prompt: &mut Prompt<R, W>,
    devices: &[DeviceSnapshot],
) -> CliResult<Selection> {
    let mut selection = Selection::new();

    loop {
        prompt.say("")?;
        prompt.say("Select devices to import:")?;
        prompt.say("1. Select all devices")?;
        prompt.say("2. Select by prefix")?;
        prompt.say("3. Select by status (enabled/disabled)")?;
        prompt.say("4. Select individual devices")?;
        prompt.say("5. Done selecting")?;
        prompt.say("")?;

        let Some(option) = prompt.ask("Select an option (1-5): ")? else {
            break;
        };

        match option.as_str() {
            "1" => {
                selection.apply(devices, &SelectCriterion::All);
                prompt.say(format!("Selected all {} devices.", selection.len()))?;
            }
            "2" => {
                let prefix = prompt.ask("Enter device ID prefix: ")?.unwrap_or_default();
                if !prefix.is_empty() {
                    let outcome =
                        selection.apply(devices, &SelectCriterion::PrefixMatch(prefix.clone()));
                    prompt.say(format!(
                        "Selected {} devices with prefix '{}'.",
                        outcome.matched, prefix
                    ))?;
                }
            }
            "3" => {
                let status = prompt
                    .ask("Enter status (enabled/disabled): ")?
                    .unwrap_or_default()
                    .to_lowercase();
                if status == "enabled" || status == "disabled" {
                    let outcome =
                        selection.apply(devices, &SelectCriterion::StatusMatch(status.clone()));
                    prompt.say(format!("Selected {} {} devices.", outcome.matched, status))?;
                } else if !status.is_empty() {
                    prompt.say("Status must be 'enabled' or 'disabled'.")?;
                }
            }
            "4" => {
                prompt.say(render_device_table(devices, &selection))?;
                let answer = prompt
                    .ask("Enter device IDs to select (comma-separated, or 'all' for all): ")?
                    .unwrap_or_default();
                select_individual(prompt, devices, &mut selection, &answer)?;
            }
            "5" => {
                prompt.say("")?;
                prompt.say(format!("Currently selected: {} devices", selection.len()))?;
                break;
            }
            _ => prompt.say("Invalid option. Please try again.")?,
        }

        prompt.say("")?;
        prompt.say(format!("Currently selected: {} devices", selection.len()))?;
    }

    Ok(selection)
}

fn select_individual<R: BufRead, W: Write>(
    prompt: &mut Prompt<R, W>,
    devices: &[DeviceSnapshot],
    selection: &mut Selection,
    answer: &str,
) -> CliResult<()> {
    if answer.eq_ignore_ascii_case("all") {
        selection.apply(devices, &SelectCriterion::All);
        return prompt.say(format!("Selected all {} devices.", selection.len()));
    }
    if answer.is_empty() {
        return Ok(());
    }

    let ids: Vec<String> = answer.split(',').map(|id| id.trim().to_string()).collect();
    for id in ids.iter().filter(|id| !id.is_empty()) {
        if selection.contains(id) {
            continue;
        }
        let outcome = selection.apply(devices, &SelectCriterion::ExplicitIds(vec![id.clone()]));
        if outcome.added > 0 {
            prompt.say(format!("Selected device: {}", id))?;
        } else if !outcome.unknown_ids.is_empty() {
            prompt.say(format!("Device not found: {}", id))?;
        }
    }

    Ok(())
}

/// First [`DEVICE_TABLE_ROWS`] devices with their status and whether they
/// are selected.
pub fn render_device_table(devices: &[DeviceSnapshot], selection: &Selection) -> String {
    let mut lines = vec![
        String::new(),
        String::from("Device List (first 20 shown):"),
        TABLE_RULE.to_string(),
        String::from("| ID                 | Status   | Selected    |"),
        TABLE_RULE.to_string(),
    ];

    for device in devices.iter().take(DEVICE_TABLE_ROWS) {
        let selected = if selection.contains(&device.device_id) {
            "Yes"
        } else {
            "No"
        };
        lines.push(format!(
            "| {:<18} | {:<8} | {:<10} |",
            device.device_id,
            device.status.as_deref().unwrap_or(""),
            selected
        ));
    }

    lines.push(TABLE_RULE.to_string());

    if devices.len() > DEVICE_TABLE_ROWS {
        lines.push(format!(
            "... and {} more devices.",
            devices.len() - DEVICE_TABLE_ROWS
        ));
    }

    lines.join("\n")
}
