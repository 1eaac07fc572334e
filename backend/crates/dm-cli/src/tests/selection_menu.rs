use super::{device, fleet, scripted_prompt, transcript};
use crate::selection_menu::{render_device_table, select_devices};

use dm_core::{SelectCriterion, Selection};

use googletest::prelude::*;

fn selected_ids(selection: &Selection) -> Vec<String> {
    selection
        .devices()
        .iter()
        .map(|d| d.device_id.clone())
        .collect()
}

#[test]
fn given_select_all_when_done_then_every_device_selected() {
    // Given
    let devices = fleet();
    let mut prompt = scripted_prompt("1\n5\n");

    // When
    let selection = select_devices(&mut prompt, &devices).unwrap();

    // Then
    assert_that!(selection.len(), eq(3));
    let output = transcript(prompt);
    assert_that!(output, contains_substring("Selected all 3 devices."));
    assert_that!(output, contains_substring("Currently selected: 3 devices"));
}

#[test]
fn given_prefix_then_status_when_done_then_selection_grows_without_duplicates() {
    let devices = fleet();
    let mut prompt = scripted_prompt("2\nSENSOR\n3\nEnabled\n5\n");

    let selection = select_devices(&mut prompt, &devices).unwrap();

    assert_eq!(
        selected_ids(&selection),
        vec!["sensor-01", "sensor-02", "pump-01"]
    );
    let output = transcript(prompt);
    assert_that!(output, contains_substring("Selected 2 devices with prefix 'SENSOR'."));
    assert_that!(output, contains_substring("Selected 2 enabled devices."));
    assert_that!(output, contains_substring("Currently selected: 2 devices"));
    assert_that!(output, contains_substring("Currently selected: 3 devices"));
}

#[test]
fn given_unknown_status_when_selecting_then_nothing_added() {
    let devices = fleet();
    let mut prompt = scripted_prompt("3\nbroken\n5\n");

    let selection = select_devices(&mut prompt, &devices).unwrap();

    assert!(selection.is_empty());
    assert_that!(
        transcript(prompt),
        contains_substring("Status must be 'enabled' or 'disabled'.")
    );
}

#[test]
fn given_individual_ids_when_selecting_then_known_added_and_unknown_reported() {
    let devices = fleet();
    let mut prompt = scripted_prompt("4\npump-01, ghost ,pump-01\n5\n");

    let selection = select_devices(&mut prompt, &devices).unwrap();

    assert_eq!(selected_ids(&selection), vec!["pump-01"]);
    let output = transcript(prompt);
    assert_that!(output, contains_substring("Device List (first 20 shown):"));
    assert_that!(output, contains_substring("Selected device: pump-01"));
    assert_that!(output, contains_substring("Device not found: ghost"));
}

#[test]
fn given_all_keyword_in_individual_selection_when_selecting_then_every_device_selected() {
    let devices = fleet();
    let mut prompt = scripted_prompt("4\nALL\n5\n");

    let selection = select_devices(&mut prompt, &devices).unwrap();

    assert_that!(selection.len(), eq(3));
}

#[test]
fn given_invalid_option_when_selecting_then_menu_repeats() {
    let devices = fleet();
    let mut prompt = scripted_prompt("9\n5\n");

    let selection = select_devices(&mut prompt, &devices).unwrap();

    assert!(selection.is_empty());
    let output = transcript(prompt);
    assert_that!(output, contains_substring("Invalid option. Please try again."));
    assert_that!(output.matches("Select devices to import:").count(), eq(2));
}

#[test]
fn given_input_ends_before_done_when_selecting_then_selection_so_far_returned() {
    let devices = fleet();
    let mut prompt = scripted_prompt("2\npump\n");

    let selection = select_devices(&mut prompt, &devices).unwrap();

    assert_eq!(selected_ids(&selection), vec!["pump-01"]);
}

#[test]
fn given_selection_when_rendering_table_then_rows_are_padded_and_marked() {
    let devices = fleet();
    let mut selection = Selection::new();
    selection.apply(
        &devices,
        &SelectCriterion::ExplicitIds(vec!["sensor-01".to_string()]),
    );

    let table = render_device_table(&devices, &selection);

    assert_that!(
        table,
        contains_substring("| ID                 | Status   | Selected    |")
    );
    assert_that!(
        table,
        contains_substring("| sensor-01          | enabled  | Yes        |")
    );
    assert_that!(
        table,
        contains_substring("| sensor-02          | disabled | No         |")
    );
    assert_that!(table, not(contains_substring("more devices")));
}

#[test]
fn given_more_than_twenty_devices_when_rendering_table_then_rest_summarized() {
    let devices: Vec<_> = (0..25)
        .map(|i| device(&format!("dev-{:02}", i), "enabled"))
        .collect();

    let table = render_device_table(&devices, &Selection::new());

    assert_that!(table, contains_substring("| dev-19"));
    assert_that!(table, not(contains_substring("| dev-20")));
    assert_that!(table, ends_with("... and 5 more devices."));
}
