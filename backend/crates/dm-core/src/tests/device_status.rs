use crate::{CoreError, DeviceStatus};

use std::str::FromStr;

#[test]
fn test_device_status_as_str() {
    assert_eq!(DeviceStatus::Enabled.as_str(), "enabled");
    assert_eq!(DeviceStatus::Disabled.as_str(), "disabled");
}

#[test]
fn test_device_status_from_str_is_case_insensitive() {
    assert_eq!(
        DeviceStatus::from_str("Enabled").unwrap(),
        DeviceStatus::Enabled
    );
    assert_eq!(
        DeviceStatus::from_str(" DISABLED ").unwrap(),
        DeviceStatus::Disabled
    );
}

#[test]
fn test_device_status_from_str_rejects_unknown() {
    let err = DeviceStatus::from_str("paused").unwrap_err();
    assert!(matches!(err, CoreError::InvalidDeviceStatus { ref value, .. } if value == "paused"));
}

#[test]
fn test_device_status_default() {
    assert_eq!(DeviceStatus::default(), DeviceStatus::Enabled);
}

#[test]
fn test_device_status_serializes_lowercase() {
    let json = serde_json::to_string(&DeviceStatus::Disabled).unwrap();
    assert_eq!(json, "\"disabled\"");
}
