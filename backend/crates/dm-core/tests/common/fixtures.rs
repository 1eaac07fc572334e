use dm_core::{
    AuthenticationMechanism, AuthenticationType, CapabilityFlags, Device, DeviceSnapshot,
    DeviceStatus, Module, ModuleSnapshot, SymmetricKey, Twin, TwinProperties, TwinSnapshot,
};

use serde_json::{Map, Value, json};

pub fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}

pub fn sas_auth(primary: &str, secondary: &str) -> AuthenticationMechanism {
    AuthenticationMechanism {
        auth_type: Some(AuthenticationType::Sas),
        symmetric_key: Some(SymmetricKey {
            primary_key: Some(primary.to_string()),
            secondary_key: Some(secondary.to_string()),
        }),
        x509_thumbprint: None,
    }
}

/// Enabled device with SAS keys, as a registry would return it
pub fn create_test_device(device_id: &str) -> Device {
    Device {
        status: Some(DeviceStatus::Enabled),
        authentication: Some(sas_auth("cHJpbWFyeQ==", "c2Vjb25kYXJ5")),
        capabilities: Some(CapabilityFlags::gateway(false)),
        ..Device::new(device_id)
    }
}

pub fn create_test_twin(tags: Value, desired: Value) -> Twin {
    Twin {
        version: Some(3),
        tags: object(tags),
        properties: TwinProperties {
            desired: object(desired),
            reported: object(json!({ "firmware": "1.0.0" })),
        },
        ..Twin::default()
    }
}

pub fn create_test_module(device_id: &str, module_id: &str) -> Module {
    Module {
        managed_by: Some("iotEdge".to_string()),
        ..Module::new(device_id, module_id)
    }
}

/// Snapshot of an enabled device with a twin carrying one tag and one
/// desired property
pub fn create_test_snapshot(device_id: &str) -> DeviceSnapshot {
    DeviceSnapshot {
        status: Some("enabled".to_string()),
        authentication: Some(sas_auth("cHJpbWFyeQ==", "c2Vjb25kYXJ5")),
        twin: Some(TwinSnapshot {
            tags: object(json!({ "site": "north" })),
            properties: dm_core::TwinSnapshotProperties {
                desired: object(json!({ "interval": 30 })),
                ..Default::default()
            },
            ..TwinSnapshot::default()
        }),
        ..DeviceSnapshot::new(device_id)
    }
}

pub fn create_test_module_snapshot(module_id: &str) -> ModuleSnapshot {
    ModuleSnapshot {
        twin: Some(TwinSnapshot {
            properties: dm_core::TwinSnapshotProperties {
                desired: object(json!({ "threshold": 5 })),
                ..Default::default()
            },
            ..TwinSnapshot::default()
        }),
        ..ModuleSnapshot::new(module_id)
    }
}
