use serde::Serialize;

/// Registry entity a failure belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EntityRef {
    Device {
        device_id: String,
    },
    Module {
        device_id: String,
        module_id: Option<String>,
    },
}

impl std::fmt::Display for EntityRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Device { device_id } => write!(f, "device '{}'", device_id),
            Self::Module {
                device_id,
                module_id: Some(module_id),
            } => write!(f, "module '{}' on device '{}'", module_id, device_id),
            Self::Module {
                device_id,
                module_id: None,
            } => write!(f, "unidentified module on device '{}'", device_id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityFailure {
    pub entity: EntityRef,
    pub message: String,
}

impl EntityFailure {
    pub fn device(device_id: &str, message: impl ToString) -> Self {
        Self {
            entity: EntityRef::Device {
                device_id: device_id.to_string(),
            },
            message: message.to_string(),
        }
    }

    pub fn module(device_id: &str, module_id: Option<&str>, message: impl ToString) -> Self {
        Self {
            entity: EntityRef::Module {
                device_id: device_id.to_string(),
                module_id: module_id.map(String::from),
            },
            message: message.to_string(),
        }
    }
}

impl std::fmt::Display for EntityFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.entity, self.message)
    }
}
