use crate::serde_ext::from_value_lenient;
use crate::{AuthenticationMechanism, Module, Twin, TwinSnapshot};

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Field names under which a module id has been written, in lookup order.
/// Export always writes the first one.
pub const MODULE_ID_KEYS: [&str; 4] = ["moduleId", "Id", "id", "ModuleId"];

/// One module under an exported device.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleSnapshot {
    /// Empty when the entry carried no usable id.
    pub module_id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub managed_by: Option<String>,

    pub authentication: Option<AuthenticationMechanism>,

    pub twin: Option<TwinSnapshot>,

    /// Set by export when the module twin could not be read.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export_error: Option<String>,
}

impl ModuleSnapshot {
    pub fn new(module_id: impl Into<String>) -> Self {
        Self {
            module_id: module_id.into(),
            ..Self::default()
        }
    }

    pub fn from_module(module: Module, twin: Option<Twin>) -> Self {
        Self {
            module_id: module.module_id,
            managed_by: module.managed_by,
            authentication: module.authentication,
            twin: twin.map(TwinSnapshot::from),
            export_error: None,
        }
    }

    pub fn with_export_error(mut self, message: impl Into<String>) -> Self {
        self.export_error = Some(message.into());
        self
    }

    pub fn resolved_id(&self) -> Option<&str> {
        let id = self.module_id.trim();
        (!id.is_empty()).then_some(id)
    }

    fn from_value(value: Value) -> Self {
        let Value::Object(mut fields) = value else {
            return Self::default();
        };

        Self {
            module_id: resolve_module_id(&fields).unwrap_or_default().to_string(),
            managed_by: take(&mut fields, "managedBy"),
            authentication: take(&mut fields, "authentication"),
            twin: take(&mut fields, "twin"),
            export_error: take(&mut fields, "exportError"),
        }
    }
}

impl<'de> Deserialize<'de> for ModuleSnapshot {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Self::from_value(Value::deserialize(deserializer)?))
    }
}

/// First non-empty string under [`MODULE_ID_KEYS`].
pub fn resolve_module_id(fields: &Map<String, Value>) -> Option<&str> {
    MODULE_ID_KEYS
        .iter()
        .filter_map(|key| fields.get(*key))
        .filter_map(Value::as_str)
        .map(str::trim)
        .find(|id| !id.is_empty())
}

fn take<T: serde::de::DeserializeOwned>(fields: &mut Map<String, Value>, key: &str) -> Option<T> {
    fields.remove(key).and_then(from_value_lenient)
}
