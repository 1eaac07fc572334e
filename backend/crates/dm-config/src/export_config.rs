use crate::{ConfigError, ConfigErrorResult, DEFAULT_DEVICE_LIMIT, DEFAULT_EXPORT_FILE};

use serde::Deserialize;

pub const MIN_DEVICE_LIMIT: usize = 1;
/// Largest page the registry serves in one device query
pub const MAX_DEVICE_LIMIT: usize = 1000;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Devices requested from the source registry
    pub device_limit: usize,
    /// Output file offered when none is given
    pub default_file: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            device_limit: DEFAULT_DEVICE_LIMIT,
            default_file: String::from(DEFAULT_EXPORT_FILE),
        }
    }
}

impl ExportConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.device_limit < MIN_DEVICE_LIMIT || self.device_limit > MAX_DEVICE_LIMIT {
            return Err(ConfigError::export(format!(
                "export.device_limit must be {}-{}, got {}",
                MIN_DEVICE_LIMIT, MAX_DEVICE_LIMIT, self.device_limit
            )));
        }

        if self.default_file.trim().is_empty() {
            return Err(ConfigError::export("export.default_file cannot be empty"));
        }

        Ok(())
    }
}
