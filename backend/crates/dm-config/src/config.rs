use crate::{
    CONFIG_DIR_ENV, CONFIG_FILE_NAME, ConfigError, ConfigErrorResult, DEFAULT_CONFIG_DIR,
    ExportConfig, ImportConfig, LoggingConfig, RegistryConfig,
};

use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub registry: RegistryConfig,
    pub export: ExportConfig,
    pub import: ImportConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load config.
    ///
    /// Loading order:
    /// 1. Check for DM_CONFIG_DIR env var, else use ./.dm/
    /// 2. Load config.toml if it exists, else use defaults
    /// 3. Apply DM_* environment variable overrides
    ///
    /// The directory is not created: the tool runs fine without one.
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_path = Self::config_dir()?.join(CONFIG_FILE_NAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    /// Load and parse TOML file with detailed error context.
    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: DM_CONFIG_DIR env var > ./.dm/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(DEFAULT_CONFIG_DIR))
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.registry.validate()?;
        self.export.validate()?;

        if let Some(file) = &self.logging.file
            && file.trim().is_empty()
        {
            return Err(ConfigError::logging("logging.file cannot be empty when set"));
        }

        Ok(())
    }

    /// Absolute path of the log file, when file logging is configured.
    pub fn log_file_path(&self) -> ConfigErrorResult<Option<PathBuf>> {
        let Some(file) = &self.logging.file else {
            return Ok(None);
        };

        let dir = Path::new(&self.logging.dir);
        let dir = if dir.is_absolute() {
            dir.to_path_buf()
        } else {
            Self::config_dir()?.join(dir)
        };
        Ok(Some(dir.join(file)))
    }

    /// Log configuration summary (NEVER logs connection strings).
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!(
            "  registry: api-version {}, timeout {}s, token ttl {}s",
            self.registry.api_version,
            self.registry.request_timeout_secs,
            self.registry.sas_token_ttl_secs
        );
        info!(
            "  connection strings: source {}, destination {}",
            configured(&self.registry.source_connection_string),
            configured(&self.registry.destination_connection_string)
        );
        info!(
            "  export: limit={}, file={}",
            self.export.device_limit, self.export.default_file
        );
        info!(
            "  import: twin_concurrency={}, assume_yes={}",
            self.import.twin_concurrency, self.import.assume_yes
        );
        info!(
            "  logging: {} (colored: {})",
            *self.logging.level, self.logging.colored
        );
    }

    fn apply_env_overrides(&mut self) {
        // Registry
        Self::apply_env_string("DM_REGISTRY_API_VERSION", &mut self.registry.api_version);
        Self::apply_env_parse(
            "DM_REGISTRY_TIMEOUT_SECS",
            &mut self.registry.request_timeout_secs,
        );
        Self::apply_env_parse(
            "DM_REGISTRY_SAS_TTL_SECS",
            &mut self.registry.sas_token_ttl_secs,
        );
        Self::apply_env_option_string(
            "DM_SOURCE_CONNECTION_STRING",
            &mut self.registry.source_connection_string,
        );
        Self::apply_env_option_string(
            "DM_DESTINATION_CONNECTION_STRING",
            &mut self.registry.destination_connection_string,
        );

        // Export
        Self::apply_env_parse("DM_EXPORT_DEVICE_LIMIT", &mut self.export.device_limit);
        Self::apply_env_string("DM_EXPORT_DEFAULT_FILE", &mut self.export.default_file);

        // Import
        Self::apply_env_parse(
            "DM_IMPORT_TWIN_CONCURRENCY",
            &mut self.import.twin_concurrency,
        );
        Self::apply_env_bool("DM_IMPORT_ASSUME_YES", &mut self.import.assume_yes);

        // Logging
        Self::apply_env_parse("DM_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("DM_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("DM_LOG_FILE", &mut self.logging.file);
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for bool values (accepts "true"/"1")
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Helper: Apply environment variable override for parseable values
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// Helper: Apply environment variable override for Option<String> values.
    /// An empty value clears the setting.
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = (!val.trim().is_empty()).then_some(val);
        }
    }
}

fn configured(value: &Option<String>) -> &'static str {
    if value.is_some() { "configured" } else { "not set" }
}
