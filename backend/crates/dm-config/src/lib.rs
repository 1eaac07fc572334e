mod config;
mod error;
mod export_config;
mod import_config;
mod log_level;
mod logging_config;
mod registry_config;

#[cfg(test)]
mod tests;

pub use config::Config;
pub use error::{ConfigError, ConfigErrorResult};
pub use export_config::{ExportConfig, MAX_DEVICE_LIMIT, MIN_DEVICE_LIMIT};
pub use import_config::{ImportConfig, TwinConcurrencyPolicy};
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use registry_config::RegistryConfig;

const CONFIG_DIR_ENV: &str = "DM_CONFIG_DIR";
const DEFAULT_CONFIG_DIR: &str = ".dm";
const CONFIG_FILE_NAME: &str = "config.toml";

const DEFAULT_API_VERSION: &str = "2021-04-12";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_SAS_TOKEN_TTL_SECS: u64 = 3600;

const DEFAULT_DEVICE_LIMIT: usize = 1000;
const DEFAULT_EXPORT_FILE: &str = "export.json";

const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_DIRECTORY: &str = "log";
