use crate::Config;
use crate::tests::{EnvGuard, setup_config_dir, write_config};

use googletest::assert_that;
use googletest::prelude::{anything, eq, none, ok, some};
use log::LevelFilter;
use serial_test::serial;

// =========================================================================
// Happy Path Tests
// =========================================================================

#[test]
#[serial]
fn given_no_config_file_when_load_then_ok_with_defaults() {
    // Given
    let _temp = setup_config_dir();

    // When
    let result = Config::load();

    // Then
    assert_that!(result, ok(anything()));
    let config = result.unwrap();
    assert_that!(config.registry.api_version.as_str(), eq(crate::DEFAULT_API_VERSION));
    assert_that!(config.export.device_limit, eq(crate::DEFAULT_DEVICE_LIMIT));
    assert_that!(config.export.default_file.as_str(), eq("export.json"));
    assert_that!(config.import.assume_yes, eq(false));
    assert_that!(config.registry.source_connection_string, none());
}

#[test]
#[serial]
fn given_no_config_file_when_load_and_validate_then_ok() {
    // Given
    let _temp = setup_config_dir();

    // When
    let config = Config::load().unwrap();
    let result = config.validate();

    // Then
    assert_that!(result, ok(anything()));
}

#[test]
#[serial]
fn given_valid_toml_file_when_load_then_ok_and_uses_toml_values() {
    // Given
    let (temp, _guard) = setup_config_dir();
    write_config(
        temp.path(),
        r#"
            [registry]
            request_timeout_secs = 60
            source_connection_string = "HostName=src.example.net;SharedAccessKey=a2V5"

            [export]
            device_limit = 250
            default_file = "fleet.json"

            [import]
            twin_concurrency = "match_destination"
            assume_yes = true

            [logging]
            level = "debug"
        "#,
    );

    // When
    let result = Config::load();

    // Then
    assert_that!(result, ok(anything()));
    let config = result.unwrap();
    assert_that!(config.registry.request_timeout_secs, eq(60));
    assert_that!(config.registry.source_connection_string, some(anything()));
    assert_that!(config.export.device_limit, eq(250));
    assert_that!(config.export.default_file.as_str(), eq("fleet.json"));
    assert_that!(
        config.import.twin_concurrency,
        eq(crate::TwinConcurrencyPolicy::MatchDestination)
    );
    assert_that!(config.import.assume_yes, eq(true));
    assert_that!(*config.logging.level, eq(LevelFilter::Debug));
}

#[test]
#[serial]
fn given_env_var_and_toml_when_load_then_env_var_overrides_toml() {
    // Given
    let (temp, _guard) = setup_config_dir();
    write_config(temp.path(), "[export]\ndevice_limit = 500");
    let _limit_guard = EnvGuard::set("DM_EXPORT_DEVICE_LIMIT", "100");

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(config.export.device_limit, eq(100));
}

#[test]
#[serial]
fn given_multiple_env_overrides_when_load_then_all_apply() {
    // Given
    let _temp = setup_config_dir();
    let _version = EnvGuard::set("DM_REGISTRY_API_VERSION", "2020-05-31-preview");
    let _ttl = EnvGuard::set("DM_REGISTRY_SAS_TTL_SECS", "600");
    let _dest = EnvGuard::set("DM_DESTINATION_CONNECTION_STRING", "HostName=d;SharedAccessKey=a2V5");
    let _yes = EnvGuard::set("DM_IMPORT_ASSUME_YES", "1");
    let _colored = EnvGuard::set("DM_LOG_COLORED", "false");
    let _level = EnvGuard::set("DM_LOG_LEVEL", "warn");

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(config.registry.api_version.as_str(), eq("2020-05-31-preview"));
    assert_that!(config.registry.sas_token_ttl_secs, eq(600));
    assert_that!(config.registry.destination_connection_string, some(anything()));
    assert_that!(config.import.assume_yes, eq(true));
    assert_that!(config.logging.colored, eq(false));
    assert_that!(*config.logging.level, eq(LevelFilter::Warn));
}

#[test]
#[serial]
fn given_log_file_when_path_requested_then_under_config_dir() {
    // Given
    let (temp, _guard) = setup_config_dir();
    let _file = EnvGuard::set("DM_LOG_FILE", "hub-migrate.log");

    // When
    let config = Config::load().unwrap();
    let path = config.log_file_path().unwrap();

    // Then
    assert_that!(path, some(eq(&temp.path().join("log").join("hub-migrate.log"))));
}

#[test]
#[serial]
fn given_no_log_file_when_path_requested_then_none() {
    let _temp = setup_config_dir();

    let config = Config::load().unwrap();

    assert_that!(config.log_file_path().unwrap(), none());
}

#[test]
#[serial]
fn given_connection_strings_when_debug_printed_then_redacted() {
    // Given
    let _temp = setup_config_dir();
    let _src = EnvGuard::set("DM_SOURCE_CONNECTION_STRING", "HostName=s;SharedAccessKey=c2VjcmV0");

    // When
    let config = Config::load().unwrap();
    let printed = format!("{:?}", config);

    // Then
    assert!(!printed.contains("c2VjcmV0"));
    assert!(printed.contains("<redacted>"));
}
