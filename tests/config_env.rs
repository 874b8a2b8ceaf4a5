//! Config location resolved from CONFIG_FILE_PATH

use std::path::{Path, PathBuf};
use std::sync::Arc;

use app_info::MemoryReporter;
use app_info::config::{CONFIG_FILE_PATH_VAR, ConfigStore, Settings};
use serial_test::serial;

fn set_config_path(value: Option<&Path>) {
    // SAFETY: every test touching the variable is #[serial]
    unsafe {
        match value {
            Some(path) => std::env::set_var(CONFIG_FILE_PATH_VAR, path),
            None => std::env::remove_var(CONFIG_FILE_PATH_VAR),
        }
    }
}

#[test]
#[serial]
fn test_settings_default_path() {
    set_config_path(None);

    let settings = Settings::from_env().unwrap();
    assert_eq!(
        settings.config_file_path,
        PathBuf::from("./config.json")
    );
}

#[test]
#[serial]
fn test_settings_read_environment() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("info.json");
    set_config_path(Some(path.as_path()));

    let settings = Settings::from_env().unwrap();
    set_config_path(None);

    assert_eq!(settings.config_file_path, path);
}

#[test]
#[serial]
fn test_location_resolved_at_load_time() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("first.json");
    let second = dir.path().join("second.json");
    std::fs::write(&first, r#"{"Version":"1.0.0"}"#).unwrap();
    std::fs::write(&second, r#"{"Version":"2.0.0"}"#).unwrap();

    set_config_path(Some(first.as_path()));
    let store = ConfigStore::new();

    // Changing the variable after construction still takes effect
    set_config_path(Some(second.as_path()));
    store.load();
    set_config_path(None);

    assert_eq!(store.get_str("Version", "Unknown"), "2.0.0");
}

#[test]
#[serial]
fn test_missing_env_file_leaves_store_empty() {
    let dir = tempfile::tempdir().unwrap();
    set_config_path(Some(dir.path().join("nope.json").as_path()));

    let reporter = Arc::new(MemoryReporter::new());
    let store = ConfigStore::new().with_reporter(reporter.clone());
    store.ensure_loaded();
    set_config_path(None);

    assert!(!store.is_loaded());
    assert_eq!(reporter.len(), 1);
}
