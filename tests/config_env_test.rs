//! Configuration loading against the real process environment.
//!
//! These tests mutate environment variables and therefore run serially.

use std::fs;
use std::path::PathBuf;

use serial_test::serial;
use tempfile::TempDir;
use thumbforge::config::{env, load_config, load_config_or_default, ConfigError};

const ALL_VARS: [&str; 6] = [
    env::HOST,
    env::PORT,
    env::DB_PATH,
    env::SEARCH_QUERY,
    env::MAX_IMAGES,
    env::SEARCH_URL_TEMPLATE,
];

/// Clears every override on construction and again on drop.
struct EnvGuard;

impl EnvGuard {
    fn new() -> Self {
        for var in ALL_VARS {
            std::env::remove_var(var);
        }
        Self
    }

    fn set(&self, var: &str, value: &str) {
        std::env::set_var(var, value);
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for var in ALL_VARS {
            std::env::remove_var(var);
        }
    }
}

fn write_config(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("thumbforge.toml");
    fs::write(&path, content).unwrap();
    path
}

#[test]
#[serial]
fn file_values_without_overrides() {
    let _env = EnvGuard::new();
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
[scrape]
query = "otters"
max_images = 4

[resize]
width = 64
height = 48
"#,
    );

    let config = load_config_or_default(Some(path.as_path())).unwrap();
    assert_eq!(config.scrape.query.as_deref(), Some("otters"));
    assert_eq!(config.scrape.max_images, 4);
    assert_eq!(config.resize.target().to_string(), "64x48");
    assert_eq!(config.server.port, 5000);
}

#[test]
#[serial]
fn environment_overrides_file() {
    let guard = EnvGuard::new();
    guard.set(env::SEARCH_QUERY, "cats");
    guard.set(env::MAX_IMAGES, "3");
    guard.set(env::DB_PATH, "/tmp/elsewhere.db");
    guard.set(env::PORT, "8081");

    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[scrape]\nquery = \"otters\"\nmax_images = 4\n");

    let config = load_config(&path).unwrap();
    assert_eq!(config.scrape.query.as_deref(), Some("cats"));
    assert_eq!(config.scrape.max_images, 3);
    assert_eq!(config.database.path, PathBuf::from("/tmp/elsewhere.db"));
    assert_eq!(config.server.port, 8081);
    assert_eq!(config.require_query(None).unwrap(), "cats");
    assert_eq!(config.require_query(Some("dogs")).unwrap(), "dogs");
}

#[test]
#[serial]
fn empty_environment_value_is_ignored() {
    let guard = EnvGuard::new();
    guard.set(env::SEARCH_QUERY, "");

    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "");

    let config = load_config(&path).unwrap();
    assert!(config.scrape.query.is_none());
    assert!(matches!(
        config.require_query(None),
        Err(ConfigError::MissingQuery)
    ));
}

#[test]
#[serial]
fn invalid_max_images_is_rejected() {
    let guard = EnvGuard::new();
    guard.set(env::MAX_IMAGES, "lots");

    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "");

    match load_config(&path) {
        Err(ConfigError::InvalidEnv { var, value, .. }) => {
            assert_eq!(var, env::MAX_IMAGES);
            assert_eq!(value, "lots");
        }
        other => panic!("expected InvalidEnv, got {:?}", other),
    }
}

#[test]
#[serial]
fn template_override_must_keep_placeholder() {
    let guard = EnvGuard::new();
    guard.set(env::SEARCH_URL_TEMPLATE, "https://example.com/search");

    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "");

    assert!(matches!(load_config(&path), Err(ConfigError::Invalid(_))));
}

#[test]
#[serial]
fn missing_file_is_read_error() {
    let _env = EnvGuard::new();
    let dir = TempDir::new().unwrap();

    let err = load_config(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
}
