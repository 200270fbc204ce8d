//! Configuration file loading tests
//!
//! Tests cover:
//! - Missing file falls back to defaults
//! - Full file parses every table
//! - Malformed file is a configuration error

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;
use vcmp_common::config::{load_toml_config, ConfigOverrides, ResolvedConfig, TomlConfig};
use vcmp_common::Error;

#[test]
fn test_missing_file_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let config = load_toml_config(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(config, TomlConfig::default());
}

#[test]
fn test_full_file_parses() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        r#"
port = 8088
bind = "0.0.0.0"
output_dir = "/results"
shuffle_seed = 12

[corpus]
base_dir = "/scans"
extension = ".avi"
real_dir = "genuine"
fake_dirs = ["generated"]

[logging]
level = "debug"
"#,
    )
    .unwrap();

    let config = load_toml_config(&path).unwrap();
    assert_eq!(config.port, Some(8088));
    assert_eq!(config.corpus.real_dir.as_deref(), Some("genuine"));
    assert_eq!(config.logging.level, "debug");

    let resolved = ResolvedConfig::resolve(config, ConfigOverrides::default()).unwrap();
    assert_eq!(resolved.session.base_dir, PathBuf::from("/scans"));
    assert_eq!(resolved.session.layout.fake_dirs, vec!["generated".to_string()]);
    assert_eq!(resolved.session.layout.extension, ".avi");
    assert_eq!(resolved.session.shuffle_seed, Some(12));
    assert_eq!(resolved.bind, "0.0.0.0");
    assert_eq!(resolved.log_level, "debug");
}

#[test]
fn test_partial_logging_table_keeps_default_level() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[logging]\n").unwrap();

    let config = load_toml_config(&path).unwrap();
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_malformed_file_is_config_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "port = \"not a number\"").unwrap();

    assert!(matches!(load_toml_config(&path), Err(Error::Config(_))));
}
