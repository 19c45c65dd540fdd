//! Tests for global configuration

use std::fs;
use std::path::{Path, PathBuf};

use openmedicaid::config::{Config, DEFAULT_PORT, ServerConfig};
use openmedicaid::paths::DATA_DIR_ENV;
use serial_test::serial;
use tempfile::TempDir;

// =============================================================================
// LOADING & SAVING
// =============================================================================

#[test]
fn test_defaults() {
    let config = Config::default();
    assert_eq!(config.server.port, DEFAULT_PORT);
    assert_eq!(config.page_size, 50);
    assert_eq!(config.site_url, "https://openmedicaid.org");
    assert!(config.data_dir.is_none());
}

#[test]
fn test_missing_file_gives_defaults() {
    let dir = TempDir::new().unwrap();
    let config = Config::load_from(&dir.path().join("config.toml"));
    assert_eq!(config, Config::default());
}

#[test]
fn test_malformed_file_gives_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "page_size = [not toml").unwrap();
    assert_eq!(Config::load_from(&path), Config::default());
}

#[test]
fn test_partial_file_fills_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "page_size = 10\n\n[server]\n").unwrap();

    let config = Config::load_from(&path);
    assert_eq!(config.page_size, 10);
    assert_eq!(config.server.port, DEFAULT_PORT);
    assert_eq!(config.site_url, "https://openmedicaid.org");
}

#[test]
fn test_save_and_reload() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.toml");
    let config = Config {
        data_dir: Some(PathBuf::from("/srv/medicaid")),
        site_url: "https://example.org".to_string(),
        page_size: 25,
        server: ServerConfig { port: 9000 },
    };

    config.save_to(&path).unwrap();
    assert!(path.exists());
    assert_eq!(Config::load_from(&path), config);
}

// =============================================================================
// DATA DIRECTORY RESOLUTION
// =============================================================================

#[test]
#[serial(env)]
fn test_flag_wins() {
    unsafe { std::env::set_var(DATA_DIR_ENV, "/from/env") };
    let config = Config {
        data_dir: Some(PathBuf::from("/from/config")),
        ..Config::default()
    };
    let dir = config.resolve_data_dir(Some(Path::new("/from/flag")));
    unsafe { std::env::remove_var(DATA_DIR_ENV) };
    assert_eq!(dir, PathBuf::from("/from/flag"));
}

#[test]
#[serial(env)]
fn test_env_beats_config() {
    unsafe { std::env::set_var(DATA_DIR_ENV, "/from/env") };
    let config = Config {
        data_dir: Some(PathBuf::from("/from/config")),
        ..Config::default()
    };
    let dir = config.resolve_data_dir(None);
    unsafe { std::env::remove_var(DATA_DIR_ENV) };
    assert_eq!(dir, PathBuf::from("/from/env"));
}

#[test]
#[serial(env)]
fn test_blank_env_is_ignored() {
    unsafe { std::env::set_var(DATA_DIR_ENV, "  ") };
    let config = Config {
        data_dir: Some(PathBuf::from("/from/config")),
        ..Config::default()
    };
    let dir = config.resolve_data_dir(None);
    unsafe { std::env::remove_var(DATA_DIR_ENV) };
    assert_eq!(dir, PathBuf::from("/from/config"));
}

#[test]
#[serial(env)]
fn test_fallback_is_data() {
    unsafe { std::env::remove_var(DATA_DIR_ENV) };
    assert_eq!(Config::default().resolve_data_dir(None), PathBuf::from("data"));
}
