//! Integration tests for configuration loading
//!
//! Tests that verify config loading from files and environment variables.

use std::fs;
use std::path::PathBuf;

use piefall::config::{AppConfig, Variant};
use serial_test::serial;

/// Fresh config directory under the system temp dir
fn temp_config_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("piefall-config-{}-{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
#[serial]
fn test_env_override() {
    std::env::set_var("PIEFALL_WINDOW__TITLE", "Test From Env");
    let config = AppConfig::load().unwrap();
    assert_eq!(config.window.title, "Test From Env");
    std::env::remove_var("PIEFALL_WINDOW__TITLE");
}

#[test]
#[serial]
fn test_default_file_matches_defaults() {
    std::env::remove_var("PIEFALL_WINDOW__TITLE");

    let config = AppConfig::load().unwrap();
    let defaults = AppConfig::default();
    assert_eq!(config.window.title, defaults.window.title);
    assert_eq!(config.rendering.model_color, 0xc4a160);
    assert_eq!(config.simulation.variant, Variant::Base);
    assert_eq!(config.simulation.fall_config(), defaults.simulation.fall_config());
}

#[test]
#[serial]
fn test_missing_dir_uses_defaults() {
    let config = AppConfig::load_from("does/not/exist").unwrap();
    assert_eq!(config.window.width, 1280);
    assert_eq!(config.camera.fov, 75.0);
}

#[test]
#[serial]
fn test_user_file_overrides_default_file() {
    let dir = temp_config_dir("user");
    fs::write(
        dir.join("default.toml"),
        "[simulation]\nvariant = \"base\"\nseed = 1\n",
    )
    .unwrap();
    fs::write(
        dir.join("user.toml"),
        "[simulation]\nvariant = \"extended\"\n\n[simulation.model]\ncount = 12\n",
    )
    .unwrap();

    let config = AppConfig::load_from(&dir).unwrap();
    assert_eq!(config.simulation.variant, Variant::Extended);
    assert_eq!(config.simulation.seed, Some(1));

    let fall = config.simulation.fall_config();
    assert_eq!(fall.model.count, 12);
    assert_eq!(fall.text.map(|t| t.count), Some(2));

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
#[serial]
fn test_env_overrides_files() {
    let dir = temp_config_dir("env");
    fs::write(dir.join("default.toml"), "[simulation]\nseed = 5\n").unwrap();

    std::env::set_var("PIEFALL_SIMULATION__SEED", "99");
    std::env::set_var("PIEFALL_DEBUG__HEADLESS", "true");
    let config = AppConfig::load_from(&dir);
    std::env::remove_var("PIEFALL_SIMULATION__SEED");
    std::env::remove_var("PIEFALL_DEBUG__HEADLESS");

    let config = config.unwrap();
    assert_eq!(config.simulation.seed, Some(99));
    assert!(config.debug.headless);

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
#[serial]
fn test_invalid_value_is_an_error() {
    let dir = temp_config_dir("invalid");
    fs::write(dir.join("default.toml"), "[simulation]\nvariant = \"sideways\"\n").unwrap();

    let err = AppConfig::load_from(&dir).unwrap_err();
    assert!(err.to_string().starts_with("Configuration error"));

    fs::remove_dir_all(&dir).unwrap();
}
