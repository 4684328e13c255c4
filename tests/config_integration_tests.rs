//! Settings file loading and command-line precedence
use std::fs;

use geocalc::config::{Args, Config, DEFAULT_PROMPT, SettingsFile};
use tempfile::TempDir;

fn args_with_config(path: std::path::PathBuf) -> Args {
    Args {
        config: Some(path),
        log_level: "warn".to_string(),
        ..Args::default()
    }
}

#[test]
fn test_settings_file_values_are_used() {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("config.toml");
    fs::write(&path, "precision = 3\nprompt = \"geo> \"\n").expect("write settings");

    let config = Config::from_args(args_with_config(path)).expect("load config");
    assert_eq!(config.precision, Some(3));
    assert_eq!(config.prompt, "geo> ");
    assert!(!config.is_batch());
}

#[test]
fn test_command_line_overrides_settings_file() {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("config.toml");
    fs::write(&path, "precision = 3\nprompt = \"geo> \"\n").expect("write settings");

    let args = Args {
        precision: Some(6),
        execute: vec!["points".to_string()],
        ..args_with_config(path)
    };
    let config = Config::from_args(args).expect("load config");
    assert_eq!(config.precision, Some(6));
    assert_eq!(config.prompt, "geo> ");
    assert!(config.is_batch());
}

#[test]
fn test_partial_settings_fall_back_to_defaults() {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("config.toml");
    fs::write(&path, "precision = 2\n").expect("write settings");

    let config = Config::from_args(args_with_config(path)).expect("load config");
    assert_eq!(config.precision, Some(2));
    assert_eq!(config.prompt, DEFAULT_PROMPT);
}

#[test]
fn test_missing_explicit_settings_file_is_an_error() {
    let dir = TempDir::new().expect("create temp dir");
    let result = Config::from_args(args_with_config(dir.path().join("missing.toml")));
    assert!(result.is_err());
}

#[test]
fn test_malformed_settings_file_is_an_error() {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("config.toml");
    fs::write(&path, "precision = \"lots\"\n").expect("write settings");

    let err = Config::from_args(args_with_config(path.clone())).unwrap_err();
    assert!(err.to_string().contains("failed to parse settings file"));
    assert!(SettingsFile::load(&path).is_err());
}
