// Copyright 2025 The photon-client Authors
// SPDX-License-Identifier: Apache-2.0

//! Configuration file loading with override support
//!
//! This module implements the 3-tier configuration loading system:
//! 1. TOML file (base defaults)
//! 2. Environment variables (runtime overrides)
//! 3. CLI arguments (explicit user overrides)

use crate::{ConfigError, ConfigResult, PhotonConfig};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// File name searched for when no explicit path is given
pub const CONFIG_FILE_NAME: &str = "photon_configuration.toml";

/// Find the configuration file
///
/// Search order:
/// 1. `PHOTON_CONFIG_PATH` environment variable
/// 2. Current working directory: `./photon_configuration.toml`
/// 3. Up to 5 parent directories
///
/// # Errors
///
/// Returns `ConfigError::FileNotFound` if no config file is found in any location
pub fn find_config_file() -> ConfigResult<PathBuf> {
    if let Ok(env_path) = env::var("PHOTON_CONFIG_PATH") {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return Ok(path);
        }
        return Err(ConfigError::FileNotFound(format!(
            "Config file specified by PHOTON_CONFIG_PATH not found: {}",
            path.display()
        )));
    }

    let mut search_paths = Vec::new();
    if let Ok(cwd) = env::current_dir() {
        search_paths.push(cwd.join(CONFIG_FILE_NAME));
        let mut current = cwd.as_path();
        for _ in 0..5 {
            match current.parent() {
                Some(parent) => {
                    search_paths.push(parent.join(CONFIG_FILE_NAME));
                    current = parent;
                }
                None => break,
            }
        }
    }

    for path in &search_paths {
        if path.exists() {
            return Ok(path.clone());
        }
    }

    let search_list = search_paths
        .iter()
        .map(|p| format!("  - {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n");

    Err(ConfigError::FileNotFound(format!(
        "'{}' not found in any of these locations:\n{}\n\nSet PHOTON_CONFIG_PATH environment variable to specify custom location.",
        CONFIG_FILE_NAME, search_list
    )))
}

/// Load configuration from TOML file
///
/// # Arguments
///
/// * `config_path` - Optional path to config file. If `None`, will search for config file.
/// * `cli_args` - Optional CLI argument overrides
///
/// # Errors
///
/// Returns error if config file is not found or contains invalid TOML. Values are
/// not validated here, see [`crate::validate_config`].
pub fn load_config(
    config_path: Option<&Path>,
    cli_args: Option<&HashMap<String, String>>,
) -> ConfigResult<PhotonConfig> {
    let config_file = match config_path {
        Some(path) => path.to_path_buf(),
        None => find_config_file()?,
    };

    let content = fs::read_to_string(&config_file)?;
    let mut config: PhotonConfig = toml::from_str(&content)?;

    apply_environment_overrides(&mut config);
    if let Some(cli) = cli_args {
        apply_cli_overrides(&mut config, cli);
    }

    Ok(config)
}

/// Apply environment variable overrides to configuration
///
/// Supported environment variables:
/// - `PHOTON_ROOT_TABLE` -> `camera.root_table`
/// - `PHOTON_CAMERA_NAME` -> `camera.camera_name`
/// - `PHOTON_MAX_TARGETS` -> `decoder.max_targets`
/// - `PHOTON_LOG_LEVEL` -> `logging.level`
pub fn apply_environment_overrides(config: &mut PhotonConfig) {
    if let Ok(value) = env::var("PHOTON_ROOT_TABLE") {
        config.camera.root_table = value;
    }
    if let Ok(value) = env::var("PHOTON_CAMERA_NAME") {
        config.camera.camera_name = value;
    }
    if let Ok(value) = env::var("PHOTON_MAX_TARGETS") {
        if let Ok(max_targets) = value.parse::<usize>() {
            config.decoder.max_targets = max_targets;
        }
    }
    if let Ok(value) = env::var("PHOTON_LOG_LEVEL") {
        config.logging.level = value;
    }
}

/// Apply CLI argument overrides to configuration
///
/// # Arguments
///
/// * `config` - Configuration to modify
/// * `cli_args` - HashMap of CLI arguments (e.g., `{"camera_name": "front", "max_targets": "8"}`)
pub fn apply_cli_overrides(config: &mut PhotonConfig, cli_args: &HashMap<String, String>) {
    if let Some(value) = cli_args.get("root_table") {
        config.camera.root_table = value.clone();
    }
    if let Some(value) = cli_args.get("camera_name") {
        config.camera.camera_name = value.clone();
    }
    if let Some(value) = cli_args.get("max_targets") {
        if let Ok(max_targets) = value.parse::<usize>() {
            config.decoder.max_targets = max_targets;
        }
    }
    if let Some(value) = cli_args.get("log_level") {
        config.logging.level = value.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use std::sync::Mutex;
    use tempfile::tempdir;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    const OVERRIDE_VARS: [&str; 4] = [
        "PHOTON_ROOT_TABLE",
        "PHOTON_CAMERA_NAME",
        "PHOTON_MAX_TARGETS",
        "PHOTON_LOG_LEVEL",
    ];

    fn clear_override_vars() {
        for var in OVERRIDE_VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_find_config_file_env_var() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("custom_config.toml");
        File::create(&config_path).unwrap();

        env::set_var("PHOTON_CONFIG_PATH", config_path.to_str().unwrap());
        let result = find_config_file();
        env::remove_var("PHOTON_CONFIG_PATH");

        assert_eq!(result.unwrap(), config_path);
    }

    #[test]
    fn test_find_config_file_env_var_missing() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let dir = tempdir().unwrap();
        env::set_var("PHOTON_CONFIG_PATH", dir.path().join("absent.toml"));
        let result = find_config_file();
        env::remove_var("PHOTON_CONFIG_PATH");

        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_load_minimal_config() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        clear_override_vars();
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);

        let mut file = File::create(&config_path).unwrap();
        writeln!(file, "[camera]").unwrap();
        writeln!(file, "camera_name = \"front\"").unwrap();
        writeln!(file, "[decoder]").unwrap();
        writeln!(file, "max_targets = 16").unwrap();

        let config = load_config(Some(&config_path), None).unwrap();

        assert_eq!(config.camera.camera_name, "front");
        assert_eq!(config.camera.root_table, "photonvision");
        assert_eq!(config.camera.raw_bytes_entry, "rawBytes");
        assert_eq!(config.decoder.max_targets, 16);
        assert_eq!(config.decoder.initial_buffer_capacity, 512);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&config_path, "[camera\ncamera_name = ").unwrap();

        let result = load_config(Some(&config_path), None);
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_environment_overrides() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let mut config = PhotonConfig::default();

        env::set_var("PHOTON_CAMERA_NAME", "rear");
        env::set_var("PHOTON_MAX_TARGETS", "8");
        env::set_var("PHOTON_LOG_LEVEL", "debug");

        apply_environment_overrides(&mut config);
        clear_override_vars();

        assert_eq!(config.camera.camera_name, "rear");
        assert_eq!(config.decoder.max_targets, 8);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.camera.root_table, "photonvision");
    }

    #[test]
    fn test_unparsable_number_override_is_ignored() {
        let mut config = PhotonConfig::default();
        let mut cli_args = HashMap::new();
        cli_args.insert("max_targets".to_string(), "many".to_string());

        apply_cli_overrides(&mut config, &cli_args);
        assert_eq!(config.decoder.max_targets, 255);
    }

    #[test]
    fn test_override_precedence() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        clear_override_vars();
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);

        let mut file = File::create(&config_path).unwrap();
        writeln!(file, "[camera]").unwrap();
        writeln!(file, "camera_name = \"file-camera\"").unwrap();
        writeln!(file, "root_table = \"file-root\"").unwrap();

        env::set_var("PHOTON_CAMERA_NAME", "env-camera");
        env::set_var("PHOTON_ROOT_TABLE", "env-root");

        let mut cli_args = HashMap::new();
        cli_args.insert("camera_name".to_string(), "cli-camera".to_string());

        let config = load_config(Some(&config_path), Some(&cli_args)).unwrap();
        clear_override_vars();

        // CLI wins for camera name, env wins for root table (no CLI override)
        assert_eq!(config.camera.camera_name, "cli-camera");
        assert_eq!(config.camera.root_table, "env-root");
    }

    #[test]
    fn test_config_serializes_with_section_names() {
        let value = serde_json::to_value(PhotonConfig::default()).unwrap();
        assert_eq!(value["camera"]["pipeline_index_entry"], "pipelineIndex");
        assert_eq!(value["decoder"]["max_targets"], 255);
        assert!(value["logging"]["log_dir"].is_null());
    }
}
