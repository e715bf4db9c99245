//! Configuration validation
//!
//! This module provides validation logic to ensure configuration values are
//! usable as table paths and within the ranges the decoder supports.

use crate::{ConfigError, ConfigResult, PhotonConfig};
use std::collections::HashMap;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validation errors that can occur during config validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    MissingRequired { field: String },
    InvalidName { field: String, name: String },
    EntryConflict { entry1: String, entry2: String, name: String },
    InvalidValue { field: String, reason: String },
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingRequired { field } => {
                write!(f, "Missing required configuration: {}", field)
            }
            Self::InvalidName { field, name } => {
                write!(f, "{} = '{}' must not contain '/'", field, name)
            }
            Self::EntryConflict {
                entry1,
                entry2,
                name,
            } => {
                write!(f, "Entry conflict: {} and {} both use '{}'", entry1, entry2, name)
            }
            Self::InvalidValue { field, reason } => {
                write!(f, "Invalid configuration value for {}: {}", field, reason)
            }
        }
    }
}

/// Validate the complete configuration
///
/// Checks for:
/// - Required names (root table, camera name, entry names)
/// - Names usable as a single path segment
/// - Distinct entry names
/// - Decoder and logging value ranges
///
/// # Errors
///
/// Returns `ConfigError::ValidationError` listing every problem found
pub fn validate_config(config: &PhotonConfig) -> ConfigResult<()> {
    let errors = collect_validation_errors(config);

    if !errors.is_empty() {
        let error_messages = errors
            .iter()
            .map(|e| format!("  - {}", e))
            .collect::<Vec<_>>()
            .join("\n");

        return Err(ConfigError::ValidationError(format!(
            "Configuration validation failed:\n{}",
            error_messages
        )));
    }

    Ok(())
}

/// Run every check and return the problems found, without formatting them
pub fn collect_validation_errors(config: &PhotonConfig) -> Vec<ConfigValidationError> {
    let mut errors = Vec::new();
    validate_names(config, &mut errors);
    validate_entry_conflicts(config, &mut errors);
    validate_value_ranges(config, &mut errors);
    errors
}

/// Every name becomes one segment of a table path
fn validate_names(config: &PhotonConfig, errors: &mut Vec<ConfigValidationError>) {
    let mut names = vec![
        ("camera.root_table", config.camera.root_table.as_str()),
        ("camera.camera_name", config.camera.camera_name.as_str()),
    ];
    names.extend(config.camera.entry_names());

    for (field, name) in names {
        if name.trim().is_empty() {
            errors.push(ConfigValidationError::MissingRequired {
                field: field.to_string(),
            });
        } else if name.contains('/') {
            errors.push(ConfigValidationError::InvalidName {
                field: field.to_string(),
                name: name.to_string(),
            });
        }
    }
}

fn validate_entry_conflicts(config: &PhotonConfig, errors: &mut Vec<ConfigValidationError>) {
    let mut seen: HashMap<&str, &str> = HashMap::new();
    for (field, name) in config.camera.entry_names() {
        if name.is_empty() {
            continue;
        }
        match seen.get(name) {
            Some(previous) => errors.push(ConfigValidationError::EntryConflict {
                entry1: previous.to_string(),
                entry2: field.to_string(),
                name: name.to_string(),
            }),
            None => {
                seen.insert(name, field);
            }
        }
    }
}

fn validate_value_ranges(config: &PhotonConfig, errors: &mut Vec<ConfigValidationError>) {
    // The wire count is a single byte
    if config.decoder.max_targets == 0 || config.decoder.max_targets > 255 {
        errors.push(ConfigValidationError::InvalidValue {
            field: "decoder.max_targets".to_string(),
            reason: format!("must be between 1 and 255, got {}", config.decoder.max_targets),
        });
    }

    let level = config.logging.level.to_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigValidationError::InvalidValue {
            field: "logging.level".to_string(),
            reason: format!(
                "'{}' is not one of {}",
                config.logging.level,
                LOG_LEVELS.join(", ")
            ),
        });
    }
}
