// Copyright 2025 The photon-client Authors
// SPDX-License-Identifier: Apache-2.0

//! Configuration type definitions
//!
//! This module defines all configuration structs that map to sections in
//! `photon_configuration.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PhotonConfig {
    pub camera: CameraConfig,
    pub decoder: DecoderConfig,
    pub logging: LoggingConfig,
}

/// Where a camera publishes its entries
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Top level table every camera publishes under
    pub root_table: String,
    /// Camera nickname, as shown in the PhotonVision UI. Required.
    pub camera_name: String,
    pub raw_bytes_entry: String,
    pub driver_mode_entry: String,
    pub pipeline_index_entry: String,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            root_table: "photonvision".to_string(),
            camera_name: String::new(),
            raw_bytes_entry: "rawBytes".to_string(),
            driver_mode_entry: "driverMode".to_string(),
            pipeline_index_entry: "pipelineIndex".to_string(),
        }
    }
}

/// Packet decoder limits
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DecoderConfig {
    /// Frames declaring more targets than this are treated as malformed (1-255)
    pub max_targets: usize,
    /// Bytes reserved up front for the reusable packet buffer
    pub initial_buffer_capacity: usize,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            max_targets: 255,
            initial_buffer_capacity: 512,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Base log level (trace, debug, info, warn, error)
    pub level: String,
    /// Directory for JSON log files. Console only if unset.
    pub log_dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            log_dir: None,
        }
    }
}

impl CameraConfig {
    /// Entry names paired with their config field, in binding order
    pub fn entry_names(&self) -> [(&'static str, &str); 3] {
        [
            ("camera.raw_bytes_entry", self.raw_bytes_entry.as_str()),
            ("camera.driver_mode_entry", self.driver_mode_entry.as_str()),
            ("camera.pipeline_index_entry", self.pipeline_index_entry.as_str()),
        ]
    }
}
