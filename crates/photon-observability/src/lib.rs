// Copyright 2025 The photon-client Authors
// SPDX-License-Identifier: Apache-2.0

//! # photon-observability
//!
//! Logging setup shared by the PhotonVision client tools, with per-crate debug
//! flag support.
//!
//! ## Features
//! - `file-logging`: JSON log files with daily rotation

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod init;

pub use cli::*;
pub use init::*;

/// Known client crate names for debug flags
pub const KNOWN_CRATES: &[&str] = &[
    "photon-table",
    "photon-serialization",
    "photon-camera",
    "photon-config",
    "photon-client",
];
