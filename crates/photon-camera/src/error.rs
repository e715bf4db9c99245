// Copyright 2025 The photon-client Authors
// SPDX-License-Identifier: Apache-2.0

//! Error types for the camera binding

use photon_serialization::DecodeError;
use photon_table::TableError;

/// Result type alias using CameraError
pub type Result<T> = std::result::Result<T, CameraError>;

/// Errors returned by [`crate::PhotonCamera`]
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CameraError {
    /// The camera namespace or its entries could not be resolved
    #[error("Failed to bind camera: {0}")]
    Binding(TableError),

    /// A setting write-through failed. The cached value was still updated.
    #[error("Table write failed: {0}")]
    Transport(TableError),

    /// The latest frame has no targets
    #[error("No target in the latest frame")]
    NoTarget,
}

impl CameraError {
    /// Check if error is transient (polling again later may succeed)
    pub fn is_transient(&self) -> bool {
        match self {
            CameraError::Binding(err) | CameraError::Transport(err) => err.is_transient(),
            CameraError::NoTarget => true,
        }
    }
}

/// Why the latest frame could not be produced
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FrameError {
    /// The raw bytes entry could not be read (or written, when publishing)
    #[error("Frame transport error: {0}")]
    Transport(#[from] TableError),

    /// The bytes did not form a complete frame
    #[error("Frame decode error: {0}")]
    Decode(#[from] DecodeError),
}
