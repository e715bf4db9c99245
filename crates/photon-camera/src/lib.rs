// Copyright 2025 The photon-client Authors
// SPDX-License-Identifier: Apache-2.0

//! # photon-camera
//!
//! Robot-side access to a PhotonVision camera over a named-entry table.
//!
//! A coprocessor publishes one encoded frame per processed image to
//! `/<root>/<camera>/rawBytes` and listens to `driverMode` and `pipelineIndex`.
//! [`PhotonCamera`] binds those entries once and exposes:
//! - **Settings** - cached driver mode and pipeline index with write-through setters
//! - **Results** - the latest frame decoded on demand, and best target shortcuts
//!
//! [`SimulatedCoprocessor`] plays the producer side for tests and tools.
//!
//! ```rust
//! use photon_camera::{CameraError, PhotonCamera, SimulatedCoprocessor};
//! use photon_serialization::{PhotonPipelineResult, PhotonTrackedTarget, Pose2d};
//! use photon_table::LocalTableInstance;
//!
//! let instance = LocalTableInstance::new();
//! let mut camera = PhotonCamera::new(&instance, "front")?;
//! assert_eq!(camera.get_best_target_yaw(), Err(CameraError::NoTarget));
//!
//! let mut coprocessor = SimulatedCoprocessor::new(&instance, "front")?;
//! let target = PhotonTrackedTarget::new(-3.25, 12.5, 7.0, 0.0, Pose2d::default());
//! coprocessor.publish(&PhotonPipelineResult::new(18.0, vec![target]))?;
//!
//! let result = camera.get_latest_result();
//! assert_eq!(result.get_best_target(), Some(&target));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod camera;
mod error;
mod simulation;

pub use camera::{
    PhotonCamera, DEFAULT_ROOT_TABLE, DRIVER_MODE_ENTRY, PIPELINE_INDEX_ENTRY, RAW_BYTES_ENTRY,
};
pub use error::{CameraError, FrameError, Result};
pub use simulation::SimulatedCoprocessor;
