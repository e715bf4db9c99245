//! # photon-client - PhotonVision robot-side client
//!
//! Reads targeting results that a PhotonVision coprocessor publishes over a
//! named-entry table, and writes camera settings back to it.
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! photon-client = "0.1"  # Default: camera + config + observability
//! ```
//!
//! ## Feature Flags
//!
//! - **`camera`** (default): `PhotonCamera` binding and simulated coprocessor
//! - **`config`** (default): TOML configuration loader
//! - **`observability`** (default): logging initialization
//! - **`file-logging`**: JSON log files with daily rotation
//!
//! The table transport and packet format are always available.
//!
//! ## Usage
//!
//! ```rust
//! use photon_client::prelude::*;
//!
//! let instance = LocalTableInstance::get_default();
//! let mut camera = PhotonCamera::new(&instance, "quickstart")?;
//!
//! // Once per control cycle
//! let result = camera.get_latest_result();
//! if let Some(target) = result.get_best_target() {
//!     println!("yaw {:.2} pitch {:.2}", target.get_yaw(), target.get_pitch());
//! }
//! # Ok::<(), photon_client::camera::CameraError>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Client: photon-camera                                  │
//! │  (binding, settings cache, latest result access)        │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  Foundation: photon-table, photon-serialization         │
//! │  (entry transport, packet decoding)                     │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## License
//!
//! Apache-2.0

// Re-export foundation
pub use photon_serialization as serialization;
pub use photon_table as table;

// Re-export components
#[cfg(feature = "camera")]
pub use photon_camera as camera;

#[cfg(feature = "config")]
pub use photon_config as config;

#[cfg(feature = "observability")]
pub use photon_observability as observability;

/// Prelude - commonly used types and traits
pub mod prelude {
    pub use crate::serialization::{
        DecodeError, PhotonPacket, PhotonPipelineResult, PhotonTrackedTarget, Pose2d,
    };
    pub use crate::table::{
        LocalTableInstance, NetworkTable, TableEntry, TableError, TableInstance,
    };

    #[cfg(feature = "camera")]
    pub use crate::camera::{CameraError, FrameError, PhotonCamera, SimulatedCoprocessor};

    #[cfg(feature = "config")]
    pub use crate::config::{load_config, validate_config, PhotonConfig};
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_facade_imports() {
        use crate::prelude::*;
        let result = PhotonPipelineResult::new_empty();
        assert!(!result.has_targets());
    }
}
