//! # Photon Serialization
//!
//! This crate decodes the binary packets a PhotonVision coprocessor publishes into
//! structured pipeline results, and encodes them again for simulation. Byte data
//! is managed by the reusable [`PhotonPacket`] and structures implement the
//! [`PhotonSerializable`] trait.
//!
//! ## Core Components
//!
//! - **[`PhotonPacket`]** - Reusable byte buffer with a bounds-checked read cursor
//! - **[`PhotonSerializable`]** - Common trait for structures that can be written to / read from a packet
//! - **[`PhotonPipelineResult`]** - One decoded frame: latency and targets in wire order
//! - **[`PhotonTrackedTarget`]** - One detected target
//!
//! ## Wire Format
//!
//! All fields are big-endian, floats are IEEE-754 binary64.
//!
//! ```text
//! header  : latency_millis f64 | target_count u8                       (9 bytes)
//! target  : yaw f64 | pitch f64 | area f64 | skew f64 |
//!           pose_x f64 | pose_y f64 | pose_rotation_degrees f64       (56 bytes)
//! ```
//!
//! The producer places its designated best target first.
//!
//! ## Basic Usage
//!
//! ```rust
//! use photon_serialization::{PhotonPacket, PhotonPipelineResult, PhotonTrackedTarget, Pose2d};
//!
//! let result = PhotonPipelineResult::new(
//!     15.0,
//!     vec![PhotonTrackedTarget::new(-3.25, 12.5, 7.0, 0.0, Pose2d::default())],
//! );
//! let bytes = result.try_encode_to_bytes().unwrap();
//!
//! let mut packet = PhotonPacket::new_empty();
//! packet.write_data_by_copy_and_reset(&bytes);
//! let decoded = PhotonPipelineResult::try_decode(&mut packet).unwrap();
//! assert_eq!(decoded, result);
//! ```

mod error;
pub mod implementations;
mod photon_packet;
mod photon_serializable;

pub use error::DecodeError;
pub use implementations::{PhotonPipelineResult, PhotonTrackedTarget, Pose2d};
pub use photon_packet::PhotonPacket;
pub use photon_serializable::PhotonSerializable;
