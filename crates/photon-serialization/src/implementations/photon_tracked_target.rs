use crate::{DecodeError, PhotonPacket, PhotonSerializable};
use serde::{Deserialize, Serialize};

/// Robot relative pose of a target, as estimated by the coprocessor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Pose2d {
    pub x: f64,
    pub y: f64,
    pub rotation_degrees: f64,
}

impl Pose2d {
    pub const fn new(x: f64, y: f64, rotation_degrees: f64) -> Self {
        Self {
            x,
            y,
            rotation_degrees,
        }
    }
}

/// One target detected by the vision pipeline. Immutable once constructed.
///
/// # Example
/// ```
/// use photon_serialization::{PhotonTrackedTarget, Pose2d};
///
/// let target = PhotonTrackedTarget::new(-3.25, 12.5, 7.0, 0.0, Pose2d::new(1.0, 0.5, 90.0));
/// assert_eq!(target.get_pitch(), 12.5);
/// assert_eq!(target.get_pose().rotation_degrees, 90.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PhotonTrackedTarget {
    yaw: f64,
    pitch: f64,
    area: f64,
    skew: f64,
    pose: Pose2d,
}

impl PhotonTrackedTarget {
    /// yaw, pitch, area, skew, pose x, pose y, pose rotation. All binary64.
    pub const NUMBER_OF_FIELDS: usize = 7;

    pub const BYTE_COUNT: usize = Self::NUMBER_OF_FIELDS * 8;

    pub const fn new(yaw: f64, pitch: f64, area: f64, skew: f64, pose: Pose2d) -> Self {
        Self {
            yaw,
            pitch,
            area,
            skew,
            pose,
        }
    }

    /// Horizontal angle to the target in degrees, positive right.
    pub fn get_yaw(&self) -> f64 {
        self.yaw
    }

    /// Vertical angle to the target in degrees, positive up.
    pub fn get_pitch(&self) -> f64 {
        self.pitch
    }

    /// Area of the target as a percentage of the image (0-100).
    pub fn get_area(&self) -> f64 {
        self.area
    }

    /// Skew of the target in degrees, counter-clockwise positive.
    pub fn get_skew(&self) -> f64 {
        self.skew
    }

    pub fn get_pose(&self) -> Pose2d {
        self.pose
    }
}

impl PhotonSerializable for PhotonTrackedTarget {
    fn get_number_of_bytes_needed(&self) -> usize {
        Self::BYTE_COUNT
    }

    fn try_serialize_into_packet(&self, packet: &mut PhotonPacket) -> Result<(), DecodeError> {
        packet.encode_f64(self.yaw);
        packet.encode_f64(self.pitch);
        packet.encode_f64(self.area);
        packet.encode_f64(self.skew);
        packet.encode_f64(self.pose.x);
        packet.encode_f64(self.pose.y);
        packet.encode_f64(self.pose.rotation_degrees);
        Ok(())
    }

    fn try_deserialize_from_packet(packet: &mut PhotonPacket) -> Result<Self, DecodeError> {
        // Check the whole record up front so a short record never yields a partial target
        packet.verify_bytes_remaining(Self::BYTE_COUNT)?;
        let yaw = packet.decode_f64()?;
        let pitch = packet.decode_f64()?;
        let area = packet.decode_f64()?;
        let skew = packet.decode_f64()?;
        let pose = Pose2d::new(packet.decode_f64()?, packet.decode_f64()?, packet.decode_f64()?);
        Ok(Self::new(yaw, pitch, area, skew, pose))
    }
}
