// Copyright 2025 The photon-client Authors
// SPDX-License-Identifier: Apache-2.0

//! Producer side of a camera namespace, for tests and simulation
//!
//! [`SimulatedCoprocessor`] writes frames the way the vision coprocessor does and
//! reads back the settings the robot requested.

use photon_config::CameraConfig;
use photon_serialization::{PhotonPacket, PhotonPipelineResult, PhotonSerializable};
use photon_table::{NetworkTable, TableEntry, TableInstance};
use tracing::trace;

use crate::camera::{read_pipeline_index, resolve_camera_table, CameraEntries, DEFAULT_ROOT_TABLE};
use crate::error::FrameError;

/// Publishes pipeline results into a camera namespace
///
/// # Example
/// ```rust
/// use photon_camera::{PhotonCamera, SimulatedCoprocessor};
/// use photon_serialization::{PhotonPipelineResult, PhotonTrackedTarget, Pose2d};
/// use photon_table::LocalTableInstance;
///
/// let instance = LocalTableInstance::new();
/// let mut coprocessor = SimulatedCoprocessor::new(&instance, "front")?;
/// let mut camera = PhotonCamera::new(&instance, "front")?;
///
/// let target = PhotonTrackedTarget::new(-3.25, 12.5, 7.0, 0.0, Pose2d::default());
/// coprocessor.publish(&PhotonPipelineResult::new(20.0, vec![target]))?;
/// assert_eq!(camera.get_best_target_pitch()?, 12.5);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct SimulatedCoprocessor<T: NetworkTable> {
    table: T,
    entries: CameraEntries<T::Entry>,
    packet: PhotonPacket,
}

impl<T: NetworkTable> SimulatedCoprocessor<T> {
    /// Bind to `/photonvision/<camera_name>`
    pub fn new<I>(instance: &I, camera_name: &str) -> photon_table::Result<Self>
    where
        I: TableInstance<Table = T>,
    {
        Self::from_table(resolve_camera_table(instance, DEFAULT_ROOT_TABLE, camera_name)?)
    }

    /// Bind to a resolved namespace using the default entry names
    pub fn from_table(table: T) -> photon_table::Result<Self> {
        Self::bind(table, &CameraConfig::default())
    }

    /// Bind using configured table and entry names
    pub fn from_config<I>(instance: &I, camera: &CameraConfig) -> photon_table::Result<Self>
    where
        I: TableInstance<Table = T>,
    {
        let table = resolve_camera_table(instance, &camera.root_table, &camera.camera_name)?;
        Self::bind(table, camera)
    }

    fn bind(table: T, camera: &CameraConfig) -> photon_table::Result<Self> {
        let entries = CameraEntries::resolve(&table, camera)?;
        Ok(Self {
            table,
            entries,
            packet: PhotonPacket::new_empty(),
        })
    }

    pub fn table_path(&self) -> &str {
        self.table.path()
    }

    /// Encode and publish a frame
    pub fn publish(&mut self, result: &PhotonPipelineResult) -> Result<(), FrameError> {
        result.try_encode_into_packet(&mut self.packet)?;
        trace!(
            "[SIM] {} <- {} targets ({} bytes)",
            self.table.path(),
            result.get_targets().len(),
            result.get_number_of_bytes_needed()
        );
        self.publish_raw(self.packet.get_byte_ref())?;
        Ok(())
    }

    /// Publish bytes verbatim, including malformed frames
    pub fn publish_raw(&self, bytes: &[u8]) -> photon_table::Result<()> {
        self.entries.raw_bytes.set_raw(bytes)
    }

    /// Driver mode as last written by the robot
    pub fn requested_driver_mode(&self) -> photon_table::Result<bool> {
        self.entries.driver_mode.get_boolean(false)
    }

    /// Pipeline index as last written by the robot
    pub fn requested_pipeline_index(&self) -> photon_table::Result<i32> {
        read_pipeline_index(&self.entries.pipeline_index)
    }

    /// Change the driver mode from the coprocessor side
    pub fn set_driver_mode(&self, driver_mode: bool) -> photon_table::Result<()> {
        self.entries.driver_mode.set_boolean(driver_mode)
    }

    /// Change the pipeline index from the coprocessor side
    pub fn set_pipeline_index(&self, pipeline_index: i32) -> photon_table::Result<()> {
        self.entries.pipeline_index.set_number(f64::from(pipeline_index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use photon_table::LocalTableInstance;

    #[test]
    fn test_publish_writes_encoded_frame() {
        let instance = LocalTableInstance::new();
        let mut coprocessor = SimulatedCoprocessor::new(&instance, "front").unwrap();
        let result = PhotonPipelineResult::new(3.0, Vec::new());
        coprocessor.publish(&result).unwrap();

        let mut bytes = Vec::new();
        instance
            .get_table("photonvision")
            .unwrap()
            .get_sub_table("front")
            .unwrap()
            .get_entry("rawBytes")
            .unwrap()
            .get_raw_into(&[], &mut bytes)
            .unwrap();
        assert_eq!(bytes, result.try_encode_to_bytes().unwrap());
    }

    #[test]
    fn test_requested_settings_default() {
        let instance = LocalTableInstance::new();
        let coprocessor = SimulatedCoprocessor::new(&instance, "front").unwrap();
        assert_eq!(coprocessor.requested_driver_mode(), Ok(false));
        assert_eq!(coprocessor.requested_pipeline_index(), Ok(0));
        assert_eq!(coprocessor.table_path(), "/photonvision/front");
    }

    #[test]
    fn test_publish_while_disconnected() {
        let instance = LocalTableInstance::new();
        let mut coprocessor = SimulatedCoprocessor::new(&instance, "front").unwrap();
        instance.set_connected(false);
        assert_eq!(
            coprocessor.publish(&PhotonPipelineResult::new_empty()),
            Err(FrameError::Transport(photon_table::TableError::Disconnected))
        );
    }
}
