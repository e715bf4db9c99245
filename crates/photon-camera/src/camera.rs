// Copyright 2025 The photon-client Authors
// SPDX-License-Identifier: Apache-2.0

//! Robot-side handle to one camera's table namespace

use photon_config::{CameraConfig, DecoderConfig};
use photon_serialization::{PhotonPacket, PhotonPipelineResult, PhotonTrackedTarget};
use photon_table::{NetworkTable, TableEntry, TableError, TableInstance, PATH_SEPARATOR};
use tracing::{debug, info, trace, warn};

use crate::error::{CameraError, FrameError, Result};

/// Top level table every camera publishes under
pub const DEFAULT_ROOT_TABLE: &str = "photonvision";
/// Entry holding the latest encoded pipeline result
pub const RAW_BYTES_ENTRY: &str = "rawBytes";
/// Entry holding the driver mode flag
pub const DRIVER_MODE_ENTRY: &str = "driverMode";
/// Entry holding the active pipeline index
pub const PIPELINE_INDEX_ENTRY: &str = "pipelineIndex";

/// Resolve `/<root_table>/<camera_name>` on an instance
pub(crate) fn resolve_camera_table<I: TableInstance>(
    instance: &I,
    root_table: &str,
    camera_name: &str,
) -> photon_table::Result<I::Table> {
    instance.get_table(root_table)?.get_sub_table(camera_name)
}

/// A settings entry holding a value of another type reads as its default.
/// Only an unreachable or misnamed entry is an error.
fn default_on_type_mismatch<V: std::fmt::Debug>(
    read: photon_table::Result<V>,
    default: V,
    camera_name: &str,
) -> photon_table::Result<V> {
    match read {
        Err(err @ TableError::TypeMismatch { .. }) => {
            warn!(
                "[CAMERA] {}: {}, using default {:?}",
                camera_name, err, default
            );
            Ok(default)
        }
        other => other,
    }
}

/// Bound entries of one camera namespace
pub(crate) struct CameraEntries<E> {
    pub raw_bytes: E,
    pub driver_mode: E,
    pub pipeline_index: E,
}

impl<E: TableEntry> CameraEntries<E> {
    pub(crate) fn resolve<T>(table: &T, config: &CameraConfig) -> photon_table::Result<Self>
    where
        T: NetworkTable<Entry = E>,
    {
        Ok(Self {
            raw_bytes: table.get_entry(&config.raw_bytes_entry)?,
            driver_mode: table.get_entry(&config.driver_mode_entry)?,
            pipeline_index: table.get_entry(&config.pipeline_index_entry)?,
        })
    }
}

/// Pipeline indices travel as doubles on the table
pub(crate) fn read_pipeline_index<E: TableEntry>(entry: &E) -> photon_table::Result<i32> {
    Ok(entry.get_number(0.0)? as i32)
}

/// Handle to one PhotonVision camera
///
/// Binds the camera's `rawBytes`, `driverMode` and `pipelineIndex` entries once,
/// then decodes the latest published frame on demand. The driver mode and
/// pipeline index are cached at bind time and only change through the setters
/// here. Changes made by other writers are not seen until
/// [`PhotonCamera::refresh_cached_settings`] is called.
///
/// Every target accessor fetches and decodes a fresh frame. Call
/// [`PhotonCamera::get_latest_result`] once per cycle and read from the result
/// when several fields are needed from the same frame.
///
/// # Example
/// ```rust
/// use photon_camera::PhotonCamera;
/// use photon_table::LocalTableInstance;
///
/// let instance = LocalTableInstance::new();
/// let mut camera = PhotonCamera::new(&instance, "front")?;
///
/// assert!(!camera.has_targets());
/// camera.set_pipeline_index(2)?;
/// assert_eq!(camera.get_pipeline_index(), 2);
/// # Ok::<(), photon_camera::CameraError>(())
/// ```
pub struct PhotonCamera<T: NetworkTable> {
    camera_name: String,
    table: T,
    entries: CameraEntries<T::Entry>,
    driver_mode: bool,
    pipeline_index: i32,
    packet: PhotonPacket,
    max_targets: usize,
}

impl<T: NetworkTable> PhotonCamera<T> {
    //region Binding

    /// Bind to the camera under the default `photonvision` root table.
    ///
    /// # Errors
    ///
    /// [`CameraError::Binding`] if the namespace cannot be reached.
    pub fn new<I>(instance: &I, camera_name: &str) -> Result<Self>
    where
        I: TableInstance<Table = T>,
    {
        let table = resolve_camera_table(instance, DEFAULT_ROOT_TABLE, camera_name)
            .map_err(|err| Self::binding_failed(camera_name, err))?;
        Self::from_table(table)
    }

    /// Bind to an already resolved camera namespace, using the default entry names.
    pub fn from_table(table: T) -> Result<Self> {
        Self::bind(table, &CameraConfig::default(), &DecoderConfig::default())
    }

    /// Bind using configured table and entry names and decoder limits.
    pub fn from_config<I>(instance: &I, camera: &CameraConfig, decoder: &DecoderConfig) -> Result<Self>
    where
        I: TableInstance<Table = T>,
    {
        let table = resolve_camera_table(instance, &camera.root_table, &camera.camera_name)
            .map_err(|err| Self::binding_failed(&camera.camera_name, err))?;
        Self::bind(table, camera, decoder)
    }

    fn bind(table: T, camera: &CameraConfig, decoder: &DecoderConfig) -> Result<Self> {
        let camera_name = table
            .path()
            .rsplit(PATH_SEPARATOR)
            .next()
            .unwrap_or_default()
            .to_string();

        let entries = CameraEntries::resolve(&table, camera)
            .map_err(|err| Self::binding_failed(&camera_name, err))?;

        // One-time snapshot, not kept live
        let driver_mode =
            default_on_type_mismatch(entries.driver_mode.get_boolean(false), false, &camera_name)
                .map_err(|err| Self::binding_failed(&camera_name, err))?;
        let pipeline_index =
            default_on_type_mismatch(read_pipeline_index(&entries.pipeline_index), 0, &camera_name)
                .map_err(|err| Self::binding_failed(&camera_name, err))?;

        info!(
            "[CAMERA] Bound {} (driver mode: {}, pipeline: {})",
            table.path(),
            driver_mode,
            pipeline_index
        );

        Ok(Self {
            camera_name,
            table,
            entries,
            driver_mode,
            pipeline_index,
            packet: PhotonPacket::with_capacity(decoder.initial_buffer_capacity),
            max_targets: decoder.max_targets,
        })
    }

    fn binding_failed(camera_name: &str, err: photon_table::TableError) -> CameraError {
        warn!("[CAMERA] Failed to bind camera '{}': {}", camera_name, err);
        CameraError::Binding(err)
    }

    //endregion

    //region Identification

    pub fn camera_name(&self) -> &str {
        &self.camera_name
    }

    /// Full path of the camera namespace, e.g. `/photonvision/front`
    pub fn table_path(&self) -> &str {
        self.table.path()
    }

    //endregion

    //region Settings

    /// Cached driver mode. Does not touch the table.
    pub fn get_driver_mode(&self) -> bool {
        self.driver_mode
    }

    /// Update the cached driver mode and write it through to the table.
    ///
    /// The cache is updated even if the write fails.
    pub fn set_driver_mode(&mut self, driver_mode: bool) -> Result<()> {
        self.driver_mode = driver_mode;
        self.entries
            .driver_mode
            .set_boolean(driver_mode)
            .map_err(|err| self.write_failed("driver mode", err))
    }

    /// Cached pipeline index. Does not touch the table.
    pub fn get_pipeline_index(&self) -> i32 {
        self.pipeline_index
    }

    /// Update the cached pipeline index and write it through to the table.
    ///
    /// No range check is made; the coprocessor decides what an index means.
    pub fn set_pipeline_index(&mut self, pipeline_index: i32) -> Result<()> {
        self.pipeline_index = pipeline_index;
        self.entries
            .pipeline_index
            .set_number(f64::from(pipeline_index))
            .map_err(|err| self.write_failed("pipeline index", err))
    }

    /// Re-read driver mode and pipeline index from the table into the cache.
    ///
    /// An entry holding a value of another type reads as its default, as at bind
    /// time. The cache is left unchanged if either read fails.
    pub fn refresh_cached_settings(&mut self) -> Result<()> {
        let driver_mode = default_on_type_mismatch(
            self.entries.driver_mode.get_boolean(false),
            false,
            &self.camera_name,
        )
        .map_err(CameraError::Transport)?;
        let pipeline_index = default_on_type_mismatch(
            read_pipeline_index(&self.entries.pipeline_index),
            0,
            &self.camera_name,
        )
        .map_err(CameraError::Transport)?;

        if driver_mode != self.driver_mode || pipeline_index != self.pipeline_index {
            debug!(
                "[CAMERA] {} settings changed remotely (driver mode: {}, pipeline: {})",
                self.camera_name, driver_mode, pipeline_index
            );
        }
        self.driver_mode = driver_mode;
        self.pipeline_index = pipeline_index;
        Ok(())
    }

    fn write_failed(&self, setting: &str, err: photon_table::TableError) -> CameraError {
        warn!(
            "[CAMERA] Failed to write {} for {}: {}",
            setting, self.camera_name, err
        );
        CameraError::Transport(err)
    }

    //endregion

    //region Results

    /// Fetch and decode the latest published frame.
    ///
    /// Never fails: a frame that cannot be read or decoded is reported as an
    /// empty result. Use [`PhotonCamera::try_get_latest_result`] to see why.
    pub fn get_latest_result(&mut self) -> PhotonPipelineResult {
        match self.try_get_latest_result() {
            Ok(result) => result,
            Err(err) => {
                debug!("[CAMERA] {} has no usable frame: {}", self.camera_name, err);
                PhotonPipelineResult::new_empty()
            }
        }
    }

    /// Fetch and decode the latest published frame, reporting failures.
    ///
    /// An entry that was never published decodes to an empty result.
    pub fn try_get_latest_result(&mut self) -> std::result::Result<PhotonPipelineResult, FrameError> {
        let raw_bytes = &self.entries.raw_bytes;
        self.packet
            .try_write_data_and_reset(|bytes| raw_bytes.get_raw_into(&[], bytes))?;
        trace!(
            "[CAMERA] {} fetched {} bytes",
            self.camera_name,
            self.packet.get_number_of_bytes_used()
        );
        let result = PhotonPipelineResult::try_decode_with_limit(&mut self.packet, self.max_targets)?;
        Ok(result)
    }

    /// Whether the latest frame contains at least one target
    pub fn has_targets(&mut self) -> bool {
        self.get_latest_result().has_targets()
    }

    /// The target the pipeline ranked first in the latest frame
    pub fn get_best_target(&mut self) -> Option<PhotonTrackedTarget> {
        self.get_latest_result().get_best_target().copied()
    }

    fn best_target_or_error(&mut self) -> Result<PhotonTrackedTarget> {
        self.get_best_target().ok_or(CameraError::NoTarget)
    }

    /// Pitch of the best target in degrees
    pub fn get_best_target_pitch(&mut self) -> Result<f64> {
        Ok(self.best_target_or_error()?.get_pitch())
    }

    /// Yaw of the best target in degrees
    pub fn get_best_target_yaw(&mut self) -> Result<f64> {
        Ok(self.best_target_or_error()?.get_yaw())
    }

    /// Area of the best target as a percent of the image
    pub fn get_best_target_area(&mut self) -> Result<f64> {
        Ok(self.best_target_or_error()?.get_area())
    }

    /// Skew of the best target in degrees
    pub fn get_best_target_skew(&mut self) -> Result<f64> {
        Ok(self.best_target_or_error()?.get_skew())
    }

    /// Latency of the latest frame in milliseconds, `0.0` when there is none
    pub fn get_latency_millis(&mut self) -> f64 {
        self.get_latest_result().get_latency_millis()
    }

    //endregion
}

impl<T: NetworkTable + std::fmt::Debug> std::fmt::Debug for PhotonCamera<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhotonCamera")
            .field("table", &self.table)
            .field("driver_mode", &self.driver_mode)
            .field("pipeline_index", &self.pipeline_index)
            .field("max_targets", &self.max_targets)
            .finish()
    }
}
