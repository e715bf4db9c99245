//! Tests for the camera binding against the in-process table
//!
//! A SimulatedCoprocessor plays the producer, a PhotonCamera the consumer.

use photon_camera::{CameraError, FrameError, PhotonCamera, SimulatedCoprocessor};
use photon_serialization::{DecodeError, PhotonPipelineResult, PhotonTrackedTarget, Pose2d};
use photon_table::{LocalTable, LocalTableInstance, TableError};

fn bind(instance: &LocalTableInstance, name: &str) -> (PhotonCamera<LocalTable>, SimulatedCoprocessor<LocalTable>) {
    let camera = PhotonCamera::new(instance, name).unwrap();
    let coprocessor = SimulatedCoprocessor::new(instance, name).unwrap();
    (camera, coprocessor)
}

fn target(yaw: f64, pitch: f64) -> PhotonTrackedTarget {
    PhotonTrackedTarget::new(yaw, pitch, 1.5, -2.0, Pose2d::new(1.0, 2.0, 30.0))
}

#[test]
fn test_has_targets_matches_best_target() {
    let instance = LocalTableInstance::new();
    let (mut camera, mut coprocessor) = bind(&instance, "front");

    for number_of_targets in [0usize, 1, 3, 0, 2] {
        let targets = (0..number_of_targets)
            .map(|i| target(i as f64, -(i as f64)))
            .collect();
        coprocessor
            .publish(&PhotonPipelineResult::new(10.0, targets))
            .unwrap();

        let has_targets = camera.has_targets();
        assert_eq!(has_targets, number_of_targets > 0);
        assert_eq!(camera.get_best_target().is_some(), has_targets);
        if has_targets {
            assert_eq!(camera.get_best_target_yaw(), Ok(0.0));
        } else {
            assert_eq!(camera.get_best_target_pitch(), Err(CameraError::NoTarget));
            assert_eq!(camera.get_best_target_yaw(), Err(CameraError::NoTarget));
            assert_eq!(camera.get_best_target_area(), Err(CameraError::NoTarget));
            assert_eq!(camera.get_best_target_skew(), Err(CameraError::NoTarget));
        }
    }
}

#[test]
fn test_nothing_published_reads_as_no_targets() {
    let instance = LocalTableInstance::new();
    let mut camera = PhotonCamera::new(&instance, "front").unwrap();

    let result = camera.try_get_latest_result().unwrap();
    assert!(!result.has_targets());
    assert_eq!(camera.get_latency_millis(), 0.0);
}

#[test]
fn test_pipeline_index_write_through() {
    let instance = LocalTableInstance::new();
    let (mut camera, coprocessor) = bind(&instance, "front");

    camera.set_pipeline_index(3).unwrap();
    assert_eq!(camera.get_pipeline_index(), 3);
    assert_eq!(coprocessor.requested_pipeline_index(), Ok(3));

    // No range validation
    camera.set_pipeline_index(-1).unwrap();
    assert_eq!(coprocessor.requested_pipeline_index(), Ok(-1));
}

#[test]
fn test_driver_mode_write_through() {
    let instance = LocalTableInstance::new();
    let (mut camera, coprocessor) = bind(&instance, "front");

    assert!(!camera.get_driver_mode());
    camera.set_driver_mode(true).unwrap();
    assert!(camera.get_driver_mode());
    assert_eq!(coprocessor.requested_driver_mode(), Ok(true));
}

#[test]
fn test_truncated_frame() {
    let instance = LocalTableInstance::new();
    let (mut camera, coprocessor) = bind(&instance, "front");

    let bytes = PhotonPipelineResult::new(10.0, vec![target(1.0, 2.0), target(3.0, 4.0)])
        .try_encode_to_bytes()
        .unwrap();
    coprocessor.publish_raw(&bytes[..bytes.len() - 1]).unwrap();

    assert!(matches!(
        camera.try_get_latest_result(),
        Err(FrameError::Decode(DecodeError::Truncated { .. }))
    ));
    let result = camera.get_latest_result();
    assert!(!result.has_targets());
    assert_eq!(result.get_latency_millis(), 0.0);
    assert!(camera.get_best_target().is_none());
}

#[test]
fn test_disconnected_at_bind() {
    let instance = LocalTableInstance::new();
    instance.set_connected(false);
    assert!(matches!(
        PhotonCamera::new(&instance, "front"),
        Err(CameraError::Binding(TableError::Disconnected))
    ));
}

#[test]
fn test_disconnected_after_bind() {
    let instance = LocalTableInstance::new();
    let (mut camera, mut coprocessor) = bind(&instance, "front");
    coprocessor
        .publish(&PhotonPipelineResult::new(5.0, vec![target(1.0, 1.0)]))
        .unwrap();
    assert!(camera.has_targets());

    instance.set_connected(false);
    assert_eq!(
        camera.try_get_latest_result(),
        Err(FrameError::Transport(TableError::Disconnected))
    );
    assert!(!camera.has_targets());

    // Cache is updated even though the write fails
    assert_eq!(
        camera.set_pipeline_index(7),
        Err(CameraError::Transport(TableError::Disconnected))
    );
    assert_eq!(camera.get_pipeline_index(), 7);

    instance.set_connected(true);
    assert!(camera.has_targets());
    assert_eq!(coprocessor.requested_pipeline_index(), Ok(0));
}

#[test]
fn test_cached_settings_are_stale_until_refresh() {
    let instance = LocalTableInstance::new();
    let (mut camera, coprocessor) = bind(&instance, "front");

    coprocessor.set_driver_mode(true).unwrap();
    coprocessor.set_pipeline_index(5).unwrap();
    assert!(!camera.get_driver_mode());
    assert_eq!(camera.get_pipeline_index(), 0);

    camera.refresh_cached_settings().unwrap();
    assert!(camera.get_driver_mode());
    assert_eq!(camera.get_pipeline_index(), 5);
}

#[test]
fn test_refresh_while_disconnected_keeps_cache() {
    let instance = LocalTableInstance::new();
    let (mut camera, coprocessor) = bind(&instance, "front");
    coprocessor.set_pipeline_index(2).unwrap();

    instance.set_connected(false);
    assert_eq!(
        camera.refresh_cached_settings(),
        Err(CameraError::Transport(TableError::Disconnected))
    );
    assert_eq!(camera.get_pipeline_index(), 0);
}

#[test]
fn test_cameras_do_not_share_state() {
    let instance = LocalTableInstance::new();
    let (mut front, mut front_coprocessor) = bind(&instance, "front");
    let (mut rear, rear_coprocessor) = bind(&instance, "rear");

    front.set_pipeline_index(4).unwrap();
    front_coprocessor
        .publish(&PhotonPipelineResult::new(1.0, vec![target(7.0, 8.0)]))
        .unwrap();

    assert_eq!(rear.get_pipeline_index(), 0);
    assert_eq!(rear_coprocessor.requested_pipeline_index(), Ok(0));
    assert!(!rear.has_targets());
    assert_eq!(front.get_best_target_pitch(), Ok(8.0));
}

#[test]
fn test_latest_frame_wins() {
    let instance = LocalTableInstance::new();
    let (mut camera, mut coprocessor) = bind(&instance, "front");

    coprocessor
        .publish(&PhotonPipelineResult::new(30.0, vec![target(1.0, 1.0), target(2.0, 2.0)]))
        .unwrap();
    coprocessor
        .publish(&PhotonPipelineResult::new(12.0, vec![target(-4.0, 6.5)]))
        .unwrap();

    let result = camera.get_latest_result();
    assert_eq!(result.get_latency_millis(), 12.0);
    assert_eq!(result.get_targets(), &[target(-4.0, 6.5)]);
}

#[test]
fn test_mistyped_setting_entry_does_not_fail_binding() {
    use photon_table::{NetworkTable, TableEntry, TableInstance};

    let instance = LocalTableInstance::new();
    instance
        .get_table("photonvision")
        .unwrap()
        .get_sub_table("front")
        .unwrap()
        .get_entry("pipelineIndex")
        .unwrap()
        .set_boolean(true)
        .unwrap();

    let bound = PhotonCamera::new(&instance, "front");
    assert!(bound.is_ok());
    let mut camera = bound.unwrap();
    assert_eq!(camera.get_pipeline_index(), 0);
    assert!(!camera.get_driver_mode());
    assert!(!camera.has_targets());
}
