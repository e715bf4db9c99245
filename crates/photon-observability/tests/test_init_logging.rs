//! The global subscriber can be installed once per process, so this file holds a
//! single test.

use photon_observability::{init_logging, CrateDebugFlags};

#[test]
fn test_init_logging_once() {
    let flags = CrateDebugFlags::from_args(vec!["--debug-photon-camera".to_string()]);
    let guard = init_logging(&flags, "info", None).unwrap();
    assert!(guard.log_dir().is_none());

    tracing::debug!(target: "photon_camera", "visible at debug");

    let second = init_logging(&flags, "info", None);
    assert!(second.is_err());
}
