mod photon_pipeline_result;
mod photon_tracked_target;

pub use photon_pipeline_result::PhotonPipelineResult;
pub use photon_tracked_target::{PhotonTrackedTarget, Pose2d};
