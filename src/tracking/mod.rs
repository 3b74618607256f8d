//! Tracking-runtime abstraction: vocabulary types, the collaborator traits,
//! scoped handle wrappers, and a scripted playback implementation.

pub mod runtime;
pub mod scoped;
pub mod scripted;
pub mod types;

pub use runtime::{
    AnchorHandle, CameraHandle, DepthImageHandle, HitHandle, HitListHandle, PointCloudHandle,
    TrackableHandle, TrackableListHandle, TrackingPlatform, TrackingRuntime,
};
pub use scoped::{
    ScopedCamera, ScopedDepthImage, ScopedHit, ScopedHitList, ScopedPlaneList, ScopedPointCloud,
    ScopedTrackable,
};
pub use scripted::{
    HitQuery, ScriptedHit, ScriptedPlatform, ScriptedRuntime, ScriptedTrackable, ScriptedWorld,
};
pub use types::{
    DisplayGeometry, InstallStatus, InstantPlacementMethod, LightEstimate, LightEstimateState,
    Pose, TrackableKind, TrackingConfig, TrackingState,
};
