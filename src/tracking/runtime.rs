//! Collaborator contract with the device tracking runtime.
//!
//! The runtime owns a finite pool of native objects. Acquisition methods hand
//! out raw handles that must be passed to the matching `release_*` method
//! exactly once; a leak exhausts the pool. Library code never pairs these
//! calls by hand — it goes through the scoped wrappers in
//! [`crate::tracking::scoped`], which release on drop along every exit path.

use glam::{Mat4, Vec3};

use crate::error::{FrameError, SessionError};
use crate::tracking::types::{
    DisplayGeometry, InstallStatus, LightEstimate, Pose, TrackableKind, TrackingConfig,
    TrackingState,
};

/// Borrowed per-frame camera handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CameraHandle(pub(crate) u64);

/// Borrowed handle to one tracked feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TrackableHandle(pub(crate) u64);

/// Borrowed handle to an enumeration of trackables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TrackableListHandle(pub(crate) u64);

/// Borrowed handle to a ranked hit-test result list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HitListHandle(pub(crate) u64);

/// Borrowed handle to a single hit-test candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HitHandle(pub(crate) u64);

/// Owned handle to an anchor fixed to a trackable at creation time.
///
/// Unlike the borrowed handles above, an anchor lives until it is explicitly
/// released by its owner (see [`crate::anchor::AnchorStore::release_all`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnchorHandle(pub(crate) u64);

/// Borrowed handle to this frame's point cloud.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PointCloudHandle(pub(crate) u64);

/// Borrowed handle to this frame's depth image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DepthImageHandle(pub(crate) u64);

/// Device tracking runtime: one live session plus its per-frame state.
///
/// Implementations wrap the platform's AR tracking API. All methods take
/// `&self`; implementations synchronize internally, which lets borrowed-handle
/// wrappers coexist with queries against the same runtime.
pub trait TrackingRuntime: Send + Sync {
    // Session.

    /// Apply a configuration. Must be re-invoked whenever settings change.
    fn configure(&self, config: &TrackingConfig) -> Result<(), SessionError>;

    /// Start or restart tracking.
    fn resume(&self) -> Result<(), SessionError>;

    /// Stop tracking. Safe to call at any time; placed anchors survive.
    fn pause(&self);

    /// Propagate display rotation and viewport size for camera-to-screen
    /// mapping.
    fn set_display_geometry(&self, geometry: DisplayGeometry);

    /// Whether the device can produce depth images.
    fn supports_depth(&self) -> bool;

    /// Name the texture the camera background feed is decoded into.
    fn set_camera_texture(&self, texture_id: u32);

    // Frame.

    /// Advance to the next frame. On failure the previous frame's data
    /// remains current.
    fn update(&self) -> Result<(), FrameError>;

    /// Whether display geometry changed since the previous frame.
    fn display_geometry_changed(&self) -> bool;

    /// Map points from normalized device coordinates into texture
    /// coordinates using the current frame's camera mapping.
    fn transform_ndc_basis(&self, points: [[f32; 2]; 3]) -> [[f32; 2]; 3];

    /// This frame's ambient light estimate.
    fn light_estimate(&self) -> LightEstimate;

    // Camera.

    /// Acquire the current frame's camera.
    fn acquire_camera(&self) -> CameraHandle;

    /// Tracking confidence of the camera itself.
    fn camera_tracking_state(&self, camera: CameraHandle) -> TrackingState;

    /// World-to-camera view matrix.
    fn camera_view_matrix(&self, camera: CameraHandle) -> Mat4;

    /// Projection matrix for the given clip planes.
    fn camera_projection_matrix(&self, camera: CameraHandle, near: f32, far: f32) -> Mat4;

    /// Release a camera acquired with [`Self::acquire_camera`].
    fn release_camera(&self, camera: CameraHandle);

    // Trackables.

    /// Acquire the list of all plane trackables, including subsumed and
    /// non-tracking ones; filtering is the caller's job.
    fn acquire_planes(&self) -> TrackableListHandle;

    /// Number of entries in a trackable list.
    fn trackable_list_len(&self, list: TrackableListHandle) -> usize;

    /// Acquire one entry of a trackable list.
    fn acquire_trackable(&self, list: TrackableListHandle, index: usize) -> TrackableHandle;

    /// Release a list acquired with [`Self::acquire_planes`].
    fn release_trackable_list(&self, list: TrackableListHandle);

    /// Kind of feature this trackable represents.
    fn trackable_kind(&self, trackable: TrackableHandle) -> TrackableKind;

    /// Tracking confidence of this trackable.
    fn trackable_tracking_state(&self, trackable: TrackableHandle) -> TrackingState;

    /// Center pose of this trackable.
    fn trackable_pose(&self, trackable: TrackableHandle) -> Pose;

    /// The larger plane this plane has been merged into, if any.
    fn acquire_subsuming_plane(&self, plane: TrackableHandle) -> Option<TrackableHandle>;

    /// Release a trackable acquired from a list, a hit, or a subsumption
    /// query.
    fn release_trackable(&self, trackable: TrackableHandle);

    // Hit testing.

    /// Ray-cast the given screen coordinate against tracked geometry.
    /// Results are ordered by increasing distance from the camera.
    fn hit_test(&self, x: f32, y: f32) -> HitListHandle;

    /// Ray-cast variant that may also return instant-placement points,
    /// assuming `approximate_distance_m` when geometry is not yet mapped.
    fn hit_test_instant_placement(&self, x: f32, y: f32, approximate_distance_m: f32)
        -> HitListHandle;

    /// Number of candidates in a hit list.
    fn hit_list_len(&self, list: HitListHandle) -> usize;

    /// Acquire one candidate of a hit list.
    fn acquire_hit(&self, list: HitListHandle, index: usize) -> HitHandle;

    /// World-space pose of the intersection.
    fn hit_pose(&self, hit: HitHandle) -> Pose;

    /// The trackable this candidate intersected, if it has one.
    fn acquire_hit_trackable(&self, hit: HitHandle) -> Option<TrackableHandle>;

    /// Release a hit acquired with [`Self::acquire_hit`].
    fn release_hit(&self, hit: HitHandle);

    /// Release a list acquired with one of the hit-test methods.
    fn release_hit_list(&self, list: HitListHandle);

    // Anchors.

    /// Fix a new anchor at a hit location. `None` when the runtime cannot
    /// anchor this hit; the caller moves on to the next candidate.
    fn create_anchor(&self, hit: HitHandle) -> Option<AnchorHandle>;

    /// Tracking confidence of an anchor.
    fn anchor_tracking_state(&self, anchor: AnchorHandle) -> TrackingState;

    /// Current world-space pose of an anchor.
    fn anchor_pose(&self, anchor: AnchorHandle) -> Pose;

    /// Give an anchor back to the runtime.
    fn release_anchor(&self, anchor: AnchorHandle);

    // Point cloud and depth.

    /// Acquire this frame's point cloud, if one is available.
    fn acquire_point_cloud(&self) -> Option<PointCloudHandle>;

    /// Copy out the points of an acquired cloud.
    fn point_cloud_points(&self, cloud: PointCloudHandle) -> Vec<Vec3>;

    /// Release a cloud acquired with [`Self::acquire_point_cloud`].
    fn release_point_cloud(&self, cloud: PointCloudHandle);

    /// Acquire this frame's depth image, if one is available.
    fn acquire_depth_image(&self) -> Option<DepthImageHandle>;

    /// Dimensions of an acquired depth image.
    fn depth_image_size(&self, image: DepthImageHandle) -> (u32, u32);

    /// Release an image acquired with [`Self::acquire_depth_image`].
    fn release_depth_image(&self, image: DepthImageHandle);
}

/// Platform-side factory for tracking sessions.
pub trait TrackingPlatform: Send {
    /// Check for (and if needed trigger) installation of the tracking
    /// runtime. `user_requested` is true only for the first attempt of an
    /// app lifetime; retries after an install flow pass false.
    fn request_install(&mut self, user_requested: bool) -> Result<InstallStatus, SessionError>;

    /// Create a tracking session together with its frame buffer. The two are
    /// lifetime-paired and dropped together.
    fn create_session(&mut self) -> Result<Box<dyn TrackingRuntime>, SessionError>;
}
