//! Scoped wrappers over borrowed runtime handles.
//!
//! Each wrapper acquires its handle on construction and releases it exactly
//! once when dropped, so early returns and error paths cannot leak a native
//! object.

use glam::{Mat4, Vec3};

use crate::tracking::runtime::{
    AnchorHandle, CameraHandle, DepthImageHandle, HitHandle, HitListHandle, PointCloudHandle,
    TrackableHandle, TrackableListHandle, TrackingRuntime,
};
use crate::tracking::types::{Pose, TrackableKind, TrackingState};

/// The current frame's camera.
pub struct ScopedCamera<'a> {
    runtime: &'a dyn TrackingRuntime,
    handle: CameraHandle,
}

impl<'a> ScopedCamera<'a> {
    /// Acquire the camera for the current frame.
    pub fn acquire(runtime: &'a dyn TrackingRuntime) -> Self {
        let handle = runtime.acquire_camera();
        Self { runtime, handle }
    }

    /// Tracking confidence of the camera.
    pub fn tracking_state(&self) -> TrackingState {
        self.runtime.camera_tracking_state(self.handle)
    }

    /// World-to-camera view matrix.
    pub fn view_matrix(&self) -> Mat4 {
        self.runtime.camera_view_matrix(self.handle)
    }

    /// Projection matrix for the given clip planes.
    pub fn projection_matrix(&self, near: f32, far: f32) -> Mat4 {
        self.runtime.camera_projection_matrix(self.handle, near, far)
    }
}

impl Drop for ScopedCamera<'_> {
    fn drop(&mut self) {
        self.runtime.release_camera(self.handle);
    }
}

/// An enumeration of plane trackables.
pub struct ScopedPlaneList<'a> {
    runtime: &'a dyn TrackingRuntime,
    handle: TrackableListHandle,
    len: usize,
}

impl<'a> ScopedPlaneList<'a> {
    /// Acquire all plane trackables, unfiltered.
    pub fn acquire(runtime: &'a dyn TrackingRuntime) -> Self {
        let handle = runtime.acquire_planes();
        let len = runtime.trackable_list_len(handle);
        Self {
            runtime,
            handle,
            len,
        }
    }

    /// Number of planes in the list.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Acquire the plane at `index`.
    pub fn trackable(&self, index: usize) -> ScopedTrackable<'a> {
        ScopedTrackable {
            runtime: self.runtime,
            handle: self.runtime.acquire_trackable(self.handle, index),
        }
    }

    /// Iterate over the planes in list order.
    pub fn iter(&self) -> impl Iterator<Item = ScopedTrackable<'a>> + '_ {
        (0..self.len).map(move |index| self.trackable(index))
    }
}

impl Drop for ScopedPlaneList<'_> {
    fn drop(&mut self) {
        self.runtime.release_trackable_list(self.handle);
    }
}

/// A single tracked feature.
pub struct ScopedTrackable<'a> {
    runtime: &'a dyn TrackingRuntime,
    handle: TrackableHandle,
}

impl<'a> ScopedTrackable<'a> {
    /// Kind of feature this trackable represents.
    pub fn kind(&self) -> TrackableKind {
        self.runtime.trackable_kind(self.handle)
    }

    /// Tracking confidence of this trackable.
    pub fn tracking_state(&self) -> TrackingState {
        self.runtime.trackable_tracking_state(self.handle)
    }

    /// Center pose of this trackable.
    pub fn pose(&self) -> Pose {
        self.runtime.trackable_pose(self.handle)
    }

    /// The larger plane this plane was merged into, if any. A subsumed plane
    /// is no longer independently valid.
    pub fn subsuming_plane(&self) -> Option<ScopedTrackable<'a>> {
        self.runtime
            .acquire_subsuming_plane(self.handle)
            .map(|handle| ScopedTrackable {
                runtime: self.runtime,
                handle,
            })
    }
}

impl Drop for ScopedTrackable<'_> {
    fn drop(&mut self) {
        self.runtime.release_trackable(self.handle);
    }
}

/// A ranked hit-test result list, in the runtime's native
/// increasing-distance order.
pub struct ScopedHitList<'a> {
    runtime: &'a dyn TrackingRuntime,
    handle: HitListHandle,
    len: usize,
}

impl<'a> ScopedHitList<'a> {
    pub(crate) fn new(runtime: &'a dyn TrackingRuntime, handle: HitListHandle) -> Self {
        let len = runtime.hit_list_len(handle);
        Self {
            runtime,
            handle,
            len,
        }
    }

    /// Number of candidates.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the hit test returned nothing. An empty list is a valid
    /// result, not an error.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Acquire the candidate at `index`.
    pub fn hit(&self, index: usize) -> ScopedHit<'a> {
        ScopedHit {
            runtime: self.runtime,
            handle: self.runtime.acquire_hit(self.handle, index),
        }
    }

    /// Iterate over candidates in distance order.
    pub fn iter(&self) -> impl Iterator<Item = ScopedHit<'a>> + '_ {
        (0..self.len).map(move |index| self.hit(index))
    }
}

impl Drop for ScopedHitList<'_> {
    fn drop(&mut self) {
        self.runtime.release_hit_list(self.handle);
    }
}

/// A single hit-test candidate.
pub struct ScopedHit<'a> {
    runtime: &'a dyn TrackingRuntime,
    handle: HitHandle,
}

impl<'a> ScopedHit<'a> {
    /// World-space pose of the intersection.
    pub fn pose(&self) -> Pose {
        self.runtime.hit_pose(self.handle)
    }

    /// The trackable this candidate intersected, if it has one.
    pub fn trackable(&self) -> Option<ScopedTrackable<'a>> {
        self.runtime
            .acquire_hit_trackable(self.handle)
            .map(|handle| ScopedTrackable {
                runtime: self.runtime,
                handle,
            })
    }

    /// Fix a new anchor at this hit. `None` when the runtime cannot anchor
    /// it.
    pub fn create_anchor(&self) -> Option<AnchorHandle> {
        self.runtime.create_anchor(self.handle)
    }
}

impl Drop for ScopedHit<'_> {
    fn drop(&mut self) {
        self.runtime.release_hit(self.handle);
    }
}

/// This frame's point cloud.
pub struct ScopedPointCloud<'a> {
    runtime: &'a dyn TrackingRuntime,
    handle: PointCloudHandle,
}

impl<'a> ScopedPointCloud<'a> {
    /// Acquire the point cloud, if the frame has one.
    pub fn acquire(runtime: &'a dyn TrackingRuntime) -> Option<Self> {
        runtime
            .acquire_point_cloud()
            .map(|handle| Self { runtime, handle })
    }

    /// Copy out the cloud's points.
    pub fn points(&self) -> Vec<Vec3> {
        self.runtime.point_cloud_points(self.handle)
    }
}

impl Drop for ScopedPointCloud<'_> {
    fn drop(&mut self) {
        self.runtime.release_point_cloud(self.handle);
    }
}

/// This frame's depth image.
pub struct ScopedDepthImage<'a> {
    runtime: &'a dyn TrackingRuntime,
    handle: DepthImageHandle,
}

impl<'a> ScopedDepthImage<'a> {
    /// Acquire the depth image, if the frame has one.
    pub fn acquire(runtime: &'a dyn TrackingRuntime) -> Option<Self> {
        runtime
            .acquire_depth_image()
            .map(|handle| Self { runtime, handle })
    }

    /// Dimensions of the image.
    pub fn size(&self) -> (u32, u32) {
        self.runtime.depth_image_size(self.handle)
    }
}

impl Drop for ScopedDepthImage<'_> {
    fn drop(&mut self) {
        self.runtime.release_depth_image(self.handle);
    }
}
