//! Per-tick frame driving: acquire tracking state, filter it, draw it.

use glam::{Mat3, Vec3};

use crate::anchor::AnchorStore;
use crate::render::RenderSink;
use crate::session::lifecycle::SessionLifecycle;
use crate::tracking::{
    ScopedCamera, ScopedDepthImage, ScopedPlaneList, ScopedPointCloud, TrackingRuntime,
    TrackingState,
};

/// Near clip plane for the camera projection.
const NEAR_CLIP: f32 = 0.1;
/// Far clip plane for the camera projection.
const FAR_CLIP: f32 = 100.0;

/// Drives one render tick: pulls camera pose, tracking state, light estimate,
/// depth, and trackables from the session, and dispatches draw calls to the
/// render sink, skipping work while tracking is unreliable.
#[derive(Default)]
pub struct FrameDriver {
    uv_transform: Option<Mat3>,
    tracked_plane_count: usize,
}

impl FrameDriver {
    /// Create a driver with no cached state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Planes drawn on the most recent tick, after subsumption and
    /// tracking-state filtering.
    pub fn tracked_plane_count(&self) -> usize {
        self.tracked_plane_count
    }

    /// Forget the cached UV transform so the next tick recomputes it, e.g.
    /// after the render surface is recreated.
    pub(crate) fn invalidate_uv_transform(&mut self) {
        self.uv_transform = None;
    }

    /// Run one frame tick.
    ///
    /// Failure paths have no side effects beyond logging: an update failure
    /// skips the tick and leaves the previous output on screen, and loss of
    /// camera tracking stops after the background so no stale poses are
    /// drawn.
    pub fn draw_frame(
        &mut self,
        lifecycle: &SessionLifecycle,
        store: &AnchorStore,
        sink: &mut dyn RenderSink,
    ) {
        // No session yet is a valid pre-AR state; render nothing.
        let Some(runtime) = lifecycle.runtime() else {
            return;
        };

        runtime.set_camera_texture(sink.camera_texture_id());

        if let Err(error) = runtime.update() {
            log::error!("skipping frame: {error}");
            return;
        }

        let camera = ScopedCamera::acquire(runtime);

        // The UV transform is a cache invalidated by geometry changes, not
        // something to rederive every frame.
        if runtime.display_geometry_changed() || self.uv_transform.is_none() {
            let transform = texture_transform_matrix(runtime);
            self.uv_transform = Some(transform);
            sink.set_uv_transform(transform);
        }

        let view = camera.view_matrix();
        let projection = camera.projection_matrix(NEAR_CLIP, FAR_CLIP);

        sink.draw_background();

        // Without camera tracking, every other pose would be meaningless.
        let camera_state = camera.tracking_state();
        drop(camera);
        if camera_state != TrackingState::Tracking {
            return;
        }

        if runtime.supports_depth() {
            if let Some(depth) = ScopedDepthImage::acquire(runtime) {
                sink.update_depth_image(&depth);
            }
        }

        let color_correction = runtime.light_estimate().effective_correction();

        self.tracked_plane_count = 0;
        {
            let planes = ScopedPlaneList::acquire(runtime);
            for plane in planes.iter() {
                // A plane absorbed into a larger one is not independently
                // valid any more.
                if plane.subsuming_plane().is_some() {
                    continue;
                }
                if plane.tracking_state() != TrackingState::Tracking {
                    continue;
                }
                sink.draw_plane(projection, view, plane.pose().to_matrix());
                self.tracked_plane_count += 1;
            }
        }

        for object in store.objects() {
            if runtime.anchor_tracking_state(object.anchor()) != TrackingState::Tracking {
                continue;
            }
            let model = runtime.anchor_pose(object.anchor()).to_matrix();
            sink.draw_placed_object(projection, view, model, color_correction, object.color());
        }

        if let Some(cloud) = ScopedPointCloud::acquire(runtime) {
            sink.draw_point_cloud(projection * view, &cloud.points());
        }
    }
}

/// Derive the affine NDC-to-texture transform from the runtime's coordinate
/// mapping. Knowing the size of each pixel lets object shaders run
/// kernel-based effects against the background texture.
fn texture_transform_matrix(runtime: &dyn TrackingRuntime) -> Mat3 {
    // The origin and unit points along the two principal axes, in NDC.
    let ndc_basis = [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]];
    let mapped = runtime.transform_ndc_basis(ndc_basis);
    let origin = mapped[0];
    Mat3::from_cols(
        Vec3::new(mapped[1][0] - origin[0], mapped[1][1] - origin[1], 0.0),
        Vec3::new(mapped[2][0] - origin[0], mapped[2][1] - origin[1], 0.0),
        Vec3::new(origin[0], origin[1], 1.0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracking::{ScriptedRuntime, ScriptedWorld};

    #[test]
    fn test_texture_transform_identity_mapping() {
        let world = ScriptedWorld::new();
        let runtime = ScriptedRuntime::new(world);
        let transform = texture_transform_matrix(&runtime);
        assert_eq!(transform, Mat3::IDENTITY);
    }

    #[test]
    fn test_texture_transform_rotated_mapping() {
        let world = ScriptedWorld::new();
        // Origin maps to (1, 0); x axis to (1, 1); y axis to (0, 0).
        world.set_texture_mapping([[1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]);
        let runtime = ScriptedRuntime::new(world);
        let transform = texture_transform_matrix(&runtime);
        let expected = Mat3::from_cols(
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(-1.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 1.0),
        );
        assert_eq!(transform, expected);
    }
}
