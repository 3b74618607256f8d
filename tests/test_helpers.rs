#![allow(dead_code)]
//! Shared fixtures for the integration tests: a recording render sink and
//! scripted-world staging helpers.

use aranchor::render::RenderSink;
use aranchor::tracking::{
    ScopedDepthImage, ScriptedHit, ScriptedPlatform, ScriptedTrackable, ScriptedWorld,
};
use aranchor::{ArApp, ColorCorrection, Pose, Rgba};
use glam::{Mat3, Mat4, Vec3};

/// Texture id the recording sink hands out for the camera background.
pub const CAMERA_TEXTURE_ID: u32 = 7;

/// World position of the staged screen-center hit, half a meter in front of
/// the camera.
pub const SPAWN_HIT_POSITION: Vec3 = Vec3::new(0.0, 0.0, -0.5);

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawEvent {
    /// The camera background was drawn.
    Background,
    /// A plane was drawn with the given model matrix.
    Plane { model: Mat4 },
    /// A placed object was drawn.
    PlacedObject {
        model: Mat4,
        color_correction: ColorCorrection,
        color: Rgba,
    },
    /// A point cloud was drawn.
    PointCloud { points: usize },
}

/// Render sink that records every call for assertions.
#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<DrawEvent>,
    pub uv_transforms: Vec<Mat3>,
    pub depth_updates: usize,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn planes_drawn(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, DrawEvent::Plane { .. }))
            .count()
    }

    pub fn objects_drawn(&self) -> Vec<(Rgba, ColorCorrection)> {
        self.events
            .iter()
            .filter_map(|event| match event {
                DrawEvent::PlacedObject {
                    color,
                    color_correction,
                    ..
                } => Some((*color, *color_correction)),
                _ => None,
            })
            .collect()
    }

    pub fn point_clouds_drawn(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, DrawEvent::PointCloud { .. }))
            .count()
    }
}

impl RenderSink for RecordingSink {
    fn camera_texture_id(&self) -> u32 {
        CAMERA_TEXTURE_ID
    }

    fn set_uv_transform(&mut self, transform: Mat3) {
        self.uv_transforms.push(transform);
    }

    fn update_depth_image(&mut self, _image: &ScopedDepthImage<'_>) {
        self.depth_updates += 1;
    }

    fn draw_background(&mut self) {
        self.events.push(DrawEvent::Background);
    }

    fn draw_plane(&mut self, _projection: Mat4, _view: Mat4, model: Mat4) {
        self.events.push(DrawEvent::Plane { model });
    }

    fn draw_placed_object(
        &mut self,
        _projection: Mat4,
        _view: Mat4,
        model: Mat4,
        color_correction: ColorCorrection,
        color: Rgba,
    ) {
        self.events.push(DrawEvent::PlacedObject {
            model,
            color_correction,
            color,
        });
    }

    fn draw_point_cloud(&mut self, _view_projection: Mat4, points: &[Vec3]) {
        self.events.push(DrawEvent::PointCloud {
            points: points.len(),
        });
    }
}

/// Initialize test logging once; later calls are no-ops.
pub fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A fresh scripted world with an app wired to it through a scripted
/// platform.
pub fn scripted_app() -> (ScriptedWorld, ArApp) {
    let world = ScriptedWorld::new();
    let app = ArApp::new(Box::new(ScriptedPlatform::new(world.clone())));
    (world, app)
}

/// Stage one tracking plane with a screen-center hit resting on it. Returns
/// the staged trackable's index.
pub fn stage_plane_hit(world: &ScriptedWorld) -> usize {
    let plane = world.add_trackable(ScriptedTrackable::plane(Pose::from_translation(Vec3::new(
        0.0, -0.1, -0.5,
    ))));
    world.script_hits(vec![ScriptedHit::on_trackable(
        Pose::from_translation(SPAWN_HIT_POSITION),
        plane,
    )]);
    plane
}

/// Stage a plane hit and place the initial object on it. The app must
/// already be resumed. Returns the staged trackable's index.
pub fn place_initial_object(world: &ScriptedWorld, app: &ArApp) -> usize {
    let plane = stage_plane_hit(world);
    app.on_display_geometry_changed(0, 1000, 2000);
    assert!(
        app.spawn_at_screen_center(),
        "expected the initial spawn to succeed"
    );
    plane
}
