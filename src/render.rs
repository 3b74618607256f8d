//! Render sink seam.
//!
//! The session core decides *what* to draw each frame; a [`RenderSink`]
//! implementation decides *how*. The sink owns no AR state: it receives
//! matrices, colors, and borrowed per-frame data and is free to upload them
//! however it likes.

use glam::{Mat3, Mat4, Vec3};

use crate::primitives::{ColorCorrection, Rgba};
use crate::tracking::ScopedDepthImage;

/// Receives the draw calls produced by one frame tick.
pub trait RenderSink {
    /// GL texture name the camera background feed should be decoded into.
    fn camera_texture_id(&self) -> u32;

    /// Cache the screenspace-to-texture UV transform. Called only when
    /// display geometry changed or on the first frame, never per tick.
    fn set_uv_transform(&mut self, transform: Mat3);

    /// Upload this frame's depth image for occlusion.
    fn update_depth_image(&mut self, image: &ScopedDepthImage<'_>);

    /// Draw the camera background.
    fn draw_background(&mut self);

    /// Draw one detected plane.
    fn draw_plane(&mut self, projection: Mat4, view: Mat4, model: Mat4);

    /// Draw one placed object with its current color and this frame's
    /// color correction.
    fn draw_placed_object(
        &mut self,
        projection: Mat4,
        view: Mat4,
        model: Mat4,
        color_correction: ColorCorrection,
        color: Rgba,
    );

    /// Draw this frame's point cloud.
    fn draw_point_cloud(&mut self, view_projection: Mat4, points: &[Vec3]);
}
