//! Core tracking vocabulary: poses, confidence states, trackable kinds.

use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::primitives::ColorCorrection;

/// Tracking confidence reported for the camera, trackables, and anchors.
///
/// Only `Tracking` poses are reliable; everything else is stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrackingState {
    /// The feature is actively tracked and its pose is current.
    Tracking,
    /// Tracking is temporarily interrupted and may recover.
    Paused,
    /// Tracking has permanently stopped.
    Stopped,
}

/// How an instant-placement point is currently tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InstantPlacementMethod {
    /// The point has been resolved against real geometry.
    FullTracking,
    /// The point floats in screen space at an assumed distance.
    ScreenspaceWithApproximateDistance,
}

/// Kind of real-world feature a trackable represents.
///
/// This is a closed set matched exhaustively at the color-assignment and
/// spawn-eligibility sites, so adding a kind is a compile-time-checked gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrackableKind {
    /// A detected horizontal or vertical surface.
    Plane,
    /// A visual feature point.
    Point,
    /// A point sampled from the depth map.
    DepthPoint,
    /// An instant-placement point, with its current tracking method.
    InstantPlacement(InstantPlacementMethod),
}

/// A rigid transform: rotation plus translation, no scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// Orientation component.
    pub rotation: Quat,
    /// Position component in world space, meters.
    pub translation: Vec3,
}

impl Pose {
    /// The identity pose at the world origin.
    pub const IDENTITY: Self = Self {
        rotation: Quat::IDENTITY,
        translation: Vec3::ZERO,
    };

    /// Create a pose from rotation and translation.
    pub const fn new(rotation: Quat, translation: Vec3) -> Self {
        Self {
            rotation,
            translation,
        }
    }

    /// Create an unrotated pose at `translation`.
    pub const fn from_translation(translation: Vec3) -> Self {
        Self {
            rotation: Quat::IDENTITY,
            translation,
        }
    }

    /// Decode the runtime wire layout `[qx, qy, qz, qw, tx, ty, tz]`.
    pub fn from_raw(raw: [f32; 7]) -> Self {
        Self {
            rotation: Quat::from_xyzw(raw[0], raw[1], raw[2], raw[3]),
            translation: Vec3::new(raw[4], raw[5], raw[6]),
        }
    }

    /// Encode into the runtime wire layout `[qx, qy, qz, qw, tx, ty, tz]`.
    pub fn to_raw(self) -> [f32; 7] {
        [
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
            self.rotation.w,
            self.translation.x,
            self.translation.y,
            self.translation.z,
        ]
    }

    /// Get the world-space model matrix for this pose.
    pub fn to_matrix(self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.translation)
    }
}

/// Validity of a per-frame light estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LightEstimateState {
    /// The estimate carries usable color-correction coefficients.
    Valid,
    /// The estimate is not usable this frame.
    Invalid,
}

/// Per-frame ambient lighting estimate derived from the camera feed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LightEstimate {
    /// Whether the coefficients are usable.
    pub state: LightEstimateState,
    /// Color-correction coefficients reported by the runtime.
    pub color_correction: ColorCorrection,
}

impl LightEstimate {
    /// The correction to actually apply: the estimate's own coefficients when
    /// valid, the neutral identity otherwise. Invalid coefficients never
    /// propagate to rendering.
    pub fn effective_correction(&self) -> ColorCorrection {
        match self.state {
            LightEstimateState::Valid => self.color_correction,
            LightEstimateState::Invalid => ColorCorrection::NEUTRAL,
        }
    }
}

impl Default for LightEstimate {
    fn default() -> Self {
        Self {
            state: LightEstimateState::Invalid,
            color_correction: ColorCorrection::NEUTRAL,
        }
    }
}

/// Effective configuration handed to the tracking runtime.
///
/// Derived from user settings by the session lifecycle, which downgrades
/// depth when the device cannot provide it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingConfig {
    /// Depth sensing is on.
    pub depth_enabled: bool,
    /// Anchors may be placed before full environmental mapping.
    pub instant_placement_enabled: bool,
}

/// Outcome of the platform install-flow query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallStatus {
    /// The tracking runtime is installed and ready.
    Installed,
    /// Installation was requested; resume again once it completes.
    InstallRequested,
}

/// Display rotation and viewport size as reported by the platform shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayGeometry {
    /// Display rotation in degrees (0, 90, 180, 270).
    pub rotation: i32,
    /// Viewport width in pixels.
    pub width: u32,
    /// Viewport height in pixels.
    pub height: u32,
}

impl DisplayGeometry {
    /// Create a new display geometry.
    pub const fn new(rotation: i32, width: u32, height: u32) -> Self {
        Self {
            rotation,
            width,
            height,
        }
    }

    /// Geometric center of the viewport in pixel coordinates.
    pub fn center(&self) -> (f32, f32) {
        (self.width as f32 / 2.0, self.height as f32 / 2.0)
    }
}

impl Default for DisplayGeometry {
    fn default() -> Self {
        Self::new(0, 0, 0)
    }
}
