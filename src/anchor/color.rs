//! Color rules for placed objects.

use crate::primitives::Rgba;
use crate::tracking::{InstantPlacementMethod, TrackableKind};

/// Color of an object whose touch count is odd.
pub const TOUCH_ODD_COLOR: Rgba = Rgba::new(255, 0, 0, 255);

/// Color of an object whose touch count is even and nonzero.
pub const TOUCH_EVEN_COLOR: Rgba = Rgba::new(0, 255, 0, 255);

/// Deterministic type-based color, evaluated once when an object is spawned.
///
/// The color tells the user what kind of surface the object was placed on.
/// The match is exhaustive on purpose: a new trackable kind must pick a color
/// here before the crate compiles again.
pub fn initial_color(kind: TrackableKind) -> Rgba {
    match kind {
        // Blue for feature points.
        TrackableKind::Point => Rgba::new(66, 133, 244, 255),
        // Green for detected planes.
        TrackableKind::Plane => Rgba::new(139, 195, 74, 255),
        // Red for depth points.
        TrackableKind::DepthPoint => Rgba::new(199, 8, 65, 255),
        // Pale yellow once instant placement has resolved real geometry.
        TrackableKind::InstantPlacement(InstantPlacementMethod::FullTracking) => {
            Rgba::new(255, 255, 137, 255)
        }
        // White while instant placement is still screen-space approximate.
        TrackableKind::InstantPlacement(
            InstantPlacementMethod::ScreenspaceWithApproximateDistance,
        ) => Rgba::new(255, 255, 255, 255),
    }
}
