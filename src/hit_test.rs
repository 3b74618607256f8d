//! Screen-coordinate hit testing against tracked geometry.

use crate::tracking::{ScopedHitList, TrackingRuntime};

/// Assumed distance from the camera to the surface the user is aiming at,
/// used while an instant-placement point is still tracked in screen space.
/// Values in the 0.2 - 2.0 meter range suit most experiences; this one
/// assumes the user is placing objects roughly at arm's length.
pub const APPROXIMATE_DISTANCE_METERS: f32 = 1.0;

/// Ray-cast the screen coordinate `(x, y)` against tracked geometry.
///
/// Candidates come back in the runtime's native increasing-distance order;
/// no re-sorting happens here. An empty list is a valid result. When instant
/// placement is enabled the dedicated hit-test entry point is used so
/// instant-placement points can appear among the candidates.
pub fn resolve_hits<'a>(
    runtime: &'a dyn TrackingRuntime,
    instant_placement_enabled: bool,
    x: f32,
    y: f32,
) -> ScopedHitList<'a> {
    let handle = if instant_placement_enabled {
        runtime.hit_test_instant_placement(x, y, APPROXIMATE_DISTANCE_METERS)
    } else {
        runtime.hit_test(x, y)
    };
    ScopedHitList::new(runtime, handle)
}
