//! Touch resolution against placed objects.

use crate::anchor::store::AnchorStore;
use crate::hit_test::resolve_hits;
use crate::tracking::{TrackingRuntime, TrackingState};

/// Euclidean distance under which a hit position counts as touching an
/// existing object.
pub const TOUCH_PROXIMITY_METERS: f32 = 0.10;

/// Match a touch at screen coordinate `(x, y)` against the placed objects.
///
/// Candidates are walked in distance order; the first object within
/// [`TOUCH_PROXIMITY_METERS`] of a candidate's hit position takes the touch,
/// and resolution stops there. Objects whose anchors are not currently
/// tracking cannot be touched. Touching never creates objects, and a touch
/// that matches nothing leaves the store untouched.
pub fn resolve_touch(
    runtime: &dyn TrackingRuntime,
    instant_placement_enabled: bool,
    store: &mut AnchorStore,
    x: f32,
    y: f32,
) {
    // Nothing placed means nothing to touch; skip the hit test entirely.
    if store.is_empty() {
        return;
    }

    let hits = resolve_hits(runtime, instant_placement_enabled, x, y);
    for hit in hits.iter() {
        let hit_position = hit.pose().translation;
        for object in store.objects_mut() {
            if runtime.anchor_tracking_state(object.anchor()) != TrackingState::Tracking {
                continue;
            }
            let anchor_position = runtime.anchor_pose(object.anchor()).translation;
            if anchor_position.distance(hit_position) < TOUCH_PROXIMITY_METERS {
                object.register_touch();
                // First match wins; one touch mutates at most one object.
                return;
            }
        }
    }
}
