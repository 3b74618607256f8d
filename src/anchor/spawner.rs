//! Screen-center anchor spawning.

use crate::anchor::store::{AnchorStore, PlacedObject};
use crate::hit_test::resolve_hits;
use crate::tracking::{DisplayGeometry, ScopedCamera, TrackableKind, TrackingRuntime, TrackingState};

/// Place the initial object at the geometric center of the screen.
///
/// Does nothing when an object already exists or the store is at capacity.
/// Requires the camera to be tracking; otherwise the attempt is logged and
/// skipped, to be retried on a later call. Candidates are scanned in distance
/// order and the first one resting on a tracking plane or instant-placement
/// point is anchored. Returns whether an object was placed; finding no
/// eligible surface is a valid outcome, not an error.
pub fn spawn_at_screen_center(
    runtime: &dyn TrackingRuntime,
    instant_placement_enabled: bool,
    store: &mut AnchorStore,
    geometry: DisplayGeometry,
) -> bool {
    // Automatic spawning only ever places the first object.
    if !store.is_empty() {
        return false;
    }
    if store.is_full() {
        return false;
    }

    {
        let camera = ScopedCamera::acquire(runtime);
        if camera.tracking_state() != TrackingState::Tracking {
            log::debug!("spawn skipped: camera is not tracking");
            return false;
        }
    }

    let (center_x, center_y) = geometry.center();
    let hits = resolve_hits(runtime, instant_placement_enabled, center_x, center_y);
    for hit in hits.iter() {
        let Some(trackable) = hit.trackable() else {
            continue;
        };
        let kind = trackable.kind();
        if !matches!(
            kind,
            TrackableKind::Plane | TrackableKind::InstantPlacement(_)
        ) {
            continue;
        }
        if trackable.tracking_state() != TrackingState::Tracking {
            continue;
        }
        // The runtime may refuse to anchor this hit; try the next candidate.
        let Some(anchor) = hit.create_anchor() else {
            continue;
        };
        if !store.try_push(PlacedObject::new(anchor, kind)) {
            runtime.release_anchor(anchor);
            return false;
        }
        return true;
    }

    false
}
