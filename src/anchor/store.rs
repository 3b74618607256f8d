//! Placed-object ownership and interaction state.

use crate::anchor::color::{initial_color, TOUCH_EVEN_COLOR, TOUCH_ODD_COLOR};
use crate::primitives::Rgba;
use crate::tracking::{AnchorHandle, TrackableKind, TrackingRuntime};

/// Most placed objects a session will ever hold.
pub const MAX_PLACED_OBJECTS: usize = 20;

/// A virtual object anchored to a real-world surface.
///
/// Owns its anchor for the lifetime of the session. Color belongs to the
/// touch and spawn logic: it is assigned from the originating trackable kind
/// once at creation and thereafter mutated only by touches, never re-derived.
pub struct PlacedObject {
    anchor: AnchorHandle,
    kind: TrackableKind,
    color: Rgba,
    touch_count: u32,
}

impl PlacedObject {
    /// Wrap a freshly created anchor. The object starts untouched, colored
    /// by the kind of trackable it was placed on.
    pub fn new(anchor: AnchorHandle, kind: TrackableKind) -> Self {
        Self {
            anchor,
            kind,
            color: initial_color(kind),
            touch_count: 0,
        }
    }

    /// The owned anchor.
    pub fn anchor(&self) -> AnchorHandle {
        self.anchor
    }

    /// Kind of trackable the object was placed on.
    pub fn kind(&self) -> TrackableKind {
        self.kind
    }

    /// Current display color.
    pub fn color(&self) -> Rgba {
        self.color
    }

    /// Number of times the object has been touched.
    pub fn touch_count(&self) -> u32 {
        self.touch_count
    }

    /// Count a touch and toggle the color by parity: odd touches red, even
    /// touches green.
    pub(crate) fn register_touch(&mut self) {
        self.touch_count += 1;
        self.color = if self.touch_count % 2 != 0 {
            TOUCH_ODD_COLOR
        } else {
            TOUCH_EVEN_COLOR
        };
    }
}

/// Read-only snapshot of one placed object, for UI and status surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedObjectInfo {
    /// Kind of trackable the object was placed on.
    pub kind: TrackableKind,
    /// Current display color.
    pub color: Rgba,
    /// Number of times the object has been touched.
    pub touch_count: u32,
}

/// Exclusive owner of every placed object.
#[derive(Default)]
pub struct AnchorStore {
    objects: Vec<PlacedObject>,
}

impl AnchorStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
        }
    }

    /// Number of placed objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether no objects have been placed.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Whether the store is at capacity.
    pub fn is_full(&self) -> bool {
        self.objects.len() >= MAX_PLACED_OBJECTS
    }

    /// The placed objects, in placement order.
    pub fn objects(&self) -> &[PlacedObject] {
        &self.objects
    }

    pub(crate) fn objects_mut(&mut self) -> &mut [PlacedObject] {
        &mut self.objects
    }

    /// Append an object unless the store is at capacity. Returns whether the
    /// object was accepted; rejection is silent by design, the caller still
    /// owns the anchor.
    pub fn try_push(&mut self, object: PlacedObject) -> bool {
        if self.is_full() {
            return false;
        }
        self.objects.push(object);
        true
    }

    /// Snapshot of every object's kind, color, and touch count.
    pub fn snapshot(&self) -> Vec<PlacedObjectInfo> {
        self.objects
            .iter()
            .map(|object| PlacedObjectInfo {
                kind: object.kind(),
                color: object.color(),
                touch_count: object.touch_count(),
            })
            .collect()
    }

    /// Release every owned anchor back to the runtime and empty the store.
    /// Called at session teardown; anchors do not outlive their session.
    pub fn release_all(&mut self, runtime: &dyn TrackingRuntime) {
        for object in self.objects.drain(..) {
            runtime.release_anchor(object.anchor);
        }
    }
}
