//! Placed-object lifecycle: storage, spawning, touch interaction, coloring.

pub mod color;
pub mod spawner;
pub mod store;
pub mod touch;

pub use color::{initial_color, TOUCH_EVEN_COLOR, TOUCH_ODD_COLOR};
pub use spawner::spawn_at_screen_center;
pub use store::{AnchorStore, PlacedObject, PlacedObjectInfo, MAX_PLACED_OBJECTS};
pub use touch::{resolve_touch, TOUCH_PROXIMITY_METERS};
