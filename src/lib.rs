//! AR session, frame-loop, and anchor lifecycle engine.
//!
//! This crate coordinates an augmented-reality session: it owns the tracking
//! session's lifecycle, pulls camera pose, surface, light, and depth state
//! from a pluggable tracking runtime every frame, keeps a small set of
//! user-placed objects anchored to real-world surfaces, and dispatches
//! depth-aware draw calls to a pluggable render sink. Rendering itself and
//! the platform shell are collaborators behind traits; the crate ships a
//! scripted runtime so the whole loop can be driven off-device.

#![warn(missing_docs)]

pub mod anchor;
pub mod app;
pub mod error;
pub mod hit_test;
pub mod primitives;
pub mod render;
pub mod session;
pub mod tracking;

pub use anchor::{AnchorStore, PlacedObject, PlacedObjectInfo, MAX_PLACED_OBJECTS};
pub use app::ArApp;
pub use error::{FrameError, SessionError};
pub use primitives::{ColorCorrection, Rgba};
pub use render::RenderSink;
pub use session::{FrameDriver, SessionConfig, SessionLifecycle, SessionState};
pub use tracking::{
    AnchorHandle, DisplayGeometry, InstallStatus, InstantPlacementMethod, LightEstimate,
    LightEstimateState, Pose, TrackableKind, TrackingConfig, TrackingPlatform, TrackingRuntime,
    TrackingState,
};
