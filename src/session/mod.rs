//! Session ownership and the per-frame render loop.

pub mod frame;
pub mod lifecycle;

pub use frame::FrameDriver;
pub use lifecycle::{SessionConfig, SessionLifecycle, SessionState};
