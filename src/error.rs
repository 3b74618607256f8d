//! Error taxonomy for session bring-up and per-frame operations.
//!
//! Bring-up failures are surfaced to the caller because the app cannot render
//! without a session. Per-frame failures are absorbed by the frame driver,
//! which logs them and retries on the next tick.

use thiserror::Error;

/// Errors raised while creating, configuring, or resuming a tracking session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Installation of the tracking runtime was requested. Recoverable:
    /// call resume again once installation completes.
    #[error("tracking runtime installation requested; retry resume once it completes")]
    InstallRequired,

    /// The install flow itself could not run.
    #[error("tracking runtime unavailable: {0}")]
    InstallFailed(String),

    /// Session creation failed, typically device incompatibility.
    #[error("failed to create tracking session: {0}")]
    CreateFailed(String),

    /// The runtime rejected the requested configuration.
    #[error("failed to configure tracking session: {0}")]
    ConfigureFailed(String),

    /// The session could not be resumed.
    #[error("failed to resume tracking session: {0}")]
    ResumeFailed(String),
}

/// Recoverable per-frame failures.
#[derive(Debug, Error)]
pub enum FrameError {
    /// Advancing the session to the next frame failed; the tick is skipped
    /// and the previous output stays on screen.
    #[error("frame update failed: {0}")]
    UpdateFailed(String),
}
