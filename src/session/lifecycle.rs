//! Tracking-session ownership and state transitions.

use serde::{Deserialize, Serialize};

use crate::anchor::AnchorStore;
use crate::error::SessionError;
use crate::tracking::{
    DisplayGeometry, InstallStatus, TrackingConfig, TrackingPlatform, TrackingRuntime,
};

/// User-tunable session settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Request depth sensing. Silently downgraded when the device cannot
    /// provide it.
    pub depth_enabled: bool,
    /// Allow placement before full environmental mapping.
    pub instant_placement_enabled: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            depth_enabled: true,
            instant_placement_enabled: true,
        }
    }
}

/// Lifecycle states of the tracking session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No session exists yet. A valid pre-AR state, not an error.
    Uninitialized,
    /// The session exists but has not been configured.
    Created,
    /// The session is configured and ready to resume.
    Configured,
    /// The session is actively tracking.
    Resumed,
    /// Tracking is suspended; placed objects survive.
    Paused,
    /// Terminal. The session and its frame buffer have been released.
    Destroyed,
}

/// Exclusive owner of the tracking session.
///
/// One lifecycle exists per app lifetime. It drives the
/// `Uninitialized -> Created -> Configured -> Resumed <-> Paused -> Destroyed`
/// state machine, remembers display geometry seen before a session exists,
/// and is the caller-level guard that keeps an already-resumed session from
/// being resumed twice.
pub struct SessionLifecycle {
    runtime: Option<Box<dyn TrackingRuntime>>,
    state: SessionState,
    config: SessionConfig,
    install_requested: bool,
    display: DisplayGeometry,
}

impl SessionLifecycle {
    /// Create a lifecycle with the given settings and no session.
    pub fn new(config: SessionConfig) -> Self {
        Self {
            runtime: None,
            state: SessionState::Uninitialized,
            config,
            install_requested: false,
            display: DisplayGeometry::default(),
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Current user settings.
    pub fn config(&self) -> SessionConfig {
        self.config
    }

    /// Last display geometry reported by the shell.
    pub fn display_geometry(&self) -> DisplayGeometry {
        self.display
    }

    /// The live tracking runtime, if a session exists.
    pub fn runtime(&self) -> Option<&dyn TrackingRuntime> {
        self.runtime.as_deref()
    }

    /// Bring the session up (creating and configuring it first if needed)
    /// and resume tracking.
    ///
    /// Returns [`SessionError::InstallRequired`] when the tracking runtime
    /// had to be installed first; call again once installation completes.
    /// Resuming an already-resumed session is a logged no-op.
    pub fn resume(&mut self, platform: &mut dyn TrackingPlatform) -> Result<(), SessionError> {
        match self.state {
            SessionState::Resumed => {
                log::info!("resume ignored: session is already resumed");
                return Ok(());
            }
            SessionState::Destroyed => {
                return Err(SessionError::ResumeFailed(
                    "session lifecycle is destroyed".to_string(),
                ));
            }
            _ => {}
        }

        if self.runtime.is_none() {
            self.create_and_configure(platform)?;
        }

        let runtime = self.runtime.as_deref().ok_or_else(|| {
            SessionError::ResumeFailed("tracking session missing after creation".to_string())
        })?;
        runtime.resume()?;
        self.state = SessionState::Resumed;
        log::info!("tracking session resumed");
        Ok(())
    }

    fn create_and_configure(
        &mut self,
        platform: &mut dyn TrackingPlatform,
    ) -> Result<(), SessionError> {
        // Only the first attempt of the app lifetime counts as user
        // initiated; retries after an install flow pass false.
        let user_requested = !self.install_requested;
        match platform.request_install(user_requested)? {
            InstallStatus::InstallRequested => {
                self.install_requested = true;
                log::info!("tracking runtime installation requested");
                return Err(SessionError::InstallRequired);
            }
            InstallStatus::Installed => {}
        }

        let runtime = platform.create_session()?;
        self.runtime = Some(runtime);
        self.state = SessionState::Created;
        log::info!("tracking session created");

        self.reconfigure()?;

        // Geometry the shell reported before the session existed applies now.
        if let Some(runtime) = self.runtime.as_deref() {
            runtime.set_display_geometry(self.display);
        }
        Ok(())
    }

    /// (Re)apply configuration to the live session. Depth is downgraded to
    /// off when the device cannot provide it rather than failing. A no-op
    /// until a session exists.
    pub fn reconfigure(&mut self) -> Result<(), SessionError> {
        let Some(runtime) = self.runtime.as_deref() else {
            return Ok(());
        };
        let config = TrackingConfig {
            depth_enabled: self.config.depth_enabled && runtime.supports_depth(),
            instant_placement_enabled: self.config.instant_placement_enabled,
        };
        runtime.configure(&config)?;
        if self.state == SessionState::Created {
            self.state = SessionState::Configured;
        }
        Ok(())
    }

    /// Suspend tracking. Safe to call at any time, in any state; placed
    /// objects are not invalidated.
    pub fn pause(&mut self) {
        log::info!("pausing tracking session");
        if let Some(runtime) = self.runtime.as_deref() {
            runtime.pause();
            if self.state == SessionState::Resumed {
                self.state = SessionState::Paused;
            }
        }
    }

    /// Update the instant-placement setting, reconfiguring the live session
    /// if one exists.
    pub fn set_instant_placement(&mut self, enabled: bool) -> Result<(), SessionError> {
        self.config.instant_placement_enabled = enabled;
        self.reconfigure()
    }

    /// Record new display geometry and propagate it to the live session.
    /// Without a session the geometry is remembered and applied at creation.
    pub fn set_display_geometry(&mut self, geometry: DisplayGeometry) {
        self.display = geometry;
        if let Some(runtime) = self.runtime.as_deref() {
            runtime.set_display_geometry(geometry);
        }
    }

    /// Terminal teardown: releases every placed anchor, then the session and
    /// its frame buffer together.
    pub fn destroy(&mut self, store: &mut AnchorStore) {
        if let Some(runtime) = self.runtime.take() {
            store.release_all(runtime.as_ref());
        }
        self.state = SessionState::Destroyed;
        log::info!("tracking session destroyed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracking::{ScriptedPlatform, ScriptedWorld};

    fn lifecycle() -> (ScriptedWorld, ScriptedPlatform, SessionLifecycle) {
        let world = ScriptedWorld::new();
        let platform = ScriptedPlatform::new(world.clone());
        let lifecycle = SessionLifecycle::new(SessionConfig::default());
        (world, platform, lifecycle)
    }

    #[test]
    fn test_resume_walks_the_state_machine() {
        let (world, mut platform, mut lifecycle) = lifecycle();
        assert_eq!(lifecycle.state(), SessionState::Uninitialized);
        lifecycle.resume(&mut platform).unwrap();
        assert_eq!(lifecycle.state(), SessionState::Resumed);
        assert_eq!(world.sessions_created(), 1);
        assert_eq!(world.resume_count(), 1);
    }

    #[test]
    fn test_double_resume_is_a_no_op() {
        let (world, mut platform, mut lifecycle) = lifecycle();
        lifecycle.resume(&mut platform).unwrap();
        lifecycle.resume(&mut platform).unwrap();
        assert_eq!(world.resume_count(), 1);
    }

    #[test]
    fn test_pause_resume_cycle() {
        let (world, mut platform, mut lifecycle) = lifecycle();
        lifecycle.resume(&mut platform).unwrap();
        lifecycle.pause();
        assert_eq!(lifecycle.state(), SessionState::Paused);
        lifecycle.resume(&mut platform).unwrap();
        assert_eq!(lifecycle.state(), SessionState::Resumed);
        // The session is created once and resumed twice.
        assert_eq!(world.sessions_created(), 1);
        assert_eq!(world.resume_count(), 2);
    }

    #[test]
    fn test_pause_before_session_is_safe() {
        let (world, _platform, mut lifecycle) = lifecycle();
        lifecycle.pause();
        assert_eq!(lifecycle.state(), SessionState::Uninitialized);
        assert_eq!(world.pause_count(), 0);
    }

    #[test]
    fn test_destroyed_is_terminal() {
        let (_world, mut platform, mut lifecycle) = lifecycle();
        lifecycle.resume(&mut platform).unwrap();
        let mut store = AnchorStore::new();
        lifecycle.destroy(&mut store);
        assert_eq!(lifecycle.state(), SessionState::Destroyed);
        assert!(matches!(
            lifecycle.resume(&mut platform),
            Err(SessionError::ResumeFailed(_))
        ));
    }

    #[test]
    fn test_destroy_drops_session_and_frame_together() {
        let (world, mut platform, mut lifecycle) = lifecycle();
        lifecycle.resume(&mut platform).unwrap();
        let mut store = AnchorStore::new();
        lifecycle.destroy(&mut store);
        assert_eq!(world.sessions_dropped(), 1);
    }
}
