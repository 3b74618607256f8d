//! Application façade wiring the platform shell to the session core.

use parking_lot::Mutex;

use crate::anchor::{resolve_touch, spawn_at_screen_center, AnchorStore, PlacedObjectInfo};
use crate::error::SessionError;
use crate::render::RenderSink;
use crate::session::{FrameDriver, SessionConfig, SessionLifecycle, SessionState};
use crate::tracking::{DisplayGeometry, TrackingPlatform};

struct Inner {
    platform: Box<dyn TrackingPlatform>,
    lifecycle: SessionLifecycle,
    driver: FrameDriver,
    store: AnchorStore,
}

/// The AR application core.
///
/// Owns the session lifecycle, frame driver, and anchor store behind a single
/// mutex, so render ticks and input callbacks stay serialized even when the
/// platform delivers them from different threads. Every callback tolerates
/// arriving before a session exists.
pub struct ArApp {
    inner: Mutex<Inner>,
}

impl ArApp {
    /// Create an app with default settings.
    pub fn new(platform: Box<dyn TrackingPlatform>) -> Self {
        Self::with_config(platform, SessionConfig::default())
    }

    /// Create an app with explicit settings.
    pub fn with_config(platform: Box<dyn TrackingPlatform>, config: SessionConfig) -> Self {
        Self {
            inner: Mutex::new(Inner {
                platform,
                lifecycle: SessionLifecycle::new(config),
                driver: FrameDriver::new(),
                store: AnchorStore::new(),
            }),
        }
    }

    /// The shell is resuming. Creates and configures the session on first
    /// call; returns [`SessionError::InstallRequired`] when the tracking
    /// runtime still has to be installed, in which case the shell calls
    /// again after installation.
    pub fn on_resume(&self) -> Result<(), SessionError> {
        let mut inner = self.inner.lock();
        let Inner {
            platform,
            lifecycle,
            ..
        } = &mut *inner;
        lifecycle.resume(platform.as_mut())
    }

    /// The shell is pausing. Safe in any state.
    pub fn on_pause(&self) {
        self.inner.lock().lifecycle.pause();
    }

    /// The render surface was (re)created; cached render-facing state is
    /// recomputed on the next tick.
    pub fn on_surface_created(&self) {
        log::info!("render surface created");
        self.inner.lock().driver.invalidate_uv_transform();
    }

    /// The display rotated or was resized.
    pub fn on_display_geometry_changed(&self, rotation: i32, width: u32, height: u32) {
        self.inner
            .lock()
            .lifecycle
            .set_display_geometry(DisplayGeometry::new(rotation, width, height));
    }

    /// The user changed the instant-placement setting.
    pub fn on_settings_changed(&self, instant_placement_enabled: bool) -> Result<(), SessionError> {
        self.inner
            .lock()
            .lifecycle
            .set_instant_placement(instant_placement_enabled)
    }

    /// Run one render tick against the given sink.
    pub fn on_draw_frame(&self, sink: &mut dyn RenderSink) {
        let mut inner = self.inner.lock();
        let Inner {
            lifecycle,
            driver,
            store,
            ..
        } = &mut *inner;
        driver.draw_frame(lifecycle, store, sink);
    }

    /// The user touched the screen at pixel coordinate `(x, y)`. Only ever
    /// recolors an existing object; never creates one.
    pub fn on_touch(&self, x: f32, y: f32) {
        let mut inner = self.inner.lock();
        let Inner {
            lifecycle, store, ..
        } = &mut *inner;
        let Some(runtime) = lifecycle.runtime() else {
            return;
        };
        resolve_touch(
            runtime,
            lifecycle.config().instant_placement_enabled,
            store,
            x,
            y,
        );
    }

    /// Place the initial object at the screen center. Returns whether an
    /// object was placed; retryable on a later tick when it was not.
    pub fn spawn_at_screen_center(&self) -> bool {
        let mut inner = self.inner.lock();
        let Inner {
            lifecycle, store, ..
        } = &mut *inner;
        let Some(runtime) = lifecycle.runtime() else {
            return false;
        };
        spawn_at_screen_center(
            runtime,
            lifecycle.config().instant_placement_enabled,
            store,
            lifecycle.display_geometry(),
        )
    }

    /// Current lifecycle state.
    pub fn session_state(&self) -> SessionState {
        self.inner.lock().lifecycle.state()
    }

    /// Number of placed objects.
    pub fn placed_object_count(&self) -> usize {
        self.inner.lock().store.len()
    }

    /// Snapshot of every placed object's kind, color, and touch count.
    pub fn placed_objects(&self) -> Vec<PlacedObjectInfo> {
        self.inner.lock().store.snapshot()
    }

    /// Planes drawn on the most recent tick; the shell uses this to drop its
    /// "searching for surfaces" hint.
    pub fn tracked_plane_count(&self) -> usize {
        self.inner.lock().driver.tracked_plane_count()
    }

    /// Tear the session down, releasing placed anchors and the session
    /// itself. Terminal.
    pub fn shutdown(&self) {
        let mut inner = self.inner.lock();
        let Inner {
            lifecycle, store, ..
        } = &mut *inner;
        lifecycle.destroy(store);
    }
}
