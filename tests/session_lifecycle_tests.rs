//! Lifecycle sequencing: install flow, configuration, geometry, teardown.

mod test_helpers;

use aranchor::tracking::{DisplayGeometry, InstallStatus, ScriptedPlatform, ScriptedWorld};
use aranchor::{ArApp, SessionError, SessionState};
use test_helpers::{place_initial_object, scripted_app, RecordingSink};

#[test]
fn test_resume_creates_configures_and_resumes() {
    test_helpers::init_logs();
    let (world, app) = scripted_app();
    app.on_resume().unwrap();
    assert_eq!(app.session_state(), SessionState::Resumed);
    assert_eq!(world.sessions_created(), 1);
    assert_eq!(world.configured_history().len(), 1);
    assert_eq!(world.resume_count(), 1);
}

#[test]
fn test_install_flow_retries_resume() {
    let world = ScriptedWorld::new();
    world.queue_install_status(InstallStatus::InstallRequested);
    let app = ArApp::new(Box::new(ScriptedPlatform::new(world.clone())));

    assert!(matches!(app.on_resume(), Err(SessionError::InstallRequired)));
    assert_eq!(app.session_state(), SessionState::Uninitialized);
    assert_eq!(world.sessions_created(), 0);

    // Installation completed; the shell resumes again.
    app.on_resume().unwrap();
    assert_eq!(app.session_state(), SessionState::Resumed);
    // Only the first attempt counted as user requested.
    assert_eq!(world.install_requests(), vec![true, false]);
    assert_eq!(world.sessions_created(), 1);
}

#[test]
fn test_install_failure_is_surfaced() {
    let (world, app) = scripted_app();
    world.fail_install("play services unavailable");
    assert!(matches!(app.on_resume(), Err(SessionError::InstallFailed(_))));
    assert_eq!(world.sessions_created(), 0);
}

#[test]
fn test_create_failure_is_surfaced() {
    let (world, app) = scripted_app();
    world.fail_create("device not supported");
    assert!(matches!(app.on_resume(), Err(SessionError::CreateFailed(_))));
    assert_eq!(app.session_state(), SessionState::Uninitialized);
}

#[test]
fn test_resume_failure_is_surfaced_and_recoverable() {
    let (world, app) = scripted_app();
    world.fail_resume("camera in use");
    assert!(matches!(app.on_resume(), Err(SessionError::ResumeFailed(_))));
    assert_ne!(app.session_state(), SessionState::Resumed);

    world.clear_resume_failure();
    app.on_resume().unwrap();
    assert_eq!(app.session_state(), SessionState::Resumed);
}

#[test]
fn test_depth_downgrades_silently_when_unsupported() {
    let (world, app) = scripted_app();
    world.set_depth_supported(false);
    app.on_resume().unwrap();
    let configs = world.configured_history();
    assert_eq!(configs.len(), 1);
    assert!(!configs[0].depth_enabled);
    assert!(configs[0].instant_placement_enabled);
}

#[test]
fn test_depth_stays_on_when_supported() {
    let (world, app) = scripted_app();
    world.set_depth_supported(true);
    app.on_resume().unwrap();
    assert!(world.configured_history()[0].depth_enabled);
}

#[test]
fn test_settings_change_reconfigures_live_session() {
    let (world, app) = scripted_app();
    app.on_resume().unwrap();
    app.on_settings_changed(false).unwrap();
    let configs = world.configured_history();
    assert_eq!(configs.len(), 2);
    assert!(!configs[1].instant_placement_enabled);
}

#[test]
fn test_settings_change_before_session_is_remembered() {
    let (world, app) = scripted_app();
    app.on_settings_changed(false).unwrap();
    assert!(world.configured_history().is_empty());

    app.on_resume().unwrap();
    assert!(!world.configured_history()[0].instant_placement_enabled);
}

#[test]
fn test_display_geometry_is_remembered_until_creation() {
    let (world, app) = scripted_app();
    app.on_display_geometry_changed(90, 1080, 1920);
    assert_eq!(world.display_geometry(), None);

    app.on_resume().unwrap();
    assert_eq!(
        world.display_geometry(),
        Some(DisplayGeometry::new(90, 1080, 1920))
    );
}

#[test]
fn test_display_geometry_propagates_to_live_session() {
    let (world, app) = scripted_app();
    app.on_resume().unwrap();
    app.on_display_geometry_changed(180, 1920, 1080);
    assert_eq!(
        world.display_geometry(),
        Some(DisplayGeometry::new(180, 1920, 1080))
    );
}

#[test]
fn test_pause_is_safe_in_any_state() {
    let (world, app) = scripted_app();
    app.on_pause();
    assert_eq!(world.pause_count(), 0);

    app.on_resume().unwrap();
    app.on_pause();
    assert_eq!(app.session_state(), SessionState::Paused);
    assert_eq!(world.pause_count(), 1);

    app.on_pause();
    assert_eq!(app.session_state(), SessionState::Paused);
}

#[test]
fn test_pause_does_not_invalidate_placed_objects() {
    let (world, app) = scripted_app();
    app.on_resume().unwrap();
    place_initial_object(&world, &app);

    app.on_pause();
    app.on_resume().unwrap();
    assert_eq!(app.placed_object_count(), 1);
    assert_eq!(world.live_anchor_count(), 1);
}

#[test]
fn test_shutdown_releases_anchors_and_session() {
    let (world, app) = scripted_app();
    app.on_resume().unwrap();
    place_initial_object(&world, &app);
    assert_eq!(world.live_anchor_count(), 1);

    app.shutdown();
    assert_eq!(app.session_state(), SessionState::Destroyed);
    assert_eq!(world.live_anchor_count(), 0);
    assert_eq!(world.sessions_dropped(), 1);
    assert!(matches!(app.on_resume(), Err(SessionError::ResumeFailed(_))));
}

#[test]
fn test_callbacks_before_session_are_tolerated() {
    let (world, app) = scripted_app();
    let mut sink = RecordingSink::new();

    app.on_touch(10.0, 10.0);
    assert!(!app.spawn_at_screen_center());
    app.on_draw_frame(&mut sink);
    app.on_pause();
    app.on_settings_changed(false).unwrap();
    app.on_surface_created();

    assert!(sink.events.is_empty());
    assert!(world.hit_queries().is_empty());
    assert_eq!(app.placed_object_count(), 0);
    assert_eq!(app.tracked_plane_count(), 0);
}
