//! Per-tick behavior of the frame driver: ordering, filtering, caching,
//! graceful degradation, and handle hygiene.

mod test_helpers;

use aranchor::anchor::TOUCH_ODD_COLOR;
use aranchor::tracking::{
    LightEstimate, LightEstimateState, Pose, ScriptedHit, ScriptedTrackable, TrackingState,
};
use aranchor::ColorCorrection;
use glam::Vec3;
use test_helpers::{
    place_initial_object, scripted_app, stage_plane_hit, DrawEvent, RecordingSink,
    CAMERA_TEXTURE_ID, SPAWN_HIT_POSITION,
};

#[test]
fn test_no_session_renders_nothing() {
    let (world, app) = scripted_app();
    let mut sink = RecordingSink::new();
    app.on_draw_frame(&mut sink);
    assert!(sink.events.is_empty());
    assert_eq!(world.update_count(), 0);
}

#[test]
fn test_full_scene_tick() {
    test_helpers::init_logs();
    let (world, app) = scripted_app();
    world.set_depth_supported(true);
    world.set_point_cloud(vec![Vec3::ZERO, Vec3::X, Vec3::Y]);
    app.on_resume().unwrap();
    place_initial_object(&world, &app);

    let mut sink = RecordingSink::new();
    app.on_draw_frame(&mut sink);

    assert_eq!(sink.events.first(), Some(&DrawEvent::Background));
    assert_eq!(sink.planes_drawn(), 1);
    assert_eq!(sink.objects_drawn().len(), 1);
    assert_eq!(sink.point_clouds_drawn(), 1);
    assert_eq!(sink.depth_updates, 1);
    assert_eq!(world.camera_texture(), Some(CAMERA_TEXTURE_ID));
    assert_eq!(app.tracked_plane_count(), 1);
    assert_eq!(world.outstanding_handles(), 0);
}

#[test]
fn test_update_failure_skips_the_tick() {
    let (world, app) = scripted_app();
    app.on_resume().unwrap();
    world.fail_next_update("tracking thread hiccup");

    let mut sink = RecordingSink::new();
    app.on_draw_frame(&mut sink);
    assert!(sink.events.is_empty());
    assert_eq!(world.outstanding_handles(), 0);

    // The failure was transient; the next tick renders again.
    app.on_draw_frame(&mut sink);
    assert_eq!(sink.events, vec![DrawEvent::Background]);
    assert_eq!(world.update_count(), 2);
}

#[test]
fn test_lost_camera_tracking_draws_background_only() {
    let (world, app) = scripted_app();
    world.set_point_cloud(vec![Vec3::ZERO]);
    app.on_resume().unwrap();
    place_initial_object(&world, &app);

    world.set_camera_state(TrackingState::Paused);
    let mut sink = RecordingSink::new();
    app.on_draw_frame(&mut sink);

    assert_eq!(sink.events, vec![DrawEvent::Background]);
    assert_eq!(world.outstanding_handles(), 0);
}

#[test]
fn test_invalid_light_estimate_applies_neutral_correction() {
    let (world, app) = scripted_app();
    app.on_resume().unwrap();
    place_initial_object(&world, &app);
    world.set_light_estimate(LightEstimate {
        state: LightEstimateState::Invalid,
        color_correction: ColorCorrection([9.0, 9.0, 9.0, 9.0]),
    });

    let mut sink = RecordingSink::new();
    app.on_draw_frame(&mut sink);

    let objects = sink.objects_drawn();
    assert_eq!(objects.len(), 1);
    assert_eq!(objects[0].1, ColorCorrection::NEUTRAL);
}

#[test]
fn test_valid_light_estimate_passes_through() {
    let (world, app) = scripted_app();
    app.on_resume().unwrap();
    place_initial_object(&world, &app);
    let correction = ColorCorrection([0.8, 0.9, 1.1, 0.4]);
    world.set_light_estimate(LightEstimate {
        state: LightEstimateState::Valid,
        color_correction: correction,
    });

    let mut sink = RecordingSink::new();
    app.on_draw_frame(&mut sink);
    assert_eq!(sink.objects_drawn()[0].1, correction);
}

#[test]
fn test_subsumed_and_non_tracking_planes_are_filtered() {
    let (world, app) = scripted_app();
    app.on_resume().unwrap();

    let surviving = world.add_trackable(ScriptedTrackable::plane(Pose::IDENTITY));
    let absorbed = world.add_trackable(ScriptedTrackable::plane(Pose::from_translation(
        Vec3::new(0.1, 0.0, 0.0),
    )));
    world.subsume_plane(absorbed, surviving);
    world.add_trackable(
        ScriptedTrackable::plane(Pose::from_translation(Vec3::new(0.0, 0.0, -2.0)))
            .with_state(TrackingState::Paused),
    );

    let mut sink = RecordingSink::new();
    app.on_draw_frame(&mut sink);

    assert_eq!(sink.planes_drawn(), 1);
    assert_eq!(app.tracked_plane_count(), 1);
    assert_eq!(world.outstanding_handles(), 0);
}

#[test]
fn test_object_color_is_not_recomputed_at_render() {
    let (world, app) = scripted_app();
    app.on_resume().unwrap();
    place_initial_object(&world, &app);

    // Touch the object red; the render step must draw the stored color, not
    // rederive the plane green.
    world.script_hits(vec![ScriptedHit::bare(Pose::from_translation(
        SPAWN_HIT_POSITION + Vec3::new(0.05, 0.0, 0.0),
    ))]);
    app.on_touch(500.0, 1000.0);

    let mut sink = RecordingSink::new();
    app.on_draw_frame(&mut sink);
    assert_eq!(sink.objects_drawn()[0].0, TOUCH_ODD_COLOR);
}

#[test]
fn test_object_with_lost_anchor_is_not_drawn() {
    let (world, app) = scripted_app();
    app.on_resume().unwrap();
    place_initial_object(&world, &app);

    world.set_all_anchor_states(TrackingState::Paused);
    let mut sink = RecordingSink::new();
    app.on_draw_frame(&mut sink);
    assert!(sink.objects_drawn().is_empty());

    world.set_all_anchor_states(TrackingState::Tracking);
    app.on_draw_frame(&mut sink);
    assert_eq!(sink.objects_drawn().len(), 1);
}

#[test]
fn test_uv_transform_recomputed_only_on_geometry_change() {
    let (_world, app) = scripted_app();
    app.on_resume().unwrap();

    let mut sink = RecordingSink::new();
    app.on_draw_frame(&mut sink);
    app.on_draw_frame(&mut sink);
    assert_eq!(sink.uv_transforms.len(), 1);

    app.on_display_geometry_changed(90, 1920, 1080);
    app.on_draw_frame(&mut sink);
    assert_eq!(sink.uv_transforms.len(), 2);

    app.on_surface_created();
    app.on_draw_frame(&mut sink);
    assert_eq!(sink.uv_transforms.len(), 3);
}

#[test]
fn test_depth_is_refreshed_only_when_supported() {
    let (world, app) = scripted_app();
    world.set_depth_supported(true);
    app.on_resume().unwrap();

    let mut sink = RecordingSink::new();
    app.on_draw_frame(&mut sink);
    app.on_draw_frame(&mut sink);
    assert_eq!(sink.depth_updates, 2);

    world.set_depth_supported(false);
    app.on_draw_frame(&mut sink);
    assert_eq!(sink.depth_updates, 2);
}

#[test]
fn test_absent_point_cloud_is_skipped() {
    let (world, app) = scripted_app();
    app.on_resume().unwrap();

    let mut sink = RecordingSink::new();
    app.on_draw_frame(&mut sink);
    assert_eq!(sink.point_clouds_drawn(), 0);

    world.set_point_cloud(vec![Vec3::ZERO]);
    app.on_draw_frame(&mut sink);
    assert_eq!(sink.point_clouds_drawn(), 1);
}

#[test]
fn test_repeated_ticks_leak_no_handles() {
    let (world, app) = scripted_app();
    world.set_depth_supported(true);
    world.set_point_cloud(vec![Vec3::ZERO, Vec3::X]);
    app.on_resume().unwrap();
    place_initial_object(&world, &app);

    let surviving = stage_plane_hit(&world);
    let absorbed = world.add_trackable(ScriptedTrackable::plane(Pose::IDENTITY));
    world.subsume_plane(absorbed, surviving);

    let mut sink = RecordingSink::new();
    for _ in 0..3 {
        app.on_draw_frame(&mut sink);
        assert_eq!(world.outstanding_handles(), 0);
    }
}
