//! Scripted tracking runtime for driving the session loop off-device.
//!
//! [`ScriptedWorld`] stages camera state, trackables, hit results, light
//! estimates, and failure injections; [`ScriptedPlatform`] and
//! [`ScriptedRuntime`] then play that world back through the collaborator
//! traits. Handle accounting is strict: releasing a handle twice, or a handle
//! of the wrong kind, panics, and the number of outstanding borrowed handles
//! can be inspected at any point. Used by the integration tests and by
//! downstream apps that want deterministic replay.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use glam::{Mat4, Vec3};
use parking_lot::Mutex;

use crate::error::{FrameError, SessionError};
use crate::tracking::runtime::{
    AnchorHandle, CameraHandle, DepthImageHandle, HitHandle, HitListHandle, PointCloudHandle,
    TrackableHandle, TrackableListHandle, TrackingPlatform, TrackingRuntime,
};
use crate::tracking::types::{
    DisplayGeometry, InstallStatus, LightEstimate, LightEstimateState, Pose, TrackableKind,
    TrackingConfig, TrackingState,
};

/// A trackable staged in the scripted world.
#[derive(Debug, Clone)]
pub struct ScriptedTrackable {
    /// Kind of feature this trackable represents.
    pub kind: TrackableKind,
    /// Tracking confidence.
    pub state: TrackingState,
    /// Center pose.
    pub pose: Pose,
    /// Index of the plane that subsumed this one, if any.
    pub subsumed_by: Option<usize>,
}

impl ScriptedTrackable {
    /// A tracking plane at `pose`.
    pub fn plane(pose: Pose) -> Self {
        Self {
            kind: TrackableKind::Plane,
            state: TrackingState::Tracking,
            pose,
            subsumed_by: None,
        }
    }

    /// A trackable of the given kind at `pose`, in tracking state.
    pub fn of_kind(kind: TrackableKind, pose: Pose) -> Self {
        Self {
            kind,
            state: TrackingState::Tracking,
            pose,
            subsumed_by: None,
        }
    }

    /// Override the tracking state.
    pub fn with_state(mut self, state: TrackingState) -> Self {
        self.state = state;
        self
    }
}

/// One scripted hit-test candidate. Candidates play back in staged order,
/// which stands in for the runtime's increasing-distance ordering.
#[derive(Debug, Clone)]
pub struct ScriptedHit {
    /// World-space pose of the intersection.
    pub pose: Pose,
    /// Index of the staged trackable this hit intersected, if any.
    pub trackable: Option<usize>,
}

impl ScriptedHit {
    /// A hit at `pose` on the staged trackable with the given index.
    pub fn on_trackable(pose: Pose, trackable: usize) -> Self {
        Self {
            pose,
            trackable: Some(trackable),
        }
    }

    /// A hit at `pose` with no originating trackable.
    pub fn bare(pose: Pose) -> Self {
        Self {
            pose,
            trackable: None,
        }
    }
}

/// A hit-test invocation recorded by the scripted runtime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitQuery {
    /// Screen x coordinate queried.
    pub x: f32,
    /// Screen y coordinate queried.
    pub y: f32,
    /// Assumed distance when the instant-placement variant was used.
    pub approximate_distance_m: Option<f32>,
}

#[derive(Debug, Clone)]
enum HandleTag {
    Camera,
    TrackableList(Vec<usize>),
    Trackable(usize),
    HitList(Vec<usize>),
    Hit(usize),
    PointCloud,
    DepthImage,
}

#[derive(Debug, Clone, Copy)]
struct ScriptedAnchor {
    pose: Pose,
    state: TrackingState,
}

struct WorldState {
    // Staged world.
    camera_pose: Pose,
    camera_state: TrackingState,
    trackables: Vec<ScriptedTrackable>,
    hits: Vec<ScriptedHit>,
    point_cloud: Option<Vec<Vec3>>,
    depth_supported: bool,
    depth_size: (u32, u32),
    light: LightEstimate,
    texture_mapping: [[f32; 2]; 3],

    // Failure injection.
    install_queue: VecDeque<InstallStatus>,
    install_error: Option<String>,
    create_error: Option<String>,
    configure_error: Option<String>,
    resume_error: Option<String>,
    update_error: Option<String>,
    anchor_creation_fails: bool,

    // Observed behavior.
    install_requests: Vec<bool>,
    sessions_created: u32,
    sessions_dropped: u32,
    configured: Vec<TrackingConfig>,
    resume_count: u32,
    pause_count: u32,
    update_count: u32,
    display: Option<DisplayGeometry>,
    camera_texture: Option<u32>,
    hit_queries: Vec<HitQuery>,
    pending_geometry_change: bool,
    frame_geometry_changed: bool,

    // Handle accounting.
    next_handle: u64,
    live: HashMap<u64, HandleTag>,
    anchors: HashMap<u64, ScriptedAnchor>,
}

impl WorldState {
    fn new() -> Self {
        Self {
            camera_pose: Pose::IDENTITY,
            camera_state: TrackingState::Tracking,
            trackables: Vec::new(),
            hits: Vec::new(),
            point_cloud: None,
            depth_supported: false,
            depth_size: (160, 120),
            light: LightEstimate {
                state: LightEstimateState::Valid,
                color_correction: crate::primitives::ColorCorrection::NEUTRAL,
            },
            texture_mapping: [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]],
            install_queue: VecDeque::new(),
            install_error: None,
            create_error: None,
            configure_error: None,
            resume_error: None,
            update_error: None,
            anchor_creation_fails: false,
            install_requests: Vec::new(),
            sessions_created: 0,
            sessions_dropped: 0,
            configured: Vec::new(),
            resume_count: 0,
            pause_count: 0,
            update_count: 0,
            display: None,
            camera_texture: None,
            hit_queries: Vec::new(),
            pending_geometry_change: false,
            frame_geometry_changed: false,
            next_handle: 1,
            live: HashMap::new(),
            anchors: HashMap::new(),
        }
    }

    fn alloc(&mut self, tag: HandleTag) -> u64 {
        let handle = self.next_handle;
        self.next_handle += 1;
        self.live.insert(handle, tag);
        handle
    }

    fn tag(&self, handle: u64) -> &HandleTag {
        self.live
            .get(&handle)
            .unwrap_or_else(|| panic!("use of handle {handle} after release"))
    }

    fn take(&mut self, handle: u64) -> HandleTag {
        self.live
            .remove(&handle)
            .unwrap_or_else(|| panic!("handle {handle} released twice or never acquired"))
    }

    fn trackable_index(&self, handle: u64) -> usize {
        match self.tag(handle) {
            HandleTag::Trackable(index) => *index,
            other => panic!("handle {handle} is {other:?}, expected a trackable"),
        }
    }

    fn hit_index(&self, handle: u64) -> usize {
        match self.tag(handle) {
            HandleTag::Hit(index) => *index,
            other => panic!("handle {handle} is {other:?}, expected a hit"),
        }
    }

    fn anchor(&self, handle: u64) -> ScriptedAnchor {
        *self
            .anchors
            .get(&handle)
            .unwrap_or_else(|| panic!("use of anchor {handle} after release"))
    }
}

/// Shared scripted world, cloneable into platforms, runtimes, and tests.
#[derive(Clone)]
pub struct ScriptedWorld(Arc<Mutex<WorldState>>);

impl ScriptedWorld {
    /// Create an empty world: tracking camera at the origin, no trackables,
    /// no hits, valid neutral light, no depth support.
    pub fn new() -> Self {
        Self(Arc::new(Mutex::new(WorldState::new())))
    }

    // Staging.

    /// Set the camera's tracking confidence.
    pub fn set_camera_state(&self, state: TrackingState) {
        self.0.lock().camera_state = state;
    }

    /// Set the camera's world pose.
    pub fn set_camera_pose(&self, pose: Pose) {
        self.0.lock().camera_pose = pose;
    }

    /// Replace the light estimate.
    pub fn set_light_estimate(&self, estimate: LightEstimate) {
        self.0.lock().light = estimate;
    }

    /// Enable or disable depth support.
    pub fn set_depth_supported(&self, supported: bool) {
        self.0.lock().depth_supported = supported;
    }

    /// Stage this frame's point cloud.
    pub fn set_point_cloud(&self, points: Vec<Vec3>) {
        self.0.lock().point_cloud = Some(points);
    }

    /// Remove the staged point cloud.
    pub fn clear_point_cloud(&self) {
        self.0.lock().point_cloud = None;
    }

    /// Stage a trackable and return its index.
    pub fn add_trackable(&self, trackable: ScriptedTrackable) -> usize {
        let mut world = self.0.lock();
        world.trackables.push(trackable);
        world.trackables.len() - 1
    }

    /// Change a staged trackable's tracking state.
    pub fn set_trackable_state(&self, index: usize, state: TrackingState) {
        self.0.lock().trackables[index].state = state;
    }

    /// Mark the plane at `index` as merged into the plane at `by`.
    pub fn subsume_plane(&self, index: usize, by: usize) {
        self.0.lock().trackables[index].subsumed_by = Some(by);
    }

    /// Replace the scripted hit-test results.
    pub fn script_hits(&self, hits: Vec<ScriptedHit>) {
        self.0.lock().hits = hits;
    }

    /// Replace the NDC-to-texture basis mapping played back by the runtime.
    pub fn set_texture_mapping(&self, mapping: [[f32; 2]; 3]) {
        self.0.lock().texture_mapping = mapping;
    }

    // Failure injection.

    /// Queue an install status; once the queue drains, requests report
    /// `Installed`.
    pub fn queue_install_status(&self, status: InstallStatus) {
        self.0.lock().install_queue.push_back(status);
    }

    /// Make the install flow itself fail.
    pub fn fail_install(&self, message: &str) {
        self.0.lock().install_error = Some(message.to_string());
    }

    /// Make session creation fail.
    pub fn fail_create(&self, message: &str) {
        self.0.lock().create_error = Some(message.to_string());
    }

    /// Make configuration fail.
    pub fn fail_configure(&self, message: &str) {
        self.0.lock().configure_error = Some(message.to_string());
    }

    /// Make resume fail until cleared.
    pub fn fail_resume(&self, message: &str) {
        self.0.lock().resume_error = Some(message.to_string());
    }

    /// Clear an injected resume failure.
    pub fn clear_resume_failure(&self) {
        self.0.lock().resume_error = None;
    }

    /// Make only the next frame update fail.
    pub fn fail_next_update(&self, message: &str) {
        self.0.lock().update_error = Some(message.to_string());
    }

    /// Make anchor creation fail.
    pub fn set_anchor_creation_fails(&self, fails: bool) {
        self.0.lock().anchor_creation_fails = fails;
    }

    /// Change the tracking state of a created anchor.
    pub fn set_anchor_state(&self, anchor: AnchorHandle, state: TrackingState) {
        let mut world = self.0.lock();
        let entry = world
            .anchors
            .get_mut(&anchor.0)
            .unwrap_or_else(|| panic!("use of anchor {} after release", anchor.0));
        entry.state = state;
    }

    /// Change the tracking state of every created anchor.
    pub fn set_all_anchor_states(&self, state: TrackingState) {
        for anchor in self.0.lock().anchors.values_mut() {
            anchor.state = state;
        }
    }

    // Inspection.

    /// Borrowed handles currently outstanding. Zero after every well-behaved
    /// operation.
    pub fn outstanding_handles(&self) -> usize {
        self.0.lock().live.len()
    }

    /// Anchors currently held by callers.
    pub fn live_anchor_count(&self) -> usize {
        self.0.lock().anchors.len()
    }

    /// `user_requested` flags seen by the install flow, in order.
    pub fn install_requests(&self) -> Vec<bool> {
        self.0.lock().install_requests.clone()
    }

    /// Sessions created so far.
    pub fn sessions_created(&self) -> u32 {
        self.0.lock().sessions_created
    }

    /// Sessions dropped so far.
    pub fn sessions_dropped(&self) -> u32 {
        self.0.lock().sessions_dropped
    }

    /// Configurations applied, in order.
    pub fn configured_history(&self) -> Vec<TrackingConfig> {
        self.0.lock().configured.clone()
    }

    /// Resume calls observed.
    pub fn resume_count(&self) -> u32 {
        self.0.lock().resume_count
    }

    /// Pause calls observed.
    pub fn pause_count(&self) -> u32 {
        self.0.lock().pause_count
    }

    /// Frame updates observed.
    pub fn update_count(&self) -> u32 {
        self.0.lock().update_count
    }

    /// Display geometry last propagated to the runtime.
    pub fn display_geometry(&self) -> Option<DisplayGeometry> {
        self.0.lock().display
    }

    /// Camera texture last named by the frame driver.
    pub fn camera_texture(&self) -> Option<u32> {
        self.0.lock().camera_texture
    }

    /// Hit-test invocations observed, in order.
    pub fn hit_queries(&self) -> Vec<HitQuery> {
        self.0.lock().hit_queries.clone()
    }

    /// Current pose of a created anchor.
    pub fn anchor_pose(&self, anchor: AnchorHandle) -> Pose {
        self.0.lock().anchor(anchor.0).pose
    }
}

impl Default for ScriptedWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Platform factory playing back a [`ScriptedWorld`].
pub struct ScriptedPlatform {
    world: ScriptedWorld,
}

impl ScriptedPlatform {
    /// Create a platform backed by `world`.
    pub fn new(world: ScriptedWorld) -> Self {
        Self { world }
    }
}

impl TrackingPlatform for ScriptedPlatform {
    fn request_install(&mut self, user_requested: bool) -> Result<InstallStatus, SessionError> {
        let mut world = self.world.0.lock();
        world.install_requests.push(user_requested);
        if let Some(message) = world.install_error.clone() {
            return Err(SessionError::InstallFailed(message));
        }
        Ok(world
            .install_queue
            .pop_front()
            .unwrap_or(InstallStatus::Installed))
    }

    fn create_session(&mut self) -> Result<Box<dyn TrackingRuntime>, SessionError> {
        let mut world = self.world.0.lock();
        if let Some(message) = world.create_error.clone() {
            return Err(SessionError::CreateFailed(message));
        }
        world.sessions_created += 1;
        drop(world);
        Ok(Box::new(ScriptedRuntime::new(self.world.clone())))
    }
}

/// Tracking runtime playing back a [`ScriptedWorld`].
pub struct ScriptedRuntime {
    world: ScriptedWorld,
}

impl ScriptedRuntime {
    /// Create a runtime backed by `world`.
    pub fn new(world: ScriptedWorld) -> Self {
        Self { world }
    }
}

impl Drop for ScriptedRuntime {
    fn drop(&mut self) {
        // Session and frame buffer go away together.
        self.world.0.lock().sessions_dropped += 1;
    }
}

impl TrackingRuntime for ScriptedRuntime {
    fn configure(&self, config: &TrackingConfig) -> Result<(), SessionError> {
        let mut world = self.world.0.lock();
        if let Some(message) = world.configure_error.clone() {
            return Err(SessionError::ConfigureFailed(message));
        }
        world.configured.push(*config);
        Ok(())
    }

    fn resume(&self) -> Result<(), SessionError> {
        let mut world = self.world.0.lock();
        if let Some(message) = world.resume_error.clone() {
            return Err(SessionError::ResumeFailed(message));
        }
        world.resume_count += 1;
        Ok(())
    }

    fn pause(&self) {
        self.world.0.lock().pause_count += 1;
    }

    fn set_display_geometry(&self, geometry: DisplayGeometry) {
        let mut world = self.world.0.lock();
        world.display = Some(geometry);
        world.pending_geometry_change = true;
    }

    fn supports_depth(&self) -> bool {
        self.world.0.lock().depth_supported
    }

    fn set_camera_texture(&self, texture_id: u32) {
        self.world.0.lock().camera_texture = Some(texture_id);
    }

    fn update(&self) -> Result<(), FrameError> {
        let mut world = self.world.0.lock();
        world.update_count += 1;
        world.frame_geometry_changed = world.pending_geometry_change;
        world.pending_geometry_change = false;
        if let Some(message) = world.update_error.take() {
            return Err(FrameError::UpdateFailed(message));
        }
        Ok(())
    }

    fn display_geometry_changed(&self) -> bool {
        self.world.0.lock().frame_geometry_changed
    }

    fn transform_ndc_basis(&self, points: [[f32; 2]; 3]) -> [[f32; 2]; 3] {
        let mapping = self.world.0.lock().texture_mapping;
        let origin = mapping[0];
        let x_axis = [mapping[1][0] - origin[0], mapping[1][1] - origin[1]];
        let y_axis = [mapping[2][0] - origin[0], mapping[2][1] - origin[1]];
        points.map(|p| {
            [
                origin[0] + p[0] * x_axis[0] + p[1] * y_axis[0],
                origin[1] + p[0] * x_axis[1] + p[1] * y_axis[1],
            ]
        })
    }

    fn light_estimate(&self) -> LightEstimate {
        self.world.0.lock().light
    }

    fn acquire_camera(&self) -> CameraHandle {
        CameraHandle(self.world.0.lock().alloc(HandleTag::Camera))
    }

    fn camera_tracking_state(&self, camera: CameraHandle) -> TrackingState {
        let world = self.world.0.lock();
        match world.tag(camera.0) {
            HandleTag::Camera => world.camera_state,
            other => panic!("handle {} is {other:?}, expected a camera", camera.0),
        }
    }

    fn camera_view_matrix(&self, camera: CameraHandle) -> Mat4 {
        let world = self.world.0.lock();
        match world.tag(camera.0) {
            HandleTag::Camera => world.camera_pose.to_matrix().inverse(),
            other => panic!("handle {} is {other:?}, expected a camera", camera.0),
        }
    }

    fn camera_projection_matrix(&self, camera: CameraHandle, near: f32, far: f32) -> Mat4 {
        let world = self.world.0.lock();
        match world.tag(camera.0) {
            HandleTag::Camera => {}
            other => panic!("handle {} is {other:?}, expected a camera", camera.0),
        }
        let aspect = match world.display {
            Some(geometry) if geometry.height > 0 => {
                geometry.width as f32 / geometry.height as f32
            }
            _ => 1.0,
        };
        Mat4::perspective_rh_gl(60f32.to_radians(), aspect, near, far)
    }

    fn release_camera(&self, camera: CameraHandle) {
        let mut world = self.world.0.lock();
        match world.take(camera.0) {
            HandleTag::Camera => {}
            other => panic!("handle {} is {other:?}, expected a camera", camera.0),
        }
    }

    fn acquire_planes(&self) -> TrackableListHandle {
        let mut world = self.world.0.lock();
        let indices = world
            .trackables
            .iter()
            .enumerate()
            .filter(|(_, t)| t.kind == TrackableKind::Plane)
            .map(|(index, _)| index)
            .collect();
        TrackableListHandle(world.alloc(HandleTag::TrackableList(indices)))
    }

    fn trackable_list_len(&self, list: TrackableListHandle) -> usize {
        let world = self.world.0.lock();
        match world.tag(list.0) {
            HandleTag::TrackableList(indices) => indices.len(),
            other => panic!("handle {} is {other:?}, expected a trackable list", list.0),
        }
    }

    fn acquire_trackable(&self, list: TrackableListHandle, index: usize) -> TrackableHandle {
        let mut world = self.world.0.lock();
        let target = match world.tag(list.0) {
            HandleTag::TrackableList(indices) => indices[index],
            other => panic!("handle {} is {other:?}, expected a trackable list", list.0),
        };
        TrackableHandle(world.alloc(HandleTag::Trackable(target)))
    }

    fn release_trackable_list(&self, list: TrackableListHandle) {
        let mut world = self.world.0.lock();
        match world.take(list.0) {
            HandleTag::TrackableList(_) => {}
            other => panic!("handle {} is {other:?}, expected a trackable list", list.0),
        }
    }

    fn trackable_kind(&self, trackable: TrackableHandle) -> TrackableKind {
        let world = self.world.0.lock();
        let index = world.trackable_index(trackable.0);
        world.trackables[index].kind
    }

    fn trackable_tracking_state(&self, trackable: TrackableHandle) -> TrackingState {
        let world = self.world.0.lock();
        let index = world.trackable_index(trackable.0);
        world.trackables[index].state
    }

    fn trackable_pose(&self, trackable: TrackableHandle) -> Pose {
        let world = self.world.0.lock();
        let index = world.trackable_index(trackable.0);
        world.trackables[index].pose
    }

    fn acquire_subsuming_plane(&self, plane: TrackableHandle) -> Option<TrackableHandle> {
        let mut world = self.world.0.lock();
        let index = world.trackable_index(plane.0);
        let subsumed_by = world.trackables[index].subsumed_by?;
        Some(TrackableHandle(
            world.alloc(HandleTag::Trackable(subsumed_by)),
        ))
    }

    fn release_trackable(&self, trackable: TrackableHandle) {
        let mut world = self.world.0.lock();
        match world.take(trackable.0) {
            HandleTag::Trackable(_) => {}
            other => panic!("handle {} is {other:?}, expected a trackable", trackable.0),
        }
    }

    fn hit_test(&self, x: f32, y: f32) -> HitListHandle {
        let mut world = self.world.0.lock();
        world.hit_queries.push(HitQuery {
            x,
            y,
            approximate_distance_m: None,
        });
        let indices = (0..world.hits.len()).collect();
        HitListHandle(world.alloc(HandleTag::HitList(indices)))
    }

    fn hit_test_instant_placement(
        &self,
        x: f32,
        y: f32,
        approximate_distance_m: f32,
    ) -> HitListHandle {
        let mut world = self.world.0.lock();
        world.hit_queries.push(HitQuery {
            x,
            y,
            approximate_distance_m: Some(approximate_distance_m),
        });
        let indices = (0..world.hits.len()).collect();
        HitListHandle(world.alloc(HandleTag::HitList(indices)))
    }

    fn hit_list_len(&self, list: HitListHandle) -> usize {
        let world = self.world.0.lock();
        match world.tag(list.0) {
            HandleTag::HitList(indices) => indices.len(),
            other => panic!("handle {} is {other:?}, expected a hit list", list.0),
        }
    }

    fn acquire_hit(&self, list: HitListHandle, index: usize) -> HitHandle {
        let mut world = self.world.0.lock();
        let target = match world.tag(list.0) {
            HandleTag::HitList(indices) => indices[index],
            other => panic!("handle {} is {other:?}, expected a hit list", list.0),
        };
        HitHandle(world.alloc(HandleTag::Hit(target)))
    }

    fn hit_pose(&self, hit: HitHandle) -> Pose {
        let world = self.world.0.lock();
        let index = world.hit_index(hit.0);
        world.hits[index].pose
    }

    fn acquire_hit_trackable(&self, hit: HitHandle) -> Option<TrackableHandle> {
        let mut world = self.world.0.lock();
        let index = world.hit_index(hit.0);
        let trackable = world.hits[index].trackable?;
        Some(TrackableHandle(world.alloc(HandleTag::Trackable(trackable))))
    }

    fn release_hit(&self, hit: HitHandle) {
        let mut world = self.world.0.lock();
        match world.take(hit.0) {
            HandleTag::Hit(_) => {}
            other => panic!("handle {} is {other:?}, expected a hit", hit.0),
        }
    }

    fn release_hit_list(&self, list: HitListHandle) {
        let mut world = self.world.0.lock();
        match world.take(list.0) {
            HandleTag::HitList(_) => {}
            other => panic!("handle {} is {other:?}, expected a hit list", list.0),
        }
    }

    fn create_anchor(&self, hit: HitHandle) -> Option<AnchorHandle> {
        let mut world = self.world.0.lock();
        if world.anchor_creation_fails {
            return None;
        }
        let index = world.hit_index(hit.0);
        let pose = world.hits[index].pose;
        let handle = world.next_handle;
        world.next_handle += 1;
        world.anchors.insert(
            handle,
            ScriptedAnchor {
                pose,
                state: TrackingState::Tracking,
            },
        );
        Some(AnchorHandle(handle))
    }

    fn anchor_tracking_state(&self, anchor: AnchorHandle) -> TrackingState {
        self.world.0.lock().anchor(anchor.0).state
    }

    fn anchor_pose(&self, anchor: AnchorHandle) -> Pose {
        self.world.0.lock().anchor(anchor.0).pose
    }

    fn release_anchor(&self, anchor: AnchorHandle) {
        let mut world = self.world.0.lock();
        if world.anchors.remove(&anchor.0).is_none() {
            panic!("anchor {} released twice or never created", anchor.0);
        }
    }

    fn acquire_point_cloud(&self) -> Option<PointCloudHandle> {
        let mut world = self.world.0.lock();
        if world.point_cloud.is_none() {
            return None;
        }
        Some(PointCloudHandle(world.alloc(HandleTag::PointCloud)))
    }

    fn point_cloud_points(&self, cloud: PointCloudHandle) -> Vec<Vec3> {
        let world = self.world.0.lock();
        match world.tag(cloud.0) {
            HandleTag::PointCloud => world.point_cloud.clone().unwrap_or_default(),
            other => panic!("handle {} is {other:?}, expected a point cloud", cloud.0),
        }
    }

    fn release_point_cloud(&self, cloud: PointCloudHandle) {
        let mut world = self.world.0.lock();
        match world.take(cloud.0) {
            HandleTag::PointCloud => {}
            other => panic!("handle {} is {other:?}, expected a point cloud", cloud.0),
        }
    }

    fn acquire_depth_image(&self) -> Option<DepthImageHandle> {
        let mut world = self.world.0.lock();
        if !world.depth_supported {
            return None;
        }
        Some(DepthImageHandle(world.alloc(HandleTag::DepthImage)))
    }

    fn depth_image_size(&self, image: DepthImageHandle) -> (u32, u32) {
        let world = self.world.0.lock();
        match world.tag(image.0) {
            HandleTag::DepthImage => world.depth_size,
            other => panic!("handle {} is {other:?}, expected a depth image", image.0),
        }
    }

    fn release_depth_image(&self, image: DepthImageHandle) {
        let mut world = self.world.0.lock();
        match world.take(image.0) {
            HandleTag::DepthImage => {}
            other => panic!("handle {} is {other:?}, expected a depth image", image.0),
        }
    }
}
