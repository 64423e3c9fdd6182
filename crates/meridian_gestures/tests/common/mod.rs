//! Shared fixtures for the integration suites
//!
//! - [`FakeTransform`]: a camera looking straight down on a flat world,
//!   with zoom derived from its altitude
//! - [`RecordingHost`]: records everything the manager asks of the map
//! - [`ScriptedHandler`]: returns queued deltas and counts resets

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use meridian_core::{lat_from_mercator_y, Point, Ray, Vec3};
use meridian_gestures::prelude::*;
use meridian_platform::{InputEvent, InputKind, MouseEvent, MouseEventKind};

pub const WIDTH: f64 = 400.0;
pub const HEIGHT: f64 = 300.0;
/// Focal length in pixels
pub const FOCAL: f64 = 500.0;

/// Altitude of the camera at [`REFERENCE_ZOOM`]
pub const REFERENCE_ALTITUDE: f64 = 1e-3;
pub const REFERENCE_ZOOM: f64 = 10.0;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// =============================================================================
// Transform
// =============================================================================

pub struct FakeTransform {
    pub position: Vec3,
    pub bearing: f64,
    pub pitch: f64,
    pub projection: ProjectionKind,
    pub elevation_reference: ElevationReference,
    pub constrained: bool,
    /// Zoom `recenter_on_terrain` snaps to; `None` keeps the zoom
    pub terrain_zoom: Option<f64>,
    pub orthographic: bool,

    pub translations: Vec<Vec3>,
    /// Elevation reference in effect for each translation
    pub translation_references: Vec<ElevationReference>,
    pub recenters: usize,
    pub camera_updates: usize,
    /// Calls to `point_coordinate_3d`
    pub anchor_lookups: Cell<usize>,
}

impl FakeTransform {
    pub fn new() -> Self {
        Self {
            position: Vec3::new(0.5, 0.5, REFERENCE_ALTITUDE),
            bearing: 0.0,
            pitch: 0.0,
            projection: ProjectionKind::Mercator,
            elevation_reference: ElevationReference::Ground,
            constrained: false,
            terrain_zoom: None,
            orthographic: false,
            translations: Vec::new(),
            translation_references: Vec::new(),
            recenters: 0,
            camera_updates: 0,
            anchor_lookups: Cell::new(0),
        }
    }

    pub fn with_projection(mut self, projection: ProjectionKind) -> Self {
        self.projection = projection;
        self
    }

    fn ray_dir(&self, point: Point) -> Vec3 {
        Vec3::new(
            (point.x - WIDTH / 2.0) / FOCAL,
            (point.y - HEIGHT / 2.0) / FOCAL,
            -1.0,
        )
    }

    /// Sum of all translations applied so far
    pub fn total_translation(&self) -> Vec3 {
        self.translations
            .iter()
            .fold(Vec3::ZERO, |acc, t| acc + *t)
    }
}

impl MapTransform for FakeTransform {
    fn zoom(&self) -> f64 {
        REFERENCE_ZOOM - (self.position.z / REFERENCE_ALTITUDE).log2()
    }

    fn set_zoom(&mut self, zoom: f64) {
        self.position.z = REFERENCE_ALTITUDE * 2f64.powf(REFERENCE_ZOOM - zoom);
    }

    fn bearing(&self) -> f64 {
        self.bearing
    }

    fn set_bearing(&mut self, bearing: f64) {
        self.bearing = bearing;
    }

    fn pitch(&self) -> f64 {
        self.pitch
    }

    fn set_pitch(&mut self, pitch: f64) {
        self.pitch = pitch;
    }

    fn center_lat(&self) -> f64 {
        lat_from_mercator_y(self.position.y)
    }

    fn center_point(&self) -> Point {
        Point::new(WIDTH / 2.0, HEIGHT / 2.0)
    }

    fn elevation_reference(&self) -> ElevationReference {
        self.elevation_reference
    }

    fn set_elevation_reference(&mut self, reference: ElevationReference) {
        self.elevation_reference = reference;
    }

    fn update_camera_state(&mut self) {
        self.camera_updates += 1;
    }

    fn projection(&self) -> ProjectionKind {
        self.projection
    }

    fn orthographic_at_low_pitch(&self) -> bool {
        self.orthographic
    }

    fn camera_position(&self) -> Vec3 {
        self.position
    }

    fn point_coordinate(&self, point: Point) -> Option<Vec3> {
        self.screen_point_to_mercator_ray(point).intersect_plane_z(0.0)
    }

    fn point_coordinate_3d(&self, point: Point) -> Vec3 {
        self.anchor_lookups.set(self.anchor_lookups.get() + 1);
        self.point_coordinate(point).unwrap_or(self.position)
    }

    fn screen_point_to_mercator_ray(&self, point: Point) -> Ray {
        Ray::new(self.position, self.ray_dir(point))
    }

    fn zoom_delta_to_movement(&self, center: Vec3, zoom_delta: f64) -> f64 {
        let distance = (center - self.position).length();
        distance - distance / 2f64.powf(zoom_delta)
    }

    fn translate_camera_constrained(&mut self, translation: Vec3) {
        self.position += translation;
        self.translations.push(translation);
        self.translation_references.push(self.elevation_reference);
    }

    fn recenter_on_terrain(&mut self) {
        self.recenters += 1;
        if let Some(zoom) = self.terrain_zoom {
            self.set_zoom(zoom);
        }
    }

    fn is_camera_constrained(&self) -> bool {
        self.constrained
    }

    fn clear_camera_constrained(&mut self) {
        self.constrained = false;
    }

    fn pixels_per_mercator_pixel(&self) -> f64 {
        1.0
    }

    fn world_size(&self) -> f64 {
        512.0 * 2f64.powf(self.zoom())
    }
}

// =============================================================================
// Host
// =============================================================================

pub struct RecordingHost {
    pub transform: FakeTransform,
    pub events: Vec<MapEvent>,
    pub eases: Vec<(InertialEase, Option<InputEvent>)>,
    pub repaints: usize,
    pub frame_requests: usize,
    pub stopped_transitions: usize,
    pub reset_norths: usize,
    /// `transform_changed` of each update call
    pub updates: Vec<bool>,
    pub reduced_motion: bool,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::with_transform(FakeTransform::new())
    }

    pub fn with_transform(transform: FakeTransform) -> Self {
        Self {
            transform,
            events: Vec::new(),
            eases: Vec::new(),
            repaints: 0,
            frame_requests: 0,
            stopped_transitions: 0,
            reset_norths: 0,
            updates: Vec::new(),
            reduced_motion: false,
        }
    }

    pub fn event_names(&self) -> Vec<&'static str> {
        self.events.iter().map(|e| e.kind.name()).collect()
    }

    pub fn position_of(&self, kind: MapEventKind) -> Option<usize> {
        self.events.iter().position(|e| e.kind == kind)
    }

    pub fn count(&self, kind: MapEventKind) -> usize {
        self.events.iter().filter(|e| e.kind == kind).count()
    }

    pub fn clear_events(&mut self) {
        self.events.clear();
    }
}

impl MapHost for RecordingHost {
    fn transform(&self) -> &dyn MapTransform {
        &self.transform
    }

    fn transform_mut(&mut self) -> &mut dyn MapTransform {
        &mut self.transform
    }

    fn fire(&mut self, event: MapEvent) {
        self.events.push(event);
    }

    fn trigger_repaint(&mut self) {
        self.repaints += 1;
    }

    fn request_frame(&mut self) {
        self.frame_requests += 1;
    }

    fn stop_transitions(&mut self) {
        self.stopped_transitions += 1;
    }

    fn update(&mut self, transform_changed: bool) {
        self.updates.push(transform_changed);
    }

    fn ease_to(&mut self, ease: InertialEase, original_event: Option<InputEvent>) {
        self.eases.push((ease, original_event));
    }

    fn reset_north(&mut self) {
        self.reset_norths += 1;
        self.transform.bearing = 0.0;
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.reduced_motion
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Handler that replays queued deltas
///
/// Each non-frame event pops one delta; render frames are ignored unless
/// `responds_to_frames` is set. Activity is controlled by the test.
pub struct ScriptedHandler {
    pub enabled: bool,
    pub active: bool,
    pub responds_to_frames: bool,
    pub script: VecDeque<GestureDelta>,
    pub seen: Vec<InputKind>,
    pub resets: usize,
}

impl ScriptedHandler {
    pub fn shared() -> Rc<RefCell<ScriptedHandler>> {
        Rc::new(RefCell::new(ScriptedHandler {
            enabled: true,
            active: false,
            responds_to_frames: false,
            script: VecDeque::new(),
            seen: Vec::new(),
            resets: 0,
        }))
    }
}

impl Handler for ScriptedHandler {
    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn reset(&mut self) {
        self.resets += 1;
        self.active = false;
    }

    fn handle(&mut self, kind: InputKind, _: &InputEvent, _: &[Point]) -> Option<GestureDelta> {
        self.seen.push(kind);
        if kind == InputKind::RenderFrame && !self.responds_to_frames {
            return None;
        }
        self.script.pop_front()
    }
}

pub fn push(handler: &Rc<RefCell<ScriptedHandler>>, delta: GestureDelta) {
    handler.borrow_mut().script.push_back(delta);
}

pub fn set_active(handler: &Rc<RefCell<ScriptedHandler>>, active: bool) {
    handler.borrow_mut().active = active;
}

// =============================================================================
// Events
// =============================================================================

pub fn mouse(kind: MouseEventKind, x: f64, y: f64, time_stamp: f64) -> InputEvent {
    InputEvent::Mouse(MouseEvent::new(kind, x, y, time_stamp))
}

pub fn mouse_move(x: f64, y: f64, time_stamp: f64) -> InputEvent {
    mouse(MouseEventKind::Move, x, y, time_stamp)
}

pub fn mouse_up(x: f64, y: f64, time_stamp: f64) -> InputEvent {
    mouse(MouseEventKind::Up, x, y, time_stamp)
}

pub fn assert_vec_close(actual: Vec3, expected: Vec3) {
    let tolerance = 1e-9 * expected.length().max(1e-12);
    assert!(
        (actual - expected).length() <= tolerance,
        "{actual:?} != {expected:?}"
    );
}
