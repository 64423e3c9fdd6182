//! Gesture handler contract and per-event results
//!
//! Gesture recognizers (scroll zoom, drag pan, pinch, keyboard, ...) live
//! outside this crate. The manager only needs the four capabilities of
//! [`Handler`] and the [`GestureDelta`] a handler returns.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use meridian_core::{Point, Vec3};
use meridian_platform::{InputEvent, InputKind};

use crate::host::MapHost;

/// Post-gesture camera animation
///
/// Returned by handlers whose gesture already knows its target camera
/// (double-click zoom, keyboard steps). It runs against the host right
/// away instead of going through frame batching.
pub type CameraAnimation = Box<dyn FnOnce(&mut dyn MapHost)>;

/// A gesture recognizer
///
/// Handlers are called for every input event in registration order and
/// must return `None` for events they do not care about. `reset` may be
/// called any number of times in a row.
pub trait Handler {
    /// Whether the handler takes part in arbitration at all
    fn is_enabled(&self) -> bool;

    /// Whether the handler is in the middle of a gesture
    fn is_active(&self) -> bool;

    /// Drop any partial gesture state
    fn reset(&mut self);

    /// React to one input event
    ///
    /// `points` are the container-relative pointer positions of the event
    /// (empty for render frames and keyboard input).
    fn handle(&mut self, kind: InputKind, event: &InputEvent, points: &[Point])
        -> Option<GestureDelta>;
}

/// Handler reference shared with the configuration layer
///
/// Uses Rc since map interaction is single-threaded.
pub type SharedHandler = Rc<RefCell<dyn Handler>>;

/// Camera change requested by one handler for one event
///
/// Every axis is optional; an axis that is `Some` marks the matching
/// gesture (zoom, drag, pitch, rotate) as in progress even when its value
/// is zero.
#[derive(Default)]
pub struct GestureDelta {
    /// Screen-space pan in pixels
    pub pan_delta: Option<Point>,
    /// Zoom levels to add
    pub zoom_delta: Option<f64>,
    /// Degrees to add to the bearing
    pub bearing_delta: Option<f64>,
    /// Degrees to add to the pitch
    pub pitch_delta: Option<f64>,
    /// Screen point the gesture is centered on
    pub around: Option<Point>,
    /// Already resolved world anchor for zooming
    pub around_coord: Option<Vec3>,
    /// Center of a two-pointer gesture; takes precedence over `around`
    pub pinch_around: Option<Point>,
    /// Exclude this change from momentum
    pub no_inertia: bool,
    /// Ask for another render frame tick
    pub needs_render_frame: bool,
    /// Animation to run instead of applying the delta
    pub camera_animation: Option<CameraAnimation>,
    /// Event that triggered the gesture, when it differs from the current one
    pub original_event: Option<InputEvent>,
}

impl GestureDelta {
    /// Create an empty delta
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: screen-space pan
    pub fn with_pan(mut self, pan: Point) -> Self {
        self.pan_delta = Some(pan);
        self
    }

    /// Builder: zoom delta
    pub fn with_zoom(mut self, zoom_delta: f64) -> Self {
        self.zoom_delta = Some(zoom_delta);
        self
    }

    /// Builder: bearing delta in degrees
    pub fn with_bearing(mut self, bearing_delta: f64) -> Self {
        self.bearing_delta = Some(bearing_delta);
        self
    }

    /// Builder: pitch delta in degrees
    pub fn with_pitch(mut self, pitch_delta: f64) -> Self {
        self.pitch_delta = Some(pitch_delta);
        self
    }

    /// Builder: screen anchor
    pub fn with_around(mut self, around: Point) -> Self {
        self.around = Some(around);
        self
    }

    /// Builder: world anchor for zooming
    pub fn with_around_coord(mut self, coord: Vec3) -> Self {
        self.around_coord = Some(coord);
        self
    }

    /// Builder: two-pointer center
    pub fn with_pinch_around(mut self, pinch_around: Point) -> Self {
        self.pinch_around = Some(pinch_around);
        self
    }

    /// Builder: exclude from momentum
    pub fn without_inertia(mut self) -> Self {
        self.no_inertia = true;
        self
    }

    /// Builder: request another frame tick
    pub fn needing_render_frame(mut self) -> Self {
        self.needs_render_frame = true;
        self
    }

    /// Builder: finish the gesture with an animation
    pub fn with_camera_animation<F>(mut self, animation: F) -> Self
    where
        F: FnOnce(&mut dyn MapHost) + 'static,
    {
        self.camera_animation = Some(Box::new(animation));
        self
    }

    /// Builder: originating event
    pub fn with_original_event(mut self, event: InputEvent) -> Self {
        self.original_event = Some(event);
        self
    }

    /// Whether applying this delta would move the camera
    pub fn has_change(&self) -> bool {
        self.pan_delta.map_or(false, |p| p.mag() != 0.0)
            || self.zoom_delta.map_or(false, |d| d != 0.0)
            || self.bearing_delta.map_or(false, |d| d != 0.0)
            || self.pitch_delta.map_or(false, |d| d != 0.0)
    }

    /// Fold a later delta into this one
    ///
    /// Pan, zoom, bearing and pitch add up. Anchors, the animation and the
    /// original event take the later value when it is set. Flags stick once
    /// raised.
    pub fn merge(&mut self, other: GestureDelta) {
        self.pan_delta = match (self.pan_delta, other.pan_delta) {
            (Some(a), Some(b)) => Some(a + b),
            (a, b) => a.or(b),
        };
        self.zoom_delta = sum(self.zoom_delta, other.zoom_delta);
        self.bearing_delta = sum(self.bearing_delta, other.bearing_delta);
        self.pitch_delta = sum(self.pitch_delta, other.pitch_delta);

        self.around = other.around.or(self.around);
        self.around_coord = other.around_coord.or(self.around_coord);
        self.pinch_around = other.pinch_around.or(self.pinch_around);

        self.no_inertia |= other.no_inertia;
        self.needs_render_frame |= other.needs_render_frame;

        if other.camera_animation.is_some() {
            self.camera_animation = other.camera_animation;
        }
        if other.original_event.is_some() {
            self.original_event = other.original_event;
        }
    }

    /// The screen anchor that wins: pinch center first, then `around`
    pub fn effective_around(&self) -> Option<Point> {
        self.pinch_around.or(self.around)
    }
}

fn sum(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a + b),
        (a, b) => a.or(b),
    }
}

impl fmt::Debug for GestureDelta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GestureDelta")
            .field("pan_delta", &self.pan_delta)
            .field("zoom_delta", &self.zoom_delta)
            .field("bearing_delta", &self.bearing_delta)
            .field("pitch_delta", &self.pitch_delta)
            .field("around", &self.around)
            .field("around_coord", &self.around_coord)
            .field("pinch_around", &self.pinch_around)
            .field("no_inertia", &self.no_inertia)
            .field("needs_render_frame", &self.needs_render_frame)
            .field("camera_animation", &self.camera_animation.is_some())
            .field("original_event", &self.original_event)
            .finish()
    }
}
