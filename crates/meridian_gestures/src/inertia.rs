//! Post-gesture momentum
//!
//! Every applied camera change is recorded with its frame timestamp. When
//! movement ends, the changes from the last [`INERTIA_CUTOFF_MS`] are
//! summed per axis and converted into one eased camera animation.

use std::collections::VecDeque;

use meridian_animation::{calculate_easing, Easing, InertiaOptions, InertiaResult};
use meridian_core::Point;

use crate::handler::GestureDelta;
use crate::transform::MapTransform;

/// Samples older than this (milliseconds) no longer count towards momentum
pub const INERTIA_CUTOFF_MS: f64 = 160.0;

/// Largest bearing change a momentum glide may add, in degrees
const MAX_BEARING_GLIDE: f64 = 179.0;

/// One recorded camera change
#[derive(Clone, Copy, Debug, PartialEq)]
struct InertiaSample {
    time: f64,
    pan: Option<Point>,
    zoom: f64,
    bearing: f64,
    pitch: f64,
    around: Option<Point>,
    pinch_around: Option<Point>,
}

/// Target of a momentum animation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InertialEase {
    /// Screen offset to pan by
    pub offset: Option<Point>,
    /// Target zoom
    pub zoom: Option<f64>,
    /// Target bearing in degrees
    pub bearing: Option<f64>,
    /// Target pitch in degrees
    pub pitch: Option<f64>,
    /// Screen point zoom/bearing momentum is centered on; the map center
    /// when `None`
    pub around: Option<Point>,
    /// Animation length in milliseconds
    pub duration_ms: f64,
    pub easing: Easing,
    /// The animation continues a movement and must not fire `movestart`
    pub no_move_start: bool,
}

impl InertialEase {
    fn new() -> Self {
        Self {
            offset: None,
            zoom: None,
            bearing: None,
            pitch: None,
            around: None,
            duration_ms: 0.0,
            easing: Easing::inertia(),
            no_move_start: true,
        }
    }

    /// Keep the longest axis duration together with its easing
    fn extend_duration(&mut self, result: &InertiaResult) {
        if self.duration_ms == 0.0 || self.duration_ms < result.duration_ms {
            self.duration_ms = result.duration_ms;
            self.easing = result.easing;
        }
    }

    fn is_empty(&self) -> bool {
        self.offset.is_none()
            && self.zoom.is_none()
            && self.bearing.is_none()
            && self.pitch.is_none()
    }
}

/// Bounded history of recent camera changes
#[derive(Debug, Default)]
pub struct HandlerInertia {
    buffer: VecDeque<InertiaSample>,
}

impl HandlerInertia {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of retained samples
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Record a change applied at `now` milliseconds
    pub fn record(&mut self, now: f64, delta: &GestureDelta) {
        self.drain(now);
        self.buffer.push_back(InertiaSample {
            time: now,
            pan: delta.pan_delta,
            zoom: delta.zoom_delta.unwrap_or(0.0),
            bearing: delta.bearing_delta.unwrap_or(0.0),
            pitch: delta.pitch_delta.unwrap_or(0.0),
            around: delta.around,
            pinch_around: delta.pinch_around,
        });
    }

    fn drain(&mut self, now: f64) {
        while self
            .buffer
            .front()
            .map_or(false, |sample| now - sample.time > INERTIA_CUTOFF_MS)
        {
            self.buffer.pop_front();
        }
    }

    /// Fit a momentum animation to the recent samples
    ///
    /// Returns `None` when fewer than two samples remain in the window,
    /// when nothing moved, or when the host prefers reduced motion. The
    /// buffer is emptied whenever a fit is attempted.
    pub fn on_move_end(
        &mut self,
        now: f64,
        transform: &dyn MapTransform,
        pan_options: &InertiaOptions,
        reduced_motion: bool,
    ) -> Option<InertialEase> {
        if reduced_motion {
            self.clear();
            return None;
        }

        let mut ease = self.fit(now, pan_options)?;
        ease.zoom = ease.zoom.map(|amount| transform.zoom() + amount);
        ease.bearing = ease.bearing.map(|amount| transform.bearing() + amount);
        ease.pitch = ease.pitch.map(|amount| transform.pitch() + amount);
        Some(ease)
    }

    /// Momentum relative to the current camera
    fn fit(&mut self, now: f64, pan_options: &InertiaOptions) -> Option<InertialEase> {
        self.drain(now);
        if self.buffer.len() < 2 {
            self.clear();
            return None;
        }

        let mut pan = Point::ZERO;
        let (mut zoom, mut bearing, mut pitch) = (0.0, 0.0, 0.0);
        let mut around = None;
        let mut pinch_around = None;
        for sample in &self.buffer {
            if let Some(p) = sample.pan {
                pan += p;
            }
            zoom += sample.zoom;
            bearing += sample.bearing;
            pitch += sample.pitch;
            around = sample.around.or(around);
            pinch_around = sample.pinch_around.or(pinch_around);
        }

        let first = self.buffer.front().map_or(now, |s| s.time);
        let last = self.buffer.back().map_or(now, |s| s.time);
        let duration = last - first;
        self.clear();

        let mut ease = InertialEase::new();

        let pan_mag = pan.mag();
        if pan_mag != 0.0 {
            let result = calculate_easing(pan_mag, duration, pan_options);
            ease.offset = Some(pan * (result.amount / pan_mag));
            ease.extend_duration(&result);
        }

        if zoom != 0.0 {
            let result = calculate_easing(zoom, duration, &InertiaOptions::zoom());
            ease.zoom = Some(result.amount);
            ease.extend_duration(&result);
        }

        if bearing != 0.0 {
            let result = calculate_easing(bearing, duration, &InertiaOptions::bearing());
            ease.bearing = Some(result.amount.clamp(-MAX_BEARING_GLIDE, MAX_BEARING_GLIDE));
            ease.extend_duration(&result);
        }

        if pitch != 0.0 {
            let result = calculate_easing(pitch, duration, &InertiaOptions::pitch());
            ease.pitch = Some(result.amount);
            ease.extend_duration(&result);
        }

        if ease.zoom.is_some() || ease.bearing.is_some() {
            ease.around = pinch_around.or(around);
        }

        (!ease.is_empty()).then_some(ease)
    }
}
