//! Gesture arbitration and frame batching
//!
//! The [`HandlerManager`] receives every input event, lets the registered
//! handlers react, merges their results and queues the merged change. When
//! the host services the requested frame it calls
//! [`HandlerManager::render_frame`], which applies all queued changes to
//! the camera at once and fires the lifecycle events.
//!
//! ```text
//! input event ──▶ dispatch ──▶ PendingChange queue
//!                                  │ render_frame
//!                                  ▼
//!                          camera update ──▶ lifecycle events
//! ```

mod camera;
mod events;

use meridian_core::Vec3;
use meridian_platform::{event_points, InputEvent, InputKind};
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::gesture::{DeactivatedHandlers, EventsInProgress, Gesture};
use crate::handler::{GestureDelta, SharedHandler};
use crate::host::MapHost;
use crate::inertia::HandlerInertia;
use crate::options::HandlerManagerOptions;
use crate::registry::HandlerRegistry;
use crate::tracking_ellipsoid::TrackingEllipsoid;

/// Names of handlers active during one pass
type ActiveHandlers = SmallVec<[String; 4]>;

/// One queued, merged change waiting for the next frame
struct PendingChange {
    delta: GestureDelta,
    events: EventsInProgress,
    deactivated: DeactivatedHandlers,
}

/// Arbitrates handlers and drives the camera
pub struct HandlerManager {
    registry: HandlerRegistry,
    options: HandlerManagerOptions,

    /// Gestures in progress as of the last flush
    events_in_progress: EventsInProgress,
    /// Handlers active after the previous event
    previous_active: ActiveHandlers,
    changes: Vec<PendingChange>,
    frame_pending: bool,

    inertia: HandlerInertia,
    tracking_ellipsoid: TrackingEllipsoid,
    /// World point under the anchor when the current drag/zoom started
    drag_origin: Option<Vec3>,
    /// Zoom when the current drag/zoom started
    original_zoom: Option<f64>,

    /// Set while a pass or the end-of-movement hand-off runs
    updating_camera: bool,
    /// Timestamp of the frame being flushed (ms)
    frame_time: f64,
}

impl HandlerManager {
    pub fn new(options: HandlerManagerOptions) -> Self {
        Self {
            registry: HandlerRegistry::new(),
            options,
            events_in_progress: EventsInProgress::new(),
            previous_active: ActiveHandlers::new(),
            changes: Vec::new(),
            frame_pending: false,
            inertia: HandlerInertia::new(),
            tracking_ellipsoid: TrackingEllipsoid::new(),
            drag_origin: None,
            original_zoom: None,
            updating_camera: false,
            frame_time: 0.0,
        }
    }

    pub fn options(&self) -> &HandlerManagerOptions {
        &self.options
    }

    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    /// Register a handler after all existing ones
    ///
    /// `allowed` names the handlers it may stay active alongside.
    pub fn add<I, S>(&mut self, name: impl Into<String>, handler: SharedHandler, allowed: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.registry.add(name, handler, allowed);
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Whether any handler is mid-gesture
    pub fn is_active(&self) -> bool {
        self.registry
            .iter()
            .any(|entry| entry.handler.borrow().is_active())
    }

    pub fn is_zooming(&self) -> bool {
        self.events_in_progress.contains(Gesture::Zoom)
    }

    pub fn is_rotating(&self) -> bool {
        self.events_in_progress.contains(Gesture::Rotate)
    }

    pub fn is_dragging(&self) -> bool {
        self.events_in_progress.contains(Gesture::Drag)
    }

    pub fn is_moving(&self) -> bool {
        self.events_in_progress.is_moving()
    }

    /// Whether a pass or the inertia hand-off is running right now
    pub fn is_updating_camera(&self) -> bool {
        self.updating_camera
    }

    /// Whether a frame flush has been requested and not yet serviced
    pub fn has_pending_frame(&self) -> bool {
        self.frame_pending
    }

    /// Number of queued changes waiting for the next frame
    pub fn pending_changes(&self) -> usize {
        self.changes.len()
    }

    // =========================================================================
    // Entry points
    // =========================================================================

    /// Reset every handler and end any movement
    ///
    /// Ignored while the manager itself is updating the camera.
    pub fn stop(&mut self, host: &mut dyn MapHost, allow_end_animation: bool) {
        if self.updating_camera {
            trace!("stop ignored while updating camera");
            return;
        }

        debug!(moving = self.is_moving(), "stopping gestures");
        for entry in self.registry.iter() {
            entry.handler.borrow_mut().reset();
        }
        self.inertia.clear();
        self.fire_events(
            host,
            EventsInProgress::new(),
            &DeactivatedHandlers::default(),
            allow_end_animation,
        );
        self.changes.clear();
        self.original_zoom = None;
    }

    /// Handle an event delivered to the map container
    pub fn handle_event(&mut self, host: &mut dyn MapHost, event: &InputEvent) {
        self.dispatch(host, event.kind(), event);
    }

    /// Handle a document-level event
    ///
    /// Mouse move/up outside the map reach handlers as
    /// [`InputKind::MouseMoveWindow`] / [`InputKind::MouseUpWindow`].
    pub fn handle_window_event(&mut self, host: &mut dyn MapHost, event: &InputEvent) {
        self.dispatch(host, event.kind().window_variant(), event);
    }

    /// Service the frame requested through [`MapHost::request_frame`]
    pub fn render_frame(&mut self, host: &mut dyn MapHost, time_stamp: f64) {
        self.frame_pending = false;
        self.frame_time = time_stamp;
        self.dispatch(host, InputKind::RenderFrame, &InputEvent::render_frame(time_stamp));
        self.apply_changes(host);
    }

    // =========================================================================
    // Arbitration
    // =========================================================================

    fn dispatch(&mut self, host: &mut dyn MapHost, kind: InputKind, event: &InputEvent) {
        if self.updating_camera {
            trace!(event = kind.name(), "event ignored while updating camera");
            return;
        }
        let is_render_frame = event.is_render_frame();
        if !self.options.interactive && !is_render_frame {
            return;
        }

        self.updating_camera = true;

        let input_event = (!is_render_frame).then(|| event.clone());
        let points = event_points(event);

        let mut merged = GestureDelta::new();
        let mut events = EventsInProgress::new();
        let mut active = ActiveHandlers::new();
        let mut needs_render_frame = false;

        for entry in self.registry.iter() {
            let mut handler = entry.handler.borrow_mut();
            if !handler.is_enabled() {
                continue;
            }

            let mut produced = false;
            if entry.is_blocked_by(active.iter().map(String::as_str)) {
                trace!(handler = %entry.name, event = kind.name(), "blocked");
                handler.reset();
            } else if let Some(delta) = handler.handle(kind, event, &points) {
                trace!(handler = %entry.name, event = kind.name(), ?delta, "delta");
                produced = true;
                needs_render_frame |= delta.needs_render_frame;
                events.track(&delta, &entry.name, input_event.as_ref());
                merged.merge(delta);
            }

            if produced || handler.is_active() {
                active.push(entry.name.clone());
            }
        }

        let mut deactivated = DeactivatedHandlers::default();
        for name in &self.previous_active {
            if !active.contains(name) {
                trace!(handler = %name, event = kind.name(), "deactivated");
                deactivated.insert(name.clone(), input_event.clone());
            }
        }

        if needs_render_frame {
            self.trigger_render_frame(host);
        }

        let has_change = merged.has_change();
        let any_active = !active.is_empty();
        self.previous_active = active;

        let camera_animation = merged.camera_animation.take();
        if !deactivated.is_empty() || has_change {
            self.changes.push(PendingChange {
                delta: merged,
                events,
                deactivated,
            });
            self.trigger_render_frame(host);
        }

        // Direct manipulation preempts animated transitions
        if any_active || has_change {
            host.stop_transitions();
        }

        self.updating_camera = false;

        if let Some(animation) = camera_animation {
            debug!(event = kind.name(), "running gesture camera animation");
            self.inertia.clear();
            self.fire_events(
                host,
                EventsInProgress::new(),
                &DeactivatedHandlers::default(),
                true,
            );
            self.changes.clear();
            animation(host);
        }
    }

    fn trigger_render_frame(&mut self, host: &mut dyn MapHost) {
        if !self.frame_pending {
            self.frame_pending = true;
            host.trigger_repaint();
            host.request_frame();
        }
    }
}

impl Default for HandlerManager {
    fn default() -> Self {
        Self::new(HandlerManagerOptions::default())
    }
}
