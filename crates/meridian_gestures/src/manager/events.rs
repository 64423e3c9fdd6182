//! Lifecycle events derived from gesture transitions

use meridian_platform::InputEvent;
use smallvec::SmallVec;
use tracing::debug;

use super::HandlerManager;
use crate::gesture::{DeactivatedHandlers, EventsInProgress, Gesture};
use crate::host::{MapEvent, MapEventKind, MapHost};

type QueuedEvents = SmallVec<[(MapEventKind, Option<InputEvent>); 4]>;

impl HandlerManager {
    /// Fire start/change/end events for the gestures of one flush
    ///
    /// `new_events` are the gestures touched since the last flush; gestures
    /// whose handler is no longer active end here. When all movement has
    /// stopped, momentum takes over or `moveend` fires.
    pub(super) fn fire_events(
        &mut self,
        host: &mut dyn MapHost,
        new_events: EventsInProgress,
        deactivated: &DeactivatedHandlers,
        allow_end_animation: bool,
    ) {
        let was_moving = self.events_in_progress.is_moving();
        let moving_event = new_events
            .moving()
            .map(|entry| entry.original_event.clone());
        let now_moving = moving_event.is_some();

        let mut start_events = QueuedEvents::new();
        for (gesture, entry) in new_events.iter() {
            if !self.events_in_progress.contains(gesture) {
                debug!(?gesture, handler = %entry.handler_name, "gesture started");
                start_events.push((gesture.start_event(), entry.original_event.clone()));
            }
        }
        // Update before firing so listeners observe the current state
        self.events_in_progress.extend(new_events.clone());

        if let Some(original_event) = &moving_event {
            if !was_moving {
                host.fire(MapEvent::new(MapEventKind::MoveStart, original_event.clone()));
            }
        }

        for (kind, original_event) in start_events {
            host.fire(MapEvent::new(kind, original_event));
        }

        if let Some(original_event) = moving_event {
            host.fire(MapEvent::new(MapEventKind::Move, original_event));
        }

        for (gesture, entry) in new_events.iter() {
            host.fire(MapEvent::new(gesture.event(), entry.original_event.clone()));
        }

        let mut end_events = QueuedEvents::new();
        let mut original_end_event = None;
        for gesture in Gesture::ALL {
            let ended = self
                .events_in_progress
                .get(gesture)
                .map_or(false, |entry| !self.registry.is_handler_active(&entry.handler_name));
            if !ended {
                continue;
            }
            if let Some(entry) = self.events_in_progress.remove(gesture) {
                debug!(?gesture, handler = %entry.handler_name, "gesture ended");
                let end_event = deactivated
                    .get(&entry.handler_name)
                    .cloned()
                    .flatten()
                    .or(entry.original_event);
                original_end_event = end_event.clone();
                end_events.push((gesture.end_event(), end_event));
            }
        }

        for (kind, original_event) in end_events {
            host.fire(MapEvent::new(kind, original_event));
        }

        let still_moving = self.events_in_progress.is_moving();
        if allow_end_animation && (was_moving || now_moving) && !still_moving {
            self.end_movement(host, original_end_event);
        }
    }

    /// Hand off to momentum, or finish with `moveend`
    fn end_movement(&mut self, host: &mut dyn MapHost, original_event: Option<InputEvent>) {
        self.updating_camera = true;

        let bearing_snap = self.options.bearing_snap;
        let should_snap_to_north =
            |bearing: f64| bearing != 0.0 && -bearing_snap < bearing && bearing < bearing_snap;

        let reduced_motion = host.prefers_reduced_motion();
        let ease = self.inertia.on_move_end(
            self.frame_time,
            host.transform(),
            &self.options.pan_inertia,
            reduced_motion,
        );

        match ease {
            Some(mut ease) => {
                let bearing = ease
                    .bearing
                    .filter(|b| *b != 0.0)
                    .unwrap_or_else(|| host.transform().bearing());
                if should_snap_to_north(bearing) {
                    ease.bearing = Some(0.0);
                }
                debug!(duration_ms = ease.duration_ms, "handing off to inertia");
                host.ease_to(ease, original_event);
            }
            None => {
                host.fire(MapEvent::new(MapEventKind::MoveEnd, original_event));
                if should_snap_to_north(host.transform().bearing()) {
                    host.reset_north();
                }
            }
        }

        self.updating_camera = false;
    }
}
