//! Frame flush: combine queued changes and move the camera

use meridian_core::{lat_from_mercator_y, mercator_scale, Point, Vec3};
use tracing::{debug, trace};

use super::HandlerManager;
use crate::gesture::{DeactivatedHandlers, EventsInProgress, Gesture};
use crate::handler::GestureDelta;
use crate::host::MapHost;
use crate::transform::{ElevationReference, MapTransform, ProjectionKind};

/// Zoom changes smaller than this do not re-anchor on terrain
const ZOOM_EPSILON: f64 = 1e-4;

impl HandlerManager {
    /// Flush the change queue into one camera update
    ///
    /// Deltas add up in queue order; anchors and the original event take
    /// the last value that was set.
    pub(super) fn apply_changes(&mut self, host: &mut dyn MapHost) {
        let mut combined = GestureDelta::new();
        let mut events = EventsInProgress::new();
        let mut deactivated = DeactivatedHandlers::default();

        for change in self.changes.drain(..) {
            combined.merge(change.delta);
            events.extend(change.events);
            deactivated.extend(change.deactivated);
        }

        self.update_map_transform(host, combined, events, deactivated);
    }

    fn event_started(&self, events: &EventsInProgress, gesture: Gesture) -> bool {
        events.contains(gesture) && !self.events_in_progress.contains(gesture)
    }

    fn event_ended(&self, gesture: Gesture) -> bool {
        self.events_in_progress
            .get(gesture)
            .map_or(false, |entry| !self.registry.is_handler_active(&entry.handler_name))
    }

    fn update_map_transform(
        &mut self,
        host: &mut dyn MapHost,
        combined: GestureDelta,
        events: EventsInProgress,
        deactivated: DeactivatedHandlers,
    ) {
        let has_change = combined.has_change();

        if self.event_ended(Gesture::Drag) && !has_change {
            self.settle_after_drag(host);
        }

        // Catches double click/tap zooms while pushed against terrain
        if host.transform().is_camera_constrained() {
            host.stop_transitions();
        }

        if !has_change {
            self.fire_events(host, events, &deactivated, true);
            return;
        }

        let mut zoom_delta = combined.zoom_delta.unwrap_or(0.0);
        if host.transform().is_camera_constrained() {
            // Zooming in further would push into the terrain
            if zoom_delta > 0.0 {
                zoom_delta = 0.0;
            }
            host.transform_mut().clear_camera_constrained();
        }

        let around = combined.effective_around();
        let drag_needs_origin = combined.pan_delta.is_some() && self.drag_origin.is_none();
        if self.event_started(&events, Gesture::Zoom)
            || self.event_started(&events, Gesture::Drag)
            || drag_needs_origin
        {
            if let Some(around) = around {
                self.capture_drag_origin(host.transform(), around);
            }
        }

        host.transform_mut()
            .set_elevation_reference(ElevationReference::Sea);
        host.stop_transitions();

        let around = around.unwrap_or_else(|| host.transform().center_point());
        {
            let tr = host.transform_mut();
            if let Some(bearing_delta) = combined.bearing_delta.filter(|d| *d != 0.0) {
                tr.set_bearing(tr.bearing() + bearing_delta);
            }
            if let Some(pitch_delta) = combined.pitch_delta.filter(|d| *d != 0.0) {
                tr.set_pitch(tr.pitch() + pitch_delta);
            }
            tr.update_camera_state();
        }

        let pan_vec = match combined.pan_delta {
            Some(pan_delta) => self.pan_translation(host.transform(), around, pan_delta),
            None => Vec3::ZERO,
        };

        let zoom_before = host.transform().zoom();
        let zoom_vec = if zoom_delta != 0.0 {
            zoom_translation(host.transform(), around, combined.around_coord, zoom_delta)
        } else {
            Vec3::ZERO
        };

        let translation = pan_vec + zoom_vec;
        trace!(?translation, zoom_delta, "translating camera");
        {
            let tr = host.transform_mut();
            tr.translate_camera_constrained(translation);
            if zoom_delta != 0.0 && (tr.zoom() - zoom_before).abs() > ZOOM_EPSILON {
                tr.recenter_on_terrain();
            }
            tr.set_elevation_reference(ElevationReference::Ground);
        }
        // Release settles back to the zoom the latest zoom frame reached
        if zoom_delta != 0.0 {
            self.original_zoom = Some(host.transform().zoom());
        }

        host.update(false);
        if !combined.no_inertia {
            self.inertia.record(self.frame_time, &combined);
        }
        self.fire_events(host, events, &deactivated, true);
    }

    /// Pin the reference frame for the rest of a drag/zoom session
    fn capture_drag_origin(&mut self, tr: &dyn MapTransform, around: Point) {
        let origin = tr.point_coordinate_3d(around);
        self.drag_origin = Some(origin);
        self.original_zoom = Some(tr.zoom());
        self.tracking_ellipsoid.setup(tr.camera_position(), origin);
        debug!(
            ?origin,
            zoom = tr.zoom(),
            radius = self.tracking_ellipsoid.radius(),
            "captured drag origin"
        );
    }

    /// Re-anchor the camera height once a drag has finished
    fn settle_after_drag(&mut self, host: &mut dyn MapHost) {
        let tr = host.transform_mut();
        let zoom_before = tr.zoom();
        tr.set_elevation_reference(ElevationReference::Sea);

        match self.original_zoom {
            // Keep the session zoom on flat, untilted orthographic maps
            Some(zoom)
                if tr.orthographic_at_low_pitch()
                    && tr.projection() != ProjectionKind::Globe
                    && tr.pitch() == 0.0 =>
            {
                tr.set_elevation_reference(ElevationReference::Ground);
                tr.set_zoom(zoom);
            }
            _ => {
                tr.recenter_on_terrain();
                tr.set_elevation_reference(ElevationReference::Ground);
            }
        }

        // Terrain under the new center may have changed the zoom
        if tr.zoom() != zoom_before {
            debug!(from = zoom_before, to = tr.zoom(), "zoom settled after drag");
            host.update(true);
        }
    }

    /// World-space camera offset for a screen-space pan
    fn pan_translation(&self, tr: &dyn MapTransform, around: Point, pan_delta: Point) -> Vec3 {
        match tr.projection() {
            ProjectionKind::Mercator => {
                debug_assert!(
                    self.drag_origin.is_some(),
                    "drag origin must be captured before panning"
                );
                let start = self
                    .tracking_ellipsoid
                    .project_ray(tr.screen_point_to_mercator_ray(around).dir);
                let end = self
                    .tracking_ellipsoid
                    .project_ray(tr.screen_point_to_mercator_ray(around - pan_delta).dir);
                Vec3::new(end.x - start.x, end.y - start.y, 0.0)
            }
            ProjectionKind::Globe => {
                // Rotate faster near the poles so pixel speed stays constant
                let start_lat = tr
                    .point_coordinate(around)
                    .map_or_else(|| tr.center_lat(), |p| lat_from_mercator_y(p.y));
                let pan = pan_delta.rotate(-tr.angle());
                let scale = tr.pixels_per_mercator_pixel() / tr.world_size();
                Vec3::new(
                    -pan.x * mercator_scale(start_lat) * scale,
                    -pan.y * mercator_scale(tr.center_lat()) * scale,
                    0.0,
                )
            }
            ProjectionKind::Other => {
                match (tr.point_coordinate(around), tr.point_coordinate(around - pan_delta)) {
                    (Some(start), Some(end)) => Vec3::new(end.x - start.x, end.y - start.y, 0.0),
                    _ => Vec3::ZERO,
                }
            }
        }
    }
}

/// Camera offset that orbits towards the zoom anchor
///
/// Anchors at or above the camera height give no movement.
fn zoom_translation(
    tr: &dyn MapTransform,
    around: Point,
    around_coord: Option<Vec3>,
    zoom_delta: f64,
) -> Vec3 {
    let picked = around_coord.unwrap_or_else(|| tr.point_coordinate_3d(around));
    let dir = (picked - tr.camera_position()).normalize();
    if dir.z < 0.0 {
        dir * tr.zoom_delta_to_movement(picked, zoom_delta)
    } else {
        Vec3::ZERO
    }
}
