//! The map that owns the camera and receives lifecycle events

use meridian_platform::InputEvent;

use crate::inertia::InertialEase;
use crate::transform::MapTransform;

/// Lifecycle event names
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MapEventKind {
    MoveStart,
    Move,
    MoveEnd,
    ZoomStart,
    Zoom,
    ZoomEnd,
    DragStart,
    Drag,
    DragEnd,
    PitchStart,
    Pitch,
    PitchEnd,
    RotateStart,
    Rotate,
    RotateEnd,
}

impl MapEventKind {
    pub fn name(&self) -> &'static str {
        match self {
            MapEventKind::MoveStart => "movestart",
            MapEventKind::Move => "move",
            MapEventKind::MoveEnd => "moveend",
            MapEventKind::ZoomStart => "zoomstart",
            MapEventKind::Zoom => "zoom",
            MapEventKind::ZoomEnd => "zoomend",
            MapEventKind::DragStart => "dragstart",
            MapEventKind::Drag => "drag",
            MapEventKind::DragEnd => "dragend",
            MapEventKind::PitchStart => "pitchstart",
            MapEventKind::Pitch => "pitch",
            MapEventKind::PitchEnd => "pitchend",
            MapEventKind::RotateStart => "rotatestart",
            MapEventKind::Rotate => "rotate",
            MapEventKind::RotateEnd => "rotateend",
        }
    }
}

/// A lifecycle event
#[derive(Clone, Debug, PartialEq)]
pub struct MapEvent {
    pub kind: MapEventKind,
    /// Input event behind this change, if any
    pub original_event: Option<InputEvent>,
}

impl MapEvent {
    pub fn new(kind: MapEventKind, original_event: Option<InputEvent>) -> Self {
        Self {
            kind,
            original_event,
        }
    }
}

/// The map as seen by the handler manager
///
/// The manager borrows the host for each call instead of holding on to it.
pub trait MapHost {
    fn transform(&self) -> &dyn MapTransform;
    fn transform_mut(&mut self) -> &mut dyn MapTransform;

    /// Deliver a lifecycle event to listeners
    fn fire(&mut self, event: MapEvent);

    /// Ask the renderer to draw another frame
    fn trigger_repaint(&mut self);

    /// Schedule a frame task that calls
    /// [`HandlerManager::render_frame`](crate::HandlerManager::render_frame)
    fn request_frame(&mut self);

    /// Cancel any in-flight animated transition (ease/fly)
    fn stop_transitions(&mut self);

    /// Re-render after a camera change
    fn update(&mut self, transform_changed: bool);

    /// Start the momentum animation that follows a gesture
    fn ease_to(&mut self, ease: InertialEase, original_event: Option<InputEvent>);

    /// Animate the bearing back to north
    fn reset_north(&mut self);

    /// Whether the user asked for reduced motion
    fn prefers_reduced_motion(&self) -> bool {
        false
    }
}
