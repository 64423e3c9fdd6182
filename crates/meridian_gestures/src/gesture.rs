//! Gesture kinds and in-progress tracking

use meridian_platform::InputEvent;
use rustc_hash::FxHashMap;

use crate::handler::GestureDelta;
use crate::host::MapEventKind;

/// A gross camera action
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Gesture {
    Zoom,
    Drag,
    Pitch,
    Rotate,
}

impl Gesture {
    /// All gestures in event order
    pub const ALL: [Gesture; 4] = [Gesture::Zoom, Gesture::Drag, Gesture::Pitch, Gesture::Rotate];

    fn index(self) -> usize {
        match self {
            Gesture::Zoom => 0,
            Gesture::Drag => 1,
            Gesture::Pitch => 2,
            Gesture::Rotate => 3,
        }
    }

    /// `<gesture>start`
    pub fn start_event(self) -> MapEventKind {
        match self {
            Gesture::Zoom => MapEventKind::ZoomStart,
            Gesture::Drag => MapEventKind::DragStart,
            Gesture::Pitch => MapEventKind::PitchStart,
            Gesture::Rotate => MapEventKind::RotateStart,
        }
    }

    /// `<gesture>`
    pub fn event(self) -> MapEventKind {
        match self {
            Gesture::Zoom => MapEventKind::Zoom,
            Gesture::Drag => MapEventKind::Drag,
            Gesture::Pitch => MapEventKind::Pitch,
            Gesture::Rotate => MapEventKind::Rotate,
        }
    }

    /// `<gesture>end`
    pub fn end_event(self) -> MapEventKind {
        match self {
            Gesture::Zoom => MapEventKind::ZoomEnd,
            Gesture::Drag => MapEventKind::DragEnd,
            Gesture::Pitch => MapEventKind::PitchEnd,
            Gesture::Rotate => MapEventKind::RotateEnd,
        }
    }
}

/// Who is driving a gesture
#[derive(Clone, Debug, PartialEq)]
pub struct GestureInProgress {
    /// Registered name of the owning handler
    pub handler_name: String,
    /// Input event that produced the latest change (none for frame ticks)
    pub original_event: Option<InputEvent>,
}

/// Gesture → owner mapping
///
/// Iteration always follows [`Gesture::ALL`] order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EventsInProgress {
    slots: [Option<GestureInProgress>; 4],
}

impl EventsInProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, gesture: Gesture) -> Option<&GestureInProgress> {
        self.slots[gesture.index()].as_ref()
    }

    pub fn contains(&self, gesture: Gesture) -> bool {
        self.slots[gesture.index()].is_some()
    }

    pub fn insert(&mut self, gesture: Gesture, entry: GestureInProgress) {
        self.slots[gesture.index()] = Some(entry);
    }

    pub fn remove(&mut self, gesture: Gesture) -> Option<GestureInProgress> {
        self.slots[gesture.index()].take()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Present gestures in event order
    pub fn iter(&self) -> impl Iterator<Item = (Gesture, &GestureInProgress)> {
        Gesture::ALL
            .into_iter()
            .filter_map(move |g| self.get(g).map(|entry| (g, entry)))
    }

    /// The first present gesture, which speaks for overall movement
    pub fn moving(&self) -> Option<&GestureInProgress> {
        self.slots.iter().flatten().next()
    }

    pub fn is_moving(&self) -> bool {
        self.moving().is_some()
    }

    /// Overlay another map; its present gestures replace ours
    pub fn extend(&mut self, other: EventsInProgress) {
        for (slot, entry) in self.slots.iter_mut().zip(other.slots) {
            if entry.is_some() {
                *slot = entry;
            }
        }
    }

    /// Tag every gesture an axis of `delta` touches with its handler
    pub fn track(&mut self, delta: &GestureDelta, handler_name: &str, event: Option<&InputEvent>) {
        let entry = GestureInProgress {
            handler_name: handler_name.to_owned(),
            original_event: delta.original_event.clone().or_else(|| event.cloned()),
        };

        let touched = [
            (Gesture::Zoom, delta.zoom_delta.is_some()),
            (Gesture::Drag, delta.pan_delta.is_some()),
            (Gesture::Pitch, delta.pitch_delta.is_some()),
            (Gesture::Rotate, delta.bearing_delta.is_some()),
        ];
        for (gesture, hit) in touched {
            if hit {
                self.insert(gesture, entry.clone());
            }
        }
    }
}

/// Handlers that stopped being active, with the event that stopped them
///
/// The event is `None` when the deactivation happened on a frame tick.
pub type DeactivatedHandlers = FxHashMap<String, Option<InputEvent>>;
