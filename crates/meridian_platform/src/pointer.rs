//! Pointer position extraction

use meridian_core::Point;
use smallvec::SmallVec;

use crate::input::{InputEvent, Touch};

/// Pointer positions resolved for one event
pub type PointerPositions = SmallVec<[Point; 2]>;

/// Touches that belong to the map container
///
/// Touches that started on overlays outside the container are ignored so
/// that a finger resting on a toolbar does not turn a pan into a pinch.
pub fn map_touches(touches: &[Touch]) -> SmallVec<[Touch; 4]> {
    touches.iter().filter(|t| t.on_map).copied().collect()
}

/// Container-relative pointer positions for an event
///
/// - touch events yield one point per map touch
/// - mouse and wheel events yield the cursor position
/// - keyboard, blur and render frame events yield nothing
pub fn event_points(event: &InputEvent) -> PointerPositions {
    match event {
        InputEvent::Touch(e) => map_touches(&e.touches)
            .iter()
            .map(|t| Point::new(t.x, t.y))
            .collect(),
        InputEvent::Mouse(e) => smallvec::smallvec![Point::new(e.x, e.y)],
        InputEvent::Wheel(e) => smallvec::smallvec![Point::new(e.x, e.y)],
        InputEvent::Keyboard(_) | InputEvent::Blur { .. } | InputEvent::RenderFrame { .. } => {
            PointerPositions::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{MouseEvent, MouseEventKind, TouchEvent, TouchPhase};

    #[test]
    fn test_touches_outside_map_are_dropped() {
        let mut outside = Touch::new(2, 300.0, 10.0);
        outside.on_map = false;
        let event = InputEvent::Touch(TouchEvent::new(
            TouchPhase::Move,
            [Touch::new(1, 10.0, 20.0), outside],
            0.0,
        ));

        let points = event_points(&event);
        assert_eq!(points.as_slice(), &[Point::new(10.0, 20.0)]);
    }

    #[test]
    fn test_mouse_position() {
        let event = InputEvent::Mouse(MouseEvent::new(MouseEventKind::Move, 4.0, 8.0, 0.0));
        assert_eq!(event_points(&event).as_slice(), &[Point::new(4.0, 8.0)]);
    }

    #[test]
    fn test_render_frame_has_no_points() {
        assert!(event_points(&InputEvent::render_frame(1.0)).is_empty());
    }
}
