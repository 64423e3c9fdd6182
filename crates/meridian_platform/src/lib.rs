//! Meridian Platform Input Layer
//!
//! Platform-agnostic input events consumed by the map interaction core.
//! Platform integrations (DOM, winit, mobile) translate their native events
//! into [`InputEvent`] values with positions already resolved relative to
//! the map container.
//!
//! # Event Kinds
//!
//! Every event maps to an [`InputKind`], the name gesture handlers dispatch
//! on. Document-level mouse moves and releases use the window variants
//! ([`InputKind::MouseMoveWindow`], [`InputKind::MouseUpWindow`]) so that a
//! drag can keep tracking the pointer after it leaves the map.
//!
//! The synthesized [`InputEvent::RenderFrame`] tick is delivered once per
//! serviced frame and carries no pointer positions.
//!
//! # Example
//!
//! ```
//! use meridian_platform::*;
//!
//! let down = InputEvent::Mouse(MouseEvent::new(MouseEventKind::Down, 40.0, 20.0, 12.0));
//! assert_eq!(down.kind(), InputKind::MouseDown);
//! assert_eq!(event_points(&down).len(), 1);
//! ```

mod input;
mod pointer;

pub use input::{
    InputEvent, InputKind, Key, KeyState, KeyboardEvent, Modifiers, MouseButton, MouseEvent,
    MouseEventKind, Touch, TouchEvent, TouchPhase, WheelDeltaMode, WheelEvent,
};
pub use pointer::{event_points, map_touches, PointerPositions};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::input::{
        InputEvent, InputKind, Key, KeyState, KeyboardEvent, Modifiers, MouseButton, MouseEvent,
        MouseEventKind, Touch, TouchEvent, TouchPhase, WheelDeltaMode, WheelEvent,
    };
    pub use crate::pointer::{event_points, map_touches, PointerPositions};
}
