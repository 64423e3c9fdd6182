//! Meridian Gestures
//!
//! The map interaction core: it turns concurrently firing gesture handlers
//! into one camera update per frame and a well-ordered stream of lifecycle
//! events.
//!
//! # Architecture
//!
//! - **Handlers** ([`Handler`]) recognize gestures and return a
//!   [`GestureDelta`] per input event. They live outside this crate.
//! - **Registry** ([`HandlerRegistry`]) keeps handlers in priority order,
//!   each with the names it may run alongside.
//! - **Manager** ([`HandlerManager`]) arbitrates every event, queues the
//!   merged change and flushes the queue once per rendered frame.
//! - **Camera update** moves the host's [`MapTransform`], tracking drags on
//!   a [`TrackingEllipsoid`] and feeding [`HandlerInertia`].
//! - **Lifecycle events** ([`MapEvent`]) are delivered through
//!   [`MapHost::fire`].
//!
//! # Example
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use meridian_core::Point;
//! use meridian_gestures::{GestureDelta, Handler, HandlerManager, HandlerManagerOptions};
//! use meridian_platform::{InputEvent, InputKind};
//!
//! struct KeyboardPan;
//!
//! impl Handler for KeyboardPan {
//!     fn is_enabled(&self) -> bool {
//!         true
//!     }
//!     fn is_active(&self) -> bool {
//!         false
//!     }
//!     fn reset(&mut self) {}
//!     fn handle(&mut self, kind: InputKind, _: &InputEvent, _: &[Point]) -> Option<GestureDelta> {
//!         (kind == InputKind::KeyDown).then(|| GestureDelta::new().with_pan(Point::new(0.0, 100.0)))
//!     }
//! }
//!
//! let mut manager = HandlerManager::new(HandlerManagerOptions::default());
//! manager.add("keyboard", Rc::new(RefCell::new(KeyboardPan)), Vec::<String>::new());
//! assert_eq!(manager.registry().len(), 1);
//! ```

pub mod error;
pub mod gesture;
pub mod handler;
pub mod host;
pub mod inertia;
pub mod manager;
pub mod options;
pub mod registry;
pub mod tracking_ellipsoid;
pub mod transform;

pub use error::{ConfigError, Result};
pub use gesture::{DeactivatedHandlers, EventsInProgress, Gesture, GestureInProgress};
pub use handler::{CameraAnimation, GestureDelta, Handler, SharedHandler};
pub use host::{MapEvent, MapEventKind, MapHost};
pub use inertia::{HandlerInertia, InertialEase, INERTIA_CUTOFF_MS};
pub use manager::HandlerManager;
pub use options::{HandlerManagerOptions, PitchRotateKey};
pub use registry::{AllowList, HandlerRegistry, RegisteredHandler};
pub use tracking_ellipsoid::TrackingEllipsoid;
pub use transform::{ElevationReference, MapTransform, ProjectionKind};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::handler::{GestureDelta, Handler, SharedHandler};
    pub use crate::host::{MapEvent, MapEventKind, MapHost};
    pub use crate::inertia::InertialEase;
    pub use crate::manager::HandlerManager;
    pub use crate::options::HandlerManagerOptions;
    pub use crate::transform::{ElevationReference, MapTransform, ProjectionKind};
}
