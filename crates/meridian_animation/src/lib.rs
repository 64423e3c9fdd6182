//! Meridian Animation
//!
//! Easing curves and momentum physics used when a direct-manipulation
//! gesture hands the camera over to an animation.
//!
//! # Features
//!
//! - **Easing**: linear and cubic-bezier timing curves, solved like CSS
//!   `cubic-bezier()`
//! - **Inertia**: converts the distance a gesture covered over a short
//!   window into a decelerating glide (distance, duration, easing)

pub mod easing;
pub mod inertia;

pub use easing::Easing;
pub use inertia::{calculate_easing, InertiaOptions, InertiaResult};
