//! Momentum physics
//!
//! A gesture that covered `amount` units over `duration` milliseconds is
//! turned into a glide that starts at a fraction (`linearity`) of the
//! gesture's speed and decelerates at a constant rate to rest.

use serde::{Deserialize, Serialize};

use crate::easing::Easing;

/// Configuration for a momentum glide along one axis
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InertiaOptions {
    /// Fraction of the release speed the glide starts with (0.0-1.0)
    pub linearity: f64,
    /// Curve applied to the glide
    pub easing: Easing,
    /// Deceleration in units per second squared
    pub deceleration: f64,
    /// Upper bound for the release speed in units per second
    pub max_speed: f64,
}

impl InertiaOptions {
    /// Create a new inertia configuration
    pub fn new(linearity: f64, easing: Easing, deceleration: f64, max_speed: f64) -> Self {
        Self {
            linearity,
            easing,
            deceleration,
            max_speed,
        }
    }

    /// Screen-pixel panning
    pub fn pan() -> Self {
        Self::new(0.3, Easing::inertia(), 2500.0, 1400.0)
    }

    /// Zoom levels
    pub fn zoom() -> Self {
        Self::new(0.3, Easing::inertia(), 20.0, 1400.0)
    }

    /// Bearing degrees
    pub fn bearing() -> Self {
        Self::new(0.3, Easing::inertia(), 1000.0, 360.0)
    }

    /// Pitch degrees
    pub fn pitch() -> Self {
        Self::new(0.3, Easing::inertia(), 1000.0, 90.0)
    }

    /// All parameters are finite and strictly positive
    pub fn is_valid(&self) -> bool {
        [self.linearity, self.deceleration, self.max_speed]
            .iter()
            .all(|v| v.is_finite() && *v > 0.0)
    }
}

impl Default for InertiaOptions {
    fn default() -> Self {
        Self::pan()
    }
}

/// A computed momentum glide
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InertiaResult {
    /// Distance the glide covers, signed like the input amount
    pub amount: f64,
    /// Glide duration in milliseconds
    pub duration_ms: f64,
    pub easing: Easing,
}

/// Turn a gesture's recent movement into a decelerating glide
///
/// `amount` is the distance covered during the sampled window and
/// `inertia_duration_ms` the length of that window. A zero-length window
/// yields the maximum speed.
pub fn calculate_easing(
    amount: f64,
    inertia_duration_ms: f64,
    options: &InertiaOptions,
) -> InertiaResult {
    let InertiaOptions {
        linearity,
        easing,
        deceleration,
        max_speed,
    } = *options;

    let speed = (amount * linearity / (inertia_duration_ms / 1000.0)).clamp(-max_speed, max_speed);
    let duration = speed.abs() / (deceleration * linearity);

    InertiaResult {
        easing,
        duration_ms: duration * 1000.0,
        amount: speed * (duration / 2.0),
    }
}
