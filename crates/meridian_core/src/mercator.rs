//! Web Mercator helpers
//!
//! Mercator y runs from 0 at the northern edge of the world square to 1 at
//! the southern edge.

use std::f64::consts::PI;

/// Latitude limit of the Web Mercator square (degrees)
pub const MAX_MERCATOR_LAT: f64 = 85.051129;

/// Converts a latitude in degrees to normalized Mercator y.
#[inline]
pub fn mercator_y_from_lat(lat: f64) -> f64 {
    (180.0 - (180.0 / PI) * (PI / 4.0 + lat * PI / 360.0).tan().ln()) / 360.0
}

/// Converts normalized Mercator y back to a latitude in degrees.
#[inline]
pub fn lat_from_mercator_y(y: f64) -> f64 {
    let y2 = 180.0 - y * 360.0;
    360.0 / PI * (y2 * PI / 180.0).exp().atan() - 90.0
}

/// Horizontal stretch of the projection at `lat` degrees.
///
/// A pixel at this latitude covers `1 / mercator_scale(lat)` of the ground
/// distance it covers at the equator.
#[inline]
pub fn mercator_scale(lat: f64) -> f64 {
    1.0 / (lat * PI / 180.0).cos()
}
