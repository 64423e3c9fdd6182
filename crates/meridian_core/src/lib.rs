//! Meridian Core
//!
//! Foundational value types shared by the Meridian map interaction crates:
//!
//! - **Screen geometry**: [`Point`] in container pixels (x right, y down)
//! - **World geometry**: [`Vec3`] and [`Ray`] in Mercator world units (z up)
//! - **Web Mercator**: the handful of projection helpers the camera update needs
//!
//! # Example
//!
//! ```rust
//! use meridian_core::{Point, Vec3};
//!
//! let drag = Point::new(10.0, -4.0);
//! assert_eq!((drag * 2.0).x, 20.0);
//!
//! let up = Vec3::new(0.0, 0.0, 3.0).normalize();
//! assert_eq!(up, Vec3::UP);
//! ```

pub mod geometry;
pub mod mercator;

pub use geometry::{Point, Ray, Vec3};
pub use mercator::{lat_from_mercator_y, mercator_scale, mercator_y_from_lat, MAX_MERCATOR_LAT};
