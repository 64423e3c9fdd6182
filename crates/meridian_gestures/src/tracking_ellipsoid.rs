//! Drag tracking surface
//!
//! A drag anchored to an elevated point (a hillside, a rooftop) cannot be
//! tracked on the flat ground plane without the map running away from the
//! pointer. Instead, rays are intersected with a very flat ellipsoid
//! centered on the camera and sized so that it passes through the drag
//! origin.

use meridian_core::Vec3;

/// Oblate ellipsoid `x²/a² + y²/b² + z²/c² = r²` around the camera
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackingEllipsoid {
    /// Axis scaling `(a, b, c)`
    constants: Vec3,
    radius: f64,
}

impl Default for TrackingEllipsoid {
    fn default() -> Self {
        Self::new()
    }
}

impl TrackingEllipsoid {
    /// Vertical semi-axis is 1% of the horizontal ones
    pub const CONSTANTS: Vec3 = Vec3::new(1.0, 1.0, 0.01);

    pub fn new() -> Self {
        Self {
            constants: Self::CONSTANTS,
            radius: 0.0,
        }
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn constants(&self) -> Vec3 {
        self.constants
    }

    /// Size the ellipsoid around `center` so it passes through `point_on_surface`
    ///
    /// A surface point above the center (the camera sits below a peak) uses
    /// its horizontal distance only, which gives a calmer response.
    pub fn setup(&mut self, center: Vec3, point_on_surface: Vec3) {
        let center_to_surface = point_on_surface - center;
        self.radius = if center_to_surface.z < 0.0 {
            center_to_surface.div_elements(self.constants).length()
        } else {
            center_to_surface.horizontal().length()
        };
    }

    /// Intersect a ray cast from the center with the ellipsoid
    ///
    /// Rays that would exit through the upper half are folded back: the
    /// horizontal position is reflected about the rim so it keeps moving
    /// outward as the ray rises, instead of swinging back towards the
    /// center.
    pub fn project_ray(&self, dir: Vec3) -> Vec3 {
        let unit = dir.div_elements(self.constants).normalize();
        let mut intersection = unit.mul_elements(self.constants) * self.radius;

        if intersection.z > 0.0 {
            let h = Vec3::UP * intersection.dot(Vec3::UP);
            let r = intersection.horizontal().normalize() * self.radius;
            let p = intersection + ((r + h) - intersection) * 2.0;
            intersection.x = p.x;
            intersection.y = p.y;
        }

        intersection
    }
}
