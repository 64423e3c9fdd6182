//! Camera contract consumed by the camera update

use meridian_core::{Point, Ray, Vec3};

/// What camera height is measured against
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ElevationReference {
    /// Mean sea level; used while a delta is applied
    Sea,
    /// The terrain surface under the map center
    #[default]
    Ground,
}

/// Projection the map is rendered with
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ProjectionKind {
    /// Planar Web Mercator
    #[default]
    Mercator,
    /// Spherical globe
    Globe,
    /// Any other planar projection
    Other,
}

/// The map camera/transform
///
/// Owned by the host. Only the camera update mutates it, and only while a
/// frame is being flushed. World coordinates are Mercator units with z up.
pub trait MapTransform {
    fn zoom(&self) -> f64;
    fn set_zoom(&mut self, zoom: f64);

    /// Degrees clockwise from north
    fn bearing(&self) -> f64;
    fn set_bearing(&mut self, bearing: f64);

    /// Degrees away from looking straight down
    fn pitch(&self) -> f64;
    fn set_pitch(&mut self, pitch: f64);

    /// Screen rotation in radians (`-bearing`)
    fn angle(&self) -> f64 {
        -self.bearing().to_radians()
    }

    /// Latitude of the map center in degrees
    fn center_lat(&self) -> f64;

    /// Screen position of the map center
    fn center_point(&self) -> Point;

    fn elevation_reference(&self) -> ElevationReference;
    fn set_elevation_reference(&mut self, reference: ElevationReference);

    /// Recompute camera matrices after zoom/bearing/pitch changed
    fn update_camera_state(&mut self);

    fn projection(&self) -> ProjectionKind;

    /// Whether the camera renders orthographically at its current low pitch
    ///
    /// Perspective cameras report `false`.
    fn orthographic_at_low_pitch(&self) -> bool {
        false
    }

    /// Camera position in world units
    fn camera_position(&self) -> Vec3;

    /// Ground-plane coordinate under a screen point, if the point hits the
    /// ground
    fn point_coordinate(&self, point: Point) -> Option<Vec3>;

    /// World coordinate under a screen point, terrain included
    fn point_coordinate_3d(&self, point: Point) -> Vec3;

    /// Ray from the camera through a screen point
    fn screen_point_to_mercator_ray(&self, point: Point) -> Ray;

    /// Distance to move along the view ray towards `center` for a zoom
    /// change of `zoom_delta` levels
    fn zoom_delta_to_movement(&self, center: Vec3, zoom_delta: f64) -> f64;

    /// Move the camera, honoring collision constraints
    fn translate_camera_constrained(&mut self, translation: Vec3);

    /// Re-derive center and zoom from the terrain under the camera
    fn recenter_on_terrain(&mut self);

    /// Whether the last translation was cut short by a constraint
    fn is_camera_constrained(&self) -> bool;
    fn clear_camera_constrained(&mut self);

    /// Ratio of rendered pixels to Mercator pixels at the center
    fn pixels_per_mercator_pixel(&self) -> f64;

    /// Size of the world square in pixels at the current zoom
    fn world_size(&self) -> f64;
}
