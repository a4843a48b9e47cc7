//! The model's local planar frame.
//!
//! A model footprint is a (possibly rotated) rectangle in UTM meters. The
//! local frame puts the footprint's bottom-left corner at the origin and
//! rotates so the left edge lies along +y and the top edge along +x. A point
//! inside the footprint then falls in `[0, total_width_m] x [0, total_height_m]`.

use crate::utm::TransverseMercator;
use crate::ProjectionError;
use model_common::{Footprint, ModelConfiguration, PlanarPoint};
use nalgebra::{Rotation2, Vector2};

/// Geometry computed once from the footprint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryDerived {
    /// Angle of the left edge from grid north, in radians.
    pub rotation_angle: f64,
    /// Length of the top edge in meters.
    pub total_width_m: f64,
    /// Length of the left edge in meters.
    pub total_height_m: f64,
}

impl GeometryDerived {
    /// Derive the frame geometry from a footprint.
    ///
    /// Only the left edge sets the rotation. A footprint that is not a
    /// parallelogram is accepted as-is; its right edge is not checked.
    pub fn from_footprint(footprint: &Footprint) -> Self {
        let north_height_m = footprint.top_left.northing - footprint.bottom_left.northing;
        let east_width_m = footprint.top_left.easting - footprint.bottom_left.easting;

        Self {
            rotation_angle: (east_width_m / north_height_m).atan(),
            total_width_m: footprint.width(),
            total_height_m: footprint.height(),
        }
    }
}

/// Transforms geographic coordinates into a model's local frame.
#[derive(Debug, Clone)]
pub struct LocalFrame {
    projection: TransverseMercator,
    origin: PlanarPoint,
    rotation: Rotation2<f64>,
    geometry: GeometryDerived,
}

impl LocalFrame {
    /// Build the frame for a footprint given in `projection` coordinates.
    pub fn new(projection: TransverseMercator, footprint: &Footprint) -> Result<Self, ProjectionError> {
        let geometry = GeometryDerived::from_footprint(footprint);

        if !(geometry.total_width_m > 0.0 && geometry.total_height_m > 0.0) {
            return Err(ProjectionError::DegenerateFootprint(format!(
                "width {} m, height {} m",
                geometry.total_width_m, geometry.total_height_m
            )));
        }
        if !geometry.rotation_angle.is_finite() {
            return Err(ProjectionError::DegenerateFootprint(
                "left edge has no direction".to_string(),
            ));
        }

        Ok(Self {
            projection,
            origin: footprint.bottom_left,
            rotation: Rotation2::new(geometry.rotation_angle),
            geometry,
        })
    }

    /// Build the frame described by a model configuration (WGS84 UTM).
    pub fn from_config(config: &ModelConfiguration) -> Result<Self, ProjectionError> {
        let projection = TransverseMercator::utm(config.utm_zone)?;
        Self::new(projection, &config.footprint)
    }

    pub fn geometry(&self) -> &GeometryDerived {
        &self.geometry
    }

    pub fn projection(&self) -> &TransverseMercator {
        &self.projection
    }

    pub fn total_width_m(&self) -> f64 {
        self.geometry.total_width_m
    }

    pub fn total_height_m(&self) -> f64 {
        self.geometry.total_height_m
    }

    /// Convert geographic coordinates (degrees) to local (e, n) meters.
    pub fn geographic_to_local(&self, lon_deg: f64, lat_deg: f64) -> (f64, f64) {
        let (easting, northing) = self.projection.forward(lon_deg, lat_deg);
        self.planar_to_local(PlanarPoint::new(easting, northing))
    }

    /// Convert a projected point to local (e, n) meters.
    pub fn planar_to_local(&self, point: PlanarPoint) -> (f64, f64) {
        let offset = Vector2::new(
            point.easting - self.origin.easting,
            point.northing - self.origin.northing,
        );
        let local = self.rotation * offset;
        (local.x, local.y)
    }

    /// Convert local (e, n) meters back to a projected point.
    pub fn local_to_planar(&self, e: f64, n: f64) -> PlanarPoint {
        let offset = self.rotation.inverse_transform_vector(&Vector2::new(e, n));
        PlanarPoint::new(self.origin.easting + offset.x, self.origin.northing + offset.y)
    }

    /// Convert local (e, n) meters back to geographic coordinates.
    ///
    /// Returns (lon, lat) in degrees.
    pub fn local_to_geographic(&self, e: f64, n: f64) -> (f64, f64) {
        let planar = self.local_to_planar(e, n);
        self.projection.inverse(planar.easting, planar.northing)
    }
}
