//! Query and sample types passed between the host and the model.

use serde::{Deserialize, Serialize};

/// Value stored in every field of a sample that has no data.
pub const SENTINEL: f64 = -1.0;

/// A point to query, in WGS84 degrees and meters below the surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QueryPoint {
    pub longitude: f64,
    pub latitude: f64,
    /// Depth in meters, positive downwards.
    pub depth: f64,
}

impl QueryPoint {
    pub fn new(longitude: f64, latitude: f64, depth: f64) -> Self {
        Self {
            longitude,
            latitude,
            depth,
        }
    }
}

/// Material properties at a point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PropertySample {
    /// P-wave velocity in meters per second
    pub vp: f64,
    /// S-wave velocity in meters per second
    pub vs: f64,
    /// Density
    pub rho: f64,
    /// P-wave quality factor
    pub qp: f64,
    /// S-wave quality factor
    pub qs: f64,
}

impl PropertySample {
    /// The "no data" answer: every field set to [`SENTINEL`].
    pub const NO_DATA: Self = Self {
        vp: SENTINEL,
        vs: SENTINEL,
        rho: SENTINEL,
        qp: SENTINEL,
        qs: SENTINEL,
    };

    pub fn new(vp: f64, vs: f64, rho: f64, qp: f64, qs: f64) -> Self {
        Self {
            vp,
            vs,
            rho,
            qp,
            qs,
        }
    }

    /// Check if every field holds the sentinel.
    pub fn is_no_data(&self) -> bool {
        *self == Self::NO_DATA
    }

    /// Fields in (vp, vs, rho, qp, qs) order.
    pub fn to_array(&self) -> [f64; 5] {
        [self.vp, self.vs, self.rho, self.qp, self.qs]
    }
}

impl Default for PropertySample {
    fn default() -> Self {
        Self::NO_DATA
    }
}

/// A point in the projected (UTM) plane, in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanarPoint {
    pub easting: f64,
    pub northing: f64,
}

impl PlanarPoint {
    pub fn new(easting: f64, northing: f64) -> Self {
        Self { easting, northing }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &PlanarPoint) -> f64 {
        (self.easting - other.easting).hypot(self.northing - other.northing)
    }
}

/// The quadrilateral ground region covered by the grid, in projected meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Footprint {
    pub top_left: PlanarPoint,
    pub top_right: PlanarPoint,
    pub bottom_left: PlanarPoint,
    pub bottom_right: PlanarPoint,
}

impl Footprint {
    /// Corners in counter-clockwise order starting at the bottom-left.
    pub fn corners(&self) -> [PlanarPoint; 4] {
        [
            self.bottom_left,
            self.bottom_right,
            self.top_right,
            self.top_left,
        ]
    }

    /// Unsigned area of the quadrilateral (shoelace formula).
    pub fn area(&self) -> f64 {
        let c = self.corners();
        let mut twice = 0.0;
        for i in 0..4 {
            let a = c[i];
            let b = c[(i + 1) % 4];
            twice += a.easting * b.northing - b.easting * a.northing;
        }
        twice.abs() / 2.0
    }

    /// Length of the left edge (bottom-left to top-left).
    pub fn height(&self) -> f64 {
        self.bottom_left.distance_to(&self.top_left)
    }

    /// Length of the top edge (top-left to top-right).
    pub fn width(&self) -> f64 {
        self.top_left.distance_to(&self.top_right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(side: f64) -> Footprint {
        Footprint {
            top_left: PlanarPoint::new(0.0, side),
            top_right: PlanarPoint::new(side, side),
            bottom_left: PlanarPoint::new(0.0, 0.0),
            bottom_right: PlanarPoint::new(side, 0.0),
        }
    }

    #[test]
    fn test_no_data_sample() {
        let sample = PropertySample::default();
        assert!(sample.is_no_data());
        assert_eq!(sample.to_array(), [-1.0; 5]);

        let partial = PropertySample::new(-1.0, -1.0, -1.0, -1.0, 0.0);
        assert!(!partial.is_no_data());
    }

    #[test]
    fn test_footprint_dimensions() {
        let fp = square(1000.0);
        assert!((fp.width() - 1000.0).abs() < 1e-9);
        assert!((fp.height() - 1000.0).abs() < 1e-9);
        assert!((fp.area() - 1_000_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_degenerate_footprint_has_zero_area() {
        let p = PlanarPoint::new(5.0, 5.0);
        let fp = Footprint {
            top_left: p,
            top_right: p,
            bottom_left: p,
            bottom_right: p,
        };
        assert_eq!(fp.area(), 0.0);
    }
}
