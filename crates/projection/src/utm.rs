//! Universal Transverse Mercator projection.
//!
//! Forward and inverse series follow Snyder, "Map Projections: A Working
//! Manual" (USGS PP 1395), equations 8-9 to 8-25. Accuracy is well below a
//! millimeter within a zone, which is all a regional velocity model spans.
//!
//! Only the northern-hemisphere false origin is used: points south of the
//! equator get negative northings rather than the 10 000 km false northing.

use crate::ProjectionError;
use std::f64::consts::PI;

/// UTM scale factor on the central meridian.
const K0: f64 = 0.9996;

/// False easting in meters.
const FALSE_EASTING: f64 = 500_000.0;

/// Reference ellipsoid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipsoid {
    /// Semi-major axis in meters
    pub a: f64,
    /// Flattening
    pub f: f64,
}

impl Ellipsoid {
    pub const WGS84: Ellipsoid = Ellipsoid {
        a: 6_378_137.0,
        f: 1.0 / 298.257_223_563,
    };

    /// First eccentricity squared.
    pub fn e2(&self) -> f64 {
        self.f * (2.0 - self.f)
    }

    /// Second eccentricity squared.
    pub fn ep2(&self) -> f64 {
        let e2 = self.e2();
        e2 / (1.0 - e2)
    }
}

/// Transverse Mercator projection for one UTM zone.
#[derive(Debug, Clone)]
pub struct TransverseMercator {
    /// UTM zone (1-60)
    pub zone: u32,
    /// Central meridian in radians
    pub lon0: f64,
    pub ellipsoid: Ellipsoid,
    e2: f64,
    ep2: f64,
    /// Meridian arc series coefficients
    m: [f64; 4],
    /// Footpoint latitude series coefficients
    e1: f64,
}

impl TransverseMercator {
    /// Create a UTM projection on the WGS84 ellipsoid.
    pub fn utm(zone: u32) -> Result<Self, ProjectionError> {
        Self::with_ellipsoid(zone, Ellipsoid::WGS84)
    }

    /// Create a UTM projection on an arbitrary ellipsoid.
    pub fn with_ellipsoid(zone: u32, ellipsoid: Ellipsoid) -> Result<Self, ProjectionError> {
        if !(1..=60).contains(&zone) {
            return Err(ProjectionError::InvalidZone(zone));
        }

        let lon0_deg = (zone as f64 - 1.0) * 6.0 - 180.0 + 3.0;
        let e2 = ellipsoid.e2();
        let e4 = e2 * e2;
        let e6 = e4 * e2;

        let m = [
            1.0 - e2 / 4.0 - 3.0 * e4 / 64.0 - 5.0 * e6 / 256.0,
            3.0 * e2 / 8.0 + 3.0 * e4 / 32.0 + 45.0 * e6 / 1024.0,
            15.0 * e4 / 256.0 + 45.0 * e6 / 1024.0,
            35.0 * e6 / 3072.0,
        ];

        let root = (1.0 - e2).sqrt();
        let e1 = (1.0 - root) / (1.0 + root);

        Ok(Self {
            zone,
            lon0: lon0_deg * PI / 180.0,
            ellipsoid,
            e2,
            ep2: ellipsoid.ep2(),
            m,
            e1,
        })
    }

    /// Central meridian of the zone in degrees.
    pub fn central_meridian_deg(&self) -> f64 {
        self.lon0.to_degrees()
    }

    /// Distance along the meridian from the equator to latitude `phi`.
    fn meridian_arc(&self, phi: f64) -> f64 {
        let m = &self.m;
        self.ellipsoid.a
            * (m[0] * phi - m[1] * (2.0 * phi).sin() + m[2] * (4.0 * phi).sin()
                - m[3] * (6.0 * phi).sin())
    }

    /// Convert geographic coordinates (degrees) to easting/northing (meters).
    pub fn forward(&self, lon_deg: f64, lat_deg: f64) -> (f64, f64) {
        let phi = lat_deg.to_radians();
        let lambda = lon_deg.to_radians();
        let a = self.ellipsoid.a;
        let ep2 = self.ep2;

        let (sin_phi, cos_phi) = phi.sin_cos();
        let tan_phi = phi.tan();

        let n = a / (1.0 - self.e2 * sin_phi * sin_phi).sqrt();
        let t = tan_phi * tan_phi;
        let c = ep2 * cos_phi * cos_phi;
        let aa = cos_phi * (lambda - self.lon0);
        let m = self.meridian_arc(phi);

        let a2 = aa * aa;
        let a3 = a2 * aa;
        let a4 = a3 * aa;
        let a5 = a4 * aa;
        let a6 = a5 * aa;

        let easting = K0
            * n
            * (aa + (1.0 - t + c) * a3 / 6.0
                + (5.0 - 18.0 * t + t * t + 72.0 * c - 58.0 * ep2) * a5 / 120.0)
            + FALSE_EASTING;

        let northing = K0
            * (m + n
                * tan_phi
                * (a2 / 2.0
                    + (5.0 - t + 9.0 * c + 4.0 * c * c) * a4 / 24.0
                    + (61.0 - 58.0 * t + t * t + 600.0 * c - 330.0 * ep2) * a6 / 720.0));

        (easting, northing)
    }

    /// Convert easting/northing (meters) back to geographic coordinates.
    ///
    /// Returns (lon, lat) in degrees.
    pub fn inverse(&self, easting: f64, northing: f64) -> (f64, f64) {
        let a = self.ellipsoid.a;
        let e2 = self.e2;
        let ep2 = self.ep2;
        let e1 = self.e1;

        let mu = northing / K0 / (a * self.m[0]);
        let phi1 = mu
            + (3.0 * e1 / 2.0 - 27.0 * e1.powi(3) / 32.0) * (2.0 * mu).sin()
            + (21.0 * e1 * e1 / 16.0 - 55.0 * e1.powi(4) / 32.0) * (4.0 * mu).sin()
            + (151.0 * e1.powi(3) / 96.0) * (6.0 * mu).sin()
            + (1097.0 * e1.powi(4) / 512.0) * (8.0 * mu).sin();

        let (sin_phi1, cos_phi1) = phi1.sin_cos();
        let tan_phi1 = phi1.tan();
        let denom = 1.0 - e2 * sin_phi1 * sin_phi1;

        let c1 = ep2 * cos_phi1 * cos_phi1;
        let t1 = tan_phi1 * tan_phi1;
        let n1 = a / denom.sqrt();
        let r1 = a * (1.0 - e2) / denom.powf(1.5);
        let d = (easting - FALSE_EASTING) / (n1 * K0);

        let d2 = d * d;
        let d3 = d2 * d;
        let d4 = d3 * d;
        let d5 = d4 * d;
        let d6 = d5 * d;

        let phi = phi1
            - (n1 * tan_phi1 / r1)
                * (d2 / 2.0
                    - (5.0 + 3.0 * t1 + 10.0 * c1 - 4.0 * c1 * c1 - 9.0 * ep2) * d4 / 24.0
                    + (61.0 + 90.0 * t1 + 298.0 * c1 + 45.0 * t1 * t1 - 252.0 * ep2
                        - 3.0 * c1 * c1)
                        * d6
                        / 720.0);

        let lambda = self.lon0
            + (d - (1.0 + 2.0 * t1 + c1) * d3 / 6.0
                + (5.0 - 2.0 * c1 + 28.0 * t1 - 3.0 * c1 * c1 + 8.0 * ep2 + 24.0 * t1 * t1)
                    * d5
                    / 120.0)
                / cos_phi1;

        (lambda.to_degrees(), phi.to_degrees())
    }
}
