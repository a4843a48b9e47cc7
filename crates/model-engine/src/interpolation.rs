//! Interpolation of property samples inside a grid cell.
//!
//! All five fields are interpolated independently. Sentinel values are not
//! treated specially: a corner without data is blended like any other.

use model_common::PropertySample;

/// Linearly interpolate from `x0` (at `percent = 0`) to `x1` (at
/// `percent = 1`).
pub fn linear_interpolation(percent: f64, x0: &PropertySample, x1: &PropertySample) -> PropertySample {
    let lerp = |a: f64, b: f64| (1.0 - percent) * a + percent * b;
    PropertySample {
        vp: lerp(x0.vp, x1.vp),
        vs: lerp(x0.vs, x1.vs),
        rho: lerp(x0.rho, x1.rho),
        qp: lerp(x0.qp, x1.qp),
        qs: lerp(x0.qs, x1.qs),
    }
}

/// Bilinearly interpolate a plane given as origin, +x, +y, +x+y.
pub fn bilinear_interpolation(
    x_percent: f64,
    y_percent: f64,
    four_points: &[PropertySample; 4],
) -> PropertySample {
    let near = linear_interpolation(x_percent, &four_points[0], &four_points[1]);
    let far = linear_interpolation(x_percent, &four_points[2], &four_points[3]);
    linear_interpolation(y_percent, &near, &far)
}

/// Trilinearly interpolate a cube given as the upper plane followed by the
/// lower plane, each in [`bilinear_interpolation`] order.
pub fn trilinear_interpolation(
    x_percent: f64,
    y_percent: f64,
    z_percent: f64,
    eight_points: &[PropertySample; 8],
) -> PropertySample {
    let [a, b, c, d, e, f, g, h] = *eight_points;
    let upper = bilinear_interpolation(x_percent, y_percent, &[a, b, c, d]);
    let lower = bilinear_interpolation(x_percent, y_percent, &[e, f, g, h]);
    linear_interpolation(z_percent, &upper, &lower)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(v: f64) -> PropertySample {
        PropertySample::new(v, v * 0.5, v * 0.25, v * 0.1, v * 0.05)
    }

    #[test]
    fn test_linear_endpoints() {
        let a = PropertySample::new(1.5, -2.0, 3.25, 1e6, -1.0);
        let b = PropertySample::new(-7.0, 11.0, 0.125, 3.0, 42.0);

        assert_eq!(linear_interpolation(0.0, &a, &b), a);
        assert_eq!(linear_interpolation(1.0, &a, &b), b);
    }

    #[test]
    fn test_linear_midpoint() {
        let mid = linear_interpolation(0.5, &sample(1000.0), &sample(2000.0));
        assert!((mid.vp - 1500.0).abs() < 1e-9);
        assert!((mid.vs - 750.0).abs() < 1e-9);
        assert!((mid.qs - 75.0).abs() < 1e-9);
    }

    #[test]
    fn test_bilinear_corners_and_center() {
        let plane = [sample(1.0), sample(2.0), sample(3.0), sample(4.0)];

        assert_eq!(bilinear_interpolation(0.0, 0.0, &plane), plane[0]);
        assert_eq!(bilinear_interpolation(1.0, 0.0, &plane), plane[1]);
        assert_eq!(bilinear_interpolation(0.0, 1.0, &plane), plane[2]);
        assert_eq!(bilinear_interpolation(1.0, 1.0, &plane), plane[3]);

        let center = bilinear_interpolation(0.5, 0.5, &plane);
        assert!((center.vp - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_trilinear_planes() {
        let cube = [
            sample(1.0),
            sample(2.0),
            sample(3.0),
            sample(4.0),
            sample(11.0),
            sample(12.0),
            sample(13.0),
            sample(14.0),
        ];

        assert_eq!(trilinear_interpolation(0.0, 0.0, 0.0, &cube), cube[0]);
        assert_eq!(trilinear_interpolation(1.0, 1.0, 1.0, &cube), cube[7]);

        let center = trilinear_interpolation(0.5, 0.5, 0.5, &cube);
        assert!((center.vp - 7.5).abs() < 1e-12);

        // Linear fields are reproduced exactly
        let p = trilinear_interpolation(0.25, 0.75, 0.4, &cube);
        let expected = 1.0 + 0.25 + 2.0 * 0.75 + 10.0 * 0.4;
        assert!((p.vp - expected).abs() < 1e-12);
    }

    #[test]
    fn test_uniform_cube() {
        let cube = [sample(1000.0); 8];
        let p = trilinear_interpolation(0.3, 0.6, 0.9, &cube);
        assert!((p.vp - 1000.0).abs() < 1e-9);
        assert!((p.rho - 250.0).abs() < 1e-9);
    }

    #[test]
    fn test_sentinel_corner_is_blended() {
        let mut cube = [sample(1000.0); 8];
        cube[0] = PropertySample::NO_DATA;
        let p = trilinear_interpolation(0.5, 0.5, 0.5, &cube);
        // One of eight corners at -1 instead of 1000
        assert!((p.vp - (7.0 * 1000.0 - 1.0) / 8.0).abs() < 1e-9);
    }
}
