//! Positions of the emitter and detectors of the simulated scanner.
//!
//! Emitter and detectors sit on a circle centred on the image, whose diameter
//! is the distance between the two farthest detectors. For a projection at
//! angle `theta` the emitter is at `theta`, and the detectors are spread
//! evenly over the half of the circle facing it:
//!
//! ```text
//! detector(theta, i) = theta + pi + (i - centre) * spacing
//! spacing            = pi / (2 * floor(n / 2))
//! centre             = floor(n / 2)
//! ```
//!
//! The detector at `centre` is diametrically opposite the emitter, so one ray
//! always passes through the middle of the image. With an odd number of
//! detectors the array is symmetric about that ray and its ends are a
//! diameter apart. With an even number the first detector is a quarter turn
//! from the emitter and the last one stops a step short of the opposite
//! quarter turn, so no detector ever coincides with the emitter.

use std::f64::consts::PI;

use crate::{Angle, Length, Point, ScanConfig};
use crate::ray::Ray;

/// Angular sampling of the half turn covered by one scan.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sweep {
    /// Angle of the first projection, in degrees
    pub start: f64,
    /// Angle between consecutive projections, in degrees
    pub step: f64,
    /// Number of projections
    pub n: usize,
}

impl Sweep {

    pub fn new(config: &ScanConfig) -> Self {
        Self {
            start: config.start_angle  as f64,
            step : config.rotate_angle as f64,
            n    : config.num_angles(),
        }
    }

    /// Angle of projection `k`, in degrees
    #[inline]
    pub fn angle(&self, k: usize) -> f64 { self.start + k as f64 * self.step }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scanner {
    /// Radius of the circle carrying emitter and detectors
    pub radius: Length,
    pub n_detectors: usize,
    /// Angular separation of neighbouring detectors, seen from the centre
    pub spacing: Angle,
    pub sweep: Sweep,
}

impl Scanner {

    pub fn new(config: &ScanConfig) -> Self {
        let n_detectors = config.detector_count;
        let half = n_detectors / 2;
        let spacing = if half > 0 { PI / (2 * half) as f64 } else { 0.0 };
        Self {
            radius: config.max_detector_span as Length / 2.0,
            n_detectors,
            spacing,
            sweep: Sweep::new(config),
        }
    }

    /// Index of the detector facing the emitter
    #[inline]
    pub fn central_detector(&self) -> usize { self.n_detectors / 2 }

    /// Position of the emitter at projection angle `theta` (degrees)
    #[inline]
    pub fn emitter(&self, theta: f64) -> Point {
        Point::on_circle(self.radius, theta.to_radians())
    }

    /// Position of detector `i` at projection angle `theta` (degrees)
    #[inline]
    pub fn detector(&self, theta: f64, i: usize) -> Point {
        let offset = (i as f64 - self.central_detector() as f64) * self.spacing;
        Point::on_circle(self.radius, theta.to_radians() + PI + offset)
    }

    #[inline]
    pub fn ray(&self, theta: f64, i: usize) -> Ray {
        Ray::new(self.emitter(theta), self.detector(theta, i))
    }

    /// The ray reaching detector `i` in projection number `k` of the sweep.
    /// Forward and backward projections both go through here, so that they
    /// see identical geometry.
    #[inline]
    pub fn ray_at(&self, k: usize, i: usize) -> Ray {
        self.ray(self.sweep.angle(k), i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use proptest::prelude::*;
    use float_eq::assert_float_eq;
    use std::f64::consts::SQRT_2;
    use crate::grid::Grid;

    fn scanner(detectors: usize) -> Scanner {
        Scanner::new(&ScanConfig::new(10, 0, detectors, 100))
    }

    #[test]
    fn sweep_angles() {
        let sweep = Sweep::new(&ScanConfig::new(40, 15, 3, 10));
        let angles: Vec<_> = (0..sweep.n).map(|k| sweep.angle(k)).collect();
        assert_eq!(angles, vec![15.0, 55.0, 95.0, 135.0, 175.0]);
    }

    #[rstest(/**/ detectors, central,
             case( 1, 0),
             case( 2, 1),
             case( 5, 2),
             case(64, 32),
    )]
    fn central_ray_passes_through_centre(detectors: usize, central: usize) {
        let s = scanner(detectors);
        assert_eq!(s.central_detector(), central);
        for theta in [0.0, 17.0, 90.0, 133.0, 270.0] {
            let ray = s.ray(theta, central);
            assert_float_eq!(ray.distance_from_origin(), 0.0, abs <= 1e-12);
        }
    }

    #[test]
    fn single_detector_faces_emitter() {
        let s = scanner(1);
        let ray = s.ray(30.0, 0);
        let (e, d) = (ray.emitter, ray.detector);
        assert_float_eq!((e.x + d.x, e.y + d.y), (0.0, 0.0), abs <= (1e-12, 1e-12));
    }

    #[test]
    fn farthest_detectors_are_one_diameter_apart() {
        let s = scanner(7);
        let span = (s.detector(25.0, 0) - s.detector(25.0, 6)).magnitude();
        assert_float_eq!(span, 100.0, rmax <= 1e-12);
    }

    #[test]
    fn odd_detector_array_is_symmetric_about_central_ray() {
        let s = scanner(9);
        let e = s.emitter(0.0);
        for i in 0..4 {
            let left  = s.detector(0.0, i);
            let right = s.detector(0.0, 8 - i);
            // Mirror images in the x-axis, equidistant from the emitter
            assert_float_eq!(left.x,  right.x, abs <= 1e-12);
            assert_float_eq!(left.y, -right.y, abs <= 1e-12);
            assert_float_eq!((left - e).magnitude(), (right - e).magnitude(), abs <= 1e-12);
        }
    }

    // Span equal to the diagonal of a 9x9 image
    #[rstest(/**/ detectors,
             case(2),
             case(4),
             case(5),
             case(64),
    )]
    fn rays_have_length_and_cross_the_image_at_axis_angles(detectors: usize) {
        let s = Scanner::new(&ScanConfig::new(10, 0, detectors, 13));
        let grid = Grid::new((9, 9));
        for theta in [0.0, 90.0, 180.0, 270.0] {
            for i in 0..detectors {
                let ray = s.ray(theta, i);
                assert!(ray.length() > 0.0, "theta {theta}, detector {i}");
                assert!(grid.clip(ray.emitter, ray.detector).is_some(), "theta {theta}, detector {i}: {ray}");
            }
        }
    }

    #[rstest(/**/ detectors,
             case(2),
             case(4),
             case(10),
    )]
    fn even_fan_starts_a_quarter_turn_from_the_emitter(detectors: usize) {
        let s = scanner(detectors);
        let e = s.emitter(40.0);
        assert_float_eq!((s.detector(40.0, 0) - e).magnitude(), 50.0 * SQRT_2, rmax <= 1e-12);
        // The other end stops short of the opposite quarter turn
        let last = (s.detector(40.0, detectors - 1) - e).magnitude();
        assert!(last > 50.0 * SQRT_2 + 1e-6, "{last}");
    }

    proptest! {
        // The shortest ray joins the emitter to a detector a quarter turn away
        #[test]
        fn no_detector_sits_near_the_emitter(
            theta in -360.0..(360.0 as f64),
            n     in 1..500_usize,
            i     in 0..500_usize,
        ) {
            let ray = scanner(n).ray(theta, i % n);
            prop_assert!(ray.length() >= 50.0 * SQRT_2 - 1e-9);
        }

        #[test]
        fn geometry_is_deterministic(
            theta in -720.0..(720.0 as f64),
            n     in 1..500_usize,
            i     in 0..500_usize,
            span  in 1..2000_u32,
        ) {
            let i = i % n;
            let s = Scanner::new(&ScanConfig::new(1, 0, n, span));
            prop_assert_eq!(s.ray(theta, i), s.ray(theta, i));
            let again = Scanner::new(&ScanConfig::new(1, 0, n, span));
            prop_assert_eq!(s.ray(theta, i), again.ray(theta, i));
        }

        #[test]
        fn all_endpoints_lie_on_the_circle(
            theta in 0.0..(360.0 as f64),
            n     in 1..300_usize,
            i     in 0..300_usize,
        ) {
            let s = scanner(n);
            let ray = s.ray(theta, i % n);
            for p in [ray.emitter, ray.detector] {
                prop_assert!(((p - Point::zero()).magnitude() - 50.0).abs() < 1e-9);
            }
        }
    }
}
