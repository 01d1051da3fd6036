use std::ops::{Add, Sub};
use crate::{Angle, Length, Vector};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: Length,
    pub y: Length,
}

impl Point {
    pub fn new(x: Length, y: Length) -> Self { Self { x, y } }
    pub fn zero() -> Self { Self::new(0.0, 0.0) }

    /// The point on the circle of radius `r` centred on the origin, at angle
    /// `phi` (radians, anticlockwise from the positive x-axis).
    pub fn on_circle(r: Length, phi: Angle) -> Self {
        let (sin, cos) = phi.sin_cos();
        Self::new(r * cos, r * sin)
    }

    /// Point reached by moving a fraction `t` of the way from `self` to `other`
    pub fn lerp(self, other: Self, t: f64) -> Self {
        self + (other - self) * t
    }
}

impl Sub for Point {
    type Output = Vector;
    fn sub(self, rhs: Self) -> Self::Output {
        Vector {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

impl Sub for &Point {
    type Output = Vector;
    fn sub(self, rhs: Self) -> Self::Output { *self - *rhs }
}

impl Add<Vector> for Point {
    type Output = Self;
    fn add(self, rhs: Vector) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl core::fmt::Display for Point {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "({:8.3} {:8.3})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use float_eq::assert_float_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[rstest(/**/ r  ,     phi     ,   x  ,   y  ,
             case(1.0,  0.0        ,  1.0 ,  0.0),
             case(2.0,  FRAC_PI_2  ,  0.0 ,  2.0),
             case(3.0,  PI         , -3.0 ,  0.0),
             case(4.0, -FRAC_PI_2  ,  0.0 , -4.0),
    )]
    fn points_on_circle(r: Length, phi: Angle, x: Length, y: Length) {
        let p = Point::on_circle(r, phi);
        assert_float_eq!((p.x, p.y), (x, y), abs <= (1e-12, 1e-12));
    }

    #[test]
    fn lerp_endpoints_and_midpoint() {
        let a = Point::new(-2.0, 1.0);
        let b = Point::new( 4.0, 5.0);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), Point::new(1.0, 3.0));
    }
}
