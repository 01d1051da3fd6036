use geometry::Dot;
use crate::{Length, Point, Vector};

/// Straight path from the emitter to one detector.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub emitter: Point,
    pub detector: Point,
}

impl Ray {
    pub fn new(emitter: Point, detector: Point) -> Self { Self { emitter, detector } }

    pub fn direction(&self) -> Vector { self.detector - self.emitter }

    pub fn length(&self) -> Length { self.direction().magnitude() }

    /// Perpendicular distance between the line carrying the ray and the origin
    /// (the centre of the image)
    pub fn distance_from_origin(&self) -> Length {
        let d = self.direction();
        let normal = Vector::new(-d.y, d.x).normalize();
        (self.emitter - Point::zero()).dot(normal).abs()
    }
}

use core::fmt;
impl fmt::Display for Ray {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "<Ray {} -> {} /{:7.2} >", self.emitter, self.detector, self.length())
    }
}
