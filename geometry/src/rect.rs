use crate::{Length, Point, Vector};

/// Axis-aligned rectangle centred on the origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub half_width: Vector,
}

/// The part of a segment lying inside a `Rect`, expressed as fractions of the
/// way from the segment's first point to its second.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Span {
    pub enter: f64,
    pub exit : f64,
}

impl Rect {

    pub fn new(width: Length, height: Length) -> Self {
        Self { half_width: Vector::new(width / 2.0, height / 2.0) }
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x.abs() <= self.half_width.x && p.y.abs() <= self.half_width.y
    }

    /// Clip the segment `p1`-`p2` to this rectangle (slab method). `None` if
    /// the segment misses, or merely grazes, the rectangle.
    pub fn clip(&self, p1: Point, p2: Point) -> Option<Span> {
        let d = p2 - p1;
        let (mut enter, mut exit) = (0.0_f64, 1.0_f64);
        for dim in 0..2 {
            let (start, h) = (if dim == 0 { p1.x } else { p1.y }, self.half_width[dim]);
            if d[dim] == 0.0 {
                // Parallel to this slab: either always inside it or never
                if start.abs() >= h { return None }
                continue;
            }
            let a = (-h - start) / d[dim];
            let b = ( h - start) / d[dim];
            let (near, far) = if a < b { (a, b) } else { (b, a) };
            enter = enter.max(near);
            exit  = exit .min(far);
        }
        if exit > enter { Some(Span { enter, exit }) }
        else            { None }
    }

    /// Length of the part of segment `p1`-`p2` which lies inside the rectangle
    pub fn intersection_length(&self, p1: Point, p2: Point) -> Length {
        self.clip(p1, p2)
            .map_or(0.0, |Span { enter, exit }| (exit - enter) * (p2 - p1).magnitude())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use proptest::prelude::*;
    use float_eq::assert_float_eq;

    #[rstest(/**/   x1 ,   y1 ,   x2 ,  y2 ,   w  ,   h ,  expected,
             case(-10.0,  0.0,  10.0,  0.0,   4.0,  2.0,  4.0), // along horizontal axis
             case(  0.0,-10.0,   0.0, 10.0,   4.0,  2.0,  2.0), // along vertical axis
             case(-10.0,-10.0,  10.0, 10.0,   2.0,  2.0,  2.0 * 2.0_f64.sqrt()), // diagonal
             case(-10.0,  5.0,  10.0,  5.0,   4.0,  2.0,  0.0), // miss above
             case(  3.0,-10.0,   3.0, 10.0,   4.0,  2.0,  0.0), // miss on right
             case(  0.0,  0.0,  10.0,  0.0,   4.0,  2.0,  2.0), // starts inside
             case(-10.0,  1.0,  10.0,  1.0,   4.0,  2.0,  0.0), // grazes top edge
    )]
    fn segment_rectangle_intersection_length(
        x1: f64, y1: f64, x2: f64, y2: f64,
        w: f64, h: f64,
        expected: f64,
    ) {
        let rect = Rect::new(w, h);
        let calculated = rect.intersection_length(Point::new(x1, y1), Point::new(x2, y2));
        assert_float_eq!(calculated, expected, abs <= 1e-12);
    }

    proptest! {
        #[test]
        fn clipped_endpoints_lie_on_the_boundary(
            r   in  20.0..(50.0 as f64),
            phi in   0.0..(std::f64::consts::TAU),
            dphi in  2.5..(3.8 as f64),
            w   in   5.0..(25.0 as f64),
            h   in   5.0..(25.0 as f64),
        ) {
            let p1 = Point::on_circle(r, phi);
            let p2 = Point::on_circle(r, phi + dphi);
            let rect = Rect::new(w, h);
            if let Some(Span { enter, exit }) = rect.clip(p1, p2) {
                for t in [enter, exit] {
                    let p = p1.lerp(p2, t);
                    let on_x = (p.x.abs() - w / 2.0).abs() < 1e-9;
                    let on_y = (p.y.abs() - h / 2.0).abs() < 1e-9;
                    prop_assert!(on_x || on_y);
                    prop_assert!(rect.contains(Point::new(p.x * (1.0 - 1e-12), p.y * (1.0 - 1e-12))));
                }
            }
        }
    }
}
