//! Discrete line walk through the grid, in the manner of Bresenham's and DDA
//! line drawing: step one pixel at a time along the ray's major axis, and pick
//! the pixel whose centre line is crossed nearest to the ray on the minor
//! axis. Every pixel visited gets unit weight.

use geometry::Span;

use crate::{grid::Grid, ray::Ray};

use super::{SystemMatrix, SystemMatrixRow};

pub struct Bresenham;

impl SystemMatrix for Bresenham {

    fn update_system_matrix_row(
        system_matrix_row: &mut SystemMatrixRow,
        ray : &Ray,
        grid: &Grid,
    ) {
        system_matrix_row.clear();

        let Some(Span { enter, exit }) = grid.clip(ray.emitter, ray.detector) else { return };

        // Clipped segment in grid coordinates
        let a = grid.to_grid(ray.emitter.lerp(ray.detector, enter));
        let b = grid.to_grid(ray.emitter.lerp(ray.detector, exit));
        let d = [b.x - a.x, b.y - a.y];

        let major = if d[0].abs() >= d[1].abs() { 0 } else { 1 };
        let minor = 1 - major;
        if d[major] == 0.0 { return }

        // Pixels along the major axis whose centres lie on the clipped segment
        let (lo, hi) = (a[major].min(b[major]), a[major].max(b[major]));
        let first = (lo - 0.5).ceil().max(0.0);
        let last  = (hi - 0.5).floor().min(grid.n(major) as f64 - 1.0);
        if last < first { return }
        let (first, last) = (first as usize, last as usize);

        let mut visit = |c: usize| {
            let centre = c as f64 + 0.5;
            let t = (centre - a[major]) / d[major];
            let j = grid.pixel_along(minor, a[minor] + t * d[minor]);
            let [u, v] = if major == 0 { [c, j] } else { [j, c] };
            system_matrix_row.0.push(([v, u], 1.0));
        };

        // Walk from the emitter's end
        if d[major] > 0.0 { (first..=last)      .for_each(&mut visit) }
        else              { (first..=last).rev().for_each(&mut visit) }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{Point, Sampling};
    #[allow(unused)] use pretty_assertions::{assert_eq, assert_ne};
    use rstest::rstest;

    fn walk(p1: (f64, f64), p2: (f64, f64), shape: (usize, usize)) -> Vec<(usize, usize)> {
        let ray = Ray::new(Point::new(p1.0, p1.1), Point::new(p2.0, p2.1));
        SystemMatrixRow::new(Sampling::Bresenham, &ray, &Grid::new(shape))
            .into_iter()
            .inspect(|(_, w)| assert_eq!(*w, 1.0))
            .map(|([r, c], _)| (r, c))
            .collect()
    }

    #[rstest(/**/      p1       ,      p2       , shape , expected_pixels,
             case((-30.0,   0.0), ( 30.0,   0.0), (3,4), vec![(1,0), (1,1), (1,2), (1,3)]),
             case(( 30.0,   0.0), (-30.0,   0.0), (3,4), vec![(1,3), (1,2), (1,1), (1,0)]),
             case((  0.2,  30.0), (  0.2, -30.0), (3,3), vec![(0,1), (1,1), (2,1)]),
             case((-30.0, -30.0), ( 30.0,  30.0), (3,3), vec![(2,0), (1,1), (0,2)]),
             // steep: rows are the major axis, columns drift by one
             case((-3.0, -30.0), (  3.0,  30.0), (5,2), vec![(4,0), (3,0), (2,1), (1,1), (0,1)]),
             case((-30.0,  20.0), ( 30.0,  20.0), (3,3), vec![]),
    )]
    fn hand_picked(p1: (f64, f64), p2: (f64, f64), shape: (usize, usize), expected_pixels: Vec<(usize, usize)>) {
        assert_eq!(walk(p1, p2, shape), expected_pixels);
    }

    use proptest::prelude::*;
    use itertools::Itertools;
    proptest! {
        // Consecutive samples are 8-connected neighbours, one step apart
        // along the major axis
        #[test]
        fn walk_is_connected(
            r        in  100.0..(200.0 as f64),
            p1_angle in 0.0..(1.0 as f64),
            p2_delta in 0.2..(0.8 as f64),
            width  in 1..80_usize,
            height in 1..80_usize,
        ) {
            use std::f64::consts::TAU;
            let p1 = Point::on_circle(r, p1_angle * TAU);
            let p2 = Point::on_circle(r, (p1_angle + p2_delta) * TAU);
            let ray = Ray::new(p1, p2);
            let pixels: Vec<_> = SystemMatrixRow::new(Sampling::Bresenham, &ray, &Grid::new((height, width)))
                .into_iter().map(|(i, _)| i).collect();
            for ([r0, c0], [r1, c1]) in pixels.into_iter().tuple_windows() {
                let dr = r0.abs_diff(r1);
                let dc = c0.abs_diff(c1);
                prop_assert!(dr <= 1 && dc <= 1 && dr + dc >= 1);
            }
        }
    }
}
