//! The pixel grid on which images are defined, and its embedding in the plane
//! of the scanner.
//!
//! Pixels are unit squares. The centre of the grid lies at the origin, `x`
//! increases with the column index and `y` decreases with the row index (row
//! 0 is the top of the image).
//!
//! Tracing algorithms work in *grid coordinates* `(u, v)`: `u` runs along the
//! columns and `v` along the rows, both starting at 0 on the outer edge of the
//! first pixel, so that `floor(u)` and `floor(v)` are pixel indices.

use geometry::{Rect, Span};

use crate::{Index2, Point, Shape, Vector};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Grid {
    /// Number of rows
    pub height: usize,
    /// Number of columns
    pub width: usize,
    pub rect: Rect,
}

impl Grid {

    pub fn new((height, width): Shape) -> Self {
        Self { height, width, rect: Rect::new(width as f64, height as f64) }
    }

    pub fn shape(&self) -> Shape { (self.height, self.width) }

    /// Number of pixels along `dim` of grid coordinates (0: columns, 1: rows)
    #[inline]
    pub fn n(&self, dim: usize) -> usize { if dim == 0 { self.width } else { self.height } }

    /// Centre of the pixel with the given index
    pub fn pixel_centre(&self, [row, col]: Index2) -> Point {
        Point::new(col as f64 + 0.5 - self.width  as f64 / 2.0,
                   self.height as f64 / 2.0 - row as f64 - 0.5)
    }

    /// Plane position -> grid coordinates
    #[inline]
    pub fn to_grid(&self, p: Point) -> Vector {
        Vector::new(p.x + self.width as f64 / 2.0, self.height as f64 / 2.0 - p.y)
    }

    /// Plane direction -> grid direction
    #[inline]
    pub fn direction_to_grid(&self, d: Vector) -> Vector { Vector::new(d.x, -d.y) }

    /// The part of segment `p1`-`p2` that crosses the grid, as fractions of the
    /// segment's length.
    #[inline]
    pub fn clip(&self, p1: Point, p2: Point) -> Option<Span> { self.rect.clip(p1, p2) }

    /// Pixel containing grid coordinate `x` along `dim`, clamped to the grid.
    /// Values within `EPS` of a pixel boundary are snapped onto it first.
    #[inline]
    pub fn pixel_along(&self, dim: usize, x: f64) -> usize {
        let snapped = if (x - x.round()).abs() < EPS { x.round() } else { x };
        let last = self.n(dim) as f64 - 1.0;
        snapped.floor().clamp(0.0, last) as usize
    }
}

const EPS: f64 = 1e-9;
