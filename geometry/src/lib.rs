//! Planar points, vectors and the few intersection routines needed to trace
//! straight rays through a rectangular pixel grid.

mod point;
mod vector;
mod rect;

pub use point::Point;
pub use vector::{Vector, Dot};
pub use rect::{Rect, Span};

pub type Length = f64;
pub type Angle  = f64;
