//! Find the weights and indices of the pixels crossed by a single ray.
//!
//! The algorithm is centred around two key simplifications:
//!
//! 1. Express the pixel size in terms of the components of the ray's direction
//!    vector. This allows trivial calculation of how far we must move along the
//!    ray before reaching a pixel boundary, in either dimension.
//!
//! 2. Deal with direction through the sign of the index step: progress along
//!    the ray is always positive, and each dimension's index moves by `+1` or
//!    `-1` when a boundary in that dimension is crossed.
//!
//! The weight of each pixel is the length of the ray inside it.

use geometry::Span;

use crate::{Length, Point, Vector, grid::Grid, ray::Ray};

use super::{SystemMatrix, SystemMatrixRow};

pub struct Siddon;

impl SystemMatrix for Siddon {

    fn update_system_matrix_row(
        system_matrix_row: &mut SystemMatrixRow,
        ray : &Ray,
        grid: &Grid,
    ) {
        // Throw away previous ray's values
        system_matrix_row.clear();

        // Analyse point where ray hits grid
        match grid_hit(ray, grid) {
            // Ray missed grid: nothing to be done
            None => (),
            Some(GridHit { next_boundary, pixel_size, index, delta_index, remaining, length }) => {
                Self::update_smatrix_row(
                    system_matrix_row,
                    next_boundary, pixel_size,
                    index, delta_index, remaining,
                    length,
                );
            }
        }
    }
}

impl Siddon {

    /// For a single ray, place the weights and indices of the coupled pixels in
    /// `system_matrix_row` parameter. Using output parameters rather than return
    /// values, because this function is called in the inner loop, and allocating
    /// the vectors of results repeatedly, had a noticeable impact on performance.
    #[inline]
    pub fn update_smatrix_row(
        system_matrix_row: &mut SystemMatrixRow,
        mut next_boundary: Vector,
        pixel_size: Vector,
        mut index: [usize; 2],
        delta_index: [isize; 2],
        mut remaining: [usize; 2],
        length: Length,
    ) {
        // How far we have moved since entering the grid
        let mut here: Length = 0.0;

        loop {
            // Which pixel boundary will be hit next, and its position
            let (dimension, boundary_position) = next_boundary.argmin();
            let boundary_position = boundary_position.min(length);

            // The weight is the length of ray in this pixel
            let weight = boundary_position - here;

            // Store the index and weight of the pixel we have just crossed
            if weight > 0.0 {
                let [u, v] = index;
                system_matrix_row.0.push(([v, u], weight));
            }

            // Move along ray until it leaves this pixel
            here = boundary_position;

            // If we have traversed the whole grid, we're finished
            remaining[dimension] -= 1;
            if remaining[dimension] == 0 || here >= length { break; }

            // Find the next boundary in this dimension
            next_boundary[dimension] += pixel_size[dimension];

            // Move index across the boundary we are crossing
            index[dimension] = index[dimension].wrapping_add_signed(delta_index[dimension]);
        }
    }
}

/// Information about where and how a ray enters the grid, needed by the
/// tracing loop.
#[derive(Debug)]
pub struct GridHit {

    /// Distance along the ray, from the entry point, to the first boundary
    /// crossed in each dimension
    pub next_boundary: Vector,

    /// Distance along the ray needed to cross one pixel, in each dimension.
    /// Infinite in any dimension to which the ray is parallel.
    pub pixel_size: Vector,

    /// Grid-coordinate index `[u, v]` (column, row) of the first pixel
    pub index: [usize; 2],

    /// Direction in which the index changes when a boundary is crossed
    pub delta_index: [isize; 2],

    /// Number of boundaries left to cross in each dimension, counting the exit
    /// from the grid
    pub remaining: [usize; 2],

    /// Length of the ray inside the grid
    pub length: Length,
}

/// Figure out if the ray hits the grid, returning the data the tracing loop
/// needs if it does.
#[inline]
pub fn grid_hit(ray: &Ray, grid: &Grid) -> Option<GridHit> {
    let Span { enter, exit } = grid.clip(ray.emitter, ray.detector)?;

    let ray_length = ray.length();
    let length = (exit - enter) * ray_length;
    let entry_point: Point = ray.emitter.lerp(ray.detector, enter);

    let position  = grid.to_grid(entry_point);
    let direction = grid.direction_to_grid(ray.direction()).normalize();

    let mut next_boundary = Vector::new(0.0, 0.0);
    let mut pixel_size    = Vector::new(0.0, 0.0);
    let mut index       = [0; 2];
    let mut delta_index = [0; 2];
    let mut remaining   = [0; 2];

    for dim in 0..2 {
        let (x, d, n) = (position[dim], direction[dim], grid.n(dim));
        let i = grid.pixel_along(dim, x);
        index[dim] = i;
        pixel_size[dim] = 1.0 / d.abs();
        if d > 0.0 {
            next_boundary[dim] = (i as f64 + 1.0 - x) * pixel_size[dim];
            delta_index[dim] = 1;
            remaining[dim] = n - i;
        } else if d < 0.0 {
            next_boundary[dim] = (x - i as f64) * pixel_size[dim];
            delta_index[dim] = -1;
            remaining[dim] = i + 1;
        } else {
            // Never crosses a boundary in this dimension
            next_boundary[dim] = f64::INFINITY;
            remaining[dim] = usize::MAX;
        }
        // The entry point may lie on a boundary which the ray is leaving
        next_boundary[dim] = next_boundary[dim].max(0.0);
    }

    Some(GridHit { next_boundary, pixel_size, index, delta_index, remaining, length })
}
