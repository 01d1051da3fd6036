//! Calculation of system matrix elements (the pixels coupled to a single ray,
//! and their weights) for use in forward and backward projections.

// ----- The trait --------------------------------------------------------------------

/// Interface for tracing a single ray through the pixel grid
pub trait SystemMatrix {

    /// Place the pixels crossed by `ray`, and their weights, in the output
    /// parameter `system_matrix_row`, discarding its previous contents.
    fn update_system_matrix_row(
        system_matrix_row: &mut SystemMatrixRow,
        ray : &Ray,
        grid: &Grid,
    );

    // Sparse storage of the slice through the system matrix which corresponds
    // to the current ray. Allocating these anew for each ray had a noticeable
    // runtime cost, so we create them up-front and reuse them.
    fn buffers(grid: &Grid) -> SystemMatrixRow {
        SystemMatrixRow(Vec::with_capacity(grid.width + grid.height))
    }
}

// ----- Implementations of the trait -----------------------------------------------
pub mod siddon;
pub mod bresenham;
pub use siddon::Siddon;
pub use bresenham::Bresenham;

/// Run-time selection between the implementations of `SystemMatrix`
pub fn update_system_matrix_row(
    sampling: Sampling,
    system_matrix_row: &mut SystemMatrixRow,
    ray : &Ray,
    grid: &Grid,
) {
    match sampling {
        Sampling::Siddon    => Siddon   ::update_system_matrix_row(system_matrix_row, ray, grid),
        Sampling::Bresenham => Bresenham::update_system_matrix_row(system_matrix_row, ray, grid),
    }
}

// ----- Storage of system matrix elements. Only one row is relevant at any single time ------
pub type SystemMatrixElement = (Index2, Weight);

#[derive(Debug, Default, Clone, PartialEq)]
pub struct SystemMatrixRow(pub Vec<SystemMatrixElement>);

impl SystemMatrixRow {
    pub fn new(sampling: Sampling, ray: &Ray, grid: &Grid) -> Self {
        let mut row = Self::default();
        update_system_matrix_row(sampling, &mut row, ray, grid);
        row
    }
    pub fn iter(&self) -> std::slice::Iter<SystemMatrixElement> { self.0.iter() }
    pub fn clear(&mut self) { self.0.clear(); }
    pub fn total_weight(&self) -> Weight { self.iter().map(|(_, w)| w).sum() }
}

impl IntoIterator for SystemMatrixRow {
    type Item = SystemMatrixElement;
    type IntoIter = std::vec::IntoIter<Self::Item>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a SystemMatrixRow {
    type Item = SystemMatrixElement;
    type IntoIter = std::iter::Cloned<std::slice::Iter<'a, Self::Item>>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.iter().cloned()
    }
}

/// Sum product of the weights in `system_matrix_row` and the corresponding
/// pixels of `image`: the line integral of `image` along the ray.
#[inline]
pub fn forward_project(system_matrix_row: &SystemMatrixRow, image: &ImageData) -> Intensity {
    let mut projection = 0.0;
    for (j, w) in system_matrix_row {
        projection += w * image[j]
    }
    projection
}

/// Smear `value` along the ray, recording how much of the ray fell in each
/// pixel in `hits`.
#[inline]
pub fn back_project(
    backprojection: &mut ImageData,
    hits: &mut ImageData,
    system_matrix_row: &SystemMatrixRow,
    value: Intensity,
) {
    for (j, w) in system_matrix_row {
        backprojection[j] += w * value;
        hits[j] += w;
    }
}

// ----- Imports ------------------------------------------------------------------------------------------
use crate::{
    Index2, Intensity, ImageData, Weight,
    config::Sampling,
    grid::Grid,
    ray::Ray,
};
