pub use geometry::{Length, Angle, Point, Vector};

pub type Intensity = f64;
pub type Weight    = f64;

/// `[row, column]`
pub type Index2 = [usize; 2];
/// `(height, width)`, as in `ndarray::Array2::dim`
pub type Shape  = (usize, usize);

/// Pixel intensities, rows from top to bottom
pub type ImageData = ndarray::Array2<Intensity>;

/// Line integrals: one row per projection angle, one column per detector
pub type Sinogram = ndarray::Array2<Intensity>;
