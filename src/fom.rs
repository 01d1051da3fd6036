//! Figures of merit for comparing a reconstruction with the scanned image

/// Root-mean-square difference between two images of the same shape
pub fn rmse(a: &ImageData, b: &ImageData) -> Result<Intensity> {
    if a.dim() != b.dim() {
        return Err(Error::ShapeMismatch { expected: a.len(), actual: b.len() })
    }
    if a.is_empty() { return Ok(0.0) }
    let mut sum = 0.0;
    azip!((&x in a, &y in b) sum += (x - y).powi(2));
    Ok((sum / a.len() as Intensity).sqrt())
}

/// Index of the brightest pixel. Ties go to the first in row-major order.
pub fn peak(image: &ImageData) -> Option<Index2> {
    image.indexed_iter()
        .fold(None, |best: Option<(Index2, OrderedFloat<Intensity>)>, ((row, col), &v)| {
            match best {
                Some((_, max)) if OrderedFloat(v) <= max => best,
                _ => Some(([row, col], OrderedFloat(v))),
            }
        })
        .map(|(index, _)| index)
}

/// Intensity-weighted mean position `(row, column)`, in pixel units. Only
/// positive intensities contribute; `None` if there are none.
pub fn centroid(image: &ImageData) -> Option<(f64, f64)> {
    let (total, rows, cols) = image.indexed_iter()
        .filter(|&(_, &v)| v > 0.0)
        .fold((0.0, 0.0, 0.0), |(t, r, c), ((row, col), &v)| {
            (t + v, r + v * row as f64, c + v * col as f64)
        });
    if total > 0.0 { Some((rows / total, cols / total)) }
    else           { None }
}

// ----- Imports ------------------------------------------------------------------------------------------
use ndarray::azip;
use ordered_float::OrderedFloat;

use crate::{Error, ImageData, Index2, Intensity, Result};

#[cfg(test)]
mod tests {
    use super::*;
    use float_eq::assert_float_eq;
    #[allow(unused)] use pretty_assertions::{assert_eq, assert_ne};
    use ndarray::{array, Array2};

    #[test]
    fn rmse_of_identical_images_is_zero() {
        let a = array![[1.0, 2.0], [3.0, 4.0]];
        assert_eq!(rmse(&a, &a).unwrap(), 0.0);
    }

    #[test]
    fn rmse_of_constant_offset() {
        let a = Array2::zeros((3, 5));
        let b = Array2::from_elem((3, 5), 0.5);
        assert_float_eq!(rmse(&a, &b).unwrap(), 0.5, ulps <= 1);
    }

    #[test]
    fn rmse_needs_matching_shapes() {
        let a = Array2::zeros((2, 3));
        let b = Array2::zeros((3, 2));
        assert!(matches!(rmse(&a, &b), Err(Error::ShapeMismatch { .. })));
    }

    #[test]
    fn peak_finds_brightest_pixel() {
        let image = array![[0.0, 1.0, 0.0], [0.5, 0.0, 3.0]];
        assert_eq!(peak(&image), Some([1, 2]));
    }

    #[test]
    fn peak_ties_go_to_first() {
        let image = array![[0.0, 2.0], [2.0, 0.0]];
        assert_eq!(peak(&image), Some([0, 1]));
    }

    #[test]
    fn peak_of_empty_image() {
        assert_eq!(peak(&Array2::zeros((0, 0))), None);
    }

    #[test]
    fn centroid_of_two_equal_pixels_is_halfway() {
        let mut image = Array2::zeros((5, 5));
        image[[1, 1]] = 2.0;
        image[[3, 4]] = 2.0;
        image[[0, 4]] = -7.0;
        let (row, col) = centroid(&image).unwrap();
        assert_float_eq!(row, 2.0, ulps <= 1);
        assert_float_eq!(col, 2.5, ulps <= 1);
    }

    #[test]
    fn centroid_of_dark_image() {
        assert_eq!(centroid(&Array2::zeros((4, 4))), None);
    }
}
