//! Synthetic test images, drawn on the same pixel grid the scanner uses.
//!
//! Positions and sizes are in pixel units, relative to the centre of the
//! image, with `y` pointing up.

/// Image containing a single bright pixel at (or just below-right of) the
/// centre
pub fn point(shape: Shape) -> ImageData {
    let (height, width) = shape;
    let mut image = ImageData::zeros(shape);
    if height > 0 && width > 0 {
        image[[height / 2, width / 2]] = 1.0;
    }
    image
}

/// Uniform disk. A pixel belongs to the disk if its centre does.
pub fn disk(shape: Shape, centre: Point, radius: Length, value: Intensity) -> ImageData {
    ellipses(shape, &[Ellipse::new(value, (radius, radius), centre, 0.0)])
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ellipse {
    pub intensity: Intensity,
    /// Semi-axes along `x` and `y`, before tilting
    pub semi_axes: (Length, Length),
    pub centre: Point,
    /// Anticlockwise, in degrees
    pub tilt: Angle,
}

impl Ellipse {

    pub fn new(intensity: Intensity, semi_axes: (Length, Length), centre: Point, tilt: Angle) -> Self {
        Self { intensity, semi_axes, centre, tilt }
    }

    pub fn contains(&self, p: Point) -> bool {
        let d = p - self.centre;
        let (sin, cos) = self.tilt.to_radians().sin_cos();
        let along  =  d.x * cos + d.y * sin;
        let across = -d.x * sin + d.y * cos;
        let (a, b) = self.semi_axes;
        (along / a).powi(2) + (across / b).powi(2) <= 1.0
    }

    fn scaled(&self, factor: f64) -> Self {
        let (a, b) = self.semi_axes;
        Self {
            semi_axes: (a * factor, b * factor),
            centre: Point::new(self.centre.x * factor, self.centre.y * factor),
            ..*self
        }
    }
}

/// Sum of the intensities of all `ellipses` containing each pixel centre
pub fn ellipses(shape: Shape, ellipses: &[Ellipse]) -> ImageData {
    let grid = Grid::new(shape);
    ImageData::from_shape_fn(shape, |(row, col)| {
        let p = grid.pixel_centre([row, col]);
        ellipses.iter()
            .filter(|e| e.contains(p))
            .map(|e| e.intensity)
            .sum()
    })
}

/// Modified Shepp-Logan head phantom, with the higher-contrast intensities
/// of Toft. The head spans the shorter side of the image. Values lie in
/// `[0, 1]`.
pub fn shepp_logan(shape: Shape) -> ImageData {
    let (height, width) = shape;
    let scale = height.min(width) as f64 / 2.0;
    let parts: Vec<Ellipse> = SHEPP_LOGAN.iter()
        .map(|&(intensity, a, b, x, y, tilt)| {
            Ellipse::new(intensity, (a, b), Point::new(x, y), tilt).scaled(scale)
        })
        .collect();
    ellipses(shape, &parts).mapv_into(|v| v.max(0.0))
}

/// `(intensity, semi-axis x, semi-axis y, centre x, centre y, tilt)` on the
/// unit disk
#[allow(clippy::type_complexity)]
const SHEPP_LOGAN: [(Intensity, f64, f64, f64, f64, Angle); 10] = [
    ( 1.0, 0.69  , 0.92 ,  0.0 ,  0.0   ,   0.0),
    (-0.8, 0.6624, 0.874,  0.0 , -0.0184,   0.0),
    (-0.2, 0.11  , 0.31 ,  0.22,  0.0   , -18.0),
    (-0.2, 0.16  , 0.41 , -0.22,  0.0   ,  18.0),
    ( 0.1, 0.21  , 0.25 ,  0.0 ,  0.35  ,   0.0),
    ( 0.1, 0.046 , 0.046,  0.0 ,  0.1   ,   0.0),
    ( 0.1, 0.046 , 0.046,  0.0 , -0.1   ,   0.0),
    ( 0.1, 0.046 , 0.023, -0.08, -0.605 ,   0.0),
    ( 0.1, 0.023 , 0.023,  0.0 , -0.606 ,   0.0),
    ( 0.1, 0.023 , 0.046,  0.06, -0.605 ,   0.0),
];

// ----- Imports ------------------------------------------------------------------------------------------
use crate::{Angle, ImageData, Intensity, Length, Point, Shape, grid::Grid};
