//! Forward projection (image -> sinogram) and filtered backprojection
//! (sinogram -> image).
//!
//! Both passes walk the same sequence of projection angles and trace the same
//! rays, via `Scanner::ray_at` and the chosen `Sampling` policy, so they form a
//! consistent transform pair.
//!
//! Work is partitioned by angle. Angles are processed in batches of one angle
//! per rayon thread: the angles of a batch are computed in parallel, then their
//! results are merged into the shared output in ascending angle order, and the
//! per-angle callback is invoked after each merge. Observers therefore see
//! every angle, in order, regardless of how the work was scheduled, and the
//! summation order (hence the result) does not depend on the number of
//! threads.

/// Run context threaded through both projection passes.
#[derive(Clone, Debug)]
pub struct Context {
    pub scanner: Scanner,
    pub grid: Grid,
    pub projection: Projection,
    pub cancel: CancelToken,
}

impl Context {

    /// Fails with `Error::Config` if either `config` or `projection` is
    /// unusable.
    pub fn new(config: &ScanConfig, projection: Projection, shape: Shape) -> Result<Self> {
        config.validate()?;
        projection.validate()?;
        Ok(Self {
            scanner: Scanner::new(config),
            grid: Grid::new(shape),
            projection,
            cancel: CancelToken::default(),
        })
    }

    pub fn with_cancel(self, cancel: CancelToken) -> Self { Self { cancel, ..self } }

    pub fn sinogram_shape(&self) -> Shape { (self.scanner.sweep.n, self.scanner.n_detectors) }

    fn batches(&self) -> Vec<Vec<usize>> {
        let angles: Vec<usize> = (0..self.scanner.sweep.n).collect();
        let batch_size = rayon::current_num_threads().max(1);
        angles.chunks(batch_size).map(<[usize]>::to_vec).collect()
    }

    fn check_cancelled(&self) -> Result<()> {
        if self.cancel.is_cancelled() { Err(Error::Cancelled) }
        else                          { Ok(()) }
    }

    fn trace(&self, k: usize, i: usize, system_matrix_row: &mut SystemMatrixRow) {
        let ray = self.scanner.ray_at(k, i);
        update_system_matrix_row(self.projection.sampling, system_matrix_row, &ray, &self.grid);
    }
}

/// Cooperative cancellation flag, checked between batches of angles.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self { Self::default() }
    pub fn cancel(&self) { self.0.store(true, Ordering::Relaxed) }
    pub fn is_cancelled(&self) -> bool { self.0.load(Ordering::Relaxed) }
}

/// Compute the line integrals of `image` along every ray of the scan.
///
/// `on_row` is called once per angle, in ascending order, with the sinogram
/// as it stands after that angle's row has been written (rows of later angles
/// are still zero). The returned sinogram is not normalized.
pub fn forward_project(
    image: &ImageData,
    context: &Context,
    mut on_row: impl FnMut(&Sinogram),
) -> Result<Sinogram> {
    check_shape(image.dim(), context.grid.shape())?;
    let n_detectors = context.scanner.n_detectors;
    let mut sinogram = Sinogram::zeros(context.sinogram_shape());

    for batch in context.batches() {
        context.check_cancelled()?;
        trace!(first = batch[0], n = batch.len(), "forward projection batch");

        let rows: Vec<Vec<Intensity>> = batch
            .par_iter()
            .map_init(
                || Siddon::buffers(&context.grid),
                |system_matrix_row, &k| {
                    (0..n_detectors)
                        .map(|i| {
                            context.trace(k, i, system_matrix_row);
                            forward_project_one(system_matrix_row, image)
                        })
                        .collect()
                })
            .collect();

        for (k, row) in batch.into_iter().zip(rows) {
            sinogram.row_mut(k).assign(&Array1::from(row));
            on_row(&sinogram);
        }
    }
    Ok(sinogram)
}

/// Filter each row of `sinogram` and smear it back over the image along the
/// rays which produced it.
///
/// `on_angle` is called once per angle, in ascending order, with the running
/// backprojection and the running per-pixel ray weights. The result is the
/// backprojection divided by the weights, with pixels that no ray reached set
/// to zero.
pub fn back_project(
    sinogram: &Sinogram,
    context: &Context,
    mut on_angle: impl FnMut(&ImageData, &ImageData),
) -> Result<ImageData> {
    check_shape(sinogram.dim(), context.sinogram_shape())?;
    let filter = Filter::from_projection(&context.projection);
    let shape = context.grid.shape();
    let mut backprojection = ImageData::zeros(shape);
    let mut hits           = ImageData::zeros(shape);

    for batch in context.batches() {
        context.check_cancelled()?;
        trace!(first = batch[0], n = batch.len(), "backprojection batch");

        // Each angle gets its own accumulators: rays of the same angle never
        // cross, but rays of different angles do.
        let partials: Vec<(ImageData, ImageData)> = batch
            .par_iter()
            .map_init(
                || Siddon::buffers(&context.grid),
                |system_matrix_row, &k| {
                    let filtered = filter.apply(&sinogram.row(k).to_vec());
                    let mut local_backprojection = ImageData::zeros(shape);
                    let mut local_hits           = ImageData::zeros(shape);
                    for (i, value) in filtered.into_iter().enumerate() {
                        context.trace(k, i, system_matrix_row);
                        back_project_one(&mut local_backprojection, &mut local_hits, system_matrix_row, value);
                    }
                    (local_backprojection, local_hits)
                })
            .collect();

        for (local_backprojection, local_hits) in partials {
            backprojection += &local_backprojection;
            hits           += &local_hits;
            on_angle(&backprojection, &hits);
        }
    }
    Ok(normalize_by_hits(backprojection, &hits))
}

/// Divide each pixel by the total weight of the rays that crossed it. Pixels
/// crossed by no ray become exactly zero.
pub fn normalize_by_hits(mut image: ImageData, hits: &ImageData) -> ImageData {
    azip!((pixel in &mut image, &h in hits) {
        if h > 0.0 { *pixel /= h  }
        else       { *pixel = 0.0 }
    });
    image
}

fn check_shape(actual: Shape, expected: Shape) -> Result<()> {
    if actual == expected { return Ok(()) }
    Err(Error::ShapeMismatch {
        expected: expected.0 * expected.1,
        actual  : actual  .0 * actual  .1,
    })
}

// ----- Imports ------------------------------------------------------------------------------------------
use std::sync::{Arc, atomic::{AtomicBool, Ordering}};

use ndarray::{azip, Array1};
use rayon::prelude::*;
use tracing::trace;

use crate::{
    Error, Result,
    ImageData, Intensity, Projection, ScanConfig, Shape, Sinogram,
    filter::Filter,
    grid::Grid,
    scanner::Scanner,
    system_matrix::{
        Siddon, SystemMatrix, SystemMatrixRow, update_system_matrix_row,
        back_project as back_project_one,
        forward_project as forward_project_one,
    },
};
