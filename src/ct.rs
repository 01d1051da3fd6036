//! The simulated scanner as a whole: validates its configuration, then runs
//! forward projection and filtered backprojection in sequence, reporting
//! intermediate states to a `FrameSink`.
//!
//! A run goes through the phases
//!
//! `Validated -> ForwardProjecting -> Reset -> Backprojecting -> Normalized -> Done`
//!
//! exactly once each, in that order. `Ct::run` consumes the scanner, so a
//! fresh run needs a fresh `Ct`.

/// Receiver of intermediate snapshots, typically for visualization. All
/// methods default to doing nothing.
pub trait FrameSink {

    /// Called once per angle during forward projection, with the sinogram
    /// filled up to and including that angle's row
    fn radon_frame(&mut self, _sinogram: &Sinogram) {}

    /// Called once per angle during backprojection, with the running
    /// backprojection and the running per-pixel ray weights
    fn iradon_frame(&mut self, _image: &ImageData, _hits: &ImageData) {}

    /// Called exactly once, between forward projection and backprojection
    fn reset_iteration(&mut self) {}
}

/// Sink which ignores everything
#[derive(Clone, Copy, Debug, Default)]
pub struct NoFrames;

impl FrameSink for NoFrames {}

impl<S: FrameSink + ?Sized> FrameSink for &mut S {
    fn radon_frame(&mut self, sinogram: &Sinogram) { (**self).radon_frame(sinogram) }
    fn iradon_frame(&mut self, image: &ImageData, hits: &ImageData) { (**self).iradon_frame(image, hits) }
    fn reset_iteration(&mut self) { (**self).reset_iteration() }
}

impl<S: FrameSink + ?Sized> FrameSink for Box<S> {
    fn radon_frame(&mut self, sinogram: &Sinogram) { (**self).radon_frame(sinogram) }
    fn iradon_frame(&mut self, image: &ImageData, hits: &ImageData) { (**self).iradon_frame(image, hits) }
    fn reset_iteration(&mut self) { (**self).reset_iteration() }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Validated,
    ForwardProjecting,
    Reset,
    Backprojecting,
    Normalized,
    Done,
}

/// Result of a complete run
#[derive(Clone, Debug)]
pub struct ScanOutput {
    /// Normalized sinogram, one row per detector and one column per angle
    pub sinogram: Sinogram,
    /// Reconstruction, with the same shape as the scanned image
    pub image: ImageData,
}

pub struct Ct<'i, S = NoFrames> {
    image: &'i ImageData,
    config: ScanConfig,
    projection: Projection,
    sink: S,
    log: Option<Dispatch>,
    cancel: CancelToken,
    phase: Phase,
}

impl<'i> Ct<'i, NoFrames> {

    /// Fails with `Error::Config` if `config` is unusable, before any
    /// projection work is done.
    pub fn new(image: &'i ImageData, config: ScanConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            image,
            config,
            projection: Projection::default(),
            sink: NoFrames,
            log: None,
            cancel: CancelToken::default(),
            phase: Phase::Validated,
        })
    }
}

impl<'i, S: FrameSink> Ct<'i, S> {

    pub fn with_projection(self, projection: Projection) -> Self { Self { projection, ..self } }

    pub fn with_sink<T: FrameSink>(self, sink: T) -> Ct<'i, T> {
        let Self { image, config, projection, log, cancel, phase, .. } = self;
        Ct { image, config, projection, sink, log, cancel, phase }
    }

    /// Send this scanner's progress messages to `dispatch`, rather than to
    /// whatever subscriber is current when `run` is called
    pub fn with_log(self, dispatch: Dispatch) -> Self { Self { log: Some(dispatch), ..self } }

    pub fn with_cancel(self, cancel: CancelToken) -> Self { Self { cancel, ..self } }

    pub fn run(self) -> Result<ScanOutput> {
        match self.log.clone() {
            Some(dispatch) => tracing::dispatcher::with_default(&dispatch, || self.execute()),
            None           => self.execute(),
        }
    }

    fn execute(mut self) -> Result<ScanOutput> {
        let context = Context::new(&self.config, self.projection, self.image.dim())?
            .with_cancel(self.cancel.clone());
        debug!(radius = context.scanner.radius,
               angles = context.scanner.sweep.n,
               detectors = context.scanner.n_detectors,
               sampling = ?self.projection.sampling,
               filter = ?self.projection.filter,
               "scanner geometry");

        self.enter(Phase::ForwardProjecting);
        info!("Radon transform starting");
        let sink = &mut self.sink;
        let mut sinogram = forward_project(self.image, &context, |s| sink.radon_frame(s))?;

        self.enter(Phase::Reset);
        self.sink.reset_iteration();

        self.enter(Phase::Backprojecting);
        info!("Radon transform ended, inverse Radon transform starting");
        let sink = &mut self.sink;
        let image = back_project(&sinogram, &context, |i, h| sink.iradon_frame(i, h))?;
        info!("Inverse Radon transform ended");

        self.enter(Phase::Normalized);
        normalize_sinogram(&mut sinogram);

        self.enter(Phase::Done);
        let sinogram = sinogram.reversed_axes().as_standard_layout().into_owned();
        Ok(ScanOutput { sinogram, image })
    }

    fn enter(&mut self, phase: Phase) {
        debug!(from = ?self.phase, to = ?phase, "phase transition");
        self.phase = phase;
    }
}

/// Scale the sinogram so that its largest value is exactly 1. A sinogram with
/// no positive values (e.g. that of an empty image) is left untouched.
pub fn normalize_sinogram(sinogram: &mut Sinogram) {
    let max = sinogram.iter().copied().map(OrderedFloat).max().map_or(0.0, |m| m.0);
    if max > 0.0 {
        sinogram.mapv_inplace(|v| v / max);
    }
}

// ----- Imports ------------------------------------------------------------------------------------------
use ordered_float::OrderedFloat;
use tracing::{debug, info, Dispatch};

use crate::{
    ImageData, Projection, Result, ScanConfig, Sinogram,
    projector::{back_project, forward_project, CancelToken, Context},
};
