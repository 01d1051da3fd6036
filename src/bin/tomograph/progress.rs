/// Progress bar for the `tomograph` executable, advanced once per projection
/// angle in each of the two passes.
pub(super) struct Progress(ProgressBar);

impl Progress {

    pub(super) fn new(n_angles: usize, hidden: bool) -> Self {
        let bar = if hidden { ProgressBar::hidden() } else { ProgressBar::new(n_angles as u64) };
        bar.set_style(ProgressStyle::default_bar()
                      .template("{msg:<24} [{elapsed_precise}] {wide_bar} {pos}/{len} angles ({eta})")
                      .unwrap_or_else(|_| ProgressStyle::default_bar())
        );
        bar.set_message("Radon transform");
        Self(bar)
    }

    pub(super) fn finish(&self) { self.0.finish_with_message("Reconstructed") }
}

impl FrameSink for Progress {
    fn radon_frame(&mut self, _sinogram: &Sinogram) { self.0.inc(1) }

    fn reset_iteration(&mut self) {
        self.0.reset();
        self.0.set_message("Inverse Radon transform");
    }

    fn iradon_frame(&mut self, _image: &ImageData, _hits: &ImageData) { self.0.inc(1) }
}

// ----- Imports ------------------------------------------------------------------------------------------
use indicatif::{ProgressBar, ProgressStyle};
use tomograph::{FrameSink, ImageData, Sinogram};
