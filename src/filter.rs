//! Spatial-domain filters applied to sinogram rows before backprojection.
//!
//! Simple backprojection blurs the image with a `1/r` point spread function;
//! convolving each projection with a discretized ramp kernel undoes that. The
//! kernels are scaled so that the central tap is 1.

use std::f64::consts::PI;

use crate::{FilterKind, Intensity, Projection};

#[derive(Clone, Debug, PartialEq)]
pub struct Filter {
    pub kind: FilterKind,
    /// Taps `h[0] .. h[half]`; the kernel is symmetric
    taps: Vec<f64>,
}

impl Filter {

    pub fn new(kind: FilterKind, kernel_size: usize) -> Self {
        let half = kernel_size / 2;
        let taps = match kind {
            FilterKind::None       => vec![1.0],
            FilterKind::RamLak     => (0..=half).map(ram_lak).collect(),
            FilterKind::SheppLogan => (0..=half).map(shepp_logan).collect(),
        };
        Self { kind, taps }
    }

    pub fn from_projection(projection: &Projection) -> Self {
        Self::new(projection.filter, projection.kernel_size)
    }

    /// Full kernel, `h[-half] .. h[half]`
    pub fn kernel(&self) -> Vec<f64> {
        self.taps.iter().rev().chain(self.taps.iter().skip(1)).copied().collect()
    }

    /// Convolve `row` with the kernel. Samples beyond the ends of the row are
    /// taken to be zero; the output has the same length as the input.
    pub fn apply(&self, row: &[Intensity]) -> Vec<Intensity> {
        if self.kind == FilterKind::None { return row.to_vec() }
        let n = row.len();
        (0..n).map(|i| {
            let mut acc = self.taps[0] * row[i];
            for (k, h) in self.taps.iter().enumerate().skip(1) {
                if *h == 0.0 { continue }
                let left  = if i >= k    { row[i - k] } else { 0.0 };
                let right = if i + k < n { row[i + k] } else { 0.0 };
                acc += h * (left + right);
            }
            acc
        }).collect()
    }
}

fn ram_lak(k: usize) -> f64 {
    if k == 0     { 1.0 }
    else if k % 2 == 0 { 0.0 }
    else          { -4.0 / (PI * PI * (k * k) as f64) }
}

fn shepp_logan(k: usize) -> f64 {
    1.0 / (1.0 - 4.0 * (k * k) as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use float_eq::assert_float_eq;

    #[test]
    fn identity_filter_leaves_row_untouched() {
        let row = vec![0.0, 3.0, -1.5, 7.25, 2.0];
        assert_eq!(Filter::new(FilterKind::None, 21).apply(&row), row);
    }

    #[rstest(/**/ kind, size, expected,
             case(FilterKind::None      , 21, vec![1.0]),
             case(FilterKind::RamLak    ,  1, vec![1.0]),
             case(FilterKind::RamLak    ,  5, vec![0.0, -4.0 / (PI * PI), 1.0, -4.0 / (PI * PI), 0.0]),
             case(FilterKind::SheppLogan,  5, vec![-1.0 / 15.0, -1.0 / 3.0, 1.0, -1.0 / 3.0, -1.0 / 15.0]),
    )]
    fn kernels(kind: FilterKind, size: usize, expected: Vec<f64>) {
        let kernel = Filter::new(kind, size).kernel();
        assert_eq!(kernel.len(), expected.len());
        for (got, want) in kernel.into_iter().zip(expected) {
            assert_float_eq!(got, want, ulps <= 2);
        }
    }

    #[test]
    fn impulse_response_is_the_kernel() {
        let filter = Filter::new(FilterKind::SheppLogan, 7);
        let mut impulse = vec![0.0; 11];
        impulse[5] = 1.0;
        let response = filter.apply(&impulse);
        assert_eq!(&response[2..9], filter.kernel().as_slice());
        assert_eq!(response[0], 0.0);
        assert_eq!(response[10], 0.0);
    }

    // The ramp kernels have (nearly) zero sum: constant parts of a projection
    // are almost completely suppressed.
    #[rstest(/**/ kind,
             case(FilterKind::RamLak),
             case(FilterKind::SheppLogan),
    )]
    fn constant_input_is_suppressed(kind: FilterKind) {
        let filtered = Filter::new(kind, 21).apply(&[1.0; 61]);
        for value in &filtered[10..51] {
            assert!(value.abs() < 0.05, "{value}");
        }
    }
}
