//! Harmonic smoothing of a seasonal cycle
//!
//! Each grid cell's series along a cyclical time axis (73 pentads or 12 months) is
//! reduced to its annual mean plus the lowest [`HARMONICS`] harmonics:
//!
//! 1. subtract the mean
//! 2. take the full complex DFT along time
//! 3. zero every frequency index outside $[0, 12) \cup [L - 12, L)$
//! 4. invert, keep the real part and add the mean back
//!
//! The negative-frequency side keeps index $L - 12$ while index 12 is zeroed, so a pure
//! 12th harmonic survives at half amplitude. The imaginary part of the inverse is
//! discarded.
//!
//! # Examples
//!
//! ```rust
//! use monsoon_core::smoothing::smooth_series;
//!
//! let noisy: Vec<f64> = (0..73)
//!     .map(|t| {
//!         let phase = 2.0 * std::f64::consts::PI * t as f64 / 73.0;
//!         phase.sin() + 0.2 * (30.0 * phase).cos()
//!     })
//!     .collect();
//! let smooth = smooth_series(&noisy);
//!
//! assert_eq!(smooth.len(), 73);
//! let phase = 2.0 * std::f64::consts::PI * 10.0 / 73.0;
//! assert!((smooth[10] - phase.sin()).abs() < 1e-9);
//! ```

use crate::errors::MonsoonResult;
use crate::grid::{AxisKind, GriddedField};
use num_complex::Complex;
use rustfft::{Fft, FftPlanner};
use std::sync::Arc;

/// Number of harmonics retained, counting the annual cycle as the first
pub const HARMONICS: usize = 12;

/// Whether frequency index `k` of an `n`-point DFT survives truncation
fn retained(k: usize, n: usize, harmonics: usize) -> bool {
    k < harmonics || k + harmonics >= n
}

/// A harmonic filter planned for one series length
#[derive(Clone)]
pub struct HarmonicSmoother {
    len: usize,
    harmonics: usize,
    forward: Arc<dyn Fft<f64>>,
    inverse: Arc<dyn Fft<f64>>,
}

impl std::fmt::Debug for HarmonicSmoother {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HarmonicSmoother")
            .field("len", &self.len)
            .field("harmonics", &self.harmonics)
            .finish()
    }
}

impl HarmonicSmoother {
    /// Plan transforms for series of length `len`
    pub fn new(len: usize) -> Self {
        Self::with_harmonics(len, HARMONICS)
    }

    pub(crate) fn with_harmonics(len: usize, harmonics: usize) -> Self {
        let mut planner = FftPlanner::new();
        Self {
            len,
            harmonics,
            forward: planner.plan_fft_forward(len),
            inverse: planner.plan_fft_inverse(len),
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Smooth one series of the planned length
    ///
    /// NaN anywhere in the series makes the whole result NaN.
    pub fn smooth(&self, series: &[f64]) -> Vec<f64> {
        let n = series.len();
        if n == 0 {
            return vec![];
        }
        debug_assert_eq!(n, self.len);

        let mean = series.iter().sum::<f64>() / n as f64;
        let mut buffer: Vec<Complex<f64>> = series
            .iter()
            .map(|&x| Complex::new(x - mean, 0.0))
            .collect();

        self.forward.process(&mut buffer);
        for (k, c) in buffer.iter_mut().enumerate() {
            if !retained(k, n, self.harmonics) {
                *c = Complex::new(0.0, 0.0);
            }
        }
        self.inverse.process(&mut buffer);

        // rustfft is unnormalised
        let norm = 1.0 / n as f64;
        buffer.iter().map(|c| c.re * norm + mean).collect()
    }
}

/// Smooth a single series, keeping its mean and lowest harmonics
pub fn smooth_series(series: &[f64]) -> Vec<f64> {
    if series.is_empty() {
        return vec![];
    }
    HarmonicSmoother::new(series.len()).smooth(series)
}

/// Smooth every grid cell of a field along a cyclical axis
///
/// The result has the same shape, axis order and coordinates as the input.
pub fn smooth_harmonics(field: &GriddedField, along: AxisKind) -> MonsoonResult<GriddedField> {
    let cells = field.cells_along(along)?;
    if cells.n_steps() == 0 {
        return Ok(field.clone());
    }
    let smoother = HarmonicSmoother::new(cells.n_steps());
    tracing::debug!(
        cells = cells.n_cells(),
        steps = cells.n_steps(),
        "Smoothing seasonal cycle"
    );
    cells.map_cells(|series| smoother.smooth(series))?.into_field()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Coordinate;
    use approx::assert_abs_diff_eq;
    use ndarray::{ArrayD, IxDyn};
    use std::f64::consts::PI;

    /// A deterministic series with energy at every frequency
    fn rough_series(n: usize) -> Vec<f64> {
        (0..n)
            .map(|t| {
                let t = t as f64;
                3.0 + (2.0 * PI * t / n as f64).sin()
                    + 0.5 * (2.0 * PI * 20.0 * t / n as f64).cos()
                    + ((t * 7.3).sin() * 43758.5453).fract()
            })
            .collect()
    }

    fn spectrum(series: &[f64]) -> Vec<Complex<f64>> {
        let mut buffer: Vec<Complex<f64>> = series.iter().map(|&x| Complex::new(x, 0.0)).collect();
        FftPlanner::<f64>::new()
            .plan_fft_forward(series.len())
            .process(&mut buffer);
        buffer
    }

    #[test]
    fn mean_is_preserved() {
        let series = rough_series(73);
        let smooth = smooth_series(&series);
        let mean = |s: &[f64]| s.iter().sum::<f64>() / s.len() as f64;
        assert_abs_diff_eq!(mean(&smooth), mean(&series), epsilon = 1e-10);
    }

    #[test]
    fn high_frequencies_are_removed() {
        let n = 73;
        let smooth = smooth_series(&rough_series(n));
        for (k, c) in spectrum(&smooth).iter().enumerate() {
            if (HARMONICS + 1..n - HARMONICS).contains(&k) {
                assert_abs_diff_eq!(c.norm(), 0.0, epsilon = 1e-9);
            }
        }
        // the 20th harmonic is gone entirely
        let residual: f64 = (0..n)
            .map(|t| smooth[t] * (2.0 * PI * 20.0 * t as f64 / n as f64).cos())
            .sum();
        assert_abs_diff_eq!(residual, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn twelfth_harmonic_keeps_half_its_amplitude() {
        let n = 73;
        let series: Vec<f64> = (0..n)
            .map(|t| (2.0 * PI * 12.0 * t as f64 / n as f64).cos())
            .collect();
        let smooth = smooth_series(&series);
        for (a, b) in smooth.iter().zip(&series) {
            assert_abs_diff_eq!(*a, 0.5 * b, epsilon = 1e-9);
        }

        let spectrum = spectrum(&smooth);
        assert_abs_diff_eq!(spectrum[HARMONICS].norm(), n as f64 / 4.0, epsilon = 1e-9);
        assert_abs_diff_eq!(spectrum[n - HARMONICS].norm(), n as f64 / 4.0, epsilon = 1e-9);
        assert_abs_diff_eq!(spectrum[HARMONICS + 1].norm(), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn low_harmonics_pass_unchanged() {
        let n = 73;
        let series: Vec<f64> = (0..n)
            .map(|t| {
                let phase = 2.0 * PI * t as f64 / n as f64;
                10.0 + 2.0 * phase.cos() - (11.0 * phase).sin()
            })
            .collect();
        let smooth = smooth_series(&series);
        for (a, b) in smooth.iter().zip(&series) {
            assert_abs_diff_eq!(*a, *b, epsilon = 1e-9);
        }
    }

    #[test]
    fn short_series_are_kept_whole() {
        let series = rough_series(12);
        let smooth = smooth_series(&series);
        for (a, b) in smooth.iter().zip(&series) {
            assert_abs_diff_eq!(*a, *b, epsilon = 1e-10);
        }
        assert!(smooth_series(&[]).is_empty());
    }

    #[test]
    fn nan_series_is_nan() {
        let mut series = rough_series(73);
        series[5] = f64::NAN;
        assert!(smooth_series(&series).iter().all(|x| x.is_nan()));
    }

    #[test]
    fn field_smoothing_keeps_axis_order() {
        let n = 73;
        let series = rough_series(n);
        // pentad x lat, with the second cell scaled
        let values = ArrayD::from_shape_fn(IxDyn(&[n, 2]), |idx| series[idx[0]] * (1 + idx[1]) as f64);
        let field = GriddedField::new(
            values,
            vec![Coordinate::pentads(n), Coordinate::latitude(vec![0.0, 10.0])],
        )
        .unwrap();

        let smoothed = smooth_harmonics(&field, AxisKind::Time).unwrap();
        assert_eq!(smoothed.shape(), field.shape());
        assert_eq!(smoothed.coords(), field.coords());

        let expected = smooth_series(&series);
        for t in 0..n {
            assert_abs_diff_eq!(smoothed.values()[[t, 0]], expected[t], epsilon = 1e-10);
            assert_abs_diff_eq!(smoothed.values()[[t, 1]], 2.0 * expected[t], epsilon = 1e-9);
        }
    }
}
