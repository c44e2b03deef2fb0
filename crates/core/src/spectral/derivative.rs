//! Spectral derivative of a 1D periodic sequence
//!
//! The sequence is transformed, each coefficient is multiplied by `i·k` with
//! `k` from [`angular_wavenumbers`], and the result is transformed back. The
//! imaginary part of the inverse is rounding noise for real input and is
//! discarded.
//!
//! Periodicity is a precondition, not something that is checked: sample `n`
//! is assumed equal to sample `0`. A sequence with a jump across the
//! wraparound produces Gibbs ringing, not an error.

use super::wavenumber::angular_wavenumbers;
use rustfft::num_complex::Complex64;
use rustfft::{Fft, FftPlanner};
use std::sync::Arc;

/// Planned derivative operator for sequences of one fixed length
///
/// Planning the transform pair once and reusing it across every row of a
/// field is what [`super::axis`] does. The operator holds no mutable state,
/// so a single instance can be shared between rayon workers.
#[derive(Clone)]
pub struct PeriodicDerivative {
    len: usize,
    forward: Arc<dyn Fft<f64>>,
    inverse: Arc<dyn Fft<f64>>,
    /// `i·k / n`, folding the inverse transform normalization into the multiplier
    multipliers: Vec<Complex64>,
}

impl std::fmt::Debug for PeriodicDerivative {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PeriodicDerivative")
            .field("len", &self.len)
            .finish_non_exhaustive()
    }
}

impl PeriodicDerivative {
    /// Plan forward and inverse transforms for sequences of length `len`
    #[must_use]
    pub fn new(len: usize) -> Self {
        // Lengths 0 and 1 never reach the transform; plan a single point.
        let mut planner = FftPlanner::<f64>::new();
        let forward = planner.plan_fft_forward(len.max(1));
        let inverse = planner.plan_fft_inverse(len.max(1));
        let scale = if len == 0 { 0.0 } else { 1.0 / len as f64 };
        let multipliers = angular_wavenumbers(len)
            .into_iter()
            .map(|k| Complex64::new(0.0, k * scale))
            .collect();
        Self {
            len,
            forward,
            inverse,
            multipliers,
        }
    }

    /// Sequence length this operator was planned for
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// True for the zero-length operator
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Scratch buffer length required by [`Self::apply_with_scratch`]
    #[must_use]
    pub fn scratch_len(&self) -> usize {
        self.forward
            .get_inplace_scratch_len()
            .max(self.inverse.get_inplace_scratch_len())
    }

    /// Differentiate `input` into `output`, both of length [`Self::len`]
    ///
    /// `buffer` and `scratch` are working storage; they are resized as needed
    /// so callers can keep them alive across many rows.
    ///
    /// # Panics
    ///
    /// Panics if `input` or `output` does not have the planned length.
    pub fn apply_with_scratch(
        &self,
        input: &[f64],
        output: &mut [f64],
        buffer: &mut Vec<Complex64>,
        scratch: &mut Vec<Complex64>,
    ) {
        assert_eq!(input.len(), self.len, "Input length does not match plan");
        assert_eq!(output.len(), self.len, "Output length does not match plan");

        // A single sample has only the mean mode; its derivative is zero.
        if self.len <= 1 {
            output.fill(0.0);
            return;
        }

        buffer.clear();
        buffer.extend(input.iter().map(|&v| Complex64::new(v, 0.0)));
        scratch.resize(self.scratch_len(), Complex64::new(0.0, 0.0));

        self.forward.process_with_scratch(buffer, scratch);
        for (c, m) in buffer.iter_mut().zip(&self.multipliers) {
            *c *= *m;
        }
        self.inverse.process_with_scratch(buffer, scratch);

        for (out, c) in output.iter_mut().zip(buffer.iter()) {
            *out = c.re;
        }
    }

    /// Differentiate a sequence of the planned length
    ///
    /// # Panics
    ///
    /// Panics if `input.len() != self.len()`.
    #[must_use]
    pub fn apply(&self, input: &[f64]) -> Vec<f64> {
        let mut output = vec![0.0; input.len()];
        let mut buffer = Vec::with_capacity(input.len());
        let mut scratch = Vec::new();
        self.apply_with_scratch(input, &mut output, &mut buffer, &mut scratch);
        output
    }
}

/// Derivative of a periodic, unit-spaced sequence with respect to its index
///
/// Empty input yields an empty output and a single sample yields `[0.0]`.
#[must_use]
pub fn spectral_derivative(samples: &[f64]) -> Vec<f64> {
    PeriodicDerivative::new(samples.len()).apply(samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::TAU;

    #[test]
    fn test_degenerate_lengths() {
        assert!(spectral_derivative(&[]).is_empty());
        assert_eq!(spectral_derivative(&[3.5]), vec![0.0]);
    }

    #[test]
    fn test_constant_has_zero_derivative() {
        let d = spectral_derivative(&[2.0; 16]);
        for v in d {
            assert_abs_diff_eq!(v, 0.0, epsilon = 1e-14);
        }
    }

    #[test]
    fn test_sine_derivative_is_cosine() {
        for n in [8_usize, 15, 32, 33] {
            let w = TAU * 3.0 / n as f64;
            let samples: Vec<f64> = (0..n).map(|i| (w * i as f64).sin()).collect();
            let d = spectral_derivative(&samples);
            for (i, v) in d.iter().enumerate() {
                assert_abs_diff_eq!(*v, w * (w * i as f64).cos(), epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_linear_in_input() {
        let n = 12;
        let a: Vec<f64> = (0..n).map(|i| (TAU * i as f64 / n as f64).cos()).collect();
        let b: Vec<f64> = (0..n).map(|i| (2.0 * TAU * i as f64 / n as f64).sin()).collect();
        let sum: Vec<f64> = a.iter().zip(&b).map(|(x, y)| 2.0 * x - y).collect();

        let da = spectral_derivative(&a);
        let db = spectral_derivative(&b);
        let dsum = spectral_derivative(&sum);
        for i in 0..n {
            assert_abs_diff_eq!(dsum[i], 2.0 * da[i] - db[i], epsilon = 1e-12);
        }
    }

    #[test]
    fn test_nyquist_mode_is_annihilated() {
        // (-1)^i is the Nyquist mode of an even-length grid
        let samples: Vec<f64> = (0..8).map(|i| if i % 2 == 0 { 1.0 } else { -1.0 }).collect();
        for v in spectral_derivative(&samples) {
            assert_abs_diff_eq!(v, 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_reused_plan_matches_fresh_plan() {
        let op = PeriodicDerivative::new(10);
        assert_eq!(op.len(), 10);
        let mut buffer = Vec::new();
        let mut scratch = Vec::new();
        for shift in 0..3 {
            let row: Vec<f64> = (0..10).map(|i| ((i + shift) as f64 * 0.7).sin()).collect();
            let mut out = vec![0.0; 10];
            op.apply_with_scratch(&row, &mut out, &mut buffer, &mut scratch);
            for (a, b) in out.iter().zip(spectral_derivative(&row)) {
                assert_abs_diff_eq!(*a, b, epsilon = 1e-14);
            }
        }
    }
}
