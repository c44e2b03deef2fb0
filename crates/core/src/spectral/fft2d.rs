//! Two-dimensional discrete Fourier transform of a real field
//!
//! The forward transform is computed once; any number of inverse transforms
//! of the spectrum multiplied by a per-mode factor can then be taken from it.
//! Coefficient `(row, col)` belongs to wavenumber `ky[row]`, `kx[col]` in the
//! ordering of [`super::wavenumber`].

use crate::field::FieldData;
use rayon::prelude::*;
use rustfft::num_complex::Complex64;
use rustfft::{Fft, FftPlanner};
use std::sync::Arc;

/// Unnormalized 2D spectrum of a real field
#[derive(Debug, Clone)]
pub struct Spectrum2D {
    /// Coefficients in row-major order (row * width + col)
    coeffs: Vec<Complex64>,
    width: usize,
    height: usize,
}

/// Transform every row of a row-major buffer in place
fn transform_rows(data: &mut [Complex64], width: usize, fft: &Arc<dyn Fft<f64>>) {
    let scratch_len = fft.get_inplace_scratch_len();
    data.par_chunks_mut(width).for_each_init(
        || vec![Complex64::new(0.0, 0.0); scratch_len],
        |scratch, row| fft.process_with_scratch(row, scratch),
    );
}

fn transpose(data: &[Complex64], width: usize, height: usize) -> Vec<Complex64> {
    let mut out = vec![Complex64::new(0.0, 0.0); data.len()];
    for y in 0..height {
        for x in 0..width {
            out[x * height + y] = data[y * width + x];
        }
    }
    out
}

/// Row transforms, then column transforms (via transposition)
fn transform_2d(
    mut data: Vec<Complex64>,
    width: usize,
    height: usize,
    row_fft: &Arc<dyn Fft<f64>>,
    col_fft: &Arc<dyn Fft<f64>>,
) -> Vec<Complex64> {
    transform_rows(&mut data, width, row_fft);
    let mut cols = transpose(&data, width, height);
    transform_rows(&mut cols, height, col_fft);
    transpose(&cols, height, width)
}

impl Spectrum2D {
    /// Forward transform of `field`
    #[must_use]
    pub fn forward(field: &FieldData) -> Self {
        let (width, height) = (field.width, field.height);
        let data: Vec<Complex64> = field
            .data
            .iter()
            .map(|&v| Complex64::new(v, 0.0))
            .collect();

        let coeffs = if data.is_empty() {
            data
        } else {
            let mut planner = FftPlanner::<f64>::new();
            let row_fft = planner.plan_fft_forward(width);
            let col_fft = planner.plan_fft_forward(height);
            transform_2d(data, width, height, &row_fft, &col_fft)
        };

        Self {
            coeffs,
            width,
            height,
        }
    }

    /// Shape as `(rows, cols)`
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    /// Coefficient at `(row, col)`
    #[must_use]
    pub fn coefficient(&self, row: usize, col: usize) -> Complex64 {
        self.coeffs[row * self.width + col]
    }

    /// Real part of the inverse transform of `factor(row, col) · coefficient`
    ///
    /// The inverse is normalized by `1 / (rows · cols)`, so a factor of one
    /// returns the original field.
    #[must_use]
    pub fn inverse_real_with(&self, factor: impl Fn(usize, usize) -> Complex64) -> FieldData {
        let (width, height) = (self.width, self.height);
        if self.coeffs.is_empty() {
            return FieldData::new(width, height);
        }

        let data: Vec<Complex64> = self
            .coeffs
            .iter()
            .enumerate()
            .map(|(i, &c)| c * factor(i / width, i % width))
            .collect();

        let mut planner = FftPlanner::<f64>::new();
        let row_fft = planner.plan_fft_inverse(width);
        let col_fft = planner.plan_fft_inverse(height);
        let spatial = transform_2d(data, width, height, &row_fft, &col_fft);

        let scale = 1.0 / (width * height) as f64;
        FieldData {
            data: spatial.iter().map(|c| c.re * scale).collect(),
            width,
            height,
        }
    }
}
