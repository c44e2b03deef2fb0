//! Angular wavenumbers shared by every differentiation path
//!
//! Mode `k` of an axis with `n` samples has cycles-per-sample frequency
//! `k / n`, listed in the standard FFT output order: the non-negative
//! frequencies first, then the negative ones counting up towards zero.
//!
//! ```text
//! n = 4:  [0, 1/4, -1/2, -1/4]
//! n = 5:  [0, 1/5,  2/5, -2/5, -1/5]
//! ```
//!
//! The angular wavenumber is `2π · k / n`. For even `n` the Nyquist mode
//! (`k = -n/2`) has no partner, so a real signal's coefficient there is real
//! and `i·k` times it cannot come back as a real signal. That mode is given
//! angular wavenumber zero. Both the 1D row/column derivative and the 2D
//! single-transform derivative read their wavenumbers from here, so the two
//! agree to rounding error.

use crate::field::FieldData;
use std::f64::consts::TAU;

/// Cycles-per-sample frequencies in FFT output order (unit spacing)
#[must_use]
pub fn fft_frequencies(n: usize) -> Vec<f64> {
    let positive = (n + 1) / 2;
    (0..n)
        .map(|i| {
            let k = if i < positive {
                i as f64
            } else {
                i as f64 - n as f64
            };
            k / n as f64
        })
        .collect()
}

/// Angular wavenumbers `2π·k/n` in FFT output order, Nyquist mode zeroed
#[must_use]
pub fn angular_wavenumbers(n: usize) -> Vec<f64> {
    let mut k: Vec<f64> = fft_frequencies(n).into_iter().map(|f| TAU * f).collect();
    if n % 2 == 0 && n > 0 {
        k[n / 2] = 0.0;
    }
    k
}

/// Wavenumbers broadcast over an N×N spectrum
///
/// `kx` varies along the column axis and `ky` along the row axis, so the
/// pair at `(row, col)` belongs to the same position of a 2D transform.
#[derive(Debug, Clone)]
pub struct WavenumberGrid {
    /// Angular wavenumber along x (columns)
    pub kx: FieldData,
    /// Angular wavenumber along y (rows)
    pub ky: FieldData,
}

impl WavenumberGrid {
    /// Build the grids for an N×N field
    #[must_use]
    pub fn square(n: usize) -> Self {
        let k = angular_wavenumbers(n);
        Self {
            kx: FieldData::from_fn(n, n, |x, _| k[x]),
            ky: FieldData::from_fn(n, n, |_, y| k[y]),
        }
    }

    /// Side length of the grid
    #[must_use]
    pub fn len(&self) -> usize {
        self.kx.width
    }

    /// True for a 0×0 grid
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.kx.data.is_empty()
    }
}
