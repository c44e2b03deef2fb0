//! Random periodic stream functions
//!
//! A stream function ψ is generated in three steps:
//!
//! 1. uniform noise in [-1, 1) at every grid point,
//! 2. periodic (wraparound) Gaussian smoothing with standard deviation σ,
//! 3. division by max |ψ| so the result spans [-1, 1].
//!
//! The smoothing kernel is truncated at 4σ, like the usual image-processing
//! Gaussian filter, and applied separably: columns first, then rows. A σ
//! small enough to round the kernel radius to zero (σ < 1/8, including
//! σ = 0) leaves the noise unsmoothed.

use crate::error::FieldError;
use crate::field::FieldData;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Kernel half-width in units of σ
const TRUNCATE: f64 = 4.0;

/// Widest kernel, in grid periods, that is folded point by point
///
/// Past this width σ exceeds 8N and the folded Gaussian equals 1/N in every
/// residue class to within `exp(-2π²σ²/N²)`, far below rounding error.
const MAX_KERNEL_PERIODS: usize = 64;

/// Configuration for the stream function generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamFunctionConfig {
    /// Side length N of the N×N grid
    pub grid_size: usize,

    /// Standard deviation of the Gaussian smoothing, in grid cells.
    /// Larger values give larger, smoother eddies. Values below 1/8 give a
    /// zero-radius kernel and disable smoothing.
    pub sigma: f64,

    /// Seed for the noise source. `None` draws a fresh seed per generator.
    pub seed: Option<u64>,
}

impl Default for StreamFunctionConfig {
    fn default() -> Self {
        Self {
            grid_size: 128,
            sigma: 4.0,
            seed: None,
        }
    }
}

impl StreamFunctionConfig {
    /// Check the externally tunable parameters
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::InvalidParameter`] if `grid_size` is zero or
    /// `sigma` is negative or not finite.
    pub fn validate(&self) -> Result<(), FieldError> {
        if self.grid_size == 0 {
            return Err(FieldError::invalid_parameter(
                "grid_size",
                "must be positive, got 0",
            ));
        }
        if self.grid_size.checked_mul(self.grid_size).is_none() {
            return Err(FieldError::invalid_parameter(
                "grid_size",
                format!("{0}x{0} grid overflows the address space", self.grid_size),
            ));
        }
        validate_sigma(self.sigma)
    }
}

fn validate_sigma(sigma: f64) -> Result<(), FieldError> {
    if sigma.is_finite() && sigma >= 0.0 {
        Ok(())
    } else {
        Err(FieldError::invalid_parameter(
            "sigma",
            format!("must be finite and non-negative, got {sigma}"),
        ))
    }
}

/// Independent uniform samples in [-1, 1) on an N×N grid, row by row
#[must_use]
pub fn uniform_noise<R: Rng>(n: usize, rng: &mut R) -> FieldData {
    FieldData {
        data: (0..n * n).map(|_| rng.random_range(-1.0..1.0)).collect(),
        width: n,
        height: n,
    }
}

/// Kernel half-width in samples, `⌊4σ + 0.5⌋`
///
/// Kept as `f64` so huge σ never reaches an integer cast.
fn kernel_radius(sigma: f64) -> f64 {
    (TRUNCATE * sigma + 0.5).floor()
}

/// Normalized Gaussian weights folded onto a periodic axis of length `n`
///
/// Entry `j` holds the total weight of every kernel offset congruent to `j`
/// modulo `n`, so kernels wider than the grid wrap around correctly. A kernel
/// spanning more than [`MAX_KERNEL_PERIODS`] periods folds to the uniform
/// weight `1/n`.
fn periodic_kernel(sigma: f64, n: usize) -> Vec<f64> {
    let radius = kernel_radius(sigma);
    let span_limit = n.saturating_mul(MAX_KERNEL_PERIODS);
    if 2.0 * radius + 1.0 > span_limit as f64 {
        return vec![1.0 / n as f64; n];
    }

    // Bounded by the span limit above
    let radius = radius as usize;
    let mut folded = vec![0.0; n];
    if radius == 0 {
        folded[0] = 1.0;
        return folded;
    }

    let mut total = 0.0;
    let inv_two_var = 0.5 / (sigma * sigma);
    for offset in 0..=2 * radius {
        let d = offset as f64 - radius as f64;
        let w = (-d * d * inv_two_var).exp();
        // offset - radius, taken modulo n
        let j = (offset + n - radius % n) % n;
        folded[j] += w;
        total += w;
    }
    for w in &mut folded {
        *w /= total;
    }
    folded
}

/// Circular correlation of every row with a folded kernel
fn smooth_rows(field: &FieldData, kernel: &[f64]) -> FieldData {
    let width = field.width;
    let mut out = FieldData::new(field.width, field.height);
    out.data
        .par_chunks_mut(width)
        .zip(field.data.par_chunks(width))
        .for_each(|(out_row, in_row)| {
            for (x, value) in out_row.iter_mut().enumerate() {
                *value = kernel
                    .iter()
                    .enumerate()
                    .filter(|&(_, &w)| w != 0.0)
                    .map(|(j, &w)| w * in_row[(x + j) % width])
                    .sum();
            }
        });
    out
}

/// Periodic Gaussian filter with standard deviation `sigma` along both axes
///
/// # Errors
///
/// Returns [`FieldError::InvalidParameter`] if `sigma` is negative or not finite.
pub fn gaussian_filter_periodic(field: &FieldData, sigma: f64) -> Result<FieldData, FieldError> {
    validate_sigma(sigma)?;
    // A zero-radius kernel is the identity (this covers σ = 0)
    if kernel_radius(sigma) == 0.0 || field.data.is_empty() {
        return Ok(field.clone());
    }

    let column_kernel = periodic_kernel(sigma, field.height);
    let row_kernel = periodic_kernel(sigma, field.width);
    let smoothed_columns = smooth_rows(&field.transpose(), &column_kernel).transpose();
    Ok(smooth_rows(&smoothed_columns, &row_kernel))
}

/// Divide by the largest absolute value so the field spans [-1, 1]
///
/// # Errors
///
/// Returns [`FieldError::ZeroField`] if every value is zero (or the field is empty).
pub fn normalize_max_abs(field: FieldData) -> Result<FieldData, FieldError> {
    let max_abs = field.max_abs();
    if max_abs == 0.0 {
        return Err(FieldError::ZeroField);
    }
    Ok(FieldData {
        data: field.data.into_iter().map(|v| v / max_abs).collect(),
        width: field.width,
        height: field.height,
    })
}

/// Smooth and normalize an existing noise field
///
/// # Errors
///
/// Returns [`FieldError::InvalidParameter`] for a bad `sigma` and
/// [`FieldError::ZeroField`] if the smoothed noise is identically zero.
pub fn stream_function_from_noise(noise: &FieldData, sigma: f64) -> Result<FieldData, FieldError> {
    normalize_max_abs(gaussian_filter_periodic(noise, sigma)?)
}

/// Generate an N×N random stream function from `rng`
///
/// # Errors
///
/// Returns [`FieldError::InvalidParameter`] for `n == 0` or a bad `sigma`,
/// and [`FieldError::ZeroField`] if the smoothed noise is identically zero.
pub fn generate_stream_function<R: Rng>(
    n: usize,
    sigma: f64,
    rng: &mut R,
) -> Result<FieldData, FieldError> {
    StreamFunctionConfig {
        grid_size: n,
        sigma,
        seed: None,
    }
    .validate()?;
    debug!("Generating {n}x{n} stream function, sigma = {sigma}");
    stream_function_from_noise(&uniform_noise(n, rng), sigma)
}

/// Seeded generator producing a sequence of stream functions
#[derive(Debug, Clone)]
pub struct StreamFunctionGenerator {
    config: StreamFunctionConfig,
    seed: u64,
    rng: StdRng,
}

impl StreamFunctionGenerator {
    /// Create a generator, drawing a seed if the config has none
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::InvalidParameter`] if the config does not validate.
    pub fn new(config: StreamFunctionConfig) -> Result<Self, FieldError> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(|| rand::rng().random());
        info!(
            "Stream function generator: {}x{} grid, sigma = {}, seed = {}",
            config.grid_size, config.grid_size, config.sigma, seed
        );
        Ok(Self {
            config,
            seed,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    /// Seed actually in use (reported so unseeded runs can be reproduced)
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generator configuration
    #[must_use]
    pub fn config(&self) -> &StreamFunctionConfig {
        &self.config
    }

    /// Next stream function from the generator's noise stream
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::ZeroField`] if the smoothed noise is identically zero.
    pub fn generate(&mut self) -> Result<FieldData, FieldError> {
        generate_stream_function(self.config.grid_size, self.config.sigma, &mut self.rng)
    }
}
