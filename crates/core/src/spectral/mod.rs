//! Spectral differentiation on periodic, unit-spaced grids
//!
//! Two independent paths compute derivatives:
//!
//! - [`PeriodicDerivative`] / [`ddx`] / [`ddy`]: repeated 1D transforms along
//!   each row or column.
//! - [`Spectrum2D`]: one 2D transform, then one inverse per derivative.
//!
//! Both take their wavenumbers from [`wavenumber`], so derivatives computed
//! one way agree with the other to rounding error.

pub mod axis;
pub mod derivative;
pub mod fft2d;
pub mod wavenumber;

pub use axis::{ddx, ddy};
pub use derivative::{spectral_derivative, PeriodicDerivative};
pub use fft2d::Spectrum2D;
pub use wavenumber::{angular_wavenumbers, fft_frequencies, WavenumberGrid};
