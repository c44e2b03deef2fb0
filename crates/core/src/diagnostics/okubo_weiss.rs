//! Okubo–Weiss invariant of a stream function
//!
//! ```text
//! Q = ψxy² − ψxx·ψyy
//! ```
//!
//! The second partials come from a single 2D transform of ψ and three
//! inverse transforms, independently of the row/column operators in
//! [`crate::spectral::axis`]. Composing those operators (e.g. `ddx(ddx(ψ))`)
//! gives the same partials to rounding error, which is what the
//! cross-validation tests check.
//!
//! Q < 0 marks vorticity-dominated regions and Q > 0 strain-dominated ones.

use crate::error::FieldError;
use crate::field::FieldData;
use crate::spectral::{Spectrum2D, WavenumberGrid};
use rustfft::num_complex::Complex64;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Second partial derivatives of a scalar field
#[derive(Debug, Clone)]
pub struct SecondPartials {
    /// ∂²ψ/∂x²
    pub xx: FieldData,
    /// ∂²ψ/∂y²
    pub yy: FieldData,
    /// ∂²ψ/∂x∂y
    pub xy: FieldData,
}

/// Second partials of `psi` from one 2D forward transform
///
/// Multipliers are `(i·kx)²`, `(i·ky)²` and `(i·kx)(i·ky)`, with `kx` varying
/// along columns and `ky` along rows.
///
/// # Errors
///
/// Returns [`FieldError::NotSquare`] unless `psi` is N×N.
pub fn second_partials(psi: &FieldData) -> Result<SecondPartials, FieldError> {
    psi.ensure_square("okubo_weiss")?;
    let n = psi.width;
    debug!("Okubo-Weiss second partials on {n}x{n} field");

    let grid = WavenumberGrid::square(n);
    let spectrum = Spectrum2D::forward(psi);
    let kx = |row: usize, col: usize| grid.kx.get(col, row);
    let ky = |row: usize, col: usize| grid.ky.get(col, row);

    // (i·a)(i·b) = -a·b, purely real
    let xx = spectrum.inverse_real_with(|r, c| Complex64::new(-kx(r, c) * kx(r, c), 0.0));
    let yy = spectrum.inverse_real_with(|r, c| Complex64::new(-ky(r, c) * ky(r, c), 0.0));
    let xy = spectrum.inverse_real_with(|r, c| Complex64::new(-kx(r, c) * ky(r, c), 0.0));

    Ok(SecondPartials { xx, yy, xy })
}

impl SecondPartials {
    /// Q = ψxy² − ψxx·ψyy at every grid point
    #[must_use]
    pub fn okubo_weiss(&self) -> FieldData {
        FieldData {
            data: self
                .xy
                .data
                .iter()
                .zip(&self.xx.data)
                .zip(&self.yy.data)
                .map(|((&xy, &xx), &yy)| xy * xy - xx * yy)
                .collect(),
            width: self.xx.width,
            height: self.xx.height,
        }
    }
}

/// Okubo–Weiss field Q of the stream function `psi`
///
/// # Errors
///
/// Returns [`FieldError::NotSquare`] unless `psi` is N×N.
pub fn okubo_weiss(psi: &FieldData) -> Result<FieldData, FieldError> {
    Ok(second_partials(psi)?.okubo_weiss())
}

/// Dominant local flow character by the sign of Q
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlowRegime {
    /// Q < 0: rotation dominates strain
    VorticityDominated,
    /// Q > 0: strain dominates rotation
    StrainDominated,
    /// Q = 0
    Neutral,
}

impl FlowRegime {
    /// Classify a single Q value
    #[must_use]
    pub fn classify(q: f64) -> Self {
        if q < 0.0 {
            Self::VorticityDominated
        } else if q > 0.0 {
            Self::StrainDominated
        } else {
            Self::Neutral
        }
    }
}

/// Q split by sign, zero elsewhere
#[derive(Debug, Clone)]
pub struct RegimePartition {
    /// Q where Q < 0, otherwise 0
    pub vorticity_dominated: FieldData,
    /// Q where Q > 0, otherwise 0
    pub strain_dominated: FieldData,
}

impl RegimePartition {
    /// Fraction of grid points in the vorticity-dominated regime
    #[must_use]
    pub fn vorticity_fraction(&self) -> f64 {
        fraction_nonzero(&self.vorticity_dominated)
    }

    /// Fraction of grid points in the strain-dominated regime
    #[must_use]
    pub fn strain_fraction(&self) -> f64 {
        fraction_nonzero(&self.strain_dominated)
    }
}

fn fraction_nonzero(field: &FieldData) -> f64 {
    if field.data.is_empty() {
        return 0.0;
    }
    let count = field.data.iter().filter(|&&v| v != 0.0).count();
    count as f64 / field.data.len() as f64
}

/// Split Q into its vorticity- and strain-dominated parts
#[must_use]
pub fn partition_regimes(q: &FieldData) -> RegimePartition {
    RegimePartition {
        vorticity_dominated: q.map(|v| if v < 0.0 { v } else { 0.0 }),
        strain_dominated: q.map(|v| if v > 0.0 { v } else { 0.0 }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spectral::{ddx, ddy};
    use approx::assert_abs_diff_eq;
    use std::f64::consts::TAU;

    #[test]
    fn test_cellular_flow() {
        // ψ = sin(ax)·sin(by):
        // ψxx = -a²ψ, ψyy = -b²ψ, ψxy = ab·cos(ax)cos(by)
        let n = 16;
        let a = TAU * 2.0 / n as f64;
        let b = TAU / n as f64;
        let psi = FieldData::from_fn(n, n, |x, y| (a * x as f64).sin() * (b * y as f64).sin());
        let partials = second_partials(&psi).unwrap();
        let q = partials.okubo_weiss();

        for y in 0..n {
            for x in 0..n {
                let (sx, cx) = (a * x as f64).sin_cos();
                let (sy, cy) = (b * y as f64).sin_cos();
                let p = sx * sy;
                assert_abs_diff_eq!(partials.xx.get(x, y), -a * a * p, epsilon = 1e-12);
                assert_abs_diff_eq!(partials.yy.get(x, y), -b * b * p, epsilon = 1e-12);
                assert_abs_diff_eq!(partials.xy.get(x, y), a * b * cx * cy, epsilon = 1e-12);
                let expected = (a * b * cx * cy).powi(2) - a * a * b * b * p * p;
                assert_abs_diff_eq!(q.get(x, y), expected, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_matches_composed_axis_derivatives() {
        let n = 9;
        let psi = FieldData::from_fn(n, n, |x, y| {
            ((x * 7 + y * 3) as f64 * 0.41).sin() + ((x * y) as f64 * 0.2).cos()
        });
        let partials = second_partials(&psi).unwrap();
        let xx = ddx(&ddx(&psi));
        let yy = ddy(&ddy(&psi));
        let xy = ddx(&ddy(&psi));
        let scale = xx.max_abs().max(yy.max_abs()).max(xy.max_abs());
        assert!(partials.xx.max_abs_diff(&xx).unwrap() < 1e-10 * scale);
        assert!(partials.yy.max_abs_diff(&yy).unwrap() < 1e-10 * scale);
        assert!(partials.xy.max_abs_diff(&xy).unwrap() < 1e-10 * scale);
    }

    #[test]
    fn test_rejects_non_square() {
        let psi = FieldData::new(8, 6);
        assert_eq!(
            okubo_weiss(&psi).unwrap_err(),
            FieldError::NotSquare {
                operation: "okubo_weiss",
                rows: 6,
                cols: 8
            }
        );
    }

    #[test]
    fn test_regime_partition() {
        let q = FieldData::from_vec(2, 2, vec![-2.0, 0.0, 3.0, -1.0]).unwrap();
        let parts = partition_regimes(&q);
        assert_eq!(parts.vorticity_dominated.data, vec![-2.0, 0.0, 0.0, -1.0]);
        assert_eq!(parts.strain_dominated.data, vec![0.0, 0.0, 3.0, 0.0]);
        assert_abs_diff_eq!(parts.vorticity_fraction(), 0.5);
        assert_abs_diff_eq!(parts.strain_fraction(), 0.25);

        assert_eq!(FlowRegime::classify(-0.1), FlowRegime::VorticityDominated);
        assert_eq!(FlowRegime::classify(0.1), FlowRegime::StrainDominated);
        assert_eq!(FlowRegime::classify(0.0), FlowRegime::Neutral);
    }
}
