//! Residual checks for stream-function-derived velocity fields
//!
//! For (vx, vy) = (∂ψ/∂y, −∂ψ/∂x) all three residuals vanish to rounding error:
//!
//! ```text
//! continuity:  |∂vx/∂x + ∂vy/∂y|
//! alignment:   |vx·∂ψ/∂x + vy·∂ψ/∂y|
//! magnitude:   |vx² + vy² − (∂ψ/∂x)² − (∂ψ/∂y)²|
//! ```
//!
//! A residual well above machine precision means the wavenumber or axis
//! convention is broken somewhere, not that the input is unusual.

use crate::error::FieldError;
use crate::field::{FieldData, VectorField};
use crate::spectral::{ddx, ddy};
use serde::{Deserialize, Serialize};

/// Default tolerance for [`NumericalChecks::passes`]
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// ∂vx/∂x + ∂vy/∂y
///
/// # Errors
///
/// Returns [`FieldError::ShapeMismatch`] if the components differ in shape.
pub fn divergence(velocity: &VectorField) -> Result<FieldData, FieldError> {
    velocity.vx.ensure_same_shape(&velocity.vy, "divergence")?;
    ddx(&velocity.vx).zip_map(&ddy(&velocity.vy), "divergence", |a, b| a + b)
}

/// Absolute residual fields of the three checks
#[derive(Debug, Clone)]
pub struct NumericalChecks {
    /// |∇·v|
    pub continuity: FieldData,
    /// |v·∇ψ|
    pub alignment: FieldData,
    /// ||v|² − |∇ψ|²|
    pub magnitude: FieldData,
}

/// Largest residual of each check
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CheckSummary {
    /// max |∇·v|
    pub max_continuity: f64,
    /// max |v·∇ψ|
    pub max_alignment: f64,
    /// max ||v|² − |∇ψ|²|
    pub max_magnitude: f64,
}

impl NumericalChecks {
    /// Evaluate all residuals for `psi` and `velocity`
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::ShapeMismatch`] if `psi` and `velocity` differ in shape.
    pub fn evaluate(psi: &FieldData, velocity: &VectorField) -> Result<Self, FieldError> {
        psi.ensure_same_shape(&velocity.vx, "numerical_checks")?;
        psi.ensure_same_shape(&velocity.vy, "numerical_checks")?;

        let dpsi_dx = ddx(psi);
        let dpsi_dy = ddy(psi);
        let (vx, vy) = (&velocity.vx.data, &velocity.vy.data);

        let alignment = (0..vx.len())
            .map(|i| (vx[i] * dpsi_dx.data[i] + vy[i] * dpsi_dy.data[i]).abs())
            .collect();
        let magnitude = (0..vx.len())
            .map(|i| {
                let speed2 = vx[i] * vx[i] + vy[i] * vy[i];
                let grad2 = dpsi_dx.data[i] * dpsi_dx.data[i] + dpsi_dy.data[i] * dpsi_dy.data[i];
                (speed2 - grad2).abs()
            })
            .collect();

        Ok(Self {
            continuity: divergence(velocity)?.map(f64::abs),
            alignment: FieldData {
                data: alignment,
                width: psi.width,
                height: psi.height,
            },
            magnitude: FieldData {
                data: magnitude,
                width: psi.width,
                height: psi.height,
            },
        })
    }

    /// Maxima of the residual fields
    #[must_use]
    pub fn summary(&self) -> CheckSummary {
        CheckSummary {
            max_continuity: self.continuity.max_abs(),
            max_alignment: self.alignment.max_abs(),
            max_magnitude: self.magnitude.max_abs(),
        }
    }

    /// True if every residual stays below `tolerance`
    #[must_use]
    pub fn passes(&self, tolerance: f64) -> bool {
        self.summary().passes(tolerance)
    }
}

impl CheckSummary {
    /// True if every maximum stays below `tolerance`
    #[must_use]
    pub fn passes(&self, tolerance: f64) -> bool {
        self.max_continuity < tolerance
            && self.max_alignment < tolerance
            && self.max_magnitude < tolerance
    }
}
