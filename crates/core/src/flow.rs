//! Velocity and diagnostic fields derived from a stream function
//!
//! ```text
//! ψ ──► (vx, vy) = (∂ψ/∂y, −∂ψ/∂x) ──► ω = ∂vy/∂x − ∂vx/∂y
//! └──► Q = ψxy² − ψxx·ψyy
//! ```
//!
//! Every stage is a pure function of its input; [`FlowDiagnostics`] runs
//! them in order and keeps the intermediate fields for display.

use crate::diagnostics::{
    okubo_weiss, partition_regimes, vorticity, CheckSummary, NumericalChecks, DEFAULT_TOLERANCE,
};
use crate::error::FieldError;
use crate::field::{FieldData, VectorField};
use crate::spectral::{ddx, ddy};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Divergence-free velocity (vx, vy) = (∂ψ/∂y, −∂ψ/∂x)
#[must_use]
pub fn velocity_from_stream_function(psi: &FieldData) -> VectorField {
    VectorField {
        vx: ddy(psi),
        vy: ddx(psi).map(|v| -v),
    }
}

/// Point-wise speed sqrt(vx² + vy²)
#[must_use]
pub fn speed(velocity: &VectorField) -> FieldData {
    FieldData {
        data: velocity
            .vx
            .data
            .iter()
            .zip(&velocity.vy.data)
            .map(|(u, v)| u.hypot(*v))
            .collect(),
        width: velocity.vx.width,
        height: velocity.vx.height,
    }
}

/// All fields of one pipeline run
#[derive(Debug, Clone)]
pub struct FlowDiagnostics {
    /// Stream function ψ
    pub psi: FieldData,
    /// Velocity derived from ψ
    pub velocity: VectorField,
    /// Vorticity ω of the velocity
    pub vorticity: FieldData,
    /// Okubo–Weiss field Q of ψ
    pub okubo_weiss: FieldData,
    /// Residuals of the consistency checks
    pub checks: NumericalChecks,
}

/// Value range of a field
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldRange {
    /// Smallest value
    pub min: f64,
    /// Largest value
    pub max: f64,
}

impl FieldRange {
    fn of(field: &FieldData) -> Self {
        Self {
            min: field.min(),
            max: field.max(),
        }
    }
}

/// Serializable summary of a pipeline run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowReport {
    /// Side length N
    pub grid_size: usize,
    /// Range of ψ
    pub psi: FieldRange,
    /// Range of vx
    pub vx: FieldRange,
    /// Range of vy
    pub vy: FieldRange,
    /// Largest speed
    pub max_speed: f64,
    /// Range of ω
    pub vorticity: FieldRange,
    /// Range of Q
    pub okubo_weiss: FieldRange,
    /// Fraction of points with Q < 0
    pub vorticity_dominated_fraction: f64,
    /// Fraction of points with Q > 0
    pub strain_dominated_fraction: f64,
    /// Largest residual of each consistency check
    pub checks: CheckSummary,
}

impl FlowDiagnostics {
    /// Run the full pipeline on `psi`
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::NotSquare`] unless `psi` is N×N.
    pub fn compute(psi: FieldData) -> Result<Self, FieldError> {
        psi.ensure_square("flow_diagnostics")?;
        let n = psi.width;
        info!("Computing flow diagnostics on {n}x{n} grid");

        let velocity = velocity_from_stream_function(&psi);
        let vorticity = vorticity(&velocity.vx, &velocity.vy)?;
        let okubo_weiss = okubo_weiss(&psi)?;
        let checks = NumericalChecks::evaluate(&psi, &velocity)?;

        let summary = checks.summary();
        if summary.passes(DEFAULT_TOLERANCE) {
            info!(
                "Consistency checks passed (max divergence {:.3e})",
                summary.max_continuity
            );
        } else {
            warn!(
                "Consistency checks exceed {:e}: continuity {:.3e}, alignment {:.3e}, magnitude {:.3e}",
                DEFAULT_TOLERANCE,
                summary.max_continuity,
                summary.max_alignment,
                summary.max_magnitude
            );
        }

        Ok(Self {
            psi,
            velocity,
            vorticity,
            okubo_weiss,
            checks,
        })
    }

    /// Summarize the run
    #[must_use]
    pub fn report(&self) -> FlowReport {
        let regimes = partition_regimes(&self.okubo_weiss);
        FlowReport {
            grid_size: self.psi.width,
            psi: FieldRange::of(&self.psi),
            vx: FieldRange::of(&self.velocity.vx),
            vy: FieldRange::of(&self.velocity.vy),
            max_speed: speed(&self.velocity).max_abs(),
            vorticity: FieldRange::of(&self.vorticity),
            okubo_weiss: FieldRange::of(&self.okubo_weiss),
            vorticity_dominated_fraction: regimes.vorticity_fraction(),
            strain_dominated_fraction: regimes.strain_fraction(),
            checks: self.checks.summary(),
        }
    }
}
