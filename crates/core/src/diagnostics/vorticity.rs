//! Vorticity of a 2D velocity field

use crate::error::FieldError;
use crate::field::FieldData;
use crate::spectral::{ddx, ddy};
use tracing::debug;

/// ω = ∂vy/∂x − ∂vx/∂y
///
/// # Errors
///
/// Returns [`FieldError::ShapeMismatch`] if `vx` and `vy` differ in shape.
pub fn vorticity(vx: &FieldData, vy: &FieldData) -> Result<FieldData, FieldError> {
    vx.ensure_same_shape(vy, "vorticity")?;
    debug!("vorticity on {}x{} field", vx.height, vx.width);
    ddx(vy).zip_map(&ddy(vx), "vorticity", |a, b| a - b)
}
