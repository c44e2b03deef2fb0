//! Full-field partial derivatives along one grid axis
//!
//! The axis convention is fixed here and every diagnostic relies on it:
//!
//! ```text
//! axis 1 (columns) = x   →  ddx differentiates each row
//! axis 0 (rows)    = y   →  ddy differentiates each column
//! ```
//!
//! Each row (or column) is an independent periodic sequence; no information
//! crosses between them and there is no boundary special-casing.

use super::derivative::PeriodicDerivative;
use crate::field::FieldData;
use rayon::prelude::*;
use rustfft::num_complex::Complex64;
use tracing::debug;

/// ∂f/∂x: derivative of every row as a periodic sequence
///
/// Rows are processed in parallel. Each worker writes only its own output
/// row, so the result does not depend on the number of threads.
#[must_use]
pub fn ddx(field: &FieldData) -> FieldData {
    debug!("ddx on {}x{} field", field.height, field.width);

    let mut out = FieldData::new(field.width, field.height);
    if field.data.is_empty() {
        return out;
    }

    let op = PeriodicDerivative::new(field.width);
    out.data
        .par_chunks_mut(field.width)
        .zip(field.data.par_chunks(field.width))
        .for_each_init(
            || (Vec::<Complex64>::new(), Vec::<Complex64>::new()),
            |(buffer, scratch), (out_row, in_row)| {
                op.apply_with_scratch(in_row, out_row, buffer, scratch);
            },
        );
    out
}

/// ∂f/∂y: derivative of every column as a periodic sequence
///
/// Implemented as transpose → [`ddx`] → transpose so both operators share the
/// same per-row code path.
#[must_use]
pub fn ddy(field: &FieldData) -> FieldData {
    ddx(&field.transpose()).transpose()
}
