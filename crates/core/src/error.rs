//! Error types for field construction and spectral diagnostics

use std::fmt;

/// Errors raised at the boundary of a field operation
///
/// Every variant is a precondition failure detected before any numeric work
/// is done. None of them is recoverable inside the library; callers are
/// expected to stop the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldError {
    /// Two fields taking part in one computation have different shapes
    ShapeMismatch {
        /// Operation that rejected the input
        operation: &'static str,
        /// Shape of the first operand as `(rows, cols)`
        expected: (usize, usize),
        /// Shape of the offending operand as `(rows, cols)`
        found: (usize, usize),
    },
    /// Operation requires an N×N field
    NotSquare {
        /// Operation that rejected the input
        operation: &'static str,
        /// Number of rows of the input
        rows: usize,
        /// Number of columns of the input
        cols: usize,
    },
    /// Generated field is identically zero and cannot be normalized
    ZeroField,
    /// Configuration value out of range
    InvalidParameter {
        /// Parameter name (e.g. `"grid_size"`, `"sigma"`)
        name: &'static str,
        /// Description of the violated constraint
        message: String,
    },
    /// Raw data does not match the declared grid dimensions
    DataLength {
        /// `width * height`
        expected: usize,
        /// Actual length of the supplied buffer
        found: usize,
    },
}

impl FieldError {
    /// Create an invalid parameter error with a formatted constraint message.
    pub fn invalid_parameter(name: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::ShapeMismatch {
                operation,
                expected,
                found,
            } => write!(
                f,
                "{operation}: shape mismatch, expected {}x{} but found {}x{}",
                expected.0, expected.1, found.0, found.1
            ),
            FieldError::NotSquare {
                operation,
                rows,
                cols,
            } => write!(f, "{operation}: field must be square, got {rows}x{cols}"),
            FieldError::ZeroField => {
                write!(f, "Generated pattern has zero maximum; cannot normalize")
            }
            FieldError::InvalidParameter { name, message } => {
                write!(f, "Invalid parameter {name}: {message}")
            }
            FieldError::DataLength { expected, found } => {
                write!(f, "Field data has {found} values, expected {expected}")
            }
        }
    }
}

impl std::error::Error for FieldError {}
