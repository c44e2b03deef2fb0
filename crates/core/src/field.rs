//! Scalar and vector field containers
//!
//! Fields are stored as flat `Vec<f64>` in row-major order. Axis 0 (rows) is
//! the y-coordinate and axis 1 (columns) is the x-coordinate, so the value at
//! `(x, y)` lives at index `y * width + x`. Grid spacing is always one sample
//! and both axes are implicitly periodic.

use crate::error::FieldError;
use serde::{Deserialize, Serialize};

/// Real-valued 2D field on a periodic, unit-spaced grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldData {
    /// Field values in row-major order (y * width + x)
    pub data: Vec<f64>,
    /// Number of columns (x extent)
    pub width: usize,
    /// Number of rows (y extent)
    pub height: usize,
}

impl FieldData {
    /// Create a new field with given dimensions, initialized to zero
    ///
    /// # Arguments
    ///
    /// * `width` - Number of columns
    /// * `height` - Number of rows
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self::with_value(width, height, 0.0)
    }

    /// Create a new field with given dimensions, initialized to a value
    #[must_use]
    pub fn with_value(width: usize, height: usize, value: f64) -> Self {
        Self {
            data: vec![value; width * height],
            width,
            height,
        }
    }

    /// Create an N×N field initialized to zero
    #[must_use]
    pub fn square(n: usize) -> Self {
        Self::new(n, n)
    }

    /// Wrap an existing row-major buffer
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::DataLength`] if `data.len() != width * height`.
    pub fn from_vec(width: usize, height: usize, data: Vec<f64>) -> Result<Self, FieldError> {
        if data.len() != width * height {
            return Err(FieldError::DataLength {
                expected: width * height,
                found: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Build a field by evaluating `f(x, y)` at every grid point
    #[must_use]
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> f64) -> Self {
        let mut data = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Self {
            data,
            width,
            height,
        }
    }

    /// Shape as `(rows, cols)`
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    /// True if the grid is N×N
    #[must_use]
    pub fn is_square(&self) -> bool {
        self.width == self.height
    }

    /// Get reference to field data
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Consume the field and return the raw buffer
    #[must_use]
    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }

    /// Get value at grid position
    ///
    /// # Panics
    ///
    /// Panics if coordinates are out of bounds
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> f64 {
        assert!(
            x < self.width && y < self.height,
            "Coordinates out of bounds"
        );
        self.data[y * self.width + x]
    }

    /// Set value at grid position
    ///
    /// # Panics
    ///
    /// Panics if coordinates are out of bounds
    pub fn set(&mut self, x: usize, y: usize, value: f64) {
        assert!(
            x < self.width && y < self.height,
            "Coordinates out of bounds"
        );
        self.data[y * self.width + x] = value;
    }

    /// Row `y` as a slice (fixed y, varying x)
    #[must_use]
    pub fn row(&self, y: usize) -> &[f64] {
        &self.data[y * self.width..(y + 1) * self.width]
    }

    /// Swap the row and column axes
    #[must_use]
    pub fn transpose(&self) -> Self {
        let mut data = vec![0.0; self.data.len()];
        for y in 0..self.height {
            for x in 0..self.width {
                data[x * self.height + y] = self.data[y * self.width + x];
            }
        }
        Self {
            data,
            width: self.height,
            height: self.width,
        }
    }

    /// Apply `f` to every value
    #[must_use]
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            data: self.data.iter().map(|&v| f(v)).collect(),
            width: self.width,
            height: self.height,
        }
    }

    /// Combine two equally shaped fields point by point
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::ShapeMismatch`] if the shapes differ.
    pub fn zip_map(
        &self,
        other: &Self,
        operation: &'static str,
        f: impl Fn(f64, f64) -> f64,
    ) -> Result<Self, FieldError> {
        self.ensure_same_shape(other, operation)?;
        Ok(Self {
            data: self
                .data
                .iter()
                .zip(&other.data)
                .map(|(&a, &b)| f(a, b))
                .collect(),
            width: self.width,
            height: self.height,
        })
    }

    /// Check that `other` has the same shape as `self`
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::ShapeMismatch`] naming `operation` if the shapes differ.
    pub fn ensure_same_shape(&self, other: &Self, operation: &'static str) -> Result<(), FieldError> {
        if self.shape() == other.shape() {
            Ok(())
        } else {
            Err(FieldError::ShapeMismatch {
                operation,
                expected: self.shape(),
                found: other.shape(),
            })
        }
    }

    /// Check that the field is N×N
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::NotSquare`] naming `operation` otherwise.
    pub fn ensure_square(&self, operation: &'static str) -> Result<(), FieldError> {
        if self.is_square() {
            Ok(())
        } else {
            Err(FieldError::NotSquare {
                operation,
                rows: self.height,
                cols: self.width,
            })
        }
    }

    /// Smallest value (`+inf` for an empty field)
    #[must_use]
    pub fn min(&self) -> f64 {
        self.data.iter().copied().fold(f64::INFINITY, f64::min)
    }

    /// Largest value (`-inf` for an empty field)
    #[must_use]
    pub fn max(&self) -> f64 {
        self.data.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    /// Largest absolute value (0 for an empty field)
    #[must_use]
    pub fn max_abs(&self) -> f64 {
        self.data.iter().fold(0.0, |acc: f64, &v| acc.max(v.abs()))
    }

    /// Arithmetic mean (0 for an empty field)
    #[must_use]
    pub fn mean(&self) -> f64 {
        if self.data.is_empty() {
            return 0.0;
        }
        self.data.iter().sum::<f64>() / self.data.len() as f64
    }

    /// Largest point-wise absolute difference to `other`
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::ShapeMismatch`] if the shapes differ.
    pub fn max_abs_diff(&self, other: &Self) -> Result<f64, FieldError> {
        self.ensure_same_shape(other, "max_abs_diff")?;
        Ok(self
            .data
            .iter()
            .zip(&other.data)
            .fold(0.0, |acc: f64, (&a, &b)| acc.max((a - b).abs())))
    }
}

/// 2D velocity field as a pair of equally shaped components
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorField {
    /// x-component (along columns)
    pub vx: FieldData,
    /// y-component (along rows)
    pub vy: FieldData,
}

impl VectorField {
    /// Pair two components
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::ShapeMismatch`] if `vx` and `vy` differ in shape.
    pub fn new(vx: FieldData, vy: FieldData) -> Result<Self, FieldError> {
        vx.ensure_same_shape(&vy, "vector_field")?;
        Ok(Self { vx, vy })
    }

    /// Shared shape of both components as `(rows, cols)`
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        self.vx.shape()
    }
}
