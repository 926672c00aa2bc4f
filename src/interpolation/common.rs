//! Common utilities for interpolation algorithms.
//!
//! This module provides shared functionality used by the grid lookups and the
//! interpolation methods.

use crate::error::{GeogridError, Result};

/// Fractional indices closer than this to an integer are treated as exact
pub const SNAP_TOLERANCE: f64 = 1e-6;

/// Clamp an index to valid bounds
pub fn clamp_index(index: f64, size: usize) -> f64 {
    index.max(0.0).min((size - 1) as f64)
}

/// Get the weight for linear interpolation
pub fn linear_weight(fraction: f64) -> (f64, f64) {
    (1.0 - fraction, fraction)
}

/// Round to the nearest integer, ties towards positive infinity
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Snap a fractional index onto the nearest integer when it is within
/// floating-point noise of it
pub fn snap_to_index(value: f64) -> f64 {
    let nearest = value.round();
    if (value - nearest).abs() < SNAP_TOLERANCE {
        nearest
    } else {
        value
    }
}

/// Validate fractional indices against a `(num_y, num_x)` array.
///
/// With `wrap_x` the column may lie anywhere below `num_x`, the last cell
/// wrapping onto column 0.
pub fn check_indices(row: f64, col: f64, shape: (usize, usize), wrap_x: bool) -> Result<()> {
    let (num_y, num_x) = shape;
    if num_y == 0 || num_x == 0 {
        return Err(GeogridError::Interpolation {
            message: "Cannot interpolate on an empty array".to_string(),
        });
    }

    let col_ok = if wrap_x {
        (0.0..num_x as f64).contains(&col)
    } else {
        (0.0..=(num_x - 1) as f64).contains(&col)
    };

    if !(0.0..=(num_y - 1) as f64).contains(&row) || !col_ok {
        return Err(GeogridError::Interpolation {
            message: format!(
                "Index ({}, {}) out of bounds for array of shape ({}, {})",
                row, col, num_y, num_x
            ),
        });
    }

    Ok(())
}

/// Column to the east of `col`, wrapping on global grids
pub fn next_col(col: usize, num_x: usize, wrap_x: bool) -> usize {
    if col + 1 < num_x {
        col + 1
    } else if wrap_x {
        0
    } else {
        num_x - 1
    }
}
