//! Spatial smoothing of field arrays.
//!
//! The smoothing factor is the standard deviation, in grid cells, of a
//! Gaussian kernel truncated at three standard deviations. Missing cells stay
//! missing and missing neighbors are left out of the weighted average.
//! Columns wrap around on global grids.

use ndarray::{Array2, ArrayBase, Data, Ix2};
use std::time::Instant;
use tracing::debug;

use crate::error::{GeogridError, Result};
use crate::grids::Grid;
use crate::mask::is_missing;

/// Kernel radius in standard deviations
const TRUNCATE: f64 = 3.0;

/// 1-D Gaussian weights for offsets `0..=radius`
fn gaussian_weights(sigma: f64, radius: usize) -> Vec<f64> {
    let denom = 2.0 * sigma * sigma;
    (0..=radius)
        .map(|d| {
            let d = d as f64;
            (-(d * d) / denom).exp()
        })
        .collect()
}

/// Offsets `(lo, hi)` visited along an axis of length `len`. Wrapped axes
/// visit each index at most once.
fn axis_offsets(radius: usize, len: usize, wrap: bool) -> (usize, usize) {
    if wrap {
        (radius.min(len / 2), radius.min((len - 1) / 2))
    } else {
        let r = radius.min(len - 1);
        (r, r)
    }
}

/// Weighted sum along rows (`along_x`) or columns with offsets `-lo..=hi`
fn convolve_axis(
    data: &Array2<f64>,
    weights: &[f64],
    (lo, hi): (usize, usize),
    along_x: bool,
    wrap: bool,
) -> Array2<f64> {
    let (num_y, num_x) = data.dim();
    let len = (if along_x { num_x } else { num_y }) as isize;

    Array2::from_shape_fn((num_y, num_x), |(i, j)| {
        let pos = (if along_x { j } else { i }) as isize;
        let mut sum = 0.0;
        for d in -(lo as isize)..=(hi as isize) {
            let mut n = pos + d;
            if wrap {
                n = n.rem_euclid(len);
            } else if n < 0 || n >= len {
                continue;
            }
            let value = if along_x {
                data[[i, n as usize]]
            } else {
                data[[n as usize, j]]
            };
            sum += weights[d.unsigned_abs()] * value;
        }
        sum
    })
}

/// Smooth `array` on `grid` with a Gaussian of standard deviation `factor` cells.
///
/// A factor of zero returns a copy of the input, as does a factor too small
/// for the kernel to reach a neighboring cell.
pub fn smooth<S>(array: &ArrayBase<S, Ix2>, grid: &Grid, factor: f64) -> Result<Array2<f32>>
where
    S: Data<Elem = f32>,
{
    grid.check_fits(array)?;

    if !factor.is_finite() || factor < 0.0 {
        return Err(GeogridError::InvalidParameter {
            param: "smoothing_factor".to_string(),
            message: format!("Smoothing factor must be a non-negative number, got {}", factor),
        });
    }

    if !(2.0 * factor * factor).is_normal() {
        return Ok(array.to_owned());
    }

    let start = Instant::now();
    let (num_y, num_x) = array.dim();
    let wrap_x = grid.is_global();
    // Beyond the grid extent every cell is already in reach
    let radius = (TRUNCATE * factor)
        .ceil()
        .min(num_y.max(num_x) as f64) as usize;
    let weights = gaussian_weights(factor, radius);

    // The kernel is separable, so the masked sum and the sum of weights of
    // valid cells can each be computed one axis at a time
    let valid = array.mapv(|v| if is_missing(v) { 0.0 } else { 1.0 });
    let values = array.mapv(|v| if is_missing(v) { 0.0 } else { v as f64 });

    let x_offsets = axis_offsets(radius, num_x, wrap_x);
    let y_offsets = axis_offsets(radius, num_y, false);
    let smooth_2d = |data: &Array2<f64>| {
        let rows = convolve_axis(data, &weights, x_offsets, true, wrap_x);
        convolve_axis(&rows, &weights, y_offsets, false, false)
    };
    let numerator = smooth_2d(&values);
    let denominator = smooth_2d(&valid);

    let mut output = Array2::from_elem((num_y, num_x), f32::NAN);
    for ((i, j), &value) in array.indexed_iter() {
        if is_missing(value) {
            continue;
        }
        // The centre weight is 1, so a valid cell has a positive denominator
        output[[i, j]] = (numerator[[i, j]] / denominator[[i, j]]) as f32;
    }

    debug!(
        operation = "smooth",
        factor = factor,
        radius = radius,
        shape = ?(num_y, num_x),
        duration_ms = start.elapsed().as_secs_f64() * 1000.0,
        "Smoothed field"
    );

    Ok(output)
}
