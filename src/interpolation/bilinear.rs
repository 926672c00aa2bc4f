//! Bilinear interpolation.
//!
//! This method performs linear interpolation in two dimensions using
//! the four nearest grid points. When a contributing neighbor is missing the
//! value of the nearest grid point is used instead.

use ndarray::ArrayView2;

use super::nearest::NearestInterpolator;
use super::Interpolator;
use crate::error::Result;
use crate::interpolation::common;
use crate::mask::is_missing;

/// Bilinear interpolator
pub struct BilinearInterpolator;

impl Interpolator for BilinearInterpolator {
    fn interpolate(&self, data: ArrayView2<f32>, row: f64, col: f64, wrap_x: bool) -> Result<f32> {
        let (num_y, num_x) = data.dim();
        common::check_indices(row, col, (num_y, num_x), wrap_x)?;

        let r0 = row.floor() as usize;
        let c0 = col.floor() as usize;
        let r1 = (r0 + 1).min(num_y - 1);
        let c1 = common::next_col(c0, num_x, wrap_x);

        let (wr0, wr1) = common::linear_weight(row - r0 as f64);
        let (wc0, wc1) = common::linear_weight(col - c0 as f64);

        let corners = [
            (r0, c0, wr0 * wc0),
            (r0, c1, wr0 * wc1),
            (r1, c0, wr1 * wc0),
            (r1, c1, wr1 * wc1),
        ];

        let mut value = 0.0f64;
        for (r, c, weight) in corners {
            if weight == 0.0 {
                continue;
            }
            let v = data[[r, c]];
            if is_missing(v) {
                return NearestInterpolator.interpolate(data, row, col, wrap_x);
            }
            value += weight * v as f64;
        }

        Ok(value as f32)
    }

    fn name(&self) -> &str {
        "bilinear"
    }
}
