//! Nearest neighbor interpolation.
//!
//! This method selects the value of the nearest grid point. Ties round half
//! up, matching the grid index lookup.

use ndarray::ArrayView2;

use super::Interpolator;
use crate::error::Result;
use crate::interpolation::common;

/// Nearest neighbor interpolator
pub struct NearestInterpolator;

impl Interpolator for NearestInterpolator {
    fn interpolate(&self, data: ArrayView2<f32>, row: f64, col: f64, wrap_x: bool) -> Result<f32> {
        let (num_y, num_x) = data.dim();
        common::check_indices(row, col, (num_y, num_x), wrap_x)?;

        let nearest_row = common::clamp_index(common::round_half_up(row), num_y) as usize;
        let mut nearest_col = common::round_half_up(col);
        if wrap_x && nearest_col >= num_x as f64 {
            nearest_col = 0.0;
        }
        let nearest_col = common::clamp_index(nearest_col, num_x) as usize;

        Ok(data[[nearest_row, nearest_col]])
    }

    fn name(&self) -> &str {
        "nearest"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_nearest_interpolation_2d() {
        let data = array![
            [1.0, 2.0, 3.0], // row 0
            [4.0, 5.0, 6.0], // row 1
            [7.0, 8.0, 9.0], // row 2
        ];
        let interpolator = NearestInterpolator;
        let at = |row, col| interpolator.interpolate(data.view(), row, col, false).unwrap();

        // Corners
        assert_eq!(at(0.0, 0.0), 1.0);
        assert_eq!(at(0.0, 2.0), 3.0);
        assert_eq!(at(2.0, 0.0), 7.0);
        assert_eq!(at(2.0, 2.0), 9.0);

        // Fractional indices
        assert_eq!(at(0.7, 1.3), 5.0);
        assert_eq!(at(1.2, 1.7), 6.0);

        // Ties round up
        assert_eq!(at(0.5, 0.5), 5.0);
    }

    #[test]
    fn test_nearest_wraps_columns() {
        let data = array![[1.0, 2.0, 3.0, 4.0]];
        let interpolator = NearestInterpolator;
        assert_eq!(interpolator.interpolate(data.view(), 0.0, 3.6, true).unwrap(), 1.0);
        assert_eq!(interpolator.interpolate(data.view(), 0.0, 3.4, true).unwrap(), 4.0);
    }

    #[test]
    fn test_nearest_interpolation_error_cases() {
        let data = array![[1.0, 2.0], [3.0, 4.0]];
        let interpolator = NearestInterpolator;

        assert!(interpolator.interpolate(data.view(), 2.0, 0.0, false).is_err());
        assert!(interpolator.interpolate(data.view(), 0.0, -1.0, false).is_err());
        assert!(interpolator.interpolate(data.view(), 0.0, 1.5, false).is_err());
    }
}
