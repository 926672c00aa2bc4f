//! Regridding of field arrays between grids.

use ndarray::{Array2, ArrayBase, Data, Ix2};
use std::time::Instant;
use tracing::debug;

use super::bilinear::BilinearInterpolator;
use super::Interpolator;
use crate::error::Result;
use crate::grids::Grid;
use crate::mask::{count_missing, MISSING};

/// Resample `array` from the `source` grid onto the `target` grid with
/// bilinear interpolation.
///
/// Target points outside the source domain are set to missing (NaN).
pub fn interpolate<S>(array: &ArrayBase<S, Ix2>, source: &Grid, target: &Grid) -> Result<Array2<f32>>
where
    S: Data<Elem = f32>,
{
    interpolate_with(array, source, target, &BilinearInterpolator)
}

/// Resample `array` from `source` onto `target` with the given interpolator
pub fn interpolate_with<S>(
    array: &ArrayBase<S, Ix2>,
    source: &Grid,
    target: &Grid,
    interpolator: &dyn Interpolator,
) -> Result<Array2<f32>>
where
    S: Data<Elem = f32>,
{
    source.check_fits(array)?;

    if source == target {
        return Ok(array.to_owned());
    }

    let start = Instant::now();
    let data = array.view();
    let wrap_x = source.is_global();
    let mut output = Array2::from_elem(target.shape(), MISSING);

    for (i, &lat) in target.lats().iter().enumerate() {
        for (j, &lon) in target.lons().iter().enumerate() {
            if let Some((row, col)) = source.fractional_index(lat, lon) {
                output[[i, j]] = interpolator.interpolate(data, row, col, wrap_x)?;
            }
        }
    }

    debug!(
        operation = "interpolate",
        method = interpolator.name(),
        source_shape = ?source.shape(),
        target_shape = ?target.shape(),
        missing = count_missing(&output),
        duration_ms = start.elapsed().as_secs_f64() * 1000.0,
        "Regridded field"
    );

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GeogridError;
    use crate::grids::GridSpec;
    use crate::interpolation::nearest::NearestInterpolator;
    use ndarray::Array2;

    #[test]
    fn test_same_grid_is_identity() {
        let grid = Grid::from_name("2.5deg-global").unwrap();
        let mut data = Array2::from_shape_fn(grid.shape(), |(i, j)| (i * 7 + j) as f32);
        data[[3, 3]] = f32::NAN;
        let result = interpolate(&data, &grid, &grid).unwrap();
        assert_eq!(result.dim(), data.dim());
        assert!(result[[3, 3]].is_nan());
        assert_eq!(result[[10, 20]], data[[10, 20]]);
    }

    #[test]
    fn test_one_to_two_degree_ones() {
        let g1 = Grid::from_name("1deg-global").unwrap();
        let g2 = Grid::from_name("2deg-global").unwrap();
        let ones = Array2::<f32>::ones(g1.shape());
        let result = interpolate(&ones, &g1, &g2).unwrap();
        assert_eq!(result.dim(), (91, 180));
        assert!(result.iter().all(|&v| v == 1.0));
    }

    #[test]
    fn test_linear_field_is_reproduced() {
        // A field linear in lat and lon is reproduced exactly away from the wrap seam
        let source = Grid::new(GridSpec::latlon((0.0, 0.0), (10.0, 10.0), 2.0)).unwrap();
        let target = Grid::new(GridSpec::latlon((1.0, 1.0), (9.0, 9.0), 1.0)).unwrap();
        let data = Array2::from_shape_fn(source.shape(), |(i, j)| {
            (source.lats()[i] * 2.0 + source.lons()[j]) as f32
        });
        let result = interpolate(&data, &source, &target).unwrap();
        for (i, &lat) in target.lats().iter().enumerate() {
            for (j, &lon) in target.lons().iter().enumerate() {
                let expected = (lat * 2.0 + lon) as f32;
                assert!((result[[i, j]] - expected).abs() < 1e-4);
            }
        }
    }

    #[test]
    fn test_out_of_domain_is_missing() {
        let source = Grid::from_name("1deg-conus").unwrap();
        let target = Grid::from_name("2deg-global").unwrap();
        let data = Array2::<f32>::from_elem(source.shape(), 5.0);
        let result = interpolate(&data, &source, &target).unwrap();

        // Inside CONUS
        let inside = target.index_of(40.0, 260.0).unwrap();
        assert_eq!(result.as_slice().unwrap()[inside], 5.0);
        // Southern hemisphere
        let outside = target.index_of(-40.0, 260.0).unwrap();
        assert!(result.as_slice().unwrap()[outside].is_nan());
    }

    #[test]
    fn test_nearest_regrid() {
        let source = Grid::new(GridSpec::latlon((0.0, 0.0), (2.0, 2.0), 1.0)).unwrap();
        let target = Grid::new(GridSpec::latlon((0.0, 0.0), (2.0, 2.0), 0.5)).unwrap();
        let data = Array2::from_shape_fn(source.shape(), |(i, j)| (i * 3 + j) as f32);
        let result = interpolate_with(&data, &source, &target, &NearestInterpolator).unwrap();
        assert_eq!(result.dim(), (5, 5));
        // (0.5, 0.5) rounds up to (1, 1)
        assert_eq!(result[[1, 1]], 4.0);
        assert_eq!(result[[4, 4]], 8.0);
    }

    #[test]
    fn test_shape_mismatch() {
        let g1 = Grid::from_name("1deg-global").unwrap();
        let g2 = Grid::from_name("2deg-global").unwrap();
        let wrong = Array2::<f32>::zeros(g2.shape());
        assert!(matches!(
            interpolate(&wrong, &g1, &g2),
            Err(GeogridError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_input_is_not_mutated() {
        let g1 = Grid::from_name("2deg-global").unwrap();
        let g2 = Grid::from_name("2.5deg-global").unwrap();
        let data = Array2::from_shape_fn(g1.shape(), |(i, j)| (i + j) as f32);
        let copy = data.clone();
        let first = interpolate(&data, &g1, &g2).unwrap();
        let second = interpolate(&data, &g1, &g2).unwrap();
        assert_eq!(data, copy);
        assert_eq!(first, second);
    }
}
