//! Test data generation utilities.
//!
//! Functions producing fields with known patterns on a grid, and writing
//! them as flat little-endian `float32` files.

use geogrids::Grid;
use ndarray::Array2;
use std::path::Path;

/// A field of constant value
pub fn constant_field(grid: &Grid, value: f32) -> Array2<f32> {
    Array2::from_elem(grid.shape(), value)
}

/// A field equal to `a * lat + b * lon + c` at every grid point
pub fn linear_field(grid: &Grid, a: f32, b: f32, c: f32) -> Array2<f32> {
    let lats = grid.lats();
    let lons = grid.lons();
    Array2::from_shape_fn(grid.shape(), |(i, j)| {
        a * lats[i] as f32 + b * lons[j] as f32 + c
    })
}

/// A smooth wave pattern in latitude and longitude
pub fn wave_field(grid: &Grid) -> Array2<f32> {
    let lats = grid.lats();
    let lons = grid.lons();
    Array2::from_shape_fn(grid.shape(), |(i, j)| {
        let lat = (lats[i] as f32).to_radians();
        let lon = (lons[j] as f32).to_radians();
        10.0 * lat.cos() * (2.0 * lon).sin()
    })
}

/// Copy of `field` with a rectangular block of missing values
pub fn with_missing_block(
    field: &Array2<f32>,
    rows: std::ops::Range<usize>,
    cols: std::ops::Range<usize>,
) -> Array2<f32> {
    let mut masked = field.clone();
    for i in rows {
        for j in cols.clone() {
            masked[[i, j]] = f32::NAN;
        }
    }
    masked
}

/// Write a field as a flat binary file, substituting `sentinel` for NaN
pub fn write_binary_file(path: &Path, field: &Array2<f32>, sentinel: Option<f32>) {
    let bytes: Vec<u8> = field
        .iter()
        .flat_map(|v| {
            let value = match sentinel {
                Some(s) if v.is_nan() => s,
                _ => *v,
            };
            value.to_le_bytes()
        })
        .collect();
    std::fs::write(path, bytes).unwrap();
}

/// Read a flat binary file back into a vector of values
pub fn read_binary_file(path: &Path) -> Vec<f32> {
    std::fs::read(path)
        .unwrap()
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect()
}
