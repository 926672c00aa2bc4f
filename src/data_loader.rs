//! Flat binary data loading.
//!
//! Field arrays are commonly stored as headerless little-endian `float32`
//! files in row-major (lat, lon) order. This module reads them into arrays
//! shaped to a grid and writes arrays back, converting numeric missing-value
//! sentinels to and from NaN.

use ndarray::{Array2, ArrayBase, Data, Ix2};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::error::{GeogridError, Result};
use crate::grids::Grid;
use crate::mask::{count_missing, is_missing, MISSING};

/// Size of one stored value in bytes
const VALUE_SIZE: usize = std::mem::size_of::<f32>();

/// Decode little-endian `float32` bytes into an array shaped to `grid`
pub fn decode_binary(bytes: &[u8], grid: &Grid) -> Result<Array2<f32>> {
    if bytes.len() % VALUE_SIZE != 0 {
        return Err(GeogridError::InvalidParameter {
            param: "data".to_string(),
            message: format!(
                "Binary data length {} is not a multiple of {} bytes",
                bytes.len(),
                VALUE_SIZE
            ),
        });
    }

    let values: Vec<f32> = bytes
        .chunks_exact(VALUE_SIZE)
        .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect();

    if !grid.fits_len(values.len()) {
        return Err(GeogridError::LengthMismatch {
            expected: grid.num_points(),
            actual: values.len(),
        });
    }

    Array2::from_shape_vec(grid.shape(), values).map_err(|e| GeogridError::InvalidParameter {
        param: "data".to_string(),
        message: format!("Failed to shape data: {}", e),
    })
}

/// Encode an array as little-endian `float32` bytes in row-major order
pub fn encode_binary<S>(array: &ArrayBase<S, Ix2>) -> Vec<u8>
where
    S: Data<Elem = f32>,
{
    let mut bytes = Vec::with_capacity(array.len() * VALUE_SIZE);
    // iter() walks in logical row-major order regardless of memory layout
    for value in array.iter() {
        bytes.extend_from_slice(&value.to_le_bytes());
    }
    bytes
}

/// Load a binary file shaped to `grid`
pub fn load_binary(path: &Path, grid: &Grid) -> Result<Array2<f32>> {
    if !path.exists() {
        return Err(GeogridError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("File not found: {}", path.display()),
        )));
    }

    let bytes = fs::read(path)?;
    let array = decode_binary(&bytes, grid)?;

    info!(
        operation = "data_load",
        file_path = %path.display(),
        num_y = grid.num_y(),
        num_x = grid.num_x(),
        "Data loaded successfully"
    );

    Ok(array)
}

/// Load a binary file and turn `sentinel` values into missing values
pub fn load_binary_with_missing(path: &Path, grid: &Grid, sentinel: f32) -> Result<Array2<f32>> {
    let array = load_binary(path, grid)?;
    let masked = mask_sentinel(&array, sentinel);
    debug!(
        file_path = %path.display(),
        sentinel = sentinel,
        missing = count_missing(&masked),
        "Masked missing values"
    );
    Ok(masked)
}

/// Write an array as a binary file, replacing missing values with `missing`
/// when given
pub fn save_binary<S>(path: &Path, array: &ArrayBase<S, Ix2>, missing: Option<f32>) -> Result<()>
where
    S: Data<Elem = f32>,
{
    let bytes = match missing {
        Some(sentinel) => encode_binary(&unmask(array, sentinel)),
        None => encode_binary(array),
    };
    fs::write(path, bytes)?;

    info!(
        operation = "data_save",
        file_path = %path.display(),
        shape = ?array.dim(),
        "Data saved successfully"
    );
    Ok(())
}

/// Replace values equal to `sentinel` with NaN
pub fn mask_sentinel<S>(array: &ArrayBase<S, Ix2>, sentinel: f32) -> Array2<f32>
where
    S: Data<Elem = f32>,
{
    array.mapv(|v| if v == sentinel { MISSING } else { v })
}

/// Replace missing values with `sentinel`
pub fn unmask<S>(array: &ArrayBase<S, Ix2>, sentinel: f32) -> Array2<f32>
where
    S: Data<Elem = f32>,
{
    array.mapv(|v| if is_missing(v) { sentinel } else { v })
}
