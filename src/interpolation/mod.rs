//! Interpolation algorithms for gridded data.
//!
//! This module provides point interpolation methods and regridding of whole
//! field arrays from one grid onto another.

pub mod bilinear;
pub mod common;
pub mod nearest;
pub mod regrid;

use ndarray::ArrayView2;

use crate::error::Result;

pub use regrid::{interpolate, interpolate_with};

/// Trait for interpolation methods
pub trait Interpolator {
    /// Interpolate a value at fractional `(row, col)` indices of `data`.
    ///
    /// With `wrap_x` the last column is followed by column 0.
    fn interpolate(&self, data: ArrayView2<f32>, row: f64, col: f64, wrap_x: bool) -> Result<f32>;

    /// Get the name of this interpolation method
    fn name(&self) -> &str;
}

/// Get an interpolator by name
pub fn get_interpolator(name: &str) -> Result<Box<dyn Interpolator>> {
    match name.to_lowercase().as_str() {
        "nearest" => Ok(Box::new(nearest::NearestInterpolator)),
        "bilinear" => Ok(Box::new(bilinear::BilinearInterpolator)),
        _ => Err(crate::error::GeogridError::InvalidParameter {
            param: "interpolation".to_string(),
            message: format!("Unknown interpolation method: {}", name),
        }),
    }
}
