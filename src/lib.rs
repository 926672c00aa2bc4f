//! # geogrids
//!
//! Named and custom geographic grids, regridding, smoothing, mask-border
//! filling and map rendering for gridded fields.
//!
//! ## Key Features
//!
//! - **Grid registry**: built-in lat/lon and equal-area grids by name, or any custom definition
//! - **Regridding**: bilinear interpolation with nearest-neighbor fallback near missing data
//! - **Smoothing**: Gaussian smoothing that preserves and ignores missing cells
//! - **Mask filling**: extend valid data into missing cells along mask borders
//! - **Maps**: level-filled map images with matplotlib-style colormaps
//!
//! ## Conventions
//!
//! Arrays are `ndarray::Array2<f32>` shaped `(num_y, num_x)`, with row 0 at the
//! southern edge. Missing values are NaN.

pub mod colormaps;
pub mod config;
pub mod data_loader;
pub mod error;
pub mod field;
pub mod grids;
pub mod interpolation;
pub mod logging;
pub mod mask;
pub mod render;
pub mod smoothing;

pub use config::Config;
pub use error::{GeogridError, Result};
pub use field::{Field, Levels};
pub use grids::{list_builtin_grids, Grid, GridSpec, GridType};
pub use interpolation::interpolate;
pub use logging::{
    generate_operation_id, init_tracing, log_error, log_field_stats, log_operation_end,
    log_operation_start, log_timed_operation,
};
pub use mask::{fill_mask_borders, MISSING};
pub use render::{ColorbarEnds, ContourColors, Map, MapDomain, MapProjection};
pub use smoothing::smooth;
