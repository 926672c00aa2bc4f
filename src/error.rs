//! Error types for geogrids.
//!
//! A single error enum covers grid construction, shape validation, the
//! numerical helpers and image generation.

use thiserror::Error;

/// The main error type for geogrids operations.
#[derive(Error, Debug)]
pub enum GeogridError {
    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors (unknown grid names, inconsistent grid specs, bad config values)
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Array shape does not match the grid it is paired with
    #[error("Shape mismatch: grid expects {expected:?} but array has shape {actual:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },

    /// Flat data length does not match the number of grid points
    #[error("Length mismatch: grid has {expected} points but data has {actual} values")]
    LengthMismatch { expected: usize, actual: usize },

    /// Invalid coordinate errors
    #[error("Invalid coordinates: {message}")]
    InvalidCoordinates { message: String },

    /// Invalid parameter errors
    #[error("Invalid parameter: {param} - {message}")]
    InvalidParameter { param: String, message: String },

    /// Interpolation errors
    #[error("Interpolation error: {message}")]
    Interpolation { message: String },

    /// Image generation errors
    #[error("Image generation error: {message}")]
    ImageGeneration { message: String },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GeogridError {
    /// Shorthand for a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        GeogridError::Config {
            message: message.into(),
        }
    }

    /// Shorthand for an invalid parameter error
    pub fn invalid_parameter(param: impl Into<String>, message: impl Into<String>) -> Self {
        GeogridError::InvalidParameter {
            param: param.into(),
            message: message.into(),
        }
    }
}

/// Convenience type alias for Results with GeogridError
pub type Result<T> = std::result::Result<T, GeogridError>;
