//! Fields: a data array on a grid plus the options used to plot it.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::colormaps::get_colormap;
use crate::error::{GeogridError, Result};
use crate::grids::Grid;
use crate::mask::is_missing;
use crate::render::contour::ContourColors;
use crate::render::levels::{generate_levels, validate_levels};
use crate::smoothing::smooth;

/// Default number of automatically generated levels
pub const DEFAULT_LEVEL_COUNT: usize = 10;

/// How fill levels are chosen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Levels {
    /// Roughly `count` round-numbered levels spanning the data
    Auto { count: usize },
    /// Fixed, strictly increasing level boundaries
    Explicit(Vec<f32>),
}

impl Default for Levels {
    fn default() -> Self {
        Levels::Auto {
            count: DEFAULT_LEVEL_COUNT,
        }
    }
}

/// A field array paired with its grid and plot options
#[derive(Debug, Clone)]
pub struct Field {
    data: Array2<f32>,
    grid: Grid,
    levels: Levels,
    colormap: String,
    contour_colors: ContourColors,
    smoothing_factor: f64,
    fill_alpha: f32,
}

impl Field {
    /// Pair `data` with `grid`; fails when the shape does not fit
    pub fn new(data: Array2<f32>, grid: Grid) -> Result<Self> {
        grid.check_fits(&data)?;
        Ok(Self {
            data,
            grid,
            levels: Levels::default(),
            colormap: "viridis".to_string(),
            contour_colors: ContourColors::None,
            smoothing_factor: 0.0,
            fill_alpha: 1.0,
        })
    }

    pub fn with_levels(mut self, levels: Levels) -> Result<Self> {
        match &levels {
            Levels::Auto { count } if *count < 2 => {
                return Err(GeogridError::invalid_parameter(
                    "levels",
                    "Automatic levels need a count of at least 2",
                ));
            }
            Levels::Explicit(values) if !validate_levels(values) => {
                return Err(GeogridError::invalid_parameter(
                    "levels",
                    "Levels must be at least 2 finite, strictly increasing values",
                ));
            }
            _ => {}
        }
        self.levels = levels;
        Ok(self)
    }

    pub fn with_colormap(mut self, name: &str) -> Result<Self> {
        get_colormap(name)?;
        self.colormap = name.to_lowercase();
        Ok(self)
    }

    /// Draw contour lines at the field's levels
    pub fn with_contour_colors(mut self, contour_colors: ContourColors) -> Self {
        self.contour_colors = contour_colors;
        self
    }

    pub fn with_smoothing(mut self, factor: f64) -> Result<Self> {
        if !factor.is_finite() || factor < 0.0 {
            return Err(GeogridError::invalid_parameter(
                "smoothing_factor",
                format!("Smoothing factor must be a non-negative number, got {}", factor),
            ));
        }
        self.smoothing_factor = factor;
        Ok(self)
    }

    pub fn with_fill_alpha(mut self, alpha: f32) -> Result<Self> {
        if !(0.0..=1.0).contains(&alpha) {
            return Err(GeogridError::invalid_parameter(
                "fill_alpha",
                format!("Fill alpha must be within [0, 1], got {}", alpha),
            ));
        }
        self.fill_alpha = alpha;
        Ok(self)
    }

    pub fn data(&self) -> &Array2<f32> {
        &self.data
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn levels(&self) -> &Levels {
        &self.levels
    }

    pub fn colormap(&self) -> &str {
        &self.colormap
    }

    pub fn contour_colors(&self) -> ContourColors {
        self.contour_colors
    }

    pub fn smoothing_factor(&self) -> f64 {
        self.smoothing_factor
    }

    pub fn fill_alpha(&self) -> f32 {
        self.fill_alpha
    }

    /// Data as it should be drawn, after smoothing
    pub fn display_data(&self) -> Result<Array2<f32>> {
        smooth(&self.data, &self.grid, self.smoothing_factor)
    }

    /// Minimum and maximum of the valid values, `None` when all are missing
    pub fn value_range(data: &Array2<f32>) -> Option<(f32, f32)> {
        data.iter()
            .filter(|v| !is_missing(**v))
            .fold(None, |acc, &v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    /// Concrete level boundaries for the given display data
    pub fn resolve_levels(&self, data: &Array2<f32>) -> Vec<f32> {
        match &self.levels {
            Levels::Explicit(values) => values.clone(),
            Levels::Auto { count } => match Self::value_range(data) {
                Some((min, max)) => generate_levels(min, max, *count),
                None => vec![0.0],
            },
        }
    }
}
