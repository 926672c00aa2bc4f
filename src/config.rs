//! Configuration management for geogrids.
//!
//! This module handles the layered configuration system with the following precedence:
//! 1. Command-line arguments (highest priority)
//! 2. Environment variables
//! 3. JSON config file
//! 4. Default values (lowest priority)

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::colormaps::get_colormap;
use crate::error::{GeogridError, Result};
use crate::grids::{list_builtin_grids, Grid, GridSpec};
use crate::render::{ColorbarEnds, ContourColors, MapDomain, MapFrame, MapProjection};

/// Command-line arguments for geogrids
#[derive(Parser, Debug)]
#[command(name = "geogrids")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to JSON configuration file
    #[arg(short, long, env = "GEOGRIDS_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "GEOGRIDS_LOG_LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Numeric value marking missing data in binary files
    #[arg(long, env = "GEOGRIDS_MISSING", global = true, allow_negative_numbers = true)]
    pub missing: Option<f32>,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// List available grid names
    List,

    /// Print a grid definition as JSON
    Info {
        /// Grid name
        grid: String,
    },

    /// Print the flattened index of the grid point nearest to a coordinate
    Index {
        /// Grid name
        grid: String,
        /// Latitude in degrees
        #[arg(allow_negative_numbers = true)]
        lat: f64,
        /// Longitude in degrees
        #[arg(allow_negative_numbers = true)]
        lon: f64,
    },

    /// Interpolate a field from one grid onto another
    Regrid {
        input: PathBuf,
        output: PathBuf,
        /// Source grid name
        #[arg(long)]
        from: String,
        /// Target grid name
        #[arg(long)]
        to: String,
        /// Interpolation method (nearest, bilinear)
        #[arg(long, env = "GEOGRIDS_INTERPOLATION")]
        method: Option<String>,
    },

    /// Smooth a field with a Gaussian kernel
    Smooth {
        input: PathBuf,
        output: PathBuf,
        #[arg(long)]
        grid: String,
        /// Smoothing factor (Gaussian sigma in grid cells)
        #[arg(long)]
        factor: Option<f64>,
    },

    /// Fill missing cells along mask borders
    Fill {
        input: PathBuf,
        output: PathBuf,
        #[arg(long)]
        grid: String,
        /// Number of border layers to fill
        #[arg(long)]
        layers: Option<usize>,
    },

    /// Render a field as a map image
    Plot {
        input: PathBuf,
        output: PathBuf,
        #[arg(long)]
        grid: String,
        /// US, NA, CONUS, global, or lat1,lat2,lon1,lon2
        #[arg(long, allow_hyphen_values = true)]
        domain: Option<String>,
        #[arg(long)]
        colormap: Option<String>,
        /// Approximate number of fill levels
        #[arg(long)]
        levels: Option<usize>,
        /// Smoothing factor applied before drawing
        #[arg(long)]
        smoothing: Option<f64>,
        #[arg(long)]
        width: Option<u32>,
        #[arg(long)]
        height: Option<u32>,
        /// plate-carree, mercator, equal-area or lcc
        #[arg(long)]
        projection: Option<String>,
        /// Contour line color: none, colormap, a color name or #rrggbb[aa]
        #[arg(long)]
        contours: Option<String>,
        /// Colorbar end shape: square or triangular
        #[arg(long)]
        colorbar_ends: Option<String>,
        /// Do not draw the colorbar
        #[arg(long)]
        no_colorbar: bool,
    },
}

/// Data processing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingConfig {
    /// Interpolation method used for regridding
    #[serde(default = "default_interpolation")]
    pub interpolation_method: String,

    /// Default smoothing factor
    #[serde(default)]
    pub smoothing_factor: f64,

    /// Default number of mask border layers to fill
    #[serde(default = "default_fill_layers")]
    pub fill_layers: usize,

    /// Missing-value sentinel in binary files
    #[serde(default)]
    pub missing_value: Option<f32>,
}

/// Map rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    #[serde(default = "default_width")]
    pub width: u32,

    #[serde(default = "default_height")]
    pub height: u32,

    #[serde(default = "default_colormap")]
    pub colormap: String,

    /// Map domain (US, NA, CONUS, global, or a custom box)
    #[serde(default = "default_domain")]
    pub domain: String,

    /// Approximate number of automatic fill levels
    #[serde(default = "default_levels")]
    pub levels: usize,

    #[serde(default = "default_colorbar")]
    pub colorbar: bool,

    #[serde(default = "default_colorbar_ends")]
    pub colorbar_ends: String,

    #[serde(default = "default_projection")]
    pub projection: String,

    /// Contour line color, or "none"
    #[serde(default = "default_contours")]
    pub contours: String,
}

/// A user-defined grid available by name
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedGridSpec {
    pub name: String,
    #[serde(flatten)]
    pub spec: GridSpec,
}

/// Complete configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Processing configuration
    #[serde(default)]
    pub processing: ProcessingConfig,

    /// Render configuration
    #[serde(default)]
    pub render: RenderConfig,

    /// Custom named grids
    #[serde(default)]
    pub grids: Vec<NamedGridSpec>,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Config {
    /// Load configuration from all sources with proper precedence
    pub fn load() -> Result<(Self, Command)> {
        let args = Args::parse();
        Self::from_args(args)
    }

    /// Build the configuration from parsed arguments
    pub fn from_args(args: Args) -> Result<(Self, Command)> {
        // Start with defaults
        let mut config = Config::default();

        // Load from JSON file if provided
        if let Some(config_path) = &args.config {
            let json_config = Self::load_from_file(config_path)?;
            config.merge(json_config);
        }

        // Override with command-line arguments
        config.apply_args(&args);

        Ok((config, args.command))
    }

    /// Load configuration from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        self.processing = other.processing;
        self.render = other.render;
        self.grids.extend(other.grids);
        self.log_level = other.log_level;
    }

    /// Apply command-line overrides
    fn apply_args(&mut self, args: &Args) {
        if let Some(level) = &args.log_level {
            self.log_level = level.clone();
        }
        if args.missing.is_some() {
            self.processing.missing_value = args.missing;
        }

        match &args.command {
            Command::Regrid {
                method: Some(method),
                ..
            } => {
                self.processing.interpolation_method = method.clone();
            }
            Command::Smooth {
                factor: Some(factor),
                ..
            } => {
                self.processing.smoothing_factor = *factor;
            }
            Command::Fill {
                layers: Some(layers),
                ..
            } => {
                self.processing.fill_layers = *layers;
            }
            Command::Plot {
                domain,
                colormap,
                levels,
                smoothing,
                width,
                height,
                projection,
                contours,
                colorbar_ends,
                no_colorbar,
                ..
            } => {
                if let Some(domain) = domain {
                    self.render.domain = domain.clone();
                }
                if let Some(colormap) = colormap {
                    self.render.colormap = colormap.clone();
                }
                if let Some(levels) = levels {
                    self.render.levels = *levels;
                }
                if let Some(smoothing) = smoothing {
                    self.processing.smoothing_factor = *smoothing;
                }
                if let Some(width) = width {
                    self.render.width = *width;
                }
                if let Some(height) = height {
                    self.render.height = *height;
                }
                if let Some(projection) = projection {
                    self.render.projection = projection.clone();
                }
                if let Some(contours) = contours {
                    self.render.contours = contours.clone();
                }
                if let Some(colorbar_ends) = colorbar_ends {
                    self.render.colorbar_ends = colorbar_ends.clone();
                }
                if *no_colorbar {
                    self.render.colorbar = false;
                }
            }
            _ => {}
        }
    }

    /// Resolve a grid name, checking config-defined grids before built-ins
    pub fn resolve_grid(&self, name: &str) -> Result<Grid> {
        match self.grids.iter().find(|g| g.name == name) {
            Some(named) => Ok(Grid::new(named.spec)?.with_name(&named.name)),
            None => Grid::from_name(name),
        }
    }

    /// Names of all grids available to this configuration
    pub fn grid_names(&self) -> Vec<String> {
        let mut names: Vec<String> = list_builtin_grids().iter().map(|s| s.to_string()).collect();
        for named in &self.grids {
            if !names.contains(&named.name) {
                names.push(named.name.clone());
            }
        }
        names
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        // Validate log level
        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(GeogridError::config(format!(
                    "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                    self.log_level
                )));
            }
        }

        // Validate interpolation method
        match self.processing.interpolation_method.as_str() {
            "nearest" | "bilinear" => {}
            _ => {
                return Err(GeogridError::config(format!(
                    "Invalid interpolation method: {}. Must be one of: nearest, bilinear",
                    self.processing.interpolation_method
                )));
            }
        }

        if !self.processing.smoothing_factor.is_finite() || self.processing.smoothing_factor < 0.0
        {
            return Err(GeogridError::config(format!(
                "Smoothing factor must be non-negative, got {}",
                self.processing.smoothing_factor
            )));
        }

        if self.render.width < 2 || self.render.height < 2 {
            return Err(GeogridError::config(format!(
                "Image size must be at least 2x2, got {}x{}",
                self.render.width, self.render.height
            )));
        }

        if self.render.levels < 2 {
            return Err(GeogridError::config("Number of levels must be at least 2"));
        }

        get_colormap(&self.render.colormap).map_err(|e| GeogridError::config(e.to_string()))?;
        let domain = MapDomain::from_str(&self.render.domain)
            .map_err(|e| GeogridError::config(e.to_string()))?;
        let projection = MapProjection::from_str(&self.render.projection)
            .map_err(|e| GeogridError::config(e.to_string()))?;
        MapFrame::new(projection, domain).map_err(|e| GeogridError::config(e.to_string()))?;
        ContourColors::from_str(&self.render.contours)
            .map_err(|e| GeogridError::config(e.to_string()))?;
        ColorbarEnds::from_str(&self.render.colorbar_ends)
            .map_err(|e| GeogridError::config(e.to_string()))?;

        for named in &self.grids {
            if named.name.is_empty() {
                return Err(GeogridError::config("Custom grid names cannot be empty"));
            }
            Grid::new(named.spec).map_err(|e| {
                GeogridError::config(format!("Custom grid {}: {}", named.name, e))
            })?;
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            processing: ProcessingConfig::default(),
            render: RenderConfig::default(),
            grids: Vec::new(),
            log_level: default_log_level(),
        }
    }
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            interpolation_method: default_interpolation(),
            smoothing_factor: 0.0,
            fill_layers: default_fill_layers(),
            missing_value: None,
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            colormap: default_colormap(),
            domain: default_domain(),
            levels: default_levels(),
            colorbar: default_colorbar(),
            colorbar_ends: default_colorbar_ends(),
            projection: default_projection(),
            contours: default_contours(),
        }
    }
}

// Default value functions for serde
fn default_interpolation() -> String {
    "bilinear".to_string()
}

fn default_fill_layers() -> usize {
    1
}

fn default_width() -> u32 {
    crate::render::map::DEFAULT_WIDTH
}

fn default_height() -> u32 {
    crate::render::map::DEFAULT_HEIGHT
}

fn default_colormap() -> String {
    "viridis".to_string()
}

fn default_domain() -> String {
    "global".to_string()
}

fn default_levels() -> usize {
    crate::field::DEFAULT_LEVEL_COUNT
}

fn default_colorbar() -> bool {
    true
}

fn default_colorbar_ends() -> String {
    "triangular".to_string()
}

fn default_projection() -> String {
    "plate-carree".to_string()
}

fn default_contours() -> String {
    "none".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}
