//! Grid definition.
//!
//! A [`Grid`] is an immutable description of a rectangular lattice of points:
//! corners, resolution and grid type, plus the coordinate sequences derived
//! from them. Rows run south to north and columns west to east, so the
//! flattened index of `(row, col)` is `row * num_x + col`.

use ndarray::{Array2, ArrayBase, Data, Ix2};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::projection::GridType;
use super::registry;
use crate::error::{GeogridError, Result};
use crate::interpolation::common::{round_half_up, snap_to_index};

/// Fraction of a cell tolerated when counting points along an axis
const COUNT_TOLERANCE: f64 = 1e-6;

/// Corners, resolution and type of a grid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    /// Lower-left corner as (lat, lon)
    pub ll_corner: (f64, f64),
    /// Upper-right corner as (lat, lon)
    pub ur_corner: (f64, f64),
    /// Resolution in degrees (lat/lon grids) or km (equal-area grids)
    pub res: f64,
    /// Grid type
    #[serde(default)]
    pub grid_type: GridType,
}

impl GridSpec {
    /// Regular lat/lon grid spec
    pub fn latlon(ll_corner: (f64, f64), ur_corner: (f64, f64), res: f64) -> Self {
        Self {
            ll_corner,
            ur_corner,
            res,
            grid_type: GridType::LatLon,
        }
    }

    /// Equal-area grid spec, resolution in km
    pub fn equal_area(ll_corner: (f64, f64), ur_corner: (f64, f64), res_km: f64) -> Self {
        Self {
            ll_corner,
            ur_corner,
            res: res_km,
            grid_type: GridType::EqualArea,
        }
    }

    /// Check that the corners and resolution describe a usable grid
    pub fn validate(&self) -> Result<()> {
        let (ll_lat, ll_lon) = self.ll_corner;
        let (ur_lat, ur_lon) = self.ur_corner;

        if !self.res.is_finite() || self.res <= 0.0 {
            return Err(GeogridError::config(format!(
                "Grid resolution must be positive, got {}",
                self.res
            )));
        }

        if [ll_lat, ll_lon, ur_lat, ur_lon].iter().any(|v| !v.is_finite()) {
            return Err(GeogridError::config("Grid corners must be finite numbers"));
        }

        if !(-90.0..=90.0).contains(&ll_lat) || !(-90.0..=90.0).contains(&ur_lat) {
            return Err(GeogridError::config(format!(
                "Grid latitudes must be within [-90, 90], got {} and {}",
                ll_lat, ur_lat
            )));
        }

        if ur_lat <= ll_lat || ur_lon <= ll_lon {
            return Err(GeogridError::config(format!(
                "Upper-right corner ({}, {}) must be strictly greater than lower-left corner ({}, {})",
                ur_lat, ur_lon, ll_lat, ll_lon
            )));
        }

        if ur_lon - ll_lon > 360.0 {
            return Err(GeogridError::config(format!(
                "Grid longitude span must not exceed 360 degrees, got {}",
                ur_lon - ll_lon
            )));
        }

        Ok(())
    }
}

/// Compact description of a grid for display and JSON output
#[derive(Debug, Clone, Serialize)]
pub struct GridSummary {
    pub name: Option<String>,
    pub grid_type: GridType,
    pub ll_corner: (f64, f64),
    pub ur_corner: (f64, f64),
    pub res: f64,
    pub res_unit: &'static str,
    pub num_y: usize,
    pub num_x: usize,
    pub is_global: bool,
}

/// An immutable geographic grid
#[derive(Debug, Clone)]
pub struct Grid {
    name: Option<String>,
    spec: GridSpec,
    num_y: usize,
    num_x: usize,
    lats: Vec<f64>,
    lons: Vec<f64>,
    /// Projected y of the first row
    y_origin: f64,
    global: bool,
}

fn count_points(span: f64, res: f64) -> usize {
    ((span / res) + COUNT_TOLERANCE).floor() as usize + 1
}

impl Grid {
    /// Build a custom grid from its spec
    pub fn new(spec: GridSpec) -> Result<Self> {
        spec.validate()?;

        let grid_type = spec.grid_type;
        let (ll_lat, ll_lon) = spec.ll_corner;
        let (ur_lat, ur_lon) = spec.ur_corner;
        let res = spec.res;

        let y_origin = grid_type.y_coord(ll_lat);
        let num_y = count_points(grid_type.y_coord(ur_lat) - y_origin, res);
        let num_x = count_points(grid_type.x_coord(ur_lon - ll_lon), res);

        let lats = (0..num_y)
            .map(|i| grid_type.lat_from_y(y_origin + i as f64 * res))
            .collect();
        let lons = (0..num_x)
            .map(|j| ll_lon + grid_type.dlon_from_x(j as f64 * res))
            .collect();

        let global = (num_x as f64 * res - grid_type.wrap_span()).abs() < 0.5 * res;

        Ok(Self {
            name: None,
            spec,
            num_y,
            num_x,
            lats,
            lons,
            y_origin,
            global,
        })
    }

    /// Look up a built-in grid by name
    pub fn from_name(name: &str) -> Result<Self> {
        let spec = registry::builtin_spec(name).ok_or_else(|| {
            GeogridError::config(format!(
                "Unknown grid name: {}. Must be one of: {}",
                name,
                registry::list_builtin_grids().join(", ")
            ))
        })?;
        Ok(Self::new(spec)?.with_name(name))
    }

    /// Build a grid from either a registry name or a custom spec.
    ///
    /// The name wins when both are given.
    pub fn from_options(name: Option<&str>, spec: Option<GridSpec>) -> Result<Self> {
        match (name, spec) {
            (Some(name), _) => Self::from_name(name),
            (None, Some(spec)) => Self::new(spec),
            (None, None) => Err(GeogridError::config(
                "Either a grid name or a custom grid spec (corners and resolution) is required",
            )),
        }
    }

    /// Attach a display name to the grid
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn spec(&self) -> &GridSpec {
        &self.spec
    }

    pub fn grid_type(&self) -> GridType {
        self.spec.grid_type
    }

    pub fn resolution(&self) -> f64 {
        self.spec.res
    }

    pub fn ll_corner(&self) -> (f64, f64) {
        self.spec.ll_corner
    }

    pub fn ur_corner(&self) -> (f64, f64) {
        self.spec.ur_corner
    }

    /// Number of rows (latitudes)
    pub fn num_y(&self) -> usize {
        self.num_y
    }

    /// Number of columns (longitudes)
    pub fn num_x(&self) -> usize {
        self.num_x
    }

    /// Array shape `(num_y, num_x)`
    pub fn shape(&self) -> (usize, usize) {
        (self.num_y, self.num_x)
    }

    pub fn num_points(&self) -> usize {
        self.num_y * self.num_x
    }

    /// Latitudes of the rows, south to north
    pub fn lats(&self) -> &[f64] {
        &self.lats
    }

    /// Longitudes of the columns, west to east
    pub fn lons(&self) -> &[f64] {
        &self.lons
    }

    /// Whether the columns wrap around the globe
    pub fn is_global(&self) -> bool {
        self.global
    }

    /// Whether the array's shape matches this grid
    pub fn fits<S, A>(&self, array: &ArrayBase<S, Ix2>) -> bool
    where
        S: Data<Elem = A>,
    {
        array.dim() == self.shape()
    }

    /// Whether flat data of length `len` matches this grid
    pub fn fits_len(&self, len: usize) -> bool {
        len == self.num_points()
    }

    /// Like [`Grid::fits`], but returns a `ShapeMismatch` error
    pub fn check_fits<S, A>(&self, array: &ArrayBase<S, Ix2>) -> Result<()>
    where
        S: Data<Elem = A>,
    {
        if self.fits(array) {
            Ok(())
        } else {
            Err(GeogridError::ShapeMismatch {
                expected: self.shape(),
                actual: array.dim(),
            })
        }
    }

    /// Continuous (row, col) position of a coordinate without range checks
    fn raw_fractional_index(&self, lat: f64, lon: f64) -> (f64, f64) {
        let grid_type = self.spec.grid_type;
        let res = self.spec.res;
        let last_col = (self.num_x - 1) as f64;

        let row = snap_to_index((grid_type.y_coord(lat) - self.y_origin) / res);

        let mut dlon = (lon - self.spec.ll_corner.1).rem_euclid(360.0);
        if !self.global {
            // Points just west of the grid should measure as negative offsets
            let last_dlon = grid_type.dlon_from_x(last_col * res);
            if dlon > last_dlon && 360.0 - dlon < dlon - last_dlon {
                dlon -= 360.0;
            }
        }

        let mut col = snap_to_index(grid_type.x_coord(dlon) / res);
        if self.global {
            // Stretch the gap between the last column and the first one onto one cell
            let wrap_len = grid_type.wrap_span() / res;
            if col > last_col {
                col = last_col + (col - last_col) / (wrap_len - last_col);
            }
            if col >= self.num_x as f64 {
                col -= self.num_x as f64;
            }
        }

        (row, col)
    }

    /// Continuous (row, col) position of a coordinate.
    ///
    /// Returns `None` outside the grid. On global grids the column may fall in
    /// `(num_x - 1, num_x)`, the cell that wraps back to column 0.
    pub fn fractional_index(&self, lat: f64, lon: f64) -> Option<(f64, f64)> {
        if !lat.is_finite() || !lon.is_finite() {
            return None;
        }

        let (row, col) = self.raw_fractional_index(lat, lon);
        let last_row = (self.num_y - 1) as f64;
        let col_limit = if self.global {
            self.num_x as f64
        } else {
            (self.num_x - 1) as f64
        };

        if row < 0.0 || row > last_row || col < 0.0 || col > col_limit {
            return None;
        }
        if self.global && col >= col_limit {
            return None;
        }

        Some((row, col))
    }

    /// Flattened index of the grid point nearest to `(lat, lon)`.
    ///
    /// Ties round half up. Longitudes are taken modulo 360 relative to the
    /// grid's western edge.
    pub fn index_of(&self, lat: f64, lon: f64) -> Result<usize> {
        if !lat.is_finite() || !lon.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(GeogridError::InvalidCoordinates {
                message: format!("Invalid coordinate ({}, {})", lat, lon),
            });
        }

        let (row, col) = self.raw_fractional_index(lat, lon);
        let row = round_half_up(row);
        let mut col = round_half_up(col);
        if self.global && col == self.num_x as f64 {
            col = 0.0;
        }

        if row < 0.0 || row >= self.num_y as f64 || col < 0.0 || col >= self.num_x as f64 {
            return Err(GeogridError::InvalidCoordinates {
                message: format!(
                    "Coordinate ({}, {}) is outside the grid ({:?} to {:?})",
                    lat, lon, self.spec.ll_corner, self.spec.ur_corner
                ),
            });
        }

        Ok(row as usize * self.num_x + col as usize)
    }

    /// Coordinate `(lat, lon)` of a flattened index
    pub fn coords_of(&self, index: usize) -> Result<(f64, f64)> {
        if index >= self.num_points() {
            return Err(GeogridError::InvalidCoordinates {
                message: format!(
                    "Index {} is out of range for a grid of {} points",
                    index,
                    self.num_points()
                ),
            });
        }
        Ok((self.lats[index / self.num_x], self.lons[index % self.num_x]))
    }

    /// 2-D latitude and longitude arrays, each of shape `(num_y, num_x)`
    pub fn meshgrid(&self) -> (Array2<f64>, Array2<f64>) {
        let lats = Array2::from_shape_fn(self.shape(), |(i, _)| self.lats[i]);
        let lons = Array2::from_shape_fn(self.shape(), |(_, j)| self.lons[j]);
        (lats, lons)
    }

    pub fn summary(&self) -> GridSummary {
        GridSummary {
            name: self.name.clone(),
            grid_type: self.spec.grid_type,
            ll_corner: self.spec.ll_corner,
            ur_corner: self.spec.ur_corner,
            res: self.spec.res,
            res_unit: self.spec.grid_type.resolution_unit(),
            num_y: self.num_y,
            num_x: self.num_x,
            is_global: self.global,
        }
    }
}

/// Grids are equal when they describe the same points; the name is ignored.
impl PartialEq for Grid {
    fn eq(&self, other: &Self) -> bool {
        self.spec == other.spec
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Grid:")?;
        writeln!(f, "- name: {}", self.name.as_deref().unwrap_or("custom"))?;
        writeln!(f, "- type: {}", self.spec.grid_type)?;
        writeln!(f, "- ll_corner: {:?}", self.spec.ll_corner)?;
        writeln!(f, "- ur_corner: {:?}", self.spec.ur_corner)?;
        writeln!(
            f,
            "- res: {} {}",
            self.spec.res,
            self.spec.grid_type.resolution_unit()
        )?;
        write!(f, "- shape: ({}, {})", self.num_y, self.num_x)
    }
}
