//! Axis transforms for the supported grid types.
//!
//! Regular lat/lon grids step evenly in degrees. Equal-area grids step evenly in
//! kilometres on a Lambert cylindrical equal-area projection, which keeps every
//! row at a single latitude and every column at a single longitude.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::GeogridError;

/// Radius of the authalic sphere in km
pub const EARTH_RADIUS_KM: f64 = 6371.0072;

/// Grid type: the unit of the resolution and how points are spaced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GridType {
    /// Points evenly spaced in degrees
    #[default]
    LatLon,
    /// Points evenly spaced in km on a cylindrical equal-area projection
    EqualArea,
}

impl GridType {
    /// Projected y coordinate of a latitude
    pub fn y_coord(&self, lat: f64) -> f64 {
        match self {
            GridType::LatLon => lat,
            GridType::EqualArea => EARTH_RADIUS_KM * lat.to_radians().sin(),
        }
    }

    /// Latitude of a projected y coordinate
    pub fn lat_from_y(&self, y: f64) -> f64 {
        match self {
            GridType::LatLon => y,
            GridType::EqualArea => (y / EARTH_RADIUS_KM).clamp(-1.0, 1.0).asin().to_degrees(),
        }
    }

    /// Projected x distance of a longitude offset (degrees east of the grid origin)
    pub fn x_coord(&self, dlon: f64) -> f64 {
        match self {
            GridType::LatLon => dlon,
            GridType::EqualArea => EARTH_RADIUS_KM * dlon.to_radians(),
        }
    }

    /// Longitude offset (degrees) of a projected x distance
    pub fn dlon_from_x(&self, x: f64) -> f64 {
        match self {
            GridType::LatLon => x,
            GridType::EqualArea => (x / EARTH_RADIUS_KM).to_degrees(),
        }
    }

    /// Projected length of a full circle of longitude
    pub fn wrap_span(&self) -> f64 {
        self.x_coord(360.0)
    }

    /// Unit of the resolution for this grid type
    pub fn resolution_unit(&self) -> &'static str {
        match self {
            GridType::LatLon => "deg",
            GridType::EqualArea => "km",
        }
    }
}

impl fmt::Display for GridType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridType::LatLon => write!(f, "latlon"),
            GridType::EqualArea => write!(f, "equal-area"),
        }
    }
}

impl FromStr for GridType {
    type Err = GeogridError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "latlon" | "lat-lon" | "regular" => Ok(GridType::LatLon),
            "equal-area" | "equalarea" => Ok(GridType::EqualArea),
            _ => Err(GeogridError::config(format!(
                "Unknown grid type: {}. Must be one of: latlon, equal-area",
                s
            ))),
        }
    }
}
