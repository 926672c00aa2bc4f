//! Map domains: the lat/lon box a map shows.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{GeogridError, Result};

/// Geographic extent of a rendered map
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MapDomain {
    /// United States including Alaska
    US,
    /// North America
    NA,
    /// Contiguous United States
    CONUS,
    /// Whole globe, 0 to 360 east
    Global,
    /// Custom box as (lat1, lat2) and (lon1, lon2)
    Custom {
        lat_range: (f64, f64),
        lon_range: (f64, f64),
    },
}

impl MapDomain {
    /// Latitude range (south, north)
    pub fn lat_range(&self) -> (f64, f64) {
        match self {
            MapDomain::US => (25.0, 72.0),
            MapDomain::NA => (14.0, 72.0),
            MapDomain::CONUS => (24.0, 50.0),
            MapDomain::Global => (-90.0, 90.0),
            MapDomain::Custom { lat_range, .. } => *lat_range,
        }
    }

    /// Longitude range (west, east), degrees east
    pub fn lon_range(&self) -> (f64, f64) {
        match self {
            MapDomain::US | MapDomain::NA => (190.0, 300.0),
            MapDomain::CONUS => (230.0, 295.0),
            MapDomain::Global => (0.0, 360.0),
            MapDomain::Custom { lon_range, .. } => *lon_range,
        }
    }

    /// Build a custom domain, checking the box is well formed
    pub fn custom(lat_range: (f64, f64), lon_range: (f64, f64)) -> Result<Self> {
        let (lat1, lat2) = lat_range;
        let (lon1, lon2) = lon_range;

        if [lat1, lat2, lon1, lon2].iter().any(|v| !v.is_finite()) {
            return Err(GeogridError::invalid_parameter(
                "domain",
                "Domain bounds must be finite numbers",
            ));
        }
        if !(-90.0..=90.0).contains(&lat1) || !(-90.0..=90.0).contains(&lat2) {
            return Err(GeogridError::invalid_parameter(
                "domain",
                "Latitude must be in the range -90 to 90",
            ));
        }
        if lat2 <= lat1 {
            return Err(GeogridError::invalid_parameter(
                "domain",
                format!("lat1 ({}) must be < lat2 ({})", lat1, lat2),
            ));
        }
        if lon2 <= lon1 || lon2 - lon1 > 360.0 {
            return Err(GeogridError::invalid_parameter(
                "domain",
                format!("lon1 ({}) must be < lon2 ({}) within 360 degrees", lon1, lon2),
            ));
        }

        Ok(MapDomain::Custom {
            lat_range,
            lon_range,
        })
    }

    /// Names of the predefined domains
    pub fn supported_domains() -> Vec<&'static str> {
        vec!["US", "NA", "CONUS", "global"]
    }
}

impl FromStr for MapDomain {
    type Err = GeogridError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "US" => return Ok(MapDomain::US),
            "NA" => return Ok(MapDomain::NA),
            "CONUS" => return Ok(MapDomain::CONUS),
            "global" => return Ok(MapDomain::Global),
            _ => {}
        }

        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(GeogridError::invalid_parameter(
                "domain",
                format!(
                    "Domain must be one of {:?}, or a custom box 'lat1,lat2,lon1,lon2'",
                    MapDomain::supported_domains()
                ),
            ));
        }

        let mut bounds = [0.0f64; 4];
        for (bound, part) in bounds.iter_mut().zip(&parts) {
            *bound = part.parse::<f64>().map_err(|_| {
                GeogridError::invalid_parameter("domain", format!("Invalid number: {}", part))
            })?;
        }

        MapDomain::custom((bounds[0], bounds[1]), (bounds[2], bounds[3]))
    }
}

impl fmt::Display for MapDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapDomain::US => write!(f, "US"),
            MapDomain::NA => write!(f, "NA"),
            MapDomain::CONUS => write!(f, "CONUS"),
            MapDomain::Global => write!(f, "global"),
            MapDomain::Custom {
                lat_range,
                lon_range,
            } => write!(
                f,
                "{},{},{},{}",
                lat_range.0, lat_range.1, lon_range.0, lon_range.1
            ),
        }
    }
}
