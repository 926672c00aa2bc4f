//! Map projections.
//!
//! Cylindrical projections show the domain's lat/lon box. The conic and
//! azimuthal projections show a fixed-size window, in km, centred on a
//! preset point of the named regional domains.

use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};
use std::fmt;
use std::str::FromStr;

use super::domain::MapDomain;
use crate::error::{GeogridError, Result};

/// Sphere radius used for the conic and azimuthal projections, in km
pub const SPHERE_RADIUS_KM: f64 = 6370.997;

/// How a map lays the globe onto the image plane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MapProjection {
    /// Longitude and latitude both linear
    #[default]
    PlateCarree,
    /// Miller cylindrical, a Mercator variant that stays finite at the poles
    Mercator,
    /// Lambert azimuthal equal-area
    EqualArea,
    /// Lambert conformal conic, tangent at the window's centre latitude
    Lcc,
}

impl MapProjection {
    pub fn supported_projections() -> Vec<&'static str> {
        vec!["plate-carree", "mercator", "equal-area", "lcc"]
    }

    pub fn is_cylindrical(&self) -> bool {
        matches!(self, MapProjection::PlateCarree | MapProjection::Mercator)
    }
}

impl FromStr for MapProjection {
    type Err = GeogridError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "plate-carree" | "latlon" => Ok(MapProjection::PlateCarree),
            "mercator" | "miller" => Ok(MapProjection::Mercator),
            "equal-area" | "laea" => Ok(MapProjection::EqualArea),
            "lcc" => Ok(MapProjection::Lcc),
            _ => Err(GeogridError::invalid_parameter(
                "projection",
                format!(
                    "Unknown projection: {}. Must be one of: {:?}",
                    s,
                    MapProjection::supported_projections()
                ),
            )),
        }
    }
}

impl fmt::Display for MapProjection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MapProjection::PlateCarree => "plate-carree",
            MapProjection::Mercator => "mercator",
            MapProjection::EqualArea => "equal-area",
            MapProjection::Lcc => "lcc",
        };
        write!(f, "{}", name)
    }
}

/// Window (width km, height km, centre lat, centre lon) for regional domains
fn regional_window(domain: MapDomain) -> Option<(f64, f64, f64, f64)> {
    match domain {
        MapDomain::US => Some((8000.0, 6600.0, 53.0, 260.0)),
        MapDomain::NA => Some((8000.0, 7500.0, 48.0, 260.0)),
        MapDomain::CONUS => Some((5000.0, 3200.0, 39.0, 262.0)),
        _ => None,
    }
}

/// Miller cylindrical y for a latitude in degrees
fn miller_y(lat: f64) -> f64 {
    1.25 * (FRAC_PI_4 + 0.4 * lat.to_radians()).tan().ln()
}

/// Latitude in degrees for a Miller cylindrical y
fn miller_lat(y: f64) -> f64 {
    (2.5 * (0.8 * y).exp().atan() - 0.625 * PI).to_degrees()
}

/// Longitude difference wrapped into [-180, 180)
fn wrap_dlon(dlon: f64) -> f64 {
    (dlon + 180.0).rem_euclid(360.0) - 180.0
}

/// The projected rectangle shown by a map
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapFrame {
    projection: MapProjection,
    x_range: (f64, f64),
    y_range: (f64, f64),
    center: (f64, f64),
}

impl MapFrame {
    /// Frame of `domain` under `projection`.
    ///
    /// Conic and azimuthal projections are available for the US, NA and
    /// CONUS domains only.
    pub fn new(projection: MapProjection, domain: MapDomain) -> Result<Self> {
        let (lat_min, lat_max) = domain.lat_range();
        let (lon_min, lon_max) = domain.lon_range();

        match projection {
            MapProjection::PlateCarree => Ok(Self::plate_carree(domain)),
            MapProjection::Mercator => Ok(Self {
                projection,
                x_range: (lon_min, lon_max),
                y_range: (miller_y(lat_min), miller_y(lat_max)),
                center: ((lat_min + lat_max) / 2.0, (lon_min + lon_max) / 2.0),
            }),
            MapProjection::EqualArea | MapProjection::Lcc => {
                let (width, height, lat0, lon0) = regional_window(domain).ok_or_else(|| {
                    GeogridError::invalid_parameter(
                        "projection",
                        format!(
                            "Projection {} requires domain US, NA or CONUS, got {}",
                            projection, domain
                        ),
                    )
                })?;
                Ok(Self {
                    projection,
                    x_range: (-width / 2.0, width / 2.0),
                    y_range: (-height / 2.0, height / 2.0),
                    center: (lat0, lon0),
                })
            }
        }
    }

    /// Plate carrée frame, defined for every domain
    pub fn plate_carree(domain: MapDomain) -> Self {
        let (lat_min, lat_max) = domain.lat_range();
        let (lon_min, lon_max) = domain.lon_range();
        Self {
            projection: MapProjection::PlateCarree,
            x_range: (lon_min, lon_max),
            y_range: (lat_min, lat_max),
            center: ((lat_min + lat_max) / 2.0, (lon_min + lon_max) / 2.0),
        }
    }

    pub fn projection(&self) -> MapProjection {
        self.projection
    }

    /// Projected x range (west, east)
    pub fn x_range(&self) -> (f64, f64) {
        self.x_range
    }

    /// Projected y range (south, north)
    pub fn y_range(&self) -> (f64, f64) {
        self.y_range
    }

    /// Projected coordinates of a geographic point, `None` where undefined
    pub fn project(&self, lat: f64, lon: f64) -> Option<(f64, f64)> {
        if !lat.is_finite() || !lon.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return None;
        }
        let (lat0, lon0) = self.center;

        match self.projection {
            MapProjection::PlateCarree => Some((lon, lat)),
            MapProjection::Mercator => Some((lon, miller_y(lat))),
            MapProjection::EqualArea => {
                let (phi, phi1) = (lat.to_radians(), lat0.to_radians());
                let dlam = wrap_dlon(lon - lon0).to_radians();
                let denom = 1.0 + phi1.sin() * phi.sin() + phi1.cos() * phi.cos() * dlam.cos();
                if denom <= 1e-12 {
                    return None;
                }
                let k = (2.0 / denom).sqrt();
                Some((
                    SPHERE_RADIUS_KM * k * phi.cos() * dlam.sin(),
                    SPHERE_RADIUS_KM
                        * k
                        * (phi1.cos() * phi.sin() - phi1.sin() * phi.cos() * dlam.cos()),
                ))
            }
            MapProjection::Lcc => {
                let (n, rf, rho0) = lcc_constants(lat0);
                let t = (FRAC_PI_4 + lat.to_radians() / 2.0).tan();
                if t <= 0.0 {
                    return None;
                }
                let rho = rf / t.powf(n);
                let theta = n * wrap_dlon(lon - lon0).to_radians();
                Some((rho * theta.sin(), rho0 - rho * theta.cos()))
            }
        }
    }

    /// Geographic point of projected coordinates, `None` off the globe
    pub fn unproject(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        let (lat0, lon0) = self.center;

        match self.projection {
            MapProjection::PlateCarree => Some((y, x)),
            MapProjection::Mercator => Some((miller_lat(y), x)),
            MapProjection::EqualArea => {
                let rho = x.hypot(y);
                if rho < 1e-9 {
                    return Some((lat0, lon0));
                }
                let s = rho / (2.0 * SPHERE_RADIUS_KM);
                if s > 1.0 {
                    return None;
                }
                let c = 2.0 * s.asin();
                let phi1 = lat0.to_radians();
                let phi = (c.cos() * phi1.sin() + y * c.sin() * phi1.cos() / rho).asin();
                let lam = (x * c.sin()).atan2(rho * phi1.cos() * c.cos() - y * phi1.sin() * c.sin());
                Some((phi.to_degrees(), lon0 + lam.to_degrees()))
            }
            MapProjection::Lcc => {
                let (n, rf, rho0) = lcc_constants(lat0);
                let dy = rho0 - y;
                let rho = x.hypot(dy);
                if rho < 1e-9 {
                    return Some((90.0, lon0));
                }
                let theta = x.atan2(dy);
                let dlam = theta / n;
                if dlam.abs() > PI {
                    return None;
                }
                let phi = 2.0 * (rf / rho).powf(1.0 / n).atan() - FRAC_PI_2;
                Some((phi.to_degrees(), lon0 + dlam.to_degrees()))
            }
        }
    }
}

/// Cone constant, `R·F` and the centre radius for a tangent cone at `lat0`
fn lcc_constants(lat0: f64) -> (f64, f64, f64) {
    let phi0 = lat0.to_radians();
    let n = phi0.sin();
    let t0 = (FRAC_PI_4 + phi0 / 2.0).tan();
    let rf = SPHERE_RADIUS_KM * phi0.cos() * t0.powf(n) / n;
    (n, rf, rf / t0.powf(n))
}
