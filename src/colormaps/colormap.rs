//! Colormap trait and utilities.
//!
//! This module defines the common interface for all colormaps and the
//! [`Palette`] type every built-in colormap is made of.

use crate::error::{GeogridError, Result};

/// Trait for color mapping implementations
pub trait Colormap: Send + Sync {
    /// Map a normalized value (0.0 to 1.0) to an RGBA color
    fn map_normalized(&self, value: f32) -> [u8; 4];

    /// Map a value to an RGBA color given the data range
    fn map(&self, value: f32, min: f32, max: f32) -> [u8; 4] {
        let normalized = if max > min {
            ((value - min) / (max - min)).clamp(0.0, 1.0)
        } else {
            0.5
        };
        self.map_normalized(normalized)
    }

    /// Get the name of this colormap
    fn name(&self) -> &str;
}

/// A colormap defined by evenly spaced color stops, linearly blended
#[derive(Debug, Clone)]
pub struct Palette {
    name: String,
    stops: Vec<[u8; 3]>,
}

impl Palette {
    pub fn new(name: impl Into<String>, stops: Vec<[u8; 3]>) -> Self {
        Self {
            name: name.into(),
            stops,
        }
    }

    /// The same stops in the opposite direction, named with an `_r` suffix
    pub fn reversed(&self) -> Self {
        let mut stops = self.stops.clone();
        stops.reverse();
        Self {
            name: format!("{}_r", self.name),
            stops,
        }
    }

    pub fn stops(&self) -> &[[u8; 3]] {
        &self.stops
    }
}

impl Colormap for Palette {
    fn map_normalized(&self, value: f32) -> [u8; 4] {
        let last = self.stops.len().saturating_sub(1);
        if last == 0 {
            let [r, g, b] = self.stops.first().copied().unwrap_or([0, 0, 0]);
            return [r, g, b, 255];
        }

        let value = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
        let position = value * last as f32;
        let index = position.floor() as usize;

        if index >= last {
            let [r, g, b] = self.stops[last];
            return [r, g, b, 255];
        }

        let t = position - index as f32;
        let [r, g, b] = lerp_color(self.stops[index], self.stops[index + 1], t);
        [r, g, b, 255]
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Names accepted by [`get_colormap`] (each also available with an `_r` suffix)
pub fn list_colormaps() -> Vec<&'static str> {
    vec![
        "viridis", "plasma", "inferno", "magma", "cividis", "blues", "greens", "reds",
        "coolwarm", "rdbu", "seismic", "brbg",
    ]
}

fn palette_by_name(name: &str) -> Option<Palette> {
    use super::{diverging, sequential};

    let palette = match name {
        "viridis" => sequential::viridis(),
        "plasma" => sequential::plasma(),
        "inferno" => sequential::inferno(),
        "magma" => sequential::magma(),
        "cividis" => sequential::cividis(),
        "blues" => sequential::blues(),
        "greens" => sequential::greens(),
        "reds" => sequential::reds(),
        "coolwarm" => diverging::coolwarm(),
        "rdbu" => diverging::rdbu(),
        "seismic" => diverging::seismic(),
        "brbg" => diverging::brbg(),
        _ => return None,
    };
    Some(palette)
}

/// Get a colormap by name
pub fn get_colormap(name: &str) -> Result<Box<dyn Colormap>> {
    let lower = name.to_lowercase();
    let palette = match lower.strip_suffix("_r") {
        Some(base) => palette_by_name(base).map(|p| p.reversed()),
        None => palette_by_name(&lower),
    };

    palette
        .map(|p| Box::new(p) as Box<dyn Colormap>)
        .ok_or_else(|| GeogridError::InvalidParameter {
            param: "colormap".to_string(),
            message: format!(
                "Unknown colormap: {}. Must be one of: {}",
                name,
                list_colormaps().join(", ")
            ),
        })
}

/// Linear interpolation between two colors
pub fn lerp_color(c1: [u8; 3], c2: [u8; 3], t: f32) -> [u8; 3] {
    [
        (c1[0] as f32 * (1.0 - t) + c2[0] as f32 * t) as u8,
        (c1[1] as f32 * (1.0 - t) + c2[1] as f32 * t) as u8,
        (c1[2] as f32 * (1.0 - t) + c2[2] as f32 * t) as u8,
    ]
}
