//! Contour lines with marching squares.
//!
//! Isolines are traced on the per-pixel samples a map draws, so they follow
//! whatever projection the map uses.

use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_line_segment_mut;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::GeogridError;

/// A point in pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A line segment between two points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

/// How contour lines of a field are colored
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContourColors {
    /// No contour lines
    #[default]
    None,
    /// Each line takes the fill color of the bin above its level
    Colormap,
    /// Every line in one color
    Solid([u8; 4]),
}

impl ContourColors {
    pub fn is_drawn(&self) -> bool {
        !matches!(self, ContourColors::None)
    }
}

impl FromStr for ContourColors {
    type Err = GeogridError;

    /// `none`, `colormap`, `black`, `white`, `gray`, `#rrggbb` or `#rrggbbaa`
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        match lower.as_str() {
            "none" => return Ok(ContourColors::None),
            "colormap" | "auto" => return Ok(ContourColors::Colormap),
            "black" => return Ok(ContourColors::Solid([0, 0, 0, 255])),
            "white" => return Ok(ContourColors::Solid([255, 255, 255, 255])),
            "gray" | "grey" => return Ok(ContourColors::Solid([128, 128, 128, 255])),
            _ => {}
        }

        let invalid = || {
            GeogridError::invalid_parameter(
                "contour_colors",
                format!(
                    "Invalid contour color: {}. Use none, colormap, a color name or #rrggbb[aa]",
                    s
                ),
            )
        };

        let hex = lower.strip_prefix('#').ok_or_else(invalid)?;
        if (hex.len() != 6 && hex.len() != 8) || !hex.is_ascii() {
            return Err(invalid());
        }
        let mut color = [0u8, 0, 0, 255];
        for (k, channel) in color.iter_mut().enumerate().take(hex.len() / 2) {
            *channel = u8::from_str_radix(&hex[2 * k..2 * k + 2], 16).map_err(|_| invalid())?;
        }
        Ok(ContourColors::Solid(color))
    }
}

impl fmt::Display for ContourColors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContourColors::None => write!(f, "none"),
            ContourColors::Colormap => write!(f, "colormap"),
            ContourColors::Solid([r, g, b, a]) => {
                write!(f, "#{:02x}{:02x}{:02x}{:02x}", r, g, b, a)
            }
        }
    }
}

/// Where `level` crosses the edge from `p1` (value `v1`) to `p2` (value `v2`)
fn interpolate_edge(p1: Point, p2: Point, v1: f32, v2: f32, level: f32) -> Point {
    if (v2 - v1).abs() < 1e-6 {
        return Point::new((p1.x + p2.x) / 2.0, (p1.y + p2.y) / 2.0);
    }
    let t = ((level - v1) / (v2 - v1)).clamp(0.0, 1.0);
    Point::new(p1.x + t * (p2.x - p1.x), p1.y + t * (p2.y - p1.y))
}

/// Segments of the `level` isoline through `data`, in (column, row)
/// coordinates. Cells with a missing corner are skipped.
pub fn march_squares(data: &Array2<f32>, level: f32) -> Vec<Segment> {
    let (height, width) = data.dim();
    if width < 2 || height < 2 || !level.is_finite() {
        return Vec::new();
    }

    let mut segments = Vec::new();
    for y in 0..height - 1 {
        for x in 0..width - 1 {
            let tl = data[[y, x]];
            let tr = data[[y, x + 1]];
            let bl = data[[y + 1, x]];
            let br = data[[y + 1, x + 1]];
            if [tl, tr, bl, br].iter().any(|v| !v.is_finite()) {
                continue;
            }

            let mut case = 0u8;
            if tl >= level {
                case |= 1;
            }
            if tr >= level {
                case |= 2;
            }
            if br >= level {
                case |= 4;
            }
            if bl >= level {
                case |= 8;
            }
            if case == 0 || case == 15 {
                continue;
            }

            let (fx, fy) = (x as f32, y as f32);
            let top = interpolate_edge(Point::new(fx, fy), Point::new(fx + 1.0, fy), tl, tr, level);
            let right = interpolate_edge(
                Point::new(fx + 1.0, fy),
                Point::new(fx + 1.0, fy + 1.0),
                tr,
                br,
                level,
            );
            let bottom = interpolate_edge(
                Point::new(fx, fy + 1.0),
                Point::new(fx + 1.0, fy + 1.0),
                bl,
                br,
                level,
            );
            let left = interpolate_edge(Point::new(fx, fy), Point::new(fx, fy + 1.0), tl, bl, level);

            let segment = |start, end| Segment { start, end };
            match case {
                1 | 14 => segments.push(segment(left, top)),
                2 | 13 => segments.push(segment(top, right)),
                3 | 12 => segments.push(segment(left, right)),
                4 | 11 => segments.push(segment(right, bottom)),
                6 | 9 => segments.push(segment(top, bottom)),
                7 | 8 => segments.push(segment(left, bottom)),
                // Saddles are resolved by the cell mean
                5 | 10 => {
                    let centre_high = (tl + tr + bl + br) / 4.0 >= level;
                    if (case == 5) == centre_high {
                        segments.push(segment(left, bottom));
                        segments.push(segment(top, right));
                    } else {
                        segments.push(segment(left, top));
                        segments.push(segment(right, bottom));
                    }
                }
                _ => {}
            }
        }
    }

    segments
}

/// Draw segments traced on per-pixel samples onto `img`
pub fn draw_segments(img: &mut RgbaImage, segments: &[Segment], color: [u8; 4]) {
    for segment in segments {
        draw_line_segment_mut(
            img,
            (segment.start.x, segment.start.y),
            (segment.end.x, segment.end.y),
            Rgba(color),
        );
    }
}
