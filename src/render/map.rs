//! Map rendering.
//!
//! A [`Map`] shows a domain in a [`MapProjection`]: every pixel center is
//! unprojected to a geographic point, the fields plotted on the map are
//! sampled there, binned into their levels and filled with their colormap.
//! Contour lines are traced on the same per-pixel samples, so they follow the
//! projection.

use image::{ImageBuffer, Rgba, RgbaImage};
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Cursor;
use std::path::Path;
use std::str::FromStr;
use std::time::Instant;
use tracing::{debug, info};

use super::contour::{draw_segments, march_squares, ContourColors};
use super::domain::MapDomain;
use super::levels::{bin_colors, level_index};
use super::projection::{MapFrame, MapProjection};
use crate::colormaps::get_colormap;
use crate::error::{GeogridError, Result};
use crate::field::Field;
use crate::interpolation::bilinear::BilinearInterpolator;
use crate::interpolation::Interpolator;
use crate::mask::{is_missing, MISSING};

/// Default image dimensions
pub const DEFAULT_WIDTH: u32 = 800;
pub const DEFAULT_HEIGHT: u32 = 600;

/// Light gray map background
pub const DEFAULT_BACKGROUND: [u8; 4] = [0xDD, 0xDD, 0xDD, 255];

/// Height of the colorbar strip, including padding
const COLORBAR_HEIGHT: u32 = 40;
const COLORBAR_PADDING: u32 = 10;

/// Supported output formats
const FORMATS: [&str; 2] = ["png", "jpeg"];

/// Shape of the outermost colorbar swatches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorbarEnds {
    Square,
    /// Open-ended bins drawn as triangles pointing outwards
    #[default]
    Triangular,
}

impl FromStr for ColorbarEnds {
    type Err = GeogridError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "square" => Ok(ColorbarEnds::Square),
            "triangular" => Ok(ColorbarEnds::Triangular),
            _ => Err(GeogridError::invalid_parameter(
                "colorbar_ends",
                format!("Colorbar ends must be 'square' or 'triangular', got {}", s),
            )),
        }
    }
}

impl fmt::Display for ColorbarEnds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorbarEnds::Square => write!(f, "square"),
            ColorbarEnds::Triangular => write!(f, "triangular"),
        }
    }
}

/// A field prepared for drawing
struct Layer<'a> {
    field: &'a Field,
    data: Array2<f32>,
    levels: Vec<f32>,
    colors: Vec<[u8; 4]>,
}

/// A map of a domain with fields plotted on it
#[derive(Debug, Clone)]
pub struct Map {
    domain: MapDomain,
    frame: MapFrame,
    width: u32,
    height: u32,
    colorbar: bool,
    colorbar_ends: ColorbarEnds,
    background: [u8; 4],
    fields: Vec<Field>,
}

impl Map {
    /// A plate carrée map of `domain`
    pub fn new(domain: MapDomain) -> Self {
        Self {
            domain,
            frame: MapFrame::plate_carree(domain),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            colorbar: true,
            colorbar_ends: ColorbarEnds::default(),
            background: DEFAULT_BACKGROUND,
            fields: Vec::new(),
        }
    }

    /// Fails when the projection cannot show the map's domain
    pub fn with_projection(mut self, projection: MapProjection) -> Result<Self> {
        self.frame = MapFrame::new(projection, self.domain)?;
        Ok(self)
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Result<Self> {
        if width < 2 || height < 2 {
            return Err(GeogridError::invalid_parameter(
                "size",
                format!("Image must be at least 2x2 pixels, got {}x{}", width, height),
            ));
        }
        self.width = width;
        self.height = height;
        Ok(self)
    }

    pub fn with_colorbar(mut self, colorbar: bool) -> Self {
        self.colorbar = colorbar;
        self
    }

    pub fn with_colorbar_ends(mut self, colorbar_ends: ColorbarEnds) -> Self {
        self.colorbar_ends = colorbar_ends;
        self
    }

    pub fn with_background(mut self, background: [u8; 4]) -> Self {
        self.background = background;
        self
    }

    pub fn domain(&self) -> MapDomain {
        self.domain
    }

    pub fn projection(&self) -> MapProjection {
        self.frame.projection()
    }

    pub fn colorbar_ends(&self) -> ColorbarEnds {
        self.colorbar_ends
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Add a field; later fields are drawn over earlier ones
    pub fn plot(&mut self, field: Field) {
        self.fields.push(field);
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Height of the map area, leaving room for the colorbar when drawn
    fn map_height(&self) -> u32 {
        if self.draws_colorbar() {
            self.height - COLORBAR_HEIGHT
        } else {
            self.height
        }
    }

    fn draws_colorbar(&self) -> bool {
        self.colorbar && !self.fields.is_empty() && self.height > 2 * COLORBAR_HEIGHT
    }

    /// Geographic coordinate of a pixel center in the map area, `None` where
    /// the pixel falls off the globe
    pub fn pixel_to_latlon(&self, x: u32, y: u32) -> Option<(f64, f64)> {
        let (x_min, x_max) = self.frame.x_range();
        let (y_min, y_max) = self.frame.y_range();
        let map_height = self.map_height();

        let x_ratio = (x as f64 + 0.5) / self.width as f64;
        let y_ratio = (y as f64 + 0.5) / map_height as f64;

        self.frame.unproject(
            x_min + x_ratio * (x_max - x_min),
            y_max - y_ratio * (y_max - y_min),
        )
    }

    fn prepare_layers(&self) -> Result<Vec<Layer<'_>>> {
        self.fields
            .iter()
            .map(|field| -> Result<Layer> {
                let data = field.display_data()?;
                let levels = field.resolve_levels(&data);
                let colormap = get_colormap(field.colormap())?;
                let colors = bin_colors(&levels, colormap.as_ref());
                Ok(Layer {
                    field,
                    data,
                    levels,
                    colors,
                })
            })
            .collect()
    }

    /// Value of a layer at every pixel of the map area, NaN where missing
    fn sample_layer(
        &self,
        layer: &Layer,
        points: &Array2<Option<(f64, f64)>>,
    ) -> Result<Array2<f32>> {
        let grid = layer.field.grid();
        let interpolator = BilinearInterpolator;
        let mut samples = Array2::from_elem(points.dim(), MISSING);

        for ((y, x), point) in points.indexed_iter() {
            let Some((lat, lon)) = *point else {
                continue;
            };
            let Some((row, col)) = grid.fractional_index(lat, lon) else {
                continue;
            };
            samples[[y, x]] =
                interpolator.interpolate(layer.data.view(), row, col, grid.is_global())?;
        }

        Ok(samples)
    }

    /// Render the map into an RGBA image
    pub fn render(&self) -> Result<RgbaImage> {
        let start = Instant::now();
        let layers = self.prepare_layers()?;
        let map_height = self.map_height();

        let points = Array2::from_shape_fn(
            (map_height as usize, self.width as usize),
            |(y, x)| self.pixel_to_latlon(x as u32, y as u32),
        );
        let samples = layers
            .iter()
            .map(|layer| self.sample_layer(layer, &points))
            .collect::<Result<Vec<_>>>()?;

        let mut img: RgbaImage =
            ImageBuffer::from_pixel(self.width, self.height, Rgba(self.background));

        for ((y, x), _) in points.indexed_iter() {
            let mut pixel = self.background;
            for (layer, values) in layers.iter().zip(&samples) {
                let value = values[[y, x]];
                if is_missing(value) {
                    continue;
                }
                let color = layer.colors[level_index(value, &layer.levels)];
                pixel = blend(color, pixel, layer.field.fill_alpha());
            }
            img.put_pixel(x as u32, y as u32, Rgba(pixel));
        }

        for (layer, values) in layers.iter().zip(&samples) {
            draw_contours(&mut img, layer, values);
        }

        if self.draws_colorbar() {
            if let Some(layer) = layers.first() {
                self.draw_colorbar(&mut img, &layer.colors);
            }
        }

        debug!(
            operation = "render_map",
            domain = %self.domain,
            projection = %self.projection(),
            width = self.width,
            height = self.height,
            fields = self.fields.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Map rendered"
        );

        Ok(img)
    }

    /// Draw one swatch per level bin along the bottom of the image
    fn draw_colorbar(&self, img: &mut RgbaImage, colors: &[[u8; 4]]) {
        let top = self.map_height() + COLORBAR_PADDING;
        let bottom = self.height - COLORBAR_PADDING;
        let left = self.width / 10;
        let right = self.width - self.width / 10;
        let span = (right - left) as usize;
        if colors.is_empty() || span == 0 {
            return;
        }

        let last = colors.len() - 1;
        let middle = (top + bottom) as f32 / 2.0;
        let half_height = (bottom - top) as f32 / 2.0;
        let bin_width = span as f32 / colors.len() as f32;
        let triangular = self.colorbar_ends == ColorbarEnds::Triangular && colors.len() >= 2;

        for x in left..right {
            let offset = (x - left) as usize;
            let bin = (offset * colors.len() / span).min(last);

            // Distance into the swatch from its outer edge, as a fraction
            let taper = if triangular && bin == 0 {
                Some((offset as f32 + 0.5) / bin_width)
            } else if triangular && bin == last {
                Some(((span - offset) as f32 - 0.5) / bin_width)
            } else {
                None
            };

            for y in top..bottom {
                if let Some(fraction) = taper {
                    if (y as f32 + 0.5 - middle).abs() > fraction.min(1.0) * half_height {
                        continue;
                    }
                }
                img.put_pixel(x, y, Rgba(colors[bin]));
            }
        }
    }

    /// Encode the rendered map as `png` or `jpeg`
    pub fn encode(&self, format: &str) -> Result<Vec<u8>> {
        let format = format.to_lowercase();
        let format = if format == "jpg" { "jpeg".to_string() } else { format };
        if !FORMATS.contains(&format.as_str()) {
            return Err(GeogridError::invalid_parameter(
                "format",
                "Format must be 'png' or 'jpeg'",
            ));
        }

        let img = self.render()?;
        let mut buffer = Cursor::new(Vec::new());

        match format.as_str() {
            "png" => {
                img.write_to(&mut buffer, image::ImageFormat::Png)
                    .map_err(|e| GeogridError::ImageGeneration {
                        message: format!("Failed to encode PNG: {}", e),
                    })?;
            }
            _ => {
                // JPEG has no alpha channel
                image::DynamicImage::ImageRgba8(img)
                    .to_rgb8()
                    .write_to(&mut buffer, image::ImageFormat::Jpeg)
                    .map_err(|e| GeogridError::ImageGeneration {
                        message: format!("Failed to encode JPEG: {}", e),
                    })?;
            }
        }

        Ok(buffer.into_inner())
    }

    /// Render and write the map, choosing the format from the file extension
    pub fn save(&self, path: &Path) -> Result<()> {
        let format = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("png");
        let bytes = self.encode(format)?;
        std::fs::write(path, &bytes)?;

        info!(
            operation = "save_map",
            path = %path.display(),
            bytes = bytes.len(),
            "Map saved"
        );
        Ok(())
    }
}

/// Trace and draw the contour lines of a layer on its pixel samples
fn draw_contours(img: &mut RgbaImage, layer: &Layer, values: &Array2<f32>) {
    let contour_colors = layer.field.contour_colors();
    if !contour_colors.is_drawn() {
        return;
    }

    for &level in &layer.levels {
        let color = match contour_colors {
            ContourColors::Solid(color) => color,
            _ => layer.colors[level_index(level, &layer.levels)],
        };
        draw_segments(img, &march_squares(values, level), color);
    }
}

/// Alpha-blend `src` over `dst`
fn blend(src: [u8; 4], dst: [u8; 4], alpha: f32) -> [u8; 4] {
    let a = alpha.clamp(0.0, 1.0);
    let mix = |s: u8, d: u8| (s as f32 * a + d as f32 * (1.0 - a)).round() as u8;
    [
        mix(src[0], dst[0]),
        mix(src[1], dst[1]),
        mix(src[2], dst[2]),
        dst[3].max((src[3] as f32 * a).round() as u8),
    ]
}
