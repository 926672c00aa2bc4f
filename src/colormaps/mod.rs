//! Colormap implementations for map rendering.
//!
//! This module provides matplotlib-inspired colormaps for visualizing fields.

pub mod colormap;
pub mod diverging;
pub mod sequential;

pub use colormap::{get_colormap, lerp_color, list_colormaps, Colormap, Palette};
