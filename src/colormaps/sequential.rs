//! Sequential colormaps (single-hue or perceptually uniform progression).
//!
//! These colormaps suit data that progresses from low to high. They are
//! sampled from `colorgrad` presets into fixed palettes.

use super::colormap::Palette;

/// Number of stops sampled from each gradient
const SAMPLES: usize = 256;

fn sample(name: &str, gradient: colorgrad::Gradient) -> Palette {
    let stops = (0..SAMPLES)
        .map(|i| {
            let [r, g, b, _] = gradient.at(i as f64 / (SAMPLES - 1) as f64).to_rgba8();
            [r, g, b]
        })
        .collect();
    Palette::new(name, stops)
}

/// Viridis: perceptually uniform, colorblind-friendly
pub fn viridis() -> Palette {
    sample("viridis", colorgrad::viridis())
}

pub fn plasma() -> Palette {
    sample("plasma", colorgrad::plasma())
}

pub fn inferno() -> Palette {
    sample("inferno", colorgrad::inferno())
}

pub fn magma() -> Palette {
    sample("magma", colorgrad::magma())
}

/// Cividis: colorblind-friendly alternative to viridis
pub fn cividis() -> Palette {
    sample("cividis", colorgrad::cividis())
}

pub fn blues() -> Palette {
    sample("blues", colorgrad::blues())
}

/// Greens, typically for precipitation totals
pub fn greens() -> Palette {
    sample("greens", colorgrad::greens())
}

pub fn reds() -> Palette {
    sample("reds", colorgrad::reds())
}
