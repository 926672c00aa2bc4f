//! Fill levels for map rendering.
//!
//! Levels are the boundaries between color bins. `n` levels make `n + 1`
//! bins: one below the first level, one between each pair, one above the last.

use crate::colormaps::Colormap;

/// Round a raw step up to 1, 2, 2.5 or 5 times a power of ten
pub fn nice_interval(raw: f64) -> f64 {
    if !raw.is_finite() || raw <= 0.0 {
        return 1.0;
    }
    let magnitude = 10f64.powf(raw.log10().floor());
    let normalized = raw / magnitude;
    let nice = if normalized <= 1.0 {
        1.0
    } else if normalized <= 2.0 {
        2.0
    } else if normalized <= 2.5 {
        2.5
    } else if normalized <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

/// Generate about `count` evenly spaced levels with a round interval covering
/// `[min_value, max_value]`
pub fn generate_levels(min_value: f32, max_value: f32, count: usize) -> Vec<f32> {
    if !min_value.is_finite() || !max_value.is_finite() {
        return vec![0.0];
    }
    if max_value <= min_value || count < 2 {
        return vec![min_value];
    }

    let interval = nice_interval((max_value - min_value) as f64 / (count - 1) as f64);
    // Start from first multiple of interval at or above min_value
    let start = (min_value as f64 / interval).ceil() * interval;

    let mut levels = Vec::new();
    let mut k = 0usize;
    loop {
        let level = start + k as f64 * interval;
        if level > max_value as f64 + interval * 1e-9 {
            break;
        }
        levels.push(level as f32);
        k += 1;
    }

    if levels.is_empty() {
        levels.push(min_value);
    }
    levels
}

/// Whether levels are usable as bin boundaries
pub fn validate_levels(levels: &[f32]) -> bool {
    levels.len() >= 2
        && levels.iter().all(|l| l.is_finite())
        && levels.windows(2).all(|w| w[1] > w[0])
}

/// Bin of `value` given level boundaries; values equal to a level fall in the
/// bin above it
pub fn level_index(value: f32, levels: &[f32]) -> usize {
    levels.partition_point(|&level| level <= value)
}

/// One color per bin, spread evenly across the colormap
pub fn bin_colors(levels: &[f32], colormap: &dyn Colormap) -> Vec<[u8; 4]> {
    let bins = levels.len() + 1;
    (0..bins)
        .map(|k| colormap.map_normalized(k as f32 / (bins - 1) as f32))
        .collect()
}
