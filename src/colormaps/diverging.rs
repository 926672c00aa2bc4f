//! Diverging colormaps (two-hue progression with center).
//!
//! These colormaps suit anomalies that diverge from a central value, such as
//! temperature or precipitation departures from normal.

use super::colormap::Palette;

/// Blue to white to red
const COOLWARM: [[u8; 3]; 32] = [
    [59, 76, 192],
    [68, 90, 204],
    [77, 104, 215],
    [87, 117, 225],
    [98, 130, 234],
    [108, 142, 241],
    [119, 154, 247],
    [130, 165, 251],
    [141, 176, 254],
    [152, 185, 255],
    [163, 194, 255],
    [174, 201, 253],
    [184, 208, 249],
    [194, 213, 244],
    [204, 217, 238],
    [213, 219, 230],
    [221, 221, 221],
    [229, 216, 209],
    [236, 211, 197],
    [241, 204, 185],
    [245, 196, 173],
    [247, 187, 160],
    [247, 177, 148],
    [247, 166, 135],
    [244, 154, 123],
    [241, 141, 111],
    [236, 127, 99],
    [229, 112, 88],
    [222, 96, 77],
    [213, 80, 66],
    [203, 62, 56],
    [192, 40, 47],
];

/// Dark blue through white to dark red, with a pure white middle stop
const SEISMIC: [[u8; 3]; 15] = [
    [0, 0, 127],
    [0, 0, 191],
    [0, 63, 255],
    [0, 127, 255],
    [0, 191, 255],
    [127, 223, 255],
    [191, 239, 255],
    [255, 255, 255],
    [255, 239, 191],
    [255, 223, 127],
    [255, 191, 0],
    [255, 127, 0],
    [255, 63, 0],
    [191, 0, 0],
    [127, 0, 0],
];

/// Coolwarm: blue to red through light gray, good for temperature
pub fn coolwarm() -> Palette {
    Palette::new("coolwarm", COOLWARM.to_vec())
}

/// RdBu: red to blue, the coolwarm stops reversed
pub fn rdbu() -> Palette {
    Palette::new("rdbu", COOLWARM.iter().rev().copied().collect())
}

/// Seismic: blue-white-red for anomalies
pub fn seismic() -> Palette {
    Palette::new("seismic", SEISMIC.to_vec())
}

/// BrBG: brown to blue-green, for precipitation anomalies
pub fn brbg() -> Palette {
    let gradient = colorgrad::br_bg();
    let stops = (0..=32)
        .map(|i| {
            let [r, g, b, _] = gradient.at(i as f64 / 32.0).to_rgba8();
            [r, g, b]
        })
        .collect();
    Palette::new("brbg", stops)
}
