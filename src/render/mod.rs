//! Map rendering of fields.
//!
//! Fields are drawn over a chosen domain in one of several projections,
//! filled by level with a colormap, optionally outlined with contour lines,
//! and encoded as PNG or JPEG.

pub mod contour;
pub mod domain;
pub mod levels;
pub mod map;
pub mod projection;

pub use contour::ContourColors;
pub use domain::MapDomain;
pub use levels::{generate_levels, level_index};
pub use map::{ColorbarEnds, Map};
pub use projection::{MapFrame, MapProjection};
