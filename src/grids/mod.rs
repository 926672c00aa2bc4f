//! Geographic grid definitions.
//!
//! Grids come from the built-in registry or from explicit corners, resolution
//! and type. Every field array in this crate is interpreted against one.

pub mod geogrid;
pub mod projection;
pub mod registry;

pub use geogrid::{Grid, GridSpec, GridSummary};
pub use projection::{GridType, EARTH_RADIUS_KM};
pub use registry::{builtin_spec, list_builtin_grids};
