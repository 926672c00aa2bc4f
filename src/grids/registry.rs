//! Built-in grid registry.

use once_cell::sync::Lazy;
use std::collections::BTreeMap;

use super::geogrid::GridSpec;

static BUILTIN_GRIDS: Lazy<BTreeMap<&'static str, GridSpec>> = Lazy::new(|| {
    let mut grids = BTreeMap::new();

    grids.insert(
        "1/6th-deg-global",
        GridSpec::latlon((-90.0, 0.0), (90.0, 360.0 - 1.0 / 6.0), 1.0 / 6.0),
    );
    grids.insert(
        "0.5deg-global-edge-aligned",
        GridSpec::latlon((-89.75, 0.25), (89.75, 359.75), 0.5),
    );
    grids.insert(
        "0.5deg-global-center-aligned",
        GridSpec::latlon((-90.0, 0.0), (90.0, 359.5), 0.5),
    );
    grids.insert(
        "1deg-global",
        GridSpec::latlon((-90.0, 0.0), (90.0, 359.0), 1.0),
    );
    grids.insert(
        "2deg-global",
        GridSpec::latlon((-90.0, 0.0), (90.0, 358.0), 2.0),
    );
    grids.insert(
        "2.5deg-global",
        GridSpec::latlon((-90.0, 0.0), (90.0, 357.5), 2.5),
    );
    grids.insert(
        "0.125deg-conus",
        GridSpec::latlon((20.0, 230.0), (55.0, 300.0), 0.125),
    );
    grids.insert(
        "0.5deg-conus",
        GridSpec::latlon((20.0, 230.0), (55.0, 300.0), 0.5),
    );
    grids.insert(
        "1deg-conus",
        GridSpec::latlon((20.0, 230.0), (55.0, 300.0), 1.0),
    );
    grids.insert(
        "2deg-conus",
        GridSpec::latlon((20.0, 230.0), (56.0, 300.0), 2.0),
    );
    grids.insert(
        "1deg-north-america",
        GridSpec::latlon((0.0, 180.0), (80.0, 310.0), 1.0),
    );
    grids.insert(
        "100km-equal-area-global",
        GridSpec::equal_area((-90.0, 0.0), (90.0, 359.0), 100.0),
    );

    grids
});

/// Names of all built-in grids, sorted
pub fn list_builtin_grids() -> Vec<&'static str> {
    BUILTIN_GRIDS.keys().copied().collect()
}

/// Spec of a built-in grid
pub fn builtin_spec(name: &str) -> Option<GridSpec> {
    BUILTIN_GRIDS.get(name).copied()
}
