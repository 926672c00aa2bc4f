//! Integration tests for geogrids
//!
//! These tests exercise the public API end-to-end: grids from the registry,
//! binary field files, filling, smoothing, regridding and map rendering.

mod common;

use common::assertions::{assert_approx_eq, assert_field_approx_eq, assert_field_in_range};
use common::{image_utils, test_data};
use geogrids::data_loader::{load_binary, load_binary_with_missing, save_binary};
use geogrids::interpolation::{get_interpolator, interpolate_with};
use geogrids::mask::count_missing;
use geogrids::{
    fill_mask_borders, interpolate, list_builtin_grids, smooth, ContourColors, Field,
    GeogridError, Grid, GridSpec, GridType, Levels, Map, MapDomain, MapProjection,
};
use image::ImageFormat;
use ndarray::Array2;
use pretty_assertions::assert_eq;

#[test]
fn test_builtin_grids_fit_documented_shapes() {
    let names = list_builtin_grids();
    assert_eq!(names.len(), 12);

    for name in names {
        let grid = Grid::from_name(name).unwrap();
        let spec = grid.spec();

        if spec.grid_type == GridType::LatLon {
            let expected_y = ((spec.ur_corner.0 - spec.ll_corner.0) / spec.res + 1e-6).floor()
                as usize
                + 1;
            let expected_x = ((spec.ur_corner.1 - spec.ll_corner.1) / spec.res + 1e-6).floor()
                as usize
                + 1;
            assert_eq!(grid.shape(), (expected_y, expected_x), "grid {}", name);
        }

        assert!(grid.fits(&Array2::<f32>::zeros(grid.shape())), "grid {}", name);
        assert!(!grid.fits(&Array2::<f32>::zeros((grid.num_y() + 1, grid.num_x()))));
    }
}

#[test]
fn test_documented_shapes() {
    let shapes = [
        ("1deg-global", (181, 360)),
        ("2deg-global", (91, 180)),
        ("2.5deg-global", (73, 144)),
        ("1/6th-deg-global", (1081, 2160)),
        ("1deg-conus", (36, 71)),
    ];
    for (name, shape) in shapes {
        assert_eq!(Grid::from_name(name).unwrap().shape(), shape, "grid {}", name);
    }
}

#[test]
fn test_index_of_on_one_degree_global() {
    let grid = Grid::from_name("1deg-global").unwrap();
    assert_eq!(grid.index_of(50.0, -80.0).unwrap(), 50680);
    assert_eq!(grid.index_of(50.0, 280.0).unwrap(), 50680);
    assert_eq!(grid.index_of(-90.0, 0.0).unwrap(), 0);
}

#[test]
fn test_unknown_grid_name() {
    assert!(Grid::from_name("3deg-global").is_err());
}

#[test]
fn test_custom_grid_definition() {
    let grid = Grid::new(GridSpec::latlon((-10.0, 20.0), (10.0, 40.0), 0.5)).unwrap();
    assert_eq!(grid.shape(), (41, 41));
    assert!(!grid.is_global());
    assert_eq!(grid.index_of(-10.0, 20.0).unwrap(), 0);
    assert!(grid.index_of(50.0, 30.0).is_err());
}

#[test]
fn test_interpolate_same_grid_is_identity() {
    let grid = Grid::from_name("2.5deg-global").unwrap();
    let field = test_data::with_missing_block(&test_data::wave_field(&grid), 10..14, 20..30);

    let result = interpolate(&field, &grid, &grid).unwrap();
    assert_field_approx_eq(&result, &field, Some(0.0));
}

#[test]
fn test_interpolate_ones_to_coarser_grid() {
    let source = Grid::from_name("1deg-global").unwrap();
    let target = Grid::from_name("2deg-global").unwrap();
    let ones = test_data::constant_field(&source, 1.0);

    let result = interpolate(&ones, &source, &target).unwrap();
    assert_eq!(result.dim(), (91, 180));
    assert_field_approx_eq(&result, &test_data::constant_field(&target, 1.0), None);
}

#[test]
fn test_interpolate_reproduces_linear_latitude_field() {
    let source = Grid::from_name("1deg-global").unwrap();
    let target = Grid::from_name("0.5deg-global-edge-aligned").unwrap();
    let field = test_data::linear_field(&source, 1.0, 0.0, 0.0);

    let result = interpolate(&field, &source, &target).unwrap();
    let expected = test_data::linear_field(&target, 1.0, 0.0, 0.0);
    assert_field_approx_eq(&result, &expected, Some(1e-4));
}

#[test]
fn test_interpolate_outside_source_domain_is_missing() {
    let source = Grid::from_name("1deg-conus").unwrap();
    let target = Grid::from_name("2deg-global").unwrap();
    let field = test_data::constant_field(&source, 7.0);

    let result = interpolate(&field, &source, &target).unwrap();
    let valid = result.len() - count_missing(&result);
    assert!(valid > 0);
    assert!(count_missing(&result) > valid);
    assert_field_in_range(&result, 7.0 - 1e-5, 7.0 + 1e-5);

    // Equator at 0E lies outside CONUS
    let row = target.index_of(0.0, 0.0).unwrap() / target.num_x();
    assert!(result[[row, 0]].is_nan());
}

#[test]
fn test_interpolate_shape_mismatch() {
    let source = Grid::from_name("1deg-global").unwrap();
    let target = Grid::from_name("2deg-global").unwrap();
    let wrong = Array2::<f32>::zeros((91, 180));

    let err = interpolate(&wrong, &source, &target).unwrap_err();
    assert!(matches!(err, GeogridError::ShapeMismatch { .. }));
}

#[test]
fn test_nearest_interpolator_through_public_api() {
    let source = Grid::from_name("2deg-global").unwrap();
    let target = Grid::from_name("1deg-global").unwrap();
    let field = test_data::wave_field(&source);
    let nearest = get_interpolator("nearest").unwrap();

    let result = interpolate_with(&field, &source, &target, nearest.as_ref()).unwrap();
    assert_eq!(result.dim(), target.shape());
    // Every target point lying on a source point takes its value exactly
    assert_approx_eq(result[[0, 0]], field[[0, 0]], Some(0.0));
    assert_approx_eq(result[[2, 4]], field[[1, 2]], Some(0.0));
}

#[test]
fn test_smooth_zero_factor_is_identity() {
    let grid = Grid::from_name("2deg-global").unwrap();
    let field = test_data::with_missing_block(&test_data::wave_field(&grid), 0..5, 0..5);

    let result = smooth(&field, &grid, 0.0).unwrap();
    assert_field_approx_eq(&result, &field, Some(0.0));
}

#[test]
fn test_smooth_preserves_missing_and_constants() {
    let grid = Grid::from_name("2deg-global").unwrap();
    let field = test_data::with_missing_block(&test_data::constant_field(&grid, 5.0), 40..50, 60..80);

    let result = smooth(&field, &grid, 2.0).unwrap();
    assert_eq!(count_missing(&result), count_missing(&field));
    assert!(result[[45, 70]].is_nan());
    assert_field_in_range(&result, 5.0 - 1e-4, 5.0 + 1e-4);
}

#[test]
fn test_smooth_reduces_variance() {
    let grid = Grid::from_name("2deg-global").unwrap();
    let noisy = Array2::from_shape_fn(grid.shape(), |(i, j)| if (i + j) % 2 == 0 { 1.0 } else { -1.0 });

    let result = smooth(&noisy, &grid, 1.5).unwrap();
    let max_abs = result.iter().fold(0.0f32, |acc, v| acc.max(v.abs()));
    assert!(max_abs < 0.5, "max_abs = {}", max_abs);
}

#[test]
fn test_fill_without_missing_is_identity() {
    let grid = Grid::from_name("2deg-global").unwrap();
    let field = test_data::wave_field(&grid);

    let result = fill_mask_borders(&field, 3);
    assert_field_approx_eq(&result, &field, Some(0.0));
}

#[test]
fn test_fill_grows_one_ring_per_layer() {
    let grid = Grid::from_name("2deg-global").unwrap();
    let field = test_data::with_missing_block(&test_data::constant_field(&grid, 3.0), 40..44, 60..64);
    assert_eq!(count_missing(&field), 16);

    let one = fill_mask_borders(&field, 1);
    assert_eq!(count_missing(&one), 4);
    assert_approx_eq(one[[40, 60]], 3.0, None);
    assert!(one[[41, 61]].is_nan());

    let two = fill_mask_borders(&field, 2);
    assert_eq!(count_missing(&two), 0);
    assert_field_in_range(&two, 3.0, 3.0);
}

#[test]
fn test_binary_length_mismatch() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("short.bin");
    let small = Grid::from_name("2deg-global").unwrap();
    test_data::write_binary_file(&path, &test_data::constant_field(&small, 1.0), None);

    let grid = Grid::from_name("1deg-global").unwrap();
    let err = load_binary(&path, &grid).unwrap_err();
    assert!(matches!(
        err,
        GeogridError::LengthMismatch {
            expected: 65160,
            actual: 16380
        }
    ));
}

#[test]
fn test_end_to_end_pipeline() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input.bin");
    let output = dir.path().join("regridded.bin");
    let image_path = dir.path().join("map.png");

    let source = Grid::from_name("1deg-global").unwrap();
    let target = Grid::from_name("2deg-global").unwrap();
    let field = test_data::with_missing_block(&test_data::wave_field(&source), 100..103, 200..203);
    test_data::write_binary_file(&input, &field, Some(-9999.0));

    // Load with the sentinel turned into missing values
    let loaded = load_binary_with_missing(&input, &source, -9999.0).unwrap();
    assert_eq!(count_missing(&loaded), 9);

    let filled = fill_mask_borders(&loaded, 1);
    assert_eq!(count_missing(&filled), 1);

    let smoothed = smooth(&filled, &source, 1.0).unwrap();
    let regridded = interpolate(&smoothed, &source, &target).unwrap();
    assert_eq!(regridded.dim(), (91, 180));
    assert_field_in_range(&regridded, -10.0, 10.0);

    save_binary(&output, &regridded, Some(-9999.0)).unwrap();
    let raw = test_data::read_binary_file(&output);
    assert_eq!(raw.len(), 91 * 180);
    assert!(raw.iter().all(|v| v.is_finite()));

    let plotted = Field::new(regridded, target)
        .unwrap()
        .with_colormap("coolwarm")
        .unwrap()
        .with_levels(Levels::Auto { count: 8 })
        .unwrap();
    let mut map = Map::new(MapDomain::Global).with_size(360, 240).unwrap();
    map.plot(plotted);
    map.save(&image_path).unwrap();

    let bytes = std::fs::read(&image_path).unwrap();
    image_utils::assert_image_format(&bytes, ImageFormat::Png).unwrap();
    let img = image_utils::load_image_from_bytes(&bytes).unwrap();
    image_utils::assert_image_dimensions(&img, 360, 240).unwrap();
    assert!(image_utils::distinct_colors(&img) > 4);
}

#[test]
fn test_map_of_regional_grid_leaves_background_outside() {
    let grid = Grid::from_name("1deg-conus").unwrap();
    let field = Field::new(test_data::wave_field(&grid), grid).unwrap();

    let mut map = Map::new(MapDomain::Global)
        .with_size(360, 180)
        .unwrap()
        .with_colorbar(false);
    map.plot(field);

    let bytes = map.encode("png").unwrap();
    let img = image_utils::load_image_from_bytes(&bytes).unwrap();

    // Southern hemisphere rows are far from CONUS
    let background = image_utils::count_pixels_in_rows(&img, 100..180, [0xDD, 0xDD, 0xDD, 255]);
    assert_eq!(background, 360 * 80);
}

#[test]
fn test_map_of_global_grid_covers_domain() {
    let grid = Grid::from_name("2deg-global").unwrap();
    let field = Field::new(test_data::wave_field(&grid), grid).unwrap();

    let mut map = Map::new(MapDomain::CONUS)
        .with_size(200, 100)
        .unwrap()
        .with_colorbar(false);
    map.plot(field);

    let img = image::DynamicImage::ImageRgba8(map.render().unwrap());
    let background = image_utils::count_pixels_in_rows(&img, 0..100, [0xDD, 0xDD, 0xDD, 255]);
    assert_eq!(background, 0);
}

#[test]
fn test_map_jpeg_encoding() {
    let grid = Grid::from_name("2.5deg-global").unwrap();
    let field = Field::new(test_data::wave_field(&grid), grid).unwrap();
    let mut map = Map::new(MapDomain::NA).with_size(120, 120).unwrap();
    map.plot(field);

    let bytes = map.encode("jpg").unwrap();
    image_utils::assert_image_format(&bytes, ImageFormat::Jpeg).unwrap();
    assert!(map.encode("gif").is_err());
}

#[test]
fn test_conic_map_with_contour_lines() {
    let white = [255, 255, 255, 255];
    let grid = Grid::from_name("2deg-global").unwrap();
    let render = |contours: ContourColors| {
        let field = Field::new(test_data::wave_field(&grid), grid.clone())
            .unwrap()
            .with_contour_colors(contours);
        let mut map = Map::new(MapDomain::CONUS)
            .with_projection(MapProjection::Lcc)
            .unwrap()
            .with_size(200, 140)
            .unwrap()
            .with_colorbar(false);
        map.plot(field);
        image::DynamicImage::ImageRgba8(map.render().unwrap())
    };

    // The whole conic window lies on the globe and inside the global grid
    let plain = render(ContourColors::None);
    assert_eq!(
        image_utils::count_pixels_in_rows(&plain, 0..140, [0xDD, 0xDD, 0xDD, 255]),
        0
    );
    assert_eq!(image_utils::count_pixels_in_rows(&plain, 0..140, white), 0);

    let outlined = render(ContourColors::Solid(white));
    assert!(image_utils::count_pixels_in_rows(&outlined, 0..140, white) > 50);
}
