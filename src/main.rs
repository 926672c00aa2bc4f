//! geogrids - regrid, smooth, fill and plot gridded geographic fields
//!
//! This is the main entry point for the geogrids command-line tool.

use anyhow::Context;
use ndarray::Array2;
use std::path::Path;
use std::str::FromStr;
use std::time::Instant;
use tracing::{debug, error, info};

use geogrids::config::Command;
use geogrids::data_loader::{load_binary, load_binary_with_missing, save_binary};
use geogrids::interpolation::{get_interpolator, interpolate_with};
use geogrids::logging::{log_error, log_field_stats};
use geogrids::mask::count_missing;
use geogrids::{
    fill_mask_borders, init_tracing, log_operation_end, log_operation_start, log_timed_operation,
    smooth, ColorbarEnds, Config, ContourColors, Field, Grid, Levels, Map, MapDomain,
    MapProjection, Result,
};

fn main() -> anyhow::Result<()> {
    // Load configuration
    let (config, command) = Config::load().context("Failed to load configuration")?;

    init_tracing(&config.log_level);
    debug!("Starting geogrids v{}", env!("CARGO_PKG_VERSION"));

    // Validate configuration
    config.validate().map_err(|e| {
        error!("Invalid configuration: {}", e);
        e
    })?;

    let name = command_name(&command);
    run(&config, command)
        .map_err(|e| {
            log_error(&e, name);
            e
        })
        .with_context(|| format!("geogrids {} failed", name))
}

fn command_name(command: &Command) -> &'static str {
    match command {
        Command::List => "list",
        Command::Info { .. } => "info",
        Command::Index { .. } => "index",
        Command::Regrid { .. } => "regrid",
        Command::Smooth { .. } => "smooth",
        Command::Fill { .. } => "fill",
        Command::Plot { .. } => "plot",
    }
}

fn run(config: &Config, command: Command) -> Result<()> {
    match command {
        Command::List => {
            for name in config.grid_names() {
                println!("{}", name);
            }
            Ok(())
        }
        Command::Info { grid } => {
            let grid = config.resolve_grid(&grid)?;
            println!("{}", serde_json::to_string_pretty(&grid.summary())?);
            Ok(())
        }
        Command::Index { grid, lat, lon } => {
            let grid = config.resolve_grid(&grid)?;
            println!("{}", grid.index_of(lat, lon)?);
            Ok(())
        }
        Command::Regrid {
            input,
            output,
            from,
            to,
            ..
        } => {
            let source = config.resolve_grid(&from)?;
            let target = config.resolve_grid(&to)?;
            let interpolator = get_interpolator(&config.processing.interpolation_method)?;
            timed("regrid", &format!("{} -> {}", from, to), || {
                let data = load_field(config, &input, &source)?;
                let regridded = interpolate_with(&data, &source, &target, interpolator.as_ref())?;
                log_field_stats("regrid", regridded.dim(), count_missing(&regridded));
                save_binary(&output, &regridded, config.processing.missing_value)
            })
        }
        Command::Smooth {
            input,
            output,
            grid,
            ..
        } => {
            let grid_def = config.resolve_grid(&grid)?;
            timed("smooth", &grid, || {
                let data = load_field(config, &input, &grid_def)?;
                let smoothed = smooth(&data, &grid_def, config.processing.smoothing_factor)?;
                save_binary(&output, &smoothed, config.processing.missing_value)
            })
        }
        Command::Fill {
            input,
            output,
            grid,
            ..
        } => {
            let grid_def = config.resolve_grid(&grid)?;
            timed("fill", &grid, || {
                let data = load_field(config, &input, &grid_def)?;
                let filled = fill_mask_borders(&data, config.processing.fill_layers);
                log_field_stats("fill", filled.dim(), count_missing(&filled));
                save_binary(&output, &filled, config.processing.missing_value)
            })
        }
        Command::Plot {
            input,
            output,
            grid,
            ..
        } => {
            let grid_def = config.resolve_grid(&grid)?;
            timed("plot", &grid, || {
                let data = load_field(config, &input, &grid_def)?;
                let field = Field::new(data, grid_def.clone())?
                    .with_colormap(&config.render.colormap)?
                    .with_levels(Levels::Auto {
                        count: config.render.levels,
                    })?
                    .with_smoothing(config.processing.smoothing_factor)?
                    .with_contour_colors(ContourColors::from_str(&config.render.contours)?);

                let mut map = Map::new(MapDomain::from_str(&config.render.domain)?)
                    .with_projection(MapProjection::from_str(&config.render.projection)?)?
                    .with_size(config.render.width, config.render.height)?
                    .with_colorbar(config.render.colorbar)
                    .with_colorbar_ends(ColorbarEnds::from_str(&config.render.colorbar_ends)?);
                map.plot(field);
                map.save(&output)?;

                info!(file_path = %output.display(), "Map written");
                Ok(())
            })
        }
    }
}

/// Read an input field, masking the configured missing-value sentinel
fn load_field(config: &Config, path: &Path, grid: &Grid) -> Result<Array2<f32>> {
    let data = match config.processing.missing_value {
        Some(sentinel) => load_binary_with_missing(path, grid, sentinel)?,
        None => load_binary(path, grid)?,
    };
    log_field_stats("load", data.dim(), count_missing(&data));
    Ok(data)
}

/// Run `f` between start and end log records for `operation`
fn timed<F>(operation: &str, details: &str, f: F) -> Result<()>
where
    F: FnOnce() -> Result<()>,
{
    log_operation_start(operation, Some(details));
    let start = Instant::now();
    let result = log_timed_operation(operation, f);
    log_operation_end(operation, start, result.is_ok());
    result
}
