//! State scatter maps of accident locations.

use std::ops::Range;
use std::path::{Path, PathBuf};

use plotters::prelude::*;
use polars::prelude::*;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::files;
use crate::load::{read_report, COL_LATITUDE, COL_LONGITUDE, COL_STATE};

pub mod states;

/// Longitudes above this mark "location not recorded" in the report format.
const LONGITUDE_SENTINEL: f64 = 900.0;
/// Latitudes above this mark "location not recorded" in the report format.
const LATITUDE_SENTINEL: f64 = 90.0;

const MAP_SIZE: (u32, u32) = (900, 700);
/// Padding around the coordinate extent, in degrees. Keeps single-point and
/// very narrow extents drawable.
const MARGIN_DEG: f64 = 0.5;

/// Result of a map request for a valid state/year combination.
#[derive(Debug)]
pub enum MapOutcome {
    /// A map was written to `path`, with one point per plotted record.
    Rendered { path: PathBuf, points: usize },
    /// Nothing to draw; no file was written.
    NoAccidents,
}

/// Render the accident locations of one state for one year as a scatter map.
///
/// The year's report must exist ([`Error::FileNotFound`] otherwise) and the
/// state code must occur among its STATE values ([`Error::InvalidState`]
/// otherwise). Records whose coordinates carry the out-of-range sentinels
/// are dropped before drawing. An empty result is not an error: it is
/// reported and [`MapOutcome::NoAccidents`] is returned.
pub fn render_state_map(
    data_dir: &Path,
    state: i64,
    year: i32,
    out_path: &Path,
) -> Result<MapOutcome> {
    let path = files::report_path(data_dir, year);
    let df = read_report(&path)?;

    if !state_present(&df, state)? {
        return Err(Error::InvalidState { state, year });
    }

    let sub = df
        .lazy()
        .filter(col(COL_STATE).eq(lit(state)))
        .with_columns([
            col(COL_LONGITUDE).cast(DataType::Float64),
            col(COL_LATITUDE).cast(DataType::Float64),
        ])
        .with_columns([
            when(col(COL_LONGITUDE).gt(lit(LONGITUDE_SENTINEL)))
                .then(lit(NULL))
                .otherwise(col(COL_LONGITUDE))
                .alias(COL_LONGITUDE),
            when(col(COL_LATITUDE).gt(lit(LATITUDE_SENTINEL)))
                .then(lit(NULL))
                .otherwise(col(COL_LATITUDE))
                .alias(COL_LATITUDE),
        ])
        .collect()?;

    if sub.height() == 0 {
        info!(state, year, "no accidents to plot");
        return Ok(MapOutcome::NoAccidents);
    }

    let lon = sub.column(COL_LONGITUDE)?.f64()?;
    let lat = sub.column(COL_LATITUDE)?.f64()?;
    let points: Vec<(f64, f64)> = lon
        .into_iter()
        .zip(lat.into_iter())
        .filter_map(|(x, y)| Some((x?, y?)))
        .collect();

    if points.is_empty() {
        info!(state, year, "no accidents with usable coordinates to plot");
        return Ok(MapOutcome::NoAccidents);
    }

    draw(&points, state, year, out_path)?;
    debug!(points = points.len(), path = %out_path.display(), "rendered state map");
    Ok(MapOutcome::Rendered {
        path: out_path.to_path_buf(),
        points: points.len(),
    })
}

fn state_present(df: &DataFrame, state: i64) -> Result<bool> {
    let states = df.column(COL_STATE)?.cast(&DataType::Int64)?;
    let present = states.i64()?.into_iter().flatten().any(|s| s == state);
    Ok(present)
}

fn draw(points: &[(f64, f64)], state: i64, year: i32, out_path: &Path) -> Result<()> {
    let (lon_range, lat_range) = bounds(points);

    let root = BitMapBackend::new(out_path, MAP_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;

    let caption = match states::state_name(state) {
        Some(name) => format!("{name} accidents, {year}"),
        None => format!("State {state} accidents, {year}"),
    };

    let mut chart = ChartBuilder::on(&root)
        .caption(caption, ("sans-serif", 26))
        .margin(12)
        .x_label_area_size(42)
        .y_label_area_size(54)
        .build_cartesian_2d(lon_range, lat_range)
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .x_desc("Longitude")
        .y_desc("Latitude")
        .draw()
        .map_err(render_err)?;

    chart
        .draw_series(
            points
                .iter()
                .map(|&(x, y)| Circle::new((x, y), 2, BLACK.filled())),
        )
        .map_err(render_err)?;

    root.present().map_err(render_err)?;
    Ok(())
}

/// Axis ranges scaled to the plotted coordinates, padded on every side.
fn bounds(points: &[(f64, f64)]) -> (Range<f64>, Range<f64>) {
    let mut lon = (f64::INFINITY, f64::NEG_INFINITY);
    let mut lat = (f64::INFINITY, f64::NEG_INFINITY);
    for &(x, y) in points {
        lon.0 = lon.0.min(x);
        lon.1 = lon.1.max(x);
        lat.0 = lat.0.min(y);
        lat.1 = lat.1.max(y);
    }
    (
        lon.0 - MARGIN_DEG..lon.1 + MARGIN_DEG,
        lat.0 - MARGIN_DEG..lat.1 + MARGIN_DEG,
    )
}

fn render_err<E: std::fmt::Display>(err: E) -> Error {
    Error::Render(err.to_string())
}
