//! Batch loading of the (MONTH, year) projection for a range of years.

use std::path::Path;

use polars::prelude::*;
use tracing::warn;

use super::{read_report, COL_MONTH};
use crate::error::Result;
use crate::files;

/// Outcome of loading one requested year: the (MONTH, year) projection on
/// success, or the reason the year could not be loaded.
#[derive(Debug)]
pub struct YearMonths {
    pub year: i32,
    pub outcome: Result<DataFrame>,
}

impl YearMonths {
    pub fn frame(&self) -> Option<&DataFrame> {
        self.outcome.as_ref().ok()
    }
}

/// Load the (MONTH, year) projection for each requested year.
///
/// The result has exactly one entry per input year, in input order. A year
/// that fails to load (missing file, parse error, bad schema) stays in place
/// as a failed outcome and is logged with a warning; one bad year never
/// aborts the batch.
pub fn load_year_months(data_dir: &Path, years: &[i32]) -> Vec<YearMonths> {
    years
        .iter()
        .map(|&year| {
            let outcome = load_one(data_dir, year);
            if let Err(err) = &outcome {
                warn!(year, %err, "skipping report year");
            }
            YearMonths { year, outcome }
        })
        .collect()
}

fn load_one(data_dir: &Path, year: i32) -> Result<DataFrame> {
    let path = files::report_path(data_dir, year);
    let df = read_report(&path)?;
    // The parsed YEAR column is dropped in favour of the requested year.
    let df = df
        .lazy()
        .with_column(lit(year).alias("year"))
        .select([col(COL_MONTH), col("year")])
        .collect()?;
    Ok(df)
}
