//! Monthly accident counts pivoted by year.

use std::path::Path;

use polars::lazy::dsl::concat;
use polars::prelude::*;
use tracing::info;

use crate::error::Result;
use crate::load::years::load_year_months;
use crate::load::COL_MONTH;

/// Count accidents per (month, year) and reshape to one column per year.
///
/// Years that fail to load are skipped; the year loader logs each one. The
/// result has one row per month observed in any loaded year, sorted
/// ascending, and one Int64 column per loaded year named after it, in
/// request order. A (month, year) combination absent from the data is null,
/// not zero. When no requested year loads at all the result is a frame
/// holding a single empty MONTH column.
pub fn monthly_counts(data_dir: &Path, years: &[i32]) -> Result<DataFrame> {
    let loaded = load_year_months(data_dir, years);

    let mut frames = Vec::new();
    let mut loaded_years = Vec::new();
    for entry in &loaded {
        if let Some(df) = entry.frame() {
            frames.push(df.clone().lazy());
            loaded_years.push(entry.year);
        }
    }

    if frames.is_empty() {
        info!("no report years loaded; returning empty summary");
        let month = Series::new_empty(COL_MONTH.into(), &DataType::Int64);
        return Ok(DataFrame::new(vec![month.into()])?);
    }

    let counts = concat(frames, UnionArgs::default())?
        .group_by([col("year"), col(COL_MONTH)])
        .agg([len().alias("accidents")]);

    // One column per loaded year, aligned on MONTH via full outer joins.
    let mut pivoted = year_column(&counts, loaded_years[0]);
    for &year in &loaded_years[1..] {
        pivoted = pivoted.join(
            year_column(&counts, year),
            [col(COL_MONTH)],
            [col(COL_MONTH)],
            JoinArgs {
                how: JoinType::Full,
                coalesce: JoinCoalesce::CoalesceColumns,
                ..Default::default()
            },
        );
    }

    let df = pivoted
        .sort([COL_MONTH], SortMultipleOptions::default())
        .collect()?;
    Ok(df)
}

/// Project the grouped counts of one year into a (MONTH, "<year>") frame.
fn year_column(counts: &LazyFrame, year: i32) -> LazyFrame {
    counts.clone().filter(col("year").eq(lit(year))).select([
        col(COL_MONTH),
        col("accidents")
            .cast(DataType::Int64)
            .alias(format!("{year}")),
    ])
}
