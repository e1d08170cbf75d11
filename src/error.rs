//! Typed failure kinds for report loading, summarizing, and mapping.
//!
//! Library code returns [`Error`] so callers can tell a missing report file
//! apart from a malformed one or a bad state code; the CLI binary wraps
//! everything in `anyhow` at the top level.

use std::path::PathBuf;

use polars::prelude::PolarsError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The requested report file does not exist.
    #[error("report file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// A report parsed, but lacks columns this crate relies on.
    #[error("report {} is missing expected columns: {missing:?}", path.display())]
    SchemaMismatch { path: PathBuf, missing: Vec<String> },

    /// The state code does not occur in the requested year's report.
    #[error("invalid state code {state}: not present in the {year} report")]
    InvalidState { state: i64, year: i32 },

    /// Reading or reshaping tabular data failed.
    #[error("report data error: {0}")]
    Parse(#[from] PolarsError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Scanning the data directory for report files failed.
    #[error("failed to scan data directory: {0}")]
    Discover(String),

    /// Drawing the map failed.
    #[error("failed to render map: {0}")]
    Render(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_input() {
        let err = Error::FileNotFound {
            path: PathBuf::from("accident_1999.csv.bz2"),
        };
        assert!(err.to_string().contains("accident_1999.csv.bz2"));

        let err = Error::InvalidState {
            state: 99,
            year: 2013,
        };
        let msg = err.to_string();
        assert!(msg.contains("99"));
        assert!(msg.contains("2013"));
    }

    #[test]
    fn schema_mismatch_lists_missing_columns() {
        let err = Error::SchemaMismatch {
            path: PathBuf::from("accident_2013.csv.bz2"),
            missing: vec!["STATE".into(), "LATITUDE".into()],
        };
        let msg = err.to_string();
        assert!(msg.contains("STATE"));
        assert!(msg.contains("LATITUDE"));
    }
}
