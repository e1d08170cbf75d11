//! Reading report files into polars frames.

use std::fs;
use std::io::{Cursor, Read};
use std::path::Path;

use bzip2::read::BzDecoder;
use polars::prelude::*;
use tracing::debug;

use crate::error::{Error, Result};

pub mod years;

/// Column names of the report format this crate touches. The longitude
/// column really is spelled without the trailing "E" in the source data.
pub const COL_MONTH: &str = "MONTH";
pub const COL_YEAR: &str = "YEAR";
pub const COL_STATE: &str = "STATE";
pub const COL_LATITUDE: &str = "LATITUDE";
pub const COL_LONGITUDE: &str = "LONGITUD";

const REQUIRED_COLUMNS: [&str; 5] = [COL_MONTH, COL_YEAR, COL_STATE, COL_LATITUDE, COL_LONGITUDE];

const INFER_SCHEMA_ROWS: usize = 1000;

/// Read one report file into a frame.
///
/// Fails with [`Error::FileNotFound`] if `path` does not exist and with
/// [`Error::SchemaMismatch`] if any of the columns this crate relies on is
/// absent. Compression is detected from the extension: a `.bz2` file is
/// decompressed in memory first, anything else is read as plain delimited
/// text. Column names and inferred dtypes are preserved as parsed.
pub fn read_report(path: &Path) -> Result<DataFrame> {
    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let raw = fs::read(path)?;
    let bytes = if path.extension().and_then(|e| e.to_str()) == Some("bz2") {
        let mut decoded = Vec::with_capacity(raw.len() * 4);
        BzDecoder::new(Cursor::new(raw)).read_to_end(&mut decoded)?;
        decoded
    } else {
        raw
    };

    let opts = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(INFER_SCHEMA_ROWS));
    let df = opts
        .into_reader_with_file_handle(Cursor::new(bytes))
        .finish()?;

    validate_schema(path, &df)?;
    debug!(path = %path.display(), rows = df.height(), "loaded report");
    Ok(df)
}

fn validate_schema(path: &Path, df: &DataFrame) -> Result<()> {
    let names = df.get_column_names();
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|c| !names.iter().any(|n| n.as_str() == **c))
        .map(|c| c.to_string())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(Error::SchemaMismatch {
            path: path.to_path_buf(),
            missing,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use bzip2::write::BzEncoder;
    use bzip2::Compression;
    use std::fs;
    use std::io::Write;
    use std::path::PathBuf;

    const SAMPLE: &str = "\
STATE,MONTH,YEAR,LATITUDE,LONGITUD,FATALS
1,1,2013,32.641064,-85.354692,1
1,2,2013,33.448697,-86.092147,2
6,2,2013,34.049183,-118.296864,1
6,3,2013,99.9999,999.0,1
";

    fn write_plain(dir: &Path, name: &str, content: &str) -> Result<PathBuf> {
        let path = dir.join(name);
        fs::write(&path, content)?;
        Ok(path)
    }

    fn write_bz2(dir: &Path, name: &str, content: &str) -> Result<PathBuf> {
        let path = dir.join(name);
        let file = fs::File::create(&path)?;
        let mut encoder = BzEncoder::new(file, Compression::best());
        encoder.write_all(content.as_bytes())?;
        encoder.finish()?;
        Ok(path)
    }

    #[test]
    fn missing_file_is_file_not_found() {
        let err = read_report(Path::new("/nonexistent/accident_1999.csv.bz2")).unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }

    #[test]
    fn plain_csv_loads_all_rows() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = write_plain(dir.path(), "accident_2013.csv", SAMPLE)?;

        let df = read_report(&path)?;
        assert_eq!(df.height(), 4);
        for col in REQUIRED_COLUMNS {
            assert!(df.column(col).is_ok(), "missing column {col}");
        }
        Ok(())
    }

    #[test]
    fn bz2_round_trips_the_same_rows() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let plain = write_plain(dir.path(), "accident_2013.csv", SAMPLE)?;
        let packed = write_bz2(dir.path(), "accident_2013.csv.bz2", SAMPLE)?;

        let expected = read_report(&plain)?;
        let actual = read_report(&packed)?;
        assert_eq!(actual.height(), expected.height());
        assert_eq!(
            actual.column(COL_MONTH)?.i64()?.sum(),
            expected.column(COL_MONTH)?.i64()?.sum()
        );
        Ok(())
    }

    #[test]
    fn missing_columns_fail_fast() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = write_plain(
            dir.path(),
            "accident_2013.csv",
            "MONTH,YEAR,LONGITUD\n1,2013,-85.1\n",
        )?;

        let err = read_report(&path).unwrap_err();
        match err {
            Error::SchemaMismatch { missing, .. } => {
                assert_eq!(missing, vec!["STATE".to_string(), "LATITUDE".to_string()]);
            }
            other => panic!("expected SchemaMismatch, got {other}"),
        }
        Ok(())
    }
}
