//! Report filenames and data-directory discovery.
//!
//! Every report file follows the fixed pattern `accident_<year>.csv.bz2`.
//! Nothing here touches the files themselves; paths are always built from an
//! explicit data directory rather than the process working directory.

use std::path::{Path, PathBuf};

use glob::glob;
use regex::Regex;
use tracing::debug;

use crate::error::{Error, Result};

/// Canonical filename of one year's report.
///
/// Pure in the year: distinct years always map to distinct names.
pub fn report_filename(year: i32) -> String {
    format!("accident_{}.csv.bz2", year)
}

/// Full path of one year's report under `data_dir`.
pub fn report_path(data_dir: &Path, year: i32) -> PathBuf {
    data_dir.join(report_filename(year))
}

/// Scan `data_dir` for report files and return the years they cover.
///
/// Both compressed and plain `accident_<year>.csv` files count; anything
/// else in the directory is ignored. Years come back sorted and deduplicated.
pub fn available_years(data_dir: &Path) -> Result<Vec<i32>> {
    let pattern = data_dir.join("accident_*.csv*");
    let pattern = pattern.to_string_lossy().into_owned();
    let re = Regex::new(r"^accident_(\d+)\.csv(\.bz2)?$").expect("valid report filename pattern");

    let mut years = Vec::new();
    for entry in glob(&pattern).map_err(|e| Error::Discover(e.to_string()))? {
        let path = entry.map_err(|e| Error::Discover(e.to_string()))?;
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if let Some(caps) = re.captures(name) {
            if let Ok(year) = caps[1].parse::<i32>() {
                years.push(year);
            }
        }
    }
    years.sort_unstable();
    years.dedup();
    debug!(count = years.len(), "discovered report years");
    Ok(years)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::fs;

    #[test]
    fn filename_follows_report_convention() {
        assert_eq!(report_filename(2013), "accident_2013.csv.bz2");
        assert_eq!(report_filename(2014), "accident_2014.csv.bz2");
        // no padding or truncation beyond integer formatting
        assert_eq!(report_filename(987), "accident_987.csv.bz2");
    }

    #[test]
    fn path_is_rooted_in_data_dir() {
        let path = report_path(Path::new("/data/fars"), 2015);
        assert_eq!(path, Path::new("/data/fars/accident_2015.csv.bz2"));
    }

    #[test]
    fn discovery_ignores_unrelated_files() -> Result<()> {
        let dir = tempfile::tempdir()?;
        for name in [
            "accident_2014.csv.bz2",
            "accident_2013.csv.bz2",
            "accident_2013.csv",
            "accident_notayear.csv.bz2",
            "readme.txt",
        ] {
            fs::write(dir.path().join(name), b"x")?;
        }

        let years = available_years(dir.path())?;
        assert_eq!(years, vec![2013, 2014]);
        Ok(())
    }

    #[test]
    fn discovery_of_empty_dir_is_empty() -> Result<()> {
        let dir = tempfile::tempdir()?;
        assert!(available_years(dir.path())?.is_empty());
        Ok(())
    }
}
