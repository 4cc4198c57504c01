//! Acquisition date discovery over a directory of Sentinel-2 exports
//!
//! Exports live in one folder per acquisition, named like
//! `2024-05-01-00_00_2024-05-01-23_59_Sentinel-2_L2A_...`.

use crate::error::{Error, Result};
use chrono::NaiveDate;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Marker identifying product folders
pub const PRODUCT_MARKER: &str = "Sentinel-2_L2A";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Sorted, distinct acquisition dates found under `root`
///
/// # Errors
///
/// Returns an error if `root` cannot be read
pub fn discover_dates(root: &Path) -> Result<Vec<NaiveDate>> {
    let mut dates = BTreeSet::new();

    for dir in product_dirs(root)? {
        let name = dir_name(&dir);
        match parse_date(&name) {
            Some(date) => {
                dates.insert(date);
            }
            None => warn!(dir = %dir.display(), "Skipping product folder without a date prefix"),
        }
    }

    debug!(root = %root.display(), count = dates.len(), "discovered acquisition dates");
    Ok(dates.into_iter().collect())
}

/// Product folder for `date`
///
/// # Errors
///
/// Returns [`Error::NotFound`] if no product folder starts with the date
pub fn date_directory(root: &Path, date: NaiveDate) -> Result<PathBuf> {
    let prefix = date.format(DATE_FORMAT).to_string();

    product_dirs(root)?
        .into_iter()
        .find(|dir| dir_name(dir).starts_with(&prefix))
        .ok_or_else(|| Error::not_found(format!("Directory for date {prefix}"), root))
}

/// Parse a `YYYY-MM-DD` prefix
#[must_use]
pub fn parse_date(name: &str) -> Option<NaiveDate> {
    let prefix = name.get(..10)?;
    NaiveDate::parse_from_str(prefix, DATE_FORMAT).ok()
}

/// Subdirectories carrying the product marker, sorted by name
fn product_dirs(root: &Path) -> Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();
    for entry in std::fs::read_dir(root)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() && entry.file_name().to_string_lossy().contains(PRODUCT_MARKER) {
            dirs.push(entry.path());
        }
    }
    dirs.sort();
    Ok(dirs)
}

fn dir_name(dir: &Path) -> String {
    dir.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::fs;
    use tempfile::TempDir;

    fn product(date: &str) -> String {
        format!("{date}-00_00_{date}-23_59_Sentinel-2_L2A_True_color")
    }

    fn fixture(names: &[&str]) -> TempDir {
        let root = TempDir::new().unwrap();
        for name in names {
            fs::create_dir(root.path().join(name)).unwrap();
        }
        root
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_discover_dates_sorted_and_distinct() {
        let a = product("2025-03-14");
        let b = product("2024-11-02");
        let c = format!("{}_second", product("2024-11-02"));
        let root = fixture(&[&a, &b, &c, "notes", "2024-01-01-unrelated"]);

        let dates = discover_dates(root.path()).unwrap();

        assert_eq!(dates, vec![date(2024, 11, 2), date(2025, 3, 14)]);
    }

    #[test]
    fn test_discover_dates_ignores_files_and_bad_prefixes() {
        let good = product("2024-06-30");
        let root = fixture(&[&good, "misc_Sentinel-2_L2A"]);
        fs::write(root.path().join(product("2024-07-01")), b"not a directory").unwrap();

        let dates = discover_dates(root.path()).unwrap();

        assert_eq!(dates, vec![date(2024, 6, 30)]);
    }

    #[test]
    fn test_discover_dates_empty_root() {
        let root = fixture(&[]);
        assert!(discover_dates(root.path()).unwrap().is_empty());
    }

    #[test]
    fn test_discover_dates_missing_root() {
        let root = fixture(&[]);
        let missing = root.path().join("missing");
        assert_matches!(discover_dates(&missing), Err(Error::Io(_)));
    }

    #[test]
    fn test_date_directory() {
        let name = product("2024-11-02");
        let root = fixture(&[&name, &product("2025-03-14")]);

        let dir = date_directory(root.path(), date(2024, 11, 2)).unwrap();

        assert!(dir.is_dir());
        assert_eq!(dir.file_name().unwrap().to_string_lossy(), name);
    }

    #[test]
    fn test_date_directory_not_found() {
        let root = fixture(&[&product("2024-11-02")]);
        assert_matches!(
            date_directory(root.path(), date(2023, 1, 1)),
            Err(Error::NotFound { .. })
        );
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date(&product("2024-02-29")), Some(date(2024, 2, 29)));
        assert_eq!(parse_date("2023-02-29-00_00"), None);
        assert_eq!(parse_date("short"), None);
    }
}
