use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use chrono::{Datelike, NaiveDate};
use thiserror::Error;

use super::model::{PaperDataset, PaperRecord, PUBLISH_TIME_COLUMN};

/// Default input file, looked up in the working directory at startup.
pub const DEFAULT_DATA_PATH: &str = "metadata.csv";

// Derived years outside this window are treated as parse garbage.
const YEAR_MIN: i32 = 1000;
const YEAR_MAX: i32 = 9999;

// ---------------------------------------------------------------------------
// LoadError
// ---------------------------------------------------------------------------

/// A dataset could not be loaded at all. Everything row-level (blank cells,
/// unparseable timestamps) degrades per record instead of failing the load.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path} as CSV")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("{path} has no header row")]
    NoHeader { path: PathBuf },
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Parse a metadata CSV into a [`PaperDataset`].
///
/// The header row names the columns; blank cells become missing fields and
/// each row's publication year is derived from `publish_time` once, here.
pub fn load_file(path: &Path) -> Result<PaperDataset, LoadError> {
    let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = csv::Reader::from_reader(file);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|source| LoadError::Csv {
            path: path.to_path_buf(),
            source,
        })?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    if headers.iter().all(|h| h.is_empty()) {
        return Err(LoadError::NoHeader {
            path: path.to_path_buf(),
        });
    }

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result.map_err(|source| LoadError::Csv {
            path: path.to_path_buf(),
            source,
        })?;

        let mut fields = BTreeMap::new();
        for (idx, cell) in row.iter().enumerate() {
            let cell = cell.trim();
            if cell.is_empty() {
                continue;
            }
            if let Some(name) = headers.get(idx) {
                fields.insert(name.clone(), cell.to_string());
            }
        }

        let year = fields.get(PUBLISH_TIME_COLUMN).and_then(|t| derive_year(t));
        records.push(PaperRecord { year, fields });
    }

    Ok(PaperDataset::from_records(headers, records))
}

/// Derive the publication year from a `publish_time` cell.
///
/// Accepts full ISO dates (`2020-03-15`), month precision (`2020-03`) and
/// bare years (`2020`); trailing free text after whitespace is ignored, so
/// `2020 Apr 7` also yields 2020. Anything else is `None`.
pub fn derive_year(raw: &str) -> Option<i32> {
    let text = raw.split_whitespace().next()?;

    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return in_bounds(date.year());
    }

    // Month and year-only precision carry no day, which NaiveDate cannot
    // represent; validate the pieces by hand and keep the year.
    let (year_part, month_part) = match text.split_once('-') {
        Some((y, rest)) => (y, Some(rest)),
        None => (text, None),
    };
    if year_part.len() != 4 {
        return None;
    }
    let year: i32 = year_part.parse().ok()?;
    if let Some(month_part) = month_part {
        let month: u32 = month_part.parse().ok()?;
        if !(1..=12).contains(&month) {
            return None;
        }
    }
    in_bounds(year)
}

fn in_bounds(year: i32) -> Option<i32> {
    (YEAR_MIN..=YEAR_MAX).contains(&year).then_some(year)
}

// ---------------------------------------------------------------------------
// Process-wide dataset cache
// ---------------------------------------------------------------------------

static DATASET_CACHE: OnceLock<Mutex<HashMap<PathBuf, Arc<PaperDataset>>>> = OnceLock::new();

fn cache() -> &'static Mutex<HashMap<PathBuf, Arc<PaperDataset>>> {
    DATASET_CACHE.get_or_init(|| Mutex::new(HashMap::new()))
}

/// Load a dataset, reusing the in-memory copy for a path already seen in
/// this process. The file is assumed static for the process lifetime; load
/// failures are not cached.
pub fn load_cached(path: &Path) -> Result<Arc<PaperDataset>, LoadError> {
    if let Some(dataset) = cache()
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get(path)
    {
        log::debug!("dataset cache hit for {}", path.display());
        return Ok(Arc::clone(dataset));
    }

    let dataset = Arc::new(load_file(path)?);
    log::info!(
        "loaded {} papers ({} columns) from {}",
        dataset.len(),
        dataset.column_names.len(),
        path.display()
    );
    cache()
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .insert(path.to_path_buf(), Arc::clone(&dataset));
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    fn write_csv(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{contents}").unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn derive_year_accepts_common_precisions() {
        assert_eq!(derive_year("2020-03-15"), Some(2020));
        assert_eq!(derive_year("2020-03"), Some(2020));
        assert_eq!(derive_year("2020"), Some(2020));
        assert_eq!(derive_year(" 2019-12-31 "), Some(2019));
        assert_eq!(derive_year("2020 Apr 7"), Some(2020));
    }

    #[test]
    fn derive_year_rejects_garbage() {
        assert_eq!(derive_year(""), None);
        assert_eq!(derive_year("n.d."), None);
        assert_eq!(derive_year("03-2020"), None);
        assert_eq!(derive_year("2020-13"), None);
        assert_eq!(derive_year("soon"), None);
    }

    #[test]
    fn derive_year_is_idempotent() {
        for raw in ["2020-03-15", "2020", "garbage", ""] {
            assert_eq!(derive_year(raw), derive_year(raw));
        }
    }

    #[test]
    fn load_parses_rows_and_derives_years() {
        let file = write_csv(
            "title,journal,publish_time\n\
             Viral dynamics,Nature,2020-05-01\n\
             Old result,,1998\n\
             Undated paper,Cell,not-a-date\n",
        );
        let ds = load_file(file.path()).unwrap();

        assert_eq!(ds.len(), 3);
        assert_eq!(ds.column_names, vec!["title", "journal", "publish_time"]);
        assert_eq!(ds.records[0].year, Some(2020));
        assert_eq!(ds.records[1].year, Some(1998));
        assert_eq!(ds.records[2].year, None);
        assert_eq!(ds.year_bounds, Some((1998, 2020)));

        // Blank journal cell is a missing field, not an empty string.
        assert_eq!(ds.records[1].field("journal"), None);
        assert_eq!(ds.records[2].field("journal"), Some("Cell"));
    }

    #[test]
    fn load_missing_file_is_an_io_error() {
        let err = load_file(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn load_cached_returns_the_same_dataset() {
        let file = write_csv("title,publish_time\nA,2020\nB,2021\n");

        let first = load_cached(file.path()).unwrap();
        let second = load_cached(file.path()).unwrap();

        // Same allocation, not just equal contents.
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.len(), 2);
    }
}
