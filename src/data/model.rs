use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// Well-known column names
// ---------------------------------------------------------------------------

pub const TITLE_COLUMN: &str = "title";
pub const JOURNAL_COLUMN: &str = "journal";
pub const PUBLISH_TIME_COLUMN: &str = "publish_time";

// ---------------------------------------------------------------------------
// PaperRecord – one row of the metadata table
// ---------------------------------------------------------------------------

/// A single paper (one row of the source CSV).
///
/// `fields` holds only the cells that carried a non-empty value; a missing
/// key means the cell was blank or the column absent. Missing values are a
/// normal state of the data, not an error.
#[derive(Debug, Clone, Default)]
pub struct PaperRecord {
    /// Publication year derived from `publish_time` once at load time.
    /// `None` when the timestamp was absent or unparseable.
    pub year: Option<i32>,
    /// Column name → non-empty cell text.
    pub fields: BTreeMap<String, String>,
}

impl PaperRecord {
    /// Cell text for a column, `None` when the value is missing.
    pub fn field(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }

    pub fn title(&self) -> Option<&str> {
        self.field(TITLE_COLUMN)
    }
}

// ---------------------------------------------------------------------------
// SchemaInfo – which optional columns this dataset actually has
// ---------------------------------------------------------------------------

/// Capability descriptor fixed at load time. Aggregators consult this
/// instead of re-probing column names on every interaction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaInfo {
    pub has_title: bool,
    pub has_journal: bool,
    pub has_publish_time: bool,
    /// First column (in header order) whose name contains "source",
    /// case-insensitively. `None` when no such column exists.
    pub source_column: Option<String>,
}

impl SchemaInfo {
    pub fn detect(column_names: &[String]) -> Self {
        SchemaInfo {
            has_title: column_names.iter().any(|c| c == TITLE_COLUMN),
            has_journal: column_names.iter().any(|c| c == JOURNAL_COLUMN),
            has_publish_time: column_names.iter().any(|c| c == PUBLISH_TIME_COLUMN),
            source_column: column_names
                .iter()
                .find(|c| c.to_ascii_lowercase().contains("source"))
                .cloned(),
        }
    }
}

// ---------------------------------------------------------------------------
// YearRange – inclusive publication-year interval
// ---------------------------------------------------------------------------

/// Inclusive year interval. `min <= max` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    pub min: i32,
    pub max: i32,
}

impl YearRange {
    /// Build a range from two endpoints in either order.
    pub fn new(a: i32, b: i32) -> Self {
        YearRange {
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub fn contains(&self, year: i32) -> bool {
        (self.min..=self.max).contains(&year)
    }

    /// Number of integer years covered by the range.
    pub fn span(&self) -> usize {
        (self.max - self.min) as usize + 1
    }
}

// ---------------------------------------------------------------------------
// PaperDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset with indices computed once at load.
#[derive(Debug, Clone)]
pub struct PaperDataset {
    /// All papers (rows), in file order.
    pub records: Vec<PaperRecord>,
    /// Column names in CSV-header order.
    pub column_names: Vec<String>,
    /// Which optional columns are present.
    pub schema: SchemaInfo,
    /// Observed (min, max) derived year, `None` when no record has one.
    pub year_bounds: Option<(i32, i32)>,
}

impl PaperDataset {
    /// Build the dataset and its derived indices from parsed rows.
    pub fn from_records(column_names: Vec<String>, records: Vec<PaperRecord>) -> Self {
        let schema = SchemaInfo::detect(&column_names);

        let mut year_bounds: Option<(i32, i32)> = None;
        for year in records.iter().filter_map(|r| r.year) {
            year_bounds = Some(match year_bounds {
                Some((lo, hi)) => (lo.min(year), hi.max(year)),
                None => (year, year),
            });
        }

        PaperDataset {
            records,
            column_names,
            schema,
            year_bounds,
        }
    }

    /// Number of papers.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_names.iter().any(|c| c == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn schema_detects_known_columns() {
        let schema = SchemaInfo::detect(&cols(&["title", "journal", "publish_time"]));
        assert!(schema.has_title);
        assert!(schema.has_journal);
        assert!(schema.has_publish_time);
        assert_eq!(schema.source_column, None);
    }

    #[test]
    fn schema_picks_first_source_like_column_case_insensitively() {
        let schema = SchemaInfo::detect(&cols(&["title", "Source_X", "data_source"]));
        assert_eq!(schema.source_column.as_deref(), Some("Source_X"));
    }

    #[test]
    fn schema_without_source_like_column() {
        let schema = SchemaInfo::detect(&cols(&["title", "journal"]));
        assert_eq!(schema.source_column, None);
    }

    #[test]
    fn year_range_orders_endpoints_and_is_inclusive() {
        let range = YearRange::new(2021, 2019);
        assert_eq!(range, YearRange { min: 2019, max: 2021 });
        assert!(range.contains(2019));
        assert!(range.contains(2021));
        assert!(!range.contains(2022));
        assert_eq!(range.span(), 3);
    }

    #[test]
    fn dataset_year_bounds_skip_null_years() {
        let records = vec![
            PaperRecord { year: Some(2020), ..Default::default() },
            PaperRecord { year: None, ..Default::default() },
            PaperRecord { year: Some(2017), ..Default::default() },
        ];
        let ds = PaperDataset::from_records(cols(&["title"]), records);
        assert_eq!(ds.year_bounds, Some((2017, 2020)));
        assert_eq!(ds.len(), 3);
        assert!(!ds.is_empty());
    }

    #[test]
    fn dataset_without_years_has_no_bounds() {
        let ds = PaperDataset::from_records(cols(&["title"]), vec![PaperRecord::default()]);
        assert_eq!(ds.year_bounds, None);
    }
}
