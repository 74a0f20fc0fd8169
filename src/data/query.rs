use super::aggregate::{
    self, counts_by_year, top_values, word_frequencies, ColumnCounts, STOPWORDS,
};
use super::filter::filter_by_year;
use super::model::{PaperDataset, YearRange, JOURNAL_COLUMN};

/// Word-cloud rankings keep more entries than the table view.
const CLOUD_WORD_LIMIT: usize = 60;

// ---------------------------------------------------------------------------
// Query parameters
// ---------------------------------------------------------------------------

/// One dashboard request: the current year selection plus ranking knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryParams {
    pub range: YearRange,
    pub top_n: usize,
    pub min_word_len: usize,
}

impl QueryParams {
    pub fn new(range: YearRange) -> Self {
        QueryParams {
            range,
            top_n: aggregate::TOP_N,
            min_word_len: aggregate::MIN_WORD_LEN,
        }
    }
}

// ---------------------------------------------------------------------------
// Query result bundle
// ---------------------------------------------------------------------------

/// Everything the dashboard renders for one interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardBundle {
    /// Records matching the year selection.
    pub matched: usize,
    /// Dense per-year counts over the selected range, ascending.
    pub per_year: Vec<(i32, u64)>,
    pub top_journals: ColumnCounts,
    /// Counts over the detected source-like column.
    pub top_sources: ColumnCounts,
    /// Title word frequencies for the table view.
    pub top_words: Vec<(String, u64)>,
    /// Larger word ranking backing the word cloud.
    pub cloud_words: Vec<(String, u64)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
    /// The selection matched nothing; no aggregation was run.
    EmptySelection,
    Ready(DashboardBundle),
}

/// Run one synchronous filter-and-aggregate pass.
///
/// An empty selection short-circuits before any aggregator runs; otherwise
/// every aggregate is computed independently so a missing column degrades
/// only its own output.
pub fn run_query(dataset: &PaperDataset, params: &QueryParams) -> QueryOutcome {
    let view = filter_by_year(dataset, params.range);
    if view.is_empty() {
        return QueryOutcome::EmptySelection;
    }

    // The schema descriptor decides which column aggregations apply.
    let schema = &dataset.schema;

    let top_journals = if schema.has_journal {
        top_values(&view, JOURNAL_COLUMN, params.top_n)
    } else {
        ColumnCounts::NotApplicable
    };
    let top_sources = match &schema.source_column {
        Some(column) => top_values(&view, column, params.top_n),
        None => ColumnCounts::NotApplicable,
    };

    let cloud_words = if schema.has_title {
        word_frequencies(
            &view,
            STOPWORDS,
            params.min_word_len,
            CLOUD_WORD_LIMIT.max(params.top_n),
        )
    } else {
        Vec::new()
    };
    let top_words = cloud_words.iter().take(params.top_n).cloned().collect();

    QueryOutcome::Ready(DashboardBundle {
        matched: view.len(),
        per_year: counts_by_year(&view, params.range),
        top_journals,
        top_sources,
        top_words,
        cloud_words,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::super::model::PaperRecord;
    use super::*;

    fn record(year: Option<i32>, pairs: &[(&str, &str)]) -> PaperRecord {
        let fields: BTreeMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        PaperRecord { year, fields }
    }

    fn covid_dataset() -> PaperDataset {
        PaperDataset::from_records(
            ["title", "journal", "publish_time", "source_x"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            vec![
                record(
                    Some(2020),
                    &[("title", "Covid spread model"), ("journal", "Nature"), ("source_x", "PMC")],
                ),
                record(
                    Some(2020),
                    &[("title", "Vaccine trial results"), ("journal", "Lancet"), ("source_x", "PMC")],
                ),
                record(
                    Some(2021),
                    &[("title", "Another covid study on spread"), ("source_x", "WHO")],
                ),
                record(Some(2018), &[("title", "Unrelated earlier work")]),
                record(None, &[("title", "Undated manuscript")]),
            ],
        )
    }

    #[test]
    fn disjoint_selection_short_circuits() {
        let ds = covid_dataset();
        let outcome = run_query(&ds, &QueryParams::new(YearRange::new(2005, 2009)));
        assert_eq!(outcome, QueryOutcome::EmptySelection);
    }

    #[test]
    fn ready_bundle_covers_every_output() {
        let ds = covid_dataset();
        let outcome = run_query(&ds, &QueryParams::new(YearRange::new(2020, 2021)));
        let QueryOutcome::Ready(bundle) = outcome else {
            panic!("selection matches records");
        };

        assert_eq!(bundle.matched, 3);
        assert_eq!(bundle.per_year, vec![(2020, 2), (2021, 1)]);

        let ColumnCounts::Ranked(journals) = &bundle.top_journals else {
            panic!("journal column exists");
        };
        // The 2021 paper has no journal: it counts as (unknown).
        assert!(journals.contains(&("Nature".to_string(), 1)));
        assert!(journals.contains(&("(unknown)".to_string(), 1)));

        let ColumnCounts::Ranked(sources) = &bundle.top_sources else {
            panic!("source_x column exists");
        };
        assert_eq!(sources.first(), Some(&("PMC".to_string(), 2)));

        assert_eq!(bundle.top_words.first(), Some(&("spread".to_string(), 2)));
        assert!(bundle.cloud_words.len() >= bundle.top_words.len());
    }

    #[test]
    fn missing_source_column_degrades_only_that_output() {
        let ds = PaperDataset::from_records(
            vec!["title".to_string(), "journal".to_string(), "publish_time".to_string()],
            vec![record(Some(2020), &[("title", "Viral load"), ("journal", "BMJ")])],
        );
        let QueryOutcome::Ready(bundle) =
            run_query(&ds, &QueryParams::new(YearRange::new(2020, 2020)))
        else {
            panic!("selection matches records");
        };

        assert_eq!(bundle.top_sources, ColumnCounts::NotApplicable);
        assert!(matches!(bundle.top_journals, ColumnCounts::Ranked(_)));
    }

    #[test]
    fn missing_journal_column_is_not_applicable() {
        let ds = PaperDataset::from_records(
            vec!["title".to_string(), "publish_time".to_string()],
            vec![record(Some(2020), &[("title", "Viral load")])],
        );
        let QueryOutcome::Ready(bundle) =
            run_query(&ds, &QueryParams::new(YearRange::new(2020, 2020)))
        else {
            panic!("selection matches records");
        };
        assert_eq!(bundle.top_journals, ColumnCounts::NotApplicable);
    }

    #[test]
    fn repeated_queries_are_deterministic() {
        let ds = covid_dataset();
        let params = QueryParams::new(YearRange::new(2018, 2021));
        assert_eq!(run_query(&ds, &params), run_query(&ds, &params));
    }
}
