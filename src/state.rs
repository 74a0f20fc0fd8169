use std::path::Path;
use std::sync::Arc;

use crate::data::loader::load_cached;
use crate::data::model::{PaperDataset, YearRange};
use crate::data::query::{run_query, QueryOutcome, QueryParams};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until a file is loaded).
    pub dataset: Option<Arc<PaperDataset>>,

    /// Current year selection. None while no dataset is loaded or the
    /// dataset has no parseable publication years.
    pub year_range: Option<YearRange>,

    /// Whether the raw-data preview table is shown.
    pub show_raw: bool,

    /// Result of the last filter-and-aggregate pass (cached until the next
    /// control change).
    pub outcome: Option<QueryOutcome>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Whether a file loading operation is in progress.
    pub loading: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            year_range: None,
            show_raw: false,
            outcome: None,
            status_message: None,
            loading: false,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded dataset: select its full year span and run the
    /// first query.
    pub fn set_dataset(&mut self, dataset: Arc<PaperDataset>) {
        self.year_range = dataset.year_bounds.map(|(lo, hi)| YearRange::new(lo, hi));
        self.dataset = Some(dataset);
        self.status_message = None;
        self.loading = false;
        self.requery();
    }

    /// Recompute the dashboard bundle for the current selection.
    pub fn requery(&mut self) {
        self.outcome = match (&self.dataset, self.year_range) {
            (Some(dataset), Some(range)) => Some(run_query(dataset, &QueryParams::new(range))),
            _ => None,
        };
    }

    /// Apply a new year selection from the sliders.
    pub fn set_year_range(&mut self, range: YearRange) {
        if self.year_range != Some(range) {
            self.year_range = Some(range);
            self.requery();
        }
    }

    /// Load (or re-use the cached copy of) a metadata CSV.
    pub fn load_from_path(&mut self, path: &Path) {
        self.loading = true;
        match load_cached(path) {
            Ok(dataset) => {
                log::info!(
                    "showing {} papers, year bounds {:?}",
                    dataset.len(),
                    dataset.year_bounds
                );
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("failed to load dataset: {e:?}");
                self.status_message = Some(format!("Error: {e}"));
                self.loading = false;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use crate::data::model::PaperRecord;

    use super::*;

    fn dataset(years: &[Option<i32>]) -> Arc<PaperDataset> {
        let records = years
            .iter()
            .map(|&year| PaperRecord { year, fields: BTreeMap::new() })
            .collect();
        Arc::new(PaperDataset::from_records(
            vec!["title".to_string(), "publish_time".to_string()],
            records,
        ))
    }

    #[test]
    fn set_dataset_selects_full_year_span() {
        let mut state = AppState::default();
        state.set_dataset(dataset(&[Some(2018), Some(2021), None]));
        assert_eq!(state.year_range, Some(YearRange::new(2018, 2021)));
        assert!(matches!(state.outcome, Some(QueryOutcome::Ready(_))));
    }

    #[test]
    fn dataset_without_years_yields_no_outcome() {
        let mut state = AppState::default();
        state.set_dataset(dataset(&[None, None]));
        assert_eq!(state.year_range, None);
        assert!(state.outcome.is_none());
    }

    #[test]
    fn narrowing_to_an_empty_selection_reports_it() {
        let mut state = AppState::default();
        state.set_dataset(dataset(&[Some(2018), Some(2021)]));
        state.set_year_range(YearRange::new(2019, 2020));
        assert_eq!(state.outcome, Some(QueryOutcome::EmptySelection));
    }

    #[test]
    fn load_failure_sets_status_message() {
        let mut state = AppState::default();
        state.load_from_path(Path::new("/nope/metadata.csv"));
        assert!(state.status_message.as_deref().unwrap_or("").starts_with("Error:"));
        assert!(state.dataset.is_none());
        assert!(!state.loading);
    }
}
