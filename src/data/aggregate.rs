use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, HashMap};

use super::filter::FilteredView;
use super::model::YearRange;

/// Sentinel category for records missing a value in the counted column.
pub const UNKNOWN_LABEL: &str = "(unknown)";

/// Tokens shorter than this are dropped from word frequencies.
pub const MIN_WORD_LEN: usize = 3;

/// Default ranking length for the top-N aggregators.
pub const TOP_N: usize = 10;

/// Generic English stopwords plus the corpus-wide terms that would
/// otherwise dominate every title ranking.
pub const STOPWORDS: &[&str] = &[
    "the", "and", "of", "in", "to", "a", "for", "on", "with", "by", "an", "at", "from", "as",
    "is", "are", "that", "this", "be", "or", "we", "using", "study", "covid", "19", "sars",
    "coronavirus",
];

// ---------------------------------------------------------------------------
// Per-year counts
// ---------------------------------------------------------------------------

/// Count records per year over the whole `range`, one entry per integer year
/// in ascending order. Years with no records are kept at zero so a time
/// series over the result stays continuous.
pub fn counts_by_year(view: &FilteredView<'_>, range: YearRange) -> Vec<(i32, u64)> {
    let mut counts: BTreeMap<i32, u64> = (range.min..=range.max).map(|y| (y, 0)).collect();
    for year in view.years() {
        if let Some(slot) = counts.get_mut(&year) {
            *slot += 1;
        }
    }
    counts.into_iter().collect()
}

// ---------------------------------------------------------------------------
// Top-N categorical counts
// ---------------------------------------------------------------------------

/// Ranking over one categorical column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnCounts {
    /// The dataset has no such column; distinct from an empty ranking so the
    /// UI can say "no such column" rather than "no data".
    NotApplicable,
    /// `(value, count)` sorted by count descending, at most N entries.
    Ranked(Vec<(String, u64)>),
}

/// Count the values of `column` over the view and keep the `n` most common.
///
/// Records missing the value count under [`UNKNOWN_LABEL`]; absence of the
/// column itself yields [`ColumnCounts::NotApplicable`]. Ties rank in
/// first-encountered order, which keeps the output deterministic.
pub fn top_values(view: &FilteredView<'_>, column: &str, n: usize) -> ColumnCounts {
    if !view.dataset().has_column(column) {
        return ColumnCounts::NotApplicable;
    }

    let values = view.records().map(|rec| {
        rec.field(column)
            .unwrap_or(UNKNOWN_LABEL)
            .to_string()
    });
    ColumnCounts::Ranked(ranked_counts(values, n))
}

// ---------------------------------------------------------------------------
// Title word frequencies
// ---------------------------------------------------------------------------

/// Count stopword-filtered word tokens across all titles in the view and
/// keep the `n` most common. An empty result means no usable title text in
/// the view.
pub fn word_frequencies(
    view: &FilteredView<'_>,
    stopwords: &[&str],
    min_len: usize,
    n: usize,
) -> Vec<(String, u64)> {
    let tokens = view.titles().flat_map(|title| {
        tokenize(title)
            .into_iter()
            .filter(|tok| tok.chars().count() >= min_len)
            .filter(|tok| !stopwords.contains(&tok.as_str()))
    });
    ranked_counts(tokens, n)
}

/// Lowercase `text` and split it into maximal runs of word characters
/// (ASCII letters, digits, underscore).
fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .filter(|tok| !tok.is_empty())
        .map(str::to_string)
        .collect()
}

// ---------------------------------------------------------------------------
// Ranking helper
// ---------------------------------------------------------------------------

/// Count occurrences and rank by count descending, keeping at most `limit`
/// entries. The sort is stable over first-seen order, so ties resolve the
/// same way on every run.
fn ranked_counts(values: impl IntoIterator<Item = String>, limit: usize) -> Vec<(String, u64)> {
    let mut first_seen: Vec<String> = Vec::new();
    let mut counts: HashMap<String, u64> = HashMap::new();

    for value in values {
        match counts.entry(value) {
            Entry::Occupied(mut occupied) => *occupied.get_mut() += 1,
            Entry::Vacant(vacant) => {
                first_seen.push(vacant.key().clone());
                vacant.insert(1);
            }
        }
    }

    let mut ranked: Vec<(String, u64)> = first_seen
        .into_iter()
        .map(|value| {
            let count = counts[&value];
            (value, count)
        })
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(limit);
    ranked
}
