use super::model::{PaperDataset, PaperRecord, YearRange};

// ---------------------------------------------------------------------------
// FilteredView – papers within a year range
// ---------------------------------------------------------------------------

/// Read-only view of the records whose derived year falls inside an
/// inclusive range. Borrows the dataset; built fresh per interaction and
/// never stored across them.
pub struct FilteredView<'a> {
    dataset: &'a PaperDataset,
    indices: Vec<usize>,
    range: YearRange,
}

/// Select the records with a non-null derived year inside `range`.
/// Records without a parseable year never match.
pub fn filter_by_year(dataset: &PaperDataset, range: YearRange) -> FilteredView<'_> {
    let indices = dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| rec.year.is_some_and(|y| range.contains(y)))
        .map(|(i, _)| i)
        .collect();

    FilteredView {
        dataset,
        indices,
        range,
    }
}

impl<'a> FilteredView<'a> {
    pub fn dataset(&self) -> &'a PaperDataset {
        self.dataset
    }

    pub fn range(&self) -> YearRange {
        self.range
    }

    /// Number of matching records.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Matching records in dataset order.
    pub fn records(&self) -> impl Iterator<Item = &'a PaperRecord> + '_ {
        self.indices.iter().map(|&i| &self.dataset.records[i])
    }

    /// Derived years of the matching records (all non-null by construction).
    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.records().filter_map(|rec| rec.year)
    }

    /// Non-null titles of the matching records.
    pub fn titles(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.records().filter_map(|rec| rec.title())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(years: &[Option<i32>]) -> PaperDataset {
        let records = years
            .iter()
            .map(|&year| PaperRecord { year, ..Default::default() })
            .collect();
        PaperDataset::from_records(vec!["publish_time".to_string()], records)
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let ds = dataset(&[Some(2018), Some(2019), Some(2020), Some(2021)]);
        let view = filter_by_year(&ds, YearRange::new(2019, 2020));
        assert_eq!(view.years().collect::<Vec<_>>(), vec![2019, 2020]);
        assert_eq!(view.range(), YearRange::new(2019, 2020));
    }

    #[test]
    fn null_years_are_always_excluded() {
        let ds = dataset(&[Some(2020), None, Some(2020), None]);
        let view = filter_by_year(&ds, YearRange::new(2000, 2030));
        assert_eq!(view.len(), 2);
    }

    #[test]
    fn disjoint_range_yields_empty_view() {
        let ds = dataset(&[Some(2018), Some(2019)]);
        let view = filter_by_year(&ds, YearRange::new(2021, 2022));
        assert!(view.is_empty());
        assert_eq!(view.len(), 0);
    }

    #[test]
    fn view_keeps_dataset_order() {
        let ds = dataset(&[Some(2020), Some(2019), Some(2020)]);
        let view = filter_by_year(&ds, YearRange::new(2019, 2020));
        assert_eq!(view.years().collect::<Vec<_>>(), vec![2020, 2019, 2020]);
    }
}
