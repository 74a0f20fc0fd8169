/// Data layer: core types, loading, filtering, and aggregation.
///
/// Architecture:
/// ```text
///  metadata.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file, derive years → PaperDataset (cached by path)
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ PaperDataset  │  Vec<PaperRecord>, schema info, year bounds
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  year-range predicate → FilteredView
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  query    │  aggregate counts/rankings → DashboardBundle
///   └──────────┘
/// ```
pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
pub mod query;
