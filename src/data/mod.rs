/// Data layer: core types, loading, and the derived-view pipeline.
///
/// Architecture:
/// ```text
///   long-format .csv  (Year, Indicator Name, Value)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse + validate → IndicatorDataset
///   └──────────┘
///        │            (held by cache, shared read-only)
///        ▼
///   ┌─────────────────┐
///   │ IndicatorDataset │  Vec<Observation>, year / indicator index
///   └─────────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  year range × indicator set → FilteredTable
///   └──────────┘
///        │
///        ▼
///   metrics (snapshot, growth, ranking, trend) · correlation
///        │
///        ▼
///   views: DashboardQuery → DashboardViews
/// ```

pub mod cache;
pub mod category;
pub mod correlation;
pub mod filter;
pub mod loader;
pub mod metrics;
pub mod model;
pub mod views;
