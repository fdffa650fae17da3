//! Poverty and inequality indicator pipeline.
//!
//! Loads a long-format `(Year, Indicator Name, Value)` table once per
//! session and derives the dashboard views from it: latest-year snapshot,
//! trend, year-on-year growth, cross-sectional ranking and a pairwise
//! correlation matrix.
//!
//! ```no_run
//! use std::path::Path;
//! use poverty_dash::data::loader::load_file;
//! use poverty_dash::data::metrics::RankOrder;
//! use poverty_dash::data::views::{DashboardQuery, DashboardViews};
//!
//! let dataset = load_file(Path::new("poverty_lka_cleaned.csv"))?;
//! let query = DashboardQuery::initial(&dataset, Some("Gini index"), RankOrder::Descending);
//! let views = DashboardViews::compute(&dataset, &query);
//! for metric in &views.snapshot {
//!     println!("{}: {}", metric.entry.indicator_name, metric.formatted());
//! }
//! # Ok::<(), poverty_dash::error::DataSourceError>(())
//! ```

pub mod data;
pub mod error;
pub mod settings;
