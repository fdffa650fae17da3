use std::collections::BTreeSet;

use crate::error::InsufficientDataError;

use super::category::IndicatorCategory;
use super::correlation::{correlation_matrix, CorrelationMatrix};
use super::filter::FilteredTable;
use super::metrics::{
    growth_rates, rank, snapshot, trend_series, GrowthPoint, RankEntry, RankOrder, SnapshotEntry,
    TrendSeries,
};
use super::model::{IndicatorDataset, YearRange};

// ---------------------------------------------------------------------------
// Query: everything the presentation layer can choose
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardQuery {
    pub year_range: YearRange,
    pub indicators: BTreeSet<String>,
    /// `None` ranks the dataset's latest year.
    pub ranking_year: Option<i32>,
    pub rank_order: RankOrder,
}

impl DashboardQuery {
    /// Full year span, `default_indicator` selected (or the first indicator
    /// if the dataset lacks it), ranking on the latest year.
    pub fn initial(
        dataset: &IndicatorDataset,
        default_indicator: Option<&str>,
        rank_order: RankOrder,
    ) -> Self {
        let year_range = dataset
            .year_bounds()
            .unwrap_or_else(|| YearRange::new(0, 0));
        let chosen = default_indicator
            .filter(|name| dataset.has_indicator(name))
            .or_else(|| dataset.indicators().first().map(String::as_str));

        DashboardQuery {
            year_range,
            indicators: chosen.into_iter().map(str::to_string).collect(),
            ranking_year: dataset.max_year(),
            rank_order,
        }
    }
}

// ---------------------------------------------------------------------------
// Views: everything the presentation layer renders
// ---------------------------------------------------------------------------

/// Snapshot metric annotated with its category for formatting.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotMetric {
    pub entry: SnapshotEntry,
    pub category: IndicatorCategory,
}

impl SnapshotMetric {
    pub fn formatted(&self) -> String {
        self.category.format_value(self.entry.value)
    }
}

/// One recomputation pass over the dataset.
///
/// Each field is computed independently; the correlation's failure is kept
/// as a value so it never hides the other views.
#[derive(Debug, Clone)]
pub struct DashboardViews {
    pub snapshot: Vec<SnapshotMetric>,
    pub filtered: FilteredTable,
    pub trend: Vec<TrendSeries>,
    pub growth: Vec<GrowthPoint>,
    pub ranking_year: Option<i32>,
    pub ranking: Vec<RankEntry>,
    pub correlation: Result<CorrelationMatrix, InsufficientDataError>,
}

impl DashboardViews {
    pub fn compute(dataset: &IndicatorDataset, query: &DashboardQuery) -> Self {
        let filtered = dataset.filter(query.year_range, &query.indicators);
        let ranking_year = query.ranking_year.or_else(|| dataset.max_year());

        let views = DashboardViews {
            snapshot: snapshot(dataset, &query.indicators)
                .into_iter()
                .map(|entry| SnapshotMetric {
                    category: IndicatorCategory::classify(&entry.indicator_name),
                    entry,
                })
                .collect(),
            trend: trend_series(&filtered),
            growth: growth_rates(&filtered),
            ranking: ranking_year
                .map(|year| rank(dataset, year, query.rank_order))
                .unwrap_or_default(),
            ranking_year,
            correlation: correlation_matrix(dataset, query.year_range, &query.indicators),
            filtered,
        };
        log::debug!(
            "Recomputed views: {} rows, {} growth points, {} ranked",
            views.filtered.len(),
            views.growth.len(),
            views.ranking.len()
        );
        views
    }

    /// True when the current selection matched no rows.
    pub fn is_empty_selection(&self) -> bool {
        self.filtered.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Observation;

    fn dataset() -> IndicatorDataset {
        IndicatorDataset::from_observations(vec![
            Observation::new(2016, "Gini index", Some(39.8)),
            Observation::new(2016, "Income share held by lowest 20%", Some(7.0)),
            Observation::new(2019, "Gini index", Some(37.7)),
            Observation::new(2019, "Income share held by lowest 20%", Some(7.4)),
        ])
    }

    #[test]
    fn initial_query_prefers_default_indicator() {
        let ds = dataset();
        let q = DashboardQuery::initial(
            &ds,
            Some("Income share held by lowest 20%"),
            RankOrder::Descending,
        );
        assert_eq!(q.year_range, YearRange::new(2016, 2019));
        assert!(q.indicators.contains("Income share held by lowest 20%"));
        assert_eq!(q.ranking_year, Some(2019));

        let q = DashboardQuery::initial(&ds, Some("Not there"), RankOrder::Ascending);
        assert_eq!(q.indicators.iter().next().map(String::as_str), Some("Gini index"));
    }

    #[test]
    fn computes_every_view() {
        let ds = dataset();
        let mut q = DashboardQuery::initial(&ds, None, RankOrder::Descending);
        q.indicators = ds.indicators().iter().cloned().collect();
        let views = DashboardViews::compute(&ds, &q);

        assert_eq!(views.filtered.len(), 4);
        assert_eq!(views.snapshot.len(), 2);
        assert_eq!(views.snapshot[1].formatted(), "7.40%");
        assert_eq!(views.trend.len(), 2);
        assert_eq!(views.growth.len(), 2);
        assert_eq!(views.ranking[0].indicator_name, "Gini index");
        let m = views.correlation.unwrap();
        assert_eq!(m.len(), 2);
    }

    #[test]
    fn empty_selection_is_not_an_error() {
        let ds = dataset();
        let mut q = DashboardQuery::initial(&ds, None, RankOrder::Descending);
        q.indicators.clear();
        let views = DashboardViews::compute(&ds, &q);

        assert!(views.is_empty_selection());
        assert!(views.snapshot.is_empty());
        assert!(views.trend.is_empty());
        assert!(views.growth.is_empty());
        assert!(views.correlation.unwrap().is_empty());
        // Ranking is cross-sectional and ignores the indicator selection.
        assert_eq!(views.ranking.len(), 2);
    }

    #[test]
    fn correlation_failure_leaves_other_views_intact() {
        let ds = IndicatorDataset::from_observations(vec![
            Observation::new(2000, "A", Some(1.0)),
            Observation::new(2001, "B", Some(2.0)),
            Observation::new(2002, "B", Some(3.0)),
        ]);
        let mut q = DashboardQuery::initial(&ds, None, RankOrder::Descending);
        q.indicators = ds.indicators().iter().cloned().collect();
        let views = DashboardViews::compute(&ds, &q);

        assert!(views.correlation.is_err());
        assert_eq!(views.growth.len(), 1);
        assert_eq!(views.filtered.len(), 3);
    }
}
