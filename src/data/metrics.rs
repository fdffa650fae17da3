use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use super::model::{IndicatorDataset, Observation};

// ---------------------------------------------------------------------------
// Aggregation helpers
// ---------------------------------------------------------------------------

/// Arithmetic mean of the present values; `None` if there are none.
pub fn mean_of<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = Option<f64>>,
{
    let (sum, count) = values
        .into_iter()
        .flatten()
        .fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    (count > 0).then(|| sum / count as f64)
}

/// Group rows by indicator, groups in first-appearance order.
fn group_by_indicator(rows: &[Observation]) -> Vec<(&str, Vec<&Observation>)> {
    let mut slot: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&str, Vec<&Observation>)> = Vec::new();
    for obs in rows {
        let name = obs.indicator_name.as_str();
        let idx = *slot.entry(name).or_insert_with(|| {
            groups.push((name, Vec::new()));
            groups.len() - 1
        });
        groups[idx].1.push(obs);
    }
    groups
}

// ---------------------------------------------------------------------------
// Latest value / snapshot
// ---------------------------------------------------------------------------

/// Mean of all non-missing values recorded for `(year, indicator)`.
///
/// Duplicate rows for the same pair are averaged. `None` when nothing
/// matches or every match is missing.
pub fn latest_value(dataset: &IndicatorDataset, year: i32, indicator: &str) -> Option<f64> {
    mean_of(
        dataset
            .observations()
            .iter()
            .filter(|o| o.year == year && o.indicator_name == indicator)
            .map(|o| o.value),
    )
}

/// One snapshot metric: an indicator's value at the dataset's latest year.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotEntry {
    pub indicator_name: String,
    pub year: i32,
    pub value: Option<f64>,
}

/// Latest-year value for each selected indicator.
///
/// Indicators the dataset knows come first, in dataset order; requested names
/// it has never seen follow in request order with a missing value.
pub fn snapshot<'a, I>(dataset: &IndicatorDataset, selected: I) -> Vec<SnapshotEntry>
where
    I: IntoIterator<Item = &'a String>,
{
    let Some(year) = dataset.max_year() else {
        return Vec::new();
    };
    let selected: Vec<&String> = selected.into_iter().collect();
    let known = dataset
        .indicators()
        .iter()
        .filter(|name| selected.contains(name))
        .map(|name| SnapshotEntry {
            indicator_name: name.clone(),
            year,
            value: latest_value(dataset, year, name),
        });

    let mut unknown: Vec<&String> = Vec::new();
    for name in &selected {
        if !dataset.has_indicator(name) && !unknown.contains(name) {
            unknown.push(*name);
        }
    }

    known
        .chain(unknown.into_iter().map(|name| SnapshotEntry {
            indicator_name: name.clone(),
            year,
            value: None,
        }))
        .collect()
}

// ---------------------------------------------------------------------------
// Year-on-year growth
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct GrowthPoint {
    pub year: i32,
    pub indicator_name: String,
    pub growth_pct: f64,
}

/// Year-on-year percentage change per indicator.
///
/// Within each indicator rows are ordered by year. The first row of a group,
/// any row touching a missing value, and any non-finite result (previous
/// value of zero) produce no output.
pub fn growth_rates(rows: &[Observation]) -> Vec<GrowthPoint> {
    let mut out = Vec::new();
    for (name, mut group) in group_by_indicator(rows) {
        group.sort_by_key(|o| o.year);
        for pair in group.windows(2) {
            let (prev, cur) = (pair[0], pair[1]);
            let (Some(p), Some(c)) = (prev.value, cur.value) else {
                continue;
            };
            let growth_pct = (c - p) / p * 100.0;
            if !growth_pct.is_finite() {
                continue;
            }
            out.push(GrowthPoint {
                year: cur.year,
                indicator_name: name.to_string(),
                growth_pct,
            });
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Ranking
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankOrder {
    #[default]
    Descending,
    Ascending,
}

impl RankOrder {
    pub fn label(&self) -> &'static str {
        match self {
            RankOrder::Descending => "Highest first",
            RankOrder::Ascending => "Lowest first",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankEntry {
    pub indicator_name: String,
    pub value: f64,
}

/// Cross-sectional ranking of every indicator observed in `year`.
///
/// Duplicates are mean-aggregated; indicators with no value that year are
/// left out. Ties keep first-appearance order.
pub fn rank(dataset: &IndicatorDataset, year: i32, order: RankOrder) -> Vec<RankEntry> {
    let rows: Vec<Observation> = dataset
        .observations()
        .iter()
        .filter(|o| o.year == year)
        .cloned()
        .collect();

    let mut entries: Vec<RankEntry> = group_by_indicator(&rows)
        .into_iter()
        .filter_map(|(name, group)| {
            let value = mean_of(group.iter().map(|o| o.value))?;
            Some(RankEntry {
                indicator_name: name.to_string(),
                value,
            })
        })
        .collect();

    match order {
        RankOrder::Descending => entries.sort_by(|a, b| b.value.total_cmp(&a.value)),
        RankOrder::Ascending => entries.sort_by(|a, b| a.value.total_cmp(&b.value)),
    }
    entries
}

// ---------------------------------------------------------------------------
// Trend series
// ---------------------------------------------------------------------------

/// Per-indicator `(year, value)` points for line charts.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendSeries {
    pub indicator_name: String,
    pub points: Vec<(i32, f64)>,
}

/// One series per indicator, years ascending, duplicates averaged, missing
/// years skipped.
pub fn trend_series(rows: &[Observation]) -> Vec<TrendSeries> {
    group_by_indicator(rows)
        .into_iter()
        .map(|(name, group)| {
            let mut by_year: BTreeMap<i32, Vec<Option<f64>>> = BTreeMap::new();
            for obs in group {
                by_year.entry(obs.year).or_default().push(obs.value);
            }
            let points = by_year
                .into_iter()
                .filter_map(|(year, vals)| Some((year, mean_of(vals)?)))
                .collect();
            TrendSeries {
                indicator_name: name.to_string(),
                points,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(year: i32, name: &str, value: Option<f64>) -> Observation {
        Observation::new(year, name, value)
    }

    #[test]
    fn duplicates_are_averaged() {
        let ds = IndicatorDataset::from_observations(vec![
            obs(2020, "Gini index", Some(35.0)),
            obs(2020, "Gini index", Some(37.0)),
            obs(2020, "Gini index", None),
        ]);
        assert_eq!(latest_value(&ds, 2020, "Gini index"), Some(36.0));
    }

    #[test]
    fn latest_value_missing_is_none_not_zero() {
        let ds = IndicatorDataset::from_observations(vec![obs(2019, "Gini index", None)]);
        assert_eq!(latest_value(&ds, 2019, "Gini index"), None);
        assert_eq!(latest_value(&ds, 2018, "Gini index"), None);
        assert_eq!(latest_value(&ds, 2019, "Other"), None);
    }

    #[test]
    fn snapshot_uses_latest_year() {
        let ds = IndicatorDataset::from_observations(vec![
            obs(2016, "A", Some(1.0)),
            obs(2019, "A", Some(2.0)),
            obs(2016, "B", Some(5.0)),
        ]);
        let selected = vec!["B".to_string(), "A".to_string()];
        let snap = snapshot(&ds, &selected);
        assert_eq!(
            snap,
            vec![
                SnapshotEntry {
                    indicator_name: "A".into(),
                    year: 2019,
                    value: Some(2.0),
                },
                SnapshotEntry {
                    indicator_name: "B".into(),
                    year: 2019,
                    value: None,
                },
            ]
        );
    }

    #[test]
    fn snapshot_keeps_unknown_requested_indicators() {
        let ds = IndicatorDataset::from_observations(vec![obs(2019, "A", Some(2.0))]);
        let selected = vec!["Z".to_string(), "A".to_string(), "Y".to_string()];
        let snap = snapshot(&ds, &selected);
        let got: Vec<(&str, Option<f64>)> = snap
            .iter()
            .map(|e| (e.indicator_name.as_str(), e.value))
            .collect();
        assert_eq!(got, vec![("A", Some(2.0)), ("Z", None), ("Y", None)]);
        assert!(snap.iter().all(|e| e.year == 2019));
    }

    #[test]
    fn growth_skips_missing_on_either_side() {
        let rows = vec![
            obs(2000, "X", Some(10.0)),
            obs(2001, "X", Some(20.0)),
            obs(2002, "X", None),
            obs(2003, "X", Some(5.0)),
        ];
        let growth = growth_rates(&rows);
        assert_eq!(growth.len(), 1);
        assert_eq!(growth[0].year, 2001);
        assert_eq!(growth[0].indicator_name, "X");
        assert!((growth[0].growth_pct - 100.0).abs() < 1e-9);
    }

    #[test]
    fn growth_from_zero_is_dropped() {
        let rows = vec![obs(2000, "X", Some(0.0)), obs(2001, "X", Some(10.0))];
        assert!(growth_rates(&rows).is_empty());
    }

    #[test]
    fn growth_sorts_by_year_within_indicator() {
        let rows = vec![
            obs(2002, "A", Some(30.0)),
            obs(2000, "B", Some(4.0)),
            obs(2000, "A", Some(10.0)),
            obs(2001, "A", Some(20.0)),
            obs(2001, "B", Some(2.0)),
        ];
        let growth = growth_rates(&rows);
        let got: Vec<(&str, i32)> = growth
            .iter()
            .map(|g| (g.indicator_name.as_str(), g.year))
            .collect();
        assert_eq!(got, vec![("A", 2001), ("A", 2002), ("B", 2001)]);
        assert!((growth[1].growth_pct - 50.0).abs() < 1e-9);
        assert!((growth[2].growth_pct + 50.0).abs() < 1e-9);
    }

    #[test]
    fn rank_excludes_missing_and_sorts() {
        let ds = IndicatorDataset::from_observations(vec![
            obs(2019, "A", Some(3.0)),
            obs(2019, "B", None),
            obs(2019, "C", Some(8.0)),
            obs(2019, "C", Some(10.0)),
            obs(2019, "D", Some(1.0)),
            obs(2018, "E", Some(100.0)),
        ]);

        let desc = rank(&ds, 2019, RankOrder::Descending);
        let names: Vec<&str> = desc.iter().map(|e| e.indicator_name.as_str()).collect();
        assert_eq!(names, vec!["C", "A", "D"]);
        assert_eq!(desc[0].value, 9.0);

        let asc = rank(&ds, 2019, RankOrder::Ascending);
        let names: Vec<&str> = asc.iter().map(|e| e.indicator_name.as_str()).collect();
        assert_eq!(names, vec!["D", "A", "C"]);

        assert!(rank(&ds, 1990, RankOrder::Descending).is_empty());
    }

    #[test]
    fn trend_series_skips_gaps_and_averages() {
        let rows = vec![
            obs(2003, "A", Some(4.0)),
            obs(2001, "A", Some(1.0)),
            obs(2001, "A", Some(3.0)),
            obs(2002, "A", None),
        ];
        let series = trend_series(&rows);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].points, vec![(2001, 2.0), (2003, 4.0)]);
    }

    #[test]
    fn mean_of_nothing_is_none() {
        assert_eq!(mean_of(Vec::<Option<f64>>::new()), None);
        assert_eq!(mean_of(vec![None, None]), None);
    }
}
