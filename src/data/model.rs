use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Observation – one row of the long-format table
// ---------------------------------------------------------------------------

/// A single (year, indicator, value) data point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Indicator Name")]
    pub indicator_name: String,
    /// `None` is a missing observation, never zero.
    #[serde(rename = "Value")]
    pub value: Option<f64>,
}

impl Observation {
    pub fn new(year: i32, indicator_name: impl Into<String>, value: Option<f64>) -> Self {
        Self {
            year,
            indicator_name: indicator_name.into(),
            value,
        }
    }
}

// ---------------------------------------------------------------------------
// YearRange – inclusive bounds for range filters
// ---------------------------------------------------------------------------

/// Inclusive `[start, end]` year bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    pub start: i32,
    pub end: i32,
}

impl YearRange {
    pub fn new(start: i32, end: i32) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, year: i32) -> bool {
        self.start <= year && year <= self.end
    }

    /// Clamp both bounds into `[min, max]`. May leave the range inverted
    /// (and therefore empty) if the caller passed `start > end`.
    pub fn clamp_to(self, min: i32, max: i32) -> Self {
        Self {
            start: self.start.clamp(min, max),
            end: self.end.clamp(min, max),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }
}

// ---------------------------------------------------------------------------
// IndicatorDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The loaded long-format table with pre-computed year and indicator indices.
///
/// Immutable once built: every filter and metric returns a fresh table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndicatorDataset {
    observations: Vec<Observation>,
    /// Distinct years, ascending.
    years: BTreeSet<i32>,
    /// Distinct indicator names in first-appearance order.
    indicators: Vec<String>,
}

impl IndicatorDataset {
    /// Build indices from observations in source order.
    pub fn from_observations(observations: Vec<Observation>) -> Self {
        let mut years = BTreeSet::new();
        let mut seen: HashSet<&str> = HashSet::new();
        let mut indicators = Vec::new();

        for obs in &observations {
            years.insert(obs.year);
            if seen.insert(obs.indicator_name.as_str()) {
                indicators.push(obs.indicator_name.clone());
            }
        }

        IndicatorDataset {
            observations,
            years,
            indicators,
        }
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn years(&self) -> &BTreeSet<i32> {
        &self.years
    }

    pub fn indicators(&self) -> &[String] {
        &self.indicators
    }

    pub fn has_indicator(&self, name: &str) -> bool {
        self.indicators.iter().any(|i| i == name)
    }

    pub fn min_year(&self) -> Option<i32> {
        self.years.first().copied()
    }

    pub fn max_year(&self) -> Option<i32> {
        self.years.last().copied()
    }

    /// Full year span of the dataset, `None` when empty.
    pub fn year_bounds(&self) -> Option<YearRange> {
        Some(YearRange::new(self.min_year()?, self.max_year()?))
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_follow_source_order() {
        let ds = IndicatorDataset::from_observations(vec![
            Observation::new(2010, "Gini index", Some(39.0)),
            Observation::new(2002, "Income share held by lowest 20%", None),
            Observation::new(2016, "Gini index", Some(38.7)),
        ]);

        assert_eq!(ds.len(), 3);
        assert_eq!(
            ds.indicators(),
            &["Gini index".to_string(), "Income share held by lowest 20%".to_string()]
        );
        assert_eq!(ds.years().iter().copied().collect::<Vec<_>>(), vec![2002, 2010, 2016]);
        assert_eq!(ds.year_bounds(), Some(YearRange::new(2002, 2016)));
        assert!(ds.has_indicator("Gini index"));
        assert!(!ds.has_indicator("gini index"));
    }

    #[test]
    fn empty_dataset_has_no_bounds() {
        let ds = IndicatorDataset::default();
        assert!(ds.is_empty());
        assert_eq!(ds.year_bounds(), None);
    }

    #[test]
    fn clamp_keeps_range_inside_bounds() {
        let r = YearRange::new(1900, 2100).clamp_to(1985, 2019);
        assert_eq!(r, YearRange::new(1985, 2019));
        assert!(YearRange::new(2015, 2010).is_empty());
        assert!(r.contains(1985) && r.contains(2019) && !r.contains(2020));
    }
}
