use std::collections::BTreeSet;

use super::model::{IndicatorDataset, Observation, YearRange};

// ---------------------------------------------------------------------------
// Filter predicate: year range × indicator selection
// ---------------------------------------------------------------------------

/// Rows that passed a filter, in source order.
pub type FilteredTable = Vec<Observation>;

/// Keep rows whose year lies in `range` and whose indicator is in `indicators`.
///
/// * An empty indicator set selects nothing (not "everything").
/// * Relative row order is preserved.
pub fn filter_rows(
    rows: &[Observation],
    range: YearRange,
    indicators: &BTreeSet<String>,
) -> FilteredTable {
    if indicators.is_empty() || range.is_empty() {
        return Vec::new();
    }
    rows.iter()
        .filter(|obs| range.contains(obs.year) && indicators.contains(&obs.indicator_name))
        .cloned()
        .collect()
}

impl IndicatorDataset {
    /// Filter the dataset. Out-of-range bounds are clamped to the dataset's
    /// year span rather than rejected.
    pub fn filter(&self, range: YearRange, indicators: &BTreeSet<String>) -> FilteredTable {
        let Some(bounds) = self.year_bounds() else {
            return Vec::new();
        };
        let range = range.clamp_to(bounds.start, bounds.end);
        filter_rows(self.observations(), range, indicators)
    }
}
