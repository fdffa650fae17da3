use std::collections::{BTreeSet, HashMap};

use crate::error::InsufficientDataError;

use super::metrics::mean_of;
use super::model::{IndicatorDataset, YearRange};

/// Refuse to correlate when at least this share of pivot cells is missing.
pub const MAX_MISSING_FRACTION: f64 = 0.5;

// ---------------------------------------------------------------------------
// Pivot: years × indicators
// ---------------------------------------------------------------------------

/// Wide view of the filtered table. Row-major, one cell per (year, indicator).
#[derive(Debug, Clone, PartialEq)]
pub struct PivotTable {
    pub years: Vec<i32>,
    pub indicators: Vec<String>,
    cells: Vec<Option<f64>>,
}

impl PivotTable {
    /// Rows are every dataset year inside `range` (clamped to the dataset's
    /// span); columns are the selected indicators that occur in the dataset,
    /// in dataset order. A year with no row for an indicator is a missing cell.
    pub fn build(
        dataset: &IndicatorDataset,
        range: YearRange,
        selected: &BTreeSet<String>,
    ) -> Self {
        let years: Vec<i32> = match dataset.year_bounds() {
            Some(bounds) => {
                let range = range.clamp_to(bounds.start, bounds.end);
                dataset
                    .years()
                    .iter()
                    .copied()
                    .filter(|y| range.contains(*y))
                    .collect()
            }
            None => Vec::new(),
        };

        let rows = dataset.filter(range, selected);
        let mut buckets: HashMap<(i32, &str), Vec<Option<f64>>> = HashMap::new();
        for obs in &rows {
            buckets
                .entry((obs.year, obs.indicator_name.as_str()))
                .or_default()
                .push(obs.value);
        }

        let indicators: Vec<String> = dataset
            .indicators()
            .iter()
            .filter(|name| selected.contains(*name))
            .cloned()
            .collect();

        let mut cells = Vec::with_capacity(years.len() * indicators.len());
        for &year in &years {
            for name in &indicators {
                let cell = buckets
                    .get(&(year, name.as_str()))
                    .and_then(|vals| mean_of(vals.iter().copied()));
                cells.push(cell);
            }
        }

        PivotTable {
            years,
            indicators,
            cells,
        }
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.cells[row * self.indicators.len() + col]
    }

    pub fn size(&self) -> usize {
        self.cells.len()
    }

    pub fn missing_cells(&self) -> usize {
        self.cells.iter().filter(|c| c.is_none()).count()
    }

    fn column(&self, col: usize) -> impl Iterator<Item = Option<f64>> + '_ {
        (0..self.years.len()).map(move |row| self.get(row, col))
    }
}

// ---------------------------------------------------------------------------
// Correlation matrix
// ---------------------------------------------------------------------------

/// Square, symmetric matrix of Pearson coefficients indexed by indicator.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    pub indicators: Vec<String>,
    values: Vec<Option<f64>>,
}

impl CorrelationMatrix {
    pub fn len(&self) -> usize {
        self.indicators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indicators.is_empty()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.values[row * self.indicators.len() + col]
    }

    pub fn get_by_name(&self, a: &str, b: &str) -> Option<f64> {
        let row = self.indicators.iter().position(|n| n == a)?;
        let col = self.indicators.iter().position(|n| n == b)?;
        self.get(row, col)
    }
}

/// Pairwise-complete Pearson correlation between every pair of selected
/// indicators over `range`.
///
/// Fails with [`InsufficientDataError`] when the pivot is at least half
/// empty. A zero-cell pivot yields an empty matrix.
pub fn correlation_matrix(
    dataset: &IndicatorDataset,
    range: YearRange,
    selected: &BTreeSet<String>,
) -> Result<CorrelationMatrix, InsufficientDataError> {
    let pivot = PivotTable::build(dataset, range, selected);
    if pivot.size() == 0 {
        return Ok(CorrelationMatrix {
            indicators: Vec::new(),
            values: Vec::new(),
        });
    }

    let missing = pivot.missing_cells();
    if missing as f64 >= MAX_MISSING_FRACTION * pivot.size() as f64 {
        log::debug!(
            "correlation refused: {missing}/{} pivot cells missing",
            pivot.size()
        );
        return Err(InsufficientDataError {
            missing,
            total: pivot.size(),
        });
    }

    let n = pivot.indicators.len();
    let mut values = vec![None; n * n];
    for i in 0..n {
        let present = pivot.column(i).flatten().count();
        values[i * n + i] = (present >= 2).then_some(1.0);

        for j in (i + 1)..n {
            let (xs, ys): (Vec<f64>, Vec<f64>) = pivot
                .column(i)
                .zip(pivot.column(j))
                .filter_map(|(x, y)| Some((x?, y?)))
                .unzip();
            let r = pearson(&xs, &ys);
            values[i * n + j] = r;
            values[j * n + i] = r;
        }
    }

    Ok(CorrelationMatrix {
        indicators: pivot.indicators,
        values,
    })
}

/// Pearson's r over paired samples. `None` with fewer than two pairs or a
/// constant side.
pub fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    let n = xs.len().min(ys.len());
    if n < 2 {
        return None;
    }
    let mean_x = xs[..n].iter().sum::<f64>() / n as f64;
    let mean_y = ys[..n].iter().sum::<f64>() / n as f64;

    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (&x, &y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    if sxx == 0.0 || syy == 0.0 {
        return None;
    }
    Some((sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0))
}
