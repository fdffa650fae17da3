use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::DataSourceError;

use super::model::{IndicatorDataset, Observation};

pub const YEAR_COLUMN: &str = "Year";
pub const INDICATOR_COLUMN: &str = "Indicator Name";
pub const VALUE_COLUMN: &str = "Value";

/// Spellings of "no value" found in World Bank style exports.
const MISSING_MARKERS: [&str; 7] = ["", "na", "n/a", "nan", "null", "none", ".."];

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a long-format indicator table from a CSV file.
pub fn load_file(path: &Path) -> Result<IndicatorDataset, DataSourceError> {
    let file = File::open(path).map_err(|e| DataSourceError::not_found(path, e))?;
    let (dataset, report) = read_csv(file)?;
    report.log(&path.display().to_string(), &dataset);
    Ok(dataset)
}

/// Load a long-format indicator table from any CSV byte stream.
///
/// Header row required, with at least `Year`, `Indicator Name` and `Value`;
/// other columns are ignored. Rows with an unusable year or a blank
/// indicator name are dropped; unusable values become missing.
pub fn load_reader<R: Read>(reader: R) -> Result<IndicatorDataset, DataSourceError> {
    let (dataset, report) = read_csv(reader)?;
    report.log("stream", &dataset);
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// Load report
// ---------------------------------------------------------------------------

/// Row accounting for one load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub kept: usize,
    /// Rows with an unusable year or a blank indicator name.
    pub dropped: usize,
    /// Rows the CSV reader could not decode (e.g. invalid UTF-8).
    pub unparseable: usize,
    /// Non-numeric values kept as missing.
    pub coerced: usize,
}

impl LoadReport {
    pub fn summary(&self, source: &str, dataset: &IndicatorDataset) -> String {
        let span = dataset
            .year_bounds()
            .map(|r| format!("{}–{}", r.start, r.end))
            .unwrap_or_else(|| "no years".to_string());
        format!(
            "Loaded {source}: {} rows kept, {} dropped (bad year or indicator), \
             {} unparseable, {} values coerced to missing; years {span}, {} indicators",
            self.kept,
            self.dropped,
            self.unparseable,
            self.coerced,
            dataset.indicators().len(),
        )
    }

    fn log(&self, source: &str, dataset: &IndicatorDataset) {
        log::info!("{}", self.summary(source, dataset));
    }
}

fn read_csv<R: Read>(reader: R) -> Result<(IndicatorDataset, LoadReport), DataSourceError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()
        .map_err(DataSourceError::unreadable)?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
        .collect();

    let find = |name: &str| headers.iter().position(|h| h == name);
    let (year_idx, name_idx, value_idx) =
        match (find(YEAR_COLUMN), find(INDICATOR_COLUMN), find(VALUE_COLUMN)) {
            (Some(y), Some(n), Some(v)) => (y, n, v),
            (y, n, v) => {
                let missing: Vec<&str> = [
                    (y, YEAR_COLUMN),
                    (n, INDICATOR_COLUMN),
                    (v, VALUE_COLUMN),
                ]
                .into_iter()
                .filter(|(idx, _)| idx.is_none())
                .map(|(_, col)| col)
                .collect();
                return Err(DataSourceError::schema_mismatch(&missing));
            }
        };

    let mut observations = Vec::new();
    let mut report = LoadReport::default();

    for (row_no, result) in reader.records().enumerate() {
        let record = match result {
            Ok(r) => r,
            Err(e) if e.is_io_error() => return Err(DataSourceError::unreadable(e)),
            Err(e) => {
                log::warn!("CSV data row {}: {e}; skipped", row_no + 1);
                report.unparseable += 1;
                continue;
            }
        };

        let Some(year) = parse_year(record.get(year_idx).unwrap_or("")) else {
            report.dropped += 1;
            continue;
        };
        let name = record.get(name_idx).unwrap_or("");
        if name.is_empty() {
            report.dropped += 1;
            continue;
        }

        let raw_value = record.get(value_idx).unwrap_or("");
        let value = parse_value(raw_value);
        if value.is_none() && !is_missing_marker(raw_value) {
            report.coerced += 1;
        }

        observations.push(Observation::new(year, name, value));
    }

    report.kept = observations.len();
    Ok((IndicatorDataset::from_observations(observations), report))
}

// ---------------------------------------------------------------------------
// Cell parsing
// ---------------------------------------------------------------------------

/// Accepts `2019` and `2019.0`; anything fractional or non-numeric is `None`.
fn parse_year(s: &str) -> Option<i32> {
    let s = s.trim();
    if let Ok(y) = s.parse::<i32>() {
        return Some(y);
    }
    let f = s.parse::<f64>().ok()?;
    if f.is_finite() && f.fract() == 0.0 && f.abs() <= i32::MAX as f64 {
        Some(f as i32)
    } else {
        None
    }
}

fn is_missing_marker(s: &str) -> bool {
    let s = s.trim().to_ascii_lowercase();
    MISSING_MARKERS.contains(&s.as_str())
}

fn parse_value(s: &str) -> Option<f64> {
    if is_missing_marker(s) {
        return None;
    }
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DataSourceErrorKind;

    #[test]
    fn parses_long_format_with_extra_columns() {
        let csv = "\
Country Name,Country Code,Year,Indicator Name,Indicator Code,Value
Sri Lanka,LKA,2016,Gini index,SI.POV.GINI,39.3
Sri Lanka,LKA,2019.0,Gini index,SI.POV.GINI,37.7
Sri Lanka,LKA,2019,Income share held by lowest 20%,SI.DST.FRST.20,
";
        let ds = load_reader(csv.as_bytes()).unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.observations()[1], Observation::new(2019, "Gini index", Some(37.7)));
        assert_eq!(ds.observations()[2].value, None);
    }

    #[test]
    fn drops_rows_with_bad_year() {
        let csv = "Year,Indicator Name,Value\n\
                   2000,A,1\n\
                   abc,A,2\n\
                   ,A,3\n\
                   2001.5,A,4\n\
                   2002,,5\n\
                   2003,A,6\n";
        let ds = load_reader(csv.as_bytes()).unwrap();
        let years: Vec<i32> = ds.observations().iter().map(|o| o.year).collect();
        assert_eq!(years, vec![2000, 2003]);
    }

    #[test]
    fn missing_value_spellings_are_preserved_as_missing() {
        let csv = "Year,Indicator Name,Value\n\
                   2000,A,NA\n\
                   2001,A,..\n\
                   2002,A,nan\n\
                   2003,A,n/a\n\
                   2004,A,oops\n\
                   2005,A,0\n";
        let ds = load_reader(csv.as_bytes()).unwrap();
        let values: Vec<Option<f64>> = ds.observations().iter().map(|o| o.value).collect();
        assert_eq!(values, vec![None, None, None, None, None, Some(0.0)]);
    }

    #[test]
    fn ragged_rows_read_missing_cells_as_blank() {
        let csv = "Year,Indicator Name,Value\n2000,A\n2001,A,2.5\n";
        let ds = load_reader(csv.as_bytes()).unwrap();
        assert_eq!(ds.observations()[0].value, None);
        assert_eq!(ds.observations()[1].value, Some(2.5));
    }

    #[test]
    fn missing_columns_are_a_schema_mismatch() {
        let err = load_reader("Year,Indicator,Value\n2000,A,1\n".as_bytes()).unwrap_err();
        assert_eq!(err.kind, DataSourceErrorKind::SchemaMismatch);
        assert!(err.message.contains("Indicator Name"));

        let err = load_reader("".as_bytes()).unwrap_err();
        assert_eq!(err.kind, DataSourceErrorKind::SchemaMismatch);
    }

    #[test]
    fn headers_are_trimmed() {
        let csv = "\u{feff}Year , Indicator Name ,Value\n2000,A,1\n";
        let ds = load_reader(csv.as_bytes()).unwrap();
        assert_eq!(ds.len(), 1);
    }

    #[test]
    fn report_separates_undecodable_rows() {
        let bytes: &[u8] = b"Year,Indicator Name,Value\n\
            2000,A,1\n\
            2001,\xff\xfe,2\n\
            2002,A,oops\n\
            abc,A,1\n";
        let (ds, report) = read_csv(bytes).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(
            report,
            LoadReport {
                kept: 2,
                dropped: 1,
                unparseable: 1,
                coerced: 1,
            }
        );

        let line = report.summary("lka.csv", &ds);
        assert!(line.contains("2 rows kept"));
        assert!(line.contains("1 dropped"));
        assert!(line.contains("1 unparseable"));
        assert!(line.contains("years 2000–2002"));
        assert!(line.contains("1 indicators"));
    }

    #[test]
    fn absent_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_file(&dir.path().join("nope.csv")).unwrap_err();
        assert_eq!(err.kind, DataSourceErrorKind::NotFound);
    }
}
