//! Error types for loading a dataset and computing derived views.

use std::fmt;
use std::path::Path;

use thiserror::Error;

/// What went wrong while loading a data source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSourceErrorKind {
    /// The source could not be opened.
    NotFound,
    /// A required column (`Year`, `Indicator Name`, `Value`) is absent.
    SchemaMismatch,
    /// The source was opened but reading it failed part-way.
    Unreadable,
}

impl fmt::Display for DataSourceErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "data source not found"),
            Self::SchemaMismatch => write!(f, "schema mismatch"),
            Self::Unreadable => write!(f, "data source unreadable"),
        }
    }
}

/// Fatal load-time error. Halts the session until another source is opened.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct DataSourceError {
    pub kind: DataSourceErrorKind,
    pub message: String,
}

impl DataSourceError {
    pub fn not_found(path: &Path, err: std::io::Error) -> Self {
        Self {
            kind: DataSourceErrorKind::NotFound,
            message: format!("{}: {err}", path.display()),
        }
    }

    pub fn schema_mismatch(missing: &[&str]) -> Self {
        Self {
            kind: DataSourceErrorKind::SchemaMismatch,
            message: format!("missing required column(s): {}", missing.join(", ")),
        }
    }

    pub fn unreadable(err: impl fmt::Display) -> Self {
        Self {
            kind: DataSourceErrorKind::Unreadable,
            message: err.to_string(),
        }
    }
}

/// Raised by the correlation view when the pivot is mostly empty.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("too much missing data for correlation matrix: {missing} of {total} cells missing")]
pub struct InsufficientDataError {
    pub missing: usize,
    pub total: usize,
}

impl InsufficientDataError {
    pub fn missing_fraction(&self) -> f64 {
        if self.total == 0 {
            return 1.0;
        }
        self.missing as f64 / self.total as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_mismatch_lists_missing_columns() {
        let err = DataSourceError::schema_mismatch(&["Year", "Value"]);
        assert_eq!(err.kind, DataSourceErrorKind::SchemaMismatch);
        assert_eq!(
            err.to_string(),
            "schema mismatch: missing required column(s): Year, Value"
        );
    }

    #[test]
    fn insufficient_data_fraction() {
        let err = InsufficientDataError { missing: 3, total: 4 };
        assert!((err.missing_fraction() - 0.75).abs() < 1e-12);
        assert_eq!(InsufficientDataError { missing: 0, total: 0 }.missing_fraction(), 1.0);
    }
}
