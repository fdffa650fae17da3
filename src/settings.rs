use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::metrics::RankOrder;

/// Environment variable naming an explicit settings file.
pub const CONFIG_ENV_VAR: &str = "POVERTY_DASH_CONFIG";
/// Settings file picked up from the working directory when present.
pub const DEFAULT_CONFIG_FILE: &str = "dashboard.json";

/// Dashboard settings, stored as JSON. Missing keys take their defaults.
///
/// ```json
/// {
///   "data_path": "poverty_lka_cleaned.csv",
///   "default_indicator": "Income share held by lowest 20%",
///   "rank_order": "descending"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardSettings {
    /// Dataset opened at startup.
    pub data_path: PathBuf,
    /// Indicator selected when a dataset is opened.
    pub default_indicator: Option<String>,
    pub rank_order: RankOrder,
    pub window_title: String,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("poverty_lka_cleaned.csv"),
            default_indicator: Some("Income share held by lowest 20%".to_string()),
            rank_order: RankOrder::Descending,
            window_title: "Poverty Indicators Dashboard".to_string(),
        }
    }
}

impl DashboardSettings {
    /// Read settings from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading settings file {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("parsing settings file {}", path.display()))
    }

    /// `$POVERTY_DASH_CONFIG`, else `./dashboard.json`, else defaults.
    pub fn from_env() -> Result<Self> {
        let explicit = std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from);
        Self::resolve(explicit, Path::new(DEFAULT_CONFIG_FILE))
    }

    /// An explicit path must exist; the fallback is optional.
    pub fn resolve(explicit: Option<PathBuf>, fallback: &Path) -> Result<Self> {
        match explicit {
            Some(path) => Self::load(&path),
            None if fallback.is_file() => Self::load(fallback),
            None => Ok(Self::default()),
        }
    }
}
