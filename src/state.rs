use std::path::Path;
use std::sync::Arc;

use poverty_dash::data::cache::DatasetCache;
use poverty_dash::data::model::IndicatorDataset;
use poverty_dash::data::views::{DashboardQuery, DashboardViews};
use poverty_dash::error::DataSourceError;
use poverty_dash::settings::DashboardSettings;

use crate::color::IndicatorColors;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Overview,
    Growth,
    Ranking,
    Correlation,
    Data,
}

impl Tab {
    pub const ALL: [Tab; 5] = [
        Tab::Overview,
        Tab::Growth,
        Tab::Ranking,
        Tab::Correlation,
        Tab::Data,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Overview => "Overview",
            Tab::Growth => "Growth",
            Tab::Ranking => "Ranking",
            Tab::Correlation => "Correlation",
            Tab::Data => "Data",
        }
    }
}

/// The full UI state, independent of rendering.
pub struct AppState {
    pub settings: DashboardSettings,

    /// Session dataset cache; the only place a dataset is loaded.
    pub cache: DatasetCache,

    /// Current filter selections (None until a dataset is loaded).
    pub query: Option<DashboardQuery>,

    /// Views derived from the current query (cached).
    pub views: Option<DashboardViews>,

    /// Series colour per indicator.
    pub colors: IndicatorColors,

    pub tab: Tab,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Set when the query changed and views must be recomputed.
    dirty: bool,
}

impl AppState {
    pub fn new(settings: DashboardSettings) -> Self {
        Self {
            settings,
            cache: DatasetCache::default(),
            query: None,
            views: None,
            colors: IndicatorColors::default(),
            tab: Tab::Overview,
            status_message: None,
            dirty: false,
        }
    }

    pub fn dataset(&self) -> Option<Arc<IndicatorDataset>> {
        self.cache.get()
    }

    /// Open a new data file. On failure the previous dataset stays visible.
    pub fn open(&mut self, path: &Path) {
        let result = self.cache.open(path);
        self.accept_load(result);
    }

    /// Reload the current source and reset every filter.
    pub fn reload(&mut self) {
        match self.cache.reload() {
            Some(result) => self.accept_load(result),
            None => self.status_message = Some("Nothing to reload.".to_string()),
        }
    }

    fn accept_load(&mut self, result: Result<Arc<IndicatorDataset>, DataSourceError>) {
        match result {
            Ok(dataset) => self.set_dataset(&dataset),
            Err(e) => {
                log::error!("Failed to load dataset: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Ingest a newly loaded dataset: initialise filters and colours.
    fn set_dataset(&mut self, dataset: &IndicatorDataset) {
        self.colors = IndicatorColors::new(dataset.indicators());
        self.query = Some(DashboardQuery::initial(
            dataset,
            self.settings.default_indicator.as_deref(),
            self.settings.rank_order,
        ));
        self.status_message = None;
        self.dirty = true;
        self.refresh();
    }

    /// Flag the views as stale after a filter change.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Recompute views if a filter changed since the last pass.
    pub fn refresh(&mut self) {
        if !self.dirty {
            return;
        }
        self.dirty = false;
        self.views = match (self.cache.get(), &self.query) {
            (Some(ds), Some(query)) => Some(DashboardViews::compute(&ds, query)),
            _ => None,
        };
    }

    /// Toggle a single indicator in the selection.
    pub fn toggle_indicator(&mut self, name: &str) {
        if let Some(query) = &mut self.query {
            if !query.indicators.remove(name) {
                query.indicators.insert(name.to_string());
            }
            self.dirty = true;
        }
    }

    /// Add every name in `names` to the selection.
    pub fn select_all(&mut self, names: &[String]) {
        if let Some(query) = &mut self.query {
            query.indicators.extend(names.iter().cloned());
            self.dirty = true;
        }
    }

    /// Remove every name in `names` from the selection.
    pub fn select_none(&mut self, names: &[String]) {
        if let Some(query) = &mut self.query {
            for name in names {
                query.indicators.remove(name);
            }
            self.dirty = true;
        }
    }
}
