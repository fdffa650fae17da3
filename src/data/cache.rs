use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::DataSourceError;

use super::loader::load_file;
use super::model::IndicatorDataset;

/// Once-per-session handle on the loaded dataset.
///
/// The snapshot is shared read-only; it only changes through an explicit
/// [`open`](Self::open) or [`reload`](Self::reload).
#[derive(Debug, Default)]
pub struct DatasetCache {
    source: Option<PathBuf>,
    dataset: Option<Arc<IndicatorDataset>>,
}

impl DatasetCache {
    /// Load `path` and make it the session's dataset. A failed open leaves
    /// the cache untouched.
    pub fn open(&mut self, path: &Path) -> Result<Arc<IndicatorDataset>, DataSourceError> {
        let dataset = Arc::new(load_file(path)?);
        self.source = Some(path.to_path_buf());
        self.dataset = Some(Arc::clone(&dataset));
        Ok(dataset)
    }

    /// Re-run the load on the remembered source. On failure the previous
    /// snapshot stays in place.
    pub fn reload(&mut self) -> Option<Result<Arc<IndicatorDataset>, DataSourceError>> {
        let source = self.source.clone()?;
        log::info!("Reloading {}", source.display());
        Some(load_file(&source).map(|ds| {
            let ds = Arc::new(ds);
            self.dataset = Some(Arc::clone(&ds));
            ds
        }))
    }

    pub fn get(&self) -> Option<Arc<IndicatorDataset>> {
        self.dataset.clone()
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn invalidate(&mut self) {
        self.dataset = None;
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::error::DataSourceErrorKind;

    fn write_csv(path: &Path, body: &str) {
        let mut f = std::fs::File::create(path).unwrap();
        writeln!(f, "Year,Indicator Name,Value").unwrap();
        f.write_all(body.as_bytes()).unwrap();
    }

    #[test]
    fn get_is_shared_until_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.csv");
        write_csv(&path, "2000,A,1\n");

        let mut cache = DatasetCache::default();
        let first = cache.open(&path).unwrap();
        assert!(Arc::ptr_eq(&first, &cache.get().unwrap()));
        assert_eq!(cache.source(), Some(path.as_path()));

        write_csv(&path, "2000,A,1\n2001,A,2\n");
        assert_eq!(cache.get().unwrap().len(), 1);

        let reloaded = cache.reload().unwrap().unwrap();
        assert_eq!(reloaded.len(), 2);
        assert_eq!(first.len(), 1);
        assert!(Arc::ptr_eq(&reloaded, &cache.get().unwrap()));
    }

    #[test]
    fn failed_reload_keeps_previous_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.csv");
        write_csv(&path, "2000,A,1\n");

        let mut cache = DatasetCache::default();
        cache.open(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        let err = cache.reload().unwrap().unwrap_err();
        assert_eq!(err.kind, DataSourceErrorKind::NotFound);
        assert_eq!(cache.get().unwrap().len(), 1);
    }

    #[test]
    fn invalidate_and_empty_cache() {
        let mut cache = DatasetCache::default();
        assert!(cache.reload().is_none());
        assert!(cache.get().is_none());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.csv");
        write_csv(&path, "2000,A,1\n");
        cache.open(&path).unwrap();
        cache.invalidate();
        assert!(cache.get().is_none());
        assert!(cache.reload().is_some());
    }
}
