//! Session-scoped memo of the loaded dataset.

use tracing::{debug, info};

use crate::analyzers::routes::derive_routes;
use crate::dataset::Dataset;
use crate::error::Result;
use crate::fetch::{DataSource, SourceKey, load_dataset};

struct Slot {
    key: SourceKey,
    dataset: Dataset,
    routes_checked: bool,
}

/// Holds at most one parsed dataset, keyed by where it came from.
///
/// Loading the same source again returns the cached snapshot; loading a
/// different source (or an upload with different content) replaces it.
#[derive(Default)]
pub struct DatasetCache {
    slot: Option<Slot>,
    loads: usize,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the dataset for `source`, parsing it only on a cache miss.
    pub fn load(&mut self, source: &DataSource) -> Result<&Dataset> {
        Ok(&self.fill(source)?.dataset)
    }

    /// Like [`load`](Self::load), but with the `route` column derived.
    ///
    /// Derivation runs once per cached snapshot.
    pub fn load_with_routes(&mut self, source: &DataSource) -> Result<&Dataset> {
        let slot = self.fill(source)?;
        if !slot.routes_checked {
            derive_routes(&mut slot.dataset);
            slot.routes_checked = true;
        }
        Ok(&slot.dataset)
    }

    /// Number of times a source was actually read and parsed.
    pub fn loads(&self) -> usize {
        self.loads
    }

    /// Drops the cached dataset at the end of a session.
    pub fn clear(&mut self) {
        self.slot = None;
    }

    fn fill(&mut self, source: &DataSource) -> Result<&mut Slot> {
        let key = source.key();

        match self.slot.take() {
            Some(slot) if slot.key == key => {
                debug!(key = ?key, "Dataset cache hit");
                Ok(self.slot.insert(slot))
            }
            previous => {
                let dataset = match load_dataset(source) {
                    Ok(dataset) => dataset,
                    Err(e) => {
                        self.slot = previous;
                        return Err(e);
                    }
                };
                self.loads += 1;
                info!(
                    key = ?key,
                    records = dataset.len(),
                    replaced = previous.is_some(),
                    "Dataset loaded"
                );
                Ok(self.slot.insert(Slot {
                    key,
                    dataset,
                    routes_checked: false,
                }))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::ROUTE;

    const CSV: &str = "source_city,destination_city,price\nDelhi,Mumbai,100\n";

    #[test]
    fn test_same_upload_hits_cache() {
        let mut cache = DatasetCache::new();
        let source = DataSource::upload("flights.csv", CSV.as_bytes().to_vec());

        assert_eq!(cache.load(&source).unwrap().len(), 1);
        assert_eq!(cache.load(&source).unwrap().len(), 1);
        assert_eq!(cache.loads(), 1);
    }

    #[test]
    fn test_new_upload_invalidates() {
        let mut cache = DatasetCache::new();
        let first = DataSource::upload("flights.csv", CSV.as_bytes().to_vec());
        let second = DataSource::upload(
            "flights.csv",
            format!("{CSV}Delhi,Chennai,200\n").into_bytes(),
        );

        cache.load(&first).unwrap();
        assert_eq!(cache.load(&second).unwrap().len(), 2);
        assert_eq!(cache.loads(), 2);
    }

    #[test]
    fn test_routes_derived_lazily() {
        let mut cache = DatasetCache::new();
        let source = DataSource::upload("flights.csv", CSV.as_bytes().to_vec());

        assert!(!cache.load(&source).unwrap().has_column(ROUTE));
        let routed = cache.load_with_routes(&source).unwrap();
        assert_eq!(routed.records()[0].route.as_deref(), Some("Delhi → Mumbai"));
        assert!(cache.load(&source).unwrap().has_column(ROUTE));
        assert_eq!(cache.loads(), 1);
    }

    #[test]
    fn test_failed_load_leaves_cache_empty() {
        let mut cache = DatasetCache::new();
        let bad = DataSource::upload("bad.csv", b"price\nabc\n".to_vec());

        assert!(cache.load(&bad).is_err());
        assert!(cache.slot.is_none());
    }

    #[test]
    fn test_failed_load_keeps_previous_dataset() {
        let mut cache = DatasetCache::new();
        let good = DataSource::upload("flights.csv", CSV.as_bytes().to_vec());
        let bad = DataSource::upload("bad.csv", b"price\nabc\n".to_vec());

        cache.load(&good).unwrap();
        assert!(cache.load(&bad).is_err());
        assert_eq!(cache.load(&good).unwrap().len(), 1);
        assert_eq!(cache.loads(), 1);
    }

    #[test]
    fn test_clear() {
        let mut cache = DatasetCache::new();
        let source = DataSource::upload("flights.csv", CSV.as_bytes().to_vec());
        cache.load(&source).unwrap();

        cache.clear();
        assert!(cache.slot.is_none());
        cache.load(&source).unwrap();
        assert_eq!(cache.loads(), 2);
    }
}
