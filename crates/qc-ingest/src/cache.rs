//! Time-to-live cache for a loaded lab result table.
//!
//! Loading from the source (spreadsheet export, warehouse query) is the
//! slow part of a dashboard refresh. The cache keeps the last loaded table
//! until its TTL expires or it is invalidated explicitly.

use std::time::{Duration, Instant};

use polars::prelude::DataFrame;
use tracing::debug;

/// Default refresh interval for a cached table.
pub const DEFAULT_TABLE_TTL: Duration = Duration::from_secs(600);

#[derive(Debug)]
struct CachedTable {
    frame: DataFrame,
    loaded_at: Instant,
}

/// A single-slot table cache with time-based expiry.
#[derive(Debug)]
pub struct TableCache {
    ttl: Duration,
    entry: Option<CachedTable>,
}

impl Default for TableCache {
    fn default() -> Self {
        Self::new(DEFAULT_TABLE_TTL)
    }
}

impl TableCache {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, entry: None }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// True when a table is cached and younger than the TTL.
    pub fn is_fresh(&self) -> bool {
        self.is_fresh_at(Instant::now())
    }

    fn is_fresh_at(&self, now: Instant) -> bool {
        self.entry
            .as_ref()
            .is_some_and(|entry| now.saturating_duration_since(entry.loaded_at) < self.ttl)
    }

    /// The cached table, if still fresh.
    pub fn get(&self) -> Option<&DataFrame> {
        if self.is_fresh() {
            self.entry.as_ref().map(|entry| &entry.frame)
        } else {
            None
        }
    }

    /// Return the cached table or call `load` to refresh it.
    ///
    /// A failed load leaves any previous (stale) entry in place.
    pub fn get_or_load<E, F>(&mut self, load: F) -> Result<&DataFrame, E>
    where
        F: FnOnce() -> Result<DataFrame, E>,
    {
        let now = Instant::now();
        let entry = match self.entry.take() {
            Some(entry) if now.saturating_duration_since(entry.loaded_at) < self.ttl => entry,
            stale => match load() {
                Ok(frame) => {
                    debug!(
                        rows = frame.height(),
                        ttl_secs = self.ttl.as_secs(),
                        "table cache refreshed"
                    );
                    CachedTable {
                        frame,
                        loaded_at: now,
                    }
                }
                Err(err) => {
                    self.entry = stale;
                    return Err(err);
                }
            },
        };
        Ok(&self.entry.insert(entry).frame)
    }

    /// Drop the cached table so the next access reloads it.
    pub fn invalidate(&mut self) {
        if self.entry.take().is_some() {
            debug!("table cache invalidated");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{Column, DataFrame};

    fn table(rows: usize) -> DataFrame {
        DataFrame::new(vec![Column::new("Lot number".into(), vec!["020125-MBP"; rows])]).unwrap()
    }

    #[test]
    fn test_loads_once_while_fresh() {
        let mut cache = TableCache::new(Duration::from_secs(60));
        let mut loads = 0;
        for _ in 0..3 {
            let df = cache
                .get_or_load(|| {
                    loads += 1;
                    Ok::<_, String>(table(2))
                })
                .unwrap();
            assert_eq!(df.height(), 2);
        }
        assert_eq!(loads, 1);
        assert!(cache.is_fresh());
    }

    #[test]
    fn test_invalidate_forces_reload() {
        let mut cache = TableCache::default();
        cache.get_or_load(|| Ok::<_, String>(table(1))).unwrap();
        cache.invalidate();
        assert!(cache.get().is_none());
        let df = cache.get_or_load(|| Ok::<_, String>(table(3))).unwrap();
        assert_eq!(df.height(), 3);
    }

    #[test]
    fn test_zero_ttl_is_never_fresh() {
        let mut cache = TableCache::new(Duration::ZERO);
        cache.get_or_load(|| Ok::<_, String>(table(1))).unwrap();
        assert!(!cache.is_fresh());
        assert!(cache.get().is_none());
    }

    #[test]
    fn test_expiry() {
        let mut cache = TableCache::new(Duration::from_secs(10));
        cache.get_or_load(|| Ok::<_, String>(table(1))).unwrap();
        let later = Instant::now() + Duration::from_secs(11);
        assert!(!cache.is_fresh_at(later));
    }

    #[test]
    fn test_failed_load_propagates() {
        let mut cache = TableCache::default();
        let result = cache.get_or_load(|| Err::<DataFrame, _>("sheet unavailable"));
        assert_eq!(result.unwrap_err(), "sheet unavailable");
        assert!(cache.get().is_none());
    }
}
