use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use tracing::{debug, info, warn};

use super::error::{KnowledgeError, Result};
use crate::knowledge::loader::build_store;
use crate::knowledge::source::KnowledgeSource;
use crate::knowledge::store::KnowledgeStore;


/// Process-lifetime holder of the loaded knowledge store.
///
/// The store is read once and memoized. `invalidate` marks the slot cold but
/// keeps the old store, which is served (flagged stale) if the next read fails.
pub struct KnowledgeCache {
    source: Arc<dyn KnowledgeSource>,
    slot: RwLock<CacheSlot>,
    hits: AtomicU64,
    misses: AtomicU64,
    reloads: AtomicU64,
    stale_served: AtomicU64,
}

#[derive(Default)]
struct CacheSlot {
    store: Option<Arc<KnowledgeStore>>,
    fresh: bool,
}


#[derive(Debug)]
pub enum Freshness {
    /// Served from the warm cache.
    Cached,
    /// Read from the source by this call.
    Reloaded,
    /// Refresh failed; the previous store was served.
    Stale(KnowledgeError),
}


#[derive(Debug)]
pub struct LoadedStore {
    pub store: Arc<KnowledgeStore>,
    pub freshness: Freshness,
}

impl LoadedStore {
    pub fn source_unavailable(&self) -> Option<&KnowledgeError> {
        match &self.freshness {
            Freshness::Stale(err) => Some(err),
            _ => None,
        }
    }
}


#[derive(Debug, Default, Clone)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub reloads: u64,
    pub stale_served: u64,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

impl KnowledgeCache {

    pub fn new(source: Arc<dyn KnowledgeSource>) -> Self {
        Self {
            source,
            slot: RwLock::new(CacheSlot::default()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            reloads: AtomicU64::new(0),
            stale_served: AtomicU64::new(0),
        }
    }

    /// Return the cached store, reading the source if the slot is cold.
    ///
    /// Concurrent cold callers serialize on the write guard, so only the first
    /// performs the read.
    pub fn load(&self) -> Result<LoadedStore> {
        if let Some(store) = self.warm() {
            return Ok(store);
        }

        let mut slot = self.slot.write();
        if slot.fresh {
            if let Some(store) = &slot.store {
                self.hits.fetch_add(1, Ordering::Relaxed);
                return Ok(LoadedStore {
                    store: Arc::clone(store),
                    freshness: Freshness::Cached,
                });
            }
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        debug!("Knowledge cache cold, reading {}", self.source.describe());

        match self.read_source() {
            Ok(store) => {
                let store = Arc::new(store);
                slot.store = Some(Arc::clone(&store));
                slot.fresh = true;
                self.reloads.fetch_add(1, Ordering::Relaxed);
                info!("Knowledge cache populated from {}", self.source.describe());
                Ok(LoadedStore {
                    store,
                    freshness: Freshness::Reloaded,
                })
            }
            Err(err) => match &slot.store {
                Some(previous) => {
                    self.stale_served.fetch_add(1, Ordering::Relaxed);
                    warn!("Knowledge refresh failed, serving stale store: {}", err);
                    Ok(LoadedStore {
                        store: Arc::clone(previous),
                        freshness: Freshness::Stale(KnowledgeError::SourceUnavailable(
                            err.to_string(),
                        )),
                    })
                }
                None => {
                    warn!("Knowledge load failed with no cached store: {}", err);
                    if matches!(err, KnowledgeError::LoadFailed(_)) {
                        Err(err)
                    } else {
                        Err(KnowledgeError::LoadFailed(err.to_string()))
                    }
                }
            },
        }
    }

    /// Force the next `load` to re-read the source.
    pub fn invalidate(&self) {
        let mut slot = self.slot.write();
        slot.fresh = false;
        info!("Knowledge cache invalidated");
    }

    pub fn is_warm(&self) -> bool {
        let slot = self.slot.read();
        slot.fresh && slot.store.is_some()
    }


    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            reloads: self.reloads.load(Ordering::Relaxed),
            stale_served: self.stale_served.load(Ordering::Relaxed),
        }
    }

    fn warm(&self) -> Option<LoadedStore> {
        let slot = self.slot.read();
        if !slot.fresh {
            return None;
        }
        let store = Arc::clone(slot.store.as_ref()?);
        self.hits.fetch_add(1, Ordering::Relaxed);
        Some(LoadedStore {
            store,
            freshness: Freshness::Cached,
        })
    }

    fn read_source(&self) -> Result<KnowledgeStore> {
        let documents = self.source.read()?;
        build_store(&documents)
    }
}
