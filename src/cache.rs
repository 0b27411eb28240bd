// src/cache.rs
//! TTL-bounded cache for the computed listing table.
//!
//! One table per process: populated by a pipeline run, shared with every
//! reader until the TTL elapses, then rebuilt from scratch. A store swaps
//! the whole entry at once, so readers never observe a partial table.

use std::sync::{Arc, RwLock};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::listing::Listing;

#[derive(Debug)]
pub struct ListingCache {
    ttl: Duration,
    inner: RwLock<Option<Entry>>,
}

#[derive(Debug)]
struct Entry {
    built_at: u64,
    table: Arc<Vec<Listing>>,
}

impl ListingCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            inner: RwLock::new(None),
        }
    }

    /// The cached table if it is still within its TTL. A zero TTL is always
    /// stale.
    pub fn get_fresh(&self) -> Option<Arc<Vec<Listing>>> {
        let now = now_unix();
        let inner = self.inner.read().expect("listing cache lock poisoned");
        inner.as_ref().and_then(|e| {
            if now.saturating_sub(e.built_at) < self.ttl.as_secs() {
                Some(e.table.clone())
            } else {
                None
            }
        })
    }

    /// The cached table regardless of age, if any run ever stored one.
    pub fn get_any(&self) -> Option<Arc<Vec<Listing>>> {
        let inner = self.inner.read().expect("listing cache lock poisoned");
        inner.as_ref().map(|e| e.table.clone())
    }

    /// Replace the cached table wholesale. Returns the stored handle.
    pub fn store(&self, table: Vec<Listing>) -> Arc<Vec<Listing>> {
        let table = Arc::new(table);
        let mut inner = self.inner.write().expect("listing cache lock poisoned");
        *inner = Some(Entry {
            built_at: now_unix(),
            table: table.clone(),
        });
        table
    }
}

fn now_unix() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
