//! Named response caches.
//!
//! The registry is the worker's view of cache storage: named stores of
//! responses keyed by URL. The registry outlives any one worker, which
//! is what makes version sweeps at activation meaningful.

use std::collections::BTreeMap;

use crate::fetch::FetchResponse;

/// One named cache.
#[derive(Debug, Default)]
pub struct CacheStore {
    entries: BTreeMap<String, FetchResponse>,
}

impl CacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, url: &str) -> Option<&FetchResponse> {
        self.entries.get(url)
    }

    pub fn put(&mut self, url: &str, response: FetchResponse) {
        self.entries.insert(url.to_string(), response);
    }

    pub fn contains(&self, url: &str) -> bool {
        self.entries.contains_key(url)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn urls(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

/// All caches, keyed by name.
#[derive(Debug, Default)]
pub struct StoreRegistry {
    stores: BTreeMap<String, CacheStore>,
}

impl StoreRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a cache, creating it empty on first use.
    pub fn open(&mut self, name: &str) -> &mut CacheStore {
        self.stores.entry(name.to_string()).or_default()
    }

    pub fn get(&self, name: &str) -> Option<&CacheStore> {
        self.stores.get(name)
    }

    /// Names of every existing cache, sorted.
    pub fn names(&self) -> Vec<String> {
        self.stores.keys().cloned().collect()
    }

    /// Drop a cache and everything in it. Returns true when it existed.
    pub fn delete(&mut self, name: &str) -> bool {
        self.stores.remove(name).is_some()
    }
}
