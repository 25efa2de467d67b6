//! Worker lifecycle and the cache-first fetch strategy.
//!
//! Install pre-caches the app shell into the versioned cache.
//! Activation deletes every other cache version and takes control.
//! Fetches go cache first; network responses that qualify are queued
//! for caching and written out by [`CacheWorker::flush_pending`] after
//! the response has been handed back, so caching never sits between
//! the visitor and their bytes.

use std::collections::VecDeque;

use yafe_types::config::CacheSection;
use yafe_types::error::Result;

use crate::fetch::{FetchBackend, FetchResponse, ResponseKind};
use crate::store::StoreRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerPhase {
    /// Created, shell not yet cached.
    New,
    /// Shell cached. The worker skips waiting, so activation follows
    /// immediately.
    Installed,
    /// Controlling the page.
    Active,
}

pub struct CacheWorker {
    phase: WorkerPhase,
    version: String,
    shell: Vec<String>,
    offline_page: String,
    registry: StoreRegistry,
    pending: VecDeque<(String, FetchResponse)>,
}

impl CacheWorker {
    pub fn new(config: &CacheSection) -> Self {
        Self::with_registry(config, StoreRegistry::new())
    }

    /// Build on an existing registry, as when a new worker version
    /// starts over caches its predecessor left behind.
    pub fn with_registry(config: &CacheSection, registry: StoreRegistry) -> Self {
        CacheWorker {
            phase: WorkerPhase::New,
            version: config.version.clone(),
            shell: config.shell.clone(),
            offline_page: config.offline_page.clone(),
            registry,
            pending: VecDeque::new(),
        }
    }

    pub fn phase(&self) -> WorkerPhase {
        self.phase
    }

    /// Name of the cache this worker version owns.
    pub fn cache_name(&self) -> &str {
        &self.version
    }

    pub fn stores(&self) -> &StoreRegistry {
        &self.registry
    }

    /// Pre-cache the app shell. A resource that fails to fetch is
    /// logged and skipped rather than failing the whole install, so
    /// one bad CDN day cannot brick the offline layer. Returns how
    /// many shell resources were cached.
    pub fn install(&mut self, backend: &mut dyn FetchBackend) -> usize {
        let store = self.registry.open(&self.version);
        let mut cached = 0;
        for url in &self.shell {
            match backend.fetch(url) {
                Ok(response) => {
                    store.put(url, response);
                    cached += 1;
                },
                Err(err) => log::warn!("shell resource {url} not cached: {err}"),
            }
        }
        self.phase = WorkerPhase::Installed;
        log::info!(
            "worker installed: {cached} of {} shell resources in {}",
            self.shell.len(),
            self.version,
        );
        cached
    }

    /// Delete every cache that is not this worker's version, then take
    /// control. Returns the names of the deleted caches.
    pub fn activate(&mut self) -> Vec<String> {
        let stale: Vec<String> = self
            .registry
            .names()
            .into_iter()
            .filter(|name| *name != self.version)
            .collect();
        for name in &stale {
            self.registry.delete(name);
            log::info!("worker: deleted stale cache {name}");
        }
        self.phase = WorkerPhase::Active;
        stale
    }

    /// Serve one fetch, cache first.
    ///
    /// On a miss the backend is asked; qualifying responses (200,
    /// same-origin) are queued for caching and the response returns
    /// untouched. On a network failure the cached offline page stands
    /// in when present, otherwise the error propagates.
    pub fn handle_fetch(
        &mut self,
        url: &str,
        backend: &mut dyn FetchBackend,
    ) -> Result<FetchResponse> {
        if let Some(hit) = self.registry.open(&self.version).get(url) {
            log::debug!("cache hit: {url}");
            return Ok(hit.clone());
        }

        match backend.fetch(url) {
            Ok(response) => {
                if Self::cacheable(&response) {
                    self.pending.push_back((url.to_string(), response.clone()));
                }
                Ok(response)
            },
            Err(err) => {
                log::warn!("fetch failed for {url}: {err}");
                let store = self.registry.open(&self.version);
                match store.get(&self.offline_page) {
                    Some(page) => Ok(page.clone()),
                    None => Err(err),
                }
            },
        }
    }

    /// Cache writes waiting for [`Self::flush_pending`].
    pub fn pending_writes(&self) -> usize {
        self.pending.len()
    }

    /// Write out the queued cache entries. Returns how many were
    /// applied.
    pub fn flush_pending(&mut self) -> usize {
        let store = self.registry.open(&self.version);
        let mut flushed = 0;
        while let Some((url, response)) = self.pending.pop_front() {
            store.put(&url, response);
            flushed += 1;
        }
        flushed
    }

    /// Only clean same-origin responses are cached.
    fn cacheable(response: &FetchResponse) -> bool {
        response.status == 200 && response.kind == ResponseKind::Basic
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use yafe_types::error::YafeError;

    const ORIGIN: &str = "https://yafe-restaurant.example";

    /// Serves 200s for everything except the URLs told to fail, and
    /// remembers every URL asked for.
    struct MockFetch {
        fetched: Vec<String>,
        fail: BTreeSet<String>,
        fail_all: bool,
    }

    impl MockFetch {
        fn online() -> Self {
            MockFetch {
                fetched: Vec::new(),
                fail: BTreeSet::new(),
                fail_all: false,
            }
        }

        fn offline() -> Self {
            MockFetch {
                fetched: Vec::new(),
                fail: BTreeSet::new(),
                fail_all: true,
            }
        }

        fn failing_for(url: &str) -> Self {
            let mut mock = Self::online();
            mock.fail.insert(url.to_string());
            mock
        }

        fn calls(&self) -> usize {
            self.fetched.len()
        }
    }

    impl FetchBackend for MockFetch {
        fn fetch(&mut self, url: &str) -> Result<FetchResponse> {
            self.fetched.push(url.to_string());
            if self.fail_all || self.fail.contains(url) {
                return Err(YafeError::Worker(format!("unreachable: {url}")));
            }
            Ok(FetchResponse {
                url: url.to_string(),
                status: 200,
                content_type: Some("text/html".to_string()),
                kind: ResponseKind::classify(ORIGIN, url),
                body: format!("content of {url}").into_bytes(),
            })
        }
    }

    fn worker() -> CacheWorker {
        CacheWorker::new(&CacheSection::default())
    }

    // ---- lifecycle tests ----

    #[test]
    fn install_caches_the_whole_shell() {
        let mut w = worker();
        let mut net = MockFetch::online();
        assert_eq!(w.phase(), WorkerPhase::New);
        assert_eq!(w.install(&mut net), 7);
        assert_eq!(w.phase(), WorkerPhase::Installed);

        let store = w.stores().get("yafe-restaurant-v1.0").unwrap();
        assert_eq!(store.len(), 7);
        assert!(store.contains("/"));
        assert!(store.contains("/index.html"));
        assert!(store.contains("/manifest.json"));
    }

    #[test]
    fn install_skips_failing_resources() {
        let mut w = worker();
        let mut net = MockFetch::failing_for("/style.css");
        assert_eq!(w.install(&mut net), 6);
        assert_eq!(w.phase(), WorkerPhase::Installed);
        let store = w.stores().get("yafe-restaurant-v1.0").unwrap();
        assert!(!store.contains("/style.css"));
        assert!(store.contains("/script.js"));
    }

    #[test]
    fn activation_sweeps_only_stale_caches() {
        let mut registry = StoreRegistry::new();
        registry.open("yafe-restaurant-v0.9").put(
            "/old",
            FetchResponse {
                url: "/old".to_string(),
                status: 200,
                content_type: None,
                kind: ResponseKind::Basic,
                body: Vec::new(),
            },
        );
        registry.open("yafe-restaurant-v1.0");

        let mut w = CacheWorker::with_registry(&CacheSection::default(), registry);
        let deleted = w.activate();
        assert_eq!(deleted, vec!["yafe-restaurant-v0.9".to_string()]);
        assert_eq!(w.phase(), WorkerPhase::Active);
        assert!(w.stores().get("yafe-restaurant-v0.9").is_none());
        assert!(w.stores().get("yafe-restaurant-v1.0").is_some());
    }

    #[test]
    fn activation_with_nothing_stale_deletes_nothing() {
        let mut w = worker();
        let mut net = MockFetch::online();
        w.install(&mut net);
        assert!(w.activate().is_empty());
        assert_eq!(w.stores().get("yafe-restaurant-v1.0").unwrap().len(), 7);
    }

    // ---- fetch strategy tests ----

    #[test]
    fn second_fetch_is_served_without_network() {
        let mut w = worker();
        let mut net = MockFetch::online();

        let first = w.handle_fetch("/menu.html", &mut net).unwrap();
        assert_eq!(net.calls(), 1);
        w.flush_pending();

        let second = w.handle_fetch("/menu.html", &mut net).unwrap();
        assert_eq!(net.calls(), 1);
        assert_eq!(first, second);
    }

    #[test]
    fn cache_writes_wait_for_flush() {
        let mut w = worker();
        let mut net = MockFetch::online();

        w.handle_fetch("/a.css", &mut net).unwrap();
        assert_eq!(w.pending_writes(), 1);
        let store = w.stores().get("yafe-restaurant-v1.0").unwrap();
        assert!(!store.contains("/a.css"));

        assert_eq!(w.flush_pending(), 1);
        assert_eq!(w.pending_writes(), 0);
        assert!(w
            .stores()
            .get("yafe-restaurant-v1.0")
            .unwrap()
            .contains("/a.css"));
    }

    #[test]
    fn cross_origin_responses_are_not_cached() {
        let mut w = worker();
        let mut net = MockFetch::online();
        let response = w
            .handle_fetch("https://fonts.googleapis.com/css2?family=Poppins", &mut net)
            .unwrap();
        assert_eq!(response.kind, ResponseKind::Cors);
        assert_eq!(w.pending_writes(), 0);
    }

    #[test]
    fn non_200_responses_are_not_cached() {
        struct NotFound;
        impl FetchBackend for NotFound {
            fn fetch(&mut self, url: &str) -> Result<FetchResponse> {
                Ok(FetchResponse {
                    url: url.to_string(),
                    status: 404,
                    content_type: None,
                    kind: ResponseKind::Basic,
                    body: Vec::new(),
                })
            }
        }
        let mut w = worker();
        let response = w.handle_fetch("/missing", &mut NotFound).unwrap();
        assert_eq!(response.status, 404);
        assert_eq!(w.pending_writes(), 0);
    }

    #[test]
    fn offline_fetch_falls_back_to_cached_index() {
        let mut w = worker();
        let mut online = MockFetch::online();
        w.install(&mut online);
        w.activate();

        let mut offline = MockFetch::offline();
        let response = w.handle_fetch("/menu/specials.html", &mut offline).unwrap();
        assert_eq!(response.body, b"content of /index.html");
    }

    #[test]
    fn offline_without_cached_fallback_propagates_the_error() {
        let mut w = worker();
        let mut offline = MockFetch::offline();
        let err = w.handle_fetch("/anything", &mut offline).unwrap_err();
        assert!(matches!(err, YafeError::Worker(_)));
    }

    #[test]
    fn cached_shell_serves_offline_after_install() {
        let mut w = worker();
        let mut online = MockFetch::online();
        w.install(&mut online);

        let mut offline = MockFetch::offline();
        let response = w.handle_fetch("/style.css", &mut offline).unwrap();
        assert_eq!(response.body, b"content of /style.css");
        // The cache answered; the offline backend was never asked.
        assert_eq!(offline.calls(), 0);
    }
}
