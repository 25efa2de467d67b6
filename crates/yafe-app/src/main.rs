//! Headless runner for the Yafe Restaurant site engine.
//!
//! Wires the page controller, the delivery relay, and the cache worker
//! together the way a real host would, then walks through a short
//! scripted session so the moving parts are visible in the log.

use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::Result;

use yafe_page::controller::PageController;
use yafe_page::scrollspy::Section;
use yafe_page::services::{LogAnalytics, MemoryStorage, SystemClock};
use yafe_relay::notify::RelayNotifier;
use yafe_relay::stream::TlsProvider;
use yafe_types::config::SiteConfig;
use yafe_types::error::YafeError;
use yafe_types::event::UiEvent;
use yafe_types::menu::{Category, CategoryFilter};
use yafe_types::url::Url;
use yafe_worker::fetch::{FetchBackend, FetchResponse, ResponseKind};
use yafe_worker::worker::CacheWorker;

/// Images in the demo gallery strip.
const GALLERY_IMAGES: usize = 8;

/// Network backend for the cache worker: plain HTTP GETs through the
/// relay's client, with responses classified against the site origin.
struct HttpFetch {
    origin: Url,
    tls: Option<Box<dyn TlsProvider>>,
}

impl HttpFetch {
    fn new(config: &SiteConfig) -> Result<Self> {
        let origin = Url::parse(&config.site.origin).ok_or_else(|| {
            YafeError::Config(format!("invalid site origin: {}", config.site.origin))
        })?;
        Ok(HttpFetch {
            origin,
            tls: tls_provider(),
        })
    }
}

impl FetchBackend for HttpFetch {
    fn fetch(&mut self, url: &str) -> yafe_types::error::Result<FetchResponse> {
        let absolute = self
            .origin
            .resolve(url)
            .ok_or_else(|| YafeError::Worker(format!("unresolvable url: {url}")))?;
        let response = yafe_relay::http::get(&absolute, self.tls.as_deref())?;
        Ok(FetchResponse {
            url: url.to_string(),
            status: response.status,
            content_type: response.content_type().map(str::to_string),
            kind: ResponseKind::classify(&self.origin.origin(), url),
            body: response.body,
        })
    }
}

#[cfg(feature = "tls-rustls")]
fn tls_provider() -> Option<Box<dyn TlsProvider>> {
    Some(Box::new(yafe_relay::tls::RustlsTlsProvider::new()))
}

#[cfg(not(feature = "tls-rustls"))]
fn tls_provider() -> Option<Box<dyn TlsProvider>> {
    None
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("yafe site engine starting");

    let config = match std::env::args().nth(1) {
        Some(path) => {
            let path = PathBuf::from(path);
            log::info!("loading config from {}", path.display());
            SiteConfig::load(&path)?
        },
        None => {
            log::info!("no config file given, using the stock setup");
            SiteConfig::default()
        },
    };

    let notifier = RelayNotifier::from_config(&config.relay, tls_provider())?;
    log::info!(
        "relay ready: {} sinks via {}",
        notifier.sink_count(),
        config.relay.endpoint,
    );

    // Offline layer first, so the page has something to fall back on.
    let mut backend = HttpFetch::new(&config)?;
    let mut worker = CacheWorker::new(&config.cache);
    let cached = worker.install(&mut backend);
    let stale = worker.activate();
    log::info!(
        "worker active: {cached} shell resources in {}, {} stale caches removed",
        worker.cache_name(),
        stale.len(),
    );

    let mut page = PageController::new(
        &config,
        GALLERY_IMAGES,
        Box::new(SystemClock),
        Box::new(MemoryStorage::new()),
        Box::new(LogAnalytics),
        Box::new(notifier),
    );
    page.set_sections(vec![
        Section::new("home", 0),
        Section::new("menu", 800),
        Section::new("gallery", 1600),
        Section::new("book-table", 2400),
    ]);

    // A short scripted session.
    page.dispatch(UiEvent::LoadCompleted);
    page.dispatch(UiEvent::ThemeTogglePressed);
    log::info!("theme toggled to {}", page.theme().as_str());

    page.dispatch(UiEvent::CategorySelected(CategoryFilter::Only(Category::Main)));
    let result = page.filter_result();
    log::info!(
        "menu filter: {} of {} dishes visible",
        result.matched,
        page.menu().len(),
    );

    page.dispatch(UiEvent::SearchEdited("doro".to_string()));
    thread::sleep(Duration::from_millis(config.timing.search_debounce_ms + 50));
    page.tick();
    log::info!("search applied: {} dishes match", page.filter_result().matched);

    page.dispatch(UiEvent::Scrolled(900));
    thread::sleep(Duration::from_millis(config.timing.scrollspy_debounce_ms + 50));
    page.tick();
    log::info!(
        "scrolled to 900: cta visible {}, active section {:?}",
        page.cta_visible(),
        page.active_section(),
    );

    // Cache-first in action: the second fetch never leaves the cache.
    let probe = "/index.html";
    match worker.handle_fetch(probe, &mut backend) {
        Ok(response) => {
            worker.flush_pending();
            log::info!("fetched {probe}: {} ({} bytes)", response.status, response.body.len());
            if let Ok(again) = worker.handle_fetch(probe, &mut backend) {
                log::info!("refetched {probe} from cache ({} bytes)", again.body.len());
            }
        },
        Err(err) => log::warn!("fetch of {probe} failed: {err}"),
    }

    log::info!("yafe site engine shut down cleanly");
    Ok(())
}
