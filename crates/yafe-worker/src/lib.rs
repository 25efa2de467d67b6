//! Offline cache worker for the Yafe Restaurant site.
//!
//! A headless rendition of the site's service worker: pre-caches the
//! app shell at install time, serves fetches cache-first with deferred
//! cache writes, sweeps stale cache versions on activation, and answers
//! background sync and push wakeups.

pub mod fetch;
pub mod hooks;
pub mod store;
pub mod worker;
