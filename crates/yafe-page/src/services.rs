//! Host services the page engine depends on.
//!
//! The engine never talks to a wall clock, persistent store, or
//! analytics pipeline directly. Hosts hand it implementations of these
//! traits; tests hand it fixtures.

use std::collections::BTreeMap;
use std::time::{SystemTime, UNIX_EPOCH};

use yafe_types::error::Result;

/// Millisecond clock plus calendar date.
pub trait Clock {
    /// Monotonic-enough milliseconds. Only differences matter.
    fn now_ms(&self) -> u64;

    /// Today's date as `(year, month, day)`.
    fn today(&self) -> (u32, u32, u32);
}

/// Small key-value store for persisted UI state (the theme choice).
///
/// Writes can fail (quota, privacy mode); callers treat failures as
/// non-fatal.
pub trait Storage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// Usage event sink.
pub trait Analytics {
    /// Record that `event` happened, with a short free-form detail.
    fn track(&self, event: &str, detail: &str);
}

// ---------------------------------------------------------------------------
// System implementations
// ---------------------------------------------------------------------------

/// [`Clock`] backed by the system clock.
#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }

    fn today(&self) -> (u32, u32, u32) {
        days_to_ymd(self.now_ms() / 86_400_000)
    }
}

/// In-memory [`Storage`]. The default when the host has nothing better.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: BTreeMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// [`Analytics`] that writes to the log and nothing else.
#[derive(Debug, Default)]
pub struct LogAnalytics;

impl Analytics for LogAnalytics {
    fn track(&self, event: &str, detail: &str) {
        log::debug!("analytics: {event} {detail}");
    }
}

// ---------------------------------------------------------------------------
// Date helpers
// ---------------------------------------------------------------------------

pub(crate) fn is_leap(year: u32) -> bool {
    year.is_multiple_of(4) && (!year.is_multiple_of(100) || year.is_multiple_of(400))
}

/// Convert days since the Unix epoch to `(year, month, day)`.
pub(crate) fn days_to_ymd(mut days: u64) -> (u32, u32, u32) {
    let mut year = 1970u32;
    loop {
        let year_len = if is_leap(year) { 366 } else { 365 };
        if days < year_len {
            break;
        }
        days -= year_len;
        year += 1;
    }

    let month_lens = [
        31,
        if is_leap(year) { 29 } else { 28 },
        31,
        30,
        31,
        30,
        31,
        31,
        30,
        31,
        30,
        31,
    ];
    let mut month = 1u32;
    for len in month_lens {
        if days < len {
            break;
        }
        days -= len;
        month += 1;
    }

    (year, month, days as u32 + 1)
}
