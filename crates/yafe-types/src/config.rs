//! Site configuration.
//!
//! Everything tunable about the site lives here: relay destinations,
//! cache shell, slider geometry, timing constants, and the menu itself.
//! Loaded from a TOML file; every field has a default, so an empty file
//! (or no file at all) yields the stock Yafe Restaurant setup.

use std::path::Path;

use serde::Deserialize;

use crate::error::Result;
use crate::menu::{Category, Dietary, MenuItem};

/// Top-level site configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SiteConfig {
    #[serde(default)]
    pub site: SiteSection,
    #[serde(default)]
    pub relay: RelaySection,
    #[serde(default)]
    pub cache: CacheSection,
    #[serde(default)]
    pub slider: SliderSection,
    #[serde(default)]
    pub timing: TimingSection,
    #[serde(default)]
    pub cta: CtaSection,
    #[serde(default)]
    pub picker: PickerSection,
    /// The menu. Defaults to the stock menu when the config omits it.
    #[serde(default = "default_menu")]
    pub menu: Vec<MenuItem>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        SiteConfig {
            site: SiteSection::default(),
            relay: RelaySection::default(),
            cache: CacheSection::default(),
            slider: SliderSection::default(),
            timing: TimingSection::default(),
            cta: CtaSection::default(),
            picker: PickerSection::default(),
            menu: default_menu(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(text: &str) -> Result<Self> {
        let config = toml::from_str(text)?;
        Ok(config)
    }
}

/// Site identity.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SiteSection {
    /// Origin the worker treats as same-origin for caching.
    #[serde(default = "default_origin")]
    pub origin: String,
    /// Phone number shown when relay delivery fails.
    #[serde(default = "default_fallback_phone")]
    pub fallback_phone: String,
    /// Element id of the booking section, the smooth-scroll target.
    #[serde(default = "default_booking_section")]
    pub booking_section: String,
}

impl Default for SiteSection {
    fn default() -> Self {
        SiteSection {
            origin: default_origin(),
            fallback_phone: default_fallback_phone(),
            booking_section: default_booking_section(),
        }
    }
}

/// One relay destination: a service and the template it renders.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SinkEntry {
    pub service: String,
    pub template: String,
}

/// Form delivery relay.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RelaySection {
    /// Relay API endpoint.
    #[serde(default = "default_relay_endpoint")]
    pub endpoint: String,
    /// Public API key sent with every request.
    #[serde(default = "default_public_key")]
    pub public_key: String,
    /// Destinations every submission fans out to. All must accept.
    #[serde(default = "default_sinks")]
    pub sinks: Vec<SinkEntry>,
}

impl Default for RelaySection {
    fn default() -> Self {
        RelaySection {
            endpoint: default_relay_endpoint(),
            public_key: default_public_key(),
            sinks: default_sinks(),
        }
    }
}

/// Offline cache layer.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CacheSection {
    /// Versioned cache name. Bumping it invalidates old caches on
    /// activation.
    #[serde(default = "default_cache_version")]
    pub version: String,
    /// App shell pre-cached at install time.
    #[serde(default = "default_shell")]
    pub shell: Vec<String>,
    /// Page served when a navigation fetch fails offline.
    #[serde(default = "default_offline_page")]
    pub offline_page: String,
}

impl Default for CacheSection {
    fn default() -> Self {
        CacheSection {
            version: default_cache_version(),
            shell: default_shell(),
            offline_page: default_offline_page(),
        }
    }
}

/// Gallery slider geometry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SliderSection {
    /// Width of one slide in pixels, including gap.
    #[serde(default = "default_image_width")]
    pub image_width: i32,
    /// Slides visible at once; the slider never scrolls past
    /// `count - visible`.
    #[serde(default = "default_visible")]
    pub visible: usize,
    /// Minimum horizontal drag, in pixels, to count as a swipe.
    #[serde(default = "default_swipe_threshold")]
    pub swipe_threshold: i32,
}

impl Default for SliderSection {
    fn default() -> Self {
        SliderSection {
            image_width: default_image_width(),
            visible: default_visible(),
            swipe_threshold: default_swipe_threshold(),
        }
    }
}

/// Timing constants, all in milliseconds.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TimingSection {
    /// How long a success banner stays up before auto-hiding.
    #[serde(default = "default_banner_hide_ms")]
    pub banner_hide_ms: u64,
    /// Debounce on menu search input.
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,
    /// Debounce on scroll-spy recomputation.
    #[serde(default = "default_scrollspy_debounce_ms")]
    pub scrollspy_debounce_ms: u64,
    /// Minimum time the preloader stays visible.
    #[serde(default = "default_preloader_min_ms")]
    pub preloader_min_ms: u64,
    /// Preloader gives up waiting for the load signal after this long.
    #[serde(default = "default_preloader_fallback_ms")]
    pub preloader_fallback_ms: u64,
    /// Preloader fade-out duration.
    #[serde(default = "default_preloader_fade_ms")]
    pub preloader_fade_ms: u64,
}

impl Default for TimingSection {
    fn default() -> Self {
        TimingSection {
            banner_hide_ms: default_banner_hide_ms(),
            search_debounce_ms: default_search_debounce_ms(),
            scrollspy_debounce_ms: default_scrollspy_debounce_ms(),
            preloader_min_ms: default_preloader_min_ms(),
            preloader_fallback_ms: default_preloader_fallback_ms(),
            preloader_fade_ms: default_preloader_fade_ms(),
        }
    }
}

/// Floating call-to-action button.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CtaSection {
    /// Scroll offset past which the button shows.
    #[serde(default = "default_cta_threshold")]
    pub scroll_threshold: i32,
    /// Element id the button smooth-scrolls to.
    #[serde(default = "default_cta_target")]
    pub target: String,
}

impl Default for CtaSection {
    fn default() -> Self {
        CtaSection {
            scroll_threshold: default_cta_threshold(),
            target: default_cta_target(),
        }
    }
}

/// Date/time picker bounds.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PickerSection {
    /// Earliest bookable time of day.
    #[serde(default = "default_open_time")]
    pub open_time: String,
    /// Latest bookable time of day.
    #[serde(default = "default_close_time")]
    pub close_time: String,
    /// Display format for picked dates.
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

impl Default for PickerSection {
    fn default() -> Self {
        PickerSection {
            open_time: default_open_time(),
            close_time: default_close_time(),
            date_format: default_date_format(),
        }
    }
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

fn default_origin() -> String {
    "https://yafe-restaurant.example".to_string()
}

fn default_fallback_phone() -> String {
    "+251 911 234 567".to_string()
}

fn default_booking_section() -> String {
    "book-table".to_string()
}

fn default_relay_endpoint() -> String {
    "https://api.emailjs.com/api/v1.0/email/send".to_string()
}

fn default_public_key() -> String {
    "GOydHJrIyoANtr4L5".to_string()
}

fn default_sinks() -> Vec<SinkEntry> {
    vec![
        SinkEntry {
            service: "service_y1uq1k6".to_string(),
            template: "template_0913zr5".to_string(),
        },
        SinkEntry {
            service: "service_ikjy30a".to_string(),
            template: "template_abwvt3k".to_string(),
        },
    ]
}

fn default_cache_version() -> String {
    "yafe-restaurant-v1.0".to_string()
}

fn default_shell() -> Vec<String> {
    [
        "/",
        "/index.html",
        "/style.css",
        "/script.js",
        "/manifest.json",
        "https://fonts.googleapis.com/css2?family=Playfair+Display:wght@600;700&family=Poppins:wght@300;400;500;600;700&display=swap",
        "https://cdn.jsdelivr.net/npm/emailjs-com@3/dist/email.min.js",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_offline_page() -> String {
    "/index.html".to_string()
}

fn default_image_width() -> i32 {
    320
}

fn default_visible() -> usize {
    3
}

fn default_swipe_threshold() -> i32 {
    50
}

fn default_banner_hide_ms() -> u64 {
    5000
}

fn default_search_debounce_ms() -> u64 {
    300
}

fn default_scrollspy_debounce_ms() -> u64 {
    100
}

fn default_preloader_min_ms() -> u64 {
    1800
}

fn default_preloader_fallback_ms() -> u64 {
    3500
}

fn default_preloader_fade_ms() -> u64 {
    800
}

fn default_cta_threshold() -> i32 {
    300
}

fn default_cta_target() -> String {
    "book-table".to_string()
}

fn default_open_time() -> String {
    "12:00".to_string()
}

fn default_close_time() -> String {
    "22:00".to_string()
}

fn default_date_format() -> String {
    "Y-m-d".to_string()
}

fn default_menu() -> Vec<MenuItem> {
    vec![
        MenuItem::new("Sambusa", Category::Starter, "90 ETB")
            .with_tag(Dietary::Vegetarian),
        MenuItem::new("Azifa", Category::Starter, "110 ETB")
            .with_tag(Dietary::Vegan)
            .with_tag(Dietary::GlutenFree),
        MenuItem::new("Doro Wat", Category::Main, "260 ETB")
            .with_tag(Dietary::Spicy),
        MenuItem::new("Beyaynetu", Category::Main, "220 ETB")
            .with_tag(Dietary::Vegan)
            .with_tag(Dietary::GlutenFree),
        MenuItem::new("Kitfo", Category::Main, "280 ETB")
            .with_tag(Dietary::Spicy),
        MenuItem::new("Yafe Special Rice", Category::Rice, "190 ETB"),
        MenuItem::new("Vegetable Fried Rice", Category::Rice, "170 ETB")
            .with_tag(Dietary::Vegetarian),
        MenuItem::new("Injera", Category::Bread, "40 ETB")
            .with_tag(Dietary::Vegan)
            .with_tag(Dietary::GlutenFree),
        MenuItem::new("Ambasha", Category::Bread, "60 ETB")
            .with_tag(Dietary::Vegetarian),
        MenuItem::new("Baklava", Category::Dessert, "130 ETB")
            .with_tag(Dietary::Vegetarian),
    ]
}
