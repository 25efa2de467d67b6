//! Fetch backend seam.
//!
//! The worker never opens sockets itself; it asks a [`FetchBackend`]
//! for resources. The binary wires in an HTTP-backed implementation,
//! tests wire in fixtures.

use yafe_types::error::Result;
use yafe_types::url::same_origin;

/// How a response relates to the page origin. Mirrors the response
/// types a browser hands a service worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKind {
    /// Same-origin. Headers and body fully readable.
    Basic,
    /// Cross-origin, shared by the server.
    Cors,
    /// Cross-origin, nothing readable.
    Opaque,
}

impl ResponseKind {
    /// Classify a resource URL against the page origin. Relative
    /// references are same-origin by construction.
    pub fn classify(page_origin: &str, url: &str) -> ResponseKind {
        if !url.contains("://") && !url.starts_with("//") {
            return ResponseKind::Basic;
        }
        if same_origin(page_origin, url) {
            ResponseKind::Basic
        } else {
            ResponseKind::Cors
        }
    }
}

/// One fetched resource.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchResponse {
    pub url: String,
    pub status: u16,
    pub content_type: Option<String>,
    pub kind: ResponseKind,
    pub body: Vec<u8>,
}

/// Something that can fetch resources from the network.
pub trait FetchBackend {
    fn fetch(&mut self, url: &str) -> Result<FetchResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: &str = "https://yafe-restaurant.example";

    #[test]
    fn relative_urls_are_basic() {
        assert_eq!(ResponseKind::classify(ORIGIN, "/"), ResponseKind::Basic);
        assert_eq!(
            ResponseKind::classify(ORIGIN, "/style.css"),
            ResponseKind::Basic,
        );
        assert_eq!(
            ResponseKind::classify(ORIGIN, "assets/food.jpg"),
            ResponseKind::Basic,
        );
    }

    #[test]
    fn same_origin_absolute_urls_are_basic() {
        assert_eq!(
            ResponseKind::classify(ORIGIN, "https://yafe-restaurant.example/index.html"),
            ResponseKind::Basic,
        );
    }

    #[test]
    fn cross_origin_urls_are_cors() {
        assert_eq!(
            ResponseKind::classify(ORIGIN, "https://fonts.googleapis.com/css2?family=Poppins"),
            ResponseKind::Cors,
        );
        assert_eq!(
            ResponseKind::classify(ORIGIN, "//cdn.jsdelivr.net/npm/lib.js"),
            ResponseKind::Cors,
        );
    }

    #[test]
    fn scheme_mismatch_is_cross_origin() {
        assert_eq!(
            ResponseKind::classify(ORIGIN, "http://yafe-restaurant.example/"),
            ResponseKind::Cors,
        );
    }
}
