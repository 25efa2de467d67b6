//! Form delivery relay client.
//!
//! Submitted booking and contact records leave the site through an
//! HTTP relay API. Every record fans out to all configured sinks
//! concurrently; the submission only counts as delivered when every
//! sink accepts it. TLS is optional at build time via the
//! `tls-rustls` feature.

pub mod http;
pub mod notify;
pub mod stream;
#[cfg(feature = "tls-rustls")]
pub mod tls;
