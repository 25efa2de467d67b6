//! Error types for the Yafe site engine.

use std::io;

/// Errors produced by the site engine crates.
#[derive(Debug, thiserror::Error)]
pub enum YafeError {
    #[error("config error: {0}")]
    Config(String),

    #[error("relay error: {0}")]
    Relay(String),

    #[error("worker error: {0}")]
    Worker(String),

    #[error("form error: {0}")]
    Form(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, YafeError>;
