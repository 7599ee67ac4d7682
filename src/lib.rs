//! Ngram-Spider: a site-scoped crawler that builds n-gram wordlists
//!
//! This crate crawls a single site (or reads a single local document), streams the
//! extracted text through a bounded pipeline, and writes every n-gram in a configured
//! length range to a wordlist file, optionally ranked by frequency.

pub mod config;
pub mod crawler;
pub mod monitor;
pub mod ngram;
pub mod output;
pub mod pipeline;
pub mod session;
pub mod url;

use thiserror::Error;

/// Main error type for Ngram-Spider operations
#[derive(Debug, Error)]
pub enum SpiderError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Error reading file {path}: {source}")]
    SourceRead {
        path: String,
        source: std::io::Error,
    },

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid n-gram length: {0}")]
    InvalidRange(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL: {0}")]
    MissingHost(String),
}

/// Result type alias for Ngram-Spider operations
pub type Result<T> = std::result::Result<T, SpiderError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::{Config, NgramRange, Source};
pub use ngram::{CountMode, NgramEngine, NgramTable};
pub use session::run_session;
