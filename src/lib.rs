//! Linksweep: a same-domain link inventory crawler
//!
//! This crate discovers every page reachable from a seed URL within that
//! URL's domain, pacing requests politely and bounding the number of
//! simultaneous fetches. Discovered links can be streamed to text, CSV, or
//! JSON output files as the crawl runs.

pub mod config;
pub mod crawler;
pub mod output;
pub mod url;

use thiserror::Error;

/// Main error type for linksweep operations
///
/// Only conditions that prevent the crawl loop from starting surface here.
/// Per-URL fetch failures are absorbed by the engine and never escalate.
#[derive(Debug, Error)]
pub enum SweepError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid seed URL '{url}': {reason}")]
    InvalidSeed { url: String, reason: String },

    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("Output error: {0}")]
    Output(#[from] OutputError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Crawl interrupted before completion")]
    Interrupted,
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
}

/// URL-specific errors
///
/// A normalization failure is an expected filtering outcome for discovered
/// links; it is only an error when the seed itself fails to normalize.
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing authority in URL")]
    MissingAuthority,

    #[error("Empty URL reference")]
    Empty,
}

/// Output-specific errors
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Unsupported output extension: {0} (use .txt, .text, .csv, or .json)")]
    UnsupportedExtension(String),

    #[error("Failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for linksweep operations
pub type Result<T> = std::result::Result<T, SweepError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::CrawlConfig;
pub use crawler::{Callbacks, Crawler, Frontier};
pub use output::{LinkWriter, OutputFormat};
pub use url::{normalize, same_origin};
