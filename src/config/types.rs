use serde::Deserialize;
use std::time::Duration;

fn default_concurrency_limit() -> usize {
    10
}

fn default_delay_min() -> f64 {
    0.5
}

fn default_delay_max() -> f64 {
    2.0
}

fn default_request_timeout() -> f64 {
    10.0
}

fn default_max_retries() -> u32 {
    2
}

/// Crawl behavior configuration
///
/// Immutable once a crawl starts. Loadable from a TOML file, with every
/// field optional and defaulted.
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlConfig {
    /// Maximum number of pages fetched simultaneously
    #[serde(rename = "concurrency-limit", default = "default_concurrency_limit")]
    pub concurrency_limit: usize,

    /// Minimum politeness delay before each request attempt (seconds)
    #[serde(rename = "delay-min", default = "default_delay_min")]
    pub delay_min: f64,

    /// Maximum politeness delay before each request attempt (seconds)
    #[serde(rename = "delay-max", default = "default_delay_max")]
    pub delay_max: f64,

    /// Per-request timeout (seconds)
    #[serde(rename = "request-timeout", default = "default_request_timeout")]
    pub request_timeout: f64,

    /// Additional fetch attempts after the first failure
    #[serde(rename = "max-retries", default = "default_max_retries")]
    pub max_retries: u32,

    /// Widens log verbosity; has no effect on crawl results
    #[serde(default)]
    pub verbose: bool,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            concurrency_limit: default_concurrency_limit(),
            delay_min: default_delay_min(),
            delay_max: default_delay_max(),
            request_timeout: default_request_timeout(),
            max_retries: default_max_retries(),
            verbose: false,
        }
    }
}

impl CrawlConfig {
    /// The per-request timeout as a duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs_f64(self.request_timeout)
    }
}
