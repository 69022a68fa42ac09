//! Crawler module: the bounded-concurrency crawl engine
//!
//! This module contains the core crawling logic, including:
//! - The frontier state machine (pending / in-flight / visited)
//! - HTTP fetching with politeness delays and retry
//! - Link extraction and same-domain filtering
//! - Observer callback dispatch
//! - The scheduler loop and completion detection

mod callbacks;
mod coordinator;
mod fetcher;
mod frontier;
mod parser;

pub use callbacks::{Callbacks, LinkCallback, PageCallback};
pub use coordinator::Crawler;
pub use fetcher::{build_http_client, fetch_with_retry};
pub use frontier::{Admission, Frontier};
pub use parser::{extract_hrefs, same_domain_links};

use crate::config::CrawlConfig;
use crate::Result;
use std::collections::HashSet;

/// Runs a complete crawl and returns the visited-URL set
///
/// Convenience wrapper over [`Crawler`] for callers that need no
/// callbacks or cancellation handle.
///
/// # Arguments
///
/// * `seed` - The URL to start from (scheme optional)
/// * `config` - The crawl configuration
pub async fn crawl(seed: &str, config: CrawlConfig) -> Result<HashSet<String>> {
    Crawler::new(seed, config)?.run().await
}
