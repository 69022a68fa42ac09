//! Crawl coordinator - scheduler loop and task orchestration
//!
//! This module owns the control loop that drives a crawl: admitting
//! pending URLs up to the concurrency limit, spawning one fetch task per
//! admission, and detecting global completion when the frontier is empty
//! of both pending and in-flight work. Cancellation stops admission and
//! lets outstanding fetches finish their current attempt before the
//! shared HTTP client is released.

use crate::config::{validate, CrawlConfig};
use crate::crawler::callbacks::Callbacks;
use crate::crawler::fetcher::{build_http_client, fetch_with_retry};
use crate::crawler::frontier::{Admission, Frontier};
use crate::crawler::parser::same_domain_links;
use crate::url::normalize;
use crate::{Result, SweepError};
use reqwest::Client;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use url::Url;

/// How long the scheduler idles before re-checking the frontier when
/// nothing is admissible
const SCHEDULER_TICK: Duration = Duration::from_millis(50);

/// Progress is logged every this many visited pages
const PROGRESS_INTERVAL: usize = 10;

/// Same-domain crawler
///
/// Construct with a seed URL and configuration, optionally attach
/// callbacks, then [`run`](Crawler::run) to completion:
///
/// ```no_run
/// use linksweep::config::CrawlConfig;
/// use linksweep::crawler::Crawler;
///
/// # async fn example() -> linksweep::Result<()> {
/// let mut crawler = Crawler::new("https://example.com", CrawlConfig::default())?;
/// crawler.set_link_callback(|url| println!("found {}", url));
/// let visited = crawler.run().await?;
/// println!("{} pages", visited.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Crawler {
    config: CrawlConfig,
    seed: String,
    callbacks: Callbacks,
    shutdown: Arc<AtomicBool>,
}

impl Crawler {
    /// Creates a crawler for the given seed URL
    ///
    /// The seed gets `https://` prepended when it carries no scheme. A
    /// seed with a malformed authority is rejected here, before any
    /// network activity.
    pub fn new(seed: &str, config: CrawlConfig) -> Result<Self> {
        validate(&config)?;
        let seed = normalize_seed(seed)?;

        Ok(Self {
            config,
            seed,
            callbacks: Callbacks::new(),
            shutdown: Arc::new(AtomicBool::new(false)),
        })
    }

    /// The normalized seed URL this crawler starts from
    pub fn seed(&self) -> &str {
        &self.seed
    }

    /// Sets the hook invoked for each newly discovered link
    pub fn set_link_callback<F>(&mut self, callback: F)
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.callbacks.set_link_discovered(callback);
    }

    /// Sets the hook invoked once per processed page
    pub fn set_page_callback<F>(&mut self, callback: F)
    where
        F: Fn(&str, &HashSet<String>) + Send + Sync + 'static,
    {
        self.callbacks.set_page_processed(callback);
    }

    /// Returns a handle that stops the crawl when set
    ///
    /// Once the flag is true the scheduler admits no new URLs; fetches
    /// already in flight complete their current attempt and the visited
    /// set is returned as-is (incomplete).
    pub fn shutdown_handle(&self) -> Arc<AtomicBool> {
        self.shutdown.clone()
    }

    /// Runs the crawl to completion and returns the visited set
    ///
    /// Scheduler loop: while pending URLs exist and fewer than
    /// `concurrency_limit` fetches are in flight, admit one and spawn its
    /// fetch-and-process task; otherwise idle one tick and re-check. The
    /// crawl is complete exactly when the frontier has neither pending
    /// nor in-flight work.
    pub async fn run(self) -> Result<HashSet<String>> {
        let Crawler {
            config,
            seed,
            callbacks,
            shutdown,
        } = self;
        let config = Arc::new(config);
        let callbacks = Arc::new(callbacks);
        let frontier = Arc::new(Frontier::new());

        // Shared connection pool for the whole crawl; failing to build it
        // is fatal before any work starts.
        let client = build_http_client(&config)?;

        frontier.try_admit(seed.clone());
        tracing::info!("Starting crawl from {}", seed);

        let start = Instant::now();
        let mut last_reported = 0;

        loop {
            if shutdown.load(Ordering::SeqCst) {
                tracing::warn!(
                    "Shutdown requested; draining {} in-flight fetches",
                    frontier.in_flight_len()
                );
                break;
            }

            match frontier.next_in_flight(config.concurrency_limit) {
                Admission::Ready(url) => {
                    tokio::spawn(process_page(
                        client.clone(),
                        Arc::clone(&config),
                        seed.clone(),
                        url,
                        Arc::clone(&frontier),
                        Arc::clone(&callbacks),
                    ));
                }
                Admission::Waiting => {
                    tokio::time::sleep(SCHEDULER_TICK).await;
                }
                Admission::Drained => {
                    tracing::info!("Frontier drained, crawl complete");
                    break;
                }
            }

            let visited = frontier.visited_len();
            if visited >= last_reported + PROGRESS_INTERVAL {
                let rate = visited as f64 / start.elapsed().as_secs_f64();
                tracing::info!(
                    "Progress: {} visited, {} pending, {} in flight, {:.2} pages/sec",
                    visited,
                    frontier.pending_len(),
                    frontier.in_flight_len(),
                    rate
                );
                last_reported = visited;
            }
        }

        // Both exits land here: normal completion has nothing in flight,
        // cancellation waits for outstanding attempts to finish.
        while frontier.in_flight_len() > 0 {
            tokio::time::sleep(SCHEDULER_TICK).await;
        }
        drop(client);

        let visited = frontier.visited_snapshot();
        tracing::info!(
            "Crawl finished in {:.2?}: {} pages visited",
            start.elapsed(),
            visited.len()
        );

        Ok(visited)
    }
}

/// Fetch-and-process body run by each spawned task
///
/// A failed fetch still marks the URL visited; it contributes zero links
/// and is never requeued. Per-URL errors stay local to the task.
async fn process_page(
    client: Client,
    config: Arc<CrawlConfig>,
    seed: String,
    url: String,
    frontier: Arc<Frontier>,
    callbacks: Arc<Callbacks>,
) {
    let html = match fetch_with_retry(&client, &url, &config).await {
        Some(html) => html,
        None => {
            tracing::warn!("No content for {}", url);
            frontier.mark_visited(&url);
            return;
        }
    };

    // Frontier URLs were normalized on the way in, so this parse only
    // fails if the invariant was broken upstream.
    let links = match Url::parse(&url) {
        Ok(base) => same_domain_links(&html, &base, &seed),
        Err(e) => {
            tracing::error!("Frontier URL {} failed to parse: {}", url, e);
            HashSet::new()
        }
    };

    for link in &links {
        if frontier.try_admit(link.clone()) {
            tracing::debug!("New link discovered: {}", link);
            callbacks.link_discovered(link);
        }
    }

    callbacks.page_processed(&url, &links);
    frontier.mark_visited(&url);
}

/// Normalizes the seed URL supplied at crawl start
///
/// Prepends `https://` when no scheme is present, strips any fragment,
/// and requires a parseable authority.
fn normalize_seed(raw: &str) -> Result<String> {
    let raw = raw.trim();

    let with_scheme = if raw.starts_with("http://") || raw.starts_with("https://") {
        raw.to_string()
    } else {
        format!("https://{}", raw)
    };

    let parsed = Url::parse(&with_scheme).map_err(|e| SweepError::InvalidSeed {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;

    if parsed.host_str().is_none() {
        return Err(SweepError::InvalidSeed {
            url: raw.to_string(),
            reason: "missing host".to_string(),
        });
    }

    normalize(&with_scheme, &parsed).map_err(|e| SweepError::InvalidSeed {
        url: raw.to_string(),
        reason: e.to_string(),
    })
}
