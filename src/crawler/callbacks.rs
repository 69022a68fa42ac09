//! Observer hooks for crawl events
//!
//! Two independent, optional slots: one fires for every newly discovered
//! link, one fires once per processed page with all the links found on
//! it. Both run synchronously inside the fetch task that produced the
//! event. A panicking observer is caught and logged at the call site;
//! it never aborts the crawl or corrupts frontier state.

use std::collections::HashSet;
use std::panic::{catch_unwind, AssertUnwindSafe};

/// Hook invoked with each newly discovered same-domain URL
pub type LinkCallback = Box<dyn Fn(&str) + Send + Sync>;

/// Hook invoked once per processed page with every link found on it
pub type PageCallback = Box<dyn Fn(&str, &HashSet<String>) + Send + Sync>;

/// The crawl's observer slots
///
/// Owned by the caller, fixed before the crawl starts; both slots default
/// to no-ops.
#[derive(Default)]
pub struct Callbacks {
    on_link_discovered: Option<LinkCallback>,
    on_page_processed: Option<PageCallback>,
}

impl Callbacks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the per-discovered-link hook
    pub fn set_link_discovered<F>(&mut self, callback: F)
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.on_link_discovered = Some(Box::new(callback));
    }

    /// Sets the per-processed-page hook
    pub fn set_page_processed<F>(&mut self, callback: F)
    where
        F: Fn(&str, &HashSet<String>) + Send + Sync + 'static,
    {
        self.on_page_processed = Some(Box::new(callback));
    }

    /// Invokes the link hook, isolating observer panics
    pub fn link_discovered(&self, url: &str) {
        if let Some(callback) = &self.on_link_discovered {
            if catch_unwind(AssertUnwindSafe(|| callback(url))).is_err() {
                tracing::error!("Link callback panicked for {}", url);
            }
        }
    }

    /// Invokes the page hook, isolating observer panics
    pub fn page_processed(&self, url: &str, links: &HashSet<String>) {
        if let Some(callback) = &self.on_page_processed {
            if catch_unwind(AssertUnwindSafe(|| callback(url, links))).is_err() {
                tracing::error!("Page callback panicked for {}", url);
            }
        }
    }
}

impl std::fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Callbacks")
            .field("on_link_discovered", &self.on_link_discovered.is_some())
            .field("on_page_processed", &self.on_page_processed.is_some())
            .finish()
    }
}
