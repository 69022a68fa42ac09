//! Frontier: the shared three-set crawl state
//!
//! Every URL the crawl has seen lives in exactly one of three sets:
//! `pending` (discovered, not yet fetched), `in_flight` (fetch dispatched),
//! or `visited` (fetch attempt completed, success or terminal failure).
//! Transitions are strictly pending -> in_flight -> visited; a URL never
//! re-enters an earlier set.
//!
//! All three sets sit behind a single mutex so that membership checks and
//! cross-set moves are one critical section. Two tasks discovering the
//! same URL concurrently race on `try_admit`; the first writer wins and
//! the rest observe it already present.

use std::collections::HashSet;
use std::sync::Mutex;

/// Outcome of asking the frontier for the next URL to fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Admission {
    /// A URL was moved from pending to in-flight
    Ready(String),

    /// Nothing admissible right now (concurrency limit reached or pending
    /// empty) but fetches are still in flight
    Waiting,

    /// Pending and in-flight are both empty; the crawl is complete
    Drained,
}

#[derive(Debug, Default)]
struct FrontierSets {
    pending: HashSet<String>,
    in_flight: HashSet<String>,
    visited: HashSet<String>,
}

impl FrontierSets {
    fn contains(&self, url: &str) -> bool {
        self.pending.contains(url) || self.in_flight.contains(url) || self.visited.contains(url)
    }
}

/// Shared crawl state tracking per-URL progress
///
/// Cheap to share: clone an `Arc<Frontier>` into each fetch task. None of
/// the operations hold the lock across an await point.
#[derive(Debug, Default)]
pub struct Frontier {
    sets: Mutex<FrontierSets>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Admits a URL into `pending` if it has never been seen
    ///
    /// Returns true if the URL was newly admitted, false if it was already
    /// present in any of the three sets. Check and insert happen under one
    /// lock, so concurrent discovery of the same URL admits it exactly
    /// once.
    pub fn try_admit(&self, url: String) -> bool {
        let mut sets = self.sets.lock().unwrap();
        if sets.contains(&url) {
            return false;
        }
        sets.pending.insert(url)
    }

    /// Moves one pending URL to in-flight, respecting the concurrency limit
    ///
    /// Selection order within `pending` is arbitrary; the final visited
    /// set does not depend on it.
    pub fn next_in_flight(&self, concurrency_limit: usize) -> Admission {
        let mut sets = self.sets.lock().unwrap();

        if sets.pending.is_empty() {
            if sets.in_flight.is_empty() {
                return Admission::Drained;
            }
            return Admission::Waiting;
        }

        if sets.in_flight.len() >= concurrency_limit {
            return Admission::Waiting;
        }

        match sets.pending.iter().next().cloned() {
            Some(url) => {
                sets.pending.remove(&url);
                sets.in_flight.insert(url.clone());
                Admission::Ready(url)
            }
            None => Admission::Waiting,
        }
    }

    /// Moves a URL from in-flight to visited (terminal)
    ///
    /// Applies to successes and exhausted-retry failures alike; a failed
    /// URL is never requeued.
    pub fn mark_visited(&self, url: &str) {
        let mut sets = self.sets.lock().unwrap();
        sets.in_flight.remove(url);
        sets.visited.insert(url.to_string());
    }

    /// True when both pending and in-flight are empty
    pub fn is_complete(&self) -> bool {
        let sets = self.sets.lock().unwrap();
        sets.pending.is_empty() && sets.in_flight.is_empty()
    }

    pub fn pending_len(&self) -> usize {
        self.sets.lock().unwrap().pending.len()
    }

    pub fn in_flight_len(&self) -> usize {
        self.sets.lock().unwrap().in_flight.len()
    }

    pub fn visited_len(&self) -> usize {
        self.sets.lock().unwrap().visited.len()
    }

    /// A copy of the visited set
    pub fn visited_snapshot(&self) -> HashSet<String> {
        self.sets.lock().unwrap().visited.clone()
    }
}
