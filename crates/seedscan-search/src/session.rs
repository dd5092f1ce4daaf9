//! Shared, lock-free state every worker thread reads and updates while
//! scanning its chunk of the seed space: the auto-cutoff threshold, the
//! result counter, and a cooperative cancellation flag.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// State shared across worker threads for the lifetime of one search.
///
/// Every field is an atomic so workers never need a lock; `learned_cutoff`
/// in particular is only ever raised (compare-and-swap loop), never lowered,
/// which is what makes auto-cutoff monotonic across the whole search.
pub struct SearchSession {
    learned_cutoff: AtomicU64,
    results_found: AtomicU64,
    cancelled: AtomicBool,
    auto_cutoff: bool,
}

impl SearchSession {
    pub fn new(initial_cutoff: u64, auto_cutoff: bool) -> Self {
        SearchSession {
            learned_cutoff: AtomicU64::new(initial_cutoff),
            results_found: AtomicU64::new(0),
            cancelled: AtomicBool::new(false),
            auto_cutoff,
        }
    }

    /// The threshold a score must meet or exceed to be accepted right now.
    pub fn cutoff(&self) -> u64 {
        self.learned_cutoff.load(Ordering::Relaxed)
    }

    /// If auto-cutoff is enabled and `score` beats the current threshold,
    /// atomically raise it. A CAS loop rather than a single swap, so a
    /// concurrent raise from another worker is never clobbered by a smaller
    /// one racing behind it.
    pub fn observe_score(&self, score: u64) {
        if !self.auto_cutoff {
            return;
        }
        let mut current = self.learned_cutoff.load(Ordering::Relaxed);
        while score > current {
            match self.learned_cutoff.compare_exchange_weak(
                current,
                score,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => {
                    log::debug!("auto-cutoff raised to {score}");
                    break;
                }
                Err(observed) => current = observed,
            }
        }
    }

    pub fn record_result(&self) -> u64 {
        self.results_found.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn results_found(&self) -> u64 {
        self.results_found.load(Ordering::Relaxed)
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cutoff_never_decreases() {
        let session = SearchSession::new(10, true);
        session.observe_score(42);
        assert_eq!(session.cutoff(), 42);
        session.observe_score(5);
        assert_eq!(session.cutoff(), 42);
    }

    #[test]
    fn disabled_auto_cutoff_never_moves_the_threshold() {
        let session = SearchSession::new(10, false);
        session.observe_score(1000);
        assert_eq!(session.cutoff(), 10);
    }

    #[test]
    fn cancellation_is_observable_after_being_set() {
        let session = SearchSession::new(0, false);
        assert!(!session.is_cancelled());
        session.cancel();
        assert!(session.is_cancelled());
    }

    #[test]
    fn result_counter_increments_and_returns_new_total() {
        let session = SearchSession::new(0, false);
        assert_eq!(session.record_result(), 1);
        assert_eq!(session.record_result(), 2);
        assert_eq!(session.results_found(), 2);
    }
}
