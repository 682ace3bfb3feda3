//! Lookup statistics tracking.
//!
//! Counts successful lookups and failed ones by category using atomic
//! counters, so the tracker can be shared behind an `Arc`.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use super::categorization::GatewayFailureKind;

/// Thread-safe lookup statistics tracker.
///
/// All failure categories are initialized to zero on creation.
pub struct LookupStats {
    successes: AtomicUsize,
    failures: HashMap<GatewayFailureKind, AtomicUsize>,
}

impl LookupStats {
    /// Create a tracker with every category at zero.
    pub fn new() -> Self {
        let mut failures = HashMap::new();
        for kind in GatewayFailureKind::iter() {
            failures.insert(kind, AtomicUsize::new(0));
        }

        LookupStats {
            successes: AtomicUsize::new(0),
            failures,
        }
    }

    /// Increment the success counter.
    pub fn record_success(&self) {
        self.successes.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment a failure counter.
    pub fn record_failure(&self, kind: GatewayFailureKind) {
        if let Some(counter) = self.failures.get(&kind) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment failure counter for {:?} which is not in the map. \
                 This indicates a bug in LookupStats initialization.",
                kind
            );
        }
    }

    /// Get the success count.
    pub fn successes(&self) -> usize {
        self.successes.load(Ordering::SeqCst)
    }

    /// Get the count for a failure category.
    pub fn failure_count(&self, kind: GatewayFailureKind) -> usize {
        self.failures
            .get(&kind)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Sum of all failure counters.
    pub fn total_failures(&self) -> usize {
        self.failures
            .values()
            .map(|c| c.load(Ordering::SeqCst))
            .sum()
    }

    /// Non-zero failure counts, most frequent first.
    pub fn failure_breakdown(&self) -> Vec<(GatewayFailureKind, usize)> {
        let mut counts: Vec<(GatewayFailureKind, usize)> = GatewayFailureKind::iter()
            .map(|kind| (kind, self.failure_count(kind)))
            .filter(|(_, count)| *count > 0)
            .collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.as_str().cmp(b.0.as_str())));
        counts
    }
}

impl Default for LookupStats {
    fn default() -> Self {
        Self::new()
    }
}
