//! Bundle loading and routing metrics.
//!
//! Counters for cache behaviour, source fetches and navigation outcomes. One
//! instance is shared (behind an `Arc`) by the store, the navigator and the
//! HTTP server.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Default)]
pub struct BundleMetrics {
    /// Number of loads answered from the bundle cache
    cache_hits: AtomicUsize,

    /// Number of loads that had to go to the source
    cache_misses: AtomicUsize,

    /// Number of fetches issued to the bundle source
    source_fetches: AtomicUsize,

    /// Number of fetches that failed or returned unusable content
    load_failures: AtomicUsize,

    /// Number of paths rejected as not found
    not_found: AtomicUsize,

    /// Number of navigation results discarded because a newer navigation started
    superseded: AtomicUsize,
}

impl BundleMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cache_miss(&self) {
        self.cache_misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_source_fetch(&self) {
        self.source_fetches.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_load_failure(&self) {
        self.load_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_not_found(&self) {
        self.not_found.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_superseded(&self) {
        self.superseded.fetch_add(1, Ordering::Relaxed);
    }

    pub fn cache_hits(&self) -> usize {
        self.cache_hits.load(Ordering::Relaxed)
    }

    pub fn cache_misses(&self) -> usize {
        self.cache_misses.load(Ordering::Relaxed)
    }

    pub fn source_fetches(&self) -> usize {
        self.source_fetches.load(Ordering::Relaxed)
    }

    pub fn load_failures(&self) -> usize {
        self.load_failures.load(Ordering::Relaxed)
    }

    pub fn not_found(&self) -> usize {
        self.not_found.load(Ordering::Relaxed)
    }

    pub fn superseded(&self) -> usize {
        self.superseded.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let hits = self.cache_hits();
        let misses = self.cache_misses();
        let total_cache_queries = hits + misses;
        let cache_hit_rate = if total_cache_queries > 0 {
            (hits as f64 / total_cache_queries as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            cache_hits: hits,
            cache_misses: misses,
            cache_hit_rate,
            source_fetches: self.source_fetches(),
            load_failures: self.load_failures(),
            not_found: self.not_found(),
            superseded: self.superseded(),
        }
    }
}

/// Snapshot of the current counters.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    pub cache_hits: usize,
    pub cache_misses: usize,
    /// Cache hit rate as a percentage (0-100)
    pub cache_hit_rate: f64,
    pub source_fetches: usize,
    pub load_failures: usize,
    pub not_found: usize,
    pub superseded: usize,
}
