//! Cache Statistics Module
//!
//! Tracks credentials cache metrics including hits, misses, and evictions.

// == Cache Stats ==
/// Tracks credentials cache metrics.
#[derive(Debug, Clone, Default)]
pub struct CacheStats {
    /// Number of lookups that found cached credentials
    pub hits: u64,
    /// Number of lookups that fell through to the authenticator
    pub misses: u64,
    /// Number of entries evicted to make room for new ones
    pub evictions: u64,
    /// Number of credentials refused because they exceed the byte budget
    pub rejections: u64,
    /// Current number of entries in the cache
    pub total_entries: usize,
    /// Current cumulative entry size in bytes
    pub current_size_bytes: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub fn record_rejection(&mut self) {
        self.rejections += 1;
    }

    // == Render ==
    /// Renders the statistics in Prometheus text exposition format.
    pub fn to_prometheus(&self) -> String {
        let mut out = String::new();
        let counters = [
            ("credentials_cache_hits_total", "Cache lookups that skipped hashing", self.hits),
            ("credentials_cache_misses_total", "Cache lookups that required hashing", self.misses),
            ("credentials_cache_evictions_total", "Entries evicted to make room", self.evictions),
            ("credentials_cache_rejections_total", "Entries larger than the cache", self.rejections),
        ];
        for (name, help, value) in counters {
            out.push_str(&format!("# HELP {name} {help}\n# TYPE {name} counter\n{name} {value}\n"));
        }

        let gauges = [
            ("credentials_cache_entries", "Entries currently cached", self.total_entries),
            ("credentials_cache_size_bytes", "Bytes currently cached", self.current_size_bytes),
        ];
        for (name, help, value) in gauges {
            out.push_str(&format!("# HELP {name} {help}\n# TYPE {name} gauge\n{name} {value}\n"));
        }

        let name = "credentials_cache_hit_ratio";
        out.push_str(&format!(
            "# HELP {name} Fraction of cache lookups that skipped hashing\n# TYPE {name} gauge\n{name} {}\n",
            self.hit_rate()
        ));
        out
    }
}
