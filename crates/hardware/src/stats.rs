//! Simulation statistics collection and reporting.
//!
//! This module tracks hit/miss outcomes for the cache simulator. It provides:
//! 1. **Counters:** Hits and misses, monotonically non-decreasing.
//! 2. **Derived metrics:** Total accesses and hit rate.
//! 3. **Reporting:** A one-line summary matching the end-of-run report.

use std::fmt;
use std::ops::AddAssign;

use crate::cache::AccessKind;

/// Hit/miss counters for a cache.
///
/// `hits + misses` always equals the number of accesses recorded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Accesses that found their tag resident.
    pub hits: u64,
    /// Accesses that filled a victim way.
    pub misses: u64,
}

impl CacheStats {
    /// Counts one access of the given kind.
    #[inline(always)]
    pub const fn record(&mut self, kind: AccessKind) {
        match kind {
            AccessKind::Hit => self.hits += 1,
            AccessKind::Miss => self.misses += 1,
        }
    }

    /// Total accesses recorded.
    pub const fn accesses(&self) -> u64 {
        self.hits + self.misses
    }

    /// Fraction of accesses that hit, or 0.0 before any access.
    pub fn hit_rate(&self) -> f64 {
        let total = self.accesses();
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Fraction of accesses that missed, or 0.0 before any access.
    pub fn miss_rate(&self) -> f64 {
        let total = self.accesses();
        if total == 0 {
            0.0
        } else {
            self.misses as f64 / total as f64
        }
    }
}

/// Merges counters from independently simulated shards.
impl AddAssign for CacheStats {
    fn add_assign(&mut self, rhs: Self) {
        self.hits += rhs.hits;
        self.misses += rhs.misses;
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Hit: {} Miss: {} ({:.2}% hit rate)",
            self.hits,
            self.misses,
            self.hit_rate() * 100.0
        )
    }
}
