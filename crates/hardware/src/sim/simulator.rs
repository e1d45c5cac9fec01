//! Simulator: owns the cache and replays address streams through it.

use tracing::info;

use super::workload::MatMul;
use crate::cache::Cache;
use crate::common::error::ConfigError;
use crate::config::Config;
use crate::stats::CacheStats;

/// Top-level simulator: a configured cache plus its workload parameters.
#[derive(Debug)]
pub struct Simulator {
    /// Cache under test.
    pub cache: Cache,
    /// Configuration the cache was built from.
    pub config: Config,
}

impl Simulator {
    /// Creates a simulator, validating the cache geometry.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the cache configuration is rejected.
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        let cache = Cache::new(&config.cache)?;
        Ok(Self { cache, config })
    }

    /// Replays `addrs` in order and returns the cumulative counters.
    pub fn run<I>(&mut self, addrs: I) -> CacheStats
    where
        I: IntoIterator<Item = u64>,
    {
        let stats = self.cache.access_all(addrs);
        info!(
            hits = stats.hits,
            misses = stats.misses,
            accesses = stats.accesses(),
            "run complete"
        );
        stats
    }

    /// Replays the configured matrix-multiply workload.
    pub fn run_matmul(&mut self) -> CacheStats {
        let workload = MatMul::new(&self.config.workload);
        info!(
            size = self.config.workload.matrix_size,
            accesses = workload.len(),
            "starting matmul workload"
        );
        self.run(workload.addresses())
    }
}
