//! Set-Associative Cache Simulator.
//!
//! This module implements a set-associative cache that tracks line metadata
//! (valid bit and tag) and Tree-PLRU replacement state, and classifies each
//! access as a hit or a miss. Line contents and timing are not modeled.

/// Tree-PLRU state encoding (masks, match values, next values).
pub mod plru;

/// Cache sets, way metadata, and access outcomes.
pub mod set;

use std::fmt;

use tracing::debug;

pub use self::plru::PlruEncoding;
pub use self::set::{AccessKind, CacheSet, Outcome, WayEntry};
use crate::common::addr::AddressDecoder;
use crate::common::error::ConfigError;
use crate::config::{CacheConfig, VictimSelection};
use crate::stats::CacheStats;

/// Set-associative cache with Tree-PLRU replacement.
///
/// Owns every set, the encoding they share, and the hit/miss counters.
#[derive(Clone, Debug)]
pub struct Cache {
    sets: Vec<CacheSet>,
    encoding: PlruEncoding,
    decoder: AddressDecoder,
    selection: VictimSelection,
    stats: CacheStats,
    /// Include per-set state and ways in the `Display` report.
    pub dump_sets: bool,
}

impl Cache {
    /// Builds an empty cache from `config`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the geometry is rejected by
    /// [`CacheConfig::validate`]. No cache is built in that case.
    pub fn new(config: &CacheConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let encoding = PlruEncoding::new(config.ways)?;
        let decoder = AddressDecoder::new(config.offset_bits, config.index_bits())?;

        debug!(
            ways = config.ways,
            sets = config.sets,
            offset_bits = decoder.offset_bits(),
            index_bits = decoder.index_bits(),
            tag_bits = decoder.tag_bits(),
            selection = ?config.victim_selection,
            "cache constructed"
        );

        Ok(Self {
            sets: (0..config.sets)
                .map(|index| CacheSet::new(index, config.ways))
                .collect(),
            encoding,
            decoder,
            selection: config.victim_selection,
            stats: CacheStats::default(),
            dump_sets: false,
        })
    }

    /// Accesses `addr`, updating the target set and the counters.
    ///
    /// The offset field is ignored; the index field selects the set and the
    /// tag field is looked up among its ways.
    pub fn access(&mut self, addr: u64) -> Outcome {
        let fields = self.decoder.decode(addr);
        let outcome = self.sets[fields.index].access(fields.tag, &self.encoding, self.selection);
        self.stats.record(outcome.kind);
        outcome
    }

    /// Accesses every address in order and returns the updated counters.
    pub fn access_all<I>(&mut self, addrs: I) -> CacheStats
    where
        I: IntoIterator<Item = u64>,
    {
        for addr in addrs {
            let _ = self.access(addr);
        }
        self.stats
    }

    /// Checks whether `addr` is resident without touching replacement state
    /// or the counters.
    pub fn contains(&self, addr: u64) -> bool {
        let fields = self.decoder.decode(addr);
        self.sets[fields.index].probe(fields.tag).is_some()
    }

    /// Hit/miss counters.
    pub const fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// All sets, in index order.
    pub fn sets(&self) -> &[CacheSet] {
        &self.sets
    }

    /// The set at `index`, if it exists.
    pub fn set(&self, index: usize) -> Option<&CacheSet> {
        self.sets.get(index)
    }

    /// Replacement encoding shared by all sets.
    pub const fn encoding(&self) -> &PlruEncoding {
        &self.encoding
    }

    /// Address decoder for this geometry.
    pub const fn decoder(&self) -> &AddressDecoder {
        &self.decoder
    }

    /// Victim selection mode.
    pub const fn victim_selection(&self) -> VictimSelection {
        self.selection
    }
}

impl fmt::Display for Cache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "==Summary==")?;
        writeln!(f, "\t{}", self.stats)?;
        if self.dump_sets {
            for set in &self.sets {
                writeln!(f, "{set}")?;
            }
        }
        Ok(())
    }
}
