//! Cache set with Tree-PLRU replacement state.

use std::fmt;

use tracing::trace;

use super::plru::PlruEncoding;
use crate::config::VictimSelection;

/// Line metadata: validity and tag. Line contents are not modeled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WayEntry {
    /// Line holds a fetched block.
    pub valid: bool,
    /// Tag of the held block; meaningful only when `valid`.
    pub tag: u64,
}

impl WayEntry {
    /// Returns `true` if this line holds `tag`.
    #[inline(always)]
    pub const fn is_hit(&self, tag: u64) -> bool {
        self.valid && self.tag == tag
    }

    /// Installs `tag`, returning the tag it displaced if the line was valid.
    #[inline(always)]
    const fn fetch(&mut self, tag: u64) -> Option<u64> {
        let evicted = if self.valid { Some(self.tag) } else { None };
        self.tag = tag;
        self.valid = true;
        evicted
    }
}

impl fmt::Display for WayEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, " v:{} tag:{:x}", u8::from(self.valid), self.tag)
    }
}

/// Hit or miss.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AccessKind {
    /// Tag was resident.
    Hit,
    /// Tag was fetched into a victim way.
    Miss,
}

/// Result of a single access.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Outcome {
    /// Hit or miss.
    pub kind: AccessKind,
    /// Way that hit, or the victim way that was filled.
    pub way: usize,
    /// Set the access was routed to.
    pub set_index: usize,
    /// PLRU state before the access.
    pub state_before: u64,
    /// PLRU state after the access.
    pub state_after: u64,
    /// Tag displaced from a valid victim way, if any.
    pub evicted_tag: Option<u64>,
}

impl Outcome {
    /// Returns `true` for a hit.
    #[inline(always)]
    pub fn is_hit(&self) -> bool {
        self.kind == AccessKind::Hit
    }
}

/// One set: W ways plus W-1 bits of Tree-PLRU state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheSet {
    index: usize,
    ways: Vec<WayEntry>,
    state: u64,
}

impl CacheSet {
    /// Creates an empty set: every way invalid, state zero.
    pub fn new(index: usize, ways: usize) -> Self {
        Self {
            index,
            ways: vec![WayEntry::default(); ways],
            state: 0,
        }
    }

    /// Index of this set within the cache.
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Current PLRU state.
    pub const fn state(&self) -> u64 {
        self.state
    }

    /// Way metadata, in way order.
    pub fn ways(&self) -> &[WayEntry] {
        &self.ways
    }

    /// Number of valid ways.
    pub fn occupancy(&self) -> usize {
        self.ways.iter().filter(|w| w.valid).count()
    }

    /// Finds the way holding `tag` without touching replacement state.
    pub fn probe(&self, tag: u64) -> Option<usize> {
        self.ways.iter().position(|w| w.is_hit(tag))
    }

    /// Looks up `tag`, updating PLRU state on a hit or filling a victim on a miss.
    ///
    /// On a hit the path bits of the hit way are rewritten to point away from
    /// it. On a miss the victim is the way selected by the current state
    /// (or, under [`VictimSelection::InvalidFirst`], the lowest invalid way),
    /// the tag is installed there, and the victim's path bits are flipped.
    pub fn access(
        &mut self,
        tag: u64,
        encoding: &PlruEncoding,
        selection: VictimSelection,
    ) -> Outcome {
        let state_before = self.state;

        if let Some(way) = self.probe(tag) {
            self.state = encoding.touch(state_before, way);
            trace!(
                set = self.index,
                way,
                "HIT: tag {:#x} state {:#x} -> {:#x} -> {:#x}",
                tag,
                state_before,
                state_before & !encoding.mask(way),
                self.state
            );
            return Outcome {
                kind: AccessKind::Hit,
                way,
                set_index: self.index,
                state_before,
                state_after: self.state,
                evicted_tag: None,
            };
        }

        let invalid = match selection {
            VictimSelection::Tree => None,
            VictimSelection::InvalidFirst => self.ways.iter().position(|w| !w.valid),
        };
        let (way, state_after) = match invalid {
            // The tree need not point at an invalid way, so `fill` does not apply.
            Some(way) => (way, encoding.touch(state_before, way)),
            None => {
                let way = encoding.victim(state_before);
                (way, encoding.fill(state_before, way))
            }
        };
        let evicted_tag = self.ways[way].fetch(tag);
        self.state = state_after;

        trace!(
            set = self.index,
            way,
            evicted = ?evicted_tag,
            "MISS: tag {:#x} state {:#x} -> {:#x}",
            tag,
            state_before,
            state_after
        );
        Outcome {
            kind: AccessKind::Miss,
            way,
            set_index: self.index,
            state_before,
            state_after,
            evicted_tag,
        }
    }
}

impl fmt::Display for CacheSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "state:{} ", self.state)?;
        for way in &self.ways {
            write!(f, "{way}")?;
        }
        Ok(())
    }
}
