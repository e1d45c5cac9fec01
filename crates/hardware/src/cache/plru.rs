//! Tree Pseudo-LRU (PLRU) state encoding.
//!
//! A W-way set keeps W-1 bits of replacement state. Each bit is an internal
//! node of a complete binary tree whose leaves are the ways; a 0 bit routes
//! the victim search left and a 1 bit routes it right.
//!
//! ```text
//!               bit_2 == 0?            state | victim    ref to | next state
//!               /       \              ------+-------    -------+-----------
//!              y         n              00x  | way 0      way 0 |  11_
//!             /           \             01x  | way 1      way 1 |  10_
//!      bit_1 == 0?    bit_0 == 0?       1x0  | way 2      way 2 |  0_1
//!        /    \          /    \         1x1  | way 3      way 3 |  0_0
//!     way 0  way 1    way 2  way 3
//! ```
//!
//! Nodes are numbered breadth-first from the root (`n = 0`) and node `n`
//! lives at bit `W - 2 - n`, so the root is the most significant state bit.
//!
//! For every way `w` the encoding stores three patterns:
//! - `mask[w]`: the bits on the root-to-leaf path of `w`,
//! - `match_value[w]`: the path bit values that route the search to `w`,
//! - `next_value[w]`: the path bit values pointing away from `w`.
//!
//! `w` is the victim exactly when `state & mask[w] == match_value[w]`; the
//! masks partition the state space so exactly one way matches any state.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `touch()` / `fill()`: O(1)
//!   - `victim()`: O(W) scan over the pattern table
//! - **Space Complexity:** O(W) per width, shared by every set
//! - **Hardware Cost:** W-1 bits per set

use tracing::debug;

use crate::common::error::ConfigError;

/// Largest associativity whose tree bits fit a `u64` state word.
pub const MAX_WAYS: usize = 64;

/// Path pattern for a single way.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct WayPattern {
    mask: u64,
    match_value: u64,
    next_value: u64,
}

/// Tree-PLRU pattern table for one associativity width.
///
/// Built once per cache and read by every set on every access.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlruEncoding {
    patterns: Vec<WayPattern>,
}

impl PlruEncoding {
    /// Generates the encoding for `ways`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidWays`] if `ways` is zero, not a power of
    /// two, or larger than [`MAX_WAYS`].
    pub fn new(ways: usize) -> Result<Self, ConfigError> {
        if !ways.is_power_of_two() || ways > MAX_WAYS {
            return Err(ConfigError::InvalidWays(ways));
        }

        let mut patterns = Vec::with_capacity(ways);
        descend(ways, 0, ways.trailing_zeros(), 0, 0, &mut patterns);

        debug!(ways, state_bits = ways - 1, "generated Tree-PLRU encoding");
        Ok(Self { patterns })
    }

    /// Associativity this table was generated for.
    #[inline(always)]
    pub fn ways(&self) -> usize {
        self.patterns.len()
    }

    /// Number of significant state bits (`ways - 1`).
    #[inline(always)]
    pub fn state_bits(&self) -> u32 {
        (self.patterns.len() - 1) as u32
    }

    /// Number of distinct states, `2^(ways - 1)`.
    pub fn state_count(&self) -> u64 {
        1 << self.state_bits()
    }

    /// Path bits of `way`.
    ///
    /// # Panics
    ///
    /// Panics if `way >= self.ways()`.
    #[inline(always)]
    pub fn mask(&self, way: usize) -> u64 {
        self.patterns[way].mask
    }

    /// Path bit values that select `way` as victim.
    ///
    /// # Panics
    ///
    /// Panics if `way >= self.ways()`.
    #[inline(always)]
    pub fn match_value(&self, way: usize) -> u64 {
        self.patterns[way].match_value
    }

    /// Path bit values written after `way` is referenced.
    ///
    /// # Panics
    ///
    /// Panics if `way >= self.ways()`.
    #[inline(always)]
    pub fn next_value(&self, way: usize) -> u64 {
        self.patterns[way].next_value
    }

    /// Returns the way designated for eviction in `state`.
    #[inline]
    pub fn victim(&self, state: u64) -> usize {
        let way = self
            .patterns
            .iter()
            .position(|p| state & p.mask == p.match_value);
        debug_assert!(way.is_some(), "no way matches PLRU state {state:#b}");
        way.unwrap_or(0)
    }

    /// State after referencing `way` on a hit.
    ///
    /// Clears the path bits of `way`, then points each one away from it.
    #[inline(always)]
    pub fn touch(&self, state: u64, way: usize) -> u64 {
        let p = &self.patterns[way];
        (state & !p.mask) | p.next_value
    }

    /// State after filling `way` on a miss.
    ///
    /// Only valid when `way == self.victim(state)`: the path bits then equal
    /// `match_value`, and flipping them yields `next_value`, matching
    /// [`Self::touch`].
    #[inline(always)]
    pub fn fill(&self, state: u64, way: usize) -> u64 {
        state ^ self.patterns[way].mask
    }

    /// Checks that every state selects exactly one victim.
    ///
    /// Enumerates all `2^(ways - 1)` states; intended for widths up to 32.
    pub fn is_exhaustive(&self) -> bool {
        (0..self.state_count()).all(|state| self.matches(state) == 1)
    }

    /// Number of ways whose pattern matches `state`.
    pub fn matches(&self, state: u64) -> usize {
        self.patterns
            .iter()
            .filter(|p| state & p.mask == p.match_value)
            .count()
    }
}

/// Emits the leaf patterns of the subtree rooted at `node`, left to right.
///
/// The left subtree sees the node bit clear in `match_value`, the right
/// subtree sees it set, so a W-way table is two W/2-way tables under one
/// new top bit.
fn descend(
    ways: usize,
    node: usize,
    levels_left: u32,
    mask: u64,
    match_value: u64,
    out: &mut Vec<WayPattern>,
) {
    if levels_left == 0 {
        out.push(WayPattern {
            mask,
            match_value,
            next_value: mask & !match_value,
        });
        return;
    }

    let bit = 1u64 << (ways - 2 - node);
    descend(ways, 2 * node + 1, levels_left - 1, mask | bit, match_value, out);
    descend(
        ways,
        2 * node + 2,
        levels_left - 1,
        mask | bit,
        match_value | bit,
        out,
    );
}
