//! Tree-PLRU Encoding Tests.
//!
//! Verifies the generated pattern tables against the hand-written 4-way and
//! 8-way reference tables, and checks that every supported width partitions
//! the state space: each state selects exactly one victim.

use plru_core::cache::plru::{MAX_WAYS, PlruEncoding};
use plru_core::common::error::ConfigError;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;

use crate::common::{PLRU4, PLRU8};

fn table(enc: &PlruEncoding) -> Vec<(u64, u64, u64)> {
    (0..enc.ways())
        .map(|w| (enc.mask(w), enc.match_value(w), enc.next_value(w)))
        .collect()
}

// ══════════════════════════════════════════════════════════
// 1. Reference tables
// ══════════════════════════════════════════════════════════

#[test]
fn four_way_matches_reference_table() {
    let enc = PlruEncoding::new(4).unwrap();
    assert_eq!(table(&enc), PLRU4.to_vec());
}

#[test]
fn eight_way_matches_reference_table() {
    let enc = PlruEncoding::new(8).unwrap();
    assert_eq!(table(&enc), PLRU8.to_vec());
}

/// Victim for every 3-bit state, read off the decision tree by hand.
#[rstest]
#[case(0b000, 0)]
#[case(0b001, 0)]
#[case(0b010, 1)]
#[case(0b011, 1)]
#[case(0b100, 2)]
#[case(0b110, 2)]
#[case(0b101, 3)]
#[case(0b111, 3)]
fn four_way_victims(#[case] state: u64, #[case] way: usize) {
    assert_eq!(PlruEncoding::new(4).unwrap().victim(state), way);
}

// ══════════════════════════════════════════════════════════
// 2. Structure
// ══════════════════════════════════════════════════════════

#[rstest]
fn pattern_shape(#[values(1, 2, 4, 8, 16, 32, 64)] ways: usize) {
    let enc = PlruEncoding::new(ways).unwrap();
    let depth = ways.trailing_zeros();
    let state_space = if ways == 64 {
        u64::MAX >> 1
    } else {
        (1u64 << (ways - 1)) - 1
    };

    assert_eq!(enc.ways(), ways);
    assert_eq!(enc.state_bits() as usize, ways - 1);
    for w in 0..ways {
        let (mask, value, next) = (enc.mask(w), enc.match_value(w), enc.next_value(w));
        assert_eq!(mask.count_ones(), depth, "way {w}: one bit per tree level");
        assert_eq!(mask & !state_space, 0, "way {w}: mask within state bits");
        assert_eq!(value & !mask, 0, "way {w}: match value within mask");
        assert_eq!(next, mask & !value, "way {w}: next points away");
    }
}

/// Sibling leaves share every path bit except the last.
#[rstest]
fn siblings_differ_in_last_bit(#[values(2, 4, 8, 16, 32, 64)] ways: usize) {
    let enc = PlruEncoding::new(ways).unwrap();
    for w in (0..ways).step_by(2) {
        assert_eq!(enc.mask(w), enc.mask(w + 1));
        assert_eq!((enc.match_value(w) ^ enc.match_value(w + 1)).count_ones(), 1);
    }
}

// ══════════════════════════════════════════════════════════
// 3. Exhaustiveness
// ══════════════════════════════════════════════════════════

#[rstest]
fn every_state_selects_one_way(#[values(1, 2, 4, 8, 16)] ways: usize) {
    let enc = PlruEncoding::new(ways).unwrap();
    assert!(enc.is_exhaustive());
}

proptest! {
    #[test]
    fn wide_encodings_select_one_way(state in any::<u64>(), log_ways in 5u32..=6) {
        let enc = PlruEncoding::new(1 << log_ways).unwrap();
        let state = state & (enc.state_count() - 1);
        prop_assert_eq!(enc.matches(state), 1);
    }

    /// On the victim way, flipping the path equals the clear-then-set update.
    #[test]
    fn fill_equals_touch_on_victim(state in any::<u64>(), log_ways in 0u32..=6) {
        let enc = PlruEncoding::new(1 << log_ways).unwrap();
        let state = state & (enc.state_count() - 1);
        let way = enc.victim(state);
        prop_assert_eq!(enc.fill(state, way), enc.touch(state, way));
    }

    /// A just-referenced way is never the next victim.
    #[test]
    fn touched_way_is_protected(state in any::<u64>(), way in 0usize..64, log_ways in 1u32..=6) {
        let enc = PlruEncoding::new(1 << log_ways).unwrap();
        let state = state & (enc.state_count() - 1);
        let way = way % enc.ways();
        let next = enc.touch(state, way);
        prop_assert_ne!(enc.victim(next), way);
        prop_assert!(next < enc.state_count());
    }
}

// ══════════════════════════════════════════════════════════
// 4. Rejected widths
// ══════════════════════════════════════════════════════════

#[rstest]
#[case(0)]
#[case(3)]
#[case(6)]
#[case(12)]
#[case(MAX_WAYS * 2)]
fn rejects_unsupported_widths(#[case] ways: usize) {
    assert!(matches!(
        PlruEncoding::new(ways),
        Err(ConfigError::InvalidWays(w)) if w == ways
    ));
}
