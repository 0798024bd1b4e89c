//! # Line Store Tests
//!
//! Construction state and the three recency primitives: `bottom`, `promote`
//! and `promote_one`, on both rank dimensions.

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use replsim_core::{Criticality, LineStore, Stack};

#[test]
fn fresh_store_ranks_equal_way_index() {
    let store = LineStore::new(3, 4);
    for set in 0..3 {
        assert_eq!(store.ranks(set, Stack::Lru), vec![0, 1, 2, 3]);
        assert_eq!(store.ranks(set, Stack::Biased), vec![0, 1, 2, 3]);
        for way in 0..4 {
            assert_eq!(store.slot(set, way).criticality, Criticality::Unclassified);
        }
    }
}

#[test]
fn criticality_raw_encoding() {
    assert_eq!(Criticality::Low.raw(), 0);
    assert_eq!(Criticality::High.raw(), 1);
    assert_eq!(Criticality::Unclassified.raw(), 4);
}

#[test]
fn bottom_is_last_way_initially() {
    let store = LineStore::new(1, 8);
    assert_eq!(store.bottom(0, Stack::Lru), 7);
    assert_eq!(store.bottom(0, Stack::Biased), 7);
}

#[test]
fn promote_shifts_only_more_recent_ways() {
    let mut store = LineStore::new(1, 4);
    store.promote(0, 2, Stack::Lru);
    // Way 2 was rank 2; ranks 0 and 1 move down, rank 3 stays.
    assert_eq!(store.ranks(0, Stack::Lru), vec![1, 2, 0, 3]);
    // The other dimension is untouched.
    assert_eq!(store.ranks(0, Stack::Biased), vec![0, 1, 2, 3]);
}

#[test]
fn promote_mru_is_noop() {
    let mut store = LineStore::new(1, 4);
    store.promote(0, 0, Stack::Lru);
    assert_eq!(store.ranks(0, Stack::Lru), vec![0, 1, 2, 3]);
}

#[test]
fn promote_one_swaps_with_neighbour() {
    let mut store = LineStore::new(1, 4);
    store.promote_one(0, 3, Stack::Biased);
    assert_eq!(store.ranks(0, Stack::Biased), vec![0, 1, 3, 2]);
    store.promote_one(0, 3, Stack::Biased);
    assert_eq!(store.ranks(0, Stack::Biased), vec![0, 2, 3, 1]);
    assert_eq!(store.bottom(0, Stack::Biased), 2);
}

#[test]
fn promote_one_at_top_is_noop() {
    let mut store = LineStore::new(1, 4);
    store.promote_one(0, 0, Stack::Biased);
    assert_eq!(store.ranks(0, Stack::Biased), vec![0, 1, 2, 3]);
}

#[test]
fn sets_are_independent() {
    let mut store = LineStore::new(2, 4);
    store.promote(0, 3, Stack::Lru);
    assert_eq!(store.ranks(0, Stack::Lru), vec![1, 2, 3, 0]);
    assert_eq!(store.ranks(1, Stack::Lru), vec![0, 1, 2, 3]);
}

#[test]
fn direct_mapped_store() {
    let mut store = LineStore::new(4, 1);
    store.promote(2, 0, Stack::Lru);
    store.promote_one(2, 0, Stack::Biased);
    assert_eq!(store.bottom(2, Stack::Lru), 0);
    assert!(store.is_permutation(2, Stack::Lru));
}

#[test]
fn is_permutation_detects_corruption() {
    let mut store = LineStore::new(1, 4);
    assert!(store.is_permutation(0, Stack::Lru));
    store.slot_mut(0, 1).lru_rank = 0;
    assert!(!store.is_permutation(0, Stack::Lru));
    store.slot_mut(0, 1).lru_rank = 9;
    assert!(!store.is_permutation(0, Stack::Lru));
}

#[test]
#[should_panic(expected = "out of range")]
fn out_of_range_set_panics() {
    let store = LineStore::new(2, 4);
    let _ = store.slot(2, 0);
}

proptest! {
    /// Any mix of promotions keeps both dimensions a permutation.
    #[test]
    fn promotions_preserve_permutation(
        assoc in 1usize..=16,
        ops in prop::collection::vec((0usize..16, any::<bool>(), any::<bool>()), 0..200),
    ) {
        let mut store = LineStore::new(1, assoc);
        for (way, full, lru) in ops {
            let way = way % assoc;
            let stack = if lru { Stack::Lru } else { Stack::Biased };
            if full {
                store.promote(0, way, stack);
            } else {
                store.promote_one(0, way, stack);
            }
            prop_assert!(store.is_permutation(0, Stack::Lru));
            prop_assert!(store.is_permutation(0, Stack::Biased));
        }
    }

    /// After a full promotion the way is MRU and the relative order of the others holds.
    #[test]
    fn promote_keeps_relative_order(
        assoc in 2usize..=16,
        warmup in prop::collection::vec(0usize..16, 0..50),
        target in 0usize..16,
    ) {
        let mut store = LineStore::new(1, assoc);
        for w in warmup {
            store.promote(0, w % assoc, Stack::Lru);
        }
        let target = target % assoc;
        let before = store.ranks(0, Stack::Lru);
        store.promote(0, target, Stack::Lru);
        let after = store.ranks(0, Stack::Lru);

        prop_assert_eq!(after[target], 0);
        for a in 0..assoc {
            for b in 0..assoc {
                if a != target && b != target && before[a] < before[b] {
                    prop_assert!(after[a] < after[b]);
                }
            }
        }
    }
}
