//! # End-to-End Scenarios
//!
//! Drives engines through a tag array the way a cache simulator would, and checks
//! the externally visible behaviour: which lines stay resident, which fills are
//! bypassed, and how the predictor learns.

use replsim_core::{
    AccessInfo, AccessKind, LineState, Outcome, PolicyKind, ReplacementConfig, ReplacementEngine,
    Stack,
};

use crate::common::harness::{Access, TagCache};
use crate::common::init_tracing;

const X: u64 = 0x0040_1004;
const Y: u64 = 0x0040_2008;
const WORKING_SET_PC: u64 = 0x0040_3010;
const STREAM_PC: u64 = 0x0040_4020;

fn adaptive_without_mru_inserts(sets: usize, assoc: usize) -> TagCache {
    let mut config = ReplacementConfig::new(sets, assoc, PolicyKind::Adaptive);
    config.adaptive.bimodal_numerator = 0;
    TagCache::with_config(&config)
}

fn load(pc: u64) -> AccessInfo {
    AccessInfo::new(pc, 0, AccessKind::Load)
}

// ══════════════════════════════════════════════════════════
// 1. LRU ordering
// ══════════════════════════════════════════════════════════

#[test]
fn lru_hits_reorder_stack() {
    init_tracing();
    let mut engine = ReplacementEngine::new(1, 4, PolicyKind::Lru).unwrap();
    let access = load(X);

    for way in [1, 3, 0] {
        engine.update(Outcome::Hit { set: 0, way }, &access);
    }

    assert_eq!(engine.lines().ranks(0, Stack::Lru), vec![0, 2, 3, 1]);
    let victim = engine.select_victim(0, &[LineState::default(); 4], &access);
    assert_eq!(victim.way(), Some(2));
}

#[test]
fn lru_hits_in_reverse_order() {
    let mut engine = ReplacementEngine::new(1, 4, PolicyKind::Lru).unwrap();
    let access = load(X);

    for way in [0, 3, 1] {
        engine.update(Outcome::Hit { set: 0, way }, &access);
    }

    assert_eq!(engine.lines().ranks(0, Stack::Lru), vec![2, 0, 3, 1]);
    let victim = engine.select_victim(0, &[LineState::default(); 4], &access);
    assert_eq!(victim.way(), Some(2));
}

#[test]
fn lru_cache_evicts_least_recent_line() {
    let mut cache = TagCache::new(1, 4, PolicyKind::Lru);
    let addrs: Vec<u64> = (0..5).map(|i| cache.addr_in_set(0, i)).collect();

    for &addr in &addrs[..4] {
        assert!(matches!(cache.access(X, addr, AccessKind::Load), Access::Filled(_)));
    }
    assert_eq!(cache.access(X, addrs[0], AccessKind::Load), Access::Hit);
    let _ = cache.access(X, addrs[4], AccessKind::Load);

    assert!(cache.contains(addrs[0]));
    assert!(!cache.contains(addrs[1]));
    assert!(cache.contains(addrs[4]));
}

#[test]
fn sets_keep_independent_state() {
    let mut cache = TagCache::new(2, 4, PolicyKind::Lru);
    for i in 0..6 {
        let addr = cache.addr_in_set(0, i);
        let _ = cache.access(X, addr, AccessKind::Load);
    }
    assert_eq!(cache.engine.lines().ranks(1, Stack::Lru), vec![0, 1, 2, 3]);
}

// ══════════════════════════════════════════════════════════
// 2. Predictor learning
// ══════════════════════════════════════════════════════════

#[test]
fn unreused_fill_debits_its_instruction() {
    let mut cache = adaptive_without_mru_inserts(1, 4);
    let line = cache.addr_in_set(0, 0);
    assert!(matches!(cache.access(X, line, AccessKind::Load), Access::Filled(_)));
    assert_eq!(cache.engine.reuse_counter(&load(X)), Some(4));

    // Other instructions fill the set until X's line is evicted.
    let mut index = 1;
    while cache.contains(line) {
        let addr = cache.addr_in_set(0, index);
        let _ = cache.access(Y + 4 * index, addr, AccessKind::Load);
        index += 1;
        assert!(index < 16, "line never evicted");
    }

    assert_eq!(cache.engine.reuse_counter(&load(X)), Some(3));
}

#[test]
fn reused_fill_credits_its_instruction() {
    let mut cache = adaptive_without_mru_inserts(1, 4);
    let line = cache.addr_in_set(0, 0);
    let _ = cache.access(X, line, AccessKind::Load);
    assert_eq!(cache.access(Y, line, AccessKind::Load), Access::Hit);

    let mut index = 1;
    while cache.contains(line) {
        let addr = cache.addr_in_set(0, index);
        let _ = cache.access(Y + 4 * index, addr, AccessKind::Load);
        index += 1;
        assert!(index < 16, "line never evicted");
    }

    assert_eq!(cache.engine.reuse_counter(&load(X)), Some(5));
}

#[test]
fn dead_instruction_bypasses_without_touching_metadata() {
    let mut cache = adaptive_without_mru_inserts(1, 4);

    // X streams through distinct lines; each of its evicted lines is a debit.
    let mut index = 0;
    while cache.engine.reuse_counter(&load(X)) != Some(0) {
        let addr = cache.addr_in_set(0, index);
        let _ = cache.access(X, addr, AccessKind::Load);
        index += 1;
        assert!(index < 64, "counter never reached zero");
    }

    let before = cache.engine.lines().clone();
    let bypasses = cache.engine.stats().bypasses;
    let fresh = cache.addr_in_set(0, 1000);
    assert_eq!(cache.access(X, fresh, AccessKind::Load), Access::Bypassed);
    assert!(!cache.contains(fresh));
    assert_eq!(cache.engine.lines(), &before);
    assert_eq!(cache.engine.stats().bypasses, bypasses + 1);
}

#[test]
fn non_adaptive_policies_expose_no_predictor() {
    let cache = TagCache::new(1, 4, PolicyKind::Random);
    assert_eq!(cache.engine.reuse_counter(&load(X)), None);
}

// ══════════════════════════════════════════════════════════
// 3. Workloads
// ══════════════════════════════════════════════════════════

/// Three reused lines interleaved with two streaming lines per round, in a single
/// four-way set. Five distinct lines per round thrash LRU completely.
fn run_scan_workload(cache: &mut TagCache, rounds: u64) -> Vec<u64> {
    let working_set: Vec<u64> = (0..3).map(|i| cache.addr_in_set(0, i)).collect();
    let mut next = 100;
    for _ in 0..rounds {
        for &addr in &working_set {
            let _ = cache.access(WORKING_SET_PC, addr, AccessKind::Load);
        }
        for _ in 0..2 {
            let addr = cache.addr_in_set(0, next);
            let _ = cache.access(STREAM_PC, addr, AccessKind::Load);
            next += 1;
        }
    }
    working_set
}

#[test]
fn lru_thrashes_on_scan_workload() {
    let mut cache = TagCache::new(1, 4, PolicyKind::Lru);
    let _ = run_scan_workload(&mut cache, 1000);
    assert_eq!(cache.hits, 0);
    assert_eq!(cache.misses, 5000);
}

#[test]
fn adaptive_bypasses_stream_and_keeps_working_set() {
    let mut cache = TagCache::new(1, 4, PolicyKind::Adaptive);
    let working_set = run_scan_workload(&mut cache, 1000);

    assert!(cache.hits > 2900, "hits = {}", cache.hits);
    for addr in working_set {
        assert!(cache.contains(addr));
    }
    assert_eq!(cache.engine.reuse_counter(&load(STREAM_PC)), Some(0));
    assert!(cache.engine.stats().bypasses > 1900);

    let stats = cache.engine.stats();
    assert_eq!(stats.accesses + stats.bypasses, 5000);
    assert_eq!(stats.hits, cache.hits);
}

#[test]
fn stores_do_not_mark_lines_reused() {
    // Non-critical hits leave a line classified as dead, so its filler is debited.
    let mut cache = adaptive_without_mru_inserts(1, 1);
    let a = cache.addr_in_set(0, 0);
    let b = cache.addr_in_set(0, 1);

    let _ = cache.access(X, a, AccessKind::Load);
    assert_eq!(cache.access(Y, a, AccessKind::Store), Access::Hit);
    let _ = cache.access(Y, b, AccessKind::Load);

    assert_eq!(cache.engine.reuse_counter(&load(X)), Some(3));
}
