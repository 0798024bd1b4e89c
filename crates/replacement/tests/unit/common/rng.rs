//! # Xorshift Generator Tests

use replsim_core::common::Xorshift64;
use replsim_core::common::rng::DEFAULT_SEED;

#[test]
fn same_seed_same_sequence() {
    let mut a = Xorshift64::new(42);
    let mut b = Xorshift64::new(42);
    for _ in 0..100 {
        assert_eq!(a.next_u64(), b.next_u64());
    }
}

#[test]
fn zero_seed_is_replaced() {
    let mut zero = Xorshift64::new(0);
    let mut default = Xorshift64::new(DEFAULT_SEED);
    assert_eq!(zero.next_u64(), default.next_u64());
    assert_ne!(zero.next_u64(), 0);
}

#[test]
fn below_stays_in_bounds() {
    let mut rng = Xorshift64::default();
    for bound in 1..=17 {
        for _ in 0..200 {
            assert!(rng.below(bound) < bound);
        }
    }
}

#[test]
fn chance_extremes() {
    let mut rng = Xorshift64::new(7);
    for _ in 0..1000 {
        assert!(!rng.chance(0, 160));
        assert!(rng.chance(160, 160));
    }
}

#[test]
fn chance_rate_is_roughly_the_ratio() {
    let mut rng = Xorshift64::new(99);
    let trials = 160_000;
    let hits = (0..trials).filter(|_| rng.chance(6, 160)).count();
    // 3.75% of 160k = 6000
    assert!((5400..6600).contains(&hits), "got {hits} hits");
}
