//! Xorshift pseudo-random generator.
//!
//! Replacement decisions only need cheap, reproducible randomness, so a 64-bit
//! xorshift register is used instead of a general-purpose RNG. The same seed
//! always produces the same victim sequence, which keeps simulations repeatable.

/// Default seed, used when the configuration does not provide one.
pub const DEFAULT_SEED: u64 = 123_456_789;

/// 64-bit xorshift generator (shifts 13, 7, 17).
#[derive(Clone, Debug)]
pub struct Xorshift64 {
    state: u64,
}

impl Xorshift64 {
    /// Creates a generator from `seed`. A zero seed is replaced by [`DEFAULT_SEED`]
    /// because zero is a fixed point of the shift sequence.
    pub const fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { DEFAULT_SEED } else { seed },
        }
    }

    /// Advances the register and returns the new state.
    #[inline]
    pub const fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Returns a value in `[0, bound)`.
    ///
    /// # Panics
    ///
    /// Panics if `bound` is zero.
    #[inline]
    pub fn below(&mut self, bound: u64) -> u64 {
        assert!(bound > 0, "xorshift bound must be non-zero");
        self.next_u64() % bound
    }

    /// Returns `true` with probability `numerator / denominator`.
    #[inline]
    pub fn chance(&mut self, numerator: u32, denominator: u32) -> bool {
        self.below(u64::from(denominator)) < u64::from(numerator)
    }
}

impl Default for Xorshift64 {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}
