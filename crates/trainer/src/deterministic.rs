//! Deterministic utilities for reproducible splits
//!
//! Provides an LCG-based RNG and a seeded shuffle so the same seed always
//! produces the same train/test partition on every platform.

/// 31-bit linear congruential generator with the glibc `rand` constants.
#[derive(Clone, Debug)]
pub struct LcgRng {
    state: u64,
}

impl LcgRng {
    const MULTIPLIER: u64 = 1103515245;
    const INCREMENT: u64 = 12345;
    const MODULUS: u64 = 1 << 31;

    pub fn new(seed: u64) -> Self {
        Self {
            state: seed % Self::MODULUS,
        }
    }

    /// Generate next random value in range [0, MODULUS)
    pub fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
            & (Self::MODULUS - 1);
        self.state
    }

    /// Uniform-ish value in `[0, max)`; 0 when `max` is 0.
    ///
    /// Scales by the high bits; the low bits of a power-of-two LCG cycle
    /// with short periods.
    pub fn next_range(&mut self, max: u64) -> u64 {
        if max == 0 {
            return 0;
        }
        ((u128::from(self.next_u64()) * u128::from(max)) >> 31) as u64
    }
}

/// Fisher-Yates shuffle driven by [`LcgRng`]
pub fn shuffle<T>(items: &mut [T], seed: u64) {
    let mut rng = LcgRng::new(seed);
    for i in (1..items.len()).rev() {
        let j = rng.next_range(i as u64 + 1) as usize;
        items.swap(i, j);
    }
}
