//! Small deterministic pseudo-random source for palettes and noise positions.

/// Seed used when nothing better is available.
pub const DEFAULT_SEED: u16 = 1337;

const MULTIPLIER: u16 = 2053;
const INCREMENT: u16 = 13849;

/// 16-bit linear congruential generator.
///
/// Good enough to pick hues and starting positions; not for anything that needs
/// real randomness. A fixed seed always yields the same sequence, which keeps
/// host tests reproducible.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Rng16 {
    seed: u16,
}

impl Rng16 {
    /// Create a generator with the given seed.
    #[must_use]
    pub const fn new(seed: u16) -> Self {
        Self { seed }
    }

    /// Mix extra entropy (for example a boot-time tick count) into the seed.
    pub const fn add_entropy(&mut self, entropy: u16) {
        self.seed = self.seed.wrapping_add(entropy);
    }

    /// Next 16-bit value.
    pub const fn random16(&mut self) -> u16 {
        self.seed = self.seed.wrapping_mul(MULTIPLIER).wrapping_add(INCREMENT);
        self.seed
    }

    /// Next 8-bit value: the two bytes of the next 16-bit state added together.
    pub const fn random8(&mut self) -> u8 {
        let [high, low] = self.random16().to_be_bytes();
        high.wrapping_add(low)
    }
}

impl Default for Rng16 {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}
