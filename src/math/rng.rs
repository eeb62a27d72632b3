//! Seedable uniform random sources for reproducible Monte Carlo runs.
//!
//! The default generator is xoshiro256++ seeded through SplitMix64, with
//! `rand`'s [`StdRng`] available as an alternative kind. Each simulated path
//! derives its own stream seed via [`stream_seed`], so aggregate results do
//! not depend on how paths are partitioned across workers.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Selects the backing generator for a [`UniformRng`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RngKind {
    /// xoshiro256++ seeded via SplitMix64.
    #[default]
    Xoshiro256PlusPlus,
    /// `rand`'s standard cryptographically-strong generator.
    StdRng,
}

#[derive(Debug, Clone)]
pub struct Xoshiro256PlusPlus {
    state: [u64; 4],
}

impl Xoshiro256PlusPlus {
    #[inline]
    pub fn seed_from_u64(seed: u64) -> Self {
        let mut sm = SplitMix64::new(seed);
        let mut state = [0_u64; 4];
        for item in &mut state {
            *item = sm.next_u64();
        }

        if state.iter().all(|&x| x == 0) {
            state[0] = 1;
        }

        Self { state }
    }

    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        let result = (self.state[0].wrapping_add(self.state[3]))
            .rotate_left(23)
            .wrapping_add(self.state[0]);

        let t = self.state[1] << 17;

        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];

        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);

        result
    }

    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        let x = self.next_u64() >> 11;
        x as f64 * (1.0 / ((1_u64 << 53) as f64))
    }
}

#[derive(Debug, Clone, Copy)]
struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    #[inline]
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }
}

/// Injectable seedable uniform source used by the Monte Carlo engine.
#[derive(Debug, Clone)]
pub enum UniformRng {
    Xoshiro256PlusPlus(Xoshiro256PlusPlus),
    StdRng(StdRng),
}

impl UniformRng {
    #[inline]
    pub fn from_seed(kind: RngKind, seed: u64) -> Self {
        match kind {
            RngKind::Xoshiro256PlusPlus => {
                Self::Xoshiro256PlusPlus(Xoshiro256PlusPlus::seed_from_u64(seed))
            }
            RngKind::StdRng => Self::StdRng(StdRng::seed_from_u64(seed)),
        }
    }

    /// Draws a uniform sample in `[0, 1)`.
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        match self {
            Self::Xoshiro256PlusPlus(rng) => rng.next_f64(),
            Self::StdRng(rng) => rng.random::<f64>(),
        }
    }
}

/// Derives the seed for an independent per-path stream.
#[inline]
pub fn stream_seed(base_seed: u64, stream_index: usize) -> u64 {
    base_seed.wrapping_add((stream_index as u64).wrapping_mul(7_919))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xoshiro_same_seed_reproduces_sequence() {
        let mut a = UniformRng::from_seed(RngKind::Xoshiro256PlusPlus, 42);
        let mut b = UniformRng::from_seed(RngKind::Xoshiro256PlusPlus, 42);

        for _ in 0..128 {
            assert_eq!(a.next_f64().to_bits(), b.next_f64().to_bits());
        }
    }

    #[test]
    fn std_rng_same_seed_reproduces_sequence() {
        let mut a = UniformRng::from_seed(RngKind::StdRng, 7);
        let mut b = UniformRng::from_seed(RngKind::StdRng, 7);

        for _ in 0..128 {
            assert_eq!(a.next_f64().to_bits(), b.next_f64().to_bits());
        }
    }

    #[test]
    fn xoshiro_produces_unit_interval() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(1);
        for _ in 0..1000 {
            let u = rng.next_f64();
            assert!((0.0..1.0).contains(&u));
        }
    }

    #[test]
    fn stream_seeds_are_distinct_for_nearby_paths() {
        let seeds: Vec<u64> = (0..64).map(|i| stream_seed(42, i)).collect();
        for (i, a) in seeds.iter().enumerate() {
            for b in seeds.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }
}
