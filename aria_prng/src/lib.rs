// Deterministic, portable randomness for the Aria music generator.
//
// Two generators live here, serving different jobs:
//
// - `mix32`: a stateless 32-bit avalanche hash (the murmur3 finalizer).
//   Every per-step melodic decision — note presence, octave, velocity,
//   duration — hashes its step index through this function, offset into a
//   distinct stream per decision. Because the hash is pure, any beat can be
//   evaluated independently of every other beat.
// - `SeedRng`: xoshiro256++ (Blackman & Vigna, 2019) with SplitMix64
//   seeding, a hand-rolled sequential generator. The engine draws its
//   fixed weight matrix from one of these at construction time.
//
// This crate is the sole source of randomness in the project; nothing else
// may depend on `rand` or platform entropy. Determinism is the critical
// constraint: identical seeds must produce identical output on every
// platform, compiler version, and optimization level. Keep floating-point
// arithmetic out of the core generators.

use serde::{Deserialize, Serialize};

/// 32-bit avalanche hash: maps an integer seed to a well-mixed `u32`.
///
/// The algorithm is fixed and its exact output is part of this project's
/// test contract (generated pieces must be bit-reproducible across
/// versions). All arithmetic is 32-bit wrapping:
///
/// ```text
/// h ^= h >> 16; h *= 0x85eb_ca6b; h ^= h >> 13;
/// h *= 0xc2b2_ae35; h ^= h >> 16
/// ```
///
/// Note that `mix32(0) == 0`; callers that care should offset their seeds.
#[must_use]
pub fn mix32(seed: u32) -> u32 {
    let mut h = seed;
    h ^= h >> 16;
    h = h.wrapping_mul(0x85eb_ca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2_ae35);
    h ^= h >> 16;
    h
}

/// Xoshiro256++ PRNG — the project's only sequential random generator.
///
/// Used to fill the engine's weight matrix once at construction. Two
/// `SeedRng` instances created with the same seed produce identical output
/// sequences, so a seeded engine is fully reproducible.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SeedRng {
    s: [u64; 4],
}

impl SeedRng {
    /// Create a new PRNG seeded from a `u64`.
    ///
    /// Uses SplitMix64 to expand the seed into the 256-bit internal state,
    /// per the xoshiro authors' recommendation.
    pub fn new(seed: u64) -> Self {
        let mut sm = seed;
        Self {
            s: [
                splitmix64(&mut sm),
                splitmix64(&mut sm),
                splitmix64(&mut sm),
                splitmix64(&mut sm),
            ],
        }
    }

    /// Generate the next `u64` in the sequence.
    pub fn next_u64(&mut self) -> u64 {
        let result = (self.s[0].wrapping_add(self.s[3]))
            .rotate_left(23)
            .wrapping_add(self.s[0]);

        let t = self.s[1] << 17;

        self.s[2] ^= self.s[0];
        self.s[3] ^= self.s[1];
        self.s[1] ^= self.s[2];
        self.s[0] ^= self.s[3];

        self.s[2] ^= t;
        self.s[3] = self.s[3].rotate_left(45);

        result
    }

    /// Generate a uniform `f64` in [0, 1).
    ///
    /// Uses the upper 53 bits of a `u64` to fill the mantissa (IEEE 754
    /// double has a 52-bit mantissa + 1 implicit bit).
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Generate a uniform random value in `[low, high)`.
    ///
    /// Panics if `low >= high`.
    pub fn range_f64(&mut self, low: f64, high: f64) -> f64 {
        assert!(low < high, "range_f64: low must be less than high");
        low + self.next_f64() * (high - low)
    }
}

/// SplitMix64 — used only for seeding xoshiro256++ from a single `u64`.
fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9e37_79b9_7f4a_7c15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}
