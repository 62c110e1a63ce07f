//! Deterministic per-host and simulation-level RNG wrappers.
//!
//! # Determinism strategy
//!
//! Each host gets its own independent `SmallRng` seeded by:
//!
//!   seed = global_seed XOR (host_id * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive host IDs uniformly across the seed space. This
//! means:
//!
//! - Hosts never share RNG state (no contention, no ordering dependency).
//! - Adding or removing hosts at the end of the list does not disturb the
//!   seeds of existing hosts — runs are reproducible across group-size edits.
//! - Mobility, per-host COIN/Random-PRoPHET draws, and event-generator jitter
//!   each consume their own `HostRng`/`SimRng`, so identical seed + config
//!   gives byte-identical report output.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::HostId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── HostRng ───────────────────────────────────────────────────────────────────

/// Per-host deterministic RNG.
///
/// Create one per host at simulation init; store alongside the other
/// per-host state. The type is `!Sync` to prevent accidental sharing across
/// threads.
pub struct HostRng(SmallRng);

impl HostRng {
    /// Seed deterministically from the run's global seed and a host ID.
    pub fn new(global_seed: u64, host: HostId) -> Self {
        let seed = global_seed ^ (host.0 as u64).wrapping_mul(MIXING_CONSTANT);
        HostRng(SmallRng::seed_from_u64(seed))
    }

    /// Expose the inner `SmallRng` for use with `rand` distribution types.
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// Sample a uniformly distributed value of any `Standard`-distributed type.
    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// `true` with probability `p` (clamped to [0, 1]). Used by the PRoPHET
    /// `COIN` forwarding strategy and the Random queueing/forwarding variant.
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    /// Shuffle a mutable slice in-place (Fisher-Yates).
    #[inline]
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.0);
    }

    /// Choose a random element from a non-empty slice.
    /// Returns `None` if the slice is empty.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.0)
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Simulation-level RNG for global operations (mobility warmup placement,
/// the message event generator, …).
///
/// Used only in single-threaded contexts — the tick loop is strictly
/// sequential, so there is no need for per-thread children here.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive a child `SimRng` with a different seed offset — useful for
    /// seeding independent subsystems (mobility vs. event generation)
    /// deterministically from one root seed.
    pub fn child(&mut self, offset: u64) -> SimRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SimRng(SmallRng::seed_from_u64(child_seed))
    }

    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }
}
