//! Simulation time model.
//!
//! # Design
//!
//! Time is represented as a monotonically increasing `Tick` counter. The
//! mapping to simulated wall-clock seconds is held in `SimClock`:
//!
//!   elapsed_secs = tick * update_interval_secs
//!
//! Using an integer tick as the canonical time unit means the connection
//! state machine and scheduled-event draining compare exactly,
//! with no floating-point drift accumulating tick over tick. `update_interval_secs`
//! is `f64` because `Scenario.updateInterval` is not constrained to be an
//! integer number of seconds (sub-second granularity is common for dense
//! short-range contacts).

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    ///
    /// Saturates rather than overflows — `StationaryMobility`'s infinite
    /// pause converts to `u64::MAX` ticks via `ticks_for_secs`, which would
    /// otherwise panic on the `+` in a debug build.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0.saturating_add(n))
    }

    /// Ticks elapsed from `earlier` to `self`.
    ///
    /// # Panics
    /// Panics in debug mode if `earlier > self`.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0 - earlier.0
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Converts between tick counts and simulated seconds.
///
/// `SimClock` is cheap to copy and intentionally holds no heap data.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// How many simulated seconds one tick represents (`Scenario.updateInterval`).
    pub update_interval_secs: f64,
    /// The current tick — advanced by `SimClock::advance()` once per tick.
    pub current_tick: Tick,
}

impl SimClock {
    /// Create a clock at tick 0 with the given per-tick resolution.
    pub fn new(update_interval_secs: f64) -> Self {
        Self {
            update_interval_secs,
            current_tick: Tick::ZERO,
        }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = self.current_tick.offset(1);
    }

    /// Elapsed simulated seconds since tick 0.
    #[inline]
    pub fn elapsed_secs(&self) -> f64 {
        self.current_tick.0 as f64 * self.update_interval_secs
    }

    /// Break elapsed time into (day, hour, minute) components from sim start.
    /// Useful for human-readable logging.
    pub fn elapsed_dhm(&self) -> (u64, u32, u32) {
        let total_secs = self.elapsed_secs().max(0.0) as u64;
        let days = total_secs / 86_400;
        let hours = ((total_secs % 86_400) / 3_600) as u32;
        let minutes = ((total_secs % 3_600) / 60) as u32;
        (days, hours, minutes)
    }

    // ── Tick-count helpers ────────────────────────────────────────────────

    /// How many ticks span `secs` simulated seconds? (rounds up)
    #[inline]
    pub fn ticks_for_secs(&self, secs: f64) -> u64 {
        (secs / self.update_interval_secs).ceil().max(0.0) as u64
    }

    /// How many ticks span `minutes` simulated minutes? Used for TTL expiry
    /// arithmetic (`Message.ttl` is specified in minutes).
    #[inline]
    pub fn ticks_for_minutes(&self, minutes: f64) -> u64 {
        self.ticks_for_secs(minutes * 60.0)
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (d, h, m) = self.elapsed_dhm();
        write!(f, "{} (day {} {:02}:{:02})", self.current_tick, d, h, m)
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// The clock-relevant subset of top-level simulation configuration.
///
/// The full scenario configuration (groups, interfaces, router settings,
/// event generators, …) is assembled by `dtn-config::ScenarioConfig`, which
/// embeds one of these and feeds it to `SimClock::new`/`SimConfig::end_tick`.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Seconds per tick (`Scenario.updateInterval`).
    pub update_interval_secs: f64,

    /// Simulated end time in seconds (`Scenario.endTime`); converted to a
    /// tick count at clock resolution.
    pub end_time_secs: f64,

    /// Master RNG seed (`MovementModel.rngSeed`), reused as the root seed
    /// for every subsystem's derived RNG.
    pub seed: u64,

    /// Randomize per-tick host update order.
    pub randomize_update_order: bool,
}

impl SimConfig {
    /// The tick at which the simulation ends (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick((self.end_time_secs / self.update_interval_secs).ceil().max(0.0) as u64)
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.update_interval_secs)
    }
}
