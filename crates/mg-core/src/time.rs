//! Logical time model.
//!
//! # Design
//!
//! Time is a monotonically increasing `Tick` counter supplied by the host
//! once per simulation step.  Every timeout and memory expiry in the
//! framework is expressed in ticks, never wall-clock time, so a run is
//! deterministic and replayable from its seed.

use std::fmt;

use crate::{CoreError, CoreResult};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
///
/// Stored as `u64`: at 20 ticks per second a u64 lasts ~29 billion years.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`, saturating at `u64::MAX`.
    ///
    /// A saturated tick is never reached, so `offset(u64::MAX)` reads as
    /// "no deadline".
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

    /// Ticks remaining from `self` until `later`, or 0 if `later` has passed.
    #[inline]
    pub fn until(self, later: Tick) -> u64 {
        later.0.saturating_sub(self.0)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        self.offset(rhs)
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

/// The host loop's clock.
///
/// `SimClock` is cheap to copy and intentionally holds no heap data.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// Tick at which the run started.
    pub start_tick: Tick,
    /// The current tick: advanced by `SimClock::advance()` each iteration.
    pub current_tick: Tick,
}

impl SimClock {
    /// Create a clock positioned at `start_tick`.
    pub fn new(start_tick: Tick) -> Self {
        Self { start_tick, current_tick: start_tick }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Ticks elapsed since the run started.
    #[inline]
    pub fn elapsed(&self) -> u64 {
        self.current_tick.since(self.start_tick)
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (+{} ticks)", self.current_tick, self.elapsed())
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level run configuration.
///
/// Typically loaded from a JSON file by the application crate and passed
/// to the host loop.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Tick the clock starts at.  Usually 0.
    #[cfg_attr(feature = "serde", serde(default))]
    pub start_tick: Tick,

    /// Total ticks to simulate.
    pub total_ticks: u64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Worker thread count for the `parallel` feature.  `None` uses Rayon's
    /// global pool.
    #[cfg_attr(feature = "serde", serde(default))]
    pub num_threads: Option<usize>,

    /// Emit a progress log line every N ticks.  0 disables it.
    #[cfg_attr(feature = "serde", serde(default))]
    pub report_interval_ticks: u64,
}

impl SimConfig {
    /// The tick at which the run ends (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        self.start_tick.offset(self.total_ticks)
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.start_tick)
    }

    /// Reject configurations that cannot describe a run.
    pub fn validate(&self) -> CoreResult<()> {
        if self.total_ticks == 0 {
            return Err(CoreError::Config("total_ticks must be at least 1".into()));
        }
        if self.num_threads == Some(0) {
            return Err(CoreError::Config("num_threads must be at least 1 when set".into()));
        }
        if self.start_tick.0.checked_add(self.total_ticks).is_none() {
            return Err(CoreError::Config(format!(
                "start_tick {} + total_ticks {} overflows",
                self.start_tick, self.total_ticks
            )));
        }
        Ok(())
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            start_tick:            Tick::ZERO,
            total_ticks:           1,
            seed:                  0,
            num_threads:           None,
            report_interval_ticks: 0,
        }
    }
}
