//! Simulation observer trait for progress reporting and data collection.

use mg_core::Tick;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] and
/// [`Sim::run_ticks`][crate::Sim::run_ticks] at tick boundaries.
///
/// All methods default to no-ops.
///
/// # Example: busy-tick counter
///
/// ```rust,ignore
/// struct Busy { ticks: u64 }
///
/// impl SimObserver for Busy {
///     fn on_tick_end(&mut self, _tick: Tick, running: usize) {
///         if running > 0 {
///             self.ticks += 1;
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called before any agent is ticked.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called after every agent has been ticked.
    ///
    /// `running` is the number of behaviors left `Running` across all agents.
    fn on_tick_end(&mut self, _tick: Tick, _running: usize) {}

    /// Called once when [`Sim::run`][crate::Sim::run] reaches the end tick.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
