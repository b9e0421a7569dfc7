//! The time-boxed `Behavior` state machine.
//!
//! Leaf logic lives in a [`Task`]; [`Behavior`] wraps it with the parts every
//! behavior shares: declared preconditions, a duration window, and the
//! `Stopped → Running → Stopped` lifecycle.
//!
//! ```text
//!            try_start: preconditions ∧ check_extra_start_conditions
//!  Stopped ─────────────────────────────────────────────────────────▶ Running
//!     ▲                                                                  │
//!     └──── stop ◀── now ≥ end_tick ∨ ¬preconditions ∨ ¬can_still_use ───┘
//!                    ∨ on_tick returned false
//! ```

use mg_core::{AgentRng, Tick};
use mg_memory::Preconditions;

use crate::control::misuse;
use crate::{Agent, BehaviorControl, BehaviorError, BehaviorResult, Status};

// ── Timing ────────────────────────────────────────────────────────────────────

/// Inclusive `[min, max]` window a run's duration is sampled from.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Timing {
    min: u64,
    max: u64,
}

impl Timing {
    /// 60 ticks, the usual length of a short errand.
    pub const DEFAULT: Timing = Timing { min: 60, max: 60 };

    pub fn new(min: u64, max: u64) -> BehaviorResult<Self> {
        if min > max {
            return Err(BehaviorError::InvalidTiming { min, max });
        }
        Ok(Self { min, max })
    }

    pub const fn fixed(ticks: u64) -> Self {
        Self { min: ticks, max: ticks }
    }

    pub fn min(&self) -> u64 {
        self.min
    }

    pub fn max(&self) -> u64 {
        self.max
    }

    /// Draw a duration in `[min, max]`.
    #[inline]
    pub fn sample(&self, rng: &mut AgentRng) -> u64 {
        if self.min == self.max {
            self.min
        } else {
            rng.gen_range(self.min..=self.max)
        }
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self::DEFAULT
    }
}

// ── Task ──────────────────────────────────────────────────────────────────────

/// Behavior-specific hooks.  Every method has a default, so a task only
/// overrides what it needs.
///
/// Per-activation state (a chosen target, an attack delay, …) belongs in the
/// implementing struct; it is owned by the behavior and reused across runs.
pub trait Task<W, E> {
    /// Extra start check, run only after the declared preconditions hold.
    fn check_extra_start_conditions(&mut self, _world: &W, _agent: &Agent<E>) -> bool {
        true
    }

    /// Extra continue check, run every tick while running.
    fn can_still_use(&mut self, _world: &W, _agent: &Agent<E>, _now: Tick) -> bool {
        true
    }

    fn on_start(&mut self, _world: &W, _agent: &mut Agent<E>, _now: Tick) {}

    /// One tick of work.  Return `false` to finish early; the behavior stops
    /// immediately.
    fn on_tick(&mut self, _world: &W, _agent: &mut Agent<E>, _now: Tick) -> bool {
        true
    }

    fn on_stop(&mut self, _world: &W, _agent: &mut Agent<E>, _now: Tick) {}
}

// ── Behavior ──────────────────────────────────────────────────────────────────

/// A precondition-gated, time-boxed unit of work.
///
/// Created once per agent at setup and reused for every activation.
pub struct Behavior<T> {
    label:         &'static str,
    preconditions: Preconditions,
    timing:        Timing,
    status:        Status,
    started_at:    Tick,
    end_tick:      Tick,
    task:          T,
}

impl<T> Behavior<T> {
    pub fn new(label: &'static str, preconditions: Preconditions, timing: Timing, task: T) -> Self {
        Self {
            label,
            preconditions,
            timing,
            status: Status::Stopped,
            started_at: Tick::ZERO,
            end_tick: Tick::ZERO,
            task,
        }
    }

    pub fn task(&self) -> &T {
        &self.task
    }

    pub fn task_mut(&mut self) -> &mut T {
        &mut self.task
    }

    pub fn preconditions(&self) -> &Preconditions {
        &self.preconditions
    }

    pub fn timing(&self) -> Timing {
        self.timing
    }

    /// Tick of the most recent successful start.
    pub fn started_at(&self) -> Tick {
        self.started_at
    }

    /// Tick at which the current (or last) run times out.
    pub fn end_tick(&self) -> Tick {
        self.end_tick
    }
}

impl<W, E, T: Task<W, E>> BehaviorControl<W, E> for Behavior<T> {
    fn status(&self) -> Status {
        self.status
    }

    fn try_start(&mut self, world: &W, agent: &mut Agent<E>, now: Tick) -> bool {
        if self.status == Status::Running {
            misuse(self.label, "try_start called while running");
            return false;
        }
        if !agent.memory.satisfies(&self.preconditions) {
            return false;
        }
        if !self.task.check_extra_start_conditions(world, agent) {
            return false;
        }

        let duration = self.timing.sample(&mut agent.rng);
        self.started_at = now;
        self.end_tick = now + duration;
        self.status = Status::Running;
        log::debug!("{} started `{}` at {now} (ends {})", agent.id, self.label, self.end_tick);

        self.task.on_start(world, agent, now);
        true
    }

    fn tick_or_stop(&mut self, world: &W, agent: &mut Agent<E>, now: Tick) {
        if self.status == Status::Stopped {
            return;
        }
        // Timed out on reaching `end_tick`, so the run never outlasts it.
        let eligible = now < self.end_tick
            && agent.memory.satisfies(&self.preconditions)
            && self.task.can_still_use(world, agent, now);

        if !eligible || !self.task.on_tick(world, agent, now) {
            self.stop(world, agent, now);
        }
    }

    fn stop(&mut self, world: &W, agent: &mut Agent<E>, now: Tick) {
        if self.status == Status::Stopped {
            return;
        }
        self.task.on_stop(world, agent, now);
        self.status = Status::Stopped;
        log::debug!("{} stopped `{}` at {now}", agent.id, self.label);
    }

    fn debug_label(&self) -> &str {
        self.label
    }
}
