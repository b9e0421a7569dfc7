//! The `BehaviorControl` contract and the `Trigger` shape.

use std::fmt;

use mg_core::Tick;

use crate::Agent;

/// Lifecycle state of a behavior.  There is no paused state.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub enum Status {
    #[default]
    Stopped,
    Running,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Status::Stopped => "stopped",
            Status::Running => "running",
        })
    }
}

/// The only boundary between the scheduler and the things it schedules.
///
/// `W` is the host's read-only world context and `E` its per-agent entity
/// type.  Every method returns within the current tick; outcomes are
/// reported through the return value and [`status`][Self::status], never
/// through panics or errors.
///
/// # Call protocol
///
/// | Method          | Caller may invoke while | Effect when invoked otherwise |
/// |-----------------|-------------------------|-------------------------------|
/// | `try_start`     | `Stopped`               | programming error (debug panic, release `false`) |
/// | `tick_or_stop`  | `Running`               | no-op                         |
/// | `stop`          | `Running`               | no-op                         |
///
/// # Example
///
/// ```rust,ignore
/// let mut wander = Behavior::new("wander", Preconditions::new(), Timing::new(20, 40)?, Wander);
/// if wander.try_start(&world, &mut agent, now) {
///     assert_eq!(wander.status(), Status::Running);
/// }
/// ```
pub trait BehaviorControl<W, E> {
    fn status(&self) -> Status;

    /// Attempt to begin.  Returns `true` if the behavior acted (it is now
    /// `Running`, or it was a one-shot that completed this tick).
    fn try_start(&mut self, world: &W, agent: &mut Agent<E>, now: Tick) -> bool;

    /// Advance one tick, or stop if the behavior timed out or lost its
    /// justification.
    fn tick_or_stop(&mut self, world: &W, agent: &mut Agent<E>, now: Tick);

    fn stop(&mut self, world: &W, agent: &mut Agent<E>, now: Tick);

    /// Human-readable name for tooling; never used for control flow.
    fn debug_label(&self) -> &str;
}

/// A boxed behavior as stored by brains and gates.
pub type BoxedBehavior<W, E> = Box<dyn BehaviorControl<W, E> + Send>;

/// A single-tick rule: runs, and reports whether it acted.
///
/// Any `FnMut(&W, &mut Agent<E>, Tick) -> bool` closure is a trigger.
pub trait Trigger<W, E> {
    fn trigger(&mut self, world: &W, agent: &mut Agent<E>, now: Tick) -> bool;
}

impl<W, E, F> Trigger<W, E> for F
where
    F: FnMut(&W, &mut Agent<E>, Tick) -> bool,
{
    #[inline]
    fn trigger(&mut self, world: &W, agent: &mut Agent<E>, now: Tick) -> bool {
        self(world, agent, now)
    }
}

/// A boxed trigger as stored by [`TriggerGate`][crate::TriggerGate].
pub type BoxedTrigger<W, E> = Box<dyn Trigger<W, E> + Send>;

/// Report a call-protocol violation: panic in debug builds, warn in release.
pub(crate) fn misuse(label: &str, what: &str) {
    if cfg!(debug_assertions) {
        panic!("behavior `{label}`: {what}");
    }
    log::warn!("behavior `{label}`: {what}; ignoring");
}
