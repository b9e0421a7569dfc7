//! The idle behavior: does nothing for a while.

use mg_memory::Preconditions;

use crate::{Behavior, Task, Timing};

/// A [`Task`] with every hook left at its default.
///
/// Scheduled at the lowest priority of an activity it guarantees the agent
/// always has something running, so a badly composed activity shows up as
/// an idling agent rather than a stuck one.
pub struct Idle;

impl<W, E> Task<W, E> for Idle {}

impl Idle {
    /// An unconditional idle behavior lasting a duration drawn from `timing`.
    pub fn behavior(timing: Timing) -> Behavior<Idle> {
        Behavior::new("idle", Preconditions::new(), timing, Idle)
    }
}
