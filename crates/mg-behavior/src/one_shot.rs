//! `OneShot`: a behavior that starts and completes within one tick.

use mg_core::Tick;
use mg_memory::Preconditions;

use crate::{Agent, BehaviorControl, Status, Trigger};

/// Wraps a [`Trigger`] as a behavior.
///
/// `try_start` checks the preconditions, runs the trigger once, and returns
/// whatever the trigger returned.  The behavior never enters `Running`, so
/// `tick_or_stop` and `stop` have nothing to do.  Used for reactive rules
/// ("if X is remembered, write Y") rather than multi-tick tasks.
pub struct OneShot<G> {
    label:         &'static str,
    preconditions: Preconditions,
    trigger:       G,
}

impl<G> OneShot<G> {
    pub fn new(label: &'static str, trigger: G) -> Self {
        Self { label, preconditions: Preconditions::new(), trigger }
    }

    /// Replace the memory requirements checked before the trigger runs.
    pub fn with_preconditions(mut self, preconditions: Preconditions) -> Self {
        self.preconditions = preconditions;
        self
    }

    pub fn preconditions(&self) -> &Preconditions {
        &self.preconditions
    }

    pub fn inner(&self) -> &G {
        &self.trigger
    }

    pub fn inner_mut(&mut self) -> &mut G {
        &mut self.trigger
    }
}

impl<W, E, G: Trigger<W, E>> BehaviorControl<W, E> for OneShot<G> {
    fn status(&self) -> Status {
        Status::Stopped
    }

    fn try_start(&mut self, world: &W, agent: &mut Agent<E>, now: Tick) -> bool {
        if !agent.memory.satisfies(&self.preconditions) {
            return false;
        }
        let acted = self.trigger.trigger(world, agent, now);
        if acted {
            log::trace!("{} fired `{}` at {now}", agent.id, self.label);
        }
        acted
    }

    fn tick_or_stop(&mut self, _world: &W, _agent: &mut Agent<E>, _now: Tick) {}

    fn stop(&mut self, _world: &W, _agent: &mut Agent<E>, _now: Tick) {}

    fn debug_label(&self) -> &str {
        self.label
    }
}

/// A one-shot is itself a trigger, so one-shots nest inside gates.
impl<W, E, G: Trigger<W, E>> Trigger<W, E> for OneShot<G> {
    fn trigger(&mut self, world: &W, agent: &mut Agent<E>, now: Tick) -> bool {
        <Self as BehaviorControl<W, E>>::try_start(self, world, agent, now)
    }
}
