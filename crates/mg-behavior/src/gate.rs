//! Gates: composites that try several children under an ordering policy
//! and a run-count policy.
//!
//! | Type             | Children                 | Lifecycle                         |
//! |------------------|--------------------------|-----------------------------------|
//! | [`TriggerGate`]  | one-tick [`Trigger`]s    | one scheduling pass per call      |
//! | [`GateBehavior`] | multi-tick behaviors     | runs while any started child runs |
//!
//! Both keep their children in a [`ShufflingList`]; under
//! [`OrderPolicy::Shuffled`] the list is reshuffled in place with the
//! agent's RNG before every pass, so heavier children tend to be tried
//! earlier.

use mg_core::{ShufflingList, Tick};
use mg_memory::{ErasedKey, MemoryKey, Preconditions};

use crate::control::misuse;
use crate::{
    Agent, BehaviorControl, BoxedBehavior, BoxedTrigger, OneShot, Status, Trigger,
};

/// Order children are tried in.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum OrderPolicy {
    /// Insertion order, every time.
    Ordered,
    /// Weighted reshuffle before every pass.
    Shuffled,
}

/// How many children a pass may run.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum RunPolicy {
    /// Stop at the first child that acts.
    RunOne,
    /// Try every child.
    RunAll,
}

// ── TriggerGate ───────────────────────────────────────────────────────────────

/// Runs a prioritized or randomized set of triggers as one unit, e.g. "try
/// these strategies in random order, stop after the first that fires".
///
/// The gate always reports having acted.  Wrap it with
/// [`into_one_shot`][Self::into_one_shot] to schedule it as a behavior.
pub struct TriggerGate<W, E> {
    triggers: ShufflingList<BoxedTrigger<W, E>>,
    order:    OrderPolicy,
    run:      RunPolicy,
}

impl<W, E> TriggerGate<W, E> {
    pub fn new(order: OrderPolicy, run: RunPolicy) -> Self {
        Self { triggers: ShufflingList::new(), order, run }
    }

    /// Builder-style [`push`][Self::push].
    pub fn with<T>(mut self, trigger: T, weight: u32) -> Self
    where
        T: Trigger<W, E> + Send + 'static,
    {
        self.push(trigger, weight);
        self
    }

    pub fn push<T>(&mut self, trigger: T, weight: u32)
    where
        T: Trigger<W, E> + Send + 'static,
    {
        self.triggers.push(Box::new(trigger), weight);
    }

    pub fn order(&self) -> OrderPolicy {
        self.order
    }

    pub fn run_policy(&self) -> RunPolicy {
        self.run
    }

    pub fn len(&self) -> usize {
        self.triggers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triggers.is_empty()
    }

    pub fn into_one_shot(self, label: &'static str) -> OneShot<Self> {
        OneShot::new(label, self)
    }
}

impl<W, E> Trigger<W, E> for TriggerGate<W, E> {
    fn trigger(&mut self, world: &W, agent: &mut Agent<E>, now: Tick) -> bool {
        if self.order == OrderPolicy::Shuffled {
            self.triggers.shuffle(&mut agent.rng);
        }
        let run = self.run;
        for trigger in self.triggers.iter_mut() {
            if trigger.trigger(world, agent, now) && run == RunPolicy::RunOne {
                break;
            }
        }
        true
    }
}

// ── GateBehavior ──────────────────────────────────────────────────────────────

/// A behavior composed of multi-tick child behaviors.
///
/// - `try_start`: checks the gate's own preconditions, then tries children in
///   policy order.  Returns `true` if any child acted; the gate is `Running`
///   while at least one child is.
/// - `tick_or_stop`: stops if the gate's preconditions no longer hold,
///   otherwise ticks every running child and stops once none is left.
/// - `stop`: stops every running child and erases the gate's exit keys.
///
/// Exit keys are how a gate tells its siblings "I'm done with this": e.g. a
/// panic gate erases `FLEE_FROM` so the idle gate may start again.
pub struct GateBehavior<W, E> {
    label:         &'static str,
    preconditions: Preconditions,
    exit_erased:   Vec<ErasedKey>,
    children:      ShufflingList<BoxedBehavior<W, E>>,
    order:         OrderPolicy,
    run:           RunPolicy,
    status:        Status,
}

impl<W, E> GateBehavior<W, E> {
    pub fn new(label: &'static str, order: OrderPolicy, run: RunPolicy) -> Self {
        Self {
            label,
            preconditions: Preconditions::new(),
            exit_erased: Vec::new(),
            children: ShufflingList::new(),
            order,
            run,
            status: Status::Stopped,
        }
    }

    pub fn requires(mut self, preconditions: Preconditions) -> Self {
        self.preconditions = preconditions;
        self
    }

    /// Erase `key` whenever the gate stops.
    pub fn erase_on_exit<T>(mut self, key: MemoryKey<T>) -> Self {
        self.exit_erased.push(key.erased());
        self
    }

    pub fn with<B>(mut self, child: B, weight: u32) -> Self
    where
        B: BehaviorControl<W, E> + Send + 'static,
    {
        self.children.push(Box::new(child), weight);
        self
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Labels of the children currently running, in current order.
    pub fn running_children(&self) -> Vec<&str> {
        self.children
            .iter()
            .filter(|c| c.status() == Status::Running)
            .map(|c| c.debug_label())
            .collect()
    }

    fn any_child_running(&self) -> bool {
        self.children.iter().any(|c| c.status() == Status::Running)
    }
}

impl<W, E> BehaviorControl<W, E> for GateBehavior<W, E> {
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
        if self.order == OrderPolicy::Shuffled {
            self.children.shuffle(&mut agent.rng);
        }

        let run = self.run;
        let mut acted = false;
        for child in self.children.iter_mut() {
            if child.status() == Status::Stopped && child.try_start(world, agent, now) {
                acted = true;
                if run == RunPolicy::RunOne {
                    break;
                }
            }
        }

        if self.any_child_running() {
            self.status = Status::Running;
            log::debug!("{} opened gate `{}` at {now}", agent.id, self.label);
        }
        acted
    }

    fn tick_or_stop(&mut self, world: &W, agent: &mut Agent<E>, now: Tick) {
        if self.status == Status::Stopped {
            return;
        }
        if !agent.memory.satisfies(&self.preconditions) {
            self.stop(world, agent, now);
            return;
        }
        for child in self.children.iter_mut() {
            if child.status() == Status::Running {
                child.tick_or_stop(world, agent, now);
            }
        }
        if !self.any_child_running() {
            self.stop(world, agent, now);
        }
    }

    fn stop(&mut self, world: &W, agent: &mut Agent<E>, now: Tick) {
        if self.status == Status::Stopped {
            return;
        }
        for child in self.children.iter_mut() {
            if child.status() == Status::Running {
                child.stop(world, agent, now);
            }
        }
        for key in &self.exit_erased {
            agent.memory.erase_id(*key);
        }
        self.status = Status::Stopped;
        log::debug!("{} closed gate `{}` at {now}", agent.id, self.label);
    }

    fn debug_label(&self) -> &str {
        self.label
    }
}
