//! `Brain`: the per-agent scheduler.
//!
//! # Tick
//!
//! ```text
//! Brain::tick(world, agent, now):
//!   ① Expire : agent.memory.advance_tick(now)
//!   ①' Select: if the brain has an activity ladder, switch to its first
//!               activity whose requirements hold (else the default)
//!   ② Start  : in priority order, try_start every Stopped behavior that is
//!               core or belongs to the active activity
//!   ③ Tick   : in priority order, tick_or_stop every Running behavior
//! ```
//!
//! Behaviors started in ② are ticked in ③ of the same tick.  Lower priority
//! values go first; equal priorities keep registration order.
//!
//! # Activities
//!
//! An activity is a named set of behaviors ("fight", "idle", "rest") that is
//! only eligible while it is the active one.  Switching away stops the left
//! activity's running behaviors and erases its exit keys, so whatever it was
//! tracking does not leak into the next one.

use mg_core::{ActivityId, Tick};
use mg_memory::{ErasedKey, MemoryKey, Preconditions};

use crate::{Agent, BehaviorControl, BehaviorError, BehaviorResult, BoxedBehavior, Status};

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum Owner {
    Core,
    Activity(usize),
}

struct Slot<W, E> {
    priority: i32,
    owner:    Owner,
    behavior: BoxedBehavior<W, E>,
}

struct Activity {
    id:           ActivityId,
    requirements: Preconditions,
    exit_erased:  Vec<ErasedKey>,
}

/// Every behavior one agent can run, plus which activity is active.
///
/// Build with [`BrainBuilder`].  A brain is owned by exactly one agent and
/// is only ever polled by the thread processing that agent.
pub struct Brain<W, E> {
    slots:      Vec<Slot<W, E>>,
    activities: Vec<Activity>,
    ladder:     Vec<usize>,
    active:     Option<usize>,
    default:    Option<usize>,
}

impl<W, E> Brain<W, E> {
    /// Advance the agent by one tick.
    pub fn tick(&mut self, world: &W, agent: &mut Agent<E>, now: Tick) {
        agent.memory.advance_tick(now);
        if !self.ladder.is_empty() {
            let next = self
                .ladder
                .iter()
                .copied()
                .find(|&i| agent.memory.satisfies(&self.activities[i].requirements))
                .or(self.default);
            self.switch_to(next, world, agent, now);
        }

        let active = self.active;
        for slot in &mut self.slots {
            if slot.eligible(active) && slot.behavior.status() == Status::Stopped {
                slot.behavior.try_start(world, agent, now);
            }
        }
        for slot in &mut self.slots {
            if slot.behavior.status() == Status::Running {
                slot.behavior.tick_or_stop(world, agent, now);
            }
        }
    }

    pub fn active_activity(&self) -> Option<ActivityId> {
        self.active.map(|i| self.activities[i].id)
    }

    pub fn default_activity(&self) -> Option<ActivityId> {
        self.default.map(|i| self.activities[i].id)
    }

    pub fn has_activity(&self, id: ActivityId) -> bool {
        self.position(id).is_some()
    }

    /// Whether `id`'s entry requirements hold for `agent` right now.
    pub fn activity_requirements_met(&self, id: ActivityId, agent: &Agent<E>) -> BehaviorResult<bool> {
        let index = self.position(id).ok_or(BehaviorError::UnknownActivity(id))?;
        Ok(agent.memory.satisfies(&self.activities[index].requirements))
    }

    /// Make `id` the active activity, regardless of its requirements.
    ///
    /// Switching to the already-active activity does nothing.
    pub fn set_active_activity(
        &mut self,
        id:    ActivityId,
        world: &W,
        agent: &mut Agent<E>,
        now:   Tick,
    ) -> BehaviorResult<()> {
        let index = self.position(id).ok_or(BehaviorError::UnknownActivity(id))?;
        self.switch_to(Some(index), world, agent, now);
        Ok(())
    }

    /// Activate the first activity in `candidates` whose requirements hold.
    ///
    /// Returns the activity chosen, or `None` (leaving the active activity
    /// unchanged) if none qualifies.  Unregistered ids are skipped.
    pub fn set_active_to_first_valid(
        &mut self,
        candidates: &[ActivityId],
        world:      &W,
        agent:      &mut Agent<E>,
        now:        Tick,
    ) -> Option<ActivityId> {
        let index = candidates.iter().find_map(|&id| {
            self.position(id)
                .filter(|&i| agent.memory.satisfies(&self.activities[i].requirements))
        })?;
        self.switch_to(Some(index), world, agent, now);
        Some(self.activities[index].id)
    }

    /// Fall back to the default activity, or to core behaviors only if the
    /// brain has no default.
    pub fn use_default_activity(&mut self, world: &W, agent: &mut Agent<E>, now: Tick) {
        self.switch_to(self.default, world, agent, now);
    }

    /// Stop every running behavior, core included.  Memory is untouched.
    pub fn stop_all(&mut self, world: &W, agent: &mut Agent<E>, now: Tick) {
        for slot in &mut self.slots {
            if slot.behavior.status() == Status::Running {
                slot.behavior.stop(world, agent, now);
            }
        }
    }

    /// Labels of running behaviors, in priority order.
    pub fn running_labels(&self) -> Vec<&str> {
        self.slots
            .iter()
            .filter(|s| s.behavior.status() == Status::Running)
            .map(|s| s.behavior.debug_label())
            .collect()
    }

    pub fn running_count(&self) -> usize {
        self.slots.iter().filter(|s| s.behavior.status() == Status::Running).count()
    }

    /// Total number of behaviors across core and every activity.
    pub fn behavior_count(&self) -> usize {
        self.slots.len()
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn position(&self, id: ActivityId) -> Option<usize> {
        self.activities.iter().position(|a| a.id == id)
    }

    fn switch_to(&mut self, next: Option<usize>, world: &W, agent: &mut Agent<E>, now: Tick) {
        if next == self.active {
            return;
        }
        let from = self.active.map(|i| self.activities[i].id);
        if let Some(left) = self.active {
            for slot in &mut self.slots {
                if slot.owner == Owner::Activity(left) && slot.behavior.status() == Status::Running {
                    slot.behavior.stop(world, agent, now);
                }
            }
            for key in &self.activities[left].exit_erased {
                agent.memory.erase_id(*key);
            }
        }
        self.active = next;
        log::debug!(
            "{} switched activity {} -> {} at {now}",
            agent.id,
            describe(from),
            describe(next.map(|i| self.activities[i].id)),
        );
    }
}

fn describe(id: Option<ActivityId>) -> String {
    id.map_or_else(|| "none".to_owned(), |id| id.to_string())
}

impl<W, E> Slot<W, E> {
    #[inline]
    fn eligible(&self, active: Option<usize>) -> bool {
        match self.owner {
            Owner::Core => true,
            Owner::Activity(i) => active == Some(i),
        }
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

/// One activity's behaviors, entry requirements, and exit keys.
///
/// ```rust,ignore
/// let fight = ActivitySpec::new(FIGHT)
///     .requires(Preconditions::new().present(ATTACK_TARGET))
///     .erase_on_exit(ATTACK_TARGET)
///     .behavior(0, strike)
///     .behavior(10, Idle::behavior(Timing::fixed(5)));
/// ```
pub struct ActivitySpec<W, E> {
    id:           ActivityId,
    requirements: Preconditions,
    exit_erased:  Vec<ErasedKey>,
    behaviors:    Vec<(i32, BoxedBehavior<W, E>)>,
}

impl<W, E> ActivitySpec<W, E> {
    pub fn new(id: ActivityId) -> Self {
        Self {
            id,
            requirements: Preconditions::new(),
            exit_erased: Vec::new(),
            behaviors: Vec::new(),
        }
    }

    /// Memory requirements checked by
    /// [`Brain::set_active_to_first_valid`].
    pub fn requires(mut self, requirements: Preconditions) -> Self {
        self.requirements = requirements;
        self
    }

    /// Erase `key` whenever the brain switches away from this activity.
    pub fn erase_on_exit<T>(mut self, key: MemoryKey<T>) -> Self {
        self.exit_erased.push(key.erased());
        self
    }

    pub fn behavior<B>(mut self, priority: i32, behavior: B) -> Self
    where
        B: BehaviorControl<W, E> + Send + 'static,
    {
        self.behaviors.push((priority, Box::new(behavior)));
        self
    }
}

/// Fluent builder for [`Brain`].
pub struct BrainBuilder<W, E> {
    core:       Vec<(i32, BoxedBehavior<W, E>)>,
    activities: Vec<ActivitySpec<W, E>>,
    default:    Option<ActivityId>,
    ladder:     Vec<ActivityId>,
}

impl<W, E> Default for BrainBuilder<W, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W, E> BrainBuilder<W, E> {
    pub fn new() -> Self {
        Self { core: Vec::new(), activities: Vec::new(), default: None, ladder: Vec::new() }
    }

    /// Add a behavior that is eligible under every activity.
    pub fn core<B>(mut self, priority: i32, behavior: B) -> Self
    where
        B: BehaviorControl<W, E> + Send + 'static,
    {
        self.core.push((priority, Box::new(behavior)));
        self
    }

    pub fn activity(mut self, spec: ActivitySpec<W, E>) -> Self {
        self.activities.push(spec);
        self
    }

    /// The activity the brain starts in and returns to on
    /// [`Brain::use_default_activity`].
    pub fn default_activity(mut self, id: ActivityId) -> Self {
        self.default = Some(id);
        self
    }

    /// Re-pick the activity at the start of every tick: the first of
    /// `ladder` whose requirements hold, else the default.
    ///
    /// Without a ladder the activity only changes when the host switches it.
    pub fn select_activities(mut self, ladder: &[ActivityId]) -> Self {
        self.ladder = ladder.to_vec();
        self
    }

    /// Validate activity ids and sort every behavior by priority.
    pub fn build(self) -> BehaviorResult<Brain<W, E>> {
        for (i, spec) in self.activities.iter().enumerate() {
            if self.activities[..i].iter().any(|s| s.id == spec.id) {
                return Err(BehaviorError::DuplicateActivity(spec.id));
            }
        }
        let resolve = |id: ActivityId| {
            self.activities
                .iter()
                .position(|s| s.id == id)
                .ok_or(BehaviorError::UnknownActivity(id))
        };
        let default = self.default.map(resolve).transpose()?;
        let ladder = self.ladder.iter().map(|&id| resolve(id)).collect::<BehaviorResult<Vec<_>>>()?;

        let mut slots: Vec<Slot<W, E>> = self
            .core
            .into_iter()
            .map(|(priority, behavior)| Slot { priority, owner: Owner::Core, behavior })
            .collect();
        let mut activities = Vec::with_capacity(self.activities.len());
        for (index, spec) in self.activities.into_iter().enumerate() {
            slots.extend(spec.behaviors.into_iter().map(|(priority, behavior)| Slot {
                priority,
                owner: Owner::Activity(index),
                behavior,
            }));
            activities.push(Activity {
                id:           spec.id,
                requirements: spec.requirements,
                exit_erased:  spec.exit_erased,
            });
        }
        // Stable: equal priorities keep registration order.
        slots.sort_by_key(|s| s.priority);

        Ok(Brain { slots, activities, ladder, active: default, default })
    }
}
