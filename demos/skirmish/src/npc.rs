//! Guards: what they remember and how they decide.

use mg_behavior::declare::{Absent, Present, absent, group, present};
use mg_behavior::{
    ActivitySpec, Agent, Behavior, BehaviorResult, Brain, BrainBuilder, GateBehavior, Idle,
    OneShot, OrderPolicy, RunPolicy, Scope, Task, Timing, TriggerGate,
};
use mg_core::{ActivityId, Tick};
use mg_memory::{Blackboard, Preconditions, memory_keys};

use crate::world::{Pos, World, clamp, distance, step_toward};

pub const MAX_HP: i32 = 10;
const FLEE_HP: i32 = 3;
const SIGHT: i32 = 6;

pub const FIGHT: ActivityId = ActivityId(0);
pub const PATROL: ActivityId = ActivityId(1);

memory_keys! {
    /// Last seen raider position; forgotten unless seen again.
    pub RAIDER: Pos = 0;
    pub ATTACK_COOLDOWN: () = 1;
    /// Where the guard is running from.
    pub FLEE_FROM: Pos = 2;
    pub RESTING: () = 3;
}

#[derive(Debug)]
pub struct Guard {
    pub pos:      Pos,
    pub hp:       i32,
    pub strikes:  u32,
    pub steps:    u32,
    pub retreats: u32,
}

impl Guard {
    pub fn at(pos: Pos) -> Self {
        Self { pos, hp: MAX_HP, strikes: 0, steps: 0, retreats: 0 }
    }
}

pub fn memory() -> Blackboard {
    let mut b = Blackboard::new();
    b.declare_all([RAIDER.erased(), ATTACK_COOLDOWN.erased(), FLEE_FROM.erased(), RESTING.erased()]);
    b
}

// ── Tasks ─────────────────────────────────────────────────────────────────────

/// Head back to camp; being there patches the guard up.
struct RunHome;

impl Task<World, Guard> for RunHome {
    fn on_start(&mut self, _world: &World, agent: &mut Agent<Guard>, _now: Tick) {
        agent.entity.retreats += 1;
    }

    fn on_tick(&mut self, world: &World, agent: &mut Agent<Guard>, _now: Tick) -> bool {
        let guard = &mut agent.entity;
        if guard.pos == world.camp {
            guard.hp = MAX_HP;
            return false;
        }
        guard.pos = step_toward(guard.pos, world.camp);
        guard.steps += 1;
        true
    }
}

// ── Brain ─────────────────────────────────────────────────────────────────────

fn look_around(world: &World, agent: &mut Agent<Guard>, _now: Tick) -> bool {
    let Some(raider) = world.nearest_raider(agent.entity.pos, SIGHT) else {
        return false;
    };
    agent.memory.set_with_expiry(RAIDER, raider, 5);
    true
}

fn stroll(dx: i32, dy: i32) -> impl FnMut(&World, &mut Agent<Guard>, Tick) -> bool + Send + 'static {
    move |_, agent, _| {
        let guard = &mut agent.entity;
        guard.pos = clamp((guard.pos.0 + dx, guard.pos.1 + dy));
        guard.steps += 1;
        if agent.rng.gen_bool(0.15) {
            agent.memory.set_with_expiry(RESTING, (), 4);
        }
        true
    }
}

/// A guard fights raiders it has seen, retreats to camp when hurt, and
/// patrols otherwise.
pub fn guard_brain() -> BehaviorResult<Brain<World, Guard>> {
    let panic = GateBehavior::<World, Guard>::new("panic", OrderPolicy::Ordered, RunPolicy::RunOne)
        .requires(Preconditions::new().present(FLEE_FROM))
        .erase_on_exit(FLEE_FROM)
        .with(Behavior::new("run_home", Preconditions::new(), Timing::new(10, 30)?, RunHome), 1);

    let strike = group((present(RAIDER), absent(ATTACK_COOLDOWN), absent(FLEE_FROM)))
        .label("strike")
        .apply(
            |_: &World,
             mut scope: Scope<'_, Guard>,
             _: Tick,
             (raider, cooldown, flee): (Present<Pos>, Absent<()>, Absent<Pos>)| {
                let at = *raider.get(&scope.memory);
                if distance(scope.entity.pos, at) > 1 {
                    return false;
                }
                scope.entity.strikes += 1;
                scope.entity.hp -= scope.rng.gen_range(0..=2);
                cooldown.set_with_expiry(&mut scope.memory, (), 3);
                if scope.entity.hp <= FLEE_HP {
                    flee.set(&mut scope.memory, at);
                }
                true
            },
        );

    let approach = group((present(RAIDER), absent(FLEE_FROM)))
        .label("approach")
        .running(
            Timing::new(5, 15)?,
            |_: &World, scope: Scope<'_, Guard>, _: Tick, (raider, _): (Present<Pos>, Absent<Pos>)| {
                let at = *raider.get(&scope.memory);
                if distance(scope.entity.pos, at) <= 1 {
                    return false;
                }
                scope.entity.pos = step_toward(scope.entity.pos, at);
                scope.entity.steps += 1;
                true
            },
        );

    let patrol = TriggerGate::<World, Guard>::new(OrderPolicy::Shuffled, RunPolicy::RunOne)
        .with(stroll(1, 0), 3)
        .with(stroll(-1, 0), 3)
        .with(stroll(0, 1), 1)
        .with(stroll(0, -1), 1)
        .into_one_shot("patrol")
        .with_preconditions(Preconditions::new().absent(RESTING));

    BrainBuilder::new()
        .core(-10, OneShot::new("look_around", look_around))
        .core(-5, panic)
        .activity(
            ActivitySpec::new(FIGHT)
                .requires(Preconditions::new().present(RAIDER))
                .erase_on_exit(ATTACK_COOLDOWN)
                .behavior(0, strike)
                .behavior(1, approach),
        )
        .activity(
            ActivitySpec::new(PATROL)
                .behavior(0, patrol)
                .behavior(10, Idle::behavior(Timing::new(2, 4)?)),
        )
        .default_activity(PATROL)
        .select_activities(&[FIGHT, PATROL])
        .build()
}
