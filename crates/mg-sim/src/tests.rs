//! Integration tests for mg-sim.

use mg_behavior::{
    ActivitySpec, Agent, Brain, BrainBuilder, Idle, OneShot, OrderPolicy, RunPolicy, Timing,
    TriggerGate,
};
use mg_core::{ActivityId, AgentId, SimConfig, Tick};
use mg_memory::{Blackboard, Preconditions, memory_keys};

use crate::{NoopObserver, SimBuilder, SimError, SimObserver};

memory_keys! {
    FLEEING: bool = 0;
    RESTED: () = 1;
}

// ── Helpers ───────────────────────────────────────────────────────────────────

#[derive(Default)]
struct World {
    danger: bool,
}

#[derive(Default)]
struct Npc {
    steps: u32,
    log:   Vec<&'static str>,
}

fn test_config(total_ticks: u64) -> SimConfig {
    SimConfig {
        start_tick: Tick::ZERO,
        total_ticks,
        seed: 42,
        num_threads: Some(1),
        report_interval_ticks: 0,
    }
}

fn memory() -> Blackboard {
    let mut b = Blackboard::new();
    b.declare(FLEEING).declare(RESTED);
    b
}

/// Counts a step every tick and flees whenever the world is dangerous.
fn walker_brain() -> Brain<World, Npc> {
    BrainBuilder::new()
        .core(
            0,
            OneShot::new("flee", |w: &World, a: &mut Agent<Npc>, _: Tick| {
                if !w.danger {
                    return false;
                }
                a.memory.set(FLEEING, true);
                true
            }),
        )
        .core(
            1,
            OneShot::new("step", |_: &World, a: &mut Agent<Npc>, _: Tick| {
                a.entity.steps += 1;
                true
            }),
        )
        .core(10, Idle::behavior(Timing::fixed(5)))
        .build()
        .unwrap()
}

fn walkers(n: usize) -> SimBuilder<World, Npc> {
    (0..n).fold(SimBuilder::new(test_config(10), World::default()), |b, _| {
        b.spawn(Npc::default(), memory(), walker_brain())
    })
}

#[derive(Default)]
struct Recorder {
    starts:  Vec<Tick>,
    running: Vec<usize>,
    ended:   Option<Tick>,
}

impl SimObserver for Recorder {
    fn on_tick_start(&mut self, tick: Tick) {
        self.starts.push(tick);
    }

    fn on_tick_end(&mut self, _tick: Tick, running: usize) {
        self.running.push(running);
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.ended = Some(final_tick);
    }
}

// ── SimBuilder validation ─────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use mg_core::CoreError;

    use super::*;

    #[test]
    fn spawned_agents_get_sequential_ids() {
        let sim = walkers(3).build().unwrap();
        assert_eq!(sim.agent_count(), 3);
        let ids: Vec<AgentId> = sim.agents().iter().map(|a| a.id).collect();
        assert_eq!(ids, [AgentId(0), AgentId(1), AgentId(2)]);
        assert_eq!(sim.now(), Tick::ZERO);
    }

    #[test]
    fn population_follows_spawned_agents() {
        let sim = walkers(1)
            .population(
                vec![Npc { steps: 7, log: Vec::new() }, Npc::default()],
                vec![memory(), memory()],
                vec![walker_brain(), walker_brain()],
            )
            .build()
            .unwrap();
        assert_eq!(sim.agent_count(), 3);
        assert_eq!(sim.agent(AgentId(1)).map(|a| a.entity.steps), Some(7));
        assert!(sim.agent(AgentId(3)).is_none());
    }

    #[test]
    fn memory_count_mismatch_errors() {
        let result = SimBuilder::new(test_config(10), World::default())
            .population(
                vec![Npc::default(), Npc::default()],
                vec![memory()],
                vec![walker_brain(), walker_brain()],
            )
            .build();
        assert!(matches!(
            result,
            Err(SimError::AgentCountMismatch { expected: 2, got: 1, what: "blackboards" })
        ));
    }

    #[test]
    fn brain_count_mismatch_errors() {
        let result = SimBuilder::new(test_config(10), World::default())
            .population(vec![Npc::default()], vec![memory()], Vec::new())
            .build();
        assert!(matches!(result, Err(SimError::AgentCountMismatch { what: "brains", .. })));
    }

    #[test]
    fn invalid_config_errors() {
        let result = SimBuilder::<World, Npc>::new(test_config(0), World::default()).build();
        assert!(matches!(result, Err(SimError::Core(CoreError::Config(_)))));

        let mut config = test_config(10);
        config.num_threads = Some(0);
        let result = SimBuilder::<World, Npc>::new(config, World::default()).build();
        assert!(result.is_err());
    }

    #[test]
    fn agents_with_equal_ids_share_rng_streams_across_sims() {
        let mut a = walkers(2).build().unwrap();
        let mut b = walkers(2).build().unwrap();
        for id in [AgentId(0), AgentId(1)] {
            let x: u64 = a.agent_mut(id).unwrap().rng.random();
            let y: u64 = b.agent_mut(id).unwrap().rng.random();
            assert_eq!(x, y);
        }
    }
}

// ── Running ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod run_tests {
    use super::*;

    #[test]
    fn runs_from_start_to_end_tick() {
        let mut config = test_config(10);
        config.start_tick = Tick(5);
        let mut sim = SimBuilder::new(config, World::default())
            .spawn(Npc::default(), memory(), walker_brain())
            .build()
            .unwrap();
        let mut obs = Recorder::default();
        sim.run(&mut obs).unwrap();

        assert_eq!(obs.starts, (5..15).map(Tick).collect::<Vec<_>>());
        assert_eq!(obs.ended, Some(Tick(15)));
        assert_eq!(sim.now(), Tick(15));
        assert_eq!(sim.agents()[0].entity.steps, 10);
    }

    #[test]
    fn run_ticks_ignores_end_tick() {
        let mut sim = walkers(1).build().unwrap();
        let mut obs = Recorder::default();
        sim.run_ticks(25, &mut obs).unwrap();
        assert_eq!(sim.now(), Tick(25));
        assert_eq!(obs.starts.len(), 25);
        assert_eq!(obs.ended, None);
    }

    #[test]
    fn observer_sees_running_behaviors() {
        let mut sim = walkers(3).build().unwrap();
        let mut obs = Recorder::default();
        sim.run_ticks(6, &mut obs).unwrap();
        // Idle runs for ticks 0..5, stops at 5, restarts at 6.
        assert_eq!(obs.running, [3, 3, 3, 3, 3, 0]);
        assert_eq!(sim.running_count(), 0);
    }

    #[test]
    fn world_changes_between_ticks_reach_behaviors() {
        let mut sim = walkers(2).build().unwrap();
        sim.run_ticks(2, &mut NoopObserver).unwrap();
        assert!(sim.agents().iter().all(|a| !a.memory.has_value(FLEEING)));

        sim.world_mut().danger = true;
        sim.run_ticks(1, &mut NoopObserver).unwrap();
        assert!(sim.agents().iter().all(|a| a.memory.has_value(FLEEING)));
        assert!(sim.world().danger);
    }

    #[test]
    fn planted_memories_expire_on_schedule() {
        let mut sim = walkers(1).build().unwrap();
        sim.run_ticks(3, &mut NoopObserver).unwrap();

        let agent = sim.agent_mut(AgentId(0)).unwrap();
        agent.memory.set_with_expiry(RESTED, (), 4);
        assert_eq!(agent.memory.expires_at(RESTED), Some(Tick(6)));

        sim.run_ticks(3, &mut NoopObserver).unwrap();
        assert!(sim.agents()[0].memory.has_value(RESTED), "tick 5 still holds it");
        sim.run_ticks(1, &mut NoopObserver).unwrap();
        assert!(!sim.agents()[0].memory.has_value(RESTED));
    }

    #[test]
    fn host_can_switch_activities_between_ticks() {
        const FLEE: ActivityId = ActivityId(0);
        const CALM: ActivityId = ActivityId(1);

        let brain = || -> Brain<World, Npc> {
            BrainBuilder::new()
                .activity(
                    ActivitySpec::new(FLEE)
                        .requires(Preconditions::new().present(FLEEING))
                        .erase_on_exit(FLEEING)
                        .behavior(0, Idle::behavior(Timing::fixed(100))),
                )
                .activity(ActivitySpec::new(CALM))
                .default_activity(CALM)
                .build()
                .unwrap()
        };
        let mut sim = SimBuilder::new(test_config(10), World::default())
            .spawn(Npc::default(), memory(), brain())
            .build()
            .unwrap();

        let (world, agent, brain) = sim.agent_and_brain_mut(AgentId(0)).unwrap();
        agent.memory.set(FLEEING, true);
        let now = agent.memory.now();
        assert_eq!(brain.set_active_to_first_valid(&[FLEE, CALM], world, agent, now), Some(FLEE));

        sim.run_ticks(1, &mut NoopObserver).unwrap();
        assert_eq!(sim.running_count(), 1);

        let (world, agent, brain) = sim.agent_and_brain_mut(AgentId(0)).unwrap();
        brain.use_default_activity(world, agent, Tick(1));
        assert!(!agent.memory.has_value(FLEEING));
        assert_eq!(sim.running_count(), 0);
        assert_eq!(sim.brain(AgentId(0)).and_then(Brain::active_activity), Some(CALM));
    }

    fn gossip_sim(seed: u64) -> crate::Sim<World, Npc> {
        let mut config = test_config(20);
        config.seed = seed;
        let mut builder = SimBuilder::new(config, World::default());
        for _ in 0..8 {
            let mut gate = TriggerGate::<World, Npc>::new(OrderPolicy::Shuffled, RunPolicy::RunOne);
            for (name, weight) in [("north", 1), ("south", 2), ("east", 3), ("west", 4)] {
                gate.push(
                    move |_: &World, a: &mut Agent<Npc>, _: Tick| {
                        a.entity.log.push(name);
                        true
                    },
                    weight,
                );
            }
            let brain = BrainBuilder::new().core(0, gate.into_one_shot("wander")).build().unwrap();
            builder = builder.spawn(Npc::default(), memory(), brain);
        }
        builder.build().unwrap()
    }

    #[test]
    fn same_seed_same_choices() {
        let mut a = gossip_sim(7);
        let mut b = gossip_sim(7);
        a.run(&mut NoopObserver).unwrap();
        b.run(&mut NoopObserver).unwrap();

        for (x, y) in a.agents().iter().zip(b.agents()) {
            assert_eq!(x.entity.log.len(), 20);
            assert_eq!(x.entity.log, y.entity.log);
        }
    }
}
