//! Fluent builder for constructing a [`Sim`].

use mg_behavior::{Agent, Brain};
use mg_core::{AgentId, SimConfig};
use mg_memory::Blackboard;

use crate::{Sim, SimError, SimResult};

/// Fluent builder for [`Sim<W, E>`].
///
/// # Inputs
///
/// - [`SimConfig`]: start tick, total ticks, seed, threads, report interval
/// - `W`: the world every behavior reads
/// - agents, one `(entity, blackboard, brain)` triple each, either one at a
///   time with [`spawn`][Self::spawn] or in bulk with
///   [`population`][Self::population]
///
/// Agents get ids `0..n` in the order they were added.
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config, world)
///     .spawn(Npc::guard(), guard_memory(), guard_brain()?)
///     .population(villagers, villager_memories, villager_brains)
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<W, E> {
    config:  SimConfig,
    world:   W,
    spawned: Vec<(E, Blackboard, Brain<W, E>)>,
    bulk:    Option<(Vec<E>, Vec<Blackboard>, Vec<Brain<W, E>>)>,
}

impl<W, E> SimBuilder<W, E> {
    pub fn new(config: SimConfig, world: W) -> Self {
        Self { config, world, spawned: Vec::new(), bulk: None }
    }

    /// Add one agent.
    pub fn spawn(mut self, entity: E, memory: Blackboard, brain: Brain<W, E>) -> Self {
        self.spawned.push((entity, memory, brain));
        self
    }

    /// Add many agents from parallel vectors, appended after any spawned
    /// one-by-one.  Lengths are checked in [`build`][Self::build].
    pub fn population(
        mut self,
        entities: Vec<E>,
        memories: Vec<Blackboard>,
        brains:   Vec<Brain<W, E>>,
    ) -> Self {
        self.bulk = Some((entities, memories, brains));
        self
    }

    /// Validate the configuration and population, seed every agent's RNG,
    /// and return a ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim<W, E>> {
        self.config.validate()?;

        let mut triples = self.spawned;
        if let Some((entities, memories, brains)) = self.bulk {
            let expected = entities.len();
            if memories.len() != expected {
                return Err(SimError::AgentCountMismatch {
                    expected,
                    got:  memories.len(),
                    what: "blackboards",
                });
            }
            if brains.len() != expected {
                return Err(SimError::AgentCountMismatch {
                    expected,
                    got:  brains.len(),
                    what: "brains",
                });
            }
            triples.extend(
                entities
                    .into_iter()
                    .zip(memories)
                    .zip(brains)
                    .map(|((entity, memory), brain)| (entity, memory, brain)),
            );
        }

        let seed = self.config.seed;
        let mut agents = Vec::with_capacity(triples.len());
        let mut brains = Vec::with_capacity(triples.len());
        for (i, (entity, memory, brain)) in triples.into_iter().enumerate() {
            let id = AgentId::try_from(i)
                .map_err(|_| SimError::Config(format!("agent index {i} does not fit in an AgentId")))?;
            agents.push(Agent::new(id, entity, memory, seed));
            brains.push(brain);
        }

        #[cfg(feature = "parallel")]
        let pool = match self.config.num_threads {
            Some(n) => Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(n)
                    .build()
                    .map_err(|e| SimError::ThreadPool(e.to_string()))?,
            ),
            None => None,
        };

        log::debug!("built sim with {} agents, {}", agents.len(), self.config.make_clock());

        Ok(Sim {
            clock: self.config.make_clock(),
            config: self.config,
            world: self.world,
            agents,
            brains,
            #[cfg(feature = "parallel")]
            pool,
        })
    }
}
