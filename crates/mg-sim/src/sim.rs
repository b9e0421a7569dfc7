//! The `Sim` struct and its tick loop.

use mg_behavior::{Agent, Brain};
use mg_core::{AgentId, SimClock, SimConfig, Tick};

use crate::{SimObserver, SimResult};

/// The host loop: one world, many agents, one brain per agent.
///
/// Each tick every agent's brain runs once against a shared `&W`.  Agents
/// never see each other's blackboards, so the order agents are processed in
/// does not affect results and the `parallel` feature is deterministic.
///
/// The world is only mutable between ticks, through
/// [`world_mut`][Self::world_mut].
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<W, E> {
    /// Global configuration (start tick, total ticks, seed, …).
    pub config: SimConfig,

    /// Tracks the next tick to process.
    pub clock: SimClock,

    pub(crate) world:  W,
    pub(crate) agents: Vec<Agent<E>>,
    pub(crate) brains: Vec<Brain<W, E>>,

    #[cfg(feature = "parallel")]
    pub(crate) pool: Option<rayon::ThreadPool>,
}

impl<W, E> Sim<W, E>
where
    W: Sync,
    E: Send,
{
    // ── Public API ────────────────────────────────────────────────────────

    /// Run from the current tick to `config.end_tick()`.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let end = self.config.end_tick();
        while self.clock.current_tick < end {
            self.step(observer);
        }
        log::debug!("sim finished at {}", self.clock);
        observer.on_sim_end(self.clock.current_tick);
        Ok(())
    }

    /// Run exactly `n` ticks from the current position, ignoring `end_tick`.
    ///
    /// Useful for tests and for hosts that interleave world updates.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.step(observer);
        }
        Ok(())
    }

    pub fn now(&self) -> Tick {
        self.clock.current_tick
    }

    pub fn world(&self) -> &W {
        &self.world
    }

    /// Mutable world access between ticks.
    pub fn world_mut(&mut self) -> &mut W {
        &mut self.world
    }

    pub fn agent_count(&self) -> usize {
        self.agents.len()
    }

    pub fn agents(&self) -> &[Agent<E>] {
        &self.agents
    }

    pub fn agent(&self, id: AgentId) -> Option<&Agent<E>> {
        self.agents.get(id.index())
    }

    /// Mutable agent access between ticks, e.g. to plant a memory.
    pub fn agent_mut(&mut self, id: AgentId) -> Option<&mut Agent<E>> {
        self.agents.get_mut(id.index())
    }

    pub fn brain(&self, id: AgentId) -> Option<&Brain<W, E>> {
        self.brains.get(id.index())
    }

    /// Agent and brain together, for host-driven activity switches.
    pub fn agent_and_brain_mut(&mut self, id: AgentId) -> Option<(&W, &mut Agent<E>, &mut Brain<W, E>)> {
        let agent = self.agents.get_mut(id.index())?;
        let brain = self.brains.get_mut(id.index())?;
        Some((&self.world, agent, brain))
    }

    /// Total behaviors currently `Running` across all agents.
    pub fn running_count(&self) -> usize {
        self.brains.iter().map(Brain::running_count).sum()
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn step<O: SimObserver>(&mut self, observer: &mut O) {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);
        let running = self.process_tick(now);
        observer.on_tick_end(now, running);

        let interval = self.config.report_interval_ticks;
        if interval > 0 && self.clock.elapsed() % interval == 0 {
            log::info!("{now}: {} agents, {running} behaviors running", self.agents.len());
        }
        self.clock.advance();
    }

    /// Tick every agent once and return the number of running behaviors.
    fn process_tick(&mut self, now: Tick) -> usize {
        // Explicit field borrows so the borrow checker sees disjoint access.
        let world  = &self.world;
        let agents = &mut self.agents;
        let brains = &mut self.brains;

        #[cfg(not(feature = "parallel"))]
        {
            agents
                .iter_mut()
                .zip(brains.iter_mut())
                .map(|(agent, brain)| {
                    brain.tick(world, agent, now);
                    brain.running_count()
                })
                .sum()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            let work = move || -> usize {
                agents
                    .par_iter_mut()
                    .zip(brains.par_iter_mut())
                    .map(|(agent, brain)| {
                        brain.tick(world, agent, now);
                        brain.running_count()
                    })
                    .sum()
            };
            match &self.pool {
                Some(pool) => pool.install(work),
                None => work(),
            }
        }
    }
}
