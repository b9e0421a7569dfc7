//! Seeded random streams.
//!
//! Every random choice a behavior makes (run durations, weighted gate
//! orderings, leaf coin flips) comes from the [`AgentRng`] owned by that
//! agent.  The stream is derived from the run seed and the agent id only, so
//! an agent's choices do not depend on how many other agents exist or on the
//! order agents are ticked in.  [`SimRng`] is the host's stream for world
//! setup and between-tick events.

use rand::rngs::SmallRng;
use rand::distributions::uniform::{SampleRange, SampleUniform};
use rand::distributions::{Distribution, Standard};
use rand::{Rng, RngCore, SeedableRng};

use crate::AgentId;

/// Odd 64-bit constant (golden ratio) used to spread nearby ids apart.
const SPREAD: u64 = 0x9e37_79b9_7f4a_7c15;

/// Seed of the stream belonging to `agent` in a run seeded with `run_seed`.
#[inline]
pub fn agent_seed(run_seed: u64, agent: AgentId) -> u64 {
    run_seed ^ u64::from(agent.0).wrapping_mul(SPREAD)
}

/// Convenience samplers and an [`RngCore`] impl forwarding to the wrapped
/// `SmallRng`.
macro_rules! small_rng_wrapper {
    ($name:ident) => {
        impl $name {
            /// Uniform value in `range`.
            #[inline]
            pub fn gen_range<T, R>(&mut self, range: R) -> T
            where
                T: SampleUniform,
                R: SampleRange<T>,
            {
                self.0.gen_range(range)
            }

            /// `true` with probability `p`; values outside `[0, 1]` are clamped.
            #[inline]
            pub fn gen_bool(&mut self, p: f64) -> bool {
                self.0.gen_bool(p.clamp(0.0, 1.0))
            }

            /// A value from the `Standard` distribution.
            #[inline]
            pub fn random<T>(&mut self) -> T
            where
                Standard: Distribution<T>,
            {
                self.0.r#gen()
            }
        }

        impl RngCore for $name {
            #[inline]
            fn next_u32(&mut self) -> u32 {
                self.0.next_u32()
            }

            #[inline]
            fn next_u64(&mut self) -> u64 {
                self.0.next_u64()
            }

            #[inline]
            fn fill_bytes(&mut self, dest: &mut [u8]) {
                self.0.fill_bytes(dest)
            }

            #[inline]
            fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
                self.0.try_fill_bytes(dest)
            }
        }
    };
}

// ── AgentRng ──────────────────────────────────────────────────────────────────

/// One agent's random stream.
///
/// Lives next to the agent's blackboard and travels with it when agents are
/// ticked in parallel.  Being an [`RngCore`], it can be passed straight to
/// [`ShufflingList::shuffle`][crate::ShufflingList::shuffle].
#[derive(Clone, Debug)]
pub struct AgentRng(SmallRng);

impl AgentRng {
    pub fn new(run_seed: u64, agent: AgentId) -> Self {
        AgentRng(SmallRng::seed_from_u64(agent_seed(run_seed, agent)))
    }
}

small_rng_wrapper!(AgentRng);

// ── SimRng ────────────────────────────────────────────────────────────────────

/// The host's stream: world generation and events applied between ticks.
/// Behaviors never draw from it.
#[derive(Debug)]
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Split off an independent stream, e.g. one per world subsystem.
    pub fn child(&mut self, stream: u64) -> SimRng {
        let seed = self.0.next_u64() ^ stream.wrapping_mul(SPREAD);
        SimRng(SmallRng::seed_from_u64(seed))
    }
}

small_rng_wrapper!(SimRng);
