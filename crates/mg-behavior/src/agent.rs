//! The agent handle every behavior callback receives.

use mg_core::{AgentId, AgentRng};
use mg_memory::Blackboard;

/// One agent: the host's entity data plus the state the scheduler owns.
///
/// Everything here is exclusively owned by the agent, so a whole `Agent`
/// (together with its [`Brain`][crate::Brain]) can be handed to a worker
/// thread without aliasing.
pub struct Agent<E> {
    pub id: AgentId,

    /// Host-defined entity state (position, health, inventory, …).
    pub entity: E,

    /// Private fact store.  Only the behavior currently being polled writes
    /// to it.
    pub memory: Blackboard,

    /// Per-agent RNG: behavior durations and gate shuffles draw from here.
    pub rng: AgentRng,
}

impl<E> Agent<E> {
    /// Create an agent whose RNG is derived from the run's `global_seed`.
    pub fn new(id: AgentId, entity: E, memory: Blackboard, global_seed: u64) -> Self {
        Self { id, entity, memory, rng: AgentRng::new(global_seed, id) }
    }
}
