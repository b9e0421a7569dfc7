//! `mg-sim`: host tick loop for the memory-gated behavior scheduler.
//!
//! # Tick loop
//!
//! ```text
//! for tick in start_tick..end_tick:
//!   observer.on_tick_start(tick)
//!   for each (agent, brain):          ← parallel with the `parallel` feature
//!     brain.tick(&world, agent, tick)
//!       ① expire memories
//!       ② start eligible behaviors
//!       ③ tick running behaviors
//!   observer.on_tick_end(tick, running)
//! observer.on_sim_end(end_tick)
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                    |
//! |------------|-----------------------------------------------------------|
//! | `parallel` | Ticks agents on Rayon; `num_threads` builds a dedicated pool. |
//! | `serde`    | Forwards `mg-core/serde` so `SimConfig` can be loaded.    |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use mg_core::SimConfig;
//! use mg_sim::{NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::new(config, world)
//!     .population(npcs, memories, brains)
//!     .build()?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use sim::Sim;
