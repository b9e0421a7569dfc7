//! `mg-core`: foundational types for the memory-gated behavior scheduler.
//!
//! This crate is a dependency of every other `mg-*` crate.  It intentionally
//! has no `mg-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `ActivityId`                               |
//! | [`time`]        | `Tick`, `SimClock`, `SimConfig`                       |
//! | [`rng`]         | `AgentRng` (per-agent), `SimRng` (global)             |
//! | [`weighted`]    | `ShufflingList`: weighted shuffle and draw-and-remove |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to ids, `Tick`, `SimConfig`. |

pub mod error;
pub mod ids;
pub mod rng;
pub mod time;
pub mod weighted;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use ids::{ActivityId, AgentId};
pub use rng::{AgentRng, SimRng, agent_seed};
pub use time::{SimClock, SimConfig, Tick};
pub use weighted::{ShufflingList, WeightedEntry};
