//! `mg-memory`: the per-agent blackboard.
//!
//! # Crate layout
//!
//! | Module           | Contents                                                     |
//! |------------------|--------------------------------------------------------------|
//! | [`key`]          | `MemoryKey<T>`, `KeyId`, `ErasedKey`, `memory_keys!`         |
//! | [`status`]       | `MemoryStatus` (required), `SlotState` (actual)              |
//! | [`blackboard`]   | `Blackboard`: typed slots with optional tick expiry          |
//! | [`precondition`] | `Preconditions`: ordered `(key, required status)` list       |
//!
//! # Slot lifecycle
//!
//! ```text
//! Unregistered ──declare──▶ Registered ◀──set / erase / expiry──▶ Present
//! ```
//!
//! `declare` only happens while an agent archetype is being set up.  During
//! ticking, slots move between `Registered` and `Present` through explicit
//! writes and through [`Blackboard::advance_tick`], which the scheduler runs
//! once per tick before any behavior is polled.

pub mod blackboard;
pub mod key;
pub mod precondition;
pub mod status;

#[cfg(test)]
mod tests;

pub use blackboard::Blackboard;
pub use key::{ErasedKey, KeyId, MemoryKey};
pub use precondition::{Precondition, Preconditions};
pub use status::{MemoryStatus, SlotState};
