//! `mg-behavior`: memory-gated behaviors and the per-agent brain.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                        |
//! |---------------|-----------------------------------------------------------------|
//! | [`agent`]     | `Agent<E>`: entity, blackboard, and RNG handed to every hook    |
//! | [`control`]   | `BehaviorControl` contract, `Status`, `Trigger`                 |
//! | [`behavior`]  | `Behavior<T>` state machine, `Task` hooks, `Timing`             |
//! | [`one_shot`]  | `OneShot`: a trigger scheduled as a behavior                    |
//! | [`gate`]      | `TriggerGate`, `GateBehavior`, `OrderPolicy`, `RunPolicy`       |
//! | [`declare`]   | `group((present(K), absent(L)))` declarative rules              |
//! | [`noop`]      | `Idle` fallback                                                 |
//! | [`brain`]     | `Brain`, `BrainBuilder`, `ActivitySpec`                         |
//! | [`error`]     | `BehaviorError`, `BehaviorResult`                               |
//!
//! # Generic parameters
//!
//! Everything is generic over `W`, the host's read-only world, and `E`, the
//! host's per-agent entity type.  The scheduler never looks inside either.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use mg_behavior::{Agent, BrainBuilder, Idle, Timing};
//! use mg_behavior::declare::{absent, group, present};
//!
//! let strike = group((present(TARGET), absent(COOLDOWN)))
//!     .label("strike")
//!     .apply(|_: &World, mut scope: Scope<'_, Npc>, _now, (_target, cooldown)| {
//!         cooldown.set_with_expiry(&mut scope.memory, (), 20);
//!         true
//!     });
//!
//! let mut brain = BrainBuilder::new()
//!     .core(0, strike)
//!     .core(100, Idle::behavior(Timing::fixed(10)))
//!     .build()?;
//!
//! for t in 0..100 {
//!     brain.tick(&world, &mut agent, Tick(t));
//! }
//! ```

pub mod agent;
pub mod behavior;
pub mod brain;
pub mod control;
pub mod declare;
pub mod error;
pub mod gate;
pub mod noop;
pub mod one_shot;


pub use agent::Agent;
pub use behavior::{Behavior, Task, Timing};
pub use brain::{ActivitySpec, Brain, BrainBuilder};
pub use control::{BehaviorControl, BoxedBehavior, BoxedTrigger, Status, Trigger};
pub use declare::{Declared, Group, Scope, group};
pub use error::{BehaviorError, BehaviorResult};
pub use gate::{GateBehavior, OrderPolicy, RunPolicy, TriggerGate};
pub use noop::Idle;
pub use one_shot::OneShot;
