//! Declarative memory groups.
//!
//! A behavior author lists the keys a rule depends on and the status each
//! must have, and writes the rule's body against typed accessors bound to
//! exactly those keys.  The group's specs become the product's
//! preconditions, so there is no separate bookkeeping to keep in sync.
//!
//! ```rust
//! use mg_behavior::declare::{Absent, Present, absent, group, present};
//! use mg_behavior::Scope;
//! use mg_core::Tick;
//! use mg_memory::memory_keys;
//!
//! memory_keys! {
//!     ATTACK_TARGET: u32 = 0;
//!     ATTACK_COOLDOWN: () = 1;
//! }
//!
//! // "When I have a target and no cooldown, strike and start a cooldown."
//! let _strike = group((present(ATTACK_TARGET), absent(ATTACK_COOLDOWN)))
//!     .label("strike")
//!     .apply(
//!         |reach: &u32, mut scope: Scope<'_, ()>, _: Tick, (target, cooldown): (Present<u32>, Absent<()>)| {
//!             if *target.get(&scope.memory) > *reach {
//!                 return false;
//!             }
//!             cooldown.set_with_expiry(&mut scope.memory, (), 20);
//!             true
//!         },
//!     );
//! ```
//!
//! A body cannot name a key its group did not declare: [`present`] and
//! friends only build [`Spec`]s, which have no accessors, and the handles
//! themselves cannot be constructed outside this crate.
//!
//! ```rust,compile_fail
//! use mg_behavior::declare::{Present, group, present};
//! use mg_behavior::Scope;
//! use mg_core::Tick;
//! use mg_memory::memory_keys;
//!
//! memory_keys! {
//!     TARGET: u32 = 0;
//!     FLAG: bool = 1;
//! }
//!
//! let _rule = group((present(TARGET),)).apply(
//!     |_: &(), mut scope: Scope<'_, ()>, _: Tick, (_target,): (Present<u32>,)| {
//!         present(FLAG).set(&mut scope.memory, true);
//!         true
//!     },
//! );
//! ```
//!
//! Groups of one to six specs are supported; a single spec is written as a
//! one-element tuple, `group((present(KEY),))`.

mod accessor;

pub use accessor::{Absent, Memories, Present, Registered, Scope, Spec};

use mg_core::Tick;
use mg_memory::{ErasedKey, MemoryKey, MemoryStatus, Preconditions};

use crate::{Agent, Behavior, OneShot, Task, Timing, Trigger};

// ── Specs ─────────────────────────────────────────────────────────────────────

/// Require `key` to hold a value; the body gets a [`Present`] handle.
pub const fn present<T>(key: MemoryKey<T>) -> Spec<Present<T>> {
    Spec::<Present<T>>::present(key)
}

/// Require `key` to be empty; the body gets an [`Absent`] handle.
pub const fn absent<T>(key: MemoryKey<T>) -> Spec<Absent<T>> {
    Spec::<Absent<T>>::absent(key)
}

/// Require `key` to be declared; the body gets a [`Registered`] handle.
pub const fn registered<T>(key: MemoryKey<T>) -> Spec<Registered<T>> {
    Spec::<Registered<T>>::registered(key)
}

/// An accessor handle together with the status its group requires.
pub trait MemorySpec: Copy {
    fn erased_key(&self) -> ErasedKey;
    fn requirement(&self) -> MemoryStatus;
}

/// A tuple of [`Spec`]s.
pub trait SpecGroup: Copy {
    /// The matching tuple of handles passed to the body.
    type Handles;

    /// The group's specs as preconditions, in declaration order.
    ///
    /// # Panics
    /// Panics if two specs name the same key.
    fn preconditions(&self) -> Preconditions;

    fn handles(&self) -> Self::Handles;
}

macro_rules! impl_spec_group {
    ($($spec:ident),+) => {
        impl<$($spec: MemorySpec),+> SpecGroup for ($(Spec<$spec>,)+) {
            type Handles = ($($spec,)+);

            #[allow(non_snake_case)]
            fn preconditions(&self) -> Preconditions {
                let ($(Spec($spec),)+) = *self;
                Preconditions::new()
                    $(.require($spec.erased_key(), $spec.requirement()))+
            }

            #[allow(non_snake_case)]
            fn handles(&self) -> Self::Handles {
                let ($(Spec($spec),)+) = *self;
                ($($spec,)+)
            }
        }
    };
}

impl_spec_group!(A);
impl_spec_group!(A, B);
impl_spec_group!(A, B, C);
impl_spec_group!(A, B, C, D);
impl_spec_group!(A, B, C, D, E);
impl_spec_group!(A, B, C, D, E, F);

// ── Group ─────────────────────────────────────────────────────────────────────

/// Start a declaration.
///
/// # Panics
/// Panics if two specs name the same key.  Groups are built during agent
/// setup, so this surfaces immediately rather than mid-simulation.
pub fn group<G: SpecGroup>(specs: G) -> Group<G> {
    let preconditions = specs.preconditions();
    Group { specs, preconditions, label: "declared" }
}

/// A validated set of specs waiting for its body.
pub struct Group<G> {
    specs:         G,
    preconditions: Preconditions,
    label:         &'static str,
}

impl<G: SpecGroup> Group<G> {
    /// Name the resulting behavior for tooling.
    pub fn label(mut self, label: &'static str) -> Self {
        self.label = label;
        self
    }

    pub fn preconditions(&self) -> &Preconditions {
        &self.preconditions
    }

    /// Compile the group and `body` into a one-shot rule.
    ///
    /// The rule fires only when every spec holds; `body` then runs once and
    /// its return value is what the rule reports.
    pub fn apply<W, E, F>(self, body: F) -> OneShot<Declared<G, F>>
    where
        F: FnMut(&W, Scope<'_, E>, Tick, G::Handles) -> bool,
    {
        OneShot::new(self.label, Declared { specs: self.specs, body })
            .with_preconditions(self.preconditions)
    }

    /// Compile the group and `body` into a multi-tick behavior.
    ///
    /// The specs are checked at start and on every tick; `body` runs once
    /// per tick while running, and returning `false` stops the behavior on
    /// the spot.
    pub fn running<W, E, F>(self, timing: Timing, body: F) -> Behavior<Declared<G, F>>
    where
        F: FnMut(&W, Scope<'_, E>, Tick, G::Handles) -> bool,
    {
        Behavior::new(self.label, self.preconditions, timing, Declared { specs: self.specs, body })
    }
}

/// A group's accessors bound to its body.
pub struct Declared<G, F> {
    specs: G,
    body:  F,
}

impl<G: SpecGroup, F> Declared<G, F> {
    fn call<W, E>(&mut self, world: &W, agent: &mut Agent<E>, now: Tick) -> bool
    where
        F: FnMut(&W, Scope<'_, E>, Tick, G::Handles) -> bool,
    {
        (self.body)(world, Scope::of(agent), now, self.specs.handles())
    }
}

impl<W, E, G: SpecGroup, F> Trigger<W, E> for Declared<G, F>
where
    F: FnMut(&W, Scope<'_, E>, Tick, G::Handles) -> bool,
{
    fn trigger(&mut self, world: &W, agent: &mut Agent<E>, now: Tick) -> bool {
        self.call(world, agent, now)
    }
}

impl<W, E, G: SpecGroup, F> Task<W, E> for Declared<G, F>
where
    F: FnMut(&W, Scope<'_, E>, Tick, G::Handles) -> bool,
{
    fn on_tick(&mut self, world: &W, agent: &mut Agent<E>, now: Tick) -> bool {
        self.call(world, agent, now)
    }
}
