//! Typed accessor handles and the restricted view a declared body runs in.
//!
//! A [`Spec`] is what a group is built from and carries no way to touch the
//! blackboard.  The matching handle is only made by the group itself and
//! handed to the body on each call.

use std::fmt;

use mg_core::{AgentId, AgentRng, Tick};
use mg_memory::{Blackboard, ErasedKey, MemoryKey, MemoryStatus};

use crate::Agent;
use crate::declare::MemorySpec;

/// A declared body's view of the blackboard.
///
/// It exposes no key-based reads or writes of its own: the only way in is
/// through the accessor handles the body's group declared.
pub struct Memories<'a> {
    board: &'a mut Blackboard,
}

impl Memories<'_> {
    /// The tick the blackboard was last advanced to.
    pub fn now(&self) -> Tick {
        self.board.now()
    }
}

/// Everything a declared body may touch, borrowed field by field so the body
/// can read memories and mutate its entity at the same time.
pub struct Scope<'a, E> {
    pub id:     AgentId,
    pub entity: &'a mut E,
    pub rng:    &'a mut AgentRng,
    pub memory: Memories<'a>,
}

impl<'a, E> Scope<'a, E> {
    pub(crate) fn of(agent: &'a mut Agent<E>) -> Self {
        let Agent { id, entity, memory, rng } = agent;
        Scope { id: *id, entity, rng, memory: Memories { board: memory } }
    }
}

/// One `(key, required status)` entry of a group.
///
/// Built by [`present`](super::present), [`absent`](super::absent) and
/// [`registered`](super::registered).  The handle inside stays private until
/// the group passes it to its body.
#[derive(Clone, Copy)]
pub struct Spec<A>(pub(crate) A);

impl<A: fmt::Debug> fmt::Debug for Spec<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

macro_rules! accessor {
    ($(#[$attr:meta])* $name:ident, $ctor:ident => $status:expr) => {
        $(#[$attr])*
        pub struct $name<T> {
            key: MemoryKey<T>,
        }

        impl<T> $name<T> {
            pub fn key(&self) -> MemoryKey<T> {
                self.key
            }
        }

        impl<T> Spec<$name<T>> {
            pub(crate) const fn $ctor(key: MemoryKey<T>) -> Self {
                Spec($name { key })
            }

            pub fn key(&self) -> MemoryKey<T> {
                self.0.key
            }
        }

        impl<T: Send + 'static> $name<T> {
            /// The stored value.
            ///
            /// # Panics
            /// Panics if the slot has no value.  Within a body this only
            /// happens if the body itself erased it earlier in the same call.
            pub fn get<'m>(&self, memory: &'m Memories<'_>) -> &'m T {
                match memory.board.get(self.key) {
                    Some(value) => value,
                    None => panic!("memory `{}` has no value", self.key.name()),
                }
            }

            pub fn try_get<'m>(&self, memory: &'m Memories<'_>) -> Option<&'m T> {
                memory.board.get(self.key)
            }

            pub fn set(&self, memory: &mut Memories<'_>, value: T) {
                memory.board.set(self.key, value);
            }

            pub fn set_with_expiry(&self, memory: &mut Memories<'_>, value: T, ttl_ticks: u64) {
                memory.board.set_with_expiry(self.key, value, ttl_ticks);
            }

            pub fn erase(&self, memory: &mut Memories<'_>) {
                memory.board.erase(self.key);
            }
        }

        impl<T> Copy for $name<T> {}

        impl<T> Clone for $name<T> {
            fn clone(&self) -> Self {
                *self
            }
        }

        impl<T> fmt::Debug for $name<T> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.key.name())
            }
        }

        impl<T> MemorySpec for $name<T> {
            fn erased_key(&self) -> ErasedKey {
                self.key.erased()
            }

            fn requirement(&self) -> MemoryStatus {
                $status
            }
        }
    };
}

accessor! {
    /// Handle to a key the group requires to hold a value.
    Present, present => MemoryStatus::Present
}

accessor! {
    /// Handle to a key the group requires to be empty.
    Absent, absent => MemoryStatus::Absent
}

accessor! {
    /// Handle to a key the group only requires to be declared.
    Registered, registered => MemoryStatus::Registered
}
