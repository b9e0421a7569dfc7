//! Typed blackboard keys.
//!
//! A [`MemoryKey<T>`] is a `Copy` handle carrying the slot's value type
//! statically.  Identity is the numeric [`KeyId`]; the name is only for
//! debugging.  Keys are normally declared as constants with
//! [`memory_keys!`][crate::memory_keys]:
//!
//! ```rust
//! use mg_memory::memory_keys;
//!
//! memory_keys! {
//!     /// Entity currently being chased.
//!     pub ATTACK_TARGET: u32 = 0;
//!     pub ATTACK_COOLING_DOWN: bool = 1;
//! }
//!
//! assert_eq!(ATTACK_TARGET.name(), "ATTACK_TARGET");
//! assert_ne!(ATTACK_TARGET.id(), ATTACK_COOLING_DOWN.id());
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// Untyped identity of a blackboard slot.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct KeyId(pub u32);

/// A key with its value type forgotten.  Used where keys of different types
/// share one list (declarations, exit-erased keys).
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct ErasedKey {
    pub id:   KeyId,
    pub name: &'static str,
}

/// Typed identifier for one blackboard slot holding a `T`.
pub struct MemoryKey<T> {
    id:     KeyId,
    name:   &'static str,
    _value: PhantomData<fn() -> T>,
}

impl<T> MemoryKey<T> {
    pub const fn new(id: u32, name: &'static str) -> Self {
        Self { id: KeyId(id), name, _value: PhantomData }
    }

    #[inline]
    pub const fn id(&self) -> KeyId {
        self.id
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub const fn erased(&self) -> ErasedKey {
        ErasedKey { id: self.id, name: self.name }
    }
}

// Manual impls: derives would demand the same traits of `T`.

impl<T> Copy for MemoryKey<T> {}

impl<T> Clone for MemoryKey<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> PartialEq for MemoryKey<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for MemoryKey<T> {}

impl<T> Hash for MemoryKey<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<T> fmt::Debug for MemoryKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MemoryKey({}#{})", self.name, self.id.0)
    }
}

impl<T> fmt::Display for MemoryKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl<T> From<MemoryKey<T>> for ErasedKey {
    fn from(key: MemoryKey<T>) -> ErasedKey {
        key.erased()
    }
}

/// Declare typed memory keys as constants.
///
/// Each line is `vis NAME: Type = id;`.  The constant's identifier doubles as
/// the key's debug name.  Ids must be unique within one blackboard.
#[macro_export]
macro_rules! memory_keys {
    ($( $(#[$attr:meta])* $vis:vis $name:ident : $ty:ty = $id:expr; )*) => {
        $(
            $(#[$attr])*
            $vis const $name: $crate::MemoryKey<$ty> =
                $crate::MemoryKey::new($id, stringify!($name));
        )*
    };
}
