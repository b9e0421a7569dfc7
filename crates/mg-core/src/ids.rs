//! Typed handles for agents and activities.
//!
//! Both are plain integers underneath.  Agents index the host's agent array;
//! activities are chosen by the archetype author and only need to be unique
//! within one brain.

use std::fmt;

macro_rules! typed_id {
    ($(#[$attr:meta])* $name:ident($inner:ty), $tag:literal) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct $name(pub $inner);

        impl $name {
            /// Position in a dense `Vec`.
            #[inline]
            pub const fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($tag, "#{}"), self.0)
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;

            fn try_from(n: usize) -> Result<Self, Self::Error> {
                <$inner>::try_from(n).map(Self)
            }
        }
    };
}

typed_id! {
    /// Index of an agent in the host's agent array.
    AgentId(u32), "agent"
}

typed_id! {
    /// One activity (a named group of behaviors) inside a brain.
    ActivityId(u16), "activity"
}
