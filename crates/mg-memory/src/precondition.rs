//! Ordered precondition lists.

use crate::{ErasedKey, MemoryKey, MemoryStatus};

/// One `(key, required status)` pair.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Precondition {
    pub key:    ErasedKey,
    pub status: MemoryStatus,
}

/// The memory requirements a behavior declares up front.
///
/// Order is preserved (it is the order checks run in).  Each key may appear
/// at most once: constraining the same key twice is a composition bug and
/// panics while the behavior is being built.
///
/// ```rust
/// use mg_memory::{memory_keys, Preconditions};
///
/// memory_keys! {
///     TARGET: u32 = 0;
///     COOLDOWN: u64 = 1;
/// }
///
/// let pre = Preconditions::new().present(TARGET).absent(COOLDOWN);
/// assert_eq!(pre.len(), 2);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Preconditions {
    entries: Vec<Precondition>,
}

impl Preconditions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn present<T>(self, key: MemoryKey<T>) -> Self {
        self.require(key.erased(), MemoryStatus::Present)
    }

    pub fn absent<T>(self, key: MemoryKey<T>) -> Self {
        self.require(key.erased(), MemoryStatus::Absent)
    }

    pub fn registered<T>(self, key: MemoryKey<T>) -> Self {
        self.require(key.erased(), MemoryStatus::Registered)
    }

    /// Add a requirement for an untyped key.
    ///
    /// # Panics
    /// Panics if `key` is already constrained.
    pub fn require(mut self, key: ErasedKey, status: MemoryStatus) -> Self {
        assert!(
            !self.entries.iter().any(|p| p.key.id == key.id),
            "memory key `{}` is constrained twice",
            key.name
        );
        self.entries.push(Precondition { key, status });
        self
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Precondition> {
        self.entries.iter()
    }

    /// Status required of `key`, if it is constrained.
    pub fn status_of(&self, key: ErasedKey) -> Option<MemoryStatus> {
        self.entries.iter().find(|p| p.key.id == key.id).map(|p| p.status)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a Preconditions {
    type Item = &'a Precondition;
    type IntoIter = std::slice::Iter<'a, Precondition>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
