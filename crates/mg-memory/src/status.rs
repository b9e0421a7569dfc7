//! Required vs. actual slot status.

use std::fmt;

/// The presence state a behavior requires of a key before it may run.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum MemoryStatus {
    /// The slot must hold a value.
    Present,
    /// The slot must be declared and empty.
    Absent,
    /// The slot must be declared; value or not does not matter.
    Registered,
}

/// The presence state a blackboard actually reports for a key.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum SlotState {
    /// Never declared on this blackboard.
    Unregistered,
    /// Declared, no value.
    Registered,
    /// Declared and holding a value.
    Present,
}

impl SlotState {
    /// Whether this state meets `required`.
    #[inline]
    pub fn satisfies(self, required: MemoryStatus) -> bool {
        match required {
            MemoryStatus::Present    => self == SlotState::Present,
            MemoryStatus::Absent     => self == SlotState::Registered,
            MemoryStatus::Registered => self != SlotState::Unregistered,
        }
    }
}

impl fmt::Display for MemoryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MemoryStatus::Present    => "present",
            MemoryStatus::Absent     => "absent",
            MemoryStatus::Registered => "registered",
        })
    }
}
