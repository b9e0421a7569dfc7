//! Unit tests for mg-memory.

use mg_core::Tick;

use crate::{Blackboard, memory_keys};

memory_keys! {
    TARGET: u32 = 0;
    COOLDOWN: u64 = 1;
    HOME: (i32, i32) = 2;
    NEVER_DECLARED: u8 = 99;
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn board() -> Blackboard {
    let mut b = Blackboard::new();
    b.declare(TARGET).declare(COOLDOWN).declare(HOME);
    b
}

// ── Keys ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod key_tests {
    use super::*;
    use crate::{ErasedKey, KeyId};

    #[test]
    fn macro_assigns_ids_and_names() {
        assert_eq!(TARGET.id(), KeyId(0));
        assert_eq!(HOME.name(), "HOME");
        assert_eq!(COOLDOWN.to_string(), "COOLDOWN");
    }

    #[test]
    fn equality_is_by_id() {
        let same = crate::MemoryKey::<u32>::new(0, "alias");
        assert_eq!(same, TARGET);
    }

    #[test]
    fn erased_keeps_identity() {
        let erased: ErasedKey = TARGET.into();
        assert_eq!(erased.id, TARGET.id());
        assert_eq!(erased.name, "TARGET");
    }
}

// ── Slot states ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod state_tests {
    use super::*;
    use crate::{MemoryStatus, SlotState};

    #[test]
    fn state_transitions() {
        let mut b = board();
        assert_eq!(b.state(NEVER_DECLARED.id()), SlotState::Unregistered);
        assert_eq!(b.state(TARGET.id()), SlotState::Registered);
        b.set(TARGET, 5);
        assert_eq!(b.state(TARGET.id()), SlotState::Present);
        b.erase(TARGET);
        assert_eq!(b.state(TARGET.id()), SlotState::Registered);
    }

    #[test]
    fn satisfies_table() {
        use MemoryStatus::*;
        let cases = [
            (SlotState::Unregistered, Present, false),
            (SlotState::Unregistered, Absent, false),
            (SlotState::Unregistered, Registered, false),
            (SlotState::Registered, Present, false),
            (SlotState::Registered, Absent, true),
            (SlotState::Registered, Registered, true),
            (SlotState::Present, Present, true),
            (SlotState::Present, Absent, false),
            (SlotState::Present, Registered, true),
        ];
        for (state, required, expected) in cases {
            assert_eq!(state.satisfies(required), expected, "{state:?} vs {required:?}");
        }
    }

    #[test]
    fn declare_twice_keeps_value() {
        let mut b = board();
        b.set(TARGET, 9);
        b.declare(TARGET);
        assert_eq!(b.get(TARGET), Some(&9));
        assert_eq!(b.len(), 3);
    }

    #[test]
    fn declare_present_and_declare_all() {
        let mut b = Blackboard::new();
        b.declare_present(HOME, (1, 2))
            .declare_all([TARGET.erased(), COOLDOWN.erased()]);
        assert_eq!(b.get(HOME), Some(&(1, 2)));
        assert!(b.is_declared(TARGET));
        assert!(!b.has_value(COOLDOWN));
    }
}

// ── Reads and writes ──────────────────────────────────────────────────────────

#[cfg(test)]
mod access_tests {
    use super::*;

    #[test]
    fn set_overwrites() {
        let mut b = board();
        b.set(TARGET, 1);
        b.set(TARGET, 2);
        assert_eq!(b.get(TARGET), Some(&2));
    }

    #[test]
    fn set_clears_previous_expiry() {
        let mut b = board();
        b.set_with_expiry(TARGET, 1, 10);
        b.set(TARGET, 2);
        assert_eq!(b.expires_at(TARGET), None);
        b.advance_tick(Tick(50));
        assert_eq!(b.get(TARGET), Some(&2));
    }

    #[test]
    fn set_optional_none_erases() {
        let mut b = board();
        b.set(COOLDOWN, 3);
        b.set_optional(COOLDOWN, None);
        assert!(!b.has_value(COOLDOWN));
        b.set_optional(COOLDOWN, Some(4));
        assert_eq!(b.get(COOLDOWN), Some(&4));
    }

    #[test]
    fn take_empties_slot() {
        let mut b = board();
        b.set(HOME, (3, 4));
        assert_eq!(b.take(HOME), Some((3, 4)));
        assert!(!b.has_value(HOME));
        assert_eq!(b.take(HOME), None);
    }

    #[test]
    fn debug_lists_states() {
        let mut b = board();
        b.set(TARGET, 1);
        b.set_with_expiry(COOLDOWN, 1, 5);
        let shown = format!("{b:?}");
        assert!(shown.contains("\"TARGET\": \"present\""), "{shown}");
        assert!(shown.contains("present until T5"), "{shown}");
        assert!(shown.contains("\"HOME\": \"registered\""), "{shown}");
    }

    #[test]
    #[cfg_attr(debug_assertions, should_panic(expected = "never declared"))]
    fn undeclared_read_is_a_programming_error() {
        let b = board();
        // Release builds: defined no-op.
        assert_eq!(b.get(NEVER_DECLARED), None);
    }

    #[test]
    #[cfg_attr(debug_assertions, should_panic(expected = "never declared"))]
    fn undeclared_write_is_a_programming_error() {
        let mut b = board();
        b.set(NEVER_DECLARED, 1);
        assert_eq!(b.state(NEVER_DECLARED.id()), crate::SlotState::Unregistered);
    }

    #[test]
    #[cfg_attr(debug_assertions, should_panic(expected = "does not hold"))]
    fn wrong_type_read_is_a_programming_error() {
        let mut b = board();
        b.set(TARGET, 1);
        let alias = crate::MemoryKey::<String>::new(TARGET.id().0, "TARGET");
        assert_eq!(b.get(alias), None);
    }
}

// ── Expiry ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod expiry_tests {
    use super::*;

    #[test]
    fn readable_until_ttl_then_erased() {
        for ttl in [1u64, 2, 7, 100] {
            let start = Tick(40);
            let mut b = board();
            b.advance_tick(start);
            b.set_with_expiry(TARGET, 7, ttl);
            for t in start.0..start.0 + ttl {
                b.advance_tick(Tick(t));
                assert!(b.has_value(TARGET), "ttl {ttl}: gone early at {t}");
            }
            assert_eq!(b.advance_tick(start + ttl), 1);
            assert!(!b.has_value(TARGET), "ttl {ttl}: still present at expiry");
            assert_eq!(b.state(TARGET.id()), crate::SlotState::Registered);
        }
    }

    #[test]
    fn expiry_at_500_with_ttl_100() {
        let mut b = board();
        b.advance_tick(Tick(500));
        b.set_with_expiry(COOLDOWN, 1, 100);
        for t in 501..600 {
            b.advance_tick(Tick(t));
            // Reads in between do not affect expiry.
            let _ = b.get(COOLDOWN);
            let _ = b.get(COOLDOWN);
        }
        assert!(b.has_value(COOLDOWN));
        b.advance_tick(Tick(600));
        assert!(!b.has_value(COOLDOWN));
    }

    #[test]
    fn skipped_ticks_still_expire() {
        let mut b = board();
        b.advance_tick(Tick(10));
        b.set_with_expiry(TARGET, 1, 3);
        b.advance_tick(Tick(50));
        assert!(!b.has_value(TARGET));
    }

    #[test]
    fn zero_ttl_lasts_one_tick() {
        let mut b = board();
        b.advance_tick(Tick(5));
        b.set_with_expiry(TARGET, 1, 0);
        assert!(b.has_value(TARGET));
        b.advance_tick(Tick(6));
        assert!(!b.has_value(TARGET));
    }

    #[test]
    fn huge_ttl_saturates_instead_of_wrapping() {
        let mut b = board();
        b.advance_tick(Tick(5));
        b.set_with_expiry(TARGET, 1, u64::MAX);
        assert_eq!(b.expires_at(TARGET), Some(Tick(u64::MAX)));
        assert_eq!(b.advance_tick(Tick(1_000_000_000)), 0);
        assert!(b.has_value(TARGET));
    }

    #[test]
    fn ticks_until_expiry_counts_down() {
        let mut b = board();
        b.advance_tick(Tick(10));
        b.set_with_expiry(TARGET, 1, 20);
        assert_eq!(b.expires_at(TARGET), Some(Tick(30)));
        assert_eq!(b.ticks_until_expiry(TARGET), Some(20));
        b.advance_tick(Tick(25));
        assert_eq!(b.ticks_until_expiry(TARGET), Some(5));
    }

    #[test]
    fn values_without_expiry_survive() {
        let mut b = board();
        b.set(HOME, (0, 0));
        assert_eq!(b.advance_tick(Tick(1_000_000)), 0);
        assert!(b.has_value(HOME));
    }
}

// ── Preconditions ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod precondition_tests {
    use super::*;
    use crate::{MemoryStatus, Preconditions};

    #[test]
    fn present_and_absent() {
        let pre = Preconditions::new().present(TARGET).absent(COOLDOWN);
        let mut b = board();
        assert!(!b.satisfies(&pre));
        b.set(TARGET, 1);
        assert!(b.satisfies(&pre));
        b.set(COOLDOWN, 1);
        assert!(!b.satisfies(&pre));
    }

    #[test]
    fn registered_matches_either() {
        let pre = Preconditions::new().registered(HOME);
        let mut b = board();
        assert!(b.satisfies(&pre));
        b.set(HOME, (1, 1));
        assert!(b.satisfies(&pre));
    }

    #[test]
    fn undeclared_key_fails_every_requirement() {
        let b = board();
        for pre in [
            Preconditions::new().present(NEVER_DECLARED),
            Preconditions::new().absent(NEVER_DECLARED),
            Preconditions::new().registered(NEVER_DECLARED),
        ] {
            assert!(!b.satisfies(&pre));
        }
    }

    #[test]
    fn empty_always_holds() {
        assert!(Blackboard::new().satisfies(&Preconditions::new()));
    }

    #[test]
    fn order_and_lookup() {
        let pre = Preconditions::new().absent(COOLDOWN).present(TARGET);
        let keys: Vec<_> = pre.iter().map(|p| p.key.name).collect();
        assert_eq!(keys, vec!["COOLDOWN", "TARGET"]);
        assert_eq!(pre.status_of(TARGET.erased()), Some(MemoryStatus::Present));
        assert_eq!(pre.status_of(HOME.erased()), None);
    }

    #[test]
    #[should_panic(expected = "constrained twice")]
    fn duplicate_key_panics() {
        let _ = Preconditions::new().present(TARGET).absent(TARGET);
    }
}
