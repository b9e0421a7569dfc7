//! The `Blackboard`: one typed fact store per agent.
//!
//! # Storage
//!
//! Slots live in an `FxHashMap<KeyId, Slot>`; values are boxed as
//! `dyn Any + Send` and downcast on read.  Keys are small integers, so Fx
//! hashing is a good fit, and the whole board is `Send` so an agent can be
//! moved to a worker thread as a unit.
//!
//! # Expiry
//!
//! The board remembers the tick passed to the last [`Blackboard::advance_tick`].
//! `set_with_expiry(key, v, ttl)` stores the absolute tick `now + ttl`; the
//! value is readable through tick `now + ttl - 1` and gone once
//! `advance_tick(now + ttl)` has run.
//!
//! # Programming errors
//!
//! Touching a key that was never declared (or reading it as the wrong type)
//! panics in debug builds.  Release builds log a warning and treat the slot
//! as empty; writes are dropped.

use std::any::Any;
use std::fmt;

use mg_core::Tick;
use rustc_hash::FxHashMap;

use crate::{ErasedKey, KeyId, MemoryKey, Preconditions, SlotState};

struct Entry {
    value:      Box<dyn Any + Send>,
    expires_at: Option<Tick>,
}

struct Slot {
    name:  &'static str,
    entry: Option<Entry>,
}

/// Per-agent typed fact store.
#[derive(Default)]
pub struct Blackboard {
    slots: FxHashMap<KeyId, Slot>,
    now:   Tick,
}

impl Blackboard {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Declaration (setup only) ─────────────────────────────────────────

    /// Declare `key` as `Registered`.
    ///
    /// Declaring an already declared key is a no-op: an existing value is
    /// kept, so overlapping archetype setup paths are harmless.
    pub fn declare<T>(&mut self, key: MemoryKey<T>) -> &mut Self {
        self.declare_erased(key.erased())
    }

    /// Declare `key` and give it an initial value (`Present`, no expiry).
    pub fn declare_present<T: Send + 'static>(&mut self, key: MemoryKey<T>, value: T) -> &mut Self {
        self.declare(key);
        self.set(key, value);
        self
    }

    /// Declare a batch of keys of mixed value types.
    pub fn declare_all<I>(&mut self, keys: I) -> &mut Self
    where
        I: IntoIterator<Item = ErasedKey>,
    {
        for key in keys {
            self.declare_erased(key);
        }
        self
    }

    fn declare_erased(&mut self, key: ErasedKey) -> &mut Self {
        self.slots
            .entry(key.id)
            .or_insert(Slot { name: key.name, entry: None });
        self
    }

    // ── Reads ─────────────────────────────────────────────────────────────

    /// The stored value, or `None` when the slot is empty.
    pub fn get<T: 'static>(&self, key: MemoryKey<T>) -> Option<&T> {
        let entry = self.declared(key.erased())?.entry.as_ref()?;
        match entry.value.downcast_ref::<T>() {
            Some(v) => Some(v),
            None => {
                type_mismatch::<T>(key.name());
                None
            }
        }
    }

    /// `true` when the slot holds a value.
    pub fn has_value<T>(&self, key: MemoryKey<T>) -> bool {
        self.declared(key.erased()).is_some_and(|s| s.entry.is_some())
    }

    /// Absolute tick at which the current value expires, if it has an expiry.
    pub fn expires_at<T>(&self, key: MemoryKey<T>) -> Option<Tick> {
        self.declared(key.erased())?.entry.as_ref()?.expires_at
    }

    /// Ticks left before the current value expires, if it has an expiry.
    pub fn ticks_until_expiry<T>(&self, key: MemoryKey<T>) -> Option<u64> {
        self.expires_at(key).map(|at| self.now.until(at))
    }

    /// Actual state of a slot.  Unlike [`get`][Self::get], asking about an
    /// undeclared key is legitimate and reports `Unregistered`.
    pub fn state(&self, id: KeyId) -> SlotState {
        match self.slots.get(&id) {
            None                         => SlotState::Unregistered,
            Some(Slot { entry: None, .. }) => SlotState::Registered,
            Some(_)                      => SlotState::Present,
        }
    }

    /// `true` if every precondition holds against the current slots.
    pub fn satisfies(&self, preconditions: &Preconditions) -> bool {
        preconditions
            .iter()
            .all(|p| self.state(p.key.id).satisfies(p.status))
    }

    pub fn is_declared<T>(&self, key: MemoryKey<T>) -> bool {
        self.slots.contains_key(&key.id())
    }

    /// The tick most recently passed to [`advance_tick`][Self::advance_tick].
    #[inline]
    pub fn now(&self) -> Tick {
        self.now
    }

    /// Number of declared slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    // ── Writes ────────────────────────────────────────────────────────────

    /// Store `value` with no expiry, replacing any previous value.
    pub fn set<T: Send + 'static>(&mut self, key: MemoryKey<T>, value: T) {
        self.store(key, value, None);
    }

    /// Store `value` so that it expires `ttl_ticks` after the current tick.
    /// A `ttl_ticks` of 0 is treated as 1.
    pub fn set_with_expiry<T: Send + 'static>(&mut self, key: MemoryKey<T>, value: T, ttl_ticks: u64) {
        let expires_at = self.now.offset(ttl_ticks.max(1));
        self.store(key, value, Some(expires_at));
    }

    /// `Some` sets without expiry, `None` erases.
    pub fn set_optional<T: Send + 'static>(&mut self, key: MemoryKey<T>, value: Option<T>) {
        match value {
            Some(v) => self.set(key, v),
            None    => self.erase(key),
        }
    }

    /// Return the slot to `Registered`.
    pub fn erase<T>(&mut self, key: MemoryKey<T>) {
        self.erase_id(key.erased());
    }

    /// Type-erased [`erase`][Self::erase], for key lists of mixed types.
    pub fn erase_id(&mut self, key: ErasedKey) {
        if let Some(slot) = self.declared_mut(key) {
            slot.entry = None;
        }
    }

    /// Remove and return the stored value, leaving the slot `Registered`.
    pub fn take<T: 'static>(&mut self, key: MemoryKey<T>) -> Option<T> {
        let slot = self.declared_mut(key.erased())?;
        let entry = slot.entry.take()?;
        match entry.value.downcast::<T>() {
            Ok(v) => Some(*v),
            Err(value) => {
                // Put it back untouched; the caller asked with the wrong type.
                slot.entry = Some(Entry { value, expires_at: entry.expires_at });
                type_mismatch::<T>(key.name());
                None
            }
        }
    }

    // ── Tick boundary ─────────────────────────────────────────────────────

    /// Erase every value whose expiry is `<= now` and remember `now` as the
    /// reference point for new expiries.  Returns how many values expired.
    ///
    /// The scheduler calls this exactly once per agent per tick, before any
    /// behavior is polled.
    pub fn advance_tick(&mut self, now: Tick) -> usize {
        debug_assert!(now >= self.now, "blackboard clock moved backwards: {} -> {now}", self.now);
        self.now = now;

        let mut expired = 0;
        for slot in self.slots.values_mut() {
            let due = slot
                .entry
                .as_ref()
                .and_then(|e| e.expires_at)
                .is_some_and(|at| at <= now);
            if due {
                slot.entry = None;
                expired += 1;
            }
        }
        if expired > 0 {
            log::trace!("{expired} memories expired at {now}");
        }
        expired
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn store<T: Send + 'static>(&mut self, key: MemoryKey<T>, value: T, expires_at: Option<Tick>) {
        if let Some(slot) = self.declared_mut(key.erased()) {
            slot.entry = Some(Entry { value: Box::new(value), expires_at });
        }
    }

    fn declared(&self, key: ErasedKey) -> Option<&Slot> {
        let slot = self.slots.get(&key.id);
        if slot.is_none() {
            undeclared(key.name);
        }
        slot
    }

    fn declared_mut(&mut self, key: ErasedKey) -> Option<&mut Slot> {
        let slot = self.slots.get_mut(&key.id);
        if slot.is_none() {
            undeclared(key.name);
        }
        slot
    }
}

impl fmt::Debug for Blackboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ids: Vec<&KeyId> = self.slots.keys().collect();
        ids.sort_unstable();
        let mut map = f.debug_map();
        for id in ids {
            let slot = &self.slots[id];
            let state = match &slot.entry {
                None                                  => "registered".to_string(),
                Some(Entry { expires_at: None, .. })  => "present".to_string(),
                Some(Entry { expires_at: Some(t), .. }) => format!("present until {t}"),
            };
            map.entry(&slot.name, &state);
        }
        map.finish()
    }
}

fn undeclared(name: &str) {
    if cfg!(debug_assertions) {
        panic!("memory key `{name}` was never declared on this blackboard");
    }
    log::warn!("memory key `{name}` was never declared on this blackboard; ignoring");
}

fn type_mismatch<T>(name: &str) {
    let ty = std::any::type_name::<T>();
    if cfg!(debug_assertions) {
        panic!("memory key `{name}` does not hold a `{ty}`");
    }
    log::warn!("memory key `{name}` does not hold a `{ty}`; ignoring");
}
