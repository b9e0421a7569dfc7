//! `ShufflingList`: weighted random ordering and sampling.
//!
//! Two separate operations, both driven by an injected RNG stream:
//!
//! - [`ShufflingList::shuffle`] reorders the list in place by repeated
//!   weighted draws without replacement.  Heavier items tend to land earlier
//!   but are never guaranteed first.
//! - [`ShufflingList::draw_and_remove`] takes a single weighted draw from the
//!   current pool and removes the winner.
//!
//! Shuffling mutates order only; draw-and-remove mutates size only.
//!
//! # Zero weights
//!
//! A zero-weight entry is never chosen while any positive-weight entry
//! remains in the pool.  Once only zero-weight entries are left they are
//! drawn uniformly, so a shuffle always yields a full permutation.
//!
//! Lists are expected to be small (a handful of strategies), so the
//! quadratic cost of the draw loop is irrelevant next to its clarity.

use rand::Rng;

/// One `(item, weight)` pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WeightedEntry<T> {
    pub item:   T,
    pub weight: u32,
}

/// Ordered sequence of weighted items.
#[derive(Clone, Debug)]
pub struct ShufflingList<T> {
    entries: Vec<WeightedEntry<T>>,
}

impl<T> Default for ShufflingList<T> {
    fn default() -> Self {
        Self { entries: Vec::new() }
    }
}

impl<T> ShufflingList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { entries: Vec::with_capacity(capacity) }
    }

    /// Append `item` at the end of the current order.
    pub fn push(&mut self, item: T, weight: u32) -> &mut Self {
        self.entries.push(WeightedEntry { item, weight });
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all weights currently in the pool.
    pub fn total_weight(&self) -> u64 {
        total_weight(&self.entries)
    }

    /// Entries in their current order.
    pub fn entries(&self) -> &[WeightedEntry<T>] {
        &self.entries
    }

    /// Items in their current order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().map(|e| &e.item)
    }

    /// Mutable items in their current order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.entries.iter_mut().map(|e| &mut e.item)
    }

    /// Reorder the list in place.
    ///
    /// Position 0 is drawn from the whole pool with probability proportional
    /// to weight, position 1 from what remains, and so on.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for start in 0..self.entries.len() {
            let picked = start + pick_index(&self.entries[start..], rng);
            self.entries.swap(start, picked);
        }
    }

    /// Draw one item with probability proportional to its weight and remove
    /// it from the pool.  The relative order of the remaining items is kept.
    ///
    /// Returns `None` when the list is empty.
    pub fn draw_and_remove<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<T> {
        if self.entries.is_empty() {
            return None;
        }
        let picked = pick_index(&self.entries, rng);
        Some(self.entries.remove(picked).item)
    }
}

impl<T> FromIterator<(T, u32)> for ShufflingList<T> {
    fn from_iter<I: IntoIterator<Item = (T, u32)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(item, weight)| WeightedEntry { item, weight })
                .collect(),
        }
    }
}

// ── Draw helpers ──────────────────────────────────────────────────────────────

fn total_weight<T>(pool: &[WeightedEntry<T>]) -> u64 {
    pool.iter().map(|e| u64::from(e.weight)).sum()
}

/// Index of one weighted draw from a non-empty `pool`.
fn pick_index<T, R: Rng + ?Sized>(pool: &[WeightedEntry<T>], rng: &mut R) -> usize {
    debug_assert!(!pool.is_empty());
    let total = total_weight(pool);
    if total == 0 {
        return rng.gen_range(0..pool.len());
    }
    let mut roll = rng.gen_range(0..total);
    for (i, entry) in pool.iter().enumerate() {
        let w = u64::from(entry.weight);
        if roll < w {
            return i;
        }
        roll -= w;
    }
    unreachable!("roll {roll} exceeded total weight {total}")
}
