//! The skirmish field: a camp and a handful of wandering raiders.

use mg_core::SimRng;

pub type Pos = (i32, i32);

/// Half-width of the square field; positions stay in `-FIELD..=FIELD`.
pub const FIELD: i32 = 12;

pub struct World {
    pub camp:    Pos,
    pub raiders: Vec<Pos>,
}

impl World {
    pub fn new(raiders: usize, rng: &mut SimRng) -> Self {
        let raiders = (0..raiders)
            .map(|_| (rng.gen_range(-FIELD..=FIELD), rng.gen_range(-FIELD..=FIELD)))
            .collect();
        Self { camp: (0, 0), raiders }
    }

    /// Closest raider within `sight` steps of `from`.
    pub fn nearest_raider(&self, from: Pos, sight: i32) -> Option<Pos> {
        self.raiders
            .iter()
            .copied()
            .filter(|&r| distance(from, r) <= sight)
            .min_by_key(|&r| distance(from, r))
    }

    /// Move every raider one random step.  Runs between ticks.
    pub fn drift(&mut self, rng: &mut SimRng) {
        for raider in &mut self.raiders {
            let (dx, dy) = match rng.gen_range(0..4) {
                0 => (1, 0),
                1 => (-1, 0),
                2 => (0, 1),
                _ => (0, -1),
            };
            *raider = clamp((raider.0 + dx, raider.1 + dy));
        }
    }
}

/// Manhattan distance.
pub fn distance(a: Pos, b: Pos) -> i32 {
    (a.0 - b.0).abs() + (a.1 - b.1).abs()
}

/// One step from `from` toward `to`, x first.
pub fn step_toward(from: Pos, to: Pos) -> Pos {
    if from.0 != to.0 {
        (from.0 + (to.0 - from.0).signum(), from.1)
    } else {
        (from.0, from.1 + (to.1 - from.1).signum())
    }
}

pub fn clamp(p: Pos) -> Pos {
    (p.0.clamp(-FIELD, FIELD), p.1.clamp(-FIELD, FIELD))
}
