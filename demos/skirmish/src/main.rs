//! skirmish: a handful of camp guards against wandering raiders.
//!
//! Each guard runs one brain: it keeps an eye out for raiders (a memory that
//! fades after a few ticks), closes in and strikes while it remembers one,
//! runs home when hurt, and otherwise patrols at random.  Raiders drift
//! between ticks through `Sim::world_mut`.
//!
//! Usage: `skirmish [config.json]`, where the optional file holds a
//! `SimConfig`, e.g. `{"total_ticks": 500, "seed": 7}`.  No logger is
//! installed, so `report_interval_ticks` has no visible effect here; the
//! summary table below is the demo's only output.

mod npc;
mod world;

use std::fs::File;
use std::io::BufReader;
use std::time::Instant;

use anyhow::{Context, Result};

use mg_core::{SimConfig, SimRng, Tick};
use mg_sim::{SimBuilder, SimObserver};

use npc::{FIGHT, Guard, guard_brain, memory};
use world::World;

// ── Constants ─────────────────────────────────────────────────────────────────

const GUARD_COUNT:  usize = 6;
const RAIDER_COUNT: usize = 4;
const DRIFT_EVERY:  u64   = 3; // raiders move every 3 ticks

// ── Observer ──────────────────────────────────────────────────────────────────

/// Tracks the busiest tick.
#[derive(Default)]
struct BusiestTick {
    ticks: u64,
    peak:  Option<(Tick, usize)>,
}

impl SimObserver for BusiestTick {
    fn on_tick_end(&mut self, tick: Tick, running: usize) {
        self.ticks += 1;
        if self.peak.is_none_or(|(_, best)| running > best) {
            self.peak = Some((tick, running));
        }
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn load_config() -> Result<SimConfig> {
    let Some(path) = std::env::args().nth(1) else {
        return Ok(SimConfig { total_ticks: 300, seed: 42, ..SimConfig::default() });
    };
    let file = File::open(&path).with_context(|| format!("opening {path}"))?;
    let config: SimConfig = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing {path}"))?;
    Ok(config)
}

fn main() -> Result<()> {
    let config = load_config()?;
    println!("=== skirmish: memory-gated guards ===");
    println!(
        "Guards: {GUARD_COUNT}  |  Raiders: {RAIDER_COUNT}  |  Ticks: {}  |  Seed: {}",
        config.total_ticks, config.seed
    );
    println!();

    // 1. World and population.
    let mut world_rng = SimRng::new(config.seed);
    let world = World::new(RAIDER_COUNT, &mut world_rng);

    let mut builder = SimBuilder::new(config.clone(), world);
    for i in 0..GUARD_COUNT {
        let offset = i as i32 - GUARD_COUNT as i32 / 2;
        builder = builder.spawn(Guard::at((offset, 0)), memory(), guard_brain()?);
    }
    let mut sim = builder.build()?;

    // 2. Run, letting raiders drift between ticks.
    let mut obs = BusiestTick::default();
    let end = config.end_tick();
    let t0 = Instant::now();
    while sim.now() < end {
        let chunk = DRIFT_EVERY.min(sim.now().until(end));
        sim.run_ticks(chunk, &mut obs)?;
        sim.world_mut().drift(&mut world_rng);
    }
    let elapsed = t0.elapsed();

    // 3. Summary.
    println!("Simulation complete in {:.3} s ({} ticks)", elapsed.as_secs_f64(), obs.ticks);
    if let Some((tick, running)) = obs.peak {
        println!("Busiest tick: {tick} with {running} behaviors running");
    }
    println!();

    println!(
        "{:<6} {:<10} {:>4} {:>8} {:>6} {:>9}  {:<8}  {}",
        "Guard", "Pos", "HP", "Strikes", "Steps", "Retreats", "Activity", "Running"
    );
    println!("{}", "-".repeat(80));
    for agent in sim.agents() {
        let g = &agent.entity;
        let brain = sim.brain(agent.id).context("every agent has a brain")?;
        let activity = match brain.active_activity() {
            Some(FIGHT) => "fight",
            Some(_) => "patrol",
            None => "-",
        };
        println!(
            "{:<6} {:<10} {:>4} {:>8} {:>6} {:>9}  {:<8}  {}",
            agent.id.0,
            format!("({},{})", g.pos.0, g.pos.1),
            g.hp,
            g.strikes,
            g.steps,
            g.retreats,
            activity,
            brain.running_labels().join(", "),
        );
    }

    Ok(())
}
