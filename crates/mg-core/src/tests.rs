//! Unit tests for mg-core primitives.

#[cfg(test)]
mod ids {
    use crate::{ActivityId, AgentId};

    #[test]
    fn index_roundtrip() {
        let id = AgentId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(AgentId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn ordering() {
        assert!(AgentId(0) < AgentId(1));
        assert!(ActivityId(3) > ActivityId(2));
    }

    #[test]
    fn activity_id_rejects_out_of_range() {
        assert!(ActivityId::try_from(70_000usize).is_err());
    }

    #[test]
    fn display() {
        assert_eq!(AgentId(7).to_string(), "agent#7");
        assert_eq!(ActivityId(2).to_string(), "activity#2");
    }
}

#[cfg(test)]
mod time {
    use crate::{SimClock, SimConfig, Tick};

    #[test]
    fn tick_arithmetic() {
        let t = Tick(10);
        assert_eq!(t + 5, Tick(15));
        assert_eq!(t.offset(3), Tick(13));
        assert_eq!(Tick(15) - Tick(10), 5u64);
        assert_eq!(Tick(15).since(Tick(10)), 5);
    }

    #[test]
    fn offset_saturates() {
        assert_eq!(Tick(5).offset(u64::MAX), Tick(u64::MAX));
        assert_eq!(Tick(u64::MAX) + 1, Tick(u64::MAX));
    }

    #[test]
    fn until_saturates() {
        assert_eq!(Tick(10).until(Tick(25)), 15);
        assert_eq!(Tick(30).until(Tick(25)), 0);
    }

    #[test]
    fn clock_elapsed() {
        let mut clock = SimClock::new(Tick(100));
        assert_eq!(clock.elapsed(), 0);
        clock.advance();
        clock.advance();
        assert_eq!(clock.current_tick, Tick(102));
        assert_eq!(clock.elapsed(), 2);
        assert_eq!(clock.to_string(), "T102 (+2 ticks)");
    }

    #[test]
    fn sim_config_end_tick() {
        let cfg = SimConfig {
            start_tick:            Tick(20),
            total_ticks:           1_000,
            seed:                  42,
            num_threads:           None,
            report_interval_ticks: 100,
        };
        assert_eq!(cfg.end_tick(), Tick(1_020));
        assert_eq!(cfg.make_clock().current_tick, Tick(20));
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn sim_config_rejects_zero_ticks() {
        let cfg = SimConfig { total_ticks: 0, ..SimConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn sim_config_rejects_zero_threads() {
        let cfg = SimConfig { num_threads: Some(0), ..SimConfig::default() };
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("num_threads"), "got {err}");
    }

    #[test]
    fn sim_config_rejects_overflow() {
        let cfg = SimConfig {
            start_tick:  Tick(u64::MAX - 1),
            total_ticks: 10,
            ..SimConfig::default()
        };
        assert!(cfg.validate().is_err());
    }
}

#[cfg(test)]
mod rng {
    use rand::Rng;

    use crate::{AgentId, AgentRng, SimRng, agent_seed};

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = AgentRng::new(12345, AgentId(0));
        let mut r2 = AgentRng::new(12345, AgentId(0));
        for _ in 0..100 {
            let a: f32 = r1.random();
            let b: f32 = r2.random();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn different_agents_differ() {
        let mut r0 = AgentRng::new(1, AgentId(0));
        let mut r1 = AgentRng::new(1, AgentId(1));
        let a: u64 = r0.random();
        let b: u64 = r1.random();
        assert_ne!(a, b, "seeds for adjacent agents should diverge");
    }

    #[test]
    fn agent_seed_ignores_population_size() {
        assert_eq!(agent_seed(77, AgentId(0)), 77);
        assert_ne!(agent_seed(77, AgentId(1)), agent_seed(77, AgentId(2)));
    }

    #[test]
    fn gen_range_inclusive_in_bounds() {
        let mut rng = AgentRng::new(0, AgentId(0));
        for _ in 0..1000 {
            let v: u64 = rng.gen_range(60..=110);
            assert!((60..=110).contains(&v));
        }
    }

    #[test]
    fn usable_as_rand_rng() {
        // RngCore impl lets the agent RNG drive any rand API directly.
        let mut rng = AgentRng::new(9, AgentId(3));
        let v: u8 = Rng::gen_range(&mut rng, 0..4);
        assert!(v < 4);
    }

    #[test]
    fn gen_bool_extremes() {
        let mut rng = AgentRng::new(0, AgentId(0));
        assert!(!rng.gen_bool(0.0));
        assert!(rng.gen_bool(1.0));
        assert!(rng.gen_bool(7.0)); // clamped
    }

    #[test]
    fn sim_rng_children_are_deterministic() {
        let mut a = SimRng::new(5);
        let mut b = SimRng::new(5);
        let x: u32 = a.child(1).gen_range(0..1_000_000);
        let y: u32 = b.child(1).gen_range(0..1_000_000);
        assert_eq!(x, y);
    }
}

#[cfg(test)]
mod weighted {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use crate::ShufflingList;

    fn abc(wa: u32, wb: u32, wc: u32) -> ShufflingList<&'static str> {
        [("a", wa), ("b", wb), ("c", wc)].into_iter().collect()
    }

    #[test]
    fn preserves_insertion_order_until_shuffled() {
        let list = abc(1, 1, 1);
        let order: Vec<_> = list.iter().copied().collect();
        assert_eq!(order, vec!["a", "b", "c"]);
        assert_eq!(list.total_weight(), 3);
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut list = abc(5, 1, 3);
        for _ in 0..50 {
            list.shuffle(&mut rng);
            let mut seen: Vec<_> = list.iter().copied().collect();
            seen.sort_unstable();
            assert_eq!(seen, vec!["a", "b", "c"]);
            assert_eq!(list.entries().len(), 3);
        }
    }

    #[test]
    fn shuffle_keeps_weights_attached() {
        let mut rng = SmallRng::seed_from_u64(11);
        let mut list = abc(5, 1, 3);
        list.shuffle(&mut rng);
        for entry in list.entries() {
            let expected = match entry.item {
                "a" => 5,
                "b" => 1,
                _   => 3,
            };
            assert_eq!(entry.weight, expected);
        }
    }

    #[test]
    fn shuffle_same_seed_same_order() {
        let mut l1 = abc(2, 3, 4);
        let mut l2 = abc(2, 3, 4);
        l1.shuffle(&mut SmallRng::seed_from_u64(99));
        l2.shuffle(&mut SmallRng::seed_from_u64(99));
        assert_eq!(l1.entries(), l2.entries());
    }

    #[test]
    fn first_place_frequency_tracks_weight_share() {
        const TRIALS: usize = 20_000;
        let mut rng = SmallRng::seed_from_u64(2024);
        let mut list = abc(1, 3, 6);
        let mut firsts = [0usize; 3];
        for _ in 0..TRIALS {
            list.shuffle(&mut rng);
            let slot = match list.entries()[0].item {
                "a" => 0,
                "b" => 1,
                _   => 2,
            };
            firsts[slot] += 1;
        }
        let shares = [0.1, 0.3, 0.6];
        for (count, share) in firsts.iter().zip(shares) {
            let freq = *count as f64 / TRIALS as f64;
            assert!((freq - share).abs() < 0.02, "freq {freq} vs share {share}");
        }
    }

    #[test]
    fn zero_weight_never_precedes_positive_weight() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut list = abc(0, 4, 0);
        for _ in 0..200 {
            list.shuffle(&mut rng);
            assert_eq!(list.entries()[0].item, "b");
        }
    }

    #[test]
    fn draw_and_remove_shrinks_pool() {
        let mut rng = SmallRng::seed_from_u64(3);
        let mut list = abc(1, 1, 1);
        let mut drawn = Vec::new();
        while let Some(item) = list.draw_and_remove(&mut rng) {
            drawn.push(item);
        }
        drawn.sort_unstable();
        assert_eq!(drawn, vec!["a", "b", "c"]);
        assert!(list.is_empty());
        assert!(list.draw_and_remove(&mut rng).is_none());
    }

    #[test]
    fn draw_and_remove_keeps_remaining_order() {
        let mut rng = SmallRng::seed_from_u64(8);
        // "b" is the only positive weight, so it must be drawn.
        let mut list: ShufflingList<&str> =
            [("a", 0), ("b", 9), ("c", 0), ("d", 0)].into_iter().collect();
        assert_eq!(list.draw_and_remove(&mut rng), Some("b"));
        let rest: Vec<_> = list.iter().copied().collect();
        assert_eq!(rest, vec!["a", "c", "d"]);
    }

    #[test]
    fn draw_frequency_tracks_weight_share() {
        const TRIALS: usize = 20_000;
        let mut rng = SmallRng::seed_from_u64(77);
        let mut hits = 0usize;
        for _ in 0..TRIALS {
            let mut list = abc(1, 1, 2);
            if list.draw_and_remove(&mut rng) == Some("c") {
                hits += 1;
            }
        }
        let freq = hits as f64 / TRIALS as f64;
        assert!((freq - 0.5).abs() < 0.02, "freq {freq}");
    }

    #[test]
    fn all_zero_pool_still_draws() {
        let mut rng = SmallRng::seed_from_u64(4);
        let mut list = abc(0, 0, 0);
        assert!(list.draw_and_remove(&mut rng).is_some());
        assert_eq!(list.len(), 2);
    }
}
