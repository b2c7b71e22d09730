use itertools::Itertools;
use lotsizing::{
    Bounds, GenConfig, GenError, Generator, RandomSource, TimeWindowMode, Window, WindowDemand,
};
use rstest::*;

const NUM_TRIALS: u64 = 30;

fn generator(horizon: usize, mode: TimeWindowMode, seed: u64) -> Generator<u32> {
    Generator::with_source(horizon, mode, RandomSource::seeded(seed)).unwrap()
}

// single pass over all window pairs that zeroes nested windows while scanning
fn sequential_prune(d_w: &mut WindowDemand<u32>) {
    let windows = d_w.iter().map(|(w, _)| w).collect_vec();
    for a in windows.iter() {
        for b in windows.iter() {
            let active =
                d_w.get(a.start, a.end) != Some(0) && d_w.get(b.start, b.end) != Some(0);
            if active && !a.is_ordered_with(b) {
                d_w.set(*b, 0).unwrap();
            }
        }
    }
}

#[rstest]
#[case(TimeWindowMode::CustomerSpecific)]
#[case(TimeWindowMode::NonCustomerSpecific)]
fn two_period_scenario(#[case] mode: TimeWindowMode) {
    let mut generator = generator(2, mode, 77);
    let config = GenConfig::new(1, 1, 5, 5).unwrap();
    let instance = generator.generate(&config).unwrap();

    let d_w = instance.window_demand().unwrap();
    assert_eq!(d_w.get(0, 0), Some(0));
    assert_eq!(d_w.get(1, 1), Some(0));
    assert_eq!(d_w.get(0, 1), Some(5));
    assert_eq!(instance.demand(), &[0, 5]);

    // raw capacity [1, 1] covers only 2 of the 5 units of window [0, 1]
    assert_eq!(instance.capacity(), &[6, 6]);
}

#[rstest]
#[case(TimeWindowMode::CustomerSpecific)]
#[case(TimeWindowMode::NonCustomerSpecific)]
fn window_demand_within_bounds(#[case] mode: TimeWindowMode) {
    let config = GenConfig::new(1, 6, 2, 4).unwrap();
    for seed in 1..=NUM_TRIALS {
        let mut generator = generator(7, mode, seed);
        let instance = generator.generate(&config).unwrap();
        let d_w = instance.window_demand().unwrap();

        for (w, d) in d_w.iter() {
            if w.start == w.end {
                assert_eq!(d, 0);
            } else if mode == TimeWindowMode::CustomerSpecific {
                assert!((2..=4).contains(&d));
            } else {
                assert!(d == 0 || (2..=4).contains(&d));
            }
        }
        for xs in [
            instance.holding_cost(),
            instance.production_cost(),
            instance.setup_cost(),
        ] {
            assert!(xs.iter().all(|&x| (1..=6).contains(&x)));
        }
    }
}

#[rstest]
#[case(TimeWindowMode::CustomerSpecific)]
#[case(TimeWindowMode::NonCustomerSpecific)]
fn interval_feasibility(#[case] mode: TimeWindowMode) {
    for seed in 1..=NUM_TRIALS {
        let mut generator = generator(8, mode, seed);
        let instance = generator.generate_default().unwrap();
        let d_w = instance.window_demand().unwrap();
        let c = instance.capacity();

        for t2 in 0..8 {
            for t1 in 0..=t2 {
                let capacity: u32 = c[t1..=t2].iter().sum();
                let demand: u32 = (t1..=t2)
                    .flat_map(|k| (k..=t2).map(move |l| (k, l)))
                    .map(|(k, l)| d_w.get(k, l).unwrap())
                    .sum();
                assert!(capacity >= demand, "interval [{}, {}]", t1, t2);
            }
        }
    }
}

#[rstest]
#[case(TimeWindowMode::CustomerSpecific)]
#[case(TimeWindowMode::NonCustomerSpecific)]
fn demand_aggregates_windows_by_end(#[case] mode: TimeWindowMode) {
    for seed in 1..=NUM_TRIALS {
        let mut generator = generator(6, mode, seed);
        let instance = generator.generate_default().unwrap();
        let d_w = instance.window_demand().unwrap();

        for (t, &d) in instance.demand().iter().enumerate() {
            let expected: u32 = (0..=t).map(|t1| d_w.get(t1, t).unwrap()).sum();
            assert_eq!(d, expected);
        }
    }
}

#[test]
fn no_nested_active_windows_after_pruning() {
    for seed in 1..=NUM_TRIALS {
        let mut generator = generator(7, TimeWindowMode::NonCustomerSpecific, seed);
        let d_w = generator.generate_default().unwrap().window_demand().unwrap();

        for ((a, _), (b, _)) in d_w.active().tuple_combinations() {
            assert!(a.is_ordered_with(&b), "{} and {} are nested", a, b);
        }
    }
}

#[test]
fn customer_specific_keeps_nested_windows() {
    let mut generator = generator(6, TimeWindowMode::CustomerSpecific, 4);
    let config = GenConfig::default().with_window_bounds(Bounds::fixed(1).unwrap());
    let d_w = generator.generate(&config).unwrap().window_demand().unwrap();

    assert_eq!(d_w.get(0, 5), Some(1));
    assert_eq!(d_w.get(1, 4), Some(1));
    assert_eq!(d_w.active().count(), 15);
}

#[test]
fn non_customer_specific_keeps_only_outermost_windows() {
    let mut generator = generator(5, TimeWindowMode::NonCustomerSpecific, 4);
    let config = GenConfig::default().with_window_bounds(Bounds::fixed(3).unwrap());
    let d_w = generator.generate(&config).unwrap().window_demand().unwrap();

    // every window but those touching either end of the horizon is nested in [0, 4]
    let active = d_w.active().map(|(w, _)| w).collect_vec();
    assert!(active.iter().all(|w| w.start == 0 || w.end == 4));
    assert_eq!(active.len(), 7);
}

#[rstest]
#[case(TimeWindowMode::CustomerSpecific)]
#[case(TimeWindowMode::NonCustomerSpecific)]
fn narrow_quantities_fail_instead_of_wrapping(#[case] mode: TimeWindowMode) {
    for seed in 1..=NUM_TRIALS {
        let source = RandomSource::seeded(seed);
        let mut generator = Generator::<u8>::with_source(12, mode, source).unwrap();

        match generator.generate_default().map(|instance| instance.is_feasible()) {
            Ok(feasible) => assert!(feasible),
            Err(GenError::Overflow) => {
                assert!(matches!(generator.instance(), Err(GenError::NotGenerated)))
            }
            Err(e) => panic!("unexpected error: {}", e),
        }
    }
}

#[test]
fn contained_demand_beyond_quantity_type() {
    // all 66 windows of [0, 11] carry demand 4, 264 units in total
    let source = RandomSource::seeded(1);
    let mut narrow =
        Generator::<u8>::with_source(12, TimeWindowMode::CustomerSpecific, source).unwrap();
    let config = GenConfig::default().with_window_bounds(Bounds::fixed(4).unwrap());

    assert!(matches!(narrow.generate(&config), Err(GenError::Overflow)));
    assert!(matches!(narrow.capacity(), Err(GenError::NotGenerated)));

    // the same windows fit once the quantity type is wide enough
    let mut generator = generator(12, TimeWindowMode::CustomerSpecific, 1);
    let config = GenConfig::default().with_window_bounds(Bounds::fixed(4).unwrap());
    let instance = generator.generate(&config).unwrap();
    assert_eq!(instance.window_demand().unwrap().total().unwrap(), 264);
    assert!(instance.is_feasible());
}

#[test]
fn pruning_fixture() {
    let mut d_w = WindowDemand::<u32>::zeros(4);
    d_w.set(Window::new(0, 3), 4).unwrap();
    d_w.set(Window::new(1, 2), 2).unwrap();

    lotsizing::prune_nested(&mut d_w);

    assert_eq!(d_w.get(0, 3), Some(4));
    assert_eq!(d_w.get(1, 2), Some(0));
    assert_eq!(d_w.get(0, 1), Some(0));
}

#[test]
fn pruning_agrees_with_sequential_scan() {
    let bounds = Bounds::new(0u32, 2).unwrap();
    for seed in 1..=NUM_TRIALS {
        let mut source = RandomSource::seeded(seed);
        let sampled = WindowDemand::sample(7, &bounds, &mut source);

        let mut two_phase = sampled.clone();
        lotsizing::prune_nested(&mut two_phase);

        let mut sequential = sampled;
        sequential_prune(&mut sequential);

        assert_eq!(two_phase, sequential);
    }
}
