use crate::{
    Bounds, BoundsPolicy, DEConfigBuilder, DifferentialEvolution, OptimizerError,
    SelfAdaptiveConfig, Strategy, differential_evolution,
};
use ndarray::Array1;
use std::cell::{Cell, RefCell};

fn sphere(x: &Array1<f64>) -> f64 {
    x.iter().map(|&xi| xi * xi).sum::<f64>()
}

#[cfg(test)]
mod strategy_tests {
    use super::*;

    #[test]
    fn test_rand1bin_converges_on_sphere() {
        let config = DEConfigBuilder::new()
            .seed(42)
            .strategy(Strategy::Rand1Bin)
            .max_evaluations(20_000)
            .build()
            .expect("valid config");

        let report = differential_evolution(&sphere, &[(-5.0, 5.0); 5], config).unwrap();
        assert!(report.fun < 1e-3, "rand1bin stalled: f={}", report.fun);
    }

    #[test]
    fn test_best1bin_converges_on_sphere() {
        let config = DEConfigBuilder::new()
            .seed(7)
            .strategy(Strategy::Best1Bin)
            .max_evaluations(20_000)
            .build()
            .expect("valid config");

        let report = differential_evolution(&sphere, &[(-5.0, 5.0); 5], config).unwrap();
        assert!(report.fun < 1e-3, "best1bin stalled: f={}", report.fun);
    }

    #[test]
    fn test_jde_converges_on_sphere() {
        let config = DEConfigBuilder::new()
            .seed(3)
            .recombination(0.9)
            .self_adaptive(SelfAdaptiveConfig::default())
            .max_evaluations(20_000)
            .build()
            .expect("valid config");

        let report = differential_evolution(&sphere, &[(-5.0, 5.0); 5], config).unwrap();
        assert!(report.fun < 1e-3, "jDE stalled: f={}", report.fun);
    }

    #[test]
    fn test_same_seed_same_result() {
        let run = || {
            let config = DEConfigBuilder::new()
                .seed(99)
                .max_evaluations(1_000)
                .build()
                .unwrap();
            differential_evolution(&sphere, &[(-5.0, 5.0); 3], config).unwrap()
        };
        let (a, b) = (run(), run());
        assert_eq!(a.fun, b.fun);
        assert_eq!(a.x, b.x);
        assert_eq!(a.history, b.history);
    }
}

#[cfg(test)]
mod budget_tests {
    use super::*;

    #[test]
    fn test_nfev_equals_budget() {
        for budget in [1usize, 7, 50, 53, 1_234] {
            let calls = Cell::new(0usize);
            let counted = |x: &Array1<f64>| {
                calls.set(calls.get() + 1);
                sphere(x)
            };
            let config = DEConfigBuilder::new()
                .seed(1)
                .max_evaluations(budget)
                .build()
                .unwrap();

            let report = differential_evolution(&counted, &[(-2.0, 2.0); 4], config).unwrap();
            assert_eq!(report.nfev, budget);
            assert_eq!(calls.get(), budget);
            assert_eq!(report.history.last().unwrap().evaluations, budget);
        }
    }

    #[test]
    fn test_budget_below_popsize_runs_no_generation() {
        let config = DEConfigBuilder::new()
            .seed(1)
            .popsize(50)
            .max_evaluations(20)
            .build()
            .unwrap();
        let report = differential_evolution(&sphere, &[(-1.0, 1.0); 2], config).unwrap();
        assert_eq!(report.nfev, 20);
        assert_eq!(report.nit, 0);
        assert_eq!(report.history.len(), 20);
    }

    #[test]
    fn test_history_is_monotone_and_matches_best_seen() {
        let seen = RefCell::new(Vec::new());
        let recorded = |x: &Array1<f64>| {
            let f = (x[0] - 1.0).powi(2) + x[1].abs();
            seen.borrow_mut().push(f);
            f
        };
        let config = DEConfigBuilder::new()
            .seed(11)
            .strategy(Strategy::Best1Bin)
            .max_evaluations(2_000)
            .build()
            .unwrap();

        let report = differential_evolution(&recorded, &[(-3.0, 3.0); 2], config).unwrap();

        let samples = report.history.samples();
        for pair in samples.windows(2) {
            assert!(pair[1].evaluations > pair[0].evaluations);
            assert!(pair[1].best <= pair[0].best);
        }
        let best_seen = seen.borrow().iter().copied().fold(f64::INFINITY, f64::min);
        assert_eq!(report.fun, best_seen);
        assert_eq!(report.history.best(), Some(best_seen));
    }
}

#[cfg(test)]
mod bounds_tests {
    use super::*;

    #[test]
    fn test_candidates_stay_inside_bounds() {
        let guarded = |x: &Array1<f64>| {
            assert!(x.iter().all(|&v| (-1.0..=2.0).contains(&v)), "out of bounds: {x}");
            sphere(x)
        };
        for policy in [BoundsPolicy::Clip, BoundsPolicy::Reject] {
            let config = DEConfigBuilder::new()
                .seed(5)
                .mutation(1.5)
                .bounds_policy(policy)
                .max_evaluations(3_000)
                .build()
                .unwrap();
            let report = differential_evolution(&guarded, &[(-1.0, 2.0); 3], config).unwrap();
            assert!(report.x.iter().all(|&v| (-1.0..=2.0).contains(&v)));
        }
    }

    #[test]
    fn test_invalid_bounds_are_rejected() {
        let config = DEConfigBuilder::new().build().unwrap();
        let err = differential_evolution(&sphere, &[(1.0, 1.0)], config.clone()).unwrap_err();
        assert!(matches!(err, OptimizerError::DegenerateBounds { index: 0, .. }));

        let err = differential_evolution(&sphere, &[(0.0, 1.0), (2.0, -2.0)], config.clone())
            .unwrap_err();
        assert!(matches!(err, OptimizerError::InvalidBounds { index: 1, .. }));

        let err = differential_evolution(&sphere, &[], config).unwrap_err();
        assert!(err.is_bounds_error());
    }
}

#[cfg(test)]
mod config_tests {
    use super::*;

    #[test]
    fn test_builder_validation() {
        assert!(matches!(
            DEConfigBuilder::new().popsize(3).build(),
            Err(OptimizerError::PopulationTooSmall { pop_size: 3, min: 4 })
        ));
        assert!(matches!(
            DEConfigBuilder::new().mutation(2.5).build(),
            Err(OptimizerError::InvalidMutationFactor { .. })
        ));
        assert!(matches!(
            DEConfigBuilder::new().recombination(1.2).build(),
            Err(OptimizerError::InvalidProbability { name: "recombination", .. })
        ));
        assert!(matches!(
            DEConfigBuilder::new()
                .self_adaptive(SelfAdaptiveConfig { tau1: 0.1, tau2: 1.5 })
                .build(),
            Err(OptimizerError::InvalidProbability { name: "tau2", .. })
        ));
        assert!(matches!(
            DEConfigBuilder::new().max_evaluations(0).build(),
            Err(OptimizerError::ZeroBudget)
        ));
    }

    #[test]
    fn test_solve_revalidates_config_mut() {
        let calls = Cell::new(0usize);
        let counted = |x: &Array1<f64>| {
            calls.set(calls.get() + 1);
            sphere(x)
        };
        let mut de = DifferentialEvolution::new(&counted, Bounds::uniform(2, -1.0, 1.0).unwrap());
        de.config_mut().popsize = 2;
        assert!(de.solve().is_err());
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_strategy_names() {
        assert_eq!("rand1bin".parse::<Strategy>().unwrap(), Strategy::Rand1Bin);
        assert_eq!("BEST1BIN".parse::<Strategy>().unwrap(), Strategy::Best1Bin);
        assert!(matches!(
            "rand2exp".parse::<Strategy>(),
            Err(OptimizerError::UnknownStrategy(_))
        ));
        assert_eq!(Strategy::Best1Bin.to_string(), "best1bin");
    }
}

#[cfg(test)]
mod selection_tests {
    use super::*;

    fn mismatches(a: &Array1<f64>, b: &Array1<f64>) -> usize {
        a.iter().zip(b.iter()).filter(|(x, y)| x != y).count()
    }

    // With CR = 0 each trial differs from its parent in exactly one coordinate,
    // so the vector a slot kept can be read back from the next generation's trial.
    #[test]
    fn test_worse_trial_never_replaces_parent() {
        let (npop, generations) = (4, 60);
        let log = RefCell::new(Vec::new());
        let recorded = |x: &Array1<f64>| {
            let f = sphere(x);
            log.borrow_mut().push((x.clone(), f));
            f
        };
        let config = DEConfigBuilder::new()
            .seed(5)
            .popsize(npop)
            .mutation(0.9)
            .recombination(0.0)
            .max_evaluations(npop * (generations + 1))
            .build()
            .unwrap();

        let report = differential_evolution(&recorded, &[(-5.0, 5.0); 8], config).unwrap();
        let log = log.borrow();
        assert_eq!(report.nfev, log.len());

        let mut slots: Vec<(Array1<f64>, f64)> = log[..npop].to_vec();
        let mut decided = 0;
        for g in 1..generations {
            let trials = &log[npop * g..npop * (g + 1)];
            let successors = &log[npop * (g + 1)..npop * (g + 2)];
            for i in 0..npop {
                let (parent, trial) = (&slots[i], &trials[i]);
                let from_parent = mismatches(&successors[i].0, &parent.0);
                let from_trial = mismatches(&successors[i].0, &trial.0);
                if from_parent != from_trial {
                    decided += 1;
                    if from_trial < from_parent {
                        assert!(
                            trial.1 <= parent.1,
                            "gen {g} slot {i}: worse trial {} replaced parent {}",
                            trial.1,
                            parent.1
                        );
                    } else {
                        assert!(
                            trial.1 > parent.1,
                            "gen {g} slot {i}: better trial {} was discarded for {}",
                            trial.1,
                            parent.1
                        );
                    }
                }
                if trial.1 <= parent.1 {
                    slots[i] = trial.clone();
                }
            }
        }
        assert!(decided > npop * generations / 2, "only {decided} slots decided");
    }
}
