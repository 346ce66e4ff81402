use math_metaheuristics::{Bounds, RunHistory, Variant, run_repeated};
use math_test_functions::{get_function_metadata, rastrigin, sphere};
use ndarray::Array1;
use std::cell::Cell;

fn assert_monotone(history: &RunHistory, budget: usize) {
    let samples = history.samples();
    assert!(!samples.is_empty());
    assert_eq!(samples.last().unwrap().evaluations, budget);
    for pair in samples.windows(2) {
        assert!(pair[1].evaluations > pair[0].evaluations);
        assert!(pair[1].best <= pair[0].best);
    }
}

#[test]
fn every_variant_spends_exactly_its_budget() {
    let bounds = Bounds::uniform(4, -5.12, 5.12).unwrap();
    for variant in Variant::ALL {
        for budget in [1usize, 77, 1_001] {
            let report = variant.run(&rastrigin, &bounds, budget, Some(3)).unwrap();
            assert_eq!(report.nfev, budget, "{variant} with budget {budget}");
            assert_monotone(&report.history, budget);
            assert_eq!(report.history.best(), Some(report.fun));
        }
    }
}

#[test]
fn objective_is_never_called_beyond_budget() {
    let bounds = Bounds::uniform(3, -1.0, 1.0).unwrap();
    for variant in Variant::ALL {
        let calls = Cell::new(0usize);
        let counted = |x: &Array1<f64>| {
            calls.set(calls.get() + 1);
            sphere(x)
        };
        let report = variant.run(&counted, &bounds, 500, Some(9)).unwrap();
        assert!(calls.get() <= report.nfev, "{variant}");
        assert_eq!(report.nfev, 500);
    }
}

#[test]
fn best_point_lies_inside_bounds() {
    let metadata = get_function_metadata();
    let schwefel = &metadata["schwefel"];
    let (lo, hi) = schwefel.bounds;
    let bounds = Bounds::uniform(5, lo, hi).unwrap();
    for variant in Variant::ALL {
        let report = variant.run(&schwefel.function, &bounds, 2_000, Some(4)).unwrap();
        assert!(bounds.contains(&report.x), "{variant}: {}", report.x);
        assert!(report.fun.is_finite());
    }
}

#[test]
fn de_and_constant_pso_solve_sphere() {
    let bounds = Bounds::uniform(5, -5.0, 5.0).unwrap();
    for variant in [
        Variant::DeRand1Bin,
        Variant::DeBest1Bin,
        Variant::JdeRand1Bin,
        Variant::PsoConstGlobal,
    ] {
        let reports = run_repeated(variant, &sphere, &bounds, 20_000, &[1, 2]).unwrap();
        for report in reports {
            assert!(report.fun < 1e-3, "{variant}: f={}", report.fun);
        }
    }
}
