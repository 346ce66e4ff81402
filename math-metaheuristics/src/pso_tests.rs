use crate::{
    Bounds, BoundsPolicy, InertiaSchedule, OptimizerError, PSOConfigBuilder, ParticleSwarm,
    Topology, particle_swarm,
};
use ndarray::Array1;
use std::cell::Cell;

fn sphere(x: &Array1<f64>) -> f64 {
    x.iter().map(|&xi| xi * xi).sum::<f64>()
}

#[cfg(test)]
mod convergence_tests {
    use super::*;

    #[test]
    fn test_constant_inertia_global_converges_on_sphere() {
        let config = PSOConfigBuilder::new()
            .seed(42)
            .inertia(InertiaSchedule::Constant(0.7))
            .acceleration(1.49618, 1.49618)
            .max_evaluations(20_000)
            .build()
            .unwrap();

        let report = particle_swarm(&sphere, &[(-5.0, 5.0); 5], config).unwrap();
        assert!(report.fun < 1e-3, "global PSO stalled: f={}", report.fun);
        assert_eq!(report.nfev, 20_000);
    }

    #[test]
    fn test_constant_inertia_ring_converges_on_sphere() {
        let config = PSOConfigBuilder::new()
            .seed(8)
            .inertia(InertiaSchedule::Constant(0.6))
            .acceleration(1.49618, 1.49618)
            .topology(Topology::Ring)
            .max_evaluations(20_000)
            .build()
            .unwrap();

        let report = particle_swarm(&sphere, &[(-5.0, 5.0); 5], config).unwrap();
        assert!(report.fun < 1e-2, "ring PSO stalled: f={}", report.fun);
    }
}

#[cfg(test)]
mod boundary_tests {
    use super::*;

    // minimum in the (1, 1, 1) corner pulls particles past the boundary
    fn corner(x: &Array1<f64>) -> f64 {
        -x.sum()
    }

    #[test]
    fn test_reject_policy_never_calls_objective_outside() {
        let calls = Cell::new(0usize);
        let guarded = |x: &Array1<f64>| {
            assert!(x.iter().all(|&v| (-1.0..=1.0).contains(&v)), "out of bounds: {x}");
            calls.set(calls.get() + 1);
            corner(x)
        };
        let config = PSOConfigBuilder::new()
            .seed(2)
            .bounds_policy(BoundsPolicy::Reject)
            .max_evaluations(4_000)
            .build()
            .unwrap();

        let report = particle_swarm(&guarded, &[(-1.0, 1.0); 3], config).unwrap();
        assert_eq!(report.nfev, 4_000);
        assert!(calls.get() < report.nfev, "no particle ever escaped");
        assert!(report.x.iter().all(|&v| (-1.0..=1.0).contains(&v)));
    }

    #[test]
    fn test_clip_policy_evaluates_every_particle() {
        let calls = Cell::new(0usize);
        let guarded = |x: &Array1<f64>| {
            assert!(x.iter().all(|&v| (-1.0..=1.0).contains(&v)), "out of bounds: {x}");
            calls.set(calls.get() + 1);
            corner(x)
        };
        let config = PSOConfigBuilder::new()
            .seed(2)
            .bounds_policy(BoundsPolicy::Clip)
            .max_evaluations(4_000)
            .build()
            .unwrap();

        let report = particle_swarm(&guarded, &[(-1.0, 1.0); 3], config).unwrap();
        assert_eq!(calls.get(), 4_000);
        assert!((report.fun + 3.0).abs() < 1e-6, "corner not reached: {}", report.fun);
    }
}

#[cfg(test)]
mod budget_tests {
    use super::*;

    #[test]
    fn test_nfev_equals_budget_and_history_is_monotone() {
        for budget in [1usize, 39, 41, 999] {
            let config = PSOConfigBuilder::new()
                .seed(13)
                .topology(Topology::Ring)
                .max_evaluations(budget)
                .build()
                .unwrap();
            let report = particle_swarm(&sphere, &[(-5.12, 5.12); 4], config).unwrap();

            assert_eq!(report.nfev, budget);
            assert_eq!(report.history.last().unwrap().evaluations, budget);
            for pair in report.history.samples().windows(2) {
                assert!(pair[1].best <= pair[0].best);
            }
        }
    }

    #[test]
    fn test_builder_validation() {
        assert!(matches!(
            PSOConfigBuilder::new().swarm_size(1).build(),
            Err(OptimizerError::PopulationTooSmall { pop_size: 1, min: 2 })
        ));
        assert!(matches!(
            PSOConfigBuilder::new().acceleration(-1.0, 2.0).build(),
            Err(OptimizerError::InvalidParameter { name: "c1", .. })
        ));
        assert!(matches!(
            PSOConfigBuilder::new().max_evaluations(0).build(),
            Err(OptimizerError::ZeroBudget)
        ));
    }

    #[test]
    fn test_two_particle_ring_runs() {
        let mut pso = ParticleSwarm::new(&sphere, Bounds::uniform(2, -1.0, 1.0).unwrap());
        pso.config_mut().swarm_size = 2;
        pso.config_mut().topology = Topology::Ring;
        pso.config_mut().max_evaluations = 101;
        pso.config_mut().seed = Some(4);
        let report = pso.solve().unwrap();
        assert_eq!(report.nfev, 101);
        assert_eq!(report.nit, 50);
    }
}
