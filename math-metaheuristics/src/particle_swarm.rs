//! Particle Swarm Optimization with global or ring topology.

use log::{debug, info, trace};
use ndarray::Array1;

use crate::bounds::{Bounds, BoundsPolicy};
use crate::error::{OptimizerError, Result, check_budget};
use crate::evaluator::BudgetedEvaluator;
use crate::history::RunHistory;
use crate::init_random::init_random;
use crate::population::{Incumbent, Population};
use crate::pso_topology::{Topology, informant_positions};
use crate::pso_velocity::{
    InertiaSchedule, VelocityCoefficients, confine, init_velocities, update_velocity,
    velocity_limit,
};
use crate::{BUDGET_EXHAUSTED, OptimizationReport, seeded_rng};

/// Smallest swarm with a meaningful social term.
pub const MIN_SWARM_SIZE: usize = 2;

/// Configuration for [`ParticleSwarm`].
#[derive(Debug, Clone, PartialEq)]
pub struct PSOConfig {
    /// Number of particles.
    pub swarm_size: usize,
    /// Objective evaluations the run may consume.
    pub max_evaluations: usize,
    /// Inertia weight schedule.
    pub inertia: InertiaSchedule,
    /// Cognitive (personal best) acceleration.
    pub c1: f64,
    /// Social (informant) acceleration.
    pub c2: f64,
    /// Informant structure.
    pub topology: Topology,
    /// `Reject` leaves escaped particles in place and scores them `+inf`;
    /// `Clip` pulls them back and zeroes the offending velocity.
    pub bounds_policy: BoundsPolicy,
    /// Optional random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for PSOConfig {
    fn default() -> Self {
        Self {
            swarm_size: 40,
            max_evaluations: 10_000,
            inertia: InertiaSchedule::default(),
            c1: 2.0,
            c2: 2.0,
            topology: Topology::Global,
            bounds_policy: BoundsPolicy::Reject,
            seed: None,
        }
    }
}

impl PSOConfig {
    /// Checks every parameter against its admissible range.
    pub fn validate(&self) -> Result<()> {
        if self.swarm_size < MIN_SWARM_SIZE {
            return Err(OptimizerError::PopulationTooSmall {
                pop_size: self.swarm_size,
                min: MIN_SWARM_SIZE,
            });
        }
        check_budget(self.max_evaluations)?;
        self.inertia.validate()?;
        for (name, value) in [("c1", self.c1), ("c2", self.c2)] {
            if !value.is_finite() || value < 0.0 {
                return Err(OptimizerError::InvalidParameter { name, value });
            }
        }
        Ok(())
    }
}

/// Fluent builder for [`PSOConfig`].
#[derive(Debug, Clone, Default)]
pub struct PSOConfigBuilder {
    cfg: PSOConfig,
}

impl PSOConfigBuilder {
    /// Creates a new builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }
    /// Sets the number of particles.
    pub fn swarm_size(mut self, v: usize) -> Self {
        self.cfg.swarm_size = v;
        self
    }
    /// Sets the evaluation budget.
    pub fn max_evaluations(mut self, v: usize) -> Self {
        self.cfg.max_evaluations = v;
        self
    }
    /// Sets the inertia schedule.
    pub fn inertia(mut self, v: InertiaSchedule) -> Self {
        self.cfg.inertia = v;
        self
    }
    /// Sets both acceleration coefficients.
    pub fn acceleration(mut self, c1: f64, c2: f64) -> Self {
        self.cfg.c1 = c1;
        self.cfg.c2 = c2;
        self
    }
    /// Sets the topology.
    pub fn topology(mut self, v: Topology) -> Self {
        self.cfg.topology = v;
        self
    }
    /// Sets the bounds policy.
    pub fn bounds_policy(mut self, v: BoundsPolicy) -> Self {
        self.cfg.bounds_policy = v;
        self
    }
    /// Sets the random seed for reproducibility.
    pub fn seed(mut self, v: u64) -> Self {
        self.cfg.seed = Some(v);
        self
    }
    /// Builds and returns the configuration.
    ///
    /// # Errors
    ///
    /// Returns `PopulationTooSmall` for fewer than two particles,
    /// `ZeroBudget`, or `InvalidParameter` for negative or non-finite
    /// coefficients.
    pub fn build(self) -> Result<PSOConfig> {
        self.cfg.validate()?;
        Ok(self.cfg)
    }
}

/// Particle Swarm optimizer.
pub struct ParticleSwarm<'a, F>
where
    F: Fn(&Array1<f64>) -> f64,
{
    func: &'a F,
    bounds: Bounds,
    config: PSOConfig,
}

impl<'a, F> ParticleSwarm<'a, F>
where
    F: Fn(&Array1<f64>) -> f64,
{
    /// Creates an optimizer for `func` over `bounds` with the default config.
    pub fn new(func: &'a F, bounds: Bounds) -> Self {
        Self {
            func,
            bounds,
            config: PSOConfig::default(),
        }
    }

    /// Mutable access to configuration
    pub fn config_mut(&mut self) -> &mut PSOConfig {
        &mut self.config
    }

    /// Runs until the evaluation budget is spent.
    ///
    /// # Errors
    ///
    /// Returns the configuration error, if any, before evaluating anything.
    pub fn solve(&mut self) -> Result<OptimizationReport> {
        self.config.validate()?;
        let cfg = &self.config;
        let n = cfg.swarm_size;
        let mut rng = seeded_rng(cfg.seed);

        info!(
            "PSO {} topology, inertia {}, {} policy: dim={}, particles={}, budget={}",
            cfg.topology,
            cfg.inertia,
            cfg.bounds_policy,
            self.bounds.dim(),
            n,
            cfg.max_evaluations
        );

        let mut evaluator = BudgetedEvaluator::new(
            self.func,
            &self.bounds,
            cfg.bounds_policy,
            cfg.max_evaluations,
        );
        let mut history = RunHistory::new();

        let positions = init_random(n, &self.bounds, &mut rng);
        let vmax = velocity_limit(&self.bounds);
        let mut velocities = init_velocities(n, &vmax, &mut rng);

        let mut swarm = Population::new(positions, Array1::from_elem(n, f64::INFINITY));
        let mut gbest = Incumbent::new(swarm.row(0).to_owned());
        swarm.evaluate_all(&mut evaluator, &mut gbest, &mut history);
        let mut pbest = swarm.clone();

        let mut nit = 0;
        while !evaluator.is_exhausted() {
            nit += 1;
            let coeffs = VelocityCoefficients {
                w: cfg.inertia.weight(evaluator.fraction_used()),
                c1: cfg.c1,
                c2: cfg.c2,
            };

            let informants = informant_positions(cfg.topology, &pbest, &gbest.x);
            for (i, v) in velocities.rows_mut().into_iter().enumerate() {
                update_velocity(
                    v,
                    swarm.row(i),
                    pbest.row(i),
                    informants.row(i),
                    coeffs,
                    &vmax,
                    &mut rng,
                );
            }

            let positions = swarm.individuals_mut();
            *positions += &velocities;
            if cfg.bounds_policy == BoundsPolicy::Clip {
                confine(positions, &mut velocities, &self.bounds);
            }

            let mut improved = 0usize;
            for i in 0..n {
                let x = swarm.row(i).to_owned();
                let f = evaluator.evaluate(&x);
                swarm.replace(i, &x, f);
                if f < pbest.fitness()[i] {
                    pbest.replace(i, &x, f);
                    improved += 1;
                }
                if gbest.offer(&x, f) {
                    trace!(
                        "PSO sweep {}: new best {:.6e} at nfev={}",
                        nit,
                        f,
                        evaluator.evaluations()
                    );
                }
                history.record(evaluator.evaluations(), gbest.fun);

                if evaluator.is_exhausted() {
                    break;
                }
            }

            debug!(
                "PSO sweep {}: w={:.3}, best={:.6e}, improved={}/{}, nfev={}",
                nit,
                coeffs.w,
                gbest.fun,
                improved,
                n,
                evaluator.evaluations()
            );
        }

        info!(
            "PSO finished: best={:.6e}, nfev={}, sweeps={}",
            gbest.fun,
            evaluator.evaluations(),
            nit
        );

        Ok(OptimizationReport {
            x: gbest.x,
            fun: gbest.fun,
            nfev: evaluator.evaluations(),
            nit,
            history,
            message: BUDGET_EXHAUSTED.to_string(),
        })
    }
}

/// Runs Particle Swarm Optimization on `func` over `bounds`.
///
/// # Errors
///
/// Returns a bounds error for invalid `bounds`, or the configuration error
/// from [`PSOConfig::validate`].
pub fn particle_swarm<F>(
    func: &F,
    bounds: &[(f64, f64)],
    config: PSOConfig,
) -> Result<OptimizationReport>
where
    F: Fn(&Array1<f64>) -> f64,
{
    let bounds = Bounds::from_pairs(bounds)?;
    let mut pso = ParticleSwarm::new(func, bounds);
    *pso.config_mut() = config;
    pso.solve()
}
