//! Budgeted population-based optimizers.
//!
//! Three families share one engine: a [`BudgetedEvaluator`] that counts
//! every objective call, a [`BoundsPolicy`] for candidates that leave the
//! box, and a [`RunHistory`] of best-so-far values.
//!
//! - [`differential_evolution`]: `rand1bin` / `best1bin`, optional jDE
//! - [`particle_swarm`]: global or ring topology, linear or constant inertia
//! - [`genetic_algorithm`]: rank selection, one-point crossover, elitism
//!
//! Every run stops when its budget is spent, so `nfev` always equals the
//! configured `max_evaluations`.
#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

use std::fmt;

use ndarray::Array1;
use rand::SeedableRng;
use rand::rngs::StdRng;

pub mod error;
pub use error::{OptimizerError, Result};

/// Box bounds and out-of-bounds policy.
pub mod bounds;
/// Budgeted objective evaluation.
pub mod evaluator;
/// Best-so-far convergence history.
pub mod history;
/// Real-valued population and incumbent tracking.
pub mod population;

mod init_random;

/// Differential Evolution driver and configuration.
pub mod differential_evolution;
/// Utilities for selecting distinct random indices from a population.
mod distinct_indices;
/// Rand/1 donor vector.
mod mutant_rand1;
/// Best/1 donor vector.
mod mutant_best1;
/// Binomial crossover with one guaranteed mutant component.
mod crossover_binomial;
pub mod self_adaptive;

/// Particle Swarm driver and configuration.
pub mod particle_swarm;
/// Informant topologies.
pub mod pso_topology;
pub mod pso_velocity;

/// Genetic Algorithm driver and configuration.
pub mod genetic_algorithm;
mod select_rank;
mod crossover_one_point;
pub mod mutate_real;
mod mutate_bits;
pub mod bit_decoding;

/// Named configurations compared by the benchmark runner.
pub mod presets;
/// Statistics over repeated runs.
pub mod stats;

pub use bit_decoding::{BitDecoder, decode_word};
pub use bounds::{Bounds, BoundsPolicy};
pub use differential_evolution::{
    DEConfig, DEConfigBuilder, DifferentialEvolution, Strategy, differential_evolution,
};
pub use evaluator::BudgetedEvaluator;
pub use genetic_algorithm::{
    Encoding, GAConfig, GAConfigBuilder, GeneticAlgorithm, genetic_algorithm,
};
pub use history::{HistorySample, RunHistory};
pub use mutate_real::RealMutation;
pub use particle_swarm::{PSOConfig, PSOConfigBuilder, ParticleSwarm, particle_swarm};
pub use population::{Incumbent, Population};
pub use presets::Variant;
pub use pso_topology::{Topology, ring_neighbors};
pub use pso_velocity::InertiaSchedule;
pub use self_adaptive::SelfAdaptiveConfig;
pub use stats::{RunSummary, consecutive_seeds, run_repeated};

#[cfg(test)]
mod de_tests;
#[cfg(test)]
mod pso_tests;

/// Status message of a run that stopped on its evaluation budget.
pub(crate) const BUDGET_EXHAUSTED: &str = "Maximum number of function evaluations reached";

/// Per-run random stream: seeded when asked, otherwise drawn from the
/// thread RNG.
pub(crate) fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => {
            let mut thread_rng = rand::rng();
            StdRng::from_rng(&mut thread_rng)
        }
    }
}

/// Result of one optimization run.
#[derive(Clone)]
pub struct OptimizationReport {
    /// Best point found.
    pub x: Array1<f64>,
    /// Objective value at `x`.
    pub fun: f64,
    /// Objective evaluations consumed.
    pub nfev: usize,
    /// Generations (or sweeps) started, the last one possibly partial.
    pub nit: usize,
    /// Best-so-far value after each evaluation count.
    pub history: RunHistory,
    /// Human-readable status message.
    pub message: String,
}

impl fmt::Debug for OptimizationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptimizationReport")
            .field("x", &format!("len={}", self.x.len()))
            .field("fun", &self.fun)
            .field("nfev", &self.nfev)
            .field("nit", &self.nit)
            .field("history", &format!("len={}", self.history.len()))
            .field("message", &self.message)
            .finish()
    }
}
