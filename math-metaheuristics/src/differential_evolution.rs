//! Differential Evolution with `rand1bin` / `best1bin` strategies and
//! optional jDE self-adaptation.

use std::fmt;
use std::str::FromStr;

use log::{debug, info, trace};
use ndarray::Array1;

use crate::bounds::{Bounds, BoundsPolicy};
use crate::crossover_binomial::binomial_crossover;
use crate::distinct_indices::distinct_indices;
use crate::error::{OptimizerError, Result, check_budget, check_probability};
use crate::evaluator::BudgetedEvaluator;
use crate::history::RunHistory;
use crate::mutant_best1::mutant_best1;
use crate::mutant_rand1::mutant_rand1;
use crate::population::{Incumbent, Population};
use crate::self_adaptive::{ControlParameters, SelfAdaptiveConfig};
use crate::{BUDGET_EXHAUSTED, OptimizationReport, seeded_rng};

/// Smallest population that can supply three distinct donors.
pub const MIN_DE_POPSIZE: usize = 4;

/// Donor construction, always followed by binomial crossover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// `x[r1] + F·(x[r2] − x[r3])`
    #[default]
    Rand1Bin,
    /// `x_best + F·(x[r1] − x[r2])`
    Best1Bin,
}

impl FromStr for Strategy {
    type Err = OptimizerError;
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "rand1bin" | "rand1" => Ok(Strategy::Rand1Bin),
            "best1bin" | "best1" => Ok(Strategy::Best1Bin),
            _ => Err(OptimizerError::UnknownStrategy(s.to_string())),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Rand1Bin => f.write_str("rand1bin"),
            Strategy::Best1Bin => f.write_str("best1bin"),
        }
    }
}

/// Configuration for [`DifferentialEvolution`].
#[derive(Debug, Clone, PartialEq)]
pub struct DEConfig {
    /// Number of individuals.
    pub popsize: usize,
    /// Objective evaluations the run may consume.
    pub max_evaluations: usize,
    /// Donor construction.
    pub strategy: Strategy,
    /// Mutation scale F in [0, 2]; the starting value under jDE.
    pub mutation: f64,
    /// Crossover probability CR in [0, 1]; the starting value under jDE.
    pub recombination: f64,
    /// Per-individual F/CR adaptation, if enabled.
    pub self_adaptive: Option<SelfAdaptiveConfig>,
    /// Treatment of candidates outside the bounds.
    pub bounds_policy: BoundsPolicy,
    /// Optional random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for DEConfig {
    fn default() -> Self {
        Self {
            popsize: 50,
            max_evaluations: 10_000,
            strategy: Strategy::Rand1Bin,
            mutation: 0.5,
            recombination: 0.8,
            self_adaptive: None,
            bounds_policy: BoundsPolicy::Clip,
            seed: None,
        }
    }
}

impl DEConfig {
    /// Checks every parameter against its admissible range.
    pub fn validate(&self) -> Result<()> {
        if self.popsize < MIN_DE_POPSIZE {
            return Err(OptimizerError::PopulationTooSmall {
                pop_size: self.popsize,
                min: MIN_DE_POPSIZE,
            });
        }
        check_budget(self.max_evaluations)?;
        if !(0.0..=2.0).contains(&self.mutation) {
            return Err(OptimizerError::InvalidMutationFactor {
                factor: self.mutation,
            });
        }
        check_probability("recombination", self.recombination)?;
        if let Some(sa) = &self.self_adaptive {
            sa.validate()?;
        }
        Ok(())
    }
}

/// Fluent builder for [`DEConfig`].
///
/// # Example
///
/// ```rust
/// use math_metaheuristics::{DEConfigBuilder, Strategy};
///
/// let config = DEConfigBuilder::new()
///     .popsize(30)
///     .strategy(Strategy::Best1Bin)
///     .mutation(0.7)
///     .recombination(0.9)
///     .max_evaluations(3_000)
///     .seed(42)
///     .build()
///     .expect("valid config");
/// assert_eq!(config.popsize, 30);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DEConfigBuilder {
    cfg: DEConfig,
}

impl DEConfigBuilder {
    /// Creates a new builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }
    /// Sets the population size.
    pub fn popsize(mut self, v: usize) -> Self {
        self.cfg.popsize = v;
        self
    }
    /// Sets the evaluation budget.
    pub fn max_evaluations(mut self, v: usize) -> Self {
        self.cfg.max_evaluations = v;
        self
    }
    /// Sets the donor strategy.
    pub fn strategy(mut self, v: Strategy) -> Self {
        self.cfg.strategy = v;
        self
    }
    /// Sets the mutation scale F.
    pub fn mutation(mut self, v: f64) -> Self {
        self.cfg.mutation = v;
        self
    }
    /// Sets the crossover probability CR.
    pub fn recombination(mut self, v: f64) -> Self {
        self.cfg.recombination = v;
        self
    }
    /// Enables jDE with the given resampling probabilities.
    pub fn self_adaptive(mut self, v: SelfAdaptiveConfig) -> Self {
        self.cfg.self_adaptive = Some(v);
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
    /// Returns `PopulationTooSmall` if `popsize < 4`, `ZeroBudget`,
    /// `InvalidMutationFactor` or `InvalidProbability` for out-of-range
    /// parameters.
    pub fn build(self) -> Result<DEConfig> {
        self.cfg.validate()?;
        Ok(self.cfg)
    }
}

/// Differential Evolution optimizer.
///
/// Create with [`DifferentialEvolution::new`], configure through
/// [`config_mut`](Self::config_mut), then call [`solve`](Self::solve).
pub struct DifferentialEvolution<'a, F>
where
    F: Fn(&Array1<f64>) -> f64,
{
    func: &'a F,
    bounds: Bounds,
    config: DEConfig,
}

impl<'a, F> DifferentialEvolution<'a, F>
where
    F: Fn(&Array1<f64>) -> f64,
{
    /// Creates an optimizer for `func` over `bounds` with the default config.
    pub fn new(func: &'a F, bounds: Bounds) -> Self {
        Self {
            func,
            bounds,
            config: DEConfig::default(),
        }
    }

    /// Mutable access to configuration
    pub fn config_mut(&mut self) -> &mut DEConfig {
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
        let npop = cfg.popsize;
        let mut rng = seeded_rng(cfg.seed);

        info!(
            "DE {}{}: dim={}, popsize={}, budget={}",
            cfg.strategy,
            if cfg.self_adaptive.is_some() { " (jDE)" } else { "" },
            self.bounds.dim(),
            npop,
            cfg.max_evaluations
        );

        let mut evaluator = BudgetedEvaluator::new(
            self.func,
            &self.bounds,
            cfg.bounds_policy,
            cfg.max_evaluations,
        );
        let mut history = RunHistory::new();

        let mut pop = Population::random(npop, &self.bounds, &mut rng);
        let mut incumbent = Incumbent::new(pop.row(0).to_owned());
        pop.evaluate_all(&mut evaluator, &mut incumbent, &mut history);

        let mut control = cfg
            .self_adaptive
            .map(|sa| (sa, ControlParameters::new(npop, cfg.mutation, cfg.recombination)));

        let mut nit = 0;
        while !evaluator.is_exhausted() {
            nit += 1;
            let mut next = pop.clone();
            let mut accepted = 0usize;

            for i in 0..npop {
                let (f, cr) = match control.as_mut() {
                    Some((sa, params)) => params.refresh(i, sa, &mut rng),
                    None => (cfg.mutation, cfg.recombination),
                };

                let r = distinct_indices(i, 3, npop, &mut rng);
                let mut mutant = match cfg.strategy {
                    Strategy::Rand1Bin => mutant_rand1(pop.individuals(), [r[0], r[1], r[2]], f),
                    Strategy::Best1Bin => {
                        mutant_best1(&incumbent.x, pop.individuals(), [r[0], r[1]], f)
                    }
                };
                self.bounds.clip(&mut mutant);
                let trial = binomial_crossover(pop.row(i), &mutant, cr, &self.bounds, &mut rng);

                let f_trial = evaluator.evaluate(&trial);
                if f_trial <= pop.fitness()[i] {
                    next.replace(i, &trial, f_trial);
                    accepted += 1;
                    if incumbent.offer(&trial, f_trial) {
                        trace!(
                            "DE gen {}: new best {:.6e} at nfev={}",
                            nit,
                            f_trial,
                            evaluator.evaluations()
                        );
                    }
                }
                history.record(evaluator.evaluations(), incumbent.fun);

                if evaluator.is_exhausted() {
                    break;
                }
            }

            pop = next;
            debug!(
                "DE gen {}: best={:.6e}, accepted={}/{}, nfev={}",
                nit,
                incumbent.fun,
                accepted,
                npop,
                evaluator.evaluations()
            );
        }

        info!(
            "DE finished: best={:.6e}, nfev={}, generations={}",
            incumbent.fun,
            evaluator.evaluations(),
            nit
        );

        Ok(OptimizationReport {
            x: incumbent.x,
            fun: incumbent.fun,
            nfev: evaluator.evaluations(),
            nit,
            history,
            message: BUDGET_EXHAUSTED.to_string(),
        })
    }
}

/// Runs Differential Evolution on `func` over `bounds`.
///
/// Convenience entry point: builds [`Bounds`] from `(lower, upper)` pairs,
/// installs `config` and solves.
///
/// # Errors
///
/// Returns a bounds error for empty, mismatched, inverted or zero-width
/// bounds, or the configuration error from [`DEConfig::validate`].
///
/// # Example
///
/// ```rust
/// use math_metaheuristics::{differential_evolution, DEConfigBuilder};
///
/// let result = differential_evolution(
///     &|x| x[0].powi(2) + x[1].powi(2),
///     &[(-5.0, 5.0), (-5.0, 5.0)],
///     DEConfigBuilder::new().max_evaluations(4_000).seed(42).build().unwrap(),
/// )
/// .expect("optimization failed");
///
/// assert!(result.fun < 0.01);
/// ```
pub fn differential_evolution<F>(
    func: &F,
    bounds: &[(f64, f64)],
    config: DEConfig,
) -> Result<OptimizationReport>
where
    F: Fn(&Array1<f64>) -> f64,
{
    let bounds = Bounds::from_pairs(bounds)?;
    let mut de = DifferentialEvolution::new(func, bounds);
    *de.config_mut() = config;
    de.solve()
}
