//! Generational Genetic Algorithm with rank selection, one-point crossover
//! and elitism, over a real or a 32-bit-per-dimension genome.

use std::fmt;

use log::{debug, info, trace};
use ndarray::Array1;
use rand::Rng;

use crate::bit_decoding::{BitDecoder, decode_genome};
use crate::bounds::{Bounds, BoundsPolicy};
use crate::crossover_one_point::one_point_crossover;
use crate::error::{OptimizerError, Result, check_budget, check_probability};
use crate::evaluator::BudgetedEvaluator;
use crate::history::RunHistory;
use crate::mutate_bits::flip_bits;
use crate::mutate_real::{RealMutation, mutate_real};
use crate::population::Incumbent;
use crate::select_rank::RankSelector;
use crate::{BUDGET_EXHAUSTED, OptimizationReport, seeded_rng};

/// Smallest population that can produce offspring.
pub const MIN_GA_POPSIZE: usize = 2;

/// Genome representation and its mutation operator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Encoding {
    /// One `f64` gene per dimension, always inside the bounds.
    Real {
        /// Mutation applied to every child
        mutation: RealMutation,
    },
    /// One 32-bit word per dimension, decoded before evaluation.
    Bits {
        /// Word interpretation
        decoder: BitDecoder,
        /// Per-bit flip probability
        p_mut: f64,
    },
}

impl Default for Encoding {
    fn default() -> Self {
        Encoding::Real {
            mutation: RealMutation::default(),
        }
    }
}

impl Encoding {
    /// Bit encoding with the default flip probability of 1/32.
    pub fn bits(decoder: BitDecoder) -> Self {
        Encoding::Bits {
            decoder,
            p_mut: 1.0 / 32.0,
        }
    }

    fn validate(&self) -> Result<()> {
        match self {
            Encoding::Real { mutation } => mutation.validate(),
            Encoding::Bits { p_mut, .. } => check_probability("p_mut", *p_mut),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Encoding::Real { mutation } => write!(f, "real/{mutation}"),
            Encoding::Bits { decoder, .. } => write!(f, "bits/{decoder}"),
        }
    }
}

/// Configuration for [`GeneticAlgorithm`].
#[derive(Debug, Clone, PartialEq)]
pub struct GAConfig {
    /// Number of individuals.
    pub popsize: usize,
    /// Objective evaluations the run may consume.
    pub max_evaluations: usize,
    /// Share of the population carried over unchanged, in [0, 1).
    pub elite_frac: f64,
    /// Probability that a selected pair is recombined.
    pub crossover_prob: f64,
    /// Genome representation.
    pub encoding: Encoding,
    /// Treatment of candidates outside the bounds.
    pub bounds_policy: BoundsPolicy,
    /// Optional random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for GAConfig {
    fn default() -> Self {
        Self {
            popsize: 200,
            max_evaluations: 10_000,
            elite_frac: 0.1,
            crossover_prob: 1.0,
            encoding: Encoding::default(),
            bounds_policy: BoundsPolicy::Clip,
            seed: None,
        }
    }
}

impl GAConfig {
    /// Checks every parameter against its admissible range.
    pub fn validate(&self) -> Result<()> {
        if self.popsize < MIN_GA_POPSIZE {
            return Err(OptimizerError::PopulationTooSmall {
                pop_size: self.popsize,
                min: MIN_GA_POPSIZE,
            });
        }
        check_budget(self.max_evaluations)?;
        if !(0.0..1.0).contains(&self.elite_frac) {
            return Err(OptimizerError::InvalidParameter {
                name: "elite_frac",
                value: self.elite_frac,
            });
        }
        check_probability("crossover_prob", self.crossover_prob)?;
        self.encoding.validate()
    }

    /// Number of elites, at most `popsize - 1`.
    pub fn elite_count(&self) -> usize {
        ((self.elite_frac * self.popsize as f64).round() as usize).min(self.popsize - 1)
    }
}

/// Fluent builder for [`GAConfig`].
#[derive(Debug, Clone, Default)]
pub struct GAConfigBuilder {
    cfg: GAConfig,
}

impl GAConfigBuilder {
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
    /// Sets the elite share.
    pub fn elite_frac(mut self, v: f64) -> Self {
        self.cfg.elite_frac = v;
        self
    }
    /// Sets the crossover probability.
    pub fn crossover_prob(mut self, v: f64) -> Self {
        self.cfg.crossover_prob = v;
        self
    }
    /// Sets the genome representation.
    pub fn encoding(mut self, v: Encoding) -> Self {
        self.cfg.encoding = v;
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
    /// Returns `PopulationTooSmall`, `ZeroBudget`, `InvalidParameter` or
    /// `InvalidProbability` for out-of-range settings.
    pub fn build(self) -> Result<GAConfig> {
        self.cfg.validate()?;
        Ok(self.cfg)
    }
}

/// How genes are drawn, mutated and turned into a point.
trait Representation {
    type Gene: Clone;
    fn random_genome<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Self::Gene>;
    fn mutate<R: Rng + ?Sized>(&self, genome: &mut [Self::Gene], rng: &mut R);
    fn decode(&self, genome: &[Self::Gene]) -> Array1<f64>;
}

struct RealGenes<'b> {
    bounds: &'b Bounds,
    mutation: RealMutation,
}

impl Representation for RealGenes<'_> {
    type Gene = f64;

    fn random_genome<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<f64> {
        self.bounds.sample_uniform(rng).to_vec()
    }

    fn mutate<R: Rng + ?Sized>(&self, genome: &mut [f64], rng: &mut R) {
        mutate_real(genome, &self.mutation, self.bounds, rng);
    }

    fn decode(&self, genome: &[f64]) -> Array1<f64> {
        Array1::from(genome.to_vec())
    }
}

struct BitGenes<'b> {
    bounds: &'b Bounds,
    decoder: BitDecoder,
    p_mut: f64,
}

impl Representation for BitGenes<'_> {
    type Gene = u32;

    fn random_genome<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<u32> {
        (0..self.bounds.dim()).map(|_| rng.random()).collect()
    }

    fn mutate<R: Rng + ?Sized>(&self, genome: &mut [u32], rng: &mut R) {
        flip_bits(genome, self.p_mut, rng);
    }

    fn decode(&self, genome: &[u32]) -> Array1<f64> {
        decode_genome(self.decoder, genome, self.bounds)
    }
}

/// Genetic Algorithm optimizer.
pub struct GeneticAlgorithm<'a, F>
where
    F: Fn(&Array1<f64>) -> f64,
{
    func: &'a F,
    bounds: Bounds,
    config: GAConfig,
}

impl<'a, F> GeneticAlgorithm<'a, F>
where
    F: Fn(&Array1<f64>) -> f64,
{
    /// Creates an optimizer for `func` over `bounds` with the default config.
    pub fn new(func: &'a F, bounds: Bounds) -> Self {
        Self {
            func,
            bounds,
            config: GAConfig::default(),
        }
    }

    /// Mutable access to configuration
    pub fn config_mut(&mut self) -> &mut GAConfig {
        &mut self.config
    }

    /// Runs until the evaluation budget is spent.
    ///
    /// # Errors
    ///
    /// Returns the configuration error, if any, before evaluating anything.
    pub fn solve(&mut self) -> Result<OptimizationReport> {
        self.config.validate()?;
        match self.config.encoding {
            Encoding::Real { mutation } => {
                let repr = RealGenes {
                    bounds: &self.bounds,
                    mutation,
                };
                Ok(self.evolve(&repr))
            }
            Encoding::Bits { decoder, p_mut } => {
                let repr = BitGenes {
                    bounds: &self.bounds,
                    decoder,
                    p_mut,
                };
                Ok(self.evolve(&repr))
            }
        }
    }

    fn evolve<G: Representation>(&self, repr: &G) -> OptimizationReport {
        let cfg = &self.config;
        let n = cfg.popsize;
        let elite_n = cfg.elite_count();
        let mut rng = seeded_rng(cfg.seed);

        info!(
            "GA {}: dim={}, popsize={}, elites={}, budget={}",
            cfg.encoding,
            self.bounds.dim(),
            n,
            elite_n,
            cfg.max_evaluations
        );

        let mut evaluator = BudgetedEvaluator::new(
            self.func,
            &self.bounds,
            cfg.bounds_policy,
            cfg.max_evaluations,
        );
        let mut history = RunHistory::new();

        let mut genomes: Vec<Vec<G::Gene>> = (0..n).map(|_| repr.random_genome(&mut rng)).collect();
        let mut fitness = Array1::from_elem(n, f64::INFINITY);
        let mut incumbent = Incumbent::new(repr.decode(&genomes[0]));
        let mut batch = EvaluationBatch {
            evaluator: &mut evaluator,
            incumbent: &mut incumbent,
            history: &mut history,
        };

        let mut exhausted = batch.evaluate(repr, &genomes, 0, &mut fitness);
        let mut nit = 0;
        while !exhausted {
            nit += 1;
            let selector = RankSelector::new(&fitness);

            let mut next_genomes = Vec::with_capacity(n);
            let mut next_fitness = Vec::with_capacity(n);
            for &idx in &selector.ranked()[..elite_n] {
                next_genomes.push(genomes[idx].clone());
                next_fitness.push(fitness[idx]);
            }
            while next_genomes.len() < n {
                let a = selector.select(&mut rng);
                let b = selector.select(&mut rng);
                let (mut child1, mut child2) =
                    one_point_crossover(&genomes[a], &genomes[b], cfg.crossover_prob, &mut rng);
                repr.mutate(&mut child1, &mut rng);
                next_genomes.push(child1);
                next_fitness.push(f64::INFINITY);
                if next_genomes.len() < n {
                    repr.mutate(&mut child2, &mut rng);
                    next_genomes.push(child2);
                    next_fitness.push(f64::INFINITY);
                }
            }

            genomes = next_genomes;
            fitness = Array1::from(next_fitness);
            exhausted = batch.evaluate(repr, &genomes, elite_n, &mut fitness);

            debug!(
                "GA gen {}: best={:.6e}, generation best={:.6e}, nfev={}",
                nit,
                batch.incumbent.fun,
                fitness.iter().copied().fold(f64::INFINITY, f64::min),
                batch.evaluator.evaluations()
            );
        }
        let nfev = evaluator.evaluations();

        info!(
            "GA finished: best={:.6e}, nfev={}, generations={}",
            incumbent.fun, nfev, nit
        );

        OptimizationReport {
            x: incumbent.x,
            fun: incumbent.fun,
            nfev,
            nit,
            history,
            message: BUDGET_EXHAUSTED.to_string(),
        }
    }
}

/// Mutable run state touched by every evaluation.
struct EvaluationBatch<'r, 'a, F>
where
    F: Fn(&Array1<f64>) -> f64,
{
    evaluator: &'r mut BudgetedEvaluator<'a, F>,
    incumbent: &'r mut Incumbent,
    history: &'r mut RunHistory,
}

impl<F> EvaluationBatch<'_, '_, F>
where
    F: Fn(&Array1<f64>) -> f64,
{
    /// Evaluates `genomes[start..]` in order until the budget runs out.
    /// Returns whether it did.
    fn evaluate<G: Representation>(
        &mut self,
        repr: &G,
        genomes: &[Vec<G::Gene>],
        start: usize,
        fitness: &mut Array1<f64>,
    ) -> bool {
        for (i, genome) in genomes.iter().enumerate().skip(start) {
            if self.evaluator.is_exhausted() {
                break;
            }
            let x = repr.decode(genome);
            let f = self.evaluator.evaluate(&x);
            fitness[i] = f;
            if self.incumbent.offer(&x, f) {
                trace!(
                    "GA new best {:.6e} at nfev={}",
                    f,
                    self.evaluator.evaluations()
                );
            }
            self.history.record(self.evaluator.evaluations(), self.incumbent.fun);
        }
        self.evaluator.is_exhausted()
    }
}

/// Runs the Genetic Algorithm on `func` over `bounds`.
///
/// # Errors
///
/// Returns a bounds error for invalid `bounds`, or the configuration error
/// from [`GAConfig::validate`].
pub fn genetic_algorithm<F>(
    func: &F,
    bounds: &[(f64, f64)],
    config: GAConfig,
) -> Result<OptimizationReport>
where
    F: Fn(&Array1<f64>) -> f64,
{
    let bounds = Bounds::from_pairs(bounds)?;
    let mut ga = GeneticAlgorithm::new(func, bounds);
    *ga.config_mut() = config;
    ga.solve()
}
