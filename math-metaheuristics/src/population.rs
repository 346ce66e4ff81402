//! Real-valued population and best-so-far tracking shared by DE and PSO.

use ndarray::{Array1, Array2, ArrayView1};
use rand::Rng;

use crate::bounds::Bounds;
use crate::evaluator::BudgetedEvaluator;
use crate::history::RunHistory;
use crate::init_random::init_random;

/// Index and value of the smallest entry; the first index wins ties.
pub(crate) fn argmin(v: &Array1<f64>) -> (usize, f64) {
    let mut best_i = 0usize;
    let mut best_v = v[0];
    for (i, &val) in v.iter().enumerate() {
        if val < best_v {
            best_v = val;
            best_i = i;
        }
    }
    (best_i, best_v)
}

/// Fixed-size set of individuals (rows) and their fitness values.
///
/// Unevaluated members carry `+inf`.
#[derive(Debug, Clone)]
pub struct Population {
    individuals: Array2<f64>,
    fitness: Array1<f64>,
}

impl Population {
    /// Wraps existing rows and fitness values.
    pub fn new(individuals: Array2<f64>, fitness: Array1<f64>) -> Self {
        debug_assert_eq!(individuals.nrows(), fitness.len());
        Self {
            individuals,
            fitness,
        }
    }

    /// `npop` uniform random members, not yet evaluated.
    pub fn random<R: Rng + ?Sized>(npop: usize, bounds: &Bounds, rng: &mut R) -> Self {
        Self::new(
            init_random(npop, bounds, rng),
            Array1::from_elem(npop, f64::INFINITY),
        )
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.fitness.len()
    }

    /// Whether the population has no members.
    pub fn is_empty(&self) -> bool {
        self.fitness.is_empty()
    }

    /// Problem dimension.
    pub fn dim(&self) -> usize {
        self.individuals.ncols()
    }

    /// Member `i`.
    pub fn row(&self, i: usize) -> ArrayView1<'_, f64> {
        self.individuals.row(i)
    }

    /// All members, one per row.
    pub fn individuals(&self) -> &Array2<f64> {
        &self.individuals
    }

    pub(crate) fn individuals_mut(&mut self) -> &mut Array2<f64> {
        &mut self.individuals
    }

    /// Fitness of every member.
    pub fn fitness(&self) -> &Array1<f64> {
        &self.fitness
    }

    /// Overwrites member `i` and its fitness.
    pub fn replace(&mut self, i: usize, x: &Array1<f64>, fitness: f64) {
        self.individuals.row_mut(i).assign(x);
        self.fitness[i] = fitness;
    }

    /// Index and fitness of the best member.
    pub fn best(&self) -> (usize, f64) {
        argmin(&self.fitness)
    }

    /// Evaluates members in order until the budget runs out, updating the
    /// incumbent and history after each evaluation.
    ///
    /// Members left unevaluated keep `+inf`. Returns the number evaluated.
    pub fn evaluate_all<F>(
        &mut self,
        evaluator: &mut BudgetedEvaluator<'_, F>,
        incumbent: &mut Incumbent,
        history: &mut RunHistory,
    ) -> usize
    where
        F: Fn(&Array1<f64>) -> f64,
    {
        let mut evaluated = 0;
        for i in 0..self.len() {
            if evaluator.is_exhausted() {
                break;
            }
            let x = self.individuals.row(i).to_owned();
            let f = evaluator.evaluate(&x);
            self.fitness[i] = f;
            incumbent.offer(&x, f);
            history.record(evaluator.evaluations(), incumbent.fun);
            evaluated += 1;
        }
        evaluated
    }
}

/// Best solution seen so far in a run.
#[derive(Debug, Clone)]
pub struct Incumbent {
    /// Best point
    pub x: Array1<f64>,
    /// Its fitness; `+inf` until something finite is offered
    pub fun: f64,
}

impl Incumbent {
    /// Placeholder incumbent at `x0` with infinite fitness.
    pub fn new(x0: Array1<f64>) -> Self {
        Self {
            x: x0,
            fun: f64::INFINITY,
        }
    }

    /// Takes `x` if `fun` is strictly better. Returns whether it did.
    pub fn offer(&mut self, x: &Array1<f64>, fun: f64) -> bool {
        if fun < self.fun {
            self.x.assign(x);
            self.fun = fun;
            true
        } else {
            false
        }
    }
}
