//! Budgeted objective evaluation.

use ndarray::Array1;

use crate::bounds::{Bounds, BoundsPolicy};

/// Wraps the objective with an evaluation counter and the bounds policy.
///
/// The counter is the only state that changes. Once it reaches the budget,
/// [`evaluate`](Self::evaluate) returns `+inf` without calling the objective
/// and without counting, so the counter never exceeds the budget.
pub struct BudgetedEvaluator<'a, F>
where
    F: Fn(&Array1<f64>) -> f64,
{
    func: &'a F,
    bounds: &'a Bounds,
    policy: BoundsPolicy,
    max_evaluations: usize,
    evaluations: usize,
}

impl<'a, F> BudgetedEvaluator<'a, F>
where
    F: Fn(&Array1<f64>) -> f64,
{
    /// Creates an evaluator with a fresh counter.
    pub fn new(
        func: &'a F,
        bounds: &'a Bounds,
        policy: BoundsPolicy,
        max_evaluations: usize,
    ) -> Self {
        Self {
            func,
            bounds,
            policy,
            max_evaluations,
            evaluations: 0,
        }
    }

    /// Scores `x`, consuming one unit of budget if any is left.
    pub fn evaluate(&mut self, x: &Array1<f64>) -> f64 {
        if self.is_exhausted() {
            return f64::INFINITY;
        }
        self.evaluations += 1;

        let value = if self.bounds.contains(x) {
            (self.func)(x)
        } else {
            match self.policy {
                BoundsPolicy::Reject => return f64::INFINITY,
                BoundsPolicy::Clip => (self.func)(&self.bounds.clipped(x)),
            }
        };

        if value.is_nan() { f64::INFINITY } else { value }
    }

    /// Evaluations consumed so far.
    pub fn evaluations(&self) -> usize {
        self.evaluations
    }

    /// The configured budget.
    pub fn max_evaluations(&self) -> usize {
        self.max_evaluations
    }

    /// Evaluations still available.
    pub fn remaining(&self) -> usize {
        self.max_evaluations - self.evaluations
    }

    /// Whether the budget is spent.
    pub fn is_exhausted(&self) -> bool {
        self.evaluations >= self.max_evaluations
    }

    /// Share of the budget consumed, in [0, 1].
    pub fn fraction_used(&self) -> f64 {
        self.evaluations as f64 / self.max_evaluations as f64
    }

    /// The bounds candidates are checked against.
    pub fn bounds(&self) -> &Bounds {
        self.bounds
    }

    /// The configured bounds policy.
    pub fn policy(&self) -> BoundsPolicy {
        self.policy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use std::cell::Cell;

    #[test]
    fn test_budget_is_never_exceeded() {
        let calls = Cell::new(0usize);
        let func = |x: &Array1<f64>| {
            calls.set(calls.get() + 1);
            x.sum()
        };
        let bounds = Bounds::uniform(2, -1.0, 1.0).unwrap();
        let mut evaluator = BudgetedEvaluator::new(&func, &bounds, BoundsPolicy::Clip, 3);

        for _ in 0..3 {
            assert!(evaluator.evaluate(&array![0.5, 0.25]).is_finite());
        }
        assert!(evaluator.is_exhausted());
        assert_eq!(evaluator.evaluate(&array![0.5, 0.25]), f64::INFINITY);
        assert_eq!(evaluator.evaluations(), 3);
        assert_eq!(evaluator.remaining(), 0);
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn test_reject_policy_skips_objective() {
        let func = |x: &Array1<f64>| {
            assert!(x.iter().all(|v| v.abs() <= 1.0), "called out of bounds");
            x.sum()
        };
        let bounds = Bounds::uniform(2, -1.0, 1.0).unwrap();
        let mut evaluator = BudgetedEvaluator::new(&func, &bounds, BoundsPolicy::Reject, 10);

        assert_eq!(evaluator.evaluate(&array![2.0, 0.0]), f64::INFINITY);
        assert_eq!(evaluator.evaluations(), 1);
        assert_eq!(evaluator.evaluate(&array![0.5, 0.5]), 1.0);
        assert_eq!(evaluator.evaluations(), 2);
    }

    #[test]
    fn test_clip_policy_evaluates_clamped_point() {
        let func = |x: &Array1<f64>| x.sum();
        let bounds = Bounds::uniform(2, -1.0, 1.0).unwrap();
        let mut evaluator = BudgetedEvaluator::new(&func, &bounds, BoundsPolicy::Clip, 10);

        assert_eq!(evaluator.evaluate(&array![5.0, -0.5]), 0.5);
        assert_eq!(evaluator.fraction_used(), 0.1);
    }

    #[test]
    fn test_nan_is_scored_as_infinity() {
        let func = |_: &Array1<f64>| f64::NAN;
        let bounds = Bounds::uniform(1, -1.0, 1.0).unwrap();
        let mut evaluator = BudgetedEvaluator::new(&func, &bounds, BoundsPolicy::Clip, 10);

        assert_eq!(evaluator.evaluate(&array![0.0]), f64::INFINITY);
    }
}
