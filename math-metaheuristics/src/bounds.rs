//! Box bounds and the policy applied to candidates that leave them.

use ndarray::{Array1, Zip};
use rand::Rng;
use std::fmt;
use std::str::FromStr;

use crate::error::{OptimizerError, Result};

/// What happens to a candidate with a component outside its bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundsPolicy {
    /// Clamp each offending component to its bound before evaluating.
    ///
    /// For PSO this also zeroes the matching velocity component.
    #[default]
    Clip,
    /// Leave the candidate where it is and score it `+inf` without calling
    /// the objective. The evaluation still counts against the budget.
    Reject,
}

impl FromStr for BoundsPolicy {
    type Err = OptimizerError;
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "clip" | "clamp" => Ok(BoundsPolicy::Clip),
            "reject" | "noclip" | "no-clip" | "no_clip" => Ok(BoundsPolicy::Reject),
            _ => Err(OptimizerError::UnknownBoundsPolicy(s.to_string())),
        }
    }
}

impl fmt::Display for BoundsPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundsPolicy::Clip => f.write_str("clip"),
            BoundsPolicy::Reject => f.write_str("reject"),
        }
    }
}

/// Per-dimension search domain `[lower[j], upper[j]]`.
///
/// Every dimension has a strictly positive, finite width.
#[derive(Debug, Clone, PartialEq)]
pub struct Bounds {
    lower: Array1<f64>,
    upper: Array1<f64>,
}

impl Bounds {
    /// Creates bounds from lower and upper arrays.
    ///
    /// # Errors
    ///
    /// Returns `EmptyBounds` for zero dimensions, `BoundsMismatch` when the
    /// lengths differ, `InvalidBounds` when a lower bound exceeds its upper
    /// bound and `DegenerateBounds` for zero-width or non-finite ranges.
    pub fn new(lower: Array1<f64>, upper: Array1<f64>) -> Result<Self> {
        if lower.len() != upper.len() {
            return Err(OptimizerError::BoundsMismatch {
                lower_len: lower.len(),
                upper_len: upper.len(),
            });
        }
        if lower.is_empty() {
            return Err(OptimizerError::EmptyBounds);
        }
        for (index, (&lo, &hi)) in lower.iter().zip(upper.iter()).enumerate() {
            if lo > hi {
                return Err(OptimizerError::InvalidBounds {
                    index,
                    lower: lo,
                    upper: hi,
                });
            }
            if !(hi - lo).is_finite() || hi - lo <= 0.0 {
                return Err(OptimizerError::DegenerateBounds {
                    index,
                    lower: lo,
                    upper: hi,
                });
            }
        }
        Ok(Self { lower, upper })
    }

    /// Same scalar range broadcast to `dim` dimensions.
    pub fn uniform(dim: usize, lower: f64, upper: f64) -> Result<Self> {
        Self::new(Array1::from_elem(dim, lower), Array1::from_elem(dim, upper))
    }

    /// Bounds from `(lower, upper)` pairs, one per dimension.
    pub fn from_pairs(pairs: &[(f64, f64)]) -> Result<Self> {
        let lower = pairs.iter().map(|&(lo, _)| lo).collect();
        let upper = pairs.iter().map(|&(_, hi)| hi).collect();
        Self::new(lower, upper)
    }

    /// Number of dimensions.
    pub fn dim(&self) -> usize {
        self.lower.len()
    }

    /// Lower bounds.
    pub fn lower(&self) -> &Array1<f64> {
        &self.lower
    }

    /// Upper bounds.
    pub fn upper(&self) -> &Array1<f64> {
        &self.upper
    }

    /// `upper - lower` for every dimension.
    pub fn span(&self) -> Array1<f64> {
        &self.upper - &self.lower
    }

    /// Whether every component of `x` lies inside the box.
    pub fn contains(&self, x: &Array1<f64>) -> bool {
        Zip::from(x)
            .and(&self.lower)
            .and(&self.upper)
            .all(|&xi, &lo, &hi| xi >= lo && xi <= hi)
    }

    /// Clamps `x` into the box in place.
    pub fn clip(&self, x: &mut Array1<f64>) {
        Zip::from(x)
            .and(&self.lower)
            .and(&self.upper)
            .for_each(|xi, &lo, &hi| *xi = xi.clamp(lo, hi));
    }

    /// Clamped copy of `x`.
    pub fn clipped(&self, x: &Array1<f64>) -> Array1<f64> {
        let mut out = x.clone();
        self.clip(&mut out);
        out
    }

    /// Clamps a single component.
    pub fn clip_component(&self, j: usize, value: f64) -> f64 {
        value.clamp(self.lower[j], self.upper[j])
    }

    /// Uniform draw inside the box.
    pub fn sample_uniform<R: Rng + ?Sized>(&self, rng: &mut R) -> Array1<f64> {
        Zip::from(&self.lower)
            .and(&self.upper)
            .map_collect(|&lo, &hi| lo + rng.random::<f64>() * (hi - lo))
    }
}
