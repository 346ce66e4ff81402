//! Mutation operators for the real-valued genome.

use std::fmt;
use std::str::FromStr;

use rand::Rng;

use crate::bounds::Bounds;
use crate::error::{OptimizerError, Result, check_probability};

/// Per-dimension mutation of a real genome.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RealMutation {
    /// Add `N(0, (sigma_frac·span)²)` noise with probability `p_mut`, then clip.
    Gaussian {
        /// Per-dimension mutation probability
        p_mut: f64,
        /// Noise scale relative to the dimension's span
        sigma_frac: f64,
    },
    /// Redraw uniformly in bounds with probability `p_mut`.
    RandomReset {
        /// Per-dimension mutation probability
        p_mut: f64,
    },
}

impl Default for RealMutation {
    fn default() -> Self {
        RealMutation::Gaussian {
            p_mut: 0.1,
            sigma_frac: 0.05,
        }
    }
}

impl RealMutation {
    pub(crate) fn validate(&self) -> Result<()> {
        match *self {
            RealMutation::Gaussian { p_mut, sigma_frac } => {
                check_probability("p_mut", p_mut)?;
                if !sigma_frac.is_finite() || sigma_frac < 0.0 {
                    return Err(OptimizerError::InvalidParameter {
                        name: "sigma_frac",
                        value: sigma_frac,
                    });
                }
                Ok(())
            }
            RealMutation::RandomReset { p_mut } => check_probability("p_mut", p_mut),
        }
    }
}

impl FromStr for RealMutation {
    type Err = OptimizerError;
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "gauss" | "gaussian" => Ok(RealMutation::default()),
            "reset" | "random_reset" | "random-reset" => {
                Ok(RealMutation::RandomReset { p_mut: 0.1 })
            }
            _ => Err(OptimizerError::UnknownMutation(s.to_string())),
        }
    }
}

impl fmt::Display for RealMutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RealMutation::Gaussian { .. } => f.write_str("gauss"),
            RealMutation::RandomReset { .. } => f.write_str("reset"),
        }
    }
}

/// Standard normal draw (Box-Muller).
pub(crate) fn standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let u1: f64 = rng.random::<f64>().max(1e-15);
    let u2: f64 = rng.random::<f64>();
    (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
}

/// Mutates `genome` in place; the result is always inside `bounds`.
pub(crate) fn mutate_real<R: Rng + ?Sized>(
    genome: &mut [f64],
    mutation: &RealMutation,
    bounds: &Bounds,
    rng: &mut R,
) {
    for (j, gene) in genome.iter_mut().enumerate() {
        let lo = bounds.lower()[j];
        let hi = bounds.upper()[j];
        match *mutation {
            RealMutation::Gaussian { p_mut, sigma_frac } => {
                if rng.random::<f64>() < p_mut {
                    let sigma = sigma_frac * (hi - lo);
                    *gene = (*gene + sigma * standard_normal(rng)).clamp(lo, hi);
                }
            }
            RealMutation::RandomReset { p_mut } => {
                if rng.random::<f64>() < p_mut {
                    *gene = lo + rng.random::<f64>() * (hi - lo);
                }
            }
        }
    }
}
