//! Velocity initialization, update and inertia schedules for PSO.

use std::fmt;
use std::str::FromStr;

use ndarray::{Array1, Array2, ArrayView1, ArrayViewMut1, Zip};
use rand::Rng;

use crate::bounds::Bounds;
use crate::error::{OptimizerError, Result};

/// Velocity limit as a fraction of each dimension's span.
pub const VMAX_FRACTION: f64 = 0.2;

/// Inertia weight as a function of budget consumption.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InertiaSchedule {
    /// `w_max - (w_max - w_min) * used / budget`
    Linear {
        /// Weight at the start of the run
        w_max: f64,
        /// Weight once the budget is spent
        w_min: f64,
    },
    /// Fixed weight.
    Constant(f64),
}

impl Default for InertiaSchedule {
    fn default() -> Self {
        InertiaSchedule::Linear {
            w_max: 0.8,
            w_min: 0.3,
        }
    }
}

impl InertiaSchedule {
    /// Inertia for a run that has used `fraction_used` of its budget.
    pub fn weight(&self, fraction_used: f64) -> f64 {
        match *self {
            InertiaSchedule::Linear { w_max, w_min } => {
                w_max - (w_max - w_min) * fraction_used.clamp(0.0, 1.0)
            }
            InertiaSchedule::Constant(w) => w,
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        let weights = match *self {
            InertiaSchedule::Linear { w_max, w_min } => [w_max, w_min],
            InertiaSchedule::Constant(w) => [w, w],
        };
        for w in weights {
            if !w.is_finite() || w < 0.0 {
                return Err(OptimizerError::InvalidParameter {
                    name: "inertia",
                    value: w,
                });
            }
        }
        Ok(())
    }
}

impl FromStr for InertiaSchedule {
    type Err = OptimizerError;
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "linear" | "lin" => Ok(InertiaSchedule::default()),
            "const" | "constant" => Ok(InertiaSchedule::Constant(0.7)),
            _ => Err(OptimizerError::UnknownInertiaSchedule(s.to_string())),
        }
    }
}

impl fmt::Display for InertiaSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InertiaSchedule::Linear { w_max, w_min } => write!(f, "linear({w_max}->{w_min})"),
            InertiaSchedule::Constant(w) => write!(f, "const({w})"),
        }
    }
}

/// Per-dimension velocity limit.
pub(crate) fn velocity_limit(bounds: &Bounds) -> Array1<f64> {
    bounds.span() * VMAX_FRACTION
}

/// Velocities uniform in `[-vmax, vmax]`, one row per particle.
pub(crate) fn init_velocities<R: Rng + ?Sized>(
    npop: usize,
    vmax: &Array1<f64>,
    rng: &mut R,
) -> Array2<f64> {
    let mut v = Array2::<f64>::zeros((npop, vmax.len()));
    for mut row in v.rows_mut() {
        Zip::from(&mut row)
            .and(vmax)
            .for_each(|vi, &vm| *vi = rng.random_range(-vm..=vm));
    }
    v
}

/// Coefficients of the velocity rule.
#[derive(Debug, Clone, Copy)]
pub(crate) struct VelocityCoefficients {
    pub w: f64,
    pub c1: f64,
    pub c2: f64,
}

/// `v = w·v + c1·r1·(pbest − x) + c2·r2·(informant − x)`, clamped to ±vmax,
/// with fresh uniform `r1`, `r2` per component.
pub(crate) fn update_velocity<R: Rng + ?Sized>(
    v: ArrayViewMut1<'_, f64>,
    x: ArrayView1<'_, f64>,
    pbest: ArrayView1<'_, f64>,
    informant: ArrayView1<'_, f64>,
    coeffs: VelocityCoefficients,
    vmax: &Array1<f64>,
    rng: &mut R,
) {
    let VelocityCoefficients { w, c1, c2 } = coeffs;
    Zip::from(v)
        .and(x)
        .and(pbest)
        .and(informant)
        .and(vmax)
        .for_each(|vi, &xi, &pi, &gi, &vm| {
            let r1: f64 = rng.random();
            let r2: f64 = rng.random();
            let next = w * *vi + c1 * r1 * (pi - xi) + c2 * r2 * (gi - xi);
            *vi = next.clamp(-vm, vm);
        });
}

/// Clamps out-of-range position components and zeroes the matching
/// velocity components.
pub(crate) fn confine(positions: &mut Array2<f64>, velocities: &mut Array2<f64>, bounds: &Bounds) {
    Zip::from(positions.rows_mut())
        .and(velocities.rows_mut())
        .for_each(|x, v| {
            Zip::from(x)
                .and(v)
                .and(bounds.lower())
                .and(bounds.upper())
                .for_each(|xi, vi, &lo, &hi| {
                    if *xi < lo {
                        *xi = lo;
                        *vi = 0.0;
                    } else if *xi > hi {
                        *xi = hi;
                        *vi = 0.0;
                    }
                });
        });
}
