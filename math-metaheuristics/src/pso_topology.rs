use std::fmt;
use std::str::FromStr;

use ndarray::{Array1, Array2};

use crate::error::{OptimizerError, Result};
use crate::population::Population;

/// Which particles inform a particle's social term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Topology {
    /// Every particle follows the swarm's global best.
    #[default]
    Global,
    /// Each particle follows the best personal best among itself and its
    /// two ring neighbours.
    Ring,
}

impl FromStr for Topology {
    type Err = OptimizerError;
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "global" | "gbest" => Ok(Topology::Global),
            "ring" | "lbest" => Ok(Topology::Ring),
            _ => Err(OptimizerError::UnknownTopology(s.to_string())),
        }
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Topology::Global => f.write_str("global"),
            Topology::Ring => f.write_str("ring"),
        }
    }
}

/// Ring neighbourhood of particle `i` in a swarm of `n`: left, self, right.
///
/// ```rust
/// use math_metaheuristics::ring_neighbors;
/// assert_eq!(ring_neighbors(0, 5), [4, 0, 1]);
/// ```
pub fn ring_neighbors(i: usize, n: usize) -> [usize; 3] {
    [(i + n - 1) % n, i, (i + 1) % n]
}

/// Informant position of every particle, taken from the personal bests as
/// they stood at the start of the sweep.
pub(crate) fn informant_positions(
    topology: Topology,
    pbest: &Population,
    gbest: &Array1<f64>,
) -> Array2<f64> {
    let n = pbest.len();
    let mut out = Array2::<f64>::zeros((n, pbest.dim()));
    for (i, mut row) in out.rows_mut().into_iter().enumerate() {
        match topology {
            Topology::Global => row.assign(gbest),
            Topology::Ring => row.assign(&pbest.row(ring_informant(i, pbest.fitness()))),
        }
    }
    out
}

/// Index of the best personal best around `i`; left wins ties over self,
/// self over right.
fn ring_informant(i: usize, pbest_fitness: &Array1<f64>) -> usize {
    let n = pbest_fitness.len();
    let [left, me, right] = ring_neighbors(i, n);
    let mut best = left;
    for j in [me, right] {
        if pbest_fitness[j] < pbest_fitness[best] {
            best = j;
        }
    }
    best
}
