//! Error types for the optimizers.
//!
//! Every error is a configuration error raised before the first objective
//! evaluation: bad bounds, undersized populations, out-of-range parameters or
//! an unrecognized selector name. Conditions reached while a run is in
//! progress (budget exhaustion, out-of-bounds candidates, non-finite values)
//! are values, not errors.

use thiserror::Error;

/// Errors that can occur while configuring an optimization run.
#[derive(Debug, Error)]
pub enum OptimizerError {
    /// Lower and upper bounds have different lengths.
    #[error("bounds mismatch: lower has {lower_len} elements, upper has {upper_len}")]
    BoundsMismatch {
        /// Length of the lower bounds array
        lower_len: usize,
        /// Length of the upper bounds array
        upper_len: usize,
    },

    /// A lower bound exceeds its corresponding upper bound.
    #[error("invalid bounds at index {index}: lower ({lower}) > upper ({upper})")]
    InvalidBounds {
        /// Index of the invalid bound pair
        index: usize,
        /// The lower bound value
        lower: f64,
        /// The upper bound value
        upper: f64,
    },

    /// A dimension has a zero-width (or non-finite) range.
    #[error("degenerate bounds at index {index}: [{lower}, {upper}] has no usable width")]
    DegenerateBounds {
        /// Index of the degenerate bound pair
        index: usize,
        /// The lower bound value
        lower: f64,
        /// The upper bound value
        upper: f64,
    },

    /// No dimensions were given.
    #[error("bounds must cover at least one dimension")]
    EmptyBounds,

    /// Population size is below what the operators need.
    #[error("population size ({pop_size}) must be >= {min}")]
    PopulationTooSmall {
        /// The invalid population size
        pop_size: usize,
        /// Smallest size accepted by the algorithm
        min: usize,
    },

    /// Mutation factor is out of valid range [0, 2].
    #[error("invalid mutation factor: {factor} (must be in [0, 2])")]
    InvalidMutationFactor {
        /// The invalid mutation factor
        factor: f64,
    },

    /// A probability parameter is outside [0, 1].
    #[error("invalid probability for {name}: {value} (must be in [0, 1])")]
    InvalidProbability {
        /// Parameter name
        name: &'static str,
        /// The invalid value
        value: f64,
    },

    /// A numeric parameter is outside its admissible range.
    #[error("invalid value for {name}: {value}")]
    InvalidParameter {
        /// Parameter name
        name: &'static str,
        /// The invalid value
        value: f64,
    },

    /// The evaluation budget is zero.
    #[error("evaluation budget must be at least 1")]
    ZeroBudget,

    /// Unrecognized DE strategy name.
    #[error("unknown DE strategy: {0}")]
    UnknownStrategy(String),

    /// Unrecognized PSO topology name.
    #[error("unknown PSO topology: {0}")]
    UnknownTopology(String),

    /// Unrecognized inertia schedule name.
    #[error("unknown inertia schedule: {0}")]
    UnknownInertiaSchedule(String),

    /// Unrecognized bounds policy name.
    #[error("unknown bounds policy: {0}")]
    UnknownBoundsPolicy(String),

    /// Unrecognized GA mutation operator name.
    #[error("unknown GA mutation: {0}")]
    UnknownMutation(String),

    /// Unrecognized bit decoder name.
    #[error("unknown bit decoder: {0}")]
    UnknownDecoder(String),

    /// Unrecognized preset variant name.
    #[error("unknown variant: {0}")]
    UnknownVariant(String),
}

/// A specialized `Result` type for optimizer configuration.
pub type Result<T> = std::result::Result<T, OptimizerError>;

impl OptimizerError {
    /// Returns `true` if this is a bounds-related error.
    pub fn is_bounds_error(&self) -> bool {
        matches!(
            self,
            OptimizerError::BoundsMismatch { .. }
                | OptimizerError::InvalidBounds { .. }
                | OptimizerError::DegenerateBounds { .. }
                | OptimizerError::EmptyBounds
        )
    }

    /// Returns `true` if this is a numeric configuration error.
    ///
    /// This includes population size, mutation factor, probabilities,
    /// other parameters and the budget.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            OptimizerError::PopulationTooSmall { .. }
                | OptimizerError::InvalidMutationFactor { .. }
                | OptimizerError::InvalidProbability { .. }
                | OptimizerError::InvalidParameter { .. }
                | OptimizerError::ZeroBudget
        )
    }

    /// Returns `true` if a selector name was not recognized.
    pub fn is_unknown_name(&self) -> bool {
        matches!(
            self,
            OptimizerError::UnknownStrategy(_)
                | OptimizerError::UnknownTopology(_)
                | OptimizerError::UnknownInertiaSchedule(_)
                | OptimizerError::UnknownBoundsPolicy(_)
                | OptimizerError::UnknownMutation(_)
                | OptimizerError::UnknownDecoder(_)
                | OptimizerError::UnknownVariant(_)
        )
    }
}

/// Checks that `value` lies in [0, 1].
pub(crate) fn check_probability(name: &'static str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(OptimizerError::InvalidProbability { name, value })
    }
}

/// Checks that the budget allows at least one evaluation.
pub(crate) fn check_budget(max_evaluations: usize) -> Result<()> {
    if max_evaluations == 0 {
        Err(OptimizerError::ZeroBudget)
    } else {
        Ok(())
    }
}
