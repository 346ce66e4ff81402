use std::fmt;
use std::str::FromStr;

use ndarray::Array1;

use crate::OptimizationReport;
use crate::bit_decoding::BitDecoder;
use crate::bounds::{Bounds, BoundsPolicy};
use crate::differential_evolution::{DEConfigBuilder, DifferentialEvolution, Strategy};
use crate::error::{OptimizerError, Result};
use crate::genetic_algorithm::{Encoding, GAConfigBuilder, GeneticAlgorithm};
use crate::mutate_real::RealMutation;
use crate::particle_swarm::{PSOConfigBuilder, ParticleSwarm};
use crate::pso_topology::Topology;
use crate::pso_velocity::InertiaSchedule;
use crate::self_adaptive::SelfAdaptiveConfig;

/// Constriction-derived acceleration used by the constant-inertia swarms.
const PSO_CONSTRICTED_C: f64 = 1.49618;

/// A fully specified optimizer configuration, up to budget and seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    /// DE rand/1/bin, 50 individuals, F 0.5, CR 0.8
    DeRand1Bin,
    /// DE best/1/bin, 50 individuals, F 0.5, CR 0.8
    DeBest1Bin,
    /// jDE on rand/1/bin, starting at F 0.5, CR 0.9
    JdeRand1Bin,
    /// PSO, 40 particles, inertia 0.8 to 0.3, c1 = c2 = 2
    PsoLinearGlobal,
    /// PSO, 40 particles, inertia 0.7, constricted accelerations
    PsoConstGlobal,
    /// Ring PSO, 40 particles, inertia 0.6, constricted accelerations
    PsoConstRing,
    /// Real GA with Gaussian mutation
    GaRealGauss,
    /// Real GA with random-reset mutation
    GaRealReset,
    /// Bit GA, IEEE-754 words
    GaIeee754Bits,
    /// Bit GA, Q16.16 words
    GaFixedPointBits,
    /// Bit GA, BCD words
    GaBcdBits,
}

impl Variant {
    /// Every variant, in comparison order.
    pub const ALL: [Variant; 11] = [
        Variant::DeRand1Bin,
        Variant::DeBest1Bin,
        Variant::JdeRand1Bin,
        Variant::PsoLinearGlobal,
        Variant::PsoConstGlobal,
        Variant::PsoConstRing,
        Variant::GaRealGauss,
        Variant::GaRealReset,
        Variant::GaIeee754Bits,
        Variant::GaFixedPointBits,
        Variant::GaBcdBits,
    ];

    /// Snake-case identifier, also accepted by `FromStr`.
    pub fn name(&self) -> &'static str {
        match self {
            Variant::DeRand1Bin => "de_rand1bin",
            Variant::DeBest1Bin => "de_best1bin",
            Variant::JdeRand1Bin => "jde_rand1bin",
            Variant::PsoLinearGlobal => "pso_linear_global",
            Variant::PsoConstGlobal => "pso_const_global",
            Variant::PsoConstRing => "pso_const_ring",
            Variant::GaRealGauss => "ga_real_gauss",
            Variant::GaRealReset => "ga_real_reset",
            Variant::GaIeee754Bits => "ga_ieee754_bits",
            Variant::GaFixedPointBits => "ga_fixedpoint_bits",
            Variant::GaBcdBits => "ga_bcd_bits",
        }
    }

    /// Runs this configuration on `func` with the given budget.
    ///
    /// # Errors
    ///
    /// Returns `ZeroBudget` when `max_evaluations` is zero.
    pub fn run<F>(
        &self,
        func: &F,
        bounds: &Bounds,
        max_evaluations: usize,
        seed: Option<u64>,
    ) -> Result<OptimizationReport>
    where
        F: Fn(&Array1<f64>) -> f64,
    {
        match self {
            Variant::DeRand1Bin | Variant::DeBest1Bin | Variant::JdeRand1Bin => {
                let mut builder = DEConfigBuilder::new()
                    .popsize(50)
                    .max_evaluations(max_evaluations)
                    .mutation(0.5);
                builder = match self {
                    Variant::DeBest1Bin => builder.strategy(Strategy::Best1Bin).recombination(0.8),
                    Variant::JdeRand1Bin => builder
                        .strategy(Strategy::Rand1Bin)
                        .recombination(0.9)
                        .self_adaptive(SelfAdaptiveConfig::default()),
                    _ => builder.strategy(Strategy::Rand1Bin).recombination(0.8),
                };
                if let Some(s) = seed {
                    builder = builder.seed(s);
                }
                let mut de = DifferentialEvolution::new(func, bounds.clone());
                *de.config_mut() = builder.build()?;
                de.solve()
            }
            Variant::PsoLinearGlobal | Variant::PsoConstGlobal | Variant::PsoConstRing => {
                let mut builder = PSOConfigBuilder::new()
                    .swarm_size(40)
                    .max_evaluations(max_evaluations)
                    .bounds_policy(BoundsPolicy::Reject);
                builder = match self {
                    Variant::PsoConstGlobal => builder
                        .inertia(InertiaSchedule::Constant(0.7))
                        .acceleration(PSO_CONSTRICTED_C, PSO_CONSTRICTED_C)
                        .topology(Topology::Global),
                    Variant::PsoConstRing => builder
                        .inertia(InertiaSchedule::Constant(0.6))
                        .acceleration(PSO_CONSTRICTED_C, PSO_CONSTRICTED_C)
                        .topology(Topology::Ring),
                    _ => builder
                        .inertia(InertiaSchedule::Linear {
                            w_max: 0.8,
                            w_min: 0.3,
                        })
                        .acceleration(2.0, 2.0)
                        .topology(Topology::Global),
                };
                if let Some(s) = seed {
                    builder = builder.seed(s);
                }
                let mut pso = ParticleSwarm::new(func, bounds.clone());
                *pso.config_mut() = builder.build()?;
                pso.solve()
            }
            _ => {
                let encoding = match self {
                    Variant::GaRealReset => Encoding::Real {
                        mutation: RealMutation::RandomReset { p_mut: 0.1 },
                    },
                    Variant::GaIeee754Bits => Encoding::bits(BitDecoder::Ieee754),
                    Variant::GaFixedPointBits => Encoding::bits(BitDecoder::FixedPoint),
                    Variant::GaBcdBits => Encoding::bits(BitDecoder::Bcd),
                    _ => Encoding::Real {
                        mutation: RealMutation::Gaussian {
                            p_mut: 0.1,
                            sigma_frac: 0.05,
                        },
                    },
                };
                let mut builder = GAConfigBuilder::new()
                    .popsize(200)
                    .elite_frac(0.1)
                    .crossover_prob(1.0)
                    .max_evaluations(max_evaluations)
                    .encoding(encoding);
                if let Some(s) = seed {
                    builder = builder.seed(s);
                }
                let mut ga = GeneticAlgorithm::new(func, bounds.clone());
                *ga.config_mut() = builder.build()?;
                ga.solve()
            }
        }
    }
}

impl FromStr for Variant {
    type Err = OptimizerError;
    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.to_lowercase().replace('-', "_");
        Variant::ALL
            .iter()
            .copied()
            .find(|v| v.name() == wanted)
            .ok_or_else(|| OptimizerError::UnknownVariant(s.to_string()))
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
