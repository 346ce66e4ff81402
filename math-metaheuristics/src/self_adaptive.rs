//! jDE self-adaptation of per-individual F and CR.

use rand::Rng;

use crate::error::{Result, check_probability};

/// Smallest F drawn on resampling.
pub const F_LOWER: f64 = 0.1;
/// Width of the F resampling interval, so F is drawn from [0.1, 0.9].
pub const F_RANGE: f64 = 0.8;

/// Resampling probabilities for jDE control parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelfAdaptiveConfig {
    /// Probability of drawing a new F for an individual each generation
    pub tau1: f64,
    /// Probability of drawing a new CR for an individual each generation
    pub tau2: f64,
}

impl Default for SelfAdaptiveConfig {
    fn default() -> Self {
        Self {
            tau1: 0.1,
            tau2: 0.1,
        }
    }
}

impl SelfAdaptiveConfig {
    pub(crate) fn validate(&self) -> Result<()> {
        check_probability("tau1", self.tau1)?;
        check_probability("tau2", self.tau2)
    }
}

/// F and CR carried by each individual.
#[derive(Debug, Clone)]
pub(crate) struct ControlParameters {
    f: Vec<f64>,
    cr: Vec<f64>,
}

impl ControlParameters {
    pub(crate) fn new(npop: usize, f0: f64, cr0: f64) -> Self {
        Self {
            f: vec![f0; npop],
            cr: vec![cr0; npop],
        }
    }

    /// Possibly resamples individual `i`'s parameters, then returns them.
    pub(crate) fn refresh<R: Rng + ?Sized>(
        &mut self,
        i: usize,
        config: &SelfAdaptiveConfig,
        rng: &mut R,
    ) -> (f64, f64) {
        if rng.random::<f64>() < config.tau1 {
            self.f[i] = F_LOWER + F_RANGE * rng.random::<f64>();
        }
        if rng.random::<f64>() < config.tau2 {
            self.cr[i] = rng.random::<f64>();
        }
        (self.f[i], self.cr[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_parameters_persist_without_resampling() {
        let mut params = ControlParameters::new(3, 0.5, 0.9);
        let never = SelfAdaptiveConfig {
            tau1: 0.0,
            tau2: 0.0,
        };
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..10 {
            assert_eq!(params.refresh(1, &never, &mut rng), (0.5, 0.9));
        }
    }

    #[test]
    fn test_resampled_parameters_stay_in_range() {
        let mut params = ControlParameters::new(2, 0.5, 0.9);
        let always = SelfAdaptiveConfig {
            tau1: 1.0,
            tau2: 1.0,
        };
        let mut rng = StdRng::seed_from_u64(2);
        let mut seen_f = Vec::new();
        for _ in 0..200 {
            let (f, cr) = params.refresh(0, &always, &mut rng);
            assert!((F_LOWER..=F_LOWER + F_RANGE).contains(&f));
            assert!((0.0..=1.0).contains(&cr));
            seen_f.push(f);
        }
        // individual 1 was never touched
        let frozen = SelfAdaptiveConfig {
            tau1: 0.0,
            tau2: 0.0,
        };
        assert_eq!(params.refresh(1, &frozen, &mut rng), (0.5, 0.9));
        assert!(seen_f.iter().any(|&f| (f - 0.5).abs() > 1e-9));
    }

    #[test]
    fn test_validate() {
        assert!(SelfAdaptiveConfig::default().validate().is_ok());
        assert!(SelfAdaptiveConfig { tau1: -0.1, tau2: 0.1 }.validate().is_err());
    }
}
