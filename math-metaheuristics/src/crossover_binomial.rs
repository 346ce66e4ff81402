use ndarray::{Array1, ArrayView1, Zip};
use rand::Rng;

use crate::bounds::Bounds;

/// Binomial crossover of `target` with `mutant`, clipped to `bounds`.
///
/// Index `jrand` always comes from the mutant; every other index does with
/// probability `cr`.
pub(crate) fn binomial_crossover<R: Rng + ?Sized>(
    target: ArrayView1<'_, f64>,
    mutant: &Array1<f64>,
    cr: f64,
    bounds: &Bounds,
    rng: &mut R,
) -> Array1<f64> {
    let n = target.len();
    let jrand = rng.random_range(0..n);
    let mut trial = target.to_owned();
    Zip::indexed(&mut trial)
        .and(mutant)
        .for_each(|j, t, &m| {
            if j == jrand || rng.random::<f64>() < cr {
                *t = m;
            }
        });
    bounds.clip(&mut trial);
    trial
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array1;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_zero_cr_takes_exactly_one_mutant_component() {
        let bounds = Bounds::uniform(6, -10.0, 10.0).unwrap();
        let target = Array1::<f64>::zeros(6);
        let mutant = Array1::<f64>::ones(6);
        let mut rng = StdRng::seed_from_u64(5);

        for _ in 0..50 {
            let trial = binomial_crossover(target.view(), &mutant, 0.0, &bounds, &mut rng);
            let changed = trial.iter().filter(|&&v| v == 1.0).count();
            assert_eq!(changed, 1);
        }
    }

    #[test]
    fn test_full_cr_copies_mutant_and_clips() {
        let bounds = Bounds::uniform(3, -1.0, 1.0).unwrap();
        let target = Array1::<f64>::zeros(3);
        let mutant = ndarray::array![0.5, 3.0, -7.0];
        let mut rng = StdRng::seed_from_u64(9);

        let trial = binomial_crossover(target.view(), &mutant, 1.0, &bounds, &mut rng);
        assert_eq!(trial, ndarray::array![0.5, 1.0, -1.0]);
    }
}
