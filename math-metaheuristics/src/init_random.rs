use ndarray::Array2;
use rand::Rng;

use crate::bounds::Bounds;

/// `npop` rows drawn uniformly inside `bounds`, one individual per row.
pub(crate) fn init_random<R: Rng + ?Sized>(
    npop: usize,
    bounds: &Bounds,
    rng: &mut R,
) -> Array2<f64> {
    let n = bounds.dim();
    let (lower, upper) = (bounds.lower(), bounds.upper());
    let mut pop = Array2::<f64>::zeros((npop, n));
    for i in 0..npop {
        for j in 0..n {
            let u: f64 = rng.random::<f64>();
            pop[(i, j)] = lower[j] + u * (upper[j] - lower[j]);
        }
    }
    pop
}
