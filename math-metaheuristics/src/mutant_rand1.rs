use ndarray::{Array1, Array2, Zip};

/// DE/rand/1 donor: `x[r1] + f * (x[r2] - x[r3])`.
pub(crate) fn mutant_rand1(pop: &Array2<f64>, r: [usize; 3], f: f64) -> Array1<f64> {
    Zip::from(pop.row(r[0]))
        .and(pop.row(r[1]))
        .and(pop.row(r[2]))
        .map_collect(|&x1, &x2, &x3| x1 + f * (x2 - x3))
}
