use ndarray::{Array1, Array2, Zip};

/// DE/best/1 donor: `best + f * (x[r1] - x[r2])`.
pub(crate) fn mutant_best1(
    best: &Array1<f64>,
    pop: &Array2<f64>,
    r: [usize; 2],
    f: f64,
) -> Array1<f64> {
    Zip::from(best)
        .and(pop.row(r[0]))
        .and(pop.row(r[1]))
        .map_collect(|&b, &x1, &x2| b + f * (x1 - x2))
}
