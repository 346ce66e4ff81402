use rand::Rng;

/// One-point crossover over whole genes.
///
/// With probability `crossover_prob` a cut is drawn in `1..len` and the two
/// children swap tails; otherwise (or for single-gene genomes) the children
/// are copies of the parents.
pub(crate) fn one_point_crossover<T: Clone, R: Rng + ?Sized>(
    a: &[T],
    b: &[T],
    crossover_prob: f64,
    rng: &mut R,
) -> (Vec<T>, Vec<T>) {
    let len = a.len();
    if len < 2 || rng.random::<f64>() >= crossover_prob {
        return (a.to_vec(), b.to_vec());
    }
    let cut = rng.random_range(1..len);
    let child1 = a[..cut].iter().chain(&b[cut..]).cloned().collect();
    let child2 = b[..cut].iter().chain(&a[cut..]).cloned().collect();
    (child1, child2)
}
