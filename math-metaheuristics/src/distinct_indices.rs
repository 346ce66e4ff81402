use rand::Rng;
use rand::seq::index;

/// `count` distinct indices from `0..pool_size`, none equal to `exclude`.
///
/// Samples from the `pool_size - 1` remaining slots and shifts indices at or
/// above `exclude` up by one, so no rejection loop is needed.
pub(crate) fn distinct_indices<R: Rng + ?Sized>(
    exclude: usize,
    count: usize,
    pool_size: usize,
    rng: &mut R,
) -> Vec<usize> {
    debug_assert!(exclude < pool_size);
    debug_assert!(count <= pool_size.saturating_sub(1));
    index::sample(rng, pool_size - 1, count)
        .into_iter()
        .map(|idx| if idx >= exclude { idx + 1 } else { idx })
        .collect()
}
