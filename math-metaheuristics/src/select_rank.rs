use ndarray::Array1;
use rand::Rng;

/// Rank-proportional parent selection.
///
/// Members are sorted by ascending fitness and weighted `N` (best) down to
/// `1` (worst); a draw picks a member with probability proportional to its
/// weight. Equal fitness keeps index order.
#[derive(Debug, Clone)]
pub(crate) struct RankSelector {
    ranked: Vec<usize>,
    // cumulative weights in rank order
    cumulative: Vec<u64>,
}

impl RankSelector {
    pub(crate) fn new(fitness: &Array1<f64>) -> Self {
        let n = fitness.len();
        let mut ranked: Vec<usize> = (0..n).collect();
        ranked.sort_by(|&a, &b| fitness[a].total_cmp(&fitness[b]));

        let mut total = 0u64;
        let cumulative = (0..n)
            .map(|rank| {
                total += (n - rank) as u64;
                total
            })
            .collect();
        Self { ranked, cumulative }
    }

    /// Member indices, best first.
    pub(crate) fn ranked(&self) -> &[usize] {
        &self.ranked
    }

    /// Draws one member index.
    pub(crate) fn select<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        let total = self.cumulative.last().copied().unwrap_or(0);
        let ticket = rng.random_range(0..total);
        let rank = self.cumulative.partition_point(|&c| c <= ticket);
        self.ranked[rank]
    }
}
