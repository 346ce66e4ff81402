//! Best-so-far convergence history of a single run.

/// One point of the convergence curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistorySample {
    /// Objective evaluations consumed when the sample was taken
    pub evaluations: usize,
    /// Best fitness seen up to that point
    pub best: f64,
}

/// Append-only sequence of `(evaluations, best_so_far)` samples.
///
/// Evaluation counts are strictly increasing and `best` never increases.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunHistory {
    samples: Vec<HistorySample>,
}

impl RunHistory {
    /// Empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty history with room for `capacity` samples.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            samples: Vec::with_capacity(capacity),
        }
    }

    /// Records the best value observed after `evaluations` evaluations.
    ///
    /// A sample for an evaluation count that is already the last one only
    /// lowers that sample; counts lower than the last one are ignored. The
    /// stored value is clamped to the previous best so the curve stays
    /// non-increasing.
    pub fn record(&mut self, evaluations: usize, best: f64) {
        match self.samples.last_mut() {
            Some(last) if evaluations < last.evaluations => {}
            Some(last) if evaluations == last.evaluations => {
                last.best = last.best.min(best);
            }
            Some(last) => {
                let best = last.best.min(best);
                self.samples.push(HistorySample { evaluations, best });
            }
            None => self.samples.push(HistorySample { evaluations, best }),
        }
    }

    /// All samples in recording order.
    pub fn samples(&self) -> &[HistorySample] {
        &self.samples
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Most recent sample.
    pub fn last(&self) -> Option<&HistorySample> {
        self.samples.last()
    }

    /// Final best-so-far value.
    pub fn best(&self) -> Option<f64> {
        self.last().map(|s| s.best)
    }

    /// Iterator over the samples.
    pub fn iter(&self) -> std::slice::Iter<'_, HistorySample> {
        self.samples.iter()
    }

    /// Best-so-far value after `evaluations` evaluations, if sampled by then.
    pub fn best_at(&self, evaluations: usize) -> Option<f64> {
        let idx = self
            .samples
            .partition_point(|s| s.evaluations <= evaluations);
        idx.checked_sub(1).map(|i| self.samples[i].best)
    }
}

impl<'a> IntoIterator for &'a RunHistory {
    type Item = &'a HistorySample;
    type IntoIter = std::slice::Iter<'a, HistorySample>;
    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}
