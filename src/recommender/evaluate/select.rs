use std::cmp::Ordering;
use std::fmt::{self, Debug, Display};

use serde::Serialize;
use tracing::warn;

use crate::recommender::evaluate::scoring::ScoredCandidate;
use crate::recommender::link::ItemId;
use crate::utils::normalizer::WeightNum;

/// Result ordering: score descending, then item id ascending
#[inline]
pub fn rank_cmp<N: WeightNum>(a: &ScoredCandidate<N>, b: &ScoredCandidate<N>) -> Ordering {
    b.score
        .partial_cmp(&a.score)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.item_id.cmp(&b.item_id))
}

#[inline]
fn ranks_before<N: WeightNum>(a: &ScoredCandidate<N>, b: &ScoredCandidate<N>) -> bool {
    rank_cmp(a, b) == Ordering::Less
}

/// Selected candidates, best first
#[derive(Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Recommendations<N = f32> {
    pub list: Vec<ScoredCandidate<N>>,
}

impl<N> Recommendations<N>
where
    N: WeightNum,
{
    pub fn new(list: Vec<ScoredCandidate<N>>) -> Self {
        Self { list }
    }

    /// Item ids in result order
    pub fn ids(&self) -> Vec<ItemId> {
        self.list.iter().map(|c| c.item_id).collect()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, ScoredCandidate<N>> {
        self.list.iter()
    }

    /// Sort results by descending score, ties by ascending id
    pub fn sort_by_rank(&mut self) -> &mut Self {
        self.list.retain(|c| !c.score.is_nan());
        self.list.sort_by(rank_cmp);
        self
    }
}

impl<N> IntoIterator for Recommendations<N> {
    type Item = ScoredCandidate<N>;
    type IntoIter = std::vec::IntoIter<ScoredCandidate<N>>;

    fn into_iter(self) -> Self::IntoIter {
        self.list.into_iter()
    }
}

impl<N> Debug for Recommendations<N>
where
    N: WeightNum,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            writeln!(f, "Recommendations [")?;
            for c in &self.list {
                writeln!(f, "    {}: {:.6}", c.item_id, c.score.into_f64())?;
            }
            write!(f, "]")
        } else {
            f.debug_list().entries(self.list.iter().map(|c| (c.item_id, c.score))).finish()
        }
    }
}

impl<N> Display for Recommendations<N>
where
    N: WeightNum,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (rank, c) in self.list.iter().enumerate() {
            writeln!(f, "{:>3}. item {} similarity {:.6}", rank + 1, c.item_id, c.score.into_f64())?;
        }
        Ok(())
    }
}

/// Bounded top-K selector
///
/// Keeps at most `k` entries in rank order. A new candidate is inserted at
/// the back and bubbled left while it outranks its neighbour; once full, it
/// only enters by outranking the current last entry, which it replaces.
#[derive(Debug, Clone)]
pub struct TopK<N = f32> {
    k: usize,
    list: Vec<ScoredCandidate<N>>,
}

impl<N> TopK<N>
where
    N: WeightNum,
{
    pub fn new(k: usize) -> Self {
        Self {
            k,
            list: Vec::with_capacity(k.min(1024)),
        }
    }

    /// Current lowest kept entry, if full
    #[inline]
    pub fn floor(&self) -> Option<&ScoredCandidate<N>> {
        if self.list.len() < self.k {
            None
        } else {
            self.list.last()
        }
    }

    pub fn push(&mut self, candidate: ScoredCandidate<N>) {
        if self.k == 0 || candidate.score.is_nan() {
            return;
        }
        if self.list.len() < self.k {
            self.list.push(candidate);
        } else {
            let outranks_last = self.list.last().map_or(false, |last| ranks_before(&candidate, last));
            if !outranks_last {
                return;
            }
            if let Some(last) = self.list.last_mut() {
                *last = candidate;
            }
        }
        // insertion step
        let mut idx = self.list.len() - 1;
        while idx > 0 && ranks_before(&self.list[idx], &self.list[idx - 1]) {
            self.list.swap(idx, idx - 1);
            idx -= 1;
        }
    }

    pub fn finish(self) -> Recommendations<N> {
        Recommendations::new(self.list)
    }
}

/// Threshold selector: keeps every candidate with `score >= threshold`
#[derive(Debug, Clone)]
pub struct Threshold<N = f32> {
    threshold: N,
    list: Vec<ScoredCandidate<N>>,
}

impl<N> Threshold<N>
where
    N: WeightNum,
{
    pub fn new(threshold: N) -> Self {
        Self {
            threshold,
            list: Vec::new(),
        }
    }

    #[inline]
    pub fn push(&mut self, candidate: ScoredCandidate<N>) {
        if candidate.score >= self.threshold {
            self.list.push(candidate);
        }
    }

    /// Accepted candidates, sorted by rank
    pub fn finish(self) -> Recommendations<N> {
        let mut result = Recommendations::new(self.list);
        result.sort_by_rank();
        result
    }
}

/// Result selection policy, one per deployment
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SelectionPolicy<N = f32> {
    /// Best `k` candidates, ordered
    TopK(usize),
    /// All candidates scoring at least the threshold (inclusive)
    Threshold(N),
}

impl<N> SelectionPolicy<N>
where
    N: WeightNum,
{
    pub fn select<I>(&self, scored: I) -> Recommendations<N>
    where
        I: IntoIterator<Item = ScoredCandidate<N>>,
    {
        match *self {
            SelectionPolicy::TopK(k) => {
                if k == 0 {
                    warn!("top-k selection with k = 0 always yields nothing");
                }
                let mut selector = TopK::new(k);
                scored.into_iter().for_each(|c| selector.push(c));
                selector.finish()
            }
            SelectionPolicy::Threshold(threshold) => {
                let mut selector = Threshold::new(threshold);
                scored.into_iter().for_each(|c| selector.push(c));
                selector.finish()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scored(pairs: &[(u64, f32)]) -> Vec<ScoredCandidate<f32>> {
        pairs.iter().map(|&(id, s)| ScoredCandidate::new(id, s)).collect()
    }

    fn sample() -> Vec<ScoredCandidate<f32>> {
        scored(&[(7, 0.0), (2, 0.816496), (6, 0.204124), (4, 0.612372), (9, 0.5)])
    }

    #[test]
    fn top_k_keeps_best_in_order() {
        let result = SelectionPolicy::TopK(3).select(sample());
        assert_eq!(result.ids(), vec![2, 4, 9]);
    }

    #[test]
    fn top_k_shorter_input_keeps_everything() {
        let result = SelectionPolicy::TopK(10).select(sample());
        assert_eq!(result.ids(), vec![2, 4, 9, 6, 7]);
    }

    #[test]
    fn top_k_zero_is_empty() {
        let result = SelectionPolicy::TopK(0).select(sample());
        assert!(result.is_empty());
    }

    #[test]
    fn top_k_ties_break_by_id_regardless_of_arrival() {
        let forward = SelectionPolicy::TopK(2).select(scored(&[(5, 0.5), (3, 0.5), (8, 0.5)]));
        let backward = SelectionPolicy::TopK(2).select(scored(&[(8, 0.5), (3, 0.5), (5, 0.5)]));
        assert_eq!(forward.ids(), vec![3, 5]);
        assert_eq!(backward.ids(), vec![3, 5]);
    }

    #[test]
    fn top_k_unbounded_k_keeps_everything() {
        let result = SelectionPolicy::TopK(usize::MAX).select(sample());
        assert_eq!(result.ids(), vec![2, 4, 9, 6, 7]);
    }

    #[test]
    fn top_k_full_rejects_lower_scores() {
        let mut top = TopK::new(2);
        top.push(ScoredCandidate::new(1, 0.9f32));
        top.push(ScoredCandidate::new(2, 0.8));
        assert_eq!(top.floor().map(|c| c.item_id), Some(2));
        top.push(ScoredCandidate::new(3, 0.1));
        top.push(ScoredCandidate::new(4, 0.95));
        assert_eq!(top.finish().ids(), vec![4, 1]);
    }

    #[test]
    fn threshold_is_inclusive_and_sorted() {
        let result = SelectionPolicy::Threshold(0.5).select(sample());
        assert_eq!(result.ids(), vec![2, 4, 9]);
    }

    #[test]
    fn threshold_above_everything_is_empty() {
        let result = SelectionPolicy::Threshold(0.9).select(sample());
        assert!(result.is_empty());
    }

    #[test]
    fn results_never_grow_with_stricter_settings() {
        let mut last = usize::MAX;
        for step in 0..=10 {
            let n = SelectionPolicy::Threshold(step as f32 / 10.0).select(sample()).len();
            assert!(n <= last);
            last = n;
        }
        let mut last = usize::MAX;
        for k in (0..=6).rev() {
            let n = SelectionPolicy::TopK(k).select(sample()).len();
            assert!(n <= last);
            last = n;
        }
    }

    #[test]
    fn display_lists_ranks() {
        let result = SelectionPolicy::TopK(1).select(sample());
        assert_eq!(result.to_string(), "  1. item 2 similarity 0.816496\n");
    }
}
