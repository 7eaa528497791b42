use indexmap::IndexSet;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::recommender::candidate::CandidateVectorSet;
use crate::recommender::link::ItemId;
use crate::utils::math::vector::SparseVector;
use crate::utils::normalizer::WeightNum;

/// A candidate item and its match score against the profile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate<N = f32> {
    #[serde(rename = "id")]
    pub item_id: ItemId,
    pub score: N,
}

impl<N> ScoredCandidate<N> {
    #[inline]
    pub fn new(item_id: ItemId, score: N) -> Self {
        Self { item_id, score }
    }
}

/// Cosine similarity of two unit vectors
/// cosθ = A・B when |A| = |B| = 1
///
/// Tags missing on either side contribute nothing. With the non-negative
/// weights built here the result lies in [0, 1].
#[inline]
pub fn similarity<N>(profile: &SparseVector<N>, candidate: &SparseVector<N>) -> N
where
    N: WeightNum,
{
    profile.dot::<N>(candidate)
}

/// Score every candidate against the profile
///
/// Scoring is spread over the rayon pool; the output keeps the candidate
/// set's order. Items listed in `exclude` are skipped.
pub fn score_candidates<N>(
    profile: &SparseVector<N>,
    candidates: &CandidateVectorSet<N>,
    exclude: Option<&IndexSet<ItemId>>,
) -> Vec<ScoredCandidate<N>>
where
    N: WeightNum,
{
    candidates
        .par_iter()
        .filter(|(item_id, _)| exclude.map_or(true, |ex| !ex.contains(*item_id)))
        .map(|(&item_id, vector)| ScoredCandidate::new(item_id, similarity(profile, vector)))
        .collect()
}
