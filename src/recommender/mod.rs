pub mod candidate;
pub mod evaluate;
pub mod link;
pub mod profile;
pub mod weighting;

use std::marker::PhantomData;

use tracing::debug;

use crate::config::RecommendConfig;
use crate::error::RecommendResult;
use crate::recommender::candidate::{CandidateVectorBuilder, CandidateVectorSet};
use crate::recommender::evaluate::scoring::score_candidates;
use crate::recommender::evaluate::select::{Recommendations, SelectionPolicy};
use crate::recommender::link::TagLink;
use crate::recommender::profile::{ProfileVector, ProfileVectorBuilder};
use crate::recommender::weighting::{TagWeighting, WeightingAlgorithm};
use crate::utils::normalizer::WeightNum;

/// Item-based recommendation engine
///
/// One call runs the whole pipeline: build the profile vector, build every
/// candidate vector, score candidates against the profile, select.
/// Nothing is kept between calls.
///
/// `Recommender<N, W>` has the following generic parameters:
/// - `N`: weight type (`f32` or `f64`)
/// - `W`: candidate weighting strategy (e.g. `WeightingAlgorithm`, `Popularity`, a closure)
#[derive(Debug, Clone)]
pub struct Recommender<N = f32, W = WeightingAlgorithm>
where
    N: WeightNum,
    W: TagWeighting<N>,
{
    pub weighting: W,
    pub policy: SelectionPolicy<N>,
    /// Skip candidates the profile was built from
    pub exclude_liked: bool,
    _marker: PhantomData<N>,
}

impl Recommender<f32, WeightingAlgorithm> {
    /// Engine described by a loaded configuration
    pub fn from_config(config: &RecommendConfig) -> RecommendResult<Self> {
        Ok(Self::new(config.weighting, config.selection_policy()?).with_exclude_liked(config.exclude_liked))
    }
}

impl<N, W> Recommender<N, W>
where
    N: WeightNum,
    W: TagWeighting<N>,
{
    pub fn new(weighting: W, policy: SelectionPolicy<N>) -> Self {
        Self {
            weighting,
            policy,
            exclude_liked: true,
            _marker: PhantomData,
        }
    }

    pub fn with_exclude_liked(mut self, exclude_liked: bool) -> Self {
        self.exclude_liked = exclude_liked;
        self
    }

    /// Recommend from the two tag-link sources
    ///
    /// Any read error aborts the whole call and is returned as is.
    pub fn recommend<P, C, E>(&self, profile_links: P, candidate_links: C) -> Result<Recommendations<N>, E>
    where
        P: IntoIterator<Item = Result<TagLink, E>>,
        C: IntoIterator<Item = Result<TagLink, E>>,
    {
        let profile = ProfileVectorBuilder::from_links(profile_links)?;
        let candidates = CandidateVectorBuilder::from_links(candidate_links, &self.weighting)?;
        Ok(self.recommend_vectors(&profile, &candidates))
    }

    /// Score and select over already-built vectors
    pub fn recommend_vectors(&self, profile: &ProfileVector<N>, candidates: &CandidateVectorSet<N>) -> Recommendations<N> {
        if profile.is_empty() {
            debug!(candidates = candidates.len(), "empty profile, nothing to recommend");
            return Recommendations::new(Vec::new());
        }
        let exclude = self.exclude_liked.then_some(&profile.liked_items);
        let scored = score_candidates(&profile.vector, candidates, exclude);
        let scored_num = scored.len();
        let result = self.policy.select(scored);
        debug!(
            candidates = candidates.len(),
            scored = scored_num,
            selected = result.len(),
            "selected recommendations"
        );
        result
    }
}
