use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::recommender::link::TagId;
use crate::utils::normalizer::WeightNum;

/// Tag popularity over the candidate pool
///
/// For every tag, the number of distinct candidate items carrying it, and
/// the number of distinct candidate items overall.
#[derive(Debug, Clone, Default)]
pub struct TagPopularity {
    tag_items: IndexMap<TagId, usize>,
    item_count: usize,
}

impl TagPopularity {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one distinct item together with its distinct tags
    pub fn add_item<I>(&mut self, tags: I)
    where
        I: IntoIterator<Item = TagId>,
    {
        self.item_count += 1;
        for tag in tags {
            *self.tag_items.entry(tag).or_insert(0) += 1;
        }
    }

    /// Number of distinct items carrying `tag`
    #[inline]
    pub fn items_with(&self, tag: TagId) -> usize {
        self.tag_items.get(&tag).copied().unwrap_or(0)
    }

    /// Number of distinct items observed
    #[inline]
    pub fn item_count(&self) -> usize {
        self.item_count
    }

    #[inline]
    pub fn tag_count(&self) -> usize {
        self.tag_items.len()
    }

    /// Share of items carrying `tag`, in [0, 1]
    #[inline]
    pub fn share<N: WeightNum>(&self, tag: TagId) -> N {
        N::from_ratio(self.items_with(tag), self.item_count)
    }
}

/// Weighting strategy for candidate vectors
///
/// By implementing this trait, you can plug different weighting formulas into
/// the candidate builder without touching the rest of the pipeline. Any
/// `Fn(&TagPopularity, TagId) -> N` closure is a strategy as well.
pub trait TagWeighting<N>: Send + Sync
where
    N: WeightNum,
{
    /// Raw (pre-normalization) weight of `tag` on an item carrying it
    fn weight(&self, popularity: &TagPopularity, tag: TagId) -> N;
}

/// Every tag on an item weighs 1
#[derive(Debug, Clone, Copy, Default)]
pub struct Unweighted;

impl<N: WeightNum> TagWeighting<N> for Unweighted {
    #[inline]
    fn weight(&self, _popularity: &TagPopularity, _tag: TagId) -> N {
        N::one()
    }
}

/// A tag weighs the share of candidate items carrying it
///
/// Common tags weigh more than rare ones; this is a popularity weight, not IDF.
#[derive(Debug, Clone, Copy, Default)]
pub struct Popularity;

impl<N: WeightNum> TagWeighting<N> for Popularity {
    #[inline]
    fn weight(&self, popularity: &TagPopularity, tag: TagId) -> N {
        popularity.share(tag)
    }
}

impl<N, F> TagWeighting<N> for F
where
    N: WeightNum,
    F: Fn(&TagPopularity, TagId) -> N + Send + Sync,
{
    #[inline]
    fn weight(&self, popularity: &TagPopularity, tag: TagId) -> N {
        self(popularity, tag)
    }
}

/// Runtime-selectable weighting strategy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightingAlgorithm {
    /// See [`Unweighted`]
    Unweighted,
    /// See [`Popularity`]
    #[default]
    Popularity,
}

impl<N: WeightNum> TagWeighting<N> for WeightingAlgorithm {
    #[inline]
    fn weight(&self, popularity: &TagPopularity, tag: TagId) -> N {
        match self {
            WeightingAlgorithm::Unweighted => Unweighted.weight(popularity, tag),
            WeightingAlgorithm::Popularity => Popularity.weight(popularity, tag),
        }
    }
}
