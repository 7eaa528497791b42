use indexmap::{IndexMap, IndexSet};
use tracing::debug;

use crate::recommender::link::{ItemId, TagId, TagLink};
use crate::utils::math::vector::SparseVector;
use crate::utils::normalizer::WeightNum;

/// The querying user's aggregated tag preferences
#[derive(Debug, Clone, Default)]
pub struct ProfileVector<N = f32>
where
    N: WeightNum,
{
    /// Unit-normalized tag weights, empty when the user liked nothing
    pub vector: SparseVector<N>,
    /// Distinct items the profile was built from
    pub liked_items: IndexSet<ItemId>,
}

impl<N> ProfileVector<N>
where
    N: WeightNum,
{
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vector.is_empty()
    }

    #[inline]
    pub fn has_liked(&self, item_id: ItemId) -> bool {
        self.liked_items.contains(&item_id)
    }
}

/// Builds a [`ProfileVector`] from the tags of liked items
///
/// A tag's raw weight is the number of distinct liked items carrying it,
/// divided by the number of distinct liked items, then the whole vector is
/// L2-normalized.
#[derive(Debug, Clone, Default)]
pub struct ProfileVectorBuilder {
    /// tag -> distinct liked items carrying it
    tag_counts: IndexMap<TagId, usize>,
    seen: IndexSet<TagLink>,
    items: IndexSet<ItemId>,
    rows: usize,
}

impl ProfileVectorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one row; repeated item/tag pairs count once
    pub fn push(&mut self, link: TagLink) -> &mut Self {
        self.rows += 1;
        self.items.insert(link.item_id);
        if self.seen.insert(link) {
            *self.tag_counts.entry(link.tag_id).or_insert(0) += 1;
        }
        self
    }

    pub fn build<N: WeightNum>(self) -> ProfileVector<N> {
        let item_count = self.items.len();
        if item_count == 0 {
            debug!(rows = self.rows, "empty profile source");
            return ProfileVector {
                vector: SparseVector::new(),
                liked_items: self.items,
            };
        }

        let weights: IndexMap<TagId, N> = self
            .tag_counts
            .iter()
            .map(|(&tag, &count)| (tag, N::from_ratio(count, item_count)))
            .collect();
        let vector = SparseVector::from_map(&weights).normalized();

        debug!(
            rows = self.rows,
            items = item_count,
            tags = vector.nnz(),
            "built profile vector"
        );
        ProfileVector {
            vector,
            liked_items: self.items,
        }
    }

    /// Consume a whole profile source
    ///
    /// The first read error is returned as is and nothing is built.
    pub fn from_links<N, I, E>(links: I) -> Result<ProfileVector<N>, E>
    where
        N: WeightNum,
        I: IntoIterator<Item = Result<TagLink, E>>,
    {
        let mut builder = Self::new();
        for link in links {
            builder.push(link?);
        }
        Ok(builder.build())
    }
}
