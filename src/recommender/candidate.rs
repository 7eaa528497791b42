use indexmap::{IndexMap, IndexSet};
use tracing::debug;

use crate::recommender::link::{ItemId, TagId, TagLink};
use crate::recommender::weighting::{TagPopularity, TagWeighting};
use crate::utils::math::vector::SparseVector;
use crate::utils::normalizer::WeightNum;

/// One unit-normalized tag vector per candidate item, in first-seen order
pub type CandidateVectorSet<N = f32> = IndexMap<ItemId, SparseVector<N>>;

/// Builds a [`CandidateVectorSet`] from the candidate pool's tag links
///
/// Rows are grouped by item first; the weighting strategy then sees the
/// pool-wide [`TagPopularity`] and every item vector is normalized on its own.
#[derive(Debug, Clone, Default)]
pub struct CandidateVectorBuilder {
    item_tags: IndexMap<ItemId, IndexSet<TagId>>,
    rows: usize,
}

impl CandidateVectorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, link: TagLink) -> &mut Self {
        self.rows += 1;
        self.item_tags
            .entry(link.item_id)
            .or_default()
            .insert(link.tag_id);
        self
    }

    /// Number of distinct candidate items fed so far
    #[inline]
    pub fn item_count(&self) -> usize {
        self.item_tags.len()
    }

    /// Tag popularity over the items fed so far
    pub fn popularity(&self) -> TagPopularity {
        let mut popularity = TagPopularity::new();
        for tags in self.item_tags.values() {
            popularity.add_item(tags.iter().copied());
        }
        popularity
    }

    pub fn build<N, W>(self, weighting: &W) -> CandidateVectorSet<N>
    where
        N: WeightNum,
        W: TagWeighting<N> + ?Sized,
    {
        let popularity = self.popularity();
        let candidates: CandidateVectorSet<N> = self
            .item_tags
            .into_iter()
            .map(|(item_id, tags)| {
                let mut vector: SparseVector<N> = tags
                    .into_iter()
                    .map(|tag| (tag, weighting.weight(&popularity, tag)))
                    .collect();
                vector.normalize();
                vector.shrink_to_fit();
                (item_id, vector)
            })
            .collect();

        debug!(
            rows = self.rows,
            items = candidates.len(),
            tags = popularity.tag_count(),
            "built candidate vectors"
        );
        candidates
    }

    /// Consume a whole candidate source
    ///
    /// The first read error is returned as is and nothing is built.
    pub fn from_links<N, W, I, E>(links: I, weighting: &W) -> Result<CandidateVectorSet<N>, E>
    where
        N: WeightNum,
        W: TagWeighting<N> + ?Sized,
        I: IntoIterator<Item = Result<TagLink, E>>,
    {
        let mut builder = Self::new();
        for link in links {
            builder.push(link?);
        }
        Ok(builder.build(weighting))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recommender::link::links_ok;
    use crate::recommender::weighting::{Popularity, Unweighted};

    const TOLERANCE: f32 = 1e-5;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < TOLERANCE
    }

    fn candidate_rows() -> Vec<(u64, u64)> {
        vec![(2, 1), (2, 2), (4, 1), (4, 5), (6, 2), (6, 6), (7, 7), (7, 8)]
    }

    #[test]
    fn unweighted_items_are_equal_unit_vectors() {
        let set: CandidateVectorSet<f32> = CandidateVectorBuilder::from_links(links_ok(candidate_rows()), &Unweighted).unwrap();
        assert_eq!(set.keys().copied().collect::<Vec<_>>(), vec![2, 4, 6, 7]);
        for vector in set.values() {
            assert_eq!(vector.nnz(), 2);
            for (_, w) in vector.iter() {
                assert!(approx(w, 0.707107));
            }
        }
    }

    #[test]
    fn popularity_weights_favor_common_tags() {
        let set: CandidateVectorSet<f32> = CandidateVectorBuilder::from_links(links_ok(candidate_rows()), &Popularity).unwrap();
        assert!(approx(set[&2].get(1), 0.707106));
        assert!(approx(set[&2].get(2), 0.707106));
        assert!(approx(set[&4].get(1), 0.894427));
        assert!(approx(set[&4].get(5), 0.447213));
        assert!(approx(set[&6].get(2), 0.894427));
        assert!(approx(set[&6].get(6), 0.447213));
        assert!(approx(set[&7].get(7), 0.707106));
        assert!(approx(set[&7].get(8), 0.707106));
        assert!(set.values().all(|v| v.is_unit(TOLERANCE)));
    }

    #[test]
    fn duplicate_rows_do_not_inflate_popularity() {
        let mut rows = candidate_rows();
        rows.push((2, 1));
        rows.push((2, 1));
        let builder = {
            let mut b = CandidateVectorBuilder::new();
            for (item, tag) in rows {
                b.push(TagLink::new(item, tag));
            }
            b
        };
        let popularity = builder.popularity();
        assert_eq!(popularity.items_with(1), 2);
        assert_eq!(builder.item_count(), 4);
    }

    #[test]
    fn zero_weights_leave_an_empty_vector() {
        let never = |_: &TagPopularity, _: TagId| 0.0f32;
        let set: CandidateVectorSet<f32> = CandidateVectorBuilder::from_links(links_ok(candidate_rows()), &never).unwrap();
        assert_eq!(set.len(), 4);
        assert!(set.values().all(|v| v.is_empty()));
    }

    #[test]
    fn read_error_is_returned_verbatim() {
        let rows = vec![Ok(TagLink::new(2, 1)), Err(42u8)];
        let res: Result<CandidateVectorSet<f32>, u8> = CandidateVectorBuilder::from_links(rows, &Unweighted);
        assert_eq!(res.unwrap_err(), 42);
    }
}
