pub mod math;
pub mod math_normalized;
pub mod serde;

use std::fmt::{self, Debug};
use std::hash::BuildHasher;

use indexmap::IndexMap;
use num::Num;

use crate::utils::sort::radix_sort_u64_soa;

/// Tag dimension index of a sparse vector
pub type TagId = u64;

/// SparseVector は 0 要素を疎とした疎ベクトルです
/// `inds` と `vals` を並行配列として持ち
/// `inds` はタグIDを、`vals` はその重みを保持します
///
/// Entries are kept sorted by ascending tag id, and only non-zero weights
/// are stored: a tag that is absent has weight zero.
#[derive(Clone, PartialEq)]
pub struct SparseVector<N>
where
    N: Num,
{
    inds: Vec<TagId>,
    vals: Vec<N>,
}

impl<N> SparseVector<N>
where
    N: Num + Copy,
{
    #[inline]
    pub fn new() -> Self {
        SparseVector {
            inds: Vec::new(),
            vals: Vec::new(),
        }
    }

    #[inline]
    pub fn with_capacity(cap: usize) -> Self {
        SparseVector {
            inds: Vec::with_capacity(cap),
            vals: Vec::with_capacity(cap),
        }
    }

    /// Build from parallel, possibly unsorted index/value arrays.
    /// Zero values are dropped; duplicated indices are summed.
    pub fn from_parts(mut inds: Vec<TagId>, mut vals: Vec<N>) -> Self {
        debug_assert_eq!(inds.len(), vals.len(), "index and value arrays must have the same length");
        radix_sort_u64_soa(&mut inds, &mut vals);

        let mut vec = SparseVector::with_capacity(inds.len());
        for (ind, val) in inds.into_iter().zip(vals) {
            match vec.inds.last() {
                Some(&last) if last == ind => {
                    // 同じインデックスは加算
                    if let Some(acc) = vec.vals.last_mut() {
                        *acc = *acc + val;
                    }
                }
                _ => {
                    vec.inds.push(ind);
                    vec.vals.push(val);
                }
            }
        }
        vec.retain_non_zero();
        vec
    }

    /// Build from a tag -> weight map
    pub fn from_map<S>(map: &IndexMap<TagId, N, S>) -> Self
    where
        S: BuildHasher,
    {
        let (inds, vals): (Vec<TagId>, Vec<N>) = map.iter().map(|(&tag, &val)| (tag, val)).unzip();
        Self::from_parts(inds, vals)
    }

    #[inline]
    pub fn nnz(&self) -> usize {
        self.inds.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inds.is_empty()
    }

    #[inline]
    pub fn contains(&self, tag: TagId) -> bool {
        self.inds.binary_search(&tag).is_ok()
    }

    /// Weight of `tag`, zero when the tag is absent
    #[inline]
    pub fn get(&self, tag: TagId) -> N {
        match self.inds.binary_search(&tag) {
            Ok(pos) => self.vals[pos],
            Err(_) => N::zero(),
        }
    }

    #[inline]
    pub fn iter(&self) -> SparseVectorIter<'_, N> {
        SparseVectorIter {
            vec: self,
            pos: 0,
        }
    }

    #[inline]
    pub fn tags(&self) -> &[TagId] {
        &self.inds
    }

    #[inline]
    pub fn weights(&self) -> &[N] {
        &self.vals
    }

    #[inline]
    pub fn shrink_to_fit(&mut self) {
        self.inds.shrink_to_fit();
        self.vals.shrink_to_fit();
    }

    #[inline]
    pub(crate) fn weights_mut(&mut self) -> &mut [N] {
        &mut self.vals
    }

    fn retain_non_zero(&mut self) {
        if self.vals.iter().all(|v| *v != N::zero()) {
            return;
        }
        let mut write = 0;
        for read in 0..self.inds.len() {
            if self.vals[read] != N::zero() {
                self.inds[write] = self.inds[read];
                self.vals[write] = self.vals[read];
                write += 1;
            }
        }
        self.inds.truncate(write);
        self.vals.truncate(write);
    }
}

impl<N> Default for SparseVector<N>
where
    N: Num + Copy,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<N> FromIterator<(TagId, N)> for SparseVector<N>
where
    N: Num + Copy,
{
    fn from_iter<I: IntoIterator<Item = (TagId, N)>>(iter: I) -> Self {
        let (inds, vals): (Vec<TagId>, Vec<N>) = iter.into_iter().unzip();
        Self::from_parts(inds, vals)
    }
}

impl<N: Num + Copy + Debug> Debug for SparseVector<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            writeln!(f, "SparseVector {{")?;
            writeln!(f, "    nnz: {},", self.nnz())?;
            for (tag, val) in self.iter() {
                writeln!(f, "    {}: {:?},", tag, val)?;
            }
            write!(f, "}}")
        } else {
            f.debug_map().entries(self.iter()).finish()
        }
    }
}

pub struct SparseVectorIter<'a, N>
where
    N: Num,
{
    vec: &'a SparseVector<N>,
    pos: usize,
}

impl<'a, N> Iterator for SparseVectorIter<'a, N>
where
    N: Num + Copy,
{
    type Item = (TagId, N);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.pos < self.vec.nnz() {
            let item = (self.vec.inds[self.pos], self.vec.vals[self.pos]);
            self.pos += 1;
            Some(item)
        } else {
            None
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let rest = self.vec.nnz() - self.pos;
        (rest, Some(rest))
    }
}

impl<'a, N> ExactSizeIterator for SparseVectorIter<'a, N> where N: Num + Copy {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_parts_sorts_merges_and_drops_zeros() {
        let vec = SparseVector::from_parts(vec![9, 3, 7, 3, 1], vec![1.0f32, 2.0, 0.0, 0.5, 4.0]);
        assert_eq!(vec.tags(), &[1, 3, 9]);
        assert_eq!(vec.weights(), &[4.0, 2.5, 1.0]);
        assert!(!vec.contains(7));
    }

    #[test]
    fn absent_tag_reads_as_zero() {
        let vec: SparseVector<f32> = [(2, 0.5), (5, 0.25)].into_iter().collect();
        assert_eq!(vec.get(2), 0.5);
        assert_eq!(vec.get(4), 0.0);
        assert_eq!(vec.get(100), 0.0);
    }

    #[test]
    fn from_map_is_independent_of_insertion_order() {
        let mut a = IndexMap::new();
        a.insert(4u64, 1.0f64);
        a.insert(1u64, 2.0f64);
        let mut b = IndexMap::new();
        b.insert(1u64, 2.0f64);
        b.insert(4u64, 1.0f64);
        assert_eq!(SparseVector::from_map(&a), SparseVector::from_map(&b));
    }

    #[test]
    fn empty_vector() {
        let vec = SparseVector::<f32>::new();
        assert!(vec.is_empty());
        assert_eq!(vec.iter().count(), 0);
        assert_eq!(format!("{:?}", vec), "{}");
    }
}
