use std::{cmp::Ordering, ops::AddAssign};

use num::{Float, Num};

use super::SparseVector;

impl<N> SparseVector<N>
where
    N: Num + Copy,
{
    /// ドット積を計算するメソッド
    /// Only tags present on both sides contribute.
    ///
    /// # Arguments
    /// * `other` - 他のベクトル
    ///
    /// # Returns
    /// * `R` - ドット積の結果
    #[inline]
    pub fn dot<R>(&self, other: &Self) -> R
    where
        R: Num + AddAssign,
        N: Into<R>,
    {
        let mut result = R::zero();
        let self_nnz = self.nnz();
        let other_nnz = other.nnz();

        if self_nnz == 0 || other_nnz == 0 {
            return result;
        }

        let (self_inds, self_vals) = (self.tags(), self.weights());
        let (other_inds, other_vals) = (other.tags(), other.weights());

        let mut i = 0;
        let mut j = 0;
        while i < self_nnz && j < other_nnz {
            match self_inds[i].cmp(&other_inds[j]) {
                Ordering::Equal => {
                    result += self_vals[i].into() * other_vals[j].into();
                    i += 1;
                    j += 1;
                }
                Ordering::Less => i += 1,
                Ordering::Greater => j += 1,
            }
        }

        result
    }

    /// Sum of squared weights
    #[inline]
    pub fn norm_sq<R>(&self) -> R
    where
        R: Num + AddAssign + Copy,
        N: Into<R>,
    {
        let mut result = R::zero();
        for &val in self.weights() {
            let val: R = val.into();
            result += val * val;
        }
        result
    }
}

impl<N> SparseVector<N>
where
    N: Float + AddAssign,
{
    /// Euclidean norm
    #[inline]
    pub fn norm(&self) -> N {
        self.norm_sq::<N>().sqrt()
    }
}
