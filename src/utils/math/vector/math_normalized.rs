use std::ops::AddAssign;

use num::Float;

use super::SparseVector;

impl<N> SparseVector<N>
where
    N: Float + AddAssign,
{
    /// L2 正規化 (in place)
    ///
    /// The sum of squares is accumulated first, then every weight is divided
    /// by its square root. A zero-magnitude vector is left untouched.
    pub fn normalize(&mut self) {
        let magnitude = self.norm();
        if magnitude == N::zero() {
            return;
        }
        for val in self.weights_mut() {
            *val = *val / magnitude;
        }
    }

    /// Consuming form of [`SparseVector::normalize`]
    #[inline]
    pub fn normalized(mut self) -> Self {
        self.normalize();
        self
    }

    /// True when the norm is 1 within `tolerance`, or the vector is empty
    pub fn is_unit(&self, tolerance: N) -> bool {
        if self.is_empty() {
            return true;
        }
        (self.norm_sq::<N>() - N::one()).abs() <= tolerance
    }
}
