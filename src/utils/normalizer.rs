use std::fmt::Debug;
use std::ops::AddAssign;

use num::Float;

/// Floating weight type carried by sparse vectors and scores
///
/// `f32` is the reference precision; `f64` is available for callers that
/// want more headroom.
pub trait WeightNum: Float + AddAssign + Debug + Default + Send + Sync + 'static {
    /// `count / total`, zero when `total` is zero
    fn from_ratio(count: usize, total: usize) -> Self;

    fn into_f64(self) -> f64;
}

impl WeightNum for f32 {
    #[inline]
    fn from_ratio(count: usize, total: usize) -> Self {
        if total == 0 {
            return 0.0;
        }
        count as f32 / total as f32
    }

    #[inline]
    fn into_f64(self) -> f64 {
        self as f64
    }
}

impl WeightNum for f64 {
    #[inline]
    fn from_ratio(count: usize, total: usize) -> Self {
        if total == 0 {
            return 0.0;
        }
        count as f64 / total as f64
    }

    #[inline]
    fn into_f64(self) -> f64 {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_guards_zero_total() {
        assert_eq!(<f32 as WeightNum>::from_ratio(3, 0), 0.0);
        assert_eq!(<f64 as WeightNum>::from_ratio(0, 0), 0.0);
    }

    #[test]
    fn ratio_divides() {
        assert_eq!(<f32 as WeightNum>::from_ratio(1, 4), 0.25);
        assert_eq!(<f64 as WeightNum>::from_ratio(3, 3), 1.0);
    }
}
