/// This crate is an item-based recommendation engine scoring candidates by tag profile similarity.
pub mod recommender;
pub mod utils;
pub mod config;
pub mod error;

/// Recommendation Engine
/// The top-level struct of this crate, running the whole scoring pipeline.
/// It turns the tags of the items a user liked into a preference vector,
/// turns every candidate item into a tag vector, scores each candidate by
/// cosine similarity and selects the result.
///
/// `Recommender<N, W>` has the following generic parameters:
/// - `N`: Weight type (f32, f64)
/// - `W`: Candidate weighting strategy (e.g., WeightingAlgorithm, Popularity, Unweighted)
///
/// No state survives a call: every recommendation rebuilds its vectors from
/// the tag links it is given.
pub use recommender::Recommender;

/// Tag Link
/// The atomic input fact "item X carries tag Y".
/// Both input sources (items the user liked, candidate items) are sequences
/// of `Result<TagLink, E>`; the first error aborts the computation and is
/// handed back as is.
pub use recommender::link::{links_ok, ItemId, TagId, TagLink, TagLinkReader};

/// Profile Vector and its builder
/// A tag's weight is the share of liked items carrying it, and the vector is
/// normalized to unit length.
pub use recommender::profile::{ProfileVector, ProfileVectorBuilder};

/// Candidate Vectors and their builder
/// One unit-normalized tag vector per candidate item.
pub use recommender::candidate::{CandidateVectorBuilder, CandidateVectorSet};

/// Weighting Strategy Trait
/// Decides the raw weight of a tag on a candidate item.
///
/// Provided strategies:
/// - Unweighted: every tag weighs 1
/// - Popularity: share of candidate items carrying the tag (common tags weigh more)
/// - Any `Fn(&TagPopularity, TagId) -> N` closure
pub use recommender::weighting::{Popularity, TagPopularity, TagWeighting, Unweighted, WeightingAlgorithm};

/// Scoring and Selection
/// - `ScoredCandidate`: a candidate id with its similarity score
/// - `SelectionPolicy`: bounded top-K (ordered) or inclusive threshold
/// - `Recommendations`: the selected candidates, best first
pub use recommender::evaluate::scoring::{score_candidates, similarity, ScoredCandidate};
pub use recommender::evaluate::select::{Recommendations, SelectionPolicy, Threshold, TopK};

/// Sparse Vector
/// Tag-indexed sparse vector holding only non-zero weights, sorted by tag.
pub use utils::math::vector::SparseVector;

pub use config::{PolicyKind, RecommendConfig};
pub use error::{RecommendError, RecommendResult};
