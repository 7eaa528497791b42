use serde::Deserialize;

use crate::error::{RecommendError, RecommendResult};
use crate::recommender::evaluate::select::SelectionPolicy;
use crate::recommender::weighting::WeightingAlgorithm;

/// Which result selector a deployment runs
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PolicyKind {
    /// Bounded, ordered list of the `max_recommended` best candidates
    #[default]
    TopK,
    /// Every candidate scoring at least `similarity_threshold`
    Threshold,
}

/// Recommendation engine configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct RecommendConfig {
    /// `SELECTION_POLICY`: `top_k` or `threshold`
    #[serde(default)]
    pub selection_policy: PolicyKind,

    /// `MAX_RECOMMENDED`: K of the top-K policy
    #[serde(default = "default_max_recommended")]
    pub max_recommended: usize,

    /// `SIMILARITY_THRESHOLD`: minimum score of the threshold policy, in [0, 1]
    #[serde(default)]
    pub similarity_threshold: Option<f32>,

    /// `WEIGHTING`: `popularity` or `unweighted`
    #[serde(default)]
    pub weighting: WeightingAlgorithm,

    /// `EXCLUDE_LIKED`: drop candidates the user already liked
    #[serde(default = "default_exclude_liked")]
    pub exclude_liked: bool,
}

fn default_max_recommended() -> usize {
    5
}

fn default_exclude_liked() -> bool {
    true
}

impl Default for RecommendConfig {
    fn default() -> Self {
        Self {
            selection_policy: PolicyKind::default(),
            max_recommended: default_max_recommended(),
            similarity_threshold: None,
            weighting: WeightingAlgorithm::default(),
            exclude_liked: default_exclude_liked(),
        }
    }
}

impl RecommendConfig {
    /// Load configuration from environment variables (and `.env` if present)
    pub fn from_env() -> RecommendResult<Self> {
        dotenvy::dotenv().ok();
        let config = envy::from_env::<RecommendConfig>()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from explicit `(NAME, value)` pairs
    pub fn from_vars<I>(vars: I) -> RecommendResult<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config = envy::from_iter::<_, RecommendConfig>(vars)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> RecommendResult<()> {
        if let Some(threshold) = self.similarity_threshold {
            if !threshold.is_finite() || !(0.0..=1.0).contains(&threshold) {
                return Err(RecommendError::InvalidConfig(format!(
                    "SIMILARITY_THRESHOLD must be within [0, 1], got {}",
                    threshold
                )));
            }
        }
        match self.selection_policy {
            PolicyKind::TopK if self.max_recommended == 0 => Err(RecommendError::InvalidConfig(
                "MAX_RECOMMENDED must be at least 1".to_string(),
            )),
            PolicyKind::Threshold if self.similarity_threshold.is_none() => Err(RecommendError::InvalidConfig(
                "SIMILARITY_THRESHOLD is required by the threshold policy".to_string(),
            )),
            _ => Ok(()),
        }
    }

    /// The active selection policy
    pub fn selection_policy(&self) -> RecommendResult<SelectionPolicy<f32>> {
        self.validate()?;
        Ok(match self.selection_policy {
            PolicyKind::TopK => SelectionPolicy::TopK(self.max_recommended),
            PolicyKind::Threshold => SelectionPolicy::Threshold(self.similarity_threshold.unwrap_or_default()),
        })
    }
}
