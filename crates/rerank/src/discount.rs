//! Impression discounting
//!
//! Attenuates each entry's score by a blend of two power-law decay terms
//! and re-sorts on the attenuated value. Rank stands in for both the
//! impression count and the time since the item was last shown; a
//! production deployment sources those from an impression store keyed by
//! user and feeds them through the same two terms.

use crate::Reranker;
use corate_core::{DiscountConfig, Id, Recommendation, Result};
use rand::RngCore;
use std::cmp::Ordering;

/// Impression-discounting reranker.
pub struct ImpressionDiscount {
    w1: f64,
    w2: f64,
    impression_exponent: f64,
    last_seen_exponent: f64,
}

impl ImpressionDiscount {
    /// Create a discounting reranker.
    ///
    /// # Errors
    /// `InvalidConfig` if a blend weight leaves (0, 1] or an exponent is
    /// negative.
    pub fn new(config: DiscountConfig) -> Result<Self> {
        config.validate()?;
        Ok(ImpressionDiscount {
            w1: config.w1,
            w2: config.w2,
            impression_exponent: config.impression_exponent,
            last_seen_exponent: config.last_seen_exponent,
        })
    }

    /// Attenuated sort key for the entry at 1-based `rank`.
    fn discounted(&self, score: f64, rank: usize) -> f64 {
        let base = (rank + 1) as f64;
        score
            * (self.w1 / base.powf(self.impression_exponent)
                + self.w2 / base.powf(self.last_seen_exponent))
    }
}

impl Reranker for ImpressionDiscount {
    fn name(&self) -> &str {
        "impression-discount"
    }

    fn rerank(
        &self,
        _user: Id,
        mut recommendations: Vec<Recommendation>,
        _rng: &mut dyn RngCore,
    ) -> Vec<Recommendation> {
        if recommendations.is_empty() {
            return recommendations;
        }
        recommendations.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

        let mut keyed: Vec<(f64, Recommendation)> = recommendations
            .into_iter()
            .enumerate()
            .map(|(index, recommendation)| {
                (
                    self.discounted(recommendation.score, index + 1),
                    recommendation,
                )
            })
            .collect();
        keyed.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));
        keyed
            .into_iter()
            .map(|(_, recommendation)| recommendation)
            .collect()
    }
}
