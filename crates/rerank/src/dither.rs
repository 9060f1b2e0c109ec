//! Epsilon dithering
//!
//! Randomized rank perturbation after Dunning & Friedman: each entry's sort
//! key becomes `ln(rank) + N(0, σ)` with `σ = √(ln ε)`, so neighboring
//! ranks swap often while distant ranks rarely do. `ε = 1` degenerates to
//! the identity permutation; larger ε widens the shuffle. Scores are not
//! modified, only order.

use crate::Reranker;
use corate_core::{DitherConfig, Id, Recommendation, Result};
use rand::{Rng, RngCore};
use std::cmp::Ordering;

/// Effective sigma when epsilon is exactly 1.0; keeps the Gaussian
/// well-defined while leaving the log-rank ordering intact.
const IDENTITY_SIGMA: f64 = 1e-10;

/// Box-Muller rejects uniforms at or below this, keeping `ln(u1)` bounded.
const MIN_UNIFORM: f64 = 1e-4;

/// Rank-dithering reranker.
pub struct EpsilonDithering {
    sigma: f64,
}

/// One `N(mean, sigma)` draw via the Box-Muller transform.
fn gaussian(rng: &mut dyn RngCore, mean: f64, sigma: f64) -> f64 {
    let mut u1: f64 = rng.gen();
    while u1 <= MIN_UNIFORM {
        u1 = rng.gen();
    }
    let u2: f64 = rng.gen();
    mean + sigma * (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos()
}

impl EpsilonDithering {
    /// Create a dithering reranker.
    ///
    /// # Errors
    /// `InvalidConfig` if `epsilon < 1.0`.
    pub fn new(config: DitherConfig) -> Result<Self> {
        config.validate()?;
        let sigma = if config.epsilon > 1.0 {
            config.epsilon.ln().sqrt()
        } else {
            IDENTITY_SIGMA
        };
        Ok(EpsilonDithering { sigma })
    }
}

impl Reranker for EpsilonDithering {
    fn name(&self) -> &str {
        "epsilon-dithering"
    }

    fn rerank(
        &self,
        _user: Id,
        mut recommendations: Vec<Recommendation>,
        rng: &mut dyn RngCore,
    ) -> Vec<Recommendation> {
        if recommendations.is_empty() {
            return recommendations;
        }
        recommendations.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

        let mut keyed: Vec<(f64, Recommendation)> = recommendations
            .into_iter()
            .enumerate()
            .map(|(index, recommendation)| {
                let rank = (index + 1) as f64;
                (rank.ln() + gaussian(rng, 0.0, self.sigma), recommendation)
            })
            .collect();
        keyed.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));
        keyed
            .into_iter()
            .map(|(_, recommendation)| recommendation)
            .collect()
    }
}
