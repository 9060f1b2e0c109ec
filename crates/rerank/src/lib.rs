//! Recommendation rerankers
//!
//! Post-processing of a scored recommendation list. A reranker permutes
//! (and may attenuate the scores of) the list an engine produced; it never
//! adds or drops entries.
//!
//! # Architecture
//!
//! Reranking sits between engine selection and token translation:
//!
//! ```text
//! engine fan-out → primary engine's list
//!     → reranker permutation → id-to-token translation
//!     → (token, score) pairs to the caller
//! ```
//!
//! Rerankers are deterministic given the RNG handed in; the orchestrator
//! seeds one RNG per invocation from the caller-supplied seed, so replaying
//! a request replays the permutation.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod discount;
mod dither;

pub use discount::ImpressionDiscount;
pub use dither::EpsilonDithering;

use corate_core::{Id, Recommendation};
use rand::RngCore;

/// Trait for reranking implementations.
///
/// The output is a permutation of the input: the same set of items, in a
/// possibly different order, with possibly attenuated scores. An empty
/// input passes through untouched. The trait is object-safe for use as
/// `Box<dyn Reranker>`.
pub trait Reranker: Send + Sync {
    /// Name for selection and logging
    fn name(&self) -> &str;

    /// Permute `recommendations` for `user`, drawing randomness from `rng`.
    fn rerank(
        &self,
        user: Id,
        recommendations: Vec<Recommendation>,
        rng: &mut dyn RngCore,
    ) -> Vec<Recommendation>;
}
