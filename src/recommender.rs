//! Recommender orchestration
//!
//! One request flows through here: intern the tokens, fan the write or read
//! out over every registered engine, pick the primary engine's list, rerank
//! it, and translate ids back to tokens. The facade holds no state of its
//! own beyond the component handles; everything durable is in the store.

use corate_core::{EventKind, Interaction, InternerConfig, RecommenderConfig, Result};
use corate_engine::{ContentEngine, Engine, ItemCfEngine};
use corate_interner::Interner;
use corate_rerank::{EpsilonDithering, Reranker};
use corate_store::Store;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use tracing::{debug, warn};

/// Name of the engine whose list is returned to callers.
const PRIMARY_ENGINE: &str = "item-cf";

/// Request orchestrator.
///
/// Owns two interners (user tokens and item tokens), the engine set, and
/// the reranker. Engines receive dense ids only; external tokens stop at
/// this boundary.
pub struct Recommender {
    users: Interner,
    items: Interner,
    engines: Vec<Box<dyn Engine>>,
    reranker: Box<dyn Reranker>,
}

impl Recommender {
    /// Build the standard engine set (content stub + item-CF) with the
    /// epsilon dithering reranker.
    ///
    /// # Errors
    /// `InvalidConfig` if any sub-config fails validation.
    pub fn new(config: RecommenderConfig, store: Arc<dyn Store>) -> Result<Self> {
        config.validate()?;
        let users = Interner::new(InternerConfig::new(&config.user_prefix), store.clone())?;
        let items = Interner::new(InternerConfig::new(&config.item_prefix), store.clone())?;
        let engines: Vec<Box<dyn Engine>> = vec![
            Box::new(ContentEngine::new()),
            Box::new(ItemCfEngine::new(config.item_cf, store)?),
        ];
        let reranker = Box::new(EpsilonDithering::new(config.dither)?);
        Ok(Recommender {
            users,
            items,
            engines,
            reranker,
        })
    }

    /// The user-token interner
    pub fn users(&self) -> &Interner {
        &self.users
    }

    /// The item-token interner
    pub fn items(&self) -> &Interner {
        &self.items
    }

    /// Record one interaction.
    ///
    /// Interns both tokens (the write path allocates ids on first sight)
    /// and fans the event out to every engine. `weight` defaults to the
    /// event kind's weight.
    pub fn record(
        &self,
        user_token: &str,
        item_token: &str,
        kind: EventKind,
        weight: Option<f64>,
    ) -> Result<()> {
        let user = self.users.intern(user_token)?;
        let item = self.items.intern(item_token)?;
        let interaction = Interaction {
            item,
            kind,
            weight: weight.unwrap_or_else(|| kind.default_weight()),
        };
        for engine in &self.engines {
            engine.record(user, &interaction)?;
        }
        debug!(user_token, item_token, %kind, weight = interaction.weight, "recorded interaction");
        Ok(())
    }

    /// Produce a reranked recommendation list as `(token, score)` pairs.
    ///
    /// Read path: an unknown user token is not interned and yields an empty
    /// list. The RNG is seeded once per invocation from `seed`, so equal
    /// seeds replay the same permutation.
    pub fn recommend(
        &self,
        user_token: &str,
        limit: usize,
        seed: u64,
    ) -> Result<Vec<(String, f64)>> {
        let Some(user) = self.users.resolve(user_token)? else {
            return Ok(Vec::new());
        };

        let mut selected = Vec::new();
        for engine in &self.engines {
            let recommendations = engine.recommend(user, limit)?;
            debug!(
                engine = engine.name(),
                count = recommendations.len(),
                "engine produced recommendations"
            );
            if engine.name() == PRIMARY_ENGINE {
                selected = recommendations;
            }
        }

        let mut rng = StdRng::seed_from_u64(seed);
        let reranked = self.reranker.rerank(user, selected, &mut rng);

        let mut pairs = Vec::with_capacity(reranked.len());
        for recommendation in reranked {
            match self.items.value_of(recommendation.item)? {
                Some(token) => pairs.push((token, recommendation.score)),
                None => {
                    warn!(item = recommendation.item, "engine returned an unknown item id");
                }
            }
        }
        Ok(pairs)
    }
}
