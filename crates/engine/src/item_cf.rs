//! Item-based collaborative filtering engine
//!
//! Maintains an unnormalized cosine similarity between items, updated
//! incrementally on every interaction, and scores recommendations from the
//! neighbor lists of a user's history.
//!
//! ## Store layout
//!
//! Under the engine's prefix `Q`:
//!
//! - `Q:z:i:c` — sorted set, item id → accumulated weight ("item count")
//! - `Q:z:i:pc` — sorted set, pair key → co-rating count
//! - `Q:h:i:s` — hash, pair key → similarity (canonical copy)
//! - `Q:z:i:<item>:s` — sorted set per item, neighbor id → similarity
//! - `Q:h:u:<user>:i` — hash per user, item id → weight
//!
//! Similarity is stored three times (canonical hash plus both per-item
//! neighbor sets) so top-k neighbor fetches stay one range query. The three
//! writes are separate store calls; a concurrent reader can observe them
//! torn, which consumers accept because similarity is advisory.
//!
//! ## Update algebra
//!
//! The pair count for items a and b tracks `Σ_users min(w_u,a, w_u,b)`.
//! When a user's weight on one item rises, each pair's `min` either rises
//! by the weight delta (while still the smaller side) or clamps at the
//! other item's weight. Weights are monotone per user and item; a weaker
//! event never overrides a stronger one, which keeps the counts additive.

use crate::Engine;
use corate_core::{Error, Id, Interaction, ItemCfConfig, Recommendation, Result};
use corate_store::Store;
use rustc_hash::FxHashMap;
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::{debug, warn};

/// Incremental item-item collaborative filtering over the store adapter.
pub struct ItemCfEngine {
    prefix: String,
    neighbor_cap: usize,
    owned_weight_threshold: f64,
    store: Arc<dyn Store>,
}

/// Canonical key for an unordered item pair.
///
/// Ordered lexicographically over the stringified ids, so `"10:2"` is
/// canonical while `"2:10"` never hits the store.
fn pair_key(a: &str, b: &str) -> String {
    if a <= b {
        format!("{a}:{b}")
    } else {
        format!("{b}:{a}")
    }
}

/// Change in `min(weight_on_item, other_weight)` when the weight on an item
/// rises from `current` to `new`.
fn co_rating_delta(current: f64, new: f64, other: f64) -> f64 {
    if current == 0.0 {
        new.min(other)
    } else if current < other {
        if new < other {
            new - current
        } else {
            other - current
        }
    } else {
        0.0
    }
}

impl ItemCfEngine {
    /// Create an engine over `store`, owning `config.prefix`.
    ///
    /// # Errors
    /// `InvalidConfig` if the prefix is empty or the cap/threshold are out
    /// of range.
    pub fn new(config: ItemCfConfig, store: Arc<dyn Store>) -> Result<Self> {
        config.validate()?;
        Ok(ItemCfEngine {
            prefix: config.prefix,
            neighbor_cap: config.neighbor_cap,
            owned_weight_threshold: config.owned_weight_threshold,
            store,
        })
    }

    fn counts_key(&self) -> String {
        format!("{}:z:i:c", self.prefix)
    }

    fn pair_counts_key(&self) -> String {
        format!("{}:z:i:pc", self.prefix)
    }

    fn similarities_key(&self) -> String {
        format!("{}:h:i:s", self.prefix)
    }

    fn neighbors_key(&self, item: &str) -> String {
        format!("{}:z:i:{}:s", self.prefix, item)
    }

    fn user_items_key(&self, user: Id) -> String {
        format!("{}:h:u:{}:i", self.prefix, user)
    }

    /// The user's item → weight map. Empty if the user is unknown.
    fn load_user_items(&self, user: Id) -> Result<FxHashMap<String, f64>> {
        let key = self.user_items_key(user);
        let mut items = FxHashMap::default();
        for (field, raw) in self.store.hgetall(&key)? {
            let weight: f64 = raw.parse().map_err(|_| Error::BadNumber {
                key: key.clone(),
                raw,
            })?;
            items.insert(field, weight);
        }
        Ok(items)
    }

    /// Recompute and write the similarity for `(item, other)` after their
    /// pair count changed. `item_count` is the already-updated count of the
    /// item being written.
    fn update_pair_similarity(
        &self,
        item: &str,
        item_count: f64,
        other: &str,
        key: &str,
    ) -> Result<()> {
        let pair_count = self
            .store
            .zscore(&self.pair_counts_key(), key)?
            .unwrap_or(0.0);
        let other_count = match self.store.zscore(&self.counts_key(), other)? {
            Some(count) if count > 0.0 => count,
            observed => {
                warn!(item = other, ?observed, "item count missing during similarity update");
                return Err(Error::MissingItemCount {
                    item: other.to_string(),
                });
            }
        };
        let similarity = pair_count / (item_count.sqrt() * other_count.sqrt());
        self.store
            .hset(&self.similarities_key(), key, &similarity.to_string())?;
        self.store
            .zadd(&self.neighbors_key(item), similarity, other)?;
        self.store
            .zadd(&self.neighbors_key(other), similarity, item)?;
        debug!(pair = key, similarity, "similarity updated");
        Ok(())
    }
}

impl Engine for ItemCfEngine {
    fn name(&self) -> &str {
        "item-cf"
    }

    fn record(&self, user: Id, interaction: &Interaction) -> Result<()> {
        // Impressions are counted only by the discounting reranker.
        if interaction.kind.is_impression() {
            return Ok(());
        }

        let item = interaction.item.to_string();
        let weight = interaction.weight;
        let user_key = self.user_items_key(user);
        let items = self.load_user_items(user)?;

        if items.is_empty() {
            self.store.hset(&user_key, &item, &weight.to_string())?;
            self.store.zincrby(&self.counts_key(), weight, &item)?;
            debug!(user, item = %item, weight, "first interaction for user");
            return Ok(());
        }

        let current = items.get(&item).copied().unwrap_or(0.0);
        if weight <= current {
            return Ok(());
        }

        self.store.hset(&user_key, &item, &weight.to_string())?;
        let item_count = self
            .store
            .zincrby(&self.counts_key(), weight - current, &item)?;

        for (other, &other_weight) in &items {
            if *other == item {
                continue;
            }
            let key = pair_key(&item, other);
            let delta = co_rating_delta(current, weight, other_weight);
            if delta != 0.0 {
                self.store.zincrby(&self.pair_counts_key(), delta, &key)?;
            }
            self.update_pair_similarity(&item, item_count, other, &key)?;
        }
        Ok(())
    }

    fn recommend(&self, user: Id, limit: usize) -> Result<Vec<Recommendation>> {
        let items = self.load_user_items(user)?;
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut numerators: FxHashMap<String, f64> = FxHashMap::default();
        let mut denominators: FxHashMap<String, f64> = FxHashMap::default();

        for (item, &weight) in &items {
            let neighbors = self
                .store
                .zrevrange_by_score(&self.neighbors_key(item), self.neighbor_cap)?;
            let mut kept = 0usize;
            for (other, similarity) in neighbors {
                if let Some(&held) = items.get(&other) {
                    if held == self.owned_weight_threshold {
                        continue;
                    }
                }
                if kept == limit {
                    break;
                }
                kept += 1;
                *numerators.entry(other.clone()).or_insert(0.0) += similarity * weight;
                *denominators.entry(other).or_insert(0.0) += similarity;
            }
        }

        let counts_key = self.counts_key();
        let mut predictions: Vec<(Id, f64)> = Vec::with_capacity(numerators.len());
        for (other, numerator) in numerators {
            let denominator = denominators[&other];
            if denominator <= 0.0 {
                continue;
            }
            let id: Id = other.parse().map_err(|_| Error::BadNumber {
                key: counts_key.clone(),
                raw: other,
            })?;
            predictions.push((id, numerator / denominator));
        }

        let total: f64 = predictions.iter().map(|(_, predicted)| predicted).sum();
        if total <= 0.0 {
            return Ok(Vec::new());
        }

        let mut recommendations: Vec<Recommendation> = predictions
            .into_iter()
            .map(|(item, predicted)| Recommendation::new(item, predicted / total))
            .collect();
        recommendations.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.item.cmp(&b.item))
        });
        recommendations.truncate(limit);
        Ok(recommendations)
    }
}
