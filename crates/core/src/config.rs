//! Component configuration
//!
//! Each component takes an explicit config struct, validated once at
//! construction. Out-of-range or missing values fail with
//! [`Error::InvalidConfig`](crate::error::Error::InvalidConfig) before any
//! store traffic happens. All structs derive serde so deployments can load
//! them from a config file.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

// ============================================================================
// Interner
// ============================================================================

/// Configuration for a token interner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InternerConfig {
    /// Key prefix owned by this interner. Concatenated verbatim with key
    /// suffixes, so callers must avoid collisions between prefixes.
    pub prefix: String,
}

impl InternerConfig {
    /// Build a config for the given prefix
    pub fn new(prefix: impl Into<String>) -> Self {
        InternerConfig {
            prefix: prefix.into(),
        }
    }

    /// Reject empty prefixes
    pub fn validate(&self) -> Result<()> {
        if self.prefix.is_empty() {
            return Err(Error::invalid_config("interner prefix must not be empty"));
        }
        Ok(())
    }
}

// ============================================================================
// Item-CF engine
// ============================================================================

fn default_neighbor_cap() -> usize {
    100
}

fn default_owned_weight_threshold() -> f64 {
    5.0
}

/// Configuration for the item-based collaborative filtering engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemCfConfig {
    /// Key prefix owned by this engine.
    pub prefix: String,
    /// How many neighbors to fetch per history item when scoring.
    #[serde(default = "default_neighbor_cap")]
    pub neighbor_cap: usize,
    /// Weight at which an item counts as already owned and is pruned from
    /// candidate lists. Must match the top of the event weight scale.
    #[serde(default = "default_owned_weight_threshold")]
    pub owned_weight_threshold: f64,
}

impl ItemCfConfig {
    /// Build a config with default cap and threshold
    pub fn new(prefix: impl Into<String>) -> Self {
        ItemCfConfig {
            prefix: prefix.into(),
            neighbor_cap: default_neighbor_cap(),
            owned_weight_threshold: default_owned_weight_threshold(),
        }
    }

    /// Reject empty prefixes and degenerate caps
    pub fn validate(&self) -> Result<()> {
        if self.prefix.is_empty() {
            return Err(Error::invalid_config("engine prefix must not be empty"));
        }
        if self.neighbor_cap == 0 {
            return Err(Error::invalid_config("neighbor_cap must be positive"));
        }
        if !self.owned_weight_threshold.is_finite() || self.owned_weight_threshold <= 0.0 {
            return Err(Error::invalid_config(
                "owned_weight_threshold must be positive and finite",
            ));
        }
        Ok(())
    }
}

impl Default for ItemCfConfig {
    fn default() -> Self {
        ItemCfConfig::new("cf")
    }
}

// ============================================================================
// Rerankers
// ============================================================================

fn default_epsilon() -> f64 {
    1.25
}

/// Configuration for the epsilon dithering reranker.
///
/// `epsilon = 1.0` makes the reranker the identity permutation; larger
/// values widen the rank-perturbation distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DitherConfig {
    /// Dithering strength, must be at least 1.0.
    #[serde(default = "default_epsilon")]
    pub epsilon: f64,
}

impl DitherConfig {
    /// Build a config for the given epsilon
    pub fn new(epsilon: f64) -> Self {
        DitherConfig { epsilon }
    }

    /// Reject epsilon below 1.0
    pub fn validate(&self) -> Result<()> {
        if !self.epsilon.is_finite() || self.epsilon < 1.0 {
            return Err(Error::invalid_config("epsilon must be at least 1.0"));
        }
        Ok(())
    }
}

impl Default for DitherConfig {
    fn default() -> Self {
        DitherConfig {
            epsilon: default_epsilon(),
        }
    }
}

fn default_discount_factor() -> f64 {
    0.5
}

/// Configuration for the impression discounting reranker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountConfig {
    /// Blend weight for the impression-count term, in (0, 1].
    #[serde(default = "default_discount_factor")]
    pub w1: f64,
    /// Blend weight for the time-since-last-seen term, in (0, 1].
    #[serde(default = "default_discount_factor")]
    pub w2: f64,
    /// Exponent applied to the impression-count term.
    #[serde(default = "default_discount_factor")]
    pub impression_exponent: f64,
    /// Exponent applied to the time-since-last-seen term.
    #[serde(default = "default_discount_factor")]
    pub last_seen_exponent: f64,
}

impl DiscountConfig {
    /// Reject blend weights outside (0, 1]
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("w1", self.w1), ("w2", self.w2)] {
            if !value.is_finite() || value <= 0.0 || value > 1.0 {
                return Err(Error::invalid_config(format!(
                    "{name} must be in (0, 1], got {value}"
                )));
            }
        }
        for (name, value) in [
            ("impression_exponent", self.impression_exponent),
            ("last_seen_exponent", self.last_seen_exponent),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::invalid_config(format!(
                    "{name} must be non-negative, got {value}"
                )));
            }
        }
        Ok(())
    }
}

impl Default for DiscountConfig {
    fn default() -> Self {
        DiscountConfig {
            w1: default_discount_factor(),
            w2: default_discount_factor(),
            impression_exponent: default_discount_factor(),
            last_seen_exponent: default_discount_factor(),
        }
    }
}

// ============================================================================
// Recommender facade
// ============================================================================

fn default_user_prefix() -> String {
    "u".to_string()
}

fn default_item_prefix() -> String {
    "i".to_string()
}

/// Configuration for the recommender facade.
///
/// Aggregates the interner prefixes, the engine config, and the dithering
/// config. The two interner prefixes and the engine prefix must be pairwise
/// distinct; keys are built by verbatim concatenation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommenderConfig {
    /// Prefix for the user-token interner.
    #[serde(default = "default_user_prefix")]
    pub user_prefix: String,
    /// Prefix for the item-token interner.
    #[serde(default = "default_item_prefix")]
    pub item_prefix: String,
    /// Item-CF engine configuration.
    #[serde(default)]
    pub item_cf: ItemCfConfig,
    /// Dithering reranker configuration.
    #[serde(default)]
    pub dither: DitherConfig,
}

impl RecommenderConfig {
    /// Validate the aggregate and every sub-config
    pub fn validate(&self) -> Result<()> {
        if self.user_prefix.is_empty() || self.item_prefix.is_empty() {
            return Err(Error::invalid_config("interner prefixes must not be empty"));
        }
        let prefixes = [&self.user_prefix, &self.item_prefix, &self.item_cf.prefix];
        for (i, a) in prefixes.iter().enumerate() {
            for b in prefixes.iter().skip(i + 1) {
                if a == b {
                    return Err(Error::invalid_config(format!(
                        "prefix {a:?} is used by more than one component"
                    )));
                }
            }
        }
        self.item_cf.validate()?;
        self.dither.validate()
    }
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        RecommenderConfig {
            user_prefix: default_user_prefix(),
            item_prefix: default_item_prefix(),
            item_cf: ItemCfConfig::default(),
            dither: DitherConfig::default(),
        }
    }
}
