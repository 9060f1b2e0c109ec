//! Shared test utilities for the integration suite.
//!
//! Import via `#[path = "../common/mod.rs"] mod common;` from a suite's
//! main.rs.

#![allow(dead_code)]

use std::sync::Arc;

use once_cell::sync::Lazy;

pub use corate::{
    EventKind, Id, Interaction, MemoryStore, Recommender, RecommenderConfig, Store,
};

static TRACING: Lazy<()> = Lazy::new(|| {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
});

/// Recommender over a shared in-memory store, with raw-key accessors for
/// asserting on engine state. Key helpers assume the default engine prefix.
pub struct TestRec {
    pub store: Arc<MemoryStore>,
    pub recommender: Recommender,
}

impl TestRec {
    pub fn new() -> Self {
        Self::with_config(RecommenderConfig::default())
    }

    pub fn with_config(config: RecommenderConfig) -> Self {
        Lazy::force(&TRACING);
        let store = Arc::new(MemoryStore::new());
        let recommender = Recommender::new(config, store.clone()).unwrap();
        TestRec { store, recommender }
    }

    // ========================================================================
    // Recording shorthand
    // ========================================================================

    pub fn impress(&self, user: &str, item: &str) {
        self.recommender
            .record(user, item, EventKind::Impression, None)
            .unwrap();
    }

    pub fn click(&self, user: &str, item: &str) {
        self.recommender
            .record(user, item, EventKind::Click, None)
            .unwrap();
    }

    pub fn buy(&self, user: &str, item: &str) {
        self.recommender
            .record(user, item, EventKind::Purchase, None)
            .unwrap();
    }

    // ========================================================================
    // Id lookup
    // ========================================================================

    pub fn user_id(&self, token: &str) -> Id {
        self.recommender.users().resolve(token).unwrap().unwrap()
    }

    pub fn item_id(&self, token: &str) -> Id {
        self.recommender.items().resolve(token).unwrap().unwrap()
    }

    // ========================================================================
    // Raw engine state, default prefix "cf"
    // ========================================================================

    pub fn user_weight(&self, user: &str, item: &str) -> Option<f64> {
        let user = match self.recommender.users().resolve(user).unwrap() {
            Some(id) => id,
            None => return None,
        };
        let item = match self.recommender.items().resolve(item).unwrap() {
            Some(id) => id,
            None => return None,
        };
        self.store
            .hget(&format!("cf:h:u:{user}:i"), &item.to_string())
            .unwrap()
            .map(|raw| raw.parse().unwrap())
    }

    pub fn user_map_len(&self, user: &str) -> u64 {
        match self.recommender.users().resolve(user).unwrap() {
            Some(id) => self.store.hlen(&format!("cf:h:u:{id}:i")).unwrap(),
            None => 0,
        }
    }

    pub fn item_count(&self, item: &str) -> Option<f64> {
        let item = self.recommender.items().resolve(item).unwrap()?;
        self.store.zscore("cf:z:i:c", &item.to_string()).unwrap()
    }

    pub fn pair_count(&self, a: &str, b: &str) -> Option<f64> {
        let key = self.pair_key(a, b)?;
        self.store.zscore("cf:z:i:pc", &key).unwrap()
    }

    pub fn similarity(&self, a: &str, b: &str) -> Option<f64> {
        let key = self.pair_key(a, b)?;
        self.store
            .hget("cf:h:i:s", &key)
            .unwrap()
            .map(|raw| raw.parse().unwrap())
    }

    pub fn neighbor_score(&self, item: &str, neighbor: &str) -> Option<f64> {
        let item = self.recommender.items().resolve(item).unwrap()?;
        let neighbor = self.recommender.items().resolve(neighbor).unwrap()?;
        self.store
            .zscore(&format!("cf:z:i:{item}:s"), &neighbor.to_string())
            .unwrap()
    }

    fn pair_key(&self, a: &str, b: &str) -> Option<String> {
        let a = self.recommender.items().resolve(a).unwrap()?.to_string();
        let b = self.recommender.items().resolve(b).unwrap()?.to_string();
        Some(if a <= b {
            format!("{a}:{b}")
        } else {
            format!("{b}:{a}")
        })
    }
}

impl Default for TestRec {
    fn default() -> Self {
        Self::new()
    }
}
