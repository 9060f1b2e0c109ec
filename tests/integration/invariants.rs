//! Property tests for the update-protocol invariants
//!
//! Arbitrary interaction sequences must preserve:
//! - similarity symmetry across its three stored copies
//! - item counts equal to the sum of per-user weights
//! - recommendation lists that are empty or normalized to sum 1

use crate::common::*;
use corate::{Engine, ItemCfConfig, ItemCfEngine};
use proptest::prelude::*;
use std::sync::Arc;

const USERS: std::ops::Range<u64> = 1..5;
const ITEMS: std::ops::Range<u64> = 101..106;

fn pair_key(a: u64, b: u64) -> String {
    let (a, b) = (a.to_string(), b.to_string());
    if a <= b {
        format!("{a}:{b}")
    } else {
        format!("{b}:{a}")
    }
}

/// One raw event: weight 0 encodes an impression.
fn event_strategy() -> impl Strategy<Value = (u64, u64, u8)> {
    (USERS, ITEMS, 0..=5u8)
}

fn replay(events: &[(u64, u64, u8)]) -> (ItemCfEngine, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let engine = ItemCfEngine::new(ItemCfConfig::new("cf"), store.clone()).unwrap();
    for &(user, item, weight) in events {
        let interaction = if weight == 0 {
            Interaction::new(item, EventKind::Impression)
        } else {
            Interaction::new(item, EventKind::Click).with_weight(f64::from(weight))
        };
        engine.record(user, &interaction).unwrap();
    }
    (engine, store)
}

proptest! {
    #[test]
    fn similarity_copies_stay_symmetric(events in prop::collection::vec(event_strategy(), 1..40)) {
        let (_engine, store) = replay(&events);

        for a in ITEMS {
            for b in (a + 1)..ITEMS.end {
                let key = pair_key(a, b);
                let canonical: Option<f64> = store
                    .hget("cf:h:i:s", &key)
                    .unwrap()
                    .map(|raw| raw.parse().unwrap());
                let forward = store
                    .zscore(&format!("cf:z:i:{a}:s"), &b.to_string())
                    .unwrap();
                let backward = store
                    .zscore(&format!("cf:z:i:{b}:s"), &a.to_string())
                    .unwrap();
                prop_assert_eq!(canonical, forward);
                prop_assert_eq!(forward, backward);
                if let Some(similarity) = canonical {
                    prop_assert!(similarity.is_finite());
                    prop_assert!(similarity >= 0.0);
                }
            }
        }
    }

    #[test]
    fn item_counts_match_user_weight_sums(events in prop::collection::vec(event_strategy(), 1..40)) {
        let (_engine, store) = replay(&events);

        for item in ITEMS {
            let mut expected = 0.0;
            for user in USERS {
                if let Some(raw) = store
                    .hget(&format!("cf:h:u:{user}:i"), &item.to_string())
                    .unwrap()
                {
                    expected += raw.parse::<f64>().unwrap();
                }
            }
            let count = store
                .zscore("cf:z:i:c", &item.to_string())
                .unwrap()
                .unwrap_or(0.0);
            prop_assert!((count - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn recommendations_are_normalized_or_empty(events in prop::collection::vec(event_strategy(), 1..40)) {
        let (engine, _store) = replay(&events);

        for user in USERS {
            let recommendations = engine.recommend(user, 10).unwrap();
            prop_assert!(recommendations.len() <= 10);
            if recommendations.is_empty() {
                continue;
            }
            let total: f64 = recommendations.iter().map(|r| r.score).sum();
            prop_assert!((total - 1.0).abs() < 1e-9);
            for recommendation in &recommendations {
                prop_assert!(recommendation.score >= 0.0);
            }
            for pair in recommendations.windows(2) {
                prop_assert!(pair[0].score >= pair[1].score);
            }
        }
    }

    #[test]
    fn impressions_touch_nothing(events in prop::collection::vec((USERS, ITEMS), 1..20)) {
        let store = Arc::new(MemoryStore::new());
        let engine = ItemCfEngine::new(ItemCfConfig::new("cf"), store.clone()).unwrap();
        for &(user, item) in &events {
            engine
                .record(user, &Interaction::new(item, EventKind::Impression))
                .unwrap();
        }
        prop_assert_eq!(store.key_count(), 0);
    }
}

// ============================================================================
// Weight monotonicity (targeted, not property-based)
// ============================================================================

#[test]
fn weaker_event_changes_no_state() {
    let test = TestRec::new();
    test.buy("ava", "solaris");
    test.click("ava", "dune");
    test.click("kai", "solaris");
    test.click("kai", "dune");

    let before = (
        test.user_weight("ava", "solaris"),
        test.item_count("solaris"),
        test.pair_count("solaris", "dune"),
        test.similarity("solaris", "dune"),
        test.neighbor_score("solaris", "dune"),
    );

    // Purchase (5) already recorded; a click (2) must be a no-op.
    test.click("ava", "solaris");

    let after = (
        test.user_weight("ava", "solaris"),
        test.item_count("solaris"),
        test.pair_count("solaris", "dune"),
        test.similarity("solaris", "dune"),
        test.neighbor_score("solaris", "dune"),
    );
    assert_eq!(before, after);
}
