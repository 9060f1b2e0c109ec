//! # corate
//!
//! Item-based collaborative filtering over an ordered key/value store —
//! interaction recording, incremental item-item similarity, and reranked
//! recommendation lists.
//!
//! All persistent state lives behind the [`Store`] adapter; the recommender
//! itself is stateless between invocations and is meant to run co-located
//! with the host store.
//!
//! # Quick Start
//!
//! ```no_run
//! use corate::{EventKind, MemoryStore, Recommender, RecommenderConfig};
//! use std::sync::Arc;
//!
//! fn main() -> corate::Result<()> {
//!     let store = Arc::new(MemoryStore::new());
//!     let recommender = Recommender::new(RecommenderConfig::default(), store)?;
//!
//!     recommender.record("ava", "solaris", EventKind::Click, None)?;
//!     recommender.record("ava", "dune", EventKind::Purchase, None)?;
//!     recommender.record("kai", "solaris", EventKind::Click, None)?;
//!     recommender.record("kai", "hyperion", EventKind::Click, None)?;
//!
//!     for (token, score) in recommender.recommend("ava", 10, 42)? {
//!         println!("{token} {score}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Components
//!
//! | Component | Purpose | Crate |
//! |-----------|---------|-------|
//! | **Store adapter** | Typed facade over the host store | `corate-store` |
//! | **Interner** | Token ↔ dense id mapping with type tags | `corate-interner` |
//! | **Item-CF engine** | Incremental similarity + scoring | `corate-engine` |
//! | **Rerankers** | Dithering and impression discounting | `corate-rerank` |
//! | **Recommender** | Orchestrates the above per request | this crate |
//!
//! # Architecture
//!
//! The [`Recommender`] facade is the main entry point: it interns tokens,
//! fans writes and reads out over the registered engines, selects the
//! primary engine's list, reranks it with a seeded RNG, and translates ids
//! back to tokens. Engine-returned ids are item-interner ids by system
//! convention.

pub mod recommender;

pub use corate_core::{
    DiscountConfig, DitherConfig, Error, EventKind, Id, Interaction, InternerConfig, ItemCfConfig,
    Recommendation, RecommenderConfig, Result, TokenKind,
};
pub use corate_engine::{ContentEngine, Engine, ItemCfEngine};
pub use corate_interner::Interner;
pub use corate_rerank::{EpsilonDithering, ImpressionDiscount, Reranker};
pub use corate_store::{MemoryStore, Store};
pub use recommender::Recommender;
