//! Recommendation engines
//!
//! This crate provides:
//! - [`Engine`] trait, the four-operation contract every engine exposes
//! - [`ItemCfEngine`], incremental item-based collaborative filtering
//! - [`ContentEngine`], the null content-based implementation
//!
//! Engines speak dense interner ids; translating external tokens in and out
//! is the orchestrator's job. All engine state lives behind the
//! [`Store`](corate_store::Store) adapter, so an engine value is a cheap
//! handle that can be reconstructed at any time.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod content;
mod item_cf;

pub use content::ContentEngine;
pub use item_cf::ItemCfEngine;

use corate_core::{Id, Interaction, Recommendation, Result};

/// The contract every recommendation engine exposes.
///
/// Engines must be `Send + Sync`; the orchestrator fans a request out over
/// a collection of `Box<dyn Engine>`.
pub trait Engine: Send + Sync {
    /// Name for engine selection and logging
    fn name(&self) -> &str;

    /// Register a user ahead of any interaction. Optional; the default is a
    /// no-op because engines create user state lazily.
    fn add_user(&self, user: Id) -> Result<()> {
        let _ = user;
        Ok(())
    }

    /// Register an item ahead of any interaction. Optional no-op, as above.
    fn add_item(&self, item: Id) -> Result<()> {
        let _ = item;
        Ok(())
    }

    /// Record one user/item event, updating engine state.
    fn record(&self, user: Id, interaction: &Interaction) -> Result<()>;

    /// Produce a ranked recommendation list for `user`. Pure query.
    fn recommend(&self, user: Id, limit: usize) -> Result<Vec<Recommendation>>;
}
