//! Store adapter for corate
//!
//! The engines never talk to the host key/value store directly; they go
//! through the [`Store`] trait, a thin typed facade with one method per
//! command the core uses. The trait is the seam that lets every engine be
//! exercised against [`MemoryStore`] in tests, and lets deployments plug in
//! the real host store.
//!
//! ## Absence
//!
//! The host store distinguishes "no value" replies in more than one way;
//! the adapter collapses all of them to `Option::None`. Reads never fail on
//! a missing key or field.
//!
//! ## Atomicity
//!
//! Every method is atomic per call. The adapter offers no multi-key
//! transactions; compound read-modify-write sequences tolerate interleaving
//! at the call boundary.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod memory;

pub use memory::MemoryStore;

use corate_core::Result;

/// Typed facade over the host key/value store.
///
/// One method per command. Implementations must be `Send + Sync`; the
/// facade is shared across every component holding the same store handle.
pub trait Store: Send + Sync {
    /// Read one hash field. `None` if the key or field is absent.
    fn hget(&self, key: &str, field: &str) -> Result<Option<String>>;

    /// Write one hash field. Returns `true` if the field was newly created.
    fn hset(&self, key: &str, field: &str, value: &str) -> Result<bool>;

    /// Delete hash fields. Returns how many existed.
    fn hdel(&self, key: &str, fields: &[&str]) -> Result<u64>;

    /// Number of fields in a hash. 0 for an absent key.
    fn hlen(&self, key: &str) -> Result<u64>;

    /// All field/value pairs of a hash, sorted by field for determinism.
    fn hgetall(&self, key: &str) -> Result<Vec<(String, String)>>;

    /// Read several hash fields at once, preserving request order.
    fn hmget(&self, key: &str, fields: &[&str]) -> Result<Vec<Option<String>>>;

    /// Delete whole keys. Returns how many existed.
    fn del(&self, keys: &[&str]) -> Result<u64>;

    /// Add `delta` to the integer stored at `key`, creating it at 0 first.
    /// Returns the new value.
    fn incrby(&self, key: &str, delta: i64) -> Result<i64>;

    /// Set a sorted-set member's score. Returns `true` if the member was
    /// newly added.
    fn zadd(&self, key: &str, score: f64, member: &str) -> Result<bool>;

    /// Add `delta` to a sorted-set member's score, creating it at 0 first.
    /// Returns the new score.
    fn zincrby(&self, key: &str, delta: f64, member: &str) -> Result<f64>;

    /// Read a sorted-set member's score. `None` if absent.
    fn zscore(&self, key: &str, member: &str) -> Result<Option<f64>>;

    /// Up to `limit` members ordered by score descending (ties broken by
    /// reverse-lexicographic member order), with their scores.
    fn zrevrange_by_score(&self, key: &str, limit: usize) -> Result<Vec<(String, f64)>>;

    /// Store the weighted union of the source sorted sets at `dest`,
    /// replacing it. Missing sources are treated as empty; missing weights
    /// default to 1.0. Returns the cardinality of the destination.
    fn zunionstore(&self, dest: &str, keys: &[&str], weights: &[f64]) -> Result<u64>;
}
