//! In-memory store
//!
//! ## Design
//!
//! `MemoryStore` keeps every key in a single `RwLock<FxHashMap>`. Each
//! entry is typed (string, hash, or sorted set) and cross-type access fails
//! with `WrongType`, matching the host store's behavior. Sorted sets are
//! hash maps ordered lazily at query time; range queries are rare enough
//! here that maintaining an ordered index is not worth it.
//!
//! ## Thread Safety
//!
//! `MemoryStore` is `Send + Sync`. Each trait method takes the lock once,
//! so the per-call atomicity the adapter contract promises holds trivially.

use crate::Store;
use corate_core::{Error, Result};
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::cmp::Ordering;

/// One typed value slot.
#[derive(Debug, Clone)]
enum Entry {
    Text(String),
    Hash(FxHashMap<String, String>),
    Sorted(FxHashMap<String, f64>),
}

/// In-memory implementation of the [`Store`] adapter.
///
/// Backs the test suites and the demo binary. State lives for the lifetime
/// of the process; there is no persistence.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<FxHashMap<String, Entry>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        MemoryStore::default()
    }

    /// Number of live keys, across all types
    pub fn key_count(&self) -> usize {
        self.entries.read().len()
    }
}

fn wrong_type(key: &str) -> Error {
    Error::WrongType { key: key.to_string() }
}

impl Store for MemoryStore {
    fn hget(&self, key: &str, field: &str) -> Result<Option<String>> {
        let entries = self.entries.read();
        match entries.get(key) {
            None => Ok(None),
            Some(Entry::Hash(hash)) => Ok(hash.get(field).cloned()),
            Some(_) => Err(wrong_type(key)),
        }
    }

    fn hset(&self, key: &str, field: &str, value: &str) -> Result<bool> {
        let mut entries = self.entries.write();
        match entries
            .entry(key.to_string())
            .or_insert_with(|| Entry::Hash(FxHashMap::default()))
        {
            Entry::Hash(hash) => Ok(hash.insert(field.to_string(), value.to_string()).is_none()),
            _ => Err(wrong_type(key)),
        }
    }

    fn hdel(&self, key: &str, fields: &[&str]) -> Result<u64> {
        let mut entries = self.entries.write();
        let removed = match entries.get_mut(key) {
            None => 0,
            Some(Entry::Hash(hash)) => fields
                .iter()
                .filter(|field| hash.remove(**field).is_some())
                .count() as u64,
            Some(_) => return Err(wrong_type(key)),
        };
        if let Some(Entry::Hash(hash)) = entries.get(key) {
            if hash.is_empty() {
                entries.remove(key);
            }
        }
        Ok(removed)
    }

    fn hlen(&self, key: &str) -> Result<u64> {
        let entries = self.entries.read();
        match entries.get(key) {
            None => Ok(0),
            Some(Entry::Hash(hash)) => Ok(hash.len() as u64),
            Some(_) => Err(wrong_type(key)),
        }
    }

    fn hgetall(&self, key: &str) -> Result<Vec<(String, String)>> {
        let entries = self.entries.read();
        match entries.get(key) {
            None => Ok(Vec::new()),
            Some(Entry::Hash(hash)) => {
                let mut pairs: Vec<(String, String)> = hash
                    .iter()
                    .map(|(field, value)| (field.clone(), value.clone()))
                    .collect();
                pairs.sort_by(|a, b| a.0.cmp(&b.0));
                Ok(pairs)
            }
            Some(_) => Err(wrong_type(key)),
        }
    }

    fn hmget(&self, key: &str, fields: &[&str]) -> Result<Vec<Option<String>>> {
        let entries = self.entries.read();
        match entries.get(key) {
            None => Ok(vec![None; fields.len()]),
            Some(Entry::Hash(hash)) => Ok(fields
                .iter()
                .map(|field| hash.get(*field).cloned())
                .collect()),
            Some(_) => Err(wrong_type(key)),
        }
    }

    fn del(&self, keys: &[&str]) -> Result<u64> {
        let mut entries = self.entries.write();
        Ok(keys
            .iter()
            .filter(|key| entries.remove(**key).is_some())
            .count() as u64)
    }

    fn incrby(&self, key: &str, delta: i64) -> Result<i64> {
        let mut entries = self.entries.write();
        match entries
            .entry(key.to_string())
            .or_insert_with(|| Entry::Text("0".to_string()))
        {
            Entry::Text(raw) => {
                let current: i64 = raw.parse().map_err(|_| Error::BadNumber {
                    key: key.to_string(),
                    raw: raw.clone(),
                })?;
                let next = current + delta;
                *raw = next.to_string();
                Ok(next)
            }
            _ => Err(wrong_type(key)),
        }
    }

    fn zadd(&self, key: &str, score: f64, member: &str) -> Result<bool> {
        let mut entries = self.entries.write();
        match entries
            .entry(key.to_string())
            .or_insert_with(|| Entry::Sorted(FxHashMap::default()))
        {
            Entry::Sorted(sorted) => Ok(sorted.insert(member.to_string(), score).is_none()),
            _ => Err(wrong_type(key)),
        }
    }

    fn zincrby(&self, key: &str, delta: f64, member: &str) -> Result<f64> {
        let mut entries = self.entries.write();
        match entries
            .entry(key.to_string())
            .or_insert_with(|| Entry::Sorted(FxHashMap::default()))
        {
            Entry::Sorted(sorted) => {
                let score = sorted.entry(member.to_string()).or_insert(0.0);
                *score += delta;
                Ok(*score)
            }
            _ => Err(wrong_type(key)),
        }
    }

    fn zscore(&self, key: &str, member: &str) -> Result<Option<f64>> {
        let entries = self.entries.read();
        match entries.get(key) {
            None => Ok(None),
            Some(Entry::Sorted(sorted)) => Ok(sorted.get(member).copied()),
            Some(_) => Err(wrong_type(key)),
        }
    }

    fn zrevrange_by_score(&self, key: &str, limit: usize) -> Result<Vec<(String, f64)>> {
        let entries = self.entries.read();
        match entries.get(key) {
            None => Ok(Vec::new()),
            Some(Entry::Sorted(sorted)) => {
                let mut members: Vec<(String, f64)> = sorted
                    .iter()
                    .map(|(member, score)| (member.clone(), *score))
                    .collect();
                members.sort_by(|a, b| {
                    b.1.partial_cmp(&a.1)
                        .unwrap_or(Ordering::Equal)
                        .then_with(|| b.0.cmp(&a.0))
                });
                members.truncate(limit);
                Ok(members)
            }
            Some(_) => Err(wrong_type(key)),
        }
    }

    fn zunionstore(&self, dest: &str, keys: &[&str], weights: &[f64]) -> Result<u64> {
        let mut entries = self.entries.write();
        let mut union: FxHashMap<String, f64> = FxHashMap::default();
        for (i, key) in keys.iter().enumerate() {
            let weight = weights.get(i).copied().unwrap_or(1.0);
            match entries.get(*key) {
                None => {}
                Some(Entry::Sorted(sorted)) => {
                    for (member, score) in sorted {
                        *union.entry(member.clone()).or_insert(0.0) += weight * score;
                    }
                }
                Some(_) => return Err(wrong_type(key)),
            }
        }
        let cardinality = union.len() as u64;
        if cardinality == 0 {
            entries.remove(dest);
        } else {
            entries.insert(dest.to_string(), Entry::Sorted(union));
        }
        Ok(cardinality)
    }
}
