//! Token interner
//!
//! Assigns dense integer ids to opaque external tokens (user names, item
//! skus) and maps them back, with a type tag per id. All state lives in the
//! store under four keys owned by the interner's prefix:
//!
//! - `<prefix>:id` — id counter; its value is the highest id ever issued
//! - `<prefix>:fh` — token → id
//! - `<prefix>:rh` — id → token
//! - `<prefix>:th` — id → kind code
//!
//! Ids are allocated from the counter via an atomic increment and are never
//! reused, not even after [`Interner::remove`]. The counter increment and
//! the three hash writes are separate store calls: two racing writers can
//! burn an id on the same token, but a written id always resolves
//! consistently. Callers needing strict one-id-per-token must serialize
//! writers per prefix.

#![warn(missing_docs)]
#![warn(clippy::all)]

use corate_core::{Error, Id, InternerConfig, Result, TokenKind};
use corate_store::Store;
use std::sync::Arc;
use tracing::debug;

/// Bidirectional token ↔ id map backed by the store.
///
/// Logically stateless: the struct holds only its prefix and the store
/// handle, so clones and re-constructions over the same prefix see the same
/// mapping.
pub struct Interner {
    prefix: String,
    store: Arc<dyn Store>,
}

impl Interner {
    /// Create an interner over `store`, owning `config.prefix`.
    ///
    /// # Errors
    /// `InvalidConfig` if the prefix is empty.
    pub fn new(config: InternerConfig, store: Arc<dyn Store>) -> Result<Self> {
        config.validate()?;
        Ok(Interner {
            prefix: config.prefix,
            store,
        })
    }

    /// The key prefix this interner owns
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    fn counter_key(&self) -> String {
        format!("{}:id", self.prefix)
    }

    fn forward_key(&self) -> String {
        format!("{}:fh", self.prefix)
    }

    fn reverse_key(&self) -> String {
        format!("{}:rh", self.prefix)
    }

    fn kind_key(&self) -> String {
        format!("{}:th", self.prefix)
    }

    /// How many tokens are currently interned
    pub fn count(&self) -> Result<u64> {
        self.store.hlen(&self.forward_key())
    }

    /// Drop all four keys. Interned ids become dangling; the counter
    /// restarts from zero.
    pub fn clear(&self) -> Result<()> {
        self.store.del(&[
            &self.counter_key(),
            &self.forward_key(),
            &self.reverse_key(),
            &self.kind_key(),
        ])?;
        Ok(())
    }

    /// Id for `token`, interning it as [`TokenKind::Text`] if unknown.
    pub fn intern(&self, token: &str) -> Result<Id> {
        self.intern_as(token, TokenKind::Text)
    }

    /// Id for `token`, interning it under `kind` if unknown.
    ///
    /// An existing token keeps its original kind; `kind` only applies to a
    /// fresh allocation.
    pub fn intern_as(&self, token: &str, kind: TokenKind) -> Result<Id> {
        if let Some(id) = self.resolve(token)? {
            return Ok(id);
        }
        let id = self.store.incrby(&self.counter_key(), 1)? as Id;
        let id_field = id.to_string();
        self.store.hset(&self.forward_key(), token, &id_field)?;
        self.store.hset(&self.reverse_key(), &id_field, token)?;
        self.store
            .hset(&self.kind_key(), &id_field, &kind.code().to_string())?;
        debug!(token, id, kind = %kind, "interned token");
        Ok(id)
    }

    /// Id for `token` without interning. `None` if unknown.
    pub fn resolve(&self, token: &str) -> Result<Option<Id>> {
        let key = self.forward_key();
        match self.store.hget(&key, token)? {
            None => Ok(None),
            Some(raw) => raw
                .parse::<Id>()
                .map(Some)
                .map_err(|_| Error::BadNumber { key, raw }),
        }
    }

    /// Token for `id`. `None` if the id was never issued or was removed.
    pub fn value_of(&self, id: Id) -> Result<Option<String>> {
        self.store.hget(&self.reverse_key(), &id.to_string())
    }

    /// Kind tag for `id`. `None` if the id was never issued or was removed.
    pub fn kind_of(&self, id: Id) -> Result<Option<TokenKind>> {
        let key = self.kind_key();
        match self.store.hget(&key, &id.to_string())? {
            None => Ok(None),
            Some(raw) => {
                let code: u8 = raw
                    .parse()
                    .map_err(|_| Error::BadNumber { key: key.clone(), raw: raw.clone() })?;
                TokenKind::from_code(code)
                    .map(Some)
                    .ok_or(Error::BadNumber { key, raw })
            }
        }
    }

    /// Forget `token`. Returns `false` if it was not interned.
    ///
    /// The counter is untouched; the freed id is never issued again.
    pub fn remove(&self, token: &str) -> Result<bool> {
        let Some(id) = self.resolve(token)? else {
            return Ok(false);
        };
        let id_field = id.to_string();
        self.store.hdel(&self.forward_key(), &[token])?;
        self.store.hdel(&self.reverse_key(), &[&id_field])?;
        self.store.hdel(&self.kind_key(), &[&id_field])?;
        debug!(token, id, "removed token");
        Ok(true)
    }
}
