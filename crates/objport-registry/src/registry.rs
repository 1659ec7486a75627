//! Concurrent object registration and retrieval by token.
//!
//! The registry keeps two maps: tokens to entries, and a value-equality
//! reverse index back to tokens. The reverse index is what makes
//! registration idempotent - registering an equal value a second time
//! returns the first call's token instead of minting another.
//!
//! Entries accumulate for the life of the process. There is no eviction;
//! an explicit `remove` (driven by a client delete) is the only way an
//! entry dies. Callers holding long-lived registries should expect the
//! resident set to grow with traffic.

use crate::entry::{ObjectInfo, RegistryEntry};
use crate::object::{ObjectKey, RuntimeObject};
use crate::token::Token;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Concurrent bidirectional store mapping tokens to live objects and back.
///
/// All operations are safe to call from any number of threads without
/// caller-side locking; nothing here blocks on I/O. Lookups never fail -
/// an unknown token is an expected condition at the protocol boundary and
/// is answered with `None`/`false`.
pub struct ObjectRegistry {
    /// Forward map: token to entry.
    by_token: DashMap<Token, Arc<RegistryEntry>>,

    /// Reverse index: value equality to token, for dedup.
    by_value: DashMap<ObjectKey, Token>,
}

impl ObjectRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            by_token: DashMap::new(),
            by_value: DashMap::new(),
        }
    }

    /// Registers an object, returning its token.
    ///
    /// Idempotent per value equality: if an equal object (same concrete
    /// type, `eq_object` true) is already registered, the existing token is
    /// returned and `created_by` is ignored. The insert-if-absent runs
    /// under the reverse index's per-shard entry lock, and the forward map
    /// is populated inside that critical section - so of two racing
    /// registrations of the same value exactly one mints, and the loser
    /// only ever observes a token that already resolves.
    pub fn register(&self, object: Arc<dyn RuntimeObject>, created_by: &str) -> Token {
        let key = ObjectKey::new(Arc::clone(&object));
        match self.by_value.entry(key) {
            Entry::Occupied(existing) => existing.get().clone(),
            Entry::Vacant(slot) => {
                let mut token = Token::mint();
                while self.by_token.contains_key(&token) {
                    token = Token::mint();
                }

                let entry = Arc::new(RegistryEntry::new(token.clone(), object, created_by));
                self.by_token.insert(token.clone(), entry);
                slot.insert(token.clone());

                debug!(token = %token, created_by, "registered object");
                token
            }
        }
    }

    /// Looks up an entry by token. Does not bump the last-used time.
    pub fn find(&self, token: &Token) -> Option<Arc<RegistryEntry>> {
        self.by_token.get(token).map(|entry| Arc::clone(entry.value()))
    }

    /// Resolves a token to its object, marking the entry as used.
    ///
    /// This is the deserialization path: repeated resolution yields the
    /// same shared instance, never a copy.
    pub fn resolve(&self, token: &Token) -> Option<Arc<dyn RuntimeObject>> {
        let entry = self.find(token)?;
        entry.touch();
        Some(entry.object())
    }

    /// Bumps an entry's last-used time. `false` if the token is unknown.
    pub fn touch(&self, token: &Token) -> bool {
        match self.find(token) {
            Some(entry) => {
                entry.touch();
                true
            }
            None => false,
        }
    }

    /// True if the token is currently registered.
    pub fn contains(&self, token: &Token) -> bool {
        self.by_token.contains_key(token)
    }

    /// The token an object is currently registered under, if any.
    pub fn token_for(&self, object: &Arc<dyn RuntimeObject>) -> Option<Token> {
        let key = ObjectKey::new(Arc::clone(object));
        self.by_value.get(&key).map(|token| token.value().clone())
    }

    /// Removes an entry. `false` if the token was not registered.
    ///
    /// The reverse mapping is removed only while it still points at this
    /// token, so a racing re-registration is never stripped of its index -
    /// and a later `register` of the same value mints a fresh token rather
    /// than resurrecting the removed one.
    pub fn remove(&self, token: &Token) -> bool {
        let Some((_, entry)) = self.by_token.remove(token) else {
            return false;
        };

        let key = ObjectKey::new(entry.object());
        self.by_value.remove_if(&key, |_, mapped| mapped == token);

        debug!(token = %token, "removed object");
        true
    }

    /// All currently registered tokens, in no particular order.
    pub fn tokens(&self) -> Vec<Token> {
        self.by_token.iter().map(|entry| entry.key().clone()).collect()
    }

    /// Metadata projection for a token, if registered.
    pub fn info(&self, token: &Token) -> Option<ObjectInfo> {
        self.find(token).map(|entry| entry.info())
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.by_token.len()
    }

    /// True if no entries are registered.
    pub fn is_empty(&self) -> bool {
        self.by_token.is_empty()
    }
}

impl Default for ObjectRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ObjectRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectRegistry")
            .field("entries", &self.len())
            .finish()
    }
}
