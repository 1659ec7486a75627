//! Registry entries and their read-only metadata projection.

use crate::object::RuntimeObject;
use crate::token::Token;
use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;
use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

/// Marker value for "never resolved".
const NEVER_USED: i64 = i64::MIN;

/// The server-side record binding a token to a live object plus provenance.
///
/// Entries are immutable except for the last-used timestamp, which is a
/// relaxed atomic: resolution bumps it without synchronizing with readers,
/// and a lost update under race is acceptable - it is advisory telemetry,
/// not a correctness-bearing field.
pub struct RegistryEntry {
    token: Token,
    object: Arc<dyn RuntimeObject>,
    created_at: DateTime<Utc>,
    created_by: String,
    last_used_millis: AtomicI64,
}

impl RegistryEntry {
    pub(crate) fn new(token: Token, object: Arc<dyn RuntimeObject>, created_by: &str) -> Self {
        // Stored at millisecond granularity to match `last_used`, which is
        // persisted as `timestamp_millis`. Aligning the representations keeps
        // the two timestamps directly comparable.
        let now = Utc::now();
        let created_at = Utc
            .timestamp_millis_opt(now.timestamp_millis())
            .single()
            .unwrap_or(now);
        Self {
            token,
            object,
            created_at,
            created_by: created_by.to_string(),
            last_used_millis: AtomicI64::new(NEVER_USED),
        }
    }

    /// The entry's token.
    pub fn token(&self) -> &Token {
        &self.token
    }

    /// A shared handle to the registered object. The registry keeps the
    /// canonical reference; every resolution hands out the same instance.
    pub fn object(&self) -> Arc<dyn RuntimeObject> {
        Arc::clone(&self.object)
    }

    /// When the entry was created. Stored explicitly; the timestamp encoded
    /// in the token is never consulted.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Free-form provenance tag ("upload", "module:...", a codec tag).
    pub fn created_by(&self) -> &str {
        &self.created_by
    }

    /// When the entry was last resolved, or `None` if it never was.
    pub fn last_used(&self) -> Option<DateTime<Utc>> {
        match self.last_used_millis.load(Ordering::Relaxed) {
            NEVER_USED => None,
            millis => Utc.timestamp_millis_opt(millis).single(),
        }
    }

    /// Marks the entry as used now. Best-effort; see the type docs.
    pub fn touch(&self) {
        self.last_used_millis
            .store(Utc::now().timestamp_millis(), Ordering::Relaxed);
    }

    /// The metadata projection exposed to introspection endpoints.
    pub fn info(&self) -> ObjectInfo {
        ObjectInfo {
            token: self.token.clone(),
            type_name: self.object.type_name().to_string(),
            created_at: self.created_at,
            created_by: self.created_by.clone(),
            last_used: self.last_used(),
        }
    }
}

impl fmt::Debug for RegistryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryEntry")
            .field("token", &self.token)
            .field("class", &self.object.type_name())
            .field("created_by", &self.created_by)
            .finish()
    }
}

/// Read-only view of an entry for listing/debugging surfaces.
///
/// Deliberately excludes the object itself: values leave the process only
/// through the codec, never through a metadata listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectInfo {
    /// The entry's token.
    #[serde(rename = "id")]
    pub token: Token,

    /// Runtime type name, for display only.
    #[serde(rename = "class")]
    pub type_name: String,

    /// Creation time.
    pub created_at: DateTime<Utc>,

    /// Provenance tag supplied at registration.
    pub created_by: String,

    /// Last resolution time, if any.
    pub last_used: Option<DateTime<Utc>>,
}
