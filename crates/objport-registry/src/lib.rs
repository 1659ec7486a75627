//! # objport Registry - tokens for objects that cannot cross the wire
//!
//! A server that exposes runtime objects (images, tables, arbitrary domain
//! values) over JSON needs somewhere to keep the ones that cannot be
//! flattened. This crate is that place: a concurrent, bidirectional store
//! that hands out opaque tokens for live objects and resolves them back to
//! the *same instance* for as long as the entry lives.
//!
//! ## Guarantees
//!
//! | Property | Mechanism |
//! |----------|-----------|
//! | Dedup | Value-equality reverse index; equal values share one token |
//! | Identity | Resolution returns the canonical shared instance, never a copy |
//! | Uniqueness | Timestamped random tokens, re-minted on live collision |
//! | Concurrency | Sharded maps; insert-if-absent is atomic per value |
//! | No surprise eviction | Entries live until an explicit remove |
//!
//! ## Structure
//!
//! ```text
//!        register(value) ──────────┐
//!                                  ▼
//!                    ┌──────────────────────────┐
//!                    │      ObjectRegistry      │
//!                    │                          │
//!    token ◀─────────│  by_value: value → token │
//!                    │  by_token: token → entry │
//!    resolve(token) ─▶                          │
//!                    └──────────────────────────┘
//!                                  │
//!                                  ▼
//!                     RegistryEntry ── info() ──▶ ObjectInfo
//! ```
//!
//! The object contract ([`RuntimeObject`]) also carries the wire-facing
//! classification ([`WireShape`], [`Capability`]) consumed by the codec's
//! serializer dispatch: how a value identifies itself and how it may cross
//! the wire are declared in one place, by the type itself.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let registry = ObjectRegistry::new();
//!
//! let token = registry.register(dataset, "upload");
//! assert!(registry.contains(&token));
//!
//! // Later, a request quotes the token:
//! let same_dataset = registry.resolve(&token).unwrap();
//! ```

mod entry;
mod object;
mod registry;
mod token;

pub use entry::{ObjectInfo, RegistryEntry};
pub use object::{Capability, ObjectKey, RuntimeObject, WireShape};
pub use registry::ObjectRegistry;
pub use token::{Token, TokenParseError, TOKEN_PREFIX};
